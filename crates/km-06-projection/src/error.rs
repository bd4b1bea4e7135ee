//! Error types for projection

use km_01_stats_api::StatsApiError;
use km_04_simulation::SimulationError;
use shared_store::StoreError;
use shared_types::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Stats API error: {0}")]
    Api(#[from] StatsApiError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Invalid value: {0}")]
    Domain(#[from] DomainError),

    #[error("Simulation task failed: {0}")]
    Task(String),
}
