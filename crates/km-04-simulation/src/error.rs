//! Error types for simulation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("Lineup must have 9 batter rates, got {len}")]
    InvalidLineup { len: usize },

    #[error("K-rate must be a probability, got {value}")]
    InvalidRate { value: f64 },
}
