//! Error types for player stats

use km_01_stats_api::StatsApiError;
use shared_store::StoreError;
use shared_types::Season;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerStatsError {
    #[error("Stats API error: {0}")]
    Api(#[from] StatsApiError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("No active teams returned for season {0}")]
    NoTeams(Season),

    #[error("None of the requested seasons have a stat file")]
    NoStatFiles,
}
