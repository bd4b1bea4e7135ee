//! Error types for the historical harvest

use km_01_stats_api::StatsApiError;
use shared_store::StoreError;
use shared_types::Season;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoricalError {
    #[error("Schedule for season {season} unavailable: {source}")]
    Schedule {
        season: Season,
        #[source]
        source: StatsApiError,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
