//! Service layer: pulls, combining and rate resolution.

pub mod combine;
pub mod resolver;
pub mod roster;
pub mod stat_pull;

pub use combine::{combine_seasons, CombineSummary};
pub use resolver::KRateResolver;
pub use roster::RosterPuller;
pub use stat_pull::{StatPuller, DEFAULT_REQUEST_DELAY};
