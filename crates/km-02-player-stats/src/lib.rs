//! # Player Stats (km-02)
//!
//! Season strikeout rates for every rostered player, and resolution of the
//! rate used for a pitcher or batter in a matchup.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - K-rate arithmetic, rate provenance, resolver settings
//! - `ports/` - `PlayerStatsStore`
//! - `adapters/` - CSV and in-memory stores
//! - `service/` - roster pull, stat pull, season combining, `KRateResolver`
//!
//! ## Files
//!
//! | Step | Writes |
//! |------|--------|
//! | `RosterPuller` | `players_<season>.csv` |
//! | `StatPuller` | `player_stats_<season>.csv` |
//! | `combine_seasons` | `player_stats.csv` |

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{CsvPlayerStatsStore, MemoryPlayerStatsStore};
pub use domain::*;
pub use error::PlayerStatsError;
pub use ports::{PlayerStatsStore, StatKey};
pub use service::*;
