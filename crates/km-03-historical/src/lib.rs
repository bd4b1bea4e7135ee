//! # Historical Starts (km-03)
//!
//! Builds `historical_ks.csv`: one row per starting pitcher in every final
//! regular-season game, with his strikeout total and the batting order he
//! faced.
//!
//! Games and starts that cannot be used are counted, not fatal:
//!
//! | Counter | Meaning |
//! |---------|---------|
//! | `not_final` | game was not played to a final |
//! | `box_err` | box score request failed |
//! | `no_sp` | a starter could not be identified |
//! | `k_missing` | the starter has no strikeout count |
//! | `bad_lineup` | the opposing order is not nine batters |

pub mod domain;
pub mod error;
pub mod service;

pub use domain::{starts_from_boxscore, GameContext, GameExtraction, SkipCounts, SkipReason};
pub use error::HistoricalError;
pub use service::{save_dataset, Harvest, HistoricalHarvester, DEFAULT_BOXSCORE_DELAY};
