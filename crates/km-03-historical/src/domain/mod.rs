//! Domain layer: skip accounting and per-game extraction.

pub mod extract;
pub mod skips;

pub use extract::{starts_from_boxscore, GameContext, GameExtraction};
pub use skips::{SkipCounts, SkipReason};
