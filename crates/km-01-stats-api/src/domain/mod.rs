//! Domain layer: Stats API payloads and box score parsing.

pub mod boxscore;
pub mod types;

pub use boxscore::{extract_lineup, starting_pitcher, strikeouts_for};
pub use types::*;
