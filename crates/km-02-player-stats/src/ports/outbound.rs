//! # Outbound Ports (Driven Ports)
//!
//! Season K-rates kept between pipeline runs.
//!
//! Production: `CsvPlayerStatsStore` (adapters/csv.rs)
//! Testing: `MemoryPlayerStatsStore` (adapters/memory.rs)

use shared_store::StoreError;
use shared_types::{PlayerId, PlayerStatLine, Season, StatGroup};

/// Store key: one line per player, group and season.
pub type StatKey = (Season, PlayerId, StatGroup);

/// Season stat lines by `(season, player, group)`.
pub trait PlayerStatsStore: Send + Sync {
    /// Stored K-rate; `None` if the player has no line or the line has no rate.
    fn k_rate(&self, season: Season, player: PlayerId, group: StatGroup) -> Option<f64>;

    /// Insert or replace a line.
    fn upsert(&self, line: PlayerStatLine);

    /// Every stored line, in insertion order.
    fn lines(&self) -> Vec<PlayerStatLine>;

    /// Persist pending changes.
    fn flush(&self) -> Result<(), StoreError>;
}

pub(crate) fn key_of(line: &PlayerStatLine) -> StatKey {
    (line.season, line.player_id, line.group)
}
