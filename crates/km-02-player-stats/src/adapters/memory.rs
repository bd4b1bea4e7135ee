//! In-memory K-rate store.

use std::collections::HashMap;

use parking_lot::RwLock;
use shared_store::StoreError;
use shared_types::{PlayerId, PlayerStatLine, Season, StatGroup};

use crate::ports::outbound::{key_of, PlayerStatsStore, StatKey};

/// Lines in insertion order with a key index.
#[derive(Debug, Default)]
pub(crate) struct StatTable {
    lines: Vec<PlayerStatLine>,
    index: HashMap<StatKey, usize>,
}

impl StatTable {
    pub(crate) fn from_lines(lines: Vec<PlayerStatLine>) -> Self {
        let mut table = Self::default();
        for line in lines {
            table.upsert(line);
        }
        table
    }

    pub(crate) fn get(&self, key: &StatKey) -> Option<&PlayerStatLine> {
        self.index.get(key).map(|&i| &self.lines[i])
    }

    /// Later lines for the same key replace earlier ones.
    pub(crate) fn upsert(&mut self, line: PlayerStatLine) {
        match self.index.get(&key_of(&line)) {
            Some(&i) => self.lines[i] = line,
            None => {
                self.index.insert(key_of(&line), self.lines.len());
                self.lines.push(line);
            }
        }
    }

    pub(crate) fn lines(&self) -> &[PlayerStatLine] {
        &self.lines
    }
}

/// Store that never touches disk.
#[derive(Debug, Default)]
pub struct MemoryPlayerStatsStore {
    table: RwLock<StatTable>,
}

impl MemoryPlayerStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines(lines: Vec<PlayerStatLine>) -> Self {
        Self {
            table: RwLock::new(StatTable::from_lines(lines)),
        }
    }
}

impl PlayerStatsStore for MemoryPlayerStatsStore {
    fn k_rate(&self, season: Season, player: PlayerId, group: StatGroup) -> Option<f64> {
        self.table
            .read()
            .get(&(season, player, group))
            .and_then(|l| l.k_rate)
    }

    fn upsert(&self, line: PlayerStatLine) {
        self.table.write().upsert(line);
    }

    fn lines(&self) -> Vec<PlayerStatLine> {
        self.table.read().lines().to_vec()
    }

    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn line(player: u32, group: StatGroup, k_rate: Option<f64>) -> PlayerStatLine {
        PlayerStatLine {
            player_id: PlayerId(player),
            name: format!("Player {}", player),
            team: "BOS".into(),
            position: if group == StatGroup::Pitching { "P" } else { "1B" }.into(),
            group,
            strikeouts: None,
            plate_appearances: None,
            batters_faced: None,
            innings_pitched: None,
            k_rate,
            k_per_9: None,
            season: Season::new(2024).unwrap(),
        }
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let store = MemoryPlayerStatsStore::with_lines(vec![
            line(1, StatGroup::Pitching, Some(0.2)),
            line(2, StatGroup::Hitting, Some(0.3)),
        ]);
        store.upsert(line(1, StatGroup::Pitching, Some(0.25)));

        let season = Season::new(2024).unwrap();
        assert_eq!(store.k_rate(season, PlayerId(1), StatGroup::Pitching), Some(0.25));
        assert_eq!(store.k_rate(season, PlayerId(1), StatGroup::Hitting), None);
        assert_eq!(store.lines().len(), 2);
        assert_eq!(store.lines()[0].player_id, PlayerId(1));
    }

    #[test]
    fn test_line_without_rate() {
        let store = MemoryPlayerStatsStore::with_lines(vec![line(3, StatGroup::Hitting, None)]);
        let season = Season::new(2024).unwrap();
        assert_eq!(store.k_rate(season, PlayerId(3), StatGroup::Hitting), None);
    }
}
