//! CSV-backed K-rate store over a `player_stats*.csv` file.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use shared_store::{read_csv_if_exists, write_csv, StoreError};
use shared_types::{PlayerId, PlayerStatLine, Season, StatGroup};
use tracing::{debug, info};

use crate::adapters::memory::StatTable;
use crate::ports::outbound::PlayerStatsStore;

struct Inner {
    table: StatTable,
    dirty: bool,
}

/// Loads a stat file on open; `flush` rewrites it only after an upsert.
pub struct CsvPlayerStatsStore {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl CsvPlayerStatsStore {
    /// Open `path`; a missing file gives an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let lines: Vec<PlayerStatLine> = read_csv_if_exists(&path)?.unwrap_or_default();
        debug!(path = %path.display(), lines = lines.len(), "Opened stat store");
        Ok(Self {
            path,
            inner: RwLock::new(Inner {
                table: StatTable::from_lines(lines),
                dirty: false,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.inner.read().dirty
    }
}

impl PlayerStatsStore for CsvPlayerStatsStore {
    fn k_rate(&self, season: Season, player: PlayerId, group: StatGroup) -> Option<f64> {
        self.inner
            .read()
            .table
            .get(&(season, player, group))
            .and_then(|l| l.k_rate)
    }

    fn upsert(&self, line: PlayerStatLine) {
        let mut inner = self.inner.write();
        inner.table.upsert(line);
        inner.dirty = true;
    }

    fn lines(&self) -> Vec<PlayerStatLine> {
        self.inner.read().table.lines().to_vec()
    }

    fn flush(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        if !inner.dirty {
            return Ok(());
        }
        write_csv(&self.path, inner.table.lines())?;
        inner.dirty = false;
        info!(path = %self.path.display(), lines = inner.table.lines().len(), "Saved stat store");
        Ok(())
    }
}
