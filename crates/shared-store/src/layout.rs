//! # Data Directory Layout
//!
//! Where each pipeline file lives. Every command resolves paths through
//! `DataLayout` so file names are defined once.
//!
//! ```text
//! data/
//!   players_<season>.csv
//!   player_stats_<season>.csv
//!   player_stats.csv
//!   historical_ks.csv
//!   historical_ks_sim.csv
//!   today_ks_proj.csv
//!   cached_predictions.csv
//!   cache/schedule_<date>.csv
//!   cache/lineups_<date>.json
//! models/
//!   mlb_exp_lin.json
//!   mlb_p_over_iso.json
//!   calibration_report[_online].json
//!   cal_exp_ks[_online].csv
//!   cal_p_over[_online].csv
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use shared_types::Season;

use crate::error::StoreError;

/// Resolved data and models directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    data_dir: PathBuf,
    models_dir: PathBuf,
}

impl DataLayout {
    pub fn new(data_dir: impl Into<PathBuf>, models_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            models_dir: models_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }

    /// Create the data, cache and models directories.
    pub fn ensure_dirs(&self) -> Result<(), StoreError> {
        for dir in [self.data_dir.clone(), self.cache_dir(), self.models_dir.clone()] {
            fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Data files
    // -------------------------------------------------------------------------

    pub fn players(&self, season: Season) -> PathBuf {
        self.data_dir.join(format!("players_{}.csv", season))
    }

    pub fn player_stats(&self, season: Season) -> PathBuf {
        self.data_dir.join(format!("player_stats_{}.csv", season))
    }

    pub fn combined_stats(&self) -> PathBuf {
        self.data_dir.join("player_stats.csv")
    }

    pub fn historical_ks(&self) -> PathBuf {
        self.data_dir.join("historical_ks.csv")
    }

    pub fn historical_sim(&self) -> PathBuf {
        self.data_dir.join("historical_ks_sim.csv")
    }

    pub fn today_proj(&self) -> PathBuf {
        self.data_dir.join("today_ks_proj.csv")
    }

    pub fn cached_predictions(&self) -> PathBuf {
        self.data_dir.join("cached_predictions.csv")
    }

    pub fn schedule(&self, date: NaiveDate) -> PathBuf {
        self.cache_dir().join(format!("schedule_{}.csv", date.format("%Y-%m-%d")))
    }

    pub fn lineups(&self, date: NaiveDate) -> PathBuf {
        self.cache_dir().join(format!("lineups_{}.json", date.format("%Y-%m-%d")))
    }

    // -------------------------------------------------------------------------
    // Model files
    // -------------------------------------------------------------------------

    pub fn linear_model(&self) -> PathBuf {
        self.models_dir.join("mlb_exp_lin.json")
    }

    pub fn isotonic_model(&self) -> PathBuf {
        self.models_dir.join("mlb_p_over_iso.json")
    }

    /// Calibration report; `online` selects the cache-refit variant.
    pub fn report(&self, online: bool) -> PathBuf {
        self.models_dir.join(with_suffix("calibration_report", online, "json"))
    }

    /// Fitted linear map sampled at evenly spaced points.
    pub fn exp_curve(&self, online: bool) -> PathBuf {
        self.models_dir.join(with_suffix("cal_exp_ks", online, "csv"))
    }

    /// Reliability curve of the raw probabilities.
    pub fn prob_curve(&self, online: bool) -> PathBuf {
        self.models_dir.join(with_suffix("cal_p_over", online, "csv"))
    }
}

fn with_suffix(stem: &str, online: bool, ext: &str) -> String {
    if online {
        format!("{}_online.{}", stem, ext)
    } else {
        format!("{}.{}", stem, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let layout = DataLayout::new("/app/data", "/app/models");
        let season = Season::new(2024).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();

        assert_eq!(layout.players(season), PathBuf::from("/app/data/players_2024.csv"));
        assert_eq!(
            layout.schedule(date),
            PathBuf::from("/app/data/cache/schedule_2025-07-10.csv")
        );
        assert_eq!(
            layout.lineups(date),
            PathBuf::from("/app/data/cache/lineups_2025-07-10.json")
        );
        assert_eq!(
            layout.report(true),
            PathBuf::from("/app/models/calibration_report_online.json")
        );
        assert_eq!(layout.prob_curve(false), PathBuf::from("/app/models/cal_p_over.csv"));
    }

    #[test]
    fn test_ensure_dirs() {
        let root = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(root.path().join("data"), root.path().join("models"));

        layout.ensure_dirs().unwrap();

        assert!(layout.cache_dir().is_dir());
        assert!(layout.models_dir().is_dir());
    }
}
