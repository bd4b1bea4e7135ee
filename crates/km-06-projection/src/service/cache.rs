//! Slate caches and the rolling prediction cache.

use std::path::Path;

use chrono::NaiveDate;
use km_05_calibration::CalibrationSample;
use shared_store::{read_csv, read_csv_if_exists, read_json, write_csv, write_json, DataLayout, StoreError};
use shared_types::{ProjectionRow, StartRecord};
use tracing::{debug, info, warn};

use crate::domain::predictions::{append_predictions, join_with_outcomes, replaced_count};
use crate::domain::slate::{LineupCache, Slate};
use crate::error::ProjectionError;

/// Write `schedule_<date>.csv` and `lineups_<date>.json`.
pub fn save_slate(layout: &DataLayout, slate: &Slate) -> Result<(), ProjectionError> {
    let schedule = layout.schedule(slate.date);
    write_csv(&schedule, &slate.schedule_rows())?;
    let lineups = slate.lineup_cache();
    write_json(&layout.lineups(slate.date), &lineups)?;
    info!(
        date = %slate.date,
        games = slate.games.len(),
        lineups = lineups.games(),
        path = %schedule.display(),
        "Cached slate"
    );
    Ok(())
}

/// Lineups cached for `date`, empty if none were saved.
pub fn load_lineup_cache(layout: &DataLayout, date: NaiveDate) -> Result<LineupCache, ProjectionError> {
    match read_json(&layout.lineups(date)) {
        Ok(cache) => Ok(cache),
        Err(StoreError::NotFound(path)) => {
            debug!(path = %path.display(), "No lineup cache");
            Ok(LineupCache::default())
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSummary {
    pub added: usize,
    pub replaced: usize,
    pub total: usize,
}

/// Append a day's projections to the prediction cache.
pub fn cache_predictions(pred_path: &Path, cache_path: &Path) -> Result<CacheSummary, ProjectionError> {
    let rows: Vec<ProjectionRow> = read_csv(pred_path)?;
    let cache: Vec<ProjectionRow> = read_csv_if_exists(cache_path)?.unwrap_or_default();

    let replaced = replaced_count(&cache, &rows);
    let merged = append_predictions(cache, &rows);
    write_csv(cache_path, &merged)?;

    let summary = CacheSummary {
        added: rows.len(),
        replaced,
        total: merged.len(),
    };
    info!(
        added = summary.added,
        replaced = summary.replaced,
        total = summary.total,
        path = %cache_path.display(),
        "Updated prediction cache"
    );
    Ok(summary)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnlineSamples {
    pub samples: Vec<CalibrationSample>,
    /// Predictions with no realised start yet.
    pub unmatched: usize,
    /// Predictions made against another line.
    pub other_line: usize,
}

/// Cached predictions for `line` joined with realised strikeouts.
pub fn online_samples(pred_path: &Path, truth_path: &Path, line: f64) -> Result<OnlineSamples, ProjectionError> {
    let predictions: Vec<ProjectionRow> = read_csv(pred_path)?;
    let truth: Vec<StartRecord> = read_csv(truth_path)?;

    let total = predictions.len();
    let same_line: Vec<ProjectionRow> = predictions
        .into_iter()
        .filter(|p| (p.line - line).abs() < 1e-9)
        .collect();
    let other_line = total - same_line.len();
    if other_line > 0 {
        warn!(other_line, line, "Ignoring cached predictions made for another line");
    }

    let joined = join_with_outcomes(&same_line, &truth);
    info!(
        matched = joined.samples.len(),
        unmatched = joined.unmatched,
        "Joined predictions with outcomes"
    );
    Ok(OnlineSamples {
        samples: joined.samples,
        unmatched: joined.unmatched,
        other_line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::predictions::tests::row;
    use crate::domain::slate::tests::side;
    use crate::domain::slate::SlateGame;
    use shared_types::{GamePk, Lineup, PlayerId, Season, Side};

    fn layout(dir: &Path) -> DataLayout {
        DataLayout::new(dir.join("data"), dir.join("models"))
    }

    #[test]
    fn test_slate_cache_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout(dir.path());
        let date = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
        assert!(load_lineup_cache(&layout, date).unwrap().is_empty());

        let slate = Slate {
            date,
            games: vec![SlateGame {
                game_pk: GamePk(9),
                date,
                status: "Pre-Game".into(),
                away: side(147, Some(1), Some(100)),
                home: side(111, Some(2), None),
            }],
        };
        save_slate(&layout, &slate).unwrap();

        assert!(layout.schedule(date).exists());
        let cache = load_lineup_cache(&layout, date).unwrap();
        assert_eq!(cache.get(GamePk(9), Side::Away).unwrap().batters()[0], PlayerId(100));
        assert_eq!(cache.get(GamePk(9), Side::Home), None);
    }

    #[test]
    fn test_cache_predictions_replaces_same_start() {
        let dir = tempfile::tempdir().unwrap();
        let pred = dir.path().join("today.csv");
        let cache = dir.path().join("cached.csv");

        write_csv(&pred, &[row(1, 1, Side::Away, 5.0), row(1, 1, Side::Home, 4.0)]).unwrap();
        let first = cache_predictions(&pred, &cache).unwrap();
        assert_eq!(first, CacheSummary { added: 2, replaced: 0, total: 2 });

        write_csv(&pred, &[row(1, 1, Side::Away, 6.0)]).unwrap();
        let second = cache_predictions(&pred, &cache).unwrap();
        assert_eq!(second, CacheSummary { added: 1, replaced: 1, total: 2 });

        let rows: Vec<ProjectionRow> = read_csv(&cache).unwrap();
        assert_eq!(rows[1].exp_raw, 6.0);
    }

    #[test]
    fn test_cache_predictions_needs_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = cache_predictions(&dir.path().join("missing.csv"), &dir.path().join("c.csv")).unwrap_err();
        assert!(matches!(err, ProjectionError::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn test_online_samples_filters_line() {
        let dir = tempfile::tempdir().unwrap();
        let pred = dir.path().join("cached.csv");
        let truth = dir.path().join("truth.csv");

        let mut other = row(1, 2, Side::Away, 4.0);
        other.line = 6.5;
        write_csv(&pred, &[row(1, 1, Side::Away, 5.0), other, row(1, 3, Side::Home, 3.0)]).unwrap();
        write_csv(
            &truth,
            &[StartRecord {
                game_pk: GamePk(1),
                date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                park_id: None,
                season: Season::new(2025).unwrap(),
                side: Side::Away,
                pitcher_id: PlayerId(501),
                k_actual: 8,
                lineup_ids: Lineup::new((1..=9).map(PlayerId).collect()).unwrap(),
            }],
        )
        .unwrap();

        let online = online_samples(&pred, &truth, 5.5).unwrap();
        assert_eq!(online.other_line, 1);
        assert_eq!(online.unmatched, 1);
        assert_eq!(online.samples.len(), 1);
        assert_eq!(online.samples[0].k_actual, 8.0);
    }
}
