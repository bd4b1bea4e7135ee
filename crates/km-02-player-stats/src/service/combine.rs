//! Merge per-season stat files into one.

use shared_store::{read_csv_if_exists, write_csv, DataLayout};
use shared_types::{PlayerStatLine, Season};
use tracing::{info, warn};

use crate::error::PlayerStatsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineSummary {
    pub included: Vec<Season>,
    pub missing: Vec<Season>,
    pub rows: usize,
}

/// Concatenate `player_stats_<season>.csv` for each season into
/// `player_stats.csv`. Seasons without a file are skipped.
pub fn combine_seasons(layout: &DataLayout, seasons: &[Season]) -> Result<CombineSummary, PlayerStatsError> {
    let mut all: Vec<PlayerStatLine> = Vec::new();
    let mut included = Vec::new();
    let mut missing = Vec::new();

    for &season in seasons {
        let path = layout.player_stats(season);
        match read_csv_if_exists::<PlayerStatLine>(&path)? {
            Some(rows) => {
                info!(%season, rows = rows.len(), "Adding season stats");
                all.extend(rows);
                included.push(season);
            }
            None => {
                warn!(%season, path = %path.display(), "No stat file for season, skipping");
                missing.push(season);
            }
        }
    }

    if included.is_empty() {
        return Err(PlayerStatsError::NoStatFiles);
    }

    write_csv(&layout.combined_stats(), &all)?;
    info!(rows = all.len(), path = %layout.combined_stats().display(), "Combined player stats");
    Ok(CombineSummary {
        included,
        missing,
        rows: all.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::tests::line;
    use shared_store::read_csv;
    use shared_types::StatGroup;

    #[test]
    fn test_combine_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path().join("data"), dir.path().join("models"));
        let s2024 = Season::new(2024).unwrap();
        let s2025 = Season::new(2025).unwrap();
        write_csv(
            &layout.player_stats(s2024),
            &[line(1, StatGroup::Pitching, Some(0.2)), line(2, StatGroup::Hitting, None)],
        )
        .unwrap();

        let summary = combine_seasons(&layout, &[s2024, s2025]).unwrap();
        assert_eq!(summary.included, vec![s2024]);
        assert_eq!(summary.missing, vec![s2025]);
        assert_eq!(summary.rows, 2);

        let combined: Vec<PlayerStatLine> = read_csv(&layout.combined_stats()).unwrap();
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_nothing_to_combine() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::new(dir.path().join("data"), dir.path().join("models"));
        let result = combine_seasons(&layout, &[Season::new(2023).unwrap()]);
        assert!(matches!(result, Err(PlayerStatsError::NoStatFiles)));
    }
}
