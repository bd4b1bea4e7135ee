//! Prediction cache merge and the join against realised strikeouts.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use km_05_calibration::CalibrationSample;
use shared_types::{GamePk, PlayerId, ProjectionRow, Side, StartRecord};

type RowKey = (NaiveDate, GamePk, Side);

fn row_key(row: &ProjectionRow) -> RowKey {
    (row.date, row.game_id, row.side)
}

/// Append `rows` to `cache`. A cached row with the same date, game and side
/// as a new row is dropped; within `rows` the last occurrence wins.
pub fn append_predictions(cache: Vec<ProjectionRow>, rows: &[ProjectionRow]) -> Vec<ProjectionRow> {
    let mut latest: HashMap<RowKey, usize> = HashMap::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        latest.insert(row_key(row), i);
    }

    let mut merged: Vec<ProjectionRow> = cache
        .into_iter()
        .filter(|row| !latest.contains_key(&row_key(row)))
        .collect();
    merged.extend(
        rows.iter()
            .enumerate()
            .filter(|(i, row)| latest.get(&row_key(row)) == Some(i))
            .map(|(_, row)| row.clone()),
    );
    merged
}

/// Cached keys that `rows` would replace.
pub fn replaced_count(cache: &[ProjectionRow], rows: &[ProjectionRow]) -> usize {
    let incoming: HashSet<RowKey> = rows.iter().map(row_key).collect();
    cache.iter().filter(|row| incoming.contains(&row_key(row))).count()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Joined {
    pub samples: Vec<CalibrationSample>,
    /// Predictions with no matching start.
    pub unmatched: usize,
}

/// Pair each prediction with the start it projected, matched on game, side
/// and pitcher.
pub fn join_with_outcomes(predictions: &[ProjectionRow], starts: &[StartRecord]) -> Joined {
    let actual: HashMap<(GamePk, Side, PlayerId), u32> = starts
        .iter()
        .map(|s| ((s.game_pk, s.side, s.pitcher_id), s.k_actual))
        .collect();

    let mut joined = Joined::default();
    for row in predictions {
        match actual.get(&(row.game_id, row.side, row.pitcher_id)) {
            Some(&k) => joined.samples.push(CalibrationSample {
                exp_ks: row.exp_raw,
                p_over: row.p_raw,
                k_actual: f64::from(k),
            }),
            None => joined.unmatched += 1,
        }
    }
    joined
}
