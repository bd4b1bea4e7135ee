//! Reliability curve for probability forecasts.

use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;

pub const DEFAULT_BINS: usize = 10;

/// One non-empty bin of the reliability curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveBin {
    /// Mean forecast probability in the bin.
    pub mean_predicted: f64,
    /// Share of outcomes that happened.
    pub observed_freq: f64,
    pub count: u64,
}

/// Bin forecasts into `n_bins` uniform bins on [0, 1] and compare the mean
/// forecast with the observed frequency in each. Empty bins are omitted.
///
/// A forecast lying exactly on an inner edge belongs to the lower bin.
pub fn calibration_curve(
    y_true: &[bool],
    y_prob: &[f64],
    n_bins: usize,
) -> Result<Vec<CurveBin>, CalibrationError> {
    if n_bins == 0 {
        return Err(CalibrationError::InvalidBins(n_bins));
    }
    if y_true.len() != y_prob.len() {
        return Err(CalibrationError::LengthMismatch {
            x: y_prob.len(),
            y: y_true.len(),
        });
    }
    if let Some(&bad) = y_prob.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(CalibrationError::ProbabilityOutOfRange { value: bad });
    }

    let step = 1.0 / n_bins as f64;
    let inner_edges: Vec<f64> = (1..n_bins).map(|i| i as f64 * step).collect();

    let mut sums = vec![0.0; n_bins];
    let mut hits = vec![0u64; n_bins];
    let mut counts = vec![0u64; n_bins];
    for (&outcome, &p) in y_true.iter().zip(y_prob) {
        let bin = inner_edges.partition_point(|&edge| edge < p);
        sums[bin] += p;
        counts[bin] += 1;
        if outcome {
            hits[bin] += 1;
        }
    }

    Ok((0..n_bins)
        .filter(|&b| counts[b] > 0)
        .map(|b| CurveBin {
            mean_predicted: sums[b] / counts[b] as f64,
            observed_freq: hits[b] as f64 / counts[b] as f64,
            count: counts[b],
        })
        .collect())
}
