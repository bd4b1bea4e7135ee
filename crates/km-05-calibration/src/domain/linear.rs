//! Linear map from simulated mean strikeouts to actual strikeouts.

use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;

/// `actual ≈ slope · exp_ks + intercept`, fitted by ordinary least squares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCalibrator {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearCalibrator {
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self, CalibrationError> {
        check_pairs(x, y)?;
        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;

        let (mut sxy, mut sxx) = (0.0, 0.0);
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = xi - mean_x;
            sxy += dx * (yi - mean_y);
            sxx += dx * dx;
        }

        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// `points` evenly spaced predictions over `[lo, hi]`.
    pub fn sample_line(&self, lo: f64, hi: f64, points: usize) -> Vec<(f64, f64)> {
        linspace(lo, hi, points)
            .into_iter()
            .map(|x| (x, self.predict(x)))
            .collect()
    }
}

pub(crate) fn check_pairs(x: &[f64], y: &[f64]) -> Result<(), CalibrationError> {
    if x.len() != y.len() {
        return Err(CalibrationError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.is_empty() {
        return Err(CalibrationError::EmptyInput);
    }
    Ok(())
}

pub(crate) fn linspace(lo: f64, hi: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (points - 1) as f64;
            let mut xs: Vec<f64> = (0..points).map(|i| lo + i as f64 * step).collect();
            xs[points - 1] = hi;
            xs
        }
    }
}
