//! # Isotonic Calibration
//!
//! Non-decreasing map from simulated P(K ≥ L) to observed frequency.
//!
//! Fitting:
//! 1. sort by x and pool equal x values into one weighted point;
//! 2. pool adjacent violators until the fitted values are non-decreasing;
//! 3. keep only the points needed to reproduce the step function under
//!    linear interpolation.
//!
//! Prediction clips to the fitted x range and interpolates linearly between
//! thresholds.

use serde::{Deserialize, Serialize};

use crate::domain::linear::check_pairs;
use crate::error::CalibrationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsotonicCalibrator {
    x_thresholds: Vec<f64>,
    y_thresholds: Vec<f64>,
}

#[derive(Debug, Clone, Copy)]
struct Block {
    sum_wy: f64,
    weight: f64,
    /// Number of unique x values covered.
    len: usize,
}

impl Block {
    fn mean(&self) -> f64 {
        self.sum_wy / self.weight
    }
}

impl IsotonicCalibrator {
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self, CalibrationError> {
        check_pairs(x, y)?;

        let mut order: Vec<usize> = (0..x.len()).collect();
        order.sort_by(|&a, &b| x[a].total_cmp(&x[b]));

        // Pool equal x.
        let mut unique_x: Vec<f64> = Vec::new();
        let mut pooled: Vec<Block> = Vec::new();
        for i in order {
            match (unique_x.last(), pooled.last_mut()) {
                (Some(&last), Some(block)) if last == x[i] => {
                    block.sum_wy += y[i];
                    block.weight += 1.0;
                }
                _ => {
                    unique_x.push(x[i]);
                    pooled.push(Block {
                        sum_wy: y[i],
                        weight: 1.0,
                        len: 1,
                    });
                }
            }
        }

        // Pool adjacent violators.
        let mut stack: Vec<Block> = Vec::with_capacity(pooled.len());
        for block in pooled {
            stack.push(block);
            while stack.len() >= 2 {
                let last = stack[stack.len() - 1];
                let prev = stack[stack.len() - 2];
                if prev.mean() < last.mean() {
                    break;
                }
                stack.pop();
                if let Some(top) = stack.last_mut() {
                    top.sum_wy += last.sum_wy;
                    top.weight += last.weight;
                    top.len += last.len;
                }
            }
        }

        let fitted: Vec<f64> = stack
            .iter()
            .flat_map(|b| std::iter::repeat(b.mean()).take(b.len))
            .collect();

        // Drop interior points of flat runs.
        let n = unique_x.len();
        let mut x_thresholds = Vec::new();
        let mut y_thresholds = Vec::new();
        for i in 0..n {
            let interior = i > 0 && i + 1 < n && fitted[i - 1] == fitted[i] && fitted[i] == fitted[i + 1];
            if !interior {
                x_thresholds.push(unique_x[i]);
                y_thresholds.push(fitted[i]);
            }
        }

        Ok(Self {
            x_thresholds,
            y_thresholds,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        let xs = &self.x_thresholds;
        let ys = &self.y_thresholds;
        let (Some(&first), Some(&last)) = (xs.first(), xs.last()) else {
            return f64::NAN;
        };
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= first {
            return ys[0];
        }
        if x >= last {
            return ys[ys.len() - 1];
        }

        // First threshold strictly greater than x.
        let hi = xs.partition_point(|&t| t <= x);
        let lo = hi - 1;
        let span = xs[hi] - xs[lo];
        if span <= 0.0 {
            return ys[hi];
        }
        ys[lo] + (x - xs[lo]) / span * (ys[hi] - ys[lo])
    }

    pub fn thresholds(&self) -> (&[f64], &[f64]) {
        (&self.x_thresholds, &self.y_thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotone_input_is_kept() {
        let iso = IsotonicCalibrator::fit(&[0.1, 0.2, 0.3], &[0.0, 0.5, 1.0]).unwrap();
        assert_eq!(iso.predict(0.2), 0.5);
        assert!((iso.predict(0.25) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_violators_are_pooled() {
        // 1, 0 at x = 0.2, 0.3 pool to 0.5.
        let iso = IsotonicCalibrator::fit(&[0.1, 0.2, 0.3, 0.4], &[0.0, 1.0, 0.0, 1.0]).unwrap();
        assert_eq!(iso.predict(0.1), 0.0);
        assert_eq!(iso.predict(0.2), 0.5);
        assert_eq!(iso.predict(0.3), 0.5);
        assert_eq!(iso.predict(0.4), 1.0);
    }

    #[test]
    fn test_equal_x_pooled_before_fitting() {
        let iso = IsotonicCalibrator::fit(&[0.5, 0.5, 0.5, 0.9], &[1.0, 0.0, 0.0, 1.0]).unwrap();
        assert!((iso.predict(0.5) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(iso.predict(0.9), 1.0);
    }

    #[test]
    fn test_prediction_clips_out_of_range() {
        let iso = IsotonicCalibrator::fit(&[0.2, 0.8], &[0.1, 0.7]).unwrap();
        assert_eq!(iso.predict(0.0), 0.1);
        assert_eq!(iso.predict(1.0), 0.7);
    }

    #[test]
    fn test_output_is_non_decreasing() {
        let x: Vec<f64> = (0..200).map(|i| (i * 37 % 200) as f64 / 200.0).collect();
        let y: Vec<f64> = x.iter().map(|&v| if (v * 1000.0) as u32 % 3 == 0 { 1.0 } else { v }).collect();
        let iso = IsotonicCalibrator::fit(&x, &y).unwrap();
        let mut prev = f64::NEG_INFINITY;
        for i in 0..=100 {
            let p = iso.predict(i as f64 / 100.0);
            assert!(p >= prev);
            prev = p;
        }
    }

    #[test]
    fn test_flat_runs_compressed() {
        let iso = IsotonicCalibrator::fit(&[0.1, 0.2, 0.3, 0.4, 0.5], &[0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        let (xs, _) = iso.thresholds();
        assert_eq!(xs, &[0.1, 0.4, 0.5]);
        assert_eq!(iso.predict(0.25), 0.0);
    }
}
