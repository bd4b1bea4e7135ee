//! Fitting both calibrators and scoring the result.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared_types::round_to;
use tracing::{info, warn};

use crate::domain::{
    brier_score, calibration_curve, mean_absolute_error, r2_score, CurveBin, FittedModel,
    IsotonicCalibrator, LinearCalibrator,
};
use crate::error::CalibrationError;

/// Points sampled along the fitted linear map.
pub const EXP_CURVE_POINTS: usize = 100;

/// One training example: a projection and what actually happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSample {
    /// Simulated mean strikeouts.
    pub exp_ks: f64,
    /// Simulated P(K ≥ line).
    pub p_over: f64,
    pub k_actual: f64,
}

impl CalibrationSample {
    fn is_usable(&self) -> bool {
        self.exp_ks.is_finite() && self.p_over.is_finite() && self.k_actual.is_finite()
    }
}

/// One point of the fitted linear map (`cal_exp_ks.csv`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpCurvePoint {
    pub exp_ks: f64,
    pub fitted_k: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSummary {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
    pub mae_raw: f64,
    pub mae_calibrated: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilitySummary {
    pub base_rate: f64,
    pub brier_raw: f64,
    pub brier_calibrated: f64,
    pub thresholds: usize,
}

/// Fit diagnostics written to `calibration_report[_online].json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub line: f64,
    pub n_samples: usize,
    pub dropped: usize,
    pub online: bool,
    pub linear: LinearSummary,
    pub probability: ProbabilitySummary,
    pub reliability: Vec<CurveBin>,
}

#[derive(Debug, Clone)]
pub struct CalibrationOutcome {
    pub linear: FittedModel<LinearCalibrator>,
    pub isotonic: FittedModel<IsotonicCalibrator>,
    pub report: CalibrationReport,
    pub exp_curve: Vec<ExpCurvePoint>,
}

/// Fit the linear and isotonic calibrators on `samples` scored against
/// `line`. Samples with missing values are dropped first.
pub fn fit_calibration(
    samples: &[CalibrationSample],
    line: f64,
    n_bins: usize,
    online: bool,
) -> Result<CalibrationOutcome, CalibrationError> {
    let usable: Vec<&CalibrationSample> = samples.iter().filter(|s| s.is_usable()).collect();
    let dropped = samples.len() - usable.len();
    if dropped > 0 {
        warn!(dropped, "Dropped calibration samples with missing values");
    }
    if usable.is_empty() {
        return Err(CalibrationError::NoSamples { dropped });
    }

    let exp: Vec<f64> = usable.iter().map(|s| s.exp_ks).collect();
    let actual: Vec<f64> = usable.iter().map(|s| s.k_actual).collect();
    let p_raw: Vec<f64> = usable.iter().map(|s| s.p_over).collect();
    let over: Vec<bool> = actual.iter().map(|&k| k >= line).collect();
    let over_f: Vec<f64> = over.iter().map(|&o| if o { 1.0 } else { 0.0 }).collect();

    let linear = LinearCalibrator::fit(&exp, &actual)?;
    let isotonic = IsotonicCalibrator::fit(&p_raw, &over_f)?;

    let exp_cal: Vec<f64> = exp.iter().map(|&x| linear.predict(x)).collect();
    let p_cal: Vec<f64> = p_raw.iter().map(|&p| isotonic.predict(p)).collect();
    let reliability = calibration_curve(&over, &p_raw, n_bins)?;

    let report = CalibrationReport {
        line,
        n_samples: usable.len(),
        dropped,
        online,
        linear: LinearSummary {
            slope: linear.slope,
            intercept: linear.intercept,
            r2: r2_score(&actual, &exp_cal),
            mae_raw: mean_absolute_error(&actual, &exp),
            mae_calibrated: mean_absolute_error(&actual, &exp_cal),
        },
        probability: ProbabilitySummary {
            base_rate: over_f.iter().sum::<f64>() / over_f.len() as f64,
            brier_raw: brier_score(&over, &p_raw),
            brier_calibrated: brier_score(&over, &p_cal),
            thresholds: isotonic.thresholds().0.len(),
        },
        reliability,
    };

    let (lo, hi) = exp
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let exp_curve = linear
        .sample_line(lo, hi, EXP_CURVE_POINTS)
        .into_iter()
        .map(|(x, y)| ExpCurvePoint {
            exp_ks: round_to(x, 4),
            fitted_k: round_to(y, 4),
        })
        .collect();

    info!(
        samples = report.n_samples,
        slope = linear.slope,
        intercept = linear.intercept,
        brier_raw = report.probability.brier_raw,
        brier_calibrated = report.probability.brier_calibrated,
        "Fitted calibrators"
    );

    let trained_at = Utc::now();
    Ok(CalibrationOutcome {
        linear: FittedModel {
            line,
            n_samples: usable.len(),
            trained_at,
            online,
            model: linear,
        },
        isotonic: FittedModel {
            line,
            n_samples: usable.len(),
            trained_at,
            online,
            model: isotonic,
        },
        report,
        exp_curve,
    })
}
