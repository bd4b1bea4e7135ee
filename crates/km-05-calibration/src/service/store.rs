//! Model persistence under the models directory.

use shared_store::{read_json, write_csv, write_json, DataLayout, StoreError};
use tracing::{debug, info, warn};

use crate::domain::{FittedModel, IsotonicCalibrator, LinearCalibrator};
use crate::error::CalibrationError;
use crate::service::fit::CalibrationOutcome;

/// Write both models, the report and the curve files.
///
/// Online fits write `_online` reports and curves but replace the same
/// model files as an offline fit.
pub fn save_outcome(layout: &DataLayout, outcome: &CalibrationOutcome) -> Result<(), CalibrationError> {
    let online = outcome.report.online;
    write_json(&layout.linear_model(), &outcome.linear)?;
    write_json(&layout.isotonic_model(), &outcome.isotonic)?;
    write_json(&layout.report(online), &outcome.report)?;
    write_csv(&layout.exp_curve(online), &outcome.exp_curve)?;
    write_csv(&layout.prob_curve(online), &outcome.report.reliability)?;
    info!(models_dir = %layout.models_dir().display(), online, "Saved calibration models");
    Ok(())
}

/// Calibrators available to a projection run.
#[derive(Debug, Clone, Default)]
pub struct Calibrators {
    pub linear: Option<FittedModel<LinearCalibrator>>,
    pub isotonic: Option<FittedModel<IsotonicCalibrator>>,
}

impl Calibrators {
    /// Load whichever model files exist. A missing file leaves that
    /// calibrator unset; an unreadable one is an error.
    pub fn load(layout: &DataLayout) -> Result<Self, CalibrationError> {
        let linear = load_optional(&layout.linear_model())?;
        let isotonic = load_optional(&layout.isotonic_model())?;
        Ok(Self { linear, isotonic })
    }

    pub fn is_empty(&self) -> bool {
        self.linear.is_none() && self.isotonic.is_none()
    }

    pub fn calibrate_exp(&self, exp_raw: f64) -> Option<f64> {
        self.linear.as_ref().map(|m| m.model.predict(exp_raw))
    }

    /// Calibrated P(K ≥ line), only from a model fitted for the same line.
    pub fn calibrate_prob(&self, p_raw: f64, line: f64) -> Option<f64> {
        self.isotonic
            .as_ref()
            .filter(|m| m.fitted_for(line))
            .map(|m| m.model.predict(p_raw))
    }

    /// Whether a probability model exists but was fitted for another line.
    pub fn line_mismatch(&self, line: f64) -> Option<f64> {
        match &self.isotonic {
            Some(m) if !m.fitted_for(line) => Some(m.line),
            _ => None,
        }
    }

    pub fn warn_on_line_mismatch(&self, line: f64) {
        if let Some(fitted) = self.line_mismatch(line) {
            warn!(
                fitted_line = fitted,
                line, "Probability calibrator was fitted for a different line; p_cal left empty"
            );
        }
    }
}

fn load_optional<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<Option<T>, CalibrationError> {
    match read_json(path) {
        Ok(model) => Ok(Some(model)),
        Err(StoreError::NotFound(_)) => {
            debug!(path = %path.display(), "No calibration model");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
