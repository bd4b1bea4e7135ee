//! A calibrator together with how it was fitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted form of a calibrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel<M> {
    /// Strikeout line the training outcomes were scored against.
    pub line: f64,
    pub n_samples: usize,
    pub trained_at: DateTime<Utc>,
    /// Whether the fit came from cached live predictions.
    #[serde(default)]
    pub online: bool,
    pub model: M,
}

impl<M> FittedModel<M> {
    pub fn fitted_for(&self, line: f64) -> bool {
        (self.line - line).abs() < 1e-9
    }
}
