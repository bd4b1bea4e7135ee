//! Error types for calibration

use shared_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("Cannot fit on empty input")]
    EmptyInput,

    #[error("Input lengths differ: {x} x values, {y} y values")]
    LengthMismatch { x: usize, y: usize },

    #[error("Probability outside [0, 1]: {value}")]
    ProbabilityOutOfRange { value: f64 },

    #[error("Number of bins must be at least 1, got {0}")]
    InvalidBins(usize),

    #[error("No usable samples ({dropped} dropped for missing values)")]
    NoSamples { dropped: usize },

    #[error("Model store error: {0}")]
    Store(#[from] StoreError),
}
