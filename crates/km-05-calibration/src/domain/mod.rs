//! Domain layer: calibrators, reliability curve and scores.

pub mod curve;
pub mod isotonic;
pub mod linear;
pub mod model;
pub mod scores;

pub use curve::{calibration_curve, CurveBin, DEFAULT_BINS};
pub use isotonic::IsotonicCalibrator;
pub use linear::LinearCalibrator;
pub use model::FittedModel;
pub use scores::{brier_score, mean_absolute_error, r2_score};
