//! Service layer: fitting and model persistence.

pub mod fit;
pub mod store;

pub use fit::{
    fit_calibration, CalibrationOutcome, CalibrationReport, CalibrationSample, ExpCurvePoint,
    LinearSummary, ProbabilitySummary, EXP_CURVE_POINTS,
};
pub use store::{save_outcome, Calibrators};
