//! # Calibration (km-05)
//!
//! Maps raw simulation output onto what actually happens.
//!
//! | Model | Input | Target | File |
//! |-------|-------|--------|------|
//! | `LinearCalibrator` | simulated mean K | actual K | `mlb_exp_lin.json` |
//! | `IsotonicCalibrator` | simulated P(K ≥ L) | 1 if K ≥ L | `mlb_p_over_iso.json` |
//!
//! Each saved model records the line L it was scored against. A projection
//! at a different line gets no calibrated probability.
//!
//! Alongside the models, a fit writes `calibration_report.json`,
//! `cal_exp_ks.csv` (the linear map sampled at 100 points) and
//! `cal_p_over.csv` (the reliability curve). Online refits use the
//! `_online` variants of the report and curve files.

pub mod domain;
pub mod error;
pub mod service;

pub use domain::*;
pub use error::CalibrationError;
pub use service::*;
