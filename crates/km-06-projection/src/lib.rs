//! # Projection (km-06)
//!
//! Builds a date's slate, projects each start, and keeps the rolling cache
//! of predictions used for online calibration.
//!
//! ## Crate Structure
//!
//! - `domain/` - slate shape, roster name matching, prediction cache rules
//! - `service/` - `SlateBuilder`, `Projector`, cache files
//!
//! ## Daily flow
//!
//! ```text
//! schedule_for_date ──► SlateBuilder ──► Slate ──► save_slate
//!                                          │
//!                                          ▼
//!             KRateResolver ──► Projector ──► today_ks_proj.csv
//!                                                   │
//!                                    cache_predictions ──► cached_predictions.csv
//!                                                   │
//!                     historical_ks.csv ──► online_samples ──► fit_calibration
//! ```
//!
//! ## Output columns
//!
//! | Column | Meaning |
//! |--------|---------|
//! | `exp_raw` | simulated mean strikeouts, 2 dp |
//! | `p_raw` | simulated P(K ≥ line), 3 dp |
//! | `exp_cal` | `exp_raw` through the linear calibrator, if loaded |
//! | `p_cal` | `p_raw` through the isotonic calibrator fitted for this line |

pub mod domain;
pub mod error;
pub mod service;

pub use domain::*;
pub use error::ProjectionError;
pub use service::*;
