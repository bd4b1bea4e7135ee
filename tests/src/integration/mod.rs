//! # Pipeline Flows
//!
//! Each flow drives the same command functions the binary dispatches to,
//! against the fixture league and a temporary data directory.
//!
//! ## Flows Tested:
//!
//! 1. **History**: build-dataset → gen-simulations → calibrate
//! 2. **Daily**: schedule-fetch → today-proj → cache-predictions → online-calibrate

pub mod daily;
pub mod history;
