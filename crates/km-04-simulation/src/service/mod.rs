//! Application services over the simulation engine.

pub mod batch;
pub mod fallback;

pub use batch::{SimJob, StartSimulator};
pub use fallback::pitcher_fallback_rates;
