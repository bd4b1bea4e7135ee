//! # Strikeout Simulation (km-04)
//!
//! Monte-Carlo model of a starting pitcher's strikeout total against a
//! nine-man lineup.
//!
//! ## Model
//!
//! | Step | Rule |
//! |------|------|
//! | PA probability | `σ(logit p + logit b − logit league)`, league = 0.20 |
//! | Outs recorded | Poisson(λ = 18) |
//! | Plate appearances | ⌊outs × 1.15⌋ |
//! | Batter per PA | uniform random slot, or sequential |
//! | Result | histogram of K totals over N games |
//!
//! ## Invariants
//!
//! - Same seed and inputs give the same histogram on any thread count.
//! - `p_at_least(line)` is non-increasing in `line`.
//!
//! ## Usage
//!
//! ```ignore
//! use km_04_simulation::{SimConfig, StartSimulator, SimJob};
//!
//! let sim = StartSimulator::new(SimConfig::for_history(), metrics)?;
//! let table = sim.table(0.27, &batter_rates)?;
//! let dist = sim.simulate_start(&SimJob { game_pk, side, table });
//! println!("{:.2} {:.3}", dist.mean(), dist.p_at_least(6.5));
//! ```

pub mod domain;
pub mod error;
pub mod service;

pub use domain::*;
pub use error::SimulationError;
pub use service::{pitcher_fallback_rates, SimJob, StartSimulator};
