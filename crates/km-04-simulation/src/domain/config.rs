//! Simulation parameters.

use serde::{Deserialize, Serialize};

use crate::domain::matchup::LEAGUE_K_RATE;
use crate::error::SimulationError;

/// Games simulated per historical start.
pub const DEFAULT_HISTORY_SIMS: u32 = 20_000;

/// Games simulated per projected start.
pub const DEFAULT_PROJECTION_SIMS: u32 = 10_000;

/// Mean outs recorded by a starter (six innings).
pub const DEFAULT_OUTS_LAMBDA: f64 = 18.0;

/// Plate appearances per out recorded.
pub const DEFAULT_PA_PER_OUT: f64 = 1.15;

/// Upper bound on the outs mean.
pub const MAX_OUTS_LAMBDA: f64 = 500.0;

/// How a plate appearance picks its batter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineupOrder {
    /// Uniformly random slot for every PA.
    #[default]
    Random,
    /// Leadoff first, wrapping after the ninth batter.
    Sequential,
}

/// Monte-Carlo settings for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Games per start.
    pub sims: u32,
    /// Poisson mean of outs recorded.
    pub outs_lambda: f64,
    /// Plate appearances per out.
    pub pa_per_out: f64,
    /// League K-rate used by the log-odds merge.
    pub league_rate: f64,
    pub lineup_order: LineupOrder,
    /// Base seed; every start derives its own from this.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sims: DEFAULT_PROJECTION_SIMS,
            outs_lambda: DEFAULT_OUTS_LAMBDA,
            pa_per_out: DEFAULT_PA_PER_OUT,
            league_rate: LEAGUE_K_RATE,
            lineup_order: LineupOrder::Random,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Defaults for simulating the historical dataset.
    pub fn for_history() -> Self {
        Self {
            sims: DEFAULT_HISTORY_SIMS,
            ..Self::default()
        }
    }

    pub fn with_sims(mut self, sims: u32) -> Self {
        self.sims = sims;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.sims == 0 {
            return Err(SimulationError::InvalidConfig(
                "sims must be at least 1".into(),
            ));
        }
        if !(self.outs_lambda > 0.0 && self.outs_lambda <= MAX_OUTS_LAMBDA) {
            return Err(SimulationError::InvalidConfig(format!(
                "outs_lambda must be in (0, {}], got {}",
                MAX_OUTS_LAMBDA, self.outs_lambda
            )));
        }
        if !(self.pa_per_out > 0.0 && self.pa_per_out.is_finite()) {
            return Err(SimulationError::InvalidConfig(format!(
                "pa_per_out must be positive, got {}",
                self.pa_per_out
            )));
        }
        if !(self.league_rate > 0.0 && self.league_rate < 1.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "league_rate must be in (0, 1), got {}",
                self.league_rate
            )));
        }
        Ok(())
    }
}
