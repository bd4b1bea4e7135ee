//! # Matchup Model
//!
//! Per-plate-appearance strikeout probability from a pitcher's and a
//! batter's K-rate, combined in log-odds space relative to the league rate:
//!
//! ```text
//! p = σ( logit(k_pitcher) + logit(k_batter) − logit(league) )
//! ```
//!
//! A league-average pitcher facing a league-average batter strikes him out at
//! the league rate; each side shifts the odds independently.

use shared_types::LINEUP_SIZE;

use crate::error::SimulationError;

/// League-wide strikeout rate per plate appearance.
pub const LEAGUE_K_RATE: f64 = 0.20;

/// Rates are clamped into `[RATE_FLOOR, 1 - RATE_FLOOR]` before `logit`.
pub const RATE_FLOOR: f64 = 1e-4;

fn clamp_rate(p: f64) -> f64 {
    p.clamp(RATE_FLOOR, 1.0 - RATE_FLOOR)
}

pub fn logit(p: f64) -> f64 {
    let p = clamp_rate(p);
    (p / (1.0 - p)).ln()
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Combine pitcher and batter K-rates into one PA strikeout probability.
pub fn merge_prob(k_pitcher: f64, k_batter: f64, league: f64) -> f64 {
    sigmoid(logit(k_pitcher) + logit(k_batter) - logit(league))
}

/// Strikeout probability for each of the nine lineup slots.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupTable {
    probs: [f64; LINEUP_SIZE],
}

impl MatchupTable {
    /// Build the table for one pitcher against a nine-man lineup.
    pub fn new(pitcher_rate: f64, batter_rates: &[f64], league: f64) -> Result<Self, SimulationError> {
        if batter_rates.len() != LINEUP_SIZE {
            return Err(SimulationError::InvalidLineup {
                len: batter_rates.len(),
            });
        }
        check_rate(pitcher_rate)?;
        let mut probs = [0.0; LINEUP_SIZE];
        for (slot, &rate) in batter_rates.iter().enumerate() {
            check_rate(rate)?;
            probs[slot] = merge_prob(pitcher_rate, rate, league);
        }
        Ok(Self { probs })
    }

    /// Use per-slot probabilities as given, without merging.
    pub fn from_probs(probs: [f64; LINEUP_SIZE]) -> Result<Self, SimulationError> {
        for &p in &probs {
            check_rate(p)?;
        }
        Ok(Self { probs })
    }

    pub fn probs(&self) -> &[f64; LINEUP_SIZE] {
        &self.probs
    }

    pub fn slot(&self, slot: usize) -> f64 {
        self.probs[slot % LINEUP_SIZE]
    }

    /// Mean strikeout probability across the lineup.
    pub fn mean_prob(&self) -> f64 {
        self.probs.iter().sum::<f64>() / LINEUP_SIZE as f64
    }
}

fn check_rate(rate: f64) -> Result<(), SimulationError> {
    if rate.is_finite() && (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(SimulationError::InvalidRate { value: rate })
    }
}
