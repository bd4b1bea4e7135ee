//! # Monte-Carlo Engine
//!
//! One simulated start:
//! 1. outs recorded ~ Poisson(`outs_lambda`)
//! 2. plate appearances = ⌊outs × `pa_per_out`⌋
//! 3. each PA picks a lineup slot and is a strikeout with that slot's
//!    probability
//!
//! `simulate` runs `sims` games in fixed chunks of [`CHUNK_SIZE`] across the
//! Rayon pool. Each chunk seeds its own `StdRng` from the base seed and its
//! index, so the histogram is identical for any thread count.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use shared_types::LINEUP_SIZE;

use crate::domain::config::{LineupOrder, SimConfig};
use crate::domain::distribution::KDistribution;
use crate::domain::matchup::MatchupTable;
use crate::domain::seed::derive_seed;
use crate::error::SimulationError;

/// Games per RNG stream.
pub const CHUNK_SIZE: u32 = 2048;

/// Poisson sample by sequential inversion.
///
/// Adequate for the small means used here (λ ≤ 500).
pub fn sample_poisson<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> u32 {
    let u: f64 = rng.gen();
    let mut p = (-lambda).exp();
    let mut cdf = p;
    let mut x: u32 = 0;
    let cap = (lambda * 10.0) as u32 + 100;
    while u > cdf && x < cap {
        x += 1;
        p *= lambda / x as f64;
        cdf += p;
    }
    x
}

/// Simulates strikeout totals for one pitcher-versus-lineup matchup.
#[derive(Debug, Clone)]
pub struct StrikeoutSimulator {
    config: SimConfig,
}

impl StrikeoutSimulator {
    pub fn new(config: SimConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Strikeouts in one simulated start.
    pub fn simulate_game<R: Rng + ?Sized>(&self, table: &MatchupTable, rng: &mut R) -> u32 {
        let outs = sample_poisson(rng, self.config.outs_lambda);
        let plate_appearances = (outs as f64 * self.config.pa_per_out).floor() as u32;

        let mut strikeouts = 0;
        for pa in 0..plate_appearances {
            let slot = match self.config.lineup_order {
                LineupOrder::Random => rng.gen_range(0..LINEUP_SIZE),
                LineupOrder::Sequential => pa as usize % LINEUP_SIZE,
            };
            if rng.gen::<f64>() < table.slot(slot) {
                strikeouts += 1;
            }
        }
        strikeouts
    }

    /// Run `config.sims` games from `seed`.
    pub fn simulate(&self, table: &MatchupTable, seed: u64) -> KDistribution {
        let sims = self.config.sims;
        let chunks = sims.div_ceil(CHUNK_SIZE);

        (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let games = CHUNK_SIZE.min(sims - chunk * CHUNK_SIZE);
                let mut rng = StdRng::seed_from_u64(derive_seed(seed, &[u64::from(chunk)]));
                let mut dist = KDistribution::new();
                for _ in 0..games {
                    dist.record(self.simulate_game(table, &mut rng));
                }
                dist
            })
            .reduce(KDistribution::new, KDistribution::merge)
    }
}
