//! Batch simulation of many starts.

use std::sync::Arc;

use km_telemetry::MetricsRecorder;
use rayon::prelude::*;
use shared_types::{GamePk, Side};
use tracing::debug;

use crate::domain::config::SimConfig;
use crate::domain::distribution::KDistribution;
use crate::domain::engine::StrikeoutSimulator;
use crate::domain::matchup::MatchupTable;
use crate::domain::seed::derive_seed;
use crate::error::SimulationError;

/// One start to simulate.
#[derive(Debug, Clone)]
pub struct SimJob {
    pub game_pk: GamePk,
    /// The pitcher's side.
    pub side: Side,
    pub table: MatchupTable,
}

/// Runs starts in parallel with per-start seeds.
///
/// A start's seed depends only on the base seed, its game and its side, so
/// re-running a subset of starts reproduces their earlier results.
pub struct StartSimulator {
    simulator: StrikeoutSimulator,
    metrics: Arc<dyn MetricsRecorder>,
}

impl StartSimulator {
    pub fn new(config: SimConfig, metrics: Arc<dyn MetricsRecorder>) -> Result<Self, SimulationError> {
        Ok(Self {
            simulator: StrikeoutSimulator::new(config)?,
            metrics,
        })
    }

    pub fn config(&self) -> &SimConfig {
        self.simulator.config()
    }

    /// Build a table with this run's league rate.
    pub fn table(&self, pitcher_rate: f64, batter_rates: &[f64]) -> Result<MatchupTable, SimulationError> {
        MatchupTable::new(pitcher_rate, batter_rates, self.config().league_rate)
    }

    pub fn seed_for(&self, game_pk: GamePk, side: Side) -> u64 {
        let side_key = match side {
            Side::Away => 0,
            Side::Home => 1,
        };
        derive_seed(self.config().seed, &[game_pk.0, side_key])
    }

    pub fn simulate_start(&self, job: &SimJob) -> KDistribution {
        let dist = self
            .simulator
            .simulate(&job.table, self.seed_for(job.game_pk, job.side));
        self.metrics.record_start_simulated(dist.total());
        dist
    }

    /// Simulate every job; output order matches input order.
    pub fn simulate_starts(&self, jobs: &[SimJob]) -> Vec<KDistribution> {
        debug!(
            starts = jobs.len(),
            sims = self.config().sims,
            "Simulating starts"
        );
        jobs.par_iter().map(|job| self.simulate_start(job)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use km_telemetry::PipelineMetrics;

    fn simulator(sims: u32, metrics: Arc<PipelineMetrics>) -> StartSimulator {
        StartSimulator::new(SimConfig::default().with_sims(sims).with_seed(7), metrics).unwrap()
    }

    fn job(sim: &StartSimulator, game: u64, side: Side, pitcher: f64) -> SimJob {
        SimJob {
            game_pk: GamePk(game),
            side,
            table: sim.table(pitcher, &[0.22; 9]).unwrap(),
        }
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let metrics = Arc::new(PipelineMetrics::new());
        let sim = simulator(3_000, metrics.clone());
        let jobs = vec![
            job(&sim, 1, Side::Away, 0.20),
            job(&sim, 1, Side::Home, 0.30),
            job(&sim, 2, Side::Away, 0.25),
        ];

        let batch = sim.simulate_starts(&jobs);
        let single: Vec<KDistribution> = jobs.iter().map(|j| sim.simulate_start(j)).collect();

        assert_eq!(batch, single);
        assert_eq!(metrics.snapshot().starts_simulated, 6);
        assert_eq!(metrics.snapshot().games_simulated, 18_000);
    }

    #[test]
    fn test_seed_depends_on_game_and_side() {
        let sim = simulator(10, Arc::new(PipelineMetrics::new()));
        let a = sim.seed_for(GamePk(1), Side::Away);
        assert_ne!(a, sim.seed_for(GamePk(1), Side::Home));
        assert_ne!(a, sim.seed_for(GamePk(2), Side::Away));
        assert_eq!(a, sim.seed_for(GamePk(1), Side::Away));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = StartSimulator::new(
            SimConfig::default().with_sims(0),
            Arc::new(km_telemetry::NoOpMetrics),
        );
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    }
}
