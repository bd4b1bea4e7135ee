//! Domain layer: matchup model, simulation engine and its output.

pub mod config;
pub mod distribution;
pub mod engine;
pub mod matchup;
pub mod seed;

pub use config::{
    LineupOrder, SimConfig, DEFAULT_HISTORY_SIMS, DEFAULT_OUTS_LAMBDA, DEFAULT_PA_PER_OUT,
    DEFAULT_PROJECTION_SIMS,
};
pub use distribution::KDistribution;
pub use engine::{sample_poisson, StrikeoutSimulator, CHUNK_SIZE};
pub use matchup::{logit, merge_prob, sigmoid, MatchupTable, LEAGUE_K_RATE};
pub use seed::{derive_seed, splitmix64};
