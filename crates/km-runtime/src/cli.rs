//! Command-line interface.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use shared_types::{Lineup, PlayerId, Season};

/// MLB strikeout projection pipeline.
#[derive(Parser, Debug)]
#[command(name = "mlb-k-model", version)]
#[command(about = "Strikeout projections from the MLB Stats API")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// TOML config file
    #[arg(long, global = true, env = "KM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data directory (overrides config and KM_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Models directory (overrides config and KM_MODELS_DIR)
    #[arg(long, global = true)]
    pub models_dir: Option<PathBuf>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Base random seed
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check connectivity by listing active teams
    SmokeTest,

    /// Active rosters for a season -> players_<season>.csv
    RosterPull {
        /// Season (default: current year)
        season: Option<Season>,
    },

    /// Season K-rates for every rostered player -> player_stats_<season>.csv
    StatPull {
        /// Season (default: current year)
        season: Option<Season>,
    },

    /// Merge per-season stat files -> player_stats.csv
    CombineStats {
        #[arg(required = true)]
        seasons: Vec<Season>,
    },

    /// Harvest final regular-season starts -> historical_ks.csv
    BuildDataset {
        #[arg(long, num_args = 1.., default_values_t = default_dataset_seasons())]
        seasons: Vec<Season>,
    },

    /// Simulate every historical start -> historical_ks_sim.csv
    GenSimulations {
        /// Historical starts (default: <data>/historical_ks.csv)
        #[arg(long)]
        hist: Option<PathBuf>,

        /// Earlier simulation output for pitcher fallback rates
        /// (default: <data>/historical_ks_sim.csv when present)
        #[arg(long)]
        fallback: Option<PathBuf>,

        /// Games per start
        #[arg(long)]
        sims: Option<u32>,

        /// Line for p_over
        #[arg(long)]
        line: Option<f64>,

        /// Output file (default: <data>/historical_ks_sim.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Fit calibrators on simulated history
    Calibrate {
        /// Simulated starts (default: <data>/historical_ks_sim.csv)
        #[arg(long)]
        sim_csv: Option<PathBuf>,

        #[arg(long)]
        line: Option<f64>,

        /// Model output directory (default: models dir)
        #[arg(long)]
        outdir: Option<PathBuf>,
    },

    /// Simulate one pitcher against one lineup
    Simulate {
        #[arg(long)]
        pitcher: PlayerId,

        /// Nine comma-separated batter ids, leadoff first
        #[arg(long)]
        batters: Lineup,

        /// Season for rate lookup (default: current year)
        #[arg(long)]
        season: Option<Season>,

        #[arg(long)]
        line: Option<f64>,

        #[arg(long)]
        sims: Option<u32>,
    },

    /// Build a date's slate and write the schedule and lineup caches
    ScheduleFetch {
        /// Date (default: today)
        date: Option<NaiveDate>,
    },

    /// Project every start on a date -> today_ks_proj.csv
    TodayProj {
        /// Date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        line: Option<f64>,

        #[arg(long)]
        sims: Option<u32>,
    },

    /// Append projections to the prediction cache
    CachePredictions {
        /// Projections (default: <data>/today_ks_proj.csv)
        #[arg(long)]
        pred: Option<PathBuf>,

        /// Cache (default: <data>/cached_predictions.csv)
        #[arg(long)]
        cache: Option<PathBuf>,
    },

    /// Refit calibrators on cached predictions and realised strikeouts
    OnlineCalibrate {
        /// Cached predictions (default: <data>/cached_predictions.csv)
        #[arg(long)]
        pred: Option<PathBuf>,

        /// Realised starts (default: <data>/historical_ks.csv)
        #[arg(long)]
        truth: Option<PathBuf>,

        #[arg(long)]
        line: Option<f64>,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SmokeTest => "smoke-test",
            Command::RosterPull { .. } => "roster-pull",
            Command::StatPull { .. } => "stat-pull",
            Command::CombineStats { .. } => "combine-stats",
            Command::BuildDataset { .. } => "build-dataset",
            Command::GenSimulations { .. } => "gen-simulations",
            Command::Calibrate { .. } => "calibrate",
            Command::Simulate { .. } => "simulate",
            Command::ScheduleFetch { .. } => "schedule-fetch",
            Command::TodayProj { .. } => "today-proj",
            Command::CachePredictions { .. } => "cache-predictions",
            Command::OnlineCalibrate { .. } => "online-calibrate",
        }
    }

    /// Whether the command writes into the data or models directory.
    pub fn writes(&self) -> bool {
        !matches!(self, Command::SmokeTest | Command::Simulate { .. })
    }
}

fn default_dataset_seasons() -> Vec<Season> {
    [2024, 2025].into_iter().filter_map(|y| Season::new(y).ok()).collect()
}
