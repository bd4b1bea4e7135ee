//! # mlb-k-model
//!
//! Entry point for the strikeout projection pipeline.
//!
//! ## Startup Sequence
//!
//! 1. Parse the command line (no subcommand prints usage and exits)
//! 2. Initialise logging
//! 3. Load configuration (defaults, file, environment, flags) and validate it
//! 4. Wire the container
//! 5. Lock the data directory for commands that write
//! 6. Run the command inside a `run` span and log the metrics snapshot

use anyhow::{Context, Result};
use clap::Parser;
use km_runtime::{commands, Cli, Container, KmConfig};
use km_telemetry::{init_logging, pipeline_span, TelemetryConfig};
use tracing::{error, info, Instrument};

/// Apply command-line overrides on top of the loaded config.
fn configure(cli: &Cli) -> Result<KmConfig> {
    let mut config = KmConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.paths.data_dir = dir.clone();
    }
    if let Some(dir) = &cli.models_dir {
        config.paths.models_dir = dir.clone();
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env().with_verbosity(cli.verbose);
    if cli.json_logs {
        telemetry.json_logs = true;
    }
    let _guard = init_logging(&telemetry)?;

    let config = configure(&cli)?;
    let container = Container::new(config)?;
    let today = chrono::Local::now().date_naive();

    let command = cli.command;
    let name = command.name();
    let _lock = if command.writes() {
        Some(container.lock_data_dir()?)
    } else {
        None
    };

    info!(
        command = name,
        data_dir = %container.layout.data_dir().display(),
        models_dir = %container.layout.models_dir().display(),
        "Starting"
    );
    let result = commands::run(&container, command, today)
        .instrument(pipeline_span!(name))
        .await;

    container.metrics.snapshot().log();
    if let Err(e) = &result {
        error!(command = name, error = %format!("{:#}", e), "Command failed");
    }
    result
}
