//! Simulation and calibration commands.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use km_02_player_stats::{KRateResolver, PlayerStatsStore, ResolverConfig};
use km_04_simulation::{pitcher_fallback_rates, SimJob, StartSimulator};
use km_05_calibration::{fit_calibration, save_outcome, CalibrationOutcome, CalibrationSample};
use km_06_projection::online_samples;
use shared_store::{read_csv, read_csv_if_exists, write_csv, DataLayout};
use shared_types::{GamePk, Lineup, PlayerId, Season, Side, SimulatedStart, StartRecord};
use tracing::{info, warn};

use crate::container::Container;

/// Lines printed by `simulate`.
const REPORT_LINES: [f64; 4] = [4.5, 5.5, 6.5, 7.5];

pub struct GenSimulationsArgs {
    pub hist: Option<PathBuf>,
    pub fallback: Option<PathBuf>,
    pub sims: Option<u32>,
    pub line: Option<f64>,
    pub out: Option<PathBuf>,
}

pub async fn gen_simulations(container: &Container, args: GenSimulationsArgs) -> Result<()> {
    let layout = &container.layout;
    let hist = args.hist.unwrap_or_else(|| layout.historical_ks());
    let out = args.out.unwrap_or_else(|| layout.historical_sim());
    let sims = args.sims.unwrap_or(container.config.simulation.history_sims);
    let line = args.line.unwrap_or(container.config.calibration.line);

    let starts: Vec<StartRecord> =
        read_csv(&hist).with_context(|| format!("Run build-dataset first ({})", hist.display()))?;
    let fallback = load_fallback(args.fallback.as_deref().unwrap_or(&layout.historical_sim()))?;

    let store = container.combined_store()?;
    let config = ResolverConfig {
        default_rate: container.config.projection.default_rate,
        ..ResolverConfig::default()
    };
    let resolver = container.resolver(store.clone(), config).with_fallback(fallback);
    let simulator = Arc::new(container.simulator(sims)?);

    let rows = simulate_history(&resolver, simulator, &starts, line).await?;
    store.flush()?;

    write_csv(&out, &rows)?;
    let sources = resolver.source_counts();
    info!(starts = rows.len(), sims, line, ?sources, path = %out.display(), "Saved simulated history");
    println!("{} starts x {} sims -> {}", rows.len(), sims, out.display());
    Ok(())
}

fn load_fallback(path: &Path) -> Result<HashMap<PlayerId, f64>> {
    match read_csv_if_exists::<SimulatedStart>(path)? {
        Some(rows) => {
            let rates = pitcher_fallback_rates(&rows);
            info!(pitchers = rates.len(), path = %path.display(), "Loaded fallback pitcher rates");
            Ok(rates)
        }
        None => Ok(HashMap::new()),
    }
}

/// Simulate every start against the lineup it faced.
///
/// Rates are resolved for each start's own season and date; output order
/// matches `starts`. A start whose rates cannot form a matchup table is
/// logged and left out.
pub async fn simulate_history(
    resolver: &KRateResolver,
    simulator: Arc<StartSimulator>,
    starts: &[StartRecord],
    line: f64,
) -> Result<Vec<SimulatedStart>> {
    let mut jobs = Vec::with_capacity(starts.len());
    let mut kept = Vec::with_capacity(starts.len());
    for start in starts {
        let pitcher = resolver
            .resolve_pitcher(start.pitcher_id, start.season, start.date)
            .await;
        let batters: Vec<f64> = resolver
            .resolve_lineup(&start.lineup_ids, start.season, start.date)
            .await
            .into_iter()
            .map(|r| r.rate)
            .collect();
        let table = match simulator.table(pitcher.rate, &batters) {
            Ok(table) => table,
            Err(e) => {
                warn!(game_pk = %start.game_pk, side = %start.side, pitcher = %start.pitcher_id, error = %e, "Skipping start: bad K-rate");
                continue;
            }
        };
        jobs.push(SimJob {
            game_pk: start.game_pk,
            side: start.side,
            table,
        });
        kept.push(start);
    }

    let dists = tokio::task::spawn_blocking(move || simulator.simulate_starts(&jobs))
        .await
        .map_err(|e| anyhow!("Simulation task failed: {}", e))?;

    Ok(kept
        .into_iter()
        .zip(dists)
        .map(|(start, dist)| SimulatedStart {
            game_pk: start.game_pk,
            date: start.date,
            season: start.season,
            side: start.side,
            pitcher_id: start.pitcher_id,
            k_actual: start.k_actual,
            exp_ks: dist.mean(),
            p_over: dist.p_at_least(line),
        })
        .collect())
}

pub fn calibrate(
    container: &Container,
    sim_csv: Option<PathBuf>,
    line: Option<f64>,
    outdir: Option<PathBuf>,
) -> Result<()> {
    let sim_csv = sim_csv.unwrap_or_else(|| container.layout.historical_sim());
    let line = line.unwrap_or(container.config.calibration.line);
    let rows: Vec<SimulatedStart> =
        read_csv(&sim_csv).with_context(|| format!("Run gen-simulations first ({})", sim_csv.display()))?;

    let samples: Vec<CalibrationSample> = rows
        .iter()
        .map(|r| CalibrationSample {
            exp_ks: r.exp_ks,
            p_over: r.p_over,
            k_actual: f64::from(r.k_actual),
        })
        .collect();
    let outcome = fit_calibration(&samples, line, container.config.calibration.bins, false)
        .context("Calibration fit failed")?;

    let layout = match outdir {
        Some(dir) => DataLayout::new(container.layout.data_dir(), dir),
        None => container.layout.clone(),
    };
    save_outcome(&layout, &outcome)?;
    print_outcome(&outcome, &layout);
    Ok(())
}

pub fn online_calibrate(
    container: &Container,
    pred: Option<PathBuf>,
    truth: Option<PathBuf>,
    line: Option<f64>,
) -> Result<()> {
    let pred = pred.unwrap_or_else(|| container.layout.cached_predictions());
    let truth = truth.unwrap_or_else(|| container.layout.historical_ks());
    let line = line.unwrap_or(container.config.calibration.line);

    let online = online_samples(&pred, &truth, line).context("Joining predictions with outcomes failed")?;
    if online.unmatched > 0 {
        warn!(unmatched = online.unmatched, "Predictions without a realised start");
    }
    let outcome = fit_calibration(&online.samples, line, container.config.calibration.bins, true)
        .context("Online calibration fit failed")?;
    save_outcome(&container.layout, &outcome)?;
    print_outcome(&outcome, &container.layout);
    Ok(())
}

fn print_outcome(outcome: &CalibrationOutcome, layout: &DataLayout) {
    let report = &outcome.report;
    println!("Calibrated on {} starts at line {}", report.n_samples, report.line);
    println!(
        "  linear: K = {:.3} * exp + {:.3}  (R2 {:.3}, MAE {:.3} -> {:.3})",
        report.linear.slope,
        report.linear.intercept,
        report.linear.r2,
        report.linear.mae_raw,
        report.linear.mae_calibrated
    );
    println!(
        "  P(K >= {}): base rate {:.3}, Brier {:.4} -> {:.4}",
        report.line,
        report.probability.base_rate,
        report.probability.brier_raw,
        report.probability.brier_calibrated
    );
    println!("-> {}", layout.models_dir().display());
}

pub struct SimulateArgs {
    pub pitcher: PlayerId,
    pub batters: Lineup,
    pub season: Season,
    pub line: Option<f64>,
    pub sims: Option<u32>,
}

/// One matchup, printed. Fetched rates are not written back.
pub async fn simulate(container: &Container, args: SimulateArgs, today: NaiveDate) -> Result<()> {
    let store = container.stat_store(args.season)?;
    let config = ResolverConfig {
        persist_fetched: false,
        ..container.config.projection.resolver_config()
    };
    let resolver = container.resolver(store, config);
    let sims = args.sims.unwrap_or(container.config.simulation.projection_sims);
    let simulator = container.simulator(sims)?;

    let pitcher = resolver.resolve_pitcher(args.pitcher, args.season, today).await;
    let batters = resolver.resolve_lineup(&args.batters, args.season, today).await;
    let rates: Vec<f64> = batters.iter().map(|r| r.rate).collect();
    let job = SimJob {
        game_pk: GamePk(0),
        side: Side::Away,
        table: simulator.table(pitcher.rate, &rates)?,
    };
    let dist = tokio::task::spawn_blocking(move || simulator.simulate_start(&job))
        .await
        .map_err(|e| anyhow!("Simulation task failed: {}", e))?;

    println!("Pitcher {} K-rate {:.3} ({})", args.pitcher, pitcher.rate, pitcher.source);
    for (batter, rate) in args.batters.iter().zip(&batters) {
        println!("  {:>8}  {:.3} ({})", batter, rate.rate, rate.source);
    }
    println!("Expected K: {:.2} over {} sims", dist.mean(), sims);

    let mut lines = REPORT_LINES.to_vec();
    if let Some(line) = args.line {
        if !lines.iter().any(|l| (l - line).abs() < 1e-9) {
            lines.push(line);
        }
    }
    for line in lines {
        println!("  P(K >= {}) = {:.3}", line, dist.p_at_least(line));
    }
    Ok(())
}
