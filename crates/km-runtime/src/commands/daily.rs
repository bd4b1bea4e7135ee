//! Daily commands: slate, projections, prediction cache.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use km_02_player_stats::PlayerStatsStore;
use km_05_calibration::Calibrators;
use km_06_projection::{
    cache_predictions as append_to_cache, load_lineup_cache, save_slate, NameIndex, Projector, Slate,
    SlateBuilder,
};
use shared_store::{read_csv_if_exists, write_csv};
use shared_types::{LineupSource, ProjectionRow, RosterEntry, Season};
use tracing::{info, warn};

use crate::container::Container;

/// Build and cache the slate for `date`.
pub async fn fetch_slate(container: &Container, date: NaiveDate, today: NaiveDate) -> Result<Slate> {
    let season = Season::of_date(date)?;
    let names = match read_csv_if_exists::<RosterEntry>(&container.layout.players(season))? {
        Some(roster) => NameIndex::from_roster(&roster),
        None => {
            warn!(%season, "No roster file; probable pitchers are matched by id only");
            NameIndex::default()
        }
    };
    let cache = load_lineup_cache(&container.layout, date)?;

    let slate = SlateBuilder::new(container.provider.clone(), today)
        .with_names(names)
        .with_lineup_cache(cache)
        .build(date)
        .await
        .with_context(|| format!("Failed to build slate for {}", date))?;
    save_slate(&container.layout, &slate)?;
    Ok(slate)
}

pub async fn schedule_fetch(container: &Container, date: NaiveDate, today: NaiveDate) -> Result<()> {
    let slate = fetch_slate(container, date, today).await?;
    println!("{}: {} games", date, slate.games.len());
    for game in &slate.games {
        let pitcher = |name: &Option<String>| name.clone().unwrap_or_else(|| "TBD".into());
        let lineup = |source: &Option<LineupSource>| {
            source.map_or_else(|| "none".to_string(), |s| s.to_string())
        };
        println!(
            "  {:>7}  {} ({}, {}) @ {} ({}, {})  {}",
            game.game_pk,
            game.away.team_name,
            pitcher(&game.away.pitcher_name),
            lineup(&game.away.lineup_source),
            game.home.team_name,
            pitcher(&game.home.pitcher_name),
            lineup(&game.home.lineup_source),
            game.status
        );
    }
    println!("-> {}", container.layout.schedule(date).display());
    Ok(())
}

pub struct TodayProjArgs {
    pub date: NaiveDate,
    pub line: Option<f64>,
    pub sims: Option<u32>,
}

pub async fn today_proj(container: &Container, args: TodayProjArgs, today: NaiveDate) -> Result<Vec<ProjectionRow>> {
    let line = args.line.unwrap_or(container.config.projection.line);
    let sims = args.sims.unwrap_or(container.config.simulation.projection_sims);
    let slate = fetch_slate(container, args.date, today).await?;

    let calibrators = Calibrators::load(&container.layout).context("Failed to load calibration models")?;
    if calibrators.is_empty() {
        info!("No calibration models; exp_cal and p_cal left empty");
    }

    let season = Season::of_date(args.date)?;
    let store = container.stat_store(season)?;
    let resolver = container.resolver(store.clone(), container.config.projection.resolver_config());
    let simulator = container.simulator(sims)?;
    let projector = Projector::new(
        Arc::new(resolver),
        Arc::new(simulator),
        calibrators,
        line,
        container.recorder(),
    );

    let rows = projector.project(&slate).await?;
    store.flush()?;

    let path = container.layout.today_proj();
    write_csv(&path, &rows)?;
    println!("{} starts projected for {} at line {}", rows.len(), args.date, line);
    for row in &rows {
        let cal = match (row.exp_cal, row.p_cal) {
            (Some(e), Some(p)) => format!("  cal {:.2} / {:.3}", e, p),
            (Some(e), None) => format!("  cal {:.2}", e),
            _ => String::new(),
        };
        println!(
            "  {:<24} {:<22} exp {:>5.2}  P(K >= {}) {:.3}{}",
            row.pitcher_name, row.team, row.exp_raw, line, row.p_raw, cal
        );
    }
    println!("-> {}", path.display());
    Ok(rows)
}

pub fn cache_predictions(container: &Container, pred: Option<PathBuf>, cache: Option<PathBuf>) -> Result<()> {
    let pred = pred.unwrap_or_else(|| container.layout.today_proj());
    let cache = cache.unwrap_or_else(|| container.layout.cached_predictions());
    let summary = append_to_cache(&pred, &cache)
        .with_context(|| format!("Run today-proj first ({})", pred.display()))?;
    println!(
        "{} added ({} replaced), {} cached -> {}",
        summary.added,
        summary.replaced,
        summary.total,
        cache.display()
    );
    Ok(())
}
