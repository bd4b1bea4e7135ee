//! Data collection commands: rosters, season stats, historical starts.

use anyhow::{bail, Context, Result};
use km_02_player_stats::{combine_seasons, RosterPuller, StatPuller};
use km_03_historical::{save_dataset, HistoricalHarvester};
use shared_store::{read_csv_if_exists, write_csv};
use shared_types::{RosterEntry, Season};
use tracing::info;

use crate::container::Container;

pub async fn smoke_test(container: &Container) -> Result<()> {
    let teams = container
        .provider
        .active_teams()
        .await
        .context("Stats API unreachable")?;
    if teams.is_empty() {
        bail!("Stats API returned no active teams");
    }
    println!("Stats API OK: {} active teams", teams.len());
    for team in teams.iter().take(5) {
        println!("  {:>4}  {:<4} {}", team.id, team.abbreviation, team.name);
    }
    Ok(())
}

pub async fn roster_pull(container: &Container, season: Season) -> Result<Vec<RosterEntry>> {
    let roster = RosterPuller::new(container.provider.clone())
        .pull(season)
        .await
        .with_context(|| format!("Roster pull for {} failed", season))?;
    let path = container.layout.players(season);
    write_csv(&path, &roster)?;
    info!(%season, players = roster.len(), path = %path.display(), "Saved roster");
    println!("{} players -> {}", roster.len(), path.display());
    Ok(roster)
}

/// Pulls the roster first when `players_<season>.csv` is missing.
pub async fn stat_pull(container: &Container, season: Season) -> Result<()> {
    let roster = match read_csv_if_exists::<RosterEntry>(&container.layout.players(season))? {
        Some(roster) => roster,
        None => {
            info!(%season, "No roster file; pulling rosters first");
            roster_pull(container, season).await?
        }
    };

    let rows = StatPuller::new(container.provider.clone())
        .with_delay(container.config.api.request_delay())
        .pull(&roster)
        .await;
    let path = container.layout.player_stats(season);
    write_csv(&path, &rows)?;
    let with_rate = rows.iter().filter(|r| r.k_rate.is_some()).count();
    println!("{} players ({} with a K-rate) -> {}", rows.len(), with_rate, path.display());
    Ok(())
}

pub fn combine_stats(container: &Container, seasons: &[Season]) -> Result<()> {
    let summary = combine_seasons(&container.layout, seasons).context("Combining stat files failed")?;
    if !summary.missing.is_empty() {
        let missing: Vec<String> = summary.missing.iter().map(Season::to_string).collect();
        println!("Missing seasons: {}", missing.join(", "));
    }
    println!(
        "{} rows from {} seasons -> {}",
        summary.rows,
        summary.included.len(),
        container.layout.combined_stats().display()
    );
    Ok(())
}

pub async fn build_dataset(container: &Container, seasons: &[Season]) -> Result<()> {
    let harvest = HistoricalHarvester::new(container.provider.clone(), container.recorder())
        .with_delay(container.config.api.boxscore_delay())
        .harvest(seasons)
        .await
        .context("Harvest failed")?;

    let saved = save_dataset(&container.layout, &harvest.records)?;
    println!(
        "{} games scanned, {} starts kept, {} skipped",
        harvest.games_scanned,
        harvest.records.len(),
        harvest.skips.total()
    );
    if saved {
        println!("-> {}", container.layout.historical_ks().display());
    }
    Ok(())
}
