//! Season-by-season harvest of final regular-season starts.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use km_01_stats_api::StatsProvider;
use km_telemetry::MetricsRecorder;
use shared_store::{write_csv, DataLayout};
use shared_types::{GamePk, Season, StartRecord};
use tracing::{debug, info, warn};

use crate::domain::extract::{starts_from_boxscore, GameContext};
use crate::domain::skips::{SkipCounts, SkipReason};
use crate::error::HistoricalError;

/// Pause between box score requests.
pub const DEFAULT_BOXSCORE_DELAY: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub records: Vec<StartRecord>,
    pub skips: SkipCounts,
    pub games_scanned: u64,
}

pub struct HistoricalHarvester {
    provider: Arc<dyn StatsProvider>,
    metrics: Arc<dyn MetricsRecorder>,
    delay: Duration,
}

impl HistoricalHarvester {
    pub fn new(provider: Arc<dyn StatsProvider>, metrics: Arc<dyn MetricsRecorder>) -> Self {
        Self {
            provider,
            metrics,
            delay: DEFAULT_BOXSCORE_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every usable start in `seasons`.
    ///
    /// A game listed as final on more than one date (suspended and resumed)
    /// is read once. Earlier non-final listings do not hide the final one.
    pub async fn harvest(&self, seasons: &[Season]) -> Result<Harvest, HistoricalError> {
        let mut harvest = Harvest::default();
        let mut seen: HashSet<GamePk> = HashSet::new();

        for &season in seasons {
            let dates = self
                .provider
                .season_schedule(season)
                .await
                .map_err(|source| HistoricalError::Schedule { season, source })?;
            let before = harvest.records.len();

            for day in &dates {
                for game in &day.games {
                    if seen.contains(&game.game_pk) {
                        continue;
                    }
                    harvest.games_scanned += 1;
                    self.metrics.record_game_scanned();

                    if !game.status.is_final() {
                        self.skip(&mut harvest.skips, SkipReason::NotFinal);
                        continue;
                    }
                    seen.insert(game.game_pk);

                    let boxscore = match self.provider.boxscore(game.game_pk).await {
                        Ok(b) => b,
                        Err(e) => {
                            warn!(game_pk = %game.game_pk, error = %e, "Box score unavailable");
                            self.skip(&mut harvest.skips, SkipReason::BoxErr);
                            self.pause().await;
                            continue;
                        }
                    };

                    let ctx = GameContext {
                        game_pk: game.game_pk,
                        date: game.official_date.unwrap_or(day.date),
                        season,
                        park_id: game.venue.as_ref().map(|v| v.id),
                    };
                    let extraction = starts_from_boxscore(&ctx, &boxscore);
                    for reason in extraction.skipped {
                        debug!(game_pk = %game.game_pk, %reason, "Skipped");
                        self.skip(&mut harvest.skips, reason);
                    }
                    for start in extraction.starts {
                        self.metrics.record_start_harvested();
                        harvest.records.push(start);
                    }
                    self.pause().await;
                }
            }

            info!(
                %season,
                dates = dates.len(),
                starts = harvest.records.len() - before,
                "Harvested season"
            );
        }

        harvest.skips.log();
        Ok(harvest)
    }

    fn skip(&self, skips: &mut SkipCounts, reason: SkipReason) {
        skips.record(reason);
        self.metrics.record_start_skipped();
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Write `historical_ks.csv`. An empty harvest leaves any existing file in
/// place and returns `false`.
pub fn save_dataset(layout: &DataLayout, records: &[StartRecord]) -> Result<bool, HistoricalError> {
    if records.is_empty() {
        warn!(path = %layout.historical_ks().display(), "No starts harvested; dataset not written");
        return Ok(false);
    }
    write_csv(&layout.historical_ks(), records)?;
    info!(rows = records.len(), path = %layout.historical_ks().display(), "Saved historical dataset");
    Ok(true)
}
