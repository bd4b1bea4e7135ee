//! # K-Rate Resolution
//!
//! Rates are looked up in order, first hit wins:
//!
//! | Step | Source | Applies to |
//! |------|--------|------------|
//! | 1 | stat store | season window only |
//! | 2 | Stats API | season or trailing window |
//! | 3 | historical fallback (mean simulated K / 9) | pitchers |
//! | 4 | configured default | everyone |
//!
//! Season rates fetched in step 2 are written back to the store when
//! `persist_fetched` is set. Every answer is memoised for the resolver's
//! lifetime, so a player appearing in many lineups costs one request.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use km_01_stats_api::{StatLine, StatWindow, StatsProvider};
use parking_lot::Mutex;
use shared_types::{Lineup, PlayerId, PlayerStatLine, RosterEntry, Season, StatGroup, TeamId};
use tracing::{debug, warn};

use crate::domain::rates::{k_rate, stat_row};
use crate::domain::source::{RateSource, RateWindow, ResolvedRate, ResolverConfig};
use crate::ports::outbound::PlayerStatsStore;

type MemoKey = (PlayerId, StatGroup, StatWindow);

pub struct KRateResolver {
    provider: Arc<dyn StatsProvider>,
    store: Arc<dyn PlayerStatsStore>,
    fallback: HashMap<PlayerId, f64>,
    config: ResolverConfig,
    memo: Mutex<HashMap<MemoKey, ResolvedRate>>,
}

impl KRateResolver {
    pub fn new(
        provider: Arc<dyn StatsProvider>,
        store: Arc<dyn PlayerStatsStore>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            provider,
            store,
            fallback: HashMap::new(),
            config,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Per-pitcher rates used when neither store nor API has one.
    pub fn with_fallback(mut self, fallback: HashMap<PlayerId, f64>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn PlayerStatsStore> {
        &self.store
    }

    pub async fn resolve(
        &self,
        player: PlayerId,
        group: StatGroup,
        season: Season,
        as_of: NaiveDate,
    ) -> ResolvedRate {
        let window = self.config.window.stat_window(season, as_of);
        let key = (player, group, window);
        if let Some(hit) = self.memo.lock().get(&key) {
            return *hit;
        }

        let resolved = self.lookup(player, group, season, window).await;
        debug!(%player, ?group, %window, rate = resolved.rate, source = %resolved.source, "Resolved K-rate");
        self.memo.lock().insert(key, resolved);
        resolved
    }

    pub async fn resolve_pitcher(&self, player: PlayerId, season: Season, as_of: NaiveDate) -> ResolvedRate {
        self.resolve(player, StatGroup::Pitching, season, as_of).await
    }

    /// Rates for a batting order, in order.
    pub async fn resolve_lineup(&self, lineup: &Lineup, season: Season, as_of: NaiveDate) -> Vec<ResolvedRate> {
        let mut rates = Vec::with_capacity(lineup.batters().len());
        for batter in lineup.iter() {
            rates.push(self.resolve(batter, StatGroup::Hitting, season, as_of).await);
        }
        rates
    }

    /// How many distinct keys each source answered.
    pub fn source_counts(&self) -> HashMap<RateSource, usize> {
        let mut counts = HashMap::new();
        for rate in self.memo.lock().values() {
            *counts.entry(rate.source).or_insert(0) += 1;
        }
        counts
    }

    async fn lookup(
        &self,
        player: PlayerId,
        group: StatGroup,
        season: Season,
        window: StatWindow,
    ) -> ResolvedRate {
        let season_window = self.config.window == RateWindow::Season;

        if season_window {
            if let Some(rate) = self.store.k_rate(season, player, group) {
                return ResolvedRate {
                    rate,
                    source: RateSource::Store,
                };
            }
        }

        match self.provider.player_stats(player, group, window).await {
            Ok(Some(line)) => {
                if let Some(rate) = k_rate(&line, group) {
                    if season_window && self.config.persist_fetched {
                        self.persist(player, group, season, &line).await;
                    }
                    return ResolvedRate {
                        rate,
                        source: RateSource::Api,
                    };
                }
            }
            Ok(None) => {}
            Err(e) => warn!(%player, %window, error = %e, "K-rate request failed"),
        }

        if group == StatGroup::Pitching {
            if let Some(&rate) = self.fallback.get(&player) {
                return ResolvedRate {
                    rate,
                    source: RateSource::Fallback,
                };
            }
        }

        ResolvedRate {
            rate: self.config.default_rate,
            source: RateSource::Default,
        }
    }

    async fn persist(&self, player: PlayerId, group: StatGroup, season: Season, line: &StatLine) {
        let name = match self.provider.person_name(player).await {
            Ok(Some(name)) => name,
            _ => format!("ID{}", player),
        };
        let entry = RosterEntry {
            player_id: player,
            name,
            team_id: TeamId(0),
            team_abbr: String::new(),
            position: match group {
                StatGroup::Pitching => "P".into(),
                StatGroup::Hitting => String::new(),
            },
            season,
        };
        let row: PlayerStatLine = stat_row(&entry, group, Some(line));
        debug!(%player, name = %row.name, "Adding fetched K-rate to store");
        self.store.upsert(row);
    }
}
