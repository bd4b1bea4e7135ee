//! Season stat pull for every rostered player.

use std::sync::Arc;
use std::time::Duration;

use km_01_stats_api::{StatWindow, StatsProvider};
use shared_types::{PlayerStatLine, RosterEntry, StatGroup};
use tracing::{info, warn};

use crate::domain::rates::stat_row;

/// Pause between stat requests.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(50);

pub struct StatPuller {
    provider: Arc<dyn StatsProvider>,
    delay: Duration,
}

impl StatPuller {
    pub fn new(provider: Arc<dyn StatsProvider>) -> Self {
        Self {
            provider,
            delay: DEFAULT_REQUEST_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// One stat row per roster entry, in roster order.
    ///
    /// A failed request is logged and gives an empty row.
    pub async fn pull(&self, roster: &[RosterEntry]) -> Vec<PlayerStatLine> {
        let mut rows = Vec::with_capacity(roster.len());
        let mut failures = 0usize;

        for (i, entry) in roster.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let group = StatGroup::for_position(&entry.position);
            let line = match self
                .provider
                .player_stats(entry.player_id, group, StatWindow::Season(entry.season))
                .await
            {
                Ok(line) => line,
                Err(e) => {
                    failures += 1;
                    warn!(player = %entry.player_id, error = %e, "Stat request failed");
                    None
                }
            };
            rows.push(stat_row(entry, group, line.as_ref()));
        }

        let with_rate = rows.iter().filter(|r| r.k_rate.is_some()).count();
        info!(players = rows.len(), with_rate, failures, "Pulled season stats");
        rows
    }
}
