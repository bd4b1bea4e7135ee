//! Fixture-backed `StatsProvider` for tests and offline runs.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use shared_types::{GamePk, PlayerId, Season, StatGroup, TeamId};

use crate::domain::types::{Boxscore, RosterSlot, ScheduleDate, StatLine, Team};
use crate::error::StatsApiError;
use crate::ports::outbound::{RosterType, StatWindow, StatsProvider};

#[derive(Default)]
struct Fixtures {
    season_schedules: HashMap<Season, Vec<ScheduleDate>>,
    date_schedules: HashMap<NaiveDate, Vec<ScheduleDate>>,
    boxscores: HashMap<GamePk, Boxscore>,
    failing_boxscores: HashSet<GamePk>,
    stats: HashMap<(PlayerId, StatGroup, StatWindow), StatLine>,
    names: HashMap<PlayerId, String>,
    teams: Vec<Team>,
    rosters: HashMap<TeamId, Vec<RosterSlot>>,
}

/// In-memory Stats API.
///
/// Unknown games are `NotFound`; unknown stat lines and names are `None`.
#[derive(Default)]
pub struct InMemoryStatsProvider {
    fixtures: RwLock<Fixtures>,
    stat_requests: AtomicUsize,
    boxscore_requests: AtomicUsize,
}

impl InMemoryStatsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_season_schedule(&self, season: Season, dates: Vec<ScheduleDate>) {
        self.fixtures.write().season_schedules.insert(season, dates);
    }

    pub fn insert_date_schedule(&self, date: NaiveDate, dates: Vec<ScheduleDate>) {
        self.fixtures.write().date_schedules.insert(date, dates);
    }

    pub fn insert_boxscore(&self, game: GamePk, boxscore: Boxscore) {
        self.fixtures.write().boxscores.insert(game, boxscore);
    }

    /// Make `boxscore(game)` fail with a server error.
    pub fn fail_boxscore(&self, game: GamePk) {
        self.fixtures.write().failing_boxscores.insert(game);
    }

    pub fn insert_stats(&self, player: PlayerId, group: StatGroup, window: StatWindow, line: StatLine) {
        self.fixtures
            .write()
            .stats
            .insert((player, group, window), line);
    }

    pub fn insert_name(&self, player: PlayerId, name: impl Into<String>) {
        self.fixtures.write().names.insert(player, name.into());
    }

    pub fn insert_team(&self, team: Team) {
        self.fixtures.write().teams.push(team);
    }

    pub fn insert_roster(&self, team: TeamId, roster: Vec<RosterSlot>) {
        self.fixtures.write().rosters.insert(team, roster);
    }

    /// Number of `player_stats` calls served.
    pub fn stat_requests(&self) -> usize {
        self.stat_requests.load(Ordering::Relaxed)
    }

    /// Number of `boxscore` calls served.
    pub fn boxscore_requests(&self) -> usize {
        self.boxscore_requests.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl StatsProvider for InMemoryStatsProvider {
    async fn season_schedule(&self, season: Season) -> Result<Vec<ScheduleDate>, StatsApiError> {
        Ok(self
            .fixtures
            .read()
            .season_schedules
            .get(&season)
            .cloned()
            .unwrap_or_default())
    }

    async fn schedule_for_date(&self, date: NaiveDate) -> Result<Vec<ScheduleDate>, StatsApiError> {
        Ok(self
            .fixtures
            .read()
            .date_schedules
            .get(&date)
            .cloned()
            .unwrap_or_default())
    }

    async fn boxscore(&self, game: GamePk) -> Result<Boxscore, StatsApiError> {
        self.boxscore_requests.fetch_add(1, Ordering::Relaxed);
        let fixtures = self.fixtures.read();
        if fixtures.failing_boxscores.contains(&game) {
            return Err(StatsApiError::Status {
                status: 503,
                url: format!("memory://game/{}/boxscore", game),
            });
        }
        fixtures
            .boxscores
            .get(&game)
            .cloned()
            .ok_or_else(|| StatsApiError::NotFound(format!("memory://game/{}/boxscore", game)))
    }

    async fn player_stats(
        &self,
        player: PlayerId,
        group: StatGroup,
        window: StatWindow,
    ) -> Result<Option<StatLine>, StatsApiError> {
        self.stat_requests.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .fixtures
            .read()
            .stats
            .get(&(player, group, window))
            .cloned())
    }

    async fn person_name(&self, player: PlayerId) -> Result<Option<String>, StatsApiError> {
        Ok(self.fixtures.read().names.get(&player).cloned())
    }

    async fn active_teams(&self) -> Result<Vec<Team>, StatsApiError> {
        Ok(self.fixtures.read().teams.clone())
    }

    async fn team_roster(
        &self,
        team: TeamId,
        _season: Season,
        _roster_type: RosterType,
    ) -> Result<Vec<RosterSlot>, StatsApiError> {
        Ok(self
            .fixtures
            .read()
            .rosters
            .get(&team)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_fixtures() {
        let provider = InMemoryStatsProvider::new();
        let season = Season::new(2024).unwrap();

        assert!(provider.season_schedule(season).await.unwrap().is_empty());
        assert!(matches!(
            provider.boxscore(GamePk(1)).await,
            Err(StatsApiError::NotFound(_))
        ));
        assert!(provider
            .player_stats(PlayerId(1), StatGroup::Hitting, StatWindow::Season(season))
            .await
            .unwrap()
            .is_none());
        assert_eq!(provider.stat_requests(), 1);
    }

    #[tokio::test]
    async fn test_stats_fixture_keyed_by_window() {
        let provider = InMemoryStatsProvider::new();
        let season = Season::new(2024).unwrap();
        let line = StatLine {
            strike_outs: Some(200),
            batters_faced: Some(800),
            ..StatLine::default()
        };
        provider.insert_stats(PlayerId(7), StatGroup::Pitching, StatWindow::Season(season), line.clone());

        let found = provider
            .player_stats(PlayerId(7), StatGroup::Pitching, StatWindow::Season(season))
            .await
            .unwrap();
        assert_eq!(found, Some(line));

        let other_group = provider
            .player_stats(PlayerId(7), StatGroup::Hitting, StatWindow::Season(season))
            .await
            .unwrap();
        assert!(other_group.is_none());
    }

    #[tokio::test]
    async fn test_failing_boxscore() {
        let provider = InMemoryStatsProvider::new();
        provider.fail_boxscore(GamePk(9));

        let err = provider.boxscore(GamePk(9)).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(provider.boxscore_requests(), 1);
    }
}
