//! Outbound Ports (Driven Ports)
//!
//! Everything the pipeline reads from the MLB Stats API goes through
//! `StatsProvider`.
//!
//! Production: `StatsApiClient` (adapters/http.rs)
//! Testing: `InMemoryStatsProvider` (adapters/memory.rs)

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared_types::{GamePk, PlayerId, Season, StatGroup, TeamId};

use crate::domain::types::{Boxscore, RosterSlot, ScheduleDate, StatLine, Team};
use crate::error::StatsApiError;

/// Time window for a player's stat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatWindow {
    /// Full regular season.
    Season(Season),
    /// Inclusive date range.
    DateRange { start: NaiveDate, end: NaiveDate },
}

impl StatWindow {
    /// Trailing window of `days` ending on `end`.
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        let start = end - chrono::Duration::days(i64::from(days));
        StatWindow::DateRange { start, end }
    }
}

impl fmt::Display for StatWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatWindow::Season(season) => write!(f, "season {}", season),
            StatWindow::DateRange { start, end } => write!(f, "{}..{}", start, end),
        }
    }
}

/// Which roster to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RosterType {
    #[default]
    Active,
    FortyMan,
}

impl RosterType {
    pub fn api_name(self) -> &'static str {
        match self {
            RosterType::Active => "active",
            RosterType::FortyMan => "40Man",
        }
    }
}

/// Read access to the MLB Stats API (Driven Port)
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Regular-season schedule for a season.
    async fn season_schedule(&self, season: Season) -> Result<Vec<ScheduleDate>, StatsApiError>;

    /// Schedule for one date, hydrated with probable pitchers and lineups.
    async fn schedule_for_date(&self, date: NaiveDate)
        -> Result<Vec<ScheduleDate>, StatsApiError>;

    /// Box score of a game.
    async fn boxscore(&self, game: GamePk) -> Result<Boxscore, StatsApiError>;

    /// A player's stat line over a window; `None` if he has none.
    async fn player_stats(
        &self,
        player: PlayerId,
        group: StatGroup,
        window: StatWindow,
    ) -> Result<Option<StatLine>, StatsApiError>;

    /// A player's full name; `None` if the id is unknown.
    async fn person_name(&self, player: PlayerId) -> Result<Option<String>, StatsApiError>;

    /// All active MLB teams.
    async fn active_teams(&self) -> Result<Vec<Team>, StatsApiError>;

    /// A team's roster for a season.
    async fn team_roster(
        &self,
        team: TeamId,
        season: Season,
        roster_type: RosterType,
    ) -> Result<Vec<RosterSlot>, StatsApiError>;
}
