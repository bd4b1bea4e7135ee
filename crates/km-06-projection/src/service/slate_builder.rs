//! # Slate Builder
//!
//! Turns a date's hydrated schedule into a `Slate`.
//!
//! ## Game filter
//!
//! Postponed and cancelled games are dropped. Finished games are kept only
//! when the date is in the past (backfilling a slate).
//!
//! ## Starting pitcher, first hit wins
//!
//! | Step | Source |
//! |------|--------|
//! | 1 | probable pitcher id in the schedule |
//! | 2 | probable pitcher name in the season roster |
//! | 3 | box score starter, once the game has begun |
//!
//! ## Batting order, first hit wins
//!
//! | Step | Source |
//! |------|--------|
//! | 1 | lineup announced in the schedule |
//! | 2 | lineup cache from an earlier run |
//! | 3 | box score batting order, once the game has begun |
//! | 4 | the team's batting order in its previous day's game |
//! | 5 | first nine non-pitchers on the active roster |

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use km_01_stats_api::{
    extract_lineup, starting_pitcher, Boxscore, RosterType, ScheduledGame, StatsProvider,
};
use shared_types::{is_pitcher_position, GamePk, Lineup, LineupSource, PlayerId, Season, Side, TeamId};
use tracing::{debug, info, warn};

use crate::domain::names::NameIndex;
use crate::domain::slate::{LineupCache, PitcherSource, Slate, SlateGame, SlateSide};
use crate::error::ProjectionError;

pub struct SlateBuilder {
    provider: Arc<dyn StatsProvider>,
    today: NaiveDate,
    names: NameIndex,
    cache: LineupCache,
}

/// Per-build memo of lookups shared between games.
#[derive(Default)]
struct Lookups {
    previous_games: Option<Vec<ScheduledGame>>,
    previous_lineups: HashMap<TeamId, Option<Lineup>>,
    roster_lineups: HashMap<TeamId, Option<Lineup>>,
}

impl SlateBuilder {
    pub fn new(provider: Arc<dyn StatsProvider>, today: NaiveDate) -> Self {
        Self {
            provider,
            today,
            names: NameIndex::default(),
            cache: LineupCache::default(),
        }
    }

    pub fn with_names(mut self, names: NameIndex) -> Self {
        self.names = names;
        self
    }

    pub fn with_lineup_cache(mut self, cache: LineupCache) -> Self {
        self.cache = cache;
        self
    }

    pub async fn build(&self, date: NaiveDate) -> Result<Slate, ProjectionError> {
        let days = self.provider.schedule_for_date(date).await?;
        let mut seen: HashSet<GamePk> = HashSet::new();
        let mut lookups = Lookups::default();
        let mut games = Vec::new();

        for game in days.iter().flat_map(|d| d.games.iter()) {
            if !seen.insert(game.game_pk) {
                continue;
            }
            if !self.keep(game, date) {
                debug!(game_pk = %game.game_pk, status = %game.status.detailed_state, "Dropped from slate");
                continue;
            }
            games.push(self.build_game(game, date, &mut lookups).await);
        }

        info!(%date, games = games.len(), "Built slate");
        Ok(Slate { date, games })
    }

    fn keep(&self, game: &ScheduledGame, date: NaiveDate) -> bool {
        if game.status.is_called_off() {
            return false;
        }
        let over = game.status.abstract_game_state == "Final";
        !over || date < self.today
    }

    async fn build_game(&self, game: &ScheduledGame, date: NaiveDate, lookups: &mut Lookups) -> SlateGame {
        let boxscore = if game.status.has_started() {
            match self.provider.boxscore(game.game_pk).await {
                Ok(b) => Some(b),
                Err(e) => {
                    warn!(game_pk = %game.game_pk, error = %e, "Box score unavailable");
                    None
                }
            }
        } else {
            None
        };

        let away = self.build_side(game, Side::Away, date, boxscore.as_ref(), lookups).await;
        let home = self.build_side(game, Side::Home, date, boxscore.as_ref(), lookups).await;
        SlateGame {
            game_pk: game.game_pk,
            date: game.official_date.unwrap_or(date),
            status: game.status.detailed_state.clone(),
            away,
            home,
        }
    }

    async fn build_side(
        &self,
        game: &ScheduledGame,
        side: Side,
        date: NaiveDate,
        boxscore: Option<&Boxscore>,
        lookups: &mut Lookups,
    ) -> SlateSide {
        let scheduled = game.teams.get(side);
        let team_id = scheduled.team.id;
        let probable = scheduled.probable_pitcher.as_ref();
        let hydrated_name = probable.and_then(|p| p.full_name.clone());

        let (pitcher_id, pitcher_source) = if let Some(id) = probable.and_then(|p| p.id) {
            (Some(id), Some(PitcherSource::Hydrated))
        } else if let Some(id) = hydrated_name.as_deref().and_then(|n| self.names.lookup(n)) {
            (Some(id), Some(PitcherSource::NameIndex))
        } else if let Some(id) = boxscore.and_then(|b| starting_pitcher(b.teams.get(side))) {
            (Some(id), Some(PitcherSource::Boxscore))
        } else {
            (None, None)
        };

        let pitcher_name = match pitcher_id {
            Some(id) => self.pitcher_name(id, hydrated_name, boxscore, side).await,
            None => hydrated_name,
        };
        if pitcher_id.is_none() {
            debug!(game_pk = %game.game_pk, %side, "No starting pitcher");
        }

        let (lineup, lineup_source) = match self.lineup(game, side, date, boxscore, lookups).await {
            Some((lineup, source)) => (Some(lineup), Some(source)),
            None => {
                debug!(game_pk = %game.game_pk, %side, "No batting order");
                (None, None)
            }
        };

        SlateSide {
            team_id,
            team_name: scheduled.team.name.clone(),
            pitcher_id,
            pitcher_name,
            pitcher_source,
            lineup,
            lineup_source,
        }
    }

    async fn pitcher_name(
        &self,
        id: PlayerId,
        hydrated: Option<String>,
        boxscore: Option<&Boxscore>,
        side: Side,
    ) -> Option<String> {
        if hydrated.is_some() {
            return hydrated;
        }
        let from_box = boxscore
            .and_then(|b| b.teams.get(side).player(id))
            .map(|p| p.person.full_name.clone())
            .filter(|n| !n.is_empty());
        if from_box.is_some() {
            return from_box;
        }
        match self.provider.person_name(id).await {
            Ok(name) => name,
            Err(e) => {
                warn!(player = %id, error = %e, "Name lookup failed");
                None
            }
        }
    }

    async fn lineup(
        &self,
        game: &ScheduledGame,
        side: Side,
        date: NaiveDate,
        boxscore: Option<&Boxscore>,
        lookups: &mut Lookups,
    ) -> Option<(Lineup, LineupSource)> {
        if let Ok(lineup) = Lineup::new(game.announced_lineup(side)) {
            return Some((lineup, LineupSource::Announced));
        }
        if let Some(lineup) = self.cache.get(game.game_pk, side) {
            return Some((lineup, LineupSource::Cache));
        }
        if let Some(lineup) = boxscore.and_then(|b| extract_lineup(b.teams.get(side))) {
            return Some((lineup, LineupSource::Boxscore));
        }

        let team = game.teams.get(side).team.id;
        if let Some(lineup) = self.previous_lineup(team, date, lookups).await {
            return Some((lineup, LineupSource::PreviousGame));
        }
        if let Some(lineup) = self.roster_lineup(team, date, lookups).await {
            return Some((lineup, LineupSource::Roster));
        }
        None
    }

    async fn previous_lineup(&self, team: TeamId, date: NaiveDate, lookups: &mut Lookups) -> Option<Lineup> {
        if let Some(hit) = lookups.previous_lineups.get(&team) {
            return hit.clone();
        }

        if lookups.previous_games.is_none() {
            let yesterday = date - Duration::days(1);
            let games = match self.provider.schedule_for_date(yesterday).await {
                Ok(days) => days.into_iter().flat_map(|d| d.games).collect(),
                Err(e) => {
                    warn!(date = %yesterday, error = %e, "Previous day's schedule unavailable");
                    Vec::new()
                }
            };
            lookups.previous_games = Some(games);
        }

        let found = lookups
            .previous_games
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|g| g.status.has_started())
            .find_map(|g| {
                Side::BOTH
                    .into_iter()
                    .find(|&s| g.teams.get(s).team.id == team)
                    .map(|s| (g.game_pk, s))
            });

        let lineup = match found {
            Some((game_pk, side)) => match self.provider.boxscore(game_pk).await {
                Ok(b) => extract_lineup(b.teams.get(side)),
                Err(e) => {
                    warn!(%game_pk, error = %e, "Previous game's box score unavailable");
                    None
                }
            },
            None => None,
        };
        lookups.previous_lineups.insert(team, lineup.clone());
        lineup
    }

    async fn roster_lineup(&self, team: TeamId, date: NaiveDate, lookups: &mut Lookups) -> Option<Lineup> {
        if let Some(hit) = lookups.roster_lineups.get(&team) {
            return hit.clone();
        }
        let lineup = match Season::of_date(date) {
            Ok(season) => match self.provider.team_roster(team, season, RosterType::Active).await {
                Ok(slots) => Lineup::from_leading(
                    slots
                        .iter()
                        .filter(|s| !is_pitcher_position(&s.position.abbreviation))
                        .map(|s| s.person.id),
                )
                .ok(),
                Err(e) => {
                    warn!(%team, error = %e, "Roster unavailable");
                    None
                }
            },
            Err(_) => None,
        };
        lookups.roster_lineups.insert(team, lineup.clone());
        lineup
    }
}
