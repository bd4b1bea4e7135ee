//! # Slate
//!
//! A date's games with, for each side, the starting pitcher and the
//! batting order, and where each came from.
//!
//! Two cache files are derived from a slate:
//! - `cache/schedule_<date>.csv`: one `ScheduleRow` per game
//! - `cache/lineups_<date>.json`: `{game_pk: {away: [ids], home: [ids]}}`

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{GamePk, Lineup, LineupSource, PlayerId, Side, TeamId};

/// Where a starting pitcher came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitcherSource {
    /// Probable pitcher id in the hydrated schedule.
    Hydrated,
    /// Probable pitcher name matched against the season roster.
    NameIndex,
    /// Starter read from the game's box score.
    Boxscore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlateSide {
    pub team_id: TeamId,
    pub team_name: String,
    pub pitcher_id: Option<PlayerId>,
    pub pitcher_name: Option<String>,
    pub pitcher_source: Option<PitcherSource>,
    /// This team's batting order.
    pub lineup: Option<Lineup>,
    pub lineup_source: Option<LineupSource>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlateGame {
    pub game_pk: GamePk,
    pub date: NaiveDate,
    pub status: String,
    pub away: SlateSide,
    pub home: SlateSide,
}

impl SlateGame {
    pub fn side(&self, side: Side) -> &SlateSide {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slate {
    pub date: NaiveDate,
    pub games: Vec<SlateGame>,
}

impl Slate {
    pub fn schedule_rows(&self) -> Vec<ScheduleRow> {
        self.games.iter().map(ScheduleRow::from).collect()
    }

    pub fn lineup_cache(&self) -> LineupCache {
        let mut cache = LineupCache::default();
        for game in &self.games {
            for side in Side::BOTH {
                if let Some(lineup) = &game.side(side).lineup {
                    cache.insert(game.game_pk, side, lineup);
                }
            }
        }
        cache
    }
}

/// Row of `cache/schedule_<date>.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub game_id: GamePk,
    pub official_date: NaiveDate,
    pub status: String,
    pub away_team_id: TeamId,
    pub away_team_name: String,
    pub away_prob_id: Option<PlayerId>,
    pub away_prob_name: Option<String>,
    pub away_lineup: Option<Lineup>,
    pub away_lineup_source: Option<LineupSource>,
    pub home_team_id: TeamId,
    pub home_team_name: String,
    pub home_prob_id: Option<PlayerId>,
    pub home_prob_name: Option<String>,
    pub home_lineup: Option<Lineup>,
    pub home_lineup_source: Option<LineupSource>,
}

impl From<&SlateGame> for ScheduleRow {
    fn from(game: &SlateGame) -> Self {
        Self {
            game_id: game.game_pk,
            official_date: game.date,
            status: game.status.clone(),
            away_team_id: game.away.team_id,
            away_team_name: game.away.team_name.clone(),
            away_prob_id: game.away.pitcher_id,
            away_prob_name: game.away.pitcher_name.clone(),
            away_lineup: game.away.lineup.clone(),
            away_lineup_source: game.away.lineup_source,
            home_team_id: game.home.team_id,
            home_team_name: game.home.team_name.clone(),
            home_prob_id: game.home.pitcher_id,
            home_prob_name: game.home.pitcher_name.clone(),
            home_lineup: game.home.lineup.clone(),
            home_lineup_source: game.home.lineup_source,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedLineups {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away: Option<Vec<PlayerId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<Vec<PlayerId>>,
}

/// Batting orders by game and side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineupCache(BTreeMap<GamePk, CachedLineups>);

impl LineupCache {
    pub fn insert(&mut self, game: GamePk, side: Side, lineup: &Lineup) {
        let entry = self.0.entry(game).or_default();
        let ids = Some(lineup.batters().to_vec());
        match side {
            Side::Away => entry.away = ids,
            Side::Home => entry.home = ids,
        }
    }

    /// Cached order, if it is a full nine.
    pub fn get(&self, game: GamePk, side: Side) -> Option<Lineup> {
        let entry = self.0.get(&game)?;
        let ids = match side {
            Side::Away => entry.away.as_ref(),
            Side::Home => entry.home.as_ref(),
        }?;
        Lineup::new(ids.clone()).ok()
    }

    pub fn games(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn lineup(first: u32) -> Lineup {
        Lineup::new((first..first + 9).map(PlayerId).collect()).unwrap()
    }

    pub(crate) fn side(team: u32, pitcher: Option<u32>, lineup_first: Option<u32>) -> SlateSide {
        SlateSide {
            team_id: TeamId(team),
            team_name: format!("Team {}", team),
            pitcher_id: pitcher.map(PlayerId),
            pitcher_name: pitcher.map(|p| format!("Pitcher {}", p)),
            pitcher_source: pitcher.map(|_| PitcherSource::Hydrated),
            lineup: lineup_first.map(lineup),
            lineup_source: lineup_first.map(|_| LineupSource::Announced),
        }
    }

    fn slate() -> Slate {
        Slate {
            date: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            games: vec![SlateGame {
                game_pk: GamePk(777_001),
                date: NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
                status: "Pre-Game".into(),
                away: side(147, Some(543_037), Some(100)),
                home: side(111, None, None),
            }],
        }
    }

    #[test]
    fn test_lineup_cache_json_shape() {
        let cache = slate().lineup_cache();
        let json = serde_json::to_value(&cache).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"777001": {"away": [100, 101, 102, 103, 104, 105, 106, 107, 108]}})
        );

        let back: LineupCache = serde_json::from_value(json).unwrap();
        assert_eq!(back.get(GamePk(777_001), Side::Away), Some(lineup(100)));
        assert_eq!(back.get(GamePk(777_001), Side::Home), None);
    }

    #[test]
    fn test_short_cached_lineup_ignored() {
        let json = serde_json::json!({"5": {"home": [1, 2, 3]}});
        let cache: LineupCache = serde_json::from_value(json).unwrap();
        assert_eq!(cache.get(GamePk(5), Side::Home), None);
        assert_eq!(cache.games(), 1);
    }

    #[test]
    fn test_schedule_row_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        shared_store::write_csv(&path, &slate().schedule_rows()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let data = text.lines().nth(1).unwrap();
        assert!(data.starts_with("777001,2025-07-10,Pre-Game,147,Team 147,543037,Pitcher 543037,"));
        assert!(data.contains("announced"));

        let back: Vec<ScheduleRow> = shared_store::read_csv(&path).unwrap();
        assert_eq!(back[0].home_lineup, None);
        assert_eq!(back[0].away_lineup, Some(lineup(100)));
    }
}
