//! Stats API response types.
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! payload is ignored. Optional blocks default so sparse responses (early
//! season, postponed games) still parse.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{GamePk, PlayerId, Side, TeamId, VenueId};

// =============================================================================
// SCHEDULE
// =============================================================================

/// `GET /schedule`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

/// One calendar day of a schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDate {
    pub date: NaiveDate,
    #[serde(default)]
    pub games: Vec<ScheduledGame>,
}

/// One scheduled game.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub game_pk: GamePk,
    #[serde(default)]
    pub official_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: GameStatus,
    pub teams: GameTeams,
    #[serde(default)]
    pub venue: Option<VenueRef>,
    /// Present when the request hydrates `lineups`.
    #[serde(default)]
    pub lineups: Option<GameLineups>,
}

impl ScheduledGame {
    /// Announced batting order for a side, if published.
    pub fn announced_lineup(&self, side: Side) -> Vec<PlayerId> {
        self.lineups
            .as_ref()
            .map(|l| {
                let players = match side {
                    Side::Away => &l.away_players,
                    Side::Home => &l.home_players,
                };
                players.iter().map(|p| p.id).collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    #[serde(default)]
    pub abstract_game_state: String,
    #[serde(default)]
    pub detailed_state: String,
}

impl GameStatus {
    pub fn is_final(&self) -> bool {
        self.detailed_state == "Final"
    }

    /// Postponed or cancelled.
    pub fn is_called_off(&self) -> bool {
        matches!(self.detailed_state.as_str(), "Postponed" | "Cancelled")
    }

    /// Box score exists and may name starters.
    pub fn has_started(&self) -> bool {
        matches!(self.abstract_game_state.as_str(), "Live" | "Final")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameTeams {
    pub away: ScheduledTeam,
    pub home: ScheduledTeam,
}

impl GameTeams {
    pub fn get(&self, side: Side) -> &ScheduledTeam {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTeam {
    pub team: TeamRef,
    /// Present when the request hydrates `probablePitcher`.
    #[serde(default)]
    pub probable_pitcher: Option<ProbablePitcher>,
}

/// Announced starter. Early announcements can carry a name before an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbablePitcher {
    #[serde(default)]
    pub id: Option<PlayerId>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLineups {
    #[serde(default)]
    pub away_players: Vec<PersonRef>,
    #[serde(default)]
    pub home_players: Vec<PersonRef>,
}

// =============================================================================
// REFERENCES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub id: PlayerId,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueRef {
    pub id: VenueId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(default)]
    pub abbreviation: String,
}

// =============================================================================
// BOX SCORE
// =============================================================================

/// `GET /game/{gamePk}/boxscore`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boxscore {
    pub teams: BoxscoreTeams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxscoreTeams {
    pub away: BoxscoreTeam,
    pub home: BoxscoreTeam,
}

impl BoxscoreTeams {
    pub fn get(&self, side: Side) -> &BoxscoreTeam {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }
}

/// One team's half of a box score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreTeam {
    pub team: TeamRef,
    /// Keyed `"ID<personId>"`.
    #[serde(default)]
    pub players: HashMap<String, BoxscorePlayer>,
    #[serde(default)]
    pub batting_order: Vec<PlayerId>,
    #[serde(default)]
    pub batters: Vec<PlayerId>,
    /// Pitchers in order of appearance.
    #[serde(default)]
    pub pitchers: Vec<PlayerId>,
}

impl BoxscoreTeam {
    pub fn player(&self, id: PlayerId) -> Option<&BoxscorePlayer> {
        self.players.get(&format!("ID{}", id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscorePlayer {
    pub person: PersonRef,
    /// `"100"`..`"900"` for starters, `"101"` etc. for substitutes.
    #[serde(default)]
    pub batting_order: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub stats: PlayerGameStats,
    #[serde(default)]
    pub game_status: PlayerGameStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerGameStats {
    /// Non-pitchers carry an empty object here.
    #[serde(default)]
    pub pitching: Option<PitchingGameLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchingGameLine {
    #[serde(default)]
    pub games_started: Option<u32>,
    #[serde(default)]
    pub strike_outs: Option<u32>,
    #[serde(default)]
    pub innings_pitched: Option<String>,
    #[serde(default)]
    pub outs: Option<u32>,
}

impl PitchingGameLine {
    /// Outs recorded, from `outs` or parsed from innings pitched.
    pub fn outs_recorded(&self) -> u32 {
        self.outs.unwrap_or_else(|| {
            self.innings_pitched
                .as_deref()
                .map(shared_types::outs_from_innings)
                .unwrap_or(0)
        })
    }

    /// True when the player actually pitched (the object was not empty).
    pub fn is_recorded(&self) -> bool {
        self.games_started.is_some()
            || self.strike_outs.is_some()
            || self.innings_pitched.is_some()
            || self.outs.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerGameStatus {
    #[serde(default)]
    pub is_starter: bool,
}

// =============================================================================
// PLAYER STATS
// =============================================================================

/// `GET /people/{id}/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub stats: Vec<StatBlock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(default)]
    pub splits: Vec<StatSplit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatSplit {
    /// Absent on the combined split of a player who changed teams.
    #[serde(default)]
    pub team: Option<TeamRef>,
    pub stat: StatLine,
}

/// Aggregated counting stats over a window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLine {
    #[serde(default)]
    pub strike_outs: Option<u32>,
    #[serde(default)]
    pub plate_appearances: Option<u32>,
    #[serde(default)]
    pub batters_faced: Option<u32>,
    #[serde(default)]
    pub innings_pitched: Option<String>,
    #[serde(default)]
    pub outs: Option<u32>,
}

impl StatsResponse {
    /// The single line for the window.
    ///
    /// A traded player gets one split per team plus a combined split without
    /// a team; the combined split wins. Without one, team splits are summed.
    pub fn into_line(self) -> Option<StatLine> {
        let splits: Vec<StatSplit> = self.stats.into_iter().flat_map(|b| b.splits).collect();
        match splits.len() {
            0 => None,
            1 => splits.into_iter().next().map(|s| s.stat),
            _ => {
                if let Some(total) = splits.iter().find(|s| s.team.is_none()) {
                    return Some(total.stat.clone());
                }
                Some(
                    splits
                        .iter()
                        .fold(StatLine::default(), |acc, s| acc.combine(&s.stat)),
                )
            }
        }
    }
}

impl StatLine {
    /// Outs recorded, from `outs` or parsed from innings pitched.
    pub fn outs_recorded(&self) -> u32 {
        self.outs.unwrap_or_else(|| {
            self.innings_pitched
                .as_deref()
                .map(shared_types::outs_from_innings)
                .unwrap_or(0)
        })
    }

    /// Sum two lines; innings are recomputed from total outs.
    pub fn combine(&self, other: &StatLine) -> StatLine {
        fn add(a: Option<u32>, b: Option<u32>) -> Option<u32> {
            match (a, b) {
                (None, None) => None,
                (a, b) => Some(a.unwrap_or(0) + b.unwrap_or(0)),
            }
        }
        let outs = self.outs_recorded() + other.outs_recorded();
        let has_innings = self.innings_pitched.is_some()
            || other.innings_pitched.is_some()
            || self.outs.is_some()
            || other.outs.is_some();
        StatLine {
            strike_outs: add(self.strike_outs, other.strike_outs),
            plate_appearances: add(self.plate_appearances, other.plate_appearances),
            batters_faced: add(self.batters_faced, other.batters_faced),
            innings_pitched: has_innings.then(|| format!("{}.{}", outs / 3, outs % 3)),
            outs: has_innings.then_some(outs),
        }
    }
}

// =============================================================================
// PEOPLE / TEAMS / ROSTERS
// =============================================================================

/// `GET /people/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeopleResponse {
    #[serde(default)]
    pub people: Vec<PersonRef>,
}

/// `GET /teams`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
}

/// `GET /teams/{id}/roster`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterResponse {
    #[serde(default)]
    pub roster: Vec<RosterSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSlot {
    pub person: PersonRef,
    #[serde(default)]
    pub position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_parses_hydrated_game() {
        let json = r#"{
            "dates": [{
                "date": "2025-07-10",
                "games": [{
                    "gamePk": 777001,
                    "officialDate": "2025-07-10",
                    "status": {"abstractGameState": "Preview", "detailedState": "Pre-Game"},
                    "teams": {
                        "away": {"team": {"id": 147, "name": "New York Yankees"},
                                 "probablePitcher": {"id": 543037, "fullName": "Gerrit Cole"}},
                        "home": {"team": {"id": 111, "name": "Boston Red Sox"}}
                    },
                    "venue": {"id": 3, "name": "Fenway Park"},
                    "lineups": {"homePlayers": [{"id": 1}, {"id": 2}]}
                }]
            }]
        }"#;
        let resp: ScheduleResponse = serde_json::from_str(json).unwrap();
        let game = &resp.dates[0].games[0];

        assert_eq!(game.game_pk, GamePk(777001));
        assert_eq!(
            game.teams.away.probable_pitcher.as_ref().and_then(|p| p.id),
            Some(PlayerId(543037))
        );
        assert!(game.teams.home.probable_pitcher.is_none());
        assert_eq!(game.announced_lineup(Side::Home), vec![PlayerId(1), PlayerId(2)]);
        assert!(game.announced_lineup(Side::Away).is_empty());
        assert!(!game.status.has_started());
    }

    #[test]
    fn test_probable_pitcher_without_id() {
        let team: ScheduledTeam = serde_json::from_str(
            r#"{"team": {"id": 147}, "probablePitcher": {"fullName": "Carlos Rodón"}}"#,
        )
        .unwrap();
        let probable = team.probable_pitcher.unwrap();
        assert_eq!(probable.id, None);
        assert_eq!(probable.full_name.as_deref(), Some("Carlos Rodón"));
    }

    #[test]
    fn test_empty_pitching_object_is_not_recorded() {
        let line: PitchingGameLine = serde_json::from_str("{}").unwrap();
        assert!(!line.is_recorded());
        assert_eq!(line.outs_recorded(), 0);

        let line: PitchingGameLine =
            serde_json::from_str(r#"{"inningsPitched": "6.1", "strikeOuts": 8}"#).unwrap();
        assert!(line.is_recorded());
        assert_eq!(line.outs_recorded(), 19);
    }

    #[test]
    fn test_combined_split_preferred() {
        let json = r#"{"stats": [{"splits": [
            {"team": {"id": 1}, "stat": {"strikeOuts": 10, "battersFaced": 50}},
            {"team": {"id": 2}, "stat": {"strikeOuts": 5, "battersFaced": 30}},
            {"stat": {"strikeOuts": 15, "battersFaced": 80}}
        ]}]}"#;
        let resp: StatsResponse = serde_json::from_str(json).unwrap();
        let line = resp.into_line().unwrap();
        assert_eq!(line.strike_outs, Some(15));
        assert_eq!(line.batters_faced, Some(80));
    }

    #[test]
    fn test_team_splits_summed_without_total() {
        let json = r#"{"stats": [{"splits": [
            {"team": {"id": 1}, "stat": {"strikeOuts": 10, "inningsPitched": "10.2"}},
            {"team": {"id": 2}, "stat": {"strikeOuts": 5, "inningsPitched": "4.2"}}
        ]}]}"#;
        let resp: StatsResponse = serde_json::from_str(json).unwrap();
        let line = resp.into_line().unwrap();
        assert_eq!(line.strike_outs, Some(15));
        assert_eq!(line.outs_recorded(), 46);
        assert_eq!(line.innings_pitched.as_deref(), Some("15.1"));
        assert_eq!(line.plate_appearances, None);
    }

    #[test]
    fn test_empty_stats_is_none() {
        let resp: StatsResponse = serde_json::from_str(r#"{"stats": []}"#).unwrap();
        assert!(resp.into_line().is_none());
    }
}
