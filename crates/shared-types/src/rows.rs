//! # File Row Types
//!
//! One struct per CSV file in the data directory. Field order is column
//! order; the `csv` crate writes headers from field names.
//!
//! | File | Row |
//! |------|-----|
//! | `players_<season>.csv` | `RosterEntry` |
//! | `player_stats_<season>.csv`, `player_stats.csv` | `PlayerStatLine` |
//! | `historical_ks.csv` | `StartRecord` |
//! | `historical_ks_sim.csv` | `SimulatedStart` |
//! | `today_ks_proj.csv`, `cached_predictions.csv` | `ProjectionRow` |

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::{GamePk, Lineup, PlayerId, Season, Side, StatGroup, TeamId, VenueId};

/// One rostered player for a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub team_id: TeamId,
    pub team_abbr: String,
    pub position: String,
    pub season: Season,
}

/// Season strikeout line for one player.
///
/// `k_rate` is K / batters faced for pitchers and K / plate appearances for
/// hitters; `None` when the denominator is zero or the line is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatLine {
    pub player_id: PlayerId,
    pub name: String,
    pub team: String,
    pub position: String,
    pub group: StatGroup,
    pub strikeouts: Option<u32>,
    pub plate_appearances: Option<u32>,
    pub batters_faced: Option<u32>,
    pub innings_pitched: Option<String>,
    pub k_rate: Option<f64>,
    pub k_per_9: Option<f64>,
    pub season: Season,
}

/// One historical start: who started, how many he struck out, and the
/// batting order he faced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartRecord {
    pub game_pk: GamePk,
    pub date: NaiveDate,
    pub park_id: Option<VenueId>,
    pub season: Season,
    /// The starting pitcher's side.
    pub side: Side,
    pub pitcher_id: PlayerId,
    pub k_actual: u32,
    /// Opposing batting order.
    pub lineup_ids: Lineup,
}

/// A historical start with its simulated projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedStart {
    pub game_pk: GamePk,
    pub date: NaiveDate,
    pub season: Season,
    pub side: Side,
    pub pitcher_id: PlayerId,
    pub k_actual: u32,
    pub exp_ks: f64,
    pub p_over: f64,
}

/// Where a projected lineup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineupSource {
    /// Lineup cached by an earlier `schedule-fetch`.
    Cache,
    /// Lineup announced in the hydrated schedule.
    Announced,
    /// Batting order from the game's box score.
    Boxscore,
    /// The team's batting order from its previous game.
    PreviousGame,
    /// First nine non-pitchers of the active roster.
    Roster,
}

impl fmt::Display for LineupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineupSource::Cache => "cache",
            LineupSource::Announced => "announced",
            LineupSource::Boxscore => "boxscore",
            LineupSource::PreviousGame => "previous_game",
            LineupSource::Roster => "roster",
        };
        f.write_str(name)
    }
}

/// One projected start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub date: NaiveDate,
    pub game_id: GamePk,
    pub side: Side,
    pub team: String,
    pub pitcher_id: PlayerId,
    pub pitcher_name: String,
    pub lineup_source: LineupSource,
    pub line: f64,
    pub exp_raw: f64,
    pub p_raw: f64,
    pub exp_cal: Option<f64>,
    pub p_cal: Option<f64>,
}

/// Round to a fixed number of decimal places for file output.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
