//! # Core Domain Entities
//!
//! Identifiers and value types used by every pipeline step.
//!
//! ## Clusters
//!
//! - **Identity**: `PlayerId`, `TeamId`, `GamePk`, `VenueId`
//! - **Calendar**: `Season`
//! - **Matchup**: `Side`, `StatGroup`, `Lineup`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Stats API person id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

/// Stats API team id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

/// Stats API game primary key (`gamePk`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GamePk(pub u64);

/// Stats API venue id (ballpark).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub u32);

macro_rules! display_as_inner {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }
        )*
    };
}

display_as_inner!(PlayerId, TeamId, GamePk, VenueId);

impl FromStr for PlayerId {
    type Err = DomainError;

    /// Accepts both `"592450"` and the box score key form `"ID592450"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix("ID").unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .map(PlayerId)
            .map_err(|_| DomainError::InvalidPlayerId(s.to_string()))
    }
}

// =============================================================================
// CLUSTER B: CALENDAR
// =============================================================================

/// A baseball season, identified by its calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SeasonRepr", into = "u16")]
pub struct Season(u16);

impl Season {
    /// First season with major league records in the Stats API.
    pub const FIRST: u16 = 1876;
    /// Upper sanity bound for season years.
    pub const LAST: u16 = 2100;

    /// Create a season, validating the year range.
    pub fn new(year: u16) -> Result<Self, DomainError> {
        if (Self::FIRST..=Self::LAST).contains(&year) {
            Ok(Self(year))
        } else {
            Err(DomainError::InvalidSeason(year.to_string()))
        }
    }

    /// The season year.
    pub fn year(self) -> u16 {
        self.0
    }

    /// Season a calendar date falls in.
    pub fn of_date(date: chrono::NaiveDate) -> Result<Self, DomainError> {
        let year = u16::try_from(chrono::Datelike::year(&date))
            .map_err(|_| DomainError::InvalidSeason(date.to_string()))?;
        Self::new(year)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let year: u16 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidSeason(s.to_string()))?;
        Self::new(year)
    }
}

impl From<Season> for u16 {
    fn from(season: Season) -> Self {
        season.0
    }
}

/// Seasons appear as numbers in our files and as strings in some API payloads.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeasonRepr {
    Number(u16),
    Text(String),
}

impl TryFrom<SeasonRepr> for Season {
    type Error = DomainError;

    fn try_from(value: SeasonRepr) -> Result<Self, Self::Error> {
        match value {
            SeasonRepr::Number(year) => Season::new(year),
            SeasonRepr::Text(text) => text.parse(),
        }
    }
}

// =============================================================================
// CLUSTER C: MATCHUP
// =============================================================================

/// Which team of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    /// Both sides in box score order.
    pub const BOTH: [Side; 2] = [Side::Away, Side::Home];

    /// The other team.
    pub fn opponent(self) -> Side {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }

    /// Key used by the Stats API (`"away"` / `"home"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Away => "away",
            Side::Home => "home",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stat group used when requesting a player's season line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatGroup {
    Pitching,
    Hitting,
}

impl StatGroup {
    /// Value of the `group` query parameter.
    pub fn api_name(self) -> &'static str {
        match self {
            StatGroup::Pitching => "pitching",
            StatGroup::Hitting => "hitting",
        }
    }

    /// Group for a roster position abbreviation.
    pub fn for_position(position: &str) -> Self {
        if is_pitcher_position(position) {
            StatGroup::Pitching
        } else {
            StatGroup::Hitting
        }
    }
}

impl fmt::Display for StatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// True for pitcher roster positions (`P`, `SP`, `RP`).
///
/// Two-way players (`TWP`) are treated as hitters.
pub fn is_pitcher_position(position: &str) -> bool {
    matches!(position.trim().to_ascii_uppercase().as_str(), "P" | "SP" | "RP")
}

/// Number of batters in a batting order.
pub const LINEUP_SIZE: usize = 9;

/// A nine-man batting order, leadoff first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lineup(Vec<PlayerId>);

impl Lineup {
    /// Build a lineup; fails unless exactly nine ids are given.
    pub fn new(batters: Vec<PlayerId>) -> Result<Self, DomainError> {
        if batters.len() != LINEUP_SIZE {
            return Err(DomainError::InvalidLineup { len: batters.len() });
        }
        Ok(Self(batters))
    }

    /// Take the first nine ids of a longer list.
    pub fn from_leading(batters: impl IntoIterator<Item = PlayerId>) -> Result<Self, DomainError> {
        let ids: Vec<PlayerId> = batters.into_iter().take(LINEUP_SIZE).collect();
        Self::new(ids)
    }

    pub fn batters(&self) -> &[PlayerId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.0.iter().copied()
    }

    pub fn into_vec(self) -> Vec<PlayerId> {
        self.0
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

impl FromStr for Lineup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ids = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.parse::<PlayerId>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(ids)
    }
}

impl Serialize for Lineup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Lineup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Convert an innings-pitched string to outs.
///
/// The fractional digit counts outs, not tenths: `"5.2"` is 17 outs.
/// Empty or malformed input yields 0.
pub fn outs_from_innings(ip: &str) -> u32 {
    let ip = ip.trim();
    if ip.is_empty() {
        return 0;
    }
    let (whole, frac) = match ip.split_once('.') {
        Some((w, f)) => (w, f),
        None => (ip, "0"),
    };
    match (whole.parse::<u32>(), frac.parse::<u32>()) {
        (Ok(w), Ok(f)) if f < 3 => w * 3 + f,
        _ => 0,
    }
}
