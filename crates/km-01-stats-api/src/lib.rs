//! # Stats API (km-01)
//!
//! Read access to the public MLB Stats API
//! (`https://statsapi.mlb.com/api/v1`).
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - response types and pure box score parsing
//! - `ports/` - the `StatsProvider` trait
//! - `adapters/` - `StatsApiClient` (reqwest) and `InMemoryStatsProvider`
//!
//! ## Endpoints
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | `season_schedule` | `/schedule?sportId=1&season=Y&gameType=R` |
//! | `schedule_for_date` | `/schedule?sportId=1&date=D&hydrate=probablePitcher,lineups` |
//! | `boxscore` | `/game/{gamePk}/boxscore` |
//! | `player_stats` | `/people/{id}/stats?stats=season\|byDateRange&group=..` |
//! | `person_name` | `/people/{id}` |
//! | `active_teams` | `/teams?sportId=1&activeStatus=Yes` |
//! | `team_roster` | `/teams/{id}/roster?season=Y&rosterType=active&hydrate=person` |
//!
//! ## Usage
//!
//! ```ignore
//! use km_01_stats_api::{ClientConfig, StatsApiClient, StatsProvider};
//!
//! let client = StatsApiClient::new(ClientConfig::default(), metrics)?;
//! let teams = client.active_teams().await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

pub use adapters::{ClientConfig, InMemoryStatsProvider, StatsApiClient, DEFAULT_BASE_URL};
pub use domain::boxscore::{extract_lineup, starting_pitcher, strikeouts_for};
pub use domain::types::*;
pub use error::StatsApiError;
pub use ports::{RosterType, StatWindow, StatsProvider};
