//! Starts from one final game's box score.

use chrono::NaiveDate;
use km_01_stats_api::{extract_lineup, starting_pitcher, strikeouts_for, Boxscore};
use shared_types::{GamePk, Season, Side, StartRecord, VenueId};

use crate::domain::skips::SkipReason;

/// Schedule facts carried onto each start.
#[derive(Debug, Clone, Copy)]
pub struct GameContext {
    pub game_pk: GamePk,
    pub date: NaiveDate,
    pub season: Season,
    pub park_id: Option<VenueId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameExtraction {
    pub starts: Vec<StartRecord>,
    pub skipped: Vec<SkipReason>,
}

/// Both starters of a game, each paired with the lineup he faced.
///
/// A game where either starter is unknown yields nothing.
pub fn starts_from_boxscore(ctx: &GameContext, boxscore: &Boxscore) -> GameExtraction {
    let away = starting_pitcher(&boxscore.teams.away);
    let home = starting_pitcher(&boxscore.teams.home);
    let (Some(away), Some(home)) = (away, home) else {
        return GameExtraction {
            starts: Vec::new(),
            skipped: vec![SkipReason::NoStarter],
        };
    };

    let mut out = GameExtraction::default();
    for (side, pitcher) in [(Side::Away, away), (Side::Home, home)] {
        let own = boxscore.teams.get(side);
        let Some(k_actual) = strikeouts_for(own, pitcher) else {
            out.skipped.push(SkipReason::KMissing);
            continue;
        };
        let Some(lineup) = extract_lineup(boxscore.teams.get(side.opponent())) else {
            out.skipped.push(SkipReason::BadLineup);
            continue;
        };
        out.starts.push(StartRecord {
            game_pk: ctx.game_pk,
            date: ctx.date,
            park_id: ctx.park_id,
            season: ctx.season,
            side,
            pitcher_id: pitcher,
            k_actual,
            lineup_ids: lineup,
        });
    }
    out
}
