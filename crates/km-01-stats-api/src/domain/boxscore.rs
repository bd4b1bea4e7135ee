//! # Box Score Parsing
//!
//! Pure functions that pull the starting pitcher, his strikeouts and the
//! starting batting order out of one team's half of a box score.
//!
//! Box scores are inconsistent across seasons and game states, so each
//! extraction walks an ordered list of sources and takes the first that
//! yields a usable answer.

use shared_types::{Lineup, PlayerId, LINEUP_SIZE};

use crate::domain::types::{BoxscorePlayer, BoxscoreTeam};

/// Starting pitcher of a team.
///
/// Sources, in order:
/// 1. a player whose pitching line has `gamesStarted >= 1`
/// 2. the first id in the team's `pitchers` list (appearance order)
/// 3. a pitcher flagged `isStarter`
/// 4. the pitcher with the most outs recorded (ties go to the lowest id)
pub fn starting_pitcher(team: &BoxscoreTeam) -> Option<PlayerId> {
    let mut pitchers: Vec<&BoxscorePlayer> = team
        .players
        .values()
        .filter(|p| p.stats.pitching.as_ref().is_some_and(|l| l.is_recorded()))
        .collect();
    pitchers.sort_by_key(|p| p.person.id);

    let started = pitchers.iter().find(|p| {
        p.stats
            .pitching
            .as_ref()
            .and_then(|l| l.games_started)
            .is_some_and(|gs| gs >= 1)
    });
    if let Some(p) = started {
        return Some(p.person.id);
    }

    if let Some(first) = team.pitchers.first() {
        return Some(*first);
    }

    if let Some(p) = pitchers.iter().find(|p| p.game_status.is_starter) {
        return Some(p.person.id);
    }

    // Ties keep the earlier, lower id.
    pitchers
        .iter()
        .map(|p| {
            let outs = p.stats.pitching.as_ref().map_or(0, |l| l.outs_recorded());
            (outs, p.person.id)
        })
        .fold(None, |best: Option<(u32, PlayerId)>, (outs, id)| match best {
            Some((best_outs, _)) if best_outs >= outs => best,
            _ => Some((outs, id)),
        })
        .map(|(_, id)| id)
}

/// Starting batting order of a team.
///
/// Sources, in order:
/// 1. the first nine of the team's `battingOrder` list
/// 2. players whose `battingOrder` code is a whole hundred (`"100"`..`"900"`),
///    sorted by code
/// 3. the first nine of the team's `batters` list
///
/// A source with fewer than nine ids falls through to the next.
pub fn extract_lineup(team: &BoxscoreTeam) -> Option<Lineup> {
    if team.batting_order.len() >= LINEUP_SIZE {
        return Lineup::from_leading(team.batting_order.iter().copied()).ok();
    }

    let mut slotted: Vec<(u32, PlayerId)> = team
        .players
        .values()
        .filter_map(|p| {
            let code: u32 = p.batting_order.as_deref()?.trim().parse().ok()?;
            (code > 0 && code % 100 == 0).then_some((code, p.person.id))
        })
        .collect();
    if slotted.len() >= LINEUP_SIZE {
        slotted.sort();
        return Lineup::from_leading(slotted.into_iter().map(|(_, id)| id)).ok();
    }

    if team.batters.len() >= LINEUP_SIZE {
        return Lineup::from_leading(team.batters.iter().copied()).ok();
    }

    None
}

/// Strikeouts recorded by a pitcher in this game.
pub fn strikeouts_for(team: &BoxscoreTeam, pitcher: PlayerId) -> Option<u32> {
    team.player(pitcher)?
        .stats
        .pitching
        .as_ref()?
        .strike_outs
}
