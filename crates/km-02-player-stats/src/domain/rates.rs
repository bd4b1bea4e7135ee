//! K-rate arithmetic on Stats API lines.

use km_01_stats_api::StatLine;
use shared_types::{PlayerStatLine, RosterEntry, StatGroup};

/// Rate assumed when nothing better is known.
pub const DEFAULT_K_RATE: f64 = 0.252;

/// Strikeouts per batter faced (pitchers) or per plate appearance (hitters).
pub fn k_rate(line: &StatLine, group: StatGroup) -> Option<f64> {
    let k = line.strike_outs.unwrap_or(0);
    let denominator = match group {
        StatGroup::Pitching => line.batters_faced.unwrap_or(0),
        StatGroup::Hitting => line.plate_appearances.unwrap_or(0),
    };
    (denominator > 0).then(|| f64::from(k) / f64::from(denominator))
}

/// Strikeouts per nine innings.
pub fn k_per_9(line: &StatLine) -> Option<f64> {
    let outs = line.outs_recorded();
    (outs > 0).then(|| f64::from(line.strike_outs.unwrap_or(0)) / (f64::from(outs) / 3.0) * 9.0)
}

/// Stat row for a rostered player. A missing line yields an empty row.
pub fn stat_row(entry: &RosterEntry, group: StatGroup, line: Option<&StatLine>) -> PlayerStatLine {
    let empty = StatLine::default();
    let line = line.unwrap_or(&empty);
    let (k_rate, k_per_9) = match group {
        StatGroup::Pitching => (k_rate(line, group), k_per_9(line)),
        StatGroup::Hitting => (k_rate(line, group), None),
    };
    PlayerStatLine {
        player_id: entry.player_id,
        name: entry.name.clone(),
        team: entry.team_abbr.clone(),
        position: entry.position.clone(),
        group,
        strikeouts: line.strike_outs,
        plate_appearances: line.plate_appearances,
        batters_faced: line.batters_faced,
        innings_pitched: line.innings_pitched.clone(),
        k_rate,
        k_per_9,
        season: entry.season,
    }
}
