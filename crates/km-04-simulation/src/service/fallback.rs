//! Per-pitcher fallback K-rates from earlier simulation output.

use std::collections::HashMap;

use shared_types::{PlayerId, SimulatedStart, LINEUP_SIZE};

/// Mean simulated strikeouts per start divided by nine, per pitcher.
///
/// Used as a pitcher's K-rate when no stat line is available. Rates are
/// clamped to `[0, 1]`; non-finite `exp_ks` values are ignored.
pub fn pitcher_fallback_rates(starts: &[SimulatedStart]) -> HashMap<PlayerId, f64> {
    let mut sums: HashMap<PlayerId, (f64, u32)> = HashMap::new();
    for start in starts.iter().filter(|s| s.exp_ks.is_finite()) {
        let entry = sums.entry(start.pitcher_id).or_insert((0.0, 0));
        entry.0 += start.exp_ks;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(pid, (sum, n))| {
            let rate = sum / f64::from(n) / LINEUP_SIZE as f64;
            (pid, rate.clamp(0.0, 1.0))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared_types::{GamePk, Season, Side};

    fn start(pid: u32, exp_ks: f64) -> SimulatedStart {
        SimulatedStart {
            game_pk: GamePk(1),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            season: Season::new(2024).unwrap(),
            side: Side::Home,
            pitcher_id: PlayerId(pid),
            k_actual: 5,
            exp_ks,
            p_over: 0.3,
        }
    }

    #[test]
    fn test_mean_over_nine() {
        let rates = pitcher_fallback_rates(&[
            start(1, 4.5),
            start(1, 6.3),
            start(2, 2.7),
            start(2, f64::NAN),
        ]);

        assert!((rates[&PlayerId(1)] - 0.6).abs() < 1e-12);
        assert!((rates[&PlayerId(2)] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        assert!(pitcher_fallback_rates(&[]).is_empty());
    }
}
