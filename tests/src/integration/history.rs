//! build-dataset → gen-simulations → calibrate

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use km_02_player_stats::{KRateResolver, MemoryPlayerStatsStore, RateSource, ResolverConfig};
    use km_05_calibration::{CalibrationReport, Calibrators};
    use km_runtime::commands::{self, model};
    use km_runtime::Command;
    use shared_store::{read_csv, read_json};
    use shared_types::{Lineup, PlayerId, PlayerStatLine, Side, SimulatedStart, StartRecord, StatGroup};

    use crate::fixtures::{batters, container, opening_day, season, starter, strikeouts, FINAL_GAMES, POSTPONED};

    // =============================================================================
    // HELPERS
    // =============================================================================

    async fn build_dataset(container: &km_runtime::Container) {
        commands::run(
            container,
            Command::BuildDataset {
                seasons: vec![season()],
            },
            opening_day(),
        )
        .await
        .unwrap();
    }

    fn gen_simulations(out: Option<std::path::PathBuf>) -> Command {
        Command::GenSimulations {
            hist: None,
            fallback: None,
            sims: None,
            line: Some(6.5),
            out,
        }
    }

    fn mean_by_pitcher(rows: &[SimulatedStart]) -> HashMap<PlayerId, f64> {
        let mut sums: HashMap<PlayerId, (f64, u32)> = HashMap::new();
        for row in rows {
            let entry = sums.entry(row.pitcher_id).or_insert((0.0, 0));
            entry.0 += row.exp_ks;
            entry.1 += 1;
        }
        sums.into_iter()
            .map(|(id, (sum, n))| (id, sum / f64::from(n)))
            .collect()
    }

    // =============================================================================
    // FLOW TESTS
    // =============================================================================

    /// Every final game yields two starts, each against the opposing order.
    #[tokio::test]
    async fn test_build_dataset_pairs_starters_with_opposing_lineups() {
        let dir = tempfile::tempdir().unwrap();
        let (container, provider) = container(dir.path());

        build_dataset(&container).await;

        let starts: Vec<StartRecord> = read_csv(&container.layout.historical_ks()).unwrap();
        assert_eq!(starts.len(), 2 * FINAL_GAMES as usize);
        assert!(starts.iter().all(|s| s.game_pk != POSTPONED));
        assert_eq!(provider.boxscore_requests(), FINAL_GAMES as usize);

        let first = &starts[0];
        assert_eq!(first.side, Side::Away);
        assert_eq!(first.pitcher_id, starter(0, Side::Away));
        assert_eq!(first.k_actual, strikeouts(0, Side::Away));
        assert_eq!(first.lineup_ids, Lineup::new(batters(Side::Home)).unwrap());
        assert_eq!(first.season, season());

        let snapshot = container.metrics.snapshot();
        assert_eq!(snapshot.games_scanned, u64::from(FINAL_GAMES) + 1);
        assert_eq!(snapshot.starts_harvested, 2 * u64::from(FINAL_GAMES));
    }

    #[tokio::test]
    async fn test_history_to_calibration() {
        let dir = tempfile::tempdir().unwrap();
        let (container, _provider) = container(dir.path());
        build_dataset(&container).await;

        commands::run(&container, gen_simulations(None), opening_day())
            .await
            .unwrap();
        let simulated: Vec<SimulatedStart> = read_csv(&container.layout.historical_sim()).unwrap();
        assert_eq!(simulated.len(), 2 * FINAL_GAMES as usize);
        assert!(simulated.iter().all(|s| s.exp_ks > 0.0 && (0.0..=1.0).contains(&s.p_over)));

        // Higher season K-rates simulate to higher means.
        let means = mean_by_pitcher(&simulated);
        assert!(means[&PlayerId(503)] > means[&PlayerId(500)]);
        assert!(means[&PlayerId(603)] > means[&PlayerId(600)]);

        // Fetched rates were written back to the combined store.
        assert!(container.layout.combined_stats().exists());

        commands::run(
            &container,
            Command::Calibrate {
                sim_csv: None,
                line: Some(6.5),
                outdir: None,
            },
            opening_day(),
        )
        .await
        .unwrap();

        let report: CalibrationReport = read_json(&container.layout.report(false)).unwrap();
        assert_eq!(report.n_samples, 2 * FINAL_GAMES as usize);
        assert!(!report.online);
        assert!(container.layout.exp_curve(false).exists());
        assert!(container.layout.prob_curve(false).exists());

        let calibrators = Calibrators::load(&container.layout).unwrap();
        assert!(!calibrators.is_empty());
        assert!(calibrators.calibrate_prob(0.5, 6.5).is_some());
        assert!(calibrators.calibrate_prob(0.5, 5.5).is_none());
    }

    #[tokio::test]
    async fn test_gen_simulations_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let (container, _provider) = container(dir.path());
        build_dataset(&container).await;

        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        for out in [&a, &b] {
            commands::run(&container, gen_simulations(Some(out.clone())), opening_day())
                .await
                .unwrap();
        }

        let a: Vec<SimulatedStart> = read_csv(&a).unwrap();
        let b: Vec<SimulatedStart> = read_csv(&b).unwrap();
        assert_eq!(a, b);
    }

    /// Output order follows the input, and pitchers the API does not know
    /// fall back to the configured default.
    #[tokio::test]
    async fn test_simulate_history_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let (container, _provider) = container(dir.path());
        build_dataset(&container).await;

        let mut starts: Vec<StartRecord> = read_csv(&container.layout.historical_ks()).unwrap();
        starts.reverse();
        starts[0].pitcher_id = PlayerId(999);

        let store = container.combined_store().unwrap();
        let resolver = container.resolver(store, container.config.projection.resolver_config());
        let simulator = Arc::new(container.simulator(500).unwrap());
        let rows = model::simulate_history(&resolver, simulator, &starts, 6.5)
            .await
            .unwrap();

        assert_eq!(rows.len(), starts.len());
        for (row, start) in rows.iter().zip(&starts) {
            assert_eq!((row.game_pk, row.side, row.pitcher_id), (start.game_pk, start.side, start.pitcher_id));
            assert_eq!(row.k_actual, start.k_actual);
        }
        let counts = resolver.source_counts();
        assert_eq!(counts.values().sum::<usize>(), 8 + 18 + 1);
        assert_eq!(counts.get(&RateSource::Default), Some(&1));
        assert_eq!(counts.get(&RateSource::Api), Some(&26));
    }

    /// A stored rate outside [0, 1] drops that pitcher's starts and nothing else.
    #[tokio::test]
    async fn test_simulate_history_skips_bad_rates() {
        let dir = tempfile::tempdir().unwrap();
        let (container, provider) = container(dir.path());
        build_dataset(&container).await;

        let starts: Vec<StartRecord> = read_csv(&container.layout.historical_ks()).unwrap();
        let bad = starter(0, Side::Away);
        let store = MemoryPlayerStatsStore::with_lines(vec![PlayerStatLine {
            player_id: bad,
            name: String::new(),
            team: String::new(),
            position: "P".into(),
            group: StatGroup::Pitching,
            strikeouts: None,
            plate_appearances: None,
            batters_faced: None,
            innings_pitched: None,
            k_rate: Some(1.5),
            k_per_9: None,
            season: season(),
        }]);
        let resolver = KRateResolver::new(provider, Arc::new(store), ResolverConfig::default());
        let simulator = Arc::new(container.simulator(500).unwrap());
        let rows = model::simulate_history(&resolver, simulator, &starts, 6.5)
            .await
            .unwrap();

        let expected: Vec<_> = starts.iter().filter(|s| s.pitcher_id != bad).collect();
        assert!(expected.len() < starts.len());
        assert_eq!(rows.len(), expected.len());
        for (row, start) in rows.iter().zip(expected) {
            assert_eq!((row.game_pk, row.side), (start.game_pk, start.side));
        }
    }
}
