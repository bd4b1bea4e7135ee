//! schedule-fetch → today-proj → cache-predictions → online-calibrate

#[cfg(test)]
mod tests {
    use km_05_calibration::CalibrationReport;
    use km_06_projection::{load_lineup_cache, ScheduleRow};
    use km_runtime::commands::{self, daily};
    use km_runtime::{Command, Container};
    use shared_store::{read_csv, read_json};
    use shared_types::{Lineup, LineupSource, ProjectionRow, Side};

    use crate::fixtures::{batters, container, game_date, game_pk, opening_day, starter, team_name, AWAY, PREVIEW_DAYS};

    const LINE: f64 = 6.5;

    async fn project(container: &Container, day: u32) -> Vec<ProjectionRow> {
        let args = daily::TodayProjArgs {
            date: game_date(day),
            line: Some(LINE),
            sims: None,
        };
        daily::today_proj(container, args, opening_day()).await.unwrap()
    }

    async fn cache(container: &Container) {
        commands::run(
            container,
            Command::CachePredictions {
                pred: None,
                cache: None,
            },
            opening_day(),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_schedule_fetch_writes_slate_files() {
        let dir = tempfile::tempdir().unwrap();
        let (container, _provider) = container(dir.path());

        commands::run(
            &container,
            Command::ScheduleFetch {
                date: Some(opening_day()),
            },
            opening_day(),
        )
        .await
        .unwrap();

        let rows: Vec<ScheduleRow> = read_csv(&container.layout.schedule(opening_day())).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].game_id, game_pk(0));
        assert_eq!(rows[0].away_prob_id, Some(starter(0, Side::Away)));
        assert_eq!(rows[0].away_lineup_source, Some(LineupSource::Announced));

        let cached = load_lineup_cache(&container.layout, opening_day()).unwrap();
        assert_eq!(
            cached.get(game_pk(0), Side::Home),
            Some(Lineup::new(batters(Side::Home)).unwrap())
        );
    }

    #[tokio::test]
    async fn test_today_proj_projects_complete_starts() {
        let dir = tempfile::tempdir().unwrap();
        let (container, _provider) = container(dir.path());

        let rows = project(&container, 0).await;
        assert_eq!(rows.len(), 2);
        let away = &rows[0];
        assert_eq!(away.side, Side::Away);
        assert_eq!(away.pitcher_id, starter(0, Side::Away));
        assert_eq!(away.team, team_name(AWAY));
        assert_eq!(away.lineup_source, LineupSource::Announced);
        assert_eq!(away.line, LINE);
        assert!(away.exp_raw > 0.0 && (0.0..=1.0).contains(&away.p_raw));
        assert!(away.exp_cal.is_none() && away.p_cal.is_none());

        let written: Vec<ProjectionRow> = read_csv(&container.layout.today_proj()).unwrap();
        assert_eq!(written, rows);

        // No announced home starter on the last preview day.
        let rows = project(&container, PREVIEW_DAYS - 1).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].side, Side::Away);
    }

    #[tokio::test]
    async fn test_predictions_feed_online_calibration() {
        let dir = tempfile::tempdir().unwrap();
        let (container, _provider) = container(dir.path());

        for day in 0..PREVIEW_DAYS {
            project(&container, day).await;
            cache(&container).await;
        }
        let cached: Vec<ProjectionRow> = read_csv(&container.layout.cached_predictions()).unwrap();
        assert_eq!(cached.len(), 5);

        // Re-running a day replaces its rows instead of duplicating them.
        project(&container, 0).await;
        cache(&container).await;
        let cached: Vec<ProjectionRow> = read_csv(&container.layout.cached_predictions()).unwrap();
        assert_eq!(cached.len(), 5);
        assert_eq!(cached.last().map(|r| r.game_id), Some(game_pk(0)));

        commands::run(
            &container,
            Command::BuildDataset {
                seasons: vec![crate::fixtures::season()],
            },
            opening_day(),
        )
        .await
        .unwrap();
        commands::run(
            &container,
            Command::OnlineCalibrate {
                pred: None,
                truth: None,
                line: Some(LINE),
            },
            opening_day(),
        )
        .await
        .unwrap();

        let report: CalibrationReport = read_json(&container.layout.report(true)).unwrap();
        assert!(report.online);
        assert_eq!(report.n_samples, 5);
        assert!(!container.layout.report(false).exists());

        // The next projection picks up both calibrators.
        let rows = project(&container, 1).await;
        assert!(rows.iter().all(|r| r.exp_cal.is_some() && r.p_cal.is_some()));
    }
}
