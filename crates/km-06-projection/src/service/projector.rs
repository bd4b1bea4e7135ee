//! Strikeout projections for every start on a slate.

use std::sync::Arc;

use km_02_player_stats::KRateResolver;
use km_04_simulation::{SimJob, StartSimulator};
use km_05_calibration::Calibrators;
use km_telemetry::MetricsRecorder;
use shared_types::{round_to, LineupSource, PlayerId, ProjectionRow, Season, Side};
use tracing::{debug, info, warn};

use crate::domain::slate::{Slate, SlateGame};
use crate::error::ProjectionError;

/// A start with everything needed to simulate it.
struct Pending {
    game_index: usize,
    side: Side,
    pitcher_id: PlayerId,
    lineup_source: LineupSource,
}

pub struct Projector {
    resolver: Arc<KRateResolver>,
    simulator: Arc<StartSimulator>,
    calibrators: Calibrators,
    line: f64,
    metrics: Arc<dyn MetricsRecorder>,
}

impl Projector {
    pub fn new(
        resolver: Arc<KRateResolver>,
        simulator: Arc<StartSimulator>,
        calibrators: Calibrators,
        line: f64,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        Self {
            resolver,
            simulator,
            calibrators,
            line,
            metrics,
        }
    }

    pub fn line(&self) -> f64 {
        self.line
    }

    /// One row per start whose pitcher and opposing batting order are both
    /// known, in slate order (away before home).
    pub async fn project(&self, slate: &Slate) -> Result<Vec<ProjectionRow>, ProjectionError> {
        let season = Season::of_date(slate.date)?;
        self.calibrators.warn_on_line_mismatch(self.line);

        let mut pending = Vec::new();
        let mut jobs = Vec::new();
        for (game_index, game) in slate.games.iter().enumerate() {
            for side in Side::BOTH {
                let Some((pitcher_id, lineup_source, job)) =
                    self.prepare(game, side, season, slate).await?
                else {
                    continue;
                };
                pending.push(Pending {
                    game_index,
                    side,
                    pitcher_id,
                    lineup_source,
                });
                jobs.push(job);
            }
        }

        let simulator = Arc::clone(&self.simulator);
        let dists = tokio::task::spawn_blocking(move || simulator.simulate_starts(&jobs))
            .await
            .map_err(|e| ProjectionError::Task(e.to_string()))?;

        let mut rows = Vec::with_capacity(pending.len());
        for (start, dist) in pending.into_iter().zip(dists) {
            let game = &slate.games[start.game_index];
            let own = game.side(start.side);
            let exp = dist.mean();
            let p = dist.p_at_least(self.line);

            let row = ProjectionRow {
                date: game.date,
                game_id: game.game_pk,
                side: start.side,
                team: own.team_name.clone(),
                pitcher_id: start.pitcher_id,
                pitcher_name: own
                    .pitcher_name
                    .clone()
                    .unwrap_or_else(|| format!("ID{}", start.pitcher_id)),
                lineup_source: start.lineup_source,
                line: self.line,
                exp_raw: round_to(exp, 2),
                p_raw: round_to(p, 3),
                exp_cal: self.calibrators.calibrate_exp(exp).map(|v| round_to(v, 2)),
                p_cal: self.calibrators.calibrate_prob(p, self.line).map(|v| round_to(v, 3)),
            };
            info!(
                game_pk = %row.game_id,
                pitcher = %row.pitcher_name,
                exp = row.exp_raw,
                p_over = row.p_raw,
                line = self.line,
                lineup_source = %row.lineup_source,
                "Projected start"
            );
            self.metrics.record_projection();
            rows.push(row);
        }
        Ok(rows)
    }

    async fn prepare(
        &self,
        game: &SlateGame,
        side: Side,
        season: Season,
        slate: &Slate,
    ) -> Result<Option<(PlayerId, LineupSource, SimJob)>, ProjectionError> {
        let own = game.side(side);
        let Some(pitcher_id) = own.pitcher_id else {
            debug!(game_pk = %game.game_pk, %side, "Skipping start: no pitcher");
            return Ok(None);
        };
        let opponent = game.side(side.opponent());
        let (Some(lineup), Some(lineup_source)) = (&opponent.lineup, opponent.lineup_source) else {
            debug!(game_pk = %game.game_pk, %side, "Skipping start: no opposing lineup");
            return Ok(None);
        };

        let pitcher = self
            .resolver
            .resolve_pitcher(pitcher_id, season, slate.date)
            .await;
        let batters: Vec<f64> = self
            .resolver
            .resolve_lineup(lineup, season, slate.date)
            .await
            .into_iter()
            .map(|r| r.rate)
            .collect();
        let table = match self.simulator.table(pitcher.rate, &batters) {
            Ok(table) => table,
            Err(e) => {
                warn!(game_pk = %game.game_pk, %side, %pitcher_id, error = %e, "Skipping start: bad K-rate");
                return Ok(None);
            }
        };

        Ok(Some((
            pitcher_id,
            lineup_source,
            SimJob {
                game_pk: game.game_pk,
                side,
                table,
            },
        )))
    }
}
