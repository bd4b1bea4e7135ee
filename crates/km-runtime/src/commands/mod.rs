//! One module per command family; `run` dispatches a parsed command.

pub mod daily;
pub mod data;
pub mod model;

use anyhow::Result;
use chrono::NaiveDate;
use shared_types::Season;

use crate::cli::Command;
use crate::container::Container;

/// Run `command`. `today` anchors default dates and seasons.
pub async fn run(container: &Container, command: Command, today: NaiveDate) -> Result<()> {
    let this_season = || Season::of_date(today);

    match command {
        Command::SmokeTest => data::smoke_test(container).await,
        Command::RosterPull { season } => {
            let season = season.map_or_else(this_season, Ok)?;
            data::roster_pull(container, season).await.map(|_| ())
        }
        Command::StatPull { season } => {
            let season = season.map_or_else(this_season, Ok)?;
            data::stat_pull(container, season).await
        }
        Command::CombineStats { seasons } => data::combine_stats(container, &seasons),
        Command::BuildDataset { seasons } => data::build_dataset(container, &seasons).await,
        Command::GenSimulations {
            hist,
            fallback,
            sims,
            line,
            out,
        } => {
            let args = model::GenSimulationsArgs {
                hist,
                fallback,
                sims,
                line,
                out,
            };
            model::gen_simulations(container, args).await
        }
        Command::Calibrate { sim_csv, line, outdir } => model::calibrate(container, sim_csv, line, outdir),
        Command::Simulate {
            pitcher,
            batters,
            season,
            line,
            sims,
        } => {
            let args = model::SimulateArgs {
                pitcher,
                batters,
                season: season.map_or_else(this_season, Ok)?,
                line,
                sims,
            };
            model::simulate(container, args, today).await
        }
        Command::ScheduleFetch { date } => {
            daily::schedule_fetch(container, date.unwrap_or(today), today).await
        }
        Command::TodayProj { date, line, sims } => {
            let args = daily::TodayProjArgs {
                date: date.unwrap_or(today),
                line,
                sims,
            };
            daily::today_proj(container, args, today).await.map(|_| ())
        }
        Command::CachePredictions { pred, cache } => daily::cache_predictions(container, pred, cache),
        Command::OnlineCalibrate { pred, truth, line } => {
            model::online_calibrate(container, pred, truth, line)
        }
    }
}
