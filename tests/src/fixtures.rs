//! # Fixture League
//!
//! Two teams playing a short series on the in-memory Stats API.
//!
//! ```text
//! 2024-04-01 .. 2024-04-12   one final game a day   (season schedule)
//! 2024-04-05                 one postponed game     (season schedule)
//! 2024-04-01 .. 2024-04-03   the same games as previews with probable
//!                            pitchers and announced lineups (date schedule)
//! ```
//!
//! The away team rotates starters 500..503, the home team 600..603. Higher
//! ids carry higher season K-rates and strike out more hitters, so simulated
//! means and actual strikeouts move together.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use km_01_stats_api::{
    Boxscore, BoxscorePlayer, BoxscoreTeam, BoxscoreTeams, GameLineups, GameStatus, GameTeams,
    InMemoryStatsProvider, PersonRef, PitchingGameLine, PlayerGameStats, PlayerGameStatus,
    ProbablePitcher, ScheduleDate, ScheduledGame, ScheduledTeam, StatLine, StatWindow, Team, TeamRef,
};
use km_runtime::{Container, KmConfig};
use km_telemetry::PipelineMetrics;
use shared_types::{GamePk, PlayerId, Season, Side, StatGroup, TeamId};

pub const AWAY: TeamId = TeamId(147);
pub const HOME: TeamId = TeamId(111);

/// Final games in the season schedule.
pub const FINAL_GAMES: u32 = 12;

/// Days with a preview slate.
pub const PREVIEW_DAYS: u32 = 3;

pub const POSTPONED: GamePk = GamePk(745_900);

pub fn season() -> Season {
    Season::new(2024).unwrap()
}

pub fn opening_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
}

pub fn game_date(game: u32) -> NaiveDate {
    opening_day() + Duration::days(i64::from(game))
}

pub fn game_pk(game: u32) -> GamePk {
    GamePk(745_000 + u64::from(game))
}

pub fn starter(game: u32, side: Side) -> PlayerId {
    match side {
        Side::Away => PlayerId(500 + game % 4),
        Side::Home => PlayerId(600 + game % 4),
    }
}

/// Batting order of a team, leadoff first.
pub fn batters(side: Side) -> Vec<PlayerId> {
    let first = match side {
        Side::Away => 100,
        Side::Home => 200,
    };
    (first..first + 9).map(PlayerId).collect()
}

/// Strikeouts by the starter on `side` in `game`.
pub fn strikeouts(game: u32, side: Side) -> u32 {
    let base = 3 + 2 * (game % 4);
    match side {
        Side::Away => base,
        Side::Home => base + game % 2,
    }
}

/// The fixture API with every schedule, box score and stat line loaded.
pub fn league() -> Arc<InMemoryStatsProvider> {
    let provider = Arc::new(InMemoryStatsProvider::new());
    provider.insert_team(Team {
        id: AWAY,
        name: team_name(AWAY).into(),
        abbreviation: "NYY".into(),
    });
    provider.insert_team(Team {
        id: HOME,
        name: team_name(HOME).into(),
        abbreviation: "BOS".into(),
    });

    let mut days = Vec::new();
    for game in 0..FINAL_GAMES {
        let mut games = vec![scheduled(game, "Final", "Final")];
        if game == 4 {
            let mut called_off = scheduled(game, "Preview", "Postponed");
            called_off.game_pk = POSTPONED;
            games.push(called_off);
        }
        days.push(ScheduleDate {
            date: game_date(game),
            games,
        });
        provider.insert_boxscore(game_pk(game), boxscore(game));
    }
    provider.insert_season_schedule(season(), days);

    for day in 0..PREVIEW_DAYS {
        let mut game = scheduled(day, "Preview", "Scheduled");
        for side in Side::BOTH {
            // The last preview day has no announced home starter.
            let announced = !(day == PREVIEW_DAYS - 1 && side == Side::Home);
            let team = match side {
                Side::Away => &mut game.teams.away,
                Side::Home => &mut game.teams.home,
            };
            team.probable_pitcher = announced.then(|| ProbablePitcher {
                id: Some(starter(day, side)),
                full_name: Some(pitcher_name(starter(day, side))),
            });
        }
        game.lineups = Some(GameLineups {
            away_players: batters(Side::Away).into_iter().map(person).collect(),
            home_players: batters(Side::Home).into_iter().map(person).collect(),
        });
        provider.insert_date_schedule(
            game_date(day),
            vec![ScheduleDate {
                date: game_date(day),
                games: vec![game],
            }],
        );
    }

    let window = StatWindow::Season(season());
    for k in 0..4 {
        for pitcher in [PlayerId(500 + k), PlayerId(600 + k)] {
            provider.insert_name(pitcher, pitcher_name(pitcher));
            provider.insert_stats(
                pitcher,
                StatGroup::Pitching,
                window,
                StatLine {
                    strike_outs: Some(40 + 15 * k),
                    batters_faced: Some(200),
                    innings_pitched: Some("50.0".into()),
                    ..StatLine::default()
                },
            );
        }
    }
    for (slot, batter) in batters(Side::Away)
        .into_iter()
        .chain(batters(Side::Home))
        .enumerate()
    {
        provider.insert_stats(
            batter,
            StatGroup::Hitting,
            window,
            StatLine {
                strike_outs: Some(15 + 2 * slot as u32),
                plate_appearances: Some(100),
                ..StatLine::default()
            },
        );
    }
    provider
}

/// Config rooted in `root` with small simulation counts and no request pauses.
pub fn config(root: &Path) -> KmConfig {
    let mut config = KmConfig::default();
    config.paths.data_dir = root.join("data");
    config.paths.models_dir = root.join("models");
    config.api.request_delay_ms = 0;
    config.api.boxscore_delay_ms = 0;
    config.simulation.history_sims = 400;
    config.simulation.projection_sims = 2_000;
    config
}

/// A container over the fixture league with its data directories created.
pub fn container(root: &Path) -> (Container, Arc<InMemoryStatsProvider>) {
    let provider = league();
    let container = Container::with_provider(config(root), provider.clone(), Arc::new(PipelineMetrics::new()));
    container.layout.ensure_dirs().unwrap();
    (container, provider)
}

pub fn team_name(team: TeamId) -> &'static str {
    if team == AWAY {
        "New York Yankees"
    } else {
        "Boston Red Sox"
    }
}

pub fn pitcher_name(id: PlayerId) -> String {
    format!("Pitcher {}", id)
}

fn person(id: PlayerId) -> PersonRef {
    PersonRef {
        id,
        full_name: format!("Batter {}", id),
    }
}

fn team_ref(team: TeamId) -> TeamRef {
    TeamRef {
        id: team,
        name: team_name(team).into(),
        abbreviation: None,
    }
}

fn scheduled(game: u32, state: &str, detailed: &str) -> ScheduledGame {
    let side = |team: TeamId| ScheduledTeam {
        team: team_ref(team),
        probable_pitcher: None,
    };
    ScheduledGame {
        game_pk: game_pk(game),
        official_date: Some(game_date(game)),
        status: GameStatus {
            abstract_game_state: state.into(),
            detailed_state: detailed.into(),
        },
        teams: GameTeams {
            away: side(AWAY),
            home: side(HOME),
        },
        venue: None,
        lineups: None,
    }
}

fn boxscore(game: u32) -> Boxscore {
    let half = |side: Side, team: TeamId| {
        let pitcher = starter(game, side);
        let mut players = HashMap::new();
        players.insert(
            format!("ID{}", pitcher),
            BoxscorePlayer {
                person: PersonRef {
                    id: pitcher,
                    full_name: pitcher_name(pitcher),
                },
                batting_order: None,
                position: None,
                stats: PlayerGameStats {
                    pitching: Some(PitchingGameLine {
                        games_started: Some(1),
                        strike_outs: Some(strikeouts(game, side)),
                        innings_pitched: Some("6.0".into()),
                        outs: None,
                    }),
                },
                game_status: PlayerGameStatus { is_starter: true },
            },
        );
        BoxscoreTeam {
            team: team_ref(team),
            players,
            batting_order: batters(side),
            batters: batters(side),
            pitchers: vec![pitcher],
        }
    };
    Boxscore {
        teams: BoxscoreTeams {
            away: half(Side::Away, AWAY),
            home: half(Side::Home, HOME),
        },
    }
}
