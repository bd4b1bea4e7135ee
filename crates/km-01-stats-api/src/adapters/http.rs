//! Stats API client over HTTP.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use km_telemetry::MetricsRecorder;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared_types::{GamePk, PlayerId, Season, StatGroup, TeamId};
use tracing::{debug, warn};

use crate::domain::types::{
    Boxscore, PeopleResponse, RosterResponse, RosterSlot, ScheduleDate, ScheduleResponse,
    StatLine, StatsResponse, Team, TeamsResponse,
};
use crate::error::StatsApiError;
use crate::ports::outbound::{RosterType, StatWindow, StatsProvider};

/// Public Stats API root.
pub const DEFAULT_BASE_URL: &str = "https://statsapi.mlb.com/api/v1";

/// MLB sport id.
const SPORT_ID: &str = "1";

type Query = Vec<(&'static str, String)>;

/// HTTP client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Extra attempts after the first for retryable failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each further attempt.
    pub retry_backoff: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(5),
            max_retries: 3,
            retry_backoff: Duration::from_millis(500),
            user_agent: concat!("mlb-k-model/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// `StatsProvider` backed by the live Stats API.
pub struct StatsApiClient {
    client: Client,
    config: ClientConfig,
    metrics: Arc<dyn MetricsRecorder>,
}

impl StatsApiClient {
    /// Create a new Stats API client.
    pub fn new(config: ClientConfig, metrics: Arc<dyn MetricsRecorder>) -> Result<Self, StatsApiError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(StatsApiError::Config(format!(
                "base URL must be http(s): {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(StatsApiError::Http)?;

        Ok(Self {
            client,
            config,
            metrics,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// GET with bounded retries and exponential backoff.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T, StatsApiError> {
        let url = self.url(path);
        let mut attempt: u32 = 0;
        loop {
            let started = Instant::now();
            let result = self.send_once::<T>(&url, query).await;
            let ok = matches!(result, Ok(_) | Err(StatsApiError::NotFound(_)));
            self.metrics.record_api_request(started.elapsed(), ok);

            match result {
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.retry_backoff * 2u32.saturating_pow(attempt - 1);
                    warn!(url = %url, attempt, delay_ms = delay.as_millis() as u64, error = %e, "Retrying Stats API request");
                    self.metrics.record_api_retry();
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }

    /// GET where 404 means "no such thing".
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<Option<T>, StatsApiError> {
        match self.get_json(path, query).await {
            Ok(value) => Ok(Some(value)),
            Err(StatsApiError::NotFound(url)) => {
                debug!(url = %url, "Stats API returned 404");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn send_once<T: DeserializeOwned>(&self, url: &str, query: &Query) -> Result<T, StatsApiError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| classify(e, url))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StatsApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(StatsApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| classify(e, url))?;
        serde_json::from_slice(&body).map_err(|e| StatsApiError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn classify(e: reqwest::Error, url: &str) -> StatsApiError {
    if e.is_timeout() {
        StatsApiError::Timeout(url.to_string())
    } else if e.is_connect() {
        StatsApiError::Connection(format!("Cannot connect to {}", url))
    } else {
        StatsApiError::Http(e)
    }
}

// =============================================================================
// QUERY BUILDERS
// =============================================================================

fn season_schedule_query(season: Season) -> Query {
    vec![
        ("sportId", SPORT_ID.to_string()),
        ("season", season.to_string()),
        ("gameType", "R".to_string()),
    ]
}

fn date_schedule_query(date: NaiveDate) -> Query {
    vec![
        ("sportId", SPORT_ID.to_string()),
        ("date", date.format("%Y-%m-%d").to_string()),
        ("hydrate", "probablePitcher,lineups".to_string()),
    ]
}

fn player_stats_query(group: StatGroup, window: StatWindow) -> Query {
    match window {
        StatWindow::Season(season) => vec![
            ("stats", "season".to_string()),
            ("group", group.api_name().to_string()),
            ("season", season.to_string()),
        ],
        StatWindow::DateRange { start, end } => vec![
            ("stats", "byDateRange".to_string()),
            ("group", group.api_name().to_string()),
            ("startDate", start.format("%Y-%m-%d").to_string()),
            ("endDate", end.format("%Y-%m-%d").to_string()),
            ("season", chrono::Datelike::year(&end).to_string()),
        ],
    }
}

fn roster_query(season: Season, roster_type: RosterType) -> Query {
    vec![
        ("season", season.to_string()),
        ("rosterType", roster_type.api_name().to_string()),
        ("hydrate", "person".to_string()),
    ]
}

// =============================================================================
// PORT IMPLEMENTATION
// =============================================================================

#[async_trait]
impl StatsProvider for StatsApiClient {
    async fn season_schedule(&self, season: Season) -> Result<Vec<ScheduleDate>, StatsApiError> {
        let resp: ScheduleResponse = self
            .get_json("schedule", &season_schedule_query(season))
            .await?;
        Ok(resp.dates)
    }

    async fn schedule_for_date(&self, date: NaiveDate) -> Result<Vec<ScheduleDate>, StatsApiError> {
        let resp: ScheduleResponse = self
            .get_json("schedule", &date_schedule_query(date))
            .await?;
        Ok(resp.dates)
    }

    async fn boxscore(&self, game: GamePk) -> Result<Boxscore, StatsApiError> {
        self.get_json(&format!("game/{}/boxscore", game), &Vec::new())
            .await
    }

    async fn player_stats(
        &self,
        player: PlayerId,
        group: StatGroup,
        window: StatWindow,
    ) -> Result<Option<StatLine>, StatsApiError> {
        let resp: Option<StatsResponse> = self
            .get_optional(
                &format!("people/{}/stats", player),
                &player_stats_query(group, window),
            )
            .await?;
        Ok(resp.and_then(StatsResponse::into_line))
    }

    async fn person_name(&self, player: PlayerId) -> Result<Option<String>, StatsApiError> {
        let resp: Option<PeopleResponse> = self
            .get_optional(&format!("people/{}", player), &Vec::new())
            .await?;
        Ok(resp
            .and_then(|r| r.people.into_iter().next())
            .map(|p| p.full_name)
            .filter(|name| !name.is_empty()))
    }

    async fn active_teams(&self) -> Result<Vec<Team>, StatsApiError> {
        let query = vec![
            ("sportId", SPORT_ID.to_string()),
            ("activeStatus", "Yes".to_string()),
        ];
        let resp: TeamsResponse = self.get_json("teams", &query).await?;
        Ok(resp.teams)
    }

    async fn team_roster(
        &self,
        team: TeamId,
        season: Season,
        roster_type: RosterType,
    ) -> Result<Vec<RosterSlot>, StatsApiError> {
        let resp: RosterResponse = self
            .get_json(
                &format!("teams/{}/roster", team),
                &roster_query(season, roster_type),
            )
            .await?;
        Ok(resp.roster)
    }
}
