//! Season roster pull.

use std::sync::Arc;

use km_01_stats_api::{RosterType, StatsProvider};
use shared_types::{RosterEntry, Season};
use tracing::{debug, info};

use crate::error::PlayerStatsError;

pub struct RosterPuller {
    provider: Arc<dyn StatsProvider>,
}

impl RosterPuller {
    pub fn new(provider: Arc<dyn StatsProvider>) -> Self {
        Self { provider }
    }

    /// Every player on an active MLB roster, sorted by team then name.
    pub async fn pull(&self, season: Season) -> Result<Vec<RosterEntry>, PlayerStatsError> {
        let teams = self.provider.active_teams().await?;
        if teams.is_empty() {
            return Err(PlayerStatsError::NoTeams(season));
        }

        let mut entries = Vec::new();
        for team in &teams {
            let roster = self
                .provider
                .team_roster(team.id, season, RosterType::Active)
                .await?;
            debug!(team = %team.abbreviation, players = roster.len(), "Pulled roster");
            entries.extend(roster.into_iter().map(|slot| RosterEntry {
                player_id: slot.person.id,
                name: slot.person.full_name,
                team_id: team.id,
                team_abbr: team.abbreviation.clone(),
                position: slot.position.abbreviation,
                season,
            }));
        }

        entries.sort_by(|a, b| (&a.team_abbr, &a.name).cmp(&(&b.team_abbr, &b.name)));
        info!(%season, teams = teams.len(), players = entries.len(), "Harvested rosters");
        Ok(entries)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use km_01_stats_api::{InMemoryStatsProvider, PersonRef, Position, RosterSlot, Team};
    use shared_types::{PlayerId, TeamId};

    pub(crate) fn slot(id: u32, name: &str, pos: &str) -> RosterSlot {
        RosterSlot {
            person: PersonRef {
                id: PlayerId(id),
                full_name: name.into(),
            },
            position: Position {
                abbreviation: pos.into(),
            },
        }
    }

    pub(crate) fn provider() -> InMemoryStatsProvider {
        let provider = InMemoryStatsProvider::new();
        provider.insert_team(Team {
            id: TeamId(147),
            name: "New York Yankees".into(),
            abbreviation: "NYY".into(),
        });
        provider.insert_team(Team {
            id: TeamId(111),
            name: "Boston Red Sox".into(),
            abbreviation: "BOS".into(),
        });
        provider.insert_roster(
            TeamId(147),
            vec![slot(2, "Gerrit Cole", "P"), slot(1, "Aaron Judge", "RF")],
        );
        provider.insert_roster(TeamId(111), vec![slot(3, "Rafael Devers", "3B")]);
        provider
    }

    #[tokio::test]
    async fn test_pull_sorts_by_team_and_name() {
        let puller = RosterPuller::new(Arc::new(provider()));
        let season = Season::new(2024).unwrap();
        let entries = puller.pull(season).await.unwrap();

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Rafael Devers", "Aaron Judge", "Gerrit Cole"]);
        assert_eq!(entries[0].team_abbr, "BOS");
        assert_eq!(entries[2].position, "P");
        assert!(entries.iter().all(|e| e.season == season));
    }

    #[tokio::test]
    async fn test_no_teams_is_error() {
        let puller = RosterPuller::new(Arc::new(InMemoryStatsProvider::new()));
        let result = puller.pull(Season::new(2024).unwrap()).await;
        assert!(matches!(result, Err(PlayerStatsError::NoTeams(_))));
    }
}
