//! In-memory league store guarded by a single async `RwLock`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::LeagueStore;
use super::models::{Draft, League, Player, RosterEntry, Team};
use crate::error::AppError;

/// Serializable form of the whole store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub rosters: Vec<RosterEntry>,
    #[serde(default)]
    pub drafts: Vec<Draft>,
}

#[derive(Debug, Default)]
struct StoreData {
    leagues: BTreeMap<String, League>,
    /// Keyed by (league id, team id); team ids are only unique within a league
    teams: BTreeMap<(String, String), Team>,
    players: BTreeMap<String, Player>,
    rosters: Vec<RosterEntry>,
    drafts: BTreeMap<String, Draft>,
}

impl StoreData {
    fn rostered_in_league(&self, league_id: &str, player_id: &str) -> Option<&RosterEntry> {
        self.rosters
            .iter()
            .find(|entry| entry.league_id == league_id && entry.player_id == player_id)
    }

    fn check_roster_entry(&self, entry: &RosterEntry) -> Result<(), AppError> {
        if !self
            .teams
            .contains_key(&(entry.league_id.clone(), entry.team_id.clone()))
        {
            return Err(AppError::team_not_found(&entry.team_id));
        }
        if !self.players.contains_key(&entry.player_id) {
            return Err(AppError::player_not_found(&entry.player_id));
        }
        if self
            .rostered_in_league(&entry.league_id, &entry.player_id)
            .is_some()
        {
            return Err(AppError::PlayerAlreadyRostered {
                player_id: entry.player_id.clone(),
                league_id: entry.league_id.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let data = StoreData {
            leagues: snapshot
                .leagues
                .into_iter()
                .map(|league| (league.id.clone(), league))
                .collect(),
            teams: snapshot
                .teams
                .into_iter()
                .map(|team| ((team.league_id.clone(), team.id.clone()), team))
                .collect(),
            players: snapshot
                .players
                .into_iter()
                .map(|player| (player.id.clone(), player))
                .collect(),
            rosters: snapshot.rosters,
            drafts: snapshot
                .drafts
                .into_iter()
                .map(|draft| (draft.id.clone(), draft))
                .collect(),
        };
        MemoryStore {
            data: RwLock::new(data),
        }
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let data = self.data.read().await;
        StoreSnapshot {
            leagues: data.leagues.values().cloned().collect(),
            teams: data.teams.values().cloned().collect(),
            players: data.players.values().cloned().collect(),
            rosters: data.rosters.clone(),
            drafts: data.drafts.values().cloned().collect(),
        }
    }
}

#[async_trait]
impl LeagueStore for MemoryStore {
    async fn league(&self, league_id: &str) -> Result<Option<League>, AppError> {
        Ok(self.data.read().await.leagues.get(league_id).cloned())
    }

    async fn upsert_league(&self, league: League) -> Result<(), AppError> {
        debug!("Upserting league {}", league.id);
        self.data
            .write()
            .await
            .leagues
            .insert(league.id.clone(), league);
        Ok(())
    }

    async fn teams(&self, league_id: &str) -> Result<Vec<Team>, AppError> {
        Ok(self
            .data
            .read()
            .await
            .teams
            .iter()
            .filter(|((team_league, _), _)| team_league == league_id)
            .map(|(_, team)| team)
            .cloned()
            .collect())
    }

    async fn upsert_team(&self, team: Team) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        if !data.leagues.contains_key(&team.league_id) {
            return Err(AppError::league_not_found(&team.league_id));
        }
        data.teams
            .insert((team.league_id.clone(), team.id.clone()), team);
        Ok(())
    }

    async fn player(&self, player_id: &str) -> Result<Option<Player>, AppError> {
        Ok(self.data.read().await.players.get(player_id).cloned())
    }

    async fn upsert_player(&self, player: Player) -> Result<(), AppError> {
        self.data
            .write()
            .await
            .players
            .insert(player.id.clone(), player);
        Ok(())
    }

    async fn roster(&self, league_id: &str, team_id: &str) -> Result<Vec<Player>, AppError> {
        let data = self.data.read().await;
        let mut players = Vec::new();
        for entry in data
            .rosters
            .iter()
            .filter(|entry| entry.league_id == league_id && entry.team_id == team_id)
        {
            match data.players.get(&entry.player_id) {
                Some(player) => players.push(player.clone()),
                None => warn!(
                    "Team {} rosters unknown player {}, skipping",
                    team_id, entry.player_id
                ),
            }
        }
        Ok(players)
    }

    async fn add_roster_entry(&self, entry: RosterEntry) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        data.check_roster_entry(&entry)?;
        data.rosters.push(entry);
        Ok(())
    }

    async fn draft(&self, draft_id: &str) -> Result<Option<Draft>, AppError> {
        Ok(self.data.read().await.drafts.get(draft_id).cloned())
    }

    async fn draft_for_league(&self, league_id: &str) -> Result<Option<Draft>, AppError> {
        Ok(self
            .data
            .read()
            .await
            .drafts
            .values()
            .find(|draft| draft.league_id == league_id)
            .cloned())
    }

    async fn insert_draft(&self, draft: Draft) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        if data
            .drafts
            .values()
            .any(|existing| existing.league_id == draft.league_id)
        {
            return Err(AppError::DraftAlreadyExists {
                league_id: draft.league_id,
            });
        }
        data.drafts.insert(draft.id.clone(), draft);
        Ok(())
    }

    async fn commit_pick(
        &self,
        draft: Draft,
        expected_pick: u32,
        entry: RosterEntry,
    ) -> Result<(), AppError> {
        let mut data = self.data.write().await;
        let stored_pick = data
            .drafts
            .get(&draft.id)
            .map(|stored| stored.current_pick)
            .ok_or_else(|| AppError::draft_not_found(&draft.id))?;
        if stored_pick != expected_pick {
            return Err(AppError::PickConflict {
                draft_id: draft.id,
                pick_number: expected_pick,
            });
        }
        data.check_roster_entry(&entry)?;
        data.rosters.push(entry);
        data.drafts.insert(draft.id.clone(), draft);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftType;
    use crate::scoring::PlayerStats;

    fn league(id: &str) -> League {
        League {
            id: id.to_string(),
            name: format!("League {id}"),
            draft_type: DraftType::Snake,
            roster_size: 2,
        }
    }

    fn team(id: &str, league_id: &str) -> Team {
        Team {
            id: id.to_string(),
            league_id: league_id.to_string(),
            name: id.to_uppercase(),
            owner: format!("{id}-owner"),
            wins: 0,
        }
    }

    fn player(id: &str) -> Player {
        Player {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: id.to_string(),
            club: Some("Ilves".to_string()),
            stats: PlayerStats::Goalie {
                wins: 1,
                saves: 20,
                goals_against: 1,
                shutouts: 0,
            },
        }
    }

    fn entry(league_id: &str, team_id: &str, player_id: &str) -> RosterEntry {
        RosterEntry {
            league_id: league_id.to_string(),
            team_id: team_id.to_string(),
            player_id: player_id.to_string(),
        }
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.upsert_league(league("l1")).await.unwrap();
        store.upsert_league(league("l2")).await.unwrap();
        store.upsert_team(team("b", "l1")).await.unwrap();
        store.upsert_team(team("a", "l1")).await.unwrap();
        store.upsert_team(team("z", "l2")).await.unwrap();
        store.upsert_player(player("p1")).await.unwrap();
        store.upsert_player(player("p2")).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_teams_filtered_and_ordered() {
        let store = seeded_store().await;
        let ids: Vec<String> = store
            .teams("l1")
            .await
            .unwrap()
            .into_iter()
            .map(|team| team.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(store.teams("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_team_id_in_two_leagues() {
        let store = seeded_store().await;
        store.upsert_team(team("a", "l2")).await.unwrap();

        let l1: Vec<String> = store
            .teams("l1")
            .await
            .unwrap()
            .into_iter()
            .map(|team| team.id)
            .collect();
        assert_eq!(l1, vec!["a", "b"]);
        let l2: Vec<String> = store
            .teams("l2")
            .await
            .unwrap()
            .into_iter()
            .map(|team| team.id)
            .collect();
        assert_eq!(l2, vec!["a", "z"]);

        store.add_roster_entry(entry("l1", "a", "p1")).await.unwrap();
        store.add_roster_entry(entry("l2", "a", "p2")).await.unwrap();
        let l1_roster = store.roster("l1", "a").await.unwrap();
        assert_eq!(l1_roster.len(), 1);
        assert_eq!(l1_roster[0].id, "p1");
        let l2_roster = store.roster("l2", "a").await.unwrap();
        assert_eq!(l2_roster.len(), 1);
        assert_eq!(l2_roster[0].id, "p2");
    }

    #[tokio::test]
    async fn test_roster_entry_team_must_be_in_league() {
        let store = seeded_store().await;
        let result = store.add_roster_entry(entry("l2", "a", "p1")).await;
        assert!(matches!(result, Err(AppError::TeamNotFound { .. })));
    }

    #[tokio::test]
    async fn test_upsert_team_requires_league() {
        let store = MemoryStore::new();
        let result = store.upsert_team(team("a", "nope")).await;
        assert!(matches!(result, Err(AppError::LeagueNotFound { .. })));
    }

    #[tokio::test]
    async fn test_player_rostered_once_per_league() {
        let store = seeded_store().await;
        store.add_roster_entry(entry("l1", "a", "p1")).await.unwrap();

        let again = store.add_roster_entry(entry("l1", "b", "p1")).await;
        assert!(matches!(again, Err(AppError::PlayerAlreadyRostered { .. })));

        // Same player in another league is fine
        store.add_roster_entry(entry("l2", "z", "p1")).await.unwrap();

        assert_eq!(store.roster("l1", "a").await.unwrap().len(), 1);
        assert!(store.roster("l1", "b").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_roster_entry_requires_known_team_and_player() {
        let store = seeded_store().await;
        assert!(matches!(
            store.add_roster_entry(entry("l1", "ghost", "p1")).await,
            Err(AppError::TeamNotFound { .. })
        ));
        assert!(matches!(
            store.add_roster_entry(entry("l1", "a", "ghost")).await,
            Err(AppError::PlayerNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip_keeps_everything() {
        let store = seeded_store().await;
        store.add_roster_entry(entry("l1", "a", "p2")).await.unwrap();

        let snapshot = store.snapshot().await;
        let restored = MemoryStore::from_snapshot(snapshot.clone());
        assert_eq!(restored.snapshot().await, snapshot);
        assert_eq!(restored.roster("l1", "a").await.unwrap()[0].id, "p2");
    }
}
