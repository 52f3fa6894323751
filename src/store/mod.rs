//! League persistence.
//!
//! Handlers never reach for a global connection; they are handed a
//! [`LeagueStore`] and go through its methods. [`MemoryStore`] is the
//! bundled implementation, persisted between runs as a JSON snapshot.

pub mod memory;
pub mod models;
pub mod snapshot;

use async_trait::async_trait;

use crate::error::AppError;
use crate::standings::RosterLookup;

pub use memory::{MemoryStore, StoreSnapshot};
pub use models::{Draft, DraftPick, DraftStatus, League, Player, RosterEntry, Team};
pub use snapshot::{load_snapshot, save_snapshot};

#[async_trait]
pub trait LeagueStore: Send + Sync {
    async fn league(&self, league_id: &str) -> Result<Option<League>, AppError>;

    async fn upsert_league(&self, league: League) -> Result<(), AppError>;

    /// Teams of a league, ordered by team id.
    async fn teams(&self, league_id: &str) -> Result<Vec<Team>, AppError>;

    async fn upsert_team(&self, team: Team) -> Result<(), AppError>;

    async fn player(&self, player_id: &str) -> Result<Option<Player>, AppError>;

    async fn upsert_player(&self, player: Player) -> Result<(), AppError>;

    /// Players currently rostered by a team of a league.
    async fn roster(&self, league_id: &str, team_id: &str) -> Result<Vec<Player>, AppError>;

    /// Fails with `PlayerAlreadyRostered` if the player is on another team in the same league.
    async fn add_roster_entry(&self, entry: RosterEntry) -> Result<(), AppError>;

    async fn draft(&self, draft_id: &str) -> Result<Option<Draft>, AppError>;

    async fn draft_for_league(&self, league_id: &str) -> Result<Option<Draft>, AppError>;

    /// Fails with `DraftAlreadyExists` if the league already has a draft.
    async fn insert_draft(&self, draft: Draft) -> Result<(), AppError>;

    /// Stores an advanced draft together with the roster entry of the pick
    /// that advanced it. Both are written or neither is: the stored draft must
    /// still be at `expected_pick` (`PickConflict` otherwise) and the player
    /// must be free (`PlayerAlreadyRostered` otherwise).
    async fn commit_pick(
        &self,
        draft: Draft,
        expected_pick: u32,
        entry: RosterEntry,
    ) -> Result<(), AppError>;
}

#[async_trait]
impl<S: LeagueStore + ?Sized> RosterLookup for S {
    async fn roster_for_team(
        &self,
        league_id: &str,
        team_id: &str,
    ) -> Result<Vec<Player>, AppError> {
        self.roster(league_id, team_id).await
    }
}
