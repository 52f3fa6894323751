use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draft::{DraftOrder, DraftType, TeamId, total_picks};
use crate::scoring::PlayerStats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub draft_type: DraftType,
    /// Roster slots per team, which is also the number of draft rounds
    pub roster_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub league_id: String,
    pub name: String,
    pub owner: String,
    /// Always 0 for now, matchups are not tracked yet
    #[serde(default)]
    pub wins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Real-life club, e.g. "Tappara"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    pub stats: PlayerStats,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A player owned by a fantasy team. A player can be on at most one team per league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub league_id: String,
    pub team_id: TeamId,
    pub player_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    pub pick_number: u32,
    pub round: u32,
    pub team_id: TeamId,
    pub player_id: String,
    pub made_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: String,
    pub league_id: String,
    pub draft_type: DraftType,
    pub order: DraftOrder,
    pub num_teams: u32,
    /// Next pick to be made, 1-indexed
    pub current_pick: u32,
    /// `None` once the draft is completed
    pub current_team: Option<TeamId>,
    pub status: DraftStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_time_limit_secs: Option<u32>,
    #[serde(default)]
    pub picks: Vec<DraftPick>,
    pub created_at: DateTime<Utc>,
}

impl Draft {
    pub fn total_picks(&self) -> u32 {
        total_picks(self.num_teams, self.rounds())
    }

    pub fn rounds(&self) -> u32 {
        if self.num_teams == 0 {
            0
        } else {
            self.order.len() as u32 / self.num_teams
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == DraftStatus::InProgress
    }
}
