//! Provider JSON payloads. Field names follow the provider's camelCase.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderLeague {
    pub id: String,
    pub name: String,
    /// "snake" or "auction"; missing means snake
    #[serde(default)]
    pub draft_type: Option<String>,
    pub roster_size: u32,
    #[serde(default)]
    pub teams: Vec<ProviderTeam>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderTeam {
    pub id: String,
    pub name: String,
    pub owner: String,
}

/// One row of the season stats listing. Skater and goalie columns share a
/// row; which ones are meaningful depends on `position`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPlayer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub team_name: Option<String>,
    /// G, D, F, C, LW or RW
    pub position: String,
    #[serde(default)]
    pub goals: Option<u32>,
    #[serde(default)]
    pub assists: Option<u32>,
    #[serde(default)]
    pub plus_minus: Option<i32>,
    #[serde(default)]
    pub shots: Option<u32>,
    #[serde(default)]
    pub penalty_minutes: Option<u32>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub saves: Option<u32>,
    #[serde(default)]
    pub goals_against: Option<u32>,
    #[serde(default)]
    pub shutouts: Option<u32>,
}
