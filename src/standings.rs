//! League standings aggregated from rostered players' fantasy points.
//!
//! Standings are derived per request and never stored.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, instrument};

use crate::constants::SCORE_DECIMALS;
use crate::draft::TeamId;
use crate::error::AppError;
use crate::store::{Player, Team};

/// Source of team rosters for the aggregator.
#[async_trait]
pub trait RosterLookup: Send + Sync {
    async fn roster_for_team(&self, league_id: &str, team_id: &str)
    -> Result<Vec<Player>, AppError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    /// 1-indexed position after sorting
    pub rank: u32,
    pub team_id: TeamId,
    pub team_name: String,
    pub owner: String,
    /// Fantasy points, rounded to two decimals
    pub score: f64,
    pub wins: u32,
    pub roster_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StandingsSnapshot {
    pub league_id: String,
    pub standings: Vec<Standing>,
    pub computed_at: DateTime<Utc>,
}

/// Rounds to [`SCORE_DECIMALS`] places. Negative zero comes back as `0.0`
/// so it ties with other zero scores under `total_cmp`.
fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    let rounded = (score * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Orders standings by score (desc), wins (desc), then team name (asc, byte-wise).
fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.team_name.cmp(&b.team_name))
}

/// Computes ranked standings for `teams`.
///
/// Rosters are fetched concurrently, one request per team, and matched back
/// to their team by position before scoring.
#[instrument(skip(teams, rosters, scoring), fields(team_count = teams.len()))]
pub async fn compute_standings<L, F>(
    teams: &[Team],
    rosters: &L,
    scoring: F,
) -> Result<Vec<Standing>, AppError>
where
    L: RosterLookup + ?Sized,
    F: Fn(&Player) -> f64,
{
    let fetched = try_join_all(
        teams
            .iter()
            .map(|team| rosters.roster_for_team(&team.league_id, &team.id)),
    )
    .await?;

    let mut standings: Vec<Standing> = teams
        .iter()
        .zip(fetched)
        .map(|(team, roster)| {
            let total: f64 = roster.iter().map(&scoring).sum();
            debug!(
                "Team {} scored {:.2} with {} players",
                team.id,
                total,
                roster.len()
            );
            Standing {
                rank: 0,
                team_id: team.id.clone(),
                team_name: team.name.clone(),
                owner: team.owner.clone(),
                score: round_score(total),
                wins: team.wins,
                roster_size: roster.len(),
            }
        })
        .collect();

    standings.sort_by(compare_standings);
    for (index, standing) in standings.iter_mut().enumerate() {
        standing.rank = index as u32 + 1;
    }
    Ok(standings)
}
