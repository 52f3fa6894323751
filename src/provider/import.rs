//! League import: provider payloads in, store records out.

use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::fetch_utils::fetch;
use super::models::{ProviderLeague, ProviderPlayer};
use super::urls::{build_league_url, build_players_url};
use crate::config::Config;
use crate::draft::DraftType;
use crate::error::AppError;
use crate::scoring::PlayerStats;
use crate::store::{League, LeagueStore, Player, Team};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub league_id: String,
    pub teams: usize,
    pub players: usize,
    /// Rows with a position code we do not score
    pub skipped: usize,
}

/// Converts a provider stats row into a player with position-specific stats.
///
/// Returns `None` for position codes that are neither goalie nor skater.
pub fn to_player(row: &ProviderPlayer) -> Option<Player> {
    let stats = match row.position.trim().to_ascii_uppercase().as_str() {
        "G" => PlayerStats::Goalie {
            wins: row.wins.unwrap_or(0),
            saves: row.saves.unwrap_or(0),
            goals_against: row.goals_against.unwrap_or(0),
            shutouts: row.shutouts.unwrap_or(0),
        },
        "D" | "F" | "C" | "LW" | "RW" => PlayerStats::Skater {
            goals: row.goals.unwrap_or(0),
            assists: row.assists.unwrap_or(0),
            plus_minus: row.plus_minus.unwrap_or(0),
            shots: row.shots.unwrap_or(0),
            penalty_minutes: row.penalty_minutes.unwrap_or(0),
        },
        _ => return None,
    };
    Some(Player {
        id: row.id.to_string(),
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        club: row.team_name.clone(),
        stats,
    })
}

fn to_league(provider: &ProviderLeague, url: &str) -> Result<League, AppError> {
    let draft_type = match provider.draft_type.as_deref() {
        Some(raw) => raw
            .parse::<DraftType>()
            .map_err(|e| AppError::api_unexpected_structure(e.to_string(), url))?,
        None => DraftType::default(),
    };
    Ok(League {
        id: provider.id.clone(),
        name: provider.name.clone(),
        draft_type,
        roster_size: provider.roster_size,
    })
}

/// Imports a league, its teams and the season's player stats into `store`.
///
/// Team win counts already in the store are kept; everything else is
/// overwritten with the provider's data.
#[instrument(skip(client, config, store))]
pub async fn import_league<S: LeagueStore + ?Sized>(
    client: &Client,
    config: &Config,
    store: &S,
    league_id: &str,
    season: i32,
) -> Result<ImportSummary, AppError> {
    let league_url = build_league_url(&config.api_domain, league_id);
    let players_url = build_players_url(&config.api_domain, season);

    let (provider_league, rows) = tokio::try_join!(
        fetch::<ProviderLeague>(client, &league_url),
        fetch::<Vec<ProviderPlayer>>(client, &players_url),
    )?;

    let league = to_league(&provider_league, &league_url)?;
    store.upsert_league(league).await?;

    let existing_wins: Vec<(String, u32)> = store
        .teams(&provider_league.id)
        .await?
        .into_iter()
        .map(|team| (team.id, team.wins))
        .collect();
    for team in &provider_league.teams {
        let wins = existing_wins
            .iter()
            .find(|(id, _)| *id == team.id)
            .map(|(_, wins)| *wins)
            .unwrap_or(0);
        store
            .upsert_team(Team {
                id: team.id.clone(),
                league_id: provider_league.id.clone(),
                name: team.name.clone(),
                owner: team.owner.clone(),
                wins,
            })
            .await?;
    }

    let mut summary = ImportSummary {
        league_id: provider_league.id.clone(),
        teams: provider_league.teams.len(),
        ..ImportSummary::default()
    };
    for row in &rows {
        match to_player(row) {
            Some(player) => {
                store.upsert_player(player).await?;
                summary.players += 1;
            }
            None => {
                warn!(
                    "Skipping player {} {} ({}): unknown position '{}'",
                    row.first_name, row.last_name, row.id, row.position
                );
                summary.skipped += 1;
            }
        }
    }

    info!(
        "Imported league {}: {} teams, {} players, {} skipped",
        summary.league_id, summary.teams, summary.players, summary.skipped
    );
    Ok(summary)
}
