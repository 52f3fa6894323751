//! Draft and standings use-cases on top of a [`LeagueStore`].
//!
//! Business rules (team count, one draft per league, whose turn it is) are
//! checked here; order generation and pick lookups stay pure in [`crate::draft`].

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::constants::draft::MIN_TEAMS;
use crate::draft::{
    PickSlot, TeamId, generate_order, is_last_pick_of_round, resolve_pick, round_number, shuffle,
    team_for_pick,
};
use crate::error::AppError;
use crate::scoring::ScoringRules;
use crate::standings::{StandingsSnapshot, compute_standings};
use crate::store::{Draft, DraftPick, DraftStatus, LeagueStore, Player, RosterEntry};

/// Result of a successful pick submission.
#[derive(Debug, Clone, Serialize)]
pub struct PickOutcome {
    pub pick: DraftPick,
    pub is_last_of_round: bool,
    /// Team on the clock next, `None` once the draft is done
    pub next_team: Option<TeamId>,
    pub draft_completed: bool,
}

pub fn draft_id_for_league(league_id: &str) -> String {
    format!("draft-{league_id}")
}

/// Creates the draft of a league.
///
/// The league's teams are shuffled into a base order, which is then expanded
/// into one round per roster slot according to the league's draft type.
#[instrument(skip(store))]
pub async fn create_draft<S: LeagueStore + ?Sized>(
    store: &S,
    league_id: &str,
    pick_time_limit_secs: Option<u32>,
) -> Result<Draft, AppError> {
    let league = store
        .league(league_id)
        .await?
        .ok_or_else(|| AppError::league_not_found(league_id))?;

    let teams = store.teams(league_id).await?;
    if teams.len() < MIN_TEAMS {
        return Err(AppError::NotEnoughTeams {
            league_id: league_id.to_string(),
            found: teams.len(),
        });
    }
    if store.draft_for_league(league_id).await?.is_some() {
        return Err(AppError::DraftAlreadyExists {
            league_id: league_id.to_string(),
        });
    }

    let team_ids: Vec<TeamId> = teams.into_iter().map(|team| team.id).collect();
    let base_order = shuffle(&team_ids);
    let order = generate_order(league.draft_type, &base_order, league.roster_size);
    let current_team = team_for_pick(&order, 1).cloned();
    let status = if current_team.is_some() {
        DraftStatus::InProgress
    } else {
        // Zero roster slots: nothing to pick
        DraftStatus::Completed
    };

    let draft = Draft {
        id: draft_id_for_league(league_id),
        league_id: league_id.to_string(),
        draft_type: league.draft_type,
        order,
        num_teams: team_ids.len() as u32,
        current_pick: 1,
        current_team,
        status,
        pick_time_limit_secs,
        picks: Vec::new(),
        created_at: Utc::now(),
    };
    store.insert_draft(draft.clone()).await?;

    info!(
        "Created {} draft {} for league {}: {} teams, {} picks, base order {:?}",
        draft.draft_type,
        draft.id,
        league_id,
        draft.num_teams,
        draft.total_picks(),
        base_order
    );
    Ok(draft)
}

/// Records `player_id` as `team_id`'s pick and moves the draft to the next pick.
#[instrument(skip(store))]
pub async fn submit_pick<S: LeagueStore + ?Sized>(
    store: &S,
    draft_id: &str,
    team_id: &str,
    player_id: &str,
) -> Result<PickOutcome, AppError> {
    let mut draft = store
        .draft(draft_id)
        .await?
        .ok_or_else(|| AppError::draft_not_found(draft_id))?;
    if !draft.is_active() {
        return Err(AppError::DraftNotActive {
            draft_id: draft_id.to_string(),
        });
    }

    let pick_number = draft.current_pick;
    let on_the_clock = team_for_pick(&draft.order, pick_number)
        .cloned()
        .ok_or_else(|| AppError::DraftNotActive {
            draft_id: draft_id.to_string(),
        })?;
    if on_the_clock != team_id {
        return Err(AppError::NotYourTurn {
            pick_number,
            expected: on_the_clock,
            actual: team_id.to_string(),
        });
    }
    if store.player(player_id).await?.is_none() {
        return Err(AppError::player_not_found(player_id));
    }

    let pick = DraftPick {
        pick_number,
        round: round_number(pick_number, draft.num_teams)?,
        team_id: team_id.to_string(),
        player_id: player_id.to_string(),
        made_at: Utc::now(),
    };
    let is_last_of_round = is_last_pick_of_round(pick_number, draft.num_teams)?;

    draft.picks.push(pick.clone());
    draft.current_pick = pick_number + 1;
    draft.current_team = team_for_pick(&draft.order, draft.current_pick).cloned();
    if draft.current_team.is_none() {
        draft.status = DraftStatus::Completed;
    }
    let draft_completed = draft.status == DraftStatus::Completed;
    let next_team = draft.current_team.clone();
    let entry = RosterEntry {
        league_id: draft.league_id.clone(),
        team_id: team_id.to_string(),
        player_id: player_id.to_string(),
    };

    if let Err(e) = store.commit_pick(draft, pick_number, entry).await {
        warn!("Pick {} of draft {} rejected: {}", pick_number, draft_id, e);
        return Err(e);
    }

    if is_last_of_round && !draft_completed {
        info!(
            "Round {} of draft {} complete, order turns around",
            pick.round, draft_id
        );
    }
    if draft_completed {
        info!("Draft {} completed after {} picks", draft_id, pick_number);
    }

    Ok(PickOutcome {
        pick,
        is_last_of_round,
        next_team,
        draft_completed,
    })
}

/// Resolves who holds `pick_number`, defaulting to the draft's current pick.
pub async fn current_turn<S: LeagueStore + ?Sized>(
    store: &S,
    draft_id: &str,
    pick_number: Option<u32>,
) -> Result<Option<PickSlot>, AppError> {
    let draft = store
        .draft(draft_id)
        .await?
        .ok_or_else(|| AppError::draft_not_found(draft_id))?;
    let pick_number = pick_number.unwrap_or(draft.current_pick);
    resolve_pick(&draft.order, pick_number, draft.num_teams)
}

/// Computes the current standings of a league.
#[instrument(skip(store, rules))]
pub async fn league_standings<S: LeagueStore + ?Sized>(
    store: &S,
    league_id: &str,
    rules: &ScoringRules,
) -> Result<StandingsSnapshot, AppError> {
    if store.league(league_id).await?.is_none() {
        return Err(AppError::league_not_found(league_id));
    }
    let teams = store.teams(league_id).await?;
    let standings = compute_standings(&teams, store, |player: &Player| {
        rules.score(&player.stats)
    })
    .await?;
    info!(
        "Computed standings for league {} ({} teams)",
        league_id,
        standings.len()
    );
    Ok(StandingsSnapshot {
        league_id: league_id.to_string(),
        standings,
        computed_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftType;
    use crate::scoring::PlayerStats;
    use crate::store::{League, MemoryStore, Team};

    async fn league_with_teams(draft_type: DraftType, team_count: usize, roster_size: u32) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .upsert_league(League {
                id: "l1".to_string(),
                name: "Toimiston liiga".to_string(),
                draft_type,
                roster_size,
            })
            .await
            .unwrap();
        for i in 0..team_count {
            store
                .upsert_team(Team {
                    id: format!("t{i}"),
                    league_id: "l1".to_string(),
                    name: format!("Team {i}"),
                    owner: format!("owner{i}"),
                    wins: 0,
                })
                .await
                .unwrap();
        }
        for i in 0..20 {
            store
                .upsert_player(Player {
                    id: format!("p{i}"),
                    first_name: "Pelaaja".to_string(),
                    last_name: format!("{i}"),
                    club: None,
                    stats: PlayerStats::Skater {
                        goals: i,
                        assists: 0,
                        plus_minus: 0,
                        shots: 0,
                        penalty_minutes: 0,
                    },
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_create_draft_snake() {
        let store = league_with_teams(DraftType::Snake, 4, 3).await;
        let draft = create_draft(&store, "l1", Some(90)).await.unwrap();

        assert_eq!(draft.id, "draft-l1");
        assert_eq!(draft.order.len(), 12);
        assert_eq!(draft.num_teams, 4);
        assert_eq!(draft.current_pick, 1);
        assert_eq!(draft.status, DraftStatus::InProgress);
        assert_eq!(draft.pick_time_limit_secs, Some(90));
        assert_eq!(
            draft.current_team.as_ref(),
            Some(&draft.order.as_slice()[0])
        );

        let first_round = draft.order.round(1, 4).unwrap().to_vec();
        let mut second_round = draft.order.round(2, 4).unwrap().to_vec();
        second_round.reverse();
        assert_eq!(first_round, second_round);

        let stored = store.draft("draft-l1").await.unwrap().unwrap();
        assert_eq!(stored, draft);
    }

    #[tokio::test]
    async fn test_create_draft_auction_repeats_nomination_order() {
        let store = league_with_teams(DraftType::Auction, 3, 2).await;
        let draft = create_draft(&store, "l1", None).await.unwrap();
        assert_eq!(draft.order.round(1, 3), draft.order.round(2, 3));
    }

    #[tokio::test]
    async fn test_create_draft_needs_two_teams() {
        let store = league_with_teams(DraftType::Snake, 1, 3).await;
        let result = create_draft(&store, "l1", None).await;
        assert!(matches!(
            result,
            Err(AppError::NotEnoughTeams { found: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_create_draft_only_once() {
        let store = league_with_teams(DraftType::Snake, 2, 1).await;
        create_draft(&store, "l1", None).await.unwrap();
        let again = create_draft(&store, "l1", None).await;
        assert!(matches!(again, Err(AppError::DraftAlreadyExists { .. })));
        assert!(again.unwrap_err().is_bad_request());
    }

    #[tokio::test]
    async fn test_create_draft_unknown_league() {
        let store = MemoryStore::new();
        let result = create_draft(&store, "ghost", None).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_full_snake_draft_runs_to_completion() {
        let store = league_with_teams(DraftType::Snake, 3, 2).await;
        let draft = create_draft(&store, "l1", None).await.unwrap();
        let order = draft.order.clone();

        for pick in 1..=6u32 {
            let team = order.as_slice()[pick as usize - 1].clone();
            let outcome = submit_pick(&store, "draft-l1", &team, &format!("p{pick}"))
                .await
                .unwrap();
            assert_eq!(outcome.pick.pick_number, pick);
            assert_eq!(outcome.pick.round, pick.div_ceil(3));
            assert_eq!(outcome.is_last_of_round, pick % 3 == 0);
            assert_eq!(outcome.draft_completed, pick == 6);
            if pick < 6 {
                assert_eq!(outcome.next_team.as_ref(), Some(&order.as_slice()[pick as usize]));
            } else {
                assert_eq!(outcome.next_team, None);
            }
        }

        let done = store.draft("draft-l1").await.unwrap().unwrap();
        assert_eq!(done.status, DraftStatus::Completed);
        assert_eq!(done.picks.len(), 6);
        assert_eq!(done.current_team, None);

        let first_team = order.as_slice()[0].clone();
        assert_eq!(store.roster("l1", &first_team).await.unwrap().len(), 2);

        let late = submit_pick(&store, "draft-l1", &first_team, "p10").await;
        assert!(matches!(late, Err(AppError::DraftNotActive { .. })));
    }

    #[tokio::test]
    async fn test_submit_pick_out_of_turn() {
        let store = league_with_teams(DraftType::Snake, 2, 2).await;
        let draft = create_draft(&store, "l1", None).await.unwrap();
        let waiting = draft.order.as_slice()[1].clone();

        let result = submit_pick(&store, "draft-l1", &waiting, "p1").await;
        assert!(matches!(
            result,
            Err(AppError::NotYourTurn { pick_number: 1, .. })
        ));
        // Nothing moved
        let stored = store.draft("draft-l1").await.unwrap().unwrap();
        assert_eq!(stored.current_pick, 1);
    }

    #[tokio::test]
    async fn test_submit_pick_rejects_taken_player() {
        let store = league_with_teams(DraftType::Snake, 2, 2).await;
        let draft = create_draft(&store, "l1", None).await.unwrap();
        let order = draft.order.as_slice().to_vec();

        submit_pick(&store, "draft-l1", &order[0], "p5").await.unwrap();
        let result = submit_pick(&store, "draft-l1", &order[1], "p5").await;
        assert!(matches!(
            result,
            Err(AppError::PlayerAlreadyRostered { .. })
        ));
        let stored = store.draft("draft-l1").await.unwrap().unwrap();
        assert_eq!(stored.current_pick, 2);
    }

    #[tokio::test]
    async fn test_submit_pick_unknown_player_and_draft() {
        let store = league_with_teams(DraftType::Snake, 2, 1).await;
        let draft = create_draft(&store, "l1", None).await.unwrap();
        let first = draft.order.as_slice()[0].clone();

        assert!(matches!(
            submit_pick(&store, "draft-l1", &first, "nobody").await,
            Err(AppError::PlayerNotFound { .. })
        ));
        assert!(matches!(
            submit_pick(&store, "draft-x", &first, "p1").await,
            Err(AppError::DraftNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_stale_pick_conflicts() {
        let store = league_with_teams(DraftType::Snake, 2, 2).await;
        let draft = create_draft(&store, "l1", None).await.unwrap();
        let first = draft.order.as_slice()[0].clone();

        // A writer that read the draft before pick 1 was made
        let stale = store.draft("draft-l1").await.unwrap().unwrap();
        submit_pick(&store, "draft-l1", &first, "p1").await.unwrap();

        let entry = RosterEntry {
            league_id: "l1".to_string(),
            team_id: first.clone(),
            player_id: "p2".to_string(),
        };
        let result = store.commit_pick(stale, 1, entry).await;
        assert!(matches!(result, Err(AppError::PickConflict { .. })));
    }

    #[tokio::test]
    async fn test_current_turn() {
        let store = league_with_teams(DraftType::Snake, 3, 2).await;
        let draft = create_draft(&store, "l1", None).await.unwrap();

        let now = current_turn(&store, "draft-l1", None).await.unwrap().unwrap();
        assert_eq!(now.pick_number, 1);
        assert_eq!(Some(now.team_id), draft.current_team);

        let turn = current_turn(&store, "draft-l1", Some(4)).await.unwrap().unwrap();
        assert_eq!(turn.round, 2);
        assert_eq!(turn.team_id, draft.order.as_slice()[2]);

        assert_eq!(current_turn(&store, "draft-l1", Some(7)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_league_standings() {
        let store = league_with_teams(DraftType::Snake, 2, 1).await;
        store
            .add_roster_entry(RosterEntry {
                league_id: "l1".to_string(),
                team_id: "t1".to_string(),
                player_id: "p4".to_string(),
            })
            .await
            .unwrap();

        let snapshot = league_standings(&store, "l1", &ScoringRules::default())
            .await
            .unwrap();
        assert_eq!(snapshot.league_id, "l1");
        assert_eq!(snapshot.standings[0].team_id, "t1");
        assert_eq!(snapshot.standings[0].score, 12.0);
        assert_eq!(snapshot.standings[1].score, 0.0);
        assert_eq!(snapshot.standings[1].rank, 2);
    }

    #[tokio::test]
    async fn test_league_standings_unknown_league() {
        let store = MemoryStore::new();
        let result = league_standings(&store, "ghost", &ScoringRules::default()).await;
        assert!(matches!(result, Err(AppError::LeagueNotFound { .. })));
    }
}
