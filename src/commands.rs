use crate::cli::{Args, Command};
use liiga_fantasy::config::Config;
use liiga_fantasy::draft::{DraftType, generate_order, resolve_pick, shuffle};
use liiga_fantasy::error::AppError;
use liiga_fantasy::provider::{create_http_client_with_timeout, import_league};
use liiga_fantasy::service::{PickOutcome, create_draft, current_turn, league_standings, submit_pick};
use liiga_fantasy::standings::StandingsSnapshot;
use liiga_fantasy::store::{LeagueStore, MemoryStore, load_snapshot, save_snapshot};
use tracing::info;

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands.
///
/// Updates API domain or log file path and saves the configuration.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_default();

    if let Some(new_domain) = &args.new_api_domain {
        config.api_domain = new_domain.clone();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save().await?;
    println!("Config updated successfully!");
    Ok(())
}

/// Runs a subcommand against the league data file.
///
/// The snapshot is read once up front and written back only after a
/// command that changed it succeeded.
pub async fn run_command(command: Command, config: &Config) -> Result<(), AppError> {
    if let Command::Order {
        teams,
        rounds,
        draft_type,
        shuffle: shuffled,
    } = &command
    {
        return handle_order_command(teams, *rounds, *draft_type, *shuffled);
    }

    let data_file = config.data_file_path();
    let store = load_snapshot(&data_file).await?;

    match &command {
        Command::Import { league_id, season } => {
            handle_import_command(&store, config, league_id, *season).await?
        }
        Command::CreateDraft {
            league_id,
            pick_time_limit,
        } => handle_create_draft_command(&store, league_id, *pick_time_limit).await?,
        Command::Pick {
            draft_id,
            team_id,
            player_id,
        } => handle_pick_command(&store, draft_id, team_id, player_id).await?,
        Command::Turn { draft_id, pick } => handle_turn_command(&store, draft_id, *pick).await?,
        Command::Standings { league_id, json } => {
            let snapshot = league_standings(&store, league_id, &config.scoring).await?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_standings(&snapshot);
            }
        }
        Command::Order { .. } => {}
    }

    if command.mutates_store() {
        save_snapshot(&store, &data_file).await?;
    }
    Ok(())
}

async fn handle_import_command(
    store: &MemoryStore,
    config: &Config,
    league_id: &str,
    season: Option<i32>,
) -> Result<(), AppError> {
    config.require_api_domain()?;
    let season = season.unwrap_or_else(|| config.season_or_current());
    let client = create_http_client_with_timeout(config.http_timeout_seconds)?;

    let summary = import_league(&client, config, store, league_id, season).await?;
    println!(
        "Imported league {} for season {}: {} teams, {} players",
        summary.league_id, season, summary.teams, summary.players
    );
    if summary.skipped > 0 {
        println!(
            "Skipped {} players with an unknown position",
            summary.skipped
        );
    }
    Ok(())
}

async fn handle_create_draft_command(
    store: &MemoryStore,
    league_id: &str,
    pick_time_limit: Option<u32>,
) -> Result<(), AppError> {
    let draft = create_draft(store, league_id, pick_time_limit).await?;
    println!(
        "Created {} draft {} with {} picks over {} rounds",
        draft.draft_type,
        draft.id,
        draft.total_picks(),
        draft.rounds()
    );
    if let Some(first_round) = draft.order.round(1, draft.num_teams as usize) {
        println!("Round 1: {}", first_round.join(", "));
    }
    match &draft.current_team {
        Some(team) => println!("On the clock: {team}"),
        None => println!("No roster slots, draft completed"),
    }
    Ok(())
}

async fn handle_pick_command(
    store: &MemoryStore,
    draft_id: &str,
    team_id: &str,
    player_id: &str,
) -> Result<(), AppError> {
    let PickOutcome {
        pick,
        is_last_of_round,
        next_team,
        draft_completed,
    } = submit_pick(store, draft_id, team_id, player_id).await?;

    let player_name = store
        .player(&pick.player_id)
        .await?
        .map(|player| player.full_name())
        .unwrap_or_else(|| pick.player_id.clone());
    println!(
        "Pick {} (round {}): {} selects {}",
        pick.pick_number, pick.round, pick.team_id, player_name
    );
    if draft_completed {
        println!("Draft completed");
    } else {
        if is_last_of_round {
            println!("End of round {}", pick.round);
        }
        if let Some(team) = next_team {
            println!("On the clock: {team}");
        }
    }
    Ok(())
}

async fn handle_turn_command(
    store: &MemoryStore,
    draft_id: &str,
    pick: Option<u32>,
) -> Result<(), AppError> {
    match current_turn(store, draft_id, pick).await? {
        Some(slot) => {
            println!(
                "Pick {} (round {}, pick {} of the round): {}",
                slot.pick_number, slot.round, slot.pick_in_round, slot.team_id
            );
            if slot.is_last_of_round {
                println!("Last pick of the round");
            }
        }
        None => println!("No such pick in draft {draft_id}"),
    }
    Ok(())
}

fn handle_order_command(
    teams: &[String],
    rounds: u32,
    draft_type: DraftType,
    shuffled: bool,
) -> Result<(), AppError> {
    if teams.is_empty() {
        return Err(AppError::invalid_input("at least one team is required"));
    }
    let base = if shuffled {
        shuffle(teams)
    } else {
        teams.to_vec()
    };
    let order = generate_order(draft_type, &base, rounds);
    info!(
        "Previewing {} order for {} teams over {} rounds",
        draft_type,
        base.len(),
        rounds
    );

    for pick_number in 1..=order.len() as u32 {
        if let Some(slot) = resolve_pick(&order, pick_number, base.len() as u32)? {
            if slot.pick_in_round == 1 {
                println!("Round {}", slot.round);
            }
            println!("  {:>3}. {}", slot.pick_number, slot.team_id);
        }
    }
    Ok(())
}

fn print_standings(snapshot: &StandingsSnapshot) {
    println!(
        "\nStandings for {} ({})",
        snapshot.league_id,
        snapshot.computed_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("────────────────────────────────────────────────────────");
    println!(
        "{:>3}  {:<24} {:<14} {:>8} {:>4} {:>4}",
        "#", "Team", "Owner", "Points", "W", "Pl"
    );
    for standing in &snapshot.standings {
        println!(
            "{:>3}  {:<24} {:<14} {:>8.2} {:>4} {:>4}",
            standing.rank,
            standing.team_name,
            standing.owner,
            standing.score,
            standing.wins,
            standing.roster_size
        );
    }
}
