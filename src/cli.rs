use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use liiga_fantasy::draft::DraftType;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Returns true when the invocation only touches the config file.
pub fn is_config_operation(args: &Args) -> bool {
    args.new_api_domain.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Fantasy league manager for the Finnish Hockey League (Liiga)
///
/// Imports a league and player stats from the fantasy provider, runs the
/// snake or auction draft and ranks teams by fantasy points.
///
/// League data is kept in a JSON file next to the config file unless
/// `data_file` is configured.
#[derive(Parser, Debug)]
#[command(author = "Niko Salonen", version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Update API domain in config.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "API_DOMAIN"
    )]
    pub new_api_domain: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also write logs to the terminal.
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Import a league, its teams and the season's player stats from the provider
    Import {
        league_id: String,
        /// Season named by the year it ends in. Defaults to config, then the current season.
        #[arg(long)]
        season: Option<i32>,
    },
    /// Randomise the draft order of a league and open the draft
    CreateDraft {
        league_id: String,
        /// Informational time limit per pick in seconds
        #[arg(long = "pick-time-limit", value_name = "SECONDS")]
        pick_time_limit: Option<u32>,
    },
    /// Submit a pick for the team on the clock
    Pick {
        draft_id: String,
        team_id: String,
        player_id: String,
    },
    /// Show who holds the current pick, or a specific one
    Turn {
        draft_id: String,
        #[arg(long)]
        pick: Option<u32>,
    },
    /// Rank the league's teams by fantasy points
    Standings {
        league_id: String,
        /// Print the standings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Preview a draft order without touching league data
    Order {
        /// Team ids in first-round order
        #[arg(long, value_delimiter = ',', required = true)]
        teams: Vec<String>,
        #[arg(long, default_value_t = 1)]
        rounds: u32,
        #[arg(long = "draft-type", default_value_t = DraftType::Snake)]
        draft_type: DraftType,
        /// Shuffle the teams before expanding the order
        #[arg(long)]
        shuffle: bool,
    },
}

impl Command {
    /// Commands that change league data and need the snapshot written back.
    pub fn mutates_store(&self) -> bool {
        matches!(
            self,
            Command::Import { .. } | Command::CreateDraft { .. } | Command::Pick { .. }
        )
    }
}
