// src/main.rs
mod cli;
mod commands;

use clap::{CommandFactory, Parser};
use cli::{Args, is_config_operation};
use commands::{handle_config_update_command, handle_list_config_command, run_command};
use liiga_fantasy::config::Config;
use liiga_fantasy::error::AppError;
use liiga_fantasy::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Try to load config to get log file path if specified
    let config_log_path = Config::load()
        .await
        .ok()
        .and_then(|config| config.log_file_path);
    let custom_log_path = args.log_file.as_deref().or(config_log_path.as_deref());

    let (log_file_path, _guard) = setup_logging(args.debug, custom_log_path).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return handle_list_config_command().await;
    }

    if is_config_operation(&args) {
        return handle_config_update_command(&args).await;
    }

    let Some(command) = args.command else {
        Args::command().print_help()?;
        println!();
        return Ok(());
    };

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;

    if let Err(e) = run_command(command, &config).await {
        tracing::error!("Command failed: {e}");
        return Err(e);
    }
    Ok(())
}
