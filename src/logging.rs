use crate::config::Config;
use crate::constants::LOG_FILE_NAME;
use crate::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_DIRECTIVE: &str = "liiga_fantasy=info";

fn env_filter() -> Result<EnvFilter, AppError> {
    let directive = DEFAULT_DIRECTIVE
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Splits a custom log path into directory and file name, falling back to
/// the default log directory.
fn log_target(custom_log_path: Option<&str>) -> (String, String) {
    match custom_log_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), LOG_FILE_NAME.to_string()),
    }
}

/// Sets up logging for the application.
///
/// - Always logs to a daily rolling file
/// - With `debug`, also logs to stdout
/// - Creates the log directory if it doesn't exist
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(
    debug: bool,
    custom_log_path: Option<&str>,
) -> Result<(String, WorkerGuard), AppError> {
    let (log_dir, log_file_name) = log_target(custom_log_path);

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must outlive every log call or buffered lines are lost
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(env_filter()?);
    let registry = tracing_subscriber::registry().with(file_layer);

    let result = if debug {
        registry
            .with(
                fmt::Layer::new()
                    .with_writer(stdout)
                    .with_ansi(true)
                    .with_filter(env_filter()?),
            )
            .try_init()
    } else {
        registry.try_init()
    };
    result.map_err(|e| AppError::log_setup_error(format!("Failed to install subscriber: {e}")))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_target_default() {
        let (dir, file) = log_target(None);
        assert_eq!(dir, Config::get_log_dir_path());
        assert_eq!(file, LOG_FILE_NAME);
    }

    #[test]
    fn test_log_target_custom_path() {
        let (dir, file) = log_target(Some("/var/log/fantasy/draft.log"));
        assert_eq!(dir, "/var/log/fantasy");
        assert_eq!(file, "draft.log");
    }

    #[test]
    fn test_log_target_bare_file_name() {
        let (dir, file) = log_target(Some("draft.log"));
        assert_eq!(dir, ".");
        assert_eq!(file, "draft.log");
    }

    #[test]
    fn test_default_directive_parses() {
        assert!(env_filter().is_ok());
    }
}
