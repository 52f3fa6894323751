use crate::constants::{LOG_FILE_NAME, env_vars};
use crate::error::AppError;
use crate::scoring::ScoringRules;
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_default_data_file_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Fantasy provider base URL. Should include https:// prefix.
    /// Empty means league import is unavailable.
    pub api_domain: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for provider requests. Defaults to 30 seconds.
    pub http_timeout_seconds: u64,
    /// League data snapshot. Defaults to `league_data.json` next to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
    /// Season to import stats for, named by the year it ends in.
    /// Defaults to the season in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<i32>,
    /// Fantasy point weights
    pub scoring: ScoringRules,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: String::new(),
            log_file_path: None,
            http_timeout_seconds: crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS,
            data_file: None,
            season: None,
            scoring: ScoringRules::default(),
        }
    }
}

/// Returns the season a date falls into. Seasons start in September and are
/// named by the year they end in, so 2025-10-01 belongs to season 2026.
pub fn season_for_date(date: NaiveDate) -> i32 {
    if date.month() >= 9 {
        date.year() + 1
    } else {
        date.year()
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `LIIGA_FANTASY_API_DOMAIN` - Override API domain
    /// - `LIIGA_FANTASY_LOG_FILE` - Override log file path
    /// - `LIIGA_FANTASY_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    /// - `LIIGA_FANTASY_DATA_FILE` - Override league data file path
    ///
    /// # Notes
    /// - A missing config file yields defaults; nothing is written
    /// - Environment variables take precedence over config file
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(&get_config_path()).await
    }

    /// Reads `path` if it exists, then applies environment overrides and validates.
    pub(crate) async fn load_with_overrides(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path).await?
        } else {
            Config::default()
        };

        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            config.api_domain = api_domain;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        if let Ok(data_file) = std::env::var(env_vars::DATA_FILE) {
            config.data_file = Some(data_file);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.api_domain,
            &self.log_file_path,
            &self.data_file,
            self.http_timeout_seconds,
        )
    }

    /// Returns the API domain, or a config error when none is set.
    pub fn require_api_domain(&self) -> Result<&str, AppError> {
        if self.api_domain.trim().is_empty() {
            return Err(AppError::config_error(format!(
                "No API domain configured. Set one with --config <API_DOMAIN> or {}",
                env_vars::API_DOMAIN
            )));
        }
        Ok(&self.api_domain)
    }

    /// Where the league snapshot is read from and written to.
    pub fn data_file_path(&self) -> String {
        self.data_file
            .clone()
            .unwrap_or_else(get_default_data_file_path)
    }

    /// Configured season, or the one in progress today.
    pub fn season_or_current(&self) -> i32 {
        self.season
            .unwrap_or_else(|| season_for_date(Utc::now().date_naive()))
    }

    /// Saves current configuration to the default config file location.
    ///
    /// # Notes
    /// - Creates config directory if it doesn't exist
    /// - Ensures api_domain has https:// prefix
    /// - Uses TOML format for storage
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if !Path::new(&config_path).exists() {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            println!("(Defaults and environment overrides are in effect)");
        }

        let config = Config::load().await?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("API Domain:");
        if config.api_domain.is_empty() {
            println!("(not set)");
        } else {
            println!("{}", config.api_domain);
        }
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Season:");
        match config.season {
            Some(season) => println!("{season}"),
            None => println!("{} (current)", config.season_or_current()),
        }
        println!("────────────────────────────────────");
        println!("League Data File:");
        println!("{}", config.data_file_path());
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{LOG_FILE_NAME}");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and ensures a
    /// non-empty API domain has the https:// prefix.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let api_domain = if !self.api_domain.is_empty() && !self.api_domain.starts_with("https://")
        {
            format!("https://{}", self.api_domain.trim_start_matches("http://"))
        } else {
            self.api_domain.clone()
        };
        let content = toml::to_string_pretty(&Config {
            api_domain,
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
