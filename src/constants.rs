//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers and configuration constants
//! shared by the config, provider and draft modules.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "liiga_fantasy";

/// Default log file name
pub const LOG_FILE_NAME: &str = "liiga_fantasy.log";

/// Default league data snapshot file name
pub const DATA_FILE_NAME: &str = "league_data.json";

/// Draft rules
pub mod draft {
    /// A draft needs at least this many teams
    pub const MIN_TEAMS: usize = 2;
}

/// Standings are reported with this many decimals
pub const SCORE_DECIMALS: i32 = 2;

/// Environment variable names
pub mod env_vars {
    /// Environment variable for provider API domain override
    pub const API_DOMAIN: &str = "LIIGA_FANTASY_API_DOMAIN";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "LIIGA_FANTASY_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "LIIGA_FANTASY_HTTP_TIMEOUT";

    /// Environment variable for the league data file override
    pub const DATA_FILE: &str = "LIIGA_FANTASY_DATA_FILE";
}

/// Retry configuration for provider requests
pub mod retry {
    /// Maximum number of retries after the first attempt
    pub const MAX_RETRIES: u32 = 3;

    /// Initial backoff, doubled after every retry (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;

    /// Upper bound for a single wait, including provider `Retry-After` values (milliseconds)
    pub const MAX_DELAY_MS: u64 = 30_000;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_constants_are_reasonable() {
        assert!(retry::MAX_RETRIES > 0);
        assert!(retry::MAX_DELAY_MS >= retry::BASE_DELAY_MS);
        // Worst case total backoff stays well under the HTTP timeout
        let worst_case_ms: u64 = (0..retry::MAX_RETRIES)
            .map(|attempt| retry::BASE_DELAY_MS << attempt)
            .sum();
        assert!(worst_case_ms < DEFAULT_HTTP_TIMEOUT_SECONDS * 1000);
    }

    #[test]
    fn test_env_var_names_share_prefix() {
        for name in [
            env_vars::API_DOMAIN,
            env_vars::LOG_FILE,
            env_vars::HTTP_TIMEOUT,
            env_vars::DATA_FILE,
        ] {
            assert!(name.starts_with("LIIGA_FANTASY_"), "{name}");
        }
    }
}
