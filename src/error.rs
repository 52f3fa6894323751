use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch data from provider: {0}")]
    ApiFetch(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    ApiParse(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("Provider resource not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("Provider server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Provider client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Provider rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("Provider service unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Data parsing and validation errors
    #[error("Provider returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("Provider returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("Provider returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    // League and draft rules
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("League not found: {league_id}")]
    LeagueNotFound { league_id: String },

    #[error("Team not found: {team_id}")]
    TeamNotFound { team_id: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Draft not found: {draft_id}")]
    DraftNotFound { draft_id: String },

    #[error("League {league_id} needs at least 2 teams to draft, found {found}")]
    NotEnoughTeams { league_id: String, found: usize },

    #[error("A draft already exists for league {league_id}")]
    DraftAlreadyExists { league_id: String },

    #[error("Draft {draft_id} is not in progress")]
    DraftNotActive { draft_id: String },

    #[error("Pick {pick_number} belongs to team {expected}, not {actual}")]
    NotYourTurn {
        pick_number: u32,
        expected: String,
        actual: String,
    },

    #[error("Player {player_id} is already rostered in league {league_id}")]
    PlayerAlreadyRostered {
        player_id: String,
        league_id: String,
    },

    #[error("Draft {draft_id} moved on before pick {pick_number} could be saved")]
    PickConflict { draft_id: String, pick_number: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("League data file '{path}' is unreadable: {message}")]
    DataFile { path: String, message: String },
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a league data file error naming the file
    pub fn data_file_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataFile {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error (out-of-range counts, zero participants)
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn league_not_found(league_id: impl Into<String>) -> Self {
        Self::LeagueNotFound {
            league_id: league_id.into(),
        }
    }

    pub fn team_not_found(team_id: impl Into<String>) -> Self {
        Self::TeamNotFound {
            team_id: team_id.into(),
        }
    }

    pub fn player_not_found(player_id: impl Into<String>) -> Self {
        Self::PlayerNotFound {
            player_id: player_id.into(),
        }
    }

    pub fn draft_not_found(draft_id: impl Into<String>) -> Self {
        Self::DraftNotFound {
            draft_id: draft_id.into(),
        }
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API service unavailable error
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Check if error is retryable (network issues, server errors, rate limits)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::ApiServerError { .. }
                | AppError::ApiServiceUnavailable { .. }
                | AppError::ApiRateLimit { .. }
        )
    }

    /// Check if error indicates a missing resource (404-equivalent)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::ApiNotFound { .. }
                | AppError::ApiNoData { .. }
                | AppError::LeagueNotFound { .. }
                | AppError::TeamNotFound { .. }
                | AppError::PlayerNotFound { .. }
                | AppError::DraftNotFound { .. }
        )
    }

    /// Check if error is a rejected request (400-equivalent): the caller broke
    /// a league or draft rule rather than something failing underneath.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            AppError::InvalidInput(_)
                | AppError::NotEnoughTeams { .. }
                | AppError::DraftAlreadyExists { .. }
                | AppError::DraftNotActive { .. }
                | AppError::NotYourTurn { .. }
                | AppError::PlayerAlreadyRostered { .. }
                | AppError::PickConflict { .. }
        )
    }
}
