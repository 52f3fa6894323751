use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API domain may be empty (import is then unavailable), otherwise it must
///   look like a URL or domain name
/// - If log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
/// - Data file path, if provided, cannot be empty
/// - HTTP timeout must be at least one second
pub fn validate_config(
    api_domain: &str,
    log_file_path: &Option<String>,
    data_file: &Option<String>,
    http_timeout_seconds: u64,
) -> Result<(), AppError> {
    if !api_domain.is_empty()
        && !api_domain.starts_with("http://")
        && !api_domain.starts_with("https://")
        && !api_domain.contains('.')
        && !api_domain.starts_with("localhost")
    {
        return Err(AppError::config_error(
            "API domain must be a valid URL or domain name",
        ));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    if let Some(data_file) = data_file
        && data_file.is_empty()
    {
        return Err(AppError::config_error("Data file path cannot be empty"));
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    Ok(())
}
