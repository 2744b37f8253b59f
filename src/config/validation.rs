use super::Config;
use crate::constants::env_vars;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - The API credential must be present (it only ever comes from the environment)
/// - The base URL must be an http(s) URL
/// - The host header value cannot be empty
/// - HTTP timeout and cache capacity must be positive
/// - If a log file path is provided, it cannot be empty and its parent must be creatable
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    if config.api_key.trim().is_empty() {
        return Err(AppError::config_error(format!(
            "{} is not set; the provider credential is required",
            env_vars::API_KEY
        )));
    }

    if !config.api_base_url.starts_with("http://") && !config.api_base_url.starts_with("https://")
    {
        return Err(AppError::config_error(format!(
            "API base URL must start with http:// or https:// (got '{}')",
            config.api_base_url
        )));
    }

    if config.api_host.trim().is_empty() {
        return Err(AppError::config_error("API host cannot be empty"));
    }

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least one second",
        ));
    }

    if config.cache_capacity == 0 {
        return Err(AppError::config_error("Cache capacity must be positive"));
    }

    if let Some(log_path) = &config.log_file_path {
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

    Ok(())
}
