//! HTTP client creation and configuration utilities

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::Config;
use crate::constants::{self, headers};
use crate::error::AppError;

/// Creates the provider HTTP client: connection pooling, a per-request timeout and the
/// provider's host and credential headers attached to every request.
///
/// # Errors
/// * `AppError::Config` - The credential is missing or not a valid header value
/// * `AppError::Transport` - reqwest could not build the client (TLS backend failure)
pub fn create_http_client(config: &Config) -> Result<Client, AppError> {
    if config.api_key.trim().is_empty() {
        return Err(AppError::config_error(format!(
            "{} is not set; cannot build the provider client",
            constants::env_vars::API_KEY
        )));
    }

    let mut default_headers = HeaderMap::new();
    let host = HeaderValue::from_str(&config.api_host)
        .map_err(|e| AppError::config_error(format!("Invalid API host header: {e}")))?;
    let mut key = HeaderValue::from_str(&config.api_key)
        .map_err(|_| AppError::config_error("API key contains characters not allowed in a header"))?;
    key.set_sensitive(true);
    default_headers.insert(headers::API_HOST, host);
    default_headers.insert(headers::API_KEY, key);

    let client = Client::builder()
        .timeout(config.http_timeout())
        .pool_max_idle_per_host(constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .default_headers(default_headers)
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_api_key() {
        let config = Config::default();
        let err = create_http_client(&config).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_client_rejects_header_unsafe_key() {
        let config = Config {
            api_key: "bad\nkey".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            create_http_client(&config),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_client_builds_with_valid_config() {
        let config = Config {
            api_key: "abc123".to_string(),
            ..Config::default()
        };
        assert!(create_http_client(&config).is_ok());
    }
}
