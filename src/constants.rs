//! Application-wide constants and configuration values
//!
//! Defaults for the provider connection, cache lifetimes and the environment
//! variables that override the config file.

/// Default base address of the football data provider
pub const DEFAULT_API_BASE_URL: &str = "https://v3.football.api-sports.io";

/// Default value for the provider host header
pub const DEFAULT_API_HOST: &str = "v3.football.api-sports.io";

/// Default timeout for upstream HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Default number of entries the result cache holds before evicting the least recently used
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// Number of characters of an upstream body kept in debug logs and status errors
pub const RESPONSE_PREVIEW_CHARS: usize = 1024;

/// Request headers expected by the provider
pub mod headers {
    pub const API_HOST: &str = "x-rapidapi-host";
    pub const API_KEY: &str = "x-rapidapi-key";
}

/// Upper bound on league-by-id requests in flight for one `get_leagues` call
pub const MAX_CONCURRENT_LEAGUE_FETCHES: usize = 4;

/// Cache TTL for league and fixture-by-league results (12 hours)
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 43_200;

/// Environment variables that override config file values
pub mod env_vars {
    /// Provider credential. Required; never stored in the config file.
    pub const API_KEY: &str = "FOOTBALL_API_KEY";

    pub const API_HOST: &str = "FOOTBALL_API_HOST";

    pub const API_BASE_URL: &str = "FOOTBALL_API_BASE_URL";

    pub const LOG_FILE: &str = "FOOTBALL_LOG_FILE";

    /// HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "FOOTBALL_HTTP_TIMEOUT";

    /// Result cache TTL in seconds
    pub const CACHE_TTL: &str = "FOOTBALL_CACHE_TTL";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_values_are_twelve_hours() {
        assert_eq!(DEFAULT_CACHE_TTL_SECONDS, 12 * 60 * 60);
    }

    #[test]
    fn test_default_base_url_matches_host_header() {
        assert!(DEFAULT_API_BASE_URL.ends_with(DEFAULT_API_HOST));
        assert!(DEFAULT_API_BASE_URL.starts_with("https://"));
    }
}
