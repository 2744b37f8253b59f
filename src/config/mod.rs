use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the gateway.
/// File settings live in TOML; the provider credential is read from the environment only.
#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base address of the provider, including the https:// prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Value sent in the provider host header.
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// Provider credential. Never serialized.
    #[serde(skip)]
    pub api_key: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for upstream requests. Defaults to 10 seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Lifetime of cached league and fixture results in seconds. Defaults to 12 hours.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// Maximum number of cached results.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_api_base_url() -> String {
    constants::DEFAULT_API_BASE_URL.to_string()
}

fn default_api_host() -> String {
    constants::DEFAULT_API_HOST.to_string()
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_cache_ttl() -> u64 {
    constants::DEFAULT_CACHE_TTL_SECONDS
}

fn default_cache_capacity() -> usize {
    constants::DEFAULT_CACHE_CAPACITY
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: default_api_base_url(),
            api_host: default_api_host(),
            api_key: String::new(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            cache_ttl_seconds: default_cache_ttl(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("api_host", &self.api_host)
            .field("api_key", &self.masked_api_key())
            .field("log_file_path", &self.log_file_path)
            .field("http_timeout_seconds", &self.http_timeout_seconds)
            .field("cache_ttl_seconds", &self.cache_ttl_seconds)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// A missing file is not an error: defaults are used and environment variables
    /// fill in the rest.
    ///
    /// # Environment Variables
    /// - `FOOTBALL_API_KEY` - Provider credential (required)
    /// - `FOOTBALL_API_HOST` - Override provider host header
    /// - `FOOTBALL_API_BASE_URL` - Override provider base address
    /// - `FOOTBALL_LOG_FILE` - Override log file path
    /// - `FOOTBALL_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 10)
    /// - `FOOTBALL_CACHE_TTL` - Override cache TTL in seconds (default: 43200)
    ///
    /// # Returns
    /// * `Ok(Config)` - Loaded and validated configuration
    /// * `Err(AppError::Config)` - The credential is missing or a setting is invalid
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_env(&get_config_path()).await
    }

    /// Loads the file at `path` (if present), applies environment overrides and validates.
    pub async fn load_with_env(path: &str) -> Result<Self, AppError> {
        let config = Self::load_unvalidated(path).await?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the file at `path` (if present) and applies environment overrides, without
    /// requiring the credential. Used where settings matter before a client is built.
    pub async fn load_unvalidated(path: &str) -> Result<Self, AppError> {
        let mut config = Self::read_or_default(path).await?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    async fn read_or_default(path: &str) -> Result<Self, AppError> {
        if Path::new(path).exists() {
            Self::load_from_path(path).await
        } else {
            Ok(Config::default())
        }
    }

    /// Applies overrides from a variable lookup. Unparseable numeric values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(env_vars::API_KEY) {
            self.api_key = api_key.trim().to_string();
        }

        if let Some(api_host) = lookup(env_vars::API_HOST) {
            self.api_host = api_host;
        }

        if let Some(api_base_url) = lookup(env_vars::API_BASE_URL) {
            self.api_base_url = api_base_url;
        }

        if let Some(log_file_path) = lookup(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = lookup(env_vars::HTTP_TIMEOUT).and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Some(ttl) = lookup(env_vars::CACHE_TTL).and_then(|s| s.parse::<u64>().ok()) {
            self.cache_ttl_seconds = ttl;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Credential with everything but the last four characters hidden
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            return "(not set)".to_string();
        }
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to_path(&get_config_path()).await
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist. The credential is never written.
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
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads the file settings from a custom path without environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays the effective configuration (file plus environment) to stdout.
    /// Does not require the credential to be present.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let config = Self::load_unvalidated(&config_path).await?;

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        if !Path::new(&config_path).exists() {
            println!("(Not created, using defaults)");
        }
        println!("────────────────────────────────────");
        println!("API Base URL:");
        println!("{}", config.api_base_url);
        println!("API Host:");
        println!("{}", config.api_host);
        println!("API Key ({}):", env_vars::API_KEY);
        println!("{}", config.masked_api_key());
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("Cache TTL / Capacity:");
        println!(
            "{} seconds / {} entries",
            config.cache_ttl_seconds, config.cache_capacity
        );
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{}/football_gateway.log", get_log_dir_path());
            println!("(Default location)");
        }

        Ok(())
    }
}
