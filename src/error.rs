use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Startup configuration
    #[error("Configuration error: {0}")]
    Config(String),

    // Transport-level failures talking to the provider
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    #[error("Failed to fetch data from API: {0}")]
    Transport(#[source] Arc<reqwest::Error>),

    // The provider answered, but not with 2xx
    #[error("Upstream returned HTTP {status}: {body} (URL: {url})")]
    UpstreamStatus {
        status: u16,
        body: String,
        url: String,
    },

    // The provider answered 2xx but rejected the query in its envelope
    #[error("Upstream rejected '{endpoint}' query: {}", .errors.join("; "))]
    UpstreamLogical {
        endpoint: String,
        errors: Vec<String>,
    },

    // The payload did not match the expected shape
    #[error("Failed to map '{endpoint}' response at {field}: {message}")]
    Mapping {
        endpoint: String,
        field: String,
        message: String,
    },

    // Caller input rejected before any upstream call
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(Arc::new(e))
    }
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

    /// Create an error for a non-success HTTP status
    pub fn upstream_status(status: u16, body: impl Into<String>, url: impl Into<String>) -> Self {
        Self::UpstreamStatus {
            status,
            body: body.into(),
            url: url.into(),
        }
    }

    /// Create an error for application-level errors reported inside the envelope
    pub fn upstream_logical(endpoint: impl Into<String>, errors: Vec<String>) -> Self {
        Self::UpstreamLogical {
            endpoint: endpoint.into(),
            errors,
        }
    }

    /// Create an error for caller input that cannot form a valid query
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Takes an error out of a load outcome shared between concurrent callers.
    /// The last holder gets the original; the others get an equivalent copy.
    pub fn from_shared(error: Arc<AppError>) -> Self {
        Arc::try_unwrap(error).unwrap_or_else(|shared| shared.duplicate())
    }

    /// Same variant and fields. Sources that cannot be cloned keep their message.
    pub fn duplicate(&self) -> Self {
        match self {
            AppError::Config(msg) => AppError::Config(msg.clone()),
            AppError::NetworkTimeout { url } => AppError::network_timeout(url.as_str()),
            AppError::NetworkConnection { url, message } => {
                AppError::network_connection(url.as_str(), message.as_str())
            }
            AppError::Transport(e) => AppError::Transport(Arc::clone(e)),
            AppError::UpstreamStatus { status, body, url } => {
                AppError::upstream_status(*status, body.as_str(), url.as_str())
            }
            AppError::UpstreamLogical { endpoint, errors } => {
                AppError::upstream_logical(endpoint.as_str(), errors.clone())
            }
            AppError::Mapping {
                endpoint,
                field,
                message,
            } => AppError::mapping(endpoint.as_str(), field.as_str(), message.as_str()),
            AppError::InvalidQuery(msg) => AppError::InvalidQuery(msg.clone()),
            AppError::Io(e) => AppError::Io(std::io::Error::new(e.kind(), e.to_string())),
            AppError::TomlSerialize(e) => {
                AppError::TomlSerialize(serde::ser::Error::custom(e.to_string()))
            }
            AppError::TomlDeserialize(e) => {
                AppError::TomlDeserialize(serde::de::Error::custom(e.to_string()))
            }
            AppError::Json(e) => AppError::Json(serde::de::Error::custom(e.to_string())),
            AppError::LogSetup(msg) => AppError::LogSetup(msg.clone()),
        }
    }

    /// Create a mapping error naming the offending field
    pub fn mapping(
        endpoint: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Mapping {
            endpoint: endpoint.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for failures that happened before any HTTP status was received
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::Transport(_)
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::UpstreamStatus { status, .. } => Some(*status),
            AppError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the provider signalled rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status_code() == Some(429)
    }

    /// Advisory classification for callers that implement their own retry policy.
    /// The gateway itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::NetworkTimeout { .. } | AppError::NetworkConnection { .. } => true,
            AppError::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
