//! Authenticated access to the football data provider.

use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

use super::http_client::create_http_client;
use super::urls::build_endpoint_url;
use crate::config::Config;
use crate::constants::RESPONSE_PREVIEW_CHARS;
use crate::data_fetcher::models::Endpoint;
use crate::error::AppError;

/// Issues GET requests against the provider and classifies the outcome.
///
/// The client performs no retries: the provider enforces its own rate limits and a
/// retry here would only multiply the pressure. The body of a successful response is
/// returned untouched for the mapper.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: String,
}

impl UpstreamClient {
    /// Builds the client from configuration. Fails if the credential is absent.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            http: create_http_client(config)?,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `GET {base}/{endpoint}?{params}` and returns the raw body.
    ///
    /// # Errors
    /// * `AppError::NetworkTimeout` - The request did not finish within the timeout
    /// * `AppError::NetworkConnection` - The provider could not be reached
    /// * `AppError::Transport` - Any other transport failure
    /// * `AppError::UpstreamStatus` - Any non-2xx status; carries the body for diagnostics
    #[instrument(skip(self, endpoint, params), fields(endpoint = %endpoint))]
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<String, AppError> {
        let request = self
            .http
            .get(build_endpoint_url(&self.base_url, endpoint))
            .query(params)
            .build()?;
        let url = request.url().to_string();

        info!("Fetching data from URL: {url}");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| classify_transport_error(e, &url))?;

        let status = response.status();
        debug!("Response status: {status}");

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body.chars().take(RESPONSE_PREVIEW_CHARS).collect(),
                Err(e) => {
                    warn!("Failed to read error response body from {}: {}", url, e);
                    format!("<unreadable response body: {e}>")
                }
            };
            error!("HTTP {} from upstream (URL: {}): {}", status.as_u16(), url, body);
            return Err(AppError::upstream_status(status.as_u16(), body, url));
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(e, &url))?;

        debug!("Response length: {} bytes", body.len());
        let preview: String = body.chars().take(RESPONSE_PREVIEW_CHARS).collect();
        debug!("Response text (first {RESPONSE_PREVIEW_CHARS} chars): {preview}");

        Ok(body)
    }
}

fn classify_transport_error(e: reqwest::Error, url: &str) -> AppError {
    error!("Request failed for URL {}: {}", url, e);
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::from(e)
    }
}
