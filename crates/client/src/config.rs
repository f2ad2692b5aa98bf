//! Connection configuration for [`crate::SearchClient`].
//!
//! This module is responsible for:
//! - Holding the base URL and the optional custom HTTP executor
//! - Validating and normalizing the base URL
//! - Building the default `reqwest::Client` when none is supplied
//!
//! # What this module does NOT handle:
//! - Credentials (passed to [`crate::SearchClient::connect`] directly)
//! - Loading configuration from files or the environment
//!
//! # Invariants
//! - A validated base URL is absolute, `http` or `https`, and has no trailing slash
//! - The client takes a copy of the config; later caller mutation is not observed

use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default base for Splunk Web deep links.
///
/// Splunk Web usually runs on a different port (or host) than the
/// management API, so links are never derived from the API base URL.
pub const DEFAULT_UI_BASE_URL: &str = "http://localhost";

/// Default polling interval for job status checks in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default maximum time to wait for search job completion in seconds.
pub const DEFAULT_MAX_WAIT_SECS: u64 = 300;

/// Configuration for a Splunk management API connection.
///
/// If `http_client` is `None`, a default executor is built at connect time
/// using `timeout` and `skip_verify`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Splunk management API, e.g. `https://localhost:8089`.
    pub base_url: String,
    /// Custom HTTP executor. Its own timeout/TLS settings take precedence.
    pub http_client: Option<reqwest::Client>,
    /// Request timeout for the default executor.
    pub timeout: Duration,
    /// Accept invalid TLS certificates (default executor only).
    pub skip_verify: bool,
    /// Optional request metrics.
    pub metrics: Option<MetricsCollector>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            http_client: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            skip_verify: false,
            metrics: None,
        }
    }
}

impl ClientConfig {
    /// Create a config for `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Use a custom HTTP executor.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Validate and normalize the base URL.
    ///
    /// # Examples
    ///
    /// - `"https://localhost:8089/"` -> `"https://localhost:8089"`
    /// - `"https://example.com:8089//"` -> `"https://example.com:8089"`
    pub(crate) fn normalized_base_url(&self) -> Result<String> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is required".to_string()));
        }

        let parsed = url::Url::parse(trimmed)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ClientError::InvalidUrl(format!(
                    "{}: unsupported scheme '{}'",
                    trimmed, other
                )));
            }
        }
        if !parsed.has_host() {
            return Err(ClientError::InvalidUrl(format!("{}: missing host", trimmed)));
        }

        Ok(trimmed.to_string())
    }

    /// Return the configured executor, or build the default one.
    pub(crate) fn http_client(&self, base_url: &str) -> Result<reqwest::Client> {
        if let Some(client) = &self.http_client {
            return Ok(client.clone());
        }

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                builder = builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        builder.build().map_err(|source| ClientError::Transport {
            context: "building HTTP client".to_string(),
            source,
        })
    }
}
