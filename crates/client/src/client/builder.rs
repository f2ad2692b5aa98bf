//! Client builder for constructing [`SearchClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API over [`ClientConfig`] and credentials
//! - Rejecting missing credentials before any request is made
//!
//! # What this module does NOT handle:
//! - URL validation and executor construction (handled by [`ClientConfig`])
//! - The credential probe itself (handled by [`SearchClient::connect`])

use std::time::Duration;

use secrecy::SecretString;

use crate::cancellation::CancellationToken;
use crate::client::SearchClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Builder for creating a new [`SearchClient`].
///
/// All options have defaults except `base_url` and the credentials.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use splunk_search_client::{CancellationToken, SearchClient};
///
/// let client = SearchClient::builder()
///     .base_url("https://localhost:8089")
///     .credentials("admin", "changeme")
///     .timeout(Duration::from_secs(60))
///     .connect(&CancellationToken::new())
///     .await?;
/// ```
#[derive(Debug, Default)]
pub struct SearchClientBuilder {
    config: ClientConfig,
    username: Option<String>,
    password: Option<SecretString>,
}

impl SearchClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            config: config.clone(),
            ..Self::default()
        }
    }

    /// Set the base URL of the Splunk management API, e.g. `https://localhost:8089`.
    ///
    /// Trailing slashes are removed at connect time.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::new(password.into().into()));
        self
    }

    /// Set username and password together.
    pub fn credentials(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username(username).password(password)
    }

    /// Use a custom HTTP executor instead of the default one.
    ///
    /// `timeout` and `skip_verify` are ignored when an executor is supplied.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.config.http_client = Some(client);
        self
    }

    /// Set the request timeout for the default executor.
    ///
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.config.skip_verify = skip;
        self
    }

    /// Record request metrics through `metrics`.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.config.metrics = Some(metrics);
        self
    }

    /// The configuration assembled so far.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the client and verify its credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidConfig`] if username or password was not
    /// provided, plus every error [`SearchClient::connect`] can return.
    pub async fn connect(self, ctx: &CancellationToken) -> Result<SearchClient> {
        let username = self
            .username
            .ok_or_else(|| ClientError::InvalidConfig("username is required".to_string()))?;
        let password = self
            .password
            .ok_or_else(|| ClientError::InvalidConfig("password is required".to_string()))?;

        SearchClient::connect(ctx, &username, &password, &self.config).await
    }
}
