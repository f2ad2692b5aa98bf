//! Splunk search job client.
//!
//! This module provides [`SearchClient`], which owns the connection
//! configuration and the precomputed basic auth token, and is the single
//! place where outbound requests are built, signed and dispatched.
//!
//! # Submodules
//! - [`builder`]: Fluent client construction
//! - `request`: Request construction, authentication and dispatch
//! - `jobs`: Search job REST operations
//!
//! # What this module does NOT handle:
//! - Retries: every call is a single round trip and failures are returned
//! - Caching: job status is fetched from the server every time
//!
//! # Invariants
//! - A `SearchClient` only exists after a successful credential probe
//! - `base_url` and the auth token never change after construction

pub mod builder;
mod jobs;
mod request;

use std::sync::Arc;

use reqwest::Method;
use secrecy::SecretString;
use tracing::debug;

use crate::auth::BasicAuth;
use crate::cancellation::CancellationToken;
use crate::config::ClientConfig;
use crate::endpoints::{self, AUTH_CONTEXT_PATH};
use crate::error::{ClientError, Result};
use crate::job::SearchJob;
use crate::metrics::MetricsCollector;
use crate::models::AuthContext;

pub use request::FORM_CONTENT_TYPE;

/// Splunk REST API client for search jobs.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use splunk_search_client::{CancellationToken, SearchClient};
///
/// let ctx = CancellationToken::new();
/// let client = SearchClient::builder()
///     .base_url("https://localhost:8089")
///     .credentials("admin", "changeme")
///     .connect(&ctx)
///     .await?;
/// ```
///
/// Share one client between tasks with `Arc<SearchClient>`; all of its
/// state is immutable.
#[derive(Debug)]
pub struct SearchClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth: BasicAuth,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl SearchClient {
    /// Create a new client builder.
    pub fn builder() -> builder::SearchClientBuilder {
        builder::SearchClientBuilder::new()
    }

    /// Create a client and verify the credentials against
    /// `/services/authentication/current-context`.
    ///
    /// `config` is cloned; changing it afterwards does not affect the client.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidConfig`] for empty credentials
    /// - [`ClientError::InvalidUrl`] for a missing or invalid base URL
    /// - [`ClientError::Transport`] if the probe could not be sent
    /// - [`ClientError::AuthFailed`] if the probe returned anything but 200
    pub async fn connect(
        ctx: &CancellationToken,
        username: &str,
        password: &SecretString,
        config: &ClientConfig,
    ) -> Result<Self> {
        let config = config.clone();
        let base_url = config.normalized_base_url()?;
        let auth = BasicAuth::new(username, password)?;
        let http = config.http_client(&base_url)?;

        let client = Self {
            http,
            base_url,
            auth,
            metrics: config.metrics,
        };

        debug!(base_url = %client.base_url, username, "Verifying Splunk credentials");

        let response = client
            .send(ctx, Method::GET, AUTH_CONTEXT_PATH, &[])
            .await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(ClientError::AuthFailed { status });
        }

        Ok(client)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bind a handle to an existing search job.
    pub fn job(self: &Arc<Self>, sid: impl Into<String>) -> SearchJob {
        SearchJob::new(Arc::clone(self), sid)
    }

    /// Fetch the identity Splunk associates with this client's credentials.
    pub async fn current_context(&self, ctx: &CancellationToken) -> Result<AuthContext> {
        let response = self
            .send(ctx, Method::GET, AUTH_CONTEXT_PATH, &[])
            .await?;
        let response = endpoints::expect_status(response, &[200]).await?;
        let body = endpoints::json_body(response, "current-context").await?;
        let content = endpoints::extract_entry_content(&body)?;

        serde_json::from_value(content.clone()).map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to parse auth context: {}", e))
        })
    }

    /// Build a client without the credential probe, for unit tests that
    /// never touch the network.
    #[cfg(test)]
    pub(crate) fn unverified(base_url: &str) -> Self {
        let password = SecretString::new("changeme".to_string().into());
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: BasicAuth::new("admin", &password).expect("static credentials are valid"),
            metrics: None,
        }
    }
}
