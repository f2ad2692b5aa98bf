//! Error types for the search job client.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during search job client operations.
///
/// The client never retries or logs these; they are always returned to the
/// caller, who decides whether an operation is worth repeating.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid client configuration (e.g. empty credentials).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Missing or unparsable URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The construction-time credential probe was rejected.
    #[error("Authentication failed, response code: {status}")]
    AuthFailed { status: u16 },

    /// Network, DNS, TLS or timeout failure while talking to the server.
    #[error("HTTP error during {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The caller's cancellation token fired before the request completed.
    #[error("Request cancelled: {context}")]
    Cancelled { context: String },

    /// Unexpected status code from the Splunk REST API.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// Invalid response format from Splunk.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// A search job reached the FAILED dispatch state.
    #[error("Search job {sid} failed: {message}")]
    JobFailed { sid: String, message: String },

    /// An operation exceeded its caller-supplied time budget.
    #[error("Operation '{operation}' timed out after {timeout:?}")]
    OperationTimeout {
        operation: &'static str,
        timeout: Duration,
    },
}

impl ClientError {
    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthFailed { status } | Self::ApiError { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is retryable.
    ///
    /// This is a classification aid for callers only; the client itself
    /// never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::OperationTimeout { .. } => true,
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::AuthFailed { .. } => true,
            Self::ApiError { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }

    /// Check if this error came from a transport-level timeout or an
    /// exceeded operation budget.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source.is_timeout(),
            Self::OperationTimeout { .. } => true,
            _ => false,
        }
    }

    /// Check if this error was caused by caller cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
