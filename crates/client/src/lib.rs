//! Splunk search job REST API client.
//!
//! This crate authenticates against the Splunk management API with basic
//! credentials, verifies them once at construction, and manages the
//! lifecycle of asynchronous search jobs: submission, status polling,
//! Splunk Web deep links and deletion.

mod auth;
pub mod cancellation;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod job;
pub mod metrics;
pub mod models;
mod serde_helpers;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::BasicAuth;
pub use cancellation::CancellationToken;
pub use client::SearchClient;
pub use client::builder::SearchClientBuilder;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use job::{SearchJob, search_url};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{
    AuthContext, CreateJobOptions, DispatchState, ExecMode, JobState, SearchJobStatus,
    SearchMode, SplunkMessage,
};
