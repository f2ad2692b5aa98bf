//! Data models for Splunk API responses and requests.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod auth;
pub mod common;
pub mod jobs;

pub use auth::AuthContext;
pub use common::{MessageType, SplunkMessage, SplunkMessages};
pub use jobs::{CreateJobOptions, DispatchState, ExecMode, JobState, SearchJobStatus, SearchMode};
