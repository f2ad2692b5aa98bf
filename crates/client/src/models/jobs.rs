//! Search job models for the Splunk search API.
//!
//! # What this module handles:
//! - Options for creating a search job
//! - Job status as reported by `GET /services/search/jobs/<sid>`
//! - Folding Splunk's dispatch states into the client-visible lifecycle
//!
//! # What this module does NOT handle:
//! - HTTP transport (see [`crate::client`])
//! - Result set parsing; results are returned as raw bytes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::common::SplunkMessage;

/// Options for creating a search job.
#[derive(Debug, Clone, Default)]
pub struct CreateJobOptions {
    /// Earliest time for search (e.g., "-24h", "2024-01-01T00:00:00").
    pub earliest_time: Option<String>,
    /// Latest time for search (e.g., "now").
    pub latest_time: Option<String>,
    /// Whether the create call returns immediately or blocks until done.
    pub exec_mode: Option<ExecMode>,
    /// Maximum number of results the job retains.
    pub max_count: Option<u64>,
    /// Search mode (normal or realtime).
    pub search_mode: Option<SearchMode>,
    /// Caller-chosen search id. Splunk assigns one when absent.
    pub id: Option<String>,
}

impl CreateJobOptions {
    /// Form parameters for `POST /services/search/jobs`, excluding `search`.
    ///
    /// Empty time bounds are skipped since Splunk rejects them with a 400.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(earliest) = self.earliest_time.as_deref().map(str::trim)
            && !earliest.is_empty()
        {
            params.push(("earliest_time", earliest.to_string()));
        }
        if let Some(latest) = self.latest_time.as_deref().map(str::trim)
            && !latest.is_empty()
        {
            params.push(("latest_time", latest.to_string()));
        }
        if let Some(mode) = self.exec_mode {
            params.push(("exec_mode", mode.to_string()));
        }
        if let Some(max_count) = self.max_count {
            params.push(("max_count", max_count.to_string()));
        }
        if let Some(mode) = self.search_mode {
            params.push(("search_mode", mode.to_string()));
        }
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            params.push(("id", id.to_string()));
        }

        params
    }
}

/// Execution mode for job creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecMode {
    /// Return the sid immediately; the job runs asynchronously.
    #[default]
    Normal,
    /// Return only after the job has finished.
    Blocking,
}

impl fmt::Display for ExecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecMode::Normal => write!(f, "normal"),
            ExecMode::Blocking => write!(f, "blocking"),
        }
    }
}

/// Search mode for search jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Normal,
    Realtime,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Normal => write!(f, "normal"),
            SearchMode::Realtime => write!(f, "realtime"),
        }
    }
}

/// Splunk's `dispatchState` for a search job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DispatchState {
    Queued,
    Parsing,
    Running,
    Paused,
    Finalizing,
    Failed,
    Done,
    /// A state this client does not know about, kept verbatim.
    Unknown(String),
}

impl Default for DispatchState {
    fn default() -> Self {
        DispatchState::Unknown(String::new())
    }
}

impl From<String> for DispatchState {
    fn from(s: String) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "QUEUED" => DispatchState::Queued,
            "PARSING" => DispatchState::Parsing,
            "RUNNING" => DispatchState::Running,
            "PAUSED" => DispatchState::Paused,
            "FINALIZING" => DispatchState::Finalizing,
            "FAILED" => DispatchState::Failed,
            "DONE" => DispatchState::Done,
            _ => DispatchState::Unknown(s),
        }
    }
}

impl DispatchState {
    /// DONE and FAILED are terminal; nothing else is.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DispatchState::Done | DispatchState::Failed)
    }
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchState::Queued => write!(f, "QUEUED"),
            DispatchState::Parsing => write!(f, "PARSING"),
            DispatchState::Running => write!(f, "RUNNING"),
            DispatchState::Paused => write!(f, "PAUSED"),
            DispatchState::Finalizing => write!(f, "FINALIZING"),
            DispatchState::Failed => write!(f, "FAILED"),
            DispatchState::Done => write!(f, "DONE"),
            DispatchState::Unknown(s) => write!(f, "{}", s),
        }
    }
}

/// Client-visible lifecycle of a search job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Submitted but not yet executing.
    Created,
    Running,
    Done,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Done | JobState::Failed)
    }
}

/// Search job status (from `entry[0].content`).
#[derive(Debug, Deserialize, Clone)]
pub struct SearchJobStatus {
    #[serde(default)]
    pub sid: String,
    #[serde(rename = "dispatchState", default)]
    pub dispatch_state: DispatchState,
    #[serde(
        rename = "isDone",
        default,
        deserialize_with = "crate::serde_helpers::bool_from_flag"
    )]
    pub is_done: bool,
    #[serde(
        rename = "isFailed",
        default,
        deserialize_with = "crate::serde_helpers::bool_from_flag"
    )]
    pub is_failed: bool,
    #[serde(
        rename = "isFinalized",
        default,
        deserialize_with = "crate::serde_helpers::bool_from_flag"
    )]
    pub is_finalized: bool,
    #[serde(
        rename = "doneProgress",
        default,
        deserialize_with = "crate::serde_helpers::f64_from_string_or_number"
    )]
    pub done_progress: f64,
    #[serde(
        rename = "runDuration",
        default,
        deserialize_with = "crate::serde_helpers::f64_from_string_or_number"
    )]
    pub run_duration: f64,
    #[serde(
        rename = "eventCount",
        default,
        deserialize_with = "crate::serde_helpers::u64_from_string_or_number"
    )]
    pub event_count: u64,
    #[serde(
        rename = "resultCount",
        default,
        deserialize_with = "crate::serde_helpers::u64_from_string_or_number"
    )]
    pub result_count: u64,
    #[serde(
        rename = "scanCount",
        default,
        deserialize_with = "crate::serde_helpers::u64_from_string_or_number"
    )]
    pub scan_count: u64,
    #[serde(default)]
    pub messages: Vec<SplunkMessage>,
    #[serde(default)]
    pub label: Option<String>,
}

impl SearchJobStatus {
    /// Fold dispatch state and flags into a [`JobState`].
    ///
    /// Failure wins over completion: Splunk marks failed jobs `isDone` too.
    pub fn state(&self) -> JobState {
        if self.is_failed || self.dispatch_state == DispatchState::Failed {
            return JobState::Failed;
        }
        if self.is_done || self.dispatch_state == DispatchState::Done {
            return JobState::Done;
        }
        match self.dispatch_state {
            DispatchState::Queued | DispatchState::Parsing => JobState::Created,
            DispatchState::Running | DispatchState::Paused | DispatchState::Finalizing => {
                JobState::Running
            }
            _ if self.done_progress > 0.0 => JobState::Running,
            _ => JobState::Created,
        }
    }

    /// Error/fatal messages joined for display, or a generic fallback.
    pub fn failure_message(&self) -> String {
        let joined = self
            .messages
            .iter()
            .filter(|m| m.message_type.is_error())
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        if joined.is_empty() {
            format!("dispatch state {}", self.dispatch_state)
        } else {
            joined
        }
    }
}
