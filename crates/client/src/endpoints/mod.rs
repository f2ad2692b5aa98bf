//! REST API endpoint paths and response helpers.
//!
//! # What this module handles:
//! - Endpoint path constants and per-job path construction
//! - Percent-encoding of job ids as path segments
//! - Turning unexpected responses into [`crate::ClientError::ApiError`]
//! - Extracting `entry[0].content` from Splunk's Atom-style JSON
//!
//! # What this module does NOT handle:
//! - Request construction or authentication (see [`crate::client`])

mod response;
pub mod url_encoding;

pub(crate) use response::{expect_status, extract_entry_content, json_body};
pub use url_encoding::encode_path_segment;

use crate::error::{ClientError, Result};

/// Current authentication context; used as the credential probe.
pub const AUTH_CONTEXT_PATH: &str = "/services/authentication/current-context";

/// Search jobs collection.
pub const SEARCH_JOBS_PATH: &str = "/services/search/jobs";

/// Path of the Splunk Web search page (relative to the UI base).
pub const UI_SEARCH_PATH: &str = "/en-US/app/search/search";

/// `/services/search/jobs/<sid>`, with the sid encoded as one path segment.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] for an empty sid and for `.` or `..`.
/// URL parsing resolves dot segments even when percent-encoded, so those
/// ids would address a different resource.
pub fn job_path(sid: &str) -> Result<String> {
    if matches!(sid, "" | "." | "..") {
        return Err(ClientError::InvalidUrl(format!(
            "job id '{}' is not a valid path segment",
            sid
        )));
    }
    Ok(format!("{}/{}", SEARCH_JOBS_PATH, encode_path_segment(sid)))
}

/// `/services/search/jobs/<sid>/results`.
pub fn job_results_path(sid: &str) -> Result<String> {
    Ok(format!("{}/results", job_path(sid)?))
}

/// `/services/search/jobs/<sid>/control`.
pub fn job_control_path(sid: &str) -> Result<String> {
    Ok(format!("{}/control", job_path(sid)?))
}

/// Metrics label for a request path, with the job id replaced by `{sid}`
/// to keep label cardinality bounded.
pub(crate) fn metrics_label(path: &str) -> String {
    let prefix = format!("{}/", SEARCH_JOBS_PATH);
    match path.strip_prefix(&prefix) {
        Some(rest) if !rest.is_empty() => match rest.split_once('/') {
            Some((_, tail)) => format!("{}{{sid}}/{}", prefix, tail),
            None => format!("{}{{sid}}", prefix),
        },
        _ => path.to_string(),
    }
}
