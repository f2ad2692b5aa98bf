//! Percent-encoding for search job ids used as URL path segments.
//!
//! Job ids are opaque strings assigned by Splunk (or chosen by the caller
//! through the `id` creation parameter). Encoding them keeps characters like
//! `/`, `?` and `#` from changing the path or starting a query.
//!
//! Encoding cannot neutralize the dot segments `.` and `..`; URL parsing
//! resolves them even as `%2E`. [`super::job_path`] rejects those ids.
//!
//! # Example
//!
//! ```
//! use splunk_search_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("my/job"), "my%2Fjob");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in a job id path segment.
///
/// RFC 3986 path-segment reserved characters plus `%` (so already-encoded
/// input is not decoded twice by the server).
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a URL path segment.
///
/// ```
/// use splunk_search_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("1705330800.42"), "1705330800.42");
/// assert_eq!(encode_path_segment("rt job"), "rt%20job");
/// assert_eq!(encode_path_segment("100%"), "100%25");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}
