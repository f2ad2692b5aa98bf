//! Response status checking and body extraction.

use reqwest::Response;

use crate::error::{ClientError, Result};
use crate::models::SplunkMessages;

/// Header Splunk uses to correlate a request with its server-side logs.
const REQUEST_ID_HEADER: &str = "X-Splunk-Request-Id";

/// Pass `response` through if its status is one of `accepted`, otherwise
/// consume it into [`ClientError::ApiError`].
///
/// The error message is built from Splunk's `messages` array when the body
/// has one, falling back to the raw body text.
pub(crate) async fn expect_status(response: Response, accepted: &[u16]) -> Result<Response> {
    let status = response.status().as_u16();
    if accepted.contains(&status) {
        return Ok(response);
    }

    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<SplunkMessages>(&body) {
        Ok(m) if !m.messages.is_empty() => m
            .messages
            .iter()
            .map(|msg| format!("{}: {}", msg.message_type, msg.text))
            .collect::<Vec<_>>()
            .join("; "),
        _ => body,
    };

    Err(ClientError::ApiError {
        status,
        url,
        message,
        request_id,
    })
}

/// Read the response body as JSON.
pub(crate) async fn json_body(response: Response, context: &str) -> Result<serde_json::Value> {
    let body = response
        .text()
        .await
        .map_err(|source| ClientError::Transport {
            context: context.to_string(),
            source,
        })?;

    serde_json::from_str(&body).map_err(|e| {
        ClientError::InvalidResponse(format!("Failed to parse {} response: {}", context, e))
    })
}

/// Return `entry[0].content` from an Atom-style Splunk JSON response.
pub(crate) fn extract_entry_content(value: &serde_json::Value) -> Result<&serde_json::Value> {
    value
        .get("entry")
        .and_then(|e| e.get(0))
        .and_then(|e| e.get("content"))
        .ok_or_else(|| ClientError::InvalidResponse("Missing entry[0].content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_entry_content() {
        let value = json!({"entry": [{"name": "x", "content": {"sid": "abc"}}]});
        let content = extract_entry_content(&value).unwrap();
        assert_eq!(content["sid"], "abc");
    }

    #[test]
    fn test_extract_entry_content_empty_entry() {
        let value = json!({"entry": []});
        assert!(matches!(
            extract_entry_content(&value),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_extract_entry_content_missing_entry() {
        let value = json!({"messages": []});
        assert!(extract_entry_content(&value).is_err());
    }
}
