//! Search job REST operations for [`SearchClient`].
//!
//! # What this module handles:
//! - Submitting search jobs
//! - Fetching job status
//! - Fetching raw job results
//! - Cancelling and deleting jobs
//!
//! # What this module does NOT handle:
//! - Request signing or encoding (all calls go through [`SearchClient::send`])
//! - Polling until completion (see [`crate::SearchJob::wait`])

use std::sync::Arc;

use reqwest::Method;
use tracing::debug;

use crate::cancellation::CancellationToken;
use crate::client::SearchClient;
use crate::endpoints::{self, SEARCH_JOBS_PATH};
use crate::error::{ClientError, Result};
use crate::job::SearchJob;
use crate::models::{CreateJobOptions, SearchJobStatus};

impl SearchClient {
    /// Submit a new search job and return a handle to it.
    ///
    /// `query` is sent verbatim as the `search` parameter.
    pub async fn submit_job(
        self: &Arc<Self>,
        ctx: &CancellationToken,
        query: &str,
        options: &CreateJobOptions,
    ) -> Result<SearchJob> {
        // The query may carry tokens or PII; only its size is logged.
        debug!(query_len = query.len(), "Creating search job");

        let option_params = options.to_params();
        let mut params: Vec<(&str, &str)> = vec![("search", query)];
        params.extend(option_params.iter().map(|(k, v)| (*k, v.as_str())));

        let response = self
            .send(ctx, Method::POST, SEARCH_JOBS_PATH, &params)
            .await?;
        let response = endpoints::expect_status(response, &[200, 201]).await?;
        let body = endpoints::json_body(response, "create job").await?;

        // Splunk can return either:
        // - `{ "sid": "<sid>" }`
        // - `{ "entry": [ { "content": { "sid": "<sid>" } } ] }`
        let sid = body
            .get("sid")
            .and_then(|v| v.as_str())
            .or_else(|| {
                body.get("entry")?
                    .get(0)?
                    .get("content")?
                    .get("sid")?
                    .as_str()
            })
            .ok_or_else(|| ClientError::InvalidResponse("Missing sid in response".to_string()))?;

        debug!(sid, "Created search job");
        Ok(self.job(sid))
    }

    /// Get the current status of a search job. Never cached.
    pub async fn job_status(&self, ctx: &CancellationToken, sid: &str) -> Result<SearchJobStatus> {
        let response = self
            .send(ctx, Method::GET, &endpoints::job_path(sid)?, &[])
            .await?;
        let response = endpoints::expect_status(response, &[200]).await?;
        let body = endpoints::json_body(response, "job status").await?;
        let content = endpoints::extract_entry_content(&body)?;

        let mut status: SearchJobStatus = serde_json::from_value(content.clone()).map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to parse job status: {}", e))
        })?;
        if status.sid.is_empty() {
            status.sid = sid.to_string();
        }
        Ok(status)
    }

    /// Fetch a job's results as raw bytes (JSON, since `output_mode=json`).
    ///
    /// Splunk answers 204 while results are not yet available; that yields
    /// an empty body.
    pub async fn job_results_raw(
        &self,
        ctx: &CancellationToken,
        sid: &str,
        count: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<u8>> {
        let count = count.map(|c| c.to_string());
        let offset = offset.map(|o| o.to_string());
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(c) = count.as_deref() {
            params.push(("count", c));
        }
        if let Some(o) = offset.as_deref() {
            params.push(("offset", o));
        }

        let path = endpoints::job_results_path(sid)?;
        let response = self.send(ctx, Method::GET, &path, &params).await?;
        let response = endpoints::expect_status(response, &[200, 204]).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                context: format!("GET {}", path),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    /// Ask Splunk to stop a running job. The job stays until deleted or expired.
    pub async fn cancel_search_job(&self, ctx: &CancellationToken, sid: &str) -> Result<()> {
        let response = self
            .send(
                ctx,
                Method::POST,
                &endpoints::job_control_path(sid)?,
                &[("action", "cancel")],
            )
            .await?;
        endpoints::expect_status(response, &[200]).await?;
        Ok(())
    }

    /// Delete a search job.
    ///
    /// Succeeds only on HTTP 200. Deleting an unknown sid surfaces the
    /// server's 404 as [`ClientError::ApiError`].
    pub async fn delete_search_job(&self, ctx: &CancellationToken, sid: &str) -> Result<()> {
        debug!(sid, "Deleting search job");
        let response = self
            .send(ctx, Method::DELETE, &endpoints::job_path(sid)?, &[])
            .await?;
        endpoints::expect_status(response, &[200]).await?;
        Ok(())
    }
}
