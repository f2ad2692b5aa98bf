//! Handle to a single remote search job.
//!
//! A [`SearchJob`] is a stateless pairing of a sid with a shared
//! [`SearchClient`]. It never caches status: every call re-queries Splunk,
//! which is the only authority on the job's lifecycle
//! (`Created -> Running -> Done | Failed`, then deleted or expired).

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::cancellation::CancellationToken;
use crate::client::SearchClient;
use crate::config::{DEFAULT_MAX_WAIT_SECS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_UI_BASE_URL};
use crate::endpoints::UI_SEARCH_PATH;
use crate::error::{ClientError, Result};
use crate::models::{JobState, SearchJobStatus};

/// Build a Splunk Web deep link for `sid` under `base`.
///
/// `base` is used verbatim and must not end with `/`.
pub fn search_url(base: &str, sid: &str) -> String {
    format!("{}{}?sid={}", base, UI_SEARCH_PATH, sid)
}

/// A search job known by its sid.
#[derive(Debug, Clone)]
pub struct SearchJob {
    sid: String,
    client: Arc<SearchClient>,
}

impl SearchJob {
    /// Bind `sid` to `client`.
    pub fn new(client: Arc<SearchClient>, sid: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            client,
        }
    }

    /// The job's search id.
    pub fn sid(&self) -> &str {
        &self.sid
    }

    /// The client this job issues requests through.
    pub fn client(&self) -> &Arc<SearchClient> {
        &self.client
    }

    /// Splunk Web link for this job.
    ///
    /// Without an override the base is `http://localhost`, independent of the
    /// client's API base URL.
    pub fn url(&self, base_override: Option<&str>) -> String {
        search_url(base_override.unwrap_or(DEFAULT_UI_BASE_URL), &self.sid)
    }

    /// Fetch the job's current status.
    pub async fn status(&self, ctx: &CancellationToken) -> Result<SearchJobStatus> {
        self.client.job_status(ctx, &self.sid).await
    }

    /// Fetch the job's results as raw bytes.
    pub async fn results_raw(
        &self,
        ctx: &CancellationToken,
        count: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<u8>> {
        self.client
            .job_results_raw(ctx, &self.sid, count, offset)
            .await
    }

    /// Cancel the job on the server.
    pub async fn cancel(&self, ctx: &CancellationToken) -> Result<()> {
        self.client.cancel_search_job(ctx, &self.sid).await
    }

    /// Delete the job on the server.
    pub async fn delete(&self, ctx: &CancellationToken) -> Result<()> {
        self.client.delete_search_job(ctx, &self.sid).await
    }

    /// Poll until the job reaches a terminal state.
    ///
    /// Runs in the caller's task; nothing is spawned. Returns the final
    /// status on `Done`. No sleep extends past `max_wait`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::JobFailed`] if the job fails
    /// - [`ClientError::OperationTimeout`] once `max_wait` has elapsed
    /// - [`ClientError::Cancelled`] if `ctx` fires, including mid-sleep
    pub async fn wait(
        &self,
        ctx: &CancellationToken,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> Result<SearchJobStatus> {
        let start = Instant::now();

        loop {
            let status = self.status(ctx).await?;
            let state = status.state();
            if state.is_terminal() {
                if state == JobState::Failed {
                    return Err(ClientError::JobFailed {
                        sid: self.sid.clone(),
                        message: status.failure_message(),
                    });
                }
                debug!(sid = %self.sid, "Job completed");
                return Ok(status);
            }

            let remaining = max_wait.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return Err(ClientError::OperationTimeout {
                    operation: "wait_for_job",
                    timeout: max_wait,
                });
            }

            let pause = poll_interval.min(remaining);
            ctx.run(format!("waiting for job {}", self.sid), async {
                tokio::time::sleep(pause).await;
                Ok(())
            })
            .await?;
        }
    }

    /// [`wait`](Self::wait) with [`DEFAULT_POLL_INTERVAL_MS`] and
    /// [`DEFAULT_MAX_WAIT_SECS`].
    pub async fn wait_default(&self, ctx: &CancellationToken) -> Result<SearchJobStatus> {
        self.wait(
            ctx,
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            Duration::from_secs(DEFAULT_MAX_WAIT_SECS),
        )
        .await
    }
}
