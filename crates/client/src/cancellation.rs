//! Cooperative cancellation for client operations.
//!
//! Responsibilities:
//! - Provide a cloneable token that callers pass to every network operation.
//! - Race a request future against the token so a cancelled call returns
//!   [`ClientError::Cancelled`] instead of waiting on the transport.
//!
//! Does NOT handle:
//! - Timeouts (configured on the HTTP executor, or via [`crate::SearchJob::wait`]).
//! - Signal handling; callers decide when to cancel.
//!
//! Invariants:
//! - Once cancelled, a token remains cancelled forever.

use std::future::Future;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::Notify;

use crate::error::{ClientError, Result};

/// Cancellation token usable across async tasks.
///
/// Clones share state: cancelling one clone cancels them all.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel token (idempotent).
    pub fn cancel(&self) {
        let was_cancelled = self.cancelled.swap(true, Ordering::SeqCst);
        if !was_cancelled {
            self.notify.notify_waiters();
        }
    }

    /// True if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Await cancellation.
    ///
    /// The `notified()` future is created before the flag is checked so a
    /// concurrent `cancel()` cannot be missed.
    pub async fn cancelled(&self) {
        let notified = self.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }

    /// Run `fut` to completion unless the token fires first.
    ///
    /// `context` names the operation in the resulting
    /// [`ClientError::Cancelled`]. The future is dropped on cancellation,
    /// which aborts any in-flight HTTP request it owns.
    pub async fn run<F, T>(&self, context: impl Into<String>, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(ClientError::Cancelled {
                context: context.into(),
            });
        }

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(ClientError::Cancelled { context: context.into() }),
            res = fut => res,
        }
    }
}
