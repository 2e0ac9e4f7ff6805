//! Time-bounded execution of remote store operations.
//!
//! The remote store offers no cancellation of its own, so each operation runs on its own
//! tokio task. The caller waits at most the given limit; past that, the task is aborted
//! at its next suspension point and whatever it already sent to the backend stays sent.

use std::{future::Future, time::Duration};

use thiserror::Error;
use tokio::{
    task::JoinError,
    time::{Instant, timeout},
};
use tracing::{debug, warn};

use crate::dao::storage::{StorageError, StorageResult};

/// Outcome of a remote call that did not produce a value.
#[derive(Debug, Error)]
pub enum BoundedCallError {
    /// The operation did not finish within its limit.
    #[error("{operation} timed out after {}ms", limit.as_millis())]
    TimedOut {
        /// Name of the store operation.
        operation: &'static str,
        /// Limit that elapsed.
        limit: Duration,
    },
    /// The operation finished in time but the backend reported a failure.
    #[error("{operation} failed: {source}")]
    Failed {
        /// Name of the store operation.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: StorageError,
    },
    /// The task running the operation panicked or was cancelled.
    #[error("{operation} aborted before completing")]
    Aborted {
        /// Name of the store operation.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: JoinError,
    },
}

impl BoundedCallError {
    /// Whether the failure is the time limit rather than the backend.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}

/// Run `operation` on a spawned task and wait for it at most `limit`.
pub async fn call_with_timeout<T, Fut>(
    operation: &'static str,
    limit: Duration,
    future: Fut,
) -> Result<T, BoundedCallError>
where
    Fut: Future<Output = StorageResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let started = Instant::now();
    let mut handle = tokio::spawn(future);

    let outcome = match timeout(limit, &mut handle).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(source))) => Err(BoundedCallError::Failed { operation, source }),
        Ok(Err(source)) => Err(BoundedCallError::Aborted { operation, source }),
        Err(_) => {
            handle.abort();
            Err(BoundedCallError::TimedOut { operation, limit })
        }
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &outcome {
        Ok(_) => debug!(operation, elapsed_ms, "remote call completed"),
        Err(err) => warn!(
            operation,
            elapsed_ms,
            limit_ms = limit.as_millis() as u64,
            error = %err,
            "remote call did not complete"
        ),
    }

    outcome
}
