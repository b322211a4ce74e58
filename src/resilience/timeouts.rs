//! Timeout enforcement.
//!
//! # Responsibilities
//! - Run a resolution off the async executor
//! - Bound it by a request-scoped deadline
//! - Cap how many resolutions occupy blocking workers at once
//! - Turn a missed deadline into an ordinary unresolved outcome
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout is a distinct reason code, never an error page
//! - The blocking task is left to finish; its result is discarded
//! - An abandoned task keeps its permit until it really ends, so slow
//!   lookups cannot pile up on the blocking pool
//! - Waiting for a permit counts against the deadline

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::resolver::{ResolutionOutcome, Resolver, UnresolvedReason};

/// Resolve `input` on a blocking worker, giving up after `deadline`.
///
/// At most `limit`'s permit count of resolutions run at the same time.
pub async fn resolve_with_deadline(
    resolver: Resolver,
    input: String,
    deadline: Duration,
    limit: Arc<Semaphore>,
) -> ResolutionOutcome {
    let run = async move {
        let permit = limit.acquire_owned().await.map_err(|e| e.to_string())?;
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            resolver.resolve(&input)
        })
        .await
        .map_err(|e| e.to_string())
    };

    match tokio::time::timeout(deadline, run).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Resolution task failed");
            ResolutionOutcome::Unresolved(UnresolvedReason::NotAnEntityUrl)
        }
        Err(_) => {
            tracing::warn!(deadline_ms = deadline.as_millis() as u64, "Resolution timed out");
            ResolutionOutcome::Unresolved(UnresolvedReason::TimedOut)
        }
    }
}
