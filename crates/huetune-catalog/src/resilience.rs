//! Resilience primitives for catalog requests.

use std::future::Future;
use std::sync::Arc;

use backon::{ExponentialBuilder, Retryable};
use tokio::sync::Semaphore;
use tokio::time::{sleep, Duration};

use crate::error::{CatalogError, CatalogResult};

/// Retries after the first attempt for a transient failure.
pub const MAX_RETRIES: usize = 2;

/// Per-source rate limiter.
///
/// Limits throughput to a configurable number of requests per second by
/// combining a single-permit [`Semaphore`] with a fixed sleep interval.
/// Clones share the semaphore, so the recency and mood queries a genre
/// issues concurrently still reach the catalog one interval apart and
/// stay under its per-application request quota.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    interval: Duration,
}

impl RateLimiter {
    /// Allow at most `requests_per_second` requests per second.
    pub fn new(requests_per_second: u32) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            interval: Duration::from_millis(1000 / u64::from(requests_per_second.max(1))),
        }
    }

    /// Wait for a request slot, then hold it for the configured interval.
    pub async fn acquire(&self) {
        // The semaphore is never closed, so `acquire` cannot fail.
        if let Ok(_permit) = self.semaphore.acquire().await {
            sleep(self.interval).await;
        }
    }
}

/// Default backoff for catalog requests.
pub fn default_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(250))
        .with_max_delay(Duration::from_secs(4))
        .with_max_times(MAX_RETRIES)
}

/// Run `operation`, retrying transient failures with `backoff`.
pub async fn with_retry<T, F, Fut>(
    backoff: ExponentialBuilder,
    label: &str,
    operation: F,
) -> CatalogResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = CatalogResult<T>>,
{
    operation
        .retry(backoff)
        .when(CatalogError::is_transient)
        .notify(|e: &CatalogError, delay: Duration| {
            log::debug!("Retrying {} in {:?} after: {}", label, delay, e);
        })
        .await
}
