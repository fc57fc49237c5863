/// Retry policy with exponential backoff for upstream catalog requests
use backoff::backoff::Backoff;
use backoff::ExponentialBackoffBuilder;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::domain::errors::CatalogResult;

/// Retry policy with exponential backoff
///
/// # Retry Decision
/// - Retry on: 429, 5xx, network errors and timeouts
/// - Do NOT retry: 404 (not found), other 4xx, malformed payloads
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries before giving up
    pub max_retries: u32,

    /// Initial backoff duration in milliseconds
    pub initial_backoff_ms: u64,

    /// Maximum backoff duration in milliseconds
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff_ms: 200,
            max_backoff_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with custom settings
    pub const fn new(max_retries: u32, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms,
            max_backoff_ms,
        }
    }

    /// Policy that never retries.
    pub const fn disabled() -> Self {
        Self::new(0, 1, 1)
    }

    fn backoff(&self) -> impl Backoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(self.initial_backoff_ms))
            .with_max_interval(Duration::from_millis(self.max_backoff_ms))
            .with_max_elapsed_time(None)
            .build()
    }

    /// Execute an async operation, retrying transient failures.
    ///
    /// The last error is returned unchanged once retries are exhausted or a
    /// permanent error is seen.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> CatalogResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CatalogResult<T>>,
    {
        let max_retries = self.max_retries;
        let mut attempt: u32 = 0;

        backoff::future::retry(self.backoff(), || {
            attempt += 1;
            let current = attempt;
            let pending = operation();
            async move {
                match pending.await {
                    Ok(value) => Ok(value),
                    Err(err) if err.is_transient() && current <= max_retries => {
                        warn!(attempt = current, max_retries, error = %err, "transient upstream error, retrying");
                        Err(backoff::Error::transient(err))
                    }
                    Err(err) => Err(backoff::Error::permanent(err)),
                }
            }
        })
        .await
    }
}
