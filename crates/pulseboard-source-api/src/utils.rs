//! Common utilities for source implementations

use std::time::Duration;

use crate::{
    SourceApiResult,
    SourceError,
};

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: usize,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Whether to use exponential backoff
    pub exponential_backoff: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            exponential_backoff: true,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, initial_delay: Duration, exponential_backoff: bool) -> Self {
        Self {
            max_attempts,
            initial_delay,
            exponential_backoff,
        }
    }

    /// Executes an operation, retrying transient failures
    ///
    /// # Example
    ///
    /// ```ignore
    /// use pulseboard_source_api::utils::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// let metrics = policy
    ///     .retry(|| source.fetch_function_metrics("checkout", window))
    ///     .await?;
    /// ```
    pub async fn retry<F, Fut, T>(&self, operation: F) -> SourceApiResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = SourceApiResult<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut delay = self.initial_delay;
        let mut last_error = None;

        for attempt in 0..attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if attempt + 1 < attempts && e.is_transient() => {
                    last_error = Some(e);
                    tokio::time::sleep(delay).await;
                    if self.exponential_backoff {
                        delay *= 2;
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| SourceError::NetworkError("Max retries exceeded".to_string())))
    }
}
