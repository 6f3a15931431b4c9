//! Retry with backoff for host calls.
//!
//! Only transient failures (network errors, timeouts, rate limits, 5xx) are
//! retried. Missing files and authentication failures return immediately.

use backon::{ExponentialBuilder, Retryable};
use std::future::Future;
use std::time::Duration;

use crate::sources::SourceError;

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Delay before the first retry
    pub min_delay: Duration,

    /// Upper bound on any single delay
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryConfig {
    /// A single attempt, no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_attempts.saturating_sub(1) as usize)
    }
}

/// Run `operation`, retrying transient failures per `config`.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    label: &str,
    mut operation: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    if config.max_attempts <= 1 {
        return operation().await;
    }

    operation
        .retry(config.backoff())
        .when(SourceError::is_transient)
        .notify(|err: &SourceError, delay: Duration| {
            tracing::warn!(operation = label, error = %err, ?delay, "Retrying after transient error");
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            min_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[tokio::test]
    async fn test_transient_error_is_retried() {
        let attempts = AtomicU32::new(0);
        let result = with_retry(&fast(3), "test", || async {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(SourceError::HttpError("connection reset".into()))
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_error_is_not_retried() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(&fast(3), "test", || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(SourceError::AuthError)
        })
        .await;

        assert!(matches!(result, Err(SourceError::AuthError)));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_attempts_are_bounded() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(&fast(3), "test", || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(SourceError::Timeout(Duration::from_secs(1)))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_none_runs_once() {
        let attempts = AtomicU32::new(0);
        let _: Result<(), _> = with_retry(&RetryConfig::none(), "test", || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(SourceError::HttpError("down".into()))
        })
        .await;
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
