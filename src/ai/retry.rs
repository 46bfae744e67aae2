//! Retry logic with linear backoff for generative summary requests.
//!
//! A request is attempted once and then retried up to
//! [`DEFAULT_MAX_RETRIES`] times, waiting `base_delay × n` before retry `n`.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use clarity_core::ai::{RetryDecision, RetryPolicy};
//!
//! let policy = RetryPolicy::default();
//! assert_eq!(
//!     policy.should_retry(true, 1),
//!     RetryDecision::Retry { delay: Duration::from_secs(1), attempt: 2 }
//! );
//! assert!(matches!(policy.should_retry(true, 3), RetryDecision::DoNotRetry { .. }));
//! ```

use std::time::Duration;

use tracing::{debug, instrument, warn};

use super::{AiError, SummaryProvider};
use crate::summarizer::{AcademicLevel, SummaryMode};

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Upper bound accepted from configuration.
pub const MAX_CONFIGURABLE_RETRIES: u32 = 5;

/// Delay unit; retry `n` waits `n` units.
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Decision on whether to retry a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the specified delay.
    Retry {
        /// How long to wait before retrying.
        delay: Duration,
        /// Which attempt this will be (1-indexed, so the first retry is attempt 2).
        attempt: u32,
    },

    /// Give up and surface the last error.
    DoNotRetry {
        /// Human-readable reason.
        reason: String,
    },
}

/// Retry configuration with linear backoff and no jitter.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy; `max_retries` is clamped to [`MAX_CONFIGURABLE_RETRIES`].
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.min(MAX_CONFIGURABLE_RETRIES),
            base_delay,
        }
    }

    /// Creates a policy with a custom retry count and the default delay.
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self::new(max_retries, DEFAULT_BASE_DELAY)
    }

    /// Returns the configured retry count.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Total attempts including the first one.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Decides whether to retry after `attempt` (1-indexed) failed.
    #[instrument(skip(self), fields(max_retries = self.max_retries))]
    pub fn should_retry(&self, retryable: bool, attempt: u32) -> RetryDecision {
        if !retryable {
            return RetryDecision::DoNotRetry {
                reason: "permanent failure - retry would not help".to_string(),
            };
        }

        if attempt >= self.max_attempts() {
            debug!(attempt, "max attempts reached");
            return RetryDecision::DoNotRetry {
                reason: format!("max retries ({}) exhausted", self.max_retries),
            };
        }

        let delay = self.base_delay * attempt;
        debug!(
            attempt,
            next_attempt = attempt + 1,
            delay_ms = delay.as_millis(),
            "will retry"
        );
        RetryDecision::Retry {
            delay,
            attempt: attempt + 1,
        }
    }
}

/// Calls `provider` until it succeeds or `policy` gives up.
///
/// # Errors
///
/// Returns the error from the final attempt.
#[instrument(skip(provider, policy, content), fields(provider = provider.name()))]
pub async fn summarize_with_retry(
    provider: &dyn SummaryProvider,
    policy: &RetryPolicy,
    content: &str,
    mode: SummaryMode,
    level: AcademicLevel,
) -> Result<String, AiError> {
    let mut attempt = 1;
    loop {
        match provider.summarize(content, mode, level).await {
            Ok(summary) => return Ok(summary),
            Err(error) => {
                warn!(attempt, error = %error, "AI summary attempt failed");
                match policy.should_retry(error.is_retryable(), attempt) {
                    RetryDecision::Retry {
                        delay,
                        attempt: next,
                    } => {
                        tokio::time::sleep(delay).await;
                        attempt = next;
                    }
                    RetryDecision::DoNotRetry { reason } => {
                        debug!(%reason, "giving up on AI summary");
                        return Err(error);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyProvider {
        failures_before_success: u32,
        calls: AtomicU32,
        retryable: bool,
    }

    #[async_trait]
    impl SummaryProvider for FlakyProvider {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn summarize(
            &self,
            _content: &str,
            _mode: SummaryMode,
            _level: AcademicLevel,
        ) -> Result<String, AiError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call > self.failures_before_success {
                Ok(format!("summary after {call} calls"))
            } else if self.retryable {
                Err(AiError::NoResult {
                    provider: "flaky".to_string(),
                })
            } else {
                Err(AiError::NotAvailable("down".to_string()))
            }
        }
    }

    fn flaky(failures_before_success: u32, retryable: bool) -> FlakyProvider {
        FlakyProvider {
            failures_before_success,
            calls: AtomicU32::new(0),
            retryable,
        }
    }

    #[test]
    fn test_default_policy_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), 2);
        assert_eq!(policy.max_attempts(), 3);
    }

    #[test]
    fn test_delay_is_linear_in_attempt() {
        let policy = RetryPolicy::new(5, Duration::from_millis(100));
        for attempt in 1..=5 {
            match policy.should_retry(true, attempt) {
                RetryDecision::Retry { delay, attempt: next } => {
                    assert_eq!(delay, Duration::from_millis(100) * attempt);
                    assert_eq!(next, attempt + 1);
                }
                RetryDecision::DoNotRetry { reason } => panic!("unexpected stop: {reason}"),
            }
        }
        assert!(matches!(
            policy.should_retry(true, 6),
            RetryDecision::DoNotRetry { .. }
        ));
    }

    #[test]
    fn test_max_retries_is_clamped() {
        assert_eq!(RetryPolicy::with_max_retries(50).max_retries(), 5);
        assert_eq!(RetryPolicy::with_max_retries(0).max_attempts(), 1);
    }

    #[test]
    fn test_non_retryable_stops_immediately() {
        let decision = RetryPolicy::default().should_retry(false, 1);
        assert!(matches!(decision, RetryDecision::DoNotRetry { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_summarize_with_retry_recovers_within_budget() {
        let provider = flaky(2, true);
        let result = summarize_with_retry(
            &provider,
            &RetryPolicy::default(),
            "text",
            SummaryMode::Study,
            AcademicLevel::Undergraduate,
        )
        .await
        .unwrap();
        assert_eq!(result, "summary after 3 calls");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_summarize_with_retry_returns_final_error() {
        let provider = flaky(10, true);
        let result = summarize_with_retry(
            &provider,
            &RetryPolicy::default(),
            "text",
            SummaryMode::Quick,
            AcademicLevel::Graduate,
        )
        .await;
        assert!(matches!(result, Err(AiError::NoResult { .. })));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_summarize_with_retry_skips_permanent_errors() {
        let provider = flaky(10, false);
        let result = summarize_with_retry(
            &provider,
            &RetryPolicy::default(),
            "text",
            SummaryMode::Quick,
            AcademicLevel::Graduate,
        )
        .await;
        assert!(matches!(result, Err(AiError::NotAvailable(_))));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }
}
