//! Retry policy for HTTP requests.

use std::time::Duration;

/// Policy for retrying failed requests.
///
/// Only network-level failures are retried; HTTP status codes never
/// consume the retry budget.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
    /// Base delay between retries in seconds; grows linearly per attempt.
    pub base_delay_secs: u64,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay_secs: 2,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay_secs: 0,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, secs: u64) -> Self {
        self.base_delay_secs = secs;
        self
    }

    /// Calculates the delay to wait after `completed` failed attempts.
    ///
    /// Grows linearly: with the default base, 2 seconds after the first
    /// attempt, 4 seconds after the second.
    pub fn delay_for_attempt(&self, completed: u32) -> Duration {
        Duration::from_secs(self.base_delay_secs * u64::from(completed))
    }

    /// Determines if a request error should be retried.
    pub fn should_retry(&self, error: &reqwest::Error) -> bool {
        // Retry on connection errors and timeouts only
        error.is_connect() || error.is_timeout()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
