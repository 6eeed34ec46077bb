//! Clipboard open retry policy

use std::time::Duration;

/// Default number of attempts to open the clipboard
pub const DEFAULT_OPEN_ATTEMPTS: u32 = 3;

/// Default delay between open attempts
pub const DEFAULT_RETRY_DELAY_MS: u64 = 100;

/// How often, and how far apart, to try opening a busy clipboard.
///
/// Fixed delay: no backoff, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy; `attempts` is clamped to at least one.
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Single attempt, no waiting
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Longest time spent waiting before giving up
    pub fn window(&self) -> Duration {
        self.delay * (self.attempts - 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_OPEN_ATTEMPTS,
            Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_attempts_100ms_apart() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts(), 3);
        assert_eq!(policy.delay(), Duration::from_millis(100));
        assert_eq!(policy.window(), Duration::from_millis(200));
    }

    #[test]
    fn zero_attempts_clamped_to_one() {
        let policy = RetryPolicy::new(0, Duration::from_millis(5));
        assert_eq!(policy.attempts(), 1);
        assert_eq!(policy.window(), Duration::ZERO);
    }

    #[test]
    fn no_retry_has_no_window() {
        assert_eq!(RetryPolicy::no_retry().window(), Duration::ZERO);
    }
}
