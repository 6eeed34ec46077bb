//! Application configuration value object

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::format::TextKind;
use crate::domain::retry::{RetryPolicy, DEFAULT_OPEN_ATTEMPTS, DEFAULT_RETRY_DELAY_MS};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub open_attempts: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub default_format: Option<String>,
    pub append: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            open_attempts: Some(DEFAULT_OPEN_ATTEMPTS),
            retry_delay_ms: Some(DEFAULT_RETRY_DELAY_MS),
            default_format: Some(TextKind::Unicode.as_str().to_string()),
            append: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            open_attempts: other.open_attempts.or(self.open_attempts),
            retry_delay_ms: other.retry_delay_ms.or(self.retry_delay_ms),
            default_format: other.default_format.or(self.default_format),
            append: other.append.or(self.append),
        }
    }

    /// Get open attempts, or the default if not set or zero
    pub fn open_attempts_or_default(&self) -> u32 {
        self.open_attempts
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_OPEN_ATTEMPTS)
    }

    /// Get retry delay, or the default if not set
    pub fn retry_delay_or_default(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS))
    }

    /// Retry policy described by this config
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.open_attempts_or_default(), self.retry_delay_or_default())
    }

    /// Get default format as parsed TextKind, or Unicode if not set/invalid
    pub fn default_format_or_default(&self) -> TextKind {
        self.default_format
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get append setting, or false if not set
    pub fn append_or_default(&self) -> bool {
        self.append.unwrap_or(false)
    }
}
