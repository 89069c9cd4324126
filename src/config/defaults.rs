//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use crate::notify::RetryPolicy;

/// Default HTTP method for webhook requests.
pub const METHOD: &str = "POST";

/// Default polling interval in seconds.
pub const POLL_INTERVAL_SECS: u64 = 1;

/// Default maximum number of delivery attempts.
pub const RETRY_MAX_ATTEMPTS: u32 = RetryPolicy::DEFAULT_MAX_ATTEMPTS;

/// Default initial retry delay in seconds.
pub const RETRY_INITIAL_DELAY_SECS: u64 = RetryPolicy::DEFAULT_INITIAL_DELAY.as_secs();

/// Default maximum retry delay in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = RetryPolicy::DEFAULT_MAX_DELAY.as_secs();

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = RetryPolicy::DEFAULT_MULTIPLIER;
