//! Timeout helpers.
//!
//! A tag exchange normally completes in a few milliseconds; the default is
//! generous enough for slow readers while still failing a lost connection.

use std::time::Duration;

/// Default per-exchange timeout in milliseconds.
pub const DEFAULT_EXCHANGE_TIMEOUT_MS: u64 = 1000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default exchange timeout as Duration.
pub fn default_exchange_timeout() -> Duration {
    ms(DEFAULT_EXCHANGE_TIMEOUT_MS)
}
