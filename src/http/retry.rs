//! Transport-level retry policy.

use std::time::Duration;

use crate::config::TRANSPORT_BACKOFF_FACTOR;
use crate::error_handling::transport_backoff;

/// In-session retry of retryable statuses and connection failures.
///
/// Independent of the outer [`RetryPolicy`](crate::RetryPolicy): this layer
/// reuses the session (same fingerprint, same cookies), the outer layer
/// rebuilds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportRetryPolicy {
    /// Retries after the first request (0 disables in-session retry)
    pub max_retries: u32,
    /// Wait before retry `n` is `backoff_factor * 2^n`
    pub backoff_factor: Duration,
}

impl TransportRetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff_factor: TRANSPORT_BACKOFF_FACTOR,
        }
    }

    /// Disables in-session retries.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// The sequence of waits between in-session attempts.
    pub fn strategy(&self) -> impl Iterator<Item = Duration> {
        transport_backoff(self.backoff_factor, self.max_retries)
    }
}

impl Default for TransportRetryPolicy {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_RETRIES)
    }
}
