//! Library configuration (no CLI dependencies).
//!
//! [`ScrapeOptions`] aggregates every policy one pipeline run consults. The
//! defaults reproduce the harvester's standard behavior; tests shrink the
//! delays to keep runs fast.

use std::time::Duration;

use rand::Rng;

use crate::config::constants::{
    DEFAULT_MAX_RETRIES, MEDIA_PAUSE_MAX, MEDIA_PAUSE_MIN, OUTER_BACKOFF_BASE, PAGE_JITTER_MAX,
    PAGE_JITTER_MIN, SAVE_PAUSE_MAX, SAVE_PAUSE_MIN,
};
use crate::http::{SessionConfig, TransportRetryPolicy};

/// Inclusive range a random delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    /// A range that never sleeps.
    pub const ZERO: DelayRange = DelayRange {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub fn is_zero(&self) -> bool {
        self.min.is_zero() && self.max.is_zero()
    }

    /// Draws a delay uniformly from the range.
    ///
    /// A degenerate range (`max <= min`) always yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let secs = rng.random_range(self.min.as_secs_f64()..=self.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

/// Random waits applied by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayPolicy {
    /// Enables `page_jitter` and `save_pause`
    pub random_delay: bool,
    /// Slept before each page fetch attempt
    pub page_jitter: DelayRange,
    /// Slept after each successful asset download
    pub media_pause: DelayRange,
    /// Slept after each artifact write
    pub save_pause: DelayRange,
}

impl DelayPolicy {
    pub fn new(random_delay: bool) -> Self {
        Self {
            random_delay,
            page_jitter: DelayRange::new(PAGE_JITTER_MIN, PAGE_JITTER_MAX),
            media_pause: DelayRange::new(MEDIA_PAUSE_MIN, MEDIA_PAUSE_MAX),
            save_pause: DelayRange::new(SAVE_PAUSE_MIN, SAVE_PAUSE_MAX),
        }
    }

    /// A policy that never sleeps.
    pub fn none() -> Self {
        Self {
            random_delay: false,
            page_jitter: DelayRange::ZERO,
            media_pause: DelayRange::ZERO,
            save_pause: DelayRange::ZERO,
        }
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Outer retry policy: whole-fetch attempts, each with a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts (values below 1 are treated as 1)
    pub max_attempts: u32,
    /// Backoff after failed attempt `n` is `backoff_base * 2^n`
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Wait before the attempt following failed attempt `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let multiplier = 2u32.saturating_pow(attempt.min(16));
        self.backoff_base.saturating_mul(multiplier)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_RETRIES,
            backoff_base: OUTER_BACKOFF_BASE,
        }
    }
}

/// Which data classes a run extracts, writes and downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionToggles {
    pub emails: bool,
    pub phones: bool,
    pub social: bool,
    pub images: bool,
    pub videos: bool,
    pub css_js: bool,
}

impl Default for ExtractionToggles {
    fn default() -> Self {
        Self {
            emails: true,
            phones: true,
            social: true,
            images: true,
            videos: true,
            css_js: true,
        }
    }
}

/// Everything one pipeline run needs besides the URL and the save root.
///
/// # Examples
///
/// ```
/// use site_harvest::ScrapeOptions;
///
/// let options = ScrapeOptions::new(false, true, 3);
/// assert_eq!(options.retry.max_attempts, 3);
/// assert_eq!(options.session.transport_retry.max_retries, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub session: SessionConfig,
    pub retry: RetryPolicy,
    pub delays: DelayPolicy,
    pub extract: ExtractionToggles,
    /// Accepted for compatibility; only the given page is harvested
    pub depth: u32,
}

impl ScrapeOptions {
    /// Options equivalent to `scrape(url, root, use_proxy, use_random_delay, max_retries)`.
    ///
    /// Both retry layers start from `max_retries`; they stay independently
    /// adjustable afterwards.
    pub fn new(use_proxy: bool, use_random_delay: bool, max_retries: u32) -> Self {
        Self {
            session: SessionConfig {
                use_proxy,
                transport_retry: TransportRetryPolicy::new(max_retries),
                ..SessionConfig::default()
            },
            retry: RetryPolicy {
                max_attempts: max_retries,
                ..RetryPolicy::default()
            },
            delays: DelayPolicy::new(use_random_delay),
            extract: ExtractionToggles::default(),
            depth: 0,
        }
    }
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self::new(false, true, DEFAULT_MAX_RETRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_delay_range_sample_within_bounds() {
        let range = DelayRange::new(Duration::from_secs(2), Duration::from_secs(7));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let d = range.sample(&mut rng);
            assert!(d >= Duration::from_secs(2) && d <= Duration::from_secs(7), "{:?}", d);
        }
    }

    #[test]
    fn test_delay_range_degenerate() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(DelayRange::ZERO.sample(&mut rng), Duration::ZERO);
        let fixed = DelayRange::new(Duration::from_millis(5), Duration::from_millis(5));
        assert_eq!(fixed.sample(&mut rng), Duration::from_millis(5));
        assert!(DelayRange::ZERO.is_zero());
        assert!(!fixed.is_zero());
    }

    #[test]
    fn test_retry_policy_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
        assert_eq!(policy.backoff(3), Duration::from_secs(8));
    }

    #[test]
    fn test_retry_policy_clamps_attempts() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn test_retry_policy_backoff_saturates() {
        let policy = RetryPolicy::default();
        // Must not overflow for absurd attempt numbers
        assert!(policy.backoff(u32::MAX) >= policy.backoff(16));
    }

    #[test]
    fn test_default_options_match_standard_behavior() {
        let options = ScrapeOptions::default();
        assert!(!options.session.use_proxy);
        assert!(options.delays.random_delay);
        assert_eq!(options.delays.page_jitter.min, Duration::from_secs(2));
        assert_eq!(options.delays.page_jitter.max, Duration::from_secs(7));
        assert_eq!(options.delays.media_pause.min, Duration::from_secs(1));
        assert_eq!(options.delays.media_pause.max, Duration::from_secs(3));
        assert_eq!(options.retry.attempts(), 3);
        assert_eq!(options.extract, ExtractionToggles::default());
    }
}
