//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, delay ranges, retry parameters, extension lists)
//! - HTTP header value constants
//! - Default user-agent, referrer and proxy pools
//! - Library option types and CLI option parsing

mod constants;
mod headers;
pub mod options;
pub mod pools;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use options::{DelayPolicy, DelayRange, ExtractionToggles, RetryPolicy, ScrapeOptions};
pub use types::{Config, LogFormat, LogLevel};
