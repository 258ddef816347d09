//! Configuration constants.
//!
//! This module defines the timeouts, delay ranges, retry parameters and
//! per-asset-class extension lists used throughout the harvester.

use std::time::Duration;

// Network operation timeouts
/// Timeout for fetching the target page
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for each asset download
pub const ASSET_TIMEOUT: Duration = Duration::from_secs(15);

// Anti-detection delays
/// Lower bound of the jitter slept before each page fetch attempt
pub const PAGE_JITTER_MIN: Duration = Duration::from_secs(2);
/// Upper bound of the jitter slept before each page fetch attempt
pub const PAGE_JITTER_MAX: Duration = Duration::from_secs(7);
/// Lower bound of the pause after each successful asset download
pub const MEDIA_PAUSE_MIN: Duration = Duration::from_secs(1);
/// Upper bound of the pause after each successful asset download
pub const MEDIA_PAUSE_MAX: Duration = Duration::from_secs(3);
/// Lower bound of the pause after each artifact write
pub const SAVE_PAUSE_MIN: Duration = Duration::from_millis(100);
/// Upper bound of the pause after each artifact write
pub const SAVE_PAUSE_MAX: Duration = Duration::from_millis(500);

// Retry strategy
/// Default number of outer (whole-fetch) attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Base of the outer exponential backoff: wait = base * 2^attempt
pub const OUTER_BACKOFF_BASE: Duration = Duration::from_secs(1);
/// Multiplier of the transport backoff: wait = factor * 2^retry
pub const TRANSPORT_BACKOFF_FACTOR: Duration = Duration::from_millis(250);
/// Status codes retried inside one session
pub const RETRYABLE_STATUS_CODES: &[u16] = &[429, 500, 502, 503, 504];

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

// Asset classes
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".avi", ".webm", ".ogg"];
pub const CSS_EXTENSIONS: &[&str] = &[".css"];
pub const JS_EXTENSIONS: &[&str] = &[".js"];

// Output layout
/// Default root folder for harvested sites
pub const DEFAULT_SAVE_ROOT: &str = "./scraped_sites";
/// Fallback name used when a folder name sanitizes to nothing
pub const UNNAMED_FOLDER: &str = "unnamed";

// Filenames
/// Maximum filename length before truncation
pub const MAX_FILENAME_LENGTH: usize = 100;
/// Stem length kept when a filename is truncated
pub const TRUNCATED_STEM_LENGTH: usize = 90;
/// Number of hex characters of the URL digest used in fallback names
pub const FILENAME_HASH_CHARS: usize = 10;
/// Extension used when nothing better is known
pub const FALLBACK_EXTENSION: &str = ".bin";
