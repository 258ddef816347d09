//! Error handling.
//!
//! This module provides:
//! - Error type definitions for runs, fetch attempts and asset downloads
//! - Request failure categorization for log lines
//! - The transport-level retry strategy
//!
//! Errors are layered:
//! - **Run errors** (`ScrapeError`): the caller receives these
//! - **Attempt errors** (`FetchError`): retried by the outer loop
//! - **Asset errors** (`DownloadError`): logged and counted, never escalated

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, is_retriable_status, transport_backoff};
pub(crate) use categorization::is_retriable_transport_error;
pub use types::{DownloadError, FailureKind, FetchError, InitializationError, ScrapeError};
