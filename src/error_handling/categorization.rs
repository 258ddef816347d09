//! Error categorization and retry strategy.
//!
//! This module provides functions to categorize request errors and configure
//! the transport-level retry strategy.

use std::time::Duration;

use reqwest::StatusCode;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::FailureKind;
use crate::config::{HTTP_STATUS_TOO_MANY_REQUESTS, RETRYABLE_STATUS_CODES};

/// Creates the transport-level exponential backoff strategy.
///
/// Waits are `factor * 2^n` for retry `n` (1-based): with the default
/// factor of 250 ms this yields 0.5 s, 1 s, 2 s, ...
///
/// # Arguments
///
/// * `factor` - Backoff multiplier
/// * `max_retries` - Number of retries after the first request
///
/// # Returns
///
/// A retry strategy iterator ready for use with `tokio_retry::RetryIf`.
pub fn transport_backoff(factor: Duration, max_retries: u32) -> impl Iterator<Item = Duration> {
    let factor_ms = u64::try_from(factor.as_millis()).unwrap_or(u64::MAX);
    ExponentialBackoff::from_millis(2)
        .factor(factor_ms)
        .take(max_retries as usize)
}

/// Whether a response status is retried inside one session.
pub fn is_retriable_status(status: StatusCode) -> bool {
    RETRYABLE_STATUS_CODES.contains(&status.as_u16())
}

/// Categorizes a `reqwest::Error` into a `FailureKind`.
///
/// HTTP status codes are inspected first, then the reqwest error kind.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The appropriate `FailureKind` for the error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureKind {
    if let Some(status) = error.status() {
        match status.as_u16() {
            HTTP_STATUS_TOO_MANY_REQUESTS => return FailureKind::TooManyRequests,
            403 => return FailureKind::BotDetection,
            404 => return FailureKind::NotFound,
            _ if status.is_client_error() => return FailureKind::ClientError,
            _ if status.is_server_error() => return FailureKind::ServerError,
            _ => {
                // Non-standard status codes fall through to the error kind
            }
        }
    }

    if error.is_builder() {
        FailureKind::Builder
    } else if error.is_redirect() {
        FailureKind::Redirect
    } else if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_connect() {
        FailureKind::Connect
    } else if error.is_body() {
        FailureKind::Body
    } else if error.is_decode() {
        FailureKind::Decode
    } else {
        FailureKind::Other
    }
}

/// Whether a transport error (no response) is worth retrying in-session.
pub(crate) fn is_retriable_transport_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}
