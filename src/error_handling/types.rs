//! Error type definitions.
//!
//! This module defines the error types surfaced by the pipeline, by single
//! fetch attempts and by asset downloads, plus the failure categories used in
//! log lines.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error building the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure of one whole pipeline run.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The target URL could not be parsed or has an unsupported scheme.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP session could not be built.
    #[error("Failed to build HTTP session: {0}")]
    Session(#[from] InitializationError),

    /// Every outer attempt failed.
    #[error("Failed to scrape {url} after {attempts} attempts: {source}")]
    Fetch {
        url: String,
        attempts: u32,
        #[source]
        source: FetchError,
    },

    /// The cancellation token fired.
    #[error("Scrape cancelled before {stage}")]
    Cancelled { stage: &'static str },

    /// The output folder layout could not be created.
    #[error("Failed to create output folder {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of one fetch attempt, after transport-level retries.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network error, timeout, or non-2xx status.
    #[error("{0}")]
    Request(#[from] ReqwestError),

    /// The request was abandoned because the run was cancelled.
    #[error("request cancelled")]
    Cancelled,
}

/// Failure of one asset download. Never fails the batch.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Request(#[from] ReqwestError),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("download cancelled")]
    Cancelled,
}

impl From<FetchError> for DownloadError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Request(e) => DownloadError::Request(e),
            FetchError::Cancelled => DownloadError::Cancelled,
        }
    }
}

/// Request failure categories, used to label log lines and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    Timeout,
    Connect,
    TooManyRequests,
    BotDetection,
    NotFound,
    ClientError,
    ServerError,
    Redirect,
    Body,
    Decode,
    Builder,
    Other,
}

impl FailureKind {
    /// Returns a human-readable string representation of the failure kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "Request timeout",
            FailureKind::Connect => "Connection error",
            FailureKind::TooManyRequests => "Too Many Requests (429)",
            FailureKind::BotDetection => "Bot detection (403 Forbidden)",
            FailureKind::NotFound => "Not Found (404)",
            FailureKind::ClientError => "Client error (4xx)",
            FailureKind::ServerError => "Server error (5xx)",
            FailureKind::Redirect => "Redirect error",
            FailureKind::Body => "Response body error",
            FailureKind::Decode => "Response decode error",
            FailureKind::Builder => "Request builder error",
            FailureKind::Other => "Other request error",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
