//! Structured progress events.
//!
//! The pipeline reports progress through an optional unbounded channel. A
//! front-end that needs events on its own thread drains the receiver there.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::error_handling::FailureKind;
use crate::fetch::AssetClass;

/// One step of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeEvent {
    /// An outer attempt began with a freshly drawn fingerprint.
    AttemptStarted {
        attempt: u32,
        max_attempts: u32,
        user_agent: String,
    },
    /// Jitter before the page request.
    Waiting { delay: Duration },
    /// The page was fetched.
    Fetched {
        url: String,
        status: u16,
        bytes: usize,
    },
    /// An outer attempt failed.
    AttemptFailed {
        attempt: u32,
        kind: Option<FailureKind>,
        message: String,
    },
    /// Backoff before the next outer attempt.
    BackingOff { attempt: u32, wait: Duration },
    /// Extraction finished.
    Extracted {
        links: usize,
        images: usize,
        videos: usize,
        css: usize,
        js: usize,
        emails: usize,
        phones: usize,
        social_platforms: usize,
    },
    /// One asset class was downloaded.
    BatchFinished {
        class: AssetClass,
        saved: usize,
        attempted: usize,
    },
    ArtifactWritten { path: PathBuf },
    ArtifactFailed { path: PathBuf, message: String },
    /// The run completed; `base` is the output folder.
    Finished { base: PathBuf },
}

pub(crate) struct EventSink {
    tx: Option<UnboundedSender<ScrapeEvent>>,
}

impl EventSink {
    pub(crate) fn new(tx: Option<UnboundedSender<ScrapeEvent>>) -> Self {
        Self { tx }
    }

    /// Sends `event`; a closed receiver is ignored.
    pub(crate) fn emit(&self, event: ScrapeEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
