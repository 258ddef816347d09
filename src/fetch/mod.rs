//! Asset downloading.
//!
//! `MediaDownloader` fetches one asset class at a time through the run's
//! session, filtering by extension and naming files with
//! [`safe_filename`](crate::utils::safe_filename).

mod class;
mod media;

pub use class::AssetClass;
pub use media::{DownloadOutcome, DownloadReport, MediaDownloader};
