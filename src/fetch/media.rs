//! Best-effort batch download of asset URLs into one folder.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use rand::Rng;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::config::DelayRange;
use crate::error_handling::{categorize_reqwest_error, DownloadError};
use crate::http::{AssetHeaders, HttpSession};
use crate::utils::{safe_filename, url_path_lower};

/// What happened to one requested asset URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Written to this path
    Saved(PathBuf),
    /// Request or write failed; the reason is the rendered error
    Failed(String),
    /// Rejected by the extension filter; counts neither way
    Skipped,
}

/// Per-URL outcomes of one batch, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub outcomes: Vec<(String, DownloadOutcome)>,
}

impl DownloadReport {
    /// Paths of the successfully saved files.
    pub fn saved_paths(&self) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                DownloadOutcome::Saved(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn saved(&self) -> usize {
        self.count(|o| matches!(o, DownloadOutcome::Saved(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DownloadOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, DownloadOutcome::Skipped))
    }

    /// URLs that passed the filter and were requested.
    pub fn attempted(&self) -> usize {
        self.saved() + self.failed()
    }

    fn count(&self, pred: impl Fn(&DownloadOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Downloads asset lists through one session.
///
/// The session is shared across the whole list (keep-alive, cookies). URLs
/// are processed strictly one after another; a random pause follows every
/// successful download.
pub struct MediaDownloader<'a> {
    session: &'a HttpSession,
    cancel: &'a CancellationToken,
    pause: DelayRange,
}

impl<'a> MediaDownloader<'a> {
    pub fn new(session: &'a HttpSession, cancel: &'a CancellationToken, pause: DelayRange) -> Self {
        Self {
            session,
            cancel,
            pause,
        }
    }

    /// Downloads every URL whose path ends with one of `extensions`.
    ///
    /// Matching is a case-insensitive suffix test on the URL path; an empty
    /// `extensions` accepts everything. No single failure aborts the batch.
    /// The batch stops early only when the cancellation token fires; the
    /// caller checks the token afterwards.
    ///
    /// # Arguments
    ///
    /// * `urls` - Asset URLs in request order
    /// * `folder` - Destination folder (created if missing)
    /// * `extensions` - Accepted extensions with leading dot
    /// * `rng` - Random source for the post-download pause
    pub async fn download_all<R: Rng + ?Sized>(
        &self,
        urls: &[String],
        folder: &Path,
        extensions: &[&str],
        rng: &mut R,
    ) -> DownloadReport {
        let mut report = DownloadReport::default();
        if urls.is_empty() {
            log::debug!("No URLs to download for {}", folder.display());
            return report;
        }
        if let Err(e) = tokio::fs::create_dir_all(folder).await {
            log::warn!("Could not create {}: {}", folder.display(), e);
        }

        for url in urls {
            if self.cancel.is_cancelled() {
                log::info!("Download batch for {} cancelled", folder.display());
                break;
            }
            if !accepts(url, extensions) {
                log::debug!("Skipping {} (extension not accepted)", url);
                report.outcomes.push((url.clone(), DownloadOutcome::Skipped));
                continue;
            }

            match self.download_one(url, folder).await {
                Ok(path) => {
                    log::info!("Saved {} to {}", url, path.display());
                    report
                        .outcomes
                        .push((url.clone(), DownloadOutcome::Saved(path)));
                    self.pause(rng).await;
                }
                Err(e) => {
                    match &e {
                        DownloadError::Request(re) => log::warn!(
                            "Failed to download {} ({}): {}",
                            url,
                            categorize_reqwest_error(re),
                            re
                        ),
                        DownloadError::Io(io) => log::error!("Error saving {}: {}", url, io),
                        DownloadError::Cancelled => log::info!("Download of {} cancelled", url),
                    }
                    report
                        .outcomes
                        .push((url.clone(), DownloadOutcome::Failed(e.to_string())));
                }
            }
        }

        log::info!(
            "Successfully downloaded {} out of {} files to {} ({} skipped)",
            report.saved(),
            report.attempted(),
            folder.display(),
            report.skipped()
        );
        report
    }

    async fn download_one(&self, url: &str, folder: &Path) -> Result<PathBuf, DownloadError> {
        let response = self
            .session
            .get(
                url,
                AssetHeaders::for_url(url),
                self.session.config().asset_timeout,
                self.cancel,
            )
            .await?;

        let path = folder.join(safe_filename(url, None));
        let mut file = tokio::fs::File::create(&path).await?;

        let written = tokio::select! {
            _ = self.cancel.cancelled() => Err(DownloadError::Cancelled),
            result = stream_to_file(response, &mut file) => result,
        };
        drop(file);

        if let Err(e) = written {
            // Never leave a truncated file behind
            if let Err(rm) = tokio::fs::remove_file(&path).await {
                log::debug!("Could not remove partial file {}: {}", path.display(), rm);
            }
            return Err(e);
        }
        Ok(path)
    }

    async fn pause<R: Rng + ?Sized>(&self, rng: &mut R) {
        let delay = self.pause.sample(rng);
        if delay.is_zero() {
            return;
        }
        tokio::select! {
            _ = self.cancel.cancelled() => {}
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

async fn stream_to_file(
    response: reqwest::Response,
    file: &mut tokio::fs::File,
) -> Result<(), DownloadError> {
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    Ok(())
}

/// Case-insensitive suffix match of the URL path against `extensions`.
pub(crate) fn accepts(url: &str, extensions: &[&str]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let path = url_path_lower(url);
    extensions
        .iter()
        .any(|ext| path.ends_with(&ext.to_ascii_lowercase()))
}
