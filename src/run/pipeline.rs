//! The harvest pipeline: fetch, extract, persist, download, summarize.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use strum::IntoEnumIterator;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ScrapeOptions;
use crate::error_handling::{categorize_reqwest_error, FetchError, ScrapeError};
use crate::fetch::{AssetClass, DownloadReport, MediaDownloader};
use crate::http::HttpSession;
use crate::identity::IdentityPool;
use crate::parse::ExtractionResult;
use crate::run::events::{EventSink, ScrapeEvent};
use crate::storage::{write_json, write_lines, write_text, AssetReports, OutputLayout, RunSummary};
use crate::utils::domain_of;

/// A page as received from the server.
struct FetchedPage {
    final_url: String,
    markup: String,
}

/// Harvests single pages into per-domain output folders.
///
/// A `Scraper` is reusable and may be shared across tasks; every call to
/// [`scrape`](Scraper::scrape) derives its own random source from the
/// scraper's seeded generator, so concurrent runs never contend on it
/// across awaits.
///
/// # Example
///
/// ```no_run
/// use site_harvest::{ScrapeOptions, Scraper};
///
/// # async fn demo() -> Result<(), site_harvest::ScrapeError> {
/// let scraper = Scraper::new(ScrapeOptions::default()).with_seed(7);
/// let folder = scraper
///     .scrape("https://example.com", std::path::Path::new("scraped_sites"))
///     .await?;
/// println!("saved to {}", folder.display());
/// # Ok(())
/// # }
/// ```
pub struct Scraper {
    options: ScrapeOptions,
    identities: IdentityPool,
    rng: Mutex<StdRng>,
    cancel: CancellationToken,
    events: EventSink,
}

impl Scraper {
    pub fn new(options: ScrapeOptions) -> Self {
        Self {
            options,
            identities: IdentityPool::default(),
            rng: Mutex::new(StdRng::from_os_rng()),
            cancel: CancellationToken::new(),
            events: EventSink::new(None),
        }
    }

    /// Makes fingerprint draws and delays reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_identity_pool(mut self, identities: IdentityPool) -> Self {
        self.identities = identities;
        self
    }

    /// Uses `cancel` instead of the scraper's own token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_events(mut self, tx: UnboundedSender<ScrapeEvent>) -> Self {
        self.events = EventSink::new(Some(tx));
        self
    }

    pub fn options(&self) -> &ScrapeOptions {
        &self.options
    }

    /// A handle that cancels every run of this scraper when fired.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Harvests `url` into `<save_root>/<sanitized domain>/`.
    ///
    /// The page is fetched with up to `retry.max_attempts` outer attempts,
    /// each with a fresh fingerprint and session. Nothing is written before
    /// the fetch succeeds. Asset and artifact failures are logged and do not
    /// fail the run.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl` when `url` is not an absolute http(s) URL
    /// - `Fetch` when every outer attempt failed
    /// - `Cancelled` when the cancellation token fired
    /// - `Storage` when the output folders cannot be created
    /// - `Session` when the HTTP client cannot be built
    pub async fn scrape(&self, url: &str, save_root: &Path) -> Result<PathBuf, ScrapeError> {
        check_url(url)?;
        let domain = domain_of(url);
        if self.options.depth > 0 {
            warn!(
                "Crawl depth {} requested; only the given page is harvested",
                self.options.depth
            );
        }
        let mut rng = self.run_rng();

        let (session, page) = self.fetch_with_retry(url, &mut rng).await?;

        self.check_cancelled("extraction")?;
        let extracted =
            ExtractionResult::from_markup(&page.markup, &page.final_url, &self.options.extract);
        self.events.emit(ScrapeEvent::Extracted {
            links: extracted.links.len(),
            images: extracted.images.len(),
            videos: extracted.videos.len(),
            css: extracted.css.len(),
            js: extracted.js.len(),
            emails: extracted.emails.len(),
            phones: extracted.phones.len(),
            social_platforms: extracted.social.len(),
        });

        self.check_cancelled("persistence")?;
        let layout = OutputLayout::create(save_root, &domain)
            .await
            .map_err(|(path, source)| ScrapeError::Storage { path, source })?;

        let path = layout.base.join("index.html");
        let written = write_text(&path, &page.markup).await;
        self.settle(&path, written, &mut rng).await;
        let path = layout.html.join("main.html");
        let written = write_text(&path, &page.markup).await;
        self.settle(&path, written, &mut rng).await;
        let path = layout.data.join("links.txt");
        let written = write_lines(&path, &extracted.links).await;
        self.settle(&path, written, &mut rng).await;

        let assets = self
            .download_assets(&session, &layout, &extracted, &mut rng)
            .await?;

        if self.options.extract.emails {
            let path = layout.data.join("emails.txt");
            let written = write_lines(&path, &extracted.emails).await;
            self.settle(&path, written, &mut rng).await;
        }
        if self.options.extract.phones {
            let path = layout.data.join("phone_numbers.txt");
            let written = write_lines(&path, &extracted.phones).await;
            self.settle(&path, written, &mut rng).await;
        }
        if self.options.extract.social {
            let path = layout.data.join("social_media.json");
            let written = write_json(&path, &extracted.social).await;
            self.settle(&path, written, &mut rng).await;
        }
        let path = layout.data.join("meta_data.json");
        let written = write_json(&path, &extracted.meta).await;
        self.settle(&path, written, &mut rng).await;

        let summary = RunSummary::new(url, &domain, &extracted, &assets);
        let path = layout.base.join("summary.md");
        let written = write_text(&path, &summary.render_markdown()).await;
        self.settle(&path, written, &mut rng).await;

        info!("Successfully scraped {}", url);
        info!("All data saved to {}", layout.base.display());
        self.events.emit(ScrapeEvent::Finished {
            base: layout.base.clone(),
        });
        Ok(layout.base)
    }

    async fn fetch_with_retry(
        &self,
        url: &str,
        rng: &mut StdRng,
    ) -> Result<(HttpSession, FetchedPage), ScrapeError> {
        let policy = self.options.retry;
        let max_attempts = policy.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.check_cancelled("fetch")?;

            let fingerprint = self.identities.draw(rng, self.options.session.use_proxy);
            let user_agent = fingerprint.user_agent.clone();
            let session = HttpSession::new(&self.options.session, fingerprint)?;
            info!(
                "Starting to scrape: {} (attempt {}/{})",
                url, attempt, max_attempts
            );
            self.events.emit(ScrapeEvent::AttemptStarted {
                attempt,
                max_attempts,
                user_agent,
            });

            if self.options.delays.random_delay {
                let delay = self.options.delays.page_jitter.sample(rng);
                info!("Waiting {:.2} seconds before request", delay.as_secs_f64());
                self.events.emit(ScrapeEvent::Waiting { delay });
                self.pause(delay, "fetch").await?;
            }

            match self.fetch_once(&session, url).await {
                Ok(page) => return Ok((session, page)),
                Err(FetchError::Cancelled) => {
                    return Err(ScrapeError::Cancelled { stage: "fetch" })
                }
                Err(e) => {
                    let kind = match &e {
                        FetchError::Request(re) => Some(categorize_reqwest_error(re)),
                        FetchError::Cancelled => None,
                    };
                    warn!(
                        "Request error (attempt {}/{}): {}",
                        attempt, max_attempts, e
                    );
                    self.events.emit(ScrapeEvent::AttemptFailed {
                        attempt,
                        kind,
                        message: e.to_string(),
                    });
                    if attempt >= max_attempts {
                        error!(
                            "Failed to scrape {} after {} attempts: {}",
                            url, max_attempts, e
                        );
                        return Err(ScrapeError::Fetch {
                            url: url.to_string(),
                            attempts: attempt,
                            source: e,
                        });
                    }
                    let wait = policy.backoff(attempt);
                    info!("Waiting {} seconds before retrying", wait.as_secs_f64());
                    self.events.emit(ScrapeEvent::BackingOff { attempt, wait });
                    self.pause(wait, "fetch").await?;
                }
            }
        }
    }

    async fn fetch_once(&self, session: &HttpSession, url: &str) -> Result<FetchedPage, FetchError> {
        let response = session.fetch_page(url, &self.cancel).await?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let markup = tokio::select! {
            _ = self.cancel.cancelled() => return Err(FetchError::Cancelled),
            body = response.text() => body?,
        };
        info!("Fetched {} ({}, {} bytes)", final_url, status, markup.len());
        self.events.emit(ScrapeEvent::Fetched {
            url: final_url.clone(),
            status,
            bytes: markup.len(),
        });
        Ok(FetchedPage { final_url, markup })
    }

    async fn download_assets(
        &self,
        session: &HttpSession,
        layout: &OutputLayout,
        extracted: &ExtractionResult,
        rng: &mut StdRng,
    ) -> Result<AssetReports, ScrapeError> {
        let downloader = MediaDownloader::new(session, &self.cancel, self.options.delays.media_pause);
        let toggles = &self.options.extract;
        let mut assets = AssetReports::default();

        for class in AssetClass::iter() {
            let (enabled, urls, folder) = match class {
                AssetClass::Images => (toggles.images, &extracted.images, &layout.images),
                AssetClass::Videos => (toggles.videos, &extracted.videos, &layout.videos),
                AssetClass::Css => (toggles.css_js, &extracted.css, &layout.css),
                AssetClass::Js => (toggles.css_js, &extracted.js, &layout.js),
            };
            if !enabled {
                continue;
            }
            self.check_cancelled("asset download")?;

            let report = downloader
                .download_all(urls, folder, class.extensions(), rng)
                .await;
            info!(
                "Downloaded {}/{} {}",
                report.saved(),
                report.attempted(),
                class
            );
            self.events.emit(ScrapeEvent::BatchFinished {
                class,
                saved: report.saved(),
                attempted: report.attempted(),
            });
            *slot(&mut assets, class) = report;
        }

        self.check_cancelled("asset download")?;
        Ok(assets)
    }

    /// Reports one artifact write and applies the save pause after a success.
    async fn settle(&self, path: &Path, written: io::Result<PathBuf>, rng: &mut StdRng) {
        match written {
            Ok(path) => {
                info!("Saved {}", path.display());
                self.events.emit(ScrapeEvent::ArtifactWritten { path });
                if self.options.delays.random_delay {
                    let delay = self.options.delays.save_pause.sample(rng);
                    // Cancellation is picked up at the next stage boundary
                    let _ = self.pause(delay, "persistence").await;
                }
            }
            Err(e) => {
                error!("Error saving {}: {}", path.display(), e);
                self.events.emit(ScrapeEvent::ArtifactFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
        }
    }

    async fn pause(&self, delay: Duration, stage: &'static str) -> Result<(), ScrapeError> {
        if delay.is_zero() {
            return Ok(());
        }
        tokio::select! {
            _ = self.cancel.cancelled() => Err(ScrapeError::Cancelled { stage }),
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }

    fn check_cancelled(&self, stage: &'static str) -> Result<(), ScrapeError> {
        if self.cancel.is_cancelled() {
            warn!("Scrape cancelled before {}", stage);
            return Err(ScrapeError::Cancelled { stage });
        }
        Ok(())
    }

    fn run_rng(&self) -> StdRng {
        let mut shared = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        StdRng::from_rng(&mut *shared)
    }
}

fn slot(assets: &mut AssetReports, class: AssetClass) -> &mut DownloadReport {
    match class {
        AssetClass::Images => &mut assets.images,
        AssetClass::Videos => &mut assets.videos,
        AssetClass::Css => &mut assets.css,
        AssetClass::Js => &mut assets.js,
    }
}

fn check_url(url: &str) -> Result<(), ScrapeError> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ScrapeError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Harvests `url` with default timing and identity pools.
///
/// Convenience wrapper over [`Scraper`] for one-off runs.
pub async fn scrape(
    url: &str,
    save_root: impl AsRef<Path>,
    use_proxy: bool,
    use_random_delay: bool,
    max_retries: u32,
) -> Result<PathBuf, ScrapeError> {
    Scraper::new(ScrapeOptions::new(use_proxy, use_random_delay, max_retries))
        .scrape(url, save_root.as_ref())
        .await
}
