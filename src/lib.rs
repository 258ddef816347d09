//! site_harvest library: single-page website harvesting
//!
//! Fetches one web page with a rotating browser-like identity, extracts its
//! links, assets, contact details, social profiles and metadata, downloads
//! the referenced images, videos, stylesheets and scripts, and writes
//! everything into a per-domain folder together with a Markdown summary.
//!
//! # Example
//!
//! ```no_run
//! use site_harvest::{ScrapeOptions, Scraper};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scraper = Scraper::new(ScrapeOptions::new(false, true, 3));
//! let folder = scraper
//!     .scrape("https://example.com", std::path::Path::new("scraped_sites"))
//!     .await?;
//! println!("Harvested into {}", folder.display());
//! # Ok(())
//! # }
//! ```
//!
//! Output layout:
//!
//! ```text
//! <save_root>/<domain>/
//!     index.html  summary.md
//!     html/main.html
//!     images/  videos/  css/  js/
//!     data/links.txt  data/emails.txt  data/phone_numbers.txt
//!     data/social_media.json  data/meta_data.json
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod http;
pub mod identity;
pub mod initialization;
pub mod parse;
mod run;
pub mod storage;
pub mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, ScrapeOptions};
pub use error_handling::{FailureKind, ScrapeError};
pub use fetch::AssetClass;
pub use identity::{Fingerprint, IdentityPool};
pub use parse::ExtractionResult;
pub use run::{scrape, ScrapeEvent, Scraper};
