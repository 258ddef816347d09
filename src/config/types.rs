//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and converts them into the library's [`ScrapeOptions`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_MAX_RETRIES, DEFAULT_SAVE_ROOT};
use crate::config::options::{ExtractionToggles, RetryPolicy, ScrapeOptions};
use crate::identity::IdentityPool;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line configuration of the `site-harvest` binary.
///
/// # Examples
///
/// ```
/// use clap::Parser;
/// use site_harvest::Config;
///
/// let config = Config::parse_from(["site-harvest", "https://example.com", "--max-retries", "5"]);
/// assert_eq!(config.max_retries, 5);
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "site-harvest",
    version,
    about = "Harvests one web page: markup, assets, contacts, social links and metadata"
)]
pub struct Config {
    /// URL of the page to harvest (https:// is assumed when no scheme is given)
    pub url: String,

    /// Root folder; output lands in <OUTPUT>/<domain>/
    #[arg(short, long, default_value = DEFAULT_SAVE_ROOT)]
    pub output: PathBuf,

    /// Route requests through a proxy drawn from the proxy pool
    #[arg(long)]
    pub use_proxy: bool,

    /// Proxy URL added to the pool (repeatable)
    #[arg(
        long = "proxy",
        value_name = "URL",
        env = "HARVEST_PROXIES",
        value_delimiter = ','
    )]
    pub proxies: Vec<String>,

    /// Disable the random waits before fetches and after writes
    #[arg(long)]
    pub no_random_delay: bool,

    /// Whole-fetch attempts, each with a fresh session
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub max_retries: u32,

    /// Status-code retries inside one session (defaults to --max-retries)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub transport_retries: Option<u32>,

    /// Crawl depth (only the given page is harvested; values above 0 are ignored)
    #[arg(long, default_value_t = 0)]
    pub depth: u32,

    /// Do not extract email addresses
    #[arg(long)]
    pub skip_emails: bool,

    /// Do not extract phone numbers
    #[arg(long)]
    pub skip_phones: bool,

    /// Do not extract social media links
    #[arg(long)]
    pub skip_social: bool,

    /// Do not download images
    #[arg(long)]
    pub skip_images: bool,

    /// Do not download videos
    #[arg(long)]
    pub skip_videos: bool,

    /// Do not download stylesheets and scripts
    #[arg(long)]
    pub skip_css_js: bool,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Config {
    /// Converts the CLI flags into pipeline options.
    pub fn scrape_options(&self) -> ScrapeOptions {
        let mut options = ScrapeOptions::new(self.use_proxy, !self.no_random_delay, self.max_retries);
        if let Some(transport_retries) = self.transport_retries {
            options.session.transport_retry.max_retries = transport_retries;
        }
        options.retry = RetryPolicy {
            max_attempts: self.max_retries,
            ..options.retry
        };
        options.extract = ExtractionToggles {
            emails: !self.skip_emails,
            phones: !self.skip_phones,
            social: !self.skip_social,
            images: !self.skip_images,
            videos: !self.skip_videos,
            css_js: !self.skip_css_js,
        };
        options.depth = self.depth;
        options
    }

    /// Builds the identity pool: default user agents and referrers, plus any
    /// proxies given on the command line.
    pub fn identity_pool(&self) -> IdentityPool {
        let proxies = self
            .proxies
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        let pool = IdentityPool::default();
        if proxies.is_empty() {
            pool
        } else {
            pool.with_proxies(proxies)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::parse_from(["site-harvest", "https://example.com"]);
        assert_eq!(config.url, "https://example.com");
        assert_eq!(config.output, PathBuf::from(DEFAULT_SAVE_ROOT));
        assert_eq!(config.max_retries, 3);
        assert!(config.transport_retries.is_none());
        assert!(!config.use_proxy);
        assert!(!config.no_random_delay);
        assert_eq!(config.depth, 0);
    }

    #[test]
    fn test_scrape_options_from_flags() {
        let config = Config::parse_from([
            "site-harvest",
            "https://example.com",
            "--no-random-delay",
            "--max-retries",
            "4",
            "--skip-phones",
            "--skip-css-js",
        ]);
        let options = config.scrape_options();
        assert!(!options.delays.random_delay);
        assert_eq!(options.retry.max_attempts, 4);
        // Transport retries follow --max-retries unless given explicitly
        assert_eq!(options.session.transport_retry.max_retries, 4);
        assert!(options.extract.emails);
        assert!(!options.extract.phones);
        assert!(!options.extract.css_js);
        assert!(options.extract.images);
    }

    #[test]
    fn test_transport_retries_override() {
        let config = Config::parse_from([
            "site-harvest",
            "https://example.com",
            "--transport-retries",
            "0",
        ]);
        let options = config.scrape_options();
        assert_eq!(options.session.transport_retry.max_retries, 0);
        assert_eq!(options.retry.max_attempts, 3);
    }

    #[test]
    fn test_max_retries_out_of_range_rejected() {
        let result = Config::try_parse_from(["site-harvest", "https://example.com", "--max-retries", "0"]);
        assert!(result.is_err());
        let result = Config::try_parse_from(["site-harvest", "https://example.com", "--max-retries", "11"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_identity_pool_takes_cli_proxies() {
        let config = Config::parse_from([
            "site-harvest",
            "https://example.com",
            "--proxy",
            "http://p1.example:8080",
            "--proxy",
            " ",
        ]);
        let pool = config.identity_pool();
        assert_eq!(pool.proxies(), ["http://p1.example:8080".to_string()]);
    }
}
