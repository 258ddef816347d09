//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_harvest` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Ctrl-C cancellation and user-facing progress output
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use site_harvest::initialization::init_logger_with;
use site_harvest::utils::validate_and_normalize_url;
use site_harvest::{Config, ScrapeEvent, Scraper};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // HARVEST_PROXIES can be set there instead of on the command line
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let Some(url) = validate_and_normalize_url(&config.url) else {
        eprintln!("site-harvest error: invalid URL '{}'", config.url);
        process::exit(1);
    };

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, stopping after the current step");
            ctrl_c.cancel();
        }
    });

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            print_event(&event);
        }
    });

    let scraper = Scraper::new(config.scrape_options())
        .with_identity_pool(config.identity_pool())
        .with_cancellation(cancel)
        .with_events(tx);

    let result = scraper.scrape(&url, &config.output).await;
    // Closing the sender lets the printer drain and exit
    drop(scraper);
    let _ = printer.await;

    match result {
        Ok(folder) => {
            println!("✅ Harvested {} into {}", url, folder.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("site-harvest error: {}", e);
            process::exit(1);
        }
    }
}

fn print_event(event: &ScrapeEvent) {
    match event {
        ScrapeEvent::BackingOff { attempt, wait } => {
            println!(
                "Attempt {} failed, retrying in {:.1}s",
                attempt,
                wait.as_secs_f64()
            );
        }
        ScrapeEvent::Extracted {
            links,
            images,
            videos,
            css,
            js,
            emails,
            phones,
            social_platforms,
        } => {
            println!(
                "Found {} links, {} images, {} videos, {} CSS, {} JS, {} emails, {} phone numbers, {} social platforms",
                links, images, videos, css, js, emails, phones, social_platforms
            );
        }
        ScrapeEvent::BatchFinished {
            class,
            saved,
            attempted,
        } => {
            println!("Downloaded {}/{} {}", saved, attempted, class);
        }
        ScrapeEvent::ArtifactFailed { path, message } => {
            println!("Could not write {}: {}", path.display(), message);
        }
        _ => {}
    }
}
