// Shared test helpers for pipeline runs against a mock server.

use std::path::{Path, PathBuf};
use std::time::Duration;

use site_harvest::config::{DelayPolicy, RetryPolicy};
use site_harvest::http::TransportRetryPolicy;
use site_harvest::{ScrapeEvent, ScrapeOptions};
use tokio::sync::mpsc::UnboundedReceiver;

/// A page with three links, two images (one with a non-image extension),
/// one stylesheet, one script, one email address and one social profile.
#[allow(dead_code)] // Used by other test files
pub const FIXTURE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Fixture Page</title>
  <meta name="description" content="A page for harvesting">
  <meta name="keywords" content="fixture, harvest">
  <meta property="og:title" content="Fixture OG">
  <link rel="stylesheet" href="/style.css">
  <script src="/app.js"></script>
</head>
<body>
  <a href="/about">About</a>
  <a href="/contact">Contact</a>
  <a href="https://twitter.com/fixture">Follow us</a>
  <img src="/logo.png" alt="logo">
  <img src="/notes.txt" alt="not an image">
  <p>Write to info@fixture.test</p>
</body>
</html>
"#;

#[allow(dead_code)]
pub const MINIMAL_PAGE: &str = "<html><head><title>Minimal</title></head><body></body></html>";

/// Options for fast, deterministic tests: no waits, no in-session retries,
/// millisecond outer backoff.
#[allow(dead_code)]
pub fn fast_options(max_attempts: u32) -> ScrapeOptions {
    let mut options = ScrapeOptions::new(false, false, max_attempts);
    options.delays = DelayPolicy::none();
    options.session.transport_retry = TransportRetryPolicy::disabled();
    options.retry = RetryPolicy {
        max_attempts,
        backoff_base: Duration::from_millis(5),
    };
    options
}

/// Drains every event already sent on `rx`.
#[allow(dead_code)]
pub fn drain(rx: &mut UnboundedReceiver<ScrapeEvent>) -> Vec<ScrapeEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Sorted names of the regular files directly inside `dir`.
#[allow(dead_code)]
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.path().is_file())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[allow(dead_code)]
pub fn read(path: PathBuf) -> String {
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e))
}
