//! Outer retry behavior: fresh sessions, exponential backoff, fatal failure.

mod helpers;

use httptest::{cycle, matchers::*, responders::*, Expectation, Server};
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use helpers::{drain, fast_options, read, MINIMAL_PAGE};
use site_harvest::error_handling::FetchError;
use site_harvest::{ScrapeError, ScrapeEvent, Scraper};

#[tokio::test]
async fn test_recovers_after_two_server_errors() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .times(3)
            .respond_with(cycle![
                status_code(500),
                status_code(500),
                status_code(200).body(MINIMAL_PAGE),
            ]),
    );
    let out = TempDir::new().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let scraper = Scraper::new(fast_options(3)).with_seed(5).with_events(tx);

    let base = scraper
        .scrape(&server.url("/").to_string(), out.path())
        .await
        .expect("third attempt should succeed");
    assert_eq!(read(base.join("index.html")), MINIMAL_PAGE);

    drop(scraper);
    let events = drain(&mut rx);
    let waits: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ScrapeEvent::BackingOff { wait, .. } => Some(*wait),
            _ => None,
        })
        .collect();
    assert_eq!(waits.len(), 2);
    assert!(waits[0] < waits[1], "backoff should grow: {:?}", waits);

    let started = events
        .iter()
        .filter(|e| matches!(e, ScrapeEvent::AttemptStarted { .. }))
        .count();
    assert_eq!(started, 3);
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .times(3)
            .respond_with(status_code(503)),
    );
    let out = TempDir::new().unwrap();

    let result = Scraper::new(fast_options(3))
        .scrape(&server.url("/").to_string(), out.path())
        .await;

    match result {
        Err(ScrapeError::Fetch {
            attempts, source, ..
        }) => {
            assert_eq!(attempts, 3);
            assert!(matches!(source, FetchError::Request(_)));
        }
        other => panic!("expected fetch failure, got {:?}", other),
    }
    // Nothing is persisted for a page that was never fetched
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_permanent_client_error_uses_outer_attempts_only() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/missing"))
            .times(2)
            .respond_with(status_code(404)),
    );
    let out = TempDir::new().unwrap();

    let result = Scraper::new(fast_options(2))
        .scrape(&server.url("/missing").to_string(), out.path())
        .await;
    assert!(matches!(result, Err(ScrapeError::Fetch { attempts: 2, .. })));
}

#[tokio::test]
async fn test_cancellation_during_backoff_stops_retrying() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .times(1)
            .respond_with(status_code(500)),
    );
    let out = TempDir::new().unwrap();
    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut options = fast_options(5);
    options.retry.backoff_base = std::time::Duration::from_secs(30);
    let scraper = Scraper::new(options)
        .with_cancellation(cancel.clone())
        .with_events(tx);

    let url = server.url("/").to_string();
    let run = scraper.scrape(&url, out.path());
    let trigger = async {
        while let Some(event) = rx.recv().await {
            if matches!(event, ScrapeEvent::BackingOff { .. }) {
                cancel.cancel();
                break;
            }
        }
    };
    let (result, ()) = tokio::join!(run, trigger);

    assert!(matches!(result, Err(ScrapeError::Cancelled { stage: "fetch" })));
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}
