//! End-to-end pipeline tests against a local mock server.
//!
//! Every run uses `DelayPolicy::none()` so no test sleeps, and httptest
//! fails the test if a request arrives that no expectation covers (which is
//! how the extension filter and the toggles are verified).

mod helpers;

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::mpsc;

use helpers::{drain, fast_options, file_names, read, FIXTURE_PAGE};
use site_harvest::{AssetClass, ScrapeEvent, Scraper};

fn serve_fixture(server: &Server, times: usize) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .times(times)
            .respond_with(
                status_code(200)
                    .insert_header("Content-Type", "text/html; charset=utf-8")
                    .body(FIXTURE_PAGE),
            ),
    );
}

fn serve_assets(server: &Server, times: usize) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/logo.png"))
            .times(times)
            .respond_with(status_code(200).body("PNGDATA")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/style.css"))
            .times(times)
            .respond_with(status_code(200).body("body { color: red; }")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/app.js"))
            .times(times)
            .respond_with(status_code(200).body("console.log('hi');")),
    );
}

#[tokio::test]
async fn test_full_harvest_writes_expected_layout() {
    let server = Server::run();
    serve_fixture(&server, 1);
    serve_assets(&server, 1);
    let out = TempDir::new().unwrap();
    let url = server.url("/").to_string();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let scraper = Scraper::new(fast_options(1)).with_seed(3).with_events(tx);
    let base = scraper.scrape(&url, out.path()).await.expect("harvest should succeed");

    assert!(base.starts_with(out.path()));
    assert_eq!(read(base.join("index.html")), FIXTURE_PAGE);
    assert_eq!(read(base.join("html").join("main.html")), FIXTURE_PAGE);

    let links = read(base.join("data").join("links.txt"));
    let links: Vec<&str> = links.lines().collect();
    assert_eq!(links.len(), 3);
    assert!(links[0].ends_with("/about"));
    assert!(links[1].ends_with("/contact"));
    assert_eq!(links[2], "https://twitter.com/fixture");

    assert_eq!(read(base.join("data").join("emails.txt")).trim(), "info@fixture.test");
    assert_eq!(read(base.join("data").join("phone_numbers.txt")), "");

    let social: Value =
        serde_json::from_str(&read(base.join("data").join("social_media.json"))).unwrap();
    assert_eq!(social["twitter"][0], "https://twitter.com/fixture");

    let meta: Value = serde_json::from_str(&read(base.join("data").join("meta_data.json"))).unwrap();
    assert_eq!(meta["title"], "Fixture Page");
    assert_eq!(meta["description"], "A page for harvesting");
    assert_eq!(meta["og_tags"]["title"], "Fixture OG");

    assert_eq!(file_names(&base.join("images")), vec!["logo.png"]);
    assert_eq!(read(base.join("images").join("logo.png")), "PNGDATA");
    assert_eq!(file_names(&base.join("css")), vec!["style.css"]);
    assert_eq!(file_names(&base.join("js")), vec!["app.js"]);
    assert!(file_names(&base.join("videos")).is_empty());

    let summary = read(base.join("summary.md"));
    assert!(summary.starts_with("# Website Scraping Summary"));
    assert!(summary.contains(&format!("URL: {}", url)));
    assert!(summary.contains("- Links: 3"));
    assert!(summary.contains("- Images: 2 (1 downloaded)"));
    assert!(summary.contains("- Videos: 0 (0 downloaded)"));
    assert!(summary.contains("- CSS Files: 1 (1 downloaded)"));
    assert!(summary.contains("- JavaScript Files: 1 (1 downloaded)"));
    assert!(summary.contains("- Emails: 1"));
    assert!(summary.contains("- Social Media Platforms: twitter"));
    assert!(summary.contains("- Title: Fixture Page"));

    drop(scraper);
    let events = drain(&mut rx);
    assert!(matches!(events.first(), Some(ScrapeEvent::AttemptStarted { attempt: 1, .. })));
    assert!(events.contains(&ScrapeEvent::BatchFinished {
        class: AssetClass::Images,
        saved: 1,
        attempted: 1,
    }));
    assert_eq!(events.last(), Some(&ScrapeEvent::Finished { base: base.clone() }));
    assert!(!events
        .iter()
        .any(|e| matches!(e, ScrapeEvent::ArtifactFailed { .. })));
}

#[tokio::test]
async fn test_failed_asset_does_not_fail_run() {
    let server = Server::run();
    serve_fixture(&server, 1);
    server.expect(
        Expectation::matching(request::method_path("GET", "/logo.png"))
            .respond_with(status_code(404)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/style.css"))
            .respond_with(status_code(200).body("css")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/app.js"))
            .respond_with(status_code(200).body("js")),
    );
    let out = TempDir::new().unwrap();

    let base = Scraper::new(fast_options(1))
        .scrape(&server.url("/").to_string(), out.path())
        .await
        .expect("asset failures are not fatal");

    assert!(file_names(&base.join("images")).is_empty());
    let summary = read(base.join("summary.md"));
    assert!(summary.contains("- Images: 2 (0 downloaded)"));
    assert!(summary.contains("- CSS Files: 1 (1 downloaded)"));
}

#[tokio::test]
async fn test_disabled_classes_are_neither_downloaded_nor_written() {
    let server = Server::run();
    serve_fixture(&server, 1);
    let out = TempDir::new().unwrap();

    let mut options = fast_options(1);
    options.extract.images = false;
    options.extract.videos = false;
    options.extract.css_js = false;
    options.extract.emails = false;
    options.extract.phones = false;
    options.extract.social = false;

    let base = Scraper::new(options)
        .scrape(&server.url("/").to_string(), out.path())
        .await
        .unwrap();

    let data = file_names(&base.join("data"));
    assert_eq!(data, vec!["links.txt", "meta_data.json"]);
    assert!(file_names(&base.join("images")).is_empty());
    let summary = read(base.join("summary.md"));
    assert!(summary.contains("- Images: 0 (0 downloaded)"));
    assert!(summary.contains("- Social Media Platforms: None"));
}

#[tokio::test]
async fn test_repeat_run_overwrites_in_place() {
    let server = Server::run();
    serve_fixture(&server, 2);
    serve_assets(&server, 2);
    let out = TempDir::new().unwrap();
    let url = server.url("/").to_string();
    let scraper = Scraper::new(fast_options(1)).with_seed(11);

    let first = scraper.scrape(&url, out.path()).await.unwrap();
    let links_before = read(first.join("data").join("links.txt"));
    let second = scraper.scrape(&url, out.path()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 1);
    assert_eq!(read(second.join("data").join("links.txt")), links_before);
    assert_eq!(file_names(&second.join("images")), vec!["logo.png"]);
}

#[tokio::test]
async fn test_relative_urls_resolve_against_final_url() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/old"))
            .respond_with(status_code(301).insert_header("Location", "/docs/page")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/docs/page"))
            .respond_with(status_code(200).body(r#"<a href="next">next</a>"#)),
    );
    let out = TempDir::new().unwrap();

    let base = Scraper::new(fast_options(1))
        .scrape(&server.url("/old").to_string(), out.path())
        .await
        .unwrap();

    let links = read(base.join("data").join("links.txt"));
    assert_eq!(links.trim(), server.url("/docs/next").to_string());
}
