// Fetch module tests.

use httptest::{matchers::*, responders::*, Expectation, Server};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use super::media::accepts;
use super::*;
use crate::config::DelayRange;
use crate::http::{HttpSession, SessionConfig, TransportRetryPolicy};
use crate::identity::IdentityPool;

fn test_session() -> HttpSession {
    let config = SessionConfig {
        transport_retry: TransportRetryPolicy::disabled(),
        ..SessionConfig::default()
    };
    let fingerprint = IdentityPool::default().draw(&mut StdRng::seed_from_u64(1), false);
    HttpSession::new(&config, fingerprint).expect("session should build")
}

#[test]
fn test_accepts_suffix_case_insensitive() {
    assert!(accepts("https://x.com/a.PNG", &[".png"]));
    assert!(accepts("https://x.com/a.png?size=2", &[".png"]));
    assert!(!accepts("https://x.com/b.txt", &[".png"]));
    assert!(!accepts("https://x.com/png", &[".png"]));
    assert!(accepts("https://x.com/anything", &[]));
}

#[tokio::test]
async fn test_download_filters_by_extension() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/a.png"))
            .times(1)
            .respond_with(status_code(200).body("PNGDATA")),
    );
    let dir = TempDir::new().unwrap();
    let session = test_session();
    let cancel = CancellationToken::new();
    let downloader = MediaDownloader::new(&session, &cancel, DelayRange::ZERO);

    let urls = vec![
        server.url("/a.png").to_string(),
        server.url("/b.txt").to_string(),
    ];
    let report = downloader
        .download_all(&urls, dir.path(), &[".png"], &mut StdRng::seed_from_u64(2))
        .await;

    assert_eq!(report.saved(), 1);
    assert_eq!(report.attempted(), 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failed(), 0);
    let saved = report.saved_paths();
    assert_eq!(saved, vec![dir.path().join("a.png")]);
    assert_eq!(std::fs::read(&saved[0]).unwrap(), b"PNGDATA");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_download_failure_does_not_abort_batch() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/missing.css"))
            .times(1)
            .respond_with(status_code(404)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/site.css"))
            .times(1)
            .respond_with(status_code(200).body("body{}")),
    );
    let dir = TempDir::new().unwrap();
    let session = test_session();
    let cancel = CancellationToken::new();
    let downloader = MediaDownloader::new(&session, &cancel, DelayRange::ZERO);

    let urls = vec![
        server.url("/missing.css").to_string(),
        server.url("/site.css").to_string(),
    ];
    let report = downloader
        .download_all(&urls, dir.path(), &[".css"], &mut StdRng::seed_from_u64(3))
        .await;

    assert_eq!(report.saved(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.attempted(), 2);
    assert!(matches!(report.outcomes[0].1, DownloadOutcome::Failed(_)));
    assert!(!dir.path().join("missing.css").exists());
    assert!(dir.path().join("site.css").exists());
}

#[tokio::test]
async fn test_download_opaque_url_gets_hashed_name() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/asset"))
            .respond_with(status_code(200).body("x")),
    );
    let dir = TempDir::new().unwrap();
    let session = test_session();
    let cancel = CancellationToken::new();
    let downloader = MediaDownloader::new(&session, &cancel, DelayRange::ZERO);

    let urls = vec![server.url("/asset").to_string()];
    let report = downloader
        .download_all(&urls, dir.path(), &[], &mut StdRng::seed_from_u64(4))
        .await;

    let saved = report.saved_paths();
    assert_eq!(saved.len(), 1);
    let name = saved[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("file_") && name.ends_with(".bin"), "{}", name);
}

#[tokio::test]
async fn test_download_cancelled_requests_nothing() {
    // No expectations: any request would fail the server's verification
    let server = Server::run();
    let dir = TempDir::new().unwrap();
    let session = test_session();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let downloader = MediaDownloader::new(&session, &cancel, DelayRange::ZERO);

    let urls = vec![server.url("/a.png").to_string()];
    let report = downloader
        .download_all(&urls, dir.path(), &[".png"], &mut StdRng::seed_from_u64(5))
        .await;

    assert_eq!(report.attempted(), 0);
    assert!(report.saved_paths().is_empty());
}

#[tokio::test]
async fn test_download_empty_list() {
    let dir = TempDir::new().unwrap();
    let session = test_session();
    let cancel = CancellationToken::new();
    let downloader = MediaDownloader::new(&session, &cancel, DelayRange::ZERO);
    let report = downloader
        .download_all(&[], &dir.path().join("never"), &[], &mut StdRng::seed_from_u64(6))
        .await;
    assert_eq!(report, DownloadReport::default());
    assert!(!dir.path().join("never").exists());
}
