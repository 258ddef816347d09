//! HTTP session construction and request execution.

use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, DNT, REFERER,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::{ClientBuilder, Proxy, Response};
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;

use super::retry::TransportRetryPolicy;
use crate::config::{
    ACCEPT_DOCUMENT, ACCEPT_LANGUAGE as ACCEPT_LANGUAGE_VALUE, ASSET_TIMEOUT,
    CACHE_CONTROL as CACHE_CONTROL_VALUE, CONNECTION as CONNECTION_VALUE, DNT as DNT_VALUE,
    PAGE_TIMEOUT, UPGRADE_INSECURE_REQUESTS as UPGRADE_INSECURE_REQUESTS_VALUE,
};
use crate::error_handling::{
    is_retriable_status, is_retriable_transport_error, FetchError, InitializationError,
};
use crate::identity::Fingerprint;

/// Session settings, fixed for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Route traffic through a proxy drawn from the identity pool
    pub use_proxy: bool,
    /// In-session retry of transient failures
    pub transport_retry: TransportRetryPolicy,
    /// Timeout of the page request
    pub page_timeout: Duration,
    /// Timeout of each asset request
    pub asset_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            use_proxy: false,
            transport_retry: TransportRetryPolicy::default(),
            page_timeout: PAGE_TIMEOUT,
            asset_timeout: ASSET_TIMEOUT,
        }
    }
}

/// A configured client presenting one fingerprint.
///
/// One session serves a page fetch and every asset download that follows it,
/// sharing the connection pool and cookie jar. The outer retry loop builds a
/// new session per attempt.
#[derive(Debug)]
pub struct HttpSession {
    client: reqwest::Client,
    fingerprint: Fingerprint,
    config: SessionConfig,
}

impl HttpSession {
    /// Builds a session presenting `fingerprint`.
    ///
    /// Sets the browser header profile as client defaults, enables the cookie
    /// store, and routes all traffic through the fingerprint's proxy if it has
    /// one. A proxy URL reqwest cannot parse is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be
    /// built (e.g. TLS backend failure).
    pub fn new(config: &SessionConfig, fingerprint: Fingerprint) -> Result<Self, InitializationError> {
        let mut builder = ClientBuilder::new()
            .default_headers(default_headers(&fingerprint))
            .cookie_store(true);

        if let Some(proxy_url) = &fingerprint.proxy {
            match Proxy::all(proxy_url.as_str()) {
                Ok(proxy) => {
                    log::debug!("Routing session through proxy {}", proxy_url);
                    builder = builder.proxy(proxy);
                }
                Err(e) => log::warn!("Ignoring invalid proxy {}: {}", proxy_url, e),
            }
        }

        let client = builder.build()?;
        Ok(Self {
            client,
            fingerprint,
            config: config.clone(),
        })
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Fetches the target page with the page timeout.
    pub async fn fetch_page(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Response, FetchError> {
        self.get(url, HeaderMap::new(), self.config.page_timeout, cancel)
            .await
    }

    /// Issues a GET with transport-level retry.
    ///
    /// Retryable statuses (429, 500, 502, 503, 504), timeouts and connection
    /// failures are retried within this session per its
    /// [`TransportRetryPolicy`]. Any other non-2xx status fails immediately.
    /// The whole exchange, backoff waits included, is abandoned when `cancel`
    /// fires.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL to request
    /// * `headers` - Per-request headers layered over the session defaults
    /// * `timeout` - Deadline of each individual request
    /// * `cancel` - Run cancellation token
    ///
    /// # Errors
    ///
    /// `FetchError::Request` once retries are exhausted or on a permanent
    /// failure; `FetchError::Cancelled` if the token fired first.
    pub async fn get(
        &self,
        url: &str,
        headers: HeaderMap,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Response, FetchError> {
        let exchange = RetryIf::spawn(
            self.config.transport_retry.strategy(),
            || {
                let request = self
                    .client
                    .get(url)
                    .headers(headers.clone())
                    .timeout(timeout);
                async move { request.send().await?.error_for_status() }
            },
            |e: &reqwest::Error| {
                let retry = match e.status() {
                    Some(status) => is_retriable_status(status),
                    None => is_retriable_transport_error(e),
                };
                if retry {
                    log::debug!("Transient failure for {}, retrying in-session: {}", url, e);
                }
                retry
            },
        );

        tokio::select! {
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = exchange => result.map_err(FetchError::from),
        }
    }
}

fn default_headers(fingerprint: &Fingerprint) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(ua) = HeaderValue::from_str(&fingerprint.user_agent) {
        headers.insert(USER_AGENT, ua);
    }
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_DOCUMENT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(DNT, HeaderValue::from_static(DNT_VALUE));
    headers.insert(CONNECTION, HeaderValue::from_static(CONNECTION_VALUE));
    headers.insert(
        UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static(UPGRADE_INSECURE_REQUESTS_VALUE),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE));
    if let Ok(referer) = HeaderValue::from_str(&fingerprint.referer) {
        headers.insert(REFERER, referer);
    }
    // Accept-Encoding is negotiated by reqwest (gzip, brotli, deflate features)
    headers
}
