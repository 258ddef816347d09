//! Per-request header profiles.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};

use crate::config::{
    ACCEPT_ANY, ACCEPT_CSS, ACCEPT_IMAGE, ACCEPT_LANGUAGE_ASSET, CSS_EXTENSIONS,
    IMAGE_ACCEPT_EXTENSIONS,
};
use crate::utils::url_path_lower;

/// Headers for one asset download.
///
/// The `Accept` value follows the asset's extension (images, stylesheets,
/// anything else), and the `Referer` is the asset URL itself. Session-wide
/// headers (user agent, DNT, cookies) come from the client defaults.
pub(crate) struct AssetHeaders;

impl AssetHeaders {
    /// Builds the header map for downloading `url`.
    pub(crate) fn for_url(url: &str) -> HeaderMap {
        let path = url_path_lower(url);
        let accept = if IMAGE_ACCEPT_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            ACCEPT_IMAGE
        } else if CSS_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            ACCEPT_CSS
        } else {
            ACCEPT_ANY
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(accept));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_ASSET));
        // Invalid header bytes in the URL: fall back to the session's referrer
        if let Ok(referer) = HeaderValue::from_str(url) {
            headers.insert(REFERER, referer);
        }
        headers
    }
}
