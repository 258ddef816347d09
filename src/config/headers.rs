//! HTTP header value constants.
//!
//! This module defines the header values of the browser profile presented by
//! every session, and the per-content-type `Accept` values used for asset
//! downloads.

// Page request profile
/// Accept header for document requests
pub const ACCEPT_DOCUMENT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
/// Accept-Language header sent with every request
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";
/// Accept-Language header for asset requests
pub const ACCEPT_LANGUAGE_ASSET: &str = "en-US,en;q=0.9";
/// Do Not Track
pub const DNT: &str = "1";
/// Connection header
pub const CONNECTION: &str = "keep-alive";
/// Upgrade-Insecure-Requests header
pub const UPGRADE_INSECURE_REQUESTS: &str = "1";
/// Cache-Control header for document requests
pub const CACHE_CONTROL: &str = "max-age=0";

// Asset request profile
/// Accept header for image downloads
pub const ACCEPT_IMAGE: &str = "image/webp,image/apng,image/*,*/*;q=0.8";
/// Accept header for stylesheet downloads
pub const ACCEPT_CSS: &str = "text/css,*/*;q=0.1";
/// Accept header for scripts and everything else
pub const ACCEPT_ANY: &str = "*/*";

/// Extensions that receive the image `Accept` header.
pub const IMAGE_ACCEPT_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];
