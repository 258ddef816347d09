//! Pure URL and naming utilities.
//!
//! This module provides:
//! - Domain extraction and URL normalization/resolution
//! - Folder name sanitization
//! - Safe filename derivation with a hash fallback
//! - Static CSS selector and regex compilation

pub mod sanitize;
mod selector;
mod url;

pub use sanitize::{safe_filename, sanitize_folder_name};
pub use selector::{compile_regex_unsafe, parse_selector_unsafe};
pub use url::{domain_of, resolve_url, validate_and_normalize_url};
pub(crate) use url::{strip_query_fragment, url_path_lower};
