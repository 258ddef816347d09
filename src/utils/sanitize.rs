//! Folder and file name sanitization.
//!
//! Both functions are total: every input maps to a usable name, so
//! filename derivation can never fail a download or a run.

use std::sync::LazyLock;

use md5::{Digest, Md5};
use regex::Regex;

use super::selector::compile_regex_unsafe;
use super::url::strip_query_fragment;
use crate::config::{
    FALLBACK_EXTENSION, FILENAME_HASH_CHARS, MAX_FILENAME_LENGTH, TRUNCATED_STEM_LENGTH,
    UNNAMED_FOLDER,
};

static INVALID_FOLDER_CHARS: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r#"[\\/*?:"<>|]"#, "INVALID_FOLDER_CHARS"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"\s+", "WHITESPACE_RUN"));

/// Sanitizes a folder name.
///
/// Replaces `\ / * ? : " < > |` with `_`, trims leading and trailing dots
/// and whitespace, collapses inner whitespace runs into one `_`, and
/// substitutes `unnamed` for an empty result.
///
/// # Examples
///
/// ```
/// use site_harvest::utils::sanitize_folder_name;
///
/// assert_eq!(sanitize_folder_name("a/b:c*d"), "a_b_c_d");
/// assert_eq!(sanitize_folder_name("   "), "unnamed");
/// ```
pub fn sanitize_folder_name(name: &str) -> String {
    let replaced = INVALID_FOLDER_CHARS.replace_all(name, "_");
    let trimmed = replaced.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let collapsed = WHITESPACE_RUN.replace_all(trimmed, "_");
    if collapsed.is_empty() {
        UNNAMED_FOLDER.to_string()
    } else {
        collapsed.into_owned()
    }
}

/// Derives a safe, bounded filename from a URL.
///
/// Uses the percent-decoded basename of the URL path when it has an
/// extension; otherwise `file_<10 hex chars of MD5(url)><ext>` where `ext`
/// is `default_extension` or `.bin`. The result contains only
/// `[A-Za-z0-9._-]` and is at most 100 characters: longer names keep 90
/// characters of stem plus the extension.
///
/// # Examples
///
/// ```
/// use site_harvest::utils::safe_filename;
///
/// assert_eq!(safe_filename("https://x.com/path/photo.jpg", None), "photo.jpg");
/// assert!(safe_filename("https://x.com/", None).starts_with("file_"));
/// ```
pub fn safe_filename(url: &str, default_extension: Option<&str>) -> String {
    let path = decoded_path(url);
    let basename = path.rsplit('/').next().unwrap_or_default();

    let candidate = if basename.is_empty() || !basename.contains('.') {
        hashed_name(url, default_extension)
    } else {
        basename.to_string()
    };

    let cleaned: String = candidate
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return hashed_name(url, None);
    }

    truncate_filename(cleaned)
}

fn decoded_path(url: &str) -> String {
    let raw_path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => strip_query_fragment(url).to_string(),
    };
    match urlencoding::decode(&raw_path) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw_path.as_bytes()))
            .into_owned(),
    }
}

fn hashed_name(url: &str, default_extension: Option<&str>) -> String {
    let digest = hex::encode(Md5::digest(url.as_bytes()));
    let extension = match default_extension.map(str::trim) {
        Some(ext) if !ext.is_empty() && ext.starts_with('.') => ext.to_string(),
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => FALLBACK_EXTENSION.to_string(),
    };
    format!("file_{}{}", &digest[..FILENAME_HASH_CHARS], extension)
}

/// Splits at the last dot that is not the first character.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 => name.split_at(i),
        _ => (name, ""),
    }
}

fn truncate_filename(name: String) -> String {
    if name.len() <= MAX_FILENAME_LENGTH {
        return name;
    }
    let (stem, extension) = split_extension(&name);
    // ASCII only at this point, so byte slicing is char-safe
    let stem = &stem[..stem.len().min(TRUNCATED_STEM_LENGTH)];
    let mut truncated = format!("{stem}{extension}");
    truncated.truncate(MAX_FILENAME_LENGTH);
    truncated
}
