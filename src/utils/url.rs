//! URL helpers: domain extraction, normalization, resolution.

use log::warn;
use url::Url;

/// Maximum URL length accepted from the command line.
const MAX_URL_LENGTH: usize = 2048;

/// Returns the network location of `url` with a leading `www.` stripped.
///
/// Case, port and everything else are left untouched. There is no
/// validation: input without a `//` authority yields an empty string.
///
/// # Examples
///
/// ```
/// use site_harvest::utils::domain_of;
///
/// assert_eq!(domain_of("https://www.example.com/a"), "example.com");
/// assert_eq!(domain_of("https://sub.example.com"), "sub.example.com");
/// ```
pub fn domain_of(url: &str) -> String {
    let rest = match url.find("//") {
        Some(i) if is_scheme_prefix(&url[..i]) => &url[i + 2..],
        _ => return String::new(),
    };
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let netloc = &rest[..end];
    netloc.strip_prefix("www.").unwrap_or(netloc).to_string()
}

/// `""` (scheme-relative) or `scheme:`
fn is_scheme_prefix(prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    let Some(scheme) = prefix.strip_suffix(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Validates and normalizes a URL given on the command line.
///
/// Adds an `https://` prefix if no scheme is present, then checks that the
/// result parses and uses the http or https scheme. Logs a warning and
/// returns `None` otherwise, or when the URL exceeds 2048 characters.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return None;
    }

    let normalized = if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    match Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Some(normalized),
            "http" | "https" => {
                warn!("Rejecting URL without host: {url}");
                None
            }
            _ => {
                warn!("Rejecting unsupported scheme for URL: {url}");
                None
            }
        },
        Err(e) => {
            warn!("Rejecting invalid URL {url}: {e}");
            None
        }
    }
}

/// Resolves `href` against the page base, relative to absolute.
///
/// Without a base the trimmed `href` is returned unchanged. Returns `None`
/// for empty references and ones the base cannot join.
pub fn resolve_url(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match base {
        Some(base) => base.join(href).ok().map(String::from),
        None => Some(href.to_string()),
    }
}

/// Lower-cased path of `url` (query and fragment excluded).
///
/// Falls back to the raw text before `?`/`#` when `url` does not parse.
pub(crate) fn url_path_lower(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_ascii_lowercase(),
        Err(_) => strip_query_fragment(url).to_ascii_lowercase(),
    }
}

pub(crate) fn strip_query_fragment(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}
