//! Link and asset URL collection.
//!
//! Links, images and videos keep document order and duplicates. Stylesheet
//! and script URLs are de-duplicated. Every URL is resolved against the page
//! base.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use super::document::ParsedPage;
use crate::utils::{compile_regex_unsafe, parse_selector_unsafe, resolve_url, url_path_lower};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("a[href]", "ANCHOR_SELECTOR"));
static IMAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("img[src]", "IMAGE_SELECTOR"));
static VIDEO_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("video[src]", "VIDEO_SELECTOR"));
static SOURCE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("source[src]", "SOURCE_SELECTOR"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("link[href]", "LINK_SELECTOR"));
static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("script[src]", "SCRIPT_SELECTOR"));

// Markup fallbacks for references the tree does not expose (e.g. inside <noscript>)
static CSS_MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"(?i)<link[^>]*?href=["']([^"']*\.css)["'][^>]*?>"#,
        "CSS_MARKUP_RE",
    )
});
static JS_MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"(?i)<script[^>]*?src=["']([^"']*\.js)["'][^>]*?>"#,
        "JS_MARKUP_RE",
    )
});

fn collect_attr(page: &ParsedPage, selector: &Selector, attr: &str) -> Vec<String> {
    page.document()
        .select(selector)
        .filter_map(|element| element.value().attr(attr))
        .filter_map(|value| resolve_url(page.base(), value))
        .collect()
}

fn dedup_in_order(urls: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Anchor `href`s, resolved.
pub fn extract_links(page: &ParsedPage) -> Vec<String> {
    collect_attr(page, &ANCHOR_SELECTOR, "href")
}

/// Image `src`s, resolved.
pub fn extract_image_urls(page: &ParsedPage) -> Vec<String> {
    collect_attr(page, &IMAGE_SELECTOR, "src")
}

/// Video `src`s followed by every nested `<source src>`, resolved.
pub fn extract_video_urls(page: &ParsedPage) -> Vec<String> {
    let mut urls = collect_attr(page, &VIDEO_SELECTOR, "src");
    urls.extend(collect_attr(page, &SOURCE_SELECTOR, "src"));
    urls
}

/// Stylesheet URLs: `<link href>` whose path ends in `.css`, de-duplicated.
///
/// `rel` is not consulted; a stylesheet served from a suffix-less path
/// (font APIs, theme endpoints) is not collected.
pub fn extract_css_urls(page: &ParsedPage) -> Vec<String> {
    let structural = page
        .document()
        .select(&LINK_SELECTOR)
        .filter_map(|element| {
            let resolved = resolve_url(page.base(), element.value().attr("href")?)?;
            url_path_lower(&resolved).ends_with(".css").then_some(resolved)
        })
        .collect::<Vec<_>>();

    if !structural.is_empty() {
        return dedup_in_order(structural);
    }
    dedup_in_order(markup_fallback(page, &CSS_MARKUP_RE))
}

/// Script URLs: `<script src>` whose path ends in `.js`, de-duplicated.
pub fn extract_js_urls(page: &ParsedPage) -> Vec<String> {
    let structural = page
        .document()
        .select(&SCRIPT_SELECTOR)
        .filter_map(|element| element.value().attr("src"))
        .filter_map(|src| resolve_url(page.base(), src))
        .filter(|url| url_path_lower(url).ends_with(".js"))
        .collect::<Vec<_>>();

    if !structural.is_empty() {
        return dedup_in_order(structural);
    }
    dedup_in_order(markup_fallback(page, &JS_MARKUP_RE))
}

fn markup_fallback(page: &ParsedPage, pattern: &Regex) -> Vec<String> {
    pattern
        .captures_iter(page.markup())
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| resolve_url(page.base(), m.as_str()))
        .collect()
}
