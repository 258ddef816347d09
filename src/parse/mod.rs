//! HTML parsing and data extraction.
//!
//! This module extracts everything the pipeline persists from one page:
//! - Links, image, video, stylesheet and script URLs (from the parsed tree)
//! - Email addresses and phone numbers (from raw markup)
//! - Social media profile links (from raw markup)
//! - Title and meta tags (Open Graph, Twitter Cards, other named tags)
//!
//! Structural extraction uses CSS selectors via the `scraper` crate. Regex
//! passes over raw markup cover data that is not tied to elements.

mod assets;
mod contacts;
mod document;
mod meta;
mod social;

use std::collections::BTreeMap;

// Re-export public API
pub use assets::{
    extract_css_urls, extract_image_urls, extract_js_urls, extract_links, extract_video_urls,
};
pub use contacts::{extract_emails, extract_phone_numbers};
pub use document::ParsedPage;
pub use meta::{extract_meta_data, MetaData};
pub use social::extract_social_media;

use crate::config::ExtractionToggles;

/// Every extraction output for one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub links: Vec<String>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub css: Vec<String>,
    pub js: Vec<String>,
    /// Sorted, unique
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub social: BTreeMap<String, Vec<String>>,
    pub meta: MetaData,
}

impl ExtractionResult {
    /// Runs every enabled extractor over `page`.
    ///
    /// Links and metadata are always extracted; a disabled class stays empty.
    pub fn extract(page: &ParsedPage, toggles: &ExtractionToggles) -> Self {
        let markup = page.markup();
        let result = Self {
            links: extract_links(page),
            images: enabled(toggles.images, || extract_image_urls(page)),
            videos: enabled(toggles.videos, || extract_video_urls(page)),
            css: enabled(toggles.css_js, || extract_css_urls(page)),
            js: enabled(toggles.css_js, || extract_js_urls(page)),
            emails: enabled(toggles.emails, || extract_emails(markup)),
            phones: enabled(toggles.phones, || extract_phone_numbers(markup)),
            social: enabled(toggles.social, || extract_social_media(markup)),
            meta: extract_meta_data(page),
        };
        log::info!(
            "Extracted {} links, {} images, {} videos, {} CSS, {} JS, {} emails, {} phone numbers, {} social platforms",
            result.links.len(),
            result.images.len(),
            result.videos.len(),
            result.css.len(),
            result.js.len(),
            result.emails.len(),
            result.phones.len(),
            result.social.len()
        );
        result
    }

    /// Parses `markup` and extracts in one step; the parsed tree is dropped
    /// before returning, so the result can cross await points.
    pub fn from_markup(markup: &str, page_url: &str, toggles: &ExtractionToggles) -> Self {
        let page = ParsedPage::parse(markup, page_url);
        Self::extract(&page, toggles)
    }
}

fn enabled<T: Default>(on: bool, extract: impl FnOnce() -> T) -> T {
    if on {
        extract()
    } else {
        T::default()
    }
}
