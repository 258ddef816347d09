//! Title and `<meta>` tag extraction.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use super::document::ParsedPage;
use crate::utils::parse_selector_unsafe;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("title", "TITLE_SELECTOR"));
static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("meta", "META_SELECTOR"));

/// Page metadata as written to `data/meta_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub author: Option<String>,
    /// `og:*` properties, keyed by the suffix
    pub og_tags: BTreeMap<String, String>,
    /// `twitter:*` properties, keyed by the suffix
    pub twitter_tags: BTreeMap<String, String>,
    /// Every other named meta tag, keyed by lower-cased name
    pub other_meta: BTreeMap<String, String>,
}

/// Extracts the title and meta tags.
///
/// The title is the text of the first `<title>`, including nested text,
/// with leading and trailing whitespace trimmed; an empty title is `None`.
/// A tag with `name` and `content` goes to `description`, `keywords`,
/// `author` or `other_meta`. Otherwise a tag with `property` and `content`
/// is routed by its `og:` or `twitter:` prefix; other properties are
/// ignored. Later duplicates overwrite earlier ones.
pub fn extract_meta_data(page: &ParsedPage) -> MetaData {
    let mut meta = MetaData {
        title: page
            .document()
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty()),
        ..MetaData::default()
    };

    for element in page.document().select(&META_SELECTOR) {
        let el = element.value();
        let Some(content) = el.attr("content") else {
            continue;
        };

        if let Some(name) = el.attr("name") {
            let name = name.to_lowercase();
            match name.as_str() {
                "description" => meta.description = Some(content.to_string()),
                "keywords" => meta.keywords = Some(content.to_string()),
                "author" => meta.author = Some(content.to_string()),
                _ => {
                    meta.other_meta.insert(name, content.to_string());
                }
            }
        } else if let Some(property) = el.attr("property") {
            let property = property.to_lowercase();
            if let Some(key) = property.strip_prefix("og:") {
                meta.og_tags.insert(key.to_string(), content.to_string());
            } else if let Some(key) = property.strip_prefix("twitter:") {
                meta.twitter_tags.insert(key.to_string(), content.to_string());
            }
        }
    }

    log::debug!(
        "Extracted metadata with {} custom meta tags",
        meta.other_meta.len()
    );
    meta
}
