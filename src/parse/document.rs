//! The parsed page every extractor reads from.

use scraper::Html;
use url::Url;

/// A fetched page: raw markup, its parsed tree and the base URL relative
/// references resolve against.
///
/// `scraper::Html` is not `Send`, so a `ParsedPage` must be built and
/// dropped between two await points.
pub struct ParsedPage {
    markup: String,
    document: Html,
    base: Option<Url>,
}

impl ParsedPage {
    /// Parses `markup` fetched from `page_url`.
    ///
    /// An unparseable `page_url` leaves relative references unresolved.
    pub fn parse(markup: impl Into<String>, page_url: &str) -> Self {
        let markup = markup.into();
        let document = Html::parse_document(&markup);
        let base = match Url::parse(page_url) {
            Ok(base) => Some(base),
            Err(e) => {
                log::debug!("Page URL {} does not parse ({}); keeping references as-is", page_url, e);
                None
            }
        };
        Self {
            markup,
            document,
            base,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }
}
