//! Asset classes and their accepted extensions.

use strum_macros::EnumIter;

use crate::config::{CSS_EXTENSIONS, IMAGE_EXTENSIONS, JS_EXTENSIONS, VIDEO_EXTENSIONS};

/// One category of secondary resource linked from a page.
///
/// Iteration order is the download order: images, videos, CSS, JS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum AssetClass {
    Images,
    Videos,
    Css,
    Js,
}

impl AssetClass {
    /// Extensions the downloader accepts for this class.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetClass::Images => IMAGE_EXTENSIONS,
            AssetClass::Videos => VIDEO_EXTENSIONS,
            AssetClass::Css => CSS_EXTENSIONS,
            AssetClass::Js => JS_EXTENSIONS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Images => "images",
            AssetClass::Videos => "videos",
            AssetClass::Css => "CSS files",
            AssetClass::Js => "JavaScript files",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
