//! Output persistence.
//!
//! This module provides:
//! - The per-domain folder layout (`html`, `css`, `js`, `images`, `videos`, `data`)
//! - Text, line-list and pretty JSON writers
//! - The Markdown run summary

mod files;
mod layout;
mod summary;

// Re-export public API
pub use files::{write_json, write_lines, write_text};
pub use layout::OutputLayout;
pub use summary::{AssetCount, AssetReports, RunSummary};
