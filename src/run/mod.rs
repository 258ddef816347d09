//! Pipeline orchestration.
//!
//! [`Scraper`] drives one harvest end to end and reports progress as
//! [`ScrapeEvent`]s; [`scrape`] is the one-call convenience entry point.

mod events;
mod pipeline;

pub use events::ScrapeEvent;
pub use pipeline::{scrape, Scraper};
