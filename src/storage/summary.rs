//! The Markdown run report (`summary.md`).

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::fetch::DownloadReport;
use crate::parse::ExtractionResult;

/// Found vs. downloaded count of one asset class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetCount {
    pub found: usize,
    pub downloaded: usize,
}

impl AssetCount {
    pub fn new(found: usize, report: &DownloadReport) -> Self {
        Self {
            found,
            downloaded: report.saved(),
        }
    }
}

/// Counts and key metadata of one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub url: String,
    pub domain: String,
    pub scraped_at: DateTime<Local>,
    pub links: usize,
    pub images: AssetCount,
    pub videos: AssetCount,
    pub css: AssetCount,
    pub js: AssetCount,
    pub emails: usize,
    pub phones: usize,
    pub social_platforms: Vec<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
}

/// Download reports of the four asset classes.
#[derive(Debug, Clone, Default)]
pub struct AssetReports {
    pub images: DownloadReport,
    pub videos: DownloadReport,
    pub css: DownloadReport,
    pub js: DownloadReport,
}

impl RunSummary {
    pub fn new(url: &str, domain: &str, extracted: &ExtractionResult, assets: &AssetReports) -> Self {
        Self {
            url: url.to_string(),
            domain: domain.to_string(),
            scraped_at: Local::now(),
            links: extracted.links.len(),
            images: AssetCount::new(extracted.images.len(), &assets.images),
            videos: AssetCount::new(extracted.videos.len(), &assets.videos),
            css: AssetCount::new(extracted.css.len(), &assets.css),
            js: AssetCount::new(extracted.js.len(), &assets.js),
            emails: extracted.emails.len(),
            phones: extracted.phones.len(),
            social_platforms: extracted.social.keys().cloned().collect(),
            title: extracted.meta.title.clone(),
            description: extracted.meta.description.clone(),
            keywords: extracted.meta.keywords.clone(),
        }
    }

    pub fn render_markdown(&self) -> String {
        let platforms = if self.social_platforms.is_empty() {
            "None".to_string()
        } else {
            self.social_platforms.join(", ")
        };
        let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());

        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "# Website Scraping Summary\n\
             \n\
             URL: {url}\n\
             Domain: {domain}\n\
             Scraped on: {ts}\n\
             \n\
             ## Statistics\n\
             - Links: {links}\n\
             - Images: {img} ({img_dl} downloaded)\n\
             - Videos: {vid} ({vid_dl} downloaded)\n\
             - CSS Files: {css} ({css_dl} downloaded)\n\
             - JavaScript Files: {js} ({js_dl} downloaded)\n\
             - Emails: {emails}\n\
             - Phone Numbers: {phones}\n\
             - Social Media Platforms: {platforms}\n\
             \n\
             ## Meta Data\n\
             - Title: {title}\n\
             - Description: {description}\n\
             - Keywords: {keywords}\n\
             \n\
             ## Folder Structure\n\
             - /html - HTML files\n\
             - /css - CSS files\n\
             - /js - JavaScript files\n\
             - /images - Image files\n\
             - /videos - Video files\n\
             - /data - Extracted data (links, emails, phone numbers, etc.)\n",
            url = self.url,
            domain = self.domain,
            ts = self.scraped_at.format("%Y-%m-%d %H:%M:%S"),
            links = self.links,
            img = self.images.found,
            img_dl = self.images.downloaded,
            vid = self.videos.found,
            vid_dl = self.videos.downloaded,
            css = self.css.found,
            css_dl = self.css.downloaded,
            js = self.js.found,
            js_dl = self.js.downloaded,
            emails = self.emails,
            phones = self.phones,
            platforms = platforms,
            title = or_na(&self.title),
            description = or_na(&self.description),
            keywords = or_na(&self.keywords),
        );
        out
    }
}
