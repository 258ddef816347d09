//! Social media profile extraction.
//!
//! Scans raw markup with one case-insensitive pattern per platform. Matches
//! carry no scheme and are returned with `https://` prepended.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::compile_regex_unsafe;

/// Platform name and profile URL pattern.
const SOCIAL_PATTERNS: &[(&str, &str)] = &[
    ("facebook", r"facebook\.com/[\w.-]+"),
    ("twitter", r"twitter\.com/[\w.-]+"),
    ("instagram", r"instagram\.com/[\w.-]+"),
    ("linkedin", r"linkedin\.com/(?:in|company)/[\w.-]+"),
    ("youtube", r"youtube\.com/(?:user|channel|c)/[\w.-]+"),
    ("pinterest", r"pinterest\.com/[\w.-]+"),
    ("github", r"github\.com/[\w.-]+"),
    ("tiktok", r"tiktok\.com/@[\w.-]+"),
    ("snapchat", r"snapchat\.com/add/[\w.-]+"),
    ("reddit", r"reddit\.com/(?:r|user)/[\w.-]+"),
    ("whatsapp", r"wa\.me/\d+"),
    ("telegram", r"t\.me/[\w.-]+"),
    ("discord", r"discord\.gg/[\w.-]+"),
    ("medium", r"medium\.com/@[\w.-]+"),
    ("tumblr", r"[\w.-]+\.tumblr\.com"),
    ("flickr", r"flickr\.com/photos/[\w.-]+"),
    ("vimeo", r"vimeo\.com/[\w.-]+"),
    ("quora", r"quora\.com/profile/[\w.-]+"),
    ("twitch", r"twitch\.tv/[\w.-]+"),
    ("soundcloud", r"soundcloud\.com/[\w.-]+"),
];

static SOCIAL_RES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    SOCIAL_PATTERNS
        .iter()
        .map(|(platform, pattern)| {
            (
                *platform,
                compile_regex_unsafe(&format!("(?i){pattern}"), platform),
            )
        })
        .collect()
});

/// Profile URLs per platform; a platform appears only if it matched.
pub fn extract_social_media(text: &str) -> BTreeMap<String, Vec<String>> {
    let mut links = BTreeMap::new();
    for (platform, re) in SOCIAL_RES.iter() {
        let mut seen = HashSet::new();
        let matches: Vec<String> = re
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|m| seen.insert(*m))
            .map(with_scheme)
            .collect();
        if !matches.is_empty() {
            links.insert(platform.to_string(), matches);
        }
    }
    log::debug!("Extracted social media links from {} platforms", links.len());
    links
}

fn with_scheme(link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("https://{link}")
    }
}
