//! Email and phone number extraction over raw markup.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::utils::compile_regex_unsafe;

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}";
// Deliberately loose: matches dates and IDs too
const PHONE_PATTERN: &str =
    r"\+?\d{1,4}?[-.\s]?\(?\d{1,3}?\)?[-.\s]?\d{1,4}[-.\s]?\d{1,4}[-.\s]?\d{1,9}";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(EMAIL_PATTERN, "EMAIL_RE"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(PHONE_PATTERN, "PHONE_RE"));

/// Unique email addresses in lexical order.
///
/// De-duplication is case-sensitive: `a@b.com` and `A@B.COM` are distinct.
pub fn extract_emails(text: &str) -> Vec<String> {
    let unique: BTreeSet<&str> = EMAIL_RE.find_iter(text).map(|m| m.as_str()).collect();
    log::debug!("Extracted {} unique email addresses", unique.len());
    unique.into_iter().map(str::to_string).collect()
}

/// Unique phone-number-like strings, in first-seen order.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let numbers: Vec<String> = PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|n| seen.insert(*n))
        .map(str::to_string)
        .collect();
    log::debug!("Extracted {} unique phone numbers", numbers.len());
    numbers
}
