//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;

use regex::Regex;
use std::sync::OnceLock;

/// Case-insensitive substring test; `needle` is lowercased here
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Strip the status/routing prefix the API layer puts in front of backend messages
///
/// `"Failed to add class: API error: 409. Slot taken"` becomes `"Slot taken"`.
pub fn strip_routing_prefix(message: &str) -> String {
    static PREFIX_RE: OnceLock<Regex> = OnceLock::new();

    let re = PREFIX_RE
        .get_or_init(|| Regex::new(r"^(?:.*?)API error: \d{3}\.\s*").expect("Invalid regex pattern"));

    re.replace(message.trim(), "").trim().to_string()
}

/// Truncate text to a maximum number of characters
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
