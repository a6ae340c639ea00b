//! Configuration file parsing utilities.
//!
//! This module provides helpers for parsing `key = value` files with common
//! patterns like comment skipping and key normalization.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=` character
/// - Trims whitespace from both key and value
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (key, value) = line.trim().split_once('=')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// Normalize a settings key: lowercase, with `.`, `-` and spaces mapped to `_`.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(['.', '-', ' '], "_")
}

/// What: Remove an inline comment from a value.
///
/// Inputs:
/// - `s`: Raw value, possibly followed by ` # note` or ` // note`.
///
/// Output:
/// - Comment-free and trimmed substring of the input.
///
/// Details:
/// - A comment marker only counts when preceded by whitespace, so paths and
///   URLs containing `#` or `//` survive.
#[must_use]
pub fn strip_inline_comment(s: &str) -> &str {
    let mut end = s.len();
    for marker in [" #", "\t#", " //", "\t//"] {
        if let Some(i) = s.find(marker) {
            end = end.min(i);
        }
    }
    s[..end].trim()
}

/// Parse a boolean the way the settings file spells them (`true/1/yes/on`, `false/0/no/off`).
#[must_use]
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
