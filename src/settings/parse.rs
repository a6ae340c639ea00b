use std::fs;
use std::path::{Path, PathBuf};

use crate::util::config::{
    normalize_key, parse_bool, parse_key_value, skip_comment_or_empty, strip_inline_comment,
};

use super::types::Settings;

/// What: Parse settings from `settings.conf` content.
///
/// Inputs:
/// - `content`: Content of the settings file.
/// - `settings`: Settings to update in place.
///
/// Output:
/// - None (modifies `settings` in-place).
///
/// Details:
/// - Unknown keys and unparsable values are ignored with a debug log.
/// - Later occurrences of a key override earlier ones.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((raw_key, raw_val)) = parse_key_value(line) else {
            continue;
        };
        let key = normalize_key(&raw_key);
        let val = strip_inline_comment(&raw_val);
        match key.as_str() {
            "apt_conf_path" | "apt_conf" | "conf_path" => {
                if !val.is_empty() {
                    settings.apt_conf_path = PathBuf::from(val);
                }
            }
            "auto_correct" | "autofix" => {
                if let Some(v) = parse_bool(val) {
                    settings.auto_correct = v;
                }
            }
            "show_placeholders" => {
                if let Some(v) = parse_bool(val) {
                    settings.show_placeholders = v;
                }
            }
            "log_level" => {
                if !val.is_empty() {
                    settings.log_level = val.to_ascii_lowercase();
                }
            }
            _ => tracing::debug!(key = %key, "ignoring unknown settings key"),
        }
    }
}

/// What: Load settings from `path`, falling back to defaults.
///
/// Inputs:
/// - `path`: Settings file.
///
/// Output:
/// - Parsed settings; defaults when the file is missing or unreadable.
#[must_use]
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();
    match fs::read_to_string(path) {
        Ok(content) => parse_settings(&content, &mut settings),
        Err(e) => tracing::debug!(path = %path.display(), error = %e, "settings not read; using defaults"),
    }
    settings
}
