use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::util::config::{normalize_key, parse_key_value, skip_comment_or_empty};

use super::skeleton::SETTINGS_SKELETON_CONTENT;
use super::types::Settings;

/// What: Ensure all expected settings keys exist in the settings file, appending defaults as needed.
///
/// Inputs:
/// - `path`: Settings file.
/// - `prefs`: Current in-memory settings whose values seed the file when keys are missing.
///
/// Output:
/// - `Ok(true)` when the file was created or extended, `Ok(false)` when nothing changed.
///
/// # Errors
/// - Returns `Err` when the existing file cannot be read (including content
///   that is not UTF-8); the file is then left untouched.
/// - Returns `Err` when the directory or file cannot be written.
///
/// Details:
/// - Preserves existing lines and comments while adding only absent keys.
/// - Creates the settings file from the skeleton when it is missing or empty.
pub fn ensure_settings_keys_present(path: &Path, prefs: &Settings) -> std::io::Result<bool> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "settings file unreadable; not touching it");
            return Err(e);
        }
    };
    let created_new = existing.trim().is_empty();
    let mut lines: Vec<String> = if created_new {
        SETTINGS_SKELETON_CONTENT.lines().map(str::to_string).collect()
    } else {
        existing.lines().map(str::to_string).collect()
    };

    let have: HashSet<String> = lines
        .iter()
        .filter(|l| !skip_comment_or_empty(l))
        .filter_map(|l| parse_key_value(l))
        .map(|(k, _)| normalize_key(&k))
        .collect();

    let pairs: [(&str, String); 4] = [
        ("apt_conf_path", prefs.apt_conf_path.display().to_string()),
        ("auto_correct", prefs.auto_correct.to_string()),
        ("show_placeholders", prefs.show_placeholders.to_string()),
        ("log_level", prefs.log_level.clone()),
    ];
    let mut appended_any = false;
    for (k, v) in &pairs {
        if !have.contains(*k) {
            lines.push(format!("{k} = {v}"));
            appended_any = true;
        }
    }

    if !(created_new || appended_any) {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), created = created_new, "settings file updated");
    Ok(true)
}
