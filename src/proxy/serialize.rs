//! Regenerate file content from the entry list.

use super::grammar::{LineKind, MatchMode, classify};
use super::parse::split_lines;
use super::types::ProxyEntry;

/// What: Collect the lines of `original` that are not owned by entries.
///
/// Inputs:
/// - `original`: Current file content.
/// - `mode`: Matching mode the entries were loaded with.
///
/// Output:
/// - Every line that is neither an annotation nor a directive, verbatim and
///   in order, terminators included.
#[must_use]
pub fn preserved_lines(original: &str, mode: MatchMode) -> Vec<String> {
    split_lines(original)
        .into_iter()
        .filter(|line| {
            !matches!(
                classify(line, mode),
                LineKind::Annotation(_) | LineKind::Directive(_)
            )
        })
        .collect()
}

/// Append `line` to `out`, terminating it with `\n` if it has no terminator.
fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    if !line.ends_with('\n') {
        out.push('\n');
    }
}

/// What: Render the new configuration file.
///
/// Inputs:
/// - `entries`: Current entry list, in the order to write.
/// - `original`: Existing file content, if the file exists.
/// - `mode`: Matching mode the entries were loaded with.
///
/// Output:
/// - Complete file content.
///
/// Details:
/// - Preserved lines come first, then one blank separator, then each
///   persisted entry. Blank lines at the end of the preserved block fold into
///   that separator so that re-rendering a rendered file is byte-stable. A
///   block of nothing but blank lines is dropped along with its separator.
/// - A labelled entry is followed by a blank line when another entry follows.
/// - Empty placeholders are skipped.
#[must_use]
pub fn render_config(entries: &[ProxyEntry], original: Option<&str>, mode: MatchMode) -> String {
    let mut preserved = original.map(|c| preserved_lines(c, mode)).unwrap_or_default();
    let persisted: Vec<&ProxyEntry> = entries.iter().filter(|e| e.is_persisted()).collect();

    if persisted.is_empty() {
        return preserved.concat();
    }

    let mut out = String::new();
    // A preserved block made only of blank lines is the gap a previous render
    // left between entries; it folds away entirely.
    if let Some(last) = preserved.iter().rposition(|l| !l.trim().is_empty()) {
        let separator = preserved.get(last + 1).cloned();
        preserved.truncate(last + 1);
        for line in &preserved {
            push_line(&mut out, line);
        }
        push_line(&mut out, separator.as_deref().unwrap_or("\n"));
    }

    for (idx, entry) in persisted.iter().enumerate() {
        for line in entry.to_conf_lines() {
            push_line(&mut out, &line);
        }
        if !entry.label.is_empty() && idx + 1 < persisted.len() {
            out.push('\n');
        }
    }
    out
}
