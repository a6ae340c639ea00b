//! Turn configuration lines into an ordered list of proxy entries.

use std::fmt;

use super::grammar::{LineKind, MatchMode, classify};
use super::types::{IdAllocator, ProxyEntry, ProxyKind};

/// Longest excerpt of an offending line quoted in a diagnostic.
const EXCERPT_CHARS: usize = 70;

/// Non-fatal problem noticed while loading the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A directive-shaped line that does not match the canonical form.
    MalformedLine {
        /// 1-based line number.
        line_no: usize,
        /// Start of the trimmed line.
        excerpt: String,
    },
    /// The file exists but could not be read.
    Unreadable(String),
    /// Auto-correction was skipped because the backup failed.
    CorrectionBackupFailed(String),
    /// The corrected file could not be written.
    CorrectionWriteFailed(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { line_no, excerpt } => {
                write!(f, "Warning: Possible malformed proxy line {line_no}: '{excerpt}...'")
            }
            Self::Unreadable(msg) => write!(f, "Could not read configuration: {msg}"),
            Self::CorrectionBackupFailed(msg) => {
                write!(f, "Backup failed, auto-correction aborted: {msg}")
            }
            Self::CorrectionWriteFailed(msg) => {
                write!(f, "Could not write corrected configuration: {msg}")
            }
        }
    }
}

/// What: Join diagnostics into the single report shown to the user.
///
/// Output:
/// - One diagnostic per line, or `None` when there is nothing to report.
#[must_use]
pub fn join_report(diagnostics: &[Diagnostic]) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }
    Some(
        diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Entries and diagnostics produced by one parse.
#[derive(Debug, Default)]
pub struct ParseOutput {
    /// Entries in file order, followed by any synthesized placeholders.
    pub entries: Vec<ProxyEntry>,
    /// Malformed-line warnings, in file order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Annotation state between lines.
#[derive(Debug, Default)]
enum Pending {
    /// No annotation waiting for a directive.
    #[default]
    NoLabel,
    /// The last annotation seen, not yet consumed.
    Label(String),
}

/// Scanner state: pending annotation plus raw lines since the last boundary.
#[derive(Debug, Default)]
struct Scanner {
    /// Annotation waiting for its directive.
    pending: Pending,
    /// Raw lines collected since the last entry boundary.
    buffer: Vec<String>,
}

impl Scanner {
    /// Drop any pending label and buffered lines.
    fn reset(&mut self) {
        self.pending = Pending::NoLabel;
        self.buffer.clear();
    }

    /// Hand over the pending label and buffered lines, leaving the scanner empty.
    fn take(&mut self) -> (String, Vec<String>) {
        let label = match std::mem::take(&mut self.pending) {
            Pending::NoLabel => String::new(),
            Pending::Label(text) => text,
        };
        (label, std::mem::take(&mut self.buffer))
    }
}

/// Trimmed start of a line, cut on a character boundary.
fn excerpt(line: &str) -> String {
    line.trim().chars().take(EXCERPT_CHARS).collect()
}

/// What: Parse configuration lines into entries.
///
/// Inputs:
/// - `lines`: File content split into lines, terminators optional.
/// - `mode`: Directive matching mode.
/// - `ids`: Allocator for fresh entry identifiers.
///
/// Output:
/// - [`ParseOutput`] with entries in file order plus placeholders.
///
/// Details:
/// - An annotation only names the directive that directly follows it; blank
///   lines, malformed directives and other content drop a pending label.
///   Plain comment lines keep it.
pub fn parse_lines<S: AsRef<str>>(lines: &[S], mode: MatchMode, ids: &mut IdAllocator) -> ParseOutput {
    let mut out = ParseOutput::default();
    let mut scanner = Scanner::default();

    for (idx, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        match classify(raw, mode) {
            LineKind::Annotation(label) => {
                tracing::debug!(line = idx + 1, label, "name annotation");
                scanner.buffer.push(raw.to_string());
                scanner.pending = Pending::Label(label.to_string());
            }
            LineKind::Directive(directive) => {
                scanner.buffer.push(raw.to_string());
                let (label, source_text) = scanner.take();
                let entry = ProxyEntry {
                    id: ids.next_id(),
                    kind: directive.kind,
                    target: directive.target.to_string(),
                    enabled: !directive.commented,
                    label,
                    source_text,
                };
                tracing::debug!(
                    line = idx + 1,
                    kind = %entry.kind,
                    target = %entry.target,
                    enabled = entry.enabled,
                    label = %entry.label,
                    "proxy directive"
                );
                out.entries.push(entry);
            }
            LineKind::Malformed => {
                let diag = Diagnostic::MalformedLine {
                    line_no: idx + 1,
                    excerpt: excerpt(raw),
                };
                tracing::warn!("{diag}");
                out.diagnostics.push(diag);
                scanner.reset();
            }
            LineKind::Comment => scanner.buffer.push(raw.to_string()),
            LineKind::Blank | LineKind::Opaque => scanner.reset(),
        }
    }

    tracing::debug!(count = out.entries.len(), ?mode, "parsed proxy entries");
    add_placeholders(&mut out.entries, ids);
    out
}

/// What: Make sure every kind can be edited.
///
/// Inputs:
/// - `entries`: Parsed entries, extended in place.
/// - `ids`: Allocator for placeholder identifiers.
///
/// Details:
/// - A kind counts as represented when some entry of that kind has a target
///   or a label. Unrepresented kinds get one empty, disabled entry, unless
///   an empty entry of that kind is already present.
pub fn add_placeholders(entries: &mut Vec<ProxyEntry>, ids: &mut IdAllocator) {
    for kind in ProxyKind::ALL {
        let represented = entries.iter().any(|e| e.kind == kind && !e.is_placeholder());
        let has_placeholder = entries.iter().any(|e| e.kind == kind && e.is_placeholder());
        if !represented && !has_placeholder {
            tracing::debug!(%kind, "adding placeholder");
            entries.push(ProxyEntry::placeholder(ids.next_id(), kind));
        }
    }
}

/// What: Split file content into lines, keeping each line's terminator.
///
/// Output:
/// - Lines that concatenate back to `content` exactly.
#[must_use]
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}
