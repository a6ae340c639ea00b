//! Line grammar for the APT proxy file.
//!
//! Only two line kinds carry meaning: the name annotation and the
//! `Acquire::<KIND>::Proxy "<target>";` directive. Everything else is opaque.
//! Strict and lenient matching share one pattern; the mode only decides how
//! much whitespace around the terminating semicolon is acceptable.

use std::sync::OnceLock;

use regex::{Captures, Regex, RegexBuilder};

use super::types::ProxyKind;

/// Literal that introduces a name annotation line.
pub const ANNOTATION_PREFIX: &str = "## APT Proxy Editor Name: ";

/// How tolerant directive matching is around the terminating `;`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// The directive must end exactly at the semicolon.
    Strict,
    /// Whitespace before and after the semicolon is tolerated.
    #[default]
    Lenient,
}

/// A recognized directive, borrowed from the line it was matched on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Directive<'a> {
    /// `true` when the directive is commented out with `#`.
    pub commented: bool,
    /// Canonicalized protocol family.
    pub kind: ProxyKind,
    /// Text between the quotes.
    pub target: &'a str,
}

/// Classification of one trimmed line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace only.
    Blank,
    /// Name annotation; carries the trimmed label.
    Annotation(&'a str),
    /// Canonical proxy directive.
    Directive(Directive<'a>),
    /// Looks like a proxy directive but does not match the canonical form.
    Malformed,
    /// Any other comment line.
    Comment,
    /// Any other content.
    Opaque,
}

/// Compiled directive pattern, shared by every mode.
fn directive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(
            r#"^(?P<comment>#\s*)?Acquire::(?P<kind>HTTPS|HTTP|FTP|SOCKS)::Proxy\s+"(?P<target>[^"]+)"(?P<gap>\s*);(?P<tail>\s*)$"#,
        )
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|e| unreachable!("directive pattern is a literal: {e}"))
    })
}

/// Accept or reject a raw pattern match according to `mode`.
fn accepts(caps: &Captures<'_>, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Lenient => true,
        MatchMode::Strict => {
            caps.name("gap").is_none_or(|m| m.as_str().is_empty())
                && caps.name("tail").is_none_or(|m| m.as_str().is_empty())
        }
    }
}

/// What: Match a single line against the directive pattern.
///
/// Inputs:
/// - `line`: Line content, already trimmed by the caller.
/// - `mode`: Strict or lenient semicolon handling.
///
/// Output:
/// - `Some(Directive)` on a canonical match, `None` otherwise.
#[must_use]
pub fn match_directive(line: &str, mode: MatchMode) -> Option<Directive<'_>> {
    let caps = directive_regex().captures(line)?;
    if !accepts(&caps, mode) {
        return None;
    }
    let kind = caps.name("kind")?.as_str().parse::<ProxyKind>().ok()?;
    let target = caps.name("target")?.as_str();
    Some(Directive {
        commented: caps.name("comment").is_some(),
        kind,
        target,
    })
}

/// What: Extract the label from an annotation line.
///
/// Inputs:
/// - `line`: Trimmed line.
///
/// Output:
/// - `Some(label)` (trimmed, possibly empty) when the line starts with the
///   annotation marker, compared case-insensitively.
#[must_use]
pub fn match_annotation(line: &str) -> Option<&str> {
    let marker = ANNOTATION_PREFIX.trim_end();
    let head = line.get(..marker.len())?;
    if !head.eq_ignore_ascii_case(marker) {
        return None;
    }
    Some(line[marker.len()..].trim())
}

/// `true` when the label would be read back as (part of) an annotation marker.
#[must_use]
pub fn contains_marker(text: &str) -> bool {
    text.to_ascii_lowercase()
        .contains(&ANNOTATION_PREFIX.trim().to_ascii_lowercase())
}

/// `true` when the line mentions the directive keyword at all.
fn is_directive_shaped(line: &str) -> bool {
    line.to_ascii_lowercase().contains("::proxy")
}

/// What: Classify one line of the configuration file.
///
/// Inputs:
/// - `line`: Raw line, with or without its terminator.
/// - `mode`: Directive matching mode.
///
/// Output:
/// - The [`LineKind`] of the trimmed line.
///
/// Details:
/// - Annotations are checked first since they are comments themselves.
/// - Directive-shaped lines (`::Proxy` anywhere) that fail to match become
///   [`LineKind::Malformed`], commented or not.
#[must_use]
pub fn classify(line: &str, mode: MatchMode) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if let Some(label) = match_annotation(trimmed) {
        return LineKind::Annotation(label);
    }
    if let Some(directive) = match_directive(trimmed, mode) {
        return LineKind::Directive(directive);
    }
    if is_directive_shaped(trimmed) {
        return LineKind::Malformed;
    }
    if trimmed.starts_with('#') {
        LineKind::Comment
    } else {
        LineKind::Opaque
    }
}

/// What: Produce the corrected form of a directive with whitespace before `;`.
///
/// Inputs:
/// - `line`: Line content without its terminator. Leading whitespace is not
///   tolerated.
///
/// Output:
/// - `Some(corrected)` ending exactly at the semicolon when the line had the
///   defect, `None` when the line is fine or not a directive.
#[must_use]
pub fn correct_spacing(line: &str) -> Option<String> {
    let caps = directive_regex().captures(line)?;
    let gap = caps.name("gap")?;
    if gap.as_str().is_empty() {
        return None;
    }
    let corrected = format!("{};", &line[..gap.start()]);
    (corrected != line).then_some(corrected)
}
