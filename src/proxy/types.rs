//! Entry model for APT proxy directives.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::grammar::ANNOTATION_PREFIX;

/// Protocol family of an `Acquire::<KIND>::Proxy` directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProxyKind {
    /// `Acquire::HTTP::Proxy`
    Http,
    /// `Acquire::HTTPS::Proxy`
    Https,
    /// `Acquire::FTP::Proxy`
    Ftp,
    /// `Acquire::SOCKS::Proxy`
    Socks,
}

impl ProxyKind {
    /// Every kind, in the order the editor offers them.
    pub const ALL: [Self; 4] = [Self::Http, Self::Https, Self::Ftp, Self::Socks];

    /// What: Canonical upper-case spelling used inside directive lines.
    ///
    /// Output:
    /// - One of `HTTP`, `HTTPS`, `FTP`, `SOCKS`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
            Self::Ftp => "FTP",
            Self::Socks => "SOCKS",
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string does not name one of the four proxy kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown proxy type '{0}' (expected HTTP, HTTPS, FTP or SOCKS)")]
pub struct UnknownKind(pub String);

impl FromStr for ProxyKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownKind(trimmed.to_string()))
    }
}

/// Session-local identifier of an entry. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out [`EntryId`]s; a counter that only moves forward.
#[derive(Debug, Default)]
pub struct IdAllocator {
    /// Last value handed out.
    last: u64,
}

impl IdAllocator {
    /// Return the next unused identifier.
    pub const fn next_id(&mut self) -> EntryId {
        self.last += 1;
        EntryId(self.last)
    }
}

/// One proxy directive, enabled or commented out, with its optional name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProxyEntry {
    /// Session-local identifier.
    pub id: EntryId,
    /// Protocol family.
    pub kind: ProxyKind,
    /// Proxy URL or address. Empty only for placeholders.
    pub target: String,
    /// `false` when the directive is commented out.
    pub enabled: bool,
    /// Display name carried by the annotation line; empty when absent.
    pub label: String,
    /// Raw lines the entry was parsed from, kept for traceability only.
    #[serde(skip)]
    pub source_text: Vec<String>,
}

impl ProxyEntry {
    /// What: Build an entry that was not read from a file.
    ///
    /// Inputs:
    /// - `id`: Fresh identifier.
    /// - `kind`, `target`, `enabled`, `label`: Entry contents.
    ///
    /// Output:
    /// - Entry with empty `source_text`.
    #[must_use]
    pub fn new(
        id: EntryId,
        kind: ProxyKind,
        target: impl Into<String>,
        enabled: bool,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            target: target.into(),
            enabled,
            label: label.into(),
            source_text: Vec::new(),
        }
    }

    /// Disabled entry with no target and no label, offered so every kind can be edited.
    #[must_use]
    pub fn placeholder(id: EntryId, kind: ProxyKind) -> Self {
        Self::new(id, kind, String::new(), false, String::new())
    }

    /// `true` for an entry with neither target nor label.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.target.is_empty() && self.label.is_empty()
    }

    /// What: Decide whether the serializer writes this entry at all.
    ///
    /// Output:
    /// - `true` if the entry has a target, a label, or is enabled.
    ///
    /// Details:
    /// - Fully empty placeholders are left out of the file.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        !self.target.is_empty() || !self.label.is_empty() || self.enabled
    }

    /// Canonical directive line, without a comment marker.
    #[must_use]
    pub fn directive_line(&self) -> String {
        format!("Acquire::{}::Proxy \"{}\";", self.kind, self.target)
    }

    /// What: Render the lines this entry contributes to the configuration file.
    ///
    /// Output:
    /// - An optional annotation line followed by exactly one directive line,
    ///   without line terminators.
    ///
    /// Details:
    /// - Disabled entries get the directive prefixed with `# `.
    #[must_use]
    pub fn to_conf_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(2);
        if !self.label.is_empty() {
            lines.push(format!("{ANNOTATION_PREFIX}{}", self.label));
        }
        let directive = self.directive_line();
        if self.enabled {
            lines.push(directive);
        } else {
            lines.push(format!("# {directive}"));
        }
        lines
    }
}
