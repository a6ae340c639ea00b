//! Error types at the edit and persistence boundaries.

use std::path::PathBuf;

use super::types::{EntryId, ProxyKind};

/// A timestamped safety copy could not be made.
#[derive(Debug, thiserror::Error)]
#[error("backup of {path} failed: {source}")]
pub struct BackupError {
    /// File that was being copied.
    pub path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    pub source: std::io::Error,
}

/// An edit was rejected before touching the entry list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// No entry carries this id.
    #[error("no proxy entry with id {0}")]
    UnknownEntry(EntryId),
    /// The label would be read back as an annotation marker.
    #[error("name cannot contain '{}'", super::grammar::ANNOTATION_PREFIX.trim())]
    LabelContainsMarker,
    /// The label spans several lines.
    #[error("name must be a single line")]
    MultilineLabel,
    /// A named entry was given no target.
    #[error("a named entry needs a proxy URL")]
    LabelWithoutTarget,
    /// An enabled entry was given no target.
    #[error("URL empty for enabled proxy")]
    EmptyTarget,
    /// The target contains whitespace.
    #[error("URL should not contain spaces")]
    TargetContainsWhitespace,
    /// The target contains a double quote.
    #[error("URL should not contain '\"'")]
    TargetContainsQuote,
    /// Another entry of the same kind is already enabled.
    #[error("enabled proxy for '{0}' already exists")]
    DuplicateEnabled(ProxyKind),
}

/// Rewriting the file with corrected directive lines failed.
#[derive(Debug, thiserror::Error)]
pub enum CorrectionError {
    /// The safety copy failed, so nothing was written.
    #[error(transparent)]
    Backup(#[from] BackupError),
    /// The write itself failed after a successful backup.
    #[error("writing corrected file {path} failed: {source}")]
    Write {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Saving the entry list failed; the file on disk is unchanged.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The process may not write the destination.
    #[error("cannot write to {0}")]
    NotWritable(PathBuf),
    /// The backup failed and the caller declined to continue without one.
    #[error("save aborted: {0}")]
    BackupDeclined(#[source] BackupError),
    /// The existing file could not be read, so its other lines cannot be kept.
    #[error("reading {path} failed: {source}")]
    Read {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing the new content failed.
    #[error("failed to save to {path}: {source}")]
    Write {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
