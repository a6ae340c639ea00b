//! Parser and rewriter for the proxy directives of an APT configuration file.
//!
//! Data flows one way: file text → [`parse`] → entries held by a
//! [`ProxyStore`] → edits → [`serialize`] → file text, with [`backup`]
//! invoked before every write. Whitespace defects before the terminating
//! semicolon are repaired on load by [`correct`].

pub mod access;
pub mod backup;
pub mod correct;
pub mod error;
pub mod grammar;
pub mod parse;
pub mod serialize;
pub mod store;
pub mod types;


pub use access::ConfTarget;
pub use error::{BackupError, CorrectionError, EditError, SaveError};
pub use grammar::{ANNOTATION_PREFIX, MatchMode};
pub use parse::Diagnostic;
pub use store::{AutoCorrect, EntryDraft, LoadReport, ProxyStore, SaveReport};
pub use types::{EntryId, ProxyEntry, ProxyKind, UnknownKind};
