//! Editing session over one APT configuration file.
//!
//! The store owns the in-memory entry list, validates every edit before it
//! touches the list, and is the only place that reads or writes the file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::access::ConfTarget;
use super::backup::{BackupReason, create_backup_in};
use super::correct::{apply_correction, plan_correction};
use super::error::{BackupError, CorrectionError, EditError, SaveError};
use super::grammar::{MatchMode, contains_marker};
use super::parse::{Diagnostic, add_placeholders, join_report, parse_lines, split_lines};
use super::serialize::render_config;
use super::types::{EntryId, IdAllocator, ProxyEntry, ProxyKind};

/// Requested contents of a new or updated entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryDraft {
    /// Protocol family.
    pub kind: ProxyKind,
    /// Proxy URL or address; trimmed before use.
    pub target: String,
    /// Whether the directive is active.
    pub enabled: bool,
    /// Display name; trimmed before use, empty for none.
    pub label: String,
}

impl EntryDraft {
    /// Draft mirroring an existing entry, for partial edits.
    #[must_use]
    pub fn from_entry(entry: &ProxyEntry) -> Self {
        Self {
            kind: entry.kind,
            target: entry.target.clone(),
            enabled: entry.enabled,
            label: entry.label.clone(),
        }
    }

    /// Copy with surrounding whitespace removed from target and label.
    fn normalized(&self) -> Self {
        Self {
            kind: self.kind,
            target: self.target.trim().to_string(),
            enabled: self.enabled,
            label: self.label.trim().to_string(),
        }
    }
}

/// What a load does about directives with whitespace before `;`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AutoCorrect {
    /// Leave the file alone and parse it lenient.
    Off,
    /// Back up and rewrite the file, then parse strict.
    #[default]
    Apply,
    /// Correct in memory only, so renders match what a corrected save would
    /// write; the file is never touched.
    Simulate,
}

/// Outcome of a load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// `true` when whitespace corrections were written back to the file.
    pub corrected: bool,
    /// Advisory problems, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    /// All diagnostics joined into one message, if any.
    #[must_use]
    pub fn report(&self) -> Option<String> {
        join_report(&self.diagnostics)
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// File that was written.
    pub path: PathBuf,
    /// Backup made beforehand; `None` if the file did not exist or the
    /// caller chose to continue without one.
    pub backup: Option<PathBuf>,
}

/// In-memory entry list bound to one configuration file.
#[derive(Debug)]
pub struct ProxyStore {
    /// File and writability, fixed for the session.
    target: ConfTarget,
    /// Entries in file order, placeholders last.
    entries: Vec<ProxyEntry>,
    /// Id source for the whole session, reloads included.
    ids: IdAllocator,
    /// Mode the current entries were parsed with.
    mode: MatchMode,
    /// Whitespace repair policy applied on load when the file is writable.
    auto_correct: AutoCorrect,
    /// Directory receiving backups; next to the file when `None`.
    backup_dir: Option<PathBuf>,
    /// Corrected content standing in for the file under [`AutoCorrect::Simulate`].
    simulated: Option<String>,
}

impl ProxyStore {
    /// What: Create an empty session for `target`.
    ///
    /// Output:
    /// - Store with no entries; call [`ProxyStore::load`] to fill it.
    #[must_use]
    pub fn new(target: ConfTarget) -> Self {
        Self {
            target,
            entries: Vec::new(),
            ids: IdAllocator::default(),
            mode: MatchMode::Lenient,
            auto_correct: AutoCorrect::Apply,
            backup_dir: None,
            simulated: None,
        }
    }

    /// Choose the load-time whitespace policy ([`AutoCorrect::Apply`] by default).
    #[must_use]
    pub const fn with_auto_correct(mut self, policy: AutoCorrect) -> Self {
        self.auto_correct = policy;
        self
    }

    /// Keep backups in `dir` instead of next to the file.
    #[cfg(test)]
    pub(crate) fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(dir.into());
        self
    }

    /// Directory backups go to.
    fn backup_dir(&self) -> &Path {
        self.backup_dir
            .as_deref()
            .or_else(|| self.target.path.parent())
            .unwrap_or_else(|| Path::new("."))
    }

    /// Configuration file of this session.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.target.path
    }

    /// Whether saving and auto-correction are permitted.
    #[must_use]
    pub const fn writable(&self) -> bool {
        self.target.writable
    }

    /// Matching mode the current entries were parsed with.
    #[must_use]
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Entries in their persisted order.
    #[must_use]
    pub fn entries(&self) -> &[ProxyEntry] {
        &self.entries
    }

    /// Entry carrying `id`, if any.
    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&ProxyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// What: Discard the entry list and rebuild it from the file.
    ///
    /// Output:
    /// - [`LoadReport`] with the correction flag and diagnostics.
    ///
    /// Details:
    /// - A missing file is not an error: only placeholders are produced.
    /// - An unreadable file yields a diagnostic plus placeholders.
    /// - On a writable file with [`AutoCorrect::Apply`], directives with
    ///   whitespace before `;` are fixed and saved first (after a backup);
    ///   parsing then runs strict. [`AutoCorrect::Simulate`] does the same in
    ///   memory only. Otherwise parsing runs lenient on the original lines.
    pub fn load(&mut self) -> LoadReport {
        let mut report = LoadReport::default();
        self.entries.clear();
        self.mode = MatchMode::Lenient;
        self.simulated = None;
        let path = self.target.path.clone();

        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "configuration not found; offering placeholders");
                add_placeholders(&mut self.entries, &mut self.ids);
                return report;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "configuration unreadable");
                report
                    .diagnostics
                    .push(Diagnostic::Unreadable(format!("'{}': {e}", path.display())));
                add_placeholders(&mut self.entries, &mut self.ids);
                return report;
            }
        };

        let mut lines = split_lines(&content);
        tracing::debug!(path = %path.display(), lines = lines.len(), writable = self.target.writable, "read configuration");

        let plan = match self.auto_correct {
            AutoCorrect::Off => None,
            _ if !self.target.writable => None,
            policy => Some((policy, plan_correction(&lines))),
        };
        if let Some((policy, plan)) = plan
            && plan.is_needed()
        {
            if policy == AutoCorrect::Simulate {
                tracing::debug!(lines = plan.changed.len(), "whitespace corrections applied in memory only");
                self.simulated = Some(plan.content());
                lines = plan.lines;
                self.mode = MatchMode::Strict;
            } else {
                match apply_correction(&path, self.backup_dir(), &plan) {
                    Ok(()) => {
                        lines = plan.lines;
                        self.mode = MatchMode::Strict;
                        report.corrected = true;
                    }
                    Err(CorrectionError::Backup(e)) => {
                        tracing::warn!(error = %e, "auto-correction aborted");
                        report
                            .diagnostics
                            .push(Diagnostic::CorrectionBackupFailed(e.to_string()));
                    }
                    Err(e @ CorrectionError::Write { .. }) => {
                        tracing::warn!(error = %e, "auto-correction not saved; parsing original lines");
                        report
                            .diagnostics
                            .push(Diagnostic::CorrectionWriteFailed(e.to_string()));
                    }
                }
            }
        }

        let parsed = parse_lines(&lines, self.mode, &mut self.ids);
        self.entries = parsed.entries;
        report.diagnostics.extend(parsed.diagnostics);
        tracing::info!(
            entries = self.entries.len(),
            corrected = report.corrected,
            diagnostics = report.diagnostics.len(),
            "configuration loaded"
        );
        report
    }

    /// What: Check a draft against the edit contract.
    ///
    /// Inputs:
    /// - `draft`: Normalized draft.
    /// - `editing`: Entry being replaced, excluded from the uniqueness check.
    ///
    /// # Errors
    /// - [`EditError`] describing the first violated rule.
    fn validate(&self, draft: &EntryDraft, editing: Option<EntryId>) -> Result<(), EditError> {
        if contains_marker(&draft.label) {
            return Err(EditError::LabelContainsMarker);
        }
        if draft.label.contains(['\n', '\r']) {
            return Err(EditError::MultilineLabel);
        }
        if draft.target.is_empty() {
            if draft.enabled {
                return Err(EditError::EmptyTarget);
            }
            if !draft.label.is_empty() {
                return Err(EditError::LabelWithoutTarget);
            }
        }
        if draft.target.chars().any(char::is_whitespace) {
            return Err(EditError::TargetContainsWhitespace);
        }
        if draft.target.contains('"') {
            return Err(EditError::TargetContainsQuote);
        }
        if draft.enabled
            && self
                .entries
                .iter()
                .any(|e| e.kind == draft.kind && e.enabled && Some(e.id) != editing)
        {
            return Err(EditError::DuplicateEnabled(draft.kind));
        }
        Ok(())
    }

    /// What: Append a new entry.
    ///
    /// Output:
    /// - Identifier of the new entry.
    ///
    /// # Errors
    /// - [`EditError`] when the draft breaks a rule; the list is untouched.
    pub fn add(&mut self, draft: &EntryDraft) -> Result<EntryId, EditError> {
        let draft = draft.normalized();
        self.validate(&draft, None)?;
        let id = self.ids.next_id();
        self.entries.push(ProxyEntry::new(id, draft.kind, draft.target, draft.enabled, draft.label));
        tracing::info!(%id, "proxy entry added");
        Ok(id)
    }

    /// What: Replace kind, target, enabled state and label of an entry.
    ///
    /// # Errors
    /// - [`EditError::UnknownEntry`] for an unknown id, or the violated rule.
    pub fn update(&mut self, id: EntryId, draft: &EntryDraft) -> Result<(), EditError> {
        let draft = draft.normalized();
        if self.get(id).is_none() {
            return Err(EditError::UnknownEntry(id));
        }
        self.validate(&draft, Some(id))?;
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EditError::UnknownEntry(id))?;
        entry.kind = draft.kind;
        entry.target = draft.target;
        entry.enabled = draft.enabled;
        entry.label = draft.label;
        tracing::info!(%id, "proxy entry updated");
        Ok(())
    }

    /// What: Enable or disable an entry, leaving everything else as is.
    ///
    /// # Errors
    /// - Same rules as [`ProxyStore::update`].
    pub fn set_enabled(&mut self, id: EntryId, enabled: bool) -> Result<(), EditError> {
        let mut draft = EntryDraft::from_entry(self.get(id).ok_or(EditError::UnknownEntry(id))?);
        draft.enabled = enabled;
        self.update(id, &draft)
    }

    /// What: Remove an entry from the list.
    ///
    /// Output:
    /// - The removed entry.
    ///
    /// # Errors
    /// - [`EditError::UnknownEntry`] for an unknown id.
    pub fn remove(&mut self, id: EntryId) -> Result<ProxyEntry, EditError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(EditError::UnknownEntry(id))?;
        tracing::info!(%id, "proxy entry removed");
        Ok(self.entries.remove(idx))
    }

    /// What: Render what [`ProxyStore::save`] would write, without writing.
    ///
    /// # Errors
    /// - [`SaveError::Read`] when the existing file cannot be read.
    pub fn render(&self) -> Result<String, SaveError> {
        let original = self.read_original()?;
        Ok(render_config(&self.entries, original.as_deref(), self.mode))
    }

    /// Current file content, `None` when the file does not exist.
    ///
    /// Under [`AutoCorrect::Simulate`] this is the corrected content.
    fn read_original(&self) -> Result<Option<String>, SaveError> {
        if let Some(content) = &self.simulated {
            return Ok(Some(content.clone()));
        }
        match fs::read_to_string(&self.target.path) {
            Ok(c) => Ok(Some(c)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SaveError::Read {
                path: self.target.path.clone(),
                source,
            }),
        }
    }

    /// What: Write the entry list back to the file.
    ///
    /// Inputs:
    /// - `proceed_without_backup`: Asked when the backup fails; returning
    ///   `false` aborts the save.
    ///
    /// Output:
    /// - [`SaveReport`] naming the file and its backup.
    ///
    /// # Errors
    /// - [`SaveError::NotWritable`] when the session may not write.
    /// - [`SaveError::BackupDeclined`] when the backup failed and the caller declined.
    /// - [`SaveError::Read`] / [`SaveError::Write`] on I/O failure.
    ///
    /// Details:
    /// - The full content is built in memory and written once; on any error
    ///   the file is left as it was.
    pub fn save<F>(&self, proceed_without_backup: F) -> Result<SaveReport, SaveError>
    where
        F: FnOnce(&BackupError) -> bool,
    {
        let path = self.target.path.clone();
        if !self.target.writable {
            return Err(SaveError::NotWritable(path));
        }
        let content = self.render()?;
        let backup = match create_backup_in(&path, self.backup_dir(), BackupReason::ManualSave) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(error = %e, "backup before save failed");
                if !proceed_without_backup(&e) {
                    return Err(SaveError::BackupDeclined(e));
                }
                tracing::warn!("saving without backup");
                None
            }
        };
        fs::write(&path, content).map_err(|source| SaveError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "proxies saved");
        Ok(SaveReport { path, backup })
    }
}
