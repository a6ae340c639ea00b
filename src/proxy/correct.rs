//! In-place repair of directives with whitespace before the semicolon.

use std::fs;
use std::path::Path;

use super::backup::{BackupReason, create_backup_in};
use super::error::CorrectionError;
use super::grammar::correct_spacing;

/// Corrected copy of the file lines and which of them changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Correction {
    /// Every line of the file, corrected where needed, terminators kept.
    pub lines: Vec<String>,
    /// 0-based indices of the lines that changed.
    pub changed: Vec<usize>,
}

impl Correction {
    /// `true` when at least one line needs rewriting.
    #[must_use]
    pub fn is_needed(&self) -> bool {
        !self.changed.is_empty()
    }

    /// The corrected file content.
    #[must_use]
    pub fn content(&self) -> String {
        self.lines.concat()
    }
}

/// Split a line into its content and its terminator (`\n`, `\r\n` or nothing).
fn split_terminator(line: &str) -> (&str, &str) {
    let body = line.trim_end_matches(['\r', '\n']);
    (body, &line[body.len()..])
}

/// What: Compute corrections for every line.
///
/// Inputs:
/// - `lines`: File lines with their terminators.
///
/// Output:
/// - [`Correction`] holding the full corrected line list.
///
/// Details:
/// - Only a directive starting at column 0 with whitespace between the
///   closing quote and `;` is touched; trailing whitespace after `;` is
///   dropped with it. The original terminator is kept.
#[must_use]
pub fn plan_correction<S: AsRef<str>>(lines: &[S]) -> Correction {
    let mut out = Correction::default();
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let (body, eol) = split_terminator(line);
        if let Some(fixed) = correct_spacing(body) {
            tracing::debug!(line = idx + 1, from = body, to = %fixed, "whitespace issue");
            out.lines.push(format!("{fixed}{eol}"));
            out.changed.push(idx);
        } else {
            out.lines.push(line.to_string());
        }
    }
    out
}

/// What: Persist a correction: back up the file, then overwrite it once.
///
/// Inputs:
/// - `path`: Configuration file.
/// - `backup_dir`: Directory receiving the backup copy.
/// - `correction`: Planned correction; must be needed.
///
/// Output:
/// - `Ok(())` when the corrected file is on disk.
///
/// # Errors
/// - [`CorrectionError::Backup`] when the backup failed; nothing was written.
/// - [`CorrectionError::Write`] when writing failed after the backup.
pub fn apply_correction(
    path: &Path,
    backup_dir: &Path,
    correction: &Correction,
) -> Result<(), CorrectionError> {
    create_backup_in(path, backup_dir, BackupReason::WhitespaceCorrection)?;
    fs::write(path, correction.content()).map_err(|source| CorrectionError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        lines = correction.changed.len(),
        "saved whitespace corrections"
    );
    Ok(())
}
