//! Timestamped copies taken before any destructive write.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use super::error::BackupError;

/// Operation that triggered a backup; becomes part of the file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackupReason {
    /// Before rewriting directives with whitespace before the semicolon.
    WhitespaceCorrection,
    /// Before saving the edited entry list.
    ManualSave,
}

impl BackupReason {
    /// Suffix inserted between the file name and the timestamp.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::WhitespaceCorrection => "pre_whitespace_correction",
            Self::ManualSave => "pre_manual_save",
        }
    }
}

/// Highest numeric tiebreaker tried before giving up on a free backup name.
const MAX_TIEBREAK: u32 = 99;

/// What: Compute the backup path for `path`.
///
/// Inputs:
/// - `path`: File to back up.
/// - `reason`: Triggering operation.
/// - `timestamp`: Already formatted `YYYYMMDD-HHMMSS`.
///
/// Output:
/// - `<dir>/<name>.<suffix>.<timestamp>`.
#[must_use]
pub fn backup_path(path: &Path, reason: BackupReason, timestamp: &str) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "apt.conf.rootdir".to_string(), |n| n.to_string_lossy().into_owned());
    path.with_file_name(format!("{name}.{}.{timestamp}", reason.suffix()))
}

/// Copy access and modification times from `src` to `dst`.
fn copy_times(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    let times = FileTimes::new()
        .set_accessed(meta.accessed()?)
        .set_modified(meta.modified()?);
    File::options().write(true).open(dst)?.set_times(times)
}

/// What: Create the first free backup file for `base`.
///
/// Output:
/// - Open file and its path: `base` itself, or `base.1`, `base.2`, ... when
///   earlier backups from the same second exist.
fn create_unique(base: &Path) -> io::Result<(File, PathBuf)> {
    for n in 0..=MAX_TIEBREAK {
        let candidate = if n == 0 {
            base.to_path_buf()
        } else {
            let mut name = base.as_os_str().to_os_string();
            name.push(format!(".{n}"));
            PathBuf::from(name)
        };
        match File::options().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((file, candidate)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free backup name for {}", base.display()),
    ))
}

/// Copy `src` into a new backup file derived from `base`.
fn copy_new(src: &Path, base: &Path) -> io::Result<PathBuf> {
    let mut input = File::open(src)?;
    let meta = input.metadata()?;
    if !meta.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }
    let (mut output, dest) = create_unique(base)?;
    let copied = io::copy(&mut input, &mut output)
        .and_then(|_| output.sync_all())
        .and_then(|()| fs::set_permissions(&dest, meta.permissions()));
    if let Err(e) = copied {
        let _ = fs::remove_file(&dest);
        return Err(e);
    }
    Ok(dest)
}

/// What: Make a timestamped copy of `path` next to it.
///
/// Inputs:
/// - `path`: File about to be overwritten.
/// - `reason`: Triggering operation, used in the backup name.
///
/// Output:
/// - `Ok(None)` when there is nothing to back up, `Ok(Some(copy))` on
///   success, `Err` when the copy failed.
///
/// # Errors
/// - Returns [`BackupError`] if copying the file fails.
pub fn create_backup(path: &Path, reason: BackupReason) -> Result<Option<PathBuf>, BackupError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    create_backup_in(path, dir, reason)
}

/// What: Make a timestamped copy of `path` inside `dir`.
///
/// Inputs:
/// - `path`: File about to be overwritten.
/// - `dir`: Directory receiving the copy.
/// - `reason`: Triggering operation, used in the backup name.
///
/// Output:
/// - Same as [`create_backup`].
///
/// # Errors
/// - Returns [`BackupError`] if copying the file fails.
///
/// Details:
/// - An existing backup is never overwritten: a second backup within the
///   same second gets a numeric `.N` suffix.
/// - Permissions come along with the copy; timestamps are carried over on a
///   best-effort basis. A partial copy is removed.
pub fn create_backup_in(
    path: &Path,
    dir: &Path,
    reason: BackupReason,
) -> Result<Option<PathBuf>, BackupError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no file to back up");
        return Ok(None);
    }
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    let named = backup_path(path, reason, &timestamp);
    let base = named
        .file_name()
        .map_or_else(|| named.clone(), |n| dir.join(n));
    let dest = copy_new(path, &base).map_err(|source| BackupError {
        path: path.to_path_buf(),
        source,
    })?;
    if let Err(e) = copy_times(path, &dest) {
        tracing::debug!(error = %e, backup = %dest.display(), "could not carry timestamps to backup");
    }
    tracing::info!(backup = %dest.display(), "backup created");
    Ok(Some(dest))
}
