//! Writability probe for the configuration file.

use std::path::{Path, PathBuf};

/// Resolved configuration file plus whether this process may write it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfTarget {
    /// Absolute path of the APT configuration file.
    pub path: PathBuf,
    /// `true` when saving and auto-correction are allowed.
    pub writable: bool,
}

impl ConfTarget {
    /// What: Resolve `path` and probe its writability.
    ///
    /// Inputs:
    /// - `path`: Configuration file, absolute or relative to the working directory.
    ///
    /// Output:
    /// - Target with an absolute path and the probed writability.
    #[must_use]
    pub fn probe(path: impl AsRef<Path>) -> Self {
        let path = absolutize(path.as_ref());
        let writable = can_write(&path);
        tracing::debug!(path = %path.display(), writable, "configuration target");
        Self { path, writable }
    }

    /// Target with a writability flag decided by the caller.
    #[must_use]
    pub fn with_access(path: impl Into<PathBuf>, writable: bool) -> Self {
        Self {
            path: path.into(),
            writable,
        }
    }
}

/// Make `path` absolute against the current directory, leaving it as is on failure.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
}

/// What: Decide whether this process may write `path`.
///
/// Inputs:
/// - `path`: Configuration file.
///
/// Output:
/// - For an existing file, whether it is writable; otherwise whether its
///   parent directory is.
#[must_use]
pub fn can_write(path: &Path) -> bool {
    if path.exists() {
        return writable(path);
    }
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => writable(dir),
        _ => writable(Path::new(".")),
    }
}

#[cfg(unix)]
fn writable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};
    access(path, AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn writable(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| !m.permissions().readonly())
}

/// `true` when running with an effective uid of root.
#[cfg(unix)]
#[must_use]
pub fn is_elevated() -> bool {
    nix::unistd::Uid::effective().is_root()
}

/// `true` when running with an effective uid of root.
#[cfg(not(unix))]
#[must_use]
pub const fn is_elevated() -> bool {
    false
}
