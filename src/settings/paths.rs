use std::env;
use std::path::{Path, PathBuf};

/// Directory name under the XDG config home.
const APP_DIR: &str = "apt-proxy-editor";

/// What: Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Config directory for the editor, `$XDG_CONFIG_HOME/apt-proxy-editor` (not created).
#[must_use]
pub fn config_dir() -> PathBuf {
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
}

/// What: Logs directory under the config directory.
///
/// Output:
/// - `<config dir>/logs`, created if possible.
///
/// Details:
/// - Creation failures are ignored; opening the log file reports them.
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// What: Settings file location.
///
/// Inputs:
/// - `explicit`: Path given on the command line, if any.
///
/// Output:
/// - `explicit` when given, otherwise `<config dir>/settings.conf`.
#[must_use]
pub fn settings_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(|| config_dir().join("settings.conf"), Path::to_path_buf)
}
