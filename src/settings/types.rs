use std::path::PathBuf;

/// Configuration file edited when nothing else is configured.
pub const DEFAULT_APT_CONF_PATH: &str = "/etc/apt/apt.conf";

/// User-configurable settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// APT configuration file holding the proxy directives.
    pub apt_conf_path: PathBuf,
    /// Rewrite directives with whitespace before `;` when the file is writable.
    pub auto_correct: bool,
    /// Include empty placeholder entries in listings.
    pub show_placeholders: bool,
    /// Default tracing filter (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            apt_conf_path: PathBuf::from(DEFAULT_APT_CONF_PATH),
            auto_correct: true,
            show_placeholders: true,
            log_level: "info".to_string(),
        }
    }
}
