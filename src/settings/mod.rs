//! Application settings for the proxy editor.
//!
//! Settings live in a small `key = value` file under the user's config
//! directory. They only pick defaults; command-line flags win.

/// Creating the settings file and appending missing keys.
mod ensure;
/// Parsing `settings.conf`.
mod parse;
/// Config, log and settings path resolution.
mod paths;
/// Built-in settings file content.
mod skeleton;
/// Settings type and defaults.
mod types;

pub use ensure::ensure_settings_keys_present;
pub use parse::{load_settings, parse_settings};
pub use paths::{config_dir, logs_dir, settings_path};
pub use skeleton::SETTINGS_SKELETON_CONTENT;
pub use types::{DEFAULT_APT_CONF_PATH, Settings};
