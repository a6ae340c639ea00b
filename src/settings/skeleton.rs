/// Settings file written on first run, with every key at its default.
pub const SETTINGS_SKELETON_CONTENT: &str = "# APT proxy editor settings\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments.\n\
#\n\
# APT configuration file holding the Acquire::<KIND>::Proxy directives\n\
apt_conf_path = /etc/apt/apt.conf\n\
\n\
# Fix directives with whitespace before the terminating ';' when the file is\n\
# writable. A timestamped backup is taken first.\n\
auto_correct = true\n\
\n\
# List kinds that have no entry yet as empty placeholders\n\
show_placeholders = true\n\
\n\
# Log level written to logs/aptproxy.log (trace, debug, info, warn, error)\n\
log_level = info\n";
