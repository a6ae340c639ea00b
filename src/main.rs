//! aptproxy binary entrypoint kept minimal. Commands live in `args`.

use std::fmt::{self, Write as _};
use std::sync::OnceLock;

use clap::Parser;

use apt_proxy_editor::args::{self, Args, RunOptions};
use apt_proxy_editor::settings;

/// Log timestamp formatter: local time as `YYYY-MM-DD-T HH:MM:SS`.
struct AptProxyTimer;

impl tracing_subscriber::fmt::time::FormatTime for AptProxyTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        // "YYYY-MM-DD-T HH:MM:SS"
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S"))
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Build the tracing filter.
///
/// Inputs:
/// - `level`: Level from flags or settings.
///
/// Output:
/// - `RUST_LOG` when set and valid, otherwise `level`.
fn env_filter(level: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
}

/// What: Initialize tracing writing to `<config dir>/logs/aptproxy.log`.
///
/// Inputs:
/// - `level`: Default filter level.
///
/// Details:
/// - Falls back to a stderr logger when the log file cannot be opened.
fn init_logging(level: &str) {
    let mut log_path = settings::logs_dir();
    log_path.push("aptproxy.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(AptProxyTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: stderr logger so commands still run
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(AptProxyTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

fn main() {
    let cli = Args::parse();

    let settings_path = settings::settings_path(cli.settings.as_deref());
    let prefs = settings::load_settings(&settings_path);
    init_logging(&args::determine_log_level(&cli, &prefs));

    if let Err(e) = settings::ensure_settings_keys_present(&settings_path, &prefs) {
        tracing::warn!(path = %settings_path.display(), error = %e, "could not update settings file");
    }

    let opts = RunOptions::resolve(&cli, &prefs);
    tracing::info!(conf = %opts.conf_path.display(), "aptproxy starting");
    let code = args::process_args(&cli, &opts);
    tracing::info!(code, "aptproxy exited");
    std::process::exit(code);
}
