//! Shared utilities for argument processing.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::args::Args;
use crate::proxy::access::is_elevated;
use crate::proxy::{
    AutoCorrect, ConfTarget, EditError, LoadReport, ProxyEntry, ProxyStore, SaveError,
};
use crate::settings::Settings;
use crate::util::{display_width, pad_display};

/// Command finished successfully.
pub const EXIT_OK: i32 = 0;
/// Edit rejected, I/O failure or user cancelled a save.
pub const EXIT_FAILURE: i32 = 1;
/// The configuration file may not be written by this process.
pub const EXIT_NOT_WRITABLE: i32 = 2;
/// `check` found diagnostics.
pub const EXIT_DIAGNOSTICS: i32 = 3;

/// What: Determine the log level based on command-line arguments and settings.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Loaded settings.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `--log-level`, which overrides the settings file.
#[must_use]
pub fn determine_log_level(args: &Args, settings: &Settings) -> String {
    if args.verbose {
        "debug".to_string()
    } else if let Some(level) = &args.log_level {
        level.clone()
    } else {
        settings.log_level.clone()
    }
}

/// Options every command runs with, resolved from settings and flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    /// APT configuration file to edit.
    pub conf_path: PathBuf,
    /// Repair whitespace defects on load.
    pub auto_correct: bool,
    /// List empty placeholders.
    pub show_placeholders: bool,
    /// Skip confirmation prompts.
    pub force: bool,
    /// JSON output.
    pub json: bool,
}

impl RunOptions {
    /// What: Merge settings with command-line overrides.
    ///
    /// Inputs:
    /// - `args`: Parsed command-line arguments.
    /// - `settings`: Loaded settings.
    ///
    /// Output:
    /// - Options where every flag given on the command line wins.
    #[must_use]
    pub fn resolve(args: &Args, settings: &Settings) -> Self {
        Self {
            conf_path: args
                .conf
                .clone()
                .unwrap_or_else(|| settings.apt_conf_path.clone()),
            auto_correct: settings.auto_correct && !args.no_autofix,
            show_placeholders: settings.show_placeholders,
            force: args.force,
            json: args.json,
        }
    }
}

/// What: Prompt the user for yes/no confirmation with "No" as default.
///
/// Inputs:
/// - `message`: The prompt message to display.
///
/// Output:
/// - `true` if user explicitly confirms (y/Y/yes), `false` otherwise (default).
///
/// Details:
/// - Reads a single line from stdin; read errors count as "no".
pub fn prompt_user_no_default(message: &str) -> bool {
    use std::io::{self, Write};

    print!("{message} [y/N]: ");
    io::stdout().flush().ok();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_ok() {
        let trimmed = input.trim();
        trimmed.eq_ignore_ascii_case("y") || trimmed.eq_ignore_ascii_case("yes")
    } else {
        false
    }
}

/// What: Open and load the configured file.
///
/// Inputs:
/// - `opts`: Run options.
///
/// Output:
/// - Loaded store and its load report.
///
/// Details:
/// - Writability is probed once here and fixed for the session.
/// - Corrections and diagnostics are reported on stderr so stdout stays
///   clean for listings and previews.
pub fn open_store(opts: &RunOptions) -> (ProxyStore, LoadReport) {
    let policy = if opts.auto_correct {
        AutoCorrect::Apply
    } else {
        AutoCorrect::Off
    };
    open_store_with(opts, policy)
}

/// What: Open and load the configured file under an explicit whitespace policy.
///
/// Inputs:
/// - `opts`: Run options.
/// - `policy`: Load-time correction policy, overriding `opts.auto_correct`.
///
/// Output:
/// - Loaded store and its load report, reported like [`open_store`].
pub fn open_store_with(opts: &RunOptions, policy: AutoCorrect) -> (ProxyStore, LoadReport) {
    let target = ConfTarget::probe(&opts.conf_path);
    let mut store = ProxyStore::new(target).with_auto_correct(policy);
    let report = store.load();
    if report.corrected {
        eprintln!(
            "Fixed whitespace before ';' in {} (original kept as a backup).",
            store.path().display()
        );
    }
    if let Some(text) = report.report() {
        tracing::warn!(count = report.diagnostics.len(), "configuration loaded with warnings");
        eprintln!("{text}");
    }
    (store, report)
}

/// What: Message for a configuration file this process may not write.
///
/// Inputs:
/// - `path`: Configuration file.
///
/// Output:
/// - Explanation plus a hint on how to get write access.
///
/// Details:
/// - Suggests `sudo` only when it is on `PATH` and the process is not already root.
#[must_use]
pub fn not_writable_hint(path: &Path) -> String {
    let mut msg = format!("No write permission for {}.", path.display());
    if is_elevated() {
        msg.push_str(" Check the file's permissions and attributes.");
    } else if which::which("sudo").is_ok() {
        msg.push_str(" Re-run the command with sudo to save changes.");
    } else {
        msg.push_str(" Re-run the command as root to save changes.");
    }
    msg
}

/// What: Save the session, asking before continuing without a backup.
///
/// Inputs:
/// - `store`: Session to write.
/// - `force`: Continue without a backup without asking.
///
/// Output:
/// - Exit code.
pub fn save_store(store: &ProxyStore, force: bool) -> i32 {
    let result = store.save(|e| {
        eprintln!("Could not create a backup: {e}");
        force || prompt_user_no_default("Save without a backup?")
    });
    match result {
        Ok(saved) => {
            if let Some(backup) = &saved.backup {
                println!("Backup: {}", backup.display());
            }
            println!("Saved {}", saved.path.display());
            EXIT_OK
        }
        Err(SaveError::NotWritable(path)) => {
            tracing::error!(path = %path.display(), "save refused: not writable");
            eprintln!("{}", not_writable_hint(&path));
            EXIT_NOT_WRITABLE
        }
        Err(e) => {
            tracing::error!(error = %e, "save failed");
            eprintln!("{e}");
            EXIT_FAILURE
        }
    }
}

/// What: Load, apply one edit, and save.
///
/// Inputs:
/// - `opts`: Run options.
/// - `edit`: Mutation returning a short description of what changed, or
///   `None` when it decided to change nothing.
///
/// Output:
/// - Exit code.
///
/// Details:
/// - A read-only file is reported before the edit is attempted.
/// - A rejected or skipped edit leaves the file untouched.
pub fn edit_and_save<F>(opts: &RunOptions, edit: F) -> i32
where
    F: FnOnce(&mut ProxyStore) -> Result<Option<String>, EditError>,
{
    let (mut store, _report) = open_store(opts);
    if !store.writable() {
        eprintln!("{}", not_writable_hint(store.path()));
        return EXIT_NOT_WRITABLE;
    }
    match edit(&mut store) {
        Ok(Some(summary)) => {
            println!("{summary}");
            save_store(&store, opts.force)
        }
        Ok(None) => EXIT_OK,
        Err(e) => {
            tracing::warn!(error = %e, "edit rejected");
            eprintln!("Error: {e}");
            EXIT_FAILURE
        }
    }
}

/// What: Order entries for display.
///
/// Inputs:
/// - `entries`: Entries in persisted order.
/// - `show_placeholders`: Keep empty placeholders.
///
/// Output:
/// - Entries sorted by kind (HTTP, HTTPS, FTP, SOCKS), then label.
///
/// Details:
/// - Labels compare case-insensitively; ties keep file order.
#[must_use]
pub fn sorted_for_display(entries: &[ProxyEntry], show_placeholders: bool) -> Vec<&ProxyEntry> {
    let mut out: Vec<&ProxyEntry> = entries
        .iter()
        .filter(|e| show_placeholders || !e.is_placeholder())
        .collect();
    out.sort_by(|a, b| match a.kind.cmp(&b.kind) {
        Ordering::Equal => a.label.to_lowercase().cmp(&b.label.to_lowercase()),
        other => other,
    });
    out
}

/// What: Render entries as an aligned text table.
///
/// Inputs:
/// - `entries`: Rows in display order.
///
/// Output:
/// - Header plus one line per entry, newline-terminated.
#[must_use]
pub fn format_table(entries: &[&ProxyEntry]) -> String {
    const HEADERS: [&str; 5] = ["ID", "TYPE", "ENABLED", "NAME", "URL"];
    let rows: Vec<[String; 5]> = entries
        .iter()
        .map(|e| {
            [
                e.id.to_string(),
                e.kind.to_string(),
                if e.enabled { "yes" } else { "no" }.to_string(),
                e.label.clone(),
                e.target.clone(),
            ]
        })
        .collect();
    let mut widths = HEADERS.map(display_width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell));
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: [&str; 5]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| pad_display(cell, w))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };
    push_row(HEADERS);
    for row in &rows {
        push_row([&row[0], &row[1], &row[2], &row[3], &row[4]].map(String::as_str));
    }
    out
}
