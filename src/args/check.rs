//! Command-line validation of the configuration file.

use serde_json::json;

use crate::args::utils::{self, EXIT_DIAGNOSTICS, EXIT_FAILURE, EXIT_OK, RunOptions};

/// What: Load the file and summarize what the parser found.
///
/// Inputs:
/// - `opts`: Run options.
///
/// Output:
/// - `EXIT_OK` when the file loaded cleanly, `EXIT_DIAGNOSTICS` when warnings were reported.
///
/// Details:
/// - Auto-correction still applies when enabled and the file is writable.
pub fn handle_check(opts: &RunOptions) -> i32 {
    tracing::info!(path = %opts.conf_path.display(), "check requested from CLI");
    let (store, report) = utils::open_store(opts);
    let persisted = store.entries().iter().filter(|e| e.is_persisted()).count();

    if opts.json {
        let summary = json!({
            "path": store.path().display().to_string(),
            "writable": store.writable(),
            "corrected": report.corrected,
            "entries": persisted,
            "diagnostics": report.diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>(),
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return EXIT_FAILURE;
            }
        }
    } else {
        println!(
            "{}: {persisted} proxy entries, {} warning(s), {}",
            store.path().display(),
            report.diagnostics.len(),
            if store.writable() { "writable" } else { "read-only" }
        );
    }

    if report.diagnostics.is_empty() {
        EXIT_OK
    } else {
        EXIT_DIAGNOSTICS
    }
}
