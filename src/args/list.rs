//! Command-line listing of proxy entries.

use crate::args::utils::{self, EXIT_FAILURE, EXIT_OK, RunOptions};

/// What: Print the proxy entries of the configured file.
///
/// Inputs:
/// - `opts`: Run options.
/// - `all`: Include placeholders even when the settings hide them.
///
/// Output:
/// - Exit code.
///
/// Details:
/// - Entries are sorted by type then name; ids are the ones edit commands accept.
/// - With `--json` the same rows are printed as a JSON array.
pub fn handle_list(opts: &RunOptions, all: bool) -> i32 {
    tracing::info!(path = %opts.conf_path.display(), "list requested from CLI");
    let (store, _report) = utils::open_store(opts);
    let rows = utils::sorted_for_display(store.entries(), all || opts.show_placeholders);

    if opts.json {
        return match serde_json::to_string_pretty(&rows) {
            Ok(text) => {
                println!("{text}");
                EXIT_OK
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize entries");
                eprintln!("Error: {e}");
                EXIT_FAILURE
            }
        };
    }

    let access = if store.writable() { "" } else { " (read-only)" };
    println!("{}{access}", store.path().display());
    print!("{}", utils::format_table(&rows));
    EXIT_OK
}
