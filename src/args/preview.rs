//! Command-line preview of the file a save would write.

use crate::args::utils::{self, EXIT_FAILURE, EXIT_OK, RunOptions};
use crate::proxy::AutoCorrect;

/// What: Print the content a save would write, without writing it.
///
/// Inputs:
/// - `opts`: Run options.
///
/// Output:
/// - Exit code.
///
/// Details:
/// - Whitespace corrections are applied in memory only, so the file is never
///   touched while directives are matched under the same mode a save would use.
pub fn handle_preview(opts: &RunOptions) -> i32 {
    tracing::info!(path = %opts.conf_path.display(), "preview requested from CLI");
    let policy = if opts.auto_correct {
        AutoCorrect::Simulate
    } else {
        AutoCorrect::Off
    };
    let (store, _report) = utils::open_store_with(opts, policy);
    match store.render() {
        Ok(content) => {
            print!("{content}");
            EXIT_OK
        }
        Err(e) => {
            tracing::error!(error = %e, "preview failed");
            eprintln!("{e}");
            EXIT_FAILURE
        }
    }
}
