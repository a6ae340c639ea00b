//! Command-line remove functionality.

use crate::args::utils::{self, RunOptions};
use crate::proxy::{EditError, EntryId};

/// What: Remove an entry and save the file.
///
/// Inputs:
/// - `opts`: Run options.
/// - `id`: Entry id as shown by `list`.
///
/// Output:
/// - Exit code; `EXIT_OK` also when the user declines.
///
/// Details:
/// - Prompts with [y/N] (No is default) unless `--force` is given.
pub fn handle_remove(opts: &RunOptions, id: u64) -> i32 {
    tracing::info!(id, "remove requested from CLI");
    utils::edit_and_save(opts, |store| {
        let id = EntryId(id);
        let entry = store.get(id).ok_or(EditError::UnknownEntry(id))?;
        let shown = if entry.label.is_empty() {
            format!("{} {}", entry.kind, entry.target)
        } else {
            format!("{} '{}' ({})", entry.kind, entry.label, entry.target)
        };
        if !opts.force && !utils::prompt_user_no_default(&format!("Remove {shown}?")) {
            tracing::info!("user cancelled removal");
            println!("Cancelled.");
            return Ok(None);
        }
        store.remove(id)?;
        Ok(Some(format!("Removed {shown}.")))
    })
}
