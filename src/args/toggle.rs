//! Command-line enable/disable functionality.

use crate::args::utils::{self, RunOptions};
use crate::proxy::EntryId;

/// What: Enable or disable an entry and save the file.
///
/// Inputs:
/// - `opts`: Run options.
/// - `id`: Entry id as shown by `list`.
/// - `enabled`: Requested state.
///
/// Output:
/// - Exit code.
///
/// Details:
/// - Enabling is refused when another entry of the same type is enabled or
///   the entry has no URL.
pub fn handle_toggle(opts: &RunOptions, id: u64, enabled: bool) -> i32 {
    tracing::info!(id, enabled, "toggle requested from CLI");
    utils::edit_and_save(opts, |store| {
        let id = EntryId(id);
        store.set_enabled(id, enabled)?;
        let state = if enabled { "Enabled" } else { "Disabled" };
        Ok(Some(format!("{state} entry {id}.")))
    })
}
