//! Command-line edit functionality.

use crate::args::EditArgs;
use crate::args::utils::{self, RunOptions};
use crate::proxy::{EditError, EntryDraft, EntryId};

/// What: Change kind, target or label of an entry and save the file.
///
/// Inputs:
/// - `opts`: Run options.
/// - `id`: Entry id as shown by `list`.
/// - `changes`: Fields to replace; `None` keeps the current value.
///
/// Output:
/// - Exit code.
///
/// Details:
/// - The enabled state is kept; use `enable`/`disable` to change it.
pub fn handle_edit(opts: &RunOptions, id: u64, changes: &EditArgs) -> i32 {
    tracing::info!(id, "edit requested from CLI");
    utils::edit_and_save(opts, |store| {
        let id = EntryId(id);
        let current = store.get(id).ok_or(EditError::UnknownEntry(id))?;
        let mut draft = EntryDraft::from_entry(current);
        if let Some(kind) = changes.kind {
            draft.kind = kind;
        }
        if let Some(target) = &changes.target {
            draft.target.clone_from(target);
        }
        if let Some(label) = &changes.label {
            draft.label.clone_from(label);
        }
        store.update(id, &draft)?;
        Ok(Some(format!("Updated entry {id}.")))
    })
}
