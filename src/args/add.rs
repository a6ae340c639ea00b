//! Command-line add functionality.

use crate::args::AddArgs;
use crate::args::utils::{self, RunOptions};
use crate::proxy::EntryDraft;

/// What: Add a proxy entry and save the file.
///
/// Inputs:
/// - `opts`: Run options.
/// - `args`: Kind, target, label and enabled state of the new entry.
///
/// Output:
/// - Exit code.
pub fn handle_add(opts: &RunOptions, args: &AddArgs) -> i32 {
    tracing::info!(kind = %args.kind, "add requested from CLI");
    let draft = EntryDraft {
        kind: args.kind,
        target: args.target.clone(),
        enabled: !args.disabled,
        label: args.label.clone(),
    };
    utils::edit_and_save(opts, |store| {
        let id = store.add(&draft)?;
        Ok(Some(format!("Added {} proxy with id {id}.", draft.kind)))
    })
}
