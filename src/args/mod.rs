//! Command-line argument parsing and handling.

pub mod add;
pub mod check;
pub mod definition;
pub mod edit;
pub mod list;
pub mod preview;
pub mod remove;
pub mod toggle;
pub mod utils;

// Re-export commonly used items
pub use definition::{AddArgs, Args, Command, EditArgs, process_args};
pub use utils::{RunOptions, determine_log_level};
