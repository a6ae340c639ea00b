//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::proxy::ProxyKind;

use super::utils::RunOptions;

/// aptproxy - View and edit the proxy settings of an APT configuration file
#[derive(Parser, Debug)]
#[command(name = "aptproxy")]
#[command(version)]
#[command(about = "View and edit the Acquire::<KIND>::Proxy settings of an APT configuration file", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// APT configuration file to edit (default from settings: /etc/apt/apt.conf)
    #[arg(long, global = true, value_name = "PATH")]
    pub conf: Option<PathBuf>,

    /// Settings file to read (default: ~/.config/apt-proxy-editor/settings.conf)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not rewrite directives with whitespace before ';' on load
    #[arg(long, global = true)]
    pub no_autofix: bool,

    /// Do not ask for confirmation (removal, saving without a backup)
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Print machine-readable JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to run (default: list)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Editor commands. Entry ids are the ones shown by `list`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List proxy entries sorted by type and name
    List {
        /// Include empty placeholders even if the settings hide them
        #[arg(short, long)]
        all: bool,
    },
    /// Load the file and report malformed lines without changing anything else
    Check,
    /// Add a proxy entry and save
    Add(AddArgs),
    /// Change type, URL or name of an entry and save
    Edit {
        /// Entry id
        id: u64,
        /// Fields to change
        #[command(flatten)]
        changes: EditArgs,
    },
    /// Remove an entry and save
    Remove {
        /// Entry id
        id: u64,
    },
    /// Enable an entry and save
    Enable {
        /// Entry id
        id: u64,
    },
    /// Disable (comment out) an entry and save
    Disable {
        /// Entry id
        id: u64,
    },
    /// Print the file content a save would write, without writing it
    Preview,
}

/// Fields of a new entry.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    /// Proxy type: HTTP, HTTPS, FTP or SOCKS
    #[arg(short, long)]
    pub kind: ProxyKind,

    /// Proxy URL, e.g. http://proxy.example:3128
    #[arg(short, long, default_value = "")]
    pub target: String,

    /// Optional display name
    #[arg(short, long, default_value = "")]
    pub label: String,

    /// Write the directive commented out
    #[arg(long)]
    pub disabled: bool,
}

/// Fields to change on an existing entry; omitted fields keep their value.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct EditArgs {
    /// New proxy type
    #[arg(short, long)]
    pub kind: Option<ProxyKind>,

    /// New proxy URL
    #[arg(short, long)]
    pub target: Option<String>,

    /// New display name (empty string removes it)
    #[arg(short, long)]
    pub label: Option<String>,
}

/// What: Run the command selected on the command line.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `opts`: Options resolved from settings and flags.
///
/// Output:
/// - Process exit code.
///
/// Details:
/// - Without a subcommand the entries are listed.
#[must_use]
pub fn process_args(args: &Args, opts: &RunOptions) -> i32 {
    use crate::args::{add, check, edit, list, preview, remove, toggle};

    let command = args.command.clone().unwrap_or(Command::List { all: false });
    tracing::debug!(?command, conf = %opts.conf_path.display(), "dispatching command");
    match command {
        Command::List { all } => list::handle_list(opts, all),
        Command::Check => check::handle_check(opts),
        Command::Add(add_args) => add::handle_add(opts, &add_args),
        Command::Edit { id, changes } => edit::handle_edit(opts, id, &changes),
        Command::Remove { id } => remove::handle_remove(opts, id),
        Command::Enable { id } => toggle::handle_toggle(opts, id, true),
        Command::Disable { id } => toggle::handle_toggle(opts, id, false),
        Command::Preview => preview::handle_preview(opts),
    }
}
