//! Command-line definitions for the `globals` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "globals",
    version = env!("CARGO_PKG_VERSION"),
    about = "Manage key/value globals stored in a SQLite database."
)]
pub(crate) struct Cli {
    /// Database file (overrides GLOBALS_DB_PATH).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error (overrides GLOBALS_LOG_LEVEL).
    #[clap(long, global = true)]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files (overrides GLOBALS_LOG_DIR).
    #[clap(long, global = true)]
    pub log_dir: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// List every global
    List {
        /// Print JSON instead of a table.
        #[clap(long)]
        json: bool,
    },
    /// Show one global
    Get {
        key: String,
        /// Print JSON instead of plain text.
        #[clap(long)]
        json: bool,
    },
    /// Add a new global; fails when the key already exists
    Add { key: String, value: String },
    /// Replace the value of an existing global
    Update { key: String, value: String },
    /// Delete a global (succeeds when the key is absent)
    Delete { key: String },
}
