//! CLI argument parsing for licensegrep

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lg")]
#[command(
    author,
    version,
    about = "Search a local license corpus paragraph by paragraph",
    long_about = None,
    after_help = "Logs are written to: ~/.local/share/licensegrep/logs/licensegrep.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of license text files (default: text)
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Directory where result folders are created (default: ..)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Treat search terms as plain text instead of regular expressions
    #[arg(short, long, global = true)]
    pub literal: bool,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search interactively, one term per prompt (default)
    Repl,

    /// Run a single search and exit
    Search {
        /// Search pattern (regex unless --literal)
        #[arg(required = true)]
        term: String,
    },

    /// List loaded license IDs
    List,
}
