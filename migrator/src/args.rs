use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The insight document maintenance CLI.
#[derive(Parser, Debug)]
#[command(name = "migrator")]
#[command(about = "Insight document maintenance toolkit", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the migrator tool.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrites documents from the deprecated schema to the canonical schema.
    Normalize {
        /// Path to a JSON-lines file of insight documents.
        #[arg(help = "File with one insight document per line")]
        input: PathBuf,

        /// Output path (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validates every document in a file without writing anything.
    Check {
        /// Path to a JSON-lines file of insight documents.
        #[arg(help = "File with one insight document per line")]
        input: PathBuf,

        /// Reject documents that mix canonical and deprecated keys.
        #[arg(long)]
        strict: bool,
    },
}
