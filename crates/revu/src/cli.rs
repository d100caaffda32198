use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "revu", version, about = "AI-assisted code review for unified diffs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify configuration file path
    #[arg(long, env = "REVU_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "REVU_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Write logs to this directory instead of stderr
    #[arg(long, env = "REVU_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Review a diff and print the merged result
    Review {
        /// Read the diff from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the merged result as JSON instead of markdown
        #[arg(long)]
        json: bool,

        /// Additional ignore patterns (repeatable)
        #[arg(long = "ignore")]
        ignore: Vec<String>,

        /// Override the cap on reviewed files
        #[arg(long)]
        max_files: Option<usize>,

        /// Override the line budget per chunk
        #[arg(long)]
        max_diff_size: Option<usize>,
    },

    /// Show how a diff would be partitioned, without calling a provider
    Chunks {
        /// Read the diff from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the chunk layout as JSON
        #[arg(long)]
        json: bool,
    },
}
