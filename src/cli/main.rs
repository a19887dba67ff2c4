use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(
    author,
    version,
    about = "Object writer note helper: prompt-word notes with countdown blocks"
)]
pub struct Cli {
    /// Path to the settings file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Root folder notes are created beneath (defaults to the working directory)
    #[clap(long, value_parser)]
    pub vault_dir: Option<PathBuf>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the ownotes application
    #[clap(subcommand)]
    pub command: Commands,
}
