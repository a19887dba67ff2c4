//! Shared types for the ownotes application.
//!
//! This module contains the specialized `Result` type and the CLI command
//! surface used throughout the application.

use std::path::PathBuf;

use clap::Subcommand;

use crate::OwError;

/// A specialized Result type for ownotes operations.
pub type Result<T> = std::result::Result<T, OwError>;

/// Available subcommands for the ownotes application
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new object writer note
    New {
        /// Use this prompt word instead of picking one at random
        #[clap(short, long)]
        word: Option<String>,

        /// Do not hand the created note off to the editor
        #[clap(long)]
        no_edit: bool,
    },

    /// Run the countdown blocks embedded in a note
    Run {
        /// Path to the note file
        note: PathBuf,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },
}
