//! Error types for the ownotes application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur while creating notes and running countdowns.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the ownotes application.
#[derive(Error, Debug)]
pub enum OwError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A note with the same path already exists.
    #[error("Note already exists: {path}")]
    NoteAlreadyExists { path: PathBuf },

    /// The target folder is missing or unusable.
    #[error("Folder does not exist: {path}")]
    DirectoryError { path: PathBuf },

    /// file not found
    #[error("File not found: {file_path}")]
    FileNotFound { file_path: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("{message}")]
    EditorError { message: String },
}
