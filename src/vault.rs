//! Note file creation.
//!
//! The vault is the folder tree notes live in. Creation is deliberately
//! strict: the target folder must already exist, an existing note is never
//! overwritten, and the content goes through a temporary file in the target
//! directory so a failed creation leaves nothing behind.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use tempfile::NamedTempFile;

use crate::{OwError, Result};

/// Normalizes a slash-separated location into a relative path: empty and
/// `.` segments collapse, `..` pops, both separator styles are accepted.
pub fn normalize_path(path: &str) -> PathBuf {
    let mut normalized = PathBuf::new();
    for part in path.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                normalized.pop();
            }
            part => normalized.push(part),
        }
    }
    normalized
}

/// Creates notes beneath a root directory.
pub struct Vault {
    root: PathBuf,
}

impl Vault {
    pub fn new(root: PathBuf) -> Self {
        Vault { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates a Markdown note named `file_name` inside `location` with the
    /// given content, and returns the created path.
    ///
    /// Fails when the folder does not exist or a note with the same path
    /// already does; neither failure leaves a partial file on disk.
    pub fn create_note(&self, location: &str, file_name: &str, content: &str) -> Result<PathBuf> {
        let relative = normalize_path(&format!("{}/{}.md", location, file_name));
        let path = self.root.join(relative);
        debug!("Creating note at {}", path.display());

        let dir = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        if !dir.exists() {
            error!("Target folder does not exist: {}", dir.display());
            return Err(OwError::DirectoryError { path: dir });
        }

        if path.exists() {
            return Err(OwError::NoteAlreadyExists { path });
        }

        let mut temp_file = NamedTempFile::new_in(&dir).map_err(|e| {
            error!("Failed to create temporary file in {}: {}", dir.display(), e);
            OwError::Io(e)
        })?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?;

        temp_file.persist(&path).map_err(|e| {
            error!("Failed to persist note {}: {}", path.display(), e.error);
            OwError::Io(e.error)
        })?;

        info!("Created note {}", path.display());
        Ok(path)
    }
}
