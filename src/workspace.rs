//! Workspace view model.
//!
//! Tracks the single active note view: which file it shows, whether it is
//! being edited or read, and where the cursor sits. Mode and cursor updates
//! are fire-and-forget; with no active view they do nothing.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

/// How the active view renders its note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Editing,
    Reading,
}

/// A cursor position inside a note, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: usize,
    pub ch: usize,
}

/// The note currently shown in the active pane.
#[derive(Debug, Clone)]
pub struct NoteView {
    pub path: PathBuf,
    pub mode: ViewMode,
    pub cursor: CursorPosition,
}

/// Holds the active view, if any.
#[derive(Debug, Default)]
pub struct Workspace {
    active: Option<NoteView>,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace::default()
    }

    /// Opens a note in the active pane, in editing mode with the cursor at
    /// the end of the content.
    pub fn open(&mut self, path: PathBuf, content: &str) {
        debug!("Opening {} in the active pane", path.display());
        self.active = Some(NoteView {
            path,
            mode: ViewMode::Editing,
            cursor: cursor_at_end(content),
        });
    }

    pub fn active_view(&self) -> Option<&NoteView> {
        self.active.as_ref()
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|view| view.path.as_path())
    }

    /// Switches the active view's render mode. No active view, no effect.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if let Some(view) = self.active.as_mut() {
            debug!("Switching {} to {:?} mode", view.path.display(), mode);
            view.mode = mode;
        }
    }

    /// Moves the cursor in the active view. No active view, no effect.
    pub fn set_cursor(&mut self, cursor: CursorPosition) {
        if let Some(view) = self.active.as_mut() {
            view.cursor = cursor;
        }
    }
}

/// Cursor position pointing just past the last character of `content`.
pub fn cursor_at_end(content: &str) -> CursorPosition {
    let line = content.matches('\n').count();
    let ch = content
        .rsplit('\n')
        .next()
        .map(|last| last.chars().count())
        .unwrap_or(0);
    CursorPosition { line, ch }
}
