//! CLI application handler.
//!
//! Wires the note creation flow, the countdown runner, and configuration
//! management to the command surface.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use chrono::{Local, Utc};
use console::style;
use log::{debug, info, warn};
use shell_words::split;
use terminal_size::{terminal_size, Width};

use crate::{
    build_note_content, drive_countdown, extract_countdown_blocks, format_timestamp, random_word,
    render_note_name, Commands, Countdown, OwError, Result, Settings, TerminalSurface, Vault,
    ViewMode, Workspace,
};

/// Prints a transient, non-blocking notice.
pub fn notice(message: &str) {
    warn!("{}", message.replace('\n', ": "));
    eprintln!("{}", style(message).yellow());
}

/// CLI application handler - processes CLI commands and wires them to the
/// vault and workspace
pub struct App {
    /// Application settings
    settings: Settings,

    /// Where the settings record is persisted
    settings_path: PathBuf,

    /// Folder tree notes are created in
    vault: Vault,

    /// The active-view model
    workspace: Workspace,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application with the given settings and vault
    pub fn new(settings: Settings, settings_path: PathBuf, vault: Vault, verbose: bool) -> Self {
        Self {
            settings,
            settings_path,
            vault,
            workspace: Workspace::new(),
            verbose,
        }
    }

    /// Run the CLI application with the given command
    pub async fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::New { word, no_edit } => self.create_note(word, no_edit)?,

            Commands::Run { note } => self.run_timers(note).await?,

            Commands::Config { show, set, reset } => self.handle_config(show, set, reset)?,
        }

        Ok(())
    }

    /// Creates a new object writer note and opens it.
    fn create_note(&mut self, word: Option<String>, no_edit: bool) -> Result<()> {
        let word = word.unwrap_or_else(|| random_word().to_string());
        debug!("Prompt word: {}", word);

        let now = Local::now();
        let date = format_timestamp(&now, &self.settings.date_format);
        let time = format_timestamp(&now, &self.settings.time_format);
        let file_name = render_note_name(&self.settings.note_name, &date, &time, &word);
        let content = build_note_content(&self.settings, Utc::now());

        let path = match self
            .vault
            .create_note(&self.settings.new_file_location, &file_name, &content)
        {
            Ok(path) => path,
            Err(e) => {
                // Recoverable: report and abort without opening anything.
                notice(&format!(
                    "Couldn't create object writer note: {}\n{}",
                    file_name, e
                ));
                return Ok(());
            }
        };

        self.workspace.open(path.clone(), &content);
        println!("Created note {}", style(path.display()).bold());
        if self.verbose {
            if let Some(view) = self.workspace.active_view() {
                println!("Cursor at line {}, column {}", view.cursor.line, view.cursor.ch);
            }
        }

        if !no_edit {
            self.launch_editor(&path)?;
        }

        Ok(())
    }

    /// Runs the countdown blocks embedded in `note`, in document order.
    async fn run_timers(&mut self, note: PathBuf) -> Result<()> {
        let source = fs::read_to_string(&note).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                OwError::FileNotFound {
                    file_path: note.display().to_string(),
                }
            } else {
                OwError::Io(e)
            }
        })?;

        self.workspace.open(note.clone(), &source);

        let blocks = extract_countdown_blocks(&source);
        debug!("Found {} countdown block(s) in {}", blocks.len(), note.display());

        for body in blocks {
            // Malformed or past-due payloads render nothing.
            let Some(mut countdown) = Countdown::from_block(&body, Utc::now()) else {
                debug!("Skipping countdown block without a future deadline");
                continue;
            };

            let mut surface = TerminalSurface::new(self.settings.timer_position);
            drive_countdown(
                &mut countdown,
                &mut surface,
                &mut self.workspace,
                self.settings.timer_auto_read,
            )
            .await?;
        }

        if self.workspace.active_view().map(|view| view.mode) == Some(ViewMode::Reading) {
            self.print_reading_view(&source);
        }

        Ok(())
    }

    /// Prints the note read-only, the way the run command leaves it after an
    /// auto-read expiry.
    fn print_reading_view(&self, source: &str) {
        let term_width = terminal_size().map(|(Width(w), _)| w as usize).unwrap_or(80);
        if let Some(view) = self.workspace.active_view() {
            println!("{}", style(view.path.display()).bold());
        }
        println!("{}", "-".repeat(term_width.min(50)));
        println!("{}", source);
    }

    /// Handles the config subcommand.
    fn handle_config(&mut self, show: bool, set: Option<String>, reset: bool) -> Result<()> {
        let changed = reset || set.is_some();

        if reset {
            self.settings = Settings::default();
            self.settings.save(&self.settings_path)?;
            println!("Configuration reset to defaults.");
        }

        if let Some(assignment) = set {
            let (key, value) = assignment.split_once('=').ok_or_else(|| OwError::ConfigError {
                message: format!("Expected key=value, got '{}'", assignment),
            })?;
            self.settings.set_field(key.trim(), value.trim())?;
            self.settings.save(&self.settings_path)?;
            println!("Updated {}.", key.trim());
        }

        if show || !changed {
            println!("{}", serde_json::to_string_pretty(&self.settings)?);
        }

        Ok(())
    }

    fn launch_editor(&self, file_path: &Path) -> Result<()> {
        let editor_cmd = self.settings.get_editor_command();
        info!("Opening {} with '{}'", file_path.display(), editor_cmd);

        let parts = split(&editor_cmd).map_err(|e| OwError::EditorError {
            message: format!("Failed to parse editor command '{}': {}", editor_cmd, e),
        })?;
        let (program, args) = parts.split_first().ok_or_else(|| OwError::EditorError {
            message: "Editor command is empty".to_string(),
        })?;

        let status = Command::new(program)
            .args(args)
            .arg(file_path)
            .status()
            .map_err(|e| OwError::EditorError {
                message: format!("Failed to launch editor '{}': {}", program, e),
            })?;

        if !status.success() {
            return Err(OwError::EditorError {
                message: format!("Editor exited with status: {}", status),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(root: &Path) -> App {
        let mut settings = Settings::default();
        settings.new_file_location = "Prompts".to_string();
        App::new(
            settings,
            root.join("settings.json"),
            Vault::new(root.to_path_buf()),
            false,
        )
    }

    #[test]
    fn create_note_writes_the_file_and_opens_it() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Prompts")).unwrap();
        let mut app = test_app(dir.path());

        app.create_note(Some("coin".to_string()), true).unwrap();

        let opened = app.workspace.active_path().unwrap().to_path_buf();
        assert!(opened.starts_with(dir.path().join("Prompts")));
        assert!(opened.file_name().unwrap().to_string_lossy().contains("(coin).md"));
        assert_eq!(fs::read_to_string(&opened).unwrap(), "#ObjectWriter\n\n");
        assert_eq!(app.workspace.active_view().unwrap().mode, ViewMode::Editing);
    }

    #[test]
    fn create_note_failure_is_a_notice_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // No Prompts folder: creation fails, the command still succeeds.
        let mut app = test_app(dir.path());

        app.create_note(Some("coin".to_string()), true).unwrap();

        assert!(app.workspace.active_view().is_none());
        assert!(!dir.path().join("Prompts").exists());
    }

    #[test]
    fn config_set_persists_the_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        app.handle_config(false, Some("timerDuration=120".to_string()), false)
            .unwrap();

        let reloaded = Settings::load(&dir.path().join("settings.json"));
        assert_eq!(reloaded.timer_duration, 120);
    }

    #[test]
    fn config_set_rejects_a_bare_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        let err = app.handle_config(false, Some("timerDuration".to_string()), false);
        assert!(matches!(err, Err(OwError::ConfigError { .. })));
    }

    #[test]
    fn config_reset_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.handle_config(false, Some("addTag=false".to_string()), false).unwrap();

        app.handle_config(false, None, true).unwrap();

        let reloaded = Settings::load(&dir.path().join("settings.json"));
        assert_eq!(reloaded, Settings::default());
    }
}
