//! Persisted settings for the ownotes application.
//!
//! Settings are stored as a flat JSON record. Loading merges the stored
//! record over the defaults: stored values win, missing or garbled fields
//! fall back, and keys this version does not know are carried through
//! unchanged so a newer record survives a load/save round trip.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use which::which;

use crate::{OwError, Result};

/// Horizontal placement of the countdown display. Opaque to the timer
/// logic, consumed only by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPosition {
    Left,
    Center,
    Right,
}

/// Application settings record.
///
/// Field names are persisted in camelCase. `extra` holds unknown keys from
/// the stored record so they are preserved on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Name template for new notes; supports {{date}}, {{time}}, {{object}}
    pub note_name: String,

    /// strftime format backing the {{date}} placeholder
    pub date_format: String,

    /// strftime format backing the {{time}} placeholder
    pub time_format: String,

    /// Folder new notes are created in
    pub new_file_location: String,

    /// Whether to prepend the tag line to new notes
    pub add_tag: bool,

    /// Whether to embed a countdown block in new notes
    pub add_timer: bool,

    /// Countdown length in seconds, measured from note creation
    pub timer_duration: u32,

    /// Where the countdown display is aligned
    pub timer_position: TimerPosition,

    /// Switch the active view to reading mode when the countdown expires
    pub timer_auto_read: bool,

    /// Append a rule line after the countdown block
    pub timer_add_rule: bool,

    /// Editor command for opening created notes
    pub editor_command: Option<String>,

    /// Unknown keys from the stored record, preserved through saves
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            note_name: "{{date}} ({{object}})".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M".to_string(),
            new_file_location: "ObjectWriter".to_string(),
            add_tag: true,
            add_timer: false,
            timer_duration: 300,
            timer_position: TimerPosition::Center,
            timer_auto_read: true,
            timer_add_rule: false,
            editor_command: None,
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Default location of the settings file.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("ownotes").join("settings.json"))
            .unwrap_or_else(|| PathBuf::from(".ownotes-settings.json"))
    }

    /// Loads the settings record from `path`.
    ///
    /// Never fails: a missing file, unreadable JSON, or garbled fields all
    /// resolve to defaults for the affected parts.
    pub fn load(path: &Path) -> Settings {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}, using defaults", path.display());
                return Settings::default();
            }
            Err(e) => {
                warn!("Failed to read settings from {}: {}", path.display(), e);
                return Settings::default();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(stored) => Settings::merge(stored),
            Err(e) => {
                warn!("Settings file {} is not valid JSON: {}", path.display(), e);
                Settings::default()
            }
        }
    }

    /// Merges a stored record over the defaults. Stored values win; a field
    /// that is missing or fails to parse keeps its default. Keys that do not
    /// belong to the record land in `extra`.
    pub fn merge(stored: Value) -> Settings {
        let mut settings = Settings::default();

        let Value::Object(mut map) = stored else {
            warn!("Stored settings are not a JSON object, using defaults");
            return settings;
        };

        take_field(&mut map, "noteName", &mut settings.note_name);
        take_field(&mut map, "dateFormat", &mut settings.date_format);
        take_field(&mut map, "timeFormat", &mut settings.time_format);
        take_field(&mut map, "newFileLocation", &mut settings.new_file_location);
        take_field(&mut map, "addTag", &mut settings.add_tag);
        take_field(&mut map, "addTimer", &mut settings.add_timer);
        take_field(&mut map, "timerDuration", &mut settings.timer_duration);
        take_field(&mut map, "timerPosition", &mut settings.timer_position);
        take_field(&mut map, "timerAutoRead", &mut settings.timer_auto_read);
        take_field(&mut map, "timerAddRule", &mut settings.timer_add_rule);
        take_field(&mut map, "editorCommand", &mut settings.editor_command);

        settings.extra = map;
        settings
    }

    /// Saves the settings record to `path` using an atomic write.
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create settings directory {}: {}", dir.display(), e);
                OwError::Io(e)
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| {
            error!("Failed to create temporary settings file: {}", e);
            OwError::Io(e)
        })?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(path).map_err(|e| {
            error!("Failed to persist settings to {}: {}", path.display(), e.error);
            OwError::Io(e.error)
        })?;

        debug!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Updates a single field from a `key=value` style assignment. The key
    /// uses the persisted camelCase spelling.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "noteName" => self.note_name = value.to_string(),
            "dateFormat" => self.date_format = value.to_string(),
            "timeFormat" => self.time_format = value.to_string(),
            "newFileLocation" => self.new_file_location = value.to_string(),
            "addTag" => self.add_tag = parse_bool(key, value)?,
            "addTimer" => self.add_timer = parse_bool(key, value)?,
            "timerDuration" => {
                self.timer_duration = value.parse().map_err(|_| OwError::ConfigError {
                    message: format!("{} expects a number of seconds, got '{}'", key, value),
                })?;
            }
            "timerPosition" => {
                self.timer_position = match value.to_lowercase().as_str() {
                    "left" => TimerPosition::Left,
                    "center" => TimerPosition::Center,
                    "right" => TimerPosition::Right,
                    other => {
                        return Err(OwError::ConfigError {
                            message: format!(
                                "{} must be one of left, center, right, got '{}'",
                                key, other
                            ),
                        })
                    }
                };
            }
            "timerAutoRead" => self.timer_auto_read = parse_bool(key, value)?,
            "timerAddRule" => self.timer_add_rule = parse_bool(key, value)?,
            "editorCommand" => {
                self.editor_command = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            other => {
                return Err(OwError::ConfigError {
                    message: format!("Unknown settings key: {}", other),
                });
            }
        }
        Ok(())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -t".to_string()
        } else {
            // Try common Linux editors
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

/// Moves `key` out of the stored map into `slot` when it parses as the
/// expected type; a garbled value is dropped so it does not shadow the
/// default on the next save.
fn take_field<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str, slot: &mut T) {
    if let Some(value) = map.remove(key) {
        match serde_json::from_value(value) {
            Ok(parsed) => *slot = parsed,
            Err(e) => warn!("Ignoring malformed settings field '{}': {}", key, e),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| OwError::ConfigError {
        message: format!("{} expects true or false, got '{}'", key, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = Settings::merge(json!({ "noteName": "{{object}}" }));
        assert_eq!(settings.note_name, "{{object}}");
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.timer_duration, 300);
        assert!(settings.add_tag);
    }

    #[test]
    fn stored_values_win_over_defaults() {
        let settings = Settings::merge(json!({
            "addTag": false,
            "addTimer": true,
            "timerDuration": 60,
            "timerPosition": "right"
        }));
        assert!(!settings.add_tag);
        assert!(settings.add_timer);
        assert_eq!(settings.timer_duration, 60);
        assert_eq!(settings.timer_position, TimerPosition::Right);
    }

    #[test]
    fn garbled_field_falls_back_silently() {
        let settings = Settings::merge(json!({ "timerDuration": "soon", "addTag": false }));
        assert_eq!(settings.timer_duration, 300);
        assert!(!settings.add_tag);
    }

    #[test]
    fn unknown_keys_survive_a_save_round_trip() {
        let settings = Settings::merge(json!({
            "noteName": "{{time}}",
            "futureFeature": { "enabled": true }
        }));
        assert_eq!(settings.extra.get("futureFeature"), Some(&json!({ "enabled": true })));

        let reloaded: Value =
            serde_json::from_str(&serde_json::to_string(&settings).unwrap()).unwrap();
        assert_eq!(reloaded["futureFeature"], json!({ "enabled": true }));
        assert_eq!(reloaded["noteName"], json!("{{time}}"));
    }

    #[test]
    fn load_returns_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.set_field("newFileLocation", "Prompts").unwrap();
        settings.set_field("addTimer", "true").unwrap();
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path);
        assert_eq!(loaded.new_file_location, "Prompts");
        assert!(loaded.add_timer);
    }

    #[test]
    fn set_field_rejects_unknown_keys_and_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set_field("colour", "red").is_err());
        assert!(settings.set_field("timerDuration", "soon").is_err());
        assert!(settings.set_field("timerPosition", "top").is_err());
    }
}
