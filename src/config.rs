//! User preferences for the editing layer.

use crate::constants;
use crate::error::GraphResult;
use crate::model::ItemizeOptions;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable forcing command logging on or off
pub const LOG_COMMANDS_ENV: &str = "NODLE_LOG_COMMANDS";

/// Preferences consulted by command handlers and state tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Duplicate constant nodes instead of fanning their output out
    pub auto_itemize_constants: bool,

    /// Duplicate variable nodes instead of fanning their output out
    pub auto_itemize_variables: bool,

    /// Undo records kept before the oldest is dropped
    pub max_undo_depth: usize,

    /// Committed change-sets kept per state component
    pub changeset_history_depth: usize,

    /// Log every dispatched command at info level
    pub log_all_dispatched_commands: bool,

    /// Vertical spacing between exit portals stacked on one input
    pub portal_row_height: f32,

    /// Horizontal distance between a port and a portal created for it
    pub portal_offset: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_itemize_constants: true,
            auto_itemize_variables: true,
            max_undo_depth: constants::state::DEFAULT_MAX_UNDO_DEPTH,
            changeset_history_depth: constants::state::DEFAULT_CHANGESET_HISTORY,
            log_all_dispatched_commands: false,
            portal_row_height: constants::portal::DEFAULT_ROW_HEIGHT,
            portal_offset: constants::portal::DEFAULT_OFFSET,
        }
    }
}

impl Preferences {
    /// Load preferences from the user's home directory with environment overrides.
    pub fn load() -> GraphResult<Self> {
        let prefs = match Self::preferences_file_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        Ok(prefs.with_env_overrides())
    }

    /// Load preferences from an explicit file.
    pub fn load_from(path: &Path) -> GraphResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let prefs = serde_json::from_str(&contents)?;
        debug!("Loaded preferences from {}", path.display());
        Ok(prefs)
    }

    /// Save preferences to the user's home directory.
    pub fn save(&self) -> GraphResult<()> {
        match Self::preferences_file_path() {
            Some(path) => self.save_to(&path),
            None => {
                warn!("No home directory, preferences not saved");
                Ok(())
            }
        }
    }

    /// Save preferences to an explicit file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> GraphResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// `~/.nodle/preferences.json`
    pub fn preferences_file_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".nodle").join("preferences.json"))
    }

    fn with_env_overrides(self) -> Self {
        let log_all_dispatched_commands = match std::env::var(LOG_COMMANDS_ENV) {
            Ok(value) => matches!(value.as_str(), "1" | "true" | "on"),
            Err(_) => self.log_all_dispatched_commands,
        };
        Self {
            log_all_dispatched_commands,
            ..self
        }
    }

    /// Itemize behavior for edge creation
    pub fn itemize_options(&self) -> ItemizeOptions {
        ItemizeOptions {
            constants: self.auto_itemize_constants,
            variables: self.auto_itemize_variables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let prefs = Preferences {
            auto_itemize_constants: false,
            max_undo_depth: 5,
            ..Preferences::default()
        };
        prefs.save_to(&path).unwrap();

        let loaded = Preferences::load_from(&path).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, r#"{ "auto_itemize_variables": false }"#).unwrap();

        let loaded = Preferences::load_from(&path).unwrap();
        assert!(!loaded.auto_itemize_variables);
        assert!(loaded.auto_itemize_constants);
        assert_eq!(loaded.max_undo_depth, constants::state::DEFAULT_MAX_UNDO_DEPTH);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Preferences::load_from(&path),
            Err(crate::error::GraphError::Json(_))
        ));
    }
}
