use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// File the settings are persisted to, relative to the working directory.
pub const SETTINGS_FILE_NAME: &str = "EasyToDoSettings.json";

/// User-facing behavior toggles, persisted separately from the task data.
///
/// A missing settings file yields the defaults without writing anything; the
/// file is only created once a settings command saves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub show_completed_tasks: bool,
    pub current_list_index: usize,
    pub enable_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            show_completed_tasks: true,
            current_list_index: 0,
            enable_logging: false,
        }
    }
}

impl Settings {
    /// Keep the selected list in range after removals. Falls back to 0 when
    /// no lists remain.
    pub fn clamp_list_index(&mut self, list_count: usize) {
        if self.current_list_index >= list_count {
            self.current_list_index = list_count.saturating_sub(1);
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, &json)?;
        debug!("saved settings: {json}");
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let json = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from the settings file in the working directory.
    pub fn load_current_dir() -> Result<Self> {
        Self::load_from_file(SETTINGS_FILE_NAME)
    }

    /// Save to the settings file in the working directory.
    pub fn save_current_dir(&self) -> Result<()> {
        self.save_to_file(SETTINGS_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_show_completed_and_select_first_list() {
        let settings = Settings::default();

        assert!(settings.show_completed_tasks);
        assert_eq!(settings.current_list_index, 0);
        assert!(!settings.enable_logging);
    }

    #[test]
    fn missing_file_yields_defaults_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("EasyToDoSettings.json");

        let settings = Settings::load_from_file(&path).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(!path.exists());
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        fs::write(&path, r#"{"enable_logging":true}"#).unwrap();

        let settings = Settings::load_from_file(&path).unwrap();

        assert!(settings.enable_logging);
        assert!(settings.show_completed_tasks);
        assert_eq!(settings.current_list_index, 0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            show_completed_tasks: false,
            current_list_index: 2,
            enable_logging: true,
        };
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn clamp_keeps_selection_in_range() {
        let mut settings = Settings {
            current_list_index: 5,
            ..Default::default()
        };

        settings.clamp_list_index(3);
        assert_eq!(settings.current_list_index, 2);

        settings.clamp_list_index(0);
        assert_eq!(settings.current_list_index, 0);
    }
}
