//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides [`Settings::data_file`].
pub const DATA_FILE_ENV: &str = "PHASE_PLANNER_DATA";

const APP_NAME: &str = "StudioPhasePlanner";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON snapshot holding projects, phases and the team.
    pub data_file: PathBuf,
    /// Directory scanned for user `*.csv` templates.
    pub templates_dir: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        let (config_dir, data_dir) = base_dirs();
        Self {
            data_file: data_dir.join("planner.json"),
            templates_dir: config_dir.join("templates"),
            log_filter: "studio_phase_planner=info".to_string(),
        }
    }
}

impl Settings {
    /// Where the settings file lives.
    pub fn default_path() -> PathBuf {
        base_dirs().0.join("settings.json")
    }

    /// Load settings from the default location, then apply env overrides.
    pub fn load() -> Self {
        let mut settings = Self::load_from(&Self::default_path());
        if let Some(path) = std::env::var_os(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            settings.data_file = PathBuf::from(path);
        }
        settings
    }

    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// (config dir, data dir), falling back to the working directory.
fn base_dirs() -> (PathBuf, PathBuf) {
    match directories::ProjectDirs::from("", "", APP_NAME) {
        Some(dirs) => (dirs.config_dir().to_path_buf(), dirs.data_dir().to_path_buf()),
        None => (PathBuf::from("."), PathBuf::from(".")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Settings::load_from(&dir.path().join("nope.json")), Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"log_filter":"debug"}"#).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.data_file, Settings::default().data_file);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("settings.json");
        let settings = Settings {
            data_file: dir.path().join("data.json"),
            templates_dir: dir.path().join("templates"),
            log_filter: "warn".into(),
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn garbage_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
