//! Application settings: an explicit object with pure load/save functions.
//!
//! The settings file is a small JSON key/value document controlling whether
//! activity logging is enabled and where it goes. It is read at startup,
//! created with defaults when absent, and rewritable from the interface.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default settings file name, relative to the working directory.
pub const SETTINGS_FILE: &str = "settings.json";

const DEFAULT_LOG_FILE: &str = "repairtrack.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub log_enabled: bool,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_enabled: true,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Loads settings from `path`. A missing file is created with defaults
    /// and those defaults are returned.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let settings = Self::default();
            settings.save(path)?;
            return Ok(settings);
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the settings back to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
