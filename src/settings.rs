// Import necessary libraries and modules for file I/O and serialization.
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const SETTINGS_FILE: &str = "settings.json";

// Define a structure to hold application settings with serialization and deserialization capabilities.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub save_dir: PathBuf,  // Folder holding one JSON file per save.
    pub color_output: bool, // Flag to enable or disable colored terminal output.
    pub debug_mode: bool,   // Flag to enable or disable debug logging.
}

// Implement the Default trait for Settings to provide a method to create default settings.
impl Default for Settings {
    fn default() -> Self {
        Settings {
            save_dir: data_dir().join("saves"),
            color_output: true,
            debug_mode: false,
        }
    }
}

// Platform data folder, `./data` when the platform gives none.
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("com", "larsson_the", "postnuc")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}

impl Settings {
    pub fn default_path() -> PathBuf {
        data_dir().join(SETTINGS_FILE)
    }

    // Load settings from the default file path, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    // Same fallback for any path. Call after `logging::init` so the warning is kept.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_settings_from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings, could not read {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn load_settings_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?; // Read settings from file.
        let settings = serde_json::from_str(&data)?; // Deserialize JSON data into settings.
        Ok(settings)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self)?; // Serialize settings into pretty JSON format.
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?; // Create the directory if it doesn't exist.
        }
        let mut file = fs::File::create(path)?; // Create or overwrite the file.
        file.write_all(data.as_bytes())?;
        Ok(())
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug_mode {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
