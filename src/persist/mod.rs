//! Persistence layer for console configuration.
//!
//! Provides RON-based save/load for [`ConsoleConfig`].

use std::fs;
use std::path::Path;

use bevy::prelude::*;

use crate::config::ConsoleConfig;
use crate::core::Console;

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "console.ron";

/// Errors that can occur during config operations.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error (path, message).
    Io(String, String),
    /// Parse error (path, message).
    Parse(String, String),
    /// Serialization error.
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, msg) => write!(f, "IO error for '{}': {}", path, msg),
            ConfigError::Parse(path, msg) => write!(f, "Parse error for '{}': {}", path, msg),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConsoleConfig {
    /// Load config from a RON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;

        ron::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Save config to a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::Io(parent.display().to_string(), e.to_string()))?;
            }
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);

        let contents = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))
    }

    /// Load config from file, returning default if it can't be read.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

/// Resource tracking the config file path.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub String);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(DEFAULT_CONFIG_FILE.to_string())
    }
}

/// System to load config on startup.
pub fn load_config_on_startup(
    mut config: ResMut<ConsoleConfig>,
    mut console: ResMut<Console>,
    config_path: Res<ConfigPath>,
) {
    let path = &config_path.0;

    if !Path::new(path).exists() {
        info!("No config file found at '{}', using defaults", path);
        return;
    }

    match ConsoleConfig::load(path) {
        Ok(loaded) => {
            info!("Loaded console config from '{}'", path);
            console.set_config(loaded.clone());
            *config = loaded;
        }
        Err(e) => {
            error!("Failed to load config: {}", e);
        }
    }
}
