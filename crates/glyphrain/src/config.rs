//! User configuration for the terminal app.
//!
//! Stored as TOML in the platform config directory. Only the presentation
//! lives here; the animation constants are fixed at build time.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use glyphrain_core::Theme;
use serde::{Deserialize, Serialize};

/// Application name used for config and cache directories.
pub const APP_NAME: &str = "glyphrain";

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Color theme.
    pub theme: Theme,
    /// Fixed seed for reproducible rain. A random seed is used when unset.
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Location of the config file, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the config from its default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load the config at `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text)
                .wrap_err_with(|| format!("invalid config file {}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => {
                Err(err).wrap_err_with(|| format!("failed to read config file {}", path.display()))
            }
        }
    }

    /// Parse a config from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).wrap_err_with(|| format!("failed to write {}", path.display()))
    }
}
