//! Configuration file support
//!
//! Optional TOML file layered between the command preset and CLI flags:
//!
//! ```toml
//! [crop]
//! dpi = 128.0
//! threshold = 0.008
//! space = 5
//! strategy = "center"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::crop::{CropError, CropOptions, Result};
use crate::detect::CropStrategy;

/// Application directory name under the user config directory
pub const APP_DIR: &str = "pdf-crop";

/// Config file name
pub const CONFIG_FILE: &str = "config.toml";

/// `[crop]` section; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<CropStrategy>,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crop: CropSection,
}

impl Config {
    /// Default config location, `<config_dir>/pdf-crop/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location; missing file yields defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from an explicit path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
            .map_err(|e| CropError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CropError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CropError::Config(e.to_string()))
    }

    /// Apply file values, then CLI overrides, on top of a preset.
    pub fn merge_with_cli(&self, preset: CropOptions, cli: &CliOverrides) -> CropOptions {
        let file = &self.crop;
        CropOptions {
            dpi: cli.dpi.or(file.dpi).unwrap_or(preset.dpi),
            threshold: cli.threshold.or(file.threshold).unwrap_or(preset.threshold),
            space: cli.space.or(file.space).unwrap_or(preset.space),
            strategy: cli.strategy.or(file.strategy).unwrap_or(preset.strategy),
        }
        .normalized()
    }
}

/// Values explicitly given on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CliOverrides {
    pub dpi: Option<f64>,
    pub threshold: Option<f64>,
    pub space: Option<usize>,
    pub strategy: Option<CropStrategy>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}
