use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::effects::domain::effect_preset::{default_presets, EffectPreset};
use crate::shared::constants::{DEFAULT_BLUR_RADIUS, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not determine config directory")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_blur_radius")]
    pub blur_radius: f32,
    /// Directory preset images and thumbnails are resolved against.
    #[serde(default)]
    pub asset_dir: Option<PathBuf>,
    #[serde(default = "default_presets")]
    pub presets: Vec<EffectPreset>,
    /// Set to false to skip the GPU probe and run without effects.
    #[serde(default = "default_gpu_enabled")]
    pub gpu_enabled: bool,
}

fn default_blur_radius() -> f32 {
    DEFAULT_BLUR_RADIUS
}

fn default_gpu_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blur_radius: DEFAULT_BLUR_RADIUS,
            asset_dir: None,
            presets: default_presets(),
            gpu_enabled: true,
        }
    }
}

impl Settings {
    /// `<config dir>/Backdrop/settings.json`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Loads from the platform config path, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(write_err)
    }
}
