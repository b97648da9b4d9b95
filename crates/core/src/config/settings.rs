use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gaze::domain::coordinate_mapper::{CoordinateMapper, DetectorOrientation};
use crate::gaze::domain::gaze_evaluator::{GazeEvaluator, GazeThresholds, ThresholdError};
use crate::shared::constants::{
    DEFAULT_VIEW_HEIGHT, DEFAULT_VIEW_WIDTH, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};
use crate::shared::geometry::Size;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid settings: {0}")]
    Thresholds(#[from] ThresholdError),
    #[error("invalid settings: view size must be positive, got {width}x{height}")]
    ViewSize { width: f64, height: f64 },
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Persisted engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazeSettings {
    #[serde(default)]
    pub thresholds: GazeThresholds,
    #[serde(default)]
    pub orientation: DetectorOrientation,
    #[serde(default = "default_view_width")]
    pub view_width: f64,
    #[serde(default = "default_view_height")]
    pub view_height: f64,
}

fn default_view_width() -> f64 {
    DEFAULT_VIEW_WIDTH
}

fn default_view_height() -> f64 {
    DEFAULT_VIEW_HEIGHT
}

impl Default for GazeSettings {
    fn default() -> Self {
        Self {
            thresholds: GazeThresholds::default(),
            orientation: DetectorOrientation::default(),
            view_width: DEFAULT_VIEW_WIDTH,
            view_height: DEFAULT_VIEW_HEIGHT,
        }
    }
}

impl GazeSettings {
    /// `<config dir>/GazeGate/settings.json`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(SettingsError::Parse)?;
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.thresholds.validate()?;
        let dims_ok = self.view_width.is_finite()
            && self.view_height.is_finite()
            && self.view_width > 0.0
            && self.view_height > 0.0;
        if !dims_ok {
            return Err(SettingsError::ViewSize {
                width: self.view_width,
                height: self.view_height,
            });
        }
        Ok(())
    }

    pub fn view_size(&self) -> Size {
        Size::new(self.view_width, self.view_height)
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.orientation)
    }

    pub fn evaluator(&self) -> GazeEvaluator {
        GazeEvaluator::new(self.thresholds)
    }
}
