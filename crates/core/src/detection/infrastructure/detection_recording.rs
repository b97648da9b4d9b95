use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::face_observation::FaceObservation;

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("failed to read recording {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write recording {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed recording: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Detector output for one frame: either the faces found or the reason
/// detection failed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    #[serde(default)]
    pub faces: Vec<FaceObservation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecordedFrame {
    pub fn with_faces(faces: Vec<FaceObservation>) -> Self {
        Self { faces, error: None }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            faces: Vec::new(),
            error: Some(reason.into()),
        }
    }
}

/// A captured sequence of detector results, indexed by frame position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecording {
    pub frames: Vec<RecordedFrame>,
}

impl DetectionRecording {
    pub fn new(frames: Vec<RecordedFrame>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self, RecordingError> {
        serde_json::from_str(json).map_err(RecordingError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, RecordingError> {
        let json = fs::read_to_string(path).map_err(|source| RecordingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), RecordingError> {
        let json = serde_json::to_string_pretty(self).map_err(RecordingError::Parse)?;
        fs::write(path, json).map_err(|source| RecordingError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
