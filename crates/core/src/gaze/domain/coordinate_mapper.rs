//! Projection of detector-normalized geometry into preview-view pixels.
//!
//! Two coordinate conventions meet here. The face bounding box follows the
//! detector's full-image convention, selected by [`DetectorOrientation`].
//! Eye landmarks follow the detector's local eye-region convention, in
//! which the axes are swapped relative to the view: a landmark `(u, v)`
//! lands at `x = v * face.height + face.x`, `y = u * face.width + face.y`.
//! Overlay alignment on real detector output depends on that swap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::geometry::{Point, Rect, Size};

/// Origin and axis convention of the detector's normalized bounding boxes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorOrientation {
    /// Origin top-left, y grows downward, same axes as the view.
    TopLeftOrigin,
    /// Origin bottom-left, y grows upward.
    #[default]
    BottomLeftOrigin,
    /// Sensor rotated a quarter turn: detector x runs along view y.
    Transposed,
}

impl fmt::Display for DetectorOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectorOrientation::TopLeftOrigin => write!(f, "top-left"),
            DetectorOrientation::BottomLeftOrigin => write!(f, "bottom-left"),
            DetectorOrientation::Transposed => write!(f, "transposed"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown orientation '{0}' (expected top-left, bottom-left or transposed)")]
pub struct UnknownOrientation(pub String);

impl FromStr for DetectorOrientation {
    type Err = UnknownOrientation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(DetectorOrientation::TopLeftOrigin),
            "bottom-left" => Ok(DetectorOrientation::BottomLeftOrigin),
            "transposed" => Ok(DetectorOrientation::Transposed),
            other => Err(UnknownOrientation(other.to_string())),
        }
    }
}

/// A face observation projected into view pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedGeometry {
    pub face_rect: Rect,
    /// Face rectangle outline, four corners.
    pub face_path: Vec<Point>,
    /// One closed polygon per eye; empty unless both eyes have landmarks.
    pub eye_paths: Vec<Vec<Point>>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CoordinateMapper {
    orientation: DetectorOrientation,
}

impl CoordinateMapper {
    pub fn new(orientation: DetectorOrientation) -> Self {
        Self { orientation }
    }

    pub fn orientation(&self) -> DetectorOrientation {
        self.orientation
    }

    /// Scales a normalized bounding box to view pixels.
    pub fn project_face_box(&self, normalized: Rect, view: Size) -> Rect {
        let Rect {
            x,
            y,
            width,
            height,
        } = normalized;
        match self.orientation {
            DetectorOrientation::TopLeftOrigin => Rect::new(
                x * view.width,
                y * view.height,
                width * view.width,
                height * view.height,
            ),
            DetectorOrientation::BottomLeftOrigin => Rect::new(
                x * view.width,
                (1.0 - y - height) * view.height,
                width * view.width,
                height * view.height,
            ),
            DetectorOrientation::Transposed => Rect::new(
                y * view.width,
                x * view.height,
                height * view.width,
                width * view.height,
            ),
        }
    }

    /// Inverse of [`project_face_box`](Self::project_face_box).
    ///
    /// Returns `None` for a view with no area.
    pub fn unproject_face_box(&self, pixels: Rect, view: Size) -> Option<Rect> {
        if view.width <= 0.0 || view.height <= 0.0 {
            return None;
        }
        let rect = match self.orientation {
            DetectorOrientation::TopLeftOrigin => Rect::new(
                pixels.x / view.width,
                pixels.y / view.height,
                pixels.width / view.width,
                pixels.height / view.height,
            ),
            DetectorOrientation::BottomLeftOrigin => {
                let height = pixels.height / view.height;
                Rect::new(
                    pixels.x / view.width,
                    1.0 - pixels.y / view.height - height,
                    pixels.width / view.width,
                    height,
                )
            }
            DetectorOrientation::Transposed => Rect::new(
                pixels.y / view.height,
                pixels.x / view.width,
                pixels.height / view.height,
                pixels.width / view.width,
            ),
        };
        Some(rect)
    }

    /// Maps eye landmarks into view pixels relative to the projected face box.
    pub fn project_landmarks(&self, landmarks: &[Point], face_box: Rect) -> Vec<Point> {
        landmarks
            .iter()
            .map(|p| {
                Point::new(
                    p.y * face_box.height + face_box.x,
                    p.x * face_box.width + face_box.y,
                )
            })
            .collect()
    }

    /// Projects an observation, or returns `None` when its geometry or the
    /// view size is not finite.
    pub fn try_project(
        &self,
        observation: &FaceObservation,
        view: Size,
    ) -> Option<ProjectedGeometry> {
        let view_ok = view.width.is_finite() && view.height.is_finite();
        if !view_ok || !observation.has_finite_geometry() {
            return None;
        }
        Some(self.project(observation, view))
    }

    pub fn project(&self, observation: &FaceObservation, view: Size) -> ProjectedGeometry {
        let face_rect = self.project_face_box(observation.bounding_box, view);
        let eye_paths = if observation.has_eye_landmarks() {
            vec![
                self.project_landmarks(&observation.left_eye, face_rect),
                self.project_landmarks(&observation.right_eye, face_rect),
            ]
        } else {
            Vec::new()
        };
        ProjectedGeometry {
            face_rect,
            face_path: face_rect.corners().to_vec(),
            eye_paths,
        }
    }
}
