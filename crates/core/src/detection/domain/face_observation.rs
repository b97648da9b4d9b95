use serde::{Deserialize, Serialize};

use crate::shared::geometry::{Point, Rect};

/// One detected face for a single frame, in the detector's normalized
/// coordinate space.
///
/// Eye landmarks are reported in the detector's local eye-region axis
/// convention, which differs from the full-image convention of the
/// bounding box. See [`CoordinateMapper`](crate::gaze::domain::coordinate_mapper::CoordinateMapper).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub bounding_box: Rect,
    #[serde(default)]
    pub left_eye: Vec<Point>,
    #[serde(default)]
    pub right_eye: Vec<Point>,
    #[serde(default)]
    pub yaw_radians: Option<f64>,
}

impl FaceObservation {
    /// A face with no landmarks and no yaw estimate.
    pub fn new(bounding_box: Rect) -> Self {
        Self {
            bounding_box,
            left_eye: Vec::new(),
            right_eye: Vec::new(),
            yaw_radians: None,
        }
    }

    pub fn with_eyes(mut self, left_eye: Vec<Point>, right_eye: Vec<Point>) -> Self {
        self.left_eye = left_eye;
        self.right_eye = right_eye;
        self
    }

    pub fn with_yaw(mut self, yaw_radians: f64) -> Self {
        self.yaw_radians = Some(yaw_radians);
        self
    }

    /// True only when both eye regions carry at least one landmark.
    pub fn has_eye_landmarks(&self) -> bool {
        !self.left_eye.is_empty() && !self.right_eye.is_empty()
    }

    /// Yaw estimate, with a missing estimate read as head-on.
    pub fn yaw_or_neutral(&self) -> f64 {
        self.yaw_radians.unwrap_or(0.0)
    }

    /// Box and landmark coordinates are finite numbers.
    pub fn has_finite_geometry(&self) -> bool {
        self.bounding_box.is_finite()
            && self.left_eye.iter().all(Point::is_finite)
            && self.right_eye.iter().all(Point::is_finite)
    }

    /// All coordinates and the yaw estimate are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.has_finite_geometry() && self.yaw_radians.map_or(true, f64::is_finite)
    }
}
