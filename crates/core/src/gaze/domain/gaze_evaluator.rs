//! "Looking at the camera" heuristic.
//!
//! Frontal gaze is approximated by how closely the first landmark of each
//! eye lines up horizontally, combined with a bound on head yaw. This is a
//! coarse proxy, not gaze-vector estimation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::constants::{DEFAULT_EYE_ALIGNMENT_FRACTION, DEFAULT_MAX_YAW_RADIANS};

/// Tunable decision thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GazeThresholds {
    /// Eye separation must stay below this fraction of the face width.
    pub eye_alignment_fraction: f64,
    /// Absolute yaw must stay below this many radians.
    pub max_yaw_radians: f64,
}

impl Default for GazeThresholds {
    fn default() -> Self {
        Self {
            eye_alignment_fraction: DEFAULT_EYE_ALIGNMENT_FRACTION,
            max_yaw_radians: DEFAULT_MAX_YAW_RADIANS,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ThresholdError {
    #[error("eye_alignment_fraction must be a positive number, got {0}")]
    EyeAlignment(f64),
    #[error("max_yaw_radians must be a positive number, got {0}")]
    MaxYaw(f64),
}

impl GazeThresholds {
    pub fn validate(&self) -> Result<(), ThresholdError> {
        if !(self.eye_alignment_fraction.is_finite() && self.eye_alignment_fraction > 0.0) {
            return Err(ThresholdError::EyeAlignment(self.eye_alignment_fraction));
        }
        if !(self.max_yaw_radians.is_finite() && self.max_yaw_radians > 0.0) {
            return Err(ThresholdError::MaxYaw(self.max_yaw_radians));
        }
        Ok(())
    }
}

/// Intermediate quantities behind a verdict, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GazeMeasurement {
    pub face_width_px: f64,
    pub eye_separation_px: f64,
    pub yaw_radians: f64,
    pub looking_straight_at_lens: bool,
    pub facing_camera: bool,
}

impl GazeMeasurement {
    pub fn looking_at_camera(&self) -> bool {
        self.looking_straight_at_lens && self.facing_camera
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GazeEvaluator {
    thresholds: GazeThresholds,
}

impl GazeEvaluator {
    pub fn new(thresholds: GazeThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &GazeThresholds {
        &self.thresholds
    }

    /// Measures eye alignment and yaw for one face.
    ///
    /// Returns `None` when either eye has no landmarks.
    pub fn measure(
        &self,
        observation: &FaceObservation,
        view_width: f64,
    ) -> Option<GazeMeasurement> {
        let left = observation.left_eye.first()?;
        let right = observation.right_eye.first()?;

        let bbox = observation.bounding_box;
        let face_width = bbox.width * view_width;
        let face_center_x = bbox.x * view_width + face_width / 2.0;
        let face_left_x = face_center_x - face_width / 2.0;

        let left_eye_x = left.x * face_width + face_left_x;
        let right_eye_x = right.x * face_width + face_left_x;
        let eye_separation = (left_eye_x - right_eye_x).abs();

        let yaw = observation.yaw_or_neutral();

        Some(GazeMeasurement {
            face_width_px: face_width,
            eye_separation_px: eye_separation,
            yaw_radians: yaw,
            looking_straight_at_lens: eye_separation
                < face_width * self.thresholds.eye_alignment_fraction,
            facing_camera: yaw.abs() < self.thresholds.max_yaw_radians,
        })
    }

    /// Pure verdict: both eyes line up and the head is turned less than the
    /// yaw limit. A face without eye landmarks is never looking.
    pub fn evaluate(&self, observation: &FaceObservation, view_width: f64) -> bool {
        self.measure(observation, view_width)
            .is_some_and(|m| m.looking_at_camera())
    }

    /// Verdict for the capture gate, or `None` when the face cannot be
    /// judged (missing eye landmarks, degenerate width, non-finite input)
    /// and must be left out of the frame's verdict set.
    pub fn verdict(&self, observation: &FaceObservation, view_width: f64) -> Option<bool> {
        if !observation.is_finite() || !view_width.is_finite() {
            return None;
        }
        let measurement = self.measure(observation, view_width)?;
        if measurement.face_width_px <= 0.0 {
            return None;
        }
        Some(measurement.looking_at_camera())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::geometry::{Point, Rect};
    use approx::assert_relative_eq;
    use rstest::rstest;

    const VIEW_WIDTH: f64 = 300.0;

    /// Face box 150 px wide; first-landmark x values given directly.
    fn face(left_x: f64, right_x: f64, yaw: Option<f64>) -> FaceObservation {
        let obs = FaceObservation::new(Rect::new(0.25, 0.25, 0.5, 0.5)).with_eyes(
            vec![Point::new(left_x, 0.3), Point::new(left_x + 0.05, 0.35)],
            vec![Point::new(right_x, 0.6), Point::new(right_x + 0.05, 0.65)],
        );
        match yaw {
            Some(y) => obs.with_yaw(y),
            None => obs,
        }
    }

    // The heuristic only compares first-landmark x positions; these tests
    // pin that behavior rather than claim real gaze detection.

    #[rstest]
    #[case::centered(0.5)]
    #[case::left_side(0.1)]
    #[case::right_side(0.9)]
    fn test_aligned_eyes_head_on_is_looking(#[case] x: f64) {
        let evaluator = GazeEvaluator::default();
        assert!(evaluator.evaluate(&face(x, x, Some(0.0)), VIEW_WIDTH));
    }

    #[rstest]
    #[case::just_past_threshold(0.125)]
    #[case::well_past_threshold(0.4)]
    fn test_separated_eyes_never_looking(#[case] offset: f64) {
        let evaluator = GazeEvaluator::default();
        for yaw in [None, Some(0.0), Some(0.1), Some(-0.5)] {
            assert!(!evaluator.evaluate(&face(0.3, 0.3 + offset, yaw), VIEW_WIDTH));
        }
    }

    #[test]
    fn test_separation_equal_to_threshold_is_not_looking() {
        let evaluator = GazeEvaluator::default();
        // Face 100 px wide in a 200 px view: separation 10 px, limit 10 px.
        let obs = face(0.0, 0.1, Some(0.0));
        let m = evaluator.measure(&obs, 200.0).unwrap();
        assert_eq!(m.face_width_px, 100.0);
        assert_eq!(m.eye_separation_px, m.face_width_px * 0.1);
        assert!(!m.looking_straight_at_lens);
        assert!(!evaluator.evaluate(&obs, 200.0));
    }

    #[test]
    fn test_separation_just_under_threshold_is_looking() {
        let evaluator = GazeEvaluator::default();
        // 0.09 * 150 px = 13.5 px < 15 px
        assert!(evaluator.evaluate(&face(0.3, 0.39, None), VIEW_WIDTH));
    }

    #[rstest]
    #[case::at_limit(0.2)]
    #[case::negative_at_limit(-0.2)]
    #[case::far_right(1.0)]
    #[case::far_left(-0.9)]
    fn test_turned_head_never_looking(#[case] yaw: f64) {
        let evaluator = GazeEvaluator::default();
        assert!(!evaluator.evaluate(&face(0.5, 0.5, Some(yaw)), VIEW_WIDTH));
    }

    #[rstest]
    #[case(0.19)]
    #[case(-0.19)]
    fn test_yaw_inside_limit_is_looking(#[case] yaw: f64) {
        let evaluator = GazeEvaluator::default();
        assert!(evaluator.evaluate(&face(0.5, 0.5, Some(yaw)), VIEW_WIDTH));
    }

    #[test]
    fn test_missing_yaw_does_not_block() {
        let evaluator = GazeEvaluator::default();
        assert!(evaluator.evaluate(&face(0.5, 0.5, None), VIEW_WIDTH));
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let evaluator = GazeEvaluator::default();
        let obs = face(0.3, 0.35, Some(0.1));
        assert_eq!(
            evaluator.evaluate(&obs, VIEW_WIDTH),
            evaluator.evaluate(&obs, VIEW_WIDTH)
        );
    }

    #[test]
    fn test_measure_reports_pixel_quantities() {
        let evaluator = GazeEvaluator::default();
        let m = evaluator
            .measure(&face(0.2, 0.4, Some(-0.1)), VIEW_WIDTH)
            .unwrap();
        assert_relative_eq!(m.face_width_px, 150.0);
        assert_relative_eq!(m.eye_separation_px, 30.0, epsilon = 1e-9);
        assert_relative_eq!(m.yaw_radians, -0.1);
        assert!(!m.looking_straight_at_lens);
        assert!(m.facing_camera);
    }

    #[test]
    fn test_custom_thresholds_apply() {
        let evaluator = GazeEvaluator::new(GazeThresholds {
            eye_alignment_fraction: 0.3,
            max_yaw_radians: 0.5,
        });
        // 0.2 * 150 = 30 px < 45 px, yaw 0.4 < 0.5
        assert!(evaluator.evaluate(&face(0.2, 0.4, Some(0.4)), VIEW_WIDTH));
    }

    // ── Skipped faces ────────────────────────────────────────────────

    #[test]
    fn test_no_eye_landmarks_gives_no_verdict() {
        let evaluator = GazeEvaluator::default();
        let obs = FaceObservation::new(Rect::new(0.25, 0.25, 0.5, 0.5));
        assert_eq!(evaluator.verdict(&obs, VIEW_WIDTH), None);
        assert!(!evaluator.evaluate(&obs, VIEW_WIDTH));
    }

    #[test]
    fn test_zero_width_face_gives_no_verdict() {
        let evaluator = GazeEvaluator::default();
        let obs = FaceObservation::new(Rect::new(0.25, 0.25, 0.0, 0.5))
            .with_eyes(vec![Point::new(0.5, 0.5)], vec![Point::new(0.5, 0.5)]);
        assert_eq!(evaluator.verdict(&obs, VIEW_WIDTH), None);
    }

    #[test]
    fn test_non_finite_input_gives_no_verdict() {
        let evaluator = GazeEvaluator::default();
        assert_eq!(
            evaluator.verdict(&face(0.5, 0.5, Some(f64::NAN)), VIEW_WIDTH),
            None
        );
        assert_eq!(evaluator.verdict(&face(0.5, 0.5, None), f64::INFINITY), None);
    }

    #[test]
    fn test_verdict_matches_evaluate_for_judgeable_faces() {
        let evaluator = GazeEvaluator::default();
        for obs in [face(0.5, 0.5, None), face(0.1, 0.6, Some(0.0))] {
            assert_eq!(
                evaluator.verdict(&obs, VIEW_WIDTH),
                Some(evaluator.evaluate(&obs, VIEW_WIDTH))
            );
        }
    }

    // ── Thresholds ───────────────────────────────────────────────────

    #[test]
    fn test_default_thresholds() {
        let t = GazeThresholds::default();
        assert_relative_eq!(t.eye_alignment_fraction, 0.1);
        assert_relative_eq!(t.max_yaw_radians, 0.2);
        assert!(t.validate().is_ok());
    }

    #[rstest]
    #[case::zero_alignment(0.0, 0.2, true)]
    #[case::negative_yaw_limit(0.1, -0.2, false)]
    #[case::nan_alignment(f64::NAN, 0.2, true)]
    #[case::infinite_yaw(0.1, f64::INFINITY, false)]
    fn test_invalid_thresholds_rejected(
        #[case] alignment: f64,
        #[case] yaw: f64,
        #[case] alignment_is_bad: bool,
    ) {
        let t = GazeThresholds {
            eye_alignment_fraction: alignment,
            max_yaw_radians: yaw,
        };
        match t.validate() {
            Err(ThresholdError::EyeAlignment(_)) => assert!(alignment_is_bad),
            Err(ThresholdError::MaxYaw(v)) => {
                assert!(!alignment_is_bad);
                assert_eq!(v, yaw);
            }
            Ok(()) => panic!("thresholds {t:?} should be rejected"),
        }
    }
}
