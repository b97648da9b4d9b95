use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::frame::Frame;

/// Capability interface for a face-landmark detector.
///
/// Any platform detector can sit behind this port. Implementations may be
/// stateful (e.g., tracking across frames), hence `&mut self`. An `Err`
/// means detection failed for this frame only; callers treat it as a frame
/// with no faces.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceObservation>, Box<dyn std::error::Error>>;
}
