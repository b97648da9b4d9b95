use std::sync::Arc;

use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::face_observation::FaceObservation;
use crate::detection::infrastructure::detection_recording::DetectionRecording;
use crate::shared::frame::Frame;

/// Replays a [`DetectionRecording`] by frame index.
///
/// Stands in for a live platform detector: frames beyond the end of the
/// recording yield no faces, and recorded failures come back as errors.
pub struct RecordedFaceDetector {
    recording: Arc<DetectionRecording>,
}

impl RecordedFaceDetector {
    pub fn new(recording: Arc<DetectionRecording>) -> Self {
        Self { recording }
    }
}

impl FaceDetector for RecordedFaceDetector {
    fn detect(
        &mut self,
        frame: &Frame,
    ) -> Result<Vec<FaceObservation>, Box<dyn std::error::Error>> {
        match self.recording.frames.get(frame.index()) {
            None => Ok(Vec::new()),
            Some(recorded) => match &recorded.error {
                Some(reason) => Err(reason.clone().into()),
                None => Ok(recorded.faces.clone()),
            },
        }
    }
}
