use std::sync::Arc;

use crate::capture::domain::trigger_state::TriggerState;
use crate::overlay::domain::shape::Shape;

/// Gaze outcome for one detected face, in detector order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceVerdict {
    pub face_index: usize,
    /// `None` when the face could not be judged and was left out of the gate.
    pub looking_at_camera: Option<bool>,
}

/// Everything the presentation layer needs for one evaluated frame.
///
/// Immutable once built; the overlay is shared, not copied.
#[derive(Clone, Debug)]
pub struct FrameResult {
    pub frame_index: usize,
    pub overlay: Arc<[Shape]>,
    pub verdicts: Vec<FaceVerdict>,
    pub gate_open: bool,
    pub trigger: TriggerState,
}

impl FrameResult {
    pub fn face_count(&self) -> usize {
        self.verdicts.len()
    }

    pub fn judged_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.looking_at_camera.is_some())
            .count()
    }

    pub fn looking_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.looking_at_camera == Some(true))
            .count()
    }
}
