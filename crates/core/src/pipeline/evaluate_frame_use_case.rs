use std::time::Instant;

use crate::capture::domain::capture_gate::CaptureGate;
use crate::capture::domain::trigger_state::TriggerState;
use crate::config::settings::GazeSettings;
use crate::detection::domain::face_detector::FaceDetector;
use crate::gaze::domain::coordinate_mapper::{CoordinateMapper, ProjectedGeometry};
use crate::gaze::domain::gaze_evaluator::GazeEvaluator;
use crate::overlay::domain::overlay_model::OverlayModel;
use crate::pipeline::frame_result::{FaceVerdict, FrameResult};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::frame::Frame;
use crate::shared::geometry::Size;

/// Runs one frame through detect → project → evaluate → overlay → gate.
///
/// Owns the only mutable state in the engine (overlay shapes and gate),
/// so one instance must serve one capture stream.
pub struct EvaluateFrameUseCase {
    detector: Box<dyn FaceDetector>,
    mapper: CoordinateMapper,
    evaluator: GazeEvaluator,
    overlay: OverlayModel,
    gate: CaptureGate,
    view: Size,
    logger: Box<dyn PipelineLogger>,
    frames_processed: usize,
}

impl EvaluateFrameUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        mapper: CoordinateMapper,
        evaluator: GazeEvaluator,
        view: Size,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            detector,
            mapper,
            evaluator,
            overlay: OverlayModel::new(mapper),
            gate: CaptureGate::new(),
            view,
            logger,
            frames_processed: 0,
        }
    }

    pub fn from_settings(
        detector: Box<dyn FaceDetector>,
        settings: &GazeSettings,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self::new(
            detector,
            settings.mapper(),
            settings.evaluator(),
            settings.view_size(),
            logger,
        )
    }

    /// The preview was resized; later frames project into the new size.
    pub fn set_view_size(&mut self, view: Size) {
        self.view = view;
    }

    pub fn process(&mut self, frame: &Frame) -> FrameResult {
        let detect_start = Instant::now();
        let observations = match self.detector.detect(frame) {
            Ok(observations) => observations,
            Err(e) => {
                log::warn!("Face detection failed for frame {}: {e}", frame.index());
                Vec::new()
            }
        };
        self.logger
            .timing("detect", detect_start.elapsed().as_secs_f64() * 1000.0);

        let eval_start = Instant::now();
        let geometries: Vec<ProjectedGeometry> = observations
            .iter()
            .enumerate()
            .filter_map(|(face_index, obs)| {
                let geometry = self.mapper.try_project(obs, self.view);
                if geometry.is_none() {
                    log::debug!("Face {face_index} not drawn: non-finite geometry");
                }
                geometry
            })
            .collect();

        let verdicts: Vec<FaceVerdict> = observations
            .iter()
            .enumerate()
            .map(|(face_index, obs)| {
                let looking_at_camera = self.evaluator.verdict(obs, self.view.width);
                match looking_at_camera {
                    Some(true) => log::debug!("Face {face_index} is looking at the camera"),
                    Some(false) => log::debug!("Face {face_index} is not looking at the camera"),
                    None => log::debug!("Face {face_index} skipped: no usable eye landmarks"),
                }
                FaceVerdict {
                    face_index,
                    looking_at_camera,
                }
            })
            .collect();

        self.overlay.replace_with_geometry(&geometries);

        let judged: Vec<bool> = verdicts.iter().filter_map(|v| v.looking_at_camera).collect();
        let gate_open = self.gate.update(&judged);

        self.logger
            .timing("evaluate", eval_start.elapsed().as_secs_f64() * 1000.0);
        self.logger.metric("faces", observations.len() as f64);
        self.logger.metric("gate_open", if gate_open { 1.0 } else { 0.0 });
        self.frames_processed += 1;
        self.logger.progress(self.frames_processed);

        FrameResult {
            frame_index: frame.index(),
            overlay: self.overlay.snapshot(),
            verdicts,
            gate_open,
            trigger: TriggerState::from_gate(gate_open),
        }
    }

    pub fn frames_processed(&self) -> usize {
        self.frames_processed
    }

    pub fn gate(&self) -> &CaptureGate {
        &self.gate
    }

    pub fn overlay(&self) -> &OverlayModel {
        &self.overlay
    }

    /// Emits the logger's end-of-run summary.
    pub fn finish(&mut self) {
        self.logger.info(&format!(
            "Capture stream ended after {} frames",
            self.frames_processed
        ));
        self.logger.summary();
    }
}
