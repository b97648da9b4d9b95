use std::sync::Arc;
use std::time::Duration;

use gazegate_core::config::settings::GazeSettings;
use gazegate_core::detection::domain::face_observation::FaceObservation;
use gazegate_core::detection::infrastructure::detection_recording::{
    DetectionRecording, RecordedFrame,
};
use gazegate_core::detection::infrastructure::recorded_face_detector::RecordedFaceDetector;
use gazegate_core::gaze::domain::coordinate_mapper::DetectorOrientation;
use gazegate_core::overlay::domain::shape::ShapeKind;
use gazegate_core::pipeline::evaluate_frame_use_case::EvaluateFrameUseCase;
use gazegate_core::pipeline::frame_result::FrameResult;
use gazegate_core::pipeline::infrastructure::threaded_frame_processor::ThreadedFrameProcessor;
use gazegate_core::pipeline::pipeline_logger::NullPipelineLogger;
use gazegate_core::pipeline::presentation_mailbox::PresentationMailbox;
use gazegate_core::shared::frame::Frame;
use gazegate_core::shared::geometry::{Point, Rect};

fn subject(yaw: f64, right_eye_x: f64) -> FaceObservation {
    FaceObservation::new(Rect::new(0.3, 0.3, 0.4, 0.4))
        .with_eyes(
            vec![Point::new(0.5, 0.3), Point::new(0.55, 0.35)],
            vec![Point::new(right_eye_x, 0.6), Point::new(right_eye_x + 0.05, 0.65)],
        )
        .with_yaw(yaw)
}

fn recording() -> DetectionRecording {
    DetectionRecording::new(vec![
        // looking
        RecordedFrame::with_faces(vec![subject(0.0, 0.5)]),
        // head turned
        RecordedFrame::with_faces(vec![subject(0.5, 0.5)]),
        // detector failure
        RecordedFrame::failed("vision request failed"),
        // two faces, second looking
        RecordedFrame::with_faces(vec![subject(0.0, 0.9), subject(0.05, 0.52)]),
        // nobody
        RecordedFrame::default(),
    ])
}

fn settings() -> GazeSettings {
    GazeSettings {
        orientation: DetectorOrientation::TopLeftOrigin,
        view_width: 400.0,
        view_height: 800.0,
        ..GazeSettings::default()
    }
}

fn frame(index: usize) -> Frame {
    Frame::without_pixels(index, Duration::from_millis(index as u64 * 33))
}

#[test]
fn sequential_replay_matches_expected_gate_sequence() {
    let detector = RecordedFaceDetector::new(Arc::new(recording()));
    let mut use_case = EvaluateFrameUseCase::from_settings(
        Box::new(detector),
        &settings(),
        Box::new(NullPipelineLogger),
    );

    let results: Vec<FrameResult> = (0..5).map(|i| use_case.process(&frame(i))).collect();

    let gates: Vec<bool> = results.iter().map(|r| r.gate_open).collect();
    assert_eq!(gates, vec![true, false, false, true, false]);

    let shape_counts: Vec<usize> = results.iter().map(|r| r.overlay.len()).collect();
    assert_eq!(shape_counts, vec![3, 3, 0, 6, 0]);

    let face = &results[0].overlay[0];
    assert_eq!(face.kind, ShapeKind::FaceOutline);
    // 0.3 * 400 = 120, 0.3 * 800 = 240
    assert!((face.points[0].x - 120.0).abs() < 1e-9);
    assert!((face.points[0].y - 240.0).abs() < 1e-9);
}

#[test]
fn threaded_replay_delivers_latest_result() {
    let detector = RecordedFaceDetector::new(Arc::new(recording()));
    let use_case = EvaluateFrameUseCase::from_settings(
        Box::new(detector),
        &settings(),
        Box::new(NullPipelineLogger),
    );
    let mailbox = PresentationMailbox::new();
    let processor = ThreadedFrameProcessor::spawn(use_case, mailbox.publisher());

    for i in 0..4 {
        processor.submit(frame(i)).unwrap();
    }
    let processed = processor.finish().unwrap();

    assert_eq!(processed, 4);
    let latest = mailbox.latest().expect("a result for the last frame");
    assert_eq!(latest.frame_index, 3);
    assert!(latest.gate_open);
    assert!(latest.trigger.enabled);
    assert!(mailbox.latest().is_none());
}

#[test]
fn recording_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    recording().save(&path).unwrap();

    let detector = RecordedFaceDetector::new(Arc::new(DetectionRecording::load(&path).unwrap()));
    let mut use_case = EvaluateFrameUseCase::from_settings(
        Box::new(detector),
        &settings(),
        Box::new(NullPipelineLogger),
    );

    assert!(use_case.process(&frame(0)).gate_open);
    assert!(!use_case.process(&frame(1)).gate_open);
}
