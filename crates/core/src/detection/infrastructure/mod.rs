pub mod detection_recording;
pub mod recorded_face_detector;
