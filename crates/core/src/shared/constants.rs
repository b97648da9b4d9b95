/// Maximum horizontal offset between the two eyes' first landmarks, as a
/// fraction of the face width, for the subject to count as looking at the lens.
pub const DEFAULT_EYE_ALIGNMENT_FRACTION: f64 = 0.1;

/// Maximum absolute head yaw (radians, ~11.5°) for the subject to count as
/// facing the camera.
pub const DEFAULT_MAX_YAW_RADIANS: f64 = 0.2;

/// Capture-trigger opacity while capture is allowed.
pub const TRIGGER_ENABLED_OPACITY: f32 = 1.0;
/// Capture-trigger opacity while capture is blocked.
pub const TRIGGER_DISABLED_OPACITY: f32 = 0.45;

/// Default preview size used when none is configured (points).
pub const DEFAULT_VIEW_WIDTH: f64 = 390.0;
pub const DEFAULT_VIEW_HEIGHT: f64 = 844.0;

pub const SETTINGS_DIR_NAME: &str = "GazeGate";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
