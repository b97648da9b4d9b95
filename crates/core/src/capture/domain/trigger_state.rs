use crate::shared::constants::{TRIGGER_DISABLED_OPACITY, TRIGGER_ENABLED_OPACITY};

/// How the capture-trigger control should present itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerState {
    pub enabled: bool,
    pub opacity: f32,
}

impl TriggerState {
    pub fn from_gate(open: bool) -> Self {
        Self {
            enabled: open,
            opacity: if open {
                TRIGGER_ENABLED_OPACITY
            } else {
                TRIGGER_DISABLED_OPACITY
            },
        }
    }
}

impl Default for TriggerState {
    fn default() -> Self {
        Self::from_gate(false)
    }
}
