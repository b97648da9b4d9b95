/// Single enable/disable signal for the capture trigger.
///
/// Recomputed from scratch on every frame: open when any judged face in
/// the frame is looking at the camera, closed otherwise (including when
/// the frame has no judged faces at all).
#[derive(Debug, Default)]
pub struct CaptureGate {
    open: bool,
}

impl CaptureGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, verdicts: &[bool]) -> bool {
        let open = verdicts.iter().any(|&looking| looking);
        if open != self.open {
            if open {
                log::debug!("Capture gate opened: a subject is looking at the camera");
            } else {
                log::debug!("Capture gate closed: no subject is looking at the camera");
            }
        }
        self.open = open;
        open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_starts_closed() {
        assert!(!CaptureGate::new().is_open());
    }

    #[rstest]
    #[case::no_faces(&[], false)]
    #[case::single_looking(&[true], true)]
    #[case::single_away(&[false], false)]
    #[case::any_looking(&[false, true, false], true)]
    #[case::none_looking(&[false, false], false)]
    #[case::all_looking(&[true, true], true)]
    fn test_any_face_opens_gate(#[case] verdicts: &[bool], #[case] expected: bool) {
        let mut gate = CaptureGate::new();
        assert_eq!(gate.update(verdicts), expected);
        assert_eq!(gate.is_open(), expected);
    }

    #[test]
    fn test_state_does_not_carry_over() {
        let mut gate = CaptureGate::new();
        gate.update(&[true]);
        assert!(!gate.update(&[]));

        gate.update(&[false]);
        assert!(gate.update(&[true, false]));
    }

    #[test]
    fn test_repeated_update_is_idempotent() {
        let mut gate = CaptureGate::new();
        let first = gate.update(&[false, true]);
        let second = gate.update(&[false, true]);
        assert_eq!(first, second);
    }
}
