//! Gaze and head-orientation decision engine.
//!
//! Per frame, face observations from an external detector are projected
//! into view space, judged for "looking at the camera", turned into
//! overlay shapes and folded into a single capture-gate signal.

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod geometry;
}

pub mod config {
    pub mod settings;
}

pub mod detection {
    pub mod domain {
        pub mod face_detector;
        pub mod face_observation;
    }
    pub mod infrastructure;
}

pub mod gaze {
    pub mod domain {
        pub mod coordinate_mapper;
        pub mod gaze_evaluator;
    }
}

pub mod overlay {
    pub mod domain {
        pub mod overlay_model;
        pub mod shape;
    }
}

pub mod capture {
    pub mod domain {
        pub mod capture_gate;
        pub mod trigger_state;
    }
}

pub mod pipeline {
    pub mod evaluate_frame_use_case;
    pub mod frame_result;
    pub mod infrastructure {
        pub mod threaded_frame_processor;
    }
    pub mod pipeline_logger;
    pub mod presentation_mailbox;
}
