use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use gazegate_core::config::settings::GazeSettings;
use gazegate_core::detection::infrastructure::detection_recording::DetectionRecording;
use gazegate_core::detection::infrastructure::recorded_face_detector::RecordedFaceDetector;
use gazegate_core::gaze::domain::coordinate_mapper::DetectorOrientation;
use gazegate_core::pipeline::evaluate_frame_use_case::EvaluateFrameUseCase;
use gazegate_core::pipeline::frame_result::FrameResult;
use gazegate_core::pipeline::infrastructure::threaded_frame_processor::ThreadedFrameProcessor;
use gazegate_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use gazegate_core::pipeline::presentation_mailbox::PresentationMailbox;
use gazegate_core::shared::frame::Frame;

/// Replays recorded face observations through the gaze gate.
#[derive(Parser)]
#[command(name = "gazegate")]
struct Cli {
    /// JSON recording of per-frame detector output.
    recording: PathBuf,

    /// Settings file (defaults to the platform config directory).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Preview width in view pixels.
    #[arg(long)]
    view_width: Option<f64>,

    /// Preview height in view pixels.
    #[arg(long)]
    view_height: Option<f64>,

    /// Max eye offset as a fraction of face width (default 0.1).
    #[arg(long)]
    alignment: Option<f64>,

    /// Max absolute head yaw in radians (default 0.2).
    #[arg(long)]
    max_yaw: Option<f64>,

    /// Detector box convention: top-left, bottom-left or transposed.
    #[arg(long)]
    orientation: Option<DetectorOrientation>,

    /// Replay rate in frames per second (0 = as fast as possible).
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Write the effective settings back to the settings file.
    #[arg(long)]
    save_settings: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings_path = match &cli.settings {
        Some(path) => path.clone(),
        None => GazeSettings::default_path()?,
    };
    let settings = effective_settings(&cli, &settings_path)?;
    if cli.save_settings {
        settings.save(&settings_path)?;
        log::info!("Settings written to {}", settings_path.display());
    }

    let recording = DetectionRecording::load(&cli.recording)?;
    log::info!(
        "Replaying {} frames from {} ({} orientation, view {}x{})",
        recording.len(),
        cli.recording.display(),
        settings.orientation,
        settings.view_width,
        settings.view_height
    );

    let stats = replay(Arc::new(recording), &settings, cli.fps)?;
    log::info!(
        "Presented {} of {} frames, gate open on {}",
        stats.presented,
        stats.evaluated,
        stats.gate_open
    );
    Ok(())
}

fn effective_settings(cli: &Cli, path: &Path) -> Result<GazeSettings, Box<dyn std::error::Error>> {
    let mut settings = GazeSettings::load_or_default(path)?;
    if let Some(w) = cli.view_width {
        settings.view_width = w;
    }
    if let Some(h) = cli.view_height {
        settings.view_height = h;
    }
    if let Some(a) = cli.alignment {
        settings.thresholds.eye_alignment_fraction = a;
    }
    if let Some(y) = cli.max_yaw {
        settings.thresholds.max_yaw_radians = y;
    }
    if let Some(o) = cli.orientation {
        settings.orientation = o;
    }
    settings.validate()?;
    Ok(settings)
}

struct ReplayStats {
    evaluated: usize,
    presented: usize,
    gate_open: usize,
}

fn replay(
    recording: Arc<DetectionRecording>,
    settings: &GazeSettings,
    fps: u32,
) -> Result<ReplayStats, Box<dyn std::error::Error>> {
    let total = recording.len();
    let detector = RecordedFaceDetector::new(recording);
    let use_case = EvaluateFrameUseCase::from_settings(
        Box::new(detector),
        settings,
        Box::new(StdoutPipelineLogger::default()),
    );

    let mailbox = PresentationMailbox::new();
    let processor = ThreadedFrameProcessor::spawn(use_case, mailbox.publisher());
    let interval = frame_interval(fps);

    let capture = thread::spawn(move || {
        for index in 0..total {
            let frame = Frame::without_pixels(index, interval * index as u32);
            processor.submit(frame)?;
            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        processor.finish()
    });

    let mut presented = 0;
    let mut gate_open = 0;
    let mut present = |result: FrameResult| {
        presented += 1;
        if result.gate_open {
            gate_open += 1;
        }
        log::info!(
            "frame {:>5}: {} face(s), {} looking, {} shape(s), capture {}",
            result.frame_index,
            result.face_count(),
            result.looking_count(),
            result.overlay.len(),
            if result.trigger.enabled { "enabled" } else { "disabled" }
        );
    };

    while !capture.is_finished() {
        if let Some(result) = mailbox.recv_timeout(Duration::from_millis(50)) {
            present(result);
        }
    }
    let evaluated = capture
        .join()
        .map_err(|_| "capture thread panicked")??;
    if let Some(result) = mailbox.latest() {
        present(result);
    }

    Ok(ReplayStats {
        evaluated,
        presented,
        gate_open,
    })
}

fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs_f64(1.0 / fps as f64)
    }
}
