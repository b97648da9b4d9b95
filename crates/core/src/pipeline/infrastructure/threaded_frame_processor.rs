use std::thread::JoinHandle;

use crossbeam_channel::{Sender, TrySendError};
use thiserror::Error;

use crate::pipeline::evaluate_frame_use_case::EvaluateFrameUseCase;
use crate::pipeline::frame_result::FrameResult;
use crate::pipeline::presentation_mailbox::Publisher;
use crate::shared::frame::Frame;

const DEFAULT_FRAME_QUEUE: usize = 2;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("frame processor has stopped")]
    Stopped,
    #[error("frame processor thread panicked")]
    Panicked,
}

/// Evaluates frames on a dedicated background thread.
///
/// Layout: `capture → [frame queue] → evaluate → mailbox → presentation`
///
/// Each frame runs to completion once dequeued. Closing the processor
/// lets the queued frames drain, then stops the thread.
pub struct ThreadedFrameProcessor {
    frame_tx: Sender<Frame>,
    handle: JoinHandle<EvaluateFrameUseCase>,
}

impl ThreadedFrameProcessor {
    pub fn spawn(use_case: EvaluateFrameUseCase, publisher: Publisher<FrameResult>) -> Self {
        Self::with_queue(use_case, publisher, DEFAULT_FRAME_QUEUE)
    }

    pub fn with_queue(
        mut use_case: EvaluateFrameUseCase,
        publisher: Publisher<FrameResult>,
        queue_capacity: usize,
    ) -> Self {
        let (frame_tx, frame_rx) = crossbeam_channel::bounded::<Frame>(queue_capacity.max(1));

        let handle = std::thread::spawn(move || {
            for frame in frame_rx {
                let result = use_case.process(&frame);
                if publisher.publish(result) {
                    log::trace!("Frame superseded before presentation");
                }
            }
            use_case
        });

        Self { frame_tx, handle }
    }

    /// Queues a frame, waiting for room if the evaluator is behind.
    pub fn submit(&self, frame: Frame) -> Result<(), ProcessorError> {
        self.frame_tx.send(frame).map_err(|_| ProcessorError::Stopped)
    }

    /// Queues a frame only if there is room; a late frame is dropped, the
    /// way a live capture stream discards frames it cannot keep up with.
    ///
    /// Returns `Ok(false)` when the frame was dropped.
    pub fn offer(&self, frame: Frame) -> Result<bool, ProcessorError> {
        match self.frame_tx.try_send(frame) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(dropped)) => {
                log::debug!("Dropping late frame {}", dropped.index());
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => Err(ProcessorError::Stopped),
        }
    }

    /// Stops accepting frames, waits for queued ones, and returns how many
    /// frames were evaluated in total.
    pub fn finish(self) -> Result<usize, ProcessorError> {
        let Self { frame_tx, handle } = self;
        drop(frame_tx);
        let mut use_case = handle.join().map_err(|_| ProcessorError::Panicked)?;
        use_case.finish();
        Ok(use_case.frames_processed())
    }
}
