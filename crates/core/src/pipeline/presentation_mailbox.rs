use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError};

/// Single-slot, last-write-wins hand-off from the evaluation thread to the
/// presentation thread.
///
/// Publishing never blocks: an unread value is evicted by the newer one.
/// There is no queue, so a slow consumer only ever sees the freshest frame.
pub struct PresentationMailbox<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

/// Producer half of a [`PresentationMailbox`].
pub struct Publisher<T> {
    tx: Sender<T>,
    // Held so the producer can evict an unread value.
    rx: Receiver<T>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            rx: self.rx.clone(),
        }
    }
}

impl<T> PresentationMailbox<T> {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        Self { tx, rx }
    }

    pub fn publisher(&self) -> Publisher<T> {
        Publisher {
            tx: self.tx.clone(),
            rx: self.rx.clone(),
        }
    }

    /// Takes the pending value, if any, without waiting.
    pub fn latest(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Waits up to `timeout` for a value.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl<T> Default for PresentationMailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Publisher<T> {
    /// Stores `value`, replacing any value the consumer has not taken yet.
    ///
    /// Returns `true` if an unread value was superseded.
    pub fn publish(&self, value: T) -> bool {
        let mut pending = value;
        let mut superseded = false;
        loop {
            match self.tx.try_send(pending) {
                Ok(()) => return superseded,
                Err(TrySendError::Full(v)) => {
                    superseded |= self.rx.try_recv().is_ok();
                    pending = v;
                }
                // Unreachable while `self.rx` is alive.
                Err(TrySendError::Disconnected(_)) => return superseded,
            }
        }
    }
}
