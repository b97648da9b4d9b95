use std::time::Duration;

/// One frame from the capture stream, as handed to the face detector.
///
/// Pixel data is opaque to the decision engine; only the detector reads
/// it. Replayed recordings carry no pixels at all.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
    timestamp: Duration,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize, timestamp: Duration) -> Self {
        Self {
            data,
            width,
            height,
            index,
            timestamp,
        }
    }

    /// A frame with no pixel payload, identified only by its position in
    /// the stream.
    pub fn without_pixels(index: usize, timestamp: Duration) -> Self {
        Self::new(Vec::new(), 0, 0, index, timestamp)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }

    pub fn has_pixels(&self) -> bool {
        !self.data.is_empty()
    }
}
