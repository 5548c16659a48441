use std::collections::VecDeque;

use super::source::FrameSource;
use crate::error::Result;
use crate::frame::Frame;

/// Fixed-capacity rolling window of the most recent frames.
///
/// Pushing into a full buffer evicts the oldest frame. The oldest frame held
/// is the reconstruction reference.
#[derive(Debug)]
pub struct FrameBuffer {
    capacity: usize,
    frames: VecDeque<Frame>,
}

impl FrameBuffer {
    /// A buffer holding at most `capacity` frames (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            frames: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() == self.capacity
    }

    /// Append a frame, returning the evicted one when full.
    pub fn push(&mut self, frame: Frame) -> Option<Frame> {
        let evicted = if self.is_full() {
            self.frames.pop_front()
        } else {
            None
        };
        self.frames.push_back(frame);
        evicted
    }

    /// Pull frames from `source` until full or the source runs dry.
    ///
    /// Returns the number of frames pulled.
    pub fn fill_from(&mut self, source: &mut dyn FrameSource) -> Result<usize> {
        let mut pulled = 0;
        while !self.is_full() {
            let Some(frame) = source.next_frame()? else {
                break;
            };
            self.push(frame);
            pulled += 1;
        }
        Ok(pulled)
    }

    /// Most recently pushed frame.
    pub fn current(&self) -> Option<&Frame> {
        self.frames.back()
    }

    /// All buffered frames, oldest first.
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
