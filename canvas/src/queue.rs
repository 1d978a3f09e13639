//! FIFO buffer of frames between the protocol handler and the scheduler.

#[cfg(test)]
#[path = "queue_test.rs"]
mod queue_test;

use std::collections::VecDeque;

use frames::StateSnapshot;

/// Ordered buffer of pending frames. Unbounded: capacity policy, if any,
/// belongs to the producer.
#[derive(Debug, Default)]
pub struct FrameQueue {
    frames: VecDeque<StateSnapshot>,
}

impl FrameQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame at the back.
    pub fn enqueue(&mut self, frame: StateSnapshot) {
        self.frames.push_back(frame);
    }

    /// Remove and return the oldest frame. `None` when empty.
    pub fn dequeue(&mut self) -> Option<StateSnapshot> {
        self.frames.pop_front()
    }

    /// The oldest frame, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&StateSnapshot> {
        self.frames.front()
    }

    /// Number of pending frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drop every pending frame.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
