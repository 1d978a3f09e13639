//! Fixed-step frame playback, decoupled from the redraw rate.
//!
//! The host calls [`Playback::tick`] from every redraw callback. Once more
//! than one step has elapsed since the last step, exactly one frame is taken
//! from the queue and applied, and the clock jumps to `now`. A backlog is
//! therefore drained at one frame per step no matter how late the tick is.

#[cfg(test)]
#[path = "playback_test.rs"]
mod playback_test;

use std::time::{Duration, Instant};

use frames::StateSnapshot;

use crate::consts::DEFAULT_STEP;
use crate::doc::{ObjectId, SceneRegistry};
use crate::queue::FrameQueue;

/// Outcome of one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A step boundary was crossed on this tick.
    pub stepped: bool,
    /// A frame was dequeued and applied.
    pub frame_applied: bool,
    /// Objects whose pose changed, in frame order.
    pub updated: Vec<ObjectId>,
    /// Frame entries discarded for naming no known object.
    pub skipped: usize,
    /// Frames still queued after this tick.
    pub remaining: usize,
}

/// Fixed-step playback clock.
#[derive(Debug, Clone)]
pub struct Playback {
    step: Duration,
    last_step: Option<Instant>,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl Playback {
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self { step, last_step: None }
    }

    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Whether a step is due at `now`. The first tick is always due.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_step
            .is_none_or(|last| now.saturating_duration_since(last) > self.step)
    }

    /// Advance the clock and, if a step is due, apply at most one frame.
    pub fn tick(&mut self, now: Instant, queue: &mut FrameQueue, registry: &mut SceneRegistry) -> TickReport {
        if !self.is_due(now) {
            return TickReport { remaining: queue.len(), ..TickReport::default() };
        }
        self.last_step = Some(now);

        let Some(frame) = queue.dequeue() else {
            return TickReport { stepped: true, ..TickReport::default() };
        };
        let (updated, skipped) = apply_frame(&frame, registry);
        TickReport { stepped: true, frame_applied: true, updated, skipped, remaining: queue.len() }
    }

    /// Forget the last step so the next tick applies immediately.
    pub fn reset(&mut self) {
        self.last_step = None;
    }
}

/// Apply every entry of a frame to the registry. Returns the uids updated and
/// the number of entries discarded. Unknown objects are never created.
pub fn apply_frame(frame: &StateSnapshot, registry: &mut SceneRegistry) -> (Vec<ObjectId>, usize) {
    let mut updated = Vec::with_capacity(frame.objects.len());
    let mut skipped = 0;
    for update in &frame.objects {
        if registry.apply_frame_update(update) {
            if let Some(uid) = &update.uid {
                updated.push(uid.clone());
            }
        } else {
            skipped += 1;
        }
    }
    (updated, skipped)
}
