//! Client side of the solver synchronization protocol.
//!
//! The solver drives the exchange. A `request` message asks for the client's
//! buffer state and is answered immediately with the current queue length.
//! A `response` message carries one frame, which is appended to the queue.
//! Pacing decisions based on the reported length are the solver's.

#[cfg(test)]
#[path = "protocol_test.rs"]
mod protocol_test;

use frames::{CodecError, MessageType, WireMessage};

use crate::queue::FrameQueue;

/// Counters kept across a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Frames decoded and enqueued.
    pub frames_received: u64,
    /// Buffer reports sent back.
    pub reports_sent: u64,
    /// Messages that failed to decode.
    pub dropped: u64,
    /// Responses that carried no payload or an empty one.
    pub empty: u64,
}

/// Stateless message handler plus session counters.
#[derive(Debug, Default)]
pub struct SyncProtocol {
    stats: SyncStats,
}

impl SyncProtocol {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    /// Decode one text message and handle it.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when the envelope or its frame payload is
    /// malformed. The queue is untouched in that case and the caller should
    /// drop the message and carry on.
    pub fn handle_text(&mut self, text: &str, queue: &mut FrameQueue) -> Result<Option<WireMessage>, CodecError> {
        let message = frames::decode_message(text).inspect_err(|_| self.stats.dropped += 1)?;
        self.handle(&message, queue)
    }

    /// Handle one decoded message. Returns the reply to send, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when a frame payload cannot be decoded.
    pub fn handle(&mut self, message: &WireMessage, queue: &mut FrameQueue) -> Result<Option<WireMessage>, CodecError> {
        match message.kind {
            MessageType::Request => {
                let reply = WireMessage::report(queue.len())?;
                self.stats.reports_sent += 1;
                Ok(Some(reply))
            }
            MessageType::Response => {
                let Some(payload) = message.payload.as_deref().filter(|p| !p.is_empty()) else {
                    self.stats.empty += 1;
                    return Ok(None);
                };
                let snapshot = frames::decode_snapshot(payload).inspect_err(|_| self.stats.dropped += 1)?;
                queue.enqueue(snapshot);
                self.stats.frames_received += 1;
                Ok(None)
            }
        }
    }
}
