//! Websocket playback session.
//!
//! Connects to `{ws_url}/projects/{uid}/run`, feeds every text message to the
//! engine's protocol handler, sends replies back, and ticks the engine at the
//! redraw rate. When the solver closes the stream the session keeps ticking
//! until the queue drains, then returns.

use std::time::{Duration, Instant};

use canvas::engine::Engine;
use canvas::playback::TickReport;
use canvas::protocol::SyncStats;
use canvas::render::Renderer;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("websocket connect failed: {0}")]
    Connect(Box<tungstenite::Error>),
    #[error("websocket transport failed: {0}")]
    Transport(Box<tungstenite::Error>),
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub ticks: u64,
    pub frames_applied: u64,
    pub updates_skipped: u64,
    pub sync: SyncStats,
    /// The solver closed the stream (as opposed to a local interrupt).
    pub completed: bool,
}

impl SessionSummary {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        if report.frame_applied {
            self.frames_applied += 1;
        }
        self.updates_skipped += u64::try_from(report.skipped).unwrap_or(u64::MAX);
    }
}

#[must_use]
pub fn run_url(ws_url: &str, project: &str) -> String {
    format!("{}/projects/{project}/run", ws_url.trim_end_matches('/'))
}

/// Handle one incoming text message. Returns the encoded reply, if any.
///
/// Malformed messages are logged and dropped; the stream carries on.
pub fn handle_text<R: Renderer>(engine: &mut Engine<R>, text: &str) -> Option<String> {
    let reply = match engine.handle_message(text) {
        Ok(reply) => reply?,
        Err(error) => {
            warn!(%error, "dropping malformed solver message");
            return None;
        }
    };
    match frames::encode_message(&reply) {
        Ok(encoded) => {
            debug!(reply = %encoded, "answering buffer request");
            Some(encoded)
        }
        Err(error) => {
            warn!(%error, "failed to encode reply");
            None
        }
    }
}

/// One redraw callback. Returns true once the stream is closed and every
/// queued frame has been played.
pub fn redraw<R: Renderer>(engine: &mut Engine<R>, summary: &mut SessionSummary, stream_open: bool) -> bool {
    let report = engine.tick(Instant::now());
    summary.record(&report);
    if report.frame_applied {
        for uid in &report.updated {
            if let Some(obj) = engine.core.object(uid) {
                debug!(%uid, x = obj.position.x, y = obj.position.y, z = obj.position.z, "pose");
            }
        }
        if report.skipped > 0 {
            debug!(skipped = report.skipped, "frame named unknown objects");
        }
    }
    !stream_open && engine.core.queue.is_empty()
}

/// Run the session until the solver closes the stream and the queue drains,
/// or until interrupted.
///
/// # Errors
///
/// Returns [`SessionError`] if the websocket cannot be opened or fails
/// mid-stream.
pub async fn run<R: Renderer>(config: &SessionConfig, engine: &mut Engine<R>) -> Result<SessionSummary, SessionError> {
    let url = run_url(&config.ws_url, &config.project);
    let (stream, _) = connect_async(url.as_str())
        .await
        .map_err(|error| SessionError::Connect(Box::new(error)))?;
    info!(%url, "solver stream open");

    let (sink, source) = stream.split();
    let interrupted = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };
    drive(engine, source, sink, config.redraw_period, interrupted).await
}

/// Pump `source` into the engine and tick it every `redraw_period` until the
/// stream closes and the queue drains, or `shutdown` resolves.
///
/// `shutdown` is polled in place across iterations, so a signal that lands
/// while another branch is running is not lost.
///
/// # Errors
///
/// Returns [`SessionError::Transport`] if the stream yields an error or a
/// reply cannot be sent.
pub async fn drive<R, S, K, F>(
    engine: &mut Engine<R>,
    mut source: S,
    mut sink: K,
    redraw_period: Duration,
    shutdown: F,
) -> Result<SessionSummary, SessionError>
where
    R: Renderer,
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    K: Sink<Message, Error = tungstenite::Error> + Unpin,
    F: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(redraw_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    let mut summary = SessionSummary::default();
    let mut open = true;
    loop {
        tokio::select! {
            message = source.next(), if open => match message {
                Some(Ok(Message::Text(text))) => {
                    if let Some(reply) = handle_text(engine, text.as_str()) {
                        sink.send(Message::Text(reply.into()))
                            .await
                            .map_err(|error| SessionError::Transport(Box::new(error)))?;
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    open = false;
                    info!(queued = engine.core.queue.len(), "solver stream closed");
                }
                Some(Ok(_)) => {}
                Some(Err(error)) => return Err(SessionError::Transport(Box::new(error))),
            },
            _ = ticker.tick() => {
                if redraw(engine, &mut summary, open) {
                    summary.completed = true;
                    break;
                }
            }
            () = &mut shutdown => {
                info!("interrupted");
                break;
            }
        }
    }

    summary.sync = engine.core.protocol.stats();
    Ok(summary)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
