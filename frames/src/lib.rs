//! Shared wire model and JSON codec for the solver stream.
//!
//! This crate owns the representation used by the playback core (`canvas`)
//! and the host binary. Every websocket message is a small JSON envelope
//! (`WireMessage`) whose optional `payload` is itself a JSON document encoded
//! as a string: a [`StateSnapshot`] when the solver pushes a frame, or a
//! [`BufferReport`] when the client answers a buffer-state request.

use serde::{Deserialize, Serialize};

/// Error returned by the decode helpers.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text could not be parsed into the expected JSON shape.
    #[error("failed to decode json: {0}")]
    Json(#[from] serde_json::Error),
    /// A message that must carry a payload arrived without one.
    #[error("message has no payload")]
    MissingPayload,
}

// =============================================================================
// VALUES
// =============================================================================

/// Three numeric components. Missing components decode as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Per-axis symbolic expression describing how the solver computed a trajectory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionEquation {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl MotionEquation {
    /// Returns `true` when no axis carries an expression.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty() && self.z.is_empty()
    }
}

/// Primitive shape of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Cube,
    Sphere,
}

// =============================================================================
// OBJECTS
// =============================================================================

/// A scene object as persisted by the project store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    /// Server-assigned identifier; absent for objects never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub kind: ObjectType,
    #[serde(default)]
    pub position: Vector3,
    #[serde(default)]
    pub rotation: Vector3,
    #[serde(default)]
    pub motion_equation: MotionEquation,
}

/// One per-object pose update inside a [`StateSnapshot`].
///
/// Unknown keys (the solver also echoes `type`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vector3>,
}

impl ObjectUpdate {
    /// Build a full pose update for `uid`.
    #[must_use]
    pub fn pose(uid: impl Into<String>, position: Vector3, rotation: Vector3) -> Self {
        Self { uid: Some(uid.into()), position: Some(position), rotation: Some(rotation) }
    }
}

/// A point-in-time delta: objects not mentioned are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    #[serde(default)]
    pub objects: Vec<ObjectUpdate>,
}

/// Full object list exchanged with the project store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectList {
    #[serde(default)]
    pub objects: Vec<ObjectInfo>,
}

/// A project as listed by the project store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
}

/// Client buffer occupancy, reported back to the solver for flow control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferReport {
    pub length: usize,
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// Direction-agnostic message kind.
///
/// From the solver, `Request` asks for a buffer report and `Response`
/// carries a frame. From the client, `Response` carries the report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Request,
    #[default]
    Response,
}

/// A single message on the solver websocket.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    #[serde(rename = "type", default)]
    pub kind: MessageType,
    /// JSON document encoded as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl WireMessage {
    /// A payload-less buffer-state request.
    #[must_use]
    pub fn request() -> Self {
        Self { kind: MessageType::Request, payload: None }
    }

    /// A response carrying the client's current queue length.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if the report cannot be serialized.
    pub fn report(length: usize) -> Result<Self, CodecError> {
        let payload = serde_json::to_string(&BufferReport { length })?;
        Ok(Self { kind: MessageType::Response, payload: Some(payload) })
    }

    /// A response carrying one frame.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if the snapshot cannot be serialized.
    pub fn frame(snapshot: &StateSnapshot) -> Result<Self, CodecError> {
        let payload = serde_json::to_string(snapshot)?;
        Ok(Self { kind: MessageType::Response, payload: Some(payload) })
    }
}

/// Encode a message as JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_message(message: &WireMessage) -> Result<String, CodecError> {
    Ok(serde_json::to_string(message)?)
}

/// Decode JSON text into a message envelope.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed text or an unknown `type`.
pub fn decode_message(text: &str) -> Result<WireMessage, CodecError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode a message payload into a frame.
///
/// # Errors
///
/// Returns [`CodecError::Json`] when the payload is not a snapshot.
pub fn decode_snapshot(payload: &str) -> Result<StateSnapshot, CodecError> {
    Ok(serde_json::from_str(payload)?)
}

/// Decode the payload of a client response into a buffer report.
///
/// # Errors
///
/// Returns [`CodecError::MissingPayload`] when the message has no payload
/// and [`CodecError::Json`] when the payload is not a report.
pub fn decode_report(message: &WireMessage) -> Result<BufferReport, CodecError> {
    let payload = message.payload.as_deref().ok_or(CodecError::MissingPayload)?;
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
