//! Shared numeric constants for the canvas crate.

use std::time::Duration;

// ── Geometry ────────────────────────────────────────────────────

/// Edge length of a cube primitive, in world units.
pub const CUBE_SIZE: f64 = 50.0;

/// Radius of a sphere primitive, in world units.
pub const SPHERE_RADIUS: f64 = 25.0;

// ── Camera ──────────────────────────────────────────────────────

/// Camera depth used when fitting the scene.
pub const CAMERA_FIT_DEPTH: f64 = 2000.0;

/// Near clip distance of the orthographic camera.
pub const CAMERA_NEAR: f64 = 0.1;

/// Far clip distance of the orthographic camera.
pub const CAMERA_FAR: f64 = 5000.0;

/// Minimum zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 10.0;

/// Zoom multiplier per wheel notch (100 px of vertical delta).
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

// ── Dragging ────────────────────────────────────────────────────

/// Radians of rotation per pixel of pointer travel in rotation drag modes.
pub const ROTATION_RADIANS_PER_PX: f64 = 0.01;

// ── Playback ────────────────────────────────────────────────────

/// Fixed simulation step: one frame per 1/60 s.
pub const DEFAULT_STEP: Duration = Duration::from_nanos(1_000_000_000 / 60);
