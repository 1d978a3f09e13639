//! Orthographic camera and the screen ↔ scene coordinate mapping.
//!
//! The camera bounds mirror the host canvas in CSS pixels (`±width/2`,
//! `±height/2`) and are rewritten on every resize, so every conversion reads
//! the live bounds rather than a cached copy. The camera never rotates: it
//! always looks down −Z.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use glam::{DVec2, DVec3};

use crate::consts::{CAMERA_FAR, CAMERA_FIT_DEPTH, CAMERA_NEAR, MAX_ZOOM, MIN_ZOOM};
use crate::hit::Ray;

/// A pointer position in canvas-relative CSS pixels (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Orthographic camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicCamera {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    /// Scale factor (1.0 = one world unit per pixel).
    pub zoom: f64,
    pub position: DVec3,
    pub near: f64,
    pub far: f64,
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            zoom: 1.0,
            position: DVec3::ZERO,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl OrthographicCamera {
    /// Camera sized to a `width` × `height` viewport.
    #[must_use]
    pub fn with_viewport(width: f64, height: f64) -> Self {
        let mut camera = Self::default();
        camera.resize(width, height);
        camera
    }

    /// Rewrite the bounds for a new viewport size. Sizes below one pixel are
    /// clamped so the NDC mapping never divides by zero.
    pub fn resize(&mut self, width: f64, height: f64) {
        let width = width.max(1.0);
        let height = height.max(1.0);
        self.left = width / -2.0;
        self.right = width / 2.0;
        self.top = height / 2.0;
        self.bottom = height / -2.0;
    }

    /// Viewport size in CSS pixels.
    #[must_use]
    pub fn viewport(&self) -> (f64, f64) {
        (self.right - self.left, self.top - self.bottom)
    }

    /// Move the camera back far enough to see the whole scene.
    pub fn fit_depth(&mut self) {
        self.position.z = CAMERA_FIT_DEPTH;
    }

    /// Unit vector the camera looks along.
    #[must_use]
    pub fn view_direction(&self) -> DVec3 {
        DVec3::NEG_Z
    }

    /// Convert a pointer position to a point on the scene plane (z = 0).
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> DVec3 {
        let scene_x = (self.left + screen.x) / self.zoom;
        let scene_y = (self.top - screen.y) / self.zoom;
        DVec3::new(self.position.x + scene_x, self.position.y + scene_y, 0.0)
    }

    /// Convert a world point back to pointer coordinates. Depth is ignored.
    #[must_use]
    pub fn world_to_screen(&self, world: DVec3) -> Point {
        Point {
            x: (world.x - self.position.x) * self.zoom - self.left,
            y: self.top - (world.y - self.position.y) * self.zoom,
        }
    }

    /// Normalized device coordinates for ray casting. Not clamped: points
    /// outside the canvas map outside `[-1, 1]`.
    #[must_use]
    pub fn screen_to_ndc(&self, screen: Point) -> DVec2 {
        DVec2::new((self.left + screen.x) / self.right, (self.top - screen.y) / self.top)
    }

    /// Pick ray through a pointer position.
    ///
    /// For an orthographic camera every ray is parallel to the view
    /// direction; only the origin moves with the pointer.
    #[must_use]
    pub fn ray(&self, screen: Point) -> Ray {
        let ndc = self.screen_to_ndc(screen);
        let half_w = (self.right - self.left) / (2.0 * self.zoom);
        let half_h = (self.top - self.bottom) / (2.0 * self.zoom);
        let center_x = (self.right + self.left) / (2.0 * self.zoom);
        let center_y = (self.top + self.bottom) / (2.0 * self.zoom);
        let origin = DVec3::new(
            self.position.x + center_x + ndc.x * half_w,
            self.position.y + center_y + ndc.y * half_h,
            self.position.z,
        );
        Ray::new(origin, self.view_direction())
    }

    /// Pan by a pointer delta so the scene follows the pointer.
    pub fn pan_by_screen(&mut self, dx: f64, dy: f64) {
        self.position.x -= dx / self.zoom;
        self.position.y += dy / self.zoom;
    }

    /// Multiply the zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_by(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}
