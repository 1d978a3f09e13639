//! Rendering collaborator seam.
//!
//! The engine never draws. It tells a [`Renderer`] which primitives exist,
//! where they are, how they should be highlighted, and when to redraw. A
//! browser host implements this over its 3D library; [`HeadlessRenderer`]
//! keeps the same bookkeeping in memory for tests and for the terminal
//! viewer.

use std::collections::HashMap;

use frames::ObjectType;
use glam::DVec3;

use crate::camera::OrthographicCamera;
use crate::input::{Cursor, Highlight};

/// Operations the engine needs from a rendering engine.
pub trait Renderer {
    /// Opaque reference to one renderable primitive.
    type Handle: Copy + Eq + std::fmt::Debug;

    /// Create a primitive for `kind` and add it to the visible scene.
    fn create(&mut self, kind: ObjectType) -> Self::Handle;

    /// Set the primitive's world transform. Rotation is XYZ Euler radians.
    fn set_transform(&mut self, handle: Self::Handle, position: DVec3, rotation: DVec3);

    /// Remove the primitive from the visible scene.
    fn remove(&mut self, handle: Self::Handle);

    /// Change the primitive's highlight color.
    fn set_highlight(&mut self, handle: Self::Handle, highlight: Highlight);

    /// Change the pointer cursor over the canvas.
    fn set_cursor(&mut self, _cursor: Cursor) {}

    /// Draw the scene as seen by `camera`.
    fn redraw(&mut self, camera: &OrthographicCamera);
}

/// State of one primitive held by [`HeadlessRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    pub kind: ObjectType,
    pub position: DVec3,
    pub rotation: DVec3,
    pub highlight: Highlight,
}

/// In-memory renderer: records what a real renderer would display.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    items: HashMap<u64, Renderable>,
    next: u64,
    redraws: u64,
    cursor: Cursor,
    last_camera: Option<OrthographicCamera>,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, handle: u64) -> Option<&Renderable> {
        self.items.get(&handle)
    }

    /// Number of primitives currently visible.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Handles showing `highlight`.
    #[must_use]
    pub fn highlighted(&self, highlight: Highlight) -> Vec<u64> {
        let mut handles: Vec<u64> = self
            .items
            .iter()
            .filter(|(_, r)| r.highlight == highlight)
            .map(|(h, _)| *h)
            .collect();
        handles.sort_unstable();
        handles
    }

    #[must_use]
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Camera used by the most recent redraw.
    #[must_use]
    pub fn last_camera(&self) -> Option<&OrthographicCamera> {
        self.last_camera.as_ref()
    }
}

impl Renderer for HeadlessRenderer {
    type Handle = u64;

    fn create(&mut self, kind: ObjectType) -> u64 {
        let handle = self.next;
        self.next += 1;
        self.items.insert(
            handle,
            Renderable { kind, position: DVec3::ZERO, rotation: DVec3::ZERO, highlight: Highlight::None },
        );
        handle
    }

    fn set_transform(&mut self, handle: u64, position: DVec3, rotation: DVec3) {
        if let Some(item) = self.items.get_mut(&handle) {
            item.position = position;
            item.rotation = rotation;
        }
    }

    fn remove(&mut self, handle: u64) {
        self.items.remove(&handle);
    }

    fn set_highlight(&mut self, handle: u64, highlight: Highlight) {
        if let Some(item) = self.items.get_mut(&handle) {
            item.highlight = highlight;
        }
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn redraw(&mut self, camera: &OrthographicCamera) {
        self.redraws += 1;
        self.last_camera = Some(*camera);
    }
}
