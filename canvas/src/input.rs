//! Input model: mouse buttons, drag modes, and the interaction state.
//!
//! `InteractionState` tracks the hovered, selected, and dragged objects
//! between pointer events. Hover and selection are independent references;
//! a drag always refers to the selected object. The controller in
//! [`crate::engine`] is the only writer.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ObjectId;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Wheel / trackpad scroll delta in pixels.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive = scroll down (zoom out).
    pub dy: f64,
}

/// How pointer motion is interpreted while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    /// Translate on a plane facing the camera.
    #[default]
    Movement,
    /// Rotate about the X and Y axes.
    RotationAroundXY,
    /// Rotate about the X and Z axes.
    RotationAroundXZ,
    /// Rotate about the Y and Z axes.
    RotationAroundYZ,
}

impl DragMode {
    /// Rotation axes driven by (vertical, horizontal) pointer travel, as
    /// component indices into an XYZ vector. `None` for `Movement`.
    #[must_use]
    pub fn rotation_axes(self) -> Option<(usize, usize)> {
        match self {
            Self::Movement => None,
            Self::RotationAroundXY => Some((0, 1)),
            Self::RotationAroundXZ => Some((0, 2)),
            Self::RotationAroundYZ => Some((1, 2)),
        }
    }
}

/// Presentation state requested from the renderer for one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    Hovered,
    Selected,
}

/// Pointer cursor requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Auto,
    /// Over an object that is not selected.
    Pointer,
    /// Over the selected object, or dragging.
    Move,
    /// Panning the camera.
    Grabbing,
}

/// An active drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Object being dragged; always equals the selection.
    pub uid: ObjectId,
    pub mode: DragMode,
    /// Pointer position at the previous event, used for incremental rotation.
    pub last_screen: Point,
}

/// Coarse view of the controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Hovering,
    Selected,
    Dragging,
}

/// Hover / selection / drag references between pointer events.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub hovered: Option<ObjectId>,
    pub selected: Option<ObjectId>,
    pub dragging: Option<DragState>,
    /// Last pointer position while panning with the secondary button.
    pub panning: Option<Point>,
    /// Mode applied to the next drag.
    pub mode: DragMode,
}

impl InteractionState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.dragging.is_some() {
            Phase::Dragging
        } else if self.selected.is_some() {
            Phase::Selected
        } else if self.hovered.is_some() {
            Phase::Hovering
        } else {
            Phase::Idle
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Uid of the dragged object, if any.
    #[must_use]
    pub fn dragging_uid(&self) -> Option<&str> {
        self.dragging.as_ref().map(|d| d.uid.as_str())
    }

    /// Hovered object, unless it is also the selection.
    #[must_use]
    pub fn hovered_only(&self) -> Option<&str> {
        match (&self.hovered, &self.selected) {
            (Some(h), Some(s)) if h == s => None,
            (h, _) => h.as_deref(),
        }
    }

    /// Highlight an object should currently show.
    #[must_use]
    pub fn highlight_of(&self, uid: &str) -> Highlight {
        if self.selected.as_deref() == Some(uid) {
            Highlight::Selected
        } else if self.hovered.as_deref() == Some(uid) {
            Highlight::Hovered
        } else {
            Highlight::None
        }
    }

    /// Cursor for the current state.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        if self.panning.is_some() {
            return Cursor::Grabbing;
        }
        if self.dragging.is_some() || (self.selected.is_some() && self.selected == self.hovered) {
            return Cursor::Move;
        }
        if self.hovered_only().is_some() {
            return Cursor::Pointer;
        }
        Cursor::Auto
    }
}
