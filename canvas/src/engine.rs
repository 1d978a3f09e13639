use std::collections::HashMap;
use std::time::Instant;

use frames::{CodecError, MotionEquation, ObjectInfo, ObjectType, WireMessage};
use glam::DVec3;

use crate::camera::{OrthographicCamera, Point};
use crate::consts::{ROTATION_RADIANS_PER_PX, WHEEL_ZOOM_STEP};
use crate::doc::{ObjectId, SceneObject, SceneRegistry};
use crate::hit;
use crate::input::{Button, Cursor, DragMode, DragState, Highlight, InteractionState, WheelDelta};
use crate::playback::{Playback, TickReport};
use crate::protocol::SyncProtocol;
use crate::queue::FrameQueue;
use crate::render::Renderer;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the renderer and the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new object needs a renderable primitive.
    ObjectCreated(ObjectId),
    /// An object's pose changed.
    ObjectTransformed(ObjectId),
    /// An object left the scene.
    ObjectRemoved(ObjectId),
    /// An object's motion equation changed. Nothing to draw.
    MotionChanged(ObjectId),
    /// An object's highlight changed.
    Highlight { uid: ObjectId, highlight: Highlight },
    /// The selection changed; panels showing the selected object should refresh.
    SelectionChanged(Option<ObjectId>),
    SetCursor(Cursor),
}

/// What the editor allows beyond looking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capability {
    /// Hover, select, and camera navigation only.
    #[default]
    View,
    /// Additionally drag, create, and delete objects.
    Edit,
}

/// Core engine state: all logic that doesn't depend on a renderer.
///
/// Separated from `Engine` so it can be tested without a rendering backend.
#[derive(Debug)]
pub struct EngineCore {
    pub registry: SceneRegistry,
    pub camera: OrthographicCamera,
    pub interaction: InteractionState,
    pub queue: FrameQueue,
    pub playback: Playback,
    pub protocol: SyncProtocol,
    pub capability: Capability,
    /// Last known pointer position.
    pointer: Point,
    /// Last cursor reported to the host.
    cursor: Cursor,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(Capability::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(capability: Capability) -> Self {
        let mut camera = OrthographicCamera::default();
        camera.fit_depth();
        Self {
            registry: SceneRegistry::new(),
            camera,
            interaction: InteractionState::default(),
            queue: FrameQueue::new(),
            playback: Playback::default(),
            protocol: SyncProtocol::new(),
            capability,
            pointer: Point::default(),
            cursor: Cursor::default(),
        }
    }

    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.capability == Capability::Edit
    }

    // --- Data inputs ---

    /// Replace the scene with a persisted object list. Clears the interaction.
    pub fn load_objects(&mut self, infos: Vec<ObjectInfo>) -> Vec<Action> {
        self.registry.load(infos);
        self.interaction = InteractionState { mode: self.interaction.mode, ..InteractionState::default() };
        let mut actions: Vec<Action> = self.registry.list().map(|o| Action::ObjectCreated(o.uid.clone())).collect();
        actions.push(Action::SelectionChanged(None));
        self.push_cursor(&mut actions);
        actions
    }

    /// Insert an object. A duplicate uid replaces the existing one.
    pub fn add_object(&mut self, obj: SceneObject) -> Vec<Action> {
        let uid = obj.uid.clone();
        self.registry.add(obj);
        vec![Action::ObjectCreated(uid)]
    }

    /// Place a new object under the pointer and start dragging it.
    ///
    /// `uid` is the server-assigned id when known; otherwise one is generated.
    /// Does nothing without the edit capability.
    pub fn create_object(&mut self, kind: ObjectType, uid: Option<ObjectId>) -> Vec<Action> {
        if !self.can_edit() {
            return Vec::new();
        }
        let position = self.camera.screen_to_world(self.pointer);
        let obj = match uid {
            Some(uid) => SceneObject::with_uid(uid, kind, position),
            None => SceneObject::new(kind, position),
        };
        let uid = obj.uid.clone();
        let mut actions = self.add_object(obj);
        self.set_selection(Some(uid.clone()), &mut actions);
        self.interaction.dragging = Some(DragState { uid, mode: self.interaction.mode, last_screen: self.pointer });
        self.push_cursor(&mut actions);
        actions
    }

    /// Remove an object and drop every interaction reference to it.
    pub fn remove_object(&mut self, uid: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.registry.remove(uid).is_none() {
            return actions;
        }
        actions.push(Action::ObjectRemoved(uid.to_owned()));
        actions.extend(self.drop_stale_refs());
        self.push_cursor(&mut actions);
        actions
    }

    /// Delete the selected object. Requires the edit capability.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        if !self.can_edit() {
            return Vec::new();
        }
        match self.interaction.selected.clone() {
            Some(uid) => self.remove_object(&uid),
            None => Vec::new(),
        }
    }

    /// Overwrite an object's pose (e.g. from a property panel).
    pub fn set_object_transform(&mut self, uid: &str, position: DVec3, rotation: DVec3) -> Vec<Action> {
        if self.registry.set_transform(uid, position, rotation) {
            vec![Action::ObjectTransformed(uid.to_owned())]
        } else {
            Vec::new()
        }
    }

    /// Replace an object's motion equation. Requires the edit capability;
    /// an unknown uid is ignored.
    pub fn set_motion_equation(&mut self, uid: &str, motion: MotionEquation) -> Vec<Action> {
        if !self.can_edit() {
            return Vec::new();
        }
        let Some(obj) = self.registry.get_mut(uid) else {
            return Vec::new();
        };
        obj.motion = motion;
        vec![Action::MotionChanged(uid.to_owned())]
    }

    /// Mode for the next drag. A drag in progress keeps its mode.
    pub fn set_drag_mode(&mut self, mode: DragMode) {
        self.interaction.mode = mode;
    }

    /// Decode and handle one solver message. Returns the reply to send.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] for malformed messages; nothing is enqueued.
    pub fn handle_message(&mut self, text: &str) -> Result<Option<WireMessage>, CodecError> {
        self.protocol.handle_text(text, &mut self.queue)
    }

    // --- Viewport ---

    /// Track a canvas resize. Conversions read the new bounds immediately.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.camera.resize(width, height);
    }

    // --- Input events ---

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let mut actions = self.drop_stale_refs();
        self.pointer = screen;

        if let Some(last) = self.interaction.panning {
            self.camera.pan_by_screen(screen.x - last.x, screen.y - last.y);
            self.interaction.panning = Some(screen);
        } else if self.interaction.dragging.is_some() {
            self.drag_to(screen, &mut actions);
        } else {
            self.hover_at(screen, &mut actions);
        }
        self.push_cursor(&mut actions);
        actions
    }

    pub fn on_pointer_down(&mut self, screen: Point, button: Button) -> Vec<Action> {
        let mut actions = self.drop_stale_refs();
        self.pointer = screen;
        match button {
            Button::Primary => self.primary_down(screen, &mut actions),
            Button::Secondary => self.interaction.panning = Some(screen),
            Button::Middle => {}
        }
        self.push_cursor(&mut actions);
        actions
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button) -> Vec<Action> {
        let mut actions = self.drop_stale_refs();
        self.pointer = screen;
        match button {
            Button::Primary => {
                if self.interaction.dragging.take().is_some() {
                    self.hover_at(screen, &mut actions);
                } else {
                    let hovered = self.interaction.hovered.clone();
                    self.set_selection(hovered, &mut actions);
                }
            }
            Button::Secondary => self.interaction.panning = None,
            Button::Middle => {}
        }
        self.push_cursor(&mut actions);
        actions
    }

    /// The pointer left the canvas: end any gesture and clear the hover.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = self.drop_stale_refs();
        self.interaction.dragging = None;
        self.interaction.panning = None;
        self.set_hover(None, &mut actions);
        self.push_cursor(&mut actions);
        actions
    }

    /// Zoom about the camera center, then re-evaluate the hover as a move.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        self.camera.zoom_by(WHEEL_ZOOM_STEP.powf(-delta.dy / 100.0));
        self.on_pointer_move(screen)
    }

    // --- Playback ---

    /// One redraw callback: drop stale references, then maybe apply a frame.
    pub fn tick(&mut self, now: Instant) -> (TickReport, Vec<Action>) {
        let mut actions = self.drop_stale_refs();
        let report = self.playback.tick(now, &mut self.queue, &mut self.registry);
        actions.extend(report.updated.iter().cloned().map(Action::ObjectTransformed));
        if !actions.is_empty() {
            self.push_cursor(&mut actions);
        }
        (report, actions)
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&SceneObject> {
        self.interaction.selected.as_deref().and_then(|uid| self.registry.get(uid))
    }

    #[must_use]
    pub fn object(&self, uid: &str) -> Option<&SceneObject> {
        self.registry.get(uid)
    }

    /// Pointer position on the scene plane.
    #[must_use]
    pub fn pointer_world(&self) -> DVec3 {
        self.camera.screen_to_world(self.pointer)
    }

    /// All objects as persisted records.
    #[must_use]
    pub fn save_objects(&self) -> Vec<ObjectInfo> {
        self.registry.to_infos()
    }

    // --- State machine internals ---

    fn primary_down(&mut self, screen: Point, actions: &mut Vec<Action>) {
        if self.interaction.dragging.is_some() {
            return;
        }
        let hovered = self.interaction.hovered.clone();
        if hovered.is_some() && hovered == self.interaction.selected {
            if self.can_edit() {
                if let Some(uid) = hovered {
                    self.interaction.dragging = Some(DragState { uid, mode: self.interaction.mode, last_screen: screen });
                }
            }
            return;
        }
        self.set_selection(hovered, actions);
    }

    fn hover_at(&mut self, screen: Point, actions: &mut Vec<Action>) {
        let ray = self.camera.ray(screen);
        let candidate = hit::pick(&ray, &self.registry).map(|o| o.uid.clone());
        self.set_hover(candidate, actions);
    }

    fn set_hover(&mut self, candidate: Option<ObjectId>, actions: &mut Vec<Action>) {
        if self.interaction.hovered == candidate {
            return;
        }
        if let Some(old) = self.interaction.hovered.take() {
            if self.interaction.selected.as_ref() != Some(&old) {
                actions.push(Action::Highlight { uid: old, highlight: Highlight::None });
            }
        }
        if let Some(new) = &candidate {
            if self.interaction.selected.as_ref() != Some(new) {
                actions.push(Action::Highlight { uid: new.clone(), highlight: Highlight::Hovered });
            }
        }
        self.interaction.hovered = candidate;
    }

    fn set_selection(&mut self, new: Option<ObjectId>, actions: &mut Vec<Action>) {
        if self.interaction.selected == new {
            return;
        }
        if let Some(old) = self.interaction.selected.take() {
            if self.registry.contains(&old) {
                let highlight = if self.interaction.hovered.as_ref() == Some(&old) { Highlight::Hovered } else { Highlight::None };
                actions.push(Action::Highlight { uid: old, highlight });
            }
        }
        if let Some(uid) = &new {
            actions.push(Action::Highlight { uid: uid.clone(), highlight: Highlight::Selected });
        }
        self.interaction.selected = new.clone();
        actions.push(Action::SelectionChanged(new));
    }

    fn drag_to(&mut self, screen: Point, actions: &mut Vec<Action>) {
        let Some(drag) = self.interaction.dragging.as_mut() else {
            return;
        };
        let Some(obj) = self.registry.get_mut(&drag.uid) else {
            return;
        };
        match drag.mode.rotation_axes() {
            None => {
                let ray = self.camera.ray(screen);
                let Some(point) = hit::intersect_plane(&ray, obj.position, self.camera.view_direction()) else {
                    return;
                };
                obj.position = point;
            }
            Some((vertical_axis, horizontal_axis)) => {
                let from = drag.last_screen;
                obj.rotation[vertical_axis] += (screen.y - from.y) * ROTATION_RADIANS_PER_PX;
                obj.rotation[horizontal_axis] += (screen.x - from.x) * ROTATION_RADIANS_PER_PX;
            }
        }
        drag.last_screen = screen;
        actions.push(Action::ObjectTransformed(drag.uid.clone()));
    }

    /// Clear references to objects no longer in the registry.
    fn drop_stale_refs(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(uid) = self.interaction.dragging_uid() {
            if !self.registry.contains(uid) {
                self.interaction.dragging = None;
            }
        }
        if let Some(uid) = self.interaction.hovered.as_deref() {
            if !self.registry.contains(uid) {
                self.interaction.hovered = None;
            }
        }
        if let Some(uid) = self.interaction.selected.as_deref() {
            if !self.registry.contains(uid) {
                self.interaction.selected = None;
                self.interaction.dragging = None;
                actions.push(Action::SelectionChanged(None));
            }
        }
        actions
    }

    fn push_cursor(&mut self, actions: &mut Vec<Action>) {
        let cursor = self.interaction.cursor();
        if cursor != self.cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }
}

/// The full engine. Wraps `EngineCore` and drives a rendering collaborator.
pub struct Engine<R: Renderer> {
    pub core: EngineCore,
    renderer: R,
    handles: HashMap<ObjectId, R::Handle>,
}

impl<R: Renderer> Engine<R> {
    #[must_use]
    pub fn new(renderer: R, capability: Capability) -> Self {
        Self { core: EngineCore::new(capability), renderer, handles: HashMap::new() }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Renderer handle backing an object.
    #[must_use]
    pub fn handle(&self, uid: &str) -> Option<R::Handle> {
        self.handles.get(uid).copied()
    }

    // --- Delegated data inputs ---

    pub fn load_objects(&mut self, infos: Vec<ObjectInfo>) -> Vec<Action> {
        for (_, handle) in self.handles.drain() {
            self.renderer.remove(handle);
        }
        let actions = self.core.load_objects(infos);
        self.apply(actions)
    }

    pub fn add_object(&mut self, obj: SceneObject) -> Vec<Action> {
        let actions = self.core.add_object(obj);
        self.apply(actions)
    }

    pub fn create_object(&mut self, kind: ObjectType, uid: Option<ObjectId>) -> Vec<Action> {
        let actions = self.core.create_object(kind, uid);
        self.apply(actions)
    }

    pub fn remove_object(&mut self, uid: &str) -> Vec<Action> {
        let actions = self.core.remove_object(uid);
        self.apply(actions)
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        let actions = self.core.delete_selected();
        self.apply(actions)
    }

    /// Update the record and its renderable in one call. Returns false for an
    /// unknown uid.
    pub fn set_object_transform(&mut self, uid: &str, position: DVec3, rotation: DVec3) -> bool {
        let actions = self.core.set_object_transform(uid, position, rotation);
        let changed = !actions.is_empty();
        self.apply(actions);
        changed
    }

    pub fn set_motion_equation(&mut self, uid: &str, motion: MotionEquation) -> Vec<Action> {
        let actions = self.core.set_motion_equation(uid, motion);
        self.apply(actions)
    }

    pub fn set_drag_mode(&mut self, mode: DragMode) {
        self.core.set_drag_mode(mode);
    }

    /// # Errors
    ///
    /// Returns [`CodecError`] for malformed messages.
    pub fn handle_message(&mut self, text: &str) -> Result<Option<WireMessage>, CodecError> {
        self.core.handle_message(text)
    }

    // --- Viewport / input ---

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.core.on_resize(width, height);
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_move(screen);
        self.apply(actions)
    }

    pub fn on_pointer_down(&mut self, screen: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_down(screen, button);
        self.apply(actions)
    }

    pub fn on_pointer_up(&mut self, screen: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_up(screen, button);
        self.apply(actions)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_leave();
        self.apply(actions)
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        let actions = self.core.on_wheel(screen, delta);
        self.apply(actions)
    }

    // --- Render loop ---

    /// One redraw callback. Applies at most one frame, then always redraws.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let (report, actions) = self.core.tick(now);
        self.apply(actions);
        self.renderer.redraw(&self.core.camera);
        report
    }

    /// Forward actions to the renderer and hand them back for the host.
    fn apply(&mut self, actions: Vec<Action>) -> Vec<Action> {
        for action in &actions {
            self.apply_one(action);
        }
        actions
    }

    fn apply_one(&mut self, action: &Action) {
        match action {
            Action::ObjectCreated(uid) => {
                let Some(obj) = self.core.registry.get(uid) else {
                    return;
                };
                if let Some(old) = self.handles.remove(uid) {
                    self.renderer.remove(old);
                }
                let handle = self.renderer.create(obj.kind);
                self.renderer.set_transform(handle, obj.position, obj.rotation);
                self.renderer.set_highlight(handle, self.core.interaction.highlight_of(uid));
                self.handles.insert(uid.clone(), handle);
            }
            Action::ObjectTransformed(uid) => {
                if let (Some(obj), Some(handle)) = (self.core.registry.get(uid), self.handles.get(uid)) {
                    self.renderer.set_transform(*handle, obj.position, obj.rotation);
                }
            }
            Action::ObjectRemoved(uid) => {
                if let Some(handle) = self.handles.remove(uid) {
                    self.renderer.remove(handle);
                }
            }
            Action::Highlight { uid, highlight } => {
                if let Some(handle) = self.handles.get(uid) {
                    self.renderer.set_highlight(*handle, *highlight);
                }
            }
            Action::SetCursor(cursor) => self.renderer.set_cursor(*cursor),
            Action::SelectionChanged(_) | Action::MotionChanged(_) => {}
        }
    }
}
