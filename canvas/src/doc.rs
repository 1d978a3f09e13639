//! Scene model: scene objects and the in-memory registry that owns them.
//!
//! Data flows into this layer from the project store (`ObjectInfo` lists at
//! editor load), from the playback scheduler (per-frame pose updates), and
//! from the interaction controller (direct manipulation). Enumeration order is
//! insertion order; picking relies on it to break ties.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use frames::{MotionEquation, ObjectInfo, ObjectType, ObjectUpdate, Vector3};
use glam::DVec3;
use uuid::Uuid;

/// Stable identifier of a scene object.
pub type ObjectId = String;

/// A live scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Unique within a registry for the object's lifetime.
    pub uid: ObjectId,
    /// Shape; fixed after creation.
    pub kind: ObjectType,
    pub position: DVec3,
    /// Euler angles in radians (XYZ order).
    pub rotation: DVec3,
    /// How the solver computed the trajectory, if known.
    pub motion: MotionEquation,
}

impl SceneObject {
    /// New object at `position` with a locally generated uid.
    #[must_use]
    pub fn new(kind: ObjectType, position: DVec3) -> Self {
        Self::with_uid(Uuid::new_v4().to_string(), kind, position)
    }

    #[must_use]
    pub fn with_uid(uid: impl Into<ObjectId>, kind: ObjectType, position: DVec3) -> Self {
        Self { uid: uid.into(), kind, position, rotation: DVec3::ZERO, motion: MotionEquation::default() }
    }

    /// Build from a persisted record, generating a uid when none was assigned.
    #[must_use]
    pub fn from_info(info: ObjectInfo) -> Self {
        Self {
            uid: info.uid.unwrap_or_else(|| Uuid::new_v4().to_string()),
            kind: info.kind,
            position: to_dvec(info.position),
            rotation: to_dvec(info.rotation),
            motion: info.motion_equation,
        }
    }

    /// Snapshot as a persisted record.
    #[must_use]
    pub fn to_info(&self) -> ObjectInfo {
        ObjectInfo {
            uid: Some(self.uid.clone()),
            kind: self.kind,
            position: to_vector(self.position),
            rotation: to_vector(self.rotation),
            motion_equation: self.motion.clone(),
        }
    }
}

/// Convert a wire vector to a glam vector.
#[must_use]
pub fn to_dvec(v: Vector3) -> DVec3 {
    DVec3::new(v.x, v.y, v.z)
}

/// Convert a glam vector to a wire vector.
#[must_use]
pub fn to_vector(v: DVec3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

/// In-memory store of scene objects, enumerated in insertion order.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    objects: HashMap<ObjectId, SceneObject>,
    order: Vec<ObjectId>,
}

impl SceneRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object. A duplicate uid replaces the existing record in its
    /// original enumeration slot and returns the displaced object.
    pub fn add(&mut self, obj: SceneObject) -> Option<SceneObject> {
        let uid = obj.uid.clone();
        let previous = self.objects.insert(uid.clone(), obj);
        if previous.is_none() {
            self.order.push(uid);
        }
        previous
    }

    /// Remove an object by uid, returning it if it was present.
    pub fn remove(&mut self, uid: &str) -> Option<SceneObject> {
        let removed = self.objects.remove(uid)?;
        self.order.retain(|id| id != uid);
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, uid: &str) -> Option<&SceneObject> {
        self.objects.get(uid)
    }

    pub fn get_mut(&mut self, uid: &str) -> Option<&mut SceneObject> {
        self.objects.get_mut(uid)
    }

    #[must_use]
    pub fn contains(&self, uid: &str) -> bool {
        self.objects.contains_key(uid)
    }

    /// All objects in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &SceneObject> {
        self.order.iter().filter_map(|uid| self.objects.get(uid))
    }

    /// Partial pose update. Returns false (and does nothing) if the uid is unknown.
    pub fn apply_update(&mut self, uid: &str, position: Option<DVec3>, rotation: Option<DVec3>) -> bool {
        let Some(obj) = self.objects.get_mut(uid) else {
            return false;
        };
        if let Some(p) = position {
            obj.position = p;
        }
        if let Some(r) = rotation {
            obj.rotation = r;
        }
        true
    }

    /// Apply one frame entry. Entries without a uid, or naming an unknown
    /// object, are discarded and reported as `false`.
    pub fn apply_frame_update(&mut self, update: &ObjectUpdate) -> bool {
        let Some(uid) = update.uid.as_deref() else {
            return false;
        };
        self.apply_update(uid, update.position.map(to_dvec), update.rotation.map(to_dvec))
    }

    /// Overwrite both position and rotation.
    pub fn set_transform(&mut self, uid: &str, position: DVec3, rotation: DVec3) -> bool {
        self.apply_update(uid, Some(position), Some(rotation))
    }

    /// Replace all objects with a persisted list, preserving list order.
    pub fn load(&mut self, infos: Vec<ObjectInfo>) {
        self.objects.clear();
        self.order.clear();
        for info in infos {
            self.add(SceneObject::from_info(info));
        }
    }

    /// All objects as persisted records, in insertion order.
    #[must_use]
    pub fn to_infos(&self) -> Vec<ObjectInfo> {
        self.list().map(SceneObject::to_info).collect()
    }

    /// Number of objects currently in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the registry contains no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
