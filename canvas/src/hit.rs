//! Ray intersection tests against scene primitives.
//!
//! Picking walks the registry in insertion order and returns the first object
//! whose geometry the ray touches. There is no depth sort: when two objects
//! overlap on screen the one added first wins, even if it is further away.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use frames::ObjectType;
use glam::{DQuat, DVec3, EulerRot};

use crate::consts::{CUBE_SIZE, SPHERE_RADIUS};
use crate::doc::{SceneObject, SceneRegistry};

/// A half-line in world space. `direction` is normalized on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction: direction.normalize_or_zero() }
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Distance to the first hit on a sphere, if any.
#[must_use]
pub fn ray_sphere(ray: &Ray, center: DVec3, radius: f64) -> Option<f64> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let mut t = -b - sqrt_d;
    if t < 0.0 {
        t = -b + sqrt_d;
    }
    if t < 0.0 {
        return None;
    }
    Some(t)
}

/// Slab test against an axis-aligned box. Returns the entry distance, which
/// is zero when the origin is already inside the box.
#[must_use]
pub fn ray_aabb(origin: DVec3, dir: DVec3, min: DVec3, max: DVec3) -> Option<f64> {
    let mut t_min: f64 = 0.0;
    let mut t_max: f64 = f64::INFINITY;
    let o = origin.to_array();
    let d = dir.to_array();
    let lo = min.to_array();
    let hi = max.to_array();
    for i in 0..3 {
        if d[i].abs() < 1e-12 {
            if o[i] < lo[i] || o[i] > hi[i] {
                return None;
            }
            continue;
        }
        let inv_d = 1.0 / d[i];
        let mut t1 = (lo[i] - o[i]) * inv_d;
        let mut t2 = (hi[i] - o[i]) * inv_d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }
    if t_max < 0.0 {
        return None;
    }
    Some(t_min)
}

/// Rotation quaternion for XYZ Euler angles in radians.
#[must_use]
pub fn euler_to_quat(rotation: DVec3) -> DQuat {
    DQuat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

/// Hit test against a cube of edge `size` centered at `center` and rotated by
/// the Euler angles `rotation`.
#[must_use]
pub fn ray_box(ray: &Ray, center: DVec3, rotation: DVec3, size: f64) -> Option<f64> {
    let inv = euler_to_quat(rotation).inverse();
    let origin_local = inv * (ray.origin - center);
    let dir_local = inv * ray.direction;
    let half = DVec3::splat(size / 2.0);
    ray_aabb(origin_local, dir_local, -half, half)
}

/// Hit distance against one object's default geometry.
#[must_use]
pub fn intersect_object(ray: &Ray, obj: &SceneObject) -> Option<f64> {
    match obj.kind {
        ObjectType::Cube => ray_box(ray, obj.position, obj.rotation, CUBE_SIZE),
        ObjectType::Sphere => ray_sphere(ray, obj.position, SPHERE_RADIUS),
    }
}

/// First object, in registry order, hit by the ray.
#[must_use]
pub fn pick<'a>(ray: &Ray, registry: &'a SceneRegistry) -> Option<&'a SceneObject> {
    registry.list().find(|obj| intersect_object(ray, obj).is_some())
}

/// Intersection of the ray with the plane through `point` with `normal`.
/// `None` when the ray is parallel to the plane or points away from it.
#[must_use]
pub fn intersect_plane(ray: &Ray, point: DVec3, normal: DVec3) -> Option<DVec3> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return None;
    }
    Some(ray.at(t))
}
