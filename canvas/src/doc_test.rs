#![allow(clippy::float_cmp)]

use super::*;

fn cube(uid: &str, x: f64) -> SceneObject {
    SceneObject::with_uid(uid, ObjectType::Cube, DVec3::new(x, 0.0, 0.0))
}

fn uids(reg: &SceneRegistry) -> Vec<&str> {
    reg.list().map(|o| o.uid.as_str()).collect()
}

// =============================================================
// SceneObject
// =============================================================

#[test]
fn new_object_gets_generated_uid() {
    let a = SceneObject::new(ObjectType::Sphere, DVec3::ZERO);
    let b = SceneObject::new(ObjectType::Sphere, DVec3::ZERO);
    assert!(!a.uid.is_empty());
    assert_ne!(a.uid, b.uid);
    assert_eq!(a.rotation, DVec3::ZERO);
}

#[test]
fn from_info_keeps_server_uid() {
    let info = ObjectInfo {
        uid: Some("srv-1".to_owned()),
        kind: ObjectType::Cube,
        position: Vector3::new(1.0, 2.0, 3.0),
        rotation: Vector3::new(0.1, 0.2, 0.3),
        motion_equation: MotionEquation { x: "t".to_owned(), ..Default::default() },
    };
    let obj = SceneObject::from_info(info);
    assert_eq!(obj.uid, "srv-1");
    assert_eq!(obj.position, DVec3::new(1.0, 2.0, 3.0));
    assert_eq!(obj.rotation, DVec3::new(0.1, 0.2, 0.3));
    assert_eq!(obj.motion.x, "t");
}

#[test]
fn from_info_synthesizes_missing_uid() {
    let info = ObjectInfo {
        uid: None,
        kind: ObjectType::Sphere,
        position: Vector3::default(),
        rotation: Vector3::default(),
        motion_equation: MotionEquation::default(),
    };
    let obj = SceneObject::from_info(info);
    assert!(Uuid::parse_str(&obj.uid).is_ok());
}

#[test]
fn to_info_mirrors_object() {
    let mut obj = cube("a1", 4.0);
    obj.rotation = DVec3::new(0.0, 1.0, 0.0);
    let info = obj.to_info();
    assert_eq!(info.uid.as_deref(), Some("a1"));
    assert_eq!(info.kind, ObjectType::Cube);
    assert_eq!(info.position, Vector3::new(4.0, 0.0, 0.0));
    assert_eq!(info.rotation, Vector3::new(0.0, 1.0, 0.0));
}

// =============================================================
// SceneRegistry: add / remove / get
// =============================================================

#[test]
fn new_registry_is_empty() {
    let reg = SceneRegistry::new();
    assert!(reg.is_empty());
    assert_eq!(reg.len(), 0);
    assert_eq!(reg.list().count(), 0);
}

#[test]
fn add_and_get() {
    let mut reg = SceneRegistry::new();
    assert!(reg.add(cube("a1", 0.0)).is_none());
    assert!(reg.contains("a1"));
    assert_eq!(reg.get("a1").map(|o| o.kind), Some(ObjectType::Cube));
    assert!(reg.get("zz").is_none());
}

#[test]
fn list_preserves_insertion_order() {
    let mut reg = SceneRegistry::new();
    for uid in ["c", "a", "b"] {
        reg.add(cube(uid, 0.0));
    }
    assert_eq!(uids(&reg), vec!["c", "a", "b"]);
}

#[test]
fn duplicate_uid_is_last_write_wins_in_original_slot() {
    let mut reg = SceneRegistry::new();
    reg.add(cube("a", 1.0));
    reg.add(cube("b", 2.0));
    let displaced = reg.add(cube("a", 9.0)).expect("displaced");
    assert_eq!(displaced.position.x, 1.0);
    assert_eq!(reg.len(), 2);
    assert_eq!(uids(&reg), vec!["a", "b"]);
    assert_eq!(reg.get("a").map(|o| o.position.x), Some(9.0));
}

#[test]
fn remove_returns_object_and_drops_from_order() {
    let mut reg = SceneRegistry::new();
    reg.add(cube("a", 0.0));
    reg.add(cube("b", 0.0));
    let removed = reg.remove("a").expect("removed");
    assert_eq!(removed.uid, "a");
    assert_eq!(uids(&reg), vec!["b"]);
    assert!(reg.remove("a").is_none());
}

#[test]
fn readd_after_remove_goes_to_end() {
    let mut reg = SceneRegistry::new();
    reg.add(cube("a", 0.0));
    reg.add(cube("b", 0.0));
    reg.remove("a");
    reg.add(cube("a", 0.0));
    assert_eq!(uids(&reg), vec!["b", "a"]);
}

// =============================================================
// Updates
// =============================================================

#[test]
fn apply_update_is_partial() {
    let mut reg = SceneRegistry::new();
    reg.add(cube("a", 1.0));
    assert!(reg.apply_update("a", None, Some(DVec3::new(0.5, 0.0, 0.0))));
    let obj = reg.get("a").expect("obj");
    assert_eq!(obj.position, DVec3::new(1.0, 0.0, 0.0));
    assert_eq!(obj.rotation, DVec3::new(0.5, 0.0, 0.0));
}

#[test]
fn apply_update_unknown_uid_is_noop() {
    let mut reg = SceneRegistry::new();
    reg.add(cube("a", 1.0));
    assert!(!reg.apply_update("b", Some(DVec3::ONE), None));
    assert_eq!(reg.len(), 1);
    assert!(!reg.contains("b"));
}

#[test]
fn apply_frame_update_skips_missing_uid() {
    let mut reg = SceneRegistry::new();
    reg.add(cube("a", 1.0));
    let update = ObjectUpdate { uid: None, position: Some(Vector3::new(7.0, 7.0, 7.0)), rotation: None };
    assert!(!reg.apply_frame_update(&update));
    assert_eq!(reg.get("a").map(|o| o.position.x), Some(1.0));
}

#[test]
fn apply_frame_update_overwrites_pose() {
    let mut reg = SceneRegistry::new();
    reg.add(cube("a", 1.0));
    let update = ObjectUpdate::pose("a", Vector3::new(5.0, 5.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
    assert!(reg.apply_frame_update(&update));
    let obj = reg.get("a").expect("obj");
    assert_eq!(obj.position, DVec3::new(5.0, 5.0, 0.0));
    assert_eq!(obj.rotation, DVec3::new(0.0, 0.0, 1.0));
}

#[test]
fn set_transform_overwrites_both() {
    let mut reg = SceneRegistry::new();
    reg.add(cube("a", 1.0));
    assert!(reg.set_transform("a", DVec3::splat(2.0), DVec3::splat(0.25)));
    let obj = reg.get("a").expect("obj");
    assert_eq!(obj.position, DVec3::splat(2.0));
    assert_eq!(obj.rotation, DVec3::splat(0.25));
}

// =============================================================
// Load / save
// =============================================================

#[test]
fn load_replaces_contents() {
    let mut reg = SceneRegistry::new();
    reg.add(cube("old", 0.0));
    let infos = vec![cube("x", 1.0).to_info(), cube("y", 2.0).to_info()];
    reg.load(infos);
    assert_eq!(uids(&reg), vec!["x", "y"]);
    assert!(!reg.contains("old"));
}

#[test]
fn to_infos_round_trips_through_load() {
    let mut reg = SceneRegistry::new();
    reg.add(cube("a", 1.0));
    reg.add(SceneObject::with_uid("b", ObjectType::Sphere, DVec3::new(0.0, 3.0, 0.0)));
    let mut other = SceneRegistry::new();
    other.load(reg.to_infos());
    assert_eq!(other.to_infos(), reg.to_infos());
}
