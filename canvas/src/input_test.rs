use super::*;

fn uid(s: &str) -> Option<ObjectId> {
    Some(s.to_owned())
}

fn drag(s: &str) -> Option<DragState> {
    Some(DragState { uid: s.to_owned(), mode: DragMode::Movement, last_screen: Point::new(0.0, 0.0) })
}

// =============================================================
// DragMode
// =============================================================

#[test]
fn drag_mode_default_is_movement() {
    assert_eq!(DragMode::default(), DragMode::Movement);
}

#[test]
fn rotation_axes_follow_plane_name() {
    assert_eq!(DragMode::Movement.rotation_axes(), None);
    assert_eq!(DragMode::RotationAroundXY.rotation_axes(), Some((0, 1)));
    assert_eq!(DragMode::RotationAroundXZ.rotation_axes(), Some((0, 2)));
    assert_eq!(DragMode::RotationAroundYZ.rotation_axes(), Some((1, 2)));
}

// =============================================================
// InteractionState
// =============================================================

#[test]
fn default_state_is_idle() {
    let s = InteractionState::default();
    assert_eq!(s.phase(), Phase::Idle);
    assert!(!s.is_dragging());
    assert_eq!(s.cursor(), Cursor::Auto);
}

#[test]
fn phase_prefers_dragging_then_selected_then_hovering() {
    let mut s = InteractionState { hovered: uid("a"), ..Default::default() };
    assert_eq!(s.phase(), Phase::Hovering);
    s.selected = uid("b");
    assert_eq!(s.phase(), Phase::Selected);
    s.dragging = drag("b");
    assert_eq!(s.phase(), Phase::Dragging);
    assert_eq!(s.dragging_uid(), Some("b"));
}

#[test]
fn hovered_only_excludes_selection() {
    let mut s = InteractionState { hovered: uid("a"), selected: uid("a"), ..Default::default() };
    assert_eq!(s.hovered_only(), None);
    s.hovered = uid("b");
    assert_eq!(s.hovered_only(), Some("b"));
}

#[test]
fn highlight_selected_wins_over_hover() {
    let s = InteractionState { hovered: uid("a"), selected: uid("a"), ..Default::default() };
    assert_eq!(s.highlight_of("a"), Highlight::Selected);
    assert_eq!(s.highlight_of("b"), Highlight::None);
}

#[test]
fn cursor_reflects_state() {
    let mut s = InteractionState { hovered: uid("a"), ..Default::default() };
    assert_eq!(s.cursor(), Cursor::Pointer);
    s.selected = uid("a");
    assert_eq!(s.cursor(), Cursor::Move);
    s.hovered = None;
    assert_eq!(s.cursor(), Cursor::Auto);
    s.dragging = drag("a");
    assert_eq!(s.cursor(), Cursor::Move);
    s.panning = Some(Point::new(1.0, 1.0));
    assert_eq!(s.cursor(), Cursor::Grabbing);
}
