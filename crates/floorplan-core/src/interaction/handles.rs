//! Manipulation handles for the primary selection.

use crate::entities::{EntityId, Vertex, VertexKind};
use crate::geometry::{self, Positioned};
use crate::scene::{SceneState, find};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Distance of the rotate handle above furniture, wall items and text.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;
/// Distance of the rotate handle above rooms and zones.
pub const POLYGON_ROTATE_HANDLE_OFFSET: f64 = 40.0;

/// Radius handles sit at `max(MIN, radius + GAP)` along the corner bisector.
const RADIUS_HANDLE_MIN_DISTANCE: f64 = 20.0;
const RADIUS_HANDLE_GAP: f64 = 10.0;

/// Resize handle on a furniture box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    /// Which box edges the handle drags: -1 for left/top, 1 for right/bottom, 0 for neither.
    pub fn direction(self) -> Vec2 {
        match self {
            ResizeHandle::TopLeft => Vec2::new(-1.0, -1.0),
            ResizeHandle::Top => Vec2::new(0.0, -1.0),
            ResizeHandle::TopRight => Vec2::new(1.0, -1.0),
            ResizeHandle::Right => Vec2::new(1.0, 0.0),
            ResizeHandle::BottomRight => Vec2::new(1.0, 1.0),
            ResizeHandle::Bottom => Vec2::new(0.0, 1.0),
            ResizeHandle::BottomLeft => Vec2::new(-1.0, 1.0),
            ResizeHandle::Left => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Polygon vertex. Drag to move, click to toggle corner and fillet.
    Vertex(EntityId),
    /// Midpoint of the edge starting at this vertex index. Click to split.
    EdgeMidpoint(usize),
    /// Fillet radius of the vertex.
    Radius(EntityId),
    Rotate,
    Resize(ResizeHandle),
    /// Either end of a door or window.
    WallItemResize,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in plan coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a plan point hits this handle.
    /// `tolerance` should be adjusted for camera zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.position.distance_squared(point) <= tolerance * tolerance
    }
}

/// Point at `local` in an item's frame, centered at `center` and turned by `rotation_deg`.
fn local_to_plan(center: Point, rotation_deg: f64, local: Vec2) -> Point {
    geometry::rotate_point(center + local, rotation_deg, center)
}

/// Vertex, edge midpoint and radius handles of a closed outline.
fn outline_handles(vertices: &[Vertex], with_edges: bool, handles: &mut Vec<Handle>) {
    let n = vertices.len();
    handles.extend(
        vertices
            .iter()
            .map(|v| Handle::new(v.position(), HandleKind::Vertex(v.id))),
    );
    if n < 2 {
        return;
    }
    if with_edges {
        for i in 0..n {
            let mid = geometry::midpoint(vertices[i].position(), vertices[(i + 1) % n].position());
            handles.push(Handle::new(mid, HandleKind::EdgeMidpoint(i)));
        }
    }
    for (i, v) in vertices.iter().enumerate() {
        if v.kind != VertexKind::Fillet {
            continue;
        }
        let prev = vertices[(i + n - 1) % n].position();
        let next = vertices[(i + 1) % n].position();
        let bisector = geometry::corner_bisector(prev, v.position(), next);
        let distance = (v.radius.unwrap_or(0.0) + RADIUS_HANDLE_GAP).max(RADIUS_HANDLE_MIN_DISTANCE);
        handles.push(Handle::new(
            v.position() + bisector * distance,
            HandleKind::Radius(v.id),
        ));
    }
}

/// Handles of entity `id`, in hit priority order: vertex, edge midpoint, radius,
/// rotate, resize.
pub fn handles_for(state: &SceneState, id: EntityId) -> Vec<Handle> {
    let mut handles = Vec::new();

    if let Some(room) = find(&state.shapes, id) {
        outline_handles(&room.vertices, true, &mut handles);
        let bounds = room.bounds();
        handles.push(Handle::new(
            Point::new(bounds.center().x, bounds.y0 - POLYGON_ROTATE_HANDLE_OFFSET),
            HandleKind::Rotate,
        ));
    } else if let Some(zone) = find(&state.zones, id) {
        outline_handles(&zone.vertices, true, &mut handles);
        let bounds = zone.bounds();
        handles.push(Handle::new(
            Point::new(bounds.center().x, bounds.y0 - POLYGON_ROTATE_HANDLE_OFFSET),
            HandleKind::Rotate,
        ));
    } else if let Some(item) = find(&state.furniture, id) {
        let center = item.center();
        match item.vertices.as_ref() {
            Some(vertices) if item.is_custom() => {
                outline_handles(vertices, false, &mut handles);
                handles.push(Handle::new(
                    Point::new(center.x, item.bounds().y0 - ROTATE_HANDLE_OFFSET),
                    HandleKind::Rotate,
                ));
            }
            _ => {
                let half = Vec2::new(item.width / 2.0, item.height / 2.0);
                handles.push(Handle::new(
                    local_to_plan(center, item.rotation, Vec2::new(0.0, -half.y - ROTATE_HANDLE_OFFSET)),
                    HandleKind::Rotate,
                ));
                for handle in ResizeHandle::ALL {
                    let dir = handle.direction();
                    let local = Vec2::new(dir.x * half.x, dir.y * half.y);
                    handles.push(Handle::new(
                        local_to_plan(center, item.rotation, local),
                        HandleKind::Resize(handle),
                    ));
                }
            }
        }
    } else if let Some(item) = find(&state.wall_items, id) {
        let center = item.center();
        handles.push(Handle::new(
            local_to_plan(
                center,
                item.rotation,
                Vec2::new(0.0, -item.height / 2.0 - ROTATE_HANDLE_OFFSET),
            ),
            HandleKind::Rotate,
        ));
        for side in [-1.0, 1.0] {
            handles.push(Handle::new(
                local_to_plan(center, item.rotation, Vec2::new(side * item.width / 2.0, 0.0)),
                HandleKind::WallItemResize,
            ));
        }
    } else if let Some(text) = find(&state.texts, id) {
        let anchor = text.position();
        let top = text.bounds().y0 - ROTATE_HANDLE_OFFSET;
        handles.push(Handle::new(
            geometry::rotate_point(Point::new(anchor.x, top), text.rotation, anchor),
            HandleKind::Rotate,
        ));
    }

    handles
}

/// Find which handle of entity `id` (if any) is hit at `point`.
pub fn hit_test_handles(
    state: &SceneState,
    id: EntityId,
    point: Point,
    tolerance: f64,
) -> Option<HandleKind> {
    handles_for(state, id)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FurnitureType;
    use crate::entities::{Furniture, Room};

    fn square_room() -> Room {
        Room::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(200.0, 0.0),
            Point::new(200.0, 200.0),
            Point::new(0.0, 200.0),
        ])
    }

    #[test]
    fn test_room_handles_in_priority_order() {
        let mut state = SceneState::new();
        let room = square_room();
        let id = room.id;
        state.shapes.push(room);

        let handles = handles_for(&state, id);
        // 4 vertices, 4 edge midpoints, no radius handles, 1 rotate.
        assert_eq!(handles.len(), 9);
        assert!(matches!(handles[0].kind, HandleKind::Vertex(_)));
        assert_eq!(handles[4].kind, HandleKind::EdgeMidpoint(0));
        assert_eq!(handles[4].position, Point::new(100.0, 0.0));
        assert_eq!(handles[8].kind, HandleKind::Rotate);
        assert_eq!(handles[8].position, Point::new(100.0, -40.0));
    }

    #[test]
    fn test_radius_handle_only_on_fillet() {
        let mut state = SceneState::new();
        let mut room = square_room();
        room.vertices[0].toggle_kind();
        let vid = room.vertices[0].id;
        let id = room.id;
        state.shapes.push(room);

        let radius: Vec<Handle> = handles_for(&state, id)
            .into_iter()
            .filter(|h| matches!(h.kind, HandleKind::Radius(_)))
            .collect();
        assert_eq!(radius.len(), 1);
        assert_eq!(radius[0].kind, HandleKind::Radius(vid));
        // Bisector of the top-left corner points into the room, 20 units out.
        let expected = 20.0 / 2f64.sqrt();
        assert!((radius[0].position.x - expected).abs() < 1e-9);
        assert!((radius[0].position.y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_furniture_resize_handles_follow_rotation() {
        let mut state = SceneState::new();
        let mut bed = Furniture::from_preset(FurnitureType::BedKing, Point::new(100.0, 100.0));
        bed.rotation = 90.0;
        let id = bed.id;
        state.furniture.push(bed);

        let right = handles_for(&state, id)
            .into_iter()
            .find(|h| h.kind == HandleKind::Resize(ResizeHandle::Right))
            .unwrap();
        // Local (90, 0) turned a quarter clockwise lands below the center.
        assert!((right.position.x - 100.0).abs() < 1e-9);
        assert!((right.position.y - 190.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_prefers_vertex() {
        let mut state = SceneState::new();
        let room = square_room();
        let id = room.id;
        let first = room.vertices[0].id;
        state.shapes.push(room);

        assert_eq!(
            hit_test_handles(&state, id, Point::new(2.0, 1.0), 10.0),
            Some(HandleKind::Vertex(first))
        );
        assert_eq!(
            hit_test_handles(&state, id, Point::new(100.0, 3.0), 10.0),
            Some(HandleKind::EdgeMidpoint(0))
        );
        assert_eq!(hit_test_handles(&state, id, Point::new(100.0, 100.0), 10.0), None);
    }
}
