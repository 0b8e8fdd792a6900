//! Vertex editing on room, zone and custom furniture outlines.

use super::Editor;
use crate::entities::{EntityId, Vertex, VertexKind};
use crate::geometry::{self, Positioned};
use crate::scene::{SceneState, find_mut};
use crate::snap::{self, VERTEX_ALIGN_THRESHOLD};
use kurbo::Point;

/// Run `edit` on the outline holding vertex `vertex_id`, with the vertex index.
///
/// Rooms are searched first, then zones, then custom furniture. Furniture bounds
/// follow the edited outline.
fn edit_vertex(
    state: &mut SceneState,
    vertex_id: EntityId,
    edit: impl FnOnce(&mut Vec<Vertex>, usize),
) -> bool {
    let position = |vertices: &[Vertex]| vertices.iter().position(|v| v.id == vertex_id);

    for room in &mut state.shapes {
        if let Some(index) = position(&room.vertices) {
            edit(&mut room.vertices, index);
            return true;
        }
    }
    for zone in &mut state.zones {
        if let Some(index) = position(&zone.vertices) {
            edit(&mut zone.vertices, index);
            return true;
        }
    }
    for item in &mut state.furniture {
        let Some(vertices) = item.vertices.as_mut() else {
            continue;
        };
        if let Some(index) = position(vertices) {
            edit(vertices, index);
            item.sync_bounds();
            return true;
        }
    }
    false
}

/// Every room and zone vertex except `vertex_id`.
fn alignment_targets(state: &SceneState, vertex_id: EntityId) -> Vec<Point> {
    let rooms = state.shapes.iter().flat_map(|room| room.vertices.iter());
    let zones = state.zones.iter().flat_map(|zone| zone.vertices.iter());
    rooms
        .chain(zones)
        .filter(|v| v.id != vertex_id)
        .map(Positioned::position)
        .collect()
}

impl Editor {
    /// Drag a vertex, aligning it with other vertices when element snapping is on.
    pub(super) fn move_vertex(&mut self, vertex_id: EntityId, world: Point) {
        let mut target = self.grid_point(world);
        let state = self.store.state_mut();
        if state.settings.element_snap {
            let aligned = snap::vertex_align(
                target,
                &alignment_targets(state, vertex_id),
                VERTEX_ALIGN_THRESHOLD,
            );
            target = aligned.point;
            self.transient.guides = aligned.guides;
        }
        edit_vertex(state, vertex_id, |vertices, index| {
            vertices[index].x = target.x;
            vertices[index].y = target.y;
        });
    }

    /// Set a fillet radius from the pointer's reach along the corner bisector.
    /// No reach turns the vertex back into a sharp corner.
    pub(super) fn adjust_radius(&mut self, vertex_id: EntityId, world: Point) {
        edit_vertex(self.store.state_mut(), vertex_id, |vertices, index| {
            let n = vertices.len();
            if n < 3 {
                return;
            }
            let curr = vertices[index].position();
            let prev = vertices[(index + n - 1) % n].position();
            let next = vertices[(index + 1) % n].position();
            let bisector = geometry::corner_bisector(prev, curr, next);
            let radius = (world - curr).dot(bisector).max(0.0);

            let vertex = &mut vertices[index];
            if radius > 0.0 {
                vertex.kind = VertexKind::Fillet;
                vertex.radius = Some(radius);
            } else {
                vertex.kind = VertexKind::Corner;
                vertex.radius = None;
            }
        });
    }

    /// Click on a vertex: swap corner and fillet.
    pub(super) fn toggle_vertex(&mut self, vertex_id: EntityId) {
        let toggled = edit_vertex(self.store.state_mut(), vertex_id, |vertices, index| {
            vertices[index].toggle_kind();
        });
        if toggled {
            self.store.commit();
        }
    }

    /// Split edge `index` of a room or zone at its midpoint.
    pub(super) fn insert_edge_vertex(&mut self, id: EntityId, index: usize) {
        let state = self.store.state_mut();
        let vertices = match find_mut(&mut state.shapes, id) {
            Some(room) => &mut room.vertices,
            None => match find_mut(&mut state.zones, id) {
                Some(zone) => &mut zone.vertices,
                None => return,
            },
        };
        let n = vertices.len();
        if index >= n {
            return;
        }
        let mid = geometry::midpoint(vertices[index].position(), vertices[(index + 1) % n].position());
        vertices.insert(index + 1, Vertex::corner(mid.x, mid.y));
        self.store.commit();
        log::debug!("split edge {index} of {id}");
    }
}
