//! Select-tool gestures: picking, marquee, moving, rotating and resizing.

use super::{
    DragAction, Editor, HANDLE_HIT_TOLERANCE, HIT_TOLERANCE, HandleKind, MIN_ITEM_SIZE,
    MIN_MARQUEE_SIZE, ResizeHandle, hit_test_handles,
};
use crate::entities::{EntityId, EntityKind, Furniture};
use crate::geometry;
use crate::input::Modifiers;
use crate::scene::{SceneState, find_mut};
use crate::snap::{self, SNAP_THRESHOLD, WALL_ITEM_MOVE_THRESHOLD};
use kurbo::{Point, Rect, Vec2};
use std::collections::HashSet;

/// Wrap an angle difference into (-180, 180].
fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}

/// Bounds used for edge snapping: the first selected room, else the first selected
/// furniture item.
fn moving_bounds(state: &SceneState) -> Option<Rect> {
    let selected = &state.selected_ids;
    state
        .shapes
        .iter()
        .find(|room| selected.contains(&room.id))
        .map(|room| room.bounds())
        .or_else(|| {
            state
                .furniture
                .iter()
                .find(|item| selected.contains(&item.id))
                .map(Furniture::bounds)
        })
}

/// Bounds of rooms, zones and furniture that are not part of the move.
fn snap_targets(state: &SceneState, moving: &HashSet<EntityId>) -> Vec<Rect> {
    let rooms = state
        .shapes
        .iter()
        .filter(|room| !moving.contains(&room.id))
        .map(|room| room.bounds());
    let zones = state
        .zones
        .iter()
        .filter(|zone| !moving.contains(&zone.id))
        .map(|zone| zone.bounds());
    let furniture = state
        .furniture
        .iter()
        .filter(|item| !moving.contains(&item.id))
        .map(Furniture::bounds);
    rooms.chain(zones).chain(furniture).collect()
}

/// Turn a vector by `angle_deg` about the origin.
fn rotate_vec(v: Vec2, angle_deg: f64) -> Vec2 {
    geometry::rotate_point(v.to_point(), angle_deg, Point::ZERO).to_vec2()
}

/// Drag one or two box edges by the plan `delta`, keeping the opposite edges in
/// place. Edges are those of the item's own rotated frame.
pub(super) fn resize_from_handle(item: &mut Furniture, handle: ResizeHandle, delta: Vec2) {
    let dir = handle.direction();
    let delta = rotate_vec(delta, -item.rotation);
    let mut width = item.width;
    let mut height = item.height;
    let mut shift = Vec2::ZERO;
    if dir.x != 0.0 {
        width = (item.width + dir.x * delta.x).max(MIN_ITEM_SIZE);
        shift.x = dir.x * (width - item.width) / 2.0;
    }
    if dir.y != 0.0 {
        height = (item.height + dir.y * delta.y).max(MIN_ITEM_SIZE);
        shift.y = dir.y * (height - item.height) / 2.0;
    }
    item.resize(width, height);
    item.translate(rotate_vec(shift, item.rotation));
}

impl Editor {
    /// Press with the select tool: handles of the primary selection first, then
    /// entities, then empty canvas.
    pub(super) fn select_press(&mut self, world: Point, screen: Point, modifiers: Modifiers) {
        let zoom = self.camera.zoom;
        if let Some(id) = self.store.primary_selection() {
            let handle = hit_test_handles(
                self.store.state(),
                id,
                world,
                HANDLE_HIT_TOLERANCE / zoom,
            );
            if let Some(handle) = handle {
                self.begin_handle(id, handle, world, screen);
                return;
            }
        }

        let Some((kind, id)) = self.store.state().hit_test(world, HIT_TOLERANCE / zoom) else {
            if !modifiers.shift {
                self.store.clear_selection();
            }
            self.transient.marquee = Some(Rect::from_points(world, world));
            self.begin(DragAction::SelectingMarquee, None, world, screen);
            return;
        };

        if modifiers.shift {
            self.store.toggle_selection(id, true);
        } else if !self.store.is_selected(id) {
            self.store.toggle_selection(id, false);
        }
        let children = self.store.state().children_of_selection();
        let action = match kind {
            EntityKind::WallItem => DragAction::MoveWallItem,
            kind => DragAction::Move(kind),
        };
        let last = match action {
            DragAction::Move(_) => self.grid_point(world),
            _ => world,
        };
        let drag = self.begin(action, Some(id), world, screen);
        drag.last = last;
        drag.children = children;
    }

    fn begin_handle(&mut self, id: EntityId, handle: HandleKind, world: Point, screen: Point) {
        let action = match handle {
            HandleKind::Vertex(vertex_id) => DragAction::MoveVertex(vertex_id),
            HandleKind::EdgeMidpoint(index) => {
                self.insert_edge_vertex(id, index);
                return;
            }
            HandleKind::Radius(vertex_id) => DragAction::AdjustRadius(vertex_id),
            HandleKind::Rotate => match self.store.state().kind_of(id) {
                Some(kind) => DragAction::Rotate(kind),
                None => return,
            },
            HandleKind::Resize(handle) => DragAction::ResizeFurniture(handle),
            HandleKind::WallItemResize => DragAction::ResizeWallItem,
        };
        let state = self.store.state();
        let pivot = state.center_of(id).unwrap_or(world);
        let children = match action {
            DragAction::Rotate(EntityKind::Room) => state.containment_children(id),
            _ => Vec::new(),
        };
        let drag = self.begin(action, Some(id), world, screen);
        drag.pivot = pivot;
        drag.children = children;
    }

    pub(super) fn update_marquee(&mut self, world: Point) {
        if let Some(drag) = self.drag.as_ref() {
            self.transient.marquee = Some(Rect::from_points(drag.origin, world));
        }
    }

    /// Select everything with a point inside the box, or clear the selection when
    /// the box is too small to be deliberate.
    pub(super) fn finish_marquee(&mut self) {
        let Some(rect) = self.transient.marquee.take() else {
            return;
        };
        if rect.width() > MIN_MARQUEE_SIZE && rect.height() > MIN_MARQUEE_SIZE {
            let ids = self.store.state().ids_in_rect(rect);
            log::debug!("marquee selected {} entities", ids.len());
            self.store.set_selected(ids);
        } else {
            self.store.clear_selection();
        }
    }

    /// Move the selection and its captured children by the grid-snapped pointer
    /// delta, corrected by edge snapping.
    pub(super) fn move_selection(&mut self, world: Point) {
        let target = self.grid_point(world);
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let mut delta = target - drag.last;
        drag.last = target;

        let state = self.store.state_mut();
        self.transient.snap_point = state.settings.grid_snap.then_some(target);
        if delta == Vec2::ZERO {
            return;
        }

        let mut moving: Vec<EntityId> = state.selected_ids.clone();
        moving.extend(drag.children.iter().copied());
        if state.settings.element_snap {
            if let Some(bounds) = moving_bounds(state) {
                let excluded: HashSet<EntityId> = moving.iter().copied().collect();
                let targets = snap_targets(state, &excluded);
                let snapped = snap::edge_snap(
                    bounds,
                    delta,
                    &targets,
                    SNAP_THRESHOLD,
                    self.camera.visible_rect(),
                );
                delta = snapped.delta;
                self.transient.guides = snapped.guides;
            }
        }

        for id in moving {
            state.translate_entity(id, delta);
        }
    }

    /// Slide a door or window along the nearest wall, or let it float free.
    pub(super) fn move_wall_item(&mut self, world: Point) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let Some(id) = drag.target else {
            return;
        };
        let delta = world - drag.last;
        drag.last = world;

        let state = self.store.state_mut();
        let wall = geometry::nearest_wall_segment(world, &state.shapes, WALL_ITEM_MOVE_THRESHOLD);
        if let Some(item) = find_mut(&mut state.wall_items, id) {
            match wall {
                Some(wall) => item.attach(&wall),
                None => {
                    item.translate(delta);
                    item.attached_to = None;
                }
            }
        }
    }

    /// Rotate the target about the pivot by the angle the pointer swept since the
    /// last event. Room children turn rigidly with the room.
    pub(super) fn rotate_target(&mut self, world: Point) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let Some(id) = drag.target else {
            return;
        };
        let pivot = drag.pivot;
        let before = drag.last - pivot;
        let after = world - pivot;
        drag.last = world;

        let angle = wrap_degrees((after.y.atan2(after.x) - before.y.atan2(before.x)).to_degrees());
        if angle == 0.0 || !angle.is_finite() {
            return;
        }
        let state = self.store.state_mut();
        state.rotate_entity(id, angle, pivot);
        for child in &drag.children {
            state.rotate_entity(*child, angle, pivot);
        }
    }

    pub(super) fn resize_furniture(&mut self, handle: ResizeHandle, world: Point) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let Some(id) = drag.target else {
            return;
        };
        let delta = world - drag.last;
        drag.last = world;
        if let Some(item) = find_mut(&mut self.store.state_mut().furniture, id) {
            resize_from_handle(item, handle, delta);
        }
    }

    /// Wall items grow symmetrically: the width is twice the pointer distance.
    pub(super) fn resize_wall_item(&mut self, world: Point) {
        let Some(id) = self.drag.as_ref().and_then(|drag| drag.target) else {
            return;
        };
        if let Some(item) = find_mut(&mut self.store.state_mut().wall_items, id) {
            item.width = (2.0 * item.center().distance(world)).max(MIN_ITEM_SIZE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FurnitureType;
    use crate::entities::{Room, WallItem, corners_from_points};

    const EPS: f64 = 1e-9;

    #[test]
    fn test_wrap_degrees() {
        assert!((wrap_degrees(350.0) + 10.0).abs() < EPS);
        assert!((wrap_degrees(-190.0) - 170.0).abs() < EPS);
        assert!((wrap_degrees(180.0) - 180.0).abs() < EPS);
        assert!((wrap_degrees(-180.0) - 180.0).abs() < EPS);
    }

    #[test]
    fn test_resize_left_keeps_right_edge() {
        let mut item = Furniture::from_preset(FurnitureType::BedKing, Point::new(0.0, 0.0));
        let right = item.bounds().x1;
        resize_from_handle(&mut item, ResizeHandle::Left, Vec2::new(-30.0, 12.0));
        assert!((item.width - 210.0).abs() < EPS);
        assert!((item.height - 200.0).abs() < EPS);
        assert!((item.bounds().x1 - right).abs() < EPS);
    }

    #[test]
    fn test_resize_rotated_item_uses_local_frame() {
        let mut item = Furniture::from_preset(FurnitureType::BedKing, Point::new(0.0, 0.0));
        item.rotation = 90.0;
        // The local right edge faces down the plan after a quarter turn.
        resize_from_handle(&mut item, ResizeHandle::Right, Vec2::new(0.0, 40.0));
        assert!((item.width - 220.0).abs() < 1e-6);
        assert!(item.x.abs() < 1e-6);
        assert!((item.y - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_corner_clamps_both_axes() {
        let mut item = Furniture::from_preset(FurnitureType::BedKing, Point::new(0.0, 0.0));
        let top_left = (item.bounds().x0, item.bounds().y0);
        resize_from_handle(&mut item, ResizeHandle::BottomRight, Vec2::new(-500.0, -500.0));
        assert!((item.width - MIN_ITEM_SIZE).abs() < EPS);
        assert!((item.height - MIN_ITEM_SIZE).abs() < EPS);
        assert!((item.bounds().x0 - top_left.0).abs() < EPS);
        assert!((item.bounds().y0 - top_left.1).abs() < EPS);
    }

    #[test]
    fn test_resize_custom_scales_outline() {
        let mut item = Furniture::custom(corners_from_points(&[
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(0.0, 50.0),
        ]));
        resize_from_handle(&mut item, ResizeHandle::Right, Vec2::new(50.0, 0.0));
        let vertices = item.vertices.as_ref().unwrap();
        assert!((vertices[0].x).abs() < EPS);
        assert!((vertices[1].x - 150.0).abs() < EPS);
        assert!((item.x - 75.0).abs() < EPS);
    }

    #[test]
    fn test_snap_targets_skip_moving() {
        let mut state = SceneState::new();
        let a = Room::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        let b = Room::from_points(&[
            Point::new(50.0, 0.0),
            Point::new(60.0, 0.0),
            Point::new(60.0, 10.0),
        ]);
        let a_id = a.id;
        state.shapes.extend([a, b]);
        state.selected_ids = vec![a_id];

        assert_eq!(moving_bounds(&state), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let targets = snap_targets(&state, &HashSet::from([a_id]));
        assert_eq!(targets, vec![Rect::new(50.0, 0.0, 60.0, 10.0)]);
    }

    #[test]
    fn test_move_edge_snaps_to_neighbor() {
        let mut editor = Editor::new();
        editor.store_mut().set_settings(crate::settings::Settings {
            grid_snap: false,
            ..Default::default()
        });
        let square = |x: f64| {
            Room::from_points(&[
                Point::new(x, 0.0),
                Point::new(x + 100.0, 0.0),
                Point::new(x + 100.0, 100.0),
                Point::new(x, 100.0),
            ])
        };
        editor.store_mut().add_room(square(0.0));
        let moving = editor.store_mut().add_room(square(300.0));
        editor.store_mut().set_selected(vec![moving]);

        // Drag left until the gap is 7 units: the left edge snaps onto x = 100.
        for event in [
            crate::input::PointerEvent::Down {
                position: Point::new(350.0, 50.0),
                button: crate::input::MouseButton::Left,
                modifiers: Modifiers::NONE,
            },
            crate::input::PointerEvent::Move {
                position: Point::new(157.0, 50.0),
                modifiers: Modifiers::NONE,
            },
        ] {
            editor.handle_pointer(event);
        }
        let bounds = editor.scene().shapes[1].bounds();
        assert!((bounds.x0 - 100.0).abs() < EPS);
        assert_eq!(editor.transient().guides.len(), 2);
    }

    #[test]
    fn test_wall_item_width_from_pointer() {
        let mut editor = Editor::new();
        let door = WallItem::default();
        let id = editor.store_mut().add_wall_item(door);
        editor.store_mut().set_selected(vec![id]);
        // Right end of a default door sits at (40, 0).
        for event in [
            crate::input::PointerEvent::Down {
                position: Point::new(40.0, 0.0),
                button: crate::input::MouseButton::Left,
                modifiers: Modifiers::NONE,
            },
            crate::input::PointerEvent::Move {
                position: Point::new(75.0, 0.0),
                modifiers: Modifiers::NONE,
            },
        ] {
            editor.handle_pointer(event);
        }
        assert!((editor.scene().wall_items[0].width - 150.0).abs() < EPS);
        assert_eq!(editor.drag_action(), Some(DragAction::ResizeWallItem));
    }
}
