//! Creation gestures: rooms, zones, custom furniture, strokes, text, doors,
//! windows and measurements.

use super::{DragAction, Drag, Editor, MIN_CREATION_DRAG, MIN_MEASUREMENT_LENGTH};
use crate::catalog::{FurnitureType, RoomTemplate};
use crate::entities::{
    DEFAULT_TEXT, Drawing, EntityId, Furniture, Measurement, Room, TextItem, Vertex, WallItem,
    WallItemType, Zone, corners_from_points,
};
use crate::geometry;
use crate::scene::find_mut;
use crate::snap::WALL_SNAP_THRESHOLD;
use crate::tools::{AppMode, ToolKind};
use kurbo::Point;
use std::collections::HashSet;

/// Axis-aligned rectangle spanned by a creation drag, as
/// minX/minY, maxX/minY, maxX/maxY, minX/maxY.
fn creation_rect(origin: Point, pointer: Point, square: bool) -> [Point; 4] {
    let mut width = (pointer.x - origin.x).abs();
    let mut height = (pointer.y - origin.y).abs();
    if square {
        let side = width.max(height);
        width = side;
        height = side;
    }
    let x0 = if pointer.x >= origin.x { origin.x } else { origin.x - width };
    let y0 = if pointer.y >= origin.y { origin.y } else { origin.y - height };
    [
        Point::new(x0, y0),
        Point::new(x0 + width, y0),
        Point::new(x0 + width, y0 + height),
        Point::new(x0, y0 + height),
    ]
}

/// Move vertices onto `points`, keeping their ids and kinds.
fn set_positions(vertices: &mut [Vertex], points: &[Point]) {
    for (vertex, point) in vertices.iter_mut().zip(points) {
        vertex.x = point.x;
        vertex.y = point.y;
    }
}

impl Editor {
    /// Insert a collapsed placeholder at `world` and start stretching it.
    pub(super) fn begin_creation(&mut self, action: DragAction, world: Point, screen: Point) {
        let state = self.store.state_mut();
        let corners = corners_from_points(&[world; 4]);
        let id = match action {
            DragAction::CreatingRoom => {
                let room = Room::new(corners, format!("Room {}", state.shapes.len() + 1));
                let id = room.id;
                state.shapes.push(room);
                id
            }
            DragAction::CreatingZone => {
                let zone = Zone::new(corners, format!("Zone {}", state.zones.len() + 1));
                let id = zone.id;
                state.zones.push(zone);
                id
            }
            _ => {
                let item = Furniture::custom(corners);
                let id = item.id;
                state.furniture.push(item);
                id
            }
        };
        state.selected_ids = vec![id];
        self.begin(action, Some(id), world, screen);
    }

    pub(super) fn update_creation(&mut self, world: Point, square: bool) {
        let Some(drag) = self.drag.as_ref() else {
            return;
        };
        let Some(id) = drag.target else {
            return;
        };
        let corners = creation_rect(drag.origin, world, square);
        let state = self.store.state_mut();
        match drag.action {
            DragAction::CreatingRoom => {
                if let Some(room) = find_mut(&mut state.shapes, id) {
                    set_positions(&mut room.vertices, &corners);
                }
            }
            DragAction::CreatingZone => {
                if let Some(zone) = find_mut(&mut state.zones, id) {
                    set_positions(&mut zone.vertices, &corners);
                }
            }
            DragAction::CreatingCustomFurniture => {
                if let Some(item) = find_mut(&mut state.furniture, id) {
                    if let Some(vertices) = item.vertices.as_mut() {
                        set_positions(vertices, &corners);
                    }
                    item.sync_bounds();
                }
            }
            _ => {}
        }
    }

    /// Keep the placeholder if the drag was long enough, otherwise drop it.
    /// Either way the tool returns to select.
    pub(super) fn finish_creation(&mut self, drag: &Drag, world: Point) {
        if let Some(id) = drag.target {
            if drag.has_dragged && drag.origin.distance(world) >= MIN_CREATION_DRAG {
                self.store.commit();
                log::debug!("created {:?} {id}", drag.action);
            } else {
                self.store.state_mut().remove_ids(&HashSet::from([id]));
                log::debug!("discarded {:?} placeholder", drag.action);
            }
        }
        self.set_tool(ToolKind::Select);
    }

    pub(super) fn begin_freehand(&mut self, world: Point, screen: Point) {
        self.store.clear_selection();
        self.transient.pending_freehand = vec![world];
        self.begin(DragAction::DrawingFreehand, None, world, screen);
    }

    /// Append a stroke point. With `constrain`, the point keeps the dominant axis
    /// of its offset from the previous one.
    pub(super) fn extend_freehand(&mut self, world: Point, constrain: bool) {
        let points = &mut self.transient.pending_freehand;
        let mut next = world;
        if let Some(last) = points.last().copied() {
            if constrain {
                if (world.x - last.x).abs() > (world.y - last.y).abs() {
                    next.y = last.y;
                } else {
                    next.x = last.x;
                }
            }
            if next == last {
                return;
            }
        }
        points.push(next);
    }

    pub(super) fn finish_freehand(&mut self) {
        let points = std::mem::take(&mut self.transient.pending_freehand);
        if points.len() < 2 {
            return;
        }
        self.store.add_drawing(Drawing::new(points));
        self.set_tool(ToolKind::Select);
    }

    pub(super) fn insert_text(&mut self, world: Point) {
        let id = self.store.add_text(TextItem::new(world, DEFAULT_TEXT));
        self.store.set_selected(vec![id]);
        self.set_tool(ToolKind::Select);
    }

    /// Place a door or window. A matching hover ghost is placed as shown; otherwise
    /// the item needs a wall within [`WALL_SNAP_THRESHOLD`].
    pub(super) fn place_wall_item(&mut self, item_type: WallItemType, world: Point) {
        let ghost = self
            .transient
            .ghost_wall_item
            .take()
            .filter(|ghost| ghost.item_type == item_type);
        let item = match ghost {
            Some(ghost) => ghost,
            None => {
                let Some(wall) = geometry::nearest_wall_segment(
                    world,
                    &self.store.state().shapes,
                    WALL_SNAP_THRESHOLD,
                ) else {
                    log::debug!("no wall near {world:?}");
                    return;
                };
                WallItem::on_wall(item_type, &wall)
            }
        };
        let id = self.store.add_wall_item(item);
        self.store.set_selected(vec![id]);
    }

    /// Refresh the hover state while no gesture runs.
    pub(super) fn hover(&mut self, world: Point) {
        self.transient.guides.clear();
        self.transient.snap_point = None;

        let item_type = match self.store.state().tool {
            ToolKind::Door => WallItemType::Door,
            ToolKind::Window => WallItemType::Window,
            _ => {
                self.transient.ghost_wall_item = None;
                return;
            }
        };
        let ghost = geometry::nearest_wall_segment(world, &self.store.state().shapes, WALL_SNAP_THRESHOLD)
            .map(|wall| WallItem::on_wall(item_type, &wall));
        let mode = if ghost.is_some() {
            AppMode::PlacingWallItem
        } else {
            AppMode::Idle
        };
        self.transient.ghost_wall_item = ghost;
        self.store.set_mode(mode);
    }

    pub(super) fn begin_measurement(&mut self, world: Point, screen: Point) {
        self.transient.pending_measurement = Some(Measurement::new(world, world));
        self.begin(DragAction::Measuring, None, world, screen);
    }

    pub(super) fn update_measurement(&mut self, world: Point) {
        if let Some(measurement) = self.transient.pending_measurement.as_mut() {
            measurement.set_end(world);
        }
    }

    pub(super) fn finish_measurement(&mut self) {
        if let Some(measurement) = self.transient.pending_measurement.take() {
            if measurement.distance > MIN_MEASUREMENT_LENGTH {
                self.store.add_measurement(measurement);
            }
        }
    }

    /// Drop a template room centered in the view and select it.
    pub fn place_template(&mut self, template: RoomTemplate) -> EntityId {
        let room = Room::new(
            template.vertices_at(self.camera.visible_center()),
            template.label(),
        );
        let id = self.store.add_room(room);
        self.store.set_selected(vec![id]);
        log::debug!("placed {template:?} template");
        id
    }

    /// Drop a catalog item centered in the view and select it.
    ///
    /// [`FurnitureType::Custom`] places nothing: it arms the furniture tool so the
    /// next drag draws the outline.
    pub fn place_furniture(&mut self, furniture_type: FurnitureType) -> Option<EntityId> {
        if furniture_type == FurnitureType::Custom {
            self.set_tool(ToolKind::Furniture);
            self.store.set_mode(AppMode::DrawingCustom);
            return None;
        }
        let item = Furniture::from_preset(furniture_type, self.camera.visible_center());
        let id = self.store.add_furniture(item);
        self.store.set_selected(vec![id]);
        Some(id)
    }
}
