//! Pointer-driven editing.
//!
//! [`Editor`] turns pointer events into scene mutations. A gesture runs from a press
//! to its release: motion mutates the scene through [`SceneStore::state_mut`] without
//! committing, and the release commits at most one history frame.

mod creation;
mod handles;
mod manipulation;
mod vertex;

pub use handles::{
    Handle, HandleKind, POLYGON_ROTATE_HANDLE_OFFSET, ROTATE_HANDLE_OFFSET, ResizeHandle,
    handles_for, hit_test_handles,
};

use crate::camera::Camera;
use crate::entities::{EntityId, EntityKind, Measurement, WallItem, WallItemType};
use crate::input::{Modifiers, MouseButton, PointerEvent};
use crate::scene::SceneState;
use crate::snap::{self, GuideLine};
use crate::store::SceneStore;
use crate::tools::{AppMode, ToolKind};
use kurbo::{Point, Rect, Vec2};

/// Pointer travel from the press origin before a gesture counts as a drag.
pub const DRAG_THRESHOLD: f64 = 5.0;
/// Shorter creation drags discard the placeholder.
pub const MIN_CREATION_DRAG: f64 = 10.0;
/// Smallest furniture side or wall item width reachable by resizing.
pub const MIN_ITEM_SIZE: f64 = 20.0;
/// Entity hit tolerance in screen pixels.
pub const HIT_TOLERANCE: f64 = 4.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 10.0;

const MIN_MARQUEE_SIZE: f64 = 5.0;
const MIN_MEASUREMENT_LENGTH: f64 = 5.0;

/// What the active gesture does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragAction {
    Panning,
    CreatingRoom,
    CreatingZone,
    CreatingCustomFurniture,
    DrawingFreehand,
    SelectingMarquee,
    Measuring,
    /// Move the selection. The kind is that of the pressed entity.
    Move(EntityKind),
    MoveWallItem,
    MoveVertex(EntityId),
    AdjustRadius(EntityId),
    Rotate(EntityKind),
    ResizeFurniture(ResizeHandle),
    ResizeWallItem,
}

impl DragAction {
    /// Mode reported while the gesture runs.
    pub fn mode(self) -> AppMode {
        match self {
            DragAction::Panning => AppMode::Panning,
            DragAction::CreatingRoom => AppMode::Drawing,
            DragAction::CreatingZone => AppMode::DrawingZone,
            DragAction::CreatingCustomFurniture => AppMode::DrawingCustom,
            DragAction::DrawingFreehand => AppMode::DrawingFreehand,
            DragAction::Measuring => AppMode::Measuring,
            DragAction::MoveVertex(_) | DragAction::AdjustRadius(_) => AppMode::VertexEdit,
            DragAction::MoveWallItem => AppMode::PlacingWallItem,
            DragAction::SelectingMarquee
            | DragAction::Move(_)
            | DragAction::Rotate(_)
            | DragAction::ResizeFurniture(_)
            | DragAction::ResizeWallItem => AppMode::Idle,
        }
    }

    fn is_creation(self) -> bool {
        matches!(
            self,
            DragAction::CreatingRoom | DragAction::CreatingZone | DragAction::CreatingCustomFurniture
        )
    }
}

/// State of the gesture between press and release.
#[derive(Debug, Clone)]
struct Drag {
    action: DragAction,
    /// Entity the gesture acts on.
    target: Option<EntityId>,
    /// Press position in plan coordinates.
    origin: Point,
    /// Previous pointer position in plan coordinates. Grid-snapped for moves.
    last: Point,
    screen_origin: Point,
    camera_origin: Vec2,
    /// Rotation pivot, fixed at gesture start.
    pivot: Point,
    has_dragged: bool,
    /// Entities carried along, computed once at gesture start.
    children: Vec<EntityId>,
}

/// Gesture feedback for rendering. Never part of the scene or history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transient {
    pub guides: Vec<GuideLine>,
    pub snap_point: Option<Point>,
    pub marquee: Option<Rect>,
    pub ghost_wall_item: Option<WallItem>,
    pub pending_freehand: Vec<Point>,
    pub pending_measurement: Option<Measurement>,
}

/// Interactive controller: owns the store, the camera and the gesture state.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    store: SceneStore,
    camera: Camera,
    drag: Option<Drag>,
    transient: Transient,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: SceneStore, camera: Camera) -> Self {
        Self {
            store,
            camera,
            drag: None,
            transient: Transient::default(),
        }
    }

    pub fn scene(&self) -> &SceneState {
        self.store.state()
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SceneStore {
        &mut self.store
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn transient(&self) -> &Transient {
        &self.transient
    }

    /// The running gesture, if any.
    pub fn drag_action(&self) -> Option<DragAction> {
        self.drag.as_ref().map(|drag| drag.action)
    }

    /// Handles of the primary selection.
    pub fn handles(&self) -> Vec<Handle> {
        self.store
            .primary_selection()
            .map(|id| handles_for(self.store.state(), id))
            .unwrap_or_default()
    }

    /// Switch tools, dropping any hover ghost.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.store.set_tool(tool);
        self.transient.ghost_wall_item = None;
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.pointer_down(position, button, modifiers),
            PointerEvent::Move {
                position,
                modifiers,
            } => self.pointer_move(position, modifiers),
            PointerEvent::Up {
                position,
                modifiers,
                ..
            } => self.pointer_up(position, modifiers),
            PointerEvent::Scroll { position, delta } => self.camera.zoom_wheel(position, delta.y),
        }
    }

    fn pointer_down(&mut self, screen: Point, button: MouseButton, modifiers: Modifiers) {
        if self.drag.is_some() {
            return;
        }
        let world = self.camera.screen_to_world(screen);
        match button {
            MouseButton::Left => {}
            MouseButton::Middle => {
                self.begin(DragAction::Panning, None, world, screen);
                return;
            }
            MouseButton::Right => return,
        }

        match self.store.state().tool {
            ToolKind::Select => self.select_press(world, screen, modifiers),
            ToolKind::Pan => {
                self.begin(DragAction::Panning, None, world, screen);
            }
            ToolKind::Room => self.begin_creation(DragAction::CreatingRoom, world, screen),
            ToolKind::Zone => self.begin_creation(DragAction::CreatingZone, world, screen),
            ToolKind::Furniture => {
                self.begin_creation(DragAction::CreatingCustomFurniture, world, screen)
            }
            ToolKind::Pencil => self.begin_freehand(world, screen),
            ToolKind::Text => self.insert_text(world),
            ToolKind::Door => self.place_wall_item(WallItemType::Door, world),
            ToolKind::Window => self.place_wall_item(WallItemType::Window, world),
            ToolKind::Measure => self.begin_measurement(world, screen),
        }
    }

    fn pointer_move(&mut self, screen: Point, modifiers: Modifiers) {
        let world = self.camera.screen_to_world(screen);
        let Some(drag) = self.drag.as_mut() else {
            self.hover(world);
            return;
        };
        if !drag.has_dragged && drag.origin.distance(world) > DRAG_THRESHOLD {
            drag.has_dragged = true;
        }
        self.drag_to(world, screen, modifiers);
    }

    fn pointer_up(&mut self, screen: Point, modifiers: Modifiers) {
        if self.drag.is_none() {
            return;
        }
        self.pointer_move(screen, modifiers);
        let Some(drag) = self.drag.take() else {
            return;
        };
        let world = self.camera.screen_to_world(screen);
        self.finish(&drag, world);

        self.transient.guides.clear();
        self.transient.snap_point = None;
        self.transient.marquee = None;
        self.transient.pending_freehand.clear();
        self.transient.pending_measurement = None;
        self.store.set_mode(AppMode::Idle);
    }

    /// Start a gesture. The ghost wall item disappears while a gesture runs.
    fn begin(
        &mut self,
        action: DragAction,
        target: Option<EntityId>,
        world: Point,
        screen: Point,
    ) -> &mut Drag {
        log::debug!("begin {action:?} on {target:?}");
        self.transient.ghost_wall_item = None;
        self.store.set_mode(action.mode());
        self.drag.insert(Drag {
            action,
            target,
            origin: world,
            last: world,
            screen_origin: screen,
            camera_origin: self.camera.offset,
            pivot: world,
            has_dragged: false,
            children: Vec::new(),
        })
    }

    fn drag_to(&mut self, world: Point, screen: Point, modifiers: Modifiers) {
        let Some(drag) = self.drag.as_ref() else {
            return;
        };
        let (action, has_dragged) = (drag.action, drag.has_dragged);
        match action {
            DragAction::Panning => self.pan_to(screen),
            DragAction::CreatingRoom
            | DragAction::CreatingZone
            | DragAction::CreatingCustomFurniture => self.update_creation(world, modifiers.shift),
            DragAction::DrawingFreehand => self.extend_freehand(world, modifiers.shift),
            DragAction::SelectingMarquee => self.update_marquee(world),
            DragAction::Measuring => self.update_measurement(world),
            // Handle and move gestures wait for the drag threshold so a click stays a click.
            _ if !has_dragged => {}
            DragAction::Move(_) => self.move_selection(world),
            DragAction::MoveWallItem => self.move_wall_item(world),
            DragAction::MoveVertex(vertex_id) => self.move_vertex(vertex_id, world),
            DragAction::AdjustRadius(vertex_id) => self.adjust_radius(vertex_id, world),
            DragAction::Rotate(_) => self.rotate_target(world),
            DragAction::ResizeFurniture(handle) => self.resize_furniture(handle, world),
            DragAction::ResizeWallItem => self.resize_wall_item(world),
        }
    }

    fn finish(&mut self, drag: &Drag, world: Point) {
        match drag.action {
            DragAction::Panning => {}
            action if action.is_creation() => self.finish_creation(drag, world),
            DragAction::DrawingFreehand => self.finish_freehand(),
            DragAction::SelectingMarquee => self.finish_marquee(),
            DragAction::Measuring => self.finish_measurement(),
            DragAction::MoveVertex(vertex_id) if !drag.has_dragged => self.toggle_vertex(vertex_id),
            action => {
                if drag.has_dragged {
                    self.store.commit();
                    log::debug!("committed {action:?}");
                }
            }
        }
    }

    fn pan_to(&mut self, screen: Point) {
        if let Some(drag) = self.drag.as_ref() {
            self.camera.offset = drag.camera_origin + (screen - drag.screen_origin);
        }
    }

    /// `world` on the grid when grid snapping is on.
    fn grid_point(&self, world: Point) -> Point {
        let settings = &self.store.state().settings;
        if settings.grid_snap {
            snap::snap_to_grid(world, settings.grid_size).point
        } else {
            world
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FurnitureType, RoomTemplate};
    use crate::entities::{Furniture, Room, VertexKind};
    use crate::geometry::Positioned;
    use crate::settings::Settings;

    const EPS: f64 = 1e-9;

    fn down(editor: &mut Editor, x: f64, y: f64) {
        editor.handle_pointer(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        });
    }

    fn move_to(editor: &mut Editor, x: f64, y: f64, modifiers: Modifiers) {
        editor.handle_pointer(PointerEvent::Move {
            position: Point::new(x, y),
            modifiers,
        });
    }

    fn up(editor: &mut Editor, x: f64, y: f64) {
        editor.handle_pointer(PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        });
    }

    fn drag(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
        down(editor, from.0, from.1);
        move_to(editor, to.0, to.1, Modifiers::NONE);
        up(editor, to.0, to.1);
    }

    /// Editor without grid or element snapping.
    fn free_editor() -> Editor {
        let mut editor = Editor::new();
        editor.store_mut().set_settings(Settings {
            grid_snap: false,
            element_snap: false,
            ..Settings::default()
        });
        editor
    }

    fn square_room(size: f64) -> Room {
        Room::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(size, 0.0),
            Point::new(size, size),
            Point::new(0.0, size),
        ])
    }

    #[test]
    fn test_creation_drag_creates_room() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Room);
        down(&mut editor, 0.0, 0.0);
        assert_eq!(editor.scene().mode, AppMode::Drawing);
        move_to(&mut editor, 200.0, 150.0, Modifiers::NONE);
        up(&mut editor, 200.0, 150.0);

        let scene = editor.scene();
        assert_eq!(scene.shapes.len(), 1);
        assert_eq!(scene.shapes[0].label, "Room 1");
        assert!((scene.shapes[0].area() - 30_000.0).abs() < EPS);
        assert_eq!(scene.tool, ToolKind::Select);
        assert_eq!(scene.mode, AppMode::Idle);
        assert_eq!(editor.store().history().len(), 2);
    }

    #[test]
    fn test_short_creation_drag_leaves_nothing() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Room);
        drag(&mut editor, (100.0, 100.0), (102.0, 100.0));

        assert!(editor.scene().shapes.is_empty());
        assert!(editor.scene().selected_ids.is_empty());
        assert_eq!(editor.scene().tool, ToolKind::Select);
        assert!(!editor.store().can_undo());
    }

    #[test]
    fn test_shift_creation_is_square() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Zone);
        down(&mut editor, 0.0, 0.0);
        move_to(&mut editor, -200.0, 100.0, Modifiers::SHIFT);
        editor.handle_pointer(PointerEvent::Up {
            position: Point::new(-200.0, 100.0),
            button: MouseButton::Left,
            modifiers: Modifiers::SHIFT,
        });

        let zone = &editor.scene().zones[0];
        assert_eq!(zone.label, "Zone 1");
        let bounds = zone.bounds();
        assert!((bounds.x0 + 200.0).abs() < EPS);
        assert!((bounds.width() - 200.0).abs() < EPS);
        assert!((bounds.height() - 200.0).abs() < EPS);
        // Vertex order: minX/minY, maxX/minY, maxX/maxY, minX/maxY.
        assert_eq!(zone.vertices[0].position(), Point::new(-200.0, 0.0));
        assert_eq!(zone.vertices[2].position(), Point::new(0.0, 200.0));
    }

    #[test]
    fn test_custom_furniture_creation_syncs_bounds() {
        let mut editor = Editor::new();
        assert_eq!(editor.place_furniture(FurnitureType::Custom), None);
        assert_eq!(editor.scene().tool, ToolKind::Furniture);
        assert_eq!(editor.scene().mode, AppMode::DrawingCustom);

        drag(&mut editor, (10.0, 20.0), (110.0, 80.0));
        let item = &editor.scene().furniture[0];
        assert!(item.is_custom());
        assert_eq!(item.center(), Point::new(60.0, 50.0));
        assert!((item.width - 100.0).abs() < EPS);
        assert!((item.height - 60.0).abs() < EPS);
        assert_eq!(editor.scene().tool, ToolKind::Select);
    }

    #[test]
    fn test_room_move_carries_furniture() {
        let mut editor = free_editor();
        let room_id = editor.store_mut().add_room(square_room(400.0));
        let bed_id = editor
            .store_mut()
            .add_furniture(Furniture::from_preset(FurnitureType::BedKing, Point::new(200.0, 200.0)));
        let outside = Point::new(612.5, 207.25);
        let chair_id = editor
            .store_mut()
            .add_furniture(Furniture::from_preset(FurnitureType::ChairDining, outside));
        let frames = editor.store().history().len();

        down(&mut editor, 20.0, 380.0);
        move_to(&mut editor, 100.0, 420.0, Modifiers::NONE);
        let children = editor.drag.as_ref().map(|d| d.children.clone()).unwrap_or_default();
        assert!(children.contains(&bed_id));
        assert!(!children.contains(&chair_id));
        up(&mut editor, 100.0, 420.0);

        let scene = editor.scene();
        assert_eq!(scene.selected_ids, vec![room_id]);
        assert_eq!(scene.shapes[0].vertices[0].position(), Point::new(80.0, 40.0));
        assert_eq!(scene.furniture[0].id, bed_id);
        assert_eq!(scene.furniture[0].center(), Point::new(280.0, 240.0));
        assert_eq!(scene.furniture[1].id, chair_id);
        assert_eq!(scene.furniture[1].center(), outside);
        assert_eq!(editor.store().history().len(), frames + 1);

        editor.store_mut().undo();
        assert_eq!(editor.scene().furniture[0].center(), Point::new(200.0, 200.0));
    }

    #[test]
    fn test_move_snaps_to_grid() {
        let mut editor = Editor::new();
        editor.store_mut().add_room(square_room(80.0));
        // Press snaps to (40, 40), release to (120, 40).
        drag(&mut editor, (45.0, 42.0), (118.0, 36.0));
        let first = editor.scene().shapes[0].vertices[0].position();
        assert_eq!(first, Point::new(80.0, 0.0));
    }

    #[test]
    fn test_click_without_drag_does_not_commit() {
        let mut editor = free_editor();
        editor.store_mut().add_room(square_room(100.0));
        let frames = editor.store().history().len();
        drag(&mut editor, (50.0, 50.0), (52.0, 51.0));
        assert_eq!(editor.scene().selected_ids.len(), 1);
        assert_eq!(editor.scene().shapes[0].vertices[0].position(), Point::ZERO);
        assert_eq!(editor.store().history().len(), frames);
    }

    #[test]
    fn test_door_attaches_near_wall() {
        let mut editor = Editor::new();
        let room_id = editor.store_mut().add_room(square_room(200.0));
        editor.set_tool(ToolKind::Door);
        down(&mut editor, 100.0, 5.0);
        up(&mut editor, 100.0, 5.0);

        let items = &editor.scene().wall_items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].attached_to, Some(room_id));
        assert!((items[0].y).abs() < EPS);
        assert!((items[0].x - 100.0).abs() < EPS);
    }

    #[test]
    fn test_door_takes_slanted_wall_angle() {
        let mut editor = free_editor();
        let (a, b) = (Point::new(0.0, 0.0), Point::new(300.0, 100.0));
        let room_id = editor
            .store_mut()
            .add_room(Room::from_points(&[a, b, Point::new(0.0, 300.0)]));
        editor.set_tool(ToolKind::Door);

        // Five units outside the middle of the slanted wall.
        let wall = b - a;
        let outward = Vec2::new(wall.y, -wall.x) / wall.hypot();
        let click = a.midpoint(b) + outward * 5.0;
        down(&mut editor, click.x, click.y);
        up(&mut editor, click.x, click.y);

        let items = &editor.scene().wall_items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].attached_to, Some(room_id));
        let expected = (b.y - a.y).atan2(b.x - a.x).to_degrees();
        assert!(expected > 1.0);
        assert!((items[0].rotation - expected).abs() < EPS);
        assert!((items[0].x - 150.0).abs() < 1e-6);
        assert!((items[0].y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_door_far_from_wall_is_not_placed() {
        let mut editor = Editor::new();
        editor.store_mut().add_room(square_room(200.0));
        editor.set_tool(ToolKind::Window);
        down(&mut editor, 100.0, 50.0);
        up(&mut editor, 100.0, 50.0);
        assert!(editor.scene().wall_items.is_empty());
    }

    #[test]
    fn test_hover_ghost_is_promoted() {
        let mut editor = Editor::new();
        editor.store_mut().add_room(square_room(200.0));
        editor.set_tool(ToolKind::Door);
        move_to(&mut editor, 195.0, 100.0, Modifiers::NONE);

        let ghost = editor.transient().ghost_wall_item.clone().unwrap();
        assert_eq!(editor.scene().mode, AppMode::PlacingWallItem);
        assert!((ghost.x - 200.0).abs() < EPS);

        down(&mut editor, 195.0, 100.0);
        up(&mut editor, 195.0, 100.0);
        let placed = &editor.scene().wall_items[0];
        assert_eq!(placed.center(), ghost.center());
        assert!((placed.rotation - 90.0).abs() < EPS);
        assert!(editor.transient().ghost_wall_item.is_none());
    }

    #[test]
    fn test_wall_item_move_reattaches_or_detaches() {
        let mut editor = free_editor();
        let room_id = editor.store_mut().add_room(square_room(200.0));
        editor.set_tool(ToolKind::Door);
        down(&mut editor, 100.0, 2.0);
        up(&mut editor, 100.0, 2.0);
        editor.set_tool(ToolKind::Select);

        // Slide along the top wall.
        drag(&mut editor, (100.0, 0.0), (150.0, 10.0));
        let door = &editor.scene().wall_items[0];
        assert_eq!(door.attached_to, Some(room_id));
        assert!((door.x - 150.0).abs() < EPS);
        assert!(door.y.abs() < EPS);

        // Pull it well away from every wall.
        drag(&mut editor, (150.0, 0.0), (150.0, -100.0));
        let door = &editor.scene().wall_items[0];
        assert_eq!(door.attached_to, None);
        assert!((door.y + 100.0).abs() < EPS);
    }

    #[test]
    fn test_marquee_selects_and_tiny_marquee_clears() {
        let mut editor = free_editor();
        let a = editor.store_mut().add_room(square_room(100.0));
        let mut far = square_room(100.0);
        far.translate(Vec2::new(500.0, 500.0));
        editor.store_mut().add_room(far);

        drag(&mut editor, (-10.0, -10.0), (150.0, 150.0));
        assert_eq!(editor.scene().selected_ids, vec![a]);
        assert!(editor.transient().marquee.is_none());

        drag(&mut editor, (-10.0, -10.0), (-12.0, -11.0));
        assert!(editor.scene().selected_ids.is_empty());
    }

    #[test]
    fn test_shift_click_toggles_selection() {
        let mut editor = free_editor();
        let a = editor.store_mut().add_room(square_room(100.0));
        let mut other = square_room(100.0);
        other.translate(Vec2::new(300.0, 0.0));
        let b = editor.store_mut().add_room(other);

        drag(&mut editor, (50.0, 50.0), (50.0, 50.0));
        let shift_click = |editor: &mut Editor, x: f64, y: f64| {
            for event in [
                PointerEvent::Down {
                    position: Point::new(x, y),
                    button: MouseButton::Left,
                    modifiers: Modifiers::SHIFT,
                },
                PointerEvent::Up {
                    position: Point::new(x, y),
                    button: MouseButton::Left,
                    modifiers: Modifiers::SHIFT,
                },
            ] {
                editor.handle_pointer(event);
            }
        };
        shift_click(&mut editor, 350.0, 50.0);
        assert_eq!(editor.scene().selected_ids, vec![a, b]);
        shift_click(&mut editor, 50.0, 50.0);
        assert_eq!(editor.scene().selected_ids, vec![b]);
    }

    #[test]
    fn test_vertex_click_toggles_fillet() {
        let mut editor = free_editor();
        let id = editor.store_mut().add_room(square_room(200.0));
        editor.store_mut().set_selected(vec![id]);
        let frames = editor.store().history().len();

        down(&mut editor, 1.0, 1.0);
        assert_eq!(editor.scene().mode, AppMode::VertexEdit);
        up(&mut editor, 1.0, 1.0);

        let vertex = &editor.scene().shapes[0].vertices[0];
        assert_eq!(vertex.kind, VertexKind::Fillet);
        assert_eq!(vertex.radius, Some(10.0));
        assert_eq!(editor.store().history().len(), frames + 1);
    }

    #[test]
    fn test_vertex_drag_aligns_with_other_vertices() {
        let mut editor = Editor::new();
        editor.store_mut().set_settings(Settings {
            grid_snap: false,
            ..Settings::default()
        });
        let id = editor.store_mut().add_room(square_room(200.0));
        editor.store_mut().set_selected(vec![id]);

        drag(&mut editor, (200.0, 200.0), (253.0, 197.0));
        let vertex = &editor.scene().shapes[0].vertices[2];
        assert_eq!(vertex.position(), Point::new(253.0, 200.0));
        assert_eq!(vertex.kind, VertexKind::Corner);
        assert!(editor.transient().guides.is_empty());
    }

    #[test]
    fn test_edge_midpoint_inserts_vertex() {
        let mut editor = free_editor();
        let id = editor.store_mut().add_room(square_room(200.0));
        editor.store_mut().set_selected(vec![id]);
        let frames = editor.store().history().len();

        down(&mut editor, 100.0, 2.0);
        up(&mut editor, 100.0, 2.0);

        let room = &editor.scene().shapes[0];
        assert_eq!(room.vertices.len(), 5);
        assert_eq!(room.vertices[1].position(), Point::new(100.0, 0.0));
        assert!((room.area() - 40_000.0).abs() < EPS);
        assert_eq!(editor.store().history().len(), frames + 1);
    }

    #[test]
    fn test_radius_drag_sets_fillet() {
        let mut editor = free_editor();
        let mut room = square_room(200.0);
        room.vertices[0].toggle_kind();
        let id = editor.store_mut().add_room(room);
        editor.store_mut().set_selected(vec![id]);

        let start = 20.0 / 2f64.sqrt();
        drag(&mut editor, (start, start), (40.0, 40.0));
        let vertex = &editor.scene().shapes[0].vertices[0];
        assert_eq!(vertex.kind, VertexKind::Fillet);
        assert!((vertex.radius.unwrap() - 80.0 / 2f64.sqrt()).abs() < 1e-6);

        // Dragging outward past the corner flattens it.
        let handle = (80.0 / 2f64.sqrt() + 10.0) / 2f64.sqrt();
        drag(&mut editor, (handle, handle), (-30.0, -30.0));
        let vertex = &editor.scene().shapes[0].vertices[0];
        assert_eq!(vertex.kind, VertexKind::Corner);
        assert_eq!(vertex.radius, None);
    }

    #[test]
    fn test_rotate_room_carries_children() {
        let mut editor = free_editor();
        let id = editor.store_mut().add_room(square_room(200.0));
        editor
            .store_mut()
            .add_furniture(Furniture::from_preset(FurnitureType::ChairDining, Point::new(150.0, 100.0)));
        editor.store_mut().set_selected(vec![id]);

        // Rotate handle sits above the top edge; sweep a quarter turn clockwise.
        drag(&mut editor, (100.0, -40.0), (240.0, 100.0));

        let scene = editor.scene();
        assert!((scene.shapes[0].rotation - 90.0).abs() < 1e-6);
        let chair = &scene.furniture[0];
        assert!((chair.rotation - 90.0).abs() < 1e-6);
        assert!((chair.x - 100.0).abs() < 1e-6);
        assert!((chair.y - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_furniture_right_handle() {
        let mut editor = free_editor();
        let id = editor
            .store_mut()
            .add_furniture(Furniture::from_preset(FurnitureType::BedKing, Point::new(200.0, 200.0)));
        editor.store_mut().set_selected(vec![id]);

        // King bed is 180 wide: the right handle is at x = 290.
        drag(&mut editor, (290.0, 200.0), (330.0, 210.0));
        let bed = &editor.scene().furniture[0];
        assert!((bed.width - 220.0).abs() < EPS);
        assert!((bed.height - 200.0).abs() < EPS);
        assert!((bed.x - 220.0).abs() < EPS);

        // Shrinking stops at the minimum size.
        drag(&mut editor, (330.0, 200.0), (0.0, 200.0));
        let bed = &editor.scene().furniture[0];
        assert!((bed.width - MIN_ITEM_SIZE).abs() < EPS);
    }

    #[test]
    fn test_pan_moves_camera() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Pan);
        drag(&mut editor, (100.0, 100.0), (150.0, 120.0));
        assert_eq!(editor.camera().offset, Vec2::new(50.0, 20.0));
        assert_eq!(editor.scene().mode, AppMode::Idle);
    }

    #[test]
    fn test_measure_records_long_measurements_only() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Measure);
        drag(&mut editor, (0.0, 0.0), (300.0, 400.0));
        drag(&mut editor, (0.0, 0.0), (3.0, 0.0));

        let measurements = &editor.scene().measurements;
        assert_eq!(measurements.len(), 1);
        assert!((measurements[0].distance - 500.0).abs() < EPS);
        assert!(!editor.store().can_undo());
    }

    #[test]
    fn test_freehand_commits_stroke() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Pencil);
        down(&mut editor, 0.0, 0.0);
        move_to(&mut editor, 50.0, 3.0, Modifiers::SHIFT);
        move_to(&mut editor, 60.0, 40.0, Modifiers::NONE);
        assert_eq!(editor.transient().pending_freehand.len(), 3);
        up(&mut editor, 60.0, 40.0);

        let drawing = &editor.scene().drawings[0];
        assert_eq!(drawing.points[1], Point::new(50.0, 0.0));
        assert_eq!(drawing.points.len(), 3);
        assert_eq!(editor.scene().tool, ToolKind::Select);
        assert!(editor.transient().pending_freehand.is_empty());
    }

    #[test]
    fn test_single_point_stroke_is_dropped() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Pencil);
        down(&mut editor, 10.0, 10.0);
        up(&mut editor, 10.0, 10.0);

        assert!(editor.scene().drawings.is_empty());
        assert_eq!(editor.scene().tool, ToolKind::Pencil);
        assert_eq!(editor.scene().mode, AppMode::Idle);
        assert!(editor.transient().pending_freehand.is_empty());
        assert!(!editor.store().can_undo());
    }

    #[test]
    fn test_text_tool_inserts_default_text() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Text);
        down(&mut editor, 30.0, 40.0);
        up(&mut editor, 30.0, 40.0);
        let text = &editor.scene().texts[0];
        assert_eq!(text.text, "New Text");
        assert_eq!(text.position(), Point::new(30.0, 40.0));
        assert_eq!(editor.scene().tool, ToolKind::Select);
    }

    #[test]
    fn test_place_template_at_view_center() {
        let mut editor = Editor::new();
        let id = editor.place_template(RoomTemplate::Rectangle);
        let room = &editor.scene().shapes[0];
        assert_eq!(room.id, id);
        let center = editor.camera().visible_center();
        assert!((room.center().x - center.x).abs() < EPS);
        assert!((room.center().y - center.y).abs() < EPS);
        assert_eq!(editor.scene().selected_ids, vec![id]);
    }

    #[test]
    fn test_scroll_zooms_camera() {
        let mut editor = Editor::new();
        editor.handle_pointer(PointerEvent::Scroll {
            position: Point::new(100.0, 100.0),
            delta: Vec2::new(0.0, -500.0),
        });
        assert!(editor.camera().zoom > 1.0);
    }

    #[test]
    fn test_undo_after_gesture_restores_deep_equal_state() {
        let mut editor = Editor::new();
        editor.set_tool(ToolKind::Room);
        drag(&mut editor, (0.0, 0.0), (120.0, 80.0));
        let after = editor.scene().snapshot();

        assert!(editor.store_mut().undo());
        assert!(editor.scene().shapes.is_empty());
        assert!(editor.store_mut().redo());
        assert_eq!(editor.scene().snapshot(), after);
    }
}
