//! Entity definitions for the floor plan.

mod drawing;
mod furniture;
mod measurement;
mod room;
mod text;
mod wall_item;
mod zone;

pub use drawing::Drawing;
pub use furniture::Furniture;
pub use measurement::Measurement;
pub use room::Room;
pub use text::{DEFAULT_TEXT, TextItem};
pub use wall_item::{WallItem, WallItemType};
pub use zone::Zone;

use crate::geometry::{self, Positioned};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier shared by every entity kind and by polygon vertices.
pub type EntityId = Uuid;

/// Default stroke and fill values for newly created entities.
pub mod defaults {
    pub const ROOM_COLOR: &str = "#ffffff";
    pub const ROOM_OPACITY: f64 = 0.9;
    pub const ZONE_COLOR: &str = "#b9fbc0";
    pub const ZONE_OPACITY: f64 = 0.4;
    pub const TEXT_COLOR: &str = "#1a1a1a";
    pub const TEXT_SIZE: f64 = 16.0;
    pub const STROKE_COLOR: &str = "#1a1a1a";
    pub const STROKE_WIDTH: f64 = 2.0;
    pub const DOOR_WIDTH: f64 = 80.0;
    pub const DOOR_HEIGHT: f64 = 20.0;
    pub const WINDOW_WIDTH: f64 = 120.0;
    pub const WINDOW_HEIGHT: f64 = 20.0;
    /// Radius given to a corner when it is promoted to a fillet.
    pub const FILLET_RADIUS: f64 = 10.0;
}

/// Default z-index tiers per entity kind.
pub mod z_index {
    pub const ROOM: i32 = 1;
    pub const FURNITURE: i32 = 2;
    pub const WALL_ITEM: i32 = 2;
    pub const TEXT: i32 = 3;
    pub const ZONE: i32 = 10;
}

/// Kind of entity, in the priority order used when searching collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Room,
    Zone,
    Furniture,
    WallItem,
    Text,
    Drawing,
}

impl EntityKind {
    /// All kinds, in search priority order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Room,
        EntityKind::Zone,
        EntityKind::Furniture,
        EntityKind::WallItem,
        EntityKind::Text,
        EntityKind::Drawing,
    ];
}

/// Corner style of a polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VertexKind {
    #[default]
    Corner,
    Fillet,
}

/// A polygon vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type", default)]
    pub kind: VertexKind,
    /// Stored fillet radius. Only meaningful for [`VertexKind::Fillet`]; never
    /// truncated on write, see [`geometry::effective_radius`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Vertex {
    /// A sharp corner.
    pub fn corner(x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            kind: VertexKind::Corner,
            radius: None,
        }
    }

    /// A rounded corner with the given stored radius.
    pub fn fillet(x: f64, y: f64, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            kind: VertexKind::Fillet,
            radius: Some(radius),
        }
    }

    /// Switch between corner and fillet.
    pub fn toggle_kind(&mut self) {
        match self.kind {
            VertexKind::Corner => {
                self.kind = VertexKind::Fillet;
                self.radius = Some(defaults::FILLET_RADIUS);
            }
            VertexKind::Fillet => {
                self.kind = VertexKind::Corner;
                self.radius = None;
            }
        }
    }
}

/// Build corner vertices from plain points.
pub fn corners_from_points(points: &[Point]) -> Vec<Vertex> {
    points.iter().map(|p| Vertex::corner(p.x, p.y)).collect()
}

/// Give every vertex a fresh id.
pub(crate) fn regenerate_vertex_ids(vertices: &mut [Vertex]) {
    for v in vertices {
        v.id = Uuid::new_v4();
    }
}

/// Translate vertices in place.
pub(crate) fn translate_vertices(vertices: &mut [Vertex], delta: Vec2) {
    for v in vertices {
        v.x += delta.x;
        v.y += delta.y;
    }
}

/// Rotate vertices in place about `center`.
pub(crate) fn rotate_vertices(vertices: &mut Vec<Vertex>, angle_deg: f64, center: Point) {
    *vertices = geometry::rotate_polygon(vertices, angle_deg, center);
}

/// Any entity in the scene, tagged by kind.
///
/// Used where heterogeneous entities travel together (clipboard, hit testing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Entity {
    Room(Room),
    Zone(Zone),
    Furniture(Furniture),
    WallItem(WallItem),
    Text(TextItem),
    Drawing(Drawing),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Room(r) => r.id,
            Entity::Zone(z) => z.id,
            Entity::Furniture(f) => f.id,
            Entity::WallItem(w) => w.id,
            Entity::Text(t) => t.id,
            Entity::Drawing(d) => d.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Room(_) => EntityKind::Room,
            Entity::Zone(_) => EntityKind::Zone,
            Entity::Furniture(_) => EntityKind::Furniture,
            Entity::WallItem(_) => EntityKind::WallItem,
            Entity::Text(_) => EntityKind::Text,
            Entity::Drawing(_) => EntityKind::Drawing,
        }
    }

    /// Move the entity rigidly by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Entity::Room(r) => r.translate(delta),
            Entity::Zone(z) => z.translate(delta),
            Entity::Furniture(f) => f.translate(delta),
            Entity::WallItem(w) => w.translate(delta),
            Entity::Text(t) => t.translate(delta),
            Entity::Drawing(d) => d.translate(delta),
        }
    }

    /// Assign a new entity id and new vertex ids.
    pub fn regenerate_ids(&mut self) {
        match self {
            Entity::Room(r) => {
                r.id = Uuid::new_v4();
                regenerate_vertex_ids(&mut r.vertices);
            }
            Entity::Zone(z) => {
                z.id = Uuid::new_v4();
                regenerate_vertex_ids(&mut z.vertices);
            }
            Entity::Furniture(f) => {
                f.id = Uuid::new_v4();
                if let Some(vertices) = f.vertices.as_mut() {
                    regenerate_vertex_ids(vertices);
                }
            }
            Entity::WallItem(w) => w.id = Uuid::new_v4(),
            Entity::Text(t) => t.id = Uuid::new_v4(),
            Entity::Drawing(d) => d.id = Uuid::new_v4(),
        }
    }

    /// Points used for marquee hit testing: vertices for polygons, anchors for
    /// placed items and every sample of a freehand path.
    pub fn anchor_points(&self) -> Vec<Point> {
        match self {
            Entity::Room(r) => r.vertices.iter().map(Positioned::position).collect(),
            Entity::Zone(z) => z.vertices.iter().map(Positioned::position).collect(),
            Entity::Furniture(f) => vec![f.center()],
            Entity::WallItem(w) => vec![w.center()],
            Entity::Text(t) => vec![t.position()],
            Entity::Drawing(d) => d.points.clone(),
        }
    }

    /// Axis-aligned bounds of the entity.
    pub fn bounds(&self) -> Rect {
        match self {
            Entity::Room(r) => r.bounds(),
            Entity::Zone(z) => z.bounds(),
            Entity::Furniture(f) => f.bounds(),
            Entity::WallItem(w) => w.bounds(),
            Entity::Text(t) => t.bounds(),
            Entity::Drawing(d) => d.bounds(),
        }
    }

    pub fn z_index(&self) -> i32 {
        match self {
            Entity::Room(r) => r.z_index,
            Entity::Zone(z) => z.z_index,
            Entity::Furniture(f) => f.z_index,
            Entity::WallItem(w) => w.z_index,
            Entity::Text(t) => t.z_index,
            Entity::Drawing(d) => d.z_index,
        }
    }

    /// Whether `point` hits the entity, with `tolerance` for thin shapes.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Entity::Room(r) => geometry::point_in_polygon(point, &r.vertices),
            Entity::Zone(z) => geometry::point_in_polygon(point, &z.vertices),
            Entity::Furniture(f) => f.hit_test(point, tolerance),
            Entity::WallItem(w) => w.hit_test(point, tolerance),
            Entity::Text(t) => t.bounds().inflate(tolerance, tolerance).contains(point),
            Entity::Drawing(d) => d.hit_test(point, tolerance),
        }
    }
}

/// Whether `point` lies inside a `width`×`height` box centered at `center` and
/// rotated by `rotation` degrees.
pub(crate) fn rotated_box_contains(
    center: Point,
    width: f64,
    height: f64,
    rotation: f64,
    point: Point,
    tolerance: f64,
) -> bool {
    let local = geometry::rotate_point(point, -rotation, center) - center;
    local.x.abs() <= width / 2.0 + tolerance && local.y.abs() <= height / 2.0 + tolerance
}
