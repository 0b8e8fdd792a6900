//! Room entity.

use super::{EntityId, Vertex, corners_from_points, defaults, rotate_vertices, translate_vertices, z_index};
use crate::geometry::{self, Positioned};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A closed room polygon with optional wall thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Room {
    pub id: EntityId,
    /// Outline vertices. The last vertex connects back to the first.
    pub vertices: Vec<Vertex>,
    pub label: String,
    pub color: String,
    pub opacity: f64,
    /// Accumulated rotation in degrees. The vertices are already rotated.
    pub rotation: f64,
    /// Wall thickness. Zero means the outline is drawn as a single line.
    pub wall_thickness: f64,
    pub z_index: i32,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            vertices: Vec::new(),
            label: String::new(),
            color: defaults::ROOM_COLOR.to_string(),
            opacity: defaults::ROOM_OPACITY,
            rotation: 0.0,
            wall_thickness: 0.0,
            z_index: z_index::ROOM,
        }
    }
}

impl Room {
    /// Create a room from vertices.
    pub fn new(vertices: Vec<Vertex>, label: impl Into<String>) -> Self {
        Self {
            vertices,
            label: label.into(),
            ..Self::default()
        }
    }

    /// Create a room with corner vertices at the given points.
    pub fn from_points(points: &[Point]) -> Self {
        Self::new(corners_from_points(points), "")
    }

    /// Vertex positions.
    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().map(Positioned::position).collect()
    }

    pub fn bounds(&self) -> Rect {
        geometry::polygon_bounds(&self.vertices)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.vertices)
    }

    pub fn perimeter(&self) -> f64 {
        geometry::polygon_perimeter(&self.vertices)
    }

    /// Outline path including fillets.
    pub fn path(&self) -> BezPath {
        geometry::path_from_vertices(&self.vertices)
    }

    /// Inner floor boundary when the room has walls.
    pub fn inner_polygon(&self) -> Option<Vec<Point>> {
        geometry::inset_polygon(&self.points(), self.wall_thickness)
    }

    /// Floor area inside the walls, or the full area when there are none.
    pub fn inner_area(&self) -> f64 {
        match self.inner_polygon() {
            Some(inner) => geometry::polygon_area(&inner),
            None if self.wall_thickness <= 0.0 => self.area(),
            None => 0.0,
        }
    }

    /// Set wall thickness, clamping negatives to zero.
    pub fn set_wall_thickness(&mut self, thickness: f64) {
        self.wall_thickness = thickness.max(0.0);
    }

    pub fn contains(&self, point: Point) -> bool {
        geometry::point_in_polygon(point, &self.vertices)
    }

    pub fn translate(&mut self, delta: Vec2) {
        translate_vertices(&mut self.vertices, delta);
    }

    /// Rotate the outline about `center` and accumulate the rotation.
    pub fn rotate_about(&mut self, angle_deg: f64, center: Point) {
        rotate_vertices(&mut self.vertices, angle_deg, center);
        self.rotation += angle_deg;
    }
}
