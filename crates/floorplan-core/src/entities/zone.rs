//! Zone entity: an advisory sub-area drawn over rooms.

use super::{EntityId, Vertex, corners_from_points, defaults, rotate_vertices, translate_vertices, z_index};
use crate::geometry;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Zone {
    pub id: EntityId,
    pub vertices: Vec<Vertex>,
    pub label: String,
    pub color: String,
    pub opacity: f64,
    pub rotation: f64,
    pub z_index: i32,
}

impl Default for Zone {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            vertices: Vec::new(),
            label: String::new(),
            color: defaults::ZONE_COLOR.to_string(),
            opacity: defaults::ZONE_OPACITY,
            rotation: 0.0,
            z_index: z_index::ZONE,
        }
    }
}

impl Zone {
    pub fn new(vertices: Vec<Vertex>, label: impl Into<String>) -> Self {
        Self {
            vertices,
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn from_points(points: &[Point]) -> Self {
        Self::new(corners_from_points(points), "")
    }

    pub fn bounds(&self) -> Rect {
        geometry::polygon_bounds(&self.vertices)
    }

    /// Bounding-box center, used for containment in rooms.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.vertices)
    }

    pub fn path(&self) -> BezPath {
        geometry::path_from_vertices(&self.vertices)
    }

    pub fn translate(&mut self, delta: Vec2) {
        translate_vertices(&mut self.vertices, delta);
    }

    pub fn rotate_about(&mut self, angle_deg: f64, center: Point) {
        rotate_vertices(&mut self.vertices, angle_deg, center);
        self.rotation += angle_deg;
    }
}
