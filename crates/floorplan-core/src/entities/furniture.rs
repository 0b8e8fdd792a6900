//! Furniture entity.

use super::{EntityId, Vertex, rotate_vertices, rotated_box_contains, translate_vertices, z_index};
use crate::catalog::FurnitureType;
use crate::geometry;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A furniture item centered at `(x, y)`.
///
/// Catalog items are plain rotated boxes. `Custom` items carry their own outline in
/// `vertices`, and `x, y, width, height` are kept equal to its bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Furniture {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub furniture_type: FurnitureType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<Vertex>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub z_index: i32,
}

impl Default for Furniture {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            furniture_type: FurnitureType::Custom,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            vertices: None,
            color: None,
            label: None,
            z_index: z_index::FURNITURE,
        }
    }
}

impl Furniture {
    /// Place a catalog item at its default size.
    pub fn from_preset(furniture_type: FurnitureType, center: Point) -> Self {
        let (width, height) = furniture_type.default_size();
        Self {
            furniture_type,
            x: center.x,
            y: center.y,
            width,
            height,
            ..Self::default()
        }
    }

    /// A custom item outlined by `vertices`.
    pub fn custom(vertices: Vec<Vertex>) -> Self {
        let mut item = Self {
            furniture_type: FurnitureType::Custom,
            vertices: Some(vertices),
            ..Self::default()
        };
        item.sync_bounds();
        item
    }

    pub fn is_custom(&self) -> bool {
        self.furniture_type == FurnitureType::Custom && self.vertices.is_some()
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Axis-aligned box around the unrotated footprint.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center(), (self.width, self.height))
    }

    /// Recompute `x, y, width, height` from the custom outline.
    pub fn sync_bounds(&mut self) {
        let Some(vertices) = self.vertices.as_ref() else {
            return;
        };
        if vertices.is_empty() {
            return;
        }
        let b = geometry::polygon_bounds(vertices);
        self.x = b.center().x;
        self.y = b.center().y;
        self.width = b.width();
        self.height = b.height();
    }

    /// Resize around the current center, scaling a custom outline to match.
    pub fn resize(&mut self, width: f64, height: f64) {
        let center = self.center();
        if let Some(vertices) = self.vertices.as_mut() {
            let sx = if self.width > 0.0 { width / self.width } else { 1.0 };
            let sy = if self.height > 0.0 { height / self.height } else { 1.0 };
            *vertices = geometry::scale_polygon(vertices, sx, sy, center);
        }
        self.width = width;
        self.height = height;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
        if let Some(vertices) = self.vertices.as_mut() {
            translate_vertices(vertices, delta);
        }
    }

    /// Rotate about an arbitrary center, turning the item by the same angle.
    pub fn rotate_about(&mut self, angle_deg: f64, center: Point) {
        let moved = geometry::rotate_point(self.center(), angle_deg, center);
        self.x = moved.x;
        self.y = moved.y;
        if let Some(vertices) = self.vertices.as_mut() {
            rotate_vertices(vertices, angle_deg, center);
        }
        self.rotation += angle_deg;
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.vertices.as_ref() {
            Some(vertices) if self.is_custom() => geometry::point_in_polygon(point, vertices),
            _ => rotated_box_contains(
                self.center(),
                self.width,
                self.height,
                self.rotation,
                point,
                tolerance,
            ),
        }
    }
}
