//! Freehand pencil strokes.

use super::{EntityId, defaults, z_index};
use crate::geometry;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Drawing {
    pub id: EntityId,
    pub points: Vec<Point>,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub z_index: i32,
}

impl Default for Drawing {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            points: Vec::new(),
            stroke_color: defaults::STROKE_COLOR.to_string(),
            stroke_width: defaults::STROKE_WIDTH,
            z_index: z_index::ROOM,
        }
    }
}

impl Drawing {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> Rect {
        geometry::polygon_bounds(&self.points)
    }

    /// Open polyline through the samples.
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
        }
        path
    }

    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }

    pub fn rotate_about(&mut self, angle_deg: f64, center: Point) {
        self.points = geometry::rotate_polygon(&self.points, angle_deg, center);
    }

    /// Whether `point` is within half the stroke width plus `tolerance` of any segment.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = self.stroke_width / 2.0 + tolerance;
        match self.points.as_slice() {
            [] => false,
            [only] => only.distance(point) <= reach,
            points => points
                .windows(2)
                .any(|w| geometry::point_to_segment_dist(point, w[0], w[1]) <= reach),
        }
    }
}
