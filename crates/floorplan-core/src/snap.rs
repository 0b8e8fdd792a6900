//! Snap functionality for aligning points and moving elements.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Grid size for snapping (matches the visual grid).
pub const GRID_SIZE: f64 = 40.0;

/// Distance within which element edges snap together while moving.
pub const SNAP_THRESHOLD: f64 = 15.0;

/// Distance within which doors and windows snap onto a wall when placed.
pub const WALL_SNAP_THRESHOLD: f64 = 30.0;

/// Distance within which a dragged door or window re-attaches to a wall.
pub const WALL_ITEM_MOVE_THRESHOLD: f64 = 40.0;

/// Distance within which a dragged vertex aligns with other vertices.
pub const VERTEX_ALIGN_THRESHOLD: f64 = 10.0;

/// How far vertex alignment guides extend past the two aligned points.
const ALIGN_GUIDE_OVERHANG: f64 = 50.0;

/// Axis a guide line marks. `X` guides are vertical lines at a fixed x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Alignment guide shown while snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub start: Point,
    pub end: Point,
    pub axis: Axis,
}

impl GuideLine {
    /// Vertical guide at `x` spanning `span` top to bottom.
    fn vertical(x: f64, span: Rect) -> Self {
        Self {
            start: Point::new(x, span.y0),
            end: Point::new(x, span.y1),
            axis: Axis::X,
        }
    }

    /// Horizontal guide at `y` spanning `span` left to right.
    fn horizontal(y: f64, span: Rect) -> Self {
        Self {
            start: Point::new(span.x0, y),
            end: Point::new(span.x1, y),
            axis: Axis::Y,
        }
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    if grid_size <= 0.0 {
        return SnapResult::none(point);
    }
    let snapped_x = (point.x / grid_size).round() * grid_size;
    let snapped_y = (point.y / grid_size).round() * grid_size;

    SnapResult {
        point: Point::new(snapped_x, snapped_y),
        snapped_x: true,
        snapped_y: true,
    }
}

/// Corrected move delta with the guides that caused the correction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeSnap {
    pub delta: Vec2,
    pub guides: Vec<GuideLine>,
}

/// Closest reference within `threshold` of any candidate, per axis.
///
/// Returns the correction to apply and the matched reference value. Only a strictly
/// smaller difference replaces the current best.
fn closest_alignment(
    candidates: &[f64],
    references: impl Iterator<Item = f64>,
    threshold: f64,
) -> Option<(f64, f64)> {
    let mut best_diff = threshold;
    let mut best = None;
    for reference in references {
        for &candidate in candidates {
            let diff = (candidate - reference).abs();
            if diff < best_diff {
                best_diff = diff;
                best = Some((reference - candidate, reference));
            }
        }
    }
    best
}

/// Snap a moving box's edges and center to the edges and centers of `targets`.
///
/// `delta` is the proposed move. The result replaces it with a delta that lands the
/// closest edge exactly on a target, per axis, with guides spanning `viewport`.
pub fn edge_snap(
    moving: Rect,
    delta: Vec2,
    targets: &[Rect],
    threshold: f64,
    viewport: Rect,
) -> EdgeSnap {
    let moved = moving + delta;
    let mut result = EdgeSnap {
        delta,
        guides: Vec::new(),
    };

    let xs = [moved.x0, moved.x1, moved.center().x];
    let target_xs = targets.iter().flat_map(|t| [t.x0, t.x1, t.center().x]);
    if let Some((correction, x)) = closest_alignment(&xs, target_xs, threshold) {
        result.delta.x += correction;
        result.guides.push(GuideLine::vertical(x, viewport));
    }

    let ys = [moved.y0, moved.y1, moved.center().y];
    let target_ys = targets.iter().flat_map(|t| [t.y0, t.y1, t.center().y]);
    if let Some((correction, y)) = closest_alignment(&ys, target_ys, threshold) {
        result.delta.y += correction;
        result.guides.push(GuideLine::horizontal(y, viewport));
    }

    result
}

/// Point aligned to other points with its guides.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAlign {
    pub point: Point,
    pub guides: Vec<GuideLine>,
}

/// Align a dragged vertex with the closest other vertex on each axis.
pub fn vertex_align(point: Point, others: &[Point], threshold: f64) -> VertexAlign {
    let mut best_x: Option<Point> = None;
    let mut best_y: Option<Point> = None;
    let (mut min_dx, mut min_dy) = (threshold, threshold);
    for other in others {
        let dx = (other.x - point.x).abs();
        if dx < min_dx {
            min_dx = dx;
            best_x = Some(*other);
        }
        let dy = (other.y - point.y).abs();
        if dy < min_dy {
            min_dy = dy;
            best_y = Some(*other);
        }
    }

    let aligned = Point::new(
        best_x.map_or(point.x, |o| o.x),
        best_y.map_or(point.y, |o| o.y),
    );
    let mut guides = Vec::new();
    if let Some(other) = best_x {
        guides.push(GuideLine {
            start: Point::new(aligned.x, other.y.min(aligned.y) - ALIGN_GUIDE_OVERHANG),
            end: Point::new(aligned.x, other.y.max(aligned.y) + ALIGN_GUIDE_OVERHANG),
            axis: Axis::X,
        });
    }
    if let Some(other) = best_y {
        guides.push(GuideLine {
            start: Point::new(other.x.min(aligned.x) - ALIGN_GUIDE_OVERHANG, aligned.y),
            end: Point::new(other.x.max(aligned.x) + ALIGN_GUIDE_OVERHANG, aligned.y),
            axis: Axis::Y,
        });
    }

    VertexAlign {
        point: aligned,
        guides,
    }
}
