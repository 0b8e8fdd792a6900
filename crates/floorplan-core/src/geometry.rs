//! Geometry kernel.
//!
//! Stateless functions over points and polygon vertices. Nothing in here fails:
//! degenerate input produces degenerate (but valid) output such as zero bounds,
//! zero area or an empty path.

use crate::entities::{EntityId, Room, Vertex, VertexKind};
use kurbo::{BezPath, Point, Rect, Vec2};

/// Fillets whose effective radius falls below this are drawn as sharp corners.
pub const MIN_FILLET_RADIUS: f64 = 1.0;

/// Anything with a planar position that can be moved without losing its identity.
pub trait Positioned: Clone {
    /// Current position.
    fn position(&self) -> Point;

    /// Copy of `self` placed at `p`, keeping every other field.
    fn with_position(&self, p: Point) -> Self;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }

    fn with_position(&self, p: Point) -> Self {
        p
    }
}

impl Positioned for Vertex {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn with_position(&self, p: Point) -> Self {
        Self {
            x: p.x,
            y: p.y,
            ..self.clone()
        }
    }
}

/// Unit vector in the direction of `v`, or zero for a zero vector.
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len == 0.0 { Vec2::ZERO } else { v / len }
}

/// Midpoint of two points.
pub fn midpoint(a: Point, b: Point) -> Point {
    a.midpoint(b)
}

/// Wrap-around neighbours of `index` in a closed polygon.
fn neighbours<P: Positioned>(items: &[P], index: usize) -> (Point, Point) {
    let n = items.len();
    let prev = items[(index + n - 1) % n].position();
    let next = items[(index + 1) % n].position();
    (prev, next)
}

/// Fillet radius actually used for the vertex at `index`.
///
/// The stored radius is clamped to half the shorter adjacent edge, so it shrinks
/// when a neighbour is dragged close and recovers when it is dragged away again.
pub fn effective_radius(vertices: &[Vertex], index: usize) -> f64 {
    let Some(vertex) = vertices.get(index) else {
        return 0.0;
    };
    if vertex.kind == VertexKind::Corner {
        return 0.0;
    }
    let curr = vertex.position();
    let (prev, next) = neighbours(vertices, index);
    let max_r = curr.distance(prev).min(curr.distance(next)) / 2.0;
    vertex.radius.unwrap_or(0.0).max(0.0).min(max_r)
}

/// Build the closed outline of a polygon, rounding fillet vertices with quadratic curves.
pub fn path_from_vertices(vertices: &[Vertex]) -> BezPath {
    let mut path = BezPath::new();
    if vertices.is_empty() {
        return path;
    }

    for (i, vertex) in vertices.iter().enumerate() {
        let curr = vertex.position();
        let r = effective_radius(vertices, i);

        if vertex.kind == VertexKind::Corner || r < MIN_FILLET_RADIUS {
            if i == 0 {
                path.move_to(curr);
            } else {
                path.line_to(curr);
            }
            continue;
        }

        let (prev, next) = neighbours(vertices, i);
        let start = curr + normalize(prev - curr) * r;
        let end = curr + normalize(next - curr) * r;
        if i == 0 {
            path.move_to(start);
        } else {
            path.line_to(start);
        }
        path.quad_to(curr, end);
    }

    path.close_path();
    path
}

/// Signed shoelace area. Positive for clockwise winding on a y-down canvas.
pub fn signed_area<P: Positioned>(points: &[P]) -> f64 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i].position();
        let b = points[(i + 1) % n].position();
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Absolute polygon area.
pub fn polygon_area<P: Positioned>(points: &[P]) -> f64 {
    signed_area(points).abs()
}

/// Perimeter of the closed polygon.
pub fn polygon_perimeter<P: Positioned>(points: &[P]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].position().distance(points[(i + 1) % n].position()))
        .sum()
}

/// Axis-aligned bounds of a point list. Empty input yields `Rect::ZERO`.
pub fn polygon_bounds<P: Positioned>(points: &[P]) -> Rect {
    let mut iter = points.iter().map(Positioned::position);
    let Some(first) = iter.next() else {
        return Rect::ZERO;
    };
    iter.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
}

/// Rotate a single point about `center` by `angle_deg` (clockwise on a y-down canvas).
pub fn rotate_point(p: Point, angle_deg: f64, center: Point) -> Point {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let d = p - center;
    Point::new(
        center.x + d.x * cos - d.y * sin,
        center.y + d.x * sin + d.y * cos,
    )
}

/// Rotate every item about `center`. Ids and vertex kinds are preserved.
pub fn rotate_polygon<P: Positioned>(items: &[P], angle_deg: f64, center: Point) -> Vec<P> {
    items
        .iter()
        .map(|item| item.with_position(rotate_point(item.position(), angle_deg, center)))
        .collect()
}

/// Scale every item about `center`. Ids and vertex kinds are preserved.
pub fn scale_polygon<P: Positioned>(items: &[P], sx: f64, sy: f64, center: Point) -> Vec<P> {
    items
        .iter()
        .map(|item| {
            let p = item.position();
            item.with_position(Point::new(
                center.x + (p.x - center.x) * sx,
                center.y + (p.y - center.y) * sy,
            ))
        })
        .collect()
}

/// Translate every item by `delta`.
pub fn translate_polygon<P: Positioned>(items: &[P], delta: Vec2) -> Vec<P> {
    items
        .iter()
        .map(|item| item.with_position(item.position() + delta))
        .collect()
}

/// Unit bisector of the corner at `curr`, pointing between the two edges.
///
/// Falls back to the perpendicular of the incoming edge when the edges are collinear.
pub fn corner_bisector(prev: Point, curr: Point, next: Point) -> Vec2 {
    let v1 = normalize(prev - curr);
    let v2 = normalize(next - curr);
    let sum = v1 + v2;
    if sum.x.abs() < 0.001 && sum.y.abs() < 0.001 {
        return Vec2::new(-v1.y, v1.x);
    }
    normalize(sum)
}

/// Project `p` onto segment `ab`. Returns the projected point and its clamped parameter.
pub fn project_point_on_segment(p: Point, a: Point, b: Point) -> (Point, f64) {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        return (a, 0.0);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}

/// Distance from `p` to segment `ab`.
pub fn point_to_segment_dist(p: Point, a: Point, b: Point) -> f64 {
    let (proj, _) = project_point_on_segment(p, a, b);
    p.distance(proj)
}

/// Even-odd ray casting containment test.
pub fn point_in_polygon<P: Positioned>(point: Point, polygon: &[P]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i].position();
        let pj = polygon[j].position();
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Offset a closed polygon by `offset` using per-vertex miters.
///
/// Positive offsets grow the polygon and negative offsets shrink it, independent of
/// winding. Inputs with fewer than three points are returned unchanged.
pub fn offset_polygon(points: &[Point], offset: f64) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    // Left-hand normals point outward for negative signed area; flip otherwise.
    let outward = if signed_area(points) >= 0.0 { -1.0 } else { 1.0 };

    (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];

            let v1 = normalize(curr - prev);
            let v2 = normalize(next - curr);
            let n1 = Vec2::new(-v1.y, v1.x) * outward;
            let n2 = Vec2::new(-v2.y, v2.x) * outward;

            let bisector = normalize(n1 + n2);
            let dot_n = bisector.dot(n1);
            if dot_n.abs() < 0.001 {
                curr + n1 * offset
            } else {
                curr + bisector * (offset / dot_n)
            }
        })
        .collect()
}

/// Inner boundary of a wall of the given thickness.
///
/// Returns `None` when the inset would collapse or flip the polygon.
pub fn inset_polygon(points: &[Point], thickness: f64) -> Option<Vec<Point>> {
    if points.len() < 3 || thickness <= 0.0 {
        return None;
    }
    let original = signed_area(points);
    let inset = offset_polygon(points, -thickness);
    let area = signed_area(&inset);
    let flipped = original.signum() != area.signum();
    let grew = area.abs() >= original.abs();
    if area.abs() < f64::EPSILON || flipped || grew {
        return None;
    }
    Some(inset)
}

/// Wall segment matched by [`nearest_wall_segment`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallMatch {
    /// Projection of the query point onto the wall.
    pub point: Point,
    /// Wall direction in degrees.
    pub angle: f64,
    /// Room owning the wall.
    pub room_id: EntityId,
    /// Index of the wall's first vertex within the room.
    pub wall_index: usize,
    pub wall_start: Point,
    pub wall_end: Point,
}

/// Closest room wall to `point` within `threshold`.
///
/// Walls are scanned in scene order and only a strictly closer wall replaces the
/// current best, so repeated queries at the same point always agree.
pub fn nearest_wall_segment(point: Point, rooms: &[Room], threshold: f64) -> Option<WallMatch> {
    let mut best_dist = threshold;
    let mut best = None;

    for room in rooms {
        let n = room.vertices.len();
        for i in 0..n {
            let a = room.vertices[i].position();
            let b = room.vertices[(i + 1) % n].position();
            let (proj, _) = project_point_on_segment(point, a, b);
            let d = point.distance(proj);
            if d < best_dist {
                best_dist = d;
                best = Some(WallMatch {
                    point: proj,
                    angle: (b.y - a.y).atan2(b.x - a.x).to_degrees(),
                    room_id: room.id,
                    wall_index: i,
                    wall_start: a,
                    wall_end: b,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn rect_points(w: f64, h: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ]
    }

    fn fillet_vertices(points: &[Point], radius: f64) -> Vec<Vertex> {
        points
            .iter()
            .map(|p| Vertex::fillet(p.x, p.y, radius))
            .collect()
    }

    #[test]
    fn test_effective_radius_clamped_to_half_shorter_edge() {
        let pts = rect_points(100.0, 40.0);
        for radius in [0.0, 5.0, 19.0, 20.0, 21.0, 80.0, 1000.0] {
            let verts = fillet_vertices(&pts, radius);
            for i in 0..verts.len() {
                let r = effective_radius(&verts, i);
                assert!(r <= 20.0 + EPS, "radius {} gave {}", radius, r);
                assert!((r - radius.min(20.0)).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_stored_radius_survives_clamp() {
        let mut verts = fillet_vertices(&rect_points(100.0, 100.0), 30.0);
        verts[1].x = 10.0;
        assert!((effective_radius(&verts, 0) - 5.0).abs() < EPS);
        assert_eq!(verts[0].radius, Some(30.0));

        verts[1].x = 100.0;
        assert!((effective_radius(&verts, 0) - 30.0).abs() < EPS);
    }

    #[test]
    fn test_corner_vertex_has_no_radius() {
        let verts: Vec<Vertex> = rect_points(50.0, 50.0)
            .iter()
            .map(|p| Vertex::corner(p.x, p.y))
            .collect();
        assert_eq!(effective_radius(&verts, 2), 0.0);
    }

    #[test]
    fn test_path_from_corner_vertices() {
        use kurbo::PathEl;
        let verts: Vec<Vertex> = rect_points(10.0, 10.0)
            .iter()
            .map(|p| Vertex::corner(p.x, p.y))
            .collect();
        let path = path_from_vertices(&verts);
        let els = path.elements();
        assert_eq!(els.len(), 5);
        assert!(matches!(els[0], PathEl::MoveTo(p) if p == Point::new(0.0, 0.0)));
        assert!(matches!(els[4], PathEl::ClosePath));
    }

    #[test]
    fn test_path_from_fillet_vertices() {
        use kurbo::PathEl;
        let verts = fillet_vertices(&rect_points(100.0, 100.0), 10.0);
        let path = path_from_vertices(&verts);
        let quads: Vec<_> = path
            .elements()
            .iter()
            .filter_map(|el| match el {
                PathEl::QuadTo(c, end) => Some((*c, *end)),
                _ => None,
            })
            .collect();
        assert_eq!(quads.len(), 4);
        // First corner: control at the vertex, ends 10 units along the outgoing edge.
        assert_eq!(quads[0].0, Point::new(0.0, 0.0));
        assert!((quads[0].1.x - 10.0).abs() < EPS);
        assert!(quads[0].1.y.abs() < EPS);
        match path.elements()[0] {
            PathEl::MoveTo(p) => {
                assert!(p.x.abs() < EPS);
                assert!((p.y - 10.0).abs() < EPS);
            }
            _ => panic!("path should start with move_to"),
        }
    }

    #[test]
    fn test_tiny_fillet_is_drawn_sharp() {
        use kurbo::PathEl;
        let verts = fillet_vertices(&rect_points(100.0, 100.0), 0.5);
        let path = path_from_vertices(&verts);
        assert!(!path.elements().iter().any(|el| matches!(el, PathEl::QuadTo(..))));
    }

    #[test]
    fn test_empty_path() {
        assert!(path_from_vertices(&[]).elements().is_empty());
    }

    #[test]
    fn test_area_and_perimeter() {
        let pts = rect_points(200.0, 150.0);
        assert!((polygon_area(&pts) - 30000.0).abs() < EPS);
        assert!((polygon_perimeter(&pts) - 700.0).abs() < EPS);
        assert_eq!(polygon_area::<Point>(&[]), 0.0);
    }

    #[test]
    fn test_area_perimeter_invariant_under_rigid_motion() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(400.0, 0.0),
            Point::new(400.0, 150.0),
            Point::new(200.0, 150.0),
            Point::new(200.0, 300.0),
            Point::new(0.0, 300.0),
        ];
        let area = polygon_area(&pts);
        let perimeter = polygon_perimeter(&pts);
        for angle in [13.0, 90.0, 137.5, -60.0] {
            let moved = translate_polygon(
                &rotate_polygon(&pts, angle, Point::new(55.0, -20.0)),
                Vec2::new(-310.0, 42.0),
            );
            assert!((polygon_area(&moved) - area).abs() < 1e-6);
            assert!((polygon_perimeter(&moved) - perimeter).abs() < 1e-6);
        }
    }

    #[test]
    fn test_rotate_round_trip_preserves_vertices() {
        let verts = fillet_vertices(&rect_points(120.0, 80.0), 12.0);
        let center = Point::new(33.0, 71.0);
        let back = rotate_polygon(&rotate_polygon(&verts, 47.0, center), -47.0, center);
        for (a, b) in verts.iter().zip(&back) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.radius, b.radius);
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scale_polygon() {
        let pts = rect_points(10.0, 10.0);
        let scaled = scale_polygon(&pts, 2.0, 3.0, Point::new(5.0, 5.0));
        assert_eq!(scaled[0], Point::new(-5.0, -10.0));
        assert_eq!(scaled[2], Point::new(15.0, 20.0));
    }

    #[test]
    fn test_bounds() {
        let b = polygon_bounds(&rect_points(200.0, 150.0));
        assert_eq!(b, Rect::new(0.0, 0.0, 200.0, 150.0));
        assert_eq!(b.center(), Point::new(100.0, 75.0));
        assert_eq!(polygon_bounds::<Point>(&[]), Rect::ZERO);
    }

    #[test]
    fn test_offset_inset_rectangle_area() {
        let pts = rect_points(200.0, 150.0);
        let inner = offset_polygon(&pts, -10.0);
        assert!((polygon_area(&inner) - 23400.0).abs() < 1e-6);

        // Same answer for the opposite winding.
        let mut reversed = pts.clone();
        reversed.reverse();
        let inner = offset_polygon(&reversed, -10.0);
        assert!((polygon_area(&inner) - 23400.0).abs() < 1e-6);
    }

    #[test]
    fn test_offset_outset() {
        let inner = offset_polygon(&rect_points(100.0, 100.0), 5.0);
        assert!((polygon_area(&inner) - 110.0 * 110.0).abs() < 1e-6);
    }

    #[test]
    fn test_offset_collinear_vertex_uses_normal() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ];
        let inner = offset_polygon(&pts, -10.0);
        assert!((inner[1].x - 50.0).abs() < EPS);
        assert!((inner[1].y - 10.0).abs() < EPS);
    }

    #[test]
    fn test_offset_short_input_unchanged() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        assert_eq!(offset_polygon(&pts, -5.0), pts);
    }

    #[test]
    fn test_inset_rejects_inversion() {
        let pts = rect_points(20.0, 20.0);
        assert!(inset_polygon(&pts, 5.0).is_some());
        assert!(inset_polygon(&pts, 10.0).is_none());
        assert!(inset_polygon(&pts, 15.0).is_none());
        assert!(inset_polygon(&pts, 0.0).is_none());
    }

    #[test]
    fn test_project_point_on_segment() {
        let (p, t) = project_point_on_segment(
            Point::new(5.0, 5.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert_eq!(p, Point::new(5.0, 0.0));
        assert!((t - 0.5).abs() < EPS);

        let (p, t) = project_point_on_segment(
            Point::new(-5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert_eq!(p, Point::new(0.0, 0.0));
        assert_eq!(t, 0.0);

        let a = Point::new(3.0, 3.0);
        assert_eq!(project_point_on_segment(Point::new(9.0, 9.0), a, a), (a, 0.0));
    }

    #[test]
    fn test_corner_bisector() {
        let b = corner_bisector(
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!((b.x - s).abs() < EPS);
        assert!((b.y - s).abs() < EPS);

        let straight = corner_bisector(
            Point::new(-10.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!(straight.x.abs() < EPS);
        assert!((straight.y.abs() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_point_in_polygon() {
        let l_shape = vec![
            Point::new(0.0, 0.0),
            Point::new(400.0, 0.0),
            Point::new(400.0, 150.0),
            Point::new(200.0, 150.0),
            Point::new(200.0, 300.0),
            Point::new(0.0, 300.0),
        ];
        assert!(point_in_polygon(Point::new(100.0, 250.0), &l_shape));
        assert!(point_in_polygon(Point::new(300.0, 100.0), &l_shape));
        assert!(!point_in_polygon(Point::new(300.0, 250.0), &l_shape));
        assert!(!point_in_polygon::<Point>(Point::new(0.0, 0.0), &[]));
    }

    #[test]
    fn test_nearest_wall_segment() {
        let room = Room::from_points(&rect_points(200.0, 150.0));
        let rooms = vec![room.clone()];

        let hit = nearest_wall_segment(Point::new(100.0, 5.0), &rooms, 30.0).expect("wall");
        assert_eq!(hit.room_id, room.id);
        assert_eq!(hit.point, Point::new(100.0, 0.0));
        assert!(hit.angle.abs() < EPS);
        assert_eq!(hit.wall_index, 0);

        let right = nearest_wall_segment(Point::new(195.0, 70.0), &rooms, 30.0).expect("wall");
        assert!((right.angle - 90.0).abs() < EPS);

        assert!(nearest_wall_segment(Point::new(100.0, -50.0), &rooms, 30.0).is_none());
    }

    #[test]
    fn test_nearest_wall_segment_is_stable() {
        let rooms = vec![
            Room::from_points(&rect_points(100.0, 100.0)),
            Room::from_points(&rect_points(100.0, 100.0)),
        ];
        let first = nearest_wall_segment(Point::new(50.0, 3.0), &rooms, 30.0);
        for _ in 0..5 {
            assert_eq!(nearest_wall_segment(Point::new(50.0, 3.0), &rooms, 30.0), first);
        }
        assert_eq!(first.map(|m| m.room_id), Some(rooms[0].id));
    }
}
