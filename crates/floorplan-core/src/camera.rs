//! Viewport camera: maps screen pixels to plan coordinates.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 5.0;

/// Zoom change per unit of scroll delta.
pub const ZOOM_WHEEL_SENSITIVITY: f64 = 0.001;

/// Pan and zoom of the plan view.
///
/// `offset` is the screen position of the plan origin; a plan point `p` is drawn at
/// `offset + p * zoom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
    pub zoom: f64,
    /// Size of the drawing surface in screen pixels.
    pub viewport: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            viewport: Size::new(1280.0, 800.0),
        }
    }
}

impl Camera {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Plan-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.transform().inverse() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Plan-space rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_points(
            self.screen_to_world(Point::ZERO),
            self.screen_to_world(Point::new(self.viewport.width, self.viewport.height)),
        )
    }

    /// Plan-space point at the middle of the screen.
    pub fn visible_center(&self) -> Point {
        self.visible_rect().center()
    }

    /// Pan by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping the plan point under `screen_point` fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let anchor = self.screen_to_world(screen_point);
        self.zoom = new_zoom;
        self.offset = screen_point.to_vec2() - anchor.to_vec2() * new_zoom;
    }

    /// Zoom from a scroll wheel delta. Scrolling down zooms out.
    pub fn zoom_wheel(&mut self, screen_point: Point, scroll_delta: f64) {
        let factor = (-scroll_delta * ZOOM_WHEEL_SENSITIVITY).exp();
        self.zoom_at(screen_point, factor);
    }

    /// Center `bounds` on screen at the largest zoom that fits, within limits.
    pub fn fit_to_bounds(&mut self, bounds: Rect, padding: f64) {
        if bounds.is_zero_area() {
            self.offset = Vec2::new(self.viewport.width, self.viewport.height) / 2.0
                - bounds.center().to_vec2() * self.zoom;
            return;
        }
        let usable_w = (self.viewport.width - padding * 2.0).max(1.0);
        let usable_h = (self.viewport.height - padding * 2.0).max(1.0);
        self.zoom = (usable_w / bounds.width())
            .min(usable_h / bounds.height())
            .clamp(ZOOM_MIN, ZOOM_MAX);
        self.offset = Vec2::new(self.viewport.width, self.viewport.height) / 2.0
            - bounds.center().to_vec2() * self.zoom;
    }
}
