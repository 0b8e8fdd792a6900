//! Text annotations.

use super::{EntityId, defaults, z_index};
use crate::geometry;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text shown when a text item is first placed.
pub const DEFAULT_TEXT: &str = "New Text";

/// Rough glyph advance as a fraction of the font size, for hit testing.
const CHAR_WIDTH_FACTOR: f64 = 0.6;

/// A text label anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextItem {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    pub color: String,
    pub rotation: f64,
    pub z_index: i32,
}

impl Default for TextItem {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            x: 0.0,
            y: 0.0,
            text: DEFAULT_TEXT.to_string(),
            font_size: defaults::TEXT_SIZE,
            color: defaults::TEXT_COLOR.to_string(),
            rotation: 0.0,
            z_index: z_index::TEXT,
        }
    }
}

impl TextItem {
    pub fn new(position: Point, text: impl Into<String>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Approximate extent of the text, from the longest line and the line count.
    pub fn bounds(&self) -> Rect {
        let lines = self.text.lines().count().max(1);
        let longest = self.text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = longest as f64 * self.font_size * CHAR_WIDTH_FACTOR;
        let height = lines as f64 * self.font_size;
        Rect::from_origin_size(self.position(), (width, height))
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn rotate_about(&mut self, angle_deg: f64, center: Point) {
        let moved = geometry::rotate_point(self.position(), angle_deg, center);
        self.x = moved.x;
        self.y = moved.y;
        self.rotation += angle_deg;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let text = TextItem::new(Point::new(5.0, 6.0), DEFAULT_TEXT);
        assert_eq!(text.font_size, 16.0);
        assert_eq!(text.color, "#1a1a1a");
        assert_eq!(text.z_index, z_index::TEXT);
    }

    #[test]
    fn test_bounds_grow_with_lines() {
        let one = TextItem::new(Point::ZERO, "abcd");
        let two = TextItem::new(Point::ZERO, "abcd\nab");
        assert!((one.bounds().width() - two.bounds().width()).abs() < 1e-9);
        assert!((two.bounds().height() - 2.0 * one.bounds().height()).abs() < 1e-9);
    }
}
