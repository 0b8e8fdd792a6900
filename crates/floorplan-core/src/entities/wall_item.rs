//! Doors and windows attached to room walls.

use super::{EntityId, defaults, rotated_box_contains, z_index};
use crate::geometry::{self, WallMatch};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WallItemType {
    #[default]
    Door,
    Window,
}

impl WallItemType {
    /// Default `(width, height)` for a new item.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            WallItemType::Door => (defaults::DOOR_WIDTH, defaults::DOOR_HEIGHT),
            WallItemType::Window => (defaults::WINDOW_WIDTH, defaults::WINDOW_HEIGHT),
        }
    }
}

/// A door or window centered at `(x, y)` and aligned with `rotation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallItem {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub item_type: WallItemType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub flip_x: bool,
    pub flip_y: bool,
    /// Room the item sits on, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attached_to: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub z_index: i32,
}

impl Default for WallItem {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            item_type: WallItemType::Door,
            x: 0.0,
            y: 0.0,
            width: defaults::DOOR_WIDTH,
            height: defaults::DOOR_HEIGHT,
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
            attached_to: None,
            color: None,
            z_index: z_index::WALL_ITEM,
        }
    }
}

impl WallItem {
    /// A new item snapped onto the matched wall.
    pub fn on_wall(item_type: WallItemType, wall: &WallMatch) -> Self {
        let (width, height) = item_type.default_size();
        Self {
            item_type,
            x: wall.point.x,
            y: wall.point.y,
            width,
            height,
            rotation: wall.angle,
            attached_to: Some(wall.room_id),
            ..Self::default()
        }
    }

    /// Move onto a wall, taking its angle and room.
    pub fn attach(&mut self, wall: &WallMatch) {
        self.x = wall.point.x;
        self.y = wall.point.y;
        self.rotation = wall.angle;
        self.attached_to = Some(wall.room_id);
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center(), (self.width, self.height))
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    pub fn rotate_about(&mut self, angle_deg: f64, center: Point) {
        let moved = geometry::rotate_point(self.center(), angle_deg, center);
        self.x = moved.x;
        self.y = moved.y;
        self.rotation += angle_deg;
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        rotated_box_contains(
            self.center(),
            self.width,
            self.height,
            self.rotation,
            point,
            tolerance,
        )
    }
}
