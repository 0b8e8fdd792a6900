//! Typed property edits applied from a properties panel.

use crate::entities::{Drawing, Furniture, Room, TextItem, Vertex, WallItem, Zone, translate_vertices};
use crate::geometry;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A single property edit.
///
/// Shared commands apply to every selected entity that has the property; the rest
/// apply to the primary selection only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "camelCase")]
pub enum PropertyCommand {
    SetPosition(Point),
    SetRotation(f64),
    SetWidth(f64),
    SetHeight(f64),
    SetLabel(String),
    SetText(String),
    SetColor(String),
    SetOpacity(f64),
    SetZIndex(i32),
    SetFontSize(f64),
    SetStrokeColor(String),
    SetStrokeWidth(f64),
    SetWallThickness(f64),
    SetFlipX(bool),
    SetFlipY(bool),
}

impl PropertyCommand {
    /// Whether the command fans out to the whole selection.
    pub fn is_shared(&self) -> bool {
        matches!(
            self,
            PropertyCommand::SetColor(_)
                | PropertyCommand::SetOpacity(_)
                | PropertyCommand::SetZIndex(_)
                | PropertyCommand::SetFontSize(_)
                | PropertyCommand::SetStrokeColor(_)
                | PropertyCommand::SetStrokeWidth(_)
        )
    }
}

/// Entities that accept property commands.
pub trait ApplyProperty {
    /// Apply `cmd`. Commands that do not apply to the entity are ignored.
    fn apply_property(&mut self, cmd: &PropertyCommand);
}

/// Move a polygon so its bounds center lands on `target`.
fn move_polygon_to(vertices: &mut [Vertex], target: Point) {
    let center = geometry::polygon_bounds(vertices).center();
    translate_vertices(vertices, target - center);
}

/// Rotate a polygon about its bounds center from `current` to `target` degrees.
fn rotate_polygon_to(vertices: &mut Vec<Vertex>, current: f64, target: f64) {
    let center = geometry::polygon_bounds(vertices).center();
    *vertices = geometry::rotate_polygon(vertices, target - current, center);
}

impl ApplyProperty for Room {
    fn apply_property(&mut self, cmd: &PropertyCommand) {
        match cmd {
            PropertyCommand::SetPosition(p) => move_polygon_to(&mut self.vertices, *p),
            PropertyCommand::SetRotation(deg) => {
                rotate_polygon_to(&mut self.vertices, self.rotation, *deg);
                self.rotation = *deg;
            }
            PropertyCommand::SetLabel(label) => self.label = label.clone(),
            PropertyCommand::SetColor(color) => self.color = color.clone(),
            PropertyCommand::SetOpacity(opacity) => self.opacity = opacity.clamp(0.0, 1.0),
            PropertyCommand::SetZIndex(z) => self.z_index = *z,
            PropertyCommand::SetWallThickness(t) => self.set_wall_thickness(*t),
            _ => {}
        }
    }
}

impl ApplyProperty for Zone {
    fn apply_property(&mut self, cmd: &PropertyCommand) {
        match cmd {
            PropertyCommand::SetPosition(p) => move_polygon_to(&mut self.vertices, *p),
            PropertyCommand::SetRotation(deg) => {
                rotate_polygon_to(&mut self.vertices, self.rotation, *deg);
                self.rotation = *deg;
            }
            PropertyCommand::SetLabel(label) => self.label = label.clone(),
            PropertyCommand::SetColor(color) => self.color = color.clone(),
            PropertyCommand::SetOpacity(opacity) => self.opacity = opacity.clamp(0.0, 1.0),
            PropertyCommand::SetZIndex(z) => self.z_index = *z,
            _ => {}
        }
    }
}

impl ApplyProperty for Furniture {
    fn apply_property(&mut self, cmd: &PropertyCommand) {
        match cmd {
            PropertyCommand::SetPosition(p) => self.translate(*p - self.center()),
            PropertyCommand::SetRotation(deg) => {
                let center = self.center();
                self.rotate_about(deg - self.rotation, center);
                self.rotation = *deg;
                self.sync_bounds();
            }
            PropertyCommand::SetWidth(w) if *w > 0.0 => {
                self.resize(*w, self.height);
                self.sync_bounds();
            }
            PropertyCommand::SetHeight(h) if *h > 0.0 => {
                self.resize(self.width, *h);
                self.sync_bounds();
            }
            PropertyCommand::SetLabel(label) => self.label = Some(label.clone()),
            PropertyCommand::SetColor(color) => self.color = Some(color.clone()),
            PropertyCommand::SetZIndex(z) => self.z_index = *z,
            _ => {}
        }
    }
}

impl ApplyProperty for WallItem {
    fn apply_property(&mut self, cmd: &PropertyCommand) {
        match cmd {
            PropertyCommand::SetPosition(p) => {
                self.x = p.x;
                self.y = p.y;
            }
            PropertyCommand::SetRotation(deg) => self.rotation = *deg,
            PropertyCommand::SetWidth(w) if *w > 0.0 => self.width = *w,
            PropertyCommand::SetHeight(h) if *h > 0.0 => self.height = *h,
            PropertyCommand::SetColor(color) => self.color = Some(color.clone()),
            PropertyCommand::SetZIndex(z) => self.z_index = *z,
            PropertyCommand::SetFlipX(flip) => self.flip_x = *flip,
            PropertyCommand::SetFlipY(flip) => self.flip_y = *flip,
            _ => {}
        }
    }
}

impl ApplyProperty for TextItem {
    fn apply_property(&mut self, cmd: &PropertyCommand) {
        match cmd {
            PropertyCommand::SetPosition(p) => {
                self.x = p.x;
                self.y = p.y;
            }
            PropertyCommand::SetRotation(deg) => self.rotation = *deg,
            PropertyCommand::SetText(text) => self.text = text.clone(),
            PropertyCommand::SetColor(color) => self.color = color.clone(),
            PropertyCommand::SetZIndex(z) => self.z_index = *z,
            PropertyCommand::SetFontSize(size) if *size > 0.0 => self.font_size = *size,
            _ => {}
        }
    }
}

impl ApplyProperty for Drawing {
    fn apply_property(&mut self, cmd: &PropertyCommand) {
        match cmd {
            PropertyCommand::SetPosition(p) => {
                let center = self.bounds().center();
                self.translate(*p - center);
            }
            PropertyCommand::SetZIndex(z) => self.z_index = *z,
            PropertyCommand::SetStrokeColor(color) => self.stroke_color = color.clone(),
            PropertyCommand::SetStrokeWidth(width) if *width > 0.0 => self.stroke_width = *width,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FurnitureType;
    use crate::entities::corners_from_points;

    fn square_room() -> Room {
        Room::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ])
    }

    #[test]
    fn test_shared_commands() {
        assert!(PropertyCommand::SetColor("#fff".into()).is_shared());
        assert!(PropertyCommand::SetStrokeWidth(3.0).is_shared());
        assert!(!PropertyCommand::SetLabel("Hall".into()).is_shared());
        assert!(!PropertyCommand::SetWallThickness(10.0).is_shared());
    }

    #[test]
    fn test_room_position_moves_bounds_center() {
        let mut room = square_room();
        room.apply_property(&PropertyCommand::SetPosition(Point::new(500.0, 500.0)));
        assert_eq!(room.center(), Point::new(500.0, 500.0));
        assert!((room.area() - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_room_rotation_is_absolute() {
        let mut room = square_room();
        room.apply_property(&PropertyCommand::SetRotation(90.0));
        room.apply_property(&PropertyCommand::SetRotation(90.0));
        assert!((room.rotation - 90.0).abs() < 1e-9);
        room.apply_property(&PropertyCommand::SetRotation(0.0));
        let first = &room.vertices[0];
        assert!(first.x.abs() < 1e-9 && first.y.abs() < 1e-9);
    }

    #[test]
    fn test_wall_thickness_clamped() {
        let mut room = square_room();
        room.apply_property(&PropertyCommand::SetWallThickness(-3.0));
        assert_eq!(room.wall_thickness, 0.0);
    }

    #[test]
    fn test_custom_furniture_width_scales_outline() {
        let mut item = Furniture::custom(corners_from_points(&[
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(0.0, 50.0),
        ]));
        item.apply_property(&PropertyCommand::SetWidth(200.0));
        assert!((item.width - 200.0).abs() < 1e-9);
        let xs: Vec<f64> = item.vertices.as_ref().unwrap().iter().map(|v| v.x).collect();
        assert!((xs[0] + 50.0).abs() < 1e-9);
        assert!((xs[1] - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_inapplicable_command_ignored() {
        let mut bed = Furniture::from_preset(FurnitureType::BedKing, Point::ZERO);
        let before = bed.clone();
        bed.apply_property(&PropertyCommand::SetWallThickness(10.0));
        bed.apply_property(&PropertyCommand::SetWidth(-5.0));
        assert_eq!(bed, before);
    }

    #[test]
    fn test_wall_item_flip() {
        let mut door = WallItem::default();
        door.apply_property(&PropertyCommand::SetFlipX(true));
        assert!(door.flip_x);
        assert!(!door.flip_y);
    }
}
