//! In-process clipboard for copy, paste and duplicate.

use crate::entities::Entity;
use kurbo::Vec2;

/// Offset applied to pasted entities.
pub const PASTE_OFFSET: Vec2 = Vec2::new(40.0, 40.0);

/// Offset applied to duplicated entities.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Deep copies of previously copied entities.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    items: Vec<Entity>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard contents.
    pub fn copy(&mut self, items: Vec<Entity>) {
        log::debug!("copied {} entities", items.len());
        self.items = items;
    }

    /// Fresh clones of the contents, moved by `offset`.
    pub fn paste(&self, offset: Vec2) -> Vec<Entity> {
        clone_with_new_ids(&self.items, offset)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }
}

/// Clone entities with new entity and vertex ids, translated by `offset`.
pub fn clone_with_new_ids(items: &[Entity], offset: Vec2) -> Vec<Entity> {
    items
        .iter()
        .map(|item| {
            let mut clone = item.clone();
            clone.regenerate_ids();
            clone.translate(offset);
            clone
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Room, TextItem};
    use kurbo::Point;

    #[test]
    fn test_paste_offsets_and_renames() {
        let room = Room::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        let mut clipboard = Clipboard::new();
        clipboard.copy(vec![Entity::Room(room.clone())]);

        let pasted = clipboard.paste(PASTE_OFFSET);
        let Entity::Room(copy) = &pasted[0] else {
            panic!("expected a room");
        };
        assert_ne!(copy.id, room.id);
        assert_eq!((copy.vertices[0].x, copy.vertices[0].y), (40.0, 40.0));
        assert_ne!(copy.vertices[0].id, room.vertices[0].id);
        // The clipboard keeps the originals.
        assert_eq!(clipboard.items()[0].id(), room.id);
    }

    #[test]
    fn test_paste_twice_gives_distinct_ids() {
        let mut clipboard = Clipboard::new();
        clipboard.copy(vec![Entity::Text(TextItem::new(Point::ZERO, "A"))]);
        let first = clipboard.paste(PASTE_OFFSET);
        let second = clipboard.paste(PASTE_OFFSET);
        assert_ne!(first[0].id(), second[0].id());
    }
}
