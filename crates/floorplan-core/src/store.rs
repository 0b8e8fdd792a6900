//! Scene store: the single owner of scene state, history and clipboard.
//!
//! Every committing operation pushes exactly one history frame. Bulk setters and
//! [`SceneStore::state_mut`] never commit; the interaction layer uses them for
//! continuous pointer motion and calls [`SceneStore::commit`] once per gesture.

use crate::clipboard::{Clipboard, DUPLICATE_OFFSET, PASTE_OFFSET, clone_with_new_ids};
use crate::commands::{ApplyProperty, PropertyCommand};
use crate::entities::{
    Drawing, Entity, EntityId, EntityKind, Furniture, Measurement, Room, TextItem, WallItem, Zone,
};
use crate::history::History;
use crate::scene::{ImportError, SceneFile, SceneState, find_mut};
use crate::settings::Settings;
use crate::tools::{AppMode, ToolKind};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Z-order change within an entity's own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZOrder {
    Front,
    Back,
    Forward,
    Backward,
}

/// Move `id` within `items`. Returns false when it is not there.
fn reorder<T: crate::scene::Identified>(items: &mut Vec<T>, id: EntityId, order: ZOrder) -> bool {
    let Some(index) = items.iter().position(|item| item.entity_id() == id) else {
        return false;
    };
    let len = items.len();
    let item = items.remove(index);
    let target = match order {
        ZOrder::Front => items.len(),
        ZOrder::Back => 0,
        ZOrder::Forward => (index + 1).min(len - 1),
        ZOrder::Backward => index.saturating_sub(1),
    };
    items.insert(target, item);
    true
}

#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    state: SceneState,
    history: History,
    clipboard: Clipboard,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing scene. History begins with it as the only frame.
    pub fn with_state(state: SceneState) -> Self {
        let history = History::new(state.snapshot());
        Self {
            state,
            history,
            clipboard: Clipboard::new(),
        }
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Mutable access without committing.
    pub fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Record the current collections as a history frame.
    pub fn commit(&mut self) {
        self.history.commit(self.state.snapshot());
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.state.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.state.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn add_room(&mut self, room: Room) -> EntityId {
        let id = room.id;
        self.state.shapes.push(room);
        self.commit();
        id
    }

    pub fn add_zone(&mut self, zone: Zone) -> EntityId {
        let id = zone.id;
        self.state.zones.push(zone);
        self.commit();
        id
    }

    pub fn add_furniture(&mut self, item: Furniture) -> EntityId {
        let id = item.id;
        self.state.furniture.push(item);
        self.commit();
        id
    }

    pub fn add_wall_item(&mut self, item: WallItem) -> EntityId {
        let id = item.id;
        self.state.wall_items.push(item);
        self.commit();
        id
    }

    pub fn add_text(&mut self, item: TextItem) -> EntityId {
        let id = item.id;
        self.state.texts.push(item);
        self.commit();
        id
    }

    pub fn add_drawing(&mut self, drawing: Drawing) -> EntityId {
        let id = drawing.id;
        self.state.drawings.push(drawing);
        self.commit();
        id
    }

    pub fn update_room(&mut self, id: EntityId, edit: impl FnOnce(&mut Room)) -> bool {
        let Some(room) = find_mut(&mut self.state.shapes, id) else {
            return false;
        };
        edit(room);
        room.wall_thickness = room.wall_thickness.max(0.0);
        self.commit();
        true
    }

    pub fn update_zone(&mut self, id: EntityId, edit: impl FnOnce(&mut Zone)) -> bool {
        let Some(zone) = find_mut(&mut self.state.zones, id) else {
            return false;
        };
        edit(zone);
        self.commit();
        true
    }

    /// Edit one furniture item. Custom outlines re-derive their bounds afterwards.
    pub fn update_furniture(&mut self, id: EntityId, edit: impl FnOnce(&mut Furniture)) -> bool {
        let Some(item) = find_mut(&mut self.state.furniture, id) else {
            return false;
        };
        edit(item);
        item.sync_bounds();
        self.commit();
        true
    }

    pub fn update_wall_item(&mut self, id: EntityId, edit: impl FnOnce(&mut WallItem)) -> bool {
        let Some(item) = find_mut(&mut self.state.wall_items, id) else {
            return false;
        };
        edit(item);
        self.commit();
        true
    }

    pub fn update_text(&mut self, id: EntityId, edit: impl FnOnce(&mut TextItem)) -> bool {
        let Some(item) = find_mut(&mut self.state.texts, id) else {
            return false;
        };
        edit(item);
        self.commit();
        true
    }

    pub fn update_drawing(&mut self, id: EntityId, edit: impl FnOnce(&mut Drawing)) -> bool {
        let Some(drawing) = find_mut(&mut self.state.drawings, id) else {
            return false;
        };
        edit(drawing);
        self.commit();
        true
    }

    pub fn set_rooms(&mut self, rooms: Vec<Room>) {
        self.state.shapes = rooms;
    }

    pub fn set_zones(&mut self, zones: Vec<Zone>) {
        self.state.zones = zones;
    }

    pub fn set_furniture(&mut self, furniture: Vec<Furniture>) {
        self.state.furniture = furniture;
    }

    pub fn set_wall_items(&mut self, items: Vec<WallItem>) {
        self.state.wall_items = items;
    }

    pub fn set_texts(&mut self, texts: Vec<TextItem>) {
        self.state.texts = texts;
    }

    pub fn set_drawings(&mut self, drawings: Vec<Drawing>) {
        self.state.drawings = drawings;
    }

    /// Apply a property command to the selection.
    ///
    /// Returns whether anything changed. One history frame is committed if so.
    pub fn apply_property(&mut self, cmd: &PropertyCommand) -> bool {
        let targets: Vec<EntityId> = if cmd.is_shared() {
            self.state.selected_ids.clone()
        } else {
            self.state.selected_ids.last().copied().into_iter().collect()
        };

        let mut changed = false;
        for id in targets {
            changed |= self.apply_to(id, cmd);
        }
        if changed {
            self.commit();
        }
        changed
    }

    fn apply_to(&mut self, id: EntityId, cmd: &PropertyCommand) -> bool {
        fn apply<T: ApplyProperty + Clone + PartialEq>(item: &mut T, cmd: &PropertyCommand) -> bool {
            let before = item.clone();
            item.apply_property(cmd);
            *item != before
        }

        let state = &mut self.state;
        if let Some(r) = find_mut(&mut state.shapes, id) {
            apply(r, cmd)
        } else if let Some(z) = find_mut(&mut state.zones, id) {
            apply(z, cmd)
        } else if let Some(f) = find_mut(&mut state.furniture, id) {
            apply(f, cmd)
        } else if let Some(w) = find_mut(&mut state.wall_items, id) {
            apply(w, cmd)
        } else if let Some(t) = find_mut(&mut state.texts, id) {
            apply(t, cmd)
        } else if let Some(d) = find_mut(&mut state.drawings, id) {
            apply(d, cmd)
        } else {
            false
        }
    }

    /// Delete every selected entity. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.state.selected_ids.is_empty() {
            return 0;
        }
        let ids: HashSet<EntityId> = self.state.selected_ids.drain(..).collect();
        let removed = self.state.remove_ids(&ids);
        self.commit();
        log::debug!("deleted {removed} entities");
        removed
    }

    /// Change the z-order of `id` within its collection.
    pub fn reorder_item(&mut self, id: EntityId, order: ZOrder) -> bool {
        let state = &mut self.state;
        let found = reorder(&mut state.shapes, id, order)
            || reorder(&mut state.zones, id, order)
            || reorder(&mut state.furniture, id, order)
            || reorder(&mut state.wall_items, id, order)
            || reorder(&mut state.texts, id, order)
            || reorder(&mut state.drawings, id, order);
        if found {
            self.commit();
        }
        found
    }

    /// Nudge the selection by `delta`. Selected rooms carry their contents.
    pub fn move_selected_by(&mut self, delta: Vec2) -> bool {
        if self.state.selected_ids.is_empty() {
            return false;
        }
        let children = self.state.children_of_selection();
        let ids: Vec<EntityId> = self.state.selected_ids.clone();
        for id in ids.iter().chain(&children) {
            self.state.translate_entity(*id, delta);
        }
        self.commit();
        true
    }

    pub fn set_selected(&mut self, ids: Vec<EntityId>) {
        self.state.selected_ids = ids;
    }

    /// Select `id` alone, or toggle it within the selection when `multi` is set.
    pub fn toggle_selection(&mut self, id: EntityId, multi: bool) {
        let selected = &mut self.state.selected_ids;
        if !multi {
            *selected = vec![id];
        } else if let Some(pos) = selected.iter().position(|s| *s == id) {
            selected.remove(pos);
        } else {
            selected.push(id);
        }
    }

    pub fn select_all(&mut self) {
        self.state.selected_ids = self.state.all_ids();
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_ids.clear();
    }

    pub fn is_selected(&self, id: EntityId) -> bool {
        self.state.selected_ids.contains(&id)
    }

    /// The most recently selected id.
    pub fn primary_selection(&self) -> Option<EntityId> {
        self.state.selected_ids.last().copied()
    }

    /// Kind of the primary selection.
    pub fn primary_kind(&self) -> Option<EntityKind> {
        self.primary_selection().and_then(|id| self.state.kind_of(id))
    }

    /// Switch tools. The mode returns to idle.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.state.tool = tool;
        self.state.mode = AppMode::Idle;
    }

    pub fn set_mode(&mut self, mode: AppMode) {
        self.state.mode = mode;
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.state.settings = settings.sanitized();
    }

    pub fn copy(&mut self) {
        self.clipboard.copy(self.state.selected_entities());
    }

    /// Paste the clipboard at [`PASTE_OFFSET`]. Returns the new ids.
    pub fn paste(&mut self) -> Vec<EntityId> {
        self.paste_with_offset(PASTE_OFFSET)
    }

    pub fn paste_with_offset(&mut self, offset: Vec2) -> Vec<EntityId> {
        let clones = self.clipboard.paste(offset);
        self.insert_clones(clones)
    }

    /// Clone the selection at [`DUPLICATE_OFFSET`]. Returns the new ids.
    pub fn duplicate(&mut self) -> Vec<EntityId> {
        let clones = clone_with_new_ids(&self.state.selected_entities(), DUPLICATE_OFFSET);
        self.insert_clones(clones)
    }

    fn insert_clones(&mut self, clones: Vec<Entity>) -> Vec<EntityId> {
        if clones.is_empty() {
            return Vec::new();
        }
        let ids: Vec<EntityId> = clones.iter().map(Entity::id).collect();
        for entity in clones {
            self.state.push_entity(entity);
        }
        self.state.selected_ids = ids.clone();
        self.commit();
        log::debug!("inserted {} clones", ids.len());
        ids
    }

    pub fn add_measurement(&mut self, measurement: Measurement) {
        self.state.measurements.push(measurement);
    }

    pub fn clear_measurements(&mut self) {
        self.state.measurements.clear();
    }

    /// Empty every collection, the selection and the clipboard.
    pub fn clear_all(&mut self) {
        let state = &mut self.state;
        state.shapes.clear();
        state.zones.clear();
        state.furniture.clear();
        state.wall_items.clear();
        state.texts.clear();
        state.drawings.clear();
        state.measurements.clear();
        state.selected_ids.clear();
        self.clipboard.clear();
        self.commit();
    }

    /// Serialize the scene to pretty JSON.
    pub fn export_state(&self) -> Result<String, serde_json::Error> {
        let json = SceneFile::from_state(&self.state).to_json()?;
        log::info!("exported scene with {} entities", self.state.len());
        Ok(json)
    }

    /// Replace the scene with a serialized one.
    ///
    /// A rejected payload leaves the store untouched. On success history restarts
    /// with the imported scene as its only frame.
    pub fn import_state(&mut self, json: &str) -> Result<(), ImportError> {
        let file = SceneFile::from_json(json).inspect_err(|e| log::warn!("import rejected: {e}"))?;
        self.load_file(file);
        Ok(())
    }

    /// Replace the scene with a parsed document and restart history.
    pub fn load_file(&mut self, file: SceneFile) {
        self.state.apply_file(file);
        self.history.reset(self.state.snapshot());
        log::info!("loaded scene with {} entities", self.state.len());
    }
}
