//! Scene state: every entity collection plus selection, tool and settings.

use crate::entities::{
    Drawing, Entity, EntityId, EntityKind, Furniture, Measurement, Room, TextItem, WallItem, Zone,
};
use crate::geometry::{self, Positioned};
use crate::settings::Settings;
use crate::tools::{AppMode, ToolKind};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Version written by [`SceneFile::from_state`].
pub const FILE_VERSION: &str = "1.1";

/// Error type for scene import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Malformed scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scene JSON is not an object")]
    NotAnObject,

    #[error("Scene JSON has no version")]
    MissingVersion,
}

/// The six entity collections, as stored in history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneSnapshot {
    pub shapes: Vec<Room>,
    pub zones: Vec<Zone>,
    pub furniture: Vec<Furniture>,
    pub wall_items: Vec<WallItem>,
    pub texts: Vec<TextItem>,
    pub drawings: Vec<Drawing>,
}

/// Serialized scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFile {
    pub version: String,
    #[serde(default)]
    pub shapes: Vec<Room>,
    #[serde(default)]
    pub furniture: Vec<Furniture>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub wall_items: Vec<WallItem>,
    #[serde(default)]
    pub texts: Vec<TextItem>,
    #[serde(default)]
    pub drawings: Vec<Drawing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl SceneFile {
    pub fn from_state(state: &SceneState) -> Self {
        Self {
            version: FILE_VERSION.to_string(),
            shapes: state.shapes.clone(),
            furniture: state.furniture.clone(),
            zones: state.zones.clone(),
            wall_items: state.wall_items.clone(),
            texts: state.texts.clone(),
            drawings: state.drawings.clone(),
            settings: Some(state.settings.clone()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate a scene document.
    ///
    /// The payload must be an object with a truthy `version`. Missing collections
    /// are empty and missing settings fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let object = value.as_object().ok_or(ImportError::NotAnObject)?;
        if !object.get("version").is_some_and(is_truthy) {
            return Err(ImportError::MissingVersion);
        }
        let mut file: SceneFile = serde_json::from_value(normalize_version(value))?;
        file.settings = file.settings.map(Settings::sanitized);
        Ok(file)
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Accept numeric versions by storing them as strings.
fn normalize_version(mut value: serde_json::Value) -> serde_json::Value {
    if let Some(version) = value.get_mut("version") {
        if !version.is_string() {
            *version = serde_json::Value::String(version.to_string());
        }
    }
    value
}

/// Closed-interval containment; points on any edge count as inside.
fn inside(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

fn any_inside(rect: Rect, mut points: impl Iterator<Item = Point>) -> bool {
    points.any(|p| inside(rect, p))
}

/// Per-room figures for a plan summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSummary {
    pub id: EntityId,
    pub label: String,
    pub area: f64,
    pub perimeter: f64,
    pub inner_area: f64,
}

/// Anything stored in one of the scene collections.
pub trait Identified {
    fn entity_id(&self) -> EntityId;
}

macro_rules! impl_identified {
    ($($ty:ty),*) => {
        $(impl Identified for $ty {
            fn entity_id(&self) -> EntityId {
                self.id
            }
        })*
    };
}

impl_identified!(Room, Zone, Furniture, WallItem, TextItem, Drawing, Measurement);

pub(crate) fn find<T: Identified>(items: &[T], id: EntityId) -> Option<&T> {
    items.iter().find(|item| item.entity_id() == id)
}

pub(crate) fn find_mut<T: Identified>(items: &mut [T], id: EntityId) -> Option<&mut T> {
    items.iter_mut().find(|item| item.entity_id() == id)
}

/// Complete editor state. Owned by the [`crate::SceneStore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneState {
    pub shapes: Vec<Room>,
    pub zones: Vec<Zone>,
    pub furniture: Vec<Furniture>,
    pub wall_items: Vec<WallItem>,
    pub texts: Vec<TextItem>,
    pub drawings: Vec<Drawing>,
    pub measurements: Vec<Measurement>,
    /// Selected ids in selection order. The last one is the primary selection.
    pub selected_ids: Vec<EntityId>,
    pub tool: ToolKind,
    pub mode: AppMode,
    pub settings: Settings,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep copy of the entity collections.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            shapes: self.shapes.clone(),
            zones: self.zones.clone(),
            furniture: self.furniture.clone(),
            wall_items: self.wall_items.clone(),
            texts: self.texts.clone(),
            drawings: self.drawings.clone(),
        }
    }

    /// Replace the entity collections and clear the selection.
    pub fn restore(&mut self, snapshot: &SceneSnapshot) {
        self.shapes = snapshot.shapes.clone();
        self.zones = snapshot.zones.clone();
        self.furniture = snapshot.furniture.clone();
        self.wall_items = snapshot.wall_items.clone();
        self.texts = snapshot.texts.clone();
        self.drawings = snapshot.drawings.clone();
        self.selected_ids.clear();
    }

    /// Replace the collections with those of an imported document.
    ///
    /// Settings are only replaced when the document carries them.
    pub fn apply_file(&mut self, file: SceneFile) {
        self.shapes = file.shapes;
        self.zones = file.zones;
        self.furniture = file.furniture;
        self.wall_items = file.wall_items;
        self.texts = file.texts;
        self.drawings = file.drawings;
        if let Some(settings) = file.settings {
            self.settings = settings;
        }
        self.measurements.clear();
        self.selected_ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
            && self.zones.is_empty()
            && self.furniture.is_empty()
            && self.wall_items.is_empty()
            && self.texts.is_empty()
            && self.drawings.is_empty()
    }

    /// Number of entities across all collections.
    pub fn len(&self) -> usize {
        self.shapes.len()
            + self.zones.len()
            + self.furniture.len()
            + self.wall_items.len()
            + self.texts.len()
            + self.drawings.len()
    }

    /// Every entity id, in collection priority order.
    pub fn all_ids(&self) -> Vec<EntityId> {
        let mut ids = Vec::with_capacity(self.len());
        ids.extend(self.shapes.iter().map(|e| e.id));
        ids.extend(self.zones.iter().map(|e| e.id));
        ids.extend(self.furniture.iter().map(|e| e.id));
        ids.extend(self.wall_items.iter().map(|e| e.id));
        ids.extend(self.texts.iter().map(|e| e.id));
        ids.extend(self.drawings.iter().map(|e| e.id));
        ids
    }

    /// Kind of the entity with `id`, searching in priority order.
    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        if find(&self.shapes, id).is_some() {
            Some(EntityKind::Room)
        } else if find(&self.zones, id).is_some() {
            Some(EntityKind::Zone)
        } else if find(&self.furniture, id).is_some() {
            Some(EntityKind::Furniture)
        } else if find(&self.wall_items, id).is_some() {
            Some(EntityKind::WallItem)
        } else if find(&self.texts, id).is_some() {
            Some(EntityKind::Text)
        } else if find(&self.drawings, id).is_some() {
            Some(EntityKind::Drawing)
        } else {
            None
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.kind_of(id).is_some()
    }

    /// Owned copy of the entity with `id`, tagged by kind.
    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        find(&self.shapes, id)
            .cloned()
            .map(Entity::Room)
            .or_else(|| find(&self.zones, id).cloned().map(Entity::Zone))
            .or_else(|| find(&self.furniture, id).cloned().map(Entity::Furniture))
            .or_else(|| find(&self.wall_items, id).cloned().map(Entity::WallItem))
            .or_else(|| find(&self.texts, id).cloned().map(Entity::Text))
            .or_else(|| find(&self.drawings, id).cloned().map(Entity::Drawing))
    }

    /// Owned copies of the selected entities, in selection order.
    pub fn selected_entities(&self) -> Vec<Entity> {
        self.selected_ids
            .iter()
            .filter_map(|id| self.entity(*id))
            .collect()
    }

    /// Append an entity to its collection.
    pub fn push_entity(&mut self, entity: Entity) {
        match entity {
            Entity::Room(r) => self.shapes.push(r),
            Entity::Zone(z) => self.zones.push(z),
            Entity::Furniture(f) => self.furniture.push(f),
            Entity::WallItem(w) => self.wall_items.push(w),
            Entity::Text(t) => self.texts.push(t),
            Entity::Drawing(d) => self.drawings.push(d),
        }
    }

    /// Remove every entity whose id is in `ids`. Returns how many were removed.
    pub fn remove_ids(&mut self, ids: &HashSet<EntityId>) -> usize {
        let before = self.len();
        self.shapes.retain(|e| !ids.contains(&e.id));
        self.zones.retain(|e| !ids.contains(&e.id));
        self.furniture.retain(|e| !ids.contains(&e.id));
        self.wall_items.retain(|e| !ids.contains(&e.id));
        self.texts.retain(|e| !ids.contains(&e.id));
        self.drawings.retain(|e| !ids.contains(&e.id));
        self.selected_ids.retain(|id| !ids.contains(id));
        before - self.len()
    }

    /// Bounds of the entity with `id`.
    pub fn bounds_of(&self, id: EntityId) -> Option<Rect> {
        find(&self.shapes, id)
            .map(Room::bounds)
            .or_else(|| find(&self.zones, id).map(Zone::bounds))
            .or_else(|| find(&self.furniture, id).map(Furniture::bounds))
            .or_else(|| find(&self.wall_items, id).map(WallItem::bounds))
            .or_else(|| find(&self.texts, id).map(TextItem::bounds))
            .or_else(|| find(&self.drawings, id).map(Drawing::bounds))
    }

    /// Rotation pivot of the entity: bounds center for polygons, anchor center otherwise.
    pub fn center_of(&self, id: EntityId) -> Option<Point> {
        find(&self.shapes, id)
            .map(Room::center)
            .or_else(|| find(&self.zones, id).map(Zone::center))
            .or_else(|| find(&self.furniture, id).map(Furniture::center))
            .or_else(|| find(&self.wall_items, id).map(WallItem::center))
            .or_else(|| find(&self.texts, id).map(TextItem::position))
            .or_else(|| find(&self.drawings, id).map(|d| d.bounds().center()))
    }

    /// Move the entity with `id` by `delta`. Returns whether it was found.
    pub fn translate_entity(&mut self, id: EntityId, delta: Vec2) -> bool {
        if let Some(r) = find_mut(&mut self.shapes, id) {
            r.translate(delta);
        } else if let Some(z) = find_mut(&mut self.zones, id) {
            z.translate(delta);
        } else if let Some(f) = find_mut(&mut self.furniture, id) {
            f.translate(delta);
        } else if let Some(w) = find_mut(&mut self.wall_items, id) {
            w.translate(delta);
        } else if let Some(t) = find_mut(&mut self.texts, id) {
            t.translate(delta);
        } else if let Some(d) = find_mut(&mut self.drawings, id) {
            d.translate(delta);
        } else {
            return false;
        }
        true
    }

    /// Rotate the entity with `id` about `center` by `angle_deg`.
    pub fn rotate_entity(&mut self, id: EntityId, angle_deg: f64, center: Point) -> bool {
        if let Some(r) = find_mut(&mut self.shapes, id) {
            r.rotate_about(angle_deg, center);
        } else if let Some(z) = find_mut(&mut self.zones, id) {
            z.rotate_about(angle_deg, center);
        } else if let Some(f) = find_mut(&mut self.furniture, id) {
            f.rotate_about(angle_deg, center);
            f.sync_bounds();
        } else if let Some(w) = find_mut(&mut self.wall_items, id) {
            w.rotate_about(angle_deg, center);
        } else if let Some(t) = find_mut(&mut self.texts, id) {
            t.rotate_about(angle_deg, center);
        } else if let Some(d) = find_mut(&mut self.drawings, id) {
            d.rotate_about(angle_deg, center);
        } else {
            return false;
        }
        true
    }

    /// Entities that travel with room `room_id`.
    ///
    /// Furniture and text whose anchor lies inside the room, zones whose bounds
    /// center lies inside, and wall items attached to it.
    pub fn containment_children(&self, room_id: EntityId) -> Vec<EntityId> {
        let Some(room) = find(&self.shapes, room_id) else {
            return Vec::new();
        };
        let mut children = Vec::new();
        children.extend(
            self.furniture
                .iter()
                .filter(|f| room.contains(f.center()))
                .map(|f| f.id),
        );
        children.extend(
            self.texts
                .iter()
                .filter(|t| room.contains(t.position()))
                .map(|t| t.id),
        );
        children.extend(
            self.zones
                .iter()
                .filter(|z| room.contains(z.center()))
                .map(|z| z.id),
        );
        children.extend(
            self.wall_items
                .iter()
                .filter(|w| w.attached_to == Some(room_id))
                .map(|w| w.id),
        );
        children
    }

    /// Union of the children of every selected room, excluding selected ids.
    pub fn children_of_selection(&self) -> Vec<EntityId> {
        let selected: HashSet<EntityId> = self.selected_ids.iter().copied().collect();
        let mut seen = HashSet::new();
        let mut children = Vec::new();
        for id in &self.selected_ids {
            for child in self.containment_children(*id) {
                if !selected.contains(&child) && seen.insert(child) {
                    children.push(child);
                }
            }
        }
        children
    }

    /// Topmost entity under `point`: highest z-index, later entries winning ties.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<(EntityKind, EntityId)> {
        let mut best: Option<(i32, EntityKind, EntityId)> = None;
        let mut consider = |z: i32, kind: EntityKind, id: EntityId| {
            if best.is_none_or(|(best_z, _, _)| z >= best_z) {
                best = Some((z, kind, id));
            }
        };

        for r in self.shapes.iter().filter(|r| r.contains(point)) {
            consider(r.z_index, EntityKind::Room, r.id);
        }
        for z in self
            .zones
            .iter()
            .filter(|z| geometry::point_in_polygon(point, &z.vertices))
        {
            consider(z.z_index, EntityKind::Zone, z.id);
        }
        for f in self.furniture.iter().filter(|f| f.hit_test(point, tolerance)) {
            consider(f.z_index, EntityKind::Furniture, f.id);
        }
        for w in self.wall_items.iter().filter(|w| w.hit_test(point, tolerance)) {
            consider(w.z_index, EntityKind::WallItem, w.id);
        }
        for t in self
            .texts
            .iter()
            .filter(|t| t.bounds().inflate(tolerance, tolerance).contains(point))
        {
            consider(t.z_index, EntityKind::Text, t.id);
        }
        for d in self.drawings.iter().filter(|d| d.hit_test(point, tolerance)) {
            consider(d.z_index, EntityKind::Drawing, d.id);
        }

        best.map(|(_, kind, id)| (kind, id))
    }

    /// Ids of entities with any vertex, anchor or sample point inside `rect`.
    pub fn ids_in_rect(&self, rect: Rect) -> Vec<EntityId> {
        let mut ids = Vec::new();
        ids.extend(
            self.shapes
                .iter()
                .filter(|r| any_inside(rect, r.vertices.iter().map(Positioned::position)))
                .map(|r| r.id),
        );
        ids.extend(
            self.zones
                .iter()
                .filter(|z| any_inside(rect, z.vertices.iter().map(Positioned::position)))
                .map(|z| z.id),
        );
        ids.extend(
            self.furniture
                .iter()
                .filter(|f| inside(rect, f.center()))
                .map(|f| f.id),
        );
        ids.extend(
            self.wall_items
                .iter()
                .filter(|w| inside(rect, w.center()))
                .map(|w| w.id),
        );
        ids.extend(
            self.texts
                .iter()
                .filter(|t| inside(rect, t.position()))
                .map(|t| t.id),
        );
        ids.extend(
            self.drawings
                .iter()
                .filter(|d| any_inside(rect, d.points.iter().copied()))
                .map(|d| d.id),
        );
        ids
    }

    /// Area, perimeter and floor area of every room.
    pub fn room_summaries(&self) -> Vec<RoomSummary> {
        self.shapes
            .iter()
            .map(|room| RoomSummary {
                id: room.id,
                label: room.label.clone(),
                area: room.area(),
                perimeter: room.perimeter(),
                inner_area: room.inner_area(),
            })
            .collect()
    }

    /// Bounds enclosing every entity, or `None` for an empty scene.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.all_ids()
            .into_iter()
            .filter_map(|id| self.bounds_of(id))
            .reduce(|a, b| a.union(b))
    }
}
