//! Floor-plan editor core.
//!
//! Platform-agnostic geometry, scene model and editing logic for a 2D floor-plan
//! editor: rooms, zones, furniture, doors and windows on a snapping canvas with
//! undo history and a clipboard.

pub mod camera;
pub mod catalog;
pub mod clipboard;
pub mod commands;
pub mod entities;
pub mod geometry;
pub mod history;
pub mod input;
pub mod interaction;
pub mod scene;
pub mod settings;
pub mod snap;
pub mod storage;
pub mod store;
pub mod tools;

pub use camera::Camera;
pub use catalog::{FurnitureCategory, FurnitureType, RoomTemplate};
pub use clipboard::Clipboard;
pub use commands::PropertyCommand;
pub use entities::{
    Drawing, Entity, EntityId, EntityKind, Furniture, Measurement, Room, TextItem, Vertex,
    VertexKind, WallItem, WallItemType, Zone,
};
pub use history::History;
pub use input::{Modifiers, MouseButton, PointerEvent};
pub use interaction::{DragAction, Editor, Handle, HandleKind, ResizeHandle, Transient};
pub use scene::{ImportError, RoomSummary, SceneFile, SceneSnapshot, SceneState};
pub use settings::{Settings, UnitSystem};
pub use snap::{GRID_SIZE, GuideLine, SnapResult, snap_to_grid};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use store::{SceneStore, ZOrder};
pub use tools::{AppMode, ToolKind};
