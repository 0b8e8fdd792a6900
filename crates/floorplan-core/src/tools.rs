//! Tool and mode enums.

use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolKind {
    #[default]
    Select,
    Room,
    Zone,
    Furniture,
    Door,
    Window,
    Pencil,
    Text,
    Measure,
    Pan,
}

/// What the editor is currently doing. Mirrors the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppMode {
    #[default]
    Idle,
    Drawing,
    DrawingZone,
    DrawingCustom,
    DrawingFreehand,
    VertexEdit,
    PlacingWallItem,
    Panning,
    Measuring,
}
