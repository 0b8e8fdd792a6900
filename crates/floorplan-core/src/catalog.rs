//! Furniture presets and room templates.

use crate::entities::{Vertex, corners_from_points};
use crate::geometry;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Catalog grouping shown in the furniture library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FurnitureCategory {
    Bedroom,
    Living,
    Dining,
    Office,
    Bathroom,
    Kitchen,
    Outdoor,
}

impl FurnitureCategory {
    pub const ALL: [FurnitureCategory; 7] = [
        FurnitureCategory::Bedroom,
        FurnitureCategory::Living,
        FurnitureCategory::Dining,
        FurnitureCategory::Office,
        FurnitureCategory::Bathroom,
        FurnitureCategory::Kitchen,
        FurnitureCategory::Outdoor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FurnitureCategory::Bedroom => "Bedroom",
            FurnitureCategory::Living => "Living Room",
            FurnitureCategory::Dining => "Dining",
            FurnitureCategory::Office => "Office",
            FurnitureCategory::Bathroom => "Bathroom",
            FurnitureCategory::Kitchen => "Kitchen",
            FurnitureCategory::Outdoor => "Outdoor",
        }
    }
}

/// Furniture type tag. `Custom` items are drawn as polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FurnitureType {
    BedSingle,
    BedQueen,
    BedKing,
    Wardrobe,
    Nightstand,
    Dresser,
    #[serde(rename = "SOFA_2SEATER")]
    Sofa2Seater,
    #[serde(rename = "SOFA_3SEATER")]
    Sofa3Seater,
    SofaCorner,
    Armchair,
    CoffeeTable,
    TvStand,
    Bookshelf,
    TableDining,
    TableRound,
    ChairDining,
    Desk,
    ChairOffice,
    FilingCabinet,
    Bathtub,
    Shower,
    Toilet,
    SinkBathroom,
    SinkKitchen,
    Stove,
    Fridge,
    Dishwasher,
    Counter,
    Plant,
    PlantLarge,
    #[default]
    Custom,
}

/// Static description of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FurniturePreset {
    pub width: f64,
    pub height: f64,
    pub category: FurnitureCategory,
    pub label: &'static str,
}

const fn entry(
    width: f64,
    height: f64,
    category: FurnitureCategory,
    label: &'static str,
) -> Option<FurniturePreset> {
    Some(FurniturePreset {
        width,
        height,
        category,
        label,
    })
}

impl FurnitureType {
    /// Every preset type, in catalog order. `Custom` is not included.
    pub const PRESETS: [FurnitureType; 30] = [
        FurnitureType::BedSingle,
        FurnitureType::BedQueen,
        FurnitureType::BedKing,
        FurnitureType::Wardrobe,
        FurnitureType::Nightstand,
        FurnitureType::Dresser,
        FurnitureType::Sofa2Seater,
        FurnitureType::Sofa3Seater,
        FurnitureType::SofaCorner,
        FurnitureType::Armchair,
        FurnitureType::CoffeeTable,
        FurnitureType::TvStand,
        FurnitureType::Bookshelf,
        FurnitureType::TableDining,
        FurnitureType::TableRound,
        FurnitureType::ChairDining,
        FurnitureType::Desk,
        FurnitureType::ChairOffice,
        FurnitureType::FilingCabinet,
        FurnitureType::Bathtub,
        FurnitureType::Shower,
        FurnitureType::Toilet,
        FurnitureType::SinkBathroom,
        FurnitureType::SinkKitchen,
        FurnitureType::Stove,
        FurnitureType::Fridge,
        FurnitureType::Dishwasher,
        FurnitureType::Counter,
        FurnitureType::Plant,
        FurnitureType::PlantLarge,
    ];

    /// Catalog entry, or `None` for `Custom`.
    pub fn preset(self) -> Option<FurniturePreset> {
        use FurnitureCategory::*;
        match self {
            FurnitureType::BedSingle => entry(100.0, 200.0, Bedroom, "Single Bed"),
            FurnitureType::BedQueen => entry(160.0, 200.0, Bedroom, "Queen Bed"),
            FurnitureType::BedKing => entry(180.0, 200.0, Bedroom, "King Bed"),
            FurnitureType::Wardrobe => entry(120.0, 60.0, Bedroom, "Wardrobe"),
            FurnitureType::Nightstand => entry(50.0, 40.0, Bedroom, "Nightstand"),
            FurnitureType::Dresser => entry(100.0, 50.0, Bedroom, "Dresser"),
            FurnitureType::Sofa2Seater => entry(160.0, 90.0, Living, "2-Seater Sofa"),
            FurnitureType::Sofa3Seater => entry(220.0, 90.0, Living, "3-Seater Sofa"),
            FurnitureType::SofaCorner => entry(250.0, 200.0, Living, "Corner Sofa"),
            FurnitureType::Armchair => entry(80.0, 80.0, Living, "Armchair"),
            FurnitureType::CoffeeTable => entry(120.0, 60.0, Living, "Coffee Table"),
            FurnitureType::TvStand => entry(150.0, 45.0, Living, "TV Stand"),
            FurnitureType::Bookshelf => entry(80.0, 30.0, Living, "Bookshelf"),
            FurnitureType::TableDining => entry(180.0, 90.0, Dining, "Dining Table"),
            FurnitureType::TableRound => entry(120.0, 120.0, Dining, "Round Table"),
            FurnitureType::ChairDining => entry(45.0, 45.0, Dining, "Dining Chair"),
            FurnitureType::Desk => entry(140.0, 70.0, Office, "Desk"),
            FurnitureType::ChairOffice => entry(60.0, 60.0, Office, "Office Chair"),
            FurnitureType::FilingCabinet => entry(45.0, 60.0, Office, "Filing Cabinet"),
            FurnitureType::Bathtub => entry(170.0, 80.0, Bathroom, "Bathtub"),
            FurnitureType::Shower => entry(90.0, 90.0, Bathroom, "Shower"),
            FurnitureType::Toilet => entry(40.0, 65.0, Bathroom, "Toilet"),
            FurnitureType::SinkBathroom => entry(60.0, 45.0, Bathroom, "Bathroom Sink"),
            FurnitureType::SinkKitchen => entry(80.0, 60.0, Kitchen, "Kitchen Sink"),
            FurnitureType::Stove => entry(60.0, 60.0, Kitchen, "Stove"),
            FurnitureType::Fridge => entry(70.0, 70.0, Kitchen, "Refrigerator"),
            FurnitureType::Dishwasher => entry(60.0, 60.0, Kitchen, "Dishwasher"),
            FurnitureType::Counter => entry(100.0, 60.0, Kitchen, "Counter"),
            FurnitureType::Plant => entry(40.0, 40.0, Outdoor, "Plant"),
            FurnitureType::PlantLarge => entry(60.0, 60.0, Outdoor, "Large Plant"),
            FurnitureType::Custom => None,
        }
    }

    /// Default `(width, height)`. Custom items start empty and take their outline's size.
    pub fn default_size(self) -> (f64, f64) {
        self.preset().map_or((0.0, 0.0), |p| (p.width, p.height))
    }

    pub fn label(self) -> &'static str {
        self.preset().map_or("Custom", |p| p.label)
    }

    pub fn category(self) -> Option<FurnitureCategory> {
        self.preset().map(|p| p.category)
    }

    /// Presets belonging to `category`, in catalog order.
    pub fn in_category(category: FurnitureCategory) -> impl Iterator<Item = FurnitureType> {
        Self::PRESETS
            .into_iter()
            .filter(move |t| t.category() == Some(category))
    }
}

/// Predefined room outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomTemplate {
    Rectangle,
    Square,
    LShape,
    UShape,
    TShape,
}

impl RoomTemplate {
    pub const ALL: [RoomTemplate; 5] = [
        RoomTemplate::Rectangle,
        RoomTemplate::Square,
        RoomTemplate::LShape,
        RoomTemplate::UShape,
        RoomTemplate::TShape,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoomTemplate::Rectangle => "Rectangle",
            RoomTemplate::Square => "Square",
            RoomTemplate::LShape => "L-Shape",
            RoomTemplate::UShape => "U-Shape",
            RoomTemplate::TShape => "T-Shape",
        }
    }

    /// Outline with its top-left bounds corner at the origin.
    pub fn outline(self) -> Vec<Point> {
        let coords: &[(f64, f64)] = match self {
            RoomTemplate::Rectangle => &[(0.0, 0.0), (400.0, 0.0), (400.0, 300.0), (0.0, 300.0)],
            RoomTemplate::Square => &[(0.0, 0.0), (300.0, 0.0), (300.0, 300.0), (0.0, 300.0)],
            RoomTemplate::LShape => &[
                (0.0, 0.0),
                (400.0, 0.0),
                (400.0, 150.0),
                (200.0, 150.0),
                (200.0, 300.0),
                (0.0, 300.0),
            ],
            RoomTemplate::UShape => &[
                (0.0, 0.0),
                (400.0, 0.0),
                (400.0, 300.0),
                (300.0, 300.0),
                (300.0, 100.0),
                (100.0, 100.0),
                (100.0, 300.0),
                (0.0, 300.0),
            ],
            RoomTemplate::TShape => &[
                (100.0, 0.0),
                (300.0, 0.0),
                (300.0, 100.0),
                (400.0, 100.0),
                (400.0, 200.0),
                (300.0, 200.0),
                (300.0, 300.0),
                (100.0, 300.0),
                (100.0, 200.0),
                (0.0, 200.0),
                (0.0, 100.0),
                (100.0, 100.0),
            ],
        };
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Corner vertices with the outline's bounds centered on `center`.
    pub fn vertices_at(self, center: Point) -> Vec<Vertex> {
        let outline = self.outline();
        let offset: Vec2 = center - geometry::polygon_bounds(&outline).center();
        corners_from_points(&geometry::translate_polygon(&outline, offset))
    }
}
