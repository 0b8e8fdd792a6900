//! Ruler measurements. These are annotations only and are not part of history.

use super::EntityId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: EntityId,
    pub start: Point,
    pub end: Point,
    pub distance: f64,
}

impl Measurement {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            distance: start.distance(end),
        }
    }

    /// Move the end point and refresh the distance.
    pub fn set_end(&mut self, end: Point) {
        self.end = end;
        self.distance = self.start.distance(end);
    }
}
