//! Editor settings and display units.
//!
//! Scene coordinates are centimeters. Settings only affect how lengths are
//! presented and which snapping aids are active.

use crate::snap::GRID_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnit {
    Mm,
    #[default]
    Cm,
    M,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImperialUnit {
    In,
    #[default]
    Ft,
}

/// User-facing settings. Every field falls back to its default when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub unit_system: UnitSystem,
    pub metric_unit: MetricUnit,
    pub imperial_unit: ImperialUnit,
    pub grid_snap: bool,
    pub element_snap: bool,
    pub grid_size: f64,
    pub show_grid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::default(),
            metric_unit: MetricUnit::default(),
            imperial_unit: ImperialUnit::default(),
            grid_snap: true,
            element_snap: true,
            grid_size: GRID_SIZE,
            show_grid: true,
        }
    }
}

impl Settings {
    /// Replace values that would break snapping.
    pub fn sanitized(mut self) -> Self {
        if self.grid_size <= 0.0 || !self.grid_size.is_finite() {
            self.grid_size = GRID_SIZE;
        }
        self
    }

    /// Convert a scene length (cm) to the active display unit.
    pub fn to_display(&self, cm: f64) -> f64 {
        match self.unit_system {
            UnitSystem::Metric => match self.metric_unit {
                MetricUnit::Mm => cm * 10.0,
                MetricUnit::Cm => cm,
                MetricUnit::M => cm / 100.0,
            },
            UnitSystem::Imperial => match self.imperial_unit {
                ImperialUnit::In => cm / 2.54,
                ImperialUnit::Ft => cm / 30.48,
            },
        }
    }

    /// Convert a length in the active display unit back to scene units.
    pub fn to_scene_units(&self, value: f64) -> f64 {
        match self.unit_system {
            UnitSystem::Metric => match self.metric_unit {
                MetricUnit::Mm => value / 10.0,
                MetricUnit::Cm => value,
                MetricUnit::M => value * 100.0,
            },
            UnitSystem::Imperial => match self.imperial_unit {
                ImperialUnit::In => value * 2.54,
                ImperialUnit::Ft => value * 30.48,
            },
        }
    }

    /// Format a scene length with its unit label.
    pub fn format_length(&self, cm: f64) -> String {
        let value = self.to_display(cm);
        match self.unit_system {
            UnitSystem::Metric => match self.metric_unit {
                MetricUnit::M if value < 1.0 => format!("{:.0} cm", value * 100.0),
                MetricUnit::Mm => format!("{value:.1} mm"),
                MetricUnit::Cm => format!("{value:.1} cm"),
                MetricUnit::M => format!("{value:.1} m"),
            },
            UnitSystem::Imperial => match self.imperial_unit {
                ImperialUnit::In => format!("{value:.1}\""),
                ImperialUnit::Ft => {
                    let feet = value.floor();
                    let inches = (value - feet) * 12.0;
                    if feet == 0.0 {
                        format!("{inches:.0}\"")
                    } else if inches < 0.5 {
                        format!("{feet:.0}'")
                    } else {
                        format!("{feet:.0}'{inches:.0}\"")
                    }
                }
            },
        }
    }

    /// Format a scene area (cm²) in square display units.
    pub fn format_area(&self, cm2: f64) -> String {
        match self.unit_system {
            UnitSystem::Metric => format!("{:.2} m²", cm2 / 10_000.0),
            UnitSystem::Imperial => format!("{:.1} ft²", cm2 / (30.48 * 30.48)),
        }
    }
}
