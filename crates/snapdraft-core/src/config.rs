//! Canvas and snapping configuration.

use crate::snap::SnapMode;
use serde::{Deserialize, Serialize};

/// Grid spacing in canvas units (matches the visual grid).
pub const DEFAULT_GRID_SPACING: f64 = 20.0;

/// Snapping parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub mode: SnapMode,
    /// Half-width, in whole pixels, of the cell window indexed around each
    /// snap point.
    pub cell_radius: i64,
    /// Maximum distance from the pointer to a shape outline for on-shape
    /// snapping and shape indication.
    pub on_shape_threshold: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            mode: SnapMode::All,
            cell_radius: 4,
            on_shape_threshold: 10.0,
        }
    }
}

/// Canvas dimensions, grid and snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub grid_spacing: f64,
    pub snap: SnapConfig,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            grid_spacing: DEFAULT_GRID_SPACING,
            snap: SnapConfig::default(),
        }
    }
}
