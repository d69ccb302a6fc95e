//! SnapDraft Core Library
//!
//! Geometric constraint and snapping kernel: shape constraints and their
//! derived geometry, multi-click construction, pointer snapping and an
//! undo/redo ledger, driven through the [`Canvas`] controller.

pub mod canvas;
pub mod config;
pub mod geometry;
pub mod history;
pub mod input;
pub mod shapes;
pub mod snap;
pub mod tools;

pub use canvas::{Canvas, ExportDocument};
pub use config::{CanvasConfig, SnapConfig};
pub use history::{History, Operation, Snapshot};
pub use input::{KeyAction, Modifiers};
pub use shapes::{DrawCommand, DrawStep, DrawType, Shape, ShapeGeometry, ShapeId, ShapeSeed};
pub use snap::{SnapEngine, SnapInfo, SnapMode, SnappingCoordinate};
pub use tools::{ClickOutcome, DrawStepMachine, ToolError};
