//! Canvas controller: owns the shape history, the construction in progress
//! and the snap state, and applies pointer and keyboard events to them.

use crate::config::CanvasConfig;
use crate::history::{History, Operation};
use crate::input::{KeyAction, Modifiers};
use crate::shapes::{DrawCommand, DrawStep, DrawType, Shape, ShapeId, ShapeSeed};
use crate::snap::{SnapEngine, SnapMode, SnappingCoordinate};
use crate::tools::{ClickOutcome, DrawStepMachine};
use kurbo::{Point, Vec2};
use serde::Serialize;
use std::sync::Arc;

/// A shape being moved in select mode.
#[derive(Debug, Clone)]
struct DragState {
    shape_id: ShapeId,
    anchor: Point,
    preview: Option<Shape>,
}

/// Flat description of the exportable shapes.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<&'a Shape>,
}

/// The drawing canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    config: CanvasConfig,
    history: History,
    snap: SnapEngine,
    machine: DrawStepMachine,
    /// Selected draw command; `None` is select mode.
    command: Option<DrawCommand>,
    draw_type: DrawType,
    /// Raw pointer position from the last move.
    pointer: Option<Point>,
    snap_result: Option<SnappingCoordinate>,
    drag: Option<DragState>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    /// An empty canvas with no tool selected.
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            snap: SnapEngine::new(&config),
            config,
            history: History::new(),
            machine: DrawStepMachine::new(),
            command: None,
            draw_type: DrawType::default(),
            pointer: None,
            snap_result: None,
            drag: None,
        }
    }

    /// Size, grid and snap settings the canvas was built with.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// The undo/redo ledger.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Shapes of the current snapshot, in insertion order.
    pub fn active_shapes(&self) -> &[Arc<Shape>] {
        self.history.shapes()
    }

    /// Look up an active shape by id.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.active_shapes()
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.as_ref())
    }

    /// Solid shapes only; supplemental shapes are construction aids.
    pub fn exportable_shapes(&self) -> Vec<&Shape> {
        self.active_shapes()
            .iter()
            .filter(|s| s.is_solid())
            .map(|s| s.as_ref())
            .collect()
    }

    /// Canvas size plus the exportable shapes.
    pub fn export_document(&self) -> ExportDocument<'_> {
        ExportDocument {
            width: self.config.width,
            height: self.config.height,
            shapes: self.exportable_shapes(),
        }
    }

    /// The export document as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.export_document())
    }

    /// The seed under construction, if any.
    pub fn preview_seed(&self) -> Option<&ShapeSeed> {
        self.machine.seed()
    }

    /// The resolved snap for the last pointer position.
    pub fn snap_result(&self) -> Option<&SnappingCoordinate> {
        self.snap_result.as_ref()
    }

    /// The step the next click will freeze.
    pub fn current_step(&self) -> Option<DrawStep> {
        self.machine.current_step()
    }

    /// The selected draw command; `None` in select mode.
    pub fn command(&self) -> Option<DrawCommand> {
        self.command
    }

    /// Draw type for newly finished shapes.
    pub fn draw_type(&self) -> DrawType {
        self.draw_type
    }

    /// The snapped coordinate if any, else the raw pointer.
    pub fn active_coordinate(&self) -> Point {
        match (&self.snap_result, self.pointer) {
            (Some(snap), _) => snap.point,
            (None, Some(raw)) => raw,
            (None, None) => Point::ZERO,
        }
    }

    /// The translated shape while a drag is under way.
    pub fn drag_preview(&self) -> Option<&Shape> {
        self.drag.as_ref().and_then(|d| d.preview.as_ref())
    }

    /// Id of the shape being dragged.
    pub fn dragged_shape(&self) -> Option<ShapeId> {
        self.drag.as_ref().map(|d| d.shape_id)
    }

    /// In select mode, the shape whose outline is nearest the pointer and
    /// within the on-shape threshold. Ties go to the lowest id.
    pub fn indicated_shape(&self) -> Option<ShapeId> {
        if self.command.is_some() {
            return None;
        }
        if let Some(drag) = &self.drag {
            return Some(drag.shape_id);
        }
        let pointer = self.pointer?;
        let threshold = self.config.snap.on_shape_threshold;
        let mut best: Option<(ShapeId, f64)> = None;
        for shape in self.active_shapes() {
            let Some(nearest) = shape.nearest_point(pointer) else {
                continue;
            };
            if nearest.distance >= threshold {
                continue;
            }
            let closer = match best {
                Some((id, d)) => {
                    nearest.distance < d || (nearest.distance == d && shape.id() < id)
                }
                None => true,
            };
            if closer {
                best = Some((shape.id(), nearest.distance));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Select a draw command and start a seed at the active coordinate.
    pub fn select_tool(&mut self, command: DrawCommand) {
        log::info!("Tool: {command:?}");
        self.drag = None;
        self.command = Some(command);
        self.machine.start(command, self.active_coordinate());
    }

    /// Drop the tool and any seed; back to select mode.
    pub fn clear_tool(&mut self) {
        self.command = None;
        self.machine.cancel();
    }

    /// Draw type given to shapes finished from now on.
    pub fn set_draw_type(&mut self, draw_type: DrawType) {
        self.draw_type = draw_type;
    }

    /// Switch between solid and supplemental drawing.
    pub fn toggle_draw_type(&mut self) {
        self.set_draw_type(self.draw_type.next());
        log::info!("Draw type: {:?}", self.draw_type);
    }

    /// Change the snap layers and re-resolve the pointer.
    pub fn set_snap_mode(&mut self, mode: SnapMode) {
        self.snap.set_mode(mode);
        self.refresh_snap();
    }

    /// Advance to the next snap mode.
    pub fn cycle_snap_mode(&mut self) {
        let mode = self.snap.config().mode.next();
        log::info!("Snap mode: {mode:?}");
        self.set_snap_mode(mode);
    }

    /// Track the pointer: re-snap, update the seed or the drag.
    pub fn on_pointer_move(&mut self, raw: Point) {
        self.pointer = Some(raw);
        self.refresh_snap();
        let active = self.active_coordinate();

        if let Some(command) = self.command {
            if !self.machine.is_drawing() {
                self.machine.start(command, active);
            } else if let Err(err) = self.machine.update(active) {
                log::error!("Pointer move rejected: {err}");
            }
        } else if let Some(drag) = &mut self.drag {
            let delta = active - drag.anchor;
            drag.preview = if delta == Vec2::ZERO {
                None
            } else {
                self.history
                    .shapes()
                    .iter()
                    .find(|s| s.id() == drag.shape_id)
                    .and_then(|s| s.translated(delta))
            };
        }
    }

    /// Click at the active coordinate: advance the seed or start a drag.
    pub fn on_pointer_down(&mut self) {
        let active = self.active_coordinate();
        let Some(command) = self.command else {
            if let Some(shape_id) = self.indicated_shape() {
                log::debug!("Dragging shape {shape_id}");
                self.drag = Some(DragState {
                    shape_id,
                    anchor: active,
                    preview: None,
                });
            }
            return;
        };

        if !self.machine.is_drawing() {
            self.machine.start(command, active);
        }
        match self.machine.click(active) {
            Ok(ClickOutcome::Advanced) | Ok(ClickOutcome::Refused) => {}
            Ok(ClickOutcome::Finished(constraints)) => {
                let id = self.next_shape_id();
                match Shape::new(id, self.draw_type, constraints) {
                    Some(shape) => {
                        log::info!("Added {:?} shape {id}", shape.geometry().shape_type());
                        let mut shapes = self.active_shapes().to_vec();
                        shapes.push(Arc::new(shape));
                        self.commit(shapes, Operation::AddShape);
                    }
                    None => log::error!("Finished constraints are degenerate: {constraints:?}"),
                }
            }
            Err(err) => log::error!("Pointer down rejected: {err}"),
        }
    }

    /// Commit a drag in progress.
    pub fn on_pointer_up(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let Some(moved) = drag.preview else {
            return;
        };
        let shapes: Vec<_> = self
            .active_shapes()
            .iter()
            .map(|s| {
                if s.id() == drag.shape_id {
                    Arc::new(moved.clone())
                } else {
                    Arc::clone(s)
                }
            })
            .collect();
        log::info!("Moved shape {}", drag.shape_id);
        self.commit(shapes, Operation::MoveShape);
    }

    /// Dispatch a key press through the shortcut table.
    pub fn on_key(&mut self, key: &str, modifiers: Modifiers) {
        let Some(action) = KeyAction::from_key(key, modifiers) else {
            return;
        };
        match action {
            KeyAction::Cancel => {
                if self.drag.take().is_some() {
                    log::debug!("Drag cancelled");
                } else if self.machine.is_drawing() {
                    self.machine.cancel();
                } else {
                    self.clear_tool();
                }
            }
            KeyAction::Delete => self.delete_indicated(),
            KeyAction::Undo => {
                self.undo();
            }
            KeyAction::Redo => {
                self.redo();
            }
        }
    }

    /// Step back one snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.drag = None;
        let changed = self.history.undo();
        if changed {
            self.on_shapes_changed();
        }
        changed
    }

    /// Step forward one snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.drag = None;
        let changed = self.history.redo();
        if changed {
            self.on_shapes_changed();
        }
        changed
    }

    /// Whether an earlier snapshot exists.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a later snapshot exists.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn delete_indicated(&mut self) {
        if self.machine.is_drawing() {
            return;
        }
        let Some(shape_id) = self.indicated_shape() else {
            return;
        };
        self.drag = None;
        let shapes: Vec<_> = self
            .active_shapes()
            .iter()
            .filter(|s| s.id() != shape_id)
            .cloned()
            .collect();
        log::info!("Deleted shape {shape_id}");
        self.commit(shapes, Operation::DeleteShape);
    }

    fn next_shape_id(&self) -> ShapeId {
        self.active_shapes()
            .iter()
            .map(|s| s.id())
            .max()
            .map_or(0, |id| id + 1)
    }

    fn commit(&mut self, shapes: Vec<Arc<Shape>>, operation: Operation) {
        self.history.record_snapshot(shapes, operation);
        self.on_shapes_changed();
    }

    fn on_shapes_changed(&mut self) {
        self.snap.rebuild_constraint_index(self.history.shapes());
        self.refresh_snap();
    }

    fn refresh_snap(&mut self) {
        self.snap_result = self.pointer.and_then(|raw| {
            self.snap
                .resolve(raw, self.history.shapes(), self.dragged_shape())
        });
    }
}
