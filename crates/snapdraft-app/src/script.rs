//! Event scripts: a recorded sequence of input events replayed against a
//! canvas.

use kurbo::Point;
use serde::Deserialize;
use snapdraft_core::{Canvas, CanvasConfig, DrawCommand, DrawType, Modifiers, SnapMode};

/// One input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    SelectTool {
        command: DrawCommand,
    },
    ClearTool,
    DrawType {
        draw_type: DrawType,
    },
    ToggleDrawType,
    SnapMode {
        mode: SnapMode,
    },
    CycleSnapMode,
    Move {
        x: f64,
        y: f64,
    },
    Down,
    Up,
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        meta: bool,
        #[serde(default)]
        alt: bool,
    },
    Undo,
    Redo,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: CanvasConfig,
    pub events: Vec<Event>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply every event to a fresh canvas.
    pub fn replay(&self) -> Canvas {
        let mut canvas = Canvas::new(self.config);
        log::debug!(
            "Canvas {}x{}, grid {}",
            canvas.config().width,
            canvas.config().height,
            canvas.config().grid_spacing
        );
        for event in &self.events {
            apply(&mut canvas, event);
        }
        log::info!(
            "Replayed {} events: {} shapes at version {}",
            self.events.len(),
            canvas.active_shapes().len(),
            canvas.history().current_version()
        );
        canvas
    }
}

fn apply(canvas: &mut Canvas, event: &Event) {
    log::trace!("{event:?}");
    match event {
        Event::SelectTool { command } => canvas.select_tool(*command),
        Event::ClearTool => canvas.clear_tool(),
        Event::DrawType { draw_type } => canvas.set_draw_type(*draw_type),
        Event::ToggleDrawType => canvas.toggle_draw_type(),
        Event::SnapMode { mode } => canvas.set_snap_mode(*mode),
        Event::CycleSnapMode => canvas.cycle_snap_mode(),
        Event::Move { x, y } => canvas.on_pointer_move(Point::new(*x, *y)),
        Event::Down => canvas.on_pointer_down(),
        Event::Up => canvas.on_pointer_up(),
        Event::Key {
            key,
            ctrl,
            shift,
            meta,
            alt,
        } => canvas.on_key(
            key,
            Modifiers {
                shift: *shift,
                ctrl: *ctrl,
                alt: *alt,
                meta: *meta,
            },
        ),
        Event::Undo => {
            canvas.undo();
        }
        Event::Redo => {
            canvas.redo();
        }
    }
}
