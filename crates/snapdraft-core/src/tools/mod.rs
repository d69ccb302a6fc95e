//! Draw-step state machine for multi-click shape construction.

use crate::shapes::{DrawCommand, DrawStep, ShapeConstraints, ShapeSeed};
use kurbo::Point;
use thiserror::Error;

/// Errors from driving the state machine out of order.
#[derive(Debug, Error, PartialEq)]
pub enum ToolError {
    #[error("step {step:?} does not belong to {command:?}")]
    StepMismatch { step: DrawStep, command: DrawCommand },
    #[error("no shape is being drawn")]
    NotDrawing,
}

/// State of a construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// No seed.
    #[default]
    Idle,
    /// A seed waiting for the click at `step_index`.
    Drawing { step_index: usize, seed: ShapeSeed },
}

/// Result of a click while drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The step was frozen and the next one is current.
    Advanced,
    /// The click would produce degenerate geometry; nothing changed.
    Refused,
    /// The last step was clicked. The machine is idle again.
    Finished(ShapeConstraints),
}

/// Drives a [`ShapeSeed`] through the steps of its draw command.
#[derive(Debug, Clone, Default)]
pub struct DrawStepMachine {
    state: ToolState,
}

impl DrawStepMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    /// Begin a new seed for `command` at the active coordinate, replacing any
    /// seed in progress.
    pub fn start(&mut self, command: DrawCommand, active: Point) {
        log::debug!("Starting {command:?} at {active:?}");
        self.state = ToolState::Drawing {
            step_index: 0,
            seed: ShapeSeed::new(command, active),
        };
    }

    /// Discard the seed.
    pub fn cancel(&mut self) {
        if self.is_drawing() {
            log::debug!("Construction cancelled");
        }
        self.state = ToolState::Idle;
    }

    pub fn seed(&self) -> Option<&ShapeSeed> {
        match &self.state {
            ToolState::Drawing { seed, .. } => Some(seed),
            ToolState::Idle => None,
        }
    }

    /// The step the next click will freeze.
    pub fn current_step(&self) -> Option<DrawStep> {
        match &self.state {
            ToolState::Drawing { step_index, seed } => {
                seed.constraints().steps().get(*step_index).copied()
            }
            ToolState::Idle => None,
        }
    }

    /// Recompute the trailing fields of the seed from the active coordinate.
    ///
    /// Returns `Ok(false)` when the last step would become degenerate; the
    /// seed then keeps its previous value.
    pub fn update(&mut self, active: Point) -> Result<bool, ToolError> {
        let ToolState::Drawing { step_index, seed } = &mut self.state else {
            return Err(ToolError::NotDrawing);
        };
        let constraints = with_trailing(seed.constraints(), *step_index, active)?;
        let is_last = *step_index + 1 == constraints.steps().len();
        let next = ShapeSeed::from_constraints(constraints);
        if is_last && next.preview().is_none() {
            return Ok(false);
        }
        *seed = next;
        Ok(true)
    }

    /// Freeze the current step at the active coordinate.
    pub fn click(&mut self, active: Point) -> Result<ClickOutcome, ToolError> {
        let ToolState::Drawing { step_index, seed } = &mut self.state else {
            return Err(ToolError::NotDrawing);
        };
        let constraints = with_trailing(seed.constraints(), *step_index, active)?;
        let steps = constraints.steps();

        if *step_index + 1 < steps.len() {
            // An intermediate point on top of a fixed one leaves nothing to build on.
            let coincides = steps[..*step_index]
                .iter()
                .any(|&step| constraints.point(step) == Some(active));
            if coincides {
                log::debug!("Refusing {:?}: coincides with a fixed point", steps[*step_index]);
                return Ok(ClickOutcome::Refused);
            }
            *step_index += 1;
            *seed = ShapeSeed::from_constraints(constraints);
            return Ok(ClickOutcome::Advanced);
        }

        if constraints.build().is_none() {
            log::debug!("Refusing to finish {:?}: degenerate geometry", constraints.command());
            return Ok(ClickOutcome::Refused);
        }
        self.state = ToolState::Idle;
        Ok(ClickOutcome::Finished(constraints))
    }
}

/// Constraints with every step from `step_index` on set to `active`.
fn with_trailing(
    constraints: &ShapeConstraints,
    step_index: usize,
    active: Point,
) -> Result<ShapeConstraints, ToolError> {
    let mut next = *constraints;
    let steps = next.steps();
    if step_index >= steps.len() {
        return Err(ToolError::NotDrawing);
    }
    for &step in &steps[step_index..] {
        if !next.set_point(step, active) {
            return Err(ToolError::StepMismatch {
                step,
                command: next.command(),
            });
        }
    }
    Ok(next)
}
