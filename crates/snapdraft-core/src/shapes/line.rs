//! Line shape.

use super::{ConstraintSet, DrawStep};
use crate::geometry::{Segment, distance};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Construction methods for lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCommand {
    StartEnd,
}

/// User-supplied control points of a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LineConstraints {
    StartEnd { start_point: Point, end_point: Point },
}

/// Render-ready line geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineComputed {
    pub start_point: Point,
    pub end_point: Point,
}

impl ConstraintSet for LineConstraints {
    type Command = LineCommand;
    type Computed = LineComputed;

    fn command(&self) -> LineCommand {
        match self {
            LineConstraints::StartEnd { .. } => LineCommand::StartEnd,
        }
    }

    fn seeded(command: LineCommand, point: Point) -> Self {
        match command {
            LineCommand::StartEnd => LineConstraints::StartEnd {
                start_point: point,
                end_point: point,
            },
        }
    }

    fn steps(&self) -> &'static [DrawStep] {
        match self {
            LineConstraints::StartEnd { .. } => &[DrawStep::StartPoint, DrawStep::EndPoint],
        }
    }

    fn point_mut(&mut self, step: DrawStep) -> Option<&mut Point> {
        match (self, step) {
            (LineConstraints::StartEnd { start_point, .. }, DrawStep::StartPoint) => {
                Some(start_point)
            }
            (LineConstraints::StartEnd { end_point, .. }, DrawStep::EndPoint) => Some(end_point),
            _ => None,
        }
    }

    fn compute(&self) -> Option<LineComputed> {
        match *self {
            LineConstraints::StartEnd {
                start_point,
                end_point,
            } => {
                if start_point == end_point {
                    return None;
                }
                Some(LineComputed {
                    start_point,
                    end_point,
                })
            }
        }
    }
}

/// A finished line segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    constraints: LineConstraints,
    computed: LineComputed,
}

impl Line {
    /// Build a line, or `None` for a zero-length one.
    pub fn new(constraints: LineConstraints) -> Option<Self> {
        let computed = constraints.compute()?;
        Some(Self {
            constraints,
            computed,
        })
    }

    pub fn constraints(&self) -> &LineConstraints {
        &self.constraints
    }

    pub fn computed(&self) -> &LineComputed {
        &self.computed
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.computed.start_point, self.computed.end_point)
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        distance(self.computed.start_point, self.computed.end_point)
    }
}
