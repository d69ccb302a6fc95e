//! Rectangle shape.

use super::{ConstraintSet, DrawStep};
use crate::geometry::RectCorners;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Construction methods for rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectangleCommand {
    TwoCorners,
    CenterCorner,
}

/// User-supplied control points of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RectangleConstraints {
    /// Two opposite corners.
    TwoCorners {
        corner1_point: Point,
        corner2_point: Point,
    },
    /// The center and one corner.
    CenterCorner {
        center_point: Point,
        corner_point: Point,
    },
}

/// Derive the four corners from a diagonal.
///
/// Branches on the sign of the diagonal's slope and on which corner has the
/// smaller x. Returns `None` when the rectangle has zero width or height.
pub fn corners_from_diagonal(corner1: Point, corner2: Point) -> Option<RectCorners> {
    let rise = corner2.y - corner1.y;
    let run = corner2.x - corner1.x;
    if rise == 0.0 || run == 0.0 {
        return None;
    }
    let slope = rise / run;
    let first_is_left = corner1.x < corner2.x;

    let corners = if slope > 0.0 && first_is_left {
        RectCorners {
            upper_left: corner1,
            upper_right: Point::new(corner2.x, corner1.y),
            lower_left: Point::new(corner1.x, corner2.y),
            lower_right: corner2,
        }
    } else if slope > 0.0 {
        RectCorners {
            upper_left: corner2,
            upper_right: Point::new(corner1.x, corner2.y),
            lower_left: Point::new(corner2.x, corner1.y),
            lower_right: corner1,
        }
    } else if first_is_left {
        RectCorners {
            upper_left: Point::new(corner1.x, corner2.y),
            upper_right: corner2,
            lower_left: corner1,
            lower_right: Point::new(corner2.x, corner1.y),
        }
    } else {
        RectCorners {
            upper_left: Point::new(corner2.x, corner1.y),
            upper_right: corner1,
            lower_left: corner2,
            lower_right: Point::new(corner1.x, corner2.y),
        }
    };
    Some(corners)
}

impl ConstraintSet for RectangleConstraints {
    type Command = RectangleCommand;
    type Computed = RectCorners;

    fn command(&self) -> RectangleCommand {
        match self {
            RectangleConstraints::TwoCorners { .. } => RectangleCommand::TwoCorners,
            RectangleConstraints::CenterCorner { .. } => RectangleCommand::CenterCorner,
        }
    }

    fn seeded(command: RectangleCommand, point: Point) -> Self {
        match command {
            RectangleCommand::TwoCorners => RectangleConstraints::TwoCorners {
                corner1_point: point,
                corner2_point: point,
            },
            RectangleCommand::CenterCorner => RectangleConstraints::CenterCorner {
                center_point: point,
                corner_point: point,
            },
        }
    }

    fn steps(&self) -> &'static [DrawStep] {
        match self {
            RectangleConstraints::TwoCorners { .. } => {
                &[DrawStep::Corner1Point, DrawStep::Corner2Point]
            }
            RectangleConstraints::CenterCorner { .. } => {
                &[DrawStep::CenterPoint, DrawStep::CornerPoint]
            }
        }
    }

    fn point_mut(&mut self, step: DrawStep) -> Option<&mut Point> {
        match (self, step) {
            (RectangleConstraints::TwoCorners { corner1_point, .. }, DrawStep::Corner1Point) => {
                Some(corner1_point)
            }
            (RectangleConstraints::TwoCorners { corner2_point, .. }, DrawStep::Corner2Point) => {
                Some(corner2_point)
            }
            (RectangleConstraints::CenterCorner { center_point, .. }, DrawStep::CenterPoint) => {
                Some(center_point)
            }
            (RectangleConstraints::CenterCorner { corner_point, .. }, DrawStep::CornerPoint) => {
                Some(corner_point)
            }
            _ => None,
        }
    }

    fn compute(&self) -> Option<RectCorners> {
        match *self {
            RectangleConstraints::TwoCorners {
                corner1_point,
                corner2_point,
            } => corners_from_diagonal(corner1_point, corner2_point),
            RectangleConstraints::CenterCorner {
                center_point,
                corner_point,
            } => {
                let opposite = Point::new(
                    2.0 * center_point.x - corner_point.x,
                    2.0 * center_point.y - corner_point.y,
                );
                corners_from_diagonal(corner_point, opposite)
            }
        }
    }
}

/// A finished axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rectangle {
    constraints: RectangleConstraints,
    computed: RectCorners,
}

impl Rectangle {
    /// Build a rectangle, or `None` if it is degenerate.
    pub fn new(constraints: RectangleConstraints) -> Option<Self> {
        let computed = constraints.compute()?;
        Some(Self {
            constraints,
            computed,
        })
    }

    pub fn constraints(&self) -> &RectangleConstraints {
        &self.constraints
    }

    pub fn computed(&self) -> &RectCorners {
        &self.computed
    }

    pub fn width(&self) -> f64 {
        self.computed.upper_right.x - self.computed.upper_left.x
    }

    pub fn height(&self) -> f64 {
        self.computed.lower_left.y - self.computed.upper_left.y
    }
}
