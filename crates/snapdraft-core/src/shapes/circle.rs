//! Circle shape.

use super::{ConstraintSet, DrawStep};
use crate::geometry::{distance, equidistant_line, nearest_point_on_line};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Construction methods for circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleCommand {
    CenterDiameter,
    TwoPoints,
    TwoPointsRadius,
}

/// User-supplied control points of a circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CircleConstraints {
    /// Center plus a point on the circumference.
    CenterDiameter {
        center_point: Point,
        circumference_point: Point,
    },
    /// Both ends of a diameter.
    TwoPoints { point1: Point, point2: Point },
    /// Two points on the circumference plus a center hint, projected onto
    /// their perpendicular bisector.
    TwoPointsRadius {
        point1: Point,
        point2: Point,
        center_point: Point,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleComputed {
    pub center: Point,
    pub radius: f64,
}

impl ConstraintSet for CircleConstraints {
    type Command = CircleCommand;
    type Computed = CircleComputed;

    fn command(&self) -> CircleCommand {
        match self {
            CircleConstraints::CenterDiameter { .. } => CircleCommand::CenterDiameter,
            CircleConstraints::TwoPoints { .. } => CircleCommand::TwoPoints,
            CircleConstraints::TwoPointsRadius { .. } => CircleCommand::TwoPointsRadius,
        }
    }

    fn seeded(command: CircleCommand, point: Point) -> Self {
        match command {
            CircleCommand::CenterDiameter => CircleConstraints::CenterDiameter {
                center_point: point,
                circumference_point: point,
            },
            CircleCommand::TwoPoints => CircleConstraints::TwoPoints {
                point1: point,
                point2: point,
            },
            CircleCommand::TwoPointsRadius => CircleConstraints::TwoPointsRadius {
                point1: point,
                point2: point,
                center_point: point,
            },
        }
    }

    fn steps(&self) -> &'static [DrawStep] {
        match self {
            CircleConstraints::CenterDiameter { .. } => {
                &[DrawStep::CenterPoint, DrawStep::CircumferencePoint]
            }
            CircleConstraints::TwoPoints { .. } => &[DrawStep::Point1, DrawStep::Point2],
            CircleConstraints::TwoPointsRadius { .. } => {
                &[DrawStep::Point1, DrawStep::Point2, DrawStep::CenterPoint]
            }
        }
    }

    fn point_mut(&mut self, step: DrawStep) -> Option<&mut Point> {
        match (self, step) {
            (CircleConstraints::CenterDiameter { center_point, .. }, DrawStep::CenterPoint) => {
                Some(center_point)
            }
            (
                CircleConstraints::CenterDiameter {
                    circumference_point,
                    ..
                },
                DrawStep::CircumferencePoint,
            ) => Some(circumference_point),
            (CircleConstraints::TwoPoints { point1, .. }, DrawStep::Point1) => Some(point1),
            (CircleConstraints::TwoPoints { point2, .. }, DrawStep::Point2) => Some(point2),
            (CircleConstraints::TwoPointsRadius { point1, .. }, DrawStep::Point1) => Some(point1),
            (CircleConstraints::TwoPointsRadius { point2, .. }, DrawStep::Point2) => Some(point2),
            (CircleConstraints::TwoPointsRadius { center_point, .. }, DrawStep::CenterPoint) => {
                Some(center_point)
            }
            _ => None,
        }
    }

    fn compute(&self) -> Option<CircleComputed> {
        let computed = match *self {
            CircleConstraints::CenterDiameter {
                center_point,
                circumference_point,
            } => CircleComputed {
                center: center_point,
                radius: distance(center_point, circumference_point),
            },
            CircleConstraints::TwoPoints { point1, point2 } => CircleComputed {
                center: point1.midpoint(point2),
                radius: distance(point1, point2) / 2.0,
            },
            CircleConstraints::TwoPointsRadius {
                point1,
                point2,
                center_point,
            } => {
                // Projecting onto the bisector keeps both points on the circle.
                let bisector = equidistant_line(point1, point2)?;
                let center = nearest_point_on_line(center_point, bisector);
                CircleComputed {
                    center,
                    radius: distance(center, point1),
                }
            }
        };
        if computed.radius > 0.0 {
            Some(computed)
        } else {
            None
        }
    }
}

/// A finished circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    constraints: CircleConstraints,
    computed: CircleComputed,
}

impl Circle {
    /// Build a circle, or `None` for a zero radius.
    pub fn new(constraints: CircleConstraints) -> Option<Self> {
        let computed = constraints.compute()?;
        Some(Self {
            constraints,
            computed,
        })
    }

    pub fn constraints(&self) -> &CircleConstraints {
        &self.constraints
    }

    pub fn computed(&self) -> &CircleComputed {
        &self.computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_center_diameter() {
        let circle = Circle::new(CircleConstraints::CenterDiameter {
            center_point: Point::new(10.0, 10.0),
            circumference_point: Point::new(13.0, 14.0),
        })
        .unwrap();
        assert_eq!(circle.computed().center, Point::new(10.0, 10.0));
        assert!((circle.computed().radius - 5.0).abs() < EPS);
    }

    #[test]
    fn test_two_points() {
        let circle = Circle::new(CircleConstraints::TwoPoints {
            point1: Point::new(0.0, 0.0),
            point2: Point::new(10.0, 0.0),
        })
        .unwrap();
        assert_eq!(circle.computed().center, Point::new(5.0, 0.0));
        assert!((circle.computed().radius - 5.0).abs() < EPS);
    }

    #[test]
    fn test_two_points_radius_passes_through_both_points() {
        let point1 = Point::new(0.0, 0.0);
        let point2 = Point::new(10.0, 0.0);
        // Off the bisector on purpose.
        let circle = Circle::new(CircleConstraints::TwoPointsRadius {
            point1,
            point2,
            center_point: Point::new(7.0, 12.0),
        })
        .unwrap();
        let CircleComputed { center, radius } = *circle.computed();
        assert!((center.x - 5.0).abs() < EPS);
        assert!((center.y - 12.0).abs() < EPS);
        assert!((distance(center, point1) - radius).abs() < EPS);
        assert!((distance(center, point2) - radius).abs() < EPS);
    }

    #[test]
    fn test_degenerate_circles() {
        let p = Point::new(1.0, 1.0);
        assert!(
            Circle::new(CircleConstraints::CenterDiameter {
                center_point: p,
                circumference_point: p
            })
            .is_none()
        );
        assert!(
            Circle::new(CircleConstraints::TwoPointsRadius {
                point1: p,
                point2: p,
                center_point: Point::new(4.0, 4.0)
            })
            .is_none()
        );
    }
}
