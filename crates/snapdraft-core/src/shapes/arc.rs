//! Circular arc shape.

use super::{ConstraintSet, DrawStep};
use crate::geometry::{
    ArcSpan, angle_delta_from_start, central_angle_from_horizontal, cross, distance,
    equidistant_point,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Relative tolerance (scaled by radius squared) under which a cross product
/// counts as zero.
const CROSS_SIGN_TOLERANCE: f64 = 1e-12;

/// Construction methods for arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcCommand {
    CenterTwoPoints,
    ThreePoints,
}

/// User-supplied control points of an arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ArcConstraints {
    /// Center, start point (fixes the radius) and a point giving the end angle.
    CenterTwoPoints {
        center_point: Point,
        start_point: Point,
        end_point: Point,
    },
    /// Both endpoints and a point the arc passes through.
    ThreePoints {
        start_point: Point,
        end_point: Point,
        on_line_point: Point,
    },
}

/// Render-ready arc geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcComputed {
    pub span: ArcSpan,
    pub start_point: Point,
    pub end_point: Point,
    /// The arc covers more than half the circle.
    pub is_large_arc: bool,
}

fn sign(value: f64, tolerance: f64) -> i8 {
    if value.abs() <= tolerance {
        0
    } else if value > 0.0 {
        1
    } else {
        -1
    }
}

/// Direction and short/long choice for an arc through three points.
///
/// Uses the signs of three cross products taken around the triangle:
/// (start→center, start→on_line), (end→center, end→start) and
/// (on_line→center, on_line→end). The short arc is the one whose outer two
/// signs agree and differ from the middle one. Returns
/// `(is_counter_clockwise, is_large_arc)`.
pub fn three_point_orientation(
    center: Point,
    start: Point,
    end: Point,
    on_line: Point,
) -> (bool, bool) {
    let radius = distance(center, on_line);
    let tolerance = CROSS_SIGN_TOLERANCE * radius * radius;

    let outer_start = sign(cross(center - start, on_line - start), tolerance);
    let middle = sign(cross(center - end, start - end), tolerance);
    let outer_end = sign(cross(center - on_line, end - on_line), tolerance);

    let is_short = outer_start != 0 && outer_start == outer_end && middle != outer_start;
    // Screen y points down, so a positive cross product is counter-clockwise
    // in the inverted angle convention.
    let is_counter_clockwise = if is_short { outer_start > 0 } else { middle > 0 };
    (is_counter_clockwise, !is_short)
}

impl ConstraintSet for ArcConstraints {
    type Command = ArcCommand;
    type Computed = ArcComputed;

    fn command(&self) -> ArcCommand {
        match self {
            ArcConstraints::CenterTwoPoints { .. } => ArcCommand::CenterTwoPoints,
            ArcConstraints::ThreePoints { .. } => ArcCommand::ThreePoints,
        }
    }

    fn seeded(command: ArcCommand, point: Point) -> Self {
        match command {
            ArcCommand::CenterTwoPoints => ArcConstraints::CenterTwoPoints {
                center_point: point,
                start_point: point,
                end_point: point,
            },
            ArcCommand::ThreePoints => ArcConstraints::ThreePoints {
                start_point: point,
                end_point: point,
                on_line_point: point,
            },
        }
    }

    fn steps(&self) -> &'static [DrawStep] {
        match self {
            ArcConstraints::CenterTwoPoints { .. } => &[
                DrawStep::CenterPoint,
                DrawStep::StartPoint,
                DrawStep::EndPoint,
            ],
            ArcConstraints::ThreePoints { .. } => &[
                DrawStep::StartPoint,
                DrawStep::EndPoint,
                DrawStep::OnLinePoint,
            ],
        }
    }

    fn point_mut(&mut self, step: DrawStep) -> Option<&mut Point> {
        match (self, step) {
            (ArcConstraints::CenterTwoPoints { center_point, .. }, DrawStep::CenterPoint) => {
                Some(center_point)
            }
            (ArcConstraints::CenterTwoPoints { start_point, .. }, DrawStep::StartPoint)
            | (ArcConstraints::ThreePoints { start_point, .. }, DrawStep::StartPoint) => {
                Some(start_point)
            }
            (ArcConstraints::CenterTwoPoints { end_point, .. }, DrawStep::EndPoint)
            | (ArcConstraints::ThreePoints { end_point, .. }, DrawStep::EndPoint) => {
                Some(end_point)
            }
            (ArcConstraints::ThreePoints { on_line_point, .. }, DrawStep::OnLinePoint) => {
                Some(on_line_point)
            }
            _ => None,
        }
    }

    fn compute(&self) -> Option<ArcComputed> {
        match *self {
            ArcConstraints::CenterTwoPoints {
                center_point,
                start_point,
                end_point,
            } => {
                let radius = distance(center_point, start_point);
                let start_angle = central_angle_from_horizontal(start_point, center_point)?;
                let end_angle = central_angle_from_horizontal(end_point, center_point)?;
                let delta = angle_delta_from_start(start_angle, end_angle);
                if delta == 0.0 {
                    return None;
                }
                let span = ArcSpan {
                    center: center_point,
                    radius,
                    start_angle,
                    end_angle,
                    angle_delta_from_start: delta,
                    is_counter_clockwise: true,
                };
                Some(ArcComputed {
                    span,
                    start_point,
                    // The end point only fixes the angle; project it onto the circle.
                    end_point: span.end_point(),
                    is_large_arc: delta > 180.0,
                })
            }
            ArcConstraints::ThreePoints {
                start_point,
                end_point,
                on_line_point,
            } => {
                let center = equidistant_point(start_point, end_point, on_line_point)?;
                let radius = distance(center, on_line_point);
                let start_angle = central_angle_from_horizontal(start_point, center)?;
                let end_angle = central_angle_from_horizontal(end_point, center)?;
                let (is_counter_clockwise, is_large_arc) =
                    three_point_orientation(center, start_point, end_point, on_line_point);
                Some(ArcComputed {
                    span: ArcSpan {
                        center,
                        radius,
                        start_angle,
                        end_angle,
                        angle_delta_from_start: angle_delta_from_start(start_angle, end_angle),
                        is_counter_clockwise,
                    },
                    start_point,
                    end_point,
                    is_large_arc,
                })
            }
        }
    }
}

/// A finished arc.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arc {
    constraints: ArcConstraints,
    computed: ArcComputed,
}

impl Arc {
    /// Build an arc, or `None` if its points are coincident or collinear.
    pub fn new(constraints: ArcConstraints) -> Option<Self> {
        let computed = constraints.compute()?;
        Some(Self {
            constraints,
            computed,
        })
    }

    pub fn constraints(&self) -> &ArcConstraints {
        &self.constraints
    }

    pub fn computed(&self) -> &ArcComputed {
        &self.computed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{circumference_coord_from_angle, equidistant_line};
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_three_points_center_is_equidistant() {
        let start_point = Point::new(0.0, 0.0);
        let end_point = Point::new(10.0, 0.0);
        let on_line_point = Point::new(5.0, 5.0);
        let arc = Arc::new(ArcConstraints::ThreePoints {
            start_point,
            end_point,
            on_line_point,
        })
        .unwrap();
        let center = arc.computed().span.center;
        let r = arc.computed().span.radius;
        assert!((distance(center, start_point) - r).abs() < EPS);
        assert!((distance(center, end_point) - r).abs() < EPS);
        assert!((distance(center, on_line_point) - r).abs() < EPS);

        // The center sits on both bisectors.
        for (a, b) in [(start_point, on_line_point), (on_line_point, end_point)] {
            let bisector = equidistant_line(a, b).unwrap();
            let off = (center - bisector.point).cross(bisector.unit_vector).abs();
            assert!(off < EPS);
        }
    }

    #[test]
    fn test_three_points_semicircle_below() {
        // (5, 5) is below the chord on screen, so the arc is the lower half:
        // counter-clockwise from 180 through 270 to 0.
        let arc = Arc::new(ArcConstraints::ThreePoints {
            start_point: Point::new(0.0, 0.0),
            end_point: Point::new(10.0, 0.0),
            on_line_point: Point::new(5.0, 5.0),
        })
        .unwrap();
        let computed = arc.computed();
        assert!((computed.span.start_angle - 180.0).abs() < EPS);
        assert!(computed.span.end_angle.abs() < EPS || (computed.span.end_angle - 360.0).abs() < EPS);
        assert!(!computed.is_large_arc);
        assert!(computed.span.is_counter_clockwise);
        assert!(computed.span.contains_angle(270.0));
        assert!(!computed.span.contains_angle(90.0));
    }

    #[test]
    fn test_three_points_long_arc() {
        let center = Point::new(0.0, 0.0);
        let start_point = circumference_coord_from_angle(center, 10.0, 10.0);
        let end_point = circumference_coord_from_angle(center, 10.0, 80.0);
        let on_line_point = circumference_coord_from_angle(center, 10.0, 200.0);
        let arc = Arc::new(ArcConstraints::ThreePoints {
            start_point,
            end_point,
            on_line_point,
        })
        .unwrap();
        let computed = arc.computed();
        assert!(computed.is_large_arc);
        assert!(!computed.span.is_counter_clockwise);
        assert!((computed.span.sweep() - 290.0).abs() < EPS);
    }

    #[test]
    fn test_collinear_three_points_rejected() {
        assert!(
            Arc::new(ArcConstraints::ThreePoints {
                start_point: Point::new(0.0, 0.0),
                end_point: Point::new(10.0, 0.0),
                on_line_point: Point::new(5.0, 0.0),
            })
            .is_none()
        );
    }

    #[test]
    fn test_center_two_points() {
        let arc = Arc::new(ArcConstraints::CenterTwoPoints {
            center_point: Point::new(0.0, 0.0),
            start_point: Point::new(10.0, 0.0),
            // Only the direction matters; the end lands on the circle.
            end_point: Point::new(0.0, -3.0),
        })
        .unwrap();
        let computed = arc.computed();
        assert!((computed.span.radius - 10.0).abs() < EPS);
        assert!((computed.span.angle_delta_from_start - 90.0).abs() < EPS);
        assert!(!computed.is_large_arc);
        assert!((computed.end_point.x).abs() < EPS);
        assert!((computed.end_point.y + 10.0).abs() < EPS);
    }

    #[test]
    fn test_center_two_points_wraps_and_long() {
        let arc = Arc::new(ArcConstraints::CenterTwoPoints {
            center_point: Point::new(0.0, 0.0),
            start_point: Point::new(0.0, -10.0),
            // 90 degrees to 45 degrees wraps through zero: 315 degree sweep.
            end_point: Point::new(5.0, -5.0),
        })
        .unwrap();
        let computed = arc.computed();
        assert!((computed.span.angle_delta_from_start - 315.0).abs() < EPS);
        assert!(computed.is_large_arc);
    }

    #[test]
    fn test_center_two_points_same_angle_rejected() {
        assert!(
            Arc::new(ArcConstraints::CenterTwoPoints {
                center_point: Point::new(0.0, 0.0),
                start_point: Point::new(10.0, 0.0),
                end_point: Point::new(3.0, 0.0),
            })
            .is_none()
        );
    }

    proptest! {
        #[test]
        fn three_point_arc_passes_through_on_line_point(
            cx in -200.0f64..200.0,
            cy in -200.0f64..200.0,
            radius in 1.0f64..300.0,
            a in 0.0f64..360.0,
            b in 0.0f64..360.0,
            c in 0.0f64..360.0,
        ) {
            let separated = |x: f64, y: f64| {
                let d = angle_delta_from_start(x, y);
                d > 1.0 && d < 359.0
            };
            prop_assume!(separated(a, b) && separated(b, c) && separated(a, c));
            prop_assume!((angle_delta_from_start(a, b) - 180.0).abs() > 1e-3);

            let center = Point::new(cx, cy);
            let start_point = circumference_coord_from_angle(center, radius, a);
            let end_point = circumference_coord_from_angle(center, radius, b);
            let on_line_point = circumference_coord_from_angle(center, radius, c);
            let arc = Arc::new(ArcConstraints::ThreePoints { start_point, end_point, on_line_point });
            prop_assert!(arc.is_some());
            let computed = *arc.unwrap().computed();

            // Oracle: the on-line point lies inside the covered span, and the
            // large-arc flag agrees with the span's sweep.
            let on_line_angle = central_angle_from_horizontal(on_line_point, computed.span.center).unwrap();
            prop_assert!(computed.span.contains_angle(on_line_angle));
            prop_assert_eq!(computed.is_large_arc, computed.span.sweep() > 180.0);
        }
    }
}
