//! Shape definitions: constraints, computed geometry and in-progress seeds.
//!
//! Every shape is described by the control points the user clicked
//! (its *constraints*) and the render-ready geometry derived from them (its
//! *computed* part). The computed part is only ever produced by
//! [`ConstraintSet::compute`], so the two can never disagree.

mod arc;
mod circle;
mod line;
mod rectangle;

pub use arc::{Arc, ArcCommand, ArcComputed, ArcConstraints, three_point_orientation};
pub use circle::{Circle, CircleCommand, CircleComputed, CircleConstraints};
pub use line::{Line, LineCommand, LineComputed, LineConstraints};
pub use rectangle::{Rectangle, RectangleCommand, RectangleConstraints, corners_from_diagonal};

use crate::geometry::{
    distance, nearest_point_on_arc, nearest_point_on_circle, nearest_point_on_rectangle,
    nearest_point_on_segment,
};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Unique identifier for shapes (insertion index).
pub type ShapeId = usize;

/// Whether a shape is exported or only used for construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawType {
    #[default]
    Solid,
    Supplemental,
}

impl DrawType {
    /// Toggle between solid and supplemental.
    pub fn next(self) -> Self {
        match self {
            DrawType::Solid => DrawType::Supplemental,
            DrawType::Supplemental => DrawType::Solid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Line,
    Rectangle,
    Circle,
    Arc,
}

/// A construction method, tagged by the shape it builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawCommand {
    Line(LineCommand),
    Rectangle(RectangleCommand),
    Circle(CircleCommand),
    Arc(ArcCommand),
}

impl DrawCommand {
    pub fn shape_type(self) -> ShapeType {
        match self {
            DrawCommand::Line(_) => ShapeType::Line,
            DrawCommand::Rectangle(_) => ShapeType::Rectangle,
            DrawCommand::Circle(_) => ShapeType::Circle,
            DrawCommand::Arc(_) => ShapeType::Arc,
        }
    }

    /// Ordered draw steps for this construction method.
    pub fn steps(self) -> &'static [DrawStep] {
        ShapeConstraints::seeded(self, Point::ZERO).steps()
    }
}

/// One click in a multi-click construction sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawStep {
    StartPoint,
    EndPoint,
    Corner1Point,
    Corner2Point,
    CenterPoint,
    CornerPoint,
    CircumferencePoint,
    Point1,
    Point2,
    OnLinePoint,
}

/// Constraint points of one shape type, per construction method.
pub trait ConstraintSet: Clone {
    type Command: Copy;
    type Computed;

    fn command(&self) -> Self::Command;

    /// Constraints for `command` with every point at `point`.
    fn seeded(command: Self::Command, point: Point) -> Self;

    fn steps(&self) -> &'static [DrawStep];

    /// The field filled in by `step`, or `None` if `step` does not belong
    /// to this construction method.
    fn point_mut(&mut self, step: DrawStep) -> Option<&mut Point>;

    /// Derive the render-ready geometry; `None` if degenerate.
    fn compute(&self) -> Option<Self::Computed>;

    fn point(&self, step: DrawStep) -> Option<Point> {
        self.clone().point_mut(step).map(|p| *p)
    }

    /// Returns false if `step` does not belong to this construction method.
    fn set_point(&mut self, step: DrawStep, point: Point) -> bool {
        match self.point_mut(step) {
            Some(slot) => {
                *slot = point;
                true
            }
            None => false,
        }
    }

    fn translate(&mut self, delta: Vec2) {
        for &step in self.steps() {
            if let Some(slot) = self.point_mut(step) {
                *slot += delta;
            }
        }
    }
}

/// Constraints of any shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeConstraints {
    Line(LineConstraints),
    Rectangle(RectangleConstraints),
    Circle(CircleConstraints),
    Arc(ArcConstraints),
}

impl ShapeConstraints {
    pub fn seeded(command: DrawCommand, point: Point) -> Self {
        match command {
            DrawCommand::Line(c) => ShapeConstraints::Line(LineConstraints::seeded(c, point)),
            DrawCommand::Rectangle(c) => {
                ShapeConstraints::Rectangle(RectangleConstraints::seeded(c, point))
            }
            DrawCommand::Circle(c) => {
                ShapeConstraints::Circle(CircleConstraints::seeded(c, point))
            }
            DrawCommand::Arc(c) => ShapeConstraints::Arc(ArcConstraints::seeded(c, point)),
        }
    }

    pub fn command(&self) -> DrawCommand {
        match self {
            ShapeConstraints::Line(c) => DrawCommand::Line(c.command()),
            ShapeConstraints::Rectangle(c) => DrawCommand::Rectangle(c.command()),
            ShapeConstraints::Circle(c) => DrawCommand::Circle(c.command()),
            ShapeConstraints::Arc(c) => DrawCommand::Arc(c.command()),
        }
    }

    pub fn steps(&self) -> &'static [DrawStep] {
        match self {
            ShapeConstraints::Line(c) => c.steps(),
            ShapeConstraints::Rectangle(c) => c.steps(),
            ShapeConstraints::Circle(c) => c.steps(),
            ShapeConstraints::Arc(c) => c.steps(),
        }
    }

    pub fn point(&self, step: DrawStep) -> Option<Point> {
        match self {
            ShapeConstraints::Line(c) => c.point(step),
            ShapeConstraints::Rectangle(c) => c.point(step),
            ShapeConstraints::Circle(c) => c.point(step),
            ShapeConstraints::Arc(c) => c.point(step),
        }
    }

    pub fn set_point(&mut self, step: DrawStep, point: Point) -> bool {
        match self {
            ShapeConstraints::Line(c) => c.set_point(step, point),
            ShapeConstraints::Rectangle(c) => c.set_point(step, point),
            ShapeConstraints::Circle(c) => c.set_point(step, point),
            ShapeConstraints::Arc(c) => c.set_point(step, point),
        }
    }

    pub fn translated(mut self, delta: Vec2) -> Self {
        match &mut self {
            ShapeConstraints::Line(c) => c.translate(delta),
            ShapeConstraints::Rectangle(c) => c.translate(delta),
            ShapeConstraints::Circle(c) => c.translate(delta),
            ShapeConstraints::Arc(c) => c.translate(delta),
        }
        self
    }

    /// Build the shape geometry, or `None` if the constraints are degenerate.
    pub fn build(&self) -> Option<ShapeGeometry> {
        match *self {
            ShapeConstraints::Line(c) => Line::new(c).map(ShapeGeometry::Line),
            ShapeConstraints::Rectangle(c) => Rectangle::new(c).map(ShapeGeometry::Rectangle),
            ShapeConstraints::Circle(c) => Circle::new(c).map(ShapeGeometry::Circle),
            ShapeConstraints::Arc(c) => Arc::new(c).map(ShapeGeometry::Arc),
        }
    }
}

/// Why a point of a shape is worth snapping to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintPointKind {
    LineEdge,
    RectangleCorner,
    CircleCenter,
    ArcCenter,
    ArcEdge,
}

/// Which outline a nearest point was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnShapeKind {
    OnLine,
    OnRectangle,
    Circumference,
    OnArc,
}

/// Nearest point on a shape's outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeNearest {
    pub point: Point,
    pub distance: f64,
    /// The point is an endpoint or corner (already a constraint point).
    pub is_terminal: bool,
    pub kind: OnShapeKind,
}

/// Finished geometry of any shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeGeometry {
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Arc(Arc),
}

impl ShapeGeometry {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeGeometry::Line(_) => ShapeType::Line,
            ShapeGeometry::Rectangle(_) => ShapeType::Rectangle,
            ShapeGeometry::Circle(_) => ShapeType::Circle,
            ShapeGeometry::Arc(_) => ShapeType::Arc,
        }
    }

    pub fn constraints(&self) -> ShapeConstraints {
        match self {
            ShapeGeometry::Line(s) => ShapeConstraints::Line(*s.constraints()),
            ShapeGeometry::Rectangle(s) => ShapeConstraints::Rectangle(*s.constraints()),
            ShapeGeometry::Circle(s) => ShapeConstraints::Circle(*s.constraints()),
            ShapeGeometry::Arc(s) => ShapeConstraints::Arc(*s.constraints()),
        }
    }

    pub fn command(&self) -> DrawCommand {
        self.constraints().command()
    }

    /// Points that feed the constraint-point snap index.
    pub fn constraint_points(&self) -> Vec<(Point, ConstraintPointKind)> {
        match self {
            ShapeGeometry::Line(line) => {
                let c = line.computed();
                vec![
                    (c.start_point, ConstraintPointKind::LineEdge),
                    (c.end_point, ConstraintPointKind::LineEdge),
                ]
            }
            ShapeGeometry::Rectangle(rect) => rect
                .computed()
                .corners()
                .into_iter()
                .map(|p| (p, ConstraintPointKind::RectangleCorner))
                .collect(),
            ShapeGeometry::Circle(circle) => {
                vec![(circle.computed().center, ConstraintPointKind::CircleCenter)]
            }
            ShapeGeometry::Arc(arc) => {
                let c = arc.computed();
                vec![
                    (c.span.center, ConstraintPointKind::ArcCenter),
                    (c.start_point, ConstraintPointKind::ArcEdge),
                    (c.end_point, ConstraintPointKind::ArcEdge),
                ]
            }
        }
    }

    /// Nearest point on the outline; `None` for a circle or arc when `p` is
    /// the center.
    pub fn nearest_point(&self, p: Point) -> Option<ShapeNearest> {
        match self {
            ShapeGeometry::Line(line) => {
                let n = nearest_point_on_segment(p, line.segment());
                Some(ShapeNearest {
                    point: n.point,
                    distance: n.distance,
                    is_terminal: n.is_terminal,
                    kind: OnShapeKind::OnLine,
                })
            }
            ShapeGeometry::Rectangle(rect) => {
                let n = nearest_point_on_rectangle(p, rect.computed());
                Some(ShapeNearest {
                    point: n.point,
                    distance: n.distance,
                    is_terminal: n.is_corner,
                    kind: OnShapeKind::OnRectangle,
                })
            }
            ShapeGeometry::Circle(circle) => {
                let c = circle.computed();
                let point = nearest_point_on_circle(p, c.center, c.radius)?;
                Some(ShapeNearest {
                    point,
                    distance: distance(p, point),
                    is_terminal: false,
                    kind: OnShapeKind::Circumference,
                })
            }
            ShapeGeometry::Arc(arc) => {
                let n = nearest_point_on_arc(p, &arc.computed().span)?;
                Some(ShapeNearest {
                    point: n.point,
                    distance: n.distance,
                    is_terminal: n.is_terminal,
                    kind: OnShapeKind::OnArc,
                })
            }
        }
    }
}

/// A finished shape on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    id: ShapeId,
    draw_type: DrawType,
    geometry: ShapeGeometry,
}

impl Shape {
    /// Build a finished shape, or `None` if the constraints are degenerate.
    pub fn new(id: ShapeId, draw_type: DrawType, constraints: ShapeConstraints) -> Option<Self> {
        Some(Self {
            id,
            draw_type,
            geometry: constraints.build()?,
        })
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn draw_type(&self) -> DrawType {
        self.draw_type
    }

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    pub fn is_solid(&self) -> bool {
        self.draw_type == DrawType::Solid
    }

    /// The same shape moved by `delta`, with its geometry recomputed.
    pub fn translated(&self, delta: Vec2) -> Option<Self> {
        Self::new(
            self.id,
            self.draw_type,
            self.geometry.constraints().translated(delta),
        )
    }

    /// Snap points of the shape: endpoints, corners and centers.
    pub fn constraint_points(&self) -> Vec<(Point, ConstraintPointKind)> {
        self.geometry.constraint_points()
    }

    /// Nearest point on the outline to `p`.
    pub fn nearest_point(&self, p: Point) -> Option<ShapeNearest> {
        self.geometry.nearest_point(p)
    }
}

/// A shape under construction.
///
/// Holds every constraint point of the construction method; points for
/// steps not yet clicked trail the pointer. `preview` is the geometry those
/// points produce, absent while they are degenerate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSeed {
    constraints: ShapeConstraints,
    preview: Option<ShapeGeometry>,
}

impl ShapeSeed {
    /// A seed for `command` with every point at `point`.
    pub fn new(command: DrawCommand, point: Point) -> Self {
        Self::from_constraints(ShapeConstraints::seeded(command, point))
    }

    pub fn from_constraints(constraints: ShapeConstraints) -> Self {
        Self {
            preview: constraints.build(),
            constraints,
        }
    }

    pub fn constraints(&self) -> &ShapeConstraints {
        &self.constraints
    }

    pub fn command(&self) -> DrawCommand {
        self.constraints.command()
    }

    pub fn preview(&self) -> Option<&ShapeGeometry> {
        self.preview.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_per_command() {
        assert_eq!(
            DrawCommand::Line(LineCommand::StartEnd).steps(),
            &[DrawStep::StartPoint, DrawStep::EndPoint]
        );
        assert_eq!(
            DrawCommand::Circle(CircleCommand::TwoPointsRadius).steps(),
            &[DrawStep::Point1, DrawStep::Point2, DrawStep::CenterPoint]
        );
        assert_eq!(
            DrawCommand::Arc(ArcCommand::ThreePoints).steps(),
            &[DrawStep::StartPoint, DrawStep::EndPoint, DrawStep::OnLinePoint]
        );
    }

    #[test]
    fn test_seed_is_degenerate_until_points_differ() {
        let seed = ShapeSeed::new(DrawCommand::Line(LineCommand::StartEnd), Point::new(1.0, 2.0));
        assert!(seed.preview().is_none());
        assert_eq!(seed.command(), DrawCommand::Line(LineCommand::StartEnd));

        let mut constraints = *seed.constraints();
        assert!(constraints.set_point(DrawStep::EndPoint, Point::new(5.0, 2.0)));
        assert!(ShapeSeed::from_constraints(constraints).preview().is_some());
    }

    #[test]
    fn test_translated_recomputes_geometry() {
        let shape = Shape::new(
            7,
            DrawType::Supplemental,
            ShapeConstraints::Circle(CircleConstraints::CenterDiameter {
                center_point: Point::new(0.0, 0.0),
                circumference_point: Point::new(3.0, 4.0),
            }),
        )
        .unwrap();
        let moved = shape.translated(Vec2::new(10.0, -2.0)).unwrap();
        assert_eq!(moved.id(), 7);
        assert_eq!(moved.draw_type(), DrawType::Supplemental);
        let ShapeGeometry::Circle(circle) = moved.geometry() else {
            panic!("expected circle");
        };
        assert_eq!(circle.computed().center, Point::new(10.0, -2.0));
        assert!((circle.computed().radius - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_constraint_points() {
        let arc = Shape::new(
            0,
            DrawType::Solid,
            ShapeConstraints::Arc(ArcConstraints::CenterTwoPoints {
                center_point: Point::new(0.0, 0.0),
                start_point: Point::new(10.0, 0.0),
                end_point: Point::new(0.0, -10.0),
            }),
        )
        .unwrap();
        let kinds: Vec<_> = arc.constraint_points().into_iter().map(|(_, k)| k).collect();
        assert_eq!(
            kinds,
            vec![
                ConstraintPointKind::ArcCenter,
                ConstraintPointKind::ArcEdge,
                ConstraintPointKind::ArcEdge
            ]
        );
    }

    #[test]
    fn test_nearest_point_dispatch() {
        let line = Shape::new(
            0,
            DrawType::Solid,
            ShapeConstraints::Line(LineConstraints::StartEnd {
                start_point: Point::new(0.0, 0.0),
                end_point: Point::new(100.0, 0.0),
            }),
        )
        .unwrap();
        let nearest = line.nearest_point(Point::new(40.0, 6.0)).unwrap();
        assert_eq!(nearest.point, Point::new(40.0, 0.0));
        assert_eq!(nearest.kind, OnShapeKind::OnLine);
        assert!(!nearest.is_terminal);
    }
}
