//! Stateless geometry routines shared by shapes, draw steps and snapping.
//!
//! Angles are in degrees, measured counter-clockwise from the positive x-axis
//! with the screen y-axis inverted (y grows downwards on screen).

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Tolerance for treating a quadratic discriminant as zero, relative to the
/// squared radius.
pub const DISCRIMINANT_TOLERANCE: f64 = 1e-6;

/// Tolerance below which two lines are considered parallel.
const PARALLEL_TOLERANCE: f64 = 1e-12;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Nearest point on a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentNearest {
    pub point: Point,
    pub distance: f64,
    /// The nearest point is one of the segment's endpoints.
    pub is_terminal: bool,
}

/// Project `p` onto the segment, clamping to its endpoints.
///
/// The clamp is decided by the sign of the cosine of the angle at each
/// endpoint: a non-positive cosine means the projection falls outside the
/// segment on that side.
pub fn nearest_point_on_segment(p: Point, seg: Segment) -> SegmentNearest {
    let along = seg.end - seg.start;
    let cos_at_start = (p - seg.start).dot(along);
    if cos_at_start <= 0.0 {
        return SegmentNearest {
            point: seg.start,
            distance: distance(p, seg.start),
            is_terminal: true,
        };
    }
    let cos_at_end = (p - seg.end).dot(-along);
    if cos_at_end <= 0.0 {
        return SegmentNearest {
            point: seg.end,
            distance: distance(p, seg.end),
            is_terminal: true,
        };
    }

    let t = cos_at_start / along.hypot2();
    let point = seg.start + along * t;
    SegmentNearest {
        point,
        distance: distance(p, point),
        is_terminal: false,
    }
}

/// An infinite line through `point` with direction `unit_vector`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquidistantLine {
    pub point: Point,
    pub unit_vector: Vec2,
}

/// Orthogonal projection of `p` onto an infinite line.
pub fn nearest_point_on_line(p: Point, line: EquidistantLine) -> Point {
    let t = (p - line.point).dot(line.unit_vector);
    line.point + line.unit_vector * t
}

/// Axis-aligned rectangle described by its four corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectCorners {
    pub upper_left: Point,
    pub upper_right: Point,
    pub lower_left: Point,
    pub lower_right: Point,
}

impl RectCorners {
    /// The four edges in clockwise screen order starting at the top.
    pub fn edges(&self) -> [Segment; 4] {
        [
            Segment::new(self.upper_left, self.upper_right),
            Segment::new(self.upper_right, self.lower_right),
            Segment::new(self.lower_right, self.lower_left),
            Segment::new(self.lower_left, self.upper_left),
        ]
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            self.upper_left,
            self.upper_right,
            self.lower_right,
            self.lower_left,
        ]
    }
}

/// Nearest point on a rectangle outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleNearest {
    pub point: Point,
    pub distance: f64,
    pub is_corner: bool,
}

/// Nearest point on the outline of a rectangle (minimum over its four edges).
pub fn nearest_point_on_rectangle(p: Point, rect: &RectCorners) -> RectangleNearest {
    let mut best = nearest_point_on_segment(p, rect.edges()[0]);
    for edge in &rect.edges()[1..] {
        let candidate = nearest_point_on_segment(p, *edge);
        if candidate.distance < best.distance {
            best = candidate;
        }
    }
    RectangleNearest {
        point: best.point,
        distance: best.distance,
        is_corner: best.is_terminal,
    }
}

/// Angle of `point` around `center`, in degrees within `[0, 360)`.
///
/// Returns `None` when the two points coincide.
pub fn central_angle_from_horizontal(point: Point, center: Point) -> Option<f64> {
    let dx = point.x - center.x;
    // Screen y grows downwards.
    let dy = center.y - point.y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(normalize_degrees(dy.atan2(dx).to_degrees()))
}

/// Point on the circle at `degrees` (inverse of [`central_angle_from_horizontal`]).
pub fn circumference_coord_from_angle(center: Point, radius: f64, degrees: f64) -> Point {
    let radians = degrees.to_radians();
    Point::new(
        center.x + radius * radians.cos(),
        center.y - radius * radians.sin(),
    )
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Counter-clockwise delta from `start` to `end`, in `[0, 360)`.
pub fn angle_delta_from_start(start: f64, end: f64) -> f64 {
    normalize_degrees(end - start)
}

/// Intersections of a circle with the infinite line through `line`.
///
/// Returns zero, one (tangent, discriminant within
/// [`DISCRIMINANT_TOLERANCE`] of `radius²`) or two points ordered along the line from
/// `line.start` towards `line.end`. A zero-length `line` has no direction
/// and yields no intersections.
pub fn circle_line_intersections(center: Point, radius: f64, line: Segment) -> Vec<Point> {
    let along = line.end - line.start;
    let length = along.hypot();
    if length == 0.0 {
        return Vec::new();
    }
    let unit = along / length;
    let offset = line.start - center;

    // |offset + t * unit|^2 = r^2 with |unit| = 1:
    // t^2 + 2 * half_b * t + c = 0
    let half_b = offset.dot(unit);
    let c = offset.hypot2() - radius * radius;
    let discriminant = half_b * half_b - c;

    if discriminant.abs() <= DISCRIMINANT_TOLERANCE * radius * radius {
        vec![line.start + unit * -half_b]
    } else if discriminant < 0.0 {
        Vec::new()
    } else {
        let root = discriminant.sqrt();
        vec![
            line.start + unit * (-half_b - root),
            line.start + unit * (-half_b + root),
        ]
    }
}

/// Nearest point on a full circle's circumference.
///
/// Returns `None` when `p` is the center.
pub fn nearest_point_on_circle(p: Point, center: Point, radius: f64) -> Option<Point> {
    if p == center {
        return None;
    }
    closer_to(
        p,
        &circle_line_intersections(center, radius, Segment::new(center, p)),
    )
}

/// Angular extent of an arc, expressed counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpan {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Counter-clockwise delta from start angle to end angle, in `[0, 360)`.
    pub angle_delta_from_start: f64,
    /// The arc runs counter-clockwise from start to end.
    pub is_counter_clockwise: bool,
}

impl ArcSpan {
    /// Lower bound and counter-clockwise sweep of the covered angles.
    fn ccw_range(&self) -> (f64, f64) {
        if self.is_counter_clockwise {
            (self.start_angle, self.angle_delta_from_start)
        } else {
            (self.end_angle, 360.0 - self.angle_delta_from_start)
        }
    }

    /// Angle covered by the arc, in degrees.
    pub fn sweep(&self) -> f64 {
        self.ccw_range().1
    }

    /// Whether `degrees` lies on the arc (endpoints included).
    pub fn contains_angle(&self, degrees: f64) -> bool {
        let (from, sweep) = self.ccw_range();
        angle_delta_from_start(from, degrees) <= sweep
    }

    pub fn start_point(&self) -> Point {
        circumference_coord_from_angle(self.center, self.radius, self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        circumference_coord_from_angle(self.center, self.radius, self.end_angle)
    }
}

/// Nearest point on an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcNearest {
    pub point: Point,
    pub distance: f64,
    pub is_terminal: bool,
}

/// Nearest point on an arc; `None` only when `p` is the arc's center.
pub fn nearest_point_on_arc(p: Point, arc: &ArcSpan) -> Option<ArcNearest> {
    let angle = central_angle_from_horizontal(p, arc.center)?;

    if arc.contains_angle(angle) {
        let point = nearest_point_on_circle(p, arc.center, arc.radius)?;
        return Some(ArcNearest {
            point,
            distance: distance(p, point),
            is_terminal: false,
        });
    }

    let start = arc.start_point();
    let end = arc.end_point();
    let point = if distance(p, start) <= distance(p, end) {
        start
    } else {
        end
    };
    Some(ArcNearest {
        point,
        distance: distance(p, point),
        is_terminal: true,
    })
}

/// Perpendicular bisector of `p1p2`, or `None` if the points coincide.
pub fn equidistant_line(p1: Point, p2: Point) -> Option<EquidistantLine> {
    let along = p2 - p1;
    let length = along.hypot();
    if length == 0.0 {
        return None;
    }
    Some(EquidistantLine {
        point: p1.midpoint(p2),
        unit_vector: Vec2::new(-along.y / length, along.x / length),
    })
}

/// Point equidistant from three points (the circumcenter).
///
/// Solves the intersection of the bisectors of `p1p2` and `p2p3` as a 2x2
/// linear system. Returns `None` for coincident or collinear input.
pub fn equidistant_point(p1: Point, p2: Point, p3: Point) -> Option<Point> {
    let first = equidistant_line(p1, p2)?;
    let second = equidistant_line(p2, p3)?;

    // first.point + s * u1 = second.point + t * u2
    let u1 = first.unit_vector;
    let u2 = second.unit_vector;
    let determinant = u1.cross(u2);
    if determinant.abs() < PARALLEL_TOLERANCE {
        return None;
    }
    let rhs = second.point - first.point;
    let s = rhs.cross(u2) / determinant;
    Some(first.point + u1 * s)
}

/// 2-D cross product of `a` and `b` in screen coordinates.
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.cross(b)
}

/// The candidate closest to `p`, first one on ties.
pub fn closer_to(p: Point, candidates: &[Point]) -> Option<Point> {
    candidates.iter().copied().fold(None, |best, candidate| match best {
        Some(b) if distance(p, b) <= distance(p, candidate) => Some(b),
        _ => Some(candidate),
    })
}
