use kurbo::Point;
use snapdraft_core::shapes::{
    ArcCommand, CircleCommand, ConstraintPointKind, LineCommand, LineConstraints,
    RectangleCommand, ShapeConstraints,
};
use snapdraft_core::{
    Canvas, CanvasConfig, DrawCommand, DrawStep, Modifiers, Operation, ShapeGeometry, SnapInfo,
    SnapMode,
};

const EPS: f64 = 1e-9;

fn canvas_without_snapping() -> Canvas {
    let mut config = CanvasConfig::default();
    config.snap.mode = SnapMode::None;
    Canvas::new(config)
}

fn click_at(canvas: &mut Canvas, p: Point) {
    canvas.on_pointer_move(p);
    canvas.on_pointer_down();
}

fn ctrl() -> Modifiers {
    Modifiers {
        ctrl: true,
        ..Modifiers::default()
    }
}

#[test]
fn test_line_end_to_end() {
    let mut canvas = Canvas::default();
    canvas.select_tool(DrawCommand::Line(LineCommand::StartEnd));
    click_at(&mut canvas, Point::new(55.0, 105.0));
    canvas.on_pointer_move(Point::new(155.0, 122.0));
    assert!(canvas.snap_result().is_none());
    canvas.on_pointer_down();

    let shapes = canvas.active_shapes();
    assert_eq!(shapes.len(), 1);
    let ShapeGeometry::Line(line) = shapes[0].geometry() else {
        panic!("expected a line");
    };
    assert_eq!(
        *line.constraints(),
        LineConstraints::StartEnd {
            start_point: Point::new(55.0, 105.0),
            end_point: Point::new(155.0, 122.0),
        }
    );
    assert!(canvas.preview_seed().is_none());
}

#[test]
fn test_rectangle_two_corners() {
    let mut canvas = canvas_without_snapping();
    canvas.select_tool(DrawCommand::Rectangle(RectangleCommand::TwoCorners));
    click_at(&mut canvas, Point::new(0.0, 0.0));
    click_at(&mut canvas, Point::new(100.0, 50.0));

    let ShapeGeometry::Rectangle(rect) = canvas.active_shapes()[0].geometry() else {
        panic!("expected a rectangle");
    };
    let corners = rect.computed();
    assert_eq!(corners.upper_left, Point::new(0.0, 0.0));
    assert_eq!(corners.upper_right, Point::new(100.0, 0.0));
    assert_eq!(corners.lower_left, Point::new(0.0, 50.0));
    assert_eq!(corners.lower_right, Point::new(100.0, 50.0));
}

#[test]
fn test_pointer_move_is_idempotent() {
    let mut canvas = canvas_without_snapping();
    canvas.select_tool(DrawCommand::Rectangle(RectangleCommand::CenterCorner));
    click_at(&mut canvas, Point::new(200.0, 200.0));

    canvas.on_pointer_move(Point::new(260.0, 230.0));
    let first = canvas.preview_seed().cloned();
    canvas.on_pointer_move(Point::new(260.0, 230.0));
    assert_eq!(canvas.preview_seed().cloned(), first);
    assert!(first.and_then(|s| s.preview().cloned()).is_some());
}

#[test]
fn test_degenerate_preview_sticks() {
    let mut canvas = canvas_without_snapping();
    canvas.select_tool(DrawCommand::Circle(CircleCommand::CenterDiameter));
    click_at(&mut canvas, Point::new(100.0, 100.0));
    canvas.on_pointer_move(Point::new(130.0, 100.0));
    let before = canvas.preview_seed().cloned();

    // Back onto the center: zero radius.
    click_at(&mut canvas, Point::new(100.0, 100.0));
    assert_eq!(canvas.preview_seed().cloned(), before);
    assert_eq!(canvas.current_step(), Some(DrawStep::CircumferencePoint));
    assert!(canvas.active_shapes().is_empty());
}

#[test]
fn test_history_undo_redo() {
    let mut canvas = canvas_without_snapping();
    assert_eq!(canvas.history().current_version(), 0);
    assert!(!canvas.can_undo());

    canvas.select_tool(DrawCommand::Line(LineCommand::StartEnd));
    click_at(&mut canvas, Point::new(10.0, 10.0));
    click_at(&mut canvas, Point::new(90.0, 40.0));
    assert_eq!(canvas.history().current_version(), 1);
    assert!(canvas.can_undo());

    canvas.on_key("z", ctrl());
    assert_eq!(canvas.history().current_version(), 0);
    assert!(canvas.active_shapes().is_empty());
    assert!(!canvas.can_undo());

    // Out of range: nothing happens.
    canvas.on_key("z", ctrl());
    assert_eq!(canvas.history().current_version(), 0);

    canvas.on_key("y", ctrl());
    assert_eq!(canvas.active_shapes().len(), 1);

    canvas.on_key("z", ctrl());
    click_at(&mut canvas, Point::new(10.0, 60.0));
    click_at(&mut canvas, Point::new(90.0, 60.0));
    assert_eq!(canvas.history().current_version(), 1);
    assert!(!canvas.can_redo());
    assert_eq!(canvas.history().current().last_operation, Operation::AddShape);
}

#[test]
fn test_constraint_point_beats_grid() {
    let mut canvas = canvas_without_snapping();
    canvas.select_tool(DrawCommand::Circle(CircleCommand::CenterDiameter));
    click_at(&mut canvas, Point::new(103.0, 102.0));
    click_at(&mut canvas, Point::new(133.0, 102.0));
    canvas.clear_tool();

    canvas.set_snap_mode(SnapMode::All);
    canvas.on_pointer_move(Point::new(101.0, 101.0));
    let snap = canvas.snap_result().unwrap();
    assert_eq!(snap.point, Point::new(103.0, 102.0));
    assert_eq!(
        snap.reasons,
        vec![SnapInfo::ShapeConstraint {
            shape_id: 0,
            point: ConstraintPointKind::CircleCenter,
        }]
    );
    assert_eq!(canvas.active_coordinate(), Point::new(103.0, 102.0));
}

#[test]
fn test_snapped_click_uses_snap_point() {
    let mut canvas = Canvas::default();
    canvas.select_tool(DrawCommand::Line(LineCommand::StartEnd));
    click_at(&mut canvas, Point::new(42.0, 38.0));
    click_at(&mut canvas, Point::new(117.0, 63.0));

    let ShapeGeometry::Line(line) = canvas.active_shapes()[0].geometry() else {
        panic!("expected a line");
    };
    assert_eq!(line.computed().start_point, Point::new(40.0, 40.0));
    assert_eq!(line.computed().end_point, Point::new(120.0, 60.0));

    // The new line's endpoint now outranks the grid point under it.
    canvas.on_pointer_move(Point::new(118.0, 61.0));
    let reasons = &canvas.snap_result().unwrap().reasons;
    assert_eq!(reasons.len(), 2);
    assert!(matches!(reasons[0], SnapInfo::ShapeConstraint { shape_id: 0, .. }));
    assert_eq!(reasons[1], SnapInfo::GridIntersection);
}

#[test]
fn test_three_point_arc_center() {
    let mut canvas = canvas_without_snapping();
    canvas.select_tool(DrawCommand::Arc(ArcCommand::ThreePoints));
    let start = Point::new(0.0, 0.0);
    let end = Point::new(10.0, 0.0);
    let on_line = Point::new(5.0, 5.0);
    click_at(&mut canvas, start);
    click_at(&mut canvas, end);
    click_at(&mut canvas, on_line);

    let shape = &canvas.active_shapes()[0];
    let ShapeGeometry::Arc(arc) = shape.geometry() else {
        panic!("expected an arc");
    };
    let center = arc.computed().span.center;
    let r = center.distance(on_line);
    assert!((center.distance(start) - r).abs() < EPS);
    assert!((center.distance(end) - r).abs() < EPS);
    assert!(matches!(
        shape.geometry().constraints(),
        ShapeConstraints::Arc(_)
    ));
}

#[test]
fn test_delete_records_snapshot() {
    let mut canvas = canvas_without_snapping();
    canvas.select_tool(DrawCommand::Line(LineCommand::StartEnd));
    click_at(&mut canvas, Point::new(10.0, 10.0));
    click_at(&mut canvas, Point::new(90.0, 10.0));
    canvas.on_key("Escape", Modifiers::default());
    canvas.on_key("Escape", Modifiers::default());

    canvas.on_pointer_move(Point::new(50.0, 14.0));
    assert_eq!(canvas.indicated_shape(), Some(0));
    canvas.on_key("Backspace", Modifiers::default());
    assert!(canvas.active_shapes().is_empty());
    assert_eq!(canvas.history().current().last_operation, Operation::DeleteShape);

    canvas.undo();
    assert_eq!(canvas.active_shapes().len(), 1);
}
