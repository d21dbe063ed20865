use crate::math::{point, Angle, Point, Transform};
use crate::path::{FillRule, LineCap, LineJoin, PathBuffer, PathTag};
use crate::{
    FillTessellator, StrokeOptions, Stroker, TessellationError, Trapezoids, UnsupportedParameter,
};

use std::vec;

fn stroke(path: &PathBuffer, options: &StrokeOptions, transform: &Transform) -> PathBuffer {
    let mut stroker = Stroker::new(options, transform);
    let mut outline = PathBuffer::new();
    stroker.stroke(path, &mut outline).unwrap();

    outline
}

// Goes through the fill pipeline so that the probes below see exactly what
// a renderer would, including the outline's non-zero fill rule.
fn fill(outline: &PathBuffer) -> Trapezoids {
    let mut tessellator = FillTessellator::new();
    let mut output = Trapezoids::new();
    tessellator.fill_path(outline, 0.01, &mut output).unwrap();

    output
}

fn area(trapezoids: &Trapezoids) -> f32 {
    let mut total = 0.0;
    for t in trapezoids {
        let top_width = t.right_x_at(t.top) - t.left_x_at(t.top);
        let bottom_width = t.right_x_at(t.bottom) - t.left_x_at(t.bottom);
        total += 0.5 * (top_width + bottom_width) * (t.bottom - t.top);
    }

    total
}

fn assert_area(trapezoids: &Trapezoids, expected: f32) {
    let total = area(trapezoids);
    assert!(
        (total - expected).abs() <= expected.max(1.0) * 0.01,
        "area {:?}, expected {:?}",
        total,
        expected
    );
}

fn covered(trapezoids: &Trapezoids, position: Point) -> bool {
    trapezoids.iter().any(|t| {
        position.y >= t.top
            && position.y < t.bottom
            && position.x >= t.left_x_at(position.y)
            && position.x < t.right_x_at(position.y)
    })
}

fn start_tags(path: &PathBuffer) -> usize {
    path.tags().iter().filter(|t| t.is_start()).count()
}

#[test]
fn single_segment_flat_stroke_is_one_rectangle() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(100.0, 0.0));

    let options = StrokeOptions::default().with_line_width(4.0);
    let outline = stroke(&path, &options, &Transform::identity());

    assert_eq!(outline.len(), 4);
    assert_eq!(start_tags(&outline), 1);
    assert_eq!(outline.fill_rule(), FillRule::NonZero);

    let trapezoids = fill(&outline);
    assert_eq!(trapezoids.len(), 1);
    let t = trapezoids.as_slice()[0];
    assert_eq!(t.top, -2.0);
    assert_eq!(t.bottom, 2.0);
    assert_eq!(t.left_x_at(-2.0), 0.0);
    assert_eq!(t.left_x_at(2.0), 0.0);
    assert_eq!(t.right_x_at(-2.0), 100.0);
    assert_eq!(t.right_x_at(2.0), 100.0);
}

#[test]
fn figures_are_stroked_independently() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));
    path.start_figure();
    path.add_line(point(0.0, 5.0), point(10.0, 5.0));

    let options = StrokeOptions::default().with_line_width(2.0);
    let outline = stroke(&path, &options, &Transform::identity());
    assert_eq!(outline.len(), 8);
    assert_eq!(start_tags(&outline), 2);

    let trapezoids = fill(&outline);
    assert!(covered(&trapezoids, point(5.0, 0.0)));
    assert!(covered(&trapezoids, point(5.0, 5.0)));
    assert!(!covered(&trapezoids, point(5.0, 2.5)));
}

#[test]
fn hairline_strokes_are_plain_quads() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));
    path.add_line(point(10.0, 0.0), point(10.0, 10.0));

    // Caps and joins are configured but must not show up.
    for &width in &[0.0, 1.0] {
        let options = StrokeOptions::default()
            .with_line_width(width)
            .with_line_cap(LineCap::Round)
            .with_line_join(LineJoin::Round);
        let outline = stroke(&path, &options, &Transform::identity());

        assert_eq!(outline.len(), 8);
        assert_eq!(start_tags(&outline), 2);
        assert!(outline.tags()[0].is_start());
        assert!(outline.tags()[4].is_start());

        let trapezoids = fill(&outline);
        assert!(covered(&trapezoids, point(5.0, 0.0)));
        assert!(covered(&trapezoids, point(10.0, 5.0)));
        assert!(!covered(&trapezoids, point(5.0, 5.0)));
    }
}

#[test]
fn hairline_width_follows_the_device_transform() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));

    // Half a unit wide, scaled up to exactly one device unit.
    let options = StrokeOptions::default().with_line_width(0.5);
    let outline = stroke(&path, &options, &Transform::scale(2.0, 2.0));

    assert_eq!(outline.len(), 4);
    assert_eq!(start_tags(&outline), 1);

    let trapezoids = fill(&outline);
    assert!(covered(&trapezoids, point(15.0, 0.7)));
    assert!(!covered(&trapezoids, point(15.0, 1.5)));
    assert_area(&trapezoids, 40.0);
}

#[test]
fn miter_joins_meet_in_a_point() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));
    path.add_line(point(10.0, 0.0), point(10.0, 10.0));

    let options = StrokeOptions::default().with_line_width(2.0);
    let outline = stroke(&path, &options, &Transform::identity());
    // Two quads and a four point join wedge.
    assert_eq!(outline.len(), 12);
    assert_eq!(start_tags(&outline), 3);

    let trapezoids = fill(&outline);
    assert!(covered(&trapezoids, point(10.5, -0.4)));
    assert!(covered(&trapezoids, point(10.9, -0.9)));
    assert_area(&trapezoids, 40.0);

    let options = options.with_line_join(LineJoin::Bevel);
    let outline = stroke(&path, &options, &Transform::identity());
    assert_eq!(outline.len(), 11);

    let trapezoids = fill(&outline);
    assert!(covered(&trapezoids, point(10.5, -0.4)));
    // The miter tip is cut off.
    assert!(!covered(&trapezoids, point(10.9, -0.9)));
    assert_area(&trapezoids, 39.5);
}

#[test]
fn sharp_turns_fall_back_to_bevel() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));
    path.add_line(point(10.0, 0.0), point(0.0, 0.5));

    // A near-reversal: the miter ratio is about 40.
    let options = StrokeOptions::default().with_line_width(2.0);
    let outline = stroke(&path, &options, &Transform::identity());
    assert_eq!(outline.len(), 11);

    let options = options.with_miter_limit(100.0);
    let outline = stroke(&path, &options, &Transform::identity());
    assert_eq!(outline.len(), 12);

    let options = options.with_line_join(LineJoin::MiterClipped);
    let outline = stroke(&path, &options, &Transform::identity());
    assert_eq!(outline.len(), 12);
}

#[test]
fn round_joins_and_caps_cover_the_corners() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));
    path.add_line(point(10.0, 0.0), point(10.0, 10.0));

    let options = StrokeOptions::default()
        .with_line_width(4.0)
        .with_line_cap(LineCap::Round)
        .with_line_join(LineJoin::Round)
        .with_tolerance(0.01);
    let trapezoids = fill(&stroke(&path, &options, &Transform::identity()));

    // Start cap disc, join disc, end cap disc.
    assert!(covered(&trapezoids, point(-1.5, 0.0)));
    assert!(covered(&trapezoids, point(11.3, -1.3)));
    assert!(covered(&trapezoids, point(10.0, 11.9)));

    let options = options
        .with_line_cap(LineCap::Flat)
        .with_line_join(LineJoin::Bevel);
    let trapezoids = fill(&stroke(&path, &options, &Transform::identity()));

    assert!(!covered(&trapezoids, point(-1.5, 0.0)));
    assert!(!covered(&trapezoids, point(11.3, -1.3)));
    assert!(!covered(&trapezoids, point(10.0, 11.9)));
}

#[test]
fn square_and_triangle_caps_extend_past_the_ends() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));

    let options = StrokeOptions::default()
        .with_line_width(4.0)
        .with_line_cap(LineCap::Square);
    let outline = stroke(&path, &options, &Transform::identity());
    assert_eq!(outline.len(), 12);
    assert_eq!(start_tags(&outline), 3);

    let trapezoids = fill(&outline);
    assert!(covered(&trapezoids, point(-1.5, 0.0)));
    assert!(covered(&trapezoids, point(11.5, 0.0)));
    assert_area(&trapezoids, 72.0);

    let options = options.with_line_cap(LineCap::Triangle);
    let outline = stroke(&path, &options, &Transform::identity());
    assert_eq!(outline.len(), 10);

    let trapezoids = fill(&outline);
    // The points protrude half the line width and taper.
    assert!(covered(&trapezoids, point(-1.0, 0.5)));
    assert!(covered(&trapezoids, point(11.0, 0.5)));
    assert!(!covered(&trapezoids, point(11.0, 1.5)));
}

#[test]
fn anchor_caps_are_centered_on_the_end_point() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(20.0, 0.0));

    let base = StrokeOptions::default().with_line_width(4.0);

    // A square anchor one and a half times the stroke radius.
    let options = base.with_end_cap(LineCap::SquareAnchor);
    let trapezoids = fill(&stroke(&path, &options, &Transform::identity()));
    assert!(covered(&trapezoids, point(22.0, 2.5)));
    assert!(covered(&trapezoids, point(18.0, -2.5)));
    assert!(!covered(&trapezoids, point(22.0, 3.5)));

    // A diamond twice the stroke radius; it overlaps the shaft and must
    // wind the same way as the quads to stay filled there.
    let options = base.with_end_cap(LineCap::DiamondAnchor);
    let trapezoids = fill(&stroke(&path, &options, &Transform::identity()));
    assert!(covered(&trapezoids, point(22.0, 1.0)));
    assert!(covered(&trapezoids, point(19.0, 2.5)));
    assert!(covered(&trapezoids, point(19.5, 0.5)));
    assert!(!covered(&trapezoids, point(23.5, 1.5)));

    // NoAnchor strokes exactly like a flat cap.
    let options = base.with_end_cap(LineCap::NoAnchor);
    let outline = stroke(&path, &options, &Transform::identity());
    let flat = stroke(&path, &base, &Transform::identity());
    assert_eq!(outline.points(), flat.points());
    assert_eq!(outline.tags(), flat.tags());
}

#[test]
fn arrow_anchors_retract_the_shaft() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(20.0, 0.0));

    let options = StrokeOptions::default()
        .with_line_width(4.0)
        .with_end_cap(LineCap::ArrowAnchor);
    let outline = stroke(&path, &options, &Transform::identity());

    // The arrowhead tip sits exactly on the end point.
    assert!(outline.points().iter().any(|p| *p == point(20.0, 0.0)));

    let trapezoids = fill(&outline);
    assert!(covered(&trapezoids, point(19.9, 0.0)));
    assert!(covered(&trapezoids, point(14.0, 1.9)));
    // Outside the arrowhead, where the unretracted shaft would have been.
    assert!(!covered(&trapezoids, point(19.9, 1.5)));
    assert!(!covered(&trapezoids, point(13.0, 3.0)));

    let flat = fill(&stroke(
        &path,
        &StrokeOptions::default().with_line_width(4.0),
        &Transform::identity(),
    ));
    assert!(covered(&flat, point(19.9, 1.5)));
}

#[test]
fn pen_transform_shapes_the_pen() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(0.0, 10.0));

    let options = StrokeOptions::default()
        .with_line_width(4.0)
        .with_pen_transform(Transform::scale(2.0, 1.0));
    let trapezoids = fill(&stroke(&path, &options, &Transform::identity()));
    assert!(covered(&trapezoids, point(3.5, 5.0)));
    assert!(!covered(&trapezoids, point(4.5, 5.0)));
    assert!(!covered(&trapezoids, point(0.0, -0.5)));
    assert_area(&trapezoids, 80.0);

    let options = StrokeOptions::default().with_line_width(4.0);
    let trapezoids = fill(&stroke(&path, &options, &Transform::identity()));
    assert!(!covered(&trapezoids, point(3.5, 5.0)));
    assert_area(&trapezoids, 40.0);
}

#[test]
fn pen_translation_offsets_the_stamps() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));

    let options = StrokeOptions::default()
        .with_line_width(2.0)
        .with_pen_transform(Transform::translation(0.0, 5.0));
    let trapezoids = fill(&stroke(&path, &options, &Transform::identity()));

    assert!(covered(&trapezoids, point(5.0, 5.0)));
    assert!(!covered(&trapezoids, point(5.0, 0.0)));
    assert_area(&trapezoids, 20.0);
}

#[test]
fn device_scale_widens_the_stroke() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));

    let options = StrokeOptions::default().with_line_width(4.0);
    let trapezoids = fill(&stroke(&path, &options, &Transform::scale(2.0, 2.0)));

    assert_eq!(trapezoids.len(), 1);
    let t = trapezoids.as_slice()[0];
    assert_eq!(t.top, -4.0);
    assert_eq!(t.bottom, 4.0);
    assert_eq!(t.left_x_at(-4.0), 0.0);
    assert_eq!(t.right_x_at(4.0), 20.0);
    assert_area(&trapezoids, 160.0);
}

#[test]
fn device_rotation_spins_the_outline() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));

    let transform = Transform::rotation(Angle::radians(core::f32::consts::FRAC_PI_2));
    let options = StrokeOptions::default().with_line_width(4.0);
    let trapezoids = fill(&stroke(&path, &options, &transform));

    assert!(covered(&trapezoids, point(1.5, 5.0)));
    assert!(!covered(&trapezoids, point(5.0, 1.5)));
    assert_area(&trapezoids, 40.0);
}

#[test]
fn invalid_inputs_leave_the_output_untouched() {
    let mut valid = PathBuffer::new();
    valid.add_line(point(0.0, 0.0), point(10.0, 0.0));

    let options = StrokeOptions::default().with_line_width(2.0);
    let mut stroker = Stroker::new(&options, &Transform::identity());
    stroker.set_logging(true);
    let mut output = PathBuffer::new();
    stroker.stroke(&valid, &mut output).unwrap();
    assert_eq!(output.len(), 4);

    let unopened = PathBuffer::from_raw(vec![point(0.0, 0.0)], vec![PathTag::LINE]);
    let status = stroker.stroke(&unopened, &mut output);
    assert!(matches!(status, Err(TessellationError::MalformedPath(_))));
    assert_eq!(output.len(), 4);

    let mut nan_path = PathBuffer::new();
    nan_path.add_line(point(0.0, 0.0), point(f32::NAN, 1.0));
    let status = stroker.stroke(&nan_path, &mut output);
    assert_eq!(
        status,
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::PositionIsNaN
        ))
    );
    assert_eq!(output.len(), 4);

    let mut bad_tolerance = Stroker::new(&options.with_tolerance(f32::NAN), &Transform::identity());
    let status = bad_tolerance.stroke(&valid, &mut output);
    assert_eq!(
        status,
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::ToleranceIsNaN
        ))
    );
    assert_eq!(output.len(), 4);

    // Successful strokes append to what is already there.
    stroker.stroke(&valid, &mut output).unwrap();
    assert_eq!(output.len(), 8);
    assert_eq!(start_tags(&output), 2);
}

#[test]
fn closed_paths_have_no_caps() {
    let mut path = PathBuffer::new();
    path.add_polygon(&[
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
    ])
    .unwrap();

    let options = StrokeOptions::default().with_line_width(2.0);
    let outline = stroke(&path, &options, &Transform::identity());
    // Four quads and four miter wedges, one of them at the seam.
    assert_eq!(outline.len(), 32);
    assert_eq!(start_tags(&outline), 8);

    let with_caps = stroke(
        &path,
        &options.with_line_cap(LineCap::Square),
        &Transform::identity(),
    );
    assert_eq!(outline.points(), with_caps.points());
    assert_eq!(outline.tags(), with_caps.tags());

    let trapezoids = fill(&outline);
    // The seam corner is covered by the join between the closing segment
    // and the first one.
    assert!(covered(&trapezoids, point(-0.6, -0.6)));
    assert!(covered(&trapezoids, point(0.0, 5.0)));
    assert!(!covered(&trapezoids, point(5.0, 5.0)));
    assert_area(&trapezoids, 80.0);
}

#[test]
fn bezier_input_is_flattened_before_stroking() {
    let mut path = PathBuffer::new();
    path.add_bezier(
        point(0.0, 0.0),
        point(5.0, -5.0),
        point(15.0, -5.0),
        point(20.0, 0.0),
    );

    let options = StrokeOptions::default()
        .with_line_width(2.0)
        .with_tolerance(0.01);
    let outline = stroke(&path, &options, &Transform::identity());

    assert!(!outline.is_empty());
    assert!(!outline.has_curves());
    assert!(outline.len() > 8);

    let trapezoids = fill(&outline);
    // On-curve points at t = 1/4 and t = 1/2.
    assert!(covered(&trapezoids, point(4.53, -2.81)));
    assert!(covered(&trapezoids, point(10.0, -3.75)));
}

#[test]
fn lone_points_get_caps_only() {
    let path = PathBuffer::from_raw(vec![point(5.0, 5.0)], vec![PathTag::START]);

    let flat = StrokeOptions::default().with_line_width(4.0);
    let outline = stroke(&path, &flat, &Transform::identity());
    assert!(outline.is_empty());

    let round = flat.with_line_cap(LineCap::Round).with_tolerance(0.01);
    let outline = stroke(&path, &round, &Transform::identity());
    assert_eq!(start_tags(&outline), 2);

    let trapezoids = fill(&outline);
    assert!(covered(&trapezoids, point(6.9, 5.0)));
    assert!(covered(&trapezoids, point(5.0, 3.1)));
    assert!(!covered(&trapezoids, point(7.5, 7.5)));

    // Hairlines have no caps, so a lone point draws nothing.
    let hairline = StrokeOptions::default().with_line_width(1.0);
    let outline = stroke(&path, &hairline, &Transform::identity());
    assert!(outline.is_empty());
}
