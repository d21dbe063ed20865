use crate::math::{point, rect, Point};
use crate::path::{FillRule, PathBuffer, PathTag};
use crate::polygon::Polygon;
use crate::{FillOptions, FillTessellator, TessellationError, Trapezoids, UnsupportedParameter};

use std::vec;

fn fill(path: &PathBuffer, fill_rule: FillRule) -> Trapezoids {
    let mut tessellator = FillTessellator::new();
    let mut output = Trapezoids::new();
    tessellator
        .tessellate_path(
            path,
            &FillOptions::tolerance(0.01).with_fill_rule(fill_rule),
            &mut output,
        )
        .unwrap();

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

#[test]
fn rectangle_is_one_trapezoid() {
    let mut path = PathBuffer::new();
    path.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0));

    for &rule in &[FillRule::EvenOdd, FillRule::NonZero] {
        let trapezoids = fill(&path, rule);
        assert_eq!(trapezoids.len(), 1);

        let t = trapezoids.as_slice()[0];
        assert_eq!(t.top, 0.0);
        assert_eq!(t.bottom, 10.0);
        assert_eq!(t.left_x_at(0.0), 0.0);
        assert_eq!(t.left_x_at(10.0), 0.0);
        assert_eq!(t.right_x_at(0.0), 10.0);
        assert_eq!(t.right_x_at(10.0), 10.0);
    }
}

#[test]
fn disjoint_rectangles_do_not_interact() {
    let mut path = PathBuffer::new();
    path.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0));
    path.add_rectangle(&rect(20.0, 0.0, 10.0, 10.0));

    let even_odd = fill(&path, FillRule::EvenOdd);
    let non_zero = fill(&path, FillRule::NonZero);

    assert_eq!(even_odd.len(), 2);
    assert_eq!(even_odd.as_slice(), non_zero.as_slice());
    assert_area(&even_odd, 200.0);
}

#[test]
fn overlapping_rectangles_follow_the_fill_rule() {
    let mut path = PathBuffer::new();
    path.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0));
    path.add_rectangle(&rect(5.0, 0.0, 10.0, 10.0));

    // Two identically wound rectangles: the overlap has winding 2, so the
    // even-odd rule punches a hole there while non-zero merges them.
    let even_odd = fill(&path, FillRule::EvenOdd);
    assert_area(&even_odd, 100.0);
    assert!(covered(&even_odd, point(2.0, 5.0)));
    assert!(!covered(&even_odd, point(7.0, 5.0)));
    assert!(covered(&even_odd, point(12.0, 5.0)));

    let non_zero = fill(&path, FillRule::NonZero);
    assert_area(&non_zero, 150.0);
    assert!(covered(&non_zero, point(2.0, 5.0)));
    assert!(covered(&non_zero, point(7.0, 5.0)));
    assert!(covered(&non_zero, point(12.0, 5.0)));
}

#[test]
fn bowtie_splits_at_the_crossing() {
    let mut path = PathBuffer::new();
    path.add_polygon(&[
        point(0.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
        point(10.0, 0.0),
    ])
    .unwrap();

    // Both lobes have winding +/-1, so the two rules agree, but the
    // crossing at (5, 5) must split the bands.
    let even_odd = fill(&path, FillRule::EvenOdd);
    let non_zero = fill(&path, FillRule::NonZero);
    assert_eq!(even_odd.as_slice(), non_zero.as_slice());

    assert!(covered(&even_odd, point(5.0, 2.0)));
    assert!(covered(&even_odd, point(5.0, 8.0)));
    assert!(!covered(&even_odd, point(1.0, 5.5)));
    assert!(!covered(&even_odd, point(9.0, 4.5)));
    assert_area(&even_odd, 50.0);
}

#[test]
fn self_intersecting_star_differs_between_rules() {
    // A five-pointed star drawn in one stroke: the pentagon in the middle
    // winds twice over.
    let mut path = PathBuffer::new();
    path.add_polygon(&[
        point(10.0, 0.0),
        point(15.8779, 18.0902),
        point(0.4894, 6.9098),
        point(19.5106, 6.9098),
        point(4.1221, 18.0902),
    ])
    .unwrap();

    let even_odd = fill(&path, FillRule::EvenOdd);
    let non_zero = fill(&path, FillRule::NonZero);
    assert_ne!(even_odd.as_slice(), non_zero.as_slice());

    // Both rules cover the spikes.
    assert!(covered(&even_odd, point(10.0, 5.0)));
    assert!(covered(&non_zero, point(10.0, 5.0)));
    // Even-odd hollows out the middle pentagon, non-zero fills it.
    assert!(!covered(&even_odd, point(10.0, 10.0)));
    assert!(covered(&non_zero, point(10.0, 10.0)));
}

#[test]
fn double_wound_square_differs_between_rules() {
    let mut path = PathBuffer::new();
    path.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0));
    path.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0));

    // Winding 2 everywhere: even parity empties the shape, non-zero
    // fills it.
    let even_odd = fill(&path, FillRule::EvenOdd);
    assert!(!covered(&even_odd, point(5.0, 5.0)));
    assert_area(&even_odd, 0.0);

    let non_zero = fill(&path, FillRule::NonZero);
    assert!(covered(&non_zero, point(5.0, 5.0)));
    assert_area(&non_zero, 100.0);
}

#[test]
fn nested_figures_interact_across_the_whole_path() {
    let mut path = PathBuffer::new();
    path.add_rectangle(&rect(0.0, 0.0, 20.0, 20.0));
    path.add_rectangle(&rect(5.0, 5.0, 10.0, 10.0));

    let even_odd = fill(&path, FillRule::EvenOdd);
    assert!(!covered(&even_odd, point(10.0, 10.0)));
    assert!(covered(&even_odd, point(2.0, 10.0)));
    assert_area(&even_odd, 300.0);

    let non_zero = fill(&path, FillRule::NonZero);
    assert!(covered(&non_zero, point(10.0, 10.0)));
    assert_area(&non_zero, 400.0);
}

#[test]
fn open_figures_are_implicitly_closed() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(10.0, 0.0));
    path.add_line(point(10.0, 0.0), point(10.0, 10.0));

    let trapezoids = fill(&path, FillRule::EvenOdd);
    assert_area(&trapezoids, 50.0);
    assert!(covered(&trapezoids, point(8.0, 5.0)));
    assert!(!covered(&trapezoids, point(2.0, 5.0)));
}

#[test]
fn ellipse_fill_area() {
    let mut path = PathBuffer::new();
    path.add_ellipse(&rect(0.0, 0.0, 20.0, 10.0));

    let trapezoids = fill(&path, FillRule::EvenOdd);
    assert_area(&trapezoids, core::f32::consts::PI * 10.0 * 5.0);
    assert!(covered(&trapezoids, point(10.0, 5.0)));
    assert!(!covered(&trapezoids, point(1.0, 1.0)));
}

#[test]
fn empty_path_fills_to_nothing() {
    let path = PathBuffer::new();
    let trapezoids = fill(&path, FillRule::EvenOdd);
    assert!(trapezoids.is_empty());
}

#[test]
fn fill_path_uses_the_stored_fill_rule() {
    let mut path = PathBuffer::new();
    path.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0));
    path.add_rectangle(&rect(5.0, 0.0, 10.0, 10.0));
    path.set_fill_rule(FillRule::NonZero);

    let mut tessellator = FillTessellator::new();
    let mut output = Trapezoids::new();
    tessellator.fill_path(&path, 0.01, &mut output).unwrap();
    assert_area(&output, 150.0);

    path.set_fill_rule(FillRule::EvenOdd);
    output.clear();
    tessellator.fill_path(&path, 0.01, &mut output).unwrap();
    assert_area(&output, 100.0);
}

#[test]
fn malformed_paths_leave_the_output_untouched() {
    let mut output = Trapezoids::new();
    let mut valid = PathBuffer::new();
    valid.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0));

    let mut tessellator = FillTessellator::new();
    tessellator
        .tessellate_path(&valid, &FillOptions::DEFAULT, &mut output)
        .unwrap();
    assert_eq!(output.len(), 1);

    // A bézier run cut short by the end of the path.
    let truncated = PathBuffer::from_raw(
        vec![point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0)],
        vec![PathTag::START, PathTag::BEZIER, PathTag::BEZIER],
    );
    let status = tessellator.tessellate_path(&truncated, &FillOptions::DEFAULT, &mut output);
    assert!(matches!(status, Err(TessellationError::MalformedPath(_))));
    assert_eq!(output.len(), 1);

    // A figure that does not open with a start tag.
    let unopened = PathBuffer::from_raw(vec![point(0.0, 0.0)], vec![PathTag::LINE]);
    let status = tessellator.tessellate_path(&unopened, &FillOptions::DEFAULT, &mut output);
    assert!(matches!(status, Err(TessellationError::MalformedPath(_))));
    assert_eq!(output.len(), 1);
}

#[test]
fn invalid_parameters_are_rejected() {
    let mut path = PathBuffer::new();
    path.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0));

    let mut tessellator = FillTessellator::new();
    let mut output = Trapezoids::new();

    let status = tessellator.tessellate_path(
        &path,
        &FillOptions::tolerance(f32::NAN),
        &mut output,
    );
    assert_eq!(
        status,
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::ToleranceIsNaN
        ))
    );

    let status = tessellator.tessellate_path(&path, &FillOptions::tolerance(0.0), &mut output);
    assert_eq!(
        status,
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::ToleranceIsNaN
        ))
    );

    let mut nan_path = PathBuffer::new();
    nan_path.add_line(point(0.0, 0.0), point(f32::NAN, 1.0));
    let status = tessellator.tessellate_path(&nan_path, &FillOptions::DEFAULT, &mut output);
    assert_eq!(
        status,
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::PositionIsNaN
        ))
    );

    assert!(output.is_empty());
}

#[test]
fn to_polygon_replaces_the_output_on_success() {
    let mut path = PathBuffer::new();
    path.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0));

    let mut tessellator = FillTessellator::new();
    let mut polygon = Polygon::new();
    polygon.move_to(point(100.0, 100.0));
    polygon.line_to(point(100.0, 200.0));

    tessellator
        .tessellate_to_polygon(&path, 0.1, &mut polygon)
        .unwrap();
    // The horizontal sides are dropped; the verticals remain.
    assert_eq!(polygon.edges().len(), 2);

    // On error the caller's polygon is preserved.
    let edges_before = polygon.edges().len();
    let status = tessellator.tessellate_to_polygon(&path, f32::NAN, &mut polygon);
    assert!(status.is_err());
    assert_eq!(polygon.edges().len(), edges_before);
}

#[test]
fn polygon_input_tessellates_directly() {
    let mut polygon = Polygon::new();
    polygon.move_to(point(0.0, 0.0));
    polygon.line_to(point(10.0, 0.0));
    polygon.line_to(point(5.0, 10.0));
    polygon.close();

    let mut tessellator = FillTessellator::new();
    tessellator.set_logging(true);
    let mut output = Trapezoids::new();
    tessellator.tessellate_polygon(&polygon, FillRule::NonZero, &mut output);

    assert_eq!(output.len(), 1);
    assert_area(&output, 50.0);
    assert!(covered(&output, point(5.0, 5.0)));
    assert!(!covered(&output, point(0.5, 9.0)));
}
