//! The path data structure: parallel point and type-tag arrays.

use crate::error::{MalformedPath, PathError};
use crate::events::PathEvent;
use crate::geom::{quarter_circle_kappa, CubicBezierSegment};
use crate::math::{point, Point, Rect, Transform};
use crate::tags::PathTag;
use crate::FillRule;

use alloc::vec::Vec;

/// A 2D path stored as two parallel growable arrays, one point and one
/// [`PathTag`] per element.
///
/// Figures (sub-paths) are delimited by points with the start kind; a figure
/// is closed when its last tag carries the close flag. Append operations
/// either continue the current figure with a connecting line or open a new
/// one, depending on the kind of shape and on [`PathBuffer::start_figure`].
///
/// The two arrays always have the same length, and paths built through the
/// operations here are structurally well formed. Buffers assembled from raw
/// arrays with [`PathBuffer::from_raw`] can violate the tag grammar, which
/// [`PathBuffer::validate`] detects.
#[derive(Debug, PartialEq)]
pub struct PathBuffer {
    points: Vec<Point>,
    tags: Vec<PathTag>,
    fill_rule: FillRule,
    new_figure: bool,
    has_curves: bool,
}

impl PathBuffer {
    /// Creates an empty path.
    pub fn new() -> Self {
        PathBuffer {
            points: Vec::new(),
            tags: Vec::new(),
            fill_rule: FillRule::default(),
            new_figure: false,
            has_curves: false,
        }
    }

    /// Creates an empty path with room for at least `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut path = PathBuffer::new();
        path.ensure_capacity(capacity);
        path
    }

    /// Wraps raw point and tag arrays without checking the tag grammar.
    ///
    /// Call [`PathBuffer::validate`] to check the result; the tessellators
    /// do so before consuming a path.
    pub fn from_raw(points: Vec<Point>, tags: Vec<PathTag>) -> Self {
        let has_curves = tags.iter().any(|t| t.is_bezier());
        PathBuffer {
            points,
            tags,
            fill_rule: FillRule::default(),
            new_figure: false,
            has_curves,
        }
    }

    /// Number of points (and tags) in the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn tags(&self) -> &[PathTag] {
        &self.tags
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    /// Whether any bézier segment was added since the last flatten or reset.
    #[inline]
    pub fn has_curves(&self) -> bool {
        self.has_curves
    }

    #[inline]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    #[inline]
    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.fill_rule = fill_rule;
    }

    /// The most recently appended point, if any.
    #[inline]
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Grows the arrays so that at least `capacity` points fit without
    /// reallocation.
    ///
    /// Requested capacities are rounded up to a multiple of 32, or to twice
    /// the current capacity when that is larger.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity <= self.points.capacity() {
            return;
        }
        let rounded = (capacity + 31) & !31;
        let target = rounded.max(self.points.capacity() * 2);

        self.points.reserve_exact(target - self.points.len());
        self.tags.reserve_exact(target - self.tags.len());
    }

    /// Empties the path, keeping the fill rule.
    pub fn clear(&mut self) {
        self.points.clear();
        self.tags.clear();
        self.new_figure = false;
        self.has_curves = false;
    }

    /// Empties the path and restores the default fill rule.
    pub fn reset(&mut self) {
        self.clear();
        self.fill_rule = FillRule::default();
    }

    /// Marks the current figure as finished, so that the next append starts
    /// a new one instead of connecting.
    #[inline]
    pub fn start_figure(&mut self) {
        self.new_figure = true;
    }

    /// Closes the current figure and starts a new one.
    pub fn close_figure(&mut self) {
        if let Some(tag) = self.tags.last_mut() {
            *tag = tag.with_close();
        }
        self.new_figure = true;
    }

    /// Closes every figure of the path.
    pub fn close_all_figures(&mut self) {
        if !self.tags.is_empty() {
            for i in 1..self.tags.len() {
                if self.tags[i].is_start() {
                    self.tags[i - 1] = self.tags[i - 1].with_close();
                }
            }
            let last = self.tags.len() - 1;
            self.tags[last] = self.tags[last].with_close();
        }
        self.new_figure = true;
    }

    /// Sets the marker flag on the most recently appended point.
    pub fn set_marker(&mut self) {
        if let Some(tag) = self.tags.last_mut() {
            *tag = tag.with_marker();
        }
    }

    /// Clears the marker flag from every point of the path.
    pub fn clear_markers(&mut self) {
        for tag in &mut self.tags {
            *tag = tag.without_marker();
        }
    }

    /// Appends a line segment, connecting to the current figure when one is
    /// in progress.
    pub fn add_line(&mut self, from: Point, to: Point) {
        self.ensure_capacity(self.points.len() + 2);
        let tag = self.begin_tag();
        self.push(from, tag);
        self.push(to, PathTag::LINE);
        self.new_figure = false;
    }

    /// Appends a polyline of at least two points.
    pub fn add_lines(&mut self, points: &[Point]) -> Result<(), PathError> {
        if points.len() < 2 {
            return Err(PathError::InvalidPointCount);
        }
        self.ensure_capacity(self.points.len() + points.len());
        let mut tag = self.begin_tag();
        for &p in points {
            self.push(p, tag);
            tag = PathTag::LINE;
        }
        self.new_figure = false;

        Ok(())
    }

    /// Appends a cubic bézier segment, connecting to the current figure when
    /// one is in progress.
    pub fn add_bezier(&mut self, from: Point, ctrl1: Point, ctrl2: Point, to: Point) {
        self.ensure_capacity(self.points.len() + 4);
        let tag = self.begin_tag();
        self.push(from, tag);
        self.push(ctrl1, PathTag::BEZIER);
        self.push(ctrl2, PathTag::BEZIER);
        self.push(to, PathTag::BEZIER);
        self.has_curves = true;
        self.new_figure = false;
    }

    /// Appends a run of cubic bézier segments sharing end points: four
    /// points for the first segment and three more for each one after it.
    pub fn add_beziers(&mut self, points: &[Point]) -> Result<(), PathError> {
        if points.len() < 4 || (points.len() - 4) % 3 != 0 {
            return Err(PathError::InvalidPointCount);
        }
        self.ensure_capacity(self.points.len() + points.len());
        let mut tag = self.begin_tag();
        for &p in points {
            self.push(p, tag);
            tag = PathTag::BEZIER;
        }
        self.has_curves = true;
        self.new_figure = false;

        Ok(())
    }

    /// Appends a closed rectangular figure.
    pub fn add_rectangle(&mut self, rect: &Rect) {
        self.ensure_capacity(self.points.len() + 4);
        let x = rect.origin.x;
        let y = rect.origin.y;
        let w = rect.size.width;
        let h = rect.size.height;

        self.push(point(x, y), PathTag::START);
        self.push(point(x + w, y), PathTag::LINE);
        self.push(point(x + w, y + h), PathTag::LINE);
        self.push(point(x, y + h), PathTag::LINE.with_close());
        self.new_figure = true;
    }

    /// Appends one closed figure per rectangle.
    pub fn add_rectangles(&mut self, rects: &[Rect]) {
        self.ensure_capacity(self.points.len() + rects.len() * 4);
        for rect in rects {
            self.add_rectangle(rect);
        }
    }

    /// Appends a closed elliptic figure inscribed in `rect`, approximated by
    /// four bézier quadrants.
    pub fn add_ellipse(&mut self, rect: &Rect) {
        self.ensure_capacity(self.points.len() + 13);

        let rx = rect.size.width * 0.5;
        let ry = rect.size.height * 0.5;
        let cx = rect.origin.x + rx;
        let cy = rect.origin.y + ry;
        let kx = rx * quarter_circle_kappa::<f32>();
        let ky = ry * quarter_circle_kappa::<f32>();

        self.push(point(cx + rx, cy), PathTag::START);

        self.push(point(cx + rx, cy + ky), PathTag::BEZIER);
        self.push(point(cx + kx, cy + ry), PathTag::BEZIER);
        self.push(point(cx, cy + ry), PathTag::BEZIER);

        self.push(point(cx - kx, cy + ry), PathTag::BEZIER);
        self.push(point(cx - rx, cy + ky), PathTag::BEZIER);
        self.push(point(cx - rx, cy), PathTag::BEZIER);

        self.push(point(cx - rx, cy - ky), PathTag::BEZIER);
        self.push(point(cx - kx, cy - ry), PathTag::BEZIER);
        self.push(point(cx, cy - ry), PathTag::BEZIER);

        self.push(point(cx + kx, cy - ry), PathTag::BEZIER);
        self.push(point(cx + rx, cy - ky), PathTag::BEZIER);
        self.push(point(cx + rx, cy), PathTag::BEZIER.with_close());

        self.has_curves = true;
        self.new_figure = true;
    }

    /// Appends a closed polygonal figure of at least three points.
    ///
    /// A last point equal to the first is dropped; the close flag already
    /// provides that edge.
    pub fn add_polygon(&mut self, points: &[Point]) -> Result<(), PathError> {
        if points.len() < 3 {
            return Err(PathError::InvalidPointCount);
        }
        let mut points = points;
        if points.first() == points.last() {
            points = &points[..points.len() - 1];
        }

        self.ensure_capacity(self.points.len() + points.len());
        let mut tag = PathTag::START;
        for &p in points {
            self.push(p, tag);
            tag = PathTag::LINE;
        }
        let last = self.tags.len() - 1;
        self.tags[last] = self.tags[last].with_close();
        self.new_figure = true;

        Ok(())
    }

    /// Appends a copy of `other`.
    ///
    /// When `connect` is set and a figure is in progress, the first copied
    /// figure is attached to it with a line instead of starting fresh.
    pub fn add_path(&mut self, other: &PathBuffer, connect: bool) {
        if other.is_empty() {
            return;
        }
        let connect_here = connect && !self.new_figure && !self.points.is_empty();

        self.ensure_capacity(self.points.len() + other.points.len());
        let base = self.tags.len();
        self.points.extend_from_slice(&other.points);
        self.tags.extend_from_slice(&other.tags);

        if connect_here {
            self.tags[base] = self.tags[base].with_kind(PathTag::LINE);
        }
        self.has_curves |= other.has_curves;
        self.new_figure = other.new_figure;
    }

    /// Applies an affine transform to every point of the path.
    pub fn transform(&mut self, transform: &Transform) {
        if self.points.is_empty() {
            return;
        }
        for p in &mut self.points {
            *p = transform.transform_point(*p);
        }
    }

    /// Replaces every bézier segment with a polyline approximating it within
    /// `tolerance`, optionally transforming the path first.
    ///
    /// Afterwards the path contains only start and line kinds; close and
    /// marker flags of a segment's end point survive on the last flattened
    /// point.
    pub fn flatten(&mut self, transform: Option<&Transform>, tolerance: f32) {
        if let Some(t) = transform {
            self.transform(t);
        }
        if !self.has_curves {
            return;
        }

        let mut flat = PathBuffer::with_capacity(self.points.len());

        let mut i = 0;
        while i < self.points.len() {
            let tag = self.tags[i];
            let complete_run = tag.is_bezier()
                && i > 0
                && i + 2 < self.points.len()
                && self.tags[i + 1].is_bezier()
                && self.tags[i + 2].is_bezier();

            if complete_run {
                let from = flat.points.last().copied().unwrap_or(self.points[i - 1]);
                let curve = CubicBezierSegment {
                    from,
                    ctrl1: self.points[i],
                    ctrl2: self.points[i + 1],
                    to: self.points[i + 2],
                };

                let mut last = from;
                curve.for_each_flattened(tolerance, &mut |p| {
                    if p != last {
                        flat.push(p, PathTag::LINE);
                        last = p;
                    }
                });

                let flags = self.tags[i + 2].flags();
                if flags != 0 {
                    if let Some(t) = flat.tags.last_mut() {
                        *t = t.with_flags(flags);
                    }
                }
                i += 3;
            } else {
                // Start and line points are copied through; a stray bézier
                // tag from a truncated run degrades to a line point.
                let tag = if tag.is_bezier() {
                    tag.with_kind(PathTag::LINE)
                } else {
                    tag
                };
                flat.push(self.points[i], tag);
                i += 1;
            }
        }

        flat.fill_rule = self.fill_rule;
        flat.new_figure = self.new_figure;
        *self = flat;
    }

    /// Checks the tag grammar.
    ///
    /// A well formed path opens with a start tag, holds as many tags as
    /// points, uses only known tag kinds and groups bézier tags in runs of
    /// three.
    pub fn validate(&self) -> Result<(), MalformedPath> {
        if self.points.len() != self.tags.len() {
            return Err(MalformedPath::MismatchedLengths {
                points: self.points.len(),
                tags: self.tags.len(),
            });
        }

        let mut i = 0;
        while i < self.tags.len() {
            let tag = self.tags[i];
            if !tag.has_valid_kind() {
                return Err(MalformedPath::InvalidTag { index: i });
            }
            if i == 0 && !tag.is_start() {
                return Err(MalformedPath::NoStartPoint { index: 0 });
            }
            if tag.is_bezier() {
                if i + 2 >= self.tags.len()
                    || !self.tags[i + 1].is_bezier()
                    || !self.tags[i + 2].is_bezier()
                {
                    return Err(MalformedPath::TruncatedBezier { index: i });
                }
                i += 3;
            } else {
                i += 1;
            }
        }

        Ok(())
    }

    /// Iterates the path as a sequence of [`PathEvent`]s.
    pub fn iter(&self) -> Iter {
        Iter::new(&self.points, &self.tags)
    }

    fn begin_tag(&self) -> PathTag {
        if self.new_figure || self.points.is_empty() {
            PathTag::START
        } else {
            PathTag::LINE
        }
    }

    #[inline]
    fn push(&mut self, p: Point, tag: PathTag) {
        self.points.push(p);
        self.tags.push(tag);
    }
}

impl Default for PathBuffer {
    fn default() -> Self {
        PathBuffer::new()
    }
}

impl Clone for PathBuffer {
    fn clone(&self) -> Self {
        let mut cloned = PathBuffer::with_capacity(self.points.len());
        cloned.points.extend_from_slice(&self.points);
        cloned.tags.extend_from_slice(&self.tags);
        cloned.fill_rule = self.fill_rule;
        cloned.new_figure = self.new_figure;
        cloned.has_curves = self.has_curves;
        cloned
    }
}

impl<'l> IntoIterator for &'l PathBuffer {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

/// Iterates a path buffer as a sequence of [`PathEvent`]s.
///
/// Figures open with `Begin` and close with `End`; bézier runs are grouped
/// into `Cubic` events. Malformed buffers iterate without panicking:
/// truncated bézier runs degrade to line events.
#[derive(Clone)]
pub struct Iter<'l> {
    points: &'l [Point],
    tags: &'l [PathTag],
    idx: usize,
    first: Point,
    current: Point,
    is_open: bool,
}

impl<'l> Iter<'l> {
    fn new(points: &'l [Point], tags: &'l [PathTag]) -> Self {
        Iter {
            points,
            tags,
            idx: 0,
            first: point(0.0, 0.0),
            current: point(0.0, 0.0),
            is_open: false,
        }
    }

    fn end_event(&mut self, boundary: usize) -> PathEvent {
        self.is_open = false;
        PathEvent::End {
            last: self.current,
            first: self.first,
            close: boundary > 0 && self.tags[boundary - 1].is_close(),
        }
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        if self.idx >= self.points.len() {
            if self.is_open {
                return Some(self.end_event(self.points.len()));
            }
            return None;
        }

        let tag = self.tags[self.idx];

        if tag.is_start() && self.is_open {
            return Some(self.end_event(self.idx));
        }

        if !self.is_open {
            let at = self.points[self.idx];
            self.first = at;
            self.current = at;
            self.is_open = true;
            self.idx += 1;
            return Some(PathEvent::Begin { at });
        }

        if tag.is_bezier()
            && self.idx + 2 < self.points.len()
            && self.tags[self.idx + 1].is_bezier()
            && self.tags[self.idx + 2].is_bezier()
        {
            let from = self.current;
            let ctrl1 = self.points[self.idx];
            let ctrl2 = self.points[self.idx + 1];
            let to = self.points[self.idx + 2];
            self.current = to;
            self.idx += 3;
            return Some(PathEvent::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            });
        }

        let from = self.current;
        let to = self.points[self.idx];
        self.current = to;
        self.idx += 1;
        Some(PathEvent::Line { from, to })
    }
}

#[cfg(test)]
use crate::math::rect;
#[cfg(test)]
use std::vec;

#[test]
fn lines_connect() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(1.0, 0.0));
    path.add_line(point(1.0, 0.0), point(1.0, 1.0));

    assert_eq!(path.len(), 4);
    assert!(path.tags()[0].is_start());
    assert!(path.tags()[1].is_line());
    // The second line continues the figure rather than starting one.
    assert!(path.tags()[2].is_line());
    assert!(path.tags()[3].is_line());
    assert_eq!(path.last_point(), Some(point(1.0, 1.0)));
}

#[test]
fn add_lines_makes_one_polyline() {
    let mut path = PathBuffer::new();
    assert_eq!(
        path.add_lines(&[point(0.0, 0.0)]),
        Err(PathError::InvalidPointCount)
    );
    assert!(path.is_empty());

    path.add_lines(&[point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0)])
        .unwrap();
    assert_eq!(path.len(), 3);
    assert!(path.tags()[0].is_start());
    assert!(path.tags()[1].is_line() && path.tags()[2].is_line());

    // A second batch continues the open figure.
    path.add_lines(&[point(2.0, 2.0), point(3.0, 2.0)]).unwrap();
    assert_eq!(path.len(), 5);
    assert!(path.tags()[3].is_line());
}

#[test]
fn start_figure_breaks_the_figure() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(1.0, 0.0));
    path.start_figure();
    path.add_line(point(5.0, 5.0), point(6.0, 5.0));

    assert!(path.tags()[2].is_start());
}

#[test]
fn rectangle_tags() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(1.0, 0.0));
    path.add_rectangle(&rect(0.0, 0.0, 10.0, 5.0));
    // Closed shapes start their own figure and leave the path starting
    // fresh afterwards.
    path.add_line(point(0.0, 0.0), point(1.0, 0.0));

    let tags = path.tags();
    assert!(tags[2].is_start());
    assert!(tags[3].is_line() && tags[4].is_line());
    assert!(tags[5].is_line() && tags[5].is_close());
    assert!(tags[6].is_start());

    assert_eq!(path.points()[2], point(0.0, 0.0));
    assert_eq!(path.points()[3], point(10.0, 0.0));
    assert_eq!(path.points()[4], point(10.0, 5.0));
    assert_eq!(path.points()[5], point(0.0, 5.0));
}

#[test]
fn add_rectangles_closes_each() {
    let mut path = PathBuffer::new();
    path.add_rectangles(&[rect(0.0, 0.0, 4.0, 3.0), rect(10.0, 0.0, 2.0, 2.0)]);

    assert_eq!(path.len(), 8);
    let tags = path.tags();
    assert!(tags[0].is_start());
    assert!(tags[3].is_close());
    assert!(tags[4].is_start());
    assert!(tags[7].is_close());
    assert!(path.validate().is_ok());
}

#[test]
fn ellipse_shape() {
    let mut path = PathBuffer::new();
    path.add_ellipse(&rect(0.0, 0.0, 20.0, 10.0));

    assert_eq!(path.len(), 13);
    assert!(path.has_curves());
    assert!(path.tags()[0].is_start());
    for i in 1..13 {
        assert!(path.tags()[i].is_bezier());
    }
    assert!(path.tags()[12].is_close());
    // Starts at the rightmost point of the ellipse.
    assert_eq!(path.points()[0], point(20.0, 5.0));
    assert!(path.validate().is_ok());
}

#[test]
fn beziers_arity() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(1.0, 0.0));
    let before = path.clone();

    assert_eq!(
        path.add_beziers(&[point(0.0, 0.0); 5]),
        Err(PathError::InvalidPointCount)
    );
    assert_eq!(path, before);

    assert!(path.add_beziers(&[point(0.0, 0.0); 7]).is_ok());
    assert_eq!(path.len(), 9);
    assert!(path.has_curves());
    // Connects to the line figure already in progress.
    assert!(path.tags()[2].is_line());
    assert!(path.validate().is_ok());
}

#[test]
fn polygon_drops_duplicate_last_point() {
    let a = point(0.0, 0.0);
    let b = point(10.0, 0.0);
    let c = point(5.0, 8.0);

    let mut path = PathBuffer::new();
    path.add_polygon(&[a, b, c, a]).unwrap();

    assert_eq!(path.len(), 3);
    assert!(path.tags()[2].is_close());

    let mut too_few = PathBuffer::new();
    assert_eq!(
        too_few.add_polygon(&[a, b]),
        Err(PathError::InvalidPointCount)
    );
    assert!(too_few.is_empty());
}

#[test]
fn add_path_connects() {
    let mut tail = PathBuffer::new();
    tail.add_line(point(5.0, 5.0), point(6.0, 6.0));
    tail.set_marker();

    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(1.0, 1.0));
    path.add_path(&tail, true);

    assert_eq!(path.len(), 4);
    // The copied figure now connects with a line, keeping its flags.
    assert!(path.tags()[2].is_line());
    assert!(path.tags()[3].is_marker());

    let mut detached = PathBuffer::new();
    detached.add_line(point(0.0, 0.0), point(1.0, 1.0));
    detached.add_path(&tail, false);
    assert!(detached.tags()[2].is_start());
}

#[test]
fn close_all_figures_closes_every_figure() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(1.0, 0.0));
    path.start_figure();
    path.add_line(point(2.0, 0.0), point(3.0, 0.0));
    path.close_all_figures();

    assert!(path.tags()[1].is_close());
    assert!(path.tags()[3].is_close());
}

#[test]
fn markers() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(1.0, 0.0));
    path.set_marker();
    path.add_line(point(1.0, 0.0), point(2.0, 0.0));
    path.set_marker();

    assert!(path.tags()[1].is_marker());
    assert!(path.tags()[3].is_marker());

    path.clear_markers();
    assert!(path.tags().iter().all(|t| !t.is_marker()));
}

#[test]
fn capacity_rounds_up() {
    let mut path = PathBuffer::new();
    path.ensure_capacity(1);
    assert_eq!(path.capacity(), 32);

    path.ensure_capacity(33);
    assert_eq!(path.capacity(), 64);

    // Doubling wins over rounding when it is larger.
    path.ensure_capacity(65);
    assert_eq!(path.capacity(), 128);

    let cloned = path.clone();
    assert_eq!(cloned.capacity(), 0);
}

#[test]
fn validate_tag_grammar() {
    let path = PathBuffer::from_raw(
        vec![point(0.0, 0.0), point(1.0, 0.0)],
        vec![PathTag::LINE, PathTag::LINE],
    );
    assert_eq!(
        path.validate(),
        Err(MalformedPath::NoStartPoint { index: 0 })
    );

    let path = PathBuffer::from_raw(
        vec![point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0)],
        vec![PathTag::START, PathTag::BEZIER, PathTag::BEZIER],
    );
    assert_eq!(
        path.validate(),
        Err(MalformedPath::TruncatedBezier { index: 1 })
    );

    let path = PathBuffer::from_raw(
        vec![point(0.0, 0.0), point(1.0, 0.0)],
        vec![PathTag::START, PathTag::from_byte(0x02)],
    );
    assert_eq!(path.validate(), Err(MalformedPath::InvalidTag { index: 1 }));

    let path = PathBuffer::from_raw(vec![point(0.0, 0.0)], vec![]);
    assert_eq!(
        path.validate(),
        Err(MalformedPath::MismatchedLengths { points: 1, tags: 0 })
    );
}

#[test]
fn iter_rectangle() {
    let mut path = PathBuffer::new();
    path.add_rectangle(&rect(0.0, 0.0, 2.0, 1.0));

    let events: std::vec::Vec<PathEvent> = path.iter().collect();
    assert_eq!(
        events,
        vec![
            PathEvent::Begin {
                at: point(0.0, 0.0)
            },
            PathEvent::Line {
                from: point(0.0, 0.0),
                to: point(2.0, 0.0)
            },
            PathEvent::Line {
                from: point(2.0, 0.0),
                to: point(2.0, 1.0)
            },
            PathEvent::Line {
                from: point(2.0, 1.0),
                to: point(0.0, 1.0)
            },
            PathEvent::End {
                last: point(0.0, 1.0),
                first: point(0.0, 0.0),
                close: true
            },
        ]
    );
}

#[test]
fn iter_groups_bezier_runs() {
    let mut path = PathBuffer::new();
    path.add_bezier(
        point(0.0, 0.0),
        point(1.0, 1.0),
        point(2.0, -1.0),
        point(3.0, 0.0),
    );

    let events: std::vec::Vec<PathEvent> = path.iter().collect();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[1],
        PathEvent::Cubic {
            from: point(0.0, 0.0),
            ctrl1: point(1.0, 1.0),
            ctrl2: point(2.0, -1.0),
            to: point(3.0, 0.0),
        }
    );
    assert_eq!(
        events[2],
        PathEvent::End {
            last: point(3.0, 0.0),
            first: point(0.0, 0.0),
            close: false
        }
    );
}

#[test]
fn flatten_removes_curves() {
    let mut path = PathBuffer::new();
    path.add_ellipse(&rect(0.0, 0.0, 10.0, 10.0));
    path.flatten(None, 0.1);

    assert!(!path.has_curves());
    assert!(path.len() > 13);
    assert!(path.tags()[0].is_start());
    for tag in &path.tags()[1..] {
        assert!(tag.is_line());
    }
    // The close flag of the last bézier end point survives flattening.
    assert!(path.tags().last().unwrap().is_close());
    assert!(path.validate().is_ok());

    // Flattening is idempotent.
    let again = {
        let mut p = path.clone();
        p.flatten(None, 0.1);
        p
    };
    assert_eq!(again, path);
}

#[test]
fn flatten_transforms_first() {
    let mut path = PathBuffer::new();
    path.add_line(point(0.0, 0.0), point(1.0, 0.0));
    path.flatten(Some(&Transform::translation(10.0, 0.0)), 0.1);

    assert_eq!(path.points()[0], point(10.0, 0.0));
    assert_eq!(path.points()[1], point(11.0, 0.0));
}

#[test]
fn reset_restores_defaults() {
    let mut path = PathBuffer::new();
    path.set_fill_rule(FillRule::NonZero);
    path.add_ellipse(&rect(0.0, 0.0, 4.0, 4.0));
    path.reset();

    assert!(path.is_empty());
    assert!(!path.has_curves());
    assert_eq!(path.fill_rule(), FillRule::EvenOdd);
}
