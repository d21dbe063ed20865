use crate::math::Point;

use alloc::vec::Vec;
use core::ops;

/// A reusable buffer of flattened sub-path points.
///
/// The stroker collects each sub-path here before emitting quads, joins and
/// caps, so that consecutive duplicate points can be dropped as they arrive
/// and cap retraction can adjust the end points in place.
#[derive(Clone, Debug, Default)]
pub struct PointBuffer {
    points: Vec<Point>,
}

impl PointBuffer {
    pub fn new() -> Self {
        PointBuffer { points: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Appends a point unless it is equal to the previous one.
    #[inline]
    pub fn push_no_repeat(&mut self, point: Point) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    #[inline]
    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }
}

impl ops::Index<usize> for PointBuffer {
    type Output = Point;
    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl ops::IndexMut<usize> for PointBuffer {
    fn index_mut(&mut self, index: usize) -> &mut Point {
        &mut self.points[index]
    }
}

#[test]
fn push_no_repeat_drops_duplicates() {
    use crate::math::point;

    let mut buffer = PointBuffer::new();
    buffer.push_no_repeat(point(0.0, 0.0));
    buffer.push_no_repeat(point(0.0, 0.0));
    buffer.push_no_repeat(point(1.0, 0.0));
    buffer.push_no_repeat(point(1.0, 0.0));
    buffer.push_no_repeat(point(0.0, 0.0));

    assert_eq!(
        buffer.as_slice(),
        &[point(0.0, 0.0), point(1.0, 0.0), point(0.0, 0.0)]
    );
}

#[test]
fn index_mut_adjusts_end_points() {
    use crate::math::point;

    let mut buffer = PointBuffer::new();
    buffer.push(point(0.0, 0.0));
    buffer.push(point(5.0, 0.0));
    buffer[1].x -= 2.0;

    assert_eq!(buffer.last(), Some(&point(3.0, 0.0)));
}
