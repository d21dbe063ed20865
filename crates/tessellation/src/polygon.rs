use crate::math::Point;

use alloc::vec::Vec;

/// A non-horizontal polygon edge, stored top to bottom.
///
/// `clockwise` records the original direction of travel: `true` when the
/// edge pointed towards increasing y. The sweep uses it to accumulate
/// winding numbers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub upper: Point,
    pub lower: Point,
    pub clockwise: bool,
}

impl Edge {
    /// Builds an edge from a segment, or `None` if the segment is
    /// horizontal.
    pub fn from_segment(from: Point, to: Point) -> Option<Edge> {
        if from.y == to.y {
            return None;
        }

        if from.y < to.y {
            Some(Edge {
                upper: from,
                lower: to,
                clockwise: true,
            })
        } else {
            Some(Edge {
                upper: to,
                lower: from,
                clockwise: false,
            })
        }
    }

    /// The x position of this edge at height `y`.
    ///
    /// The edge is never horizontal so the interpolation is always defined.
    #[inline]
    pub fn x_at(&self, y: f64) -> f64 {
        let x0 = self.upper.x as f64;
        let y0 = self.upper.y as f64;
        let x1 = self.lower.x as f64;
        let y1 = self.lower.y as f64;

        x0 + (x1 - x0) * (y - y0) / (y1 - y0)
    }

    /// The winding contribution of a scanline crossing this edge.
    #[inline]
    pub fn winding(&self) -> i16 {
        if self.clockwise {
            1
        } else {
            -1
        }
    }
}

/// An intermediate set of edges accumulated from flattened sub-paths.
///
/// Horizontal segments are dropped on the way in. They contribute nothing
/// to a horizontal scanline decomposition.
#[derive(Clone, Debug, Default)]
pub struct Polygon {
    edges: Vec<Edge>,
    first: Point,
    current: Point,
    started: bool,
}

impl Polygon {
    pub fn new() -> Self {
        Polygon {
            edges: Vec::new(),
            first: Point::zero(),
            current: Point::zero(),
            started: false,
        }
    }

    /// Starts a new sub-path at `position`, closing the previous one if it
    /// was left open.
    pub fn move_to(&mut self, position: Point) {
        if self.started {
            self.close();
        }
        self.first = position;
        self.current = position;
        self.started = true;
    }

    /// Adds an edge from the current position to `position`.
    pub fn line_to(&mut self, position: Point) {
        if !self.started {
            self.move_to(position);
            return;
        }

        if let Some(edge) = Edge::from_segment(self.current, position) {
            self.edges.push(edge);
        }
        self.current = position;
    }

    /// Closes the current sub-path with an edge back to its first point.
    pub fn close(&mut self) {
        if !self.started {
            return;
        }

        if let Some(edge) = Edge::from_segment(self.current, self.first) {
            self.edges.push(edge);
        }
        self.current = self.first;
        self.started = false;
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.started = false;
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

#[test]
fn horizontal_edges_are_dropped() {
    use crate::math::point;

    let mut polygon = Polygon::new();
    polygon.move_to(point(0.0, 0.0));
    polygon.line_to(point(10.0, 0.0));
    polygon.line_to(point(10.0, 10.0));
    polygon.line_to(point(0.0, 10.0));
    polygon.close();

    // The two horizontal sides do not produce edges.
    assert_eq!(polygon.edges().len(), 2);
    assert!(polygon.edges()[0].clockwise);
    assert!(!polygon.edges()[1].clockwise);
}

#[test]
fn edges_are_stored_top_to_bottom() {
    use crate::math::point;

    let up = Edge::from_segment(point(1.0, 8.0), point(2.0, 3.0)).unwrap();
    assert_eq!(up.upper, point(2.0, 3.0));
    assert_eq!(up.lower, point(1.0, 8.0));
    assert!(!up.clockwise);
    assert_eq!(up.winding(), -1);

    assert_eq!(Edge::from_segment(point(0.0, 1.0), point(5.0, 1.0)), None);
}

#[test]
fn x_at_interpolates() {
    use crate::math::point;

    let edge = Edge::from_segment(point(0.0, 0.0), point(10.0, 10.0)).unwrap();
    assert_eq!(edge.x_at(5.0), 5.0);
    assert_eq!(edge.x_at(0.0), 0.0);
    assert_eq!(edge.x_at(10.0), 10.0);
}

#[test]
fn move_to_closes_the_previous_sub_path() {
    use crate::math::point;

    let mut polygon = Polygon::new();
    polygon.move_to(point(0.0, 0.0));
    polygon.line_to(point(10.0, 5.0));
    polygon.move_to(point(20.0, 0.0));

    // The implicit closing edge from (10, 5) back to (0, 0).
    assert_eq!(polygon.edges().len(), 2);
    assert_eq!(polygon.edges()[1].upper, point(0.0, 0.0));
    assert_eq!(polygon.edges()[1].lower, point(10.0, 5.0));
}
