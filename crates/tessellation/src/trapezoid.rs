use crate::geom::LineSegment;
use crate::math::point;

use alloc::vec::Vec;

/// A horizontal band of filled area.
///
/// The band spans `[top, bottom]` vertically and is bounded on each side by
/// a line segment. `left` and `right` sample the full band: their end
/// points sit exactly at `top` and `bottom`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Trapezoid {
    pub top: f32,
    pub bottom: f32,
    pub left: LineSegment<f32>,
    pub right: LineSegment<f32>,
}

impl Trapezoid {
    /// The x position of the left boundary at height `y`.
    #[inline]
    pub fn left_x_at(&self, y: f32) -> f32 {
        if self.left.from.x == self.left.to.x {
            self.left.from.x
        } else {
            self.left.solve_x_for_y(y)
        }
    }

    /// The x position of the right boundary at height `y`.
    #[inline]
    pub fn right_x_at(&self, y: f32) -> f32 {
        if self.right.from.x == self.right.to.x {
            self.right.from.x
        } else {
            self.right.solve_x_for_y(y)
        }
    }
}

/// A growable list of trapezoids.
///
/// The list is owned by the caller and can accumulate the output of several
/// fill operations. Trapezoids are in no particular order.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Trapezoids {
    trapezoids: Vec<Trapezoid>,
}

impl Trapezoids {
    pub fn new() -> Self {
        Trapezoids {
            trapezoids: Vec::new(),
        }
    }

    /// Appends a trapezoid, dropping it if its band is empty.
    pub fn push(&mut self, trapezoid: Trapezoid) {
        if trapezoid.top >= trapezoid.bottom {
            return;
        }
        self.trapezoids.push(trapezoid);
    }

    /// Appends the band `[top, bottom]` bounded by the given x positions.
    pub fn push_band(
        &mut self,
        top: f32,
        bottom: f32,
        left: (f32, f32),
        right: (f32, f32),
    ) {
        self.push(Trapezoid {
            top,
            bottom,
            left: LineSegment {
                from: point(left.0, top),
                to: point(left.1, bottom),
            },
            right: LineSegment {
                from: point(right.0, top),
                to: point(right.1, bottom),
            },
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trapezoids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trapezoids.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.trapezoids.clear();
    }

    #[inline]
    pub fn as_slice(&self) -> &[Trapezoid] {
        &self.trapezoids
    }

    pub fn iter(&self) -> core::slice::Iter<Trapezoid> {
        self.trapezoids.iter()
    }
}

impl<'l> IntoIterator for &'l Trapezoids {
    type Item = &'l Trapezoid;
    type IntoIter = core::slice::Iter<'l, Trapezoid>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[test]
fn degenerate_bands_are_dropped() {
    let mut trapezoids = Trapezoids::new();
    trapezoids.push_band(5.0, 5.0, (0.0, 0.0), (10.0, 10.0));
    assert!(trapezoids.is_empty());

    trapezoids.push_band(5.0, 6.0, (0.0, 0.0), (10.0, 10.0));
    assert_eq!(trapezoids.len(), 1);
}

#[test]
fn boundary_sampling() {
    let mut trapezoids = Trapezoids::new();
    trapezoids.push_band(0.0, 10.0, (0.0, 5.0), (10.0, 10.0));

    let trapezoid = trapezoids.as_slice()[0];
    assert_eq!(trapezoid.left_x_at(0.0), 0.0);
    assert_eq!(trapezoid.left_x_at(10.0), 5.0);
    assert_eq!(trapezoid.left_x_at(5.0), 2.5);
    assert_eq!(trapezoid.right_x_at(3.0), 10.0);
}
