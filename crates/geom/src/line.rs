use crate::scalar::Scalar;
use crate::{point, Point, Vector};

/// An infinite line defined by a point and a direction vector.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Line<S> {
    pub point: Point<S>,
    pub vector: Vector<S>,
}

impl<S: Scalar> Line<S> {
    /// Computes the intersection of two lines, if any.
    ///
    /// Returns `None` for parallel (including identical) lines.
    pub fn intersection(&self, other: &Self) -> Option<Point<S>> {
        let det = self.vector.cross(other.vector);
        if S::abs(det) <= S::EPSILON {
            // The lines are very close to parallel.
            return None;
        }
        let inv_det = S::ONE / det;
        let self_p2 = self.point + self.vector;
        let other_p2 = other.point + other.vector;
        let a = self.point.to_vector().cross(self_p2.to_vector());
        let b = other.point.to_vector().cross(other_p2.to_vector());
        Some(point(
            (b * self.vector.x - a * other.vector.x) * inv_det,
            (b * self.vector.y - a * other.vector.y) * inv_det,
        ))
    }
}

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// The length of the segment.
    #[inline]
    pub fn length(&self) -> S {
        self.to_vector().length()
    }

    #[inline]
    pub fn square_length(&self) -> S {
        self.to_vector().square_length()
    }

    /// Horizontal position of the supporting line at `y`.
    ///
    /// The segment must not be horizontal.
    #[inline]
    pub fn solve_x_for_y(&self, y: S) -> S {
        let v = self.to_vector();
        self.from.x + (y - self.from.y) * v.x / v.y
    }

    /// Vertical position of the supporting line at `x`.
    ///
    /// The segment must not be vertical.
    #[inline]
    pub fn solve_y_for_x(&self, x: S) -> S {
        let v = self.to_vector();
        self.from.y + (x - self.from.x) * v.y / v.x
    }

    /// Computes the closest point on this segment to `p`.
    ///
    /// When the projection of `p` on the supporting line falls before `from`
    /// or after `to`, the corresponding endpoint is returned.
    #[inline]
    pub fn closest_point(&self, p: Point<S>) -> Point<S> {
        let v1 = self.to - self.from;
        let v2 = p - self.from;
        let t = S::min(S::max(v2.dot(v1) / v1.dot(v1), S::ZERO), S::ONE);

        self.from + v1 * t
    }

    /// Computes the squared distance between this segment and a point.
    ///
    /// Saves a square root when comparing against a threshold that can be
    /// squared instead.
    #[inline]
    pub fn square_distance_to_point(&self, p: Point<S>) -> S {
        (self.closest_point(p) - p).square_length()
    }

    /// Computes the distance between this segment and a point.
    #[inline]
    pub fn distance_to_point(&self, p: Point<S>) -> S {
        self.square_distance_to_point(p).sqrt()
    }

    /// Computes the intersection parameters of two segments, if any.
    pub fn intersection_t(&self, other: &Self) -> Option<(S, S)> {
        let v1 = self.to_vector();
        let v2 = other.to_vector();

        let v1_cross_v2 = v1.cross(v2);

        if v1_cross_v2 == S::ZERO {
            // The segments are parallel
            return None;
        }

        let sign_v1_cross_v2 = S::signum(v1_cross_v2);
        let abs_v1_cross_v2 = S::abs(v1_cross_v2);

        let v3 = other.from - self.from;

        // t and u should be divided by v1_cross_v2, but we postpone that to
        // not lose precision. We have to respect the sign of v1_cross_v2 (and
        // therefore t and u) so we apply it now and use the absolute value of
        // v1_cross_v2 afterwards.
        let t = v3.cross(v2) * sign_v1_cross_v2;
        let u = v3.cross(v1) * sign_v1_cross_v2;

        if t < S::ZERO || t > abs_v1_cross_v2 || u < S::ZERO || u > abs_v1_cross_v2 {
            return None;
        }

        Some((t / abs_v1_cross_v2, u / abs_v1_cross_v2))
    }

    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Point<S>> {
        self.intersection_t(other).map(|(t, _)| self.sample(t))
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection_t(other).is_some()
    }
}

#[test]
fn intersection_rotated() {
    use core::f32::consts::PI;
    let count: u32 = 100;

    for i in 0..count {
        for j in 0..count {
            if i % count == j % count {
                // Avoid the colinear case.
                continue;
            }

            let angle1 = i as f32 / (count as f32) * 2.0 * PI;
            let angle2 = j as f32 / (count as f32) * 2.0 * PI;

            let l1 = LineSegment {
                from: point(10.0 * angle1.cos(), 10.0 * angle1.sin()),
                to: point(-10.0 * angle1.cos(), -10.0 * angle1.sin()),
            };

            let l2 = LineSegment {
                from: point(10.0 * angle2.cos(), 10.0 * angle2.sin()),
                to: point(-10.0 * angle2.cos(), -10.0 * angle2.sin()),
            };

            assert!(l1.intersects(&l2));

            assert!(l1
                .intersection(&l2)
                .map(|p| p.distance_to(point(0.0, 0.0)) < 0.001)
                .unwrap_or(false));
        }
    }
}

#[test]
fn solve_x_for_y() {
    let seg = LineSegment {
        from: point(1.0f32, 1.0),
        to: point(5.0, 5.0),
    };

    assert!((seg.solve_x_for_y(3.0) - 3.0).abs() < 1e-6);
    assert!((seg.solve_y_for_x(4.0) - 4.0).abs() < 1e-6);
}

#[test]
fn closest_point_endpoints() {
    let seg = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 0.0),
    };

    // Projection falls before the start of the segment.
    assert_eq!(seg.closest_point(point(-5.0, 3.0)), point(0.0, 0.0));
    // Projection falls past the end of the segment.
    assert_eq!(seg.closest_point(point(15.0, -2.0)), point(10.0, 0.0));
    // Projection falls inside the segment.
    assert_eq!(seg.closest_point(point(3.0, 4.0)), point(3.0, 0.0));

    assert_eq!(seg.square_distance_to_point(point(3.0, 4.0)), 16.0);
}

#[test]
fn line_intersection() {
    let l1 = Line {
        point: point(0.0f32, 0.0),
        vector: crate::vector(1.0, 1.0),
    };
    let l2 = Line {
        point: point(10.0, 0.0),
        vector: crate::vector(-1.0, 1.0),
    };

    let p = l1.intersection(&l2).unwrap();
    assert!((p.x - 5.0).abs() < 1e-5);
    assert!((p.y - 5.0).abs() < 1e-5);

    // Parallel lines do not intersect.
    let l3 = Line {
        point: point(1.0, 0.0),
        vector: crate::vector(1.0, 1.0),
    };
    assert_eq!(l1.intersection(&l3), None);
}
