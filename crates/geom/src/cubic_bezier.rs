use crate::line::LineSegment;
use crate::scalar::Scalar;
use crate::Point;

#[cfg(test)]
use std::vec::Vec;

/// Flattening tolerances below this value are clamped up to it, so that a
/// pathological tolerance cannot force unbounded subdivision.
pub const MIN_FLATTENING_TOLERANCE: f32 = 1e-3;

/// Maximum midpoint-subdivision depth during flattening.
///
/// The flatness test terminates long before this in practice; the cap bounds
/// the recursion for inputs (infinities, denormals) that never test flat.
pub const MAX_FLATTENING_DEPTH: u32 = 32;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    /// The chord from the start to the end of the segment.
    #[inline]
    pub fn baseline(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Returns whether the curve collapses to a single point, given a
    /// tolerance threshold.
    pub fn is_a_point(&self, tolerance: S) -> bool {
        let tolerance_squared = tolerance * tolerance;
        // Use <= so that tolerance can be zero.
        (self.from - self.to).square_length() <= tolerance_squared
            && (self.from - self.ctrl1).square_length() <= tolerance_squared
            && (self.to - self.ctrl2).square_length() <= tolerance_squared
    }

    /// Returns whether the curve can be approximated by its baseline, given a
    /// tolerance threshold.
    ///
    /// The test measures the distance from each control point to the chord
    /// segment; when the projection of a control point falls before the start
    /// or past the end of the chord, the distance to the nearest endpoint is
    /// used.
    pub fn is_linear(&self, tolerance: S) -> bool {
        self.flat_enough(tolerance * tolerance)
    }

    #[inline]
    fn flat_enough(&self, tolerance_squared: S) -> bool {
        let baseline = self.baseline();
        baseline.square_distance_to_point(self.ctrl1) <= tolerance_squared
            && baseline.square_distance_to_point(self.ctrl2) <= tolerance_squared
    }

    /// Split this curve at its midpoint.
    pub fn split_in_half(&self) -> (CubicBezierSegment<S>, CubicBezierSegment<S>) {
        let ctrl1a = self.from.lerp(self.ctrl1, S::HALF);
        let ctrl2a = self.ctrl1.lerp(self.ctrl2, S::HALF);
        let ctrl3a = self.ctrl2.lerp(self.to, S::HALF);
        let ctrl1aa = ctrl1a.lerp(ctrl2a, S::HALF);
        let ctrl2aa = ctrl2a.lerp(ctrl3a, S::HALF);
        let ctrl1aaa = ctrl1aa.lerp(ctrl2aa, S::HALF);

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// Approximates the curve with a sequence of line segments by recursive
    /// midpoint subdivision.
    ///
    /// The `callback` is invoked with the end point of each segment, in
    /// order; the caller already holds the start point. A curve that
    /// collapses to a point produces a single callback with the end point.
    ///
    /// `tolerance` is the maximum distance between the polyline and the
    /// curve, clamped up to [`MIN_FLATTENING_TOLERANCE`].
    pub fn for_each_flattened<F: FnMut(Point<S>)>(&self, tolerance: S, callback: &mut F) {
        let tolerance = S::max(tolerance, S::value(MIN_FLATTENING_TOLERANCE));

        if self.is_a_point(tolerance) {
            callback(self.to);
            return;
        }

        self.flattening_step(tolerance * tolerance, MAX_FLATTENING_DEPTH, callback);
    }

    fn flattening_step<F: FnMut(Point<S>)>(
        &self,
        tolerance_squared: S,
        depth: u32,
        callback: &mut F,
    ) {
        if depth == 0 || self.flat_enough(tolerance_squared) {
            callback(self.to);
            return;
        }

        let (first, second) = self.split_in_half();
        first.flattening_step(tolerance_squared, depth - 1, callback);
        second.flattening_step(tolerance_squared, depth - 1, callback);
    }
}

#[cfg(test)]
fn flattened(curve: &CubicBezierSegment<f32>, tolerance: f32) -> Vec<Point<f32>> {
    let mut polyline = std::vec![curve.from];
    curve.for_each_flattened(tolerance, &mut |p| polyline.push(p));
    polyline
}

#[cfg(test)]
fn distance_to_polyline(polyline: &[Point<f32>], p: Point<f32>) -> f32 {
    let mut d = f32::MAX;
    for w in polyline.windows(2) {
        let seg = LineSegment {
            from: w[0],
            to: w[1],
        };
        d = d.min(seg.square_distance_to_point(p));
    }
    d.sqrt()
}

#[test]
fn flatten_within_tolerance() {
    use crate::point;

    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(30.0, 100.0),
        ctrl2: point(150.0, -80.0),
        to: point(200.0, 20.0),
    };

    for tolerance in [1.0f32, 0.1, 0.01] {
        let polyline = flattened(&curve, tolerance);
        assert!(polyline.len() > 2);
        assert_eq!(*polyline.last().unwrap(), curve.to);

        for i in 0..=200 {
            let p = curve.sample(i as f32 / 200.0);
            let d = distance_to_polyline(&polyline, p);
            assert!(
                d <= tolerance * 1.2,
                "sample {:?} is {} away at tolerance {}",
                p,
                d,
                tolerance
            );
        }
    }
}

#[test]
fn flatten_a_point() {
    use crate::point;

    let p = point(10.0f32, -3.0);
    let curve = CubicBezierSegment {
        from: p,
        ctrl1: p,
        ctrl2: p,
        to: p,
    };

    let mut count = 0;
    curve.for_each_flattened(0.1, &mut |at| {
        assert_eq!(at, p);
        count += 1;
    });
    assert_eq!(count, 1);
}

#[test]
fn flatten_degenerate_chord() {
    use crate::point;

    // Start and end coincide but the control points do not: the curve is a
    // loop and must still flatten to a bounded polyline ending at `to`.
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(100.0, 0.0),
        ctrl2: point(100.0, 100.0),
        to: point(0.0, 0.0),
    };

    let polyline = flattened(&curve, 0.1);
    assert!(polyline.len() > 2);
    assert!(polyline.len() < 10_000);
    assert_eq!(*polyline.last().unwrap(), curve.to);
}

#[test]
fn split_in_half_matches_sample() {
    use crate::point;

    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(10.0, 20.0),
        ctrl2: point(40.0, -10.0),
        to: point(50.0, 5.0),
    };

    let (first, second) = curve.split_in_half();
    let mid = curve.sample(0.5);

    assert_eq!(first.from, curve.from);
    assert_eq!(second.to, curve.to);
    assert_eq!(first.to, second.from);
    assert!((first.to - mid).length() < 1e-4);
    assert!((first.sample(0.5) - curve.sample(0.25)).length() < 1e-4);
    assert!((second.sample(0.5) - curve.sample(0.75)).length() < 1e-4);
}

#[test]
fn min_tolerance_is_clamped() {
    use crate::point;

    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(1.0, 1.0),
        ctrl2: point(2.0, -1.0),
        to: point(3.0, 0.0),
    };

    let with_zero = flattened(&curve, 0.0);
    let with_min = flattened(&curve, MIN_FLATTENING_TOLERANCE);
    assert_eq!(with_zero, with_min);
}
