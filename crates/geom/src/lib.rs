#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![no_std]

//! Simple 2D geometry for the `trapeze` fill and stroke pipeline.
//!
//! This crate provides line segments and cubic bézier segments on top of
//! [euclid](https://crates.io/crates/euclid) types, generic over a small
//! [`Scalar`] trait implemented for `f32` and `f64`.
//!
//! The one non-trivial operation here is adaptive curve flattening:
//! approximating a cubic bézier with a sequence of line segments such that
//! no point of the polyline is further away from the curve than a given
//! *tolerance* threshold. Curves are subdivided at their midpoint until the
//! control points sit within the tolerance of the chord, so flatter portions
//! of a curve produce fewer segments than tight turns.
//!
//! Everything downstream of this crate (path storage, trapezoidation,
//! stroke outline generation) consumes curves exclusively through
//! [`CubicBezierSegment::for_each_flattened`].

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod cubic_bezier;
pub mod line;

#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::line::{Line, LineSegment};

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use euclid::Trig;
    pub(crate) use num_traits::{Float, FloatConst, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float
        + NumCast
        + FloatConst
        + Sized
        + Display
        + Debug
        + Trig
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const THREE: Self;

        const EPSILON: Self;

        fn value(v: f32) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const THREE: Self = 3.0;

        const EPSILON: Self = 1e-4;

        #[inline]
        fn value(v: f32) -> Self {
            v
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const THREE: Self = 3.0;

        const EPSILON: Self = 1e-8;

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

/// Distance from the endpoints of a quarter-circle arc to the control points
/// of the cubic bézier segment approximating it, as a fraction of the radius.
///
/// `4/3 * (sqrt(2) - 1) ≈ 0.5522847498307933`
#[inline]
pub fn quarter_circle_kappa<S: Scalar>() -> S {
    S::value(0.552_284_75)
}
