#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![no_std]

//! Tessellation of 2D fill and stroke operations.
//!
//! ## Overview
//!
//! This crate turns paths into the two geometric products a scanline
//! rendering backend consumes:
//!
//! * [`FillTessellator`] decomposes the region covered by a path into
//!   horizontal trapezoid bands ([`Trapezoids`]), honoring either fill rule.
//! * [`Stroker`] expands a path into a closed outline path covering the pen
//!   stroke, ready to be filled in turn.
//!
//! Both consume [`PathBuffer`] and are reusable objects holding their own
//! scratch allocations.
//!
//! ## Flattening and tolerance
//!
//! Curves are approximated with sequences of line segments before
//! tessellation. This approximation depends on a `tolerance` parameter
//! which represents the maximum distance between a curve and its flattened
//! approximation.
//!
//! ## Fill rules
//!
//! The fill tessellator supports the two classic rules: `EvenOdd` counts
//! edge crossings and fills where the count is odd, `NonZero` accumulates
//! signed crossings and fills where the sum is not zero. See
//! [`FillRule`].

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use trapeze_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[cfg(all(debug_assertions, feature = "std"))]
macro_rules! tess_log {
    ($obj:ident, $fmt:expr) => (
        if $obj.log {
            std::println!($fmt);
        }
    );
    ($obj:ident, $fmt:expr, $($arg:tt)*) => (
        if $obj.log {
            std::println!($fmt, $($arg)*);
        }
    );
}

#[cfg(not(all(debug_assertions, feature = "std")))]
macro_rules! tess_log {
    ($obj:ident, $fmt:expr) => {};
    ($obj:ident, $fmt:expr, $($arg:tt)*) => {};
}

mod error;
mod fill;
mod point_buffer;
mod polygon;
mod stroke;
mod sweep;
mod trapezoid;

#[cfg(test)]
mod fill_tests;
#[cfg(test)]
mod stroke_tests;

pub use crate::path::math;

pub use crate::path::geom;

#[doc(inline)]
pub use crate::error::*;

#[doc(inline)]
pub use crate::fill::*;

#[doc(inline)]
pub use crate::point_buffer::PointBuffer;

#[doc(inline)]
pub use crate::polygon::{Edge, Polygon};

#[doc(inline)]
pub use crate::stroke::*;

#[doc(inline)]
pub use crate::trapezoid::{Trapezoid, Trapezoids};

pub use crate::path::{FillRule, LineCap, LineJoin, MalformedPath, PathBuffer};

use crate::math::Transform;

/// Parameters for the stroker.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeOptions {
    /// What cap to use at the start of each sub-path.
    ///
    /// Default value: `LineCap::Flat`.
    pub start_cap: LineCap,

    /// What cap to use at the end of each sub-path.
    ///
    /// Default value: `LineCap::Flat`.
    pub end_cap: LineCap,

    /// How two consecutive segments are joined.
    ///
    /// Default value: `LineJoin::Miter`.
    pub line_join: LineJoin,

    /// Line width, before the device transform applies.
    ///
    /// Default value: `StrokeOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// Maximum ratio of the miter length to the line width before a miter
    /// join falls back to a bevel.
    ///
    /// Must be greater than or equal to 1.0.
    /// Default value: `StrokeOptions::DEFAULT_MITER_LIMIT`.
    pub miter_limit: f32,

    /// Maximum allowed distance to the path when flattening curves.
    ///
    /// Default value: `StrokeOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,

    /// The pen's own shape transform, composed with the device scale when
    /// generating offsets.
    ///
    /// Default value: `None`.
    pub pen_transform: Option<Transform>,
}

impl StrokeOptions {
    /// Minimum miter limit.
    pub const MINIMUM_MITER_LIMIT: f32 = 1.0;
    /// Default miter limit, the GDI+ default.
    pub const DEFAULT_MITER_LIMIT: f32 = 10.0;
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Flat;
    pub const DEFAULT_LINE_JOIN: LineJoin = LineJoin::Miter;
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
    pub const DEFAULT_TOLERANCE: f32 = 0.1;

    pub const DEFAULT: Self = StrokeOptions {
        start_cap: Self::DEFAULT_LINE_CAP,
        end_cap: Self::DEFAULT_LINE_CAP,
        line_join: Self::DEFAULT_LINE_JOIN,
        line_width: Self::DEFAULT_LINE_WIDTH,
        miter_limit: Self::DEFAULT_MITER_LIMIT,
        tolerance: Self::DEFAULT_TOLERANCE,
        pen_transform: None,
    };

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.start_cap = cap;
        self.end_cap = cap;
        self
    }

    #[inline]
    pub const fn with_start_cap(mut self, cap: LineCap) -> Self {
        self.start_cap = cap;
        self
    }

    #[inline]
    pub const fn with_end_cap(mut self, cap: LineCap) -> Self {
        self.end_cap = cap;
        self
    }

    #[inline]
    pub const fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    #[inline]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        assert!(limit >= Self::MINIMUM_MITER_LIMIT);
        self.miter_limit = limit;
        self
    }

    #[inline]
    pub const fn with_pen_transform(mut self, transform: Transform) -> Self {
        self.pen_transform = Some(transform);
        self
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameters for the fill tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FillOptions {
    /// Maximum allowed distance to the path when flattening curves.
    ///
    /// Default value: `FillOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,

    /// Set the fill rule.
    ///
    /// Default value: `EvenOdd`.
    pub fill_rule: FillRule,
}

impl FillOptions {
    /// Default flattening tolerance.
    pub const DEFAULT_TOLERANCE: f32 = 0.1;
    /// Default fill rule.
    pub const DEFAULT_FILL_RULE: FillRule = FillRule::EvenOdd;

    pub const DEFAULT: Self = FillOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
        fill_rule: Self::DEFAULT_FILL_RULE,
    };

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
