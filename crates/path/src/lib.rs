#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]
#![no_std]

//! Path storage and building for the `trapeze` fill and stroke pipeline.
//!
//! A [`PathBuffer`] stores a 2D path the way the GDI family of APIs does:
//! two parallel growable arrays, one holding the points and the other one
//! [`PathTag`] byte per point describing how that point joins the figure
//! (figure start, line point, or bézier control/end point) along with
//! per-point flags (figure closed, marker).
//!
//! # Examples
//!
//! ```
//! use trapeze_path::PathBuffer;
//! use trapeze_path::math::point;
//!
//! let mut path = PathBuffer::new();
//! path.add_line(point(0.0, 0.0), point(10.0, 0.0));
//! // Connects to the previous point because no new figure was started.
//! path.add_line(point(10.0, 0.0), point(10.0, 10.0));
//! path.close_figure();
//!
//! for event in &path {
//!     println!("{:?}", event);
//! }
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use trapeze_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod error;
mod events;
pub mod path_buffer;
mod tags;

#[doc(inline)]
pub use crate::error::{MalformedPath, PathError};
pub use crate::events::PathEvent;
#[doc(inline)]
pub use crate::path_buffer::{Iter, PathBuffer};
#[doc(inline)]
pub use crate::tags::PathTag;

pub mod math {
    //! f32 versions of the trapeze_geom types used everywhere. Most other
    //! trapeze crates reexport them.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for ```euclid::default::Size2D<f32>```.
    pub type Size = euclid::default::Size2D<f32>;

    /// Alias for ```euclid::default::Rect<f32>```
    pub type Rect = euclid::default::Rect<f32>;

    /// Alias for ```euclid::default::Transform2D<f32>```
    pub type Transform = euclid::default::Transform2D<f32>;

    /// An angle in radians (f32).
    pub type Angle = euclid::Angle<f32>;

    /// Shorthand for `Rect::new(Point::new(x, y), Size::new(w, h))`.
    #[inline]
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect {
            origin: point(x, y),
            size: size(w, h),
        }
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Size::new(x, y)`.
    #[inline]
    pub fn size(w: f32, h: f32) -> Size {
        Size::new(w, h)
    }
}

/// The fill rule defines how to determine what is inside and what is outside of the shape.
///
/// `EvenOdd` is the rule the GDI family of APIs calls *alternate*, `NonZero`
/// the one it calls *winding*.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    EvenOdd,
    NonZero,
}

impl FillRule {
    #[inline]
    pub fn is_in(&self, winding_number: i16) -> bool {
        match *self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i16) -> bool {
        !self.is_in(winding_number)
    }
}

impl Default for FillRule {
    #[inline]
    fn default() -> Self {
        FillRule::EvenOdd
    }
}

/// Shape of the ends of open stroked figures.
///
/// The anchor variants draw a marker shape centered on the endpoint instead
/// of extending the stroke body; `Custom` stands for caller-provided cap
/// geometry, which this library does not interpret and strokes like `Flat`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke stops exactly at the endpoint.
    Flat,
    /// Half a square protruding by half the line width.
    Square,
    /// A half-disc centered on the endpoint.
    Round,
    /// A triangular point protruding by half the line width.
    Triangle,
    /// Anchor explicitly suppressing any end decoration.
    NoAnchor,
    /// A square anchor 1.5 times the stroke radius.
    SquareAnchor,
    /// A disc anchor twice the stroke radius.
    RoundAnchor,
    /// A diamond anchor twice the stroke radius.
    DiamondAnchor,
    /// An arrowhead anchor twice the stroke radius.
    ArrowAnchor,
    /// Caller-defined cap geometry.
    Custom,
}

impl LineCap {
    /// Whether this cap is one of the anchor variants.
    #[inline]
    pub fn is_anchor(&self) -> bool {
        match *self {
            LineCap::NoAnchor
            | LineCap::SquareAnchor
            | LineCap::RoundAnchor
            | LineCap::DiamondAnchor
            | LineCap::ArrowAnchor => true,
            _ => false,
        }
    }
}

impl Default for LineCap {
    #[inline]
    fn default() -> Self {
        LineCap::Flat
    }
}

/// Shape of the corner between two consecutive stroked segments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// Sharp corner, falling back to `Bevel` past the miter limit.
    Miter,
    /// The corner is cut off with a straight edge.
    Bevel,
    /// The corner is rounded with a disc.
    Round,
    /// Strokes like `Miter`.
    MiterClipped,
}

impl Default for LineJoin {
    #[inline]
    fn default() -> Self {
        LineJoin::Miter
    }
}
