#![deny(bare_trait_objects)]
#![no_std]

//! 2D path filling and stroking using trapezoid decomposition.
//!
//! # Crates
//!
//! This meta-crate (`trapeze`) reexports the following sub-crates for
//! convenience:
//!
//! * **trapeze_tessellation** - The fill tessellator and the stroker.
//! * **trapeze_path** - Tools to build and iterate over paths.
//! * **trapeze_geom** - 2d utilities for line segments and cubic bézier
//!   curves.
//!
//! Each `trapeze_<name>` crate is reexported as a `<name>` module in
//! `trapeze`. For example:
//!
//! ```ignore
//! extern crate trapeze_tessellation;
//! use trapeze_tessellation::FillTessellator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate trapeze;
//! use trapeze::tessellation::FillTessellator;
//! ```
//!
//! # Feature flags
//!
//! Serialization using serde can be enabled on each crate with the
//! `serialization` feature flag (disabled by default). The crates are
//! `no_std` compatible when the default `std` feature is disabled.
//!
//! # Examples
//!
//! ## Filling a path
//!
//! Paths are built into a [`path::PathBuffer`] and decomposed into
//! horizontal bands by the fill tessellator:
//!
//! ```
//! use trapeze::math::rect;
//! use trapeze::path::PathBuffer;
//! use trapeze::tessellation::{FillOptions, FillTessellator, Trapezoids};
//!
//! fn main() {
//!     let mut path = PathBuffer::new();
//!     path.add_rectangle(&rect(0.0, 0.0, 100.0, 50.0));
//!     path.add_ellipse(&rect(25.0, 0.0, 50.0, 50.0));
//!
//!     let mut tessellator = FillTessellator::new();
//!     let mut trapezoids = Trapezoids::new();
//!     tessellator
//!         .tessellate_path(&path, &FillOptions::tolerance(0.1), &mut trapezoids)
//!         .unwrap();
//!
//!     // The trapezoids are ready to be scan converted.
//!     println!(" -- {} trapezoids", trapezoids.len());
//! }
//! ```
//!
//! ## Stroking a path
//!
//! The stroker does not produce trapezoids directly. It expands the
//! stroked path into a closed outline path which can then be filled like
//! any other path:
//!
//! ```
//! use trapeze::math::{point, Transform};
//! use trapeze::tessellation::{PathBuffer, StrokeOptions, Stroker};
//!
//! fn main() {
//!     let mut path = PathBuffer::new();
//!     path.add_line(point(0.0, 0.0), point(100.0, 0.0));
//!     path.add_line(point(100.0, 0.0), point(100.0, 50.0));
//!
//!     let options = StrokeOptions::default().with_line_width(4.0);
//!     let mut stroker = Stroker::new(&options, &Transform::identity());
//!
//!     let mut outline = PathBuffer::new();
//!     stroker.stroke(&path, &mut outline).unwrap();
//!
//!     // `outline` covers the stroked area; fill it to rasterize the
//!     // stroke.
//!     assert!(!outline.is_empty());
//! }
//! ```
//!
//! ## What is the tolerance variable in these examples?
//!
//! The tessellator and the stroker operate on flattened paths (that only
//! contain line segments) so curves are approximated with sequences of
//! line segments first. The tolerance is the maximum distance allowed
//! between the curve and its approximation: smaller values produce more
//! segments and a closer fit.

pub extern crate trapeze_tessellation;

pub use trapeze_tessellation as tessellation;
pub use tessellation::geom;
pub use tessellation::path;

pub use path::math;
