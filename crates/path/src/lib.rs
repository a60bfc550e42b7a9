#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Data structures to store and walk the paths produced by the curve fitter.
//!
//! This crate is reexported in [simplify](https://docs.rs/simplify/).
//!
//! # Path segments
//!
//! A fitted path is a sequence of [`PathSegment`]s. Each segment owns an absolute
//! anchor point and two handles expressed relative to that anchor:
//!
//! - `control_in` points towards the previous segment,
//! - `control_out` points towards the next segment.
//!
//! The cubic bézier curve between two consecutive segments `a` and `b` goes from
//! `a.anchor` to `b.anchor` with control points `a.anchor + a.control_out` and
//! `b.anchor + b.control_in`. The first segment of a path has no incoming handle
//! and the last one has no outgoing handle (both are zero vectors).
//!
//! # Examples
//!
//! ```
//! use simplify_path::math::{point, vector};
//! use simplify_path::{curves, PathSegment};
//!
//! let path = [
//!     PathSegment {
//!         control_out: vector(1.0, 0.0),
//!         ..PathSegment::new(point(0.0, 0.0))
//!     },
//!     PathSegment::with_control_in(point(3.0, 0.0), vector(-1.0, 0.0)),
//! ];
//!
//! let curve = curves(&path).next().unwrap();
//! assert_eq!(curve.ctrl1, point(1.0, 0.0));
//! assert_eq!(curve.ctrl2, point(2.0, 0.0));
//! ```

pub use simplify_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod iterator;
pub mod record;
mod segment;
pub mod svg;

#[doc(inline)]
pub use crate::iterator::{curves, Curves};
#[doc(inline)]
pub use crate::segment::PathSegment;
#[doc(inline)]
pub use crate::svg::SvgPathData;

pub mod math {
    //! f64 version of the simplify_geom types used everywhere. Most other simplify
    //! crates reexport them.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f64>```.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for ```euclid::default::Vector2D<f64>```.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for ```CubicBezierSegment<f64>```.
    pub type CubicBezierSegment = crate::geom::CubicBezierSegment<f64>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }
}
