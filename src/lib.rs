#![deny(bare_trait_objects)]

//! Fit cubic bézier curves to polylines.
//!
//! Turns an ordered sequence of points, such as the samples of a pointer drag or a
//! densely sampled curve, into a compact path of cubic bézier curves that stays
//! within a given distance of the points.
//!
//! # Crates
//!
//! This meta-crate (`simplify`) reexports the following sub-crates for convenience:
//!
//! * **simplify_fit** - The curve fitter.
//! * **simplify_path** - The path segments produced by the fitter, and tools to
//!   walk, store and print them.
//! * **simplify_geom** - Vector helpers, bézier evaluation and cubic bézier
//!   segments.
//! * **simplify_extra** - Point list parsing and debugging tools.
//!
//! Each `simplify_<name>` crate is reexported as a `<name>` module in `simplify`.
//!
//! # Feature flags
//!
//! serialization using serde can be enabled with the `serialization` feature flag
//! (disabled by default).
//!
//! The `simd` feature (enabled by default) evaluates bézier curves with paired
//! double precision lanes. Disabling it doesn't change any result.
//!
//! `simplify_extra` is disabled by default. It can be added with the feature flag
//! `extra`.
//!
//! # Examples
//!
//! ```
//! use simplify::math::point;
//! use simplify::path::curves;
//!
//! let points = [
//!     point(0.0, 0.0),
//!     point(10.0, 8.0),
//!     point(20.0, 10.0),
//!     point(30.0, 8.0),
//!     point(40.0, 0.0),
//! ];
//!
//! let path = simplify::fit::fit(&points, 2.5);
//!
//! for curve in curves(&path) {
//!     println!("{:?}", curve);
//! }
//! ```

pub extern crate simplify_fit;
#[cfg(feature = "extra")]
pub extern crate simplify_extra;

#[cfg(feature = "extra")]
pub use simplify_extra as extra;
pub use simplify_fit as fit;
pub use fit::geom;
pub use fit::path;

pub use path::math;
