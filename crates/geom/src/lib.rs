#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [simplify](https://docs.rs/simplify/).
//!
//! # Overview.
//!
//! This crate implements the maths the curve fitter is built on:
//!
//! - dot products, distances and normalization of vectors (see [`utils`]),
//! - de Casteljau evaluation of bézier control polygons of degree one to three
//!   (see [`evaluate`]),
//! - cubic bézier segments.
//!
//! # Evaluation backends
//!
//! Control polygons can be evaluated one coordinate at a time or with both
//! coordinates packed in a pair of lanes. The two backends perform the same
//! floating point operations in the same order and produce bit-identical results,
//! the paired one simply does it with half as many instructions when the `simd`
//! feature is enabled.

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod cubic_bezier;
pub mod evaluate;
pub mod utils;

#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::evaluate::Evaluator;

pub use crate::scalar::Scalar;

/// The smallest increment such that `1.0 + MACHINE_EPSILON != 1.0` in double precision (2^-52).
///
/// Values whose magnitude is below this threshold are treated as zero by the fitting
/// fallbacks.
pub const MACHINE_EPSILON: f64 = 2.220_446_049_250_313e-16;

mod scalar {
    pub(crate) use num_traits::{Float, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float + NumCast + Sized + Display + Debug + AddAssign + SubAssign + MulAssign + DivAssign
    {
        const ZERO: Self;
        const ONE: Self;
        const THREE: Self;
        const SIX: Self;
        const NINE: Self;

        /// The gap between one and the next representable value.
        const MACHINE_EPSILON: Self;

        fn value(v: f32) -> Self;
    }

    impl Scalar for f32 {
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const THREE: Self = 3.0;
        const SIX: Self = 6.0;
        const NINE: Self = 9.0;

        // 2^-23
        const MACHINE_EPSILON: Self = 1.192_092_9e-7;

        #[inline]
        fn value(v: f32) -> Self {
            v
        }
    }

    impl Scalar for f64 {
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const THREE: Self = 3.0;
        const SIX: Self = 6.0;
        const NINE: Self = 9.0;

        const MACHINE_EPSILON: Self = crate::MACHINE_EPSILON;

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

#[test]
fn machine_epsilon_is_the_unit_roundoff_gap() {
    assert_eq!(MACHINE_EPSILON, 2.0f64.powi(-52));
    assert!(1.0 + MACHINE_EPSILON != 1.0);
    assert_eq!(1.0 + MACHINE_EPSILON / 2.0, 1.0);
    assert_eq!(<f32 as Scalar>::MACHINE_EPSILON, 2.0f32.powi(-23));
}
