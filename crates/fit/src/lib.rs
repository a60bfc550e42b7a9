#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]

//! Fit cubic bézier curves to polylines.
//!
//! This crate is reexported in [simplify](https://docs.rs/simplify/).
//!
//! # Overview
//!
//! The fitter turns an ordered sequence of points, for example the samples of a
//! pointer drag, into a path made of cubic bézier curves that passes through the
//! first and last points and stays within a given squared distance of every
//! point in between.
//!
//! Each range of points is approximated with one curve whose endpoints are the
//! range's endpoints and whose handle directions are estimated from the
//! neighbouring points. The handle lengths are found with a least-squares fit,
//! then the parameter of each point on the curve is refined a few times with
//! Newton-Raphson steps. If the curve still doesn't fit, the range is split at
//! the point that is furthest from the curve.
//!
//! The output is a sequence of [`PathSegment`](path::PathSegment)s, see
//! [simplify_path](https://docs.rs/simplify_path/) for how they describe the
//! curves.
//!
//! # Tolerance
//!
//! The tolerance is compared against the *squared* distance between the points
//! and the curve. A tolerance of zero or less can never be satisfied, which
//! produces one curve per pair of consecutive points.
//!
//! # Examples
//!
//! ```
//! use simplify_fit::math::point;
//! use simplify_fit::fit;
//!
//! let points: Vec<_> = (0..=10).map(|i| point(i as f64, 0.0)).collect();
//!
//! // A straight line is approximated with a single curve.
//! let path = fit(&points, 1.0);
//! assert_eq!(path.len(), 2);
//! assert_eq!(path[0].anchor, point(0.0, 0.0));
//! assert_eq!(path[1].anchor, point(10.0, 0.0));
//! ```
//!
//! Options can be used to pick the polygon evaluation backend. Both produce the
//! exact same paths.
//!
//! ```
//! use simplify_fit::geom::Evaluator;
//! use simplify_fit::math::point;
//! use simplify_fit::{fit_with_options, FitOptions};
//!
//! let points = [point(0.0, 0.0), point(5.0, 3.0), point(10.0, 0.0)];
//! let options = FitOptions::tolerance(0.1).with_evaluator(Evaluator::Scalar);
//!
//! assert_eq!(
//!     fit_with_options(&points, &options),
//!     fit_with_options(&points, &options.with_evaluator(Evaluator::Paired)),
//! );
//! ```

pub use simplify_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod fitter;
pub mod generate;
pub mod parameterize;

pub use crate::path::geom;
pub use crate::path::math;

#[doc(inline)]
pub use crate::fitter::{add_curve, FittedCurve, PathFitter};

use crate::geom::Evaluator;
use crate::math::Point;
use crate::path::PathSegment;

/// Parameters of the curve fitter.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FitOptions {
    /// Maximum squared distance between the input points and the fitted curves.
    ///
    /// Default value: `FitOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f64,

    /// How bézier control polygons are evaluated.
    ///
    /// Default value: `Evaluator::Paired`.
    pub evaluator: Evaluator,
}

impl FitOptions {
    /// Default fitting tolerance.
    pub const DEFAULT_TOLERANCE: f64 = 2.5;
    /// Default evaluation backend.
    pub const DEFAULT_EVALUATOR: Evaluator = Evaluator::Paired;

    pub const DEFAULT: Self = FitOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
        evaluator: Self::DEFAULT_EVALUATOR,
    };

    #[inline]
    pub fn tolerance(tolerance: f64) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    pub const fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fits cubic bézier curves to `points` with the default evaluator.
///
/// See the [crate documentation](index.html) for the meaning of `tolerance`.
pub fn fit(points: &[Point], tolerance: f64) -> Vec<PathSegment> {
    fit_with_options(points, &FitOptions::tolerance(tolerance))
}

/// Fits cubic bézier curves to `points`.
pub fn fit_with_options(points: &[Point], options: &FitOptions) -> Vec<PathSegment> {
    PathFitter::new(points, options.evaluator).fit(options.tolerance)
}

#[cfg(test)]
use crate::math::{point, vector, Vector};

#[cfg(test)]
fn assert_open_path(path: &[PathSegment]) {
    assert!(!path.is_empty());
    assert_eq!(path.first().unwrap().control_in, Vector::zero());
    assert_eq!(path.last().unwrap().control_out, Vector::zero());
}

#[test]
fn default_options() {
    assert_eq!(FitOptions::default(), FitOptions::DEFAULT);
    assert_eq!(FitOptions::DEFAULT.tolerance, 2.5);
    assert_eq!(FitOptions::DEFAULT.evaluator, Evaluator::Paired);

    let options = FitOptions::tolerance(0.5).with_evaluator(Evaluator::Scalar);
    assert_eq!(options.tolerance, 0.5);
    assert_eq!(options.evaluator, Evaluator::Scalar);
}

#[test]
fn empty_input() {
    assert!(fit(&[], 2.5).is_empty());
}

#[test]
fn single_point() {
    let path = fit(&[point(3.0, -4.0)], 2.5);
    assert_eq!(path, vec![PathSegment::new(point(3.0, -4.0))]);
    assert!(!path[0].has_control_in());
    assert!(!path[0].has_control_out());
}

#[test]
fn two_points() {
    for &tolerance in &[2.5, 0.0, -1.0, 1000.0] {
        let path = fit(&[point(0.0, 0.0), point(10.0, 0.0)], tolerance);
        assert_open_path(&path);
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].anchor, point(0.0, 0.0));
        assert_eq!(path[1].anchor, point(10.0, 0.0));
        assert!((path[0].control_out - vector(10.0 / 3.0, 0.0)).length() < 1e-12);
        assert!((path[1].control_in - vector(-10.0 / 3.0, 0.0)).length() < 1e-12);
    }
}

#[test]
fn collinear_points() {
    let points: Vec<Point> = (0..=10).map(|i| point(i as f64, 0.0)).collect();
    let path = fit(&points, 1.0);

    assert_open_path(&path);
    assert_eq!(path.len(), 2);
    assert_eq!(path[0].anchor, point(0.0, 0.0));
    assert_eq!(path[1].anchor, point(10.0, 0.0));

    let mut count = 0;
    PathFitter::new(&points, Evaluator::Paired).for_each_curve(1.0, &mut |fitted| {
        assert!(fitted.curve.is_straight(1e-6), "{:?}", fitted.curve);
        count += 1;
    });
    assert_eq!(count, 1);
}

#[test]
fn outlier_forces_a_split() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(2.0, 10.0),
        point(3.0, 0.0),
        point(4.0, 0.0),
    ];
    let path = fit(&points, 0.01);

    assert_open_path(&path);
    assert!(path.len() > 2);
    assert!(path[1..path.len() - 1]
        .iter()
        .any(|segment| points[1..4].contains(&segment.anchor)));
}

#[test]
fn non_positive_tolerance_keeps_every_point() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.5),
        point(2.0, 0.75),
        point(3.0, 0.5),
        point(4.0, 0.0),
        point(5.0, -1.0),
    ];

    for &tolerance in &[0.0, -1.0] {
        let path = fit(&points, tolerance);
        assert_open_path(&path);
        assert_eq!(path.len(), points.len());
        for (segment, point) in path.iter().zip(points.iter()) {
            assert_eq!(segment.anchor, *point);
        }
    }
}

#[test]
fn fitting_is_deterministic() {
    let points: Vec<Point> = (0..50)
        .map(|i| {
            let t = i as f64 * 0.37;
            point(t * 7.0, (t * 1.3).cos() * 30.0 + (t * 0.2).sin() * 11.0)
        })
        .collect();

    let a = fit(&points, 0.8);
    let b = fit(&points, 0.8);
    assert_eq!(a, b);
    assert_open_path(&a);
}

#[test]
fn evaluators_agree() {
    let points: Vec<Point> = (0..60)
        .map(|i| {
            let t = i as f64 * 0.25;
            point(t * 4.0 + t.sin(), t.cos() * 25.0)
        })
        .collect();

    for &tolerance in &[0.01, 0.5, 2.5, 10.0] {
        let scalar = FitOptions::tolerance(tolerance).with_evaluator(Evaluator::Scalar);
        let paired = FitOptions::tolerance(tolerance).with_evaluator(Evaluator::Paired);
        assert_eq!(
            fit_with_options(&points, &scalar),
            fit_with_options(&points, &paired)
        );
    }
}

#[test]
fn interior_handles_are_smooth() {
    let points: Vec<Point> = (0..30)
        .map(|i| {
            let t = i as f64 * 0.3;
            point(t * 10.0, (t * 2.0).sin() * 15.0)
        })
        .collect();
    let path = fit(&points, 0.25);
    assert!(path.len() > 2);

    for segment in &path[1..path.len() - 1] {
        let a = segment.control_in;
        let b = segment.control_out;
        let scale = a.length() * b.length();
        assert!(a.cross(b).abs() <= 1e-9 * scale.max(1.0), "{:?}", segment);
        assert!(a.dot(b) <= 0.0, "{:?}", segment);
    }
}
