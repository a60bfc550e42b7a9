//! De Casteljau evaluation of bézier control polygons.
//!
//! A control polygon of `N` points describes a bézier curve of degree `N - 1`. The
//! fitter evaluates cubic curves (4 points) and their first and second derivative
//! polygons (3 and 2 points).
//!
//! Both backends collapse the polygon with the same sequence of
//! `a * (1 - t) + b * t` operations, so they agree to the last bit. The paired
//! backend keeps `x` and `y` in the two lanes of a `f64x2`.

use crate::scalar::Scalar;
use crate::{point, Point};

/// Selects how control polygons are evaluated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Evaluator {
    /// One coordinate at a time.
    Scalar,
    /// Both coordinates at once.
    Paired,
}

impl Evaluator {
    /// Evaluates the control polygon at `t`.
    ///
    /// `t` is typically between 0 and 1 but values outside of this range are
    /// accepted (the curve is extrapolated).
    #[inline]
    pub fn evaluate<const N: usize>(self, curve: &[Point<f64>; N], t: f64) -> Point<f64> {
        match self {
            Evaluator::Scalar => evaluate_scalar(curve, t),
            Evaluator::Paired => evaluate_paired(curve, t),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::Paired
    }
}

/// Evaluates a control polygon at `t`, one coordinate at a time.
pub fn evaluate_scalar<S: Scalar, const N: usize>(curve: &[Point<S>; N], t: S) -> Point<S> {
    debug_assert!(N > 0);

    let one_t = S::ONE - t;
    let mut xs = [S::ZERO; N];
    let mut ys = [S::ZERO; N];
    for (i, p) in curve.iter().enumerate() {
        xs[i] = p.x;
        ys[i] = p.y;
    }

    for i in 1..N {
        for j in 0..(N - i) {
            xs[j] = xs[j] * one_t + xs[j + 1] * t;
            ys[j] = ys[j] * one_t + ys[j + 1] * t;
        }
    }

    point(xs[0], ys[0])
}

/// Evaluates a control polygon at `t`, both coordinates at once.
#[cfg(feature = "simd")]
pub fn evaluate_paired<const N: usize>(curve: &[Point<f64>; N], t: f64) -> Point<f64> {
    use wide::f64x2;

    debug_assert!(N > 0);

    let q1 = f64x2::splat(1.0 - t);
    let q2 = f64x2::splat(t);
    let mut lanes = [f64x2::splat(0.0); N];
    for (i, p) in curve.iter().enumerate() {
        lanes[i] = f64x2::from([p.x, p.y]);
    }

    for i in 1..N {
        for j in 0..(N - i) {
            lanes[j] = lanes[j] * q1 + lanes[j + 1] * q2;
        }
    }

    let [x, y] = lanes[0].to_array();
    point(x, y)
}

/// Evaluates a control polygon at `t`, both coordinates at once.
#[cfg(not(feature = "simd"))]
pub fn evaluate_paired<const N: usize>(curve: &[Point<f64>; N], t: f64) -> Point<f64> {
    debug_assert!(N > 0);

    let one_t = 1.0 - t;
    let mut tmp = *curve;
    for i in 1..N {
        for j in 0..(N - i) {
            tmp[j] = (tmp[j].to_vector() * one_t + tmp[j + 1].to_vector() * t).to_point();
        }
    }

    tmp[0]
}

#[test]
fn evaluate_line() {
    let line = [point(1.0, 2.0), point(3.0, 6.0)];
    assert_eq!(evaluate_scalar(&line, 0.0), point(1.0, 2.0));
    assert_eq!(evaluate_scalar(&line, 1.0), point(3.0, 6.0));
    assert_eq!(evaluate_scalar(&line, 0.5), point(2.0, 4.0));
    // Extrapolation.
    assert_eq!(evaluate_scalar(&line, 2.0), point(5.0, 10.0));
}

#[test]
fn evaluate_quadratic() {
    let curve = [point(0.0, 0.0), point(1.0, 2.0), point(2.0, 0.0)];
    assert_eq!(evaluate_scalar(&curve, 0.0), point(0.0, 0.0));
    assert_eq!(evaluate_scalar(&curve, 0.5), point(1.0, 1.0));
    assert_eq!(evaluate_scalar(&curve, 1.0), point(2.0, 0.0));
}

#[test]
fn evaluate_cubic_matches_bernstein_form() {
    use crate::CubicBezierSegment;

    let curve = [
        point(0.0, 0.0),
        point(1.0, 3.0),
        point(4.0, -1.0),
        point(5.0, 2.0),
    ];
    let segment = CubicBezierSegment::from_array(curve);
    for i in 0..=20 {
        let t = i as f64 / 20.0;
        let a = evaluate_scalar(&curve, t);
        let b = segment.sample(t);
        assert!((a - b).length() < 1e-12, "{a:?} != {b:?} at t = {t}");
    }
}

#[test]
fn constant_polygons() {
    let p = point(1.3, 2.6);
    for t in &[0.0, 0.5, 1.0] {
        assert_eq!(evaluate_scalar(&[p, p], *t), p);
        assert_eq!(evaluate_scalar(&[p, p, p], *t), p);
        assert_eq!(evaluate_scalar(&[p, p, p, p], *t), p);
    }
}

#[test]
fn paired_and_scalar_are_bit_identical() {
    let cubic = [
        point(12.5, -3.25),
        point(101.0, 47.125),
        point(-18.75, 230.5),
        point(64.0, 9.0),
    ];
    let quadratic = [point(0.1, 0.2), point(0.7, -1.3), point(3.3, 0.4)];
    let line = [point(-5.5, 1e6), point(7.25, -1e-3)];

    for i in -10..=30 {
        let t = i as f64 * 0.0537;
        assert_eq!(evaluate_scalar(&cubic, t), evaluate_paired(&cubic, t));
        assert_eq!(evaluate_scalar(&quadratic, t), evaluate_paired(&quadratic, t));
        assert_eq!(evaluate_scalar(&line, t), evaluate_paired(&line, t));
        assert_eq!(
            Evaluator::Scalar.evaluate(&cubic, t),
            Evaluator::Paired.evaluate(&cubic, t)
        );
    }
}
