//! Least-squares cubic bézier generation.
//!
//! The endpoints of the generated curve are the first and last points of the
//! range and the directions of its handles are given. The only unknowns are the
//! two handle lengths, found by minimizing the squared distance between the curve
//! evaluated at each point's parameter and the point itself.

use crate::fitter::PathFitter;
use crate::geom::utils::{distance, dot, normalize};
use crate::geom::MACHINE_EPSILON;
use crate::math::{CubicBezierSegment, Point, Vector};

impl<'l> PathFitter<'l> {
    /// Generates the curve from `points[first]` to `points[last]` leaving along
    /// `tan1` and arriving along `tan2` that best fits the points of the range
    /// at parameters `u`.
    pub fn generate_bezier(
        &self,
        first: usize,
        last: usize,
        u: &[f64],
        tan1: Vector,
        tan2: Vector,
    ) -> CubicBezierSegment {
        debug_assert_eq!(u.len(), last - first + 1);

        let points = self.points();
        let pt1 = points[first];
        let pt2 = points[last];

        let mut c = [[0.0; 2]; 2];
        let mut x = [0.0; 2];
        for (point, &u) in points[first..=last].iter().zip(u) {
            let t = 1.0 - u;
            let b = 3.0 * u * t;
            let b0 = t * t * t;
            let b1 = b * t;
            let b2 = b * u;
            let b3 = u * u * u;
            let a1 = normalize(tan1, b1);
            let a2 = normalize(tan2, b2);
            let tmp = point.to_vector() - pt1.to_vector() * (b0 + b1) - pt2.to_vector() * (b2 + b3);

            c[0][0] += dot(a1, a1);
            c[0][1] += dot(a1, a2);
            c[1][0] = c[0][1];
            c[1][1] += dot(a2, a2);
            x[0] += dot(a1, tmp);
            x[1] += dot(a2, tmp);
        }

        let (alpha1, alpha2) = solve_handle_lengths(&c, &x);
        let (handle1, handle2) = constrain_handles(pt1, pt2, tan1, tan2, alpha1, alpha2);

        CubicBezierSegment {
            from: pt1,
            ctrl1: pt1 + handle1,
            ctrl2: pt2 + handle2,
            to: pt2,
        }
    }
}

/// Solves `c * [alpha1, alpha2] = x` for the handle lengths.
///
/// When the system is singular both lengths are taken equal and solved from
/// the first row, or the second if the first one sums to zero, or set to zero.
pub fn solve_handle_lengths(c: &[[f64; 2]; 2], x: &[f64; 2]) -> (f64, f64) {
    let det_c0_c1 = c[0][0] * c[1][1] - c[1][0] * c[0][1];
    if det_c0_c1.abs() > MACHINE_EPSILON {
        let det_c0_x = c[0][0] * x[1] - c[1][0] * x[0];
        let det_x_c1 = x[0] * c[1][1] - x[1] * c[0][1];
        return (det_x_c1 / det_c0_c1, det_c0_x / det_c0_c1);
    }

    let c0 = c[0][0] + c[0][1];
    let c1 = c[1][0] + c[1][1];
    let alpha = if c0.abs() > MACHINE_EPSILON {
        x[0] / c0
    } else if c1.abs() > MACHINE_EPSILON {
        x[1] / c1
    } else {
        0.0
    };

    (alpha, alpha)
}

/// Turns the handle lengths into handle vectors relative to `pt1` and `pt2`.
///
/// Lengths that are (nearly) zero or negative, and handles that overshoot each
/// other along the chord by more than its squared length, are replaced with
/// handles of a third of the chord length.
pub fn constrain_handles(
    pt1: Point,
    pt2: Point,
    tan1: Vector,
    tan2: Vector,
    alpha1: f64,
    alpha2: f64,
) -> (Vector, Vector) {
    let chord = distance(pt2, pt1);
    let eps = MACHINE_EPSILON * chord;
    let fallback = chord / 3.0;

    if alpha1 < eps || alpha2 < eps {
        return (normalize(tan1, fallback), normalize(tan2, fallback));
    }

    let line = pt2 - pt1;
    let handle1 = normalize(tan1, alpha1);
    let handle2 = normalize(tan2, alpha2);
    if dot(handle1, line) - dot(handle2, line) > chord * chord {
        return (normalize(tan1, fallback), normalize(tan2, fallback));
    }

    (handle1, handle2)
}

#[cfg(test)]
use crate::geom::Evaluator;
#[cfg(test)]
use crate::math::{point, vector};

#[test]
fn collinear_points() {
    let points: Vec<Point> = (0..=10).map(|i| point(i as f64, 0.0)).collect();
    let fitter = PathFitter::new(&points, Evaluator::Scalar);
    let u = fitter.chord_length_parameterize(0, 10);

    let curve = fitter.generate_bezier(0, 10, &u, vector(1.0, 0.0), vector(-1.0, 0.0));
    assert_eq!(curve.from, point(0.0, 0.0));
    assert_eq!(curve.to, point(10.0, 0.0));
    assert!((curve.ctrl1 - point(10.0 / 3.0, 0.0)).length() < 1e-9, "{:?}", curve);
    assert!((curve.ctrl2 - point(20.0 / 3.0, 0.0)).length() < 1e-9, "{:?}", curve);
}

#[test]
fn single_interior_point() {
    // The two rows of the system are proportional and both sum to zero.
    let points = [point(0.0, 0.0), point(1.5, 0.0), point(3.0, 0.0)];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);
    let u = fitter.chord_length_parameterize(0, 2);

    let curve = fitter.generate_bezier(0, 2, &u, vector(1.0, 0.0), vector(-1.0, 0.0));
    assert_eq!(curve.ctrl1, point(1.0, 0.0));
    assert_eq!(curve.ctrl2, point(2.0, 0.0));
}

#[test]
fn backward_tangents() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(2.0, 0.0),
        point(3.0, 0.0),
    ];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);
    let u = fitter.chord_length_parameterize(0, 3);

    // Both least-squares lengths are negative.
    let curve = fitter.generate_bezier(0, 3, &u, vector(-1.0, 0.0), vector(1.0, 0.0));
    assert_eq!(curve.ctrl1, point(-1.0, 0.0));
    assert_eq!(curve.ctrl2, point(4.0, 0.0));
}

#[test]
fn solve_regular_system() {
    let c = [[2.0, 1.0], [1.0, 3.0]];
    let x = [4.0, 7.0];
    let (a1, a2) = solve_handle_lengths(&c, &x);
    assert!((a1 - 1.0).abs() < 1e-12);
    assert!((a2 - 2.0).abs() < 1e-12);
}

#[test]
fn solve_singular_system() {
    assert_eq!(
        solve_handle_lengths(&[[1.0, 1.0], [1.0, 1.0]], &[3.0, 5.0]),
        (1.5, 1.5)
    );
    assert_eq!(
        solve_handle_lengths(&[[1.0, -1.0], [2.0, -2.0]], &[3.0, 5.0]),
        (0.0, 0.0)
    );
    assert_eq!(
        solve_handle_lengths(&[[0.0, 0.0], [0.0, 4.0]], &[3.0, 2.0]),
        (0.5, 0.5)
    );
    assert_eq!(
        solve_handle_lengths(&[[0.0, 0.0], [0.0, 0.0]], &[3.0, 2.0]),
        (0.0, 0.0)
    );
}

#[test]
fn overshooting_handles() {
    let pt1 = point(0.0, 0.0);
    let pt2 = point(3.0, 0.0);
    let tan1 = vector(2.0, 0.0);
    let tan2 = vector(-1.0, 0.0);

    let (h1, h2) = constrain_handles(pt1, pt2, tan1, tan2, 1.5, 0.5);
    assert_eq!(h1, vector(1.5, 0.0));
    assert_eq!(h2, vector(-0.5, 0.0));

    // 5 * 3 + 5 * 3 > 3 * 3
    let (h1, h2) = constrain_handles(pt1, pt2, tan1, tan2, 5.0, 5.0);
    assert_eq!(h1, vector(1.0, 0.0));
    assert_eq!(h2, vector(-1.0, 0.0));

    let (h1, h2) = constrain_handles(pt1, pt2, tan1, tan2, 0.0, 2.0);
    assert_eq!(h1, vector(1.0, 0.0));
    assert_eq!(h2, vector(-1.0, 0.0));
}
