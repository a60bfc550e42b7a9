//! Assigning curve parameters to the input points.
//!
//! Every point of a fitted range gets a parameter `u` in `[0, 1]`. The first
//! estimate is proportional to the distance travelled along the polyline
//! (chord-length parameterization). Once a candidate curve exists, each parameter
//! can be moved by one Newton-Raphson step towards the position on the curve that
//! is closest to its point.

use crate::fitter::PathFitter;
use crate::geom::utils::dot;
use crate::geom::MACHINE_EPSILON;
use crate::math::{CubicBezierSegment, Point};

impl<'l> PathFitter<'l> {
    /// Cumulative chord length of the points `first..=last`, normalized so that
    /// the first parameter is 0 and the last is 1.
    ///
    /// The distance cache is indexed by global point index: `distances[i]` is the
    /// length of the edge ending at point `i`, so the edges of the range are
    /// `distances[first + 1..=last]`.
    ///
    /// A range where all points coincide has no length to distribute. Its
    /// parameters are spread uniformly instead. A range made of a single point
    /// gets the parameter 0.
    ///
    /// # Panics
    ///
    /// Panics if `first > last` or if `last` is not a valid point index.
    pub fn chord_length_parameterize(&self, first: usize, last: usize) -> Vec<f64> {
        assert!(first <= last);
        assert!(last < self.points().len());

        let distances = self.distances();
        let m = last - first;

        let mut u = Vec::with_capacity(m + 1);
        let mut length = 0.0;
        u.push(length);
        if m == 0 {
            return u;
        }
        for distance in &distances[first + 1..=last] {
            length += *distance;
            u.push(length);
        }

        if length == 0.0 {
            for (i, u) in u.iter_mut().enumerate() {
                *u = i as f64 / m as f64;
            }
            return u;
        }

        for u in &mut u[1..] {
            *u /= length;
        }

        u
    }

    /// One Newton-Raphson step moving `u` towards the parameter of the point of
    /// `curve` closest to `point`.
    ///
    /// Returns `u` unchanged when the derivative of the distance function
    /// vanishes.
    pub fn find_root(&self, curve: &CubicBezierSegment, point: Point, u: f64) -> f64 {
        let evaluator = self.evaluator();
        let ctrl = curve.to_array();

        // Control polygons of the first and second derivatives.
        let mut velocity = [Point::origin(); 3];
        for i in 0..3 {
            velocity[i] = ((ctrl[i + 1] - ctrl[i]) * 3.0).to_point();
        }
        let mut acceleration = [Point::origin(); 2];
        for i in 0..2 {
            acceleration[i] = ((velocity[i + 1] - velocity[i]) * 2.0).to_point();
        }

        let position = evaluator.evaluate(&ctrl, u);
        let tangent = evaluator.evaluate(&velocity, u).to_vector();
        let curvature = evaluator.evaluate(&acceleration, u).to_vector();

        let diff = position - point;
        let df = dot(tangent, tangent) + dot(diff, curvature);
        if df.abs() <= MACHINE_EPSILON {
            return u;
        }

        u - dot(diff, tangent) / df
    }

    /// Refines every parameter of the range `first..=last` with [`find_root`].
    ///
    /// Returns `None` if the refined parameters are not strictly increasing, in
    /// which case they cannot be used to fit another curve.
    ///
    /// [`find_root`]: PathFitter::find_root
    pub fn reparameterize(
        &self,
        first: usize,
        last: usize,
        u: &[f64],
        curve: &CubicBezierSegment,
    ) -> Option<Vec<f64>> {
        debug_assert_eq!(u.len(), last - first + 1);

        let refined: Vec<f64> = self.points()[first..=last]
            .iter()
            .zip(u)
            .map(|(point, u)| self.find_root(curve, *point, *u))
            .collect();

        // Also rejects NaN.
        if refined.windows(2).all(|pair| pair[0] < pair[1]) {
            Some(refined)
        } else {
            None
        }
    }
}

#[cfg(test)]
use crate::geom::Evaluator;
#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn straight_curve(length: f64) -> CubicBezierSegment {
    CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(length / 3.0, 0.0),
        ctrl2: point(2.0 * length / 3.0, 0.0),
        to: point(length, 0.0),
    }
}

#[test]
fn chord_length_uses_global_indices() {
    let points = [
        point(0.0, 0.0),
        point(3.0, 4.0),
        point(3.0, 5.0),
        point(3.0, 7.0),
    ];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);

    // Edges of [1, 3] are 1 and 2 long. Reading the cache by range-relative
    // index would pick up the 5 long edge ending at point 1.
    let u = fitter.chord_length_parameterize(1, 3);
    assert_eq!(u.len(), 3);
    assert_eq!(u[0], 0.0);
    assert!((u[1] - 1.0 / 3.0).abs() < 1e-12);
    assert_eq!(u[2], 1.0);

    let u = fitter.chord_length_parameterize(0, 3);
    assert_eq!(u, vec![0.0, 5.0 / 8.0, 6.0 / 8.0, 1.0]);
}

#[test]
fn chord_length_with_coincident_points() {
    let points = [
        point(1.0, 1.0),
        point(1.0, 1.0),
        point(1.0, 1.0),
        point(1.0, 1.0),
        point(2.0, 1.0),
    ];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);

    let u = fitter.chord_length_parameterize(0, 3);
    assert_eq!(u, vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);

    // Repeated points share a parameter but the range still ends at 1.
    let u = fitter.chord_length_parameterize(0, 4);
    assert_eq!(u, vec![0.0, 0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn chord_length_of_a_single_point() {
    let points = [point(1.0, 1.0), point(1.0, 1.0), point(2.0, 1.0)];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);

    assert_eq!(fitter.chord_length_parameterize(0, 0), vec![0.0]);
    assert_eq!(fitter.chord_length_parameterize(1, 1), vec![0.0]);
    assert_eq!(fitter.chord_length_parameterize(2, 2), vec![0.0]);
}

#[test]
#[should_panic]
fn chord_length_of_a_reversed_range() {
    let points = [point(0.0, 0.0), point(1.0, 1.0), point(2.0, 1.0)];
    PathFitter::new(&points, Evaluator::Scalar).chord_length_parameterize(2, 1);
}

#[test]
fn newton_step_on_a_straight_curve() {
    let points = [point(0.0, 0.0), point(3.0, 0.0)];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);

    // x(u) = 3u is linear, so one step lands on the exact parameter.
    let u = fitter.find_root(&straight_curve(3.0), point(1.5, 0.0), 0.4);
    assert!((u - 0.5).abs() < 1e-12, "{}", u);

    let u = fitter.find_root(&straight_curve(3.0), point(1.5, 1.0), 0.5);
    assert!((u - 0.5).abs() < 1e-12, "{}", u);
}

#[test]
fn newton_step_on_a_degenerate_curve() {
    let points = [point(0.0, 0.0), point(0.0, 0.0)];
    let fitter = PathFitter::new(&points, Evaluator::Paired);

    let curve = CubicBezierSegment::from_array([point(2.0, 2.0); 4]);
    assert_eq!(fitter.find_root(&curve, point(5.0, 1.0), 0.25), 0.25);
}

#[test]
fn reparameterize_rejects_unordered_parameters() {
    let points = [
        point(0.0, 0.0),
        point(2.0, 0.0),
        point(1.0, 0.0),
        point(3.0, 0.0),
    ];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);
    let u = fitter.chord_length_parameterize(0, 3);

    assert_eq!(fitter.reparameterize(0, 3, &u, &straight_curve(3.0)), None);
}

#[test]
fn reparameterize_refines_ordered_parameters() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(2.0, 0.0),
        point(3.0, 0.0),
    ];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);
    let u = [0.0, 0.3, 0.6, 1.0];

    let refined = fitter
        .reparameterize(0, 3, &u, &straight_curve(3.0))
        .unwrap();
    let expected = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
    for (a, b) in refined.iter().zip(expected.iter()) {
        assert!((a - b).abs() < 1e-12, "{:?}", refined);
    }
}
