//! The divide-and-conquer curve fitter.
//!
//! A range of points is first approximated with a single cubic bézier curve. If
//! the curve strays too far from the points after a few rounds of
//! re-parameterization, the range is split at the worst point and each half is
//! fitted on its own, with a shared tangent at the split point so that the
//! resulting path stays smooth.

use crate::geom::utils::{distance, normalize};
use crate::geom::Evaluator;
use crate::math::{CubicBezierSegment, Point, Vector};
use crate::path::PathSegment;

use log::{debug, trace};

/// Number of curves generated for a range before it is split.
const MAX_ITERATIONS: usize = 5;

/// Parameters of the two endpoints of a curve.
const ENDPOINT_PARAMETERS: [f64; 2] = [0.0, 1.0];

/// A curve accepted by the fitter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FittedCurve<'a> {
    /// Index of the first input point covered by the curve.
    pub first: usize,
    /// Index of the last input point covered by the curve.
    pub last: usize,
    pub curve: CubicBezierSegment,
    /// The parameter of each point of `first..=last` on the curve.
    pub parameters: &'a [f64],
    /// The largest squared distance between an interior point and the curve
    /// evaluated at its parameter.
    pub max_error: f64,
    /// Number of candidate curves rejected for the range before this one.
    ///
    /// When zero, `parameters` are the chord-length parameters of the range.
    /// Otherwise they were refined with Newton-Raphson steps and the curve is
    /// only guaranteed to be within tolerance at those refined parameters.
    pub iteration: usize,
}

#[derive(Copy, Clone, Debug)]
struct Range {
    first: usize,
    last: usize,
    tan1: Vector,
    tan2: Vector,
}

/// Fits cubic bézier curves to a sequence of points.
///
/// The fitter borrows the points and computes the distance between each pair of
/// consecutive points once, when it is created.
///
/// # Example
///
/// ```
/// use simplify_fit::PathFitter;
/// use simplify_fit::geom::Evaluator;
/// use simplify_fit::math::point;
///
/// let points = [point(0.0, 0.0), point(1.0, 1.0), point(2.0, 1.5), point(3.0, 1.0)];
/// let fitter = PathFitter::new(&points, Evaluator::Paired);
///
/// let path = fitter.fit(1.0);
/// assert_eq!(path.first().unwrap().anchor, points[0]);
/// assert_eq!(path.last().unwrap().anchor, points[3]);
/// ```
pub struct PathFitter<'l> {
    points: &'l [Point],
    distances: Vec<f64>,
    evaluator: Evaluator,
}

impl<'l> PathFitter<'l> {
    pub fn new(points: &'l [Point], evaluator: Evaluator) -> Self {
        let distances = match points.first() {
            Some(&first) => {
                let mut previous = first;
                points
                    .iter()
                    .map(|&point| {
                        let d = distance(previous, point);
                        previous = point;
                        d
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        PathFitter {
            points,
            distances,
            evaluator,
        }
    }

    #[inline]
    pub fn points(&self) -> &'l [Point] {
        self.points
    }

    /// The distance cache: `distances()[i]` is the distance between points `i - 1`
    /// and `i`, and `distances()[0]` is zero.
    #[inline]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    #[inline]
    pub fn evaluator(&self) -> Evaluator {
        self.evaluator
    }

    /// Fits the points and returns the resulting path.
    ///
    /// An empty input produces an empty path and a single point produces a
    /// single segment without handles.
    pub fn fit(&self, tolerance: f64) -> Vec<PathSegment> {
        let mut segments = Vec::new();
        if let Some(&first) = self.points.first() {
            segments.push(PathSegment::new(first));
        }

        self.for_each_curve(tolerance, &mut |fitted| {
            add_curve(&mut segments, &fitted.curve);
        });

        debug!(
            "fitted {} points with {} curves (tolerance: {}, evaluator: {:?})",
            self.points.len(),
            segments.len().saturating_sub(1),
            tolerance,
            self.evaluator,
        );

        segments
    }

    /// Calls `callback` with each accepted curve, in path order.
    ///
    /// Consecutive curves share an endpoint: the `last` index of a curve is the
    /// `first` index of the next one. Nothing is produced for fewer than two
    /// points.
    pub fn for_each_curve(&self, tolerance: f64, callback: &mut dyn FnMut(&FittedCurve)) {
        let n = self.points.len();
        if n < 2 {
            return;
        }

        let points = self.points;
        self.fit_cubic(
            tolerance,
            0,
            n - 1,
            points[1] - points[0],
            points[n - 2] - points[n - 1],
            callback,
        );
    }

    /// Fits the range `first..=last` leaving `points[first]` along `tan1` and
    /// arriving at `points[last]` along `tan2`.
    ///
    /// Ranges that cannot be approximated by a single curve are split until they
    /// can. Ranges of two points always can, so this terminates for any
    /// tolerance. Splits are processed depth-first with an explicit stack so that
    /// the curves come out in path order without recursing.
    ///
    /// Nothing is produced unless `first < last`.
    ///
    /// # Panics
    ///
    /// Panics if `last` is not a valid point index.
    pub fn fit_cubic(
        &self,
        tolerance: f64,
        first: usize,
        last: usize,
        tan1: Vector,
        tan2: Vector,
        callback: &mut dyn FnMut(&FittedCurve),
    ) {
        if first >= last {
            return;
        }
        assert!(last < self.points.len());

        let mut stack = vec![Range {
            first,
            last,
            tan1,
            tan2,
        }];

        while let Some(range) = stack.pop() {
            let split = match self.try_fit(tolerance, &range, callback) {
                Some(split) => split,
                None => continue,
            };

            let center = self.points[split - 1] - self.points[split + 1];
            // The left half must be fitted first, so it is pushed last.
            stack.push(Range {
                first: split,
                last: range.last,
                tan1: -center,
                tan2: range.tan2,
            });
            stack.push(Range {
                first: range.first,
                last: split,
                tan1: range.tan1,
                tan2: center,
            });
        }
    }

    /// Tries to fit a single curve to the range.
    ///
    /// Returns `None` if a curve was accepted, otherwise the index to split the
    /// range at.
    fn try_fit(
        &self,
        tolerance: f64,
        range: &Range,
        callback: &mut dyn FnMut(&FittedCurve),
    ) -> Option<usize> {
        let Range {
            first,
            last,
            tan1,
            tan2,
        } = *range;

        if last - first == 1 {
            let pt1 = self.points[first];
            let pt2 = self.points[last];
            let handle_length = distance(pt1, pt2) / 3.0;
            let curve = CubicBezierSegment {
                from: pt1,
                ctrl1: pt1 + normalize(tan1, handle_length),
                ctrl2: pt2 + normalize(tan2, handle_length),
                to: pt2,
            };

            callback(&FittedCurve {
                first,
                last,
                curve,
                parameters: &ENDPOINT_PARAMETERS,
                max_error: 0.0,
                iteration: 0,
            });

            return None;
        }

        let mut u = self.chord_length_parameterize(first, last);
        let mut max_error = tolerance.max(tolerance * tolerance);
        let mut split = first + (last - first + 1) / 2;
        let mut error = 0.0;
        let mut parameters_in_order = true;

        for iteration in 0..MAX_ITERATIONS {
            let curve = self.generate_bezier(first, last, &u, tan1, tan2);
            let (curve_error, index) = self.find_max_error(first, last, &curve, &u);
            error = curve_error;

            if error < tolerance && parameters_in_order {
                callback(&FittedCurve {
                    first,
                    last,
                    curve,
                    parameters: &u,
                    max_error: error,
                    iteration,
                });

                return None;
            }

            split = index;
            if error >= max_error {
                break;
            }

            match self.reparameterize(first, last, &u, &curve) {
                Some(refined) => {
                    u = refined;
                    parameters_in_order = true;
                }
                None => {
                    trace!("discarded out of order parameters for [{}, {}]", first, last);
                    parameters_in_order = false;
                }
            }

            max_error = error;
        }

        trace!(
            "split [{}, {}] at {} (squared error: {})",
            first,
            last,
            split,
            error
        );

        Some(split)
    }

    /// Returns the largest squared distance between an interior point of the
    /// range and `curve` evaluated at the point's parameter, along with the
    /// index of that point.
    ///
    /// Ties go to the later point. The index defaults to the middle of the range
    /// if no error can be measured.
    pub fn find_max_error(
        &self,
        first: usize,
        last: usize,
        curve: &CubicBezierSegment,
        u: &[f64],
    ) -> (f64, usize) {
        let ctrl = curve.to_array();
        let mut index = first + (last - first + 1) / 2;
        let mut max_distance = 0.0;
        for i in (first + 1)..last {
            let p = self.evaluator.evaluate(&ctrl, u[i - first]);
            let v = p - self.points[i];
            let distance = v.x * v.x + v.y * v.y;
            if distance >= max_distance {
                max_distance = distance;
                index = i;
            }
        }

        (max_distance, index)
    }
}

/// Appends an accepted curve to the path.
///
/// The outgoing handle of the current last segment is set from the curve's
/// first control point, and a new segment is pushed at the end of the curve
/// with the incoming handle set from its second control point.
pub fn add_curve(segments: &mut Vec<PathSegment>, curve: &CubicBezierSegment) {
    if let Some(previous) = segments.last_mut() {
        previous.control_out = curve.ctrl1 - curve.from;
    }

    segments.push(PathSegment::with_control_in(
        curve.to,
        curve.ctrl2 - curve.to,
    ));
}

#[cfg(test)]
use crate::math::{point, vector};

#[test]
fn distance_cache_alignment() {
    let points = [
        point(0.0, 0.0),
        point(3.0, 4.0),
        point(3.0, 4.0),
        point(6.0, 8.0),
    ];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);
    assert_eq!(fitter.distances(), &[0.0, 5.0, 0.0, 5.0]);

    assert!(PathFitter::new(&[], Evaluator::Scalar).distances().is_empty());
    assert_eq!(
        PathFitter::new(&[point(1.0, 1.0)], Evaluator::Scalar).distances(),
        &[0.0]
    );
}

#[test]
fn max_error_ties_go_to_the_later_point() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(0.0, 1.0),
        point(0.0, 0.0),
    ];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);
    let curve = CubicBezierSegment::from_array([point(0.0, 0.0); 4]);

    let (error, index) = fitter.find_max_error(0, 3, &curve, &[0.0, 0.25, 0.75, 1.0]);
    assert_eq!(error, 1.0);
    assert_eq!(index, 2);
}

#[test]
fn max_error_default_index() {
    let nan = f64::NAN;
    let points = [point(0.0, 0.0), point(nan, nan), point(nan, nan), point(3.0, 0.0)];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);
    let curve = CubicBezierSegment::from_array([point(0.0, 0.0); 4]);

    assert_eq!(
        fitter.find_max_error(0, 3, &curve, &[0.0, 0.3, 0.6, 1.0]),
        (0.0, 2)
    );
}

#[test]
fn add_curve_patches_the_previous_segment() {
    let mut segments = vec![PathSegment::new(point(0.0, 0.0))];
    add_curve(
        &mut segments,
        &CubicBezierSegment {
            from: point(0.0, 0.0),
            ctrl1: point(1.0, 1.0),
            ctrl2: point(2.0, 1.0),
            to: point(3.0, 0.0),
        },
    );
    add_curve(
        &mut segments,
        &CubicBezierSegment {
            from: point(3.0, 0.0),
            ctrl1: point(4.0, -1.0),
            ctrl2: point(5.0, 0.0),
            to: point(6.0, 0.0),
        },
    );

    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0].control_in, vector(0.0, 0.0));
    assert_eq!(segments[0].control_out, vector(1.0, 1.0));
    assert_eq!(segments[1].control_in, vector(-1.0, 1.0));
    assert_eq!(segments[1].control_out, vector(1.0, -1.0));
    assert_eq!(segments[1].anchor, point(3.0, 0.0));
    assert_eq!(segments[2].control_in, vector(-1.0, 0.0));
    assert_eq!(segments[2].control_out, vector(0.0, 0.0));
}

#[test]
fn curves_are_produced_in_path_order() {
    let points: Vec<Point> = (0..12)
        .map(|i| point(i as f64 * 3.0, if i % 2 == 0 { 0.0 } else { 5.0 }))
        .collect();
    let fitter = PathFitter::new(&points, Evaluator::Paired);

    let mut ranges = Vec::new();
    fitter.for_each_curve(0.5, &mut |fitted| {
        assert_eq!(fitted.parameters.len(), fitted.last - fitted.first + 1);
        ranges.push((fitted.first, fitted.last));
    });

    assert!(ranges.len() > 1);
    assert_eq!(ranges.first().unwrap().0, 0);
    assert_eq!(ranges.last().unwrap().1, points.len() - 1);
    for pair in ranges.windows(2) {
        assert_eq!(pair[0].1, pair[1].0);
    }
}

#[test]
fn accepted_curves_are_within_tolerance() {
    let points: Vec<Point> = (0..40)
        .map(|i| {
            let t = i as f64 * 0.2;
            point(t * 10.0, t.sin() * 20.0)
        })
        .collect();
    let fitter = PathFitter::new(&points, Evaluator::Scalar);
    let tolerance = 0.5;

    let mut count = 0;
    fitter.for_each_curve(tolerance, &mut |fitted| {
        count += 1;
        assert!(fitted.max_error < tolerance);
        let ctrl = fitted.curve.to_array();
        for i in (fitted.first + 1)..fitted.last {
            let p = Evaluator::Scalar.evaluate(&ctrl, fitted.parameters[i - fitted.first]);
            assert!((p - points[i]).square_length() <= fitted.max_error);
        }
    });

    assert!(count >= 1);

    let mut fitted_once = 0;
    fitter.for_each_curve(tolerance, &mut |fitted| {
        if fitted.iteration > 0 {
            return;
        }
        fitted_once += 1;
        let u = fitter.chord_length_parameterize(fitted.first, fitted.last);
        assert_eq!(fitted.parameters, &u[..]);
        let ctrl = fitted.curve.to_array();
        for i in (fitted.first + 1)..fitted.last {
            let p = Evaluator::Scalar.evaluate(&ctrl, u[i - fitted.first]);
            assert!((p - points[i]).square_length() < tolerance);
        }
    });
    assert!(fitted_once >= 1);
}

#[test]
fn empty_ranges_produce_nothing() {
    let points = [point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0)];
    let fitter = PathFitter::new(&points, Evaluator::Scalar);
    let tangent = vector(1.0, 0.0);

    let mut count = 0;
    fitter.fit_cubic(1.0, 1, 1, tangent, -tangent, &mut |_| count += 1);
    fitter.fit_cubic(1.0, 2, 0, tangent, -tangent, &mut |_| count += 1);
    assert_eq!(count, 0);

    fitter.fit_cubic(1.0, 0, 2, tangent, -tangent, &mut |fitted| {
        assert_eq!(fitted.iteration, 0);
        count += 1;
    });
    assert!(count >= 1);
}
