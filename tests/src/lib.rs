use simplify::extra::parser::parse_points;
use simplify::fit::{fit, fit_with_options, FitOptions, FittedCurve, PathFitter};
use simplify::geom::Evaluator;
use simplify::math::{point, Point};
use simplify::path::record::{read_segments, write_segments};
use simplify::path::{curves, PathSegment, SvgPathData};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

static TOLERANCES: [f64; 8] = [0.01, 0.1, 0.5, 1.0, 2.5, 5.0, 25.0, 100.0];

/// Random walk with integer steps, like a jittery pointer trace.
pub fn random_walk<R: Rng>(rng: &mut R, count: usize) -> Vec<Point> {
    let mut y = 100.0;
    (0..count)
        .map(|i| {
            y += rng.gen_range(-25i32..25) as f64;
            point(i as f64 * 3.0, y)
        })
        .collect()
}

/// Points sampled along a smooth curve, with a bit of noise.
pub fn noisy_curve<R: Rng>(rng: &mut R, count: usize) -> Vec<Point> {
    let frequency = rng.gen_range(0.5..4.0);
    let amplitude = rng.gen_range(5.0..200.0);
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64 * std::f64::consts::PI * 2.0;
            point(
                t * 100.0 + rng.gen_range(-0.5..0.5),
                (t * frequency).sin() * amplitude + rng.gen_range(-0.5..0.5),
            )
        })
        .collect()
}

/// Points scattered over a 1000x1000 square.
pub fn scattered<R: Rng>(rng: &mut R, count: usize) -> Vec<Point> {
    (0..count)
        .map(|_| point(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
        .collect()
}

/// A polyline where some points are repeated, like a pointer that stopped moving.
pub fn with_repeated_points<R: Rng>(rng: &mut R, count: usize) -> Vec<Point> {
    let mut points = Vec::with_capacity(count);
    let mut p = point(0.0, 0.0);
    while points.len() < count {
        if rng.gen_range(0..4) != 0 {
            p += simplify::math::vector(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        }
        points.push(p);
    }

    points
}

pub fn generate_polylines() -> Vec<Vec<Point>> {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut polylines = vec![
        Vec::new(),
        vec![point(1.0, 1.0)],
        vec![point(0.0, 0.0), point(10.0, 0.0)],
        vec![point(5.0, 5.0), point(5.0, 5.0), point(5.0, 5.0)],
    ];

    for &count in &[3, 4, 5, 10, 50, 200] {
        polylines.push(random_walk(&mut rng, count));
        polylines.push(noisy_curve(&mut rng, count));
        polylines.push(scattered(&mut rng, count));
        polylines.push(with_repeated_points(&mut rng, count));
    }

    polylines
}

/// Asserts the structural properties every fitted path has.
pub fn check_path(points: &[Point], path: &[PathSegment]) {
    if points.is_empty() {
        assert!(path.is_empty());
        return;
    }

    assert!(!path.is_empty());
    assert!(path.len() <= points.len());
    if points.len() > 1 {
        assert!(path.len() >= 2);
    }

    assert!(!path[0].has_control_in());
    assert!(!path[path.len() - 1].has_control_out());

    // Anchors are input points, in order, starting and ending with the
    // endpoints of the input.
    let mut remaining = points.iter();
    for segment in path {
        assert!(
            remaining.any(|p| *p == segment.anchor),
            "anchor {:?} is not an input point",
            segment.anchor
        );
    }
    assert_eq!(path[0].anchor, points[0]);
    assert_eq!(path[path.len() - 1].anchor, points[points.len() - 1]);
}

#[test]
fn path_structure() {
    for points in generate_polylines() {
        for &tolerance in &TOLERANCES {
            check_path(&points, &fit(&points, tolerance));
        }
    }
}

/// Largest squared distance between the interior points of the fitted range and
/// the curve evaluated at `parameters`.
fn max_error_at(points: &[Point], fitted: &FittedCurve, parameters: &[f64]) -> f64 {
    let ctrl = fitted.curve.to_array();
    let mut max_error: f64 = 0.0;
    for i in (fitted.first + 1)..fitted.last {
        let p = Evaluator::Scalar.evaluate(&ctrl, parameters[i - fitted.first]);
        max_error = max_error.max((p - points[i]).square_length());
    }

    max_error
}

// Curves are accepted at the parameters they were fitted with. These are the
// chord-length parameters of the range unless a Newton-Raphson refinement was
// adopted first, in which case the chord-length parameters may be further
// from the curve.
#[test]
fn accepted_curves_are_within_tolerance() {
    let mut chord_length_curves = 0;
    let mut refined_curves = 0;
    for points in generate_polylines() {
        for &tolerance in &TOLERANCES {
            let fitter = PathFitter::new(&points, Evaluator::Paired);
            let mut expected_first = 0;
            fitter.for_each_curve(tolerance, &mut |fitted| {
                assert_eq!(fitted.first, expected_first);
                expected_first = fitted.last;

                if fitted.last - fitted.first < 2 {
                    return;
                }

                let chord_length = fitter.chord_length_parameterize(fitted.first, fitted.last);
                if fitted.iteration == 0 {
                    chord_length_curves += 1;
                    assert_eq!(fitted.parameters, &chord_length[..]);
                    assert!(max_error_at(&points, fitted, &chord_length) < tolerance);
                } else {
                    refined_curves += 1;
                }

                let max_error = max_error_at(&points, fitted, fitted.parameters);

                assert_eq!(max_error, fitted.max_error);
                assert!(
                    max_error < tolerance,
                    "curve over [{}, {}]: error {} >= tolerance {}",
                    fitted.first,
                    fitted.last,
                    max_error,
                    tolerance
                );
            });

            if points.len() > 1 {
                assert_eq!(expected_first, points.len() - 1);
            }
        }
    }

    assert!(chord_length_curves > 0);
    assert!(refined_curves > 0);
}

#[test]
fn evaluators_produce_identical_paths() {
    for points in generate_polylines() {
        for &tolerance in &TOLERANCES {
            let options = FitOptions::tolerance(tolerance);
            let scalar = fit_with_options(&points, &options.with_evaluator(Evaluator::Scalar));
            let paired = fit_with_options(&points, &options.with_evaluator(Evaluator::Paired));
            assert_eq!(scalar, paired);
        }
    }
}

#[test]
fn fitting_is_deterministic() {
    for points in generate_polylines() {
        assert_eq!(fit(&points, 2.5), fit(&points, 2.5));
    }
}

#[test]
fn smaller_tolerances_use_more_curves() {
    let mut rng = StdRng::seed_from_u64(7);
    let points = noisy_curve(&mut rng, 500);

    let coarse = fit(&points, 100.0).len();
    let fine = fit(&points, 0.01).len();
    assert!(fine > coarse, "{} <= {}", fine, coarse);
}

#[test]
fn handles_are_smooth_at_interior_anchors() {
    for points in generate_polylines() {
        let path = fit(&points, 1.0);
        if path.len() < 3 {
            continue;
        }

        for segment in &path[1..path.len() - 1] {
            let a = segment.control_in;
            let b = segment.control_out;
            let scale = (a.length() * b.length()).max(1.0);
            assert!(a.cross(b).abs() <= 1e-9 * scale, "{:?}", segment);
            assert!(a.dot(b) <= 1e-9 * scale, "{:?}", segment);
        }

        // The curves leave each interior anchor in the direction they arrived.
        let all: Vec<_> = curves(&path).collect();
        for pair in all.windows(2) {
            let arriving = pair[0].derivative(1.0);
            let leaving = pair[1].derivative(0.0);
            let scale = (arriving.length() * leaving.length()).max(1.0);
            assert!(arriving.cross(leaving).abs() <= 1e-9 * scale);
            assert!(arriving.dot(leaving) >= -1e-9 * scale);
        }
    }
}

#[test]
fn non_positive_tolerance_keeps_every_point() {
    let mut rng = StdRng::seed_from_u64(11);
    let points = noisy_curve(&mut rng, 30);

    for &tolerance in &[0.0, -1.0, -100.0] {
        let path = fit(&points, tolerance);
        assert_eq!(path.len(), points.len());
        check_path(&points, &path);
    }
}

#[test]
fn long_random_walk() {
    let mut rng = StdRng::seed_from_u64(1);
    let points = random_walk(&mut rng, 2000);

    let path = fit(&points, FitOptions::DEFAULT_TOLERANCE);
    check_path(&points, &path);
    assert_eq!(
        path,
        fit_with_options(&points, &FitOptions::DEFAULT.with_evaluator(Evaluator::Scalar))
    );
}

#[test]
fn curves_match_segments() {
    let mut rng = StdRng::seed_from_u64(5);
    let points = noisy_curve(&mut rng, 100);
    let path = fit(&points, 0.5);

    let fitted: Vec<_> = {
        let mut v = Vec::new();
        PathFitter::new(&points, Evaluator::Paired).for_each_curve(0.5, &mut |fitted| {
            v.push(fitted.curve);
        });
        v
    };

    let walked: Vec<_> = curves(&path).collect();
    assert_eq!(walked.len(), fitted.len());
    for (a, b) in walked.iter().zip(fitted.iter()) {
        assert_eq!(a.from, b.from);
        assert_eq!(a.to, b.to);
        assert!((a.ctrl1 - b.ctrl1).length() < 1e-9);
        assert!((a.ctrl2 - b.ctrl2).length() < 1e-9);
    }
}

#[test]
fn records_round_trip() {
    for points in generate_polylines() {
        let path = fit(&points, 0.5);

        let mut bytes = Vec::new();
        write_segments(&path, &mut bytes).unwrap();
        assert_eq!(read_segments(&mut &bytes[..]).unwrap(), path);
    }
}

#[test]
fn svg_output() {
    let mut rng = StdRng::seed_from_u64(3);
    let points = noisy_curve(&mut rng, 60);
    let path = fit(&points, 0.5);

    let svg = SvgPathData(&path).to_string();
    assert!(svg.starts_with("M "));
    assert_eq!(svg.matches('C').count(), path.len() - 1);
}

#[test]
fn point_lists_round_trip_through_text() {
    let mut rng = StdRng::seed_from_u64(9);
    let points = noisy_curve(&mut rng, 100);

    let mut text = String::from("# noisy curve\n");
    for p in &points {
        text.push_str(&format!("{}, {}\n", p.x, p.y));
    }

    let parsed = parse_points(&text).unwrap();
    assert_eq!(parsed, points);
    assert_eq!(fit(&parsed, 1.0), fit(&points, 1.0));
}
