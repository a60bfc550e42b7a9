use crate::commands::FuzzCmd;
use crate::error::CliError;
use crate::generate::random_walk;

use simplify::extra::debugging::find_reduced_test_case;
use simplify::fit::{fit_with_options, FitOptions, PathFitter};
use simplify::geom::Evaluator;
use simplify::math::{point, Point};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::{max, min};
use std::panic;

fn random_point<R: Rng>(rng: &mut R) -> Point {
    point(rng.gen::<f64>() * 1000.0, rng.gen::<f64>() * 1000.0)
}

fn generate_points<R: Rng>(rng: &mut R, cmd: &FuzzCmd, iteration: u64) -> Vec<Point> {
    let min_points = cmd.min_points.unwrap_or(2);
    let max_points = max(min_points, cmd.max_points.unwrap_or(5_000));
    let diff = max_points - min_points;

    let target = min_points + min(diff, (iteration / 500) as u32);
    let count = rng.gen_range(min_points..=target) as usize;

    // Scattered points are hard to fit, random walks look more like real input.
    if rng.gen::<bool>() {
        (0..count).map(|_| random_point(rng)).collect()
    } else {
        random_walk(rng, count)
    }
}

/// Returns `true` if the fit of `points` upholds the properties of the fitter.
pub fn check_fit(points: &[Point], tolerance: f64) -> bool {
    let options = FitOptions::tolerance(tolerance);
    let path = fit_with_options(points, &options.with_evaluator(Evaluator::Paired));
    let scalar_path = fit_with_options(points, &options.with_evaluator(Evaluator::Scalar));
    if path != scalar_path {
        return false;
    }

    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return path.is_empty(),
    };

    if path.is_empty() || path.len() > points.len() {
        return false;
    }
    if points.len() > 1 && path.len() < 2 {
        return false;
    }

    let path_first = path[0];
    let path_last = path[path.len() - 1];
    if path_first.has_control_in() || path_last.has_control_out() {
        return false;
    }
    if path_first.anchor != first || path_last.anchor != last {
        return false;
    }

    let mut valid = true;
    PathFitter::new(points, Evaluator::Paired).for_each_curve(tolerance, &mut |fitted| {
        if fitted.last - fitted.first > 1 && fitted.max_error >= tolerance {
            valid = false;
        }
    });

    valid
}

pub fn run(cmd: FuzzCmd) -> Result<(), CliError> {
    let mut rng = match cmd.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("----");
    println!("Fuzzing the curve fitter:");
    if let Some(tolerance) = cmd.tolerance {
        println!("tolerance: {tolerance}");
    }
    if let Some(num) = cmd.min_points {
        println!("minimum number of points per list: {num}");
    }
    if let Some(num) = cmd.max_points {
        println!("maximum number of points per list: {num}");
    }
    println!("----");

    let mut i: u64 = 0;
    while cmd.iterations.map_or(true, |iterations| i < iterations) {
        let points = generate_points(&mut rng, &cmd, i);
        let tolerance = cmd
            .tolerance
            .unwrap_or_else(|| rng.gen_range(0.01..10.0));

        let ok = panic::catch_unwind(|| check_fit(&points, tolerance)).unwrap_or(false);

        if !ok {
            println!(" !! Error while fitting");
            println!("    Point list #{i}, tolerance {tolerance}");
            find_reduced_test_case(&points, &|points: &[Point]| !check_fit(points, tolerance));

            return Err(CliError::FuzzFailure { iterations: i + 1 });
        }

        i += 1;
        if i % 500 == 0 {
            println!(" -- tested {i} point lists");
        }
    }

    println!(" -- tested {i} point lists");

    Ok(())
}

#[test]
fn check_simple_inputs() {
    assert!(check_fit(&[], 1.0));
    assert!(check_fit(&[point(1.0, 1.0)], 1.0));
    assert!(check_fit(&[point(1.0, 1.0), point(2.0, 5.0)], 1.0));

    let points: Vec<Point> = (0..100)
        .map(|i| {
            let t = i as f64 * 0.1;
            point(t * 30.0, (t * 3.0).sin() * 40.0)
        })
        .collect();
    assert!(check_fit(&points, 0.5));
    assert!(check_fit(&points, 0.0));
}

#[test]
fn fuzz_a_few_iterations() {
    let cmd = FuzzCmd {
        tolerance: None,
        min_points: Some(2),
        max_points: Some(40),
        iterations: Some(20),
        seed: Some(42),
    };

    assert!(run(cmd).is_ok());
}
