use crate::commands::{GenerateCmd, Generator};
use crate::error::CliError;

use simplify::math::{point, Point};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;

pub fn generate(mut cmd: GenerateCmd) -> Result<(), CliError> {
    let mut rng = match cmd.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let points = match cmd.generator {
        Generator::RandomWalk { points } => {
            writeln!(&mut *cmd.output, "# random walk, {} points", points)?;
            random_walk(&mut rng, points)
        }
        Generator::Grid {
            columns,
            rows,
            width,
            height,
        } => {
            writeln!(
                &mut *cmd.output,
                "# grid, {} columns, {} rows, {}x{}",
                columns, rows, width, height
            )?;
            jittered_grid(&mut rng, columns, rows, width, height)
        }
    };

    for p in &points {
        writeln!(&mut *cmd.output, "{} {}", p.x, p.y)?;
    }
    cmd.output.flush()?;

    Ok(())
}

/// Points advancing by 3 along `x` while `y` moves by a random step in
/// `[-25, 25)` around 100.
pub fn random_walk<R: Rng>(rng: &mut R, count: usize) -> Vec<Point> {
    let mut y_offset = 0.0;
    (0..count)
        .map(|i| {
            let step = rng.gen_range(-25i32..25) as f64;
            let y = step + 100.0 + y_offset;
            y_offset += step;
            point(i as f64 * 3.0, y)
        })
        .collect()
}

/// Column after column of points covering a `width` x `height` area with a
/// 10 unit margin. Each point is pushed right by up to 9 units.
pub fn jittered_grid<R: Rng>(
    rng: &mut R,
    columns: usize,
    rows: usize,
    width: f64,
    height: f64,
) -> Vec<Point> {
    let x_scale = (width - 20.0) / columns as f64;
    let y_scale = (height - 20.0) / rows as f64;

    let mut points = Vec::with_capacity(columns * rows);
    for i in 0..columns {
        for j in 0..rows {
            let jitter = rng.gen_range(0i32..10) as f64;
            let x = (10.0 + i as f64 * x_scale).trunc() + jitter;
            let y = (10.0 + j as f64 * y_scale).trunc();
            points.push(point(x, y));
        }
    }

    points
}

#[test]
fn random_walk_shape() {
    let mut rng = StdRng::seed_from_u64(1);
    let points = random_walk(&mut rng, 200);
    assert_eq!(points.len(), 200);

    let mut previous = 100.0;
    for (i, p) in points.iter().enumerate() {
        assert_eq!(p.x, i as f64 * 3.0);
        let step = p.y - previous;
        assert!(step >= -25.0 && step < 25.0, "{}", step);
        assert_eq!(step, step.trunc());
        previous = p.y;
    }
}

#[test]
fn seeded_generators_are_reproducible() {
    let a = random_walk(&mut StdRng::seed_from_u64(7), 50);
    let b = random_walk(&mut StdRng::seed_from_u64(7), 50);
    assert_eq!(a, b);

    let a = jittered_grid(&mut StdRng::seed_from_u64(7), 4, 3, 100.0, 80.0);
    let b = jittered_grid(&mut StdRng::seed_from_u64(7), 4, 3, 100.0, 80.0);
    assert_eq!(a, b);
}

#[test]
fn grid_shape() {
    let points = jittered_grid(&mut StdRng::seed_from_u64(3), 4, 3, 100.0, 80.0);
    assert_eq!(points.len(), 12);

    // Columns of 3 points, 20 units apart vertically.
    for column in points.chunks(3) {
        assert_eq!(column[0].y, 10.0);
        assert_eq!(column[1].y, 30.0);
        assert_eq!(column[2].y, 50.0);
    }

    for (i, column) in points.chunks(3).enumerate() {
        let left = 10.0 + i as f64 * 20.0;
        for p in column {
            assert!(p.x >= left && p.x < left + 10.0, "{:?}", p);
        }
    }
}
