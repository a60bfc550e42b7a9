//! Helpers to investigate inputs that break the fitter.

use crate::math::Point;

use std::fmt::Write;
use std::panic;

/// Removes points from `points` for as long as `cb` keeps reporting a failure,
/// then prints the remaining points as a test case and returns them.
///
/// `cb` returns `true` when the input it is given fails. A panic inside `cb`
/// also counts as a failure.
pub fn find_reduced_test_case<F>(points: &[Point], cb: &F) -> Vec<Point>
where
    F: Fn(&[Point]) -> bool + panic::UnwindSafe + panic::RefUnwindSafe,
{
    let mut points = points.to_vec();

    println!(" -- removing points...");

    let mut i = 0;
    while i < points.len() {
        let mut cloned = points.clone();
        cloned.remove(i);

        let failed = panic::catch_unwind(|| cb(&cloned)).unwrap_or(true);

        if failed {
            points = cloned;
            continue;
        }

        i += 1;
    }

    println!(" ----------- reduced test case: -----------\n\n");
    println!("{}", format_test_case(&points));

    points
}

/// Formats a ready to paste test function feeding `points` to `test_points`.
pub fn format_test_case(points: &[Point]) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "#[test]");
    let _ = writeln!(s, "fn reduced_test_case() {{");
    let _ = writeln!(s, "    let points = [");
    for p in points {
        let _ = writeln!(s, "        point({:?}, {:?}),", p.x, p.y);
    }
    let _ = writeln!(s, "    ];\n");
    let _ = writeln!(s, "    test_points(&points);");
    let _ = writeln!(s, "}}");

    s
}

#[test]
fn reduce_to_the_culprit() {
    use crate::math::point;

    let points = [
        point(0.0, 0.0),
        point(1.0, 1.0),
        point(5.0, 5.0),
        point(2.0, 0.0),
        point(3.0, 1.0),
    ];

    let reduced = find_reduced_test_case(&points, &|points: &[Point]| {
        points.contains(&point(5.0, 5.0))
    });

    assert_eq!(reduced, vec![point(5.0, 5.0)]);
}

#[test]
fn panics_are_failures() {
    use crate::math::point;

    let points: Vec<Point> = (0..6).map(|i| point(i as f64, 0.0)).collect();

    let reduced = find_reduced_test_case(&points, &|points: &[Point]| {
        assert!(points.len() < 3, "too many points");
        false
    });

    assert_eq!(reduced.len(), 3);
}

#[test]
fn test_case_syntax() {
    use crate::math::point;

    let text = format_test_case(&[point(1.0, -2.5)]);
    assert!(text.starts_with("#[test]\nfn reduced_test_case() {\n"));
    assert!(text.contains("        point(1.0, -2.5),\n"));
    assert!(text.ends_with("    test_points(&points);\n}\n"));
}
