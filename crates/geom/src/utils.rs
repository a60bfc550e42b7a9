//! Vector arithmetic used throughout the fitter.

use crate::scalar::Scalar;
use crate::{Point, Vector};

/// Dot product of two vectors.
#[inline]
pub fn dot<S: Scalar>(a: Vector<S>, b: Vector<S>) -> S {
    a.x * b.x + a.y * b.y
}

/// Euclidean length of a vector.
#[inline]
pub fn length<S: Scalar>(v: Vector<S>) -> S {
    dot(v, v).sqrt()
}

/// Euclidean distance between two points.
#[inline]
pub fn distance<S: Scalar>(a: Point<S>, b: Point<S>) -> S {
    length(b - a)
}

/// Scales `v` so that its length is `target_length`.
///
/// A vector of (numerically) zero length has no direction and normalizes to the
/// zero vector. A negative target length flips the direction.
#[inline]
pub fn normalize<S: Scalar>(v: Vector<S>, target_length: S) -> Vector<S> {
    let current = length(v);
    let scale = if current.abs() <= S::MACHINE_EPSILON {
        S::ZERO
    } else {
        target_length / current
    };

    Vector::new(v.x * scale, v.y * scale)
}

#[test]
fn dot_and_length() {
    use crate::vector;

    assert_eq!(dot(vector(1.3, 2.6), vector(2.3, 3.6)), 1.3 * 2.3 + 2.6 * 3.6);
    assert_eq!(dot(vector(1.0, 0.0), vector(0.0, 1.0)), 0.0);
    assert_eq!(length(vector(3.0, 4.0)), 5.0);
    assert_eq!(length(vector(0.0f64, 0.0)), 0.0);
}

#[test]
fn distance_is_symmetric() {
    use crate::point;

    let a = point(1.0, 2.0);
    let b = point(4.0, 6.0);
    assert_eq!(distance(a, b), 5.0);
    assert_eq!(distance(b, a), 5.0);
    assert_eq!(distance(a, a), 0.0);
}

#[test]
fn normalize_to_target_length() {
    use crate::vector;

    let v = normalize(vector(3.0, 4.0), 10.0);
    assert!((v.x - 6.0f64).abs() < 1e-12);
    assert!((v.y - 8.0f64).abs() < 1e-12);

    let unit = normalize(vector(0.0, -2.5), 1.0);
    assert_eq!(unit.x, 0.0);
    assert!((unit.y + 1.0f64).abs() < 1e-12);

    let flipped = normalize(vector(2.0, 0.0), -3.0);
    assert_eq!(flipped, vector(-3.0, 0.0));
}

#[test]
fn normalize_zero_vector() {
    use crate::vector;

    assert_eq!(normalize(vector(0.0f64, 0.0), 5.0), vector(0.0, 0.0));
    assert_eq!(normalize(vector(1e-17f64, 0.0), 5.0), vector(0.0, 0.0));
    assert_eq!(normalize(vector(0.0f32, 0.0), 1.0), vector(0.0, 0.0));
}
