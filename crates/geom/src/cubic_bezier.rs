use crate::scalar::Scalar;
use crate::{Point, Vector};

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    /// Builds a segment out of a control polygon.
    #[inline]
    pub fn from_array(points: [Point<S>; 4]) -> Self {
        CubicBezierSegment {
            from: points[0],
            ctrl1: points[1],
            ctrl2: points[2],
            to: points[3],
        }
    }

    /// Returns the control polygon of this segment.
    #[inline]
    pub fn to_array(&self) -> [Point<S>; 4] {
        [self.from, self.ctrl1, self.ctrl2, self.to]
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    #[inline]
    fn derivative_coefficients(&self, t: S) -> (S, S, S, S) {
        let t2 = t * t;
        (
            -S::THREE * t2 + S::SIX * t - S::THREE,
            S::NINE * t2 - S::value(12.0) * t + S::THREE,
            -S::NINE * t2 + S::SIX * t,
            S::THREE * t2,
        )
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let (c0, c1, c2, c3) = self.derivative_coefficients(t);
        self.from.to_vector() * c0
            + self.ctrl1.to_vector() * c1
            + self.ctrl2.to_vector() * c2
            + self.to.to_vector() * c3
    }

    /// Returns true if both control points lie on the segment between the endpoints.
    pub fn is_straight(&self, tolerance: S) -> bool {
        let baseline = self.to - self.from;
        let len2 = baseline.square_length();
        if len2 <= S::MACHINE_EPSILON {
            return (self.ctrl1 - self.from).square_length() <= tolerance * tolerance
                && (self.ctrl2 - self.from).square_length() <= tolerance * tolerance;
        }

        let on_baseline = |p: Point<S>| {
            let v = p - self.from;
            let cross = baseline.cross(v);
            let along = baseline.dot(v) / len2;
            cross * cross / len2 <= tolerance * tolerance && along >= S::ZERO && along <= S::ONE
        };

        on_baseline(self.ctrl1) && on_baseline(self.ctrl2)
    }
}

#[test]
fn sample_endpoints() {
    use crate::point;

    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(1.0, 1.0),
        to: point(0.0, 1.0),
    };

    assert_eq!(curve.sample(0.0), point(0.0, 0.0));
    assert_eq!(curve.sample(1.0), point(0.0, 1.0));
    assert_eq!(curve.sample(0.5), point(0.75, 0.5));
}

#[test]
fn derivative_at_endpoints() {
    use crate::{point, vector};

    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(2.0, 1.0),
        to: point(2.0, 2.0),
    };

    // P'(0) = 3 * (ctrl1 - from), P'(1) = 3 * (to - ctrl2).
    assert_eq!(curve.derivative(0.0), vector(3.0, 0.0));
    assert_eq!(curve.derivative(1.0), vector(0.0, 3.0));
}

#[test]
fn array_conversions() {
    use crate::point;

    let points = [
        point(1.0f32, 2.0),
        point(3.0, 4.0),
        point(5.0, 6.0),
        point(7.0, 8.0),
    ];
    let curve = CubicBezierSegment::from_array(points);
    assert_eq!(curve.from, points[0]);
    assert_eq!(curve.ctrl1, points[1]);
    assert_eq!(curve.ctrl2, points[2]);
    assert_eq!(curve.to, points[3]);
    assert_eq!(curve.to_array(), points);
}

#[test]
fn straight_curves() {
    use crate::point;

    let straight = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(10.0 / 3.0, 0.0),
        ctrl2: point(20.0 / 3.0, 0.0),
        to: point(10.0, 0.0),
    };
    assert!(straight.is_straight(1e-9));

    let bent = CubicBezierSegment {
        ctrl1: point(10.0 / 3.0, 1.0),
        ..straight
    };
    assert!(!bent.is_straight(1e-9));
    assert!(bent.is_straight(2.0));
}
