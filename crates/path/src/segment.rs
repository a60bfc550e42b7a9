use crate::math::{CubicBezierSegment, Point, Vector};

/// A node of a fitted path: an anchor point and its two handles.
///
/// Handles are stored relative to the anchor. An absent handle is the zero vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PathSegment {
    /// Handle towards the previous segment, relative to `anchor`.
    pub control_in: Vector,
    /// Handle towards the next segment, relative to `anchor`.
    pub control_out: Vector,
    /// Absolute position of the segment.
    pub anchor: Point,
}

impl PathSegment {
    /// A segment without handles.
    #[inline]
    pub fn new(anchor: Point) -> Self {
        PathSegment {
            control_in: Vector::zero(),
            control_out: Vector::zero(),
            anchor,
        }
    }

    /// A segment with an incoming handle and no outgoing handle.
    #[inline]
    pub fn with_control_in(anchor: Point, control_in: Vector) -> Self {
        PathSegment {
            control_in,
            control_out: Vector::zero(),
            anchor,
        }
    }

    #[inline]
    pub fn has_control_in(&self) -> bool {
        self.control_in != Vector::zero()
    }

    #[inline]
    pub fn has_control_out(&self) -> bool {
        self.control_out != Vector::zero()
    }

    /// Absolute position of the incoming control point.
    #[inline]
    pub fn in_point(&self) -> Point {
        self.anchor + self.control_in
    }

    /// Absolute position of the outgoing control point.
    #[inline]
    pub fn out_point(&self) -> Point {
        self.anchor + self.control_out
    }

    /// The cubic bézier curve going from this segment to `next`.
    #[inline]
    pub fn curve_to(&self, next: &PathSegment) -> CubicBezierSegment {
        CubicBezierSegment {
            from: self.anchor,
            ctrl1: self.out_point(),
            ctrl2: next.in_point(),
            to: next.anchor,
        }
    }
}

impl From<Point> for PathSegment {
    fn from(anchor: Point) -> Self {
        PathSegment::new(anchor)
    }
}

#[test]
fn handles_are_relative_to_the_anchor() {
    use crate::math::{point, vector};

    let segment = PathSegment {
        control_in: vector(-1.0, 0.5),
        control_out: vector(2.0, -1.0),
        anchor: point(10.0, 10.0),
    };

    assert!(segment.has_control_in());
    assert!(segment.has_control_out());
    assert_eq!(segment.in_point(), point(9.0, 10.5));
    assert_eq!(segment.out_point(), point(12.0, 9.0));
}

#[test]
fn empty_handles() {
    use crate::math::{point, vector};

    let segment = PathSegment::new(point(1.0, 2.0));
    assert!(!segment.has_control_in());
    assert!(!segment.has_control_out());
    assert_eq!(segment.in_point(), point(1.0, 2.0));
    assert_eq!(segment, PathSegment::from(point(1.0, 2.0)));
    assert_eq!(PathSegment::default().anchor, point(0.0, 0.0));

    let last = PathSegment::with_control_in(point(1.0, 2.0), vector(0.0, 1.0));
    assert!(last.has_control_in());
    assert!(!last.has_control_out());
}

#[test]
fn curve_between_segments() {
    use crate::math::{point, vector};

    let a = PathSegment {
        control_out: vector(1.0, 1.0),
        ..PathSegment::new(point(0.0, 0.0))
    };
    let b = PathSegment::with_control_in(point(4.0, 0.0), vector(-1.0, 1.0));

    let curve = a.curve_to(&b);
    assert_eq!(curve.from, point(0.0, 0.0));
    assert_eq!(curve.ctrl1, point(1.0, 1.0));
    assert_eq!(curve.ctrl2, point(3.0, 1.0));
    assert_eq!(curve.to, point(4.0, 0.0));
}
