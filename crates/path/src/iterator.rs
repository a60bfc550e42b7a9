//! Walk a sequence of path segments as cubic bézier curves.
//!
//! This is what a renderer does with the output of the fitter: every pair of
//! consecutive segments describes one cubic bézier curve.

use crate::math::CubicBezierSegment;
use crate::PathSegment;

use std::iter::FusedIterator;
use std::slice::Windows;

/// Returns an iterator over the curves between consecutive segments.
///
/// A path of `n` segments has `n - 1` curves (and none when `n < 2`).
pub fn curves(segments: &[PathSegment]) -> Curves<'_> {
    Curves {
        windows: segments.windows(2),
    }
}

/// An iterator over the curves of a path. See [`curves`].
#[derive(Clone, Debug)]
pub struct Curves<'l> {
    windows: Windows<'l, PathSegment>,
}

impl<'l> Iterator for Curves<'l> {
    type Item = CubicBezierSegment;

    #[inline]
    fn next(&mut self) -> Option<CubicBezierSegment> {
        self.windows.next().map(|pair| pair[0].curve_to(&pair[1]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.windows.size_hint()
    }
}

impl<'l> DoubleEndedIterator for Curves<'l> {
    #[inline]
    fn next_back(&mut self) -> Option<CubicBezierSegment> {
        self.windows.next_back().map(|pair| pair[0].curve_to(&pair[1]))
    }
}

impl<'l> ExactSizeIterator for Curves<'l> {}

impl<'l> FusedIterator for Curves<'l> {}

#[test]
fn no_curves_for_short_paths() {
    use crate::math::point;

    assert_eq!(curves(&[]).count(), 0);
    assert_eq!(curves(&[PathSegment::new(point(1.0, 1.0))]).count(), 0);
}

#[test]
fn one_curve_per_pair() {
    use crate::math::{point, vector};

    let path = [
        PathSegment {
            control_out: vector(0.0, 1.0),
            ..PathSegment::new(point(0.0, 0.0))
        },
        PathSegment {
            control_in: vector(-1.0, 0.0),
            control_out: vector(1.0, 0.0),
            anchor: point(2.0, 2.0),
        },
        PathSegment::with_control_in(point(4.0, 0.0), vector(0.0, 1.0)),
    ];

    let all: Vec<_> = curves(&path).collect();
    assert_eq!(all.len(), 2);
    assert_eq!(curves(&path).len(), 2);

    assert_eq!(all[0].from, point(0.0, 0.0));
    assert_eq!(all[0].ctrl1, point(0.0, 1.0));
    assert_eq!(all[0].ctrl2, point(1.0, 2.0));
    assert_eq!(all[0].to, point(2.0, 2.0));

    assert_eq!(all[1].from, point(2.0, 2.0));
    assert_eq!(all[1].ctrl1, point(3.0, 2.0));
    assert_eq!(all[1].ctrl2, point(4.0, 1.0));
    assert_eq!(all[1].to, point(4.0, 0.0));

    let reversed: Vec<_> = curves(&path).rev().collect();
    assert_eq!(reversed[0], all[1]);
    assert_eq!(reversed[1], all[0]);
}
