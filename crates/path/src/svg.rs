//! SVG path data output.

use crate::iterator::curves;
use crate::PathSegment;

use std::fmt;

/// Formats a fitted path as the content of an SVG `d` attribute.
///
/// The path starts with a move-to the first anchor and contains one cubic bézier
/// command per curve, for example `M 0 0 C 1 0 2 0 3 0`. Empty paths format as an
/// empty string.
#[derive(Copy, Clone, Debug)]
pub struct SvgPathData<'l>(pub &'l [PathSegment]);

impl<'l> fmt::Display for SvgPathData<'l> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let first = match self.0.first() {
            Some(segment) => segment.anchor,
            None => return Ok(()),
        };

        write!(f, "M {} {}", first.x, first.y)?;
        for curve in curves(self.0) {
            write!(
                f,
                " C {} {} {} {} {} {}",
                curve.ctrl1.x, curve.ctrl1.y, curve.ctrl2.x, curve.ctrl2.y, curve.to.x, curve.to.y,
            )?;
        }

        Ok(())
    }
}

#[test]
fn svg_path_data() {
    use crate::math::{point, vector};

    assert_eq!(SvgPathData(&[]).to_string(), "");
    assert_eq!(
        SvgPathData(&[PathSegment::new(point(1.5, -2.0))]).to_string(),
        "M 1.5 -2"
    );

    let path = [
        PathSegment {
            control_out: vector(1.0, 0.0),
            ..PathSegment::new(point(0.0, 0.0))
        },
        PathSegment::with_control_in(point(3.0, 0.0), vector(-1.0, 0.0)),
    ];
    assert_eq!(SvgPathData(&path).to_string(), "M 0 0 C 1 0 2 0 3 0");
}
