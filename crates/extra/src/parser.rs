//! A parser for lists of points.
//!
//! # Syntax
//!
//! A point list is a sequence of numbers read two at a time as the `x` and `y`
//! coordinates of consecutive points. Numbers are separated by whitespace and/or
//! commas, so `0 0 1 2`, `0,0 1,2` and
//!
//! ```text
//! # A comment runs to the end of the line.
//! 0, 0
//! 1, 2 # second point
//! ```
//!
//! all describe the same two points.

use crate::math::{point, Point};

extern crate thiserror;

use self::thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Line {line} Column {column}: Expected number, got {src:?}.")]
    Number { src: String, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Expected a y coordinate after this x coordinate.")]
    UnpairedCoordinate { line: i32, column: i32 },
}

// A buffered iterator of characters keeping track of line and column.
pub struct Source<Iter> {
    src: Iter,
    current: char,
    line: i32,
    col: i32,
    finished: bool,
}

impl<Iter: Iterator<Item = char>> Source<Iter> {
    pub fn new<IntoIter>(src: IntoIter) -> Self
    where
        IntoIter: IntoIterator<IntoIter = Iter>,
    {
        Self::with_position(0, 0, src)
    }

    pub fn with_position<IntoIter>(line: i32, column: i32, src: IntoIter) -> Self
    where
        IntoIter: IntoIterator<IntoIter = Iter>,
    {
        let mut src = src.into_iter();

        let (current, finished) = match src.next() {
            Some(c) => (c, false),
            None => (' ', true),
        };

        let (line, col) = if current == '\n' {
            (line + 1, -1)
        } else {
            (line, column)
        };

        Source {
            current,
            finished,
            src,
            line,
            col,
        }
    }

    /// Consume the source and returns the iterator, line and column.
    pub fn unwrap(self) -> (Iter, i32, i32) {
        (self.src, self.line, self.col)
    }

    /// Skips separators and comments.
    fn skip_whitespace(&mut self) {
        while !self.finished {
            if self.current == '#' {
                while !self.finished && self.current != '\n' {
                    self.advance_one();
                }
            } else if self.current.is_whitespace() || self.current == ',' {
                self.advance_one();
            } else {
                break;
            }
        }
    }

    fn advance_one(&mut self) {
        if self.finished {
            return;
        }
        match self.src.next() {
            Some('\n') => {
                self.current = '\n';
                self.line += 1;
                self.col = -1;
            }
            Some(c) => {
                self.current = c;
                self.col += 1;
            }
            None => {
                self.current = '~';
                self.finished = true;
            }
        }
    }
}

/// A context object for parsing point lists.
#[derive(Debug, Default)]
pub struct PointListParser {
    float_buffer: String,
}

impl PointListParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the whole source and appends the points to `output`.
    ///
    /// On error, the points parsed before the error are left in `output`.
    pub fn parse<Iter>(
        &mut self,
        src: &mut Source<Iter>,
        output: &mut Vec<Point>,
    ) -> Result<(), ParseError>
    where
        Iter: Iterator<Item = char>,
    {
        src.skip_whitespace();

        while !src.finished {
            let line = src.line;
            let column = src.col;

            let x = self.parse_number(src)?;

            src.skip_whitespace();
            if src.finished {
                return Err(ParseError::UnpairedCoordinate { line, column });
            }

            let y = self.parse_number(src)?;
            output.push(point(x, y));

            src.skip_whitespace();
        }

        Ok(())
    }

    fn parse_number(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<f64, ParseError> {
        self.float_buffer.clear();

        src.skip_whitespace();

        let line = src.line;
        let column = src.col;

        if src.current == '-' {
            self.float_buffer.push('-');
            src.advance_one();
        }

        while src.current.is_numeric() {
            self.float_buffer.push(src.current);
            src.advance_one();
        }

        if src.current == '.' {
            self.float_buffer.push('.');
            src.advance_one();

            while src.current.is_numeric() {
                self.float_buffer.push(src.current);
                src.advance_one();
            }
        }

        if src.current == 'e' || src.current == 'E' {
            self.float_buffer.push(src.current);
            src.advance_one();

            if src.current == '-' {
                self.float_buffer.push('-');
                src.advance_one();
            }

            while src.current.is_numeric() {
                self.float_buffer.push(src.current);
                src.advance_one();
            }
        }

        match self.float_buffer.parse::<f64>() {
            Ok(val) => Ok(val),
            Err(_) => Err(ParseError::Number {
                src: std::mem::take(&mut self.float_buffer),
                line,
                column,
            }),
        }
    }
}

/// Parses a point list from a string.
pub fn parse_points(text: &str) -> Result<Vec<Point>, ParseError> {
    let mut points = Vec::new();
    PointListParser::new().parse(&mut Source::new(text.chars()), &mut points)?;

    Ok(points)
}

#[test]
fn empty() {
    assert_eq!(parse_points(""), Ok(Vec::new()));
    assert_eq!(parse_points("  \n\t "), Ok(Vec::new()));
    assert_eq!(parse_points("# nothing here\n"), Ok(Vec::new()));
}

#[test]
fn separators() {
    let expected = vec![point(0.0, 0.0), point(1.0, 2.0)];
    assert_eq!(parse_points("0 0 1 2"), Ok(expected.clone()));
    assert_eq!(parse_points("0,0 1,2"), Ok(expected.clone()));
    assert_eq!(parse_points("0, 0\n1, 2\n"), Ok(expected.clone()));
    assert_eq!(
        parse_points("# header\n0 0 # origin\n1 2"),
        Ok(expected)
    );
}

#[test]
fn numbers() {
    assert_eq!(
        parse_points("-1.5 2e3 0.25 -1E-2"),
        Ok(vec![point(-1.5, 2000.0), point(0.25, -0.01)])
    );

    // "0.6.5" reads as "0.6 .5".
    assert_eq!(parse_points("0.6.5"), Ok(vec![point(0.6, 0.5)]));
}

#[test]
fn bad_numbers() {
    let bad_number = |src: &str| match parse_points(src) {
        Err(ParseError::Number { .. }) => true,
        r => {
            println!("{r:?}");
            false
        }
    };

    assert!(bad_number("0 --1"));
    assert!(bad_number("0 1ee2"));
    assert!(bad_number("0 1e--1"));
    assert!(bad_number("0 *2"));
    assert!(bad_number("0 e"));
    assert!(bad_number("0 1e"));
    assert!(bad_number("0 +1"));
}

#[test]
fn error_position() {
    assert_eq!(
        parse_points("0 0\n1 2\n3 x"),
        Err(ParseError::Number {
            src: String::new(),
            line: 2,
            column: 2,
        })
    );

    assert_eq!(
        parse_points("0 0 1 2 3"),
        Err(ParseError::UnpairedCoordinate { line: 0, column: 8 })
    );

    assert_eq!(
        parse_points("0 0\n  5 # no y\n"),
        Err(ParseError::UnpairedCoordinate { line: 1, column: 2 })
    );

    // A leading line break starts the next line at column 0.
    assert_eq!(
        parse_points("\n5"),
        Err(ParseError::UnpairedCoordinate { line: 1, column: 0 })
    );
    assert_eq!(
        parse_points("\n1 x"),
        Err(ParseError::Number {
            src: String::new(),
            line: 1,
            column: 2,
        })
    );
}

#[test]
fn partial_output() {
    let mut points = Vec::new();
    let result = PointListParser::new().parse(&mut Source::new("1 2 3 4 5 ?".chars()), &mut points);

    assert!(result.is_err());
    assert_eq!(points, vec![point(1.0, 2.0), point(3.0, 4.0)]);
}
