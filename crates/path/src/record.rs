//! Fixed-order binary records for path segments.
//!
//! A segment is stored as three points in the order `control_in`, `control_out`,
//! `anchor`, each point being two big-endian IEEE 754 doubles (`x` then `y`), for a
//! total of [`RECORD_SIZE`] bytes.
//!
//! A sequence of segments is prefixed with its length as a big-endian `u32`.

use crate::math::{point, vector, Point, Vector};
use crate::PathSegment;

use std::convert::TryFrom;
use std::io::{self, Read, Write};

/// Size in bytes of an encoded segment.
pub const RECORD_SIZE: usize = 48;

/// Writes one segment.
pub fn write_segment<W: Write + ?Sized>(segment: &PathSegment, output: &mut W) -> io::Result<()> {
    let mut buffer = [0u8; RECORD_SIZE];
    let values = [
        segment.control_in.x,
        segment.control_in.y,
        segment.control_out.x,
        segment.control_out.y,
        segment.anchor.x,
        segment.anchor.y,
    ];
    for (chunk, value) in buffer.chunks_exact_mut(8).zip(values.iter()) {
        chunk.copy_from_slice(&value.to_be_bytes());
    }

    output.write_all(&buffer)
}

/// Reads one segment.
///
/// Fails with `io::ErrorKind::UnexpectedEof` if the input ends before a full record
/// could be read.
pub fn read_segment<R: Read + ?Sized>(input: &mut R) -> io::Result<PathSegment> {
    let mut buffer = [0u8; RECORD_SIZE];
    input.read_exact(&mut buffer)?;

    let mut values = [0.0f64; 6];
    for (value, chunk) in values.iter_mut().zip(buffer.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *value = f64::from_be_bytes(bytes);
    }

    let control_in: Vector = vector(values[0], values[1]);
    let control_out: Vector = vector(values[2], values[3]);
    let anchor: Point = point(values[4], values[5]);

    Ok(PathSegment {
        control_in,
        control_out,
        anchor,
    })
}

/// Writes a length-prefixed sequence of segments.
pub fn write_segments<W: Write + ?Sized>(
    segments: &[PathSegment],
    output: &mut W,
) -> io::Result<()> {
    let count = u32::try_from(segments.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "too many segments for a single record sequence",
        )
    })?;

    output.write_all(&count.to_be_bytes())?;
    for segment in segments {
        write_segment(segment, output)?;
    }

    Ok(())
}

/// Reads a length-prefixed sequence of segments.
pub fn read_segments<R: Read + ?Sized>(input: &mut R) -> io::Result<Vec<PathSegment>> {
    let mut count = [0u8; 4];
    input.read_exact(&mut count)?;
    let count = u32::from_be_bytes(count) as usize;

    // The count has not been validated yet.
    let mut segments = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        segments.push(read_segment(input)?);
    }

    Ok(segments)
}

#[test]
fn record_layout() {
    let segment = PathSegment {
        control_in: vector(1.0, 2.0),
        control_out: vector(3.0, 4.0),
        anchor: point(5.0, 6.0),
    };

    let mut bytes = Vec::new();
    write_segment(&segment, &mut bytes).unwrap();
    assert_eq!(bytes.len(), RECORD_SIZE);
    assert_eq!(&bytes[0..8], &1.0f64.to_be_bytes());
    assert_eq!(&bytes[8..16], &2.0f64.to_be_bytes());
    assert_eq!(&bytes[16..24], &3.0f64.to_be_bytes());
    assert_eq!(&bytes[40..48], &6.0f64.to_be_bytes());

    let decoded = read_segment(&mut &bytes[..]).unwrap();
    assert_eq!(decoded, segment);
}

#[test]
fn sequence_is_length_prefixed() {
    let path = vec![
        PathSegment::new(point(0.0, 0.0)),
        PathSegment::with_control_in(point(10.0, -2.5), vector(-3.25, 0.125)),
    ];

    let mut bytes = Vec::new();
    write_segments(&path, &mut bytes).unwrap();
    assert_eq!(bytes.len(), 4 + 2 * RECORD_SIZE);
    assert_eq!(&bytes[0..4], &[0, 0, 0, 2]);

    assert_eq!(read_segments(&mut &bytes[..]).unwrap(), path);
}

#[test]
fn truncated_input() {
    let mut bytes = Vec::new();
    write_segments(&[PathSegment::new(point(1.0, 1.0))], &mut bytes).unwrap();
    bytes.truncate(bytes.len() - 1);

    let err = read_segments(&mut &bytes[..]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

    let err = read_segment(&mut &[0u8; 10][..]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}
