use crate::commands::{FitCmd, OutputFormat};
use crate::error::CliError;

use simplify::fit::fit_with_options;
use simplify::geom::Evaluator;
use simplify::path::record::write_segments;
use simplify::path::{PathSegment, SvgPathData};

use log::debug;
use std::io::Write;
use std::time::Instant;

pub fn fit(mut cmd: FitCmd) -> Result<(), CliError> {
    let start = Instant::now();
    let path = fit_with_options(&cmd.points, &cmd.options);
    let elapsed = start.elapsed();

    debug!(
        "{} points -> {} segments in {:?}",
        cmd.points.len(),
        path.len(),
        elapsed
    );

    if cmd.compare {
        let other_evaluator = match cmd.options.evaluator {
            Evaluator::Scalar => Evaluator::Paired,
            Evaluator::Paired => Evaluator::Scalar,
        };

        let start = Instant::now();
        let other_path = fit_with_options(&cmd.points, &cmd.options.with_evaluator(other_evaluator));
        let other_elapsed = start.elapsed();

        let identical = path == other_path;
        writeln!(
            &mut *cmd.output,
            "{:?}: {} segments in {:?}",
            cmd.options.evaluator,
            path.len(),
            elapsed
        )?;
        writeln!(
            &mut *cmd.output,
            "{:?}: {} segments in {:?}",
            other_evaluator,
            other_path.len(),
            other_elapsed
        )?;
        writeln!(&mut *cmd.output, "identical: {}", identical)?;
        cmd.output.flush()?;

        if !identical {
            return Err(CliError::EvaluatorMismatch);
        }

        return Ok(());
    }

    if cmd.count {
        writeln!(&mut *cmd.output, "points: {}", cmd.points.len())?;
        writeln!(&mut *cmd.output, "segments: {}", path.len())?;
        cmd.output.flush()?;

        return Ok(());
    }

    write_path(&path, cmd.format, &mut *cmd.output)?;
    cmd.output.flush()?;

    Ok(())
}

pub fn write_path(
    path: &[PathSegment],
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Svg => {
            writeln!(output, "{}", SvgPathData(path))?;
        }
        OutputFormat::Segments => {
            for segment in path {
                writeln!(
                    output,
                    "{} {} {} {} {} {}",
                    segment.control_in.x,
                    segment.control_in.y,
                    segment.control_out.x,
                    segment.control_out.y,
                    segment.anchor.x,
                    segment.anchor.y,
                )?;
            }
        }
        OutputFormat::Binary => {
            write_segments(path, output)?;
        }
    }

    Ok(())
}

#[test]
fn text_formats() {
    use simplify::math::{point, vector};

    let path = [
        PathSegment {
            control_out: vector(1.0, 0.5),
            ..PathSegment::new(point(0.0, 0.0))
        },
        PathSegment::with_control_in(point(3.0, 0.0), vector(-1.0, 0.5)),
    ];

    let mut output = Vec::new();
    write_path(&path, OutputFormat::Svg, &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "M 0 0 C 1 0.5 2 0.5 3 0\n");

    let mut output = Vec::new();
    write_path(&path, OutputFormat::Segments, &mut output).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "0 0 1 0.5 0 0\n-1 0.5 0 0 3 0\n"
    );
}

#[test]
fn binary_format() {
    use simplify::math::point;
    use simplify::path::record::{read_segments, RECORD_SIZE};

    let path = simplify::fit::fit(&[point(0.0, 0.0), point(1.0, 2.0), point(4.0, 1.0)], 0.5);

    let mut output = Vec::new();
    write_path(&path, OutputFormat::Binary, &mut output).unwrap();
    assert_eq!(output.len(), 4 + path.len() * RECORD_SIZE);
    assert_eq!(read_segments(&mut &output[..]).unwrap(), path);
}
