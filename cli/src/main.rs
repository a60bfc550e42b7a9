mod commands;
mod error;
mod fit;
mod fuzzing;
mod generate;

use clap::{App, Arg, ArgMatches, SubCommand};
use commands::*;
use error::CliError;

use simplify::extra::parser::parse_points;
use simplify::fit::FitOptions;
use simplify::geom::Evaluator;

use std::fs::{self, File};
use std::io::{self, Read};
use std::str::FromStr;

fn main() {
    let matches = app().get_matches();

    init_logger(matches.is_present("VERBOSE"));

    let result = if let Some(fit_matches) = matches.subcommand_matches("fit") {
        fit_cmd(fit_matches).and_then(fit::fit)
    } else if let Some(generate_matches) = matches.subcommand_matches("generate") {
        generate_cmd(generate_matches).and_then(generate::generate)
    } else if let Some(fuzz_matches) = matches.subcommand_matches("fuzz") {
        fuzz_cmd(fuzz_matches).and_then(fuzzing::run)
    } else {
        println!("{}", matches.usage());
        Ok(())
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("simplify command-line interface")
        .version("0.1")
        .about("Fits cubic bézier curves to polylines")
        .arg(Arg::with_name("VERBOSE")
            .short("v")
            .long("verbose")
            .global(true)
            .help("Enables debug logging (RUST_LOG is used otherwise)")
        )
        .subcommand(SubCommand::with_name("fit")
            .about("Fits a path to a list of points")
            .arg(Arg::with_name("TOLERANCE")
                .short("t")
                .long("tolerance")
                .help("Sets the maximum squared distance between the points and the path (2.5 by default)")
                .value_name("TOLERANCE")
                .takes_value(true)
            )
            .arg(Arg::with_name("SCALAR")
                .long("scalar")
                .help("Evaluates curves one coordinate at a time")
            )
            .arg(Arg::with_name("FORMAT")
                .short("f")
                .long("format")
                .help("Sets the output format")
                .value_name("FORMAT")
                .takes_value(true)
                .possible_values(&["svg", "segments", "binary"])
                .default_value("svg")
            )
            .arg(Arg::with_name("COUNT")
                .short("c")
                .long("count")
                .help("Prints the number of points and segments")
            )
            .arg(Arg::with_name("COMPARE")
                .long("compare")
                .help("Fits with both evaluators and checks that the results are identical")
            )
            .arg(Arg::with_name("POINTS")
                .value_name("POINTS")
                .help("A list of points (read from the input file or stdin if omitted)")
                .takes_value(true)
                .required(false)
            )
            .arg(Arg::with_name("INPUT")
                .help("Sets the input file to use")
                .short("i")
                .long("input")
                .value_name("FILE")
                .takes_value(true)
                .required(false)
            )
            .arg(output_arg())
        )
        .subcommand(SubCommand::with_name("generate")
            .about("Generates a list of points")
            .arg(Arg::with_name("KIND")
                .value_name("KIND")
                .help("The shape of the point list")
                .possible_values(&["walk", "grid"])
                .default_value("walk")
            )
            .arg(Arg::with_name("POINT_COUNT")
                .short("n")
                .long("points")
                .help("Sets the number of points of the random walk (10000 by default)")
                .value_name("N")
                .takes_value(true)
            )
            .arg(Arg::with_name("COLUMNS")
                .long("columns")
                .help("Sets the number of grid columns (100 by default)")
                .value_name("N")
                .takes_value(true)
            )
            .arg(Arg::with_name("ROWS")
                .long("rows")
                .help("Sets the number of grid rows (100 by default)")
                .value_name("N")
                .takes_value(true)
            )
            .arg(Arg::with_name("WIDTH")
                .long("width")
                .help("Sets the width of the grid (800 by default)")
                .value_name("WIDTH")
                .takes_value(true)
            )
            .arg(Arg::with_name("HEIGHT")
                .long("height")
                .help("Sets the height of the grid (600 by default)")
                .value_name("HEIGHT")
                .takes_value(true)
            )
            .arg(seed_arg())
            .arg(output_arg())
        )
        .subcommand(SubCommand::with_name("fuzz")
            .about("Fits random point lists until something breaks")
            .arg(Arg::with_name("TOLERANCE")
                .short("t")
                .long("tolerance")
                .help("Sets the tolerance (random by default)")
                .value_name("TOLERANCE")
                .takes_value(true)
            )
            .arg(Arg::with_name("MIN_POINTS")
                .long("min-points")
                .help("Sets the minimum number of points per list")
                .value_name("N")
                .takes_value(true)
            )
            .arg(Arg::with_name("MAX_POINTS")
                .long("max-points")
                .help("Sets the maximum number of points per list")
                .value_name("N")
                .takes_value(true)
            )
            .arg(Arg::with_name("ITERATIONS")
                .long("iterations")
                .help("Stops after this many point lists (runs forever by default)")
                .value_name("N")
                .takes_value(true)
            )
            .arg(seed_arg())
        )
}

fn output_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("OUTPUT")
        .help("Sets the output file to use")
        .value_name("FILE")
        .short("o")
        .long("output")
        .takes_value(true)
        .required(false)
}

fn seed_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("SEED")
        .long("seed")
        .help("Seeds the random number generator")
        .value_name("SEED")
        .takes_value(true)
}

fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn fit_cmd(matches: &ArgMatches) -> Result<FitCmd, CliError> {
    let mut input = matches.value_of("POINTS").unwrap_or("").to_string();
    if let Some(input_file) = matches.value_of("INPUT") {
        input = fs::read_to_string(input_file).map_err(|source| CliError::Open {
            path: input_file.to_string(),
            source,
        })?;
    } else if input.is_empty() {
        io::stdin().read_to_string(&mut input)?;
    }

    let evaluator = if matches.is_present("SCALAR") {
        Evaluator::Scalar
    } else {
        Evaluator::Paired
    };

    let format = match matches.value_of("FORMAT") {
        Some("segments") => OutputFormat::Segments,
        Some("binary") => OutputFormat::Binary,
        _ => OutputFormat::Svg,
    };

    Ok(FitCmd {
        points: parse_points(&input)?,
        output: get_output(matches)?,
        options: FitOptions::tolerance(get_value(
            matches,
            "TOLERANCE",
            FitOptions::DEFAULT_TOLERANCE,
        )?)
        .with_evaluator(evaluator),
        format,
        count: matches.is_present("COUNT"),
        compare: matches.is_present("COMPARE"),
    })
}

fn generate_cmd(matches: &ArgMatches) -> Result<GenerateCmd, CliError> {
    let generator = match matches.value_of("KIND") {
        Some("grid") => Generator::Grid {
            columns: get_value(matches, "COLUMNS", 100)?,
            rows: get_value(matches, "ROWS", 100)?,
            width: get_value(matches, "WIDTH", 800.0)?,
            height: get_value(matches, "HEIGHT", 600.0)?,
        },
        _ => Generator::RandomWalk {
            points: get_value(matches, "POINT_COUNT", 10_000)?,
        },
    };

    Ok(GenerateCmd {
        generator,
        seed: get_optional_value(matches, "SEED")?,
        output: get_output(matches)?,
    })
}

fn fuzz_cmd(matches: &ArgMatches) -> Result<FuzzCmd, CliError> {
    Ok(FuzzCmd {
        tolerance: get_optional_value(matches, "TOLERANCE")?,
        min_points: get_optional_value(matches, "MIN_POINTS")?,
        max_points: get_optional_value(matches, "MAX_POINTS")?,
        iterations: get_optional_value(matches, "ITERATIONS")?,
        seed: get_optional_value(matches, "SEED")?,
    })
}

fn get_output(matches: &ArgMatches) -> Result<Box<dyn io::Write>, CliError> {
    match matches.value_of("OUTPUT") {
        Some(output_file) => {
            let file = File::create(output_file).map_err(|source| CliError::Open {
                path: output_file.to_string(),
                source,
            })?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

fn get_optional_value<T: FromStr>(
    matches: &ArgMatches,
    name: &'static str,
) -> Result<Option<T>, CliError> {
    match matches.value_of(name) {
        Some(value) => match value.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(CliError::InvalidArgument {
                name,
                value: value.to_string(),
            }),
        },
        None => Ok(None),
    }
}

fn get_value<T: FromStr>(matches: &ArgMatches, name: &'static str, default: T) -> Result<T, CliError> {
    Ok(get_optional_value(matches, name)?.unwrap_or(default))
}

#[test]
fn fit_arguments() {
    let matches = app().get_matches_from(vec![
        "simplify", "fit", "-t", "0.5", "--scalar", "-c", "-f", "segments", "0 0, 1 1, 2 0",
    ]);
    let cmd = fit_cmd(matches.subcommand_matches("fit").unwrap()).unwrap();

    assert_eq!(cmd.points.len(), 3);
    assert_eq!(cmd.options.tolerance, 0.5);
    assert_eq!(cmd.options.evaluator, Evaluator::Scalar);
    assert_eq!(cmd.format, OutputFormat::Segments);
    assert!(cmd.count);
    assert!(!cmd.compare);
}

#[test]
fn default_arguments() {
    let matches = app().get_matches_from(vec!["simplify", "generate", "--seed", "3"]);
    let cmd = generate_cmd(matches.subcommand_matches("generate").unwrap()).unwrap();
    assert_eq!(cmd.generator, Generator::RandomWalk { points: 10_000 });
    assert_eq!(cmd.seed, Some(3));

    let matches = app().get_matches_from(vec!["simplify", "fuzz"]);
    let cmd = fuzz_cmd(matches.subcommand_matches("fuzz").unwrap()).unwrap();
    assert_eq!(cmd.tolerance, None);
    assert_eq!(cmd.iterations, None);
}

#[test]
fn invalid_arguments() {
    let matches = app().get_matches_from(vec!["simplify", "fuzz", "--iterations", "many"]);
    match fuzz_cmd(matches.subcommand_matches("fuzz").unwrap()) {
        Err(CliError::InvalidArgument { name, value }) => {
            assert_eq!(name, "ITERATIONS");
            assert_eq!(value, "many");
        }
        other => panic!("{:?}", other),
    }

    let matches = app().get_matches_from(vec!["simplify", "fit", "1 2 3"]);
    assert!(matches!(
        fit_cmd(matches.subcommand_matches("fit").unwrap()),
        Err(CliError::Parse(_))
    ));
}
