use simplify::extra::parser::ParseError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Invalid point list. {0}")]
    Parse(#[from] ParseError),
    #[error("Invalid value {value:?} for {name}.")]
    InvalidArgument { name: &'static str, value: String },
    #[error("The scalar and paired evaluators produced different paths.")]
    EvaluatorMismatch,
    #[error("Found a failing input after {iterations} iterations.")]
    FuzzFailure { iterations: u64 },
}
