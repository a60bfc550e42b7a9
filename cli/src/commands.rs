use simplify::fit::FitOptions;
use simplify::math::Point;
use std::io;

/// How the fitted path is written out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// SVG path data (`M x y C ...`).
    Svg,
    /// One segment per line: control in, control out and anchor coordinates.
    Segments,
    /// Length-prefixed big-endian segment records.
    Binary,
}

pub struct FitCmd {
    pub points: Vec<Point>,
    pub output: Box<dyn io::Write>,
    pub options: FitOptions,
    pub format: OutputFormat,
    pub count: bool,
    pub compare: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Generator {
    /// `x` advances by 3 per point while `y` drifts randomly around 100.
    RandomWalk { points: usize },
    /// Columns of points spread over a `width` x `height` area, with some
    /// horizontal jitter.
    Grid {
        columns: usize,
        rows: usize,
        width: f64,
        height: f64,
    },
}

pub struct GenerateCmd {
    pub generator: Generator,
    pub seed: Option<u64>,
    pub output: Box<dyn io::Write>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FuzzCmd {
    pub tolerance: Option<f64>,
    pub min_points: Option<u32>,
    pub max_points: Option<u32>,
    pub iterations: Option<u64>,
    pub seed: Option<u64>,
}
