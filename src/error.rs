// src/error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single sample line could not be turned into a `Sample`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line holds nothing but whitespace.
    #[error("line is empty")]
    Empty,

    /// The line does not follow `(x, y, z)[, (px, py, pz)], metric[, confidence]`.
    #[error("expected `(x, y, z)[, (px, py, pz)], metric[, confidence]`, found '{0}'")]
    Layout(String),

    /// A token in a numeric position could not be read as a float.
    #[error("field '{field}' is not a number: '{text}'")]
    Number { field: &'static str, text: String },
}

/// Errors raised while reading a whole sample file.
#[derive(Debug, Error)]
pub enum TrackingDataError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line_number}: {source}")]
    Read {
        line_number: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line_number}: {source}")]
    Parse {
        line_number: usize,
        #[source]
        source: ParseError,
    },
}

/// Errors raised while resolving the render configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no input file given: pass INPUT on the command line or set `input_path` in the config file")]
    MissingInputPath,

    #[error("gridsize must be between 1 and {max}, got {0}", max = crate::constants::MAX_GRIDSIZE)]
    InvalidGridSize(usize),
}

/// Errors raised by the hexagonal binning step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinningError {
    #[error("gridsize must be at least 1 and small enough to size the lattice")]
    InvalidGridSize,

    #[error("column lengths differ: x={x}, y={y}, metric={metric}")]
    LengthMismatch { x: usize, y: usize, metric: usize },
}

// src/error.rs
