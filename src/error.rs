//! Error types.

use thiserror::Error;

use crate::Pos;

/// Misuse of a [`Grid`](crate::Grid). None of these leave the grid modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A grid was requested with a non-positive side.
    #[error("invalid grid dimensions {rows}x{cols}, both sides must be positive")]
    InvalidDimension { rows: i32, cols: i32 },

    /// A coordinate outside `[0, rows) x [0, cols)`.
    #[error("position {pos} is outside of the {rows}x{cols} grid")]
    OutOfBounds { pos: Pos, rows: i32, cols: i32 },

    /// Two grids that must share dimensions do not.
    #[error("dimension mismatch: expected {}x{}, found {}x{}", .expected.0, .expected.1, .found.0, .found.1)]
    DimensionMismatch {
        expected: (i32, i32),
        found: (i32, i32),
    },
}

/// Failure while producing an initial grid.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid coordinate token {token:?}")]
    InvalidToken { token: String },

    #[error("coordinate {value} has no matching pair")]
    DanglingCoordinate { value: i32 },

    #[error("fill rate {0} is not within [0, 1]")]
    InvalidFillRate(f64),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Bad command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown flag {0:?}")]
    UnknownFlag(String),

    #[error("flag {0} expects a value")]
    MissingValue(&'static str),

    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: &'static str, value: String },

    #[error("more than one seed file given")]
    ExtraPath,
}
