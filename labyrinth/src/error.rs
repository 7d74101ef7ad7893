use thiserror::Error;

use crate::vector::Vector2;

/// Problems with the options a solve is configured with. These are all raised
/// before a walker is constructed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("brightness threshold must be within [0, 1], got {0}")]
    Threshold(f64),

    #[error("expected array of length {expected}, got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("could not parse {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("crop {crop} leaves nothing of a {width}x{height} image")]
    EmptyCrop {
        crop: String,
        width: u32,
        height: u32,
    },

    #[error("{which} position {position} lies outside the maze")]
    OutOfDomain {
        which: &'static str,
        position: Vector2,
    },

    #[error("invalid maze character {found:?} at row {row}, column {col}")]
    GridChar { found: char, row: usize, col: usize },

    #[error("maze rows must have equal length: row {row} has {actual} columns, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Failure of the traversal itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// The walker did not reach the goal within the iteration bound. Usually
    /// means the goal is not on the wall being followed.
    #[error("no path found: still at {position} after {iterations} iterations")]
    Stuck { iterations: u64, position: Vector2 },
}

/// Any failure of [`crate::solve_image`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}
