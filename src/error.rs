use thiserror::Error;

use crate::grid::Coord;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Coordinate {coord} is outside the {rows}x{cols} grid")]
    OutOfRange { coord: Coord, rows: usize, cols: usize },

    #[error("Grid dimensions must be non-zero, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Warning-level: construction still succeeds with "last write wins".
    #[error("Misconfigured reward at {coord}: {reason}")]
    MisconfiguredReward { coord: Coord, reason: String },

    #[error("Cell {0} has no valid neighbors")]
    DegenerateCell(Coord),

    #[error("Worker thread panicked before returning its grid")]
    WorkerPanicked,
}
