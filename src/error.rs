//! Error types for grid construction.

use grid_util::Point;
use thiserror::Error;

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Configuration errors rejected when a [Grid](crate::grid::Grid) is created.
///
/// Wall edits and searches never fail: editing the start or end cell is a
/// no-op and an unreachable end is reported by an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid has no cells.
    #[error("grid must have at least one cell, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    /// The cell count overflows, or a dimension does not fit a [Point] coordinate.
    #[error("grid of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },

    /// The start or end lies outside the grid.
    #[error("{point} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        point: Point,
        rows: usize,
        cols: usize,
    },

    /// Start and end are the same cell.
    #[error("start and end both placed at {0}")]
    StartIsEnd(Point),
}
