//! # grid_dijkstra
//!
//! Shortest-path search on a grid whose walls are painted by a user, producing an ordered trace
//! of the explored cells and the final path for animated replay. Implements
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) on a uniform-cost
//! 4-connected grid, which settles cells in breadth-first order. Ties are broken
//! deterministically so the same grid always yields the same trace.
//!
//! The crate is split into the [grid] model, the [solver]s that search it and the [animation]
//! [Scheduler] that replays a finished search against a [Presenter]. The [Visualizer] ties them
//! together the way an interactive front end drives them.
//!
//! ```
//! use grid_dijkstra::{point, Grid, GridConfig};
//!
//! let mut grid = Grid::new(GridConfig::new(3, 3, point(0, 0), point(2, 2))).unwrap();
//! grid.toggle_wall(point(1, 1));
//! let search = grid.search();
//! assert_eq!(search.distance(), Some(4));
//! assert_eq!(search.path.len(), 5);
//! ```
pub mod animation;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod solver;
pub mod visualizer;

use grid_util::Point;

pub use animation::{Callbacks, Frame, Presenter, Scheduler};
pub use cell::Cell;
pub use config::{GridConfig, PlaybackConfig};
pub use error::{GridError, Result};
pub use grid::Grid;
pub use solver::{
    dijkstra::DijkstraSolver, scan::ScanSolver, GridSolver, Outcome, Search,
};
pub use visualizer::Visualizer;

/// Rows of the default grid.
pub const ROWS: usize = 20;
/// Columns of the default grid.
pub const COLS: usize = 50;
/// `(row, col)` of the default start cell.
pub const START: (usize, usize) = (10, 5);
/// `(row, col)` of the default end cell.
pub const END: (usize, usize) = (10, 45);

/// Default delay between two explored-cell frames of a replay, in milliseconds.
pub const VISIT_INTERVAL_MS: u64 = 10;
/// Default delay between two path frames of a replay, in milliseconds.
pub const PATH_INTERVAL_MS: u64 = 50;

/// A cell has at most 4 neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// The [Point] of the cell at `(row, col)`; `x` holds the column and `y` the row.
pub fn point(row: usize, col: usize) -> Point {
    Point::new(col as i32, row as i32)
}
