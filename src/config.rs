use std::time::Duration;

use grid_util::Point;

use crate::error::{GridError, Result};
use crate::{point, COLS, END, PATH_INTERVAL_MS, ROWS, START, VISIT_INTERVAL_MS};

/// Dimensions and the two designated cells of a [Grid](crate::grid::Grid).
///
/// Points use `x` for the column and `y` for the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub start: Point,
    pub end: Point,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            rows: ROWS,
            cols: COLS,
            start: point(START.0, START.1),
            end: point(END.0, END.1),
        }
    }
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize, start: Point, end: Point) -> GridConfig {
        GridConfig {
            rows,
            cols,
            start,
            end,
        }
    }

    /// Checks that the grid is non-empty, that its cells can be addressed and that start and end
    /// are distinct. Whether they lie inside the grid is checked when the [Grid](crate::grid::Grid)
    /// is built.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let addressable = self.rows.checked_mul(self.cols).is_some()
            && i32::try_from(self.rows).is_ok()
            && i32::try_from(self.cols).is_ok();
        if !addressable {
            return Err(GridError::TooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.start == self.end {
            return Err(GridError::StartIsEnd(self.start));
        }
        Ok(())
    }
}

/// Delays between consecutive animation callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub visit_interval: Duration,
    pub path_interval: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> PlaybackConfig {
        PlaybackConfig {
            visit_interval: Duration::from_millis(VISIT_INTERVAL_MS),
            path_interval: Duration::from_millis(PATH_INTERVAL_MS),
        }
    }
}
