use grid_util::Point;

/// A single grid cell: its fixed role flags plus the search state written by a solver.
///
/// The predecessor is stored as an index into the owning grid's row-major cell array,
/// see [Grid::cell_at](crate::grid::Grid::cell_at).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub point: Point,
    pub is_start: bool,
    pub is_end: bool,
    pub is_wall: bool,
    /// Shortest known step count from the start, [None] while unreachable.
    pub distance: Option<u32>,
    pub is_visited: bool,
    pub predecessor: Option<usize>,
    /// Set by the presentation layer once the cell has been shown as part of the path.
    pub is_path: bool,
}

impl Cell {
    pub fn new(point: Point, is_start: bool, is_end: bool) -> Cell {
        Cell {
            point,
            is_start,
            is_end,
            is_wall: false,
            distance: None,
            is_visited: false,
            predecessor: None,
            is_path: false,
        }
    }

    pub fn row(&self) -> usize {
        self.point.y as usize
    }

    pub fn col(&self) -> usize {
        self.point.x as usize
    }

    /// Start and end cells can never become walls.
    pub fn is_fixed(&self) -> bool {
        self.is_start || self.is_end
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }

    /// Restores the search and presentation state, keeping the wall flag.
    pub fn reset(&mut self) {
        self.distance = None;
        self.is_visited = false;
        self.predecessor = None;
        self.is_path = false;
    }

    pub fn symbol(&self) -> char {
        if self.is_start {
            'S'
        } else if self.is_end {
            'E'
        } else if self.is_wall {
            '#'
        } else if self.is_path {
            '*'
        } else if self.is_visited {
            'o'
        } else {
            '.'
        }
    }
}
