use core::fmt;

use grid_util::grid::{Grid as _, SimpleGrid};
use grid_util::Point;
use itertools::{iproduct, Itertools};
use log::{debug, info, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::Cell;
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::{point, N_SMALLVEC_SIZE};

/// [Grid] owns a fixed `rows x cols` matrix of [Cell]s in a [SimpleGrid] (`x` is the column, `y`
/// the row), with exactly one start and one end cell that can never become walls. Cells are also
/// addressed by their row-major index, which is what predecessors store. Connectivity of the open
/// cells is tracked in a [UnionFind] so reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: SimpleGrid<Cell>,
    start: usize,
    end: usize,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    /// Builds a grid with every cell open and all search state cleared.
    pub fn new(config: GridConfig) -> Result<Grid> {
        config.validate()?;
        let GridConfig {
            rows,
            cols,
            start,
            end,
        } = config;
        let mut cells: SimpleGrid<Cell> =
            SimpleGrid::new(cols, rows, Cell::new(Point::new(0, 0), false, false));
        for p in [start, end] {
            if !cells.point_in_bounds(p) {
                return Err(GridError::OutOfBounds {
                    point: p,
                    rows,
                    cols,
                });
            }
        }
        for (row, col) in iproduct!(0..rows, 0..cols) {
            let p = point(row, col);
            cells.set_point(p, Cell::new(p, p == start, p == end));
        }
        let mut grid = Grid {
            start: cells.get_ix_point(&start),
            end: cells.get_ix_point(&end),
            cells,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Builds a grid and walls off the given points. Points on the start or end cell are ignored.
    pub fn with_walls<I>(config: GridConfig, walls: I) -> Result<Grid>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut grid = Grid::new(config)?;
        for p in walls {
            grid.set_wall(p, true);
        }
        grid.update();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.cells.height()
    }
    pub fn cols(&self) -> usize {
        self.cells.width()
    }
    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn start(&self) -> Point {
        self.point_of(self.start)
    }
    pub fn end(&self) -> Point {
        self.point_of(self.end)
    }
    pub fn start_index(&self) -> usize {
        self.start
    }
    pub fn end_index(&self) -> usize {
        self.end
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        iproduct!(0..self.rows(), 0..self.cols())
            .map(move |(row, col)| self.cells.get_point(point(row, col)))
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        self.cells.point_in_bounds(p)
    }

    /// Row-major index of a point, [None] outside the grid.
    pub fn index_of(&self, p: Point) -> Option<usize> {
        if self.cells.point_in_bounds(p) {
            Some(self.cells.get_ix_point(&p))
        } else {
            None
        }
    }

    /// Inverse of [index_of](Self::index_of).
    pub fn point_of(&self, index: usize) -> Point {
        point(index / self.cols(), index % self.cols())
    }

    pub fn cell(&self, p: Point) -> Option<Cell> {
        if self.in_bounds(p) {
            Some(self.cells.get_point(p))
        } else {
            None
        }
    }

    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if index < self.len() {
            self.cell(self.point_of(index))
        } else {
            None
        }
    }

    /// Writes a cell back at its own point. Cells outside the grid are dropped.
    pub(crate) fn set_cell(&mut self, cell: Cell) {
        if self.in_bounds(cell.point) {
            self.cells.set_point(cell.point, cell);
        }
    }

    pub fn walls(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells().filter(|c| c.is_wall).map(|c| c.point)
    }

    /// The 4-neighbourhood of a cell in the order up, down, left, right, skipping positions
    /// outside the grid.
    pub fn neighbours(&self, index: usize) -> SmallVec<[usize; N_SMALLVEC_SIZE]> {
        let p = self.point_of(index);
        [
            Point::new(p.x, p.y - 1),
            Point::new(p.x, p.y + 1),
            Point::new(p.x - 1, p.y),
            Point::new(p.x + 1, p.y),
        ]
        .into_iter()
        .filter_map(|n| self.index_of(n))
        .collect()
    }

    /// Flips the wall flag of a cell. Start, end and points outside the grid are left alone.
    /// Returns whether the cell changed.
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        match self.cell(p).map(|cell| !cell.is_wall) {
            Some(wall) => self.set_wall(p, wall),
            None => {
                warn!("Ignoring wall toggle at {}, outside the grid", p);
                false
            }
        }
    }

    /// Sets the wall flag of a cell. Joins newly connected components when a wall is removed and
    /// flags the components as dirty when a wall may split one. Returns whether the cell changed.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> bool {
        let (Some(ix), Some(mut cell)) = (self.index_of(p), self.cell(p)) else {
            warn!("Ignoring wall edit at {}, outside the grid", p);
            return false;
        };
        if cell.is_fixed() {
            debug!("Ignoring wall edit on fixed cell {}", p);
            return false;
        }
        if cell.is_wall == wall {
            return false;
        }
        cell.is_wall = wall;
        self.cells.set_point(p, cell);
        if wall {
            self.components_dirty = true;
        } else {
            for n in self.neighbours(ix) {
                if self.cell_at(n).is_some_and(|c| !c.is_wall) {
                    self.components.union(ix, n);
                }
            }
        }
        true
    }

    /// Clears distance, visited, predecessor and path marks. Walls and the start and end cells
    /// are kept.
    pub fn reset(&mut self) {
        self.edit_all(Cell::reset);
    }

    /// Returns the grid to its freshly created state, removing every wall.
    pub fn clear(&mut self) {
        self.edit_all(|cell| {
            cell.reset();
            cell.is_wall = false;
        });
        self.generate_components();
    }

    fn edit_all<F: FnMut(&mut Cell)>(&mut self, mut edit: F) {
        for (row, col) in iproduct!(0..self.rows(), 0..self.cols()) {
            let p = point(row, col);
            let mut cell = self.cells.get_point(p);
            edit(&mut cell);
            self.cells.set_point(p, cell);
        }
    }

    pub fn mark_visited(&mut self, p: Point) {
        if let Some(mut cell) = self.cell(p) {
            cell.is_visited = true;
            self.set_cell(cell);
        }
    }

    pub fn mark_path(&mut self, p: Point) {
        if let Some(mut cell) = self.cell(p) {
            cell.is_path = true;
            self.set_cell(cell);
        }
    }

    fn is_open(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| !c.is_wall)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open 4-neighbours to the same component.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.len());
        self.components_dirty = false;
        for (row, col) in iproduct!(0..self.rows(), 0..self.cols()) {
            let p = point(row, col);
            if !self.is_open(p) {
                continue;
            }
            let parent_ix = self.cells.get_ix_point(&p);
            for n in [Point::new(p.x + 1, p.y), Point::new(p.x, p.y + 1)] {
                if self.is_open(n) {
                    let ix = self.cells.get_ix_point(&n);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }

    /// Checks if both points are open cells on the same component. Components must be up to
    /// date, see [update](Self::update).
    pub fn reachable(&self, a: Point, b: Point) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a_ix), Some(b_ix)) => {
                self.is_open(a) && self.is_open(b) && self.components.equiv(a_ix, b_ix)
            }
            _ => false,
        }
    }

    /// Checks if the points are not connected by open cells.
    pub fn unreachable(&self, a: Point, b: Point) -> bool {
        !self.reachable(a, b)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let symbols = (0..self.cols())
                .filter_map(|col| self.cell(point(row, col)))
                .map(|cell| cell.symbol())
                .join("");
            writeln!(f, "{}", symbols)?;
        }
        Ok(())
    }
}
