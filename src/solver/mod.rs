use grid_util::Point;
use log::{debug, info, warn};

use crate::{cell::Cell, grid::Grid};

pub mod dijkstra;
pub mod scan;

use dijkstra::DijkstraSolver;

/// How a search run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The end cell was settled and a path exists.
    Reached,
    /// Every cell reachable from the start was settled without meeting the end.
    Unreachable,
    /// The run was stopped early by its caller.
    Cancelled,
}

/// The result of a single run: the cells in the order they were settled, the start-to-end path
/// and the working grid holding the final search state.
#[derive(Clone, Debug)]
pub struct Search {
    pub visited: Vec<Cell>,
    pub path: Vec<Cell>,
    pub outcome: Outcome,
    pub grid: Grid,
}

impl Search {
    pub fn is_reached(&self) -> bool {
        self.outcome == Outcome::Reached
    }

    /// Number of steps from start to end, if the end was reached.
    pub fn distance(&self) -> Option<u32> {
        if self.is_reached() {
            self.path.last().and_then(|c| c.distance)
        } else {
            None
        }
    }
}

/// A shortest-path search over a [Grid] with unit-cost 4-connected moves.
///
/// Implementations never mutate the grid they are given: they run on a private copy with reset
/// search state and return it inside the [Search].
pub trait GridSolver {
    /// Searches from `start` to `end`, calling `should_stop` once per settled-cell iteration.
    fn run_until<F>(&self, grid: &Grid, start: Point, end: Point, should_stop: F) -> Search
    where
        F: FnMut() -> bool;

    fn run(&self, grid: &Grid, start: Point, end: Point) -> Search {
        self.run_until(grid, start, end, || false)
    }

    /// Searches between the grid's own start and end cells.
    fn solve(&self, grid: &Grid) -> Search {
        self.run(grid, grid.start(), grid.end())
    }
}

impl Grid {
    /// Runs a [DijkstraSolver] from the start cell to the end cell.
    pub fn search(&self) -> Search {
        DijkstraSolver.solve(self)
    }
}

/// The set of unsettled cells a solver picks its next cell from.
///
/// Both implementations hand out cells ordered by distance, then by the order in which they first
/// got a finite distance, then row-major.
pub(crate) trait Frontier {
    /// Called the first time a cell gets a finite distance.
    fn discover(&mut self, index: usize, distance: u32, discovery: usize);
    /// Removes and returns the next cell to settle.
    fn pop(&mut self, grid: &Grid) -> Option<usize>;
}

/// The settle-and-relax loop shared by the solvers.
pub(crate) fn search<Q, F>(
    mut frontier: Q,
    grid: &Grid,
    start: Point,
    end: Point,
    mut should_stop: F,
) -> Search
where
    Q: Frontier,
    F: FnMut() -> bool,
{
    let mut work = grid.clone();
    work.reset();
    let mut visited = Vec::new();
    let mut outcome = Outcome::Unreachable;

    let Some(start_ix) = work.index_of(start) else {
        warn!("Start {} lies outside the grid, nothing to search", start);
        return Search {
            visited,
            path: Vec::new(),
            outcome,
            grid: work,
        };
    };
    let end_ix = work.index_of(end);
    if end_ix.is_none() {
        warn!("End {} lies outside the grid, it cannot be reached", end);
    }

    if let Some(mut cell) = work.cell_at(start_ix) {
        cell.distance = Some(0);
        work.set_cell(cell);
    }
    frontier.discover(start_ix, 0, 0);
    let mut discovery = 0;

    loop {
        if should_stop() {
            info!("Search from {} cancelled after {} cells", start, visited.len());
            outcome = Outcome::Cancelled;
            break;
        }
        let Some(ix) = frontier.pop(&work) else {
            break;
        };
        let Some(mut current) = work.cell_at(ix) else {
            break;
        };
        if current.is_wall {
            debug!("Discarding wall {}", current.point);
            continue;
        }
        // The closest unsettled cell is unreachable, so are all the others.
        let Some(distance) = current.distance else {
            break;
        };
        current.is_visited = true;
        work.set_cell(current);
        visited.push(current);
        if Some(ix) == end_ix {
            outcome = Outcome::Reached;
            break;
        }
        discovery += 1;
        for n in work.neighbours(ix) {
            let Some(mut neighbour) = work.cell_at(n) else {
                continue;
            };
            if neighbour.is_visited {
                continue;
            }
            let first = neighbour.distance.is_none();
            // Overwriting without comparing is only correct because every move costs 1, so a
            // cell is always relaxed from cells at the same distance before it settles.
            neighbour.distance = Some(distance + 1);
            neighbour.predecessor = Some(ix);
            work.set_cell(neighbour);
            if first {
                frontier.discover(n, distance + 1, discovery);
            }
        }
    }

    let path = match outcome {
        Outcome::Reached => end_ix.map_or_else(Vec::new, |ix| reconstruct_path(&work, ix)),
        _ => Vec::new(),
    };
    info!(
        "Settled {} cells from {} to {}, path of {} cells",
        visited.len(),
        start,
        end,
        path.len()
    );
    Search {
        visited,
        path,
        outcome,
        grid: work,
    }
}

/// Follows predecessor links back from `end` and returns the cells in start-to-end order.
pub fn reconstruct_path(grid: &Grid, end: usize) -> Vec<Cell> {
    let mut path = std::iter::successors(grid.cell_at(end), |cell| {
        cell.predecessor.and_then(|ix| grid.cell_at(ix))
    })
    .collect::<Vec<Cell>>();
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GridConfig, point};

    #[test]
    fn grid_search_uses_designated_cells() {
        let grid = Grid::new(GridConfig::new(1, 4, point(0, 0), point(0, 3))).unwrap();
        let search = grid.search();
        assert_eq!(search.outcome, Outcome::Reached);
        assert_eq!(search.distance(), Some(3));
        assert_eq!(
            search.path.iter().map(|c| c.point).collect::<Vec<_>>(),
            (0..4).map(|col| point(0, col)).collect::<Vec<_>>()
        );
        // The caller's grid keeps no search state.
        assert!(grid.cells().all(|c| !c.is_visited && c.distance.is_none()));
        assert!(search.grid.cells().all(|c| c.is_visited));
    }

    #[test]
    fn reconstructs_from_unvisited_end_as_single_cell() {
        let grid = Grid::new(GridConfig::new(2, 2, point(0, 0), point(1, 1))).unwrap();
        let path = reconstruct_path(&grid, 3);
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].point, point(1, 1));
    }
}
