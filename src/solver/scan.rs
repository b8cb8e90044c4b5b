use grid_util::Point;

use crate::{
    grid::Grid,
    solver::{search, Frontier, GridSolver, Search},
};

/// Dijkstra's algorithm without a priority queue: every iteration stably re-sorts the whole list
/// of unsettled cells by distance and takes the first one. This costs O(n log n) per settled cell
/// and is only meant for small grids and for checking traces against [DijkstraSolver](super::dijkstra::DijkstraSolver).
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanSolver;

impl GridSolver for ScanSolver {
    fn run_until<F>(&self, grid: &Grid, start: Point, end: Point, should_stop: F) -> Search
    where
        F: FnMut() -> bool,
    {
        let unsettled = ScanFrontier {
            unsettled: (0..grid.len()).collect(),
        };
        search(unsettled, grid, start, end, should_stop)
    }
}

struct ScanFrontier {
    unsettled: Vec<usize>,
}

impl Frontier for ScanFrontier {
    fn discover(&mut self, _index: usize, _distance: u32, _discovery: usize) {}

    fn pop(&mut self, grid: &Grid) -> Option<usize> {
        if self.unsettled.is_empty() {
            return None;
        }
        // Stable, so equal distances keep the order in which they became finite
        self.unsettled.sort_by_key(|&ix| {
            grid.cell_at(ix)
                .and_then(|cell| cell.distance)
                .unwrap_or(u32::MAX)
        });
        Some(self.unsettled.remove(0))
    }
}
