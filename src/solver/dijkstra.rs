use std::cmp::Ordering;
use std::collections::BinaryHeap;

use grid_util::Point;

use crate::{
    grid::Grid,
    solver::{search, Frontier, GridSolver, Search},
};

/// Dijkstra's algorithm with a binary heap. On a unit-cost grid this settles cells in breadth-first
/// order; ties are broken by discovery order, then row-major, which reproduces the trace of
/// [ScanSolver](super::scan::ScanSolver).
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn run_until<F>(&self, grid: &Grid, start: Point, end: Point, should_stop: F) -> Search
    where
        F: FnMut() -> bool,
    {
        search(HeapFrontier::default(), grid, start, end, should_stop)
    }
}

struct SmallestDistanceHolder {
    distance: u32,
    discovery: usize,
    index: usize,
}

impl Eq for SmallestDistanceHolder {}

impl PartialEq for SmallestDistanceHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestDistanceHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestDistanceHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap yields the smallest distance, then the earliest discovery,
        // then the lowest row-major index
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.discovery.cmp(&self.discovery))
            .then_with(|| other.index.cmp(&self.index))
    }
}

#[derive(Default)]
struct HeapFrontier {
    to_see: BinaryHeap<SmallestDistanceHolder>,
}

impl Frontier for HeapFrontier {
    fn discover(&mut self, index: usize, distance: u32, discovery: usize) {
        self.to_see.push(SmallestDistanceHolder {
            distance,
            discovery,
            index,
        });
    }

    fn pop(&mut self, _grid: &Grid) -> Option<usize> {
        self.to_see.pop().map(|holder| holder.index)
    }
}
