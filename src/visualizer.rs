use std::time::Instant;

use grid_util::Point;
use log::info;

use crate::{
    animation::Scheduler,
    config::{GridConfig, PlaybackConfig},
    error::Result,
    grid::Grid,
    solver::{dijkstra::DijkstraSolver, GridSolver, Search},
};

/// An interactive session: a user-facing [Grid] painted with a pressed pointer, a solver and the
/// [Scheduler] replaying its last run onto the grid.
#[derive(Clone, Debug)]
pub struct Visualizer<S: GridSolver = DijkstraSolver> {
    pub grid: Grid,
    pub solver: S,
    pub scheduler: Scheduler,
    pressed: bool,
    last_search: Option<Search>,
}

impl Visualizer {
    pub fn new(config: GridConfig) -> Result<Visualizer> {
        Visualizer::with_solver(config, PlaybackConfig::default(), DijkstraSolver)
    }
}

impl<S: GridSolver> Visualizer<S> {
    pub fn with_solver(
        config: GridConfig,
        playback: PlaybackConfig,
        solver: S,
    ) -> Result<Visualizer<S>> {
        Ok(Visualizer {
            grid: Grid::new(config)?,
            solver,
            scheduler: Scheduler::new(playback),
            pressed: false,
            last_search: None,
        })
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn last_search(&self) -> Option<&Search> {
        self.last_search.as_ref()
    }

    /// Pointer pressed on a cell: toggles its wall and starts a drag.
    pub fn press(&mut self, p: Point) -> bool {
        self.pressed = true;
        self.grid.toggle_wall(p)
    }

    /// Pointer moved onto a cell: toggles its wall only while dragging.
    pub fn enter(&mut self, p: Point) -> bool {
        self.pressed && self.grid.toggle_wall(p)
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Clears the previous run's marks, searches a snapshot of the grid and starts replaying the
    /// result at `now`. Any replay still in progress is cancelled.
    pub fn visualize(&mut self, now: Instant) -> &Search {
        self.scheduler.cancel();
        self.grid.reset();
        self.grid.update();
        let (start, end) = (self.grid.start(), self.grid.end());
        if self.grid.unreachable(start, end) {
            info!("{} is not reachable from {}, replaying exploration only", end, start);
        }
        let search = self.solver.solve(&self.grid);
        self.scheduler.play(&search.visited, &search.path, now);
        self.last_search.insert(search)
    }

    /// Applies every replay frame due at `now` to the grid.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.scheduler.tick(now, &mut self.grid)
    }

    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_idle()
    }

    /// Stops the replay and removes its marks, keeping the walls.
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.grid.reset();
        self.last_search = None;
    }

    /// Stops the replay and returns the grid to its initial state, walls included.
    pub fn clear(&mut self) {
        self.scheduler.cancel();
        self.grid.clear();
        self.last_search = None;
    }
}
