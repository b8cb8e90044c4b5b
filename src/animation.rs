//! Timed replay of a finished search.
//!
//! The [Scheduler] turns the visitation and path traces of a [Search](crate::solver::Search) into
//! a queue of frames, each with its own due time, and hands every frame whose time has come to a
//! [Presenter] when it is ticked. Exploration frames come first, spaced by
//! [PlaybackConfig::visit_interval]; the path frames follow once the exploration phase is over,
//! spaced by [PlaybackConfig::path_interval].

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::{cell::Cell, config::PlaybackConfig, grid::Grid};

/// Receives the frames of a replay. Implementors apply the visible change, the scheduler itself
/// never touches a grid.
pub trait Presenter {
    fn on_visit(&mut self, cell: &Cell);
    fn on_path(&mut self, cell: &Cell);
}

/// A [Presenter] built from two closures.
pub struct Callbacks<V, P> {
    pub on_visit: V,
    pub on_path: P,
}

impl<V, P> Callbacks<V, P>
where
    V: FnMut(&Cell),
    P: FnMut(&Cell),
{
    pub fn new(on_visit: V, on_path: P) -> Callbacks<V, P> {
        Callbacks { on_visit, on_path }
    }
}

impl<V, P> Presenter for Callbacks<V, P>
where
    V: FnMut(&Cell),
    P: FnMut(&Cell),
{
    fn on_visit(&mut self, cell: &Cell) {
        (self.on_visit)(cell)
    }
    fn on_path(&mut self, cell: &Cell) {
        (self.on_path)(cell)
    }
}

/// Marks the replayed cells on a user-facing grid.
impl Presenter for Grid {
    fn on_visit(&mut self, cell: &Cell) {
        self.mark_visited(cell.point);
    }
    fn on_path(&mut self, cell: &Cell) {
        self.mark_path(cell.point);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frame {
    Visit(Cell),
    Path(Cell),
}

impl Frame {
    pub fn cell(&self) -> &Cell {
        match self {
            Frame::Visit(cell) | Frame::Path(cell) => cell,
        }
    }

    fn present<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            Frame::Visit(cell) => presenter.on_visit(cell),
            Frame::Path(cell) => presenter.on_path(cell),
        }
    }
}

/// A frame and its delay from the start of the replay.
#[derive(Clone, Debug)]
struct Scheduled {
    offset: Duration,
    frame: Frame,
}

/// Holds the pending frames of at most one replay.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    pub config: PlaybackConfig,
    started: Option<Instant>,
    pending: VecDeque<Scheduled>,
}

/// `interval * n`, saturating at [Duration::MAX] instead of panicking on long traces or huge
/// intervals.
fn offset(interval: Duration, n: usize) -> Duration {
    interval.saturating_mul(u32::try_from(n).unwrap_or(u32::MAX))
}

impl Scheduler {
    pub fn new(config: PlaybackConfig) -> Scheduler {
        Scheduler {
            config,
            started: None,
            pending: VecDeque::new(),
        }
    }

    /// Schedules a replay starting at `now`, dropping whatever is left of the previous one first.
    ///
    /// Visit `i` is due at `now + i * visit_interval`; path cell `j` is due at
    /// `now + visited.len() * visit_interval + j * path_interval`. Offsets saturate, so a frame
    /// whose offset overflows is due at the end of time and only fires once everything before it
    /// has.
    pub fn play(&mut self, visited: &[Cell], path: &[Cell], now: Instant) {
        self.cancel();
        let PlaybackConfig {
            visit_interval,
            path_interval,
        } = self.config;
        let visits = visited.iter().enumerate().map(|(i, cell)| Scheduled {
            offset: offset(visit_interval, i),
            frame: Frame::Visit(*cell),
        });
        let path_start = offset(visit_interval, visited.len());
        let path_frames = path.iter().enumerate().map(|(j, cell)| Scheduled {
            offset: path_start.saturating_add(offset(path_interval, j)),
            frame: Frame::Path(*cell),
        });
        self.started = Some(now);
        self.pending.extend(visits.chain(path_frames));
        info!(
            "Scheduled {} visit and {} path frames over {:?}",
            visited.len(),
            path.len(),
            self.remaining(now)
        );
    }

    /// Drops every frame that has not fired yet and returns how many there were.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.pending.len();
        if dropped > 0 {
            debug!("Cancelling {} pending frames", dropped);
        }
        self.pending.clear();
        dropped
    }

    /// Presents every frame due at or before `now`, in order, and returns how many fired.
    pub fn tick<P: Presenter + ?Sized>(&mut self, now: Instant, presenter: &mut P) -> usize {
        let elapsed = self.elapsed(now);
        let mut fired = 0;
        while let Some(next) = self.pending.front() {
            if next.offset > elapsed {
                break;
            }
            if let Some(scheduled) = self.pending.pop_front() {
                scheduled.frame.present(presenter);
                fired += 1;
            }
        }
        fired
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// When the next frame is due, if any. [None] too when that instant is not representable.
    pub fn next_due(&self) -> Option<Instant> {
        let started = self.started?;
        self.pending
            .front()
            .and_then(|s| started.checked_add(s.offset))
    }

    /// Time from `now` until the last pending frame fires.
    pub fn remaining(&self, now: Instant) -> Duration {
        let elapsed = self.elapsed(now);
        self.pending
            .back()
            .map_or(Duration::ZERO, |s| s.offset.saturating_sub(elapsed))
    }

    fn elapsed(&self, now: Instant) -> Duration {
        self.started
            .map_or(Duration::ZERO, |started| now.saturating_duration_since(started))
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.pending.iter().map(|s| &s.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GridConfig, point, solver::GridSolver};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<(char, usize, usize)>,
    }

    impl Presenter for Recorder {
        fn on_visit(&mut self, cell: &Cell) {
            self.events.push(('v', cell.row(), cell.col()));
        }
        fn on_path(&mut self, cell: &Cell) {
            self.events.push(('p', cell.row(), cell.col()));
        }
    }

    fn line_search() -> crate::solver::Search {
        let grid = Grid::new(GridConfig::new(1, 3, point(0, 0), point(0, 2))).unwrap();
        crate::solver::dijkstra::DijkstraSolver.solve(&grid)
    }

    #[test]
    fn frames_fire_on_their_own_schedule() {
        let search = line_search();
        let mut scheduler = Scheduler::default();
        let t0 = Instant::now();
        scheduler.play(&search.visited, &search.path, t0);
        assert_eq!(scheduler.pending(), 6);
        assert_eq!(scheduler.remaining(t0), ms(30 + 2 * 50));

        let mut recorder = Recorder::default();
        assert_eq!(scheduler.tick(t0, &mut recorder), 1);
        assert_eq!(scheduler.tick(t0 + ms(9), &mut recorder), 0);
        assert_eq!(scheduler.tick(t0 + ms(20), &mut recorder), 2);
        assert_eq!(scheduler.next_due(), Some(t0 + ms(30)));
        assert_eq!(scheduler.tick(t0 + ms(79), &mut recorder), 1);
        assert_eq!(scheduler.tick(t0 + ms(1000), &mut recorder), 2);
        assert!(scheduler.is_idle());
        assert_eq!(
            recorder.events,
            vec![
                ('v', 0, 0),
                ('v', 0, 1),
                ('v', 0, 2),
                ('p', 0, 0),
                ('p', 0, 1),
                ('p', 0, 2)
            ]
        );
    }

    #[test]
    fn playing_again_cancels_the_previous_replay() {
        let search = line_search();
        let mut scheduler = Scheduler::default();
        let t0 = Instant::now();
        scheduler.play(&search.visited, &search.path, t0);
        let mut recorder = Recorder::default();
        scheduler.tick(t0 + ms(10), &mut recorder);

        scheduler.play(&search.visited[..1], &[], t0 + ms(15));
        assert_eq!(scheduler.pending(), 1);
        scheduler.tick(t0 + ms(500), &mut recorder);
        assert_eq!(recorder.events, vec![('v', 0, 0), ('v', 0, 1), ('v', 0, 0)]);
        assert_eq!(scheduler.cancel(), 0);
    }

    #[test]
    fn huge_intervals_saturate_instead_of_overflowing() {
        let search = line_search();
        let mut scheduler = Scheduler::new(PlaybackConfig {
            visit_interval: Duration::MAX,
            path_interval: Duration::MAX,
        });
        let t0 = Instant::now();
        scheduler.play(&search.visited, &search.path, t0);
        assert_eq!(scheduler.pending(), 6);
        assert_eq!(scheduler.remaining(t0), Duration::MAX);

        let mut recorder = Recorder::default();
        assert_eq!(scheduler.tick(t0 + Duration::from_secs(3600), &mut recorder), 1);
        assert_eq!(scheduler.pending(), 5);
        assert_eq!(scheduler.next_due(), None);
        assert_eq!(recorder.events, vec![('v', 0, 0)]);
    }

    #[test]
    fn long_traces_keep_their_order() {
        let cell = line_search().visited[0];
        let visited = vec![cell; 1000];
        let mut scheduler = Scheduler::new(PlaybackConfig {
            visit_interval: Duration::from_secs(u64::MAX / 500),
            path_interval: ms(1),
        });
        let t0 = Instant::now();
        scheduler.play(&visited, &[cell], t0);
        assert_eq!(scheduler.pending(), 1001);
        let mut recorder = Recorder::default();
        assert_eq!(scheduler.tick(t0, &mut recorder), 1);
        assert!(matches!(scheduler.frames().last(), Some(Frame::Path(_))));
    }

    #[test]
    fn closures_and_grids_present_frames() {
        let search = line_search();
        let mut scheduler = Scheduler::new(PlaybackConfig {
            visit_interval: ms(1),
            path_interval: ms(1),
        });
        let t0 = Instant::now();
        let mut visits = 0;
        let mut path = Vec::new();
        scheduler.play(&search.visited, &search.path, t0);
        let mut callbacks = Callbacks::new(|_: &Cell| visits += 1, |c: &Cell| path.push(c.point));
        scheduler.tick(t0 + ms(100), &mut callbacks);
        assert_eq!(visits, 3);
        assert_eq!(path.len(), 3);

        let mut grid = Grid::new(GridConfig::new(1, 3, point(0, 0), point(0, 2))).unwrap();
        scheduler.play(&search.visited, &search.path[..1], t0);
        scheduler.tick(t0 + ms(100), &mut grid);
        assert_eq!(grid.to_string(), "SoE\n");
        assert!(grid.cell(point(0, 0)).unwrap().is_path);
    }
}
