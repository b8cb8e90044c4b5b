use grid_dijkstra::{point, GridConfig, Visualizer};
use std::thread;
use std::time::{Duration, Instant};

// In this example a vertical wall is dragged across the default 20x50 grid between
//  S (row 10, column 5) and E (row 10, column 45), after which the search is replayed frame by
// frame. Symbols:
// - # wall
// - o explored cell
// - * path cell

fn main() {
    let mut visualizer = Visualizer::new(GridConfig::default()).unwrap();
    visualizer.press(point(3, 25));
    for row in 4..18 {
        visualizer.enter(point(row, 25));
    }
    visualizer.release();

    let search = visualizer.visualize(Instant::now());
    println!(
        "Explored {} cells, path of {} cells",
        search.visited.len(),
        search.path.len()
    );

    let frame = Duration::from_millis(100);
    while visualizer.is_animating() {
        thread::sleep(frame);
        if visualizer.tick(Instant::now()) > 0 {
            print!("\x1b[2J\x1b[H{}", visualizer.grid);
        }
    }
}
