use grid_dijkstra::{Cell, Grid};
use std::collections::HashSet;

/// Checks that `path` runs from the grid's start to its end through distinct, open,
/// 4-adjacent cells and that its length matches the end's distance.
pub fn assert_valid_path(grid: &Grid, path: &[Cell]) {
    let end = path.last().unwrap();
    assert_eq!(path.first().unwrap().point, grid.start());
    assert_eq!(end.point, grid.end());
    assert_eq!(path.len() as u32, end.distance.unwrap() + 1);
    for pair in path.windows(2) {
        let (a, b) = (pair[0].point, pair[1].point);
        assert_eq!((a.x - b.x).abs() + (a.y - b.y).abs(), 1);
    }
    let unique = path.iter().map(|c| (c.row(), c.col())).collect::<HashSet<_>>();
    assert_eq!(unique.len(), path.len());
    assert!(path.iter().all(|c| !c.is_wall));
}
