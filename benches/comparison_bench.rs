use criterion::{criterion_group, criterion_main, Criterion};
use grid_dijkstra::{point, DijkstraSolver, Grid, GridConfig, GridSolver, ScanSolver};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn reference_grids() -> Vec<(&'static str, Grid)> {
    let open = Grid::new(GridConfig::default()).unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let mut scattered = open.clone();
    for row in 0..scattered.rows() {
        for col in 0..scattered.cols() {
            if rng.gen_bool(0.25) {
                scattered.set_wall(point(row, col), true);
            }
        }
    }

    let mut split = open.clone();
    for row in 0..split.rows() {
        split.set_wall(point(row, 25), true);
    }
    vec![("open", open), ("scattered", scattered), ("split", split)]
}

fn bench_solver<S: GridSolver>(c: &mut Criterion, solver_name: &str, solver: S) {
    for (name, grid) in reference_grids() {
        c.bench_function(format!("{solver_name}, 20x50 {name}").as_str(), |b| {
            b.iter(|| black_box(solver.solve(&grid)))
        });
    }
}

fn dijkstra_bench(c: &mut Criterion) {
    bench_solver(c, "Dijkstra", DijkstraSolver);
}

fn scan_bench(c: &mut Criterion) {
    bench_solver(c, "Scan", ScanSolver);
}

criterion_group!(benches, dijkstra_bench, scan_bench);
criterion_main!(benches);
