use criterion::{criterion_group, criterion_main, Criterion};
use maze_pathfinding::{
    generate_maze, Coord, Maze, MazeConfig, Pathfinder, SearchConfig, SearchContext,
};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn random_mazes(n: usize, config: &MazeConfig) -> Vec<(Maze, Coord, Coord)> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..n)
        .map(|_| {
            let maze = generate_maze(config, &mut rng).unwrap();
            let (start, goal) = maze.endpoints().unwrap();
            (maze, start, goal)
        })
        .collect()
}

fn heuristic_bench(c: &mut Criterion) {
    for size in [16, 64] {
        let config = MazeConfig {
            rows: size,
            cols: size,
            obstacles: size * size / 4,
        };
        let mazes = random_mazes(20, &config);
        for (name, heuristic_factor) in [("dijkstra", 0.0), ("astar", 1.0), ("weighted", 2.0)] {
            let pathfinder = Pathfinder::with_config(SearchConfig {
                heuristic_factor,
                use_components: false,
            });
            let mut ctx = SearchContext::new();
            c.bench_function(format!("{size}x{size}, {name}").as_str(), |b| {
                b.iter(|| {
                    for (maze, start, goal) in &mazes {
                        black_box(pathfinder.search(&mut ctx, maze, *start, *goal, None).unwrap());
                    }
                })
            });
        }
    }
}

fn components_bench(c: &mut Criterion) {
    // Dense mazes where most goals are unreachable.
    let config = MazeConfig {
        rows: 64,
        cols: 64,
        obstacles: 64 * 64 / 2,
    };
    let mazes = random_mazes(20, &config);
    for use_components in [false, true] {
        let pathfinder = Pathfinder::with_config(SearchConfig {
            use_components,
            ..SearchConfig::default()
        });
        let name = if use_components { "with" } else { "without" };
        c.bench_function(format!("64x64 dense, {name} components").as_str(), |b| {
            b.iter(|| {
                for (maze, start, goal) in &mazes {
                    black_box(pathfinder.find_path(maze, *start, *goal).unwrap());
                }
            })
        });
    }
}

criterion_group!(benches, heuristic_bench, components_bench);
criterion_main!(benches);
