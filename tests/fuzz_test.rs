/// Fuzzes the pathfinder on many random mazes: a path must be found exactly when a breadth-first
/// search reaches the goal, it must be a valid walk and, with the default heuristic, as short as
/// the breadth-first distance.
use maze_pathfinding::{
    search::NodeState, Cell, Coord, Maze, Path, Pathfinder, SearchConfig, SearchContext,
};
use rand::prelude::*;
use std::collections::VecDeque;

fn random_maze(rows: usize, cols: usize, rng: &mut StdRng) -> Maze {
    let cells = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| {
                    if rng.gen_bool(0.35) {
                        Cell::Blocked
                    } else {
                        Cell::Open
                    }
                })
                .collect()
        })
        .collect();
    let mut maze = Maze::new(cells).unwrap();
    maze.set(Coord::new(0, 0), Cell::Start).unwrap();
    maze.set(Coord::new(rows as i32 - 1, cols as i32 - 1), Cell::Goal)
        .unwrap();
    maze.update();
    maze
}

fn visualize_maze(maze: &Maze, path: Option<&Path>) {
    println!("{}", maze_pathfinding::render::render_text(maze, path));
}

/// Brute-force shortest distance.
fn bfs_distance(maze: &Maze, start: Coord, goal: Coord) -> Option<usize> {
    let mut dist = vec![vec![usize::MAX; maze.cols()]; maze.rows()];
    let mut queue = VecDeque::from([start]);
    dist[start.row as usize][start.col as usize] = 0;
    while let Some(p) = queue.pop_front() {
        let d = dist[p.row as usize][p.col as usize];
        if p == goal {
            return Some(d);
        }
        for n in p.neumann_neighborhood() {
            if maze.can_move_to(n) && dist[n.row as usize][n.col as usize] == usize::MAX {
                dist[n.row as usize][n.col as usize] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn assert_valid_walk(maze: &Maze, path: &Path, start: Coord, goal: Coord) {
    assert_eq!(path.start(), Some(start));
    assert_eq!(path.goal(), Some(goal));
    assert_eq!(path.cost as usize, path.edges());
    assert!(path.points.iter().all(|p| maze.can_move_to(*p)));
    assert!(path.steps().iter().all(|s| s.is_some()));
}

#[test]
fn fuzz() {
    const N_MAZES: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for use_components in [true, false] {
        let finder = Pathfinder::with_config(SearchConfig {
            use_components,
            ..SearchConfig::default()
        });
        for _ in 0..N_MAZES {
            let rows = rng.gen_range(1..9);
            let cols = rng.gen_range(1..9);
            let maze = random_maze(rows, cols, &mut rng);
            let (start, goal) = match maze.endpoints() {
                Ok(endpoints) => endpoints,
                // A 1x1 maze only keeps the goal marker.
                Err(_) => (Coord::new(0, 0), Coord::new(0, 0)),
            };
            let expected = bfs_distance(&maze, start, goal);
            let path = finder.find_path(&maze, start, goal).unwrap();
            // Show the maze if the result disagrees with the breadth-first search
            if path.as_ref().map(|p| p.edges()) != expected {
                visualize_maze(&maze, path.as_ref());
            }
            assert_eq!(path.as_ref().map(|p| p.edges()), expected);
            if let Some(path) = path {
                assert_valid_walk(&maze, &path, start, goal);
            }
        }
    }
}

#[test]
fn fuzz_inflated_heuristic() {
    const N_MAZES: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    for heuristic_factor in [0.0, 2.0, 5.0] {
        let finder = Pathfinder::with_config(SearchConfig {
            heuristic_factor,
            ..SearchConfig::default()
        });
        let mut ctx = SearchContext::new();
        for _ in 0..N_MAZES {
            let maze = random_maze(8, 8, &mut rng);
            let (start, goal) = maze.endpoints().unwrap();
            let expected = bfs_distance(&maze, start, goal);
            let path = finder.search(&mut ctx, &maze, start, goal, None).unwrap();
            assert_eq!(path.is_some(), expected.is_some());
            ctx.check_consistency().unwrap();
            if let Some(path) = path {
                assert_valid_walk(&maze, &path, start, goal);
                assert!(path.edges() >= expected.unwrap());
                if heuristic_factor == 0.0 {
                    assert_eq!(path.edges(), expected.unwrap());
                }
                assert_eq!(
                    ctx.node(&goal).map(|n| n.state),
                    Some(NodeState::Visited)
                );
            }
        }
    }
}
