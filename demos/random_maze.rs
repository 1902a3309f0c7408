use maze_pathfinding::render::render_report;
use maze_pathfinding::{generate_maze, MazeConfig, Pathfinder};
use rand::prelude::*;

// Generates a random 10x10 maze with 20 obstacles, start in the top-left and goal in the
// bottom-right corner, and prints the maze followed by the solution. Pass a seed as the first
// argument to reproduce a maze.
fn main() {
    env_logger::init();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let maze = generate_maze(&MazeConfig::default(), &mut rng).unwrap();
    let path = Pathfinder::new().solve(&maze).unwrap();
    println!("Seed: {seed}");
    print!("{}", render_report(&maze, path.as_ref()));
}
