use maze_pathfinding::render::render_report;
use maze_pathfinding::{Maze, Pathfinder};

// In this example a path is found on a maze with shape
// S . . .
// . X X .
// . . X G
// where
// - X marks an obstacle
// - S marks the start
// - G marks the goal
//
// Moves are restricted to the 4-neighborhood.
fn main() {
    env_logger::init();
    let maze: Maze = "S...\n.XX.\n..XG".parse().unwrap();
    let path = Pathfinder::new().solve(&maze).unwrap();
    print!("{}", render_report(&maze, path.as_ref()));
}
