use crate::config::MazeConfig;
use crate::coord::Coord;
use crate::error::{MazeError, Result};
use crate::maze::{Cell, Maze};
use log::debug;
use rand::Rng;

/// Generates a random maze: start in the top-left corner, goal in the bottom-right corner and
/// `config.obstacles` blocked cells at distinct random positions other than those two. Nothing
/// guarantees that the goal can be reached.
pub fn generate_maze<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Result<Maze> {
    let mut maze = Maze::open(config.rows, config.cols)?;
    let start = Coord::new(0, 0);
    let goal = Coord::new(config.rows as i32 - 1, config.cols as i32 - 1);
    let free = config.rows * config.cols - if start == goal { 1 } else { 2 };
    if config.obstacles > free {
        return Err(MazeError::TooManyObstacles {
            requested: config.obstacles,
            available: free,
        });
    }
    maze.set(start, Cell::Start)?;
    maze.set(goal, Cell::Goal)?;

    let mut count = 0;
    while count < config.obstacles {
        let p = Coord::new(
            rng.gen_range(0..config.rows) as i32,
            rng.gen_range(0..config.cols) as i32,
        );
        if maze.get(p) == Some(Cell::Open) {
            maze.set(p, Cell::Blocked)?;
            count += 1;
        }
    }
    maze.update();
    debug!(
        "Generated {}x{} maze with {} obstacles",
        config.rows, config.cols, count
    );
    Ok(maze)
}
