//! # maze_pathfinding
//!
//! Shortest paths through 4-connected mazes using
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the Manhattan distance as
//! heuristic. Moves are axis-aligned and every move costs 1.
//!
//! Cells that were already expanded are never reopened. When a cheaper route to such a cell is
//! found, its cost is lowered in place and the improvement is propagated to every node whose
//! predecessor chain passes through it, so stored costs always match the predecessor tree.
//! Connected components are pre-computed to avoid flood-filling behaviour if no path exists.
//!
//! ```
//! use maze_pathfinding::{Maze, Pathfinder};
//!
//! let maze: Maze = "S..\n.X.\n..G".parse().unwrap();
//! let path = Pathfinder::new().solve(&maze).unwrap().unwrap();
//! assert_eq!(path.cost, 4);
//! ```
pub mod config;
pub mod coord;
pub mod error;
pub mod generate;
pub mod maze;
pub mod path;
pub mod render;
pub mod search;

pub use config::{MazeConfig, SearchConfig};
pub use coord::{Coord, Direction};
pub use error::{MazeError, Result};
pub use generate::generate_maze;
pub use maze::{Cell, Maze};
pub use path::Path;
pub use search::{Pathfinder, SearchContext, Snapshot};

/// Convenience wrapper around [Pathfinder::find_path] with the default configuration.
pub fn find_path(maze: &Maze, start: Coord, goal: Coord) -> Result<Option<Path>> {
    Pathfinder::new().find_path(maze, start, goal)
}
