//! Error types for maze construction and search.

use crate::coord::Coord;

/// Result type alias
pub type Result<T> = std::result::Result<T, MazeError>;

/// Errors raised before or during a search. Not finding a path is not an error; see
/// [Pathfinder::find_path](crate::search::Pathfinder::find_path).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MazeError {
    /// The maze has no rows or no columns
    #[error("maze has no cells")]
    EmptyMaze,

    /// A row differs in length from the first row
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Start or goal lies outside the maze
    #[error("{coord} is outside the {rows}x{cols} maze")]
    OutOfBounds { coord: Coord, rows: usize, cols: usize },

    /// Start or goal lies on a blocked cell
    #[error("{coord} is blocked")]
    BlockedEndpoint { coord: Coord },

    /// The maze carries no start or goal marker
    #[error("maze has no {0} cell")]
    MissingEndpoint(&'static str),

    /// The maze carries two start or two goal markers
    #[error("maze has more than one {cell} cell: {first} and {second}")]
    DuplicateEndpoint {
        cell: &'static str,
        first: Coord,
        second: Coord,
    },

    /// Unknown character in a textual maze
    #[error("invalid cell {found:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, found: char },

    /// The generator was asked for more obstacles than there are free cells
    #[error("cannot place {requested} obstacles, only {available} cells are free")]
    TooManyObstacles { requested: usize, available: usize },

    /// Internal search state broke one of its invariants. Not recoverable.
    #[error("search invariant violated: {0}")]
    InvariantViolation(String),
}
