use crate::coord::Coord;
use crate::error::{MazeError, Result};
use core::fmt;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use std::str::FromStr;

/// State of a single maze cell. Only [Cell::Blocked] is impassable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Open,
    Blocked,
    Start,
    Goal,
}

impl Cell {
    pub fn is_blocked(&self) -> bool {
        *self == Cell::Blocked
    }
    pub fn to_char(&self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Blocked => 'X',
            Cell::Start => 'S',
            Cell::Goal => 'G',
        }
    }
    /// Parses a cell from the textual maze format. Open cells may be written as `.`, `-` or a
    /// space, blocked cells as `X` or `#`.
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' | ' ' => Some(Cell::Open),
            'X' | '#' => Some(Cell::Blocked),
            'S' => Some(Cell::Start),
            'G' => Some(Cell::Goal),
            _ => None,
        }
    }
}

/// A rectangular maze of [Cell]s stored row-major. Besides the raw cells it keeps track of the
/// start and goal markers and of connected components in a [UnionFind] structure, which allows
/// ruling out unreachable goals without flood-filling the maze.
#[derive(Clone, Debug)]
pub struct Maze {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
    start: Option<Coord>,
    goal: Option<Coord>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Maze {
    /// Builds a maze from rows of cells. All rows must have the same, non-zero length and at most
    /// one [Cell::Start] and one [Cell::Goal] may be present.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Maze> {
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if n_cols == 0 {
            return Err(MazeError::EmptyMaze);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(MazeError::RaggedRow {
                row,
                expected: n_cols,
                found: r.len(),
            });
        }
        let n_rows = rows.len();
        let mut start = None;
        let mut goal = None;
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let coord = Coord::new(r as i32, c as i32);
                let (slot, name) = match cell {
                    Cell::Start => (&mut start, "start"),
                    Cell::Goal => (&mut goal, "goal"),
                    _ => continue,
                };
                if let Some(first) = *slot {
                    return Err(MazeError::DuplicateEndpoint {
                        cell: name,
                        first,
                        second: coord,
                    });
                }
                *slot = Some(coord);
            }
        }
        let mut maze = Maze {
            cells: rows.into_iter().flatten().collect(),
            rows: n_rows,
            cols: n_cols,
            start,
            goal,
            components: UnionFind::new(n_rows * n_cols),
            components_dirty: false,
        };
        maze.generate_components();
        Ok(maze)
    }

    /// An all-open maze without start or goal markers.
    pub fn open(rows: usize, cols: usize) -> Result<Maze> {
        Maze::new(vec![vec![Cell::Open; cols]; rows])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn start(&self) -> Option<Coord> {
        self.start
    }
    pub fn goal(&self) -> Option<Coord> {
        self.goal
    }
    /// The start and goal markers, failing if either is missing.
    pub fn endpoints(&self) -> Result<(Coord, Coord)> {
        let start = self.start.ok_or(MazeError::MissingEndpoint("start"))?;
        let goal = self.goal.ok_or(MazeError::MissingEndpoint("goal"))?;
        Ok((start, goal))
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.rows
            && (coord.col as usize) < self.cols
    }
    fn ix(&self, coord: Coord) -> usize {
        coord.row as usize * self.cols + coord.col as usize
    }
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        if self.in_bounds(coord) {
            Some(self.cells[self.ix(coord)])
        } else {
            None
        }
    }
    /// Whether a search may step onto `coord`.
    pub fn can_move_to(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(|c| !c.is_blocked())
    }
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }
    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_blocked()).count()
    }

    /// Fails unless `coord` lies inside the maze on a passable cell.
    pub fn validate_endpoint(&self, coord: Coord) -> Result<()> {
        match self.get(coord) {
            None => Err(MazeError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            }),
            Some(Cell::Blocked) => Err(MazeError::BlockedEndpoint { coord }),
            Some(_) => Ok(()),
        }
    }

    /// Updates a cell. Placing [Cell::Start] or [Cell::Goal] moves the existing marker, whose old
    /// cell becomes open. Joins newly connected components and flags the components as dirty if
    /// they are (potentially) broken apart into multiple.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<()> {
        let old = self.get(coord).ok_or(MazeError::OutOfBounds {
            coord,
            rows: self.rows,
            cols: self.cols,
        })?;
        match old {
            Cell::Start => self.start = None,
            Cell::Goal => self.goal = None,
            _ => {}
        }
        let moved = match cell {
            Cell::Start => self.start.replace(coord),
            Cell::Goal => self.goal.replace(coord),
            _ => None,
        };
        if let Some(prev) = moved {
            let ix = self.ix(prev);
            self.cells[ix] = Cell::Open;
        }
        let ix = self.ix(coord);
        self.cells[ix] = cell;
        if cell.is_blocked() {
            if !old.is_blocked() {
                self.components_dirty = true;
            }
        } else {
            for n in coord.neumann_neighborhood() {
                if self.can_move_to(n) {
                    let n_ix = self.ix(n);
                    self.components.union(ix, n_ix);
                }
            }
        }
        Ok(())
    }

    /// Checks if start and goal are on the same component. Only meaningful while the components
    /// are not dirty.
    pub fn reachable(&self, start: &Coord, goal: &Coord) -> bool {
        if self.can_move_to(*start) && self.can_move_to(*goal) {
            self.components.equiv(self.ix(*start), self.ix(*goal))
        } else {
            false
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open neighbours to the same components.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components for {}x{} maze", self.rows, self.cols);
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for r in 0..self.rows as i32 {
            for c in 0..self.cols as i32 {
                let p = Coord::new(r, c);
                if !self.can_move_to(p) {
                    continue;
                }
                let parent_ix = self.ix(p);
                for n in [Coord::new(r + 1, c), Coord::new(r, c + 1)] {
                    if self.can_move_to(n) {
                        let n_ix = self.ix(n);
                        self.components.union(parent_ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.iter_rows() {
            let line: String = row.iter().map(Cell::to_char).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    /// Parses one row per line, skipping empty lines. See [Cell::from_char] for the alphabet.
    fn from_str(s: &str) -> Result<Maze> {
        let rows = s
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        Cell::from_char(ch).ok_or(MazeError::InvalidCell {
                            row,
                            col,
                            found: ch,
                        })
                    })
                    .collect::<Result<Vec<Cell>>>()
            })
            .collect::<Result<Vec<Vec<Cell>>>>()?;
        Maze::new(rows)
    }
}
