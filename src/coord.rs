use core::fmt;
use smallvec::SmallVec;

/// A cell position on a [Maze](crate::maze::Maze) given as `(row, col)`. Rows grow downwards,
/// columns grow to the right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }
    pub fn manhattan_distance(&self, other: &Coord) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
    /// The four axis-aligned neighbours in the fixed expansion order up, down, left, right.
    /// Bounds are not checked.
    pub fn neumann_neighborhood(&self) -> SmallVec<[Coord; 4]> {
        Direction::ALL.iter().map(|d| *self + *d).collect()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Coord {
        Coord::new(row, col)
    }
}

/// A unit step between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which neighbours are expanded during search.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The `(row, col)` delta of a single step.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Derives the direction of the step from `from` to `to`. Returns [None] if the two cells
    /// are not exactly one axis-aligned step apart.
    pub fn between(from: &Coord, to: &Coord) -> Option<Direction> {
        match (to.row - from.row, to.col - from.col) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl core::ops::Add<Direction> for Coord {
    type Output = Coord;
    fn add(self, dir: Direction) -> Coord {
        let (dr, dc) = dir.delta();
        Coord::new(self.row + dr, self.col + dc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbourhood_order() {
        let c = Coord::new(2, 3);
        let n = c.neumann_neighborhood();
        assert_eq!(
            n.as_slice(),
            &[
                Coord::new(1, 3),
                Coord::new(3, 3),
                Coord::new(2, 2),
                Coord::new(2, 4)
            ]
        );
    }

    #[test]
    fn direction_between() {
        let c = Coord::new(4, 4);
        for dir in Direction::ALL {
            assert_eq!(Direction::between(&c, &(c + dir)), Some(dir));
        }
        assert_eq!(Direction::between(&c, &Coord::new(5, 5)), None);
        assert_eq!(Direction::between(&c, &c), None);
    }

    #[test]
    fn manhattan() {
        assert_eq!(Coord::new(0, 0).manhattan_distance(&Coord::new(-3, 4)), 7);
    }
}
