use crate::coord::{Coord, Direction};
use itertools::Itertools;

/// A path found by the [Pathfinder](crate::search::Pathfinder): the cells from start to goal,
/// both inclusive, together with the number of steps taken.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub points: Vec<Coord>,
    pub cost: u32,
}

impl Path {
    pub fn new(points: Vec<Coord>, cost: u32) -> Path {
        Path { points, cost }
    }
    /// Number of cells on the path, start and goal included.
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    /// Number of moves, one less than the number of cells.
    pub fn edges(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
    pub fn start(&self) -> Option<Coord> {
        self.points.first().copied()
    }
    pub fn goal(&self) -> Option<Coord> {
        self.points.last().copied()
    }
    pub fn contains(&self, coord: &Coord) -> bool {
        self.points.contains(coord)
    }
    /// The direction of every move along the path. A pair of consecutive cells that are not one
    /// axis-aligned step apart yields [None].
    pub fn steps(&self) -> Vec<Option<Direction>> {
        self.points
            .iter()
            .tuple_windows()
            .map(|(a, b)| Direction::between(a, b))
            .collect()
    }
}
