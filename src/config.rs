/// Tunables of a [Pathfinder](crate::search::Pathfinder).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Multiplier applied to the Manhattan heuristic. At 1.0 the search is A* and returns shortest
    /// paths; 0.0 turns it into a uniform-cost search. Values above 1.0 make the heuristic
    /// inadmissible: cells can then be closed before their cheapest route is known, which is
    /// corrected by cost propagation.
    pub heuristic_factor: f32,
    /// Consult the maze's connected components before searching and report unreachable goals
    /// without expanding any cell.
    pub use_components: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            heuristic_factor: 1.0,
            use_components: true,
        }
    }
}

/// Parameters for [generate_maze](crate::generate::generate_maze).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    pub obstacles: usize,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            rows: 10,
            cols: 10,
            obstacles: 20,
        }
    }
}
