//! Best-first search over a [Maze] with cost revision.
//!
//! Nodes live in an index map keyed by [Coord], so a predecessor is just the index of another
//! entry. Unlike textbook A*, cells that were already expanded are not reopened when a cheaper
//! route to them turns up. Instead their cost is lowered in place and the improvement is pushed
//! down to every node whose predecessor chain runs through them.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, error, info, log_enabled, trace, warn, Level};

use crate::config::SearchConfig;
use crate::coord::Coord;
use crate::error::{MazeError, Result};
use crate::maze::Maze;
use crate::path::Path;
use core::fmt;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Discovered but not yet expanded.
    Frontier,
    /// Expanded.
    Visited,
}

/// A cell discovered during search. The coordinate is the key under which the node is stored in
/// its [SearchContext]; `parent` is the index of the predecessor in that same context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub cost: u32,
    pub heuristic: u32,
    pub parent: Option<usize>,
    pub state: NodeState,
}

impl SearchNode {
    /// The evaluation used to rank frontier nodes.
    pub fn estimate(&self) -> u32 {
        self.cost + self.heuristic
    }
}

/// Owned copy of a node for diagnostics, with the predecessor resolved to its coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeView {
    pub coord: Coord,
    pub cost: u32,
    pub heuristic: u32,
    pub parent: Option<Coord>,
}

impl fmt::Display for NodeView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: cost={}, h={}", self.coord, self.cost, self.heuristic)
    }
}

/// State of the search right after a node was expanded, handed to the observer of
/// [Pathfinder::find_path_observed].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// 1-based count of expansions so far.
    pub iteration: usize,
    pub expanded: Coord,
    pub frontier: Vec<NodeView>,
    pub visited: Vec<NodeView>,
}

/// Outcome of offering a node a route through one of its neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relaxation {
    /// First time the cell was seen; a new frontier node was created.
    Inserted(usize),
    /// The cell was reached more cheaply than before. `propagated` counts the dependents whose
    /// cost was lowered as a consequence.
    Improved { index: usize, propagated: usize },
    /// The existing route is at least as cheap.
    Unchanged,
}

struct SmallestCostHolder {
    estimated_cost: u32,
    heuristic: u32,
    coord: Coord,
    cost: u32,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap, so everything is reversed: lowest estimate first, then lowest heuristic
        // (i.e. the deeper node), then row-major coordinate order.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.coord.cmp(&self.coord))
            .then_with(|| other.cost.cmp(&self.cost))
    }
}

/// Frontier and visited set of a single search. Both sets share one node store; a node's
/// [NodeState] says which set it belongs to, so a coordinate can never be in both.
///
/// The context is public so that callers can reuse its allocations across searches and drive
/// the individual steps directly.
#[derive(Default)]
pub struct SearchContext {
    nodes: FxIndexMap<Coord, SearchNode>,
    to_see: BinaryHeap<SmallestCostHolder>,
    frontier_len: usize,
}

impl SearchContext {
    pub fn new() -> SearchContext {
        SearchContext::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.to_see.clear();
        self.frontier_len = 0;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn frontier_len(&self) -> usize {
        self.frontier_len
    }
    pub fn visited_len(&self) -> usize {
        self.nodes.len() - self.frontier_len
    }

    pub fn index_of(&self, coord: &Coord) -> Option<usize> {
        self.nodes.get_index_of(coord)
    }
    pub fn node(&self, coord: &Coord) -> Option<&SearchNode> {
        self.nodes.get(coord)
    }
    pub fn get_index(&self, index: usize) -> Option<(Coord, &SearchNode)> {
        self.nodes.get_index(index).map(|(c, n)| (*c, n))
    }

    fn view(&self, coord: Coord, node: &SearchNode) -> NodeView {
        NodeView {
            coord,
            cost: node.cost,
            heuristic: node.heuristic,
            parent: node
                .parent
                .and_then(|p| self.nodes.get_index(p))
                .map(|(c, _)| *c),
        }
    }
    fn views(&self, state: NodeState) -> impl Iterator<Item = NodeView> + '_ {
        self.nodes
            .iter()
            .filter(move |(_, n)| n.state == state)
            .map(|(c, n)| self.view(*c, n))
    }
    /// Nodes awaiting expansion, in discovery order.
    pub fn frontier(&self) -> impl Iterator<Item = NodeView> + '_ {
        self.views(NodeState::Frontier)
    }
    /// Expanded nodes, in discovery order.
    pub fn visited(&self) -> impl Iterator<Item = NodeView> + '_ {
        self.views(NodeState::Visited)
    }
    pub fn snapshot(&self, iteration: usize, expanded: Coord) -> Snapshot {
        Snapshot {
            iteration,
            expanded,
            frontier: self.frontier().collect(),
            visited: self.visited().collect(),
        }
    }

    fn push_frontier(&mut self, coord: Coord, node: &SearchNode, index: usize) {
        self.to_see.push(SmallestCostHolder {
            estimated_cost: node.estimate(),
            heuristic: node.heuristic,
            coord,
            cost: node.cost,
            index,
        });
    }

    /// Adds a node for a coordinate not yet in the store. The predecessor, if any, must already
    /// be stored.
    pub fn insert(
        &mut self,
        coord: Coord,
        cost: u32,
        heuristic: u32,
        parent: Option<Coord>,
        state: NodeState,
    ) -> Result<usize> {
        let parent = parent
            .map(|p| {
                self.nodes.get_index_of(&p).ok_or_else(|| {
                    MazeError::InvariantViolation(format!(
                        "predecessor {p} of {coord} is not in the node store"
                    ))
                })
            })
            .transpose()?;
        let node = SearchNode {
            cost,
            heuristic,
            parent,
            state,
        };
        let index = match self.nodes.entry(coord) {
            Occupied(_) => {
                return Err(MazeError::InvariantViolation(format!(
                    "{coord} is already in the node store"
                )))
            }
            Vacant(e) => {
                let index = e.index();
                e.insert(node.clone());
                index
            }
        };
        if state == NodeState::Frontier {
            self.frontier_len += 1;
            self.push_frontier(coord, &node, index);
        }
        Ok(index)
    }

    /// Removes the best frontier node, marks it visited and returns its index.
    pub fn pop_best(&mut self) -> Option<usize> {
        while let Some(SmallestCostHolder { cost, index, .. }) = self.to_see.pop() {
            let Some((_, node)) = self.nodes.get_index_mut(index) else {
                continue;
            };
            // A node is pushed again whenever its cost drops, so older entries are skipped.
            if node.state != NodeState::Frontier || node.cost != cost {
                continue;
            }
            node.state = NodeState::Visited;
            self.frontier_len -= 1;
            return Some(index);
        }
        None
    }

    /// Offers `coord` a route through the node at `from`, one step further. Creates a frontier
    /// node for unseen cells, lowers the cost of frontier nodes and of visited nodes (the latter
    /// followed by [propagate](Self::propagate)) when the route is strictly cheaper.
    pub fn relax(&mut self, from: usize, coord: Coord, heuristic: u32) -> Result<Relaxation> {
        let new_cost = self
            .nodes
            .get_index(from)
            .map(|(_, n)| n.cost + 1)
            .ok_or_else(|| {
                MazeError::InvariantViolation(format!("relaxing from unknown node {from}"))
            })?;
        let (index, state) = match self.nodes.entry(coord) {
            Vacant(e) => {
                let index = e.index();
                e.insert(SearchNode {
                    cost: new_cost,
                    heuristic,
                    parent: Some(from),
                    state: NodeState::Frontier,
                });
                (index, None)
            }
            Occupied(mut e) => {
                if e.get().cost <= new_cost {
                    return Ok(Relaxation::Unchanged);
                }
                let node = e.get_mut();
                node.cost = new_cost;
                node.parent = Some(from);
                let state = node.state;
                (e.index(), Some(state))
            }
        };
        let propagated = match state {
            None => {
                self.frontier_len += 1;
                self.rerank(index);
                return Ok(Relaxation::Inserted(index));
            }
            // Frontier nodes have no dependents yet, re-rank only.
            Some(NodeState::Frontier) => {
                self.rerank(index);
                0
            }
            Some(NodeState::Visited) => self.propagate(index)?,
        };
        Ok(Relaxation::Improved { index, propagated })
    }

    fn rerank(&mut self, index: usize) {
        if let Some((coord, node)) = self.nodes.get_index(index) {
            let (coord, node) = (*coord, node.clone());
            self.push_frontier(coord, &node, index);
        }
    }

    /// Pushes a cost decrease of the node at `index` down the predecessor tree: every node whose
    /// predecessor is a lowered node and whose cost exceeds that predecessor's cost plus one is
    /// lowered to match, recursively. Returns the number of lowered dependents.
    ///
    /// Each update strictly lowers a non-negative cost, so the total number of updates is bounded
    /// by the sum of all stored costs. Exceeding that bound is reported as an invariant violation.
    pub fn propagate(&mut self, index: usize) -> Result<usize> {
        let mut budget: u64 = self.nodes.values().map(|n| n.cost as u64 + 1).sum();
        let mut updated = 0;
        let mut stack = vec![index];
        while let Some(ix) = stack.pop() {
            let Some((_, node)) = self.nodes.get_index(ix) else {
                return Err(MazeError::InvariantViolation(format!(
                    "propagating from unknown node {ix}"
                )));
            };
            let new_cost = node.cost + 1;
            let dependents = self
                .nodes
                .values()
                .enumerate()
                .filter(|(_, n)| n.parent == Some(ix) && n.cost > new_cost)
                .map(|(i, _)| i)
                .collect::<Vec<usize>>();
            for dependent in dependents {
                if budget == 0 {
                    let coord = self.nodes.get_index(index).map(|(c, _)| *c);
                    error!("Cost propagation from {:?} does not terminate", coord);
                    return Err(MazeError::InvariantViolation(format!(
                        "cost propagation from {coord:?} does not terminate"
                    )));
                }
                budget -= 1;
                let Some((_, node)) = self.nodes.get_index_mut(dependent) else {
                    continue;
                };
                node.cost = new_cost;
                if node.state == NodeState::Frontier {
                    self.rerank(dependent);
                }
                updated += 1;
                stack.push(dependent);
            }
        }
        Ok(updated)
    }

    /// Follows predecessors from the node at `index` back to the root and returns the
    /// coordinates in root-to-node order. Returns [None] if the chain is broken or cyclic.
    pub fn reconstruct(&self, index: usize) -> Option<Vec<Coord>> {
        let mut path = Vec::new();
        let mut current = Some(index);
        while let Some(ix) = current {
            let (coord, node) = self.nodes.get_index(ix)?;
            path.push(*coord);
            if path.len() > self.nodes.len() {
                return None;
            }
            current = node.parent;
        }
        path.reverse();
        Some(path)
    }

    /// Verifies that every node costs exactly one more than its predecessor.
    pub fn check_consistency(&self) -> Result<()> {
        for (coord, node) in &self.nodes {
            let Some(p) = node.parent else {
                continue;
            };
            let (parent_coord, parent) = self.nodes.get_index(p).ok_or_else(|| {
                MazeError::InvariantViolation(format!("{coord} has a dangling predecessor"))
            })?;
            if node.cost != parent.cost + 1 {
                return Err(MazeError::InvariantViolation(format!(
                    "{coord} has cost {} but its predecessor {parent_coord} has cost {}",
                    node.cost, parent.cost
                )));
            }
        }
        Ok(())
    }
}

/// Finds shortest paths on a [Maze] moving in the four axis-aligned directions with unit cost,
/// using the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) to the goal as
/// heuristic.
#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    pub config: SearchConfig,
}

impl Pathfinder {
    pub fn new() -> Pathfinder {
        Pathfinder::default()
    }
    pub fn with_config(config: SearchConfig) -> Pathfinder {
        Pathfinder { config }
    }

    /// Manhattan distance times the configured heuristic factor.
    pub fn heuristic(&self, p: &Coord, goal: &Coord) -> u32 {
        (p.manhattan_distance(goal) as f32 * self.config.heuristic_factor) as u32
    }

    /// Computes a path between the start and goal markers of the maze.
    pub fn solve(&self, maze: &Maze) -> Result<Option<Path>> {
        let (start, goal) = maze.endpoints()?;
        self.find_path(maze, start, goal)
    }

    /// Computes a path from start to goal. Returns `Ok(None)` if the goal cannot be reached and
    /// an error if an endpoint lies outside the maze or on a blocked cell.
    pub fn find_path(&self, maze: &Maze, start: Coord, goal: Coord) -> Result<Option<Path>> {
        let mut ctx = SearchContext::new();
        self.search(&mut ctx, maze, start, goal, None)
    }

    /// Like [find_path](Self::find_path), but calls `observer` after every expansion with a
    /// snapshot of the frontier and visited set.
    pub fn find_path_observed<F>(
        &self,
        maze: &Maze,
        start: Coord,
        goal: Coord,
        mut observer: F,
    ) -> Result<Option<Path>>
    where
        F: FnMut(&Snapshot),
    {
        let mut ctx = SearchContext::new();
        let observer: &mut dyn FnMut(&Snapshot) = &mut observer;
        self.search(&mut ctx, maze, start, goal, Some(observer))
    }

    /// Runs the search inside the given context, which is cleared first and holds the final
    /// frontier and visited set afterwards.
    pub fn search(
        &self,
        ctx: &mut SearchContext,
        maze: &Maze,
        start: Coord,
        goal: Coord,
        mut observer: Option<&mut dyn FnMut(&Snapshot)>,
    ) -> Result<Option<Path>> {
        maze.validate_endpoint(start)?;
        maze.validate_endpoint(goal)?;
        ctx.clear();

        let precheck = self.config.use_components && !maze.components_dirty;
        if precheck && !maze.reachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(None);
        }
        debug!("Searching path from {} to {}", start, goal);

        ctx.insert(start, 0, self.heuristic(&start, &goal), None, NodeState::Frontier)?;
        let mut iteration = 0;
        while let Some(index) = ctx.pop_best() {
            iteration += 1;
            let (coord, cost) = ctx
                .get_index(index)
                .map(|(c, n)| (c, n.cost))
                .ok_or_else(|| {
                    MazeError::InvariantViolation(format!("selected unknown node {index}"))
                })?;
            if coord == goal {
                if let Some(observer) = observer.as_mut() {
                    observer(&ctx.snapshot(iteration, coord));
                }
                let points = ctx.reconstruct(index).ok_or_else(|| {
                    error!("Goal {} is not connected to the start", goal);
                    MazeError::InvariantViolation(format!("goal {goal} is not connected to the start"))
                })?;
                debug!(
                    "Found path of cost {} after {} expansions ({} nodes seen)",
                    cost,
                    iteration,
                    ctx.len()
                );
                return Ok(Some(Path::new(points, cost)));
            }
            for neighbour in coord.neumann_neighborhood() {
                if !maze.can_move_to(neighbour) {
                    continue;
                }
                let h = self.heuristic(&neighbour, &goal);
                if let Relaxation::Improved { propagated, .. } = ctx.relax(index, neighbour, h)? {
                    if propagated > 0 {
                        debug!(
                            "Shorter route to {} lowered the cost of {} dependents",
                            neighbour, propagated
                        );
                    }
                }
            }
            if log_enabled!(Level::Trace) {
                trace!("open = {}", ctx.frontier().join(", "));
                trace!("close = {}", ctx.visited().join(", "));
            }
            if let Some(observer) = observer.as_mut() {
                observer(&ctx.snapshot(iteration, coord));
            }
        }
        if precheck {
            warn!("Reachable goal could not be pathed to, are the components correct?");
        } else {
            debug!("Frontier exhausted after {} expansions, no path", iteration);
        }
        Ok(None)
    }
}
