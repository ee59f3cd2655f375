use std::cmp::Ordering;
use std::time::Instant;

use crate::maze::{CellKind, Maze, Position};

const NO_PARENT: usize = usize::MAX;

/// Outcome of a single search run.
///
/// `visited` lists positions in the exact order they were expanded, which is the order a UI
/// replays them in. `path` runs from start to goal inclusive and is empty when the goal could not
/// be reached or the search never ran.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub path: Vec<Position>,
    pub visited: Vec<Position>,
    pub nodes_expanded: usize,
    pub elapsed_ms: f64,
    pub found: bool,
}

impl SearchResult {
    /// Number of moves along the path, [None] if no path was found.
    pub fn path_cost(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }

    /// The tag a renderer shows at `pos`: start and goal always win, then path membership, then
    /// membership of the first `step` entries of `visited` (all of them for [None]), otherwise
    /// the stored tag.
    pub fn overlay(&self, maze: &Maze, pos: Position, step: Option<usize>) -> CellKind {
        let base = maze.cell(pos).unwrap_or_default();
        if matches!(base, CellKind::Start | CellKind::Goal) {
            return base;
        }
        if self.path.contains(&pos) {
            return CellKind::Path;
        }
        let shown = step.map_or(self.visited.len(), |s| s.min(self.visited.len()));
        if self.visited[..shown].contains(&pos) {
            CellKind::Visited
        } else {
            base
        }
    }
}

/// Per-search bookkeeping shared by all solvers: a dense predecessor map, a dense mark set, the
/// expansion trace and the wall-clock timer.
pub(crate) struct SearchContext<'a> {
    maze: &'a Maze,
    parents: Vec<usize>,
    marked: Vec<bool>,
    visited: Vec<Position>,
    started: Instant,
}

impl<'a> SearchContext<'a> {
    pub fn new(maze: &'a Maze) -> SearchContext<'a> {
        let n = maze.rows() * maze.cols();
        SearchContext {
            maze,
            parents: vec![NO_PARENT; n],
            marked: vec![false; n],
            visited: Vec::new(),
            started: Instant::now(),
        }
    }
    pub fn index(&self, pos: Position) -> usize {
        self.maze.index(pos)
    }
    /// Marks `pos`, returning [true] if it was not marked before.
    pub fn mark(&mut self, pos: Position) -> bool {
        let ix = self.index(pos);
        !std::mem::replace(&mut self.marked[ix], true)
    }
    pub fn is_marked(&self, pos: Position) -> bool {
        self.marked[self.index(pos)]
    }
    pub fn set_parent(&mut self, node: Position, parent: Position) {
        let ix = self.index(node);
        self.parents[ix] = self.index(parent);
    }
    pub fn record_expansion(&mut self, pos: Position) {
        self.visited.push(pos);
    }

    /// Walks the predecessor map back from `goal` and reverses the result.
    fn reconstruct_path(&self, goal: Position) -> Vec<Position> {
        let mut path: Vec<Position> = std::iter::successors(Some(self.index(goal)), |&ix| {
            Some(self.parents[ix]).filter(|&p| p != NO_PARENT)
        })
        .map(|ix| self.maze.position(ix))
        .collect();
        path.reverse();
        path
    }

    /// Closes the search. `reached` is the goal if it was expanded.
    pub fn finish(self, reached: Option<Position>) -> SearchResult {
        let path = reached
            .map(|goal| self.reconstruct_path(goal))
            .unwrap_or_default();
        SearchResult {
            found: !path.is_empty(),
            path,
            nodes_expanded: self.visited.len(),
            visited: self.visited,
            elapsed_ms: self.started.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

/// Frontier entry of the best-first searches. The [BinaryHeap](std::collections::BinaryHeap)
/// is a max-heap, so the ordering is reversed on the estimate.
pub(crate) struct SmallestCostHolder<K> {
    pub estimated_cost: K,
    pub cost: K,
    pub seq: usize,
    pub node: Position,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.seq == other.seq
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then favours the deeper entry, then the older one
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
