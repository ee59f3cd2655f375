use core::fmt;
use std::collections::BinaryHeap;
use std::str::FromStr;

use log::{debug, info, warn};
use num_traits::{One, Zero};

use crate::maze::{Maze, Position};
use crate::search::{SearchContext, SearchResult, SmallestCostHolder};

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;

use astar::AstarSolver;
use bfs::BfsSolver;
use dfs::DfsSolver;
use dijkstra::DijkstraSolver;

pub trait GridSolver {
    /// Label used in log output.
    fn name(&self) -> &'static str;

    /// Runs the search between two set endpoints. A [Maze] never holds start and goal on the
    /// same cell, so this is the only way to search with `start == goal`.
    fn search_between(&self, maze: &Maze, start: Position, goal: Position) -> SearchResult;

    /// Searches from the maze's start to its goal. If either is unset, returns the empty
    /// not-found result without searching.
    fn search(&self, maze: &Maze) -> SearchResult {
        let (Some(start), Some(goal)) = (maze.start(), maze.goal()) else {
            info!("{}: start or goal not set, skipping search", self.name());
            return SearchResult::default();
        };
        let result = self.search_between(maze, start, goal);
        debug!(
            "{}: {} -> {} found={} expanded={} in {:.3} ms",
            self.name(),
            start,
            goal,
            result.found,
            result.nodes_expanded,
            result.elapsed_ms
        );
        result
    }
}

/// Best-first search over unit-cost moves, ordering the frontier by cost so far plus
/// `heuristic`. Entries are only pushed on strict improvement and a position is expanded at most
/// once, so `visited` holds no duplicates.
pub(crate) fn best_first<C, FH>(
    maze: &Maze,
    start: Position,
    goal: Position,
    mut heuristic: FH,
) -> SearchResult
where
    C: Zero + One + Ord + Copy,
    FH: FnMut(&Position) -> C,
{
    let mut ct = SearchContext::new(maze);
    let mut costs: Vec<Option<C>> = vec![None; maze.rows() * maze.cols()];
    let mut to_see = BinaryHeap::new();
    let mut seq = 0;
    costs[ct.index(start)] = Some(Zero::zero());
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(&start),
        cost: Zero::zero(),
        seq,
        node: start,
    });
    while let Some(SmallestCostHolder { cost, node, .. }) = to_see.pop() {
        // We may have pushed a position several times if a cheaper route turned up later.
        if costs[ct.index(node)].is_some_and(|best| cost > best) || !ct.mark(node) {
            continue;
        }
        ct.record_expansion(node);
        if node == goal {
            return ct.finish(Some(goal));
        }
        for successor in maze.neighbors(node) {
            if ct.is_marked(successor) {
                continue;
            }
            let new_cost = cost + One::one();
            let ix = ct.index(successor);
            if costs[ix].is_some_and(|old| old <= new_cost) {
                continue;
            }
            costs[ix] = Some(new_cost);
            ct.set_parent(successor, node);
            seq += 1;
            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + heuristic(&successor),
                cost: new_cost,
                seq,
                node: successor,
            });
        }
    }
    ct.finish(None)
}

/// The four strategies a caller can select by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    AStar,
    Dijkstra,
    Bfs,
    Dfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    /// The selector string naming this algorithm.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::AStar => "A*",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
        }
    }

    /// Whether the returned path is guaranteed to use the fewest moves.
    pub fn is_optimal(self) -> bool {
        !matches!(self, Algorithm::Dfs)
    }

    pub fn search(self, maze: &Maze) -> SearchResult {
        match self {
            Algorithm::AStar => AstarSolver.search(maze),
            Algorithm::Dijkstra => DijkstraSolver.search(maze),
            Algorithm::Bfs => BfsSolver.search(maze),
            Algorithm::Dfs => DfsSolver.search(maze),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A selector string that names none of the [Algorithm]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown search algorithm {:?}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    /// Exact, case-sensitive match on [name](Algorithm::name).
    fn from_str(s: &str) -> Result<Algorithm, UnknownAlgorithm> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
    }
}

/// Runs the algorithm named `algorithm` ("A*", "Dijkstra", "BFS" or "DFS") on `maze`. Any other
/// name yields the empty not-found result.
pub fn run_search(maze: &Maze, algorithm: &str) -> SearchResult {
    match algorithm.parse::<Algorithm>() {
        Ok(selected) => selected.search(maze),
        Err(e) => {
            warn!("{}", e);
            SearchResult::default()
        }
    }
}
