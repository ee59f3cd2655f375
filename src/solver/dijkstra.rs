use crate::maze::{Maze, Position};
use crate::search::SearchResult;
use crate::solver::{best_first, GridSolver};

/// Uniform-cost search: A* with the heuristic fixed at zero.
#[derive(Clone, Debug)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn search_between(&self, maze: &Maze, start: Position, goal: Position) -> SearchResult {
        best_first(maze, start, goal, |_| 0usize)
    }
}
