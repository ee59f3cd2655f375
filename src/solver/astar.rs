use crate::maze::{Maze, Position};
use crate::search::SearchResult;
use crate::solver::{best_first, GridSolver};

/// A* with the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) heuristic,
/// which is admissible and consistent for unit-cost orthogonal moves.
#[derive(Clone, Debug)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn heuristic(&self, p1: &Position, p2: &Position) -> usize {
        p1.manhattan_distance(p2)
    }
}

impl GridSolver for AstarSolver {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn search_between(&self, maze: &Maze, start: Position, goal: Position) -> SearchResult {
        best_first(maze, start, goal, |p| self.heuristic(p, &goal))
    }
}
