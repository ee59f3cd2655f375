//! # maze_pathfinding
//!
//! The search engine behind an interactive maze editor. A [Maze] is a square grid of cells that
//! are empty, blocked, or hold the start or goal marker; edits consume the maze and return the
//! edited copy. Four classical searches run on a maze snapshot:
//!
//! - [A*](solver::astar::AstarSolver) with the Manhattan heuristic
//! - [Dijkstra](solver::dijkstra::DijkstraSolver), i.e. A* without heuristic
//! - [breadth-first search](solver::bfs::BfsSolver)
//! - [depth-first search](solver::dfs::DfsSolver)
//!
//! Movement is 4-directional with unit cost. Every search returns a [SearchResult] carrying the
//! path, the expansion order for replay, the expansion count and the elapsed time.
//!
//! ```
//! use maze_pathfinding::{run_search, Maze, Position};
//!
//! let maze = Maze::new_empty(5)
//!     .set_start(Position::new(0, 0))
//!     .set_goal(Position::new(4, 4));
//! let result = run_search(&maze, "A*");
//! assert_eq!(result.path.len(), 9);
//! ```
pub mod maze;
pub mod search;
pub mod solver;

pub use maze::{Brush, CellKind, Maze, Position};
pub use search::SearchResult;
pub use solver::{run_search, Algorithm, GridSolver, UnknownAlgorithm};

/// Smallest side length of a maze.
pub const MIN_SIZE: usize = 5;
/// Largest side length of a maze.
pub const MAX_SIZE: usize = 20;
pub const DEFAULT_SIZE: usize = 10;

/// Clamps a requested side length to `MIN_SIZE..=MAX_SIZE`.
pub fn clamp_size(size: usize) -> usize {
    size.clamp(MIN_SIZE, MAX_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping() {
        assert_eq!(clamp_size(0), MIN_SIZE);
        assert_eq!(clamp_size(12), 12);
        assert_eq!(clamp_size(usize::MAX), MAX_SIZE);
        assert_eq!(Maze::default().rows(), DEFAULT_SIZE);
    }
}
