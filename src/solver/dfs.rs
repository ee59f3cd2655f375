use crate::maze::{Maze, Position};
use crate::search::{SearchContext, SearchResult};
use crate::solver::GridSolver;

/// Stack-based depth-first search. Finds a path, not necessarily the shortest one.
///
/// Neighbours are pushed in reverse of the canonical order (left, down, right, up) so that they
/// pop in up, right, down, left order. Like [BfsSolver](super::bfs::BfsSolver), positions are
/// marked when pushed.
#[derive(Clone, Debug)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    fn name(&self) -> &'static str {
        "DFS"
    }

    fn search_between(&self, maze: &Maze, start: Position, goal: Position) -> SearchResult {
        let mut ct = SearchContext::new(maze);
        let mut stack = vec![start];
        ct.mark(start);
        while let Some(node) = stack.pop() {
            ct.record_expansion(node);
            if node == goal {
                return ct.finish(Some(goal));
            }
            for successor in maze.neighbors(node).into_iter().rev() {
                if ct.mark(successor) {
                    ct.set_parent(successor, node);
                    stack.push(successor);
                }
            }
        }
        ct.finish(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// From the top-left corner the up neighbour is missing, so the run heads right along the
    /// first row.
    #[test]
    fn prefers_up_then_right() {
        let start = Position::new(0, 0);
        let maze = Maze::new_empty(5)
            .set_start(start)
            .set_goal(Position::new(0, 3));
        let result = DfsSolver.search(&maze);
        let expected: Vec<Position> = (0..4).map(|c| Position::new(0, c)).collect();
        assert_eq!(result.visited, expected);
        assert_eq!(result.path, expected);
    }

    #[test]
    fn path_may_be_longer_than_optimal() {
        // The run heads right along the first row before it ever turns down, so the goal below
        // the start is reached the long way round.
        let maze = Maze::new_empty(5)
            .set_start(Position::new(0, 0))
            .set_goal(Position::new(4, 0));
        let result = DfsSolver.search(&maze);
        assert!(result.found);
        assert!(result.path_cost().unwrap() > 4);
        assert_eq!(result.path.first(), Some(&Position::new(0, 0)));
        assert_eq!(result.path.last(), Some(&Position::new(4, 0)));
    }

    #[test]
    fn repeated_runs_match() {
        let maze = Maze::new_empty(7)
            .toggle_obstacle(Position::new(3, 3))
            .set_start(Position::new(6, 0))
            .set_goal(Position::new(0, 6));
        let first = DfsSolver.search(&maze);
        let second = DfsSolver.search(&maze);
        assert_eq!(first.path, second.path);
        assert_eq!(first.visited, second.visited);
    }
}
