use std::collections::VecDeque;

use crate::maze::{Maze, Position};
use crate::search::{SearchContext, SearchResult};
use crate::solver::GridSolver;

/// Breadth-first search. Positions are marked when enqueued, so the frontier never holds a
/// position twice and no position is reopened.
#[derive(Clone, Debug)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn name(&self) -> &'static str {
        "BFS"
    }

    fn search_between(&self, maze: &Maze, start: Position, goal: Position) -> SearchResult {
        let mut ct = SearchContext::new(maze);
        let mut queue = VecDeque::from([start]);
        ct.mark(start);
        while let Some(node) = queue.pop_front() {
            ct.record_expansion(node);
            if node == goal {
                return ct.finish(Some(goal));
            }
            for successor in maze.neighbors(node) {
                if ct.mark(successor) {
                    ct.set_parent(successor, node);
                    queue.push_back(successor);
                }
            }
        }
        ct.finish(None)
    }
}
