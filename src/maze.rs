use core::fmt;
use grid_util::{SimpleValueGrid, ValueGrid};
use itertools::Itertools;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::{clamp_size, DEFAULT_SIZE};

/// A cell coordinate on the maze, addressed as (row, column) with the origin in the top-left
/// corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }
    /// Number of orthogonal moves separating two positions on an open grid.
    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Tag of a single cell. Only [Empty](CellKind::Empty), [Obstacle](CellKind::Obstacle),
/// [Start](CellKind::Start) and [Goal](CellKind::Goal) are ever stored in a [Maze];
/// [Path](CellKind::Path) and [Visited](CellKind::Visited) are display tags derived from a
/// [SearchResult](crate::SearchResult).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Obstacle,
    Start,
    Goal,
    Path,
    Visited,
}

impl CellKind {
    pub fn symbol(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Obstacle => '#',
            CellKind::Start => 'S',
            CellKind::Goal => 'G',
            CellKind::Path => '*',
            CellKind::Visited => 'o',
        }
    }
}

/// What a drag-paint stroke writes into the cells it passes over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Brush {
    Obstacle,
    Erase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Marker {
    Start,
    Goal,
}

impl Marker {
    fn kind(self) -> CellKind {
        match self {
            Marker::Start => CellKind::Start,
            Marker::Goal => CellKind::Goal,
        }
    }
    fn other(self) -> Marker {
        match self {
            Marker::Start => Marker::Goal,
            Marker::Goal => Marker::Start,
        }
    }
}

/// [Maze] holds the persisted cell tags of a rectangular grid together with the start and goal
/// markers and a per-cell count of how often past searches visited a cell.
///
/// Every edit consumes the maze and returns the edited one, so a snapshot handed to a search can
/// never be changed underneath it. Mutators take positions that must satisfy
/// [is_in_bounds](Maze::is_in_bounds); this is checked in debug builds only.
#[derive(Clone, Debug)]
pub struct Maze {
    cells: SimpleValueGrid<CellKind>,
    visits: SimpleValueGrid<u32>,
    start: Option<Position>,
    goal: Option<Position>,
}

impl Default for Maze {
    fn default() -> Maze {
        Maze::new_empty(DEFAULT_SIZE)
    }
}

impl Maze {
    /// Creates a square maze of empty cells without start or goal. The size is clamped to
    /// [MIN_SIZE](crate::MIN_SIZE)..=[MAX_SIZE](crate::MAX_SIZE).
    pub fn new_empty(size: usize) -> Maze {
        let size = clamp_size(size);
        Maze {
            cells: SimpleValueGrid::new(size, size, CellKind::Empty),
            visits: SimpleValueGrid::new(size, size, 0),
            start: None,
            goal: None,
        }
    }
    pub fn rows(&self) -> usize {
        self.cells.height()
    }
    pub fn cols(&self) -> usize {
        self.cells.width()
    }
    pub fn start(&self) -> Option<Position> {
        self.start
    }
    pub fn goal(&self) -> Option<Position> {
        self.goal
    }
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows() && pos.col < self.cols()
    }
    /// The stored tag at `pos`, [None] outside the grid.
    pub fn cell(&self, pos: Position) -> Option<CellKind> {
        self.is_in_bounds(pos).then(|| self.kind_at(pos))
    }
    /// How many times past searches visited `pos`, [None] outside the grid.
    pub fn visit_count(&self, pos: Position) -> Option<u32> {
        self.is_in_bounds(pos)
            .then(|| self.visits.get(pos.col as i32, pos.row as i32))
    }
    /// Whether a search may step onto `pos`.
    pub fn can_move_to(&self, pos: Position) -> bool {
        self.is_in_bounds(pos) && self.kind_at(pos) != CellKind::Obstacle
    }

    /// The traversable orthogonal neighbours of `pos` in the fixed order up, right, down, left.
    pub fn neighbors(&self, pos: Position) -> SmallVec<[Position; 4]> {
        let Position { row, col } = pos;
        [
            row.checked_sub(1).map(|r| Position::new(r, col)),
            Some(Position::new(row, col + 1)),
            Some(Position::new(row + 1, col)),
            col.checked_sub(1).map(|c| Position::new(row, c)),
        ]
        .into_iter()
        .flatten()
        .filter(|p| self.can_move_to(*p))
        .collect()
    }

    /// Flips an empty cell to an obstacle and back. Start and goal cells are left untouched.
    pub fn toggle_obstacle(mut self, pos: Position) -> Maze {
        debug_assert!(self.is_in_bounds(pos));
        match self.kind_at(pos) {
            CellKind::Empty => self.put(pos, CellKind::Obstacle),
            CellKind::Obstacle => self.put(pos, CellKind::Empty),
            _ => {}
        }
        self
    }

    /// Writes the brush into `pos` regardless of its current tag, except over start and goal.
    pub fn paint(mut self, pos: Position, brush: Brush) -> Maze {
        debug_assert!(self.is_in_bounds(pos));
        match (self.kind_at(pos), brush) {
            (CellKind::Start | CellKind::Goal, _) => {}
            (_, Brush::Obstacle) => self.put(pos, CellKind::Obstacle),
            (_, Brush::Erase) => self.put(pos, CellKind::Empty),
        }
        self
    }

    /// Moves the start marker to `pos`. Refused on obstacles; placing it on the goal clears the
    /// goal.
    pub fn set_start(self, pos: Position) -> Maze {
        self.place_marker(pos, Marker::Start)
    }

    /// Moves the goal marker to `pos`. Refused on obstacles; placing it on the start clears the
    /// start.
    pub fn set_goal(self, pos: Position) -> Maze {
        self.place_marker(pos, Marker::Goal)
    }

    fn place_marker(mut self, pos: Position, marker: Marker) -> Maze {
        debug_assert!(self.is_in_bounds(pos));
        let current = self.kind_at(pos);
        if current == CellKind::Obstacle {
            return self;
        }
        if current == marker.other().kind() {
            *self.marker_slot(marker.other()) = None;
        }
        if let Some(previous) = self.marker_slot(marker).take() {
            if self.kind_at(previous) == marker.kind() {
                self.put(previous, CellKind::Empty);
            }
        }
        self.put(pos, marker.kind());
        *self.marker_slot(marker) = Some(pos);
        self
    }

    fn marker_slot(&mut self, marker: Marker) -> &mut Option<Position> {
        match marker {
            Marker::Start => &mut self.start,
            Marker::Goal => &mut self.goal,
        }
    }

    /// Rebuilds the maze as a `size` x `size` square (clamped like [new_empty](Maze::new_empty)),
    /// keeping the overlapping top-left region of cells and visit counts. Markers that fall
    /// outside the new bounds are dropped.
    pub fn resize(self, size: usize) -> Maze {
        let size = clamp_size(size);
        let mut resized = Maze::new_empty(size);
        for row in 0..self.rows().min(size) {
            for col in 0..self.cols().min(size) {
                let (x, y) = (col as i32, row as i32);
                resized.cells.set(x, y, self.cells.get(x, y));
                resized.visits.set(x, y, self.visits.get(x, y));
            }
        }
        let inside = |p: &Position| p.row < size && p.col < size;
        resized.start = self.start.filter(inside);
        resized.goal = self.goal.filter(inside);
        resized
    }

    /// Adds one to the visit count of every listed position, typically the `visited` trace of a
    /// finished search. Positions outside the grid are ignored.
    pub fn record_visits(mut self, visited: &[Position]) -> Maze {
        for &pos in visited {
            if !self.is_in_bounds(pos) {
                continue;
            }
            let (x, y) = (pos.col as i32, pos.row as i32);
            let count = self.visits.get(x, y);
            self.visits.set(x, y, count.saturating_add(1));
        }
        self
    }

    /// Dense index of `pos`, `row * cols + col`.
    pub(crate) fn index(&self, pos: Position) -> usize {
        pos.row * self.cols() + pos.col
    }
    pub(crate) fn position(&self, ix: usize) -> Position {
        Position::new(ix / self.cols(), ix % self.cols())
    }

    /// Builds a [UnionFind] over the dense cell indices joining orthogonally adjacent
    /// traversable cells.
    pub fn components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.rows() * self.cols());
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let pos = Position::new(row, col);
                if !self.can_move_to(pos) {
                    continue;
                }
                for next in [Position::new(row + 1, col), Position::new(row, col + 1)] {
                    if self.can_move_to(next) {
                        components.union(self.index(pos), self.index(next));
                    }
                }
            }
        }
        components
    }

    /// Checks whether an orthogonal path of traversable cells joins `a` and `b`.
    pub fn reachable(&self, a: Position, b: Position) -> bool {
        self.can_move_to(a)
            && self.can_move_to(b)
            && self.components().equiv(self.index(a), self.index(b))
    }

    fn kind_at(&self, pos: Position) -> CellKind {
        self.cells.get(pos.col as i32, pos.row as i32)
    }
    fn put(&mut self, pos: Position, kind: CellKind) {
        self.cells.set(pos.col as i32, pos.row as i32, kind);
    }
}

impl PartialEq for Maze {
    fn eq(&self, other: &Maze) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && self.start == other.start
            && self.goal == other.goal
            && (0..self.rows())
                .cartesian_product(0..self.cols())
                .map(|(row, col)| Position::new(row, col))
                .all(|p| {
                    self.kind_at(p) == other.kind_at(p)
                        && self.visit_count(p) == other.visit_count(p)
                })
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let line = (0..self.cols())
                .map(|col| self.kind_at(Position::new(row, col)).symbol())
                .join("");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_SIZE, MIN_SIZE};

    #[test]
    fn new_empty_clamps_size() {
        let small = Maze::new_empty(1);
        assert_eq!((small.rows(), small.cols()), (MIN_SIZE, MIN_SIZE));
        let large = Maze::new_empty(1000);
        assert_eq!((large.rows(), large.cols()), (MAX_SIZE, MAX_SIZE));
        assert!(large.start().is_none() && large.goal().is_none());
        assert_eq!(large.visit_count(Position::new(3, 3)), Some(0));
    }

    #[test]
    fn toggle_skips_markers() {
        let p = Position::new(1, 1);
        let maze = Maze::new_empty(5).set_start(p);
        let toggled = maze.clone().toggle_obstacle(p);
        assert_eq!(toggled, maze);
        assert_eq!(toggled.cell(p), Some(CellKind::Start));
    }

    #[test]
    fn start_refused_on_obstacle() {
        let wall = Position::new(2, 2);
        let maze = Maze::new_empty(5)
            .set_start(Position::new(0, 0))
            .toggle_obstacle(wall);
        let moved = maze.clone().set_start(wall);
        assert_eq!(moved, maze);
        assert_eq!(moved.start(), Some(Position::new(0, 0)));
    }

    #[test]
    fn moving_start_clears_previous_cell() {
        let maze = Maze::new_empty(5)
            .set_start(Position::new(0, 0))
            .set_start(Position::new(3, 1));
        assert_eq!(maze.cell(Position::new(0, 0)), Some(CellKind::Empty));
        assert_eq!(maze.cell(Position::new(3, 1)), Some(CellKind::Start));
        assert_eq!(maze.start(), Some(Position::new(3, 1)));
    }

    #[test]
    fn start_displaces_goal() {
        let p = Position::new(4, 4);
        let maze = Maze::new_empty(5)
            .set_goal(p)
            .set_start(Position::new(0, 0))
            .set_start(p);
        assert_eq!(maze.goal(), None);
        assert_eq!(maze.start(), Some(p));
        assert_eq!(maze.cell(Position::new(0, 0)), Some(CellKind::Empty));
    }

    #[test]
    fn paint_respects_markers() {
        let goal = Position::new(0, 1);
        let maze = Maze::new_empty(5)
            .set_goal(goal)
            .paint(goal, Brush::Obstacle)
            .paint(Position::new(1, 1), Brush::Obstacle)
            .paint(Position::new(1, 1), Brush::Obstacle)
            .paint(Position::new(2, 2), Brush::Erase);
        assert_eq!(maze.cell(goal), Some(CellKind::Goal));
        assert_eq!(maze.cell(Position::new(1, 1)), Some(CellKind::Obstacle));
        assert_eq!(maze.cell(Position::new(2, 2)), Some(CellKind::Empty));
    }

    /// Checks the canonical up, right, down, left order and the filtering of obstacles and edges.
    #[test]
    fn neighbour_order() {
        let maze = Maze::new_empty(5);
        let centre = Position::new(2, 2);
        assert_eq!(
            maze.neighbors(centre).to_vec(),
            vec![
                Position::new(1, 2),
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(2, 1)
            ]
        );
        assert_eq!(
            maze.neighbors(Position::new(0, 0)).to_vec(),
            vec![Position::new(0, 1), Position::new(1, 0)]
        );
        let maze = maze.toggle_obstacle(Position::new(2, 3));
        assert_eq!(
            maze.neighbors(centre).to_vec(),
            vec![Position::new(1, 2), Position::new(3, 2), Position::new(2, 1)]
        );
        let corner = Position::new(4, 4);
        assert_eq!(
            maze.neighbors(corner).to_vec(),
            vec![Position::new(3, 4), Position::new(4, 3)]
        );
    }

    #[test]
    fn resize_keeps_overlap() {
        let maze = Maze::new_empty(10)
            .set_start(Position::new(1, 1))
            .set_goal(Position::new(8, 8))
            .toggle_obstacle(Position::new(2, 3))
            .record_visits(&[Position::new(4, 4), Position::new(4, 4)]);
        let shrunk = maze.resize(6);
        assert_eq!((shrunk.rows(), shrunk.cols()), (6, 6));
        assert_eq!(shrunk.start(), Some(Position::new(1, 1)));
        assert_eq!(shrunk.goal(), None);
        assert_eq!(shrunk.cell(Position::new(2, 3)), Some(CellKind::Obstacle));
        assert_eq!(shrunk.visit_count(Position::new(4, 4)), Some(2));

        let grown = shrunk.resize(12);
        assert_eq!(grown.rows(), 12);
        assert_eq!(grown.cell(Position::new(1, 1)), Some(CellKind::Start));
        assert_eq!(grown.cell(Position::new(10, 10)), Some(CellKind::Empty));
        assert_eq!(grown.visit_count(Position::new(4, 4)), Some(2));
    }

    #[test]
    fn record_visits_ignores_out_of_bounds() {
        let maze = Maze::new_empty(5).record_visits(&[
            Position::new(0, 0),
            Position::new(7, 0),
            Position::new(0, 0),
        ]);
        assert_eq!(maze.visit_count(Position::new(0, 0)), Some(2));
        assert_eq!(maze.visit_count(Position::new(7, 0)), None);
    }

    /// Tests whether a wall splits the grid into separate components.
    #[test]
    fn test_component_generation() {
        // |..#..|
        // |..#..|
        // |..#..|
        // |..#..|
        // |..#..|
        let maze = (0..5).fold(Maze::new_empty(5), |m, row| {
            m.toggle_obstacle(Position::new(row, 2))
        });
        assert!(maze.reachable(Position::new(0, 0), Position::new(4, 1)));
        assert!(!maze.reachable(Position::new(0, 0), Position::new(0, 3)));
        assert!(!maze.reachable(Position::new(0, 0), Position::new(0, 2)));
        let opened = maze.toggle_obstacle(Position::new(4, 2));
        assert!(opened.reachable(Position::new(0, 0), Position::new(0, 4)));
    }

    #[test]
    fn display_uses_symbols() {
        let maze = Maze::new_empty(5)
            .set_start(Position::new(0, 0))
            .set_goal(Position::new(4, 4))
            .toggle_obstacle(Position::new(0, 1));
        let text = maze.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "S#...");
        assert_eq!(lines[4], "....G");
    }
}
