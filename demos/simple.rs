use maze_pathfinding::{run_search, Algorithm, Maze, Position};

// In this example every algorithm searches a 6x6 maze with shape
//  ______
// |S.....|
// |####..|
// |......|
// |.#####|
// |......|
// |.....G|
//  ______
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// Run with RUST_LOG=debug to see the search log.

fn main() {
    env_logger::init();
    let walls = [(1, 0), (1, 1), (1, 2), (1, 3), (3, 1), (3, 2), (3, 3), (3, 4), (3, 5)];
    let maze = walls
        .into_iter()
        .fold(Maze::new_empty(6), |m, (r, c)| {
            m.toggle_obstacle(Position::new(r, c))
        })
        .set_start(Position::new(0, 0))
        .set_goal(Position::new(5, 5));
    println!("{}", maze);
    let mut history = maze.clone();
    for algorithm in Algorithm::ALL {
        let result = run_search(&maze, algorithm.name());
        println!(
            "{:<8} found={} moves={:?} expanded={} time={:.3} ms",
            algorithm.name(),
            result.found,
            result.path_cost(),
            result.nodes_expanded,
            result.elapsed_ms
        );
        for row in 0..maze.rows() {
            let line: String = (0..maze.cols())
                .map(|col| result.overlay(&maze, Position::new(row, col), None).symbol())
                .collect();
            println!("  {}", line);
        }
        history = history.record_visits(&result.visited);
    }
    println!(
        "Start was visited {} times across all runs",
        history.visit_count(Position::new(0, 0)).unwrap_or(0)
    );
}
