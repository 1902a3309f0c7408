use maze_pathfinding::{Maze, Pathfinder, SearchConfig};

// The heuristic_factor scales the Manhattan heuristic, causing cells that are closer to the goal
// (ignoring obstacles) to be expanded sooner than in normal operation. This is called Weighted A*.
// Cells can then be closed before their cheapest route is known; the pathfinder lowers their cost
// afterwards and propagates the improvement, which is logged at debug level.
fn main() {
    env_logger::init();
    let maze: Maze = "\
S.........
.XXXXXXXX.
.X......X.
.X.XXXX.X.
...X..X...
XXXX.GX.XX
.....XX...
.........."
        .parse()
        .unwrap();
    for heuristic_factor in [1.0, 1.5, 3.0] {
        let pathfinder = Pathfinder::with_config(SearchConfig {
            heuristic_factor,
            ..SearchConfig::default()
        });
        let mut expansions = 0;
        let (start, goal) = maze.endpoints().unwrap();
        let path = pathfinder
            .find_path_observed(&maze, start, goal, |_| expansions += 1)
            .unwrap();
        match path {
            Some(path) => println!(
                "factor {heuristic_factor}: {} steps after {expansions} expansions",
                path.cost
            ),
            None => println!("factor {heuristic_factor}: no path"),
        }
    }
}
