//! Text and HTML presentation of mazes and paths. Everything is returned as strings; nothing is
//! printed.
use crate::coord::{Coord, Direction};
use crate::maze::{Cell, Maze};
use crate::path::Path;
use core::fmt::Write;
use fxhash::FxHashSet;
use itertools::Itertools;

fn digits(n: usize) -> usize {
    n.max(1).ilog10() as usize + 1
}

fn path_cells(path: Option<&Path>) -> FxHashSet<Coord> {
    path.map(|p| p.points.iter().copied().collect())
        .unwrap_or_default()
}

fn symbol(cell: Cell, on_path: bool) -> char {
    match cell {
        Cell::Open if on_path => '*',
        Cell::Open => '-',
        Cell::Blocked => 'X',
        Cell::Start => 'S',
        Cell::Goal => 'G',
    }
}

/// Renders the maze with row numbers on the left and column numbers below. Open cells on the
/// path are drawn as `*`.
pub fn render_text(maze: &Maze, path: Option<&Path>) -> String {
    let on_path = path_cells(path);
    let rw = digits(maze.rows() - 1);
    let cw = digits(maze.cols() - 1);
    let mut out = String::new();
    for (r, row) in maze.iter_rows().enumerate() {
        let _ = write!(out, "{:>rw$}", r);
        for (c, cell) in row.iter().enumerate() {
            let coord = Coord::new(r as i32, c as i32);
            let _ = write!(out, " {:>cw$}", symbol(*cell, on_path.contains(&coord)));
        }
        out.push('\n');
    }
    let _ = write!(out, "{:>rw$}", "");
    for c in 0..maze.cols() {
        let _ = write!(out, " {:>cw$}", c);
    }
    out.push('\n');
    out
}

/// Renders the maze as a sequence of `<span>` squares, one line per row separated by `<br>`,
/// with the path highlighted in green.
pub fn render_html(maze: &Maze, path: Option<&Path>) -> String {
    let on_path = path_cells(path);
    let mut out = String::new();
    for (r, row) in maze.iter_rows().enumerate() {
        let _ = write!(out, "<span class='square number'>{}</span>", r);
        for (c, cell) in row.iter().enumerate() {
            let coord = Coord::new(r as i32, c as i32);
            let class = match cell {
                Cell::Open if on_path.contains(&coord) => "green square",
                Cell::Open => "white square",
                Cell::Blocked => "black square",
                Cell::Start | Cell::Goal => "grey square",
            };
            let _ = write!(
                out,
                "<span class='{}'>{}</span>",
                class,
                symbol(*cell, on_path.contains(&coord))
            );
        }
        out.push_str("<br>");
    }
    out.push_str("<span class='square white number'>-</span>");
    for c in 0..maze.cols() {
        let _ = write!(out, "<span class='square number'>{}</span>", c);
    }
    out
}

/// The path as `(r,c) - (r,c) - ...`.
pub fn path_trail(path: &Path) -> String {
    path.points.iter().join(" - ")
}

/// One human readable line per path cell: where the path starts, every step taken and where it
/// ends.
pub fn describe_path(path: &Path) -> Vec<String> {
    let Some(start) = path.start() else {
        return Vec::new();
    };
    let mut lines = vec![format!("Start at {}", start)];
    let n = path.len();
    for (i, (from, to)) in path.points.iter().tuple_windows().enumerate() {
        if i + 2 == n {
            lines.push(format!("Goal at {}", to));
        } else {
            match Direction::between(from, to) {
                Some(dir) => lines.push(format!("One step {}: {}", dir, to)),
                None => lines.push(format!("Move to {}", to)),
            }
        }
    }
    lines
}

/// Full text report of a search: the maze, then either the annotated solution with its steps or
/// `No solution`.
pub fn render_report(maze: &Maze, path: Option<&Path>) -> String {
    let mut out = render_text(maze, None);
    out.push('\n');
    match path {
        Some(path) => {
            let _ = writeln!(out, "Path: {}", path_trail(path));
            for line in describe_path(path) {
                let _ = writeln!(out, "{}", line);
            }
            out.push('\n');
            out.push_str(&render_text(maze, Some(path)));
        }
        None => out.push_str("No solution\n"),
    }
    out
}
