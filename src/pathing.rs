//! Shortest routes for the ghosts over the wrap-around maze.

use std::collections::BTreeSet;

use tracing::trace;

use crate::components::Direction;
use crate::level::{Cell, Grid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: usize,
    h: usize,
    row: usize,
    col: usize,
}

/// A* from `start` to `goal`. The route excludes `start` and ends on `goal`.
///
/// Returns an empty route when the goal is off the grid, inside a wall, equal to the start
/// or cut off from it. Column neighbours wrap, so the first and last column touch.
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell> {
    if grid.tile(start).is_none() || !grid.is_ghost_passable(goal) || start == goal {
        return Vec::new();
    }

    let cols = grid.cols();
    let index = |cell: Cell| cell.row * cols + cell.col;
    let mut g_score = vec![usize::MAX; grid.rows() * cols];
    let mut came_from: Vec<Option<Cell>> = vec![None; grid.rows() * cols];
    let mut closed = vec![false; grid.rows() * cols];
    let mut open_set = BTreeSet::new();

    let h = heuristic(grid, start, goal);
    g_score[index(start)] = 0;
    open_set.insert(OpenNode {
        f: h,
        h,
        row: start.row,
        col: start.col,
    });

    while let Some(node) = open_set.pop_first() {
        let current = Cell::new(node.row, node.col);
        if closed[index(current)] {
            continue;
        }
        if current == goal {
            return reconstruct(&came_from, cols, start, goal);
        }
        closed[index(current)] = true;

        let g = g_score[index(current)];
        for dir in Direction::ALL {
            let Some(next) = grid.neighbor(current, dir) else {
                continue;
            };
            if closed[index(next)] || !grid.is_ghost_passable(next) {
                continue;
            }
            let tentative = g + 1;
            if tentative < g_score[index(next)] {
                g_score[index(next)] = tentative;
                came_from[index(next)] = Some(current);
                let h = heuristic(grid, next, goal);
                open_set.insert(OpenNode {
                    f: tentative + h,
                    h,
                    row: next.row,
                    col: next.col,
                });
            }
        }
    }

    trace!(?start, ?goal, "no route");
    Vec::new()
}

fn heuristic(grid: &Grid, a: Cell, b: Cell) -> usize {
    a.row.abs_diff(b.row) + grid.col_distance(a.col, b.col)
}

fn reconstruct(came_from: &[Option<Cell>], cols: usize, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut route = vec![goal];
    let mut cell = goal;
    while let Some(prev) = came_from[cell.row * cols + cell.col] {
        if prev == start {
            break;
        }
        route.push(prev);
        cell = prev;
    }
    route.reverse();
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(lines: &[&str]) -> Grid {
        Grid::from_ascii(lines).unwrap()
    }

    fn is_adjacent(grid: &Grid, a: Cell, b: Cell) -> bool {
        Direction::ALL
            .into_iter()
            .any(|dir| grid.neighbor(a, dir) == Some(b))
    }

    #[test]
    fn straight_corridor() {
        let g = grid(&["#####", "#...#", "#####"]);
        let route = find_path(&g, Cell::new(1, 1), Cell::new(1, 3));
        assert_eq!(route, vec![Cell::new(1, 2), Cell::new(1, 3)]);
    }

    #[test]
    fn start_equal_to_goal_is_an_empty_route() {
        let g = grid(&["#####", "#...#", "#####"]);
        assert!(find_path(&g, Cell::new(1, 2), Cell::new(1, 2)).is_empty());
    }

    #[test]
    fn walled_off_goal_yields_nothing() {
        let g = grid(&["#######", "#..#..#", "#######"]);
        assert!(find_path(&g, Cell::new(1, 1), Cell::new(1, 5)).is_empty());
    }

    #[test]
    fn wall_and_off_grid_goals_are_rejected() {
        let g = grid(&["#####", "#...#", "#####"]);
        assert!(find_path(&g, Cell::new(1, 1), Cell::new(0, 0)).is_empty());
        assert!(find_path(&g, Cell::new(1, 1), Cell::new(9, 9)).is_empty());
        assert!(find_path(&g, Cell::new(9, 9), Cell::new(1, 1)).is_empty());
    }

    #[test]
    fn edge_columns_are_neighbours() {
        let g = grid(&["##########", "T........T", "##########"]);
        let route = find_path(&g, Cell::new(1, 0), Cell::new(1, 9));
        assert_eq!(route, vec![Cell::new(1, 9)]);

        let route = find_path(&g, Cell::new(1, 1), Cell::new(1, 8));
        assert_eq!(route.len(), 3);
        assert_eq!(route[0], Cell::new(1, 0));
    }

    #[test]
    fn routes_go_through_the_gate() {
        let g = grid(&["#####", "#...#", "##=##", "#...#", "#####"]);
        let route = find_path(&g, Cell::new(3, 2), Cell::new(1, 2));
        assert_eq!(route, vec![Cell::new(2, 2), Cell::new(1, 2)]);
    }

    #[test]
    fn routes_are_contiguous_and_open() {
        let g = grid(&[
            "##########",
            "#....#...#",
            "#.##.#.#.#",
            "#.#....#.#",
            "#...##...#",
            "##########",
        ]);
        let start = Cell::new(1, 1);
        let goal = Cell::new(1, 8);
        let route = find_path(&g, start, goal);
        assert_eq!(route.last(), Some(&goal));
        let mut prev = start;
        for &cell in &route {
            assert!(g.is_ghost_passable(cell));
            assert!(is_adjacent(&g, prev, cell), "{prev:?} -> {cell:?}");
            prev = cell;
        }
    }
}
