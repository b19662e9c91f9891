//! Pixel-space movement along grid routes.
//!
//! Agents keep a continuous top-left sprite position. The cell an agent occupies is found by
//! adding its sprite offset and dividing by the cell size, so the offset has to be the same
//! everywhere a position is turned into a cell or a cell into a waypoint.

use crate::components::{Direction, Tile};
use crate::constants::{CELL_H, CELL_W, TELEPORT_COOLDOWN_TICKS, WAYPOINT_EPSILON, WIDTH};
use crate::level::{Cell, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Top-left position that puts the agent's centre on `cell`.
    pub fn at_cell(cell: Cell, offset: f32) -> Self {
        Self {
            x: cell.col as f32 * CELL_W + CELL_W / 2.0 - offset,
            y: cell.row as f32 * CELL_H + CELL_H / 2.0 - offset,
        }
    }

    /// `(row, col)` of the offset point, unbounded.
    pub fn grid_coords(&self, offset: f32) -> (i64, i64) {
        (
            ((self.y + offset) / CELL_H).floor() as i64,
            ((self.x + offset) / CELL_W).floor() as i64,
        )
    }

    pub fn cell(&self, grid: &Grid, offset: f32) -> Option<Cell> {
        let (row, col) = self.grid_coords(offset);
        grid.cell_at(row, col)
    }

    /// Like [`Position::cell`], but a point just past a side edge counts as the cell on the
    /// other side.
    pub fn wrapped_cell(&self, grid: &Grid, offset: f32) -> Option<Cell> {
        let (row, col) = self.grid_coords(offset);
        grid.cell_at(row, col.rem_euclid(grid.cols() as i64))
    }

    pub fn distance_sq(&self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Brings the offset point back inside the screen width after running past an edge.
    pub fn normalize_x(&mut self, offset: f32) {
        let centre = self.x + offset;
        if centre < 0.0 {
            self.x += WIDTH;
        } else if centre >= WIDTH {
            self.x -= WIDTH;
        }
    }
}

/// Cells still to visit and the index of the one being approached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    cells: Vec<Cell>,
    index: usize,
}

impl Route {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells, index: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.index >= self.cells.len()
    }

    pub fn waypoint(&self) -> Option<Cell> {
        self.cells.get(self.index).copied()
    }

    pub fn remaining(&self) -> &[Cell] {
        self.cells.get(self.index..).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.index = 0;
    }

    /// Heading across the wrap seam when the current waypoint is nearer that way round.
    pub fn seam_crossing(&self, pos: Position, offset: f32, cols: usize) -> Option<Direction> {
        let waypoint = self.waypoint()?;
        let (_, col) = pos.grid_coords(offset);
        let dc = waypoint.col as i64 - col.rem_euclid(cols as i64);
        let half = cols as i64 / 2;
        if dc > half {
            Some(Direction::Left)
        } else if dc < -half {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Moves `pos` toward the route's current waypoint by at most `speed` on each axis.
///
/// Arrival within two pixels on both axes moves on to the next cell; the route is cleared
/// once the last cell is reached. Returns the dominant direction of the step, if any.
pub fn advance(
    pos: &mut Position,
    route: &mut Route,
    speed: f32,
    offset: f32,
    cols: usize,
) -> Option<Direction> {
    let waypoint = route.waypoint()?;
    let mut target = Position::at_cell(waypoint, offset);
    match route.seam_crossing(*pos, offset, cols) {
        Some(Direction::Left) => target.x -= WIDTH,
        Some(Direction::Right) => target.x += WIDTH,
        _ => {}
    }

    let dx = (target.x - pos.x).clamp(-speed, speed);
    let dy = (target.y - pos.y).clamp(-speed, speed);
    pos.x += dx;
    pos.y += dy;

    if (target.x - pos.x).abs() <= WAYPOINT_EPSILON && (target.y - pos.y).abs() <= WAYPOINT_EPSILON
    {
        route.index += 1;
        if route.is_empty() {
            route.clear();
        }
    }

    heading_of(dx, dy)
}

pub fn heading_of(dx: f32, dy: f32) -> Option<Direction> {
    if dx == 0.0 && dy == 0.0 {
        None
    } else if dx.abs() >= dy.abs() {
        Some(if dx < 0.0 { Direction::Left } else { Direction::Right })
    } else {
        Some(if dy < 0.0 { Direction::Up } else { Direction::Down })
    }
}

/// Snaps an agent standing on a tunnel tile to the opposite edge.
///
/// Fires only once the cooldown has run out and the agent is within one cell of the edge it
/// is heading for; the cooldown restarts on every jump.
pub fn wrap_through_tunnel(
    pos: &mut Position,
    offset: f32,
    heading: Direction,
    grid: &Grid,
    cooldown: &mut u32,
) -> bool {
    if *cooldown < TELEPORT_COOLDOWN_TICKS {
        return false;
    }
    let (row, col) = pos.grid_coords(offset);
    let col = col.rem_euclid(grid.cols() as i64);
    if grid.tile_at(row, col) != Some(Tile::Tunnel) {
        return false;
    }
    let centre = pos.x + offset;
    let landing = match heading {
        Direction::Left if centre < CELL_W => WIDTH - CELL_W / 2.0,
        Direction::Right if centre > WIDTH - CELL_W => CELL_W / 2.0,
        _ => return false,
    };
    pos.x = landing - offset;
    *cooldown = 0;
    true
}
