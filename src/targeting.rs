//! Goal selection for each ghost role.
//!
//! A strategy only picks the cell to head for; [`crate::pathing::find_path`] turns it into a
//! route. `None` means the ghost has no interest in moving yet and keeps whatever route it has.

use crate::components::Direction;
use crate::constants::{
    CLYDE_FLEE_RADIUS_SQ, CLYDE_SCORE_THRESHOLD, INKY_LOOKAHEAD, INKY_PELLET_THRESHOLD,
    PINKY_CHASE_RADIUS_SQ, PINKY_LOOKAHEAD,
};
use crate::ghost::GhostKind;
use crate::level::{Cell, Grid};

/// Read-only view of the world a strategy decides from.
#[derive(Debug, Clone, Copy)]
pub struct TargetContext<'a> {
    pub grid: &'a Grid,
    pub ghost_cell: Cell,
    pub player_cell: Cell,
    pub player_direction: Direction,
    pub blinky_cell: Cell,
    pub score: u32,
    pub pellets_eaten: u32,
    pub flee_corner: Cell,
}

impl TargetContext<'_> {
    fn distance_sq_to_player(&self) -> i64 {
        let dr = self.ghost_cell.row as i64 - self.player_cell.row as i64;
        let dc = self.ghost_cell.col as i64 - self.player_cell.col as i64;
        dr * dr + dc * dc
    }

    /// `(row, col)` `steps` cells ahead of the player, unbounded.
    fn ahead_of_player(&self, steps: i64) -> (i64, i64) {
        let (dc, dr) = self.player_direction.delta();
        (
            self.player_cell.row as i64 + dr * steps,
            self.player_cell.col as i64 + dc * steps,
        )
    }

    fn open_cell(&self, row: i64, col: i64) -> Option<Cell> {
        self.grid
            .cell_at(row, col)
            .filter(|&cell| self.grid.is_walkable(cell))
    }
}

pub trait TargetStrategy {
    fn compute_goal(&self, ctx: &TargetContext<'_>) -> Option<Cell>;
}

/// Heads straight for the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectChase;

impl TargetStrategy for DirectChase {
    fn compute_goal(&self, ctx: &TargetContext<'_>) -> Option<Cell> {
        Some(ctx.player_cell)
    }
}

/// Chases up close, otherwise aims a few cells ahead of the player.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ambush;

impl TargetStrategy for Ambush {
    fn compute_goal(&self, ctx: &TargetContext<'_>) -> Option<Cell> {
        if ctx.distance_sq_to_player() <= PINKY_CHASE_RADIUS_SQ {
            return Some(ctx.player_cell);
        }
        // Walk back along the player's heading to the farthest open cell; zero steps is the
        // player's own cell.
        (0..=PINKY_LOOKAHEAD)
            .rev()
            .find_map(|steps| {
                let (row, col) = ctx.ahead_of_player(steps);
                ctx.open_cell(row, col)
            })
            .or(Some(ctx.player_cell))
    }
}

/// Idle until the score threshold, then alternates between chasing and retreating to a corner.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdFlee;

impl TargetStrategy for ThresholdFlee {
    fn compute_goal(&self, ctx: &TargetContext<'_>) -> Option<Cell> {
        if ctx.score < CLYDE_SCORE_THRESHOLD {
            return None;
        }
        if ctx.distance_sq_to_player() <= CLYDE_FLEE_RADIUS_SQ {
            Some(ctx.flee_corner)
        } else {
            Some(ctx.player_cell)
        }
    }
}

/// Idle until enough pellets are eaten, then mirrors Blinky through a point ahead of the
/// player to close in from the other side.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorAmbush;

impl TargetStrategy for VectorAmbush {
    fn compute_goal(&self, ctx: &TargetContext<'_>) -> Option<Cell> {
        if ctx.pellets_eaten < INKY_PELLET_THRESHOLD {
            return None;
        }
        let (ahead_row, ahead_col) = ctx.ahead_of_player(INKY_LOOKAHEAD);
        let row = 2 * ahead_row - ctx.blinky_cell.row as i64;
        let col = 2 * ahead_col - ctx.blinky_cell.col as i64;

        let goal = if ctx.grid.cell_at(row, col).is_some() {
            ctx.open_cell(row, col).or_else(|| ring_search(ctx, row, col))
        } else {
            edge_scan(ctx, row, col)
        };
        goal.or(Some(ctx.player_cell))
    }
}

/// First open cell on the Chebyshev rings around `(row, col)`, nearest ring first.
fn ring_search(ctx: &TargetContext<'_>, row: i64, col: i64) -> Option<Cell> {
    let max_radius = ctx.grid.rows().max(ctx.grid.cols()) as i64;
    (1..max_radius).find_map(|radius| {
        (-radius..=radius).find_map(|dr| {
            (-radius..=radius)
                .filter(|&dc| dr.abs() == radius || dc.abs() == radius)
                .find_map(|dc| ctx.open_cell(row + dr, col + dc))
        })
    })
}

/// For a target past the grid edge: scan its column from the crossed edge toward the ghost's
/// row, then its row from the crossed edge toward the ghost's column.
fn edge_scan(ctx: &TargetContext<'_>, row: i64, col: i64) -> Option<Cell> {
    let rows = ctx.grid.rows() as i64;
    let cols = ctx.grid.cols() as i64;
    let ghost_row = ctx.ghost_cell.row as i64;
    let ghost_col = ctx.ghost_cell.col as i64;

    let vertical = if row < 0 {
        (0..=ghost_row).find_map(|r| ctx.open_cell(r, col))
    } else if row >= rows {
        (ghost_row..rows).rev().find_map(|r| ctx.open_cell(r, col))
    } else {
        None
    };
    vertical.or_else(|| {
        if col < 0 {
            (0..=ghost_col).find_map(|c| ctx.open_cell(row, c))
        } else if col >= cols {
            (ghost_col..cols).rev().find_map(|c| ctx.open_cell(row, c))
        } else {
            None
        }
    })
}

impl TargetStrategy for GhostKind {
    fn compute_goal(&self, ctx: &TargetContext<'_>) -> Option<Cell> {
        match self {
            GhostKind::Blinky => DirectChase.compute_goal(ctx),
            GhostKind::Pinky => Ambush.compute_goal(ctx),
            GhostKind::Inky => VectorAmbush.compute_goal(ctx),
            GhostKind::Clyde => ThresholdFlee.compute_goal(ctx),
        }
    }
}
