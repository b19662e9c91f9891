//! Free roaming for ghosts the player can currently eat.

use crate::components::Direction;
use crate::constants::{CELL_H, CELL_W, FRIGHTENED_SLOWDOWN, GHOST_OFFSET};
use crate::ghost::Ghost;
use crate::level::{Cell, Grid};
use crate::motion::{self, Position};

/// Keeps going while the way ahead is open, slightly slowed down. At a wall it turns toward
/// whichever open neighbour lands farthest from the player, reversing only when that is the
/// sole way out, and moves off at full speed.
pub fn free_roam(ghost: &mut Ghost, grid: &Grid, player: Position) {
    let Some(cell) = ghost.cell(grid) else {
        return;
    };
    let open = |dir: Direction| {
        grid.neighbor(cell, dir)
            .is_some_and(|next| grid.is_walkable(next))
    };

    if open(ghost.direction) {
        let speed = ghost.speed - FRIGHTENED_SLOWDOWN;
        step(&mut ghost.position, ghost.direction, speed);
    } else {
        let reverse = ghost.direction.opposite();
        let mut candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&dir| dir != reverse && open(dir))
            .collect();
        if candidates.is_empty() && open(reverse) {
            candidates.push(reverse);
        }
        let Some(best) = farthest_from(&candidates, ghost.position, player) else {
            return;
        };
        ghost.direction = best;
        align_across(&mut ghost.position, cell, best);
        step(&mut ghost.position, best, ghost.speed);
    }

    let heading = ghost.direction;
    motion::wrap_through_tunnel(
        &mut ghost.position,
        GHOST_OFFSET,
        heading,
        grid,
        &mut ghost.teleport_cooldown,
    );
    ghost.position.normalize_x(GHOST_OFFSET);
}

/// Ties go to the earliest candidate.
fn farthest_from(candidates: &[Direction], from: Position, player: Position) -> Option<Direction> {
    let mut best: Option<(Direction, f32)> = None;
    for &dir in candidates {
        let (dc, dr) = dir.delta();
        let probe = Position::new(from.x + dc as f32 * CELL_W, from.y + dr as f32 * CELL_H);
        let distance = probe.distance_sq(player);
        if best.map_or(true, |(_, d)| distance > d) {
            best = Some((dir, distance));
        }
    }
    best.map(|(dir, _)| dir)
}

fn align_across(pos: &mut Position, cell: Cell, heading: Direction) {
    let centre = Position::at_cell(cell, GHOST_OFFSET);
    if heading.is_horizontal() {
        pos.y = centre.y;
    } else {
        pos.x = centre.x;
    }
}

fn step(pos: &mut Position, dir: Direction, speed: f32) {
    let (dc, dr) = dir.delta();
    pos.x += dc as f32 * speed;
    pos.y += dr as f32 * speed;
}
