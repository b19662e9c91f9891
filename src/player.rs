use crate::components::Direction;
use crate::constants::{PLAYER_OFFSET, PLAYER_SPEED, PLAYER_WRAP_INSET, WIDTH};
use crate::level::{Cell, Grid};
use crate::motion::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// The move was refused by a wall; the player stays put until a new direction is chosen.
    Blocked,
    /// Crossed a screen edge and reappeared on the other side.
    Wrapped,
    Idle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Position,
    pub direction: Direction,
    pub blocked: bool,
    /// Plain pellets eaten since the level started.
    pub pellets_eaten: u32,
    spawn: Position,
}

impl Player {
    pub fn new(spawn: Cell) -> Self {
        let spawn = Position::at_cell(spawn, PLAYER_OFFSET);
        Self {
            position: spawn,
            direction: Direction::Right,
            blocked: false,
            pellets_eaten: 0,
            spawn,
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.blocked = false;
    }

    /// Back to the spawn point after being caught. The pellet counter survives.
    pub fn respawn(&mut self) {
        self.position = self.spawn;
        self.blocked = false;
    }

    pub fn cell(&self, grid: &Grid) -> Option<Cell> {
        self.position.wrapped_cell(grid, PLAYER_OFFSET)
    }

    pub fn step(&mut self, grid: &Grid) -> StepOutcome {
        if self.blocked {
            return StepOutcome::Idle;
        }
        let (dc, dr) = self.direction.delta();
        let next = Position::new(
            self.position.x + dc as f32 * PLAYER_SPEED,
            self.position.y + dr as f32 * PLAYER_SPEED,
        );
        let (row, col) = next.grid_coords(PLAYER_OFFSET);
        let col_on_grid = col >= 0 && (col as usize) < grid.cols();
        let open = if col_on_grid {
            grid.tile_at(row, col).is_some_and(|t| t.is_walkable())
        } else {
            row >= 0 && (row as usize) < grid.rows()
        };
        if !open {
            self.blocked = true;
            return StepOutcome::Blocked;
        }
        self.position = next;

        let centre = self.position.x + PLAYER_OFFSET;
        if centre <= 0.0 {
            self.position.x = WIDTH - PLAYER_WRAP_INSET - PLAYER_OFFSET;
            StepOutcome::Wrapped
        } else if centre >= WIDTH {
            self.position.x = PLAYER_WRAP_INSET - PLAYER_OFFSET;
            StepOutcome::Wrapped
        } else {
            StepOutcome::Moved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn walks_along_a_corridor() {
        let grid = Level::builtin(0).unwrap().grid;
        let mut player = Player::new(Cell::new(5, 5));
        let x = player.position.x;
        assert_eq!(player.step(&grid), StepOutcome::Moved);
        assert_eq!(player.position.x, x + PLAYER_SPEED);
    }

    #[test]
    fn wall_sets_blocked_until_a_new_direction() {
        let grid = Level::builtin(0).unwrap().grid;
        // Row 5 is an open corridor with the outer wall at column 29.
        let mut player = Player::new(Cell::new(5, 28));
        let mut outcome = StepOutcome::Moved;
        for _ in 0..20 {
            outcome = player.step(&grid);
            if outcome == StepOutcome::Blocked {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::Blocked);
        assert!(player.blocked);
        assert_eq!(player.step(&grid), StepOutcome::Idle);

        player.set_direction(Direction::Left);
        assert!(!player.blocked);
        assert_eq!(player.step(&grid), StepOutcome::Moved);
    }

    #[test]
    fn gate_blocks_the_player() {
        let grid = Level::builtin(0).unwrap().grid;
        // Blinky's spawn sits right above the pen gate.
        let mut player = Player::new(Cell::new(11, 14));
        player.set_direction(Direction::Down);
        let mut blocked = false;
        for _ in 0..30 {
            if player.step(&grid) == StepOutcome::Blocked {
                blocked = true;
                break;
            }
        }
        assert!(blocked);
        assert_eq!(player.cell(&grid), Some(Cell::new(11, 14)));
    }

    #[test]
    fn tunnel_wraps_to_the_far_side() {
        let grid = Level::builtin(0).unwrap().grid;
        let mut player = Player::new(Cell::new(14, 1));
        player.set_direction(Direction::Left);
        let mut wrapped = false;
        for _ in 0..40 {
            if player.step(&grid) == StepOutcome::Wrapped {
                wrapped = true;
                break;
            }
        }
        assert!(wrapped);
        assert_eq!(player.position.x + PLAYER_OFFSET, WIDTH - PLAYER_WRAP_INSET);
        assert_eq!(player.cell(&grid), Some(Cell::new(14, 29)));
    }

    #[test]
    fn respawn_returns_home_and_unblocks() {
        let grid = Level::builtin(0).unwrap().grid;
        let mut player = Player::new(Cell::new(24, 14));
        let home = player.position;
        player.set_direction(Direction::Left);
        player.step(&grid);
        player.blocked = true;
        player.respawn();
        assert_eq!(player.position, home);
        assert!(!player.blocked);
    }
}
