//! The play session: one level, the player, four ghosts and the rules tying them together.

use tracing::{debug, info};

use crate::components::{Direction, Tile};
use crate::config::DifficultyParams;
use crate::constants::{
    CATCH_DISTANCE, GHOST_BONUS, GHOST_RELEASE_DELAY, GHOST_SCORE, PELLET_SCORE,
    POWER_PELLET_BONUS, POWER_PELLET_SCORE, WIN_SCORE_FACTOR,
};
use crate::error::GameResult;
use crate::ghost::{Ghost, GhostKind, GhostLook, GhostWorld};
use crate::level::{Cell, Grid, Level};
use crate::player::{Player, StepOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct Game {
    level_index: Option<usize>,
    /// Pristine copy for restarts; `grid` is the one pellets disappear from.
    level: Level,
    grid: Grid,
    params: DifficultyParams,
    player: Player,
    /// Always in [`GhostKind::ALL`] order.
    ghosts: Vec<Ghost>,
    score: u32,
    lives: u32,
    /// Ticks elapsed in the current frightened period.
    frightened: Option<u32>,
    win_denominator: u32,
    phase: Phase,
    tick_count: u64,
    release_countdown: Option<u32>,
}

impl Game {
    /// Starts a session on one of the built-in maps.
    pub fn new(map_index: usize, params: DifficultyParams) -> GameResult<Self> {
        params.validate()?;
        let level = Level::builtin(map_index)?;
        let mut game = Self::with_level(level, params)?;
        game.level_index = Some(map_index);
        Ok(game)
    }

    /// Starts a session on a caller-supplied level.
    pub fn with_level(level: Level, params: DifficultyParams) -> GameResult<Self> {
        params.validate()?;
        let mut game = Self {
            level_index: None,
            grid: level.grid.clone(),
            player: Player::new(level.player_spawn),
            ghosts: Vec::new(),
            level,
            params,
            score: 0,
            lives: 0,
            frightened: None,
            win_denominator: 0,
            phase: Phase::Playing,
            tick_count: 0,
            release_countdown: None,
        };
        game.install();
        Ok(game)
    }

    /// Reloads a built-in map with new difficulty settings. Nothing changes on error.
    pub fn reset_level(&mut self, map_index: usize, params: DifficultyParams) -> GameResult<()> {
        params.validate()?;
        let level = Level::builtin(map_index)?;
        self.level = level;
        self.level_index = Some(map_index);
        self.params = params;
        self.install();
        Ok(())
    }

    /// Plays the current level again from scratch.
    pub fn restart(&mut self) {
        self.install();
    }

    fn install(&mut self) {
        self.grid = self.level.grid.clone();
        self.player = Player::new(self.level.player_spawn);
        self.ghosts = GhostKind::ALL
            .into_iter()
            .map(|kind| Ghost::new(kind, &self.level, self.params.ghost_speed))
            .collect();
        self.score = 0;
        self.lives = self.params.full_health;
        self.frightened = None;
        self.win_denominator = self.level.pellet_count();
        self.phase = Phase::Playing;
        self.tick_count = 0;
        self.release_countdown = Some(GHOST_RELEASE_DELAY);
        info!(
            map = ?self.level_index,
            ghost_speed = self.params.ghost_speed,
            chase_duration = self.params.chase_duration,
            lives = self.lives,
            pellets = self.win_denominator,
            "level reset"
        );
    }

    /// Takes effect on the next tick; also lets a blocked player try again.
    pub fn apply_player_direction(&mut self, direction: Direction) {
        self.player.set_direction(direction);
    }

    /// Advances the session by one frame. Does nothing once the game is won or lost.
    pub fn tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        self.tick_count += 1;

        if self.player.step(&self.grid) == StepOutcome::Wrapped {
            for ghost in &mut self.ghosts {
                ghost.force_repath();
            }
        }
        self.consume_tile();
        self.count_down_release();
        self.update_ghosts();
        if !self.resolve_ghost_contact() {
            self.tick_frightened();
        }
        self.update_phase();
    }

    fn consume_tile(&mut self) {
        let Some(cell) = self.player.cell(&self.grid) else {
            return;
        };
        match self.grid.tile(cell) {
            Some(Tile::Pellet) => {
                self.grid.set(cell, Tile::Empty);
                self.score += PELLET_SCORE;
                self.player.pellets_eaten += 1;
            }
            Some(Tile::PowerPellet) => {
                self.grid.set(cell, Tile::Empty);
                self.score += POWER_PELLET_SCORE;
                self.win_denominator += POWER_PELLET_BONUS;
                self.frightened = Some(0);
                for ghost in &mut self.ghosts {
                    ghost.sober_up();
                }
                debug!(score = self.score, "frightened mode started");
            }
            _ => {}
        }
    }

    fn count_down_release(&mut self) {
        let Some(remaining) = self.release_countdown else {
            return;
        };
        if self.player.blocked {
            return;
        }
        let remaining = remaining.saturating_sub(self.ghosts.len() as u32);
        if remaining == 0 {
            self.release_countdown = None;
            for ghost in &mut self.ghosts {
                ghost.force_repath();
            }
        } else {
            self.release_countdown = Some(remaining);
        }
    }

    fn blinky_cell(&self) -> Cell {
        self.ghosts
            .iter()
            .find(|g| g.kind == GhostKind::Blinky)
            .and_then(|g| g.cell(&self.grid))
            .unwrap_or(self.level.ghost_spawn(GhostKind::Blinky))
    }

    fn update_ghosts(&mut self) {
        let blinky_cell = self.blinky_cell();
        let world = ghost_world(
            &self.grid,
            &self.player,
            &self.level,
            blinky_cell,
            self.score,
            self.frightened.is_some(),
        );
        for ghost in &mut self.ghosts {
            ghost.update(&world);
        }
    }

    /// Returns true when the player was caught.
    fn resolve_ghost_contact(&mut self) -> bool {
        let frightened = self.frightened.is_some();
        let blinky_cell = self.blinky_cell();
        let player = self.player.position;
        for i in 0..self.ghosts.len() {
            let ghost = &self.ghosts[i];
            let touching = (player.x - ghost.position.x).abs() < CATCH_DISTANCE
                && (player.y - ghost.position.y).abs() < CATCH_DISTANCE;
            if !touching || ghost.is_eaten() {
                continue;
            }
            if frightened {
                self.score += GHOST_SCORE;
                self.win_denominator += GHOST_BONUS;
                let world = ghost_world(
                    &self.grid,
                    &self.player,
                    &self.level,
                    blinky_cell,
                    self.score,
                    frightened,
                );
                let ghost = &mut self.ghosts[i];
                ghost.set_eaten();
                ghost.retarget(&world);
            } else {
                self.lose_life();
                return true;
            }
        }
        false
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        info!(lives = self.lives, score = self.score, "player caught");
        self.player.respawn();
        self.frightened = None;
        self.release_countdown = Some(GHOST_RELEASE_DELAY);
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
    }

    fn tick_frightened(&mut self) {
        let Some(elapsed) = self.frightened else {
            return;
        };
        let elapsed = elapsed + 1;
        if elapsed >= self.params.chase_duration {
            self.frightened = None;
            for ghost in &mut self.ghosts {
                ghost.sober_up();
            }
            debug!("frightened mode over");
        } else {
            self.frightened = Some(elapsed);
        }
    }

    fn update_phase(&mut self) {
        if self.lives == 0 {
            self.phase = Phase::Lost;
            info!(score = self.score, ticks = self.tick_count, "game lost");
        } else if self.score >= self.win_target() {
            self.phase = Phase::Won;
            info!(score = self.score, ticks = self.tick_count, "game won");
        }
    }

    pub fn level_index(&self) -> Option<usize> {
        self.level_index
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn params(&self) -> DifficultyParams {
        self.params
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn ghost(&self, kind: GhostKind) -> &Ghost {
        &self.ghosts[kind.index()]
    }

    pub fn ghost_look(&self, kind: GhostKind) -> GhostLook {
        self.ghost(kind).look(self.is_frightened())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_frightened(&self) -> bool {
        self.frightened.is_some()
    }

    pub fn frightened_ticks_left(&self) -> u32 {
        self.frightened
            .map_or(0, |elapsed| self.params.chase_duration.saturating_sub(elapsed))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Pellet-equivalent total; grows with every power pellet and ghost eaten.
    pub fn win_denominator(&self) -> u32 {
        self.win_denominator
    }

    pub fn win_target(&self) -> u32 {
        self.win_denominator * WIN_SCORE_FACTOR
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

fn ghost_world<'a>(
    grid: &'a Grid,
    player: &Player,
    level: &Level,
    blinky_cell: Cell,
    score: u32,
    frightened: bool,
) -> GhostWorld<'a> {
    GhostWorld {
        grid,
        player_position: player.position,
        player_cell: player.cell(grid).unwrap_or(level.player_spawn),
        player_direction: player.direction,
        player_blocked: player.blocked,
        blinky_cell,
        score,
        pellets_eaten: player.pellets_eaten,
        flee_corner: level.flee_corner,
        frightened,
    }
}

#[cfg(test)]
mod tests;
