//! Geometry, scoring and timing constants shared by the simulation.

pub const SCREEN_WIDTH: u32 = 900;
pub const SCREEN_HEIGHT: u32 = 950;
/// Strip at the bottom of the screen reserved for the HUD.
pub const HUD_HEIGHT: u32 = 50;

pub const GRID_ROWS: usize = 32;
pub const GRID_COLS: usize = 30;

/// Pixel size of one cell along each axis.
pub const CELL_W: f32 = (SCREEN_WIDTH / GRID_COLS as u32) as f32;
pub const CELL_H: f32 = ((SCREEN_HEIGHT - HUD_HEIGHT) / GRID_ROWS as u32) as f32;
pub const WIDTH: f32 = SCREEN_WIDTH as f32;

// Sprite half-extents: positions are stored as the sprite's top-left corner.
pub const PLAYER_OFFSET: f32 = 40.0;
pub const GHOST_OFFSET: f32 = 30.0;

pub const PLAYER_SPEED: f32 = 2.0;
/// Player centre lands this far inside the opposite edge after a tunnel wrap.
pub const PLAYER_WRAP_INSET: f32 = 10.0;

pub const WAYPOINT_EPSILON: f32 = 2.0;
pub const TELEPORT_COOLDOWN_TICKS: u32 = 30;
/// Speed penalty for a frightened ghost that keeps its heading.
pub const FRIGHTENED_SLOWDOWN: f32 = 0.5;

pub const REPATH_INTERVAL: u32 = 10;
pub const REPATH_INTERVAL_BLOCKED: u32 = 30;
pub const REVIVE_TICKS: u32 = 30;
pub const PINKY_RETARGET_COOLDOWN: u32 = 20;
/// Decremented once per ghost per tick, so four ghosts release after 15 ticks.
pub const GHOST_RELEASE_DELAY: u32 = 60;

pub const PINKY_CHASE_RADIUS_SQ: i64 = 16;
pub const PINKY_LOOKAHEAD: i64 = 4;
pub const CLYDE_SCORE_THRESHOLD: u32 = 600;
pub const CLYDE_FLEE_RADIUS_SQ: i64 = 64;
pub const INKY_PELLET_THRESHOLD: u32 = 30;
pub const INKY_LOOKAHEAD: i64 = 2;

/// Axis-aligned distance (on raw sprite positions) under which player and ghost touch.
pub const CATCH_DISTANCE: f32 = 40.0;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 50;
pub const GHOST_SCORE: u32 = 200;
pub const POWER_PELLET_BONUS: u32 = 5;
pub const GHOST_BONUS: u32 = 20;
/// The win target is this multiple of the pellet-equivalent denominator.
pub const WIN_SCORE_FACTOR: u32 = 10;
