//! Maze-chase game core: a player eating pellets on a wrap-around grid while four ghosts hunt
//! it, each with its own way of picking where to go.
//!
//! [`Game`] owns the whole session. A front-end feeds it directions with
//! [`Game::apply_player_direction`], advances it once per frame with [`Game::tick`] and reads
//! positions, score and phase back out for drawing.

pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod frightened;
pub mod game;
pub mod ghost;
pub mod level;
mod maps;
pub mod motion;
pub mod pathing;
pub mod player;
pub mod targeting;

pub use components::{Direction, Tile, WallShape};
pub use config::{Difficulty, DifficultyParams};
pub use error::{GameError, GameResult};
pub use game::{Game, Phase};
pub use ghost::{Ghost, GhostKind, GhostLook, GhostState};
pub use level::{Cell, Grid, Level};
pub use pathing::find_path;
