use super::*;
use crate::config::Difficulty;
use crate::constants::{GHOST_OFFSET, PLAYER_OFFSET};
use crate::error::GameError;
use crate::ghost::GhostState;
use crate::motion::Position;

fn game() -> Game {
    Game::new(0, Difficulty::Normal.params()).expect("built-in map")
}

fn first_cell(game: &Game, tile: Tile) -> Cell {
    game.grid()
        .cells()
        .find(|&(_, t)| t == tile)
        .map(|(cell, _)| cell)
        .expect("tile present")
}

fn put_player_on(game: &mut Game, cell: Cell) {
    game.player.position = Position::at_cell(cell, PLAYER_OFFSET);
}

fn blinky_on_player(game: &mut Game) {
    let player = game.player.position;
    game.ghosts[GhostKind::Blinky.index()].position = player;
}

#[test]
fn fresh_session_counts_plain_pellets_only() {
    let game = game();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.score(), 0);
    assert_eq!(game.win_denominator(), game.level().pellet_count());
    assert_eq!(game.win_target(), game.level().pellet_count() * 10);
    assert_eq!(game.ghosts().len(), 4);
    for kind in GhostKind::ALL {
        assert_eq!(game.ghost(kind).kind, kind);
    }
}

#[test]
fn pellet_scores_once() {
    let mut game = game();
    let cell = first_cell(&game, Tile::Pellet);
    put_player_on(&mut game, cell);

    game.consume_tile();
    assert_eq!(game.score(), 10);
    assert_eq!(game.grid().tile(cell), Some(Tile::Empty));
    assert_eq!(game.player().pellets_eaten, 1);

    game.consume_tile();
    assert_eq!(game.score(), 10);
    assert_eq!(game.player().pellets_eaten, 1);
}

#[test]
fn power_pellet_frightens_and_sobers_up_reviving_ghosts() {
    let mut game = game();
    game.ghosts[GhostKind::Inky.index()].state = GhostState::Reviving;
    let base = game.win_denominator();
    let cell = first_cell(&game, Tile::PowerPellet);
    put_player_on(&mut game, cell);

    game.consume_tile();
    assert_eq!(game.score(), 50);
    assert_eq!(game.win_denominator(), base + 5);
    assert!(game.is_frightened());
    assert_eq!(game.frightened_ticks_left(), game.params().chase_duration);
    assert_eq!(game.ghost(GhostKind::Inky).state, GhostState::Active);
    assert_eq!(game.ghost_look(GhostKind::Inky), GhostLook::Frightened);
    assert_eq!(game.grid().tile(cell), Some(Tile::Empty));
}

#[test]
fn frightened_contact_eats_the_ghost() {
    let mut game = game();
    game.frightened = Some(0);
    let base = game.win_denominator();
    blinky_on_player(&mut game);

    assert!(!game.resolve_ghost_contact());
    let blinky = game.ghost(GhostKind::Blinky);
    assert!(blinky.is_eaten());
    assert_eq!(game.score(), 200);
    assert_eq!(game.win_denominator(), base + 20);
    assert_eq!(game.lives(), 3);
    assert_eq!(blinky.route().remaining().last(), Some(&blinky.home()));
    assert_eq!(game.ghost_look(GhostKind::Blinky), GhostLook::Eaten);

    // Already eaten: touching again changes nothing.
    assert!(!game.resolve_ghost_contact());
    assert_eq!(game.score(), 200);
}

#[test]
fn reviving_ghost_is_eaten_while_frightened() {
    let mut game = game();
    game.frightened = Some(0);
    game.ghosts[GhostKind::Blinky.index()].state = GhostState::Reviving;
    let base = game.win_denominator();
    blinky_on_player(&mut game);

    assert!(!game.resolve_ghost_contact());
    assert_eq!(game.lives(), 3);
    assert_eq!(game.score(), 200);
    assert_eq!(game.win_denominator(), base + 20);
    assert!(game.ghost(GhostKind::Blinky).is_eaten());
    assert!(game.is_frightened());
}

#[test]
fn unfrightened_contact_costs_a_life_and_resets_everyone() {
    let mut game = game();
    let spawn = game.player.position;
    put_player_on(&mut game, Cell::new(5, 5));
    game.ghosts[GhostKind::Pinky.index()].state = GhostState::Active;
    game.ghosts[GhostKind::Pinky.index()].position = Position::at_cell(Cell::new(1, 1), GHOST_OFFSET);
    game.ghosts[GhostKind::Blinky.index()].state = GhostState::Reviving;
    blinky_on_player(&mut game);

    assert!(game.resolve_ghost_contact());
    assert_eq!(game.lives(), 2);
    assert_eq!(game.player().position, spawn);
    assert!(!game.is_frightened());
    assert_eq!(game.release_countdown, Some(GHOST_RELEASE_DELAY));
    let pinky = game.ghost(GhostKind::Pinky);
    assert_eq!(pinky.state, GhostState::Boxed);
    assert_eq!(pinky.cell(game.grid()), Some(game.level().ghost_spawn(GhostKind::Pinky)));
    assert_eq!(game.ghost(GhostKind::Blinky).state, GhostState::Active);
}

#[test]
fn last_life_ends_the_game() {
    let mut game = game();
    game.lives = 1;
    blinky_on_player(&mut game);
    game.tick();
    assert_eq!(game.lives(), 0);
    assert_eq!(game.phase(), Phase::Lost);

    let ticks = game.tick_count();
    game.tick();
    assert_eq!(game.tick_count(), ticks);
}

#[test]
fn win_target_grows_with_power_pellets_and_ghosts() {
    let mut game = game();
    let base = game.win_denominator();

    let cell = first_cell(&game, Tile::PowerPellet);
    put_player_on(&mut game, cell);
    game.consume_tile();
    blinky_on_player(&mut game);
    game.resolve_ghost_contact();
    assert_eq!(game.win_denominator(), base + 5 + 20);

    game.score = base * 10;
    game.update_phase();
    assert_eq!(game.phase(), Phase::Playing);

    game.score = (base + 25) * 10;
    game.update_phase();
    assert_eq!(game.phase(), Phase::Won);
}

#[test]
fn frightened_mode_runs_for_the_chase_duration() {
    let mut game = game();
    let duration = game.params().chase_duration;
    game.frightened = Some(0);
    game.ghosts[GhostKind::Clyde.index()].state = GhostState::Reviving;
    for _ in 0..duration - 1 {
        game.tick_frightened();
    }
    assert!(game.is_frightened());
    assert_eq!(game.frightened_ticks_left(), 1);
    game.tick_frightened();
    assert!(!game.is_frightened());
    assert_eq!(game.ghost(GhostKind::Clyde).state, GhostState::Active);
}

#[test]
fn pinky_leaves_the_pen_first() {
    let mut game = game();
    // Four ghosts drain the release countdown in fifteen ticks.
    for _ in 0..15 {
        game.tick();
    }
    assert_eq!(game.ghost(GhostKind::Blinky).state, GhostState::Active);
    assert_eq!(game.ghost(GhostKind::Pinky).state, GhostState::Active);
    assert_eq!(game.ghost(GhostKind::Inky).state, GhostState::Boxed);
    assert_eq!(game.ghost(GhostKind::Clyde).state, GhostState::Boxed);
    assert_eq!(game.release_countdown, None);
}

#[test]
fn blocked_player_holds_the_release_countdown() {
    let mut game = game();
    game.player.blocked = true;
    game.count_down_release();
    assert_eq!(game.release_countdown, Some(GHOST_RELEASE_DELAY));
    game.player.blocked = false;
    game.count_down_release();
    assert_eq!(game.release_countdown, Some(GHOST_RELEASE_DELAY - 4));
}

#[test]
fn failed_reset_leaves_the_session_alone() {
    let mut game = game();
    game.score = 120;
    assert_eq!(
        game.reset_level(9, Difficulty::Easy.params()),
        Err(GameError::UnknownMap {
            index: 9,
            available: 3
        })
    );
    let bad = DifficultyParams {
        chase_duration: 0,
        ..Difficulty::Easy.params()
    };
    assert!(matches!(
        game.reset_level(1, bad),
        Err(GameError::InvalidDifficulty { .. })
    ));
    assert_eq!(game.score(), 120);
    assert_eq!(game.level_index(), Some(0));
}

#[test]
fn reset_switches_map_and_difficulty() {
    let mut game = game();
    game.score = 120;
    game.reset_level(2, Difficulty::Impossible.params()).unwrap();
    assert_eq!(game.level_index(), Some(2));
    assert_eq!(game.lives(), 1);
    assert_eq!(game.score(), 0);
    assert_eq!(game.ghost(GhostKind::Blinky).speed, 2.0);
    assert_eq!(game.win_denominator(), Level::builtin(2).unwrap().pellet_count());
}

#[test]
fn restart_restores_the_pellets() {
    let mut game = game();
    let cell = first_cell(&game, Tile::Pellet);
    put_player_on(&mut game, cell);
    game.consume_tile();
    game.phase = Phase::Won;

    game.restart();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.grid().tile(cell), Some(Tile::Pellet));
    assert_eq!(game.player().pellets_eaten, 0);
}

#[test]
fn direction_change_unblocks_the_player() {
    let mut game = game();
    game.player.blocked = true;
    game.apply_player_direction(Direction::Up);
    assert!(!game.player().blocked);
    assert_eq!(game.player().direction, Direction::Up);
}
