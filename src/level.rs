use crate::components::{Direction, Tile, WallShape};
use crate::constants::{GRID_COLS, GRID_ROWS};
use crate::error::{GameError, GameResult};
use crate::ghost::GhostKind;
use crate::maps;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Row-major tile array. Only pellet consumption mutates it after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn from_codes(codes: &[Vec<i8>]) -> GameResult<Self> {
        let rows = codes.len();
        let cols = codes.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidLevel {
                reason: "grid has no cells".to_string(),
            });
        }
        let mut tiles = Vec::with_capacity(rows * cols);
        for (row, line) in codes.iter().enumerate() {
            if line.len() != cols {
                return Err(GameError::InvalidLevel {
                    reason: format!("row {row} has {} columns, expected {cols}", line.len()),
                });
            }
            for (col, &code) in line.iter().enumerate() {
                let tile =
                    Tile::from_code(code).ok_or(GameError::UnknownTileCode { row, col, code })?;
                tiles.push(tile);
            }
        }
        Ok(Self { rows, cols, tiles })
    }

    /// Parses a layout drawn with `#` walls, `.` pellets, `o` power pellets, `=` the pen
    /// gate, `T` tunnel ends and spaces for bare floor. Wall shapes are inferred from the
    /// neighbouring walls.
    pub fn from_ascii(lines: &[&str]) -> GameResult<Self> {
        let chars: Vec<Vec<char>> = lines.iter().map(|l| l.chars().collect()).collect();
        let rows = chars.len();
        let cols = chars.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidLevel {
                reason: "layout has no cells".to_string(),
            });
        }
        let is_wall = |r: usize, c: Option<usize>| -> bool {
            c.and_then(|c| chars.get(r).and_then(|line| line.get(c)))
                .is_some_and(|&ch| ch == '#')
        };

        let mut tiles = Vec::with_capacity(rows * cols);
        for (row, line) in chars.iter().enumerate() {
            if line.len() != cols {
                return Err(GameError::InvalidLevel {
                    reason: format!("row {row} has {} columns, expected {cols}", line.len()),
                });
            }
            for (col, &ch) in line.iter().enumerate() {
                let tile = match ch {
                    '#' => {
                        let up = row > 0 && is_wall(row - 1, Some(col));
                        let down = is_wall(row + 1, Some(col));
                        let left = is_wall(row, col.checked_sub(1));
                        let right = is_wall(row, Some(col + 1));
                        Tile::Wall(wall_shape(up, down, left, right))
                    }
                    '.' => Tile::Pellet,
                    'o' => Tile::PowerPellet,
                    ' ' => Tile::Empty,
                    '=' => Tile::Gate,
                    'T' => Tile::Tunnel,
                    other => {
                        return Err(GameError::InvalidLevel {
                            reason: format!("unexpected character {other:?} at row {row}, column {col}"),
                        })
                    }
                };
                tiles.push(tile);
            }
        }
        Ok(Self { rows, cols, tiles })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        if cell.row < self.rows && cell.col < self.cols {
            Some(self.tiles[cell.row * self.cols + cell.col])
        } else {
            None
        }
    }

    /// Bounds-checked lookup on signed coordinates; nothing wraps here.
    pub fn cell_at(&self, row: i64, col: i64) -> Option<Cell> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(Cell::new(row as usize, col as usize))
    }

    pub fn tile_at(&self, row: i64, col: i64) -> Option<Tile> {
        self.cell_at(row, col).and_then(|cell| self.tile(cell))
    }

    /// The adjacent cell one step away. Columns wrap around; rows do not.
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let (dc, dr) = dir.delta();
        let row = cell.row as i64 + dr;
        if row < 0 || row as usize >= self.rows {
            return None;
        }
        let col = (cell.col as i64 + dc).rem_euclid(self.cols as i64);
        Some(Cell::new(row as usize, col as usize))
    }

    pub fn is_ghost_passable(&self, cell: Cell) -> bool {
        self.tile(cell).is_some_and(Tile::is_ghost_passable)
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.tile(cell).is_some_and(Tile::is_walkable)
    }

    /// Column distance the short way round the wrap seam.
    pub fn col_distance(&self, a: usize, b: usize) -> usize {
        let d = a.abs_diff(b);
        d.min(self.cols - d)
    }

    pub(crate) fn set(&mut self, cell: Cell, tile: Tile) {
        if let Some(slot) = self.tiles.get_mut(cell.row * self.cols + cell.col) {
            *slot = tile;
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &tile)| (Cell::new(i / self.cols, i % self.cols), tile))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Snapshot in the integer tile-code encoding.
    pub fn codes(&self) -> Vec<Vec<i8>> {
        self.tiles
            .chunks(self.cols)
            .map(|row| row.iter().map(|t| t.code()).collect())
            .collect()
    }
}

fn wall_shape(up: bool, down: bool, left: bool, right: bool) -> WallShape {
    match (up, down, left, right) {
        (false, true, true, false) => WallShape::DownLeft,
        (false, true, false, true) => WallShape::DownRight,
        (true, false, false, true) => WallShape::UpRight,
        (true, false, true, false) => WallShape::UpLeft,
        (_, _, true, _) | (_, _, _, true) => WallShape::Horizontal,
        _ => WallShape::Vertical,
    }
}

/// A playable level: the grid plus where everybody starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub grid: Grid,
    pub player_spawn: Cell,
    /// Indexed by [`GhostKind::index`].
    pub ghost_spawns: [Cell; 4],
    /// Where Clyde runs to when the player gets close.
    pub flee_corner: Cell,
}

impl Level {
    pub fn new(
        grid: Grid,
        player_spawn: Cell,
        ghost_spawns: [Cell; 4],
        flee_corner: Cell,
    ) -> GameResult<Self> {
        if grid.rows() != GRID_ROWS || grid.cols() != GRID_COLS {
            return Err(GameError::InvalidLevel {
                reason: format!(
                    "grid is {}x{}, expected {GRID_ROWS}x{GRID_COLS}",
                    grid.rows(),
                    grid.cols()
                ),
            });
        }
        if !grid.is_walkable(player_spawn) {
            return Err(GameError::InvalidLevel {
                reason: format!("player spawn {player_spawn:?} is not walkable"),
            });
        }
        for kind in GhostKind::ALL {
            let spawn = ghost_spawns[kind.index()];
            if !grid.is_ghost_passable(spawn) {
                return Err(GameError::InvalidLevel {
                    reason: format!("{} spawn {spawn:?} is inside a wall", kind.name()),
                });
            }
        }
        if !grid.is_walkable(flee_corner) {
            return Err(GameError::InvalidLevel {
                reason: format!("flee corner {flee_corner:?} is not walkable"),
            });
        }
        Ok(Self {
            grid,
            player_spawn,
            ghost_spawns,
            flee_corner,
        })
    }

    pub fn builtin(index: usize) -> GameResult<Self> {
        let layout = maps::LAYOUTS.get(index).ok_or(GameError::UnknownMap {
            index,
            available: maps::LAYOUTS.len(),
        })?;
        let grid = Grid::from_ascii(layout.rows)?;
        Level::new(grid, layout.player, layout.ghosts, layout.flee_corner)
    }

    pub fn builtin_count() -> usize {
        maps::LAYOUTS.len()
    }

    pub fn ghost_spawn(&self, kind: GhostKind) -> Cell {
        self.ghost_spawns[kind.index()]
    }

    /// Plain pellets only; power pellets add to the win denominator when eaten.
    pub fn pellet_count(&self) -> u32 {
        self.grid.count(Tile::Pellet) as u32
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn reachable_from(grid: &Grid, start: Cell) -> Vec<bool> {
        let mut seen = vec![false; grid.rows() * grid.cols()];
        let mut q = VecDeque::new();
        seen[start.row * grid.cols() + start.col] = true;
        q.push_back(start);
        while let Some(cell) = q.pop_front() {
            for dir in Direction::ALL {
                if let Some(next) = grid.neighbor(cell, dir) {
                    let idx = next.row * grid.cols() + next.col;
                    if !seen[idx] && grid.is_ghost_passable(next) {
                        seen[idx] = true;
                        q.push_back(next);
                    }
                }
            }
        }
        seen
    }

    #[test]
    fn builtin_levels_load_with_standard_dimensions() {
        for index in 0..Level::builtin_count() {
            let level = Level::builtin(index).expect("builtin level");
            assert_eq!(level.grid.rows(), GRID_ROWS);
            assert_eq!(level.grid.cols(), GRID_COLS);
            assert!(level.pellet_count() > 200);
            assert!(level.grid.count(Tile::PowerPellet) >= 4);
            assert!(level.grid.count(Tile::Gate) >= 2);
            assert!(level.grid.count(Tile::Tunnel) >= 2);
            assert_eq!(level.flee_corner, Cell::new(2, 28));
            assert!(level.grid.is_walkable(level.flee_corner));
        }
    }

    #[test]
    fn every_open_cell_is_reachable_from_the_player_spawn() {
        for index in 0..Level::builtin_count() {
            let level = Level::builtin(index).unwrap();
            let seen = reachable_from(&level.grid, level.player_spawn);
            for (cell, tile) in level.grid.cells() {
                if tile.is_ghost_passable() {
                    assert!(
                        seen[cell.row * level.grid.cols() + cell.col],
                        "map {index}: {cell:?} unreachable"
                    );
                }
            }
        }
    }

    #[test]
    fn tunnel_ends_come_in_pairs_on_the_outer_columns() {
        for index in 0..Level::builtin_count() {
            let grid = Level::builtin(index).unwrap().grid;
            for (cell, tile) in grid.cells() {
                if tile == Tile::Tunnel {
                    assert!(cell.col == 0 || cell.col == grid.cols() - 1);
                    let mirror = Cell::new(cell.row, grid.cols() - 1 - cell.col);
                    assert_eq!(grid.tile(mirror), Some(Tile::Tunnel));
                }
            }
        }
    }

    #[test]
    fn unknown_map_index_is_reported() {
        assert_eq!(
            Level::builtin(7),
            Err(GameError::UnknownMap {
                index: 7,
                available: 3
            })
        );
    }

    #[test]
    fn wall_shapes_follow_their_neighbours() {
        let grid = Grid::from_ascii(&["###", "#.#", "###"]).unwrap();
        assert_eq!(grid.tile(Cell::new(0, 0)), Some(Tile::Wall(WallShape::DownRight)));
        assert_eq!(grid.tile(Cell::new(0, 1)), Some(Tile::Wall(WallShape::Horizontal)));
        assert_eq!(grid.tile(Cell::new(0, 2)), Some(Tile::Wall(WallShape::DownLeft)));
        assert_eq!(grid.tile(Cell::new(1, 0)), Some(Tile::Wall(WallShape::Vertical)));
        assert_eq!(grid.tile(Cell::new(2, 0)), Some(Tile::Wall(WallShape::UpRight)));
        assert_eq!(grid.tile(Cell::new(2, 2)), Some(Tile::Wall(WallShape::UpLeft)));
    }

    #[test]
    fn codes_round_trip_through_from_codes() {
        let grid = Level::builtin(0).unwrap().grid;
        assert_eq!(Grid::from_codes(&grid.codes()), Ok(grid));
    }

    #[test]
    fn bad_codes_and_ragged_rows_are_rejected() {
        assert_eq!(
            Grid::from_codes(&[vec![0, 1], vec![0, 42]]),
            Err(GameError::UnknownTileCode {
                row: 1,
                col: 1,
                code: 42
            })
        );
        assert!(Grid::from_codes(&[vec![0, 1], vec![0]]).is_err());
        assert!(Grid::from_ascii(&["#x#"]).is_err());
    }

    #[test]
    fn neighbours_wrap_columns_but_not_rows() {
        let grid = Grid::from_ascii(&["T  T", "####"]).unwrap();
        assert_eq!(grid.neighbor(Cell::new(0, 0), Direction::Left), Some(Cell::new(0, 3)));
        assert_eq!(grid.neighbor(Cell::new(0, 3), Direction::Right), Some(Cell::new(0, 0)));
        assert_eq!(grid.neighbor(Cell::new(0, 1), Direction::Up), None);
        assert_eq!(grid.col_distance(0, 3), 1);
    }

    #[test]
    fn level_rejects_spawns_inside_walls() {
        let level = Level::builtin(0).unwrap();
        let err = Level::new(
            level.grid.clone(),
            Cell::new(0, 0),
            level.ghost_spawns,
            level.flee_corner,
        );
        assert!(matches!(err, Err(GameError::InvalidLevel { .. })));
    }
}
