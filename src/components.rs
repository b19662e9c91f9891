use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// `(d_col, d_row)` for one step.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Rendering orientation of a wall segment. Every shape blocks movement the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallShape {
    Vertical,
    Horizontal,
    /// Joins the wall below and the wall to the left.
    DownLeft,
    DownRight,
    UpRight,
    UpLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Pellet,
    PowerPellet,
    Wall(WallShape),
    /// Pen door: ghosts path through it, the player cannot.
    Gate,
    /// Traversable cell at the horizontal extremes of a row that wraps around.
    Tunnel,
}

impl Tile {
    pub fn code(self) -> i8 {
        match self {
            Tile::Empty => 0,
            Tile::Pellet => 1,
            Tile::PowerPellet => 2,
            Tile::Wall(WallShape::Vertical) => 3,
            Tile::Wall(WallShape::Horizontal) => 4,
            Tile::Wall(WallShape::DownLeft) => 5,
            Tile::Wall(WallShape::DownRight) => 6,
            Tile::Wall(WallShape::UpRight) => 7,
            Tile::Wall(WallShape::UpLeft) => 8,
            Tile::Gate => 9,
            Tile::Tunnel => -1,
        }
    }

    pub fn from_code(code: i8) -> Option<Tile> {
        let tile = match code {
            -1 => Tile::Tunnel,
            0 => Tile::Empty,
            1 => Tile::Pellet,
            2 => Tile::PowerPellet,
            3 => Tile::Wall(WallShape::Vertical),
            4 => Tile::Wall(WallShape::Horizontal),
            5 => Tile::Wall(WallShape::DownLeft),
            6 => Tile::Wall(WallShape::DownRight),
            7 => Tile::Wall(WallShape::UpRight),
            8 => Tile::Wall(WallShape::UpLeft),
            9 => Tile::Gate,
            _ => return None,
        };
        Some(tile)
    }

    /// Open to the player and to free-roaming ghosts (tile code below 3).
    pub fn is_walkable(self) -> bool {
        self.code() < 3
    }

    /// Open to ghost path search, which may also cross the pen gate.
    pub fn is_ghost_passable(self) -> bool {
        self.is_walkable() || self == Tile::Gate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_codes_round_trip_through_every_known_code() {
        for code in -1..=9 {
            let tile = Tile::from_code(code).expect("known code");
            assert_eq!(tile.code(), code);
        }
        assert_eq!(Tile::from_code(10), None);
        assert_eq!(Tile::from_code(-2), None);
    }

    #[test]
    fn gate_blocks_walkers_but_not_ghost_paths() {
        assert!(!Tile::Gate.is_walkable());
        assert!(Tile::Gate.is_ghost_passable());
        assert!(Tile::Tunnel.is_walkable());
        assert!(!Tile::Wall(WallShape::UpLeft).is_ghost_passable());
    }

    #[test]
    fn opposite_is_an_involution() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }
}
