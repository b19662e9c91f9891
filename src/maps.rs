//! Built-in level layouts.

use crate::level::Cell;

pub(crate) struct Layout {
    pub rows: &'static [&'static str],
    pub player: Cell,
    /// Blinky, Pinky, Inky, Clyde.
    pub ghosts: [Cell; 4],
    pub flee_corner: Cell,
}

const CLASSIC: &[&str] = &[
    "##############################",
    "#............####............#",
    "#.####.#####.####.#####.####.#",
    "#o####.#####.####.#####.####o#",
    "#.####.#####.####.#####.####.#",
    "#............................#",
    "#.####.##.##########.##.####.#",
    "#.####.##.##########.##.####.#",
    "#......##....####....##......#",
    "######.##### #### #####.######",
    "######.##### #### #####.######",
    "######.##            ##.######",
    "######.## ###====### ##.######",
    "######.## #        # ##.######",
    "T     .   #        #   .     T",
    "######.## #        # ##.######",
    "######.## ########## ##.######",
    "######.##            ##.######",
    "######.##            ##.######",
    "######.## ########## ##.######",
    "######.## ########## ##.######",
    "#............####............#",
    "#.####.#####.####.#####.####.#",
    "#.####.#####.####.#####.####.#",
    "#o..##.......    .......##..o#",
    "###.##.##.##########.##.##.###",
    "###.##.##.##########.##.##.###",
    "#......##....####....##......#",
    "#.##########.####.##########.#",
    "#.##########.####.##########.#",
    "#............................#",
    "##############################",
];

const SPIRAL: &[&str] = &[
    "##############################",
    "#............................#",
    "#.###.####.###..###.####.###.#",
    "#o###.####.###..###.####.###o#",
    "#............................#",
    "#.###.#.######..######.#.###.#",
    "#.....#....#......#....#.....#",
    "#####.####.#.####.#.####.#####",
    "T.....#......####......#.....T",
    "#####.#.#####....#####.#.#####",
    "#.....#.#............#.#.....#",
    "#.###...#.####..####.#...###.#",
    "#...#.###.#........#.###.#...#",
    "###.#.....#.######.#.....#.###",
    "###.#####.#.######.#.#####.###",
    "#.........#........#.........#",
    "#.###.###.####  ####.###.###.#",
    "#.###.#.######==######.#.###.#",
    "#.....#.##          ##.#.....#",
    "#...#.#.##          ##.#.#...#",
    "###.#.#.##          ##.#.#.###",
    "#...#.#.##############.#.#...#",
    "#.###.#.......  .......#.###.#",
    "#.....#.####.####.####.#.....#",
    "###.#...####.####.####...#.###",
    "T...#.#......####......#.#...T",
    "###.#.#.####.####.####.#.#.###",
    "#.....#.####......####.#.....#",
    "#.#####......#..#......#####.#",
    "#o......####.#..#.####......o#",
    "#............................#",
    "##############################",
];

const LATTICE: &[&str] = &[
    "##############################",
    "#............................#",
    "#.##.######.#.##.#.######.##.#",
    "#o##.######.#.##.#.######.##o#",
    "#...........#....#...........#",
    "##.#.#####.##.##.##.#####.#.##",
    "##.#...#.....####.....#...#.##",
    "##.###.#.#...    ...#.#.###.##",
    "#.####.#.####====####.#.####.#",
    "#.#..#.#.#          #.#.#..#.#",
    "T......#.#          #.#......T",
    "#.#..#.#.#          #.#.#..#.#",
    "#.#.##.#.############.#.##.#.#",
    "#.#....#..............#....#.#",
    "#.####.#.####.##.####.#.####.#",
    "#........#....  ....#........#",
    "###.####.#.########.#.####.###",
    "#...#....#..........#....#...#",
    "#.#.#.####.###..###.####.#.#.#",
    "#.#...#......#..#......#...#.#",
    "#.###.#.####.#..#.####.#.###.#",
    "#o....#....#......#....#....o#",
    "####.####.##.####.##.####.####",
    "T.........#........#.........T",
    "####.#.#.##.#.##.#.##.#.#.####",
    "#....#.#....#....#....#.#....#",
    "#.####.####.#.##.#.####.####.#",
    "#......#..............#......#",
    "#.####.#.#####..#####.#.####.#",
    "#o...#...#..........#...#...o#",
    "#...#..#..............#..#...#",
    "##############################",
];

pub(crate) static LAYOUTS: [Layout; 3] = [
    Layout {
        rows: CLASSIC,
        player: Cell::new(24, 14),
        ghosts: [
            Cell::new(11, 14),
            Cell::new(14, 16),
            Cell::new(14, 14),
            Cell::new(14, 12),
        ],
        flee_corner: Cell::new(2, 28),
    },
    Layout {
        rows: SPIRAL,
        player: Cell::new(22, 14),
        ghosts: [
            Cell::new(16, 14),
            Cell::new(19, 15),
            Cell::new(19, 13),
            Cell::new(19, 11),
        ],
        flee_corner: Cell::new(2, 28),
    },
    Layout {
        rows: LATTICE,
        player: Cell::new(15, 14),
        ghosts: [
            Cell::new(7, 14),
            Cell::new(10, 16),
            Cell::new(10, 14),
            Cell::new(10, 12),
        ],
        flee_corner: Cell::new(2, 28),
    },
];
