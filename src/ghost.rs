use tracing::debug;

use crate::components::Direction;
use crate::constants::{
    CELL_W, GHOST_OFFSET, PINKY_RETARGET_COOLDOWN, REPATH_INTERVAL, REPATH_INTERVAL_BLOCKED,
    REVIVE_TICKS, TELEPORT_COOLDOWN_TICKS,
};
use crate::frightened;
use crate::level::{Cell, Grid, Level};
use crate::motion::{self, Position, Route};
use crate::pathing::find_path;
use crate::targeting::{TargetContext, TargetStrategy};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum GhostKind {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostKind {
    pub const ALL: [GhostKind; 4] = [
        GhostKind::Blinky,
        GhostKind::Pinky,
        GhostKind::Inky,
        GhostKind::Clyde,
    ];

    pub fn index(self) -> usize {
        match self {
            GhostKind::Blinky => 0,
            GhostKind::Pinky => 1,
            GhostKind::Inky => 2,
            GhostKind::Clyde => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GhostKind::Blinky => "blinky",
            GhostKind::Pinky => "pinky",
            GhostKind::Inky => "inky",
            GhostKind::Clyde => "clyde",
        }
    }

    /// Ticks that must pass between two goal computations.
    pub fn retarget_cooldown(self) -> u32 {
        match self {
            GhostKind::Pinky | GhostKind::Clyde => PINKY_RETARGET_COOLDOWN,
            GhostKind::Blinky | GhostKind::Inky => 0,
        }
    }

    /// Whose spawn cell an eaten ghost heads back to.
    pub fn revive_home(self) -> GhostKind {
        match self {
            GhostKind::Blinky | GhostKind::Pinky => GhostKind::Pinky,
            other => other,
        }
    }

    fn starts_boxed(self) -> bool {
        self != GhostKind::Blinky
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GhostState {
    /// In the pen, waiting for a first route out.
    Boxed,
    Active,
    /// Heading home after being caught; counts ticks spent parked there.
    Eaten { revive_ticks: u32 },
    /// Back in play. Sits still through the rest of the current frightened period and can
    /// still be eaten.
    Reviving,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GhostLook {
    Normal,
    Frightened,
    Eaten,
}

/// Everything a ghost reads from the rest of the session during its update.
#[derive(Debug, Clone, Copy)]
pub struct GhostWorld<'a> {
    pub grid: &'a Grid,
    pub player_position: Position,
    pub player_cell: Cell,
    pub player_direction: Direction,
    pub player_blocked: bool,
    pub blinky_cell: Cell,
    pub score: u32,
    pub pellets_eaten: u32,
    pub flee_corner: Cell,
    pub frightened: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub kind: GhostKind,
    pub state: GhostState,
    pub position: Position,
    pub direction: Direction,
    pub(crate) speed: f32,
    pub(crate) teleport_cooldown: u32,
    route: Route,
    repath_counter: u32,
    cooldown: u32,
    spawn: Position,
    home: Cell,
}

impl Ghost {
    pub fn new(kind: GhostKind, level: &Level, speed: f32) -> Self {
        let spawn = Position::at_cell(level.ghost_spawn(kind), GHOST_OFFSET);
        let mut ghost = Self {
            kind,
            state: GhostState::Boxed,
            position: spawn,
            direction: Direction::Left,
            speed,
            teleport_cooldown: TELEPORT_COOLDOWN_TICKS,
            route: Route::default(),
            repath_counter: 0,
            cooldown: 0,
            spawn,
            home: level.ghost_spawn(kind.revive_home()),
        };
        ghost.reset();
        ghost
    }

    /// Back to the spawn point in the starting state, forgetting any route.
    pub fn reset(&mut self) {
        self.state = if self.kind.starts_boxed() {
            GhostState::Boxed
        } else {
            GhostState::Active
        };
        self.position = self.spawn;
        self.direction = Direction::Left;
        self.route.clear();
        self.repath_counter = 0;
        self.cooldown = self.kind.retarget_cooldown();
        self.teleport_cooldown = TELEPORT_COOLDOWN_TICKS;
    }

    pub fn cell(&self, grid: &Grid) -> Option<Cell> {
        self.position.wrapped_cell(grid, GHOST_OFFSET)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn home(&self) -> Cell {
        self.home
    }

    pub fn is_eaten(&self) -> bool {
        matches!(self.state, GhostState::Eaten { .. })
    }

    pub fn look(&self, frightened: bool) -> GhostLook {
        match self.state {
            GhostState::Eaten { .. } => GhostLook::Eaten,
            GhostState::Active if frightened => GhostLook::Frightened,
            _ => GhostLook::Normal,
        }
    }

    /// Recompute the route on the next update regardless of the cadence.
    pub fn force_repath(&mut self) {
        self.repath_counter = REPATH_INTERVAL_BLOCKED;
    }

    pub(crate) fn set_eaten(&mut self) {
        self.state = GhostState::Eaten { revive_ticks: 0 };
        self.route.clear();
        debug!(ghost = self.kind.name(), "ghost eaten");
    }

    /// Ends the post-revival grace period.
    pub(crate) fn sober_up(&mut self) {
        if self.state == GhostState::Reviving {
            self.state = GhostState::Active;
        }
    }

    pub fn update(&mut self, world: &GhostWorld<'_>) {
        self.cooldown = self.cooldown.saturating_add(1);
        let interval = if world.player_blocked {
            REPATH_INTERVAL_BLOCKED
        } else {
            if self.teleport_cooldown < TELEPORT_COOLDOWN_TICKS {
                self.teleport_cooldown += 1;
            }
            REPATH_INTERVAL
        };

        if world.frightened {
            match self.state {
                GhostState::Active => {
                    self.route.clear();
                    self.force_repath();
                    frightened::free_roam(self, world.grid, world.player_position);
                    return;
                }
                GhostState::Boxed | GhostState::Reviving => return,
                GhostState::Eaten { .. } => {}
            }
        }

        self.repath_counter += 1;
        if self.repath_counter >= interval {
            self.retarget(world);
            self.repath_counter = 0;
        }
        self.follow_route(world.grid);

        if let GhostState::Eaten { revive_ticks } = self.state {
            let home = Position::at_cell(self.home, GHOST_OFFSET);
            if (self.position.x - home.x).abs() < CELL_W && (self.position.y - home.y).abs() < CELL_W
            {
                let revive_ticks = revive_ticks + 1;
                self.state = if revive_ticks >= REVIVE_TICKS {
                    debug!(ghost = self.kind.name(), "ghost revived");
                    GhostState::Reviving
                } else {
                    GhostState::Eaten { revive_ticks }
                };
            }
        }
    }

    /// Picks a goal and replaces the route with a fresh one toward it.
    ///
    /// An unreachable or missing goal leaves the current route alone. A boxed ghost leaves the
    /// pen as soon as it has somewhere to go.
    pub fn retarget(&mut self, world: &GhostWorld<'_>) {
        let Some(ghost_cell) = self.cell(world.grid) else {
            return;
        };
        let goal = if self.is_eaten() {
            Some(self.home)
        } else if self.cooldown < self.kind.retarget_cooldown() {
            return;
        } else {
            let ctx = TargetContext {
                grid: world.grid,
                ghost_cell,
                player_cell: world.player_cell,
                player_direction: world.player_direction,
                blinky_cell: world.blinky_cell,
                score: world.score,
                pellets_eaten: world.pellets_eaten,
                flee_corner: world.flee_corner,
            };
            self.kind.compute_goal(&ctx)
        };
        let Some(goal) = goal else {
            return;
        };
        self.cooldown = 0;

        let cells = find_path(world.grid, ghost_cell, goal);
        if cells.is_empty() {
            return;
        }
        self.route = Route::new(cells);
        if self.state == GhostState::Boxed {
            self.state = GhostState::Active;
            debug!(ghost = self.kind.name(), "ghost released");
        }
    }

    fn follow_route(&mut self, grid: &Grid) {
        let seam = self
            .route
            .seam_crossing(self.position, GHOST_OFFSET, grid.cols());
        if let Some(heading) = motion::advance(
            &mut self.position,
            &mut self.route,
            self.speed,
            GHOST_OFFSET,
            grid.cols(),
        ) {
            self.direction = heading;
        }
        if let Some(heading) = seam {
            motion::wrap_through_tunnel(
                &mut self.position,
                GHOST_OFFSET,
                heading,
                grid,
                &mut self.teleport_cooldown,
            );
        }
        self.position.normalize_x(GHOST_OFFSET);
    }
}
