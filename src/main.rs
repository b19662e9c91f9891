use std::fs::{self, File};
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

use maze_chase::{
    Cell, Difficulty, DifficultyParams, Direction, Game, GhostKind, GhostLook, Phase, Tile,
    WallShape,
};

const CELL_W: usize = 2;
const DEFAULT_TICK_MS: u64 = 16;
const DEFAULT_RENDER_FPS: u64 = 60;

#[derive(Parser)]
#[command(name = "pacman")]
#[command(about = "Eat every pellet in the maze while four ghosts hunt you down")]
struct Args {
    /// Built-in map to play
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    map: u8,
    /// Difficulty preset: easy, normal, hard or impossible
    #[arg(long, default_value = "hard")]
    difficulty: Difficulty,
    /// JSON record with ghost_speed, chase_duration and full_health; overrides --difficulty
    #[arg(long)]
    difficulty_file: Option<PathBuf>,
    /// Write logs to this file (filtered with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Ghost,
    Frightened,
    Eyes,
    Wall(WallShape),
    Empty,
    Pellet,
    Power,
    Gate,
}

#[derive(Clone, Copy, PartialEq)]
struct ScreenCell {
    glyph: Glyph,
    color: Color,
}

struct Renderer {
    last: Vec<ScreenCell>,
    last_hud: String,
    last_banner: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                ScreenCell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            last_banner: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let params = match &args.difficulty_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading difficulty file {}", path.display()))?;
            DifficultyParams::from_json(&text)
                .with_context(|| format!("loading difficulty file {}", path.display()))?
        }
        None => args.difficulty.params(),
    };
    let mut game = Game::new(usize::from(args.map - 1), params).context("starting game")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut game);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// The terminal is taken over by the game, so logs only go to a file when one is given.
fn init_tracing(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file =
        File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, game: &mut Game) -> anyhow::Result<()> {
    let mut renderer = Renderer::new(game.grid().cols(), game.grid().rows());
    let (tick_ms, render_fps) = read_speed_settings();
    let tick_time = Duration::from_millis(tick_ms);
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('r') if game.phase() != Phase::Playing => {
                        game.restart();
                        renderer.needs_full = true;
                    }
                    code => {
                        if let Some(dir) = direction_for(code) {
                            game.apply_player_direction(dir);
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_time {
            last_tick = Instant::now();
            game.tick();
        }
        render(stdout, game, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
        _ => None,
    }
}

fn read_speed_settings() -> (u64, u64) {
    let tick_ms = std::env::var("PACMAN_TICK_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_TICK_MS);
    let render_fps = std::env::var("PACMAN_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (tick_ms, render_fps)
}

fn render(stdout: &mut Stdout, game: &Game, renderer: &mut Renderer) -> io::Result<()> {
    let width = game.grid().cols();
    let height = game.grid().rows();
    let needed_h = (height + 2) as u16;
    let needed_w = (width * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let hud = format!(
        "Score: {}/{}  Lives: {}  Power: {}  (q to quit)",
        game.score(),
        game.win_target(),
        game.lives(),
        game.frightened_ticks_left()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for y in 0..height {
        for x in 0..width {
            let cell = cell_for(game, Cell::new(y, x));
            let idx = y * width + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }

    render_banner(stdout, game, renderer)?;
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn render_banner(stdout: &mut Stdout, game: &Game, renderer: &mut Renderer) -> io::Result<()> {
    let banner = match game.phase() {
        Phase::Playing => String::new(),
        Phase::Won => format!("YOU WIN - Final Score: {}", game.score()),
        Phase::Lost => format!("GAME OVER - Final Score: {}", game.score()),
    };
    if !renderer.needs_full && banner == renderer.last_banner {
        return Ok(());
    }
    let below = renderer.origin_y + game.grid().rows() as u16;
    stdout.queue(MoveTo(renderer.origin_x, below))?;
    stdout.queue(Clear(ClearType::CurrentLine))?;
    if !banner.is_empty() {
        stdout.queue(SetForegroundColor(Color::Yellow))?;
        stdout.queue(Print(format!("{banner} (r to play again, q to quit)")))?;
        stdout.queue(ResetColor)?;
    }
    renderer.last_banner = banner;
    Ok(())
}

fn cell_for(game: &Game, cell: Cell) -> ScreenCell {
    if game.player().cell(game.grid()) == Some(cell) {
        return ScreenCell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = game
        .ghosts()
        .iter()
        .find(|g| g.cell(game.grid()) == Some(cell))
    {
        return match game.ghost_look(ghost.kind) {
            GhostLook::Frightened => ScreenCell {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            },
            GhostLook::Eaten => ScreenCell {
                glyph: Glyph::Eyes,
                color: Color::White,
            },
            GhostLook::Normal => ScreenCell {
                glyph: Glyph::Ghost,
                color: ghost_color(ghost.kind),
            },
        };
    }
    match game.grid().tile(cell) {
        Some(Tile::Wall(shape)) => ScreenCell {
            glyph: Glyph::Wall(shape),
            color: Color::Blue,
        },
        Some(Tile::Gate) => ScreenCell {
            glyph: Glyph::Gate,
            color: Color::Cyan,
        },
        Some(Tile::Pellet) => ScreenCell {
            glyph: Glyph::Pellet,
            color: Color::White,
        },
        Some(Tile::PowerPellet) => ScreenCell {
            glyph: Glyph::Power,
            color: Color::Magenta,
        },
        Some(Tile::Empty | Tile::Tunnel) | None => ScreenCell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
    }
}

fn ghost_color(kind: GhostKind) -> Color {
    match kind {
        GhostKind::Blinky => Color::Red,
        GhostKind::Pinky => Color::Magenta,
        GhostKind::Inky => Color::Cyan,
        GhostKind::Clyde => Color::DarkYellow,
    }
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    x: usize,
    y: usize,
    cell: ScreenCell,
) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "😃",
        Glyph::Ghost => "👻",
        Glyph::Frightened => "😱",
        Glyph::Eyes => "👀",
        Glyph::Wall(WallShape::Vertical) => "║ ",
        Glyph::Wall(WallShape::Horizontal) => "══",
        Glyph::Wall(WallShape::DownLeft) => "╗ ",
        Glyph::Wall(WallShape::DownRight) => "╔═",
        Glyph::Wall(WallShape::UpRight) => "╚═",
        Glyph::Wall(WallShape::UpLeft) => "╝ ",
        Glyph::Empty => "  ",
        Glyph::Pellet => "· ",
        Glyph::Power => "● ",
        Glyph::Gate => "--",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
