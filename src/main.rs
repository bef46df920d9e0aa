//! Bubble Swerve terminal runner (default binary).
//!
//! It uses crossterm for input and the framebuffer-based renderer from the `term`
//! crate. The board turns 90° after every lock; arrow keys always act in screen space.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyEventKind};

use bubble_swerve::core::{GameConfig, GameSnapshot, GameState, PowerUpSelection, SavedGame};
use bubble_swerve::input::{app_command, handle_key_event, AppCommand};
use bubble_swerve::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use bubble_swerve::types::{PowerUpOutcome, GRID_HEIGHT, GRID_WIDTH, TICK_MS};

/// Falling bubbles on a board that swerves 90 degrees after every lock.
#[derive(Debug, Parser)]
#[command(name = "bubble-swerve", version, about, long_about = None)]
struct Args {
    /// Seed for piece and power-up selection.
    #[arg(long, default_value_t = 1)]
    seed: u32,
    /// Grid columns at the start of a game.
    #[arg(long, value_name = "COLUMNS", default_value_t = GRID_WIDTH)]
    width: u16,
    /// Grid rows at the start of a game.
    #[arg(long, value_name = "ROWS", default_value_t = GRID_HEIGHT)]
    height: u16,
    /// Milliseconds between gravity ticks.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = TICK_MS as u64,
        value_parser = clap::value_parser!(u64).range(10..=10_000)
    )]
    tick_ms: u64,
    /// Which power-ups appear on the board.
    #[arg(long = "power-ups", value_enum, default_value_t = PowerUpsArg::Random)]
    power_ups: PowerUpsArg,
    /// File written by F5 and read by F9.
    #[arg(long = "save-file", value_name = "PATH", default_value = "bubble-swerve.save")]
    save_file: PathBuf,
    /// Restore a saved game before starting.
    #[arg(long, value_name = "PATH")]
    load: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PowerUpsArg {
    Random,
    ClearLine,
    Off,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let config = GameConfig::default()
            .with_seed(self.seed)
            .with_size(self.width, self.height);
        match self.power_ups {
            PowerUpsArg::Random => config.with_power_ups(PowerUpSelection::Random),
            PowerUpsArg::ClearLine => config.with_power_ups(PowerUpSelection::ClearLineOnly),
            PowerUpsArg::Off => config.without_power_ups(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut game = GameState::new(args.game_config());
    game.start();
    if let Some(path) = &args.load {
        load_into(&mut game, path)?;
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &args);

    // Always try to restore terminal state.
    let _ = term.exit();

    eprintln!(
        "score {}  level {}  lines {}  pieces {}",
        game.score(),
        game.level(),
        game.lines(),
        game.pieces_locked()
    );
    result
}

fn load_into(game: &mut GameState, path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading save file {}", path.display()))?;
    let saved =
        SavedGame::parse(&text).with_context(|| format!("parsing save file {}", path.display()))?;
    game.restore(saved)
        .with_context(|| format!("restoring save file {}", path.display()))?;
    Ok(())
}

fn save_from(game: &GameState, path: &Path) -> Result<()> {
    std::fs::write(path, game.to_saved().to_text())
        .with_context(|| format!("writing save file {}", path.display()))
}

fn run(term: &mut TerminalRenderer, game: &mut GameState, args: &Args) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut status = String::from("arrows move, space drops");

    let tick_duration = Duration::from_millis(args.tick_ms);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into_with_status(&snap, Some(&status), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match app_command(key) {
                        Some(AppCommand::Quit) => return Ok(()),
                        Some(AppCommand::Save) => {
                            status = match save_from(game, &args.save_file) {
                                Ok(()) => format!("saved to {}", args.save_file.display()),
                                Err(err) => format!("save failed: {err:#}"),
                            };
                        }
                        Some(AppCommand::Load) => {
                            status = match load_into(game, &args.save_file) {
                                Ok(()) => format!("loaded {}", args.save_file.display()),
                                Err(err) => format!("load failed: {err:#}"),
                            };
                        }
                        None => {
                            if let Some(action) = handle_key_event(key, game.orientation()) {
                                game.apply_action(action);
                            }
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick();
        }

        update_status(game, &mut status);
    }
}

/// Replace the status line with the most recent core event, if any.
fn update_status(game: &mut GameState, status: &mut String) {
    if let Some(ev) = game.take_last_event() {
        *status = if ev.game_over {
            String::from("game over, N restarts")
        } else if ev.lines_cleared > 0 {
            format!(
                "{} line(s) +{}, gravity {}",
                ev.lines_cleared,
                ev.line_clear_score,
                ev.orientation.as_str()
            )
        } else {
            format!("locked, gravity {}", ev.orientation.as_str())
        };
    }
    if let Some(ev) = game.take_power_up_event() {
        let what = match ev.outcome {
            PowerUpOutcome::Spawned => "appeared",
            PowerUpOutcome::Collected => "collected",
            PowerUpOutcome::Expired => "expired",
        };
        *status = format!("{} {}", ev.kind.as_str(), what);
    }
}
