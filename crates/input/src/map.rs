//! Key mapping from terminal events to game actions.
//!
//! Arrow keys act on screen directions. Which game action an arrow means depends on
//! the current gravity: the arrow pointing along gravity soft-drops, the opposite arrow
//! rotates, and the two perpendicular arrows move the piece the way they point.

use crate::types::{Direction, GameAction, Orientation};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Front-end commands that are not game actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Quit,
    Save,
    Load,
}

/// Screen direction of an arrow-like key (arrows, `hjkl`, `wasd`).
pub fn arrow_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Direction::Right),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Direction::Down),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Direction::Up),
        _ => None,
    }
}

/// Game action for a screen direction under `orientation`.
pub fn action_for_direction(direction: Direction, orientation: Orientation) -> GameAction {
    let gravity = orientation.gravity();
    if direction == gravity {
        GameAction::SoftDrop
    } else if direction == gravity.opposite() {
        GameAction::Rotate
    } else if direction == orientation.lateral_left() {
        GameAction::MoveLeft
    } else {
        GameAction::MoveRight
    }
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent, orientation: Orientation) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    if let Some(direction) = arrow_direction(key.code) {
        return Some(action_for_direction(direction, orientation));
    }

    match key.code {
        // Same clockwise transform as the rotate arrow
        KeyCode::Char('q' | 'Q') => Some(GameAction::Rotate),

        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p' | 'P') | KeyCode::Esc => Some(GameAction::Pause),
        KeyCode::Char('r' | 'R') => Some(GameAction::RotateBoard),
        KeyCode::Char('n' | 'N') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Map keyboard input to front-end commands.
pub fn app_command(key: KeyEvent) -> Option<AppCommand> {
    if should_quit(key) {
        return Some(AppCommand::Quit);
    }
    match key.code {
        KeyCode::F(5) => Some(AppCommand::Save),
        KeyCode::F(9) => Some(AppCommand::Load),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('x') | KeyCode::Char('X'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
