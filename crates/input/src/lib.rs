//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key events
//! into [`crate::types::GameAction`]s, taking the current gravity into account, and
//! into front-end [`AppCommand`]s (quit, save, load).

pub mod map;

pub use bubble_swerve_types as types;

pub use map::{action_for_direction, app_command, arrow_direction, handle_key_event, should_quit, AppCommand};
