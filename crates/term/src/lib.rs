//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders the
//! board into a plain framebuffer that can be flushed to a terminal backend, with
//! 2 columns per grid cell to keep bubbles roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use bubble_swerve_core as core;
pub use bubble_swerve_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
