//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the rules of Bubble Swerve: the rotating grid, the active
//! Bubbloid, the lock sequence, scoring, and the power-up overlay. It has **no
//! dependencies** on terminal, input, or file I/O.
//!
//! # Module Structure
//!
//! - [`grid`]: playfield with mutable dimensions, per-axis line clears, 90° rotation
//! - [`shapes`]: the nine Bubbloid templates
//! - [`piece`]: validated movement and pivot rotation of the active piece
//! - [`game_state`]: the state machine driven by `tick()` and `apply_action()`
//! - [`power_up`]: timed overlay placement and lifetime
//! - [`scoring`]: line clear, drop, and level rules
//! - [`rng`]: deterministic LCG for spawns
//! - [`snapshot`]: read-only copies for renderers
//! - [`save`]: the plain-text save codec
//! - [`config`]: per-game runtime knobs
//!
//! # Game Rules
//!
//! - After **every** lock the board turns 90° and gravity advances
//!   `Down → Left → Up → Right`.
//! - Lines are rows while gravity is vertical and columns while it is horizontal.
//! - A lock that leaves a cell on the spawn edge ends the game.
//!
//! # Example
//!
//! ```
//! use bubble_swerve_core::{GameConfig, GameState};
//! use bubble_swerve_types::{GameAction, Orientation};
//!
//! let mut game = GameState::new(GameConfig::default().with_seed(12345));
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.orientation(), Orientation::Left);
//! ```
//!
//! # Timing
//!
//! The core has no clock. A driver calls [`GameState::tick`] once per interval
//! (nominally [`types::TICK_MS`]) and [`GameState::apply_action`] on input, never both
//! at once.

pub mod config;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod power_up;
pub mod rng;
pub mod save;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use bubble_swerve_types as types;

// Re-export commonly used types for convenience
pub use config::{GameConfig, PowerUpSelection};
pub use game_state::{GameState, Phase, RestoreError};
pub use grid::Grid;
pub use piece::{Block, Piece};
pub use power_up::PowerUp;
pub use rng::SimpleRng;
pub use save::{SaveError, SavedGame};
pub use scoring::{drop_points, level_for_score, line_clear_points};
pub use shapes::{shape_bounds, shape_offsets, ShapeBounds};
pub use snapshot::{ActiveSnapshot, GameSnapshot, PowerUpSnapshot};
