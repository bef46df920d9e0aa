//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, save files).
//!
//! # Grid Dimensions
//!
//! The default playfield is 12 columns by 22 rows. Unlike a classic falling-block
//! board the dimensions are *not* constant: every lock turns the board 90°, which
//! swaps width and height.
//!
//! # Game Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 500 | Gravity interval driven by the external timer |
//! | `SPAWN_MARGIN` | 3 | Lines between the spawn edge and a new piece |
//! | `POWERUP_LIFETIME_TICKS` | 36 | Ticks before an uncollected power-up expires |
//! | `POWERUP_SPAWN_PERCENT` | 90 | Chance a spawn attempt places a power-up |
//! | `POWERUP_PLACEMENT_ATTEMPTS` | 100 | Random probes before placement gives up |
//! | `POWERUP_EXCLUDED_LINES` | 4 | Lines near the spawn edge that never hold a power-up |
//! | `POWERUP_CLEAR_LINE_DEPTH` | 2 | Lines in from the floor edge removed by `ClearLine` |
//! | `EXTRA_POINTS_BONUS` | 500 | Flat bonus awarded by `ExtraPoints` |
//! | `LEVEL_SCORE_STEP` | 1000 | Points per level |
//!
//! # Orientation Cycle
//!
//! Gravity advances `Down → Left → Up → Right → Down` after every lock.
//!
//! # Examples
//!
//! ```
//! use bubble_swerve_types::{Direction, GameAction, Orientation, ShapeKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let o = Orientation::Down;
//! assert_eq!(o.next(), Orientation::Left);
//! assert_eq!(o.gravity(), Direction::Down);
//!
//! assert_eq!(ShapeKind::from_str("bar3"), Some(ShapeKind::Bar3));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(GRID_WIDTH, 12);
//! assert_eq!(GRID_HEIGHT, 22);
//! ```

/// Default grid width in cells (12 columns)
pub const GRID_WIDTH: u16 = 12;

/// Default grid height in cells (22 rows)
pub const GRID_HEIGHT: u16 = 22;

/// Smallest width or height a grid may have (room for the spawn margin plus the tallest shape)
pub const MIN_GRID_DIM: u16 = 8;

/// Largest width or height a grid may have
pub const MAX_GRID_DIM: u16 = 128;

/// Nominal gravity interval in milliseconds
pub const TICK_MS: u32 = 500;

/// Lines left between the spawn edge and the nearest cell of a new piece
pub const SPAWN_MARGIN: u16 = 3;

/// Ticks an uncollected power-up stays on the board
pub const POWERUP_LIFETIME_TICKS: u32 = 36;

/// Probability (percent) that a spawn attempt places a power-up
pub const POWERUP_SPAWN_PERCENT: u32 = 90;

/// Random cells probed before a power-up spawn is abandoned
pub const POWERUP_PLACEMENT_ATTEMPTS: u32 = 100;

/// Lines nearest the spawn edge that never receive a power-up
pub const POWERUP_EXCLUDED_LINES: u16 = 4;

/// How far in from the floor edge the `ClearLine` power-up removes a line
pub const POWERUP_CLEAR_LINE_DEPTH: u16 = 2;

/// Flat bonus for the `ExtraPoints` power-up
pub const EXTRA_POINTS_BONUS: u32 = 500;

/// Score needed per level (`level = score / LEVEL_SCORE_STEP + 1`)
pub const LEVEL_SCORE_STEP: u32 = 1000;

/// Line clear scoring table
///
/// Base points for clearing N lines in one lock, multiplied by the current level.
/// Index 4 doubles as the cap for larger clears.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell for a successful soft drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell travelled by a hard drop
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Maximum number of blocks in one piece
pub const MAX_PIECE_BLOCKS: usize = 6;


/// Compass direction that currently acts as gravity, in the grid's own frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Down,
    Left,
    Up,
    Right,
}

impl Orientation {
    /// The fixed lock-by-lock sequence starting from `Down`.
    pub const CYCLE: [Orientation; 4] = [
        Orientation::Down,
        Orientation::Left,
        Orientation::Up,
        Orientation::Right,
    ];

    /// Next orientation in the fixed game-rule cycle.
    pub fn next(self) -> Self {
        match self {
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
        }
    }

    /// Orientation after `n` board rotations starting from `Down`.
    pub fn after_locks(n: usize) -> Self {
        Self::CYCLE[n % 4]
    }

    /// Direction a piece falls in.
    pub fn gravity(self) -> Direction {
        match self {
            Orientation::Down => Direction::Down,
            Orientation::Left => Direction::Left,
            Orientation::Up => Direction::Up,
            Orientation::Right => Direction::Right,
        }
    }

    /// Edge new pieces appear at (opposite of gravity).
    pub fn spawn_edge(self) -> Direction {
        self.gravity().opposite()
    }

    /// `true` when lines run along rows (gravity is vertical).
    pub fn clears_rows(self) -> bool {
        matches!(self, Orientation::Down | Orientation::Up)
    }

    /// Player-facing "left" for this gravity: gravity turned 90° clockwise on screen.
    pub fn lateral_left(self) -> Direction {
        self.gravity().clockwise()
    }

    /// Player-facing "right" for this gravity.
    pub fn lateral_right(self) -> Direction {
        self.lateral_left().opposite()
    }

    /// Parse orientation from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "down" => Some(Orientation::Down),
            "left" => Some(Orientation::Left),
            "up" => Some(Orientation::Up),
            "right" => Some(Orientation::Right),
            _ => None,
        }
    }

    /// Upper-case name used by the save format
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Down => "DOWN",
            Orientation::Left => "LEFT",
            Orientation::Up => "UP",
            Orientation::Right => "RIGHT",
        }
    }

    /// Arrow glyph pointing along gravity
    pub fn arrow(&self) -> char {
        match self {
            Orientation::Down => '↓',
            Orientation::Left => '←',
            Orientation::Up => '↑',
            Orientation::Right => '→',
        }
    }
}

/// Unit step on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` delta of one step.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Quarter turn clockwise as seen on screen (row grows downward).
    pub fn clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// The nine Bubbloid templates
///
/// Names follow the silhouette and block count:
/// - **Bar1/Bar2/Bar3**: straight bars of one to three bubbles
/// - **Cross5**: plus sign
/// - **J5/L5**: tall hooks
/// - **Rectangle6**: 3x2 block
/// - **V3**: small corner
/// - **VDiscon2**: two diagonal bubbles that do not touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Bar1,
    Bar2,
    Bar3,
    Cross5,
    J5,
    L5,
    Rectangle6,
    V3,
    VDiscon2,
}

impl ShapeKind {
    /// Catalog order; spawning picks uniformly by index.
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Bar1,
        ShapeKind::Bar3,
        ShapeKind::L5,
        ShapeKind::Bar2,
        ShapeKind::Cross5,
        ShapeKind::V3,
        ShapeKind::J5,
        ShapeKind::Rectangle6,
        ShapeKind::VDiscon2,
    ];

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use bubble_swerve_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("Cross5"), Some(ShapeKind::Cross5));
    /// assert_eq!(ShapeKind::from_str("vdiscon2"), Some(ShapeKind::VDiscon2));
    /// assert_eq!(ShapeKind::from_str("tee"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bar1" => Some(ShapeKind::Bar1),
            "bar2" => Some(ShapeKind::Bar2),
            "bar3" => Some(ShapeKind::Bar3),
            "cross5" => Some(ShapeKind::Cross5),
            "j5" => Some(ShapeKind::J5),
            "l5" => Some(ShapeKind::L5),
            "rectangle6" => Some(ShapeKind::Rectangle6),
            "v3" => Some(ShapeKind::V3),
            "vdiscon2" => Some(ShapeKind::VDiscon2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Bar1 => "bar1",
            ShapeKind::Bar2 => "bar2",
            ShapeKind::Bar3 => "bar3",
            ShapeKind::Cross5 => "cross5",
            ShapeKind::J5 => "j5",
            ShapeKind::L5 => "l5",
            ShapeKind::Rectangle6 => "rectangle6",
            ShapeKind::V3 => "v3",
            ShapeKind::VDiscon2 => "vdiscon2",
        }
    }

    /// Fixed color every piece of this shape is drawn in.
    pub fn color(self) -> BubbleColor {
        match self {
            ShapeKind::Bar1 => BubbleColor::Violet,
            ShapeKind::Bar3 => BubbleColor::Sky,
            ShapeKind::L5 => BubbleColor::Blue,
            ShapeKind::Bar2 => BubbleColor::Aqua,
            ShapeKind::Cross5 => BubbleColor::Pink,
            ShapeKind::V3 => BubbleColor::Coral,
            ShapeKind::J5 => BubbleColor::Navy,
            ShapeKind::Rectangle6 => BubbleColor::Purple,
            ShapeKind::VDiscon2 => BubbleColor::Indigo,
        }
    }
}

/// Fixed bubble palette
///
/// Each color has a one-letter code used by the save format. `E` is reserved
/// for empty cells and is never a color code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BubbleColor {
    Violet,
    Sky,
    Blue,
    Aqua,
    Pink,
    Coral,
    Navy,
    Purple,
    Indigo,
}

/// Save-format letter for an empty cell
pub const EMPTY_CODE: char = 'E';

impl BubbleColor {
    pub const ALL: [BubbleColor; 9] = [
        BubbleColor::Violet,
        BubbleColor::Sky,
        BubbleColor::Blue,
        BubbleColor::Aqua,
        BubbleColor::Pink,
        BubbleColor::Coral,
        BubbleColor::Navy,
        BubbleColor::Purple,
        BubbleColor::Indigo,
    ];

    /// Save-format letter
    pub fn code(self) -> char {
        match self {
            BubbleColor::Violet => 'R',
            BubbleColor::Sky => 'B',
            BubbleColor::Blue => 'Y',
            BubbleColor::Aqua => 'C',
            BubbleColor::Pink => 'L',
            BubbleColor::Coral => 'P',
            BubbleColor::Navy => 'Q',
            BubbleColor::Purple => 'W',
            BubbleColor::Indigo => 'Z',
        }
    }

    /// Inverse of [`BubbleColor::code`]; `None` for `E` and unknown letters.
    pub fn from_code(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.code() == c)
    }

    /// 24-bit display color `(r, g, b)`
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            BubbleColor::Violet => (175, 18, 202),
            BubbleColor::Sky => (101, 216, 246),
            BubbleColor::Blue => (74, 125, 255),
            BubbleColor::Aqua => (79, 255, 254),
            BubbleColor::Pink => (230, 56, 174),
            BubbleColor::Coral => (249, 116, 122),
            BubbleColor::Navy => (45, 50, 116),
            BubbleColor::Purple => (99, 32, 178),
            BubbleColor::Indigo => (65, 84, 203),
        }
    }
}

/// A cell on the game grid
///
/// - `None`: Empty cell
/// - `Some(BubbleColor)`: Cell filled with a locked bubble of that color
pub type Cell = Option<BubbleColor>;

/// Power-up kinds
///
/// Only `ClearLine` and `ExtraPoints` have an effect; the other two are
/// collectable but inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    ClearLine,
    SlowSpeed,
    ExtraPoints,
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::ClearLine,
        PowerUpKind::SlowSpeed,
        PowerUpKind::ExtraPoints,
        PowerUpKind::ExtraLife,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::ClearLine => "clearLine",
            PowerUpKind::SlowSpeed => "slowSpeed",
            PowerUpKind::ExtraPoints => "extraPoints",
            PowerUpKind::ExtraLife => "extraLife",
        }
    }

    /// Single glyph used by the terminal view
    pub fn glyph(&self) -> char {
        match self {
            PowerUpKind::ClearLine => '≡',
            PowerUpKind::SlowSpeed => '~',
            PowerUpKind::ExtraPoints => '$',
            PowerUpKind::ExtraLife => '+',
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Movement is gravity-relative: `MoveLeft` steps the piece along
/// [`Orientation::lateral_left`], whatever the current orientation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Step one cell to the player's left
    MoveLeft,
    /// Step one cell to the player's right
    MoveRight,
    /// Step one cell along gravity (+1 point when it moves)
    SoftDrop,
    /// Fall until blocked and lock (+2 points per cell)
    HardDrop,
    /// Rotate the piece 90° clockwise about its pivot
    Rotate,
    /// Turn the whole board without locking
    RotateBoard,
    /// Toggle pause state
    Pause,
    /// Reset to a fresh board
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use bubble_swerve_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateBoard"), Some(GameAction::RotateBoard));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "rotateboard" => Some(GameAction::RotateBoard),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::RotateBoard => "rotateBoard",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Core-side event emitted after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreLastEvent {
    pub locked: bool,
    pub lines_cleared: u32,
    pub line_clear_score: u32,
    /// Hard drop points earned by the move that caused this lock.
    pub drop_points: u32,
    /// Orientation after the post-lock board rotation.
    pub orientation: Orientation,
    pub game_over: bool,
}

/// What happened to a power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpOutcome {
    Spawned,
    Collected,
    Expired,
}

/// Core-side event emitted on power-up lifecycle changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpEvent {
    pub kind: PowerUpKind,
    pub outcome: PowerUpOutcome,
    pub row: i16,
    pub col: i16,
}
