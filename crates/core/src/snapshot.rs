use arrayvec::ArrayVec;

use crate::game_state::Phase;
use crate::piece::{Block, Piece};
use crate::power_up::PowerUp;
use crate::types::{
    BubbleColor, Cell, Orientation, PowerUpKind, ShapeKind, GRID_HEIGHT, GRID_WIDTH,
    MAX_PIECE_BLOCKS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub shape: ShapeKind,
    pub color: BubbleColor,
    pub blocks: ArrayVec<Block, MAX_PIECE_BLOCKS>,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            shape: value.shape(),
            color: value.color(),
            blocks: value.blocks().iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpSnapshot {
    pub kind: PowerUpKind,
    pub row: i16,
    pub col: i16,
    pub ticks_remaining: u32,
}

impl From<&PowerUp> for PowerUpSnapshot {
    fn from(value: &PowerUp) -> Self {
        Self {
            kind: value.kind,
            row: value.row,
            col: value.col,
            ticks_remaining: value.ticks_remaining(),
        }
    }
}

/// Read-only copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major grid cells, `height * width` long
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub power_up: Option<PowerUpSnapshot>,
    pub orientation: Orientation,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = GRID_WIDTH;
        self.height = GRID_HEIGHT;
        self.cells.clear();
        self.cells
            .resize(GRID_WIDTH as usize * GRID_HEIGHT as usize, None);
        self.active = None;
        self.power_up = None;
        self.orientation = Orientation::Down;
        self.phase = Phase::Spawning;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.pieces_locked = 0;
        self.paused = false;
        self.game_over = false;
    }

    /// Locked cell at `(row, col)`; `None` for empty or out of bounds
    pub fn cell(&self, row: i16, col: i16) -> Cell {
        if row < 0 || col < 0 || row as u16 >= self.height || col as u16 >= self.width {
            return None;
        }
        self.cells[row as usize * self.width as usize + col as usize]
    }

    /// Color of the active piece block at `(row, col)`, if any
    pub fn active_at(&self, row: i16, col: i16) -> Option<BubbleColor> {
        let active = self.active.as_ref()?;
        active
            .blocks
            .iter()
            .any(|b| b.row == row && b.col == col)
            .then_some(active.color)
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            active: None,
            power_up: None,
            orientation: Orientation::Down,
            phase: Phase::Spawning,
            score: 0,
            level: 1,
            lines: 0,
            pieces_locked: 0,
            paused: false,
            game_over: false,
        };
        s.clear();
        s
    }
}
