//! Power-up module - timed overlay cells
//!
//! A power-up sits on an empty grid cell for `POWERUP_LIFETIME_TICKS` ticks. The active
//! piece collects it by covering its cell. The overlay is not part of the grid: it never
//! blocks movement and is not copied on lock.

use crate::grid::Grid;
use crate::piece::{Block, Piece};
use crate::rng::SimpleRng;
use crate::types::{
    Orientation, PowerUpKind, POWERUP_EXCLUDED_LINES, POWERUP_LIFETIME_TICKS,
    POWERUP_PLACEMENT_ATTEMPTS,
};

/// An active power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub row: i16,
    pub col: i16,
    /// Ticks elapsed since spawn
    ticks: u32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, row: i16, col: i16) -> Self {
        Self {
            kind,
            row,
            col,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn ticks_remaining(&self) -> u32 {
        POWERUP_LIFETIME_TICKS.saturating_sub(self.ticks)
    }

    /// Count one tick; returns `true` once the lifetime is used up.
    pub fn advance(&mut self) -> bool {
        self.ticks = self.ticks.saturating_add(1);
        self.ticks >= POWERUP_LIFETIME_TICKS
    }

    /// Follow a clockwise board rotation of a grid that was `old_height` rows tall.
    pub fn rotate_with_board(&mut self, old_height: u16) {
        let (row, col) = (self.row, self.col);
        self.row = col;
        self.col = old_height as i16 - 1 - row;
    }

    pub fn is_collected_by(&self, piece: &Piece) -> bool {
        piece.occupies(self.row, self.col)
    }
}

/// Map `(depth, lateral)` to grid coordinates, with depth measured from the spawn edge.
fn cell_at_depth(grid: &Grid, orientation: Orientation, depth: u16, lateral: u16) -> Block {
    let (w, h) = (grid.width() as i16, grid.height() as i16);
    let (d, l) = (depth as i16, lateral as i16);
    match orientation {
        Orientation::Down => Block::new(d, l),
        Orientation::Up => Block::new(h - 1 - d, l),
        Orientation::Left => Block::new(l, w - 1 - d),
        Orientation::Right => Block::new(l, d),
    }
}

/// Probe random cells outside the spawn band for an empty one the piece does not cover.
///
/// Gives up after `POWERUP_PLACEMENT_ATTEMPTS` probes.
pub fn find_power_up_cell(
    grid: &Grid,
    orientation: Orientation,
    piece: Option<&Piece>,
    rng: &mut SimpleRng,
) -> Option<Block> {
    let depth_span = grid
        .line_count(orientation)
        .checked_sub(POWERUP_EXCLUDED_LINES)
        .filter(|&n| n > 0)?;
    let lateral_span = grid.line_len(orientation);

    for _ in 0..POWERUP_PLACEMENT_ATTEMPTS {
        let depth = POWERUP_EXCLUDED_LINES + rng.next_range(depth_span as u32) as u16;
        let lateral = rng.next_range(lateral_span as u32) as u16;
        let cell = cell_at_depth(grid, orientation, depth, lateral);
        let covered = piece.is_some_and(|p| p.occupies(cell.row, cell.col));
        if grid.is_empty(cell.row, cell.col) && !covered {
            return Some(cell);
        }
    }
    None
}
