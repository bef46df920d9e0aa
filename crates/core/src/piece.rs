//! Piece module - the active Bubbloid
//!
//! A piece is an ordered list of blocks sharing one color. Movement and rotation are
//! validated against the grid before any block is touched, so a rejected call leaves the
//! piece exactly as it was.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::shapes::shape_offsets;
use crate::types::{BubbleColor, Direction, ShapeKind, MAX_PIECE_BLOCKS};

/// Grid position of one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub row: i16,
    pub col: i16,
}

impl Block {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    shape: ShapeKind,
    color: BubbleColor,
    blocks: ArrayVec<Block, MAX_PIECE_BLOCKS>,
    /// Set when a `Down` move was blocked.
    stuck: bool,
}

impl Piece {
    /// Instantiate `shape` with its template offsets applied to `anchor`.
    ///
    /// The cells are not checked against any grid.
    pub fn spawn(shape: ShapeKind, anchor: Block) -> Self {
        let blocks = shape_offsets(shape)
            .iter()
            .map(|&(dr, dc)| Block::new(anchor.row + dr, anchor.col + dc))
            .collect();
        Self {
            shape,
            color: shape.color(),
            blocks,
            stuck: false,
        }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn color(&self) -> BubbleColor {
        self.color
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    /// Current `(row, col)` of every block
    pub fn locations(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.blocks.iter().map(|b| (b.row, b.col))
    }

    /// Does any block sit on `(row, col)`?
    pub fn occupies(&self, row: i16, col: i16) -> bool {
        self.blocks.iter().any(|b| b.row == row && b.col == col)
    }

    /// Every block is in bounds and on an empty cell.
    pub fn fits(&self, grid: &Grid) -> bool {
        self.blocks.iter().all(|b| grid.is_empty(b.row, b.col))
    }

    /// Check if every block can step one cell in `direction`
    pub fn can_move(&self, grid: &Grid, direction: Direction) -> bool {
        self.blocks.iter().all(|b| {
            let next = b.step(direction);
            grid.is_empty(next.row, next.col)
        })
    }

    /// Step one cell in `direction` if the move is valid.
    pub fn move_by(&mut self, grid: &Grid, direction: Direction) -> bool {
        if !self.can_move(grid, direction) {
            if direction == Direction::Down {
                self.stuck = true;
            }
            return false;
        }
        self.shift(direction);
        true
    }

    /// Translate without validation.
    pub(crate) fn shift(&mut self, direction: Direction) {
        for b in &mut self.blocks {
            *b = b.step(direction);
        }
        self.stuck = false;
    }

    /// Pivot for rotation: block 1, or block 0 for single-block pieces.
    fn pivot(&self) -> Option<Block> {
        self.blocks.get(1).or_else(|| self.blocks.first()).copied()
    }

    /// Targets of a 90° clockwise turn about the pivot, in block order.
    ///
    /// With the pivot at `(px, py)` in `(col, row)` terms, a block at offset `(dx, dy)`
    /// moves to `(px - dy, py + dx)`.
    pub fn rotated_coordinates(&self) -> ArrayVec<Block, MAX_PIECE_BLOCKS> {
        let Some(pivot) = self.pivot() else {
            return ArrayVec::new();
        };
        self.blocks
            .iter()
            .map(|b| {
                let dx = b.col - pivot.col;
                let dy = b.row - pivot.row;
                Block::new(pivot.row + dx, pivot.col - dy)
            })
            .collect()
    }

    /// Check rotation targets against the grid.
    ///
    /// # Panics
    ///
    /// Panics if `coords` does not hold exactly one target per block.
    pub fn can_rotate(&self, grid: &Grid, coords: &[Block]) -> bool {
        assert_eq!(
            coords.len(),
            self.blocks.len(),
            "rotation targets do not match block count for {:?}",
            self.shape
        );
        coords.iter().all(|b| grid.is_empty(b.row, b.col))
    }

    /// Rotate clockwise about the pivot if every target is free.
    pub fn rotate(&mut self, grid: &Grid) -> bool {
        let coords = self.rotated_coordinates();
        if !self.can_rotate(grid, &coords) {
            return false;
        }
        self.blocks = coords;
        true
    }
}
