//! Shape catalog - static Bubbloid templates
//!
//! Each template is a list of `(row, col)` offsets from the spawn anchor. Block order
//! matters: the block at index 1 is the rotation pivot. `Bar1` has a single block and
//! rotates about it.

use crate::types::ShapeKind;

/// Get the block offsets for a shape
pub fn shape_offsets(kind: ShapeKind) -> &'static [(i16, i16)] {
    match kind {
        ShapeKind::Bar1 => &[(0, 0)],
        ShapeKind::Bar2 => &[(0, 0), (0, -1)],
        ShapeKind::Bar3 => &[(0, -1), (0, 0), (0, 1)],
        ShapeKind::Cross5 => &[(0, -1), (0, 0), (0, 1), (1, 0), (-1, 0)],
        ShapeKind::J5 => &[(-1, 0), (0, 0), (1, 0), (2, 0), (2, -1)],
        ShapeKind::L5 => &[(-1, 0), (0, 0), (1, 0), (2, 0), (2, 1)],
        ShapeKind::Rectangle6 => &[(-1, 0), (0, 0), (1, 0), (-1, 1), (0, 1), (1, 1)],
        ShapeKind::V3 => &[(0, -1), (0, 0), (1, 0)],
        ShapeKind::VDiscon2 => &[(0, -1), (1, 0)],
    }
}

/// Inclusive bounding box of a template's offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeBounds {
    pub min_row: i16,
    pub max_row: i16,
    pub min_col: i16,
    pub max_col: i16,
}

impl ShapeBounds {
    pub fn rows(&self) -> u16 {
        (self.max_row - self.min_row + 1) as u16
    }

    pub fn cols(&self) -> u16 {
        (self.max_col - self.min_col + 1) as u16
    }
}

/// Compute the bounding box of a shape template
pub fn shape_bounds(kind: ShapeKind) -> ShapeBounds {
    let offsets = shape_offsets(kind);
    let mut b = ShapeBounds {
        min_row: i16::MAX,
        max_row: i16::MIN,
        min_col: i16::MAX,
        max_col: i16::MIN,
    };
    for &(dr, dc) in offsets {
        b.min_row = b.min_row.min(dr);
        b.max_row = b.max_row.max(dr);
        b.min_col = b.min_col.min(dc);
        b.max_col = b.max_col.max(dc);
    }
    b
}
