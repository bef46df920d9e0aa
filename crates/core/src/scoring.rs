//! Scoring module - line clear, drop, and level rules
//!
//! Line clears pay `LINE_SCORES[n] * level` using the level before the clear, capped at
//! the 4-line value. Level is derived from score alone.

use crate::types::{HARD_DROP_POINTS_PER_CELL, LEVEL_SCORE_STEP, LINE_SCORES, SOFT_DROP_POINTS};

/// Points for clearing `lines` lines in one lock at `level`
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// Level implied by a score: `score / 1000 + 1`
pub fn level_for_score(score: u32) -> u32 {
    score / LEVEL_SCORE_STEP + 1
}

/// Points for a drop of `cells` cells
pub fn drop_points(cells: u32, hard_drop: bool) -> u32 {
    if hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS_PER_CELL)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}
