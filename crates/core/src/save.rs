//! Save text codec
//!
//! ```text
//! Score: 1200
//! Level: 2
//! Orientation: LEFT
//! Grid:
//! EEEEEEEEEEEE
//! EEEEERREEEEE
//! ...
//! ```
//!
//! `Orientation:` is optional and defaults to `DOWN`. Each grid letter is a color code,
//! `E` is empty, and unknown letters load as empty.

use thiserror::Error;

use crate::grid::Grid;
use crate::types::{BubbleColor, Cell, Orientation, EMPTY_CODE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("missing `{0}:` line")]
    MissingField(&'static str),
    #[error("invalid number for `{field}`: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("unknown orientation {0:?}")]
    UnknownOrientation(String),
    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid section is empty")]
    EmptyGrid,
}

/// Persisted game: score, level, orientation and the locked cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub score: u32,
    pub level: u32,
    pub orientation: Orientation,
    pub grid: Grid,
}

impl SavedGame {
    /// Render the save text
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(
            64 + (self.grid.width() as usize + 1) * self.grid.height() as usize,
        );
        out.push_str(&format!("Score: {}\n", self.score));
        out.push_str(&format!("Level: {}\n", self.level));
        out.push_str(&format!("Orientation: {}\n", self.orientation.as_str()));
        out.push_str("Grid:\n");
        for row in self.grid.rows() {
            out.extend(row.iter().map(|c| c.map_or(EMPTY_CODE, BubbleColor::code)));
            out.push('\n');
        }
        out
    }

    /// Parse save text
    pub fn parse(text: &str) -> Result<Self, SaveError> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let score = parse_number(lines.next(), "Score")?;
        let level = parse_number(lines.next(), "Level")?;

        let mut next = lines.next();
        let mut orientation = Orientation::Down;
        if let Some(value) = next.and_then(|l| l.strip_prefix("Orientation:")) {
            let value = value.trim();
            orientation = Orientation::from_str(value)
                .ok_or_else(|| SaveError::UnknownOrientation(value.to_string()))?;
            next = lines.next();
        }

        if next != Some("Grid:") {
            return Err(SaveError::MissingField("Grid"));
        }

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for line in lines {
            let row: Vec<Cell> = line.chars().map(BubbleColor::from_code).collect();
            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    return Err(SaveError::RaggedRow {
                        row: rows.len(),
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        let grid = Grid::from_rows(&rows).ok_or(SaveError::EmptyGrid)?;
        Ok(Self {
            score,
            level,
            orientation,
            grid,
        })
    }
}

fn parse_number(line: Option<&str>, field: &'static str) -> Result<u32, SaveError> {
    let value = line
        .and_then(|l| l.strip_prefix(field))
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or(SaveError::MissingField(field))?
        .trim();
    value.parse().map_err(|_| SaveError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
