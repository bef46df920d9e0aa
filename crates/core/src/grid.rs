//! Grid module - the rotating playfield
//!
//! The grid is a `height x width` matrix of cells stored row-major in a flat vector.
//! Coordinates are `(row, col)` with row 0 at the top. Both dimensions change on every
//! board rotation, so every coordinate is re-checked against the current size.
//!
//! Lines run along rows while gravity is vertical (`Down`/`Up`) and along columns while it
//! is horizontal (`Left`/`Right`). Clearing a line shifts everything on its spawn side one
//! step toward gravity and leaves an empty line at the spawn edge.

use crate::types::{BubbleColor, Cell, Orientation};

/// The game grid with mutable dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Build a grid from rows of cells.
    ///
    /// Returns `None` when there are no rows, a row is empty, or the rows differ in length.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let width = u16::try_from(width).ok()?;
        let height = u16::try_from(rows.len()).ok()?;
        let cells = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Some(Self {
            width,
            height,
            cells,
        })
    }

    #[inline(always)]
    fn index(&self, row: i16, col: i16) -> Option<usize> {
        if !self.is_in_bounds(row, col) {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// `0 <= row < height && 0 <= col < width`
    pub fn is_in_bounds(&self, row: i16, col: i16) -> bool {
        row >= 0 && col >= 0 && (row as u16) < self.height && (col as u16) < self.width
    }

    /// Get cell at `(row, col)`; `None` if out of bounds
    pub fn get(&self, row: i16, col: i16) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// In bounds and unoccupied
    pub fn is_empty(&self, row: i16, col: i16) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// In bounds and occupied. Out-of-bounds reads as not occupied.
    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Paint a cell; no-op when out of bounds
    pub fn set_cell(&mut self, row: i16, col: i16, color: BubbleColor) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = Some(color);
        }
    }

    /// Empty a cell; no-op when out of bounds
    pub fn clear_cell(&mut self, row: i16, col: i16) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = None;
        }
    }

    /// Empty every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of lines along the axis implied by `orientation`.
    pub fn line_count(&self, orientation: Orientation) -> u16 {
        if orientation.clears_rows() {
            self.height
        } else {
            self.width
        }
    }

    /// Length of one line along the axis implied by `orientation`.
    pub fn line_len(&self, orientation: Orientation) -> u16 {
        if orientation.clears_rows() {
            self.width
        } else {
            self.height
        }
    }

    fn is_row_full(&self, row: u16) -> bool {
        let start = row as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .all(|c| c.is_some())
    }

    fn is_col_full(&self, col: u16) -> bool {
        (0..self.height as usize).all(|r| self.cells[r * self.width as usize + col as usize].is_some())
    }

    /// Check whether line `index` is completely occupied.
    ///
    /// `Down`/`Up` test row `index`; `Left`/`Right` test column `index`.
    pub fn is_line_full(&self, orientation: Orientation, index: u16) -> bool {
        if index >= self.line_count(orientation) {
            return false;
        }
        if orientation.clears_rows() {
            self.is_row_full(index)
        } else {
            self.is_col_full(index)
        }
    }

    /// Remove line `index` and shift its spawn side one step toward gravity.
    ///
    /// | Orientation | Removed | Shifted | Emptied |
    /// |-------------|---------|---------|---------|
    /// | `Down` | row `index` | rows above, downward | row 0 |
    /// | `Up` | row `index` | rows below, upward | last row |
    /// | `Left` | column `index` | columns to the right, leftward | last column |
    /// | `Right` | column `index` | columns to the left, rightward | column 0 |
    ///
    /// The line does not have to be full. Out-of-range indices are ignored.
    pub fn clear_line(&mut self, orientation: Orientation, index: u16) {
        if index >= self.line_count(orientation) {
            return;
        }
        let w = self.width as usize;
        let h = self.height as usize;
        let i = index as usize;

        match orientation {
            Orientation::Down => {
                // copy_within handles the overlap
                self.cells.copy_within(0..i * w, w);
                self.cells[..w].fill(None);
            }
            Orientation::Up => {
                self.cells.copy_within((i + 1) * w..h * w, i * w);
                self.cells[(h - 1) * w..].fill(None);
            }
            Orientation::Left => {
                for row in self.cells.chunks_exact_mut(w) {
                    row.copy_within(i + 1..w, i);
                    row[w - 1] = None;
                }
            }
            Orientation::Right => {
                for row in self.cells.chunks_exact_mut(w) {
                    row.copy_within(0..i, 1);
                    row[0] = None;
                }
            }
        }
    }

    /// First full line in scan order for `orientation`, if any.
    ///
    /// `Down` scans rows bottom to top, `Up` top to bottom, `Left` columns right to left
    /// and `Right` left to right.
    pub fn find_full_line(&self, orientation: Orientation) -> Option<u16> {
        let n = self.line_count(orientation);
        match orientation {
            Orientation::Down | Orientation::Left => {
                (0..n).rev().find(|&i| self.is_line_full(orientation, i))
            }
            Orientation::Up | Orientation::Right => {
                (0..n).find(|&i| self.is_line_full(orientation, i))
            }
        }
    }

    /// Clear every full line along the gravity axis, cascading, and return the count.
    pub fn clear_full_lines(&mut self, orientation: Orientation) -> u32 {
        let mut cleared = 0;
        let n = self.line_count(orientation);
        let mut scan: Vec<u16> = (0..n).collect();
        if matches!(orientation, Orientation::Down | Orientation::Left) {
            scan.reverse();
        }

        for index in scan {
            // Re-test the same index: a full line may have shifted into it.
            while self.is_line_full(orientation, index) {
                self.clear_line(orientation, index);
                cleared += 1;
            }
        }
        cleared
    }

    /// Turn the grid 90° clockwise: old `(row, col)` lands on new `(col, height - 1 - row)`
    /// and the dimensions swap.
    pub fn rotate_clockwise(&mut self) {
        let old_w = self.width as usize;
        let old_h = self.height as usize;
        // New grid is old_h wide and old_w tall.
        let mut rotated = vec![None; self.cells.len()];
        for row in 0..old_h {
            for col in 0..old_w {
                let new_row = col;
                let new_col = old_h - 1 - row;
                rotated[new_row * old_h + new_col] = self.cells[row * old_w + col];
            }
        }
        self.cells = rotated;
        std::mem::swap(&mut self.width, &mut self.height);
    }

    /// The edge new pieces spawn from holds no locked cell.
    ///
    /// `Down` checks row 0, `Up` the last row, `Left` the last column, `Right` column 0.
    pub fn is_edge_clear(&self, orientation: Orientation) -> bool {
        let last_row = self.height.saturating_sub(1);
        let last_col = self.width.saturating_sub(1);
        match orientation {
            Orientation::Down => self.line_is_empty(true, 0),
            Orientation::Up => self.line_is_empty(true, last_row),
            Orientation::Left => self.line_is_empty(false, last_col),
            Orientation::Right => self.line_is_empty(false, 0),
        }
    }

    fn line_is_empty(&self, is_row: bool, index: u16) -> bool {
        if is_row {
            (0..self.width).all(|c| !self.is_occupied(index as i16, c as i16))
        } else {
            (0..self.height).all(|r| !self.is_occupied(r as i16, index as i16))
        }
    }

    /// Index of the line `depth` lines in from the gravity (floor) edge.
    pub fn line_from_floor(&self, orientation: Orientation, depth: u16) -> Option<u16> {
        let n = self.line_count(orientation);
        if depth >= n {
            return None;
        }
        Some(match orientation {
            Orientation::Down | Orientation::Right => n - 1 - depth,
            Orientation::Up | Orientation::Left => depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Cell = Some(BubbleColor::Sky);

    fn fill_row(grid: &mut Grid, row: i16) {
        for col in 0..grid.width() as i16 {
            grid.set_cell(row, col, BubbleColor::Sky);
        }
    }

    fn fill_col(grid: &mut Grid, col: i16) {
        for row in 0..grid.height() as i16 {
            grid.set_cell(row, col, BubbleColor::Sky);
        }
    }

    #[test]
    fn test_bounds_and_occupancy() {
        let mut grid = Grid::new(12, 22);
        assert!(grid.is_in_bounds(0, 0));
        assert!(grid.is_in_bounds(21, 11));
        assert!(!grid.is_in_bounds(22, 0));
        assert!(!grid.is_in_bounds(0, 12));
        assert!(!grid.is_in_bounds(-1, 0));

        assert!(grid.is_empty(5, 5));
        assert!(!grid.is_empty(-1, 5));
        assert!(!grid.is_occupied(-1, 5));

        grid.set_cell(5, 5, BubbleColor::Pink);
        assert!(grid.is_occupied(5, 5));
        assert_eq!(grid.get(5, 5), Some(Some(BubbleColor::Pink)));

        grid.clear_cell(5, 5);
        assert!(grid.is_empty(5, 5));

        // Out of range writes are ignored.
        grid.set_cell(30, 30, BubbleColor::Pink);
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_clear_line_down_shifts_rows_above() {
        let mut grid = Grid::new(4, 8);
        fill_row(&mut grid, 7);
        grid.set_cell(6, 0, BubbleColor::Pink);
        grid.set_cell(2, 3, BubbleColor::Navy);

        assert!(grid.is_line_full(Orientation::Down, 7));
        assert_eq!(grid.clear_full_lines(Orientation::Down), 1);

        assert_eq!(grid.get(7, 0), Some(Some(BubbleColor::Pink)));
        assert_eq!(grid.get(3, 3), Some(Some(BubbleColor::Navy)));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_clear_line_up_shifts_rows_below() {
        let mut grid = Grid::new(4, 8);
        fill_row(&mut grid, 0);
        grid.set_cell(1, 2, BubbleColor::Pink);

        assert_eq!(grid.clear_full_lines(Orientation::Up), 1);
        assert_eq!(grid.get(0, 2), Some(Some(BubbleColor::Pink)));
        assert!(grid.rows().last().is_some_and(|r| r.iter().all(|c| c.is_none())));
    }

    #[test]
    fn test_clear_line_left_shifts_columns_right_of_it() {
        let mut grid = Grid::new(8, 4);
        fill_col(&mut grid, 0);
        grid.set_cell(1, 1, BubbleColor::Pink);
        grid.set_cell(2, 7, BubbleColor::Navy);

        assert_eq!(grid.clear_full_lines(Orientation::Left), 1);
        assert_eq!(grid.get(1, 0), Some(Some(BubbleColor::Pink)));
        assert_eq!(grid.get(2, 6), Some(Some(BubbleColor::Navy)));
        assert!(grid.is_empty(2, 7));
    }

    #[test]
    fn test_clear_line_right_shifts_columns_left_of_it() {
        let mut grid = Grid::new(8, 4);
        fill_col(&mut grid, 7);
        grid.set_cell(3, 6, BubbleColor::Pink);
        grid.set_cell(0, 0, BubbleColor::Navy);

        assert_eq!(grid.clear_full_lines(Orientation::Right), 1);
        assert_eq!(grid.get(3, 7), Some(Some(BubbleColor::Pink)));
        assert_eq!(grid.get(0, 1), Some(Some(BubbleColor::Navy)));
        assert!(grid.is_empty(0, 0));
    }

    #[test]
    fn test_clear_full_lines_cascades_stacked_lines() {
        let mut grid = Grid::new(4, 8);
        fill_row(&mut grid, 7);
        fill_row(&mut grid, 6);
        fill_row(&mut grid, 4);
        grid.set_cell(5, 1, BubbleColor::Pink);

        assert_eq!(grid.clear_full_lines(Orientation::Down), 3);
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.get(7, 1), Some(Some(BubbleColor::Pink)));
    }

    #[test]
    fn test_rows_are_not_lines_in_horizontal_orientations() {
        let mut grid = Grid::new(4, 8);
        fill_row(&mut grid, 7);
        assert_eq!(grid.clear_full_lines(Orientation::Left), 0);
        assert_eq!(grid.clear_full_lines(Orientation::Right), 0);
        assert_eq!(grid.occupied_count(), 4);
    }

    #[test]
    fn test_rotate_clockwise_maps_cells_and_swaps_dimensions() {
        let mut grid = Grid::new(12, 22);
        grid.set_cell(21, 0, BubbleColor::Pink);
        grid.set_cell(0, 11, BubbleColor::Navy);

        grid.rotate_clockwise();

        assert_eq!(grid.width(), 22);
        assert_eq!(grid.height(), 12);
        // (row, col) -> (col, height - 1 - row)
        assert_eq!(grid.get(0, 0), Some(Some(BubbleColor::Pink)));
        assert_eq!(grid.get(11, 21), Some(Some(BubbleColor::Navy)));
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let mut grid = Grid::new(5, 9);
        grid.set_cell(0, 0, BubbleColor::Pink);
        grid.set_cell(3, 4, BubbleColor::Navy);
        grid.set_cell(8, 2, BubbleColor::Coral);
        let original = grid.clone();

        for _ in 0..4 {
            grid.rotate_clockwise();
        }
        assert_eq!(grid, original);
    }

    #[test]
    fn test_edge_clear_per_orientation() {
        let mut grid = Grid::new(6, 10);
        assert!(Orientation::CYCLE.iter().all(|&o| grid.is_edge_clear(o)));

        grid.set_cell(0, 3, BubbleColor::Pink);
        assert!(!grid.is_edge_clear(Orientation::Down));
        assert!(grid.is_edge_clear(Orientation::Up));

        grid.clear();
        grid.set_cell(4, 5, BubbleColor::Pink);
        assert!(!grid.is_edge_clear(Orientation::Left));
        assert!(grid.is_edge_clear(Orientation::Right));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let rows = vec![vec![C, None], vec![None]];
        assert!(Grid::from_rows(&rows).is_none());
        assert!(Grid::from_rows(&[]).is_none());

        let rows = vec![vec![C, None, None], vec![None, None, C]];
        let grid = Grid::from_rows(&rows).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert!(grid.is_occupied(1, 2));
    }

    #[test]
    fn test_line_from_floor() {
        let grid = Grid::new(12, 22);
        assert_eq!(grid.line_from_floor(Orientation::Down, 2), Some(19));
        assert_eq!(grid.line_from_floor(Orientation::Up, 2), Some(2));
        assert_eq!(grid.line_from_floor(Orientation::Left, 2), Some(2));
        assert_eq!(grid.line_from_floor(Orientation::Right, 2), Some(9));
        assert_eq!(grid.line_from_floor(Orientation::Right, 12), None);
    }
}
