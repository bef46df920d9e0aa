//! Grid line clears and rotation through the public API

use bubble_swerve::core::Grid;
use bubble_swerve::types::{BubbleColor, Orientation};

fn fill_row(grid: &mut Grid, row: i16, color: BubbleColor) {
    for col in 0..grid.width() as i16 {
        grid.set_cell(row, col, color);
    }
}

fn fill_col(grid: &mut Grid, col: i16, color: BubbleColor) {
    for row in 0..grid.height() as i16 {
        grid.set_cell(row, col, color);
    }
}

#[test]
fn test_four_rotations_are_identity() {
    let mut grid = Grid::new(12, 22);
    grid.set_cell(0, 0, BubbleColor::Violet);
    grid.set_cell(21, 11, BubbleColor::Sky);
    grid.set_cell(7, 3, BubbleColor::Coral);
    let original = grid.clone();

    for i in 0..4 {
        grid.rotate_clockwise();
        if i % 2 == 0 {
            assert_eq!((grid.width(), grid.height()), (22, 12));
        } else {
            assert_eq!((grid.width(), grid.height()), (12, 22));
        }
        assert_eq!(grid.occupied_count(), 3);
    }
    assert_eq!(grid, original);
}

#[test]
fn test_rotation_moves_cells_clockwise() {
    let mut grid = Grid::new(12, 22);
    grid.set_cell(21, 0, BubbleColor::Blue);
    grid.set_cell(0, 11, BubbleColor::Pink);
    grid.rotate_clockwise();

    // (r, c) -> (c, 21 - r)
    assert!(grid.is_occupied(0, 0));
    assert!(grid.is_occupied(11, 21));
    assert_eq!(grid.get(0, 0), Some(Some(BubbleColor::Blue)));
    assert_eq!(grid.get(11, 21), Some(Some(BubbleColor::Pink)));
}

#[test]
fn test_down_clear_shifts_rows_above() {
    let mut grid = Grid::new(8, 10);
    grid.set_cell(7, 2, BubbleColor::Aqua);
    fill_row(&mut grid, 9, BubbleColor::Navy);

    assert_eq!(grid.clear_full_lines(Orientation::Down), 1);
    assert_eq!(grid.occupied_count(), 1);
    assert!(grid.is_occupied(8, 2));
}

#[test]
fn test_up_clear_shifts_rows_below() {
    let mut grid = Grid::new(8, 10);
    grid.set_cell(3, 4, BubbleColor::Aqua);
    fill_row(&mut grid, 0, BubbleColor::Navy);

    assert_eq!(grid.clear_full_lines(Orientation::Up), 1);
    assert!(grid.is_occupied(2, 4));
    assert!(grid.is_edge_clear(Orientation::Up));
}

#[test]
fn test_left_clear_shifts_columns_to_the_right() {
    let mut grid = Grid::new(10, 8);
    grid.set_cell(5, 6, BubbleColor::Indigo);
    fill_col(&mut grid, 0, BubbleColor::Purple);

    assert_eq!(grid.clear_full_lines(Orientation::Left), 1);
    assert_eq!(grid.occupied_count(), 1);
    assert!(grid.is_occupied(5, 5));
}

#[test]
fn test_right_clear_shifts_columns_to_the_left() {
    let mut grid = Grid::new(10, 8);
    grid.set_cell(1, 3, BubbleColor::Indigo);
    fill_col(&mut grid, 9, BubbleColor::Purple);

    assert_eq!(grid.clear_full_lines(Orientation::Right), 1);
    assert!(grid.is_occupied(1, 4));
    assert!(grid.is_edge_clear(Orientation::Right));
}

#[test]
fn test_rows_are_not_lines_under_horizontal_gravity() {
    let mut grid = Grid::new(8, 8);
    fill_row(&mut grid, 7, BubbleColor::Blue);
    assert_eq!(grid.clear_full_lines(Orientation::Left), 0);
    assert_eq!(grid.clear_full_lines(Orientation::Right), 0);
    assert_eq!(grid.occupied_count(), 8);
    assert_eq!(grid.clear_full_lines(Orientation::Down), 1);
    assert_eq!(grid.occupied_count(), 0);
}

#[test]
fn test_stacked_full_lines_all_clear() {
    let mut grid = Grid::new(8, 12);
    for row in 8..12 {
        fill_row(&mut grid, row, BubbleColor::Coral);
    }
    grid.set_cell(7, 0, BubbleColor::Sky);

    assert_eq!(grid.clear_full_lines(Orientation::Down), 4);
    assert_eq!(grid.occupied_count(), 1);
    assert!(grid.is_occupied(11, 0));
}

#[test]
fn test_out_of_bounds_is_never_empty_or_occupied() {
    let grid = Grid::new(8, 8);
    assert!(!grid.is_in_bounds(-1, 0));
    assert!(!grid.is_in_bounds(0, 8));
    assert!(!grid.is_empty(8, 0));
    assert!(!grid.is_occupied(8, 0));
    assert_eq!(grid.get(0, -1), None);
}
