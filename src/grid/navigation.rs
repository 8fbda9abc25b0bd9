//! Cell navigation logic
//!
//! Handles arrow key movement and Tab. Moves that would leave the grid
//! leave the selection where it is.

use crate::columns::COLUMN_COUNT;
use crate::messages::Direction;

use super::model::{CellPosition, GridState};

impl GridState {
    /// Move selection one cell in `direction` if that cell exists.
    ///
    /// Returns whether the selection moved.
    pub fn move_selection(&mut self, direction: Direction, row_count: usize) -> bool {
        let Some(pos) = self.selection else {
            return false;
        };
        let Some(next) = neighbor(pos, direction, row_count) else {
            return false;
        };
        self.select_cell(next, row_count)
    }

    /// Move to next cell (Tab behavior)
    ///
    /// Advances one column; from the last column wraps to the first column
    /// of the next row. At the last cell of the last row nothing happens.
    pub fn move_to_next_cell(&mut self, row_count: usize) -> bool {
        let Some(pos) = self.selection else {
            return false;
        };
        let next = if pos.col + 1 < COLUMN_COUNT {
            CellPosition::new(pos.row, pos.col + 1)
        } else if pos.row + 1 < row_count {
            CellPosition::new(pos.row + 1, 0)
        } else {
            return false;
        };
        self.select_cell(next, row_count)
    }
}

/// The adjacent cell in `direction`, if inside the grid
fn neighbor(pos: CellPosition, direction: Direction, row_count: usize) -> Option<CellPosition> {
    match direction {
        Direction::Up => pos.row.checked_sub(1).map(|row| CellPosition::new(row, pos.col)),
        Direction::Down => (pos.row + 1 < row_count).then(|| CellPosition::new(pos.row + 1, pos.col)),
        Direction::Left => pos.col.checked_sub(1).map(|col| CellPosition::new(pos.row, col)),
        Direction::Right => {
            (pos.col + 1 < COLUMN_COUNT).then(|| CellPosition::new(pos.row, pos.col + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_at(row: usize, col: usize, rows: usize) -> GridState {
        let mut grid = GridState::new();
        assert!(grid.select_cell(CellPosition::new(row, col), rows));
        grid
    }

    #[test]
    fn test_move_within_bounds() {
        let mut grid = grid_at(1, 1, 3);
        assert!(grid.move_selection(Direction::Down, 3));
        assert_eq!(grid.selection(), Some(CellPosition::new(2, 1)));
        assert!(grid.move_selection(Direction::Left, 3));
        assert_eq!(grid.selection(), Some(CellPosition::new(2, 0)));
    }

    #[test]
    fn test_edges_are_noops() {
        let mut grid = grid_at(0, 0, 2);
        assert!(!grid.move_selection(Direction::Up, 2));
        assert!(!grid.move_selection(Direction::Left, 2));
        assert_eq!(grid.selection(), Some(CellPosition::new(0, 0)));

        let last_col = COLUMN_COUNT - 1;
        let mut grid = grid_at(1, last_col, 2);
        assert!(!grid.move_selection(Direction::Down, 2));
        assert!(!grid.move_selection(Direction::Right, 2));
        assert_eq!(grid.selection(), Some(CellPosition::new(1, last_col)));
    }

    #[test]
    fn test_move_without_selection_is_noop() {
        let mut grid = GridState::new();
        assert!(!grid.move_selection(Direction::Down, 5));
        assert!(!grid.move_to_next_cell(5));
        assert_eq!(grid.selection(), None);
    }

    #[test]
    fn test_tab_wraps_to_next_row() {
        let mut grid = grid_at(0, COLUMN_COUNT - 1, 2);
        assert!(grid.move_to_next_cell(2));
        assert_eq!(grid.selection(), Some(CellPosition::new(1, 0)));
    }

    #[test]
    fn test_tab_at_last_cell_is_noop() {
        let mut grid = grid_at(1, COLUMN_COUNT - 1, 2);
        assert!(!grid.move_to_next_cell(2));
        assert_eq!(grid.selection(), Some(CellPosition::new(1, COLUMN_COUNT - 1)));
    }
}
