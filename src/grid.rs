//! Playfield grid: fixed-size linear cell sequence with per-cell occupancy
//! and the line-clear mechanics.

use crate::scoring;
use crate::tetromino::TetrominoKind;
use thiserror::Error;

/// Board width in columns.
pub const WIDTH: usize = 10;
/// Board height in rows.
pub const HEIGHT: usize = 20;
/// Total cell count; `CELL_COUNT % WIDTH == 0` holds by construction.
pub const CELL_COUNT: usize = WIDTH * HEIGHT;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell index {index} outside grid of {len} cells")]
    OutOfBounds { index: usize, len: usize },
}

/// Single cell: empty, or permanently taken by a locked piece. The kind tag
/// is informational (colour for the renderer); logic only reads occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Taken(TetrominoKind),
}

impl Cell {
    #[inline]
    fn is_taken(self) -> bool {
        matches!(self, Self::Taken(_))
    }
}

/// Outcome of one `clear_full_rows` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClear {
    pub lines: u32,
    pub score_delta: u32,
}

/// Playfield: `CELL_COUNT` cells in row-major order, row 0 on top. The cell
/// at row r, column c is index `r * WIDTH + c`.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Empty; CELL_COUNT],
        }
    }

    /// Occupancy of one cell; `OutOfBounds` when index is outside `[0, CELL_COUNT)`.
    pub fn is_occupied(&self, index: usize) -> Result<bool, GridError> {
        self.cells
            .get(index)
            .map(|c| c.is_taken())
            .ok_or(GridError::OutOfBounds {
                index,
                len: CELL_COUNT,
            })
    }

    /// Occupancy probe for movement, rotation and lock checks. Any index
    /// outside the board reads as blocked: probing one row below the bottom
    /// is how landing on the floor is detected, and the same rule vetoes
    /// rotations whose footprint would poke past the bottom boundary.
    #[inline]
    pub fn blocked(&self, index: i32) -> bool {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.cells.get(i))
            .map_or(true, |c| c.is_taken())
    }

    /// Mark the given cells as permanently taken (piece lock).
    pub fn occupy(&mut self, indices: &[usize], kind: TetrominoKind) {
        for &i in indices {
            if let Some(cell) = self.cells.get_mut(i) {
                *cell = Cell::Taken(kind);
            }
        }
    }

    /// Clear every full row in one top-to-bottom pass. Each full row is
    /// excised from the cell sequence and an emptied row is prepended, so
    /// all rows above shift down by one and row 0 ends up empty. Rows are
    /// cleared independently; cells below a cleared row never move.
    pub fn clear_full_rows(&mut self) -> LineClear {
        let mut lines = 0u32;
        for row in 0..HEIGHT {
            let start = row * WIDTH;
            if self.cells[start..start + WIDTH].iter().all(|c| c.is_taken()) {
                self.cells.drain(start..start + WIDTH);
                self.cells
                    .splice(0..0, std::iter::repeat(Cell::Empty).take(WIDTH));
                lines += 1;
            }
        }
        LineClear {
            lines,
            score_delta: lines * scoring::POINTS_PER_LINE,
        }
    }

    /// Indices of permanently taken cells with their kind tag, for the
    /// render sink.
    pub fn taken_cells(&self) -> impl Iterator<Item = (usize, TetrominoKind)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, c)| match c {
            Cell::Taken(kind) => Some((i, *kind)),
            Cell::Empty => None,
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, row: usize) {
        let indices: Vec<usize> = (row * WIDTH..(row + 1) * WIDTH).collect();
        grid.occupy(&indices, TetrominoKind::T);
    }

    #[test]
    fn is_occupied_rejects_out_of_bounds() {
        let grid = Grid::new();
        assert_eq!(grid.is_occupied(0), Ok(false));
        assert_eq!(
            grid.is_occupied(CELL_COUNT),
            Err(GridError::OutOfBounds {
                index: CELL_COUNT,
                len: CELL_COUNT
            })
        );
    }

    #[test]
    fn occupy_marks_cells() {
        let mut grid = Grid::new();
        grid.occupy(&[4, 5, 14, 15], TetrominoKind::O);
        assert_eq!(grid.is_occupied(4), Ok(true));
        assert_eq!(grid.is_occupied(15), Ok(true));
        assert_eq!(grid.is_occupied(3), Ok(false));
    }

    #[test]
    fn blocked_treats_out_of_bounds_as_occupied() {
        let grid = Grid::new();
        assert!(grid.blocked(-1));
        assert!(grid.blocked(CELL_COUNT as i32));
        assert!(!grid.blocked(0));
    }

    #[test]
    fn clear_removes_exactly_the_full_row() {
        let mut grid = Grid::new();
        fill_row(&mut grid, HEIGHT - 1);
        // A marker above the full row, at column 3.
        let marker = (HEIGHT - 2) * WIDTH + 3;
        grid.occupy(&[marker], TetrominoKind::J);

        let clear = grid.clear_full_rows();

        assert_eq!(clear.lines, 1);
        assert_eq!(clear.score_delta, scoring::POINTS_PER_LINE);
        // Marker shifted down one row; everything else empty.
        let shifted = (HEIGHT - 1) * WIDTH + 3;
        let taken: Vec<(usize, TetrominoKind)> = grid.taken_cells().collect();
        assert_eq!(taken, vec![(shifted, TetrominoKind::J)]);
    }

    #[test]
    fn multiple_full_rows_clear_in_one_pass() {
        let mut grid = Grid::new();
        fill_row(&mut grid, HEIGHT - 1);
        fill_row(&mut grid, HEIGHT - 2);
        fill_row(&mut grid, HEIGHT - 4); // non-contiguous

        let clear = grid.clear_full_rows();

        assert_eq!(clear.lines, 3);
        assert_eq!(clear.score_delta, 3 * scoring::POINTS_PER_LINE);
        assert_eq!(grid.taken_cells().count(), 0);
    }

    #[test]
    fn partial_row_is_untouched() {
        let mut grid = Grid::new();
        let indices: Vec<usize> = ((HEIGHT - 1) * WIDTH..HEIGHT * WIDTH - 1).collect();
        grid.occupy(&indices, TetrominoKind::S);

        let clear = grid.clear_full_rows();

        assert_eq!(clear.lines, 0);
        assert_eq!(grid.taken_cells().count(), WIDTH - 1);
    }

    #[test]
    fn clearing_the_top_row_works() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 0);
        let clear = grid.clear_full_rows();
        assert_eq!(clear.lines, 1);
        assert_eq!(grid.taken_cells().count(), 0);
    }
}
