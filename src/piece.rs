//! Active piece: anchor position, rotation state, movement against board
//! edges and grid occupancy, and the enumerated rotation guard table.

use crate::grid::{self, Grid};
use crate::tetromino::TetrominoKind;

const W: i32 = grid::WIDTH as i32;

/// Spawn anchor: top row, column 4.
pub const SPAWN_ANCHOR: i32 = 4;

/// The falling piece: kind, rotation state 0..=3 and anchor as a linear
/// grid index. Replaced wholesale on every spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: TetrominoKind,
    pub rotation: u8,
    pub anchor: i32,
}

impl ActivePiece {
    pub fn spawn(kind: TetrominoKind) -> Self {
        Self {
            kind,
            rotation: 0,
            anchor: SPAWN_ANCHOR,
        }
    }

    /// Linear indices of the four occupied cells at the current position.
    pub fn cells(&self) -> [i32; 4] {
        self.kind.offsets(self.rotation).map(|off| self.anchor + off)
    }

    /// Cells as grid indices, for locking and rendering. Movement and
    /// rotation guards keep every cell on the board, so the cast is safe.
    pub fn display_cells(&self) -> [usize; 4] {
        self.cells().map(|c| c.max(0) as usize)
    }

    fn at_left_edge(&self) -> bool {
        self.cells().iter().any(|&c| c.rem_euclid(W) == 0)
    }

    fn at_right_edge(&self) -> bool {
        self.cells().iter().any(|&c| c.rem_euclid(W) == W - 1)
    }

    fn collides(&self, grid: &Grid) -> bool {
        self.cells().iter().any(|&c| grid.blocked(c))
    }

    /// Shift one column left unless a cell sits on the left edge; revert if
    /// the shifted position collides with an occupied cell.
    pub fn move_left(&mut self, grid: &Grid) {
        if self.at_left_edge() {
            return;
        }
        self.anchor -= 1;
        if self.collides(grid) {
            self.anchor += 1;
        }
    }

    /// Mirror of `move_left` for the right edge.
    pub fn move_right(&mut self, grid: &Grid) {
        if self.at_right_edge() {
            return;
        }
        self.anchor += 1;
        if self.collides(grid) {
            self.anchor -= 1;
        }
    }

    /// Shift one row down, unconditionally. The caller runs the lock check
    /// (`should_lock`) after every down-step.
    pub fn move_down(&mut self) {
        self.anchor += W;
    }

    /// True when any cell has an occupied grid cell directly below it; the
    /// floor counts as occupied (out-of-bounds probe reads blocked).
    pub fn should_lock(&self, grid: &Grid) -> bool {
        self.cells().iter().any(|&c| grid.blocked(c + W))
    }

    /// Advance to the next rotation state, subject to the per-kind guard
    /// table. The guards are a closed, enumerated set of corrections derived
    /// from each kind's silhouette at each state: vertical shapes hugging an
    /// edge get a compensating shift before rotating (the 4-wide I needs two
    /// columns on the right edge); states whose rotated footprint would
    /// reach past the bottom rows refuse the rotation outright. O is
    /// symmetric and needs no correction; S and J carry the mirror images of
    /// the Z and L corrections.
    pub fn rotate(&mut self, grid: &Grid) {
        use TetrominoKind::{I, J, L, S, T, Z};

        let at_left = self.at_left_edge();
        let at_right = self.at_right_edge();
        let blocked_two_below = self.cells().iter().any(|&c| grid.blocked(c + 2 * W));
        let blocked_three_below = self.cells().iter().any(|&c| grid.blocked(c + 3 * W));

        match (self.kind, self.rotation) {
            (L, 0) if at_left => self.move_right(grid),
            (L, 2) if at_right => self.move_left(grid),
            (J, 0) if at_right => self.move_left(grid),
            (J, 2) if at_left => self.move_right(grid),
            (Z, 0 | 2) if at_right => self.move_left(grid),
            (S, 0 | 2) if at_left => self.move_right(grid),
            (T, 1) if at_left => self.move_right(grid),
            (T, 3) if at_right => self.move_left(grid),
            (T, 0) if blocked_two_below => return,
            (I, 0 | 2) if at_left => self.move_right(grid),
            (I, 0 | 2) if at_right => {
                self.move_left(grid);
                self.move_left(grid);
            }
            (I, 1 | 3) if blocked_three_below => return,
            _ => {}
        }

        self.rotation = (self.rotation + 1) % 4;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{HEIGHT, WIDTH};

    fn columns(piece: &ActivePiece) -> Vec<i32> {
        piece.cells().iter().map(|c| c.rem_euclid(W)).collect()
    }

    #[test]
    fn move_left_stops_at_the_edge() {
        let grid = Grid::new();
        let mut piece = ActivePiece::spawn(TetrominoKind::T);
        for _ in 0..WIDTH {
            piece.move_left(&grid);
            assert!(columns(&piece).iter().all(|&c| (0..W).contains(&c)));
        }
        assert!(columns(&piece).contains(&0));
    }

    #[test]
    fn move_right_stops_at_the_edge() {
        let grid = Grid::new();
        let mut piece = ActivePiece::spawn(TetrominoKind::I);
        piece.rotation = 1; // horizontal, 4 cells wide
        for _ in 0..WIDTH {
            piece.move_right(&grid);
            assert!(columns(&piece).iter().all(|&c| (0..W).contains(&c)));
        }
        assert!(columns(&piece).contains(&(W - 1)));
    }

    #[test]
    fn sideways_move_reverts_on_collision() {
        let mut grid = Grid::new();
        let mut piece = ActivePiece::spawn(TetrominoKind::O);
        // Occupy the cell just left of the piece's lower-left cell.
        grid.occupy(&[WIDTH + 3], TetrominoKind::T);
        let before = piece.anchor;
        piece.move_left(&grid);
        assert_eq!(piece.anchor, before);
    }

    #[test]
    fn move_down_descends_exactly_one_row() {
        let mut piece = ActivePiece::spawn(TetrominoKind::L);
        let before = piece.cells();
        piece.move_down();
        for (a, b) in before.iter().zip(piece.cells()) {
            assert_eq!(b - a, W);
        }
    }

    #[test]
    fn locks_on_the_floor() {
        let grid = Grid::new();
        let mut piece = ActivePiece::spawn(TetrominoKind::O);
        assert!(!piece.should_lock(&grid));
        // O occupies two rows from the anchor row; drop to the bottom pair.
        for _ in 0..HEIGHT - 2 {
            piece.move_down();
        }
        assert!(piece.should_lock(&grid));
    }

    #[test]
    fn locks_on_occupied_support() {
        let mut grid = Grid::new();
        let support = 2 * WIDTH + 4; // row 2, column 4
        grid.occupy(&[support], TetrominoKind::Z);
        let piece = ActivePiece::spawn(TetrominoKind::O); // cells in rows 0-1, columns 4-5
        assert!(piece.should_lock(&grid));
    }

    #[test]
    fn rotation_cycles_through_four_states() {
        let grid = Grid::new();
        let mut piece = ActivePiece::spawn(TetrominoKind::T);
        piece.move_down(); // clear of the bottom veto probe
        let original = piece.cells();
        for expected in [1, 2, 3, 0] {
            piece.rotate(&grid);
            assert_eq!(piece.rotation, expected);
        }
        assert_eq!(piece.cells(), original);
    }

    #[test]
    fn vertical_l_on_left_edge_shifts_right_before_rotating() {
        let grid = Grid::new();
        let mut piece = ActivePiece::spawn(TetrominoKind::L);
        for _ in 0..WIDTH {
            piece.move_left(&grid);
        }
        assert!(columns(&piece).contains(&0));
        piece.rotate(&grid);
        assert_eq!(piece.rotation, 1);
        // The compensating shift kept the 3-wide horizontal state on-board
        // (no wrap across the left edge).
        let mut cols = columns(&piece);
        cols.sort_unstable();
        cols.dedup();
        assert_eq!(cols, vec![0, 1, 2]);
    }

    #[test]
    fn vertical_i_on_right_edge_shifts_left_twice() {
        let grid = Grid::new();
        let mut piece = ActivePiece::spawn(TetrominoKind::I);
        for _ in 0..WIDTH {
            piece.move_right(&grid);
        }
        let anchor_before = piece.anchor;
        piece.rotate(&grid);
        assert_eq!(piece.rotation, 1);
        assert_eq!(piece.anchor, anchor_before - 2);
        // The 4-wide horizontal state hugs the right edge without wrapping.
        let mut cols = columns(&piece);
        cols.sort_unstable();
        assert_eq!(cols, vec![6, 7, 8, 9]);
    }

    #[test]
    fn t_rotation_refused_near_the_bottom() {
        let grid = Grid::new();
        let mut piece = ActivePiece::spawn(TetrominoKind::T);
        // Drop until the two-rows-below probe leaves the board.
        while !piece.cells().iter().any(|&c| grid.blocked(c + 2 * W)) {
            piece.move_down();
        }
        piece.rotate(&grid);
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn horizontal_i_rotation_refused_near_the_bottom() {
        let grid = Grid::new();
        let mut piece = ActivePiece::spawn(TetrominoKind::I);
        piece.rotation = 1;
        while !piece.cells().iter().any(|&c| grid.blocked(c + 3 * W)) {
            piece.move_down();
        }
        piece.rotate(&grid);
        assert_eq!(piece.rotation, 1);
    }

    #[test]
    fn o_piece_rotation_needs_no_guard() {
        let grid = Grid::new();
        let mut piece = ActivePiece::spawn(TetrominoKind::O);
        let before = piece.cells();
        piece.rotate(&grid);
        assert_eq!(piece.rotation, 1);
        assert_eq!(piece.cells(), before);
    }
}
