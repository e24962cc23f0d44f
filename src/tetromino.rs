//! Piece catalog: the seven tetromino kinds with pre-enumerated rotation
//! states, expressed as linear cell offsets relative to the anchor index.

use crate::grid;

const W: i32 = grid::WIDTH as i32;

/// Width of the next-piece preview mini-grid.
pub const PREVIEW_WIDTH: i32 = 4;

/// Tetromino kinds (I, O, T, S, Z, J, L).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrominoKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl TetrominoKind {
    pub const ALL: [Self; 7] = [Self::I, Self::O, Self::T, Self::S, Self::Z, Self::J, Self::L];

    /// The five kinds of the original ruleset, for `--piece-set five`.
    pub const CLASSIC_FIVE: [Self; 5] = [Self::L, Self::Z, Self::T, Self::O, Self::I];

    /// Cell offsets for one rotation state, relative to the anchor index on
    /// a board of width `grid::WIDTH`. Rotation is table lookup, not a
    /// geometric transform: the four states per kind are pre-enumerated, and
    /// Z, S and I repeat with period 2.
    pub fn offsets(&self, rotation: u8) -> [i32; 4] {
        let states: [[i32; 4]; 4] = match self {
            Self::L => [
                [1, W + 1, 2 * W + 1, 2],
                [W, W + 1, W + 2, 2 * W + 2],
                [1, W + 1, 2 * W + 1, 2 * W],
                [W, 2 * W, 2 * W + 1, 2 * W + 2],
            ],
            Self::J => [
                [1, W + 1, 2 * W + 1, 0],
                [W, W + 1, W + 2, 2 * W],
                [1, W + 1, 2 * W + 1, 2 * W + 2],
                [W + 2, 2 * W, 2 * W + 1, 2 * W + 2],
            ],
            Self::Z => [
                [0, W, W + 1, 2 * W + 1],
                [W + 1, W + 2, 2 * W, 2 * W + 1],
                [0, W, W + 1, 2 * W + 1],
                [W + 1, W + 2, 2 * W, 2 * W + 1],
            ],
            Self::S => [
                [2, W + 1, W + 2, 2 * W + 1],
                [W, W + 1, 2 * W + 1, 2 * W + 2],
                [2, W + 1, W + 2, 2 * W + 1],
                [W, W + 1, 2 * W + 1, 2 * W + 2],
            ],
            Self::T => [
                [1, W, W + 1, W + 2],
                [1, W + 1, W + 2, 2 * W + 1],
                [W, W + 1, W + 2, 2 * W + 1],
                [1, W, W + 1, 2 * W + 1],
            ],
            Self::O => [
                [0, 1, W, W + 1],
                [0, 1, W, W + 1],
                [0, 1, W, W + 1],
                [0, 1, W, W + 1],
            ],
            Self::I => [
                [1, W + 1, 2 * W + 1, 3 * W + 1],
                [W, W + 1, W + 2, W + 3],
                [1, W + 1, 2 * W + 1, 3 * W + 1],
                [W, W + 1, W + 2, W + 3],
            ],
        };
        states[(rotation % 4) as usize]
    }

    /// Rotation-free shape on the 4-wide preview mini-grid.
    pub fn preview_offsets(&self) -> [i32; 4] {
        const DW: i32 = PREVIEW_WIDTH;
        match self {
            Self::L => [1, DW + 1, 2 * DW + 1, 2],
            Self::J => [1, DW + 1, 2 * DW + 1, 0],
            Self::Z => [0, DW, DW + 1, 2 * DW + 1],
            Self::S => [2, DW + 1, DW + 2, 2 * DW + 1],
            Self::T => [1, DW, DW + 1, DW + 2],
            Self::O => [0, 1, DW, DW + 1],
            Self::I => [1, DW + 1, 2 * DW + 1, 3 * DW + 1],
        }
    }

    /// Colour index 0..=6 for `theme.piece_color()`.
    pub fn color_index(&self) -> u8 {
        match self {
            Self::S => 0, // Green
            Self::O => 1, // Yellow
            Self::Z => 2, // Red
            Self::J => 3, // Blue
            Self::T => 4, // Magenta
            Self::I => 5, // Cyan
            Self::L => 6, // Orange
        }
    }
}
