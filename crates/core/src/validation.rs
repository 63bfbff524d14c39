//! Placement legality
//!
//! A placement is legal when every set cell of the piece lies within the
//! columns, above the floor, and on an empty cell. Cells above the top edge
//! (row < 0) are not rejected.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `piece` may occupy its cells on `grid`
pub fn can_place(piece: &Piece, grid: &Grid) -> bool {
    piece.cells().all(|c| {
        c.col >= 0
            && c.col < BOARD_WIDTH as i8
            && c.row < BOARD_HEIGHT as i8
            && !grid.is_occupied(c.col, c.row)
    })
}
