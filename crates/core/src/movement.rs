//! Speculative movement
//!
//! Every move works on a copy of the live piece: transform the copy, validate
//! it, and hand it back only if it is legal. The caller commits the returned
//! piece or keeps the original when it gets `None`.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::validation::can_place;

/// Apply `transform` to a copy of `piece`; `Some` only if the result is legal
pub fn try_transform(
    piece: &Piece,
    grid: &Grid,
    transform: impl FnOnce(&mut Piece),
) -> Option<Piece> {
    let mut candidate = *piece;
    transform(&mut candidate);
    can_place(&candidate, grid).then_some(candidate)
}

/// Shift by (dcol, drow)
pub fn shifted(piece: &Piece, grid: &Grid, dcol: i8, drow: i8) -> Option<Piece> {
    try_transform(piece, grid, |p| p.translate(dcol, drow))
}

/// Rotate a quarter turn in place (no kicks)
pub fn rotated(piece: &Piece, grid: &Grid, clockwise: bool) -> Option<Piece> {
    try_transform(piece, grid, |p| {
        if clockwise {
            p.rotate_clockwise()
        } else {
            p.rotate_counter_clockwise()
        }
    })
}

/// Whether the piece could fall one more row
pub fn can_descend(piece: &Piece, grid: &Grid) -> bool {
    shifted(piece, grid, 0, 1).is_some()
}
