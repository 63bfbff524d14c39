//! Piece module - the falling piece and its spawn/rotation logic
//!
//! A piece owns a copy of its catalog bitmap, so rotating one piece never
//! affects the catalog or any other piece. `Piece` is `Copy`: speculative moves
//! work on a value copy and simply drop it when the result is illegal.

use crate::rng::SimpleRng;
use crate::shapes::{self, Bitmap, Coordinate};
use crate::types::{Color, Shape, SHAPE_COUNT, SPAWN_COLUMNS};

/// Falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: Shape,
    bitmap: Bitmap,
    /// Clockwise quarter turns applied to the catalog bitmap (0-3)
    quarter_turns: u8,
    /// Top-left corner of the bounding box in board space
    anchor: Coordinate,
    color: Color,
}

impl Piece {
    /// Create a piece in spawn orientation with its bounding box at (col, row)
    pub fn new(shape: Shape, col: i8, row: i8) -> Self {
        Self {
            shape,
            bitmap: shapes::bitmap(shape),
            quarter_turns: 0,
            anchor: Coordinate::new(col, row),
            color: shapes::color(shape),
        }
    }

    /// Random shape at a random spawn column on row 0
    ///
    /// No validation happens here; the board decides whether the piece fits.
    pub fn spawn(rng: &mut SimpleRng) -> Self {
        let id = rng.next_range(SHAPE_COUNT as u32) as u8;
        let col = rng.next_range(SPAWN_COLUMNS as u32) as i8;
        // next_range(SHAPE_COUNT) is always a valid id
        let shape = Shape::from_id(id).unwrap_or(Shape::O);
        Self::new(shape, col, 0)
    }

    /// Same piece turned clockwise `quarter_turns` times from spawn orientation
    pub fn with_orientation(shape: Shape, quarter_turns: u8, col: i8, row: i8) -> Self {
        let mut piece = Self::new(shape, col, row);
        for _ in 0..quarter_turns % 4 {
            piece.rotate_clockwise();
        }
        piece
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn quarter_turns(&self) -> u8 {
        self.quarter_turns
    }

    pub fn anchor(&self) -> Coordinate {
        self.anchor
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Replace the bitmap with its clockwise quarter turn
    pub fn rotate_clockwise(&mut self) {
        self.bitmap = self.bitmap.rotated_cw();
        self.quarter_turns = (self.quarter_turns + 1) % 4;
    }

    /// Three clockwise quarter turns, so both directions share one formula
    pub fn rotate_counter_clockwise(&mut self) {
        for _ in 0..3 {
            self.rotate_clockwise();
        }
    }

    /// Move the anchor by (dcol, drow)
    pub fn translate(&mut self, dcol: i8, drow: i8) {
        self.anchor.col += dcol;
        self.anchor.row += drow;
    }

    /// Local bitmap coordinate to board coordinate
    pub fn to_board_coordinate(&self, local: Coordinate) -> Coordinate {
        Coordinate::new(local.col + self.anchor.col, local.row + self.anchor.row)
    }

    /// Board coordinates of every set cell
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.bitmap
            .cells()
            .map(move |local| self.to_board_coordinate(local))
    }
}
