//! Grid module - the fixed 10x18 playfield
//!
//! Each cell holds a [`Color`]; [`Color::EMPTY`] marks a free cell.
//! Storage is a flat row-major array for cache locality and zero allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right), row ranges
//! 0..17 (top to bottom).

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = WIDTH * HEIGHT;

/// Row indexes removed by one [`Grid::clear_full_rows`] call
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The playfield - 10 columns x 18 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Color; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [Color::EMPTY; GRID_SIZE],
        }
    }

    /// Build from rows listed top to bottom
    pub fn from_rows(rows: [[Color; WIDTH]; HEIGHT]) -> Self {
        let mut grid = Self::new();
        for (row, colors) in rows.iter().enumerate() {
            let start = row * WIDTH;
            grid.cells[start..start + WIDTH].copy_from_slice(colors);
        }
        grid
    }

    /// Rows listed top to bottom
    pub fn to_rows(&self) -> [[Color; WIDTH]; HEIGHT] {
        let mut rows = [[Color::EMPTY; WIDTH]; HEIGHT];
        for (row, out) in rows.iter_mut().enumerate() {
            out.copy_from_slice(self.row(row));
        }
        rows
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at (col, row), None if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Color> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row); returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, color: Color) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = color;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_vacant(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(color) if color.is_empty())
    }

    /// In bounds and filled
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(color) if !color.is_empty())
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Color] {
        let start = row * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        self.row(row).iter().all(|cell| !cell.is_empty())
    }

    /// Remove every full row, shifting the rows above down, and return the
    /// removed row indexes (sorted bottom to top)
    ///
    /// Two-pointer compaction: each kept row moves down by the number of full
    /// rows below it, and the rows freed at the top are emptied.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_row = HEIGHT;

        // Scan from bottom to top
        for read_row in (0..HEIGHT).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    // copy_within handles the overlap, no allocation
                    let src_start = read_row * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, write_row * WIDTH);
                }
            }
        }

        for cell in &mut self.cells[..write_row * WIDTH] {
            *cell = Color::EMPTY;
        }

        cleared_rows
    }

    /// Write the piece's color into every cell it covers
    ///
    /// Returns false, leaving the grid untouched, if any covered cell is out
    /// of bounds or already filled.
    pub fn lock_piece(&mut self, piece: &Piece) -> bool {
        if !piece.cells().all(|c| self.is_vacant(c.col, c.row)) {
            return false;
        }

        let color = piece.color();
        for c in piece.cells() {
            self.set(c.col, c.row, color);
        }

        true
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Flat row-major view of all cells
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
