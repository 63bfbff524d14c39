//! Shapes module - the immutable shape catalog and 4x4 bitmap rotation
//!
//! Every shape is a 4x4 occupancy bitmap inside a fixed bounding box. Rotation
//! turns the whole box, so collision and rotation both depend on the exact
//! layout below.

use crate::types::{Color, Shape, BITMAP_SIZE, SHAPE_COUNT};

/// Local coordinate inside a bitmap, or a board coordinate once the anchor
/// has been added
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub col: i8,
    pub row: i8,
}

impl Coordinate {
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }
}

/// 4x4 occupancy pattern, indexed `[row][col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitmap([[bool; BITMAP_SIZE]; BITMAP_SIZE]);

impl Bitmap {
    /// Build from four row masks, bit 3 being column 0 (`0b0100` is `.#..`)
    pub const fn from_masks(rows: [u8; BITMAP_SIZE]) -> Self {
        let mut cells = [[false; BITMAP_SIZE]; BITMAP_SIZE];
        let mut row = 0;
        while row < BITMAP_SIZE {
            let mut col = 0;
            while col < BITMAP_SIZE {
                cells[row][col] = (rows[row] & (0b1000 >> col)) != 0;
                col += 1;
            }
            row += 1;
        }
        Bitmap(cells)
    }

    /// Row masks in the same encoding as [`Bitmap::from_masks`]
    pub fn to_masks(&self) -> [u8; BITMAP_SIZE] {
        let mut out = [0u8; BITMAP_SIZE];
        for (row, mask) in out.iter_mut().enumerate() {
            for col in 0..BITMAP_SIZE {
                if self.0[row][col] {
                    *mask |= 0b1000 >> col;
                }
            }
        }
        out
    }

    /// Returns false outside the 4x4 box
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < BITMAP_SIZE && col < BITMAP_SIZE && self.0[row][col]
    }

    /// Quarter turn clockwise: `new[col][3 - row] = old[row][col]`
    pub fn rotated_cw(&self) -> Self {
        let mut out = [[false; BITMAP_SIZE]; BITMAP_SIZE];
        for (row, cells) in self.0.iter().enumerate() {
            for (col, &set) in cells.iter().enumerate() {
                out[col][BITMAP_SIZE - 1 - row] = set;
            }
        }
        Bitmap(out)
    }

    /// Three clockwise quarter turns
    pub fn rotated_ccw(&self) -> Self {
        self.rotated_cw().rotated_cw().rotated_cw()
    }

    /// Local coordinates of the set cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.0.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, set)| **set)
                .map(move |(col, _)| Coordinate::new(col as i8, row as i8))
        })
    }

    /// Number of set cells
    pub fn count(&self) -> usize {
        self.0.iter().flatten().filter(|&&set| set).count()
    }
}

const BITMAPS: [Bitmap; SHAPE_COUNT as usize] = [
    // I: vertical bar in column 1
    Bitmap::from_masks([0b0100, 0b0100, 0b0100, 0b0100]),
    // Z
    Bitmap::from_masks([0b0000, 0b1100, 0b0110, 0b0000]),
    // S
    Bitmap::from_masks([0b0000, 0b0011, 0b0110, 0b0000]),
    // T, pointing left
    Bitmap::from_masks([0b0010, 0b0110, 0b0010, 0b0000]),
    // L, foot up and to the left
    Bitmap::from_masks([0b0000, 0b0110, 0b0010, 0b0010]),
    // J, foot up and to the right
    Bitmap::from_masks([0b0000, 0b0110, 0b0100, 0b0100]),
    // O
    Bitmap::from_masks([0b0000, 0b0110, 0b0110, 0b0000]),
];

/// Number of shapes in the catalog
pub fn shape_count() -> u8 {
    SHAPE_COUNT
}

/// Spawn-orientation bitmap for a shape
pub fn bitmap(shape: Shape) -> Bitmap {
    BITMAPS[shape.id() as usize]
}

/// Piece color for a shape
pub fn color(shape: Shape) -> Color {
    Color::PIECE_COLORS[shape.id() as usize]
}
