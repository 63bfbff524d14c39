//! Snapshot module - versioned save/restore records
//!
//! A [`BoardSnapshot`] is a plain record of everything needed to resume a game
//! exactly: grid colors, progress counters, the falling piece and the RNG
//! state. It only uses primitive fields, so the in-memory layout of
//! [`Board`](crate::Board) can change without breaking saved games.
//!
//! [`encode`] wraps the record in a `{"version": N, "board": ...}` JSON
//! envelope; [`decode`] checks the version before reading the body. Writing
//! the bytes somewhere is up to the caller.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapshotError};
use crate::grid::Grid;
use crate::piece::Piece;
use crate::shapes;
use crate::types::{Color, Shape, BOARD_HEIGHT, BOARD_WIDTH};

/// Current envelope version
pub const SNAPSHOT_VERSION: u32 = 1;

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Loose bounds on a saved anchor, keeping every bitmap cell well inside
/// `i8` arithmetic
const ANCHOR_COLS: core::ops::RangeInclusive<i8> = -3..=BOARD_WIDTH as i8;
const ANCHOR_ROWS: core::ops::Range<i8> = -3..BOARD_HEIGHT as i8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceSnapshot {
    pub shape: u8,
    /// Clockwise quarter turns from the catalog orientation
    pub quarter_turns: u8,
    pub col: i8,
    pub row: i8,
    pub color: u32,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: value.shape().id(),
            quarter_turns: value.quarter_turns(),
            col: value.anchor().col,
            row: value.anchor().row,
            color: value.color().argb(),
        }
    }
}

impl PieceSnapshot {
    /// Rebuild the piece, checking shape, orientation, anchor and color
    pub fn to_piece(&self) -> Result<Piece> {
        if !ANCHOR_COLS.contains(&self.col) || !ANCHOR_ROWS.contains(&self.row) {
            return Err(SnapshotError::AnchorOutOfRange {
                col: self.col,
                row: self.row,
            });
        }
        let shape = Shape::from_id(self.shape).ok_or(SnapshotError::UnknownShape(self.shape))?;
        if self.quarter_turns > 3 {
            return Err(SnapshotError::InvalidOrientation(self.quarter_turns));
        }
        if shapes::color(shape).argb() != self.color {
            return Err(SnapshotError::PieceColorMismatch {
                shape: self.shape,
                found: self.color,
            });
        }
        Ok(Piece::with_orientation(
            shape,
            self.quarter_turns,
            self.col,
            self.row,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// ARGB colors, rows top to bottom
    pub cells: [[u32; WIDTH]; HEIGHT],
    pub score: u32,
    pub rows_completed: u32,
    pub level: u32,
    pub piece: Option<PieceSnapshot>,
    pub game_over: bool,
    pub rng_state: u32,
}

impl BoardSnapshot {
    /// Rebuild the grid, rejecting colors outside the palette
    pub fn to_grid(&self) -> Result<Grid> {
        let mut rows = [[Color::EMPTY; WIDTH]; HEIGHT];
        for (row, values) in self.cells.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                let color = Color(value);
                if !color.is_valid() {
                    return Err(SnapshotError::InvalidCell { row, col, value });
                }
                rows[row][col] = color;
            }
        }
        Ok(Grid::from_rows(rows))
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    board: &'a BoardSnapshot,
}

#[derive(Deserialize)]
struct Envelope {
    board: BoardSnapshot,
}

#[derive(Deserialize)]
struct Header {
    version: u32,
}

/// Serialize a snapshot into a versioned JSON envelope
pub fn encode(snapshot: &BoardSnapshot) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        version: SNAPSHOT_VERSION,
        board: snapshot,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Parse a versioned JSON envelope
///
/// Only structure and version are checked here; [`Board::restore`](crate::Board::restore)
/// validates the contents.
pub fn decode(bytes: &[u8]) -> Result<BoardSnapshot> {
    let header: Header = serde_json::from_slice(bytes)?;
    if header.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: header.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    let envelope: Envelope = serde_json::from_slice(bytes)?;
    Ok(envelope.board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> BoardSnapshot {
        BoardSnapshot {
            cells: [[Color::EMPTY.argb(); WIDTH]; HEIGHT],
            score: 0,
            rows_completed: 0,
            level: 1,
            piece: Some(PieceSnapshot::from(Piece::new(Shape::T, 2, 0))),
            game_over: false,
            rng_state: 7,
        }
    }

    #[test]
    fn test_encode_writes_version_envelope() {
        let bytes = encode(&empty_snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["version"], SNAPSHOT_VERSION);
        assert_eq!(value["board"]["level"], 1);
        assert_eq!(value["board"]["piece"]["shape"], 3);
    }

    #[test]
    fn test_decode_reads_back_encoded_snapshot() {
        let snapshot = empty_snapshot();
        let decoded = decode(&encode(&snapshot).unwrap()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_decode_rejects_future_version() {
        let mut value: serde_json::Value =
            serde_json::from_slice(&encode(&empty_snapshot()).unwrap()).unwrap();
        value["version"] = serde_json::json!(99);
        let bytes = serde_json::to_vec(&value).unwrap();

        match decode(&bytes) {
            Err(SnapshotError::UnsupportedVersion { found, expected }) => {
                assert_eq!(found, 99);
                assert_eq!(expected, SNAPSHOT_VERSION);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode(b"not json"), Err(SnapshotError::Malformed(_))));
        assert!(matches!(
            decode(br#"{"version":1,"board":{"cells":[]}}"#),
            Err(SnapshotError::Malformed(_))
        ));
    }

    #[test]
    fn test_to_grid_rejects_unknown_color() {
        let mut snapshot = empty_snapshot();
        snapshot.cells[4][6] = 0x0000_0001;
        match snapshot.to_grid() {
            Err(SnapshotError::InvalidCell { row, col, value }) => {
                assert_eq!((row, col, value), (4, 6, 1));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_piece_snapshot_checks_fields() {
        let good = PieceSnapshot::from(Piece::with_orientation(Shape::L, 3, 4, 9));
        assert_eq!(
            good.to_piece().unwrap(),
            Piece::with_orientation(Shape::L, 3, 4, 9)
        );

        let bad_shape = PieceSnapshot { shape: 9, ..good };
        assert!(matches!(
            bad_shape.to_piece(),
            Err(SnapshotError::UnknownShape(9))
        ));

        let bad_turns = PieceSnapshot {
            quarter_turns: 4,
            ..good
        };
        assert!(matches!(
            bad_turns.to_piece(),
            Err(SnapshotError::InvalidOrientation(4))
        ));

        for (col, row) in [(-4, 0), (11, 0), (0, -4), (0, 18), (0, 126)] {
            let far = PieceSnapshot { col, row, ..good };
            assert!(matches!(
                far.to_piece(),
                Err(SnapshotError::AnchorOutOfRange { .. })
            ));
        }
        let edge = PieceSnapshot {
            col: -3,
            row: 17,
            ..good
        };
        assert!(edge.to_piece().is_ok());

        let bad_color = PieceSnapshot {
            color: Color::BLUE.argb(),
            ..good
        };
        assert!(matches!(
            bad_color.to_piece(),
            Err(SnapshotError::PieceColorMismatch { .. })
        ));
    }
}
