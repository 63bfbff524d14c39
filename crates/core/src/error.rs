use thiserror::Error;

/// Why a saved board could not be decoded or restored
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("invalid color {value:#010x} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: u32 },
    #[error("unknown shape id {0}")]
    UnknownShape(u8),
    #[error("orientation must be 0-3 quarter turns, got {0}")]
    InvalidOrientation(u8),
    #[error("piece color {found:#010x} does not belong to shape {shape}")]
    PieceColorMismatch { shape: u8, found: u32 },
    #[error("level must be at least 1, got {0}")]
    InvalidLevel(u32),
    #[error("piece anchor ({col}, {row}) is too far outside the board")]
    AnchorOutOfRange { col: i8, row: i8 },
    #[error("a game in progress needs a falling piece")]
    MissingPiece,
    #[error("falling piece at ({col}, {row}) leaves the board or overlaps the stack")]
    IllegalPiece { col: i8, row: i8 },
}

/// Invalid runtime configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

pub type Result<T> = core::result::Result<T, SnapshotError>;
