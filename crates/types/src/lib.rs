//! Core types module - shared constants and small value types
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used by the simulation, by persistence code and by any front end.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 18 rows (indexed 0-17, row 0 at the top)
//! - **Spawn**: row 0, anchor column 0-5 so the 4-wide bounding box fits
//!
//! # Colors
//!
//! Cells hold a 32-bit ARGB [`Color`]. One value, [`Color::EMPTY`], marks an
//! unoccupied cell; the other seven are the piece colors.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 500 | Fall interval at level 1 |
//! | `SPEEDUP_NUMERATOR / SPEEDUP_DENOMINATOR` | 3/4 | Interval factor per level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, Command, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 18);
//!
//! assert!(Color::EMPTY.is_empty());
//! assert!(!Color::BLUE.is_empty());
//!
//! assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (18 rows)
pub const BOARD_HEIGHT: u8 = 18;

/// Side of the square bounding box every shape bitmap lives in
pub const BITMAP_SIZE: usize = 4;

/// Number of distinct shapes in the catalog
pub const SHAPE_COUNT: u8 = 7;

/// Number of legal spawn columns (anchor column 0..=5)
pub const SPAWN_COLUMNS: u8 = BOARD_WIDTH - BITMAP_SIZE as u8;

/// Fall interval at level 1 in milliseconds
pub const BASE_TICK_MS: u32 = 500;

/// Each level multiplies the fall interval by 3/4
pub const SPEEDUP_NUMERATOR: u32 = 3;
pub const SPEEDUP_DENOMINATOR: u32 = 4;

/// Points per cleared row, multiplied by the level
pub const ROW_POINTS: u32 = 100;

/// Bonus per extra row cleared in the same tick, multiplied by the level
pub const MULTI_ROW_BONUS: u32 = 50;

/// Completed rows needed for each level increment
pub const ROWS_PER_LEVEL: u32 = 10;

/// Level a new game starts at
pub const START_LEVEL: u32 = 1;

/// A 32-bit ARGB cell color.
///
/// The grid stores colors directly, so an empty cell is just another color
/// value ([`Color::EMPTY`]) rather than an `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Empty-cell sentinel (steel blue)
    pub const EMPTY: Color = Color(0xFF46_82B4);

    pub const BLUE: Color = Color(0xFF00_00FF);
    pub const YELLOW: Color = Color(0xFFFF_FF00);
    pub const GREEN: Color = Color(0xFF00_8000);
    pub const BEIGE: Color = Color(0xFFF5_F5DC);
    pub const CRIMSON: Color = Color(0xFFDC_143C);
    pub const DARK_ORANGE: Color = Color(0xFFFF_8C00);
    pub const DARK_VIOLET: Color = Color(0xFF94_00D3);

    /// Piece colors indexed by shape id
    pub const PIECE_COLORS: [Color; SHAPE_COUNT as usize] = [
        Color::BLUE,
        Color::YELLOW,
        Color::GREEN,
        Color::BEIGE,
        Color::CRIMSON,
        Color::DARK_ORANGE,
        Color::DARK_VIOLET,
    ];

    /// True for the empty-cell sentinel
    pub fn is_empty(self) -> bool {
        self == Color::EMPTY
    }

    /// True for the sentinel or any of the seven piece colors
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Color;
    ///
    /// assert!(Color::EMPTY.is_valid());
    /// assert!(Color::CRIMSON.is_valid());
    /// assert!(!Color(0x1234_5678).is_valid());
    /// ```
    pub fn is_valid(self) -> bool {
        self.is_empty() || Color::PIECE_COLORS.contains(&self)
    }

    pub fn argb(self) -> u32 {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::EMPTY
    }
}

/// The seven shapes of the catalog, in shape-id order
///
/// The discriminant is the shape id (0-6) used by spawning and by snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    I = 0,
    Z = 1,
    S = 2,
    T = 3,
    L = 4,
    J = 5,
    O = 6,
}

impl Shape {
    /// All shapes in id order
    pub const ALL: [Shape; SHAPE_COUNT as usize] = [
        Shape::I,
        Shape::Z,
        Shape::S,
        Shape::T,
        Shape::L,
        Shape::J,
        Shape::O,
    ];

    /// Look up a shape by id
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Shape;
    ///
    /// assert_eq!(Shape::from_id(0), Some(Shape::I));
    /// assert_eq!(Shape::from_id(6), Some(Shape::O));
    /// assert_eq!(Shape::from_id(7), None);
    /// ```
    pub fn from_id(id: u8) -> Option<Self> {
        Shape::ALL.get(id as usize).copied()
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Parse shape from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(Shape::I),
            "z" => Some(Shape::Z),
            "s" => Some(Shape::S),
            "t" => Some(Shape::T),
            "l" => Some(Shape::L),
            "j" => Some(Shape::J),
            "o" => Some(Shape::O),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::I => "i",
            Shape::Z => "z",
            Shape::S => "s",
            Shape::T => "t",
            Shape::L => "l",
            Shape::J => "j",
            Shape::O => "o",
        }
    }
}

/// Commands an external driver issues between ticks
///
/// Every command is a silent no-op when the requested placement is illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Shift the piece one column left
    MoveLeft,
    /// Shift the piece one column right
    MoveRight,
    /// Rotate the piece 90° clockwise
    RotateCw,
    /// Rotate the piece 90° counter-clockwise
    RotateCcw,
    /// Drop the piece one row, if it can fall
    Descend,
}

impl Command {
    /// All commands, in declaration order
    pub const ALL: [Command; 5] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::RotateCw,
        Command::RotateCcw,
        Command::Descend,
    ];

    /// Parse a command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("rotateCw"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("DESCEND"), Some(Command::Descend));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "descend" => Some(Command::Descend),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Descend => "descend",
        }
    }
}
