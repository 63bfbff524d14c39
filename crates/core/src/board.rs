//! Board module - the falling-piece state machine
//!
//! The board ties the grid, the falling piece, the RNG and the score together
//! behind one driver-facing API:
//!
//! - [`Board::tick`] advances the fall by one step and reports whether the
//!   game is still alive.
//! - [`Board::move_left`], [`Board::move_right`], [`Board::rotate_clockwise`],
//!   [`Board::rotate_counter_clockwise`] and [`Board::descend_one_row`] are
//!   speculative: an illegal request leaves the board untouched.
//!
//! # Tick cycle
//!
//! ```text
//! Falling --(cannot descend)--> Locking --> Cleared --> Falling
//!                                  |
//!                                  +--(spawn blocked)--> GameOver
//! ```
//!
//! Locking, clearing, scoring and spawning happen within a single tick, so
//! between calls the board is always either falling or over.

use arrayvec::ArrayVec;
use log::{debug, info, warn};

use crate::error::{Result, SnapshotError};
use crate::grid::Grid;
use crate::movement;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::scoring::Progress;
use crate::snapshot::{BoardSnapshot, PieceSnapshot};
use crate::types::{Color, Command, BOARD_HEIGHT, BOARD_WIDTH};
use crate::validation::can_place;

/// Where the board is between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A legal piece is falling
    Falling,
    /// A freshly spawned piece did not fit; terminal
    GameOver,
}

/// What happened during the last lock
///
/// Drivers can take it after a tick to react to clears and level-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// Whether a piece was written into the grid
    pub locked: bool,
    pub rows_cleared: u32,
    pub points: u32,
    pub levels_gained: u32,
    pub game_over: bool,
}

/// Board cell covered by the falling piece: (row, col, color)
pub type PieceCell = (u8, u8, Color);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    current: Option<Piece>,
    progress: Progress,
    phase: Phase,
    rng: SimpleRng,
    last_event: Option<LockEvent>,
}

impl Board {
    /// Empty grid, first piece drawn from `seed`
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }

    /// Empty grid, first piece drawn from `rng`
    pub fn with_rng(mut rng: SimpleRng) -> Self {
        let first = Piece::spawn(&mut rng);
        Self::from_parts(Grid::new(), Some(first), rng)
    }

    /// Assemble a board from an existing grid and piece at level 1
    ///
    /// Useful for setting up positions; the piece is not validated until the
    /// next tick.
    pub fn from_parts(grid: Grid, current: Option<Piece>, rng: SimpleRng) -> Self {
        Self {
            grid,
            current,
            progress: Progress::new(),
            phase: Phase::Falling,
            rng,
            last_event: None,
        }
    }

    // ============== Accessors ==============

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Color at (row, col), None outside the grid
    pub fn cell_color(&self, row: u8, col: u8) -> Option<Color> {
        if row >= BOARD_HEIGHT || col >= BOARD_WIDTH {
            return None;
        }
        self.grid.get(col as i8, row as i8)
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// Cells of the falling piece that lie inside the grid
    pub fn current_piece_cells(&self) -> ArrayVec<PieceCell, 4> {
        let mut out = ArrayVec::new();
        if let Some(piece) = &self.current {
            for c in piece.cells() {
                if self.grid.get(c.col, c.row).is_some() {
                    out.push((c.row as u8, c.col as u8, piece.color()));
                }
            }
        }
        out
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn rows_completed(&self) -> u32 {
        self.progress.rows_completed()
    }

    pub fn current_level(&self) -> u32 {
        self.progress.level()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    // ============== Tick ==============

    /// Advance the simulation by one fall step
    ///
    /// Returns false once the game is over, true otherwise.
    pub fn tick(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }

        if let Some(piece) = self.current.filter(|p| can_place(p, &self.grid)) {
            if let Some(lowered) = movement::shifted(&piece, &self.grid, 0, 1) {
                self.current = Some(lowered);
                return true;
            }
        }

        self.lock_and_spawn()
    }

    /// Lock the current piece, clear rows, score them and spawn the next piece
    fn lock_and_spawn(&mut self) -> bool {
        let mut event = LockEvent::default();

        if let Some(piece) = self.current.take() {
            event.locked = self.grid.lock_piece(&piece);
            if !event.locked {
                warn!(
                    "piece {:?} at {:?} could not be locked; discarding it",
                    piece.shape(),
                    piece.anchor()
                );
            }
        }

        let cleared = self.grid.clear_full_rows();
        let result = self.progress.record_clear(cleared.len() as u32);
        event.rows_cleared = cleared.len() as u32;
        event.points = result.points;
        event.levels_gained = result.levels_gained;

        if !cleared.is_empty() {
            debug!(
                "cleared rows {:?} for {} points (score {})",
                cleared.as_slice(),
                result.points,
                self.progress.score()
            );
        }
        if result.levels_gained > 0 {
            info!("level up: now level {}", self.progress.level());
        }

        let next = Piece::spawn(&mut self.rng);
        self.current = Some(next);

        if !can_place(&next, &self.grid) {
            self.phase = Phase::GameOver;
            event.game_over = true;
            self.last_event = Some(event);
            info!(
                "game over: score {}, rows {}, level {}",
                self.progress.score(),
                self.progress.rows_completed(),
                self.progress.level()
            );
            return false;
        }

        self.last_event = Some(event);
        true
    }

    // ============== Commands ==============

    /// Replace the live piece with `transform`'s result if it is legal
    fn commit(&mut self, transform: impl FnOnce(&Piece, &Grid) -> Option<Piece>) {
        if self.is_game_over() {
            return;
        }
        let Some(piece) = self.current else {
            return;
        };
        if let Some(next) = transform(&piece, &self.grid) {
            self.current = Some(next);
        }
    }

    pub fn move_left(&mut self) {
        self.commit(|p, g| movement::shifted(p, g, -1, 0));
    }

    pub fn move_right(&mut self) {
        self.commit(|p, g| movement::shifted(p, g, 1, 0));
    }

    pub fn rotate_clockwise(&mut self) {
        self.commit(|p, g| movement::rotated(p, g, true));
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.commit(|p, g| movement::rotated(p, g, false));
    }

    /// Drop one row if possible; never locks
    pub fn descend_one_row(&mut self) {
        self.commit(|p, g| movement::shifted(p, g, 0, 1));
    }

    /// Whether the live piece could fall one more row
    pub fn can_descend(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|p| movement::can_descend(p, &self.grid))
    }

    /// Dispatch a [`Command`]
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::RotateCw => self.rotate_clockwise(),
            Command::RotateCcw => self.rotate_counter_clockwise(),
            Command::Descend => self.descend_one_row(),
        }
    }

    /// Raise the level by one without scoring
    pub fn increase_level(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.progress.increase_level();
        info!("level raised to {}", self.progress.level());
    }

    // ============== Snapshots ==============

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells = [[Color::EMPTY.argb(); BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (row, out) in cells.iter_mut().enumerate() {
            for (col, color) in self.grid.row(row).iter().enumerate() {
                out[col] = color.argb();
            }
        }

        BoardSnapshot {
            cells,
            score: self.progress.score(),
            rows_completed: self.progress.rows_completed(),
            level: self.progress.level(),
            piece: self.current.map(PieceSnapshot::from),
            game_over: self.is_game_over(),
            rng_state: self.rng.state(),
        }
    }

    /// Build a new board from a snapshot
    ///
    /// Fails without side effects if the snapshot is inconsistent: unknown
    /// colors or shapes, a level below 1, or a running game whose piece is
    /// missing or does not fit.
    pub fn restore(snapshot: &BoardSnapshot) -> Result<Self> {
        let board = Self::try_restore(snapshot);
        if let Err(err) = &board {
            warn!("rejected snapshot: {}", err);
        }
        board
    }

    fn try_restore(snapshot: &BoardSnapshot) -> Result<Self> {
        if snapshot.level < 1 {
            return Err(SnapshotError::InvalidLevel(snapshot.level));
        }

        let grid = snapshot.to_grid()?;
        let current = snapshot.piece.map(|p| p.to_piece()).transpose()?;

        if !snapshot.game_over {
            let piece = current.as_ref().ok_or(SnapshotError::MissingPiece)?;
            if !can_place(piece, &grid) {
                return Err(SnapshotError::IllegalPiece {
                    col: piece.anchor().col,
                    row: piece.anchor().row,
                });
            }
        }

        Ok(Self {
            grid,
            current,
            progress: Progress::from_parts(
                snapshot.score,
                snapshot.rows_completed,
                snapshot.level,
            ),
            phase: if snapshot.game_over {
                Phase::GameOver
            } else {
                Phase::Falling
            },
            rng: SimpleRng::from_state(snapshot.rng_state),
            last_event: None,
        })
    }
}
