//! Session module - game lifecycle around a [`Board`]
//!
//! A session is what a front end keeps between timer callbacks: whether a
//! game is running or paused, how long the current fall interval is, the best
//! score so far, and save/load of the running board. It never blocks or
//! sleeps; the caller owns the timer and calls [`Session::on_timer`] every
//! [`Session::interval_ms`] milliseconds.

use log::info;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::Result;
use crate::scoring::tick_interval_ms;
use crate::snapshot;
use crate::types::Command;

/// Result of one timer callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// False when this tick ended the game
    pub alive: bool,
    /// The level rose during this tick
    pub level_up: bool,
    /// Interval to use for the next callback
    pub interval_ms: u32,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    board: Board,
    playing: bool,
    paused: bool,
    interval_ms: u32,
    /// Level the current interval was computed for
    interval_level: u32,
    high_score: u32,
    games_started: u32,
}

impl Session {
    /// Idle session; nothing moves until [`Session::start`]
    pub fn new(config: GameConfig) -> Self {
        let board = Board::new(config.seed);
        let interval_level = board.current_level();
        Self {
            config,
            board,
            playing: false,
            paused: false,
            interval_ms: tick_interval_ms(config.base_tick_ms, interval_level),
            interval_level,
            high_score: 0,
            games_started: 0,
        }
    }

    /// Begin a fresh game, discarding the current one
    ///
    /// Game `n` of the session is seeded with `config.seed + n`, so a session
    /// replays identically from the same config.
    pub fn start(&mut self) {
        let seed = self.config.seed.wrapping_add(self.games_started);
        self.games_started = self.games_started.wrapping_add(1);
        self.board = Board::new(seed);
        self.playing = true;
        self.paused = false;
        self.sync_interval();
        info!("game {} started with seed {}", self.games_started, seed);
    }

    /// Alias of [`Session::start`]
    pub fn reset(&mut self) {
        self.start();
    }

    /// Timer callback; None when no game is running
    pub fn on_timer(&mut self) -> Option<TickOutcome> {
        if !self.playing {
            return None;
        }

        let alive = self.board.tick();
        let level_up = self.board.current_level() > self.interval_level;
        if level_up {
            self.sync_interval();
        }

        if !alive {
            self.playing = false;
            if self.board.score() > self.high_score {
                self.high_score = self.board.score();
                info!("new high score {}", self.high_score);
            }
        }

        Some(TickOutcome {
            alive,
            level_up,
            interval_ms: self.interval_ms,
        })
    }

    /// Forward a command to the board while a game is running
    pub fn command(&mut self, command: Command) {
        if self.playing {
            self.board.apply(command);
        }
    }

    pub fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.playing = true;
        }
    }

    /// Raise the level by one and speed up immediately
    ///
    /// Only applies to a game in progress, running or paused.
    pub fn increase_level(&mut self) {
        if !(self.playing || self.paused) {
            return;
        }
        self.board.increase_level();
        self.sync_interval();
    }

    /// Encode the current board
    pub fn save(&self) -> Result<Vec<u8>> {
        snapshot::encode(&self.board.snapshot())
    }

    /// Replace the board with a saved one
    ///
    /// On success the session is paused on the loaded game (or idle if it was
    /// already over). On failure nothing changes.
    pub fn load(&mut self, bytes: &[u8]) -> Result<()> {
        let snapshot = snapshot::decode(bytes)?;
        let board = Board::restore(&snapshot)?;

        self.board = board;
        self.playing = false;
        self.paused = !self.board.is_game_over();
        self.sync_interval();
        info!(
            "loaded game at level {} with score {}",
            self.board.current_level(),
            self.board.score()
        );
        Ok(())
    }

    fn sync_interval(&mut self) {
        self.interval_level = self.board.current_level();
        self.interval_ms = tick_interval_ms(self.config.base_tick_ms, self.interval_level);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }
}
