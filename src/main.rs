//! Headless Blockfall runner (default binary).
//!
//! Plays one game with a deterministic autoplayer instead of a keyboard and
//! prints a summary when the game ends or the tick budget runs out. Nothing is
//! rendered; use `-v` to watch locks, clears and level-ups in the log.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{debug, info, LevelFilter, Log, Metadata, Record};

use blockfall::core::{GameConfig, Session, SimpleRng};
use blockfall::types::Command;

#[derive(Parser, Debug)]
#[command(name = "blockfall", version, about)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Seed for the piece sequence (overrides BLOCKFALL_SEED)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Stop after this many timer ticks
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Resume from a saved game instead of starting fresh
    #[arg(long, value_name = "PATH")]
    load: Option<PathBuf>,

    /// Write the final board to this file
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(level: LevelFilter) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|err| anyhow!("failed to install logger: {}", err))?;
    log::set_max_level(level);
    Ok(())
}

/// Picks one command (or none) between ticks from its own RNG stream
struct AutoPlayer {
    rng: SimpleRng,
}

impl AutoPlayer {
    fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed ^ 0x5bd1_e995),
        }
    }

    fn next_command(&mut self) -> Option<Command> {
        let pick = self.rng.next_range(Command::ALL.len() as u32 + 1) as usize;
        Command::ALL.get(pick).copied()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter())?;

    let mut config = GameConfig::from_env();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate().context("invalid configuration")?;
    debug!("config: {:?}", config);

    let mut session = Session::new(config);
    match &args.load {
        Some(path) => {
            let bytes = fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            session
                .load(&bytes)
                .with_context(|| format!("failed to load {}", path.display()))?;
            session.resume();
        }
        None => session.start(),
    }

    let mut player = AutoPlayer::new(config.seed);
    let mut ticks = 0u64;
    while ticks < args.max_ticks {
        if let Some(command) = player.next_command() {
            session.command(command);
        }
        let Some(outcome) = session.on_timer() else {
            break;
        };
        ticks += 1;
        if outcome.level_up {
            info!(
                "level {} reached, interval now {} ms",
                session.board().current_level(),
                outcome.interval_ms
            );
        }
        if !outcome.alive {
            break;
        }
    }

    if let Some(path) = &args.save {
        let bytes = session.save().context("failed to encode board")?;
        fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        info!("saved board to {}", path.display());
    }

    let board = session.board();
    println!("score:     {}", board.score());
    println!("rows:      {}", board.rows_completed());
    println!("level:     {}", board.current_level());
    println!("ticks:     {}", ticks);
    println!("game over: {}", board.is_game_over());
    Ok(())
}
