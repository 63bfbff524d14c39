//! Session tests - timer lifecycle, speed-up, high score and save/load

use blockfall::core::{GameConfig, Session};
use blockfall::types::Command;

fn run_to_game_over(session: &mut Session) -> u64 {
    let mut ticks = 0;
    while let Some(outcome) = session.on_timer() {
        ticks += 1;
        if !outcome.alive {
            break;
        }
        assert!(ticks < 100_000, "game never ended");
    }
    ticks
}

#[test]
fn test_custom_base_interval() {
    let config = GameConfig {
        seed: 9,
        base_tick_ms: 800,
    };
    let mut session = Session::new(config);
    session.start();
    assert_eq!(session.interval_ms(), 800);

    session.increase_level();
    assert_eq!(session.interval_ms(), 600);
    session.increase_level();
    assert_eq!(session.interval_ms(), 450);
}

#[test]
fn test_high_score_survives_restart() {
    let mut session = Session::new(GameConfig::default());
    let mut best = 0;
    for _ in 0..3 {
        session.start();
        run_to_game_over(&mut session);
        best = best.max(session.board().score());
        assert_eq!(session.high_score(), best);
    }
    assert_eq!(session.games_started(), 3);
}

#[test]
fn test_commands_ignored_when_idle() {
    let mut session = Session::new(GameConfig::default());
    let before = session.board().clone();
    session.command(Command::MoveRight);
    session.command(Command::Descend);
    assert_eq!(*session.board(), before);
}

#[test]
fn test_restart_after_game_over() {
    let mut session = Session::new(GameConfig::default());
    session.start();
    run_to_game_over(&mut session);
    assert!(!session.is_playing());

    session.resume();
    assert!(!session.is_playing(), "a finished game cannot be resumed");

    session.reset();
    assert!(session.is_playing());
    assert!(!session.board().is_game_over());
    assert_eq!(session.board().score(), 0);
    assert_eq!(session.interval_ms(), 500);
}

#[test]
fn test_save_and_load_across_sessions() {
    let mut first = Session::new(GameConfig::default());
    first.start();
    first.increase_level();
    for _ in 0..5 {
        first.command(Command::MoveRight);
        first.on_timer();
    }
    let bytes = first.save().unwrap();

    let mut second = Session::new(GameConfig::default());
    second.load(&bytes).unwrap();
    assert_eq!(second.board(), first.board());
    assert_eq!(second.interval_ms(), 375);
    assert!(second.is_paused());
}

#[test]
fn test_loading_finished_game_leaves_session_idle() {
    let mut first = Session::new(GameConfig::default());
    first.start();
    run_to_game_over(&mut first);
    let bytes = first.save().unwrap();

    let mut second = Session::new(GameConfig::default());
    second.load(&bytes).unwrap();
    assert!(second.board().is_game_over());
    assert!(!second.is_paused());
    assert!(!second.is_playing());
    assert_eq!(second.on_timer(), None);
}
