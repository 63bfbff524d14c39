//! Integration tests for the tick cycle: fall, lock, clear, score, spawn

use blockfall::core::{Board, Grid, LockEvent, Phase, Piece, SimpleRng};
use blockfall::types::{Color, Command, Shape};

fn board_with(grid: Grid, piece: Piece) -> Board {
    Board::from_parts(grid, Some(piece), SimpleRng::new(1))
}

/// Rows `rows` filled in columns 1-9, leaving column 0 open for a vertical I
fn grid_with_gap(rows: std::ops::Range<i8>) -> Grid {
    let mut grid = Grid::new();
    for row in rows {
        for col in 1..10 {
            grid.set(col, row, Color::GREEN);
        }
    }
    grid
}

/// Vertical I whose single column is board column 0
fn i_in_first_column(row: i8) -> Piece {
    Piece::new(Shape::I, -1, row)
}

#[test]
fn test_o_piece_falls_and_locks_on_floor() {
    let mut board = board_with(Grid::new(), Piece::new(Shape::O, 2, 0));

    for expected_row in 1..=15 {
        assert!(board.tick());
        assert_eq!(board.current_piece().unwrap().anchor().row, expected_row);
        assert!(board.take_last_event().is_none());
    }

    // Resting on the floor: this tick locks and spawns
    assert!(board.tick());
    let event = board.take_last_event().unwrap();
    assert!(event.locked);
    assert_eq!(event.rows_cleared, 0);
    assert!(!event.game_over);

    for (row, col) in [(16, 3), (16, 4), (17, 3), (17, 4)] {
        assert_eq!(board.cell_color(row, col), Some(Color::DARK_VIOLET));
    }
    assert_eq!(board.grid().occupied_count(), 4);

    let next = board.current_piece().unwrap();
    assert_eq!(next.anchor().row, 0);
    assert_eq!(board.phase(), Phase::Falling);
}

#[test]
fn test_single_row_clear_scores_100() {
    let mut board = board_with(grid_with_gap(17..18), i_in_first_column(14));

    assert!(board.tick());
    let event = board.take_last_event().unwrap();
    assert_eq!(event.rows_cleared, 1);
    assert_eq!(event.points, 100);
    assert_eq!(board.score(), 100);
    assert_eq!(board.rows_completed(), 1);

    // The three I cells above the cleared row dropped by one
    for row in 15..18 {
        assert_eq!(board.cell_color(row, 0), Some(Color::BLUE));
    }
    assert_eq!(board.grid().occupied_count(), 3);
}

#[test]
fn test_four_row_clear_scores_550() {
    let mut board = board_with(grid_with_gap(14..18), i_in_first_column(14));

    assert!(board.tick());
    assert_eq!(
        board.take_last_event(),
        Some(LockEvent {
            locked: true,
            rows_cleared: 4,
            points: 550,
            levels_gained: 0,
            game_over: false,
        })
    );
    assert_eq!(board.score(), 550);
    assert_eq!(board.rows_completed(), 4);
    assert_eq!(board.current_level(), 1);
    assert_eq!(board.grid().occupied_count(), 0);
}

#[test]
fn test_level_increments_once_when_crossing_ten() {
    let setup = board_with(grid_with_gap(14..18), i_in_first_column(14));
    let mut snapshot = setup.snapshot();
    snapshot.rows_completed = 8;
    let mut board = Board::restore(&snapshot).unwrap();

    assert!(board.tick());
    let event = board.take_last_event().unwrap();
    assert_eq!(event.levels_gained, 1);
    assert_eq!(board.rows_completed(), 12);
    assert_eq!(board.current_level(), 2);
    // Points use the level before the clear
    assert_eq!(board.score(), 550);
}

#[test]
fn test_clear_at_max_level_saturates() {
    let setup = board_with(grid_with_gap(17..18), i_in_first_column(14));
    let mut snapshot = setup.snapshot();
    snapshot.level = u32::MAX;
    snapshot.rows_completed = 9;
    let mut board = Board::restore(&snapshot).unwrap();

    assert!(board.tick());
    let event = board.take_last_event().unwrap();
    assert_eq!(event.rows_cleared, 1);
    assert_eq!(event.levels_gained, 0);
    assert_eq!(board.current_level(), u32::MAX);
    assert_eq!(board.rows_completed(), 10);
    assert_eq!(board.score(), u32::MAX);
}

#[test]
fn test_points_scale_with_level() {
    let mut board = board_with(grid_with_gap(16..18), i_in_first_column(14));
    board.increase_level();
    board.increase_level();
    assert_eq!(board.current_level(), 3);

    board.tick();
    // 2 rows at level 3: 2 * 300 + 1 * 150
    assert_eq!(board.score(), 750);
    assert_eq!(board.rows_completed(), 2);
}

#[test]
fn test_tick_returns_false_only_when_spawn_blocked() {
    let mut grid = Grid::new();
    for row in 0..4 {
        for col in 1..10 {
            grid.set(col, row, Color::BEIGE);
        }
    }
    let mut board = board_with(grid, Piece::new(Shape::O, 2, 15));

    assert!(!board.tick());
    assert!(board.is_game_over());
    let event = board.take_last_event().unwrap();
    assert!(event.locked);
    assert!(event.game_over);

    // Terminal: further ticks and commands change nothing
    let frozen = board.clone();
    assert!(!board.tick());
    for command in Command::ALL {
        board.apply(command);
    }
    board.increase_level();
    assert_eq!(board, frozen);
}

#[test]
fn test_illegal_commands_leave_piece_in_place() {
    let mut board = board_with(Grid::new(), i_in_first_column(0));
    let before = *board.current_piece().unwrap();

    board.move_left();
    assert_eq!(*board.current_piece().unwrap(), before);

    // Turning the I at the wall would push cells off the left edge
    board.rotate_clockwise();
    assert_eq!(*board.current_piece().unwrap(), before);

    board.move_right();
    assert_eq!(board.current_piece().unwrap().anchor().col, 0);
}

#[test]
fn test_descend_one_row_never_locks() {
    let mut board = board_with(Grid::new(), Piece::new(Shape::O, 2, 14));

    board.descend_one_row();
    assert_eq!(board.current_piece().unwrap().anchor().row, 15);
    assert!(!board.can_descend());

    board.descend_one_row();
    assert_eq!(board.current_piece().unwrap().anchor().row, 15);
    assert_eq!(board.grid().occupied_count(), 0);
    assert!(board.take_last_event().is_none());
}

#[test]
fn test_current_piece_cells_report_board_positions() {
    let board = board_with(Grid::new(), Piece::new(Shape::O, 2, 5));
    // Row-major order within the bitmap
    let cells = board.current_piece_cells().to_vec();
    assert_eq!(
        cells,
        vec![
            (6, 3, Color::DARK_VIOLET),
            (6, 4, Color::DARK_VIOLET),
            (7, 3, Color::DARK_VIOLET),
            (7, 4, Color::DARK_VIOLET),
        ]
    );
}

#[test]
fn test_same_seed_and_commands_give_same_game() {
    let commands = [
        Command::MoveLeft,
        Command::RotateCw,
        Command::Descend,
        Command::MoveRight,
        Command::RotateCcw,
    ];

    let play = || {
        let mut board = Board::new(99);
        for i in 0..2_000 {
            board.apply(commands[i % commands.len()]);
            if !board.tick() {
                break;
            }
        }
        board
    };

    assert_eq!(play(), play());
}

#[test]
fn test_game_eventually_ends_without_input() {
    let mut board = Board::new(3);
    let mut ticks = 0;
    while board.tick() {
        ticks += 1;
        assert!(ticks < 100_000);
    }
    assert!(board.is_game_over());
    assert!(!board.tick());
}
