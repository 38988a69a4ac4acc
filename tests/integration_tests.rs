//! Integration tests for the session lifecycle

use blockfall::core::lines::{level_for_lines, line_clear_score, Progress};
use blockfall::core::movement::can_settle_below;
use blockfall::core::{Grid, Phase, Session, SessionConfig};
use blockfall::types::{GameAction, PieceKind, GRID_COLS};

fn started(seed: u64) -> Session {
    let mut session = Session::new(SessionConfig::with_seed(seed));
    session.start();
    session
}

/// Filled grid cells minus the active piece.
fn stack_cells(session: &Session) -> usize {
    let filled = session.grid().cells().iter().filter(|c| c.is_some()).count();
    filled - session.active().map_or(0, |_| 4)
}

#[test]
fn test_game_lifecycle() {
    let mut session = Session::new(SessionConfig::with_seed(12345));
    assert!(!session.started());
    assert!(session.active().is_none());

    session.start();
    assert!(session.started());
    assert!(session.active().is_some());
    assert_eq!(session.phase(), Phase::Falling);
    assert!(!session.game_over());
    assert!(!session.paused());
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::SoftDrop,
        GameAction::HardDrop,
    ];

    let mut a = started(99);
    let mut b = started(99);
    for action in script {
        assert_eq!(a.apply_action(action), b.apply_action(action));
        a.tick(16);
        b.tick(16);
    }
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.active(), b.active());
    assert_eq!(a.next_queue(), b.next_queue());
    assert_eq!(a.held(), b.held());
}

#[test]
fn test_hold_twice_is_a_no_op() {
    let mut session = started(5);
    assert!(session.apply_action(GameAction::Hold));
    let held = session.held();
    let active = *session.active().unwrap();
    let grid = session.grid().clone();

    assert!(!session.apply_action(GameAction::Hold));
    assert_eq!(session.held(), held);
    assert_eq!(*session.active().unwrap(), active);
    assert_eq!(session.grid(), &grid);
}

#[test]
fn test_hard_drop_always_rests_before_locking() {
    let mut session = started(4321);
    for _ in 0..30 {
        if session.game_over() {
            break;
        }
        let ghost = session.ghost().unwrap();
        let kind = session.active().unwrap().kind;
        let stack_before = stack_cells(&session);

        assert!(session.hard_drop());

        // The landing spot was a resting position, and the piece was committed there.
        let mut grid_without_piece = session.grid().clone();
        if let Some(active) = session.active() {
            for cell in active.shape {
                grid_without_piece.set(cell.row, cell.col, None);
            }
        }
        let lock = session.take_last_lock().unwrap();
        assert_eq!(lock.kind, kind);
        if lock.clear.count() == 0 {
            assert!(can_settle_below(&grid_without_piece, &ghost));
            assert_eq!(stack_cells(&session), stack_before + 4);
        }
    }
}

#[test]
fn test_soft_drop_reaches_locking() {
    let mut session = started(8);
    let mut steps = 0;
    while session.phase() == Phase::Falling {
        assert!(session.soft_drop_tick());
        steps += 1;
        assert!(steps < 30);
    }
    assert_eq!(session.phase(), Phase::Locking);
    assert!(session.is_grounded());
    // Already resting: further soft drops change nothing.
    assert!(!session.soft_drop_tick());
}

#[test]
fn test_lock_delay_uses_configured_time() {
    let config = SessionConfig {
        lock_delay_ms: 1000,
        ..SessionConfig::with_seed(3)
    };
    let mut session = Session::new(config);
    session.start();
    while session.phase() == Phase::Falling {
        session.advance_gravity_tick();
    }

    for _ in 0..62 {
        session.tick(16);
    }
    assert_eq!(session.phase(), Phase::Locking);
    assert_eq!(session.pieces_spawned(), 1);

    session.tick(16);
    assert_eq!(session.pieces_spawned(), 2);
}

#[test]
fn test_pause_freezes_everything() {
    let mut session = started(77);
    assert!(session.apply_action(GameAction::Pause));
    let snap = session.snapshot();

    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::Hold,
    ] {
        assert!(!session.apply_action(action));
    }
    for _ in 0..1000 {
        assert!(!session.tick(16));
    }
    assert_eq!(session.snapshot(), snap);

    assert!(session.apply_action(GameAction::Pause));
    assert!(!session.paused());
}

#[test]
fn test_line_clear_through_session() {
    // Find where the first piece lands on an empty grid, then fill the floor
    // row everywhere else so that landing completes it.
    let probe = started(11);
    let ghost = probe.ghost().unwrap();

    let mut grid = Grid::new();
    for col in 0..GRID_COLS as i8 {
        if !ghost.iter().any(|c| c.row == 0 && c.col == col) {
            grid.set(0, col, Some(PieceKind::Z));
        }
    }

    let mut session = Session::from_grid(SessionConfig::with_seed(11), grid);
    session.start();
    assert_eq!(session.ghost(), Some(ghost));

    assert!(session.hard_drop());
    assert_eq!(session.lines(), 1);
    assert_eq!(session.score(), 40);
    assert_eq!(session.level(), 1);
    assert_eq!(session.last_lock().unwrap().clear.rows.as_slice(), &[0]);
    // What was left of the piece above the floor dropped into row 0.
    let upper = ghost.iter().filter(|c| c.row == 1).count();
    let floor = session.grid().row(0).unwrap().iter().filter(|c| c.is_some()).count();
    assert_eq!(floor, upper);
}

#[test]
fn test_score_table_at_level_three() {
    assert_eq!(line_clear_score(1, 3), 120);
    assert_eq!(line_clear_score(2, 3), 300);
    assert_eq!(line_clear_score(3, 3), 900);
    assert_eq!(line_clear_score(4, 3), 3600);
}

#[test]
fn test_level_transitions() {
    let mut progress = Progress {
        score: 0,
        lines: 9,
        level: level_for_lines(9),
    };
    assert_eq!(progress.level, 1);
    progress.record_clear(1);
    assert_eq!(progress.lines, 10);
    assert_eq!(progress.level, 1);

    progress.lines = 19;
    progress.record_clear(1);
    assert_eq!(progress.level, 2);
}

#[test]
fn test_game_over_is_absorbing() {
    let mut session = started(2);
    let mut drops = 0;
    while !session.game_over() {
        session.hard_drop();
        drops += 1;
        assert!(drops < 200, "stacking in the middle must top out");
    }

    assert_eq!(session.phase(), Phase::GameOver);
    assert!(session.active().is_none());
    let grid = session.grid().clone();
    for action in [
        GameAction::MoveLeft,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::Pause,
    ] {
        assert!(!session.apply_action(action));
    }
    assert!(!session.tick(10_000));
    assert_eq!(session.grid(), &grid);
    assert!(session.snapshot().game_over);
}
