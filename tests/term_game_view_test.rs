use blockfall::core::{Session, SessionConfig, SessionSnapshot};
use blockfall::term::{piece_color, AnchorY, GameView, Viewport};
use blockfall::types::PieceKind;

fn started_snapshot(seed: u64) -> SessionSnapshot {
    let mut session = Session::new(SessionConfig::with_seed(seed));
    session.start();
    session.snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let snap = SessionSnapshot::default();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // well = 10*2 by 20*1 => 20x20, plus border => 22x22
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_floor_cell_two_chars_wide() {
    let mut snap = SessionSnapshot::default();
    snap.grid.set(0, 0, Some(PieceKind::I));

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(22, 22));

    // Row 0 is the bottom line inside the border.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(1, 20).unwrap().style.fg, piece_color(PieceKind::I));
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_hides_spawn_buffer_and_shows_ghost() {
    let snap = started_snapshot(1);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(22, 22);
    let fb = view.render(&snap, vp);

    // The fresh piece sits in rows 20-21, which are not drawn.
    for y in 1..21 {
        let line = fb.row_text(y);
        assert!(!line.contains('█'), "row {y}: {line}");
    }

    // Its ghost sits on the floor.
    let ghost = snap.ghost.unwrap();
    for cell in ghost {
        let (x, y) = view.cell_origin(vp, cell.row, cell.col).unwrap();
        assert_eq!(fb.get(x, y).unwrap().ch, '░');
        assert!(fb.get(x, y).unwrap().style.dim);
    }
}

#[test]
fn term_view_side_panel_lists_next_pieces() {
    let snap = started_snapshot(42);
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(60, 24));

    let panel: Vec<String> = (0..24).map(|y| fb.row_text(y)).collect();
    assert!(panel.iter().any(|l| l.contains("SCORE")));
    assert!(panel.iter().any(|l| l.contains("HOLD")));

    let next_row = panel.iter().position(|l| l.contains("NEXT")).unwrap();
    for (i, kind) in snap.next_queue.iter().enumerate() {
        assert!(
            panel[next_row + 1 + i].contains(kind.as_str()),
            "next #{i} should be {kind:?}"
        );
    }
}

#[test]
fn term_view_overlays() {
    let view = GameView::default();
    let vp = Viewport::new(40, 24);

    let mut snap = SessionSnapshot::default();
    snap.paused = true;
    let fb = view.render(&snap, vp);
    assert!((0..24).any(|y| fb.row_text(y).contains("PAUSED")));

    snap.paused = false;
    snap.game_over = true;
    let fb = view.render(&snap, vp);
    assert!((0..24).any(|y| fb.row_text(y).contains("GAME OVER")));
    assert!(!(0..24).any(|y| fb.row_text(y).contains("PAUSED")));
}
