use blockfall_engine::{Board, GameEngine, Position, ShapeGenerator, ShapeKind, TickOutcome};

fn tick_until_settled<G: ShapeGenerator>(engine: &mut GameEngine<G>) -> TickOutcome {
    loop {
        let outcome = engine.update();
        if !outcome.is_fell() {
            return outcome;
        }
    }
}

#[test]
fn square_lands_on_floor_and_next_piece_spawns() {
    let mut engine = GameEngine::with_generator(10, 20, || ShapeKind::O).unwrap();

    let outcome = tick_until_settled(&mut engine);
    assert_eq!(outcome, TickOutcome::Landed { cleared_rows: 0 });
    let bottom = engine.board().occupied_cells().map(|p| p.y).max();
    assert_eq!(bottom, Some(19));
    assert_eq!(engine.board().occupied_count(), 4);

    let spawned = engine.piece();
    assert_eq!(spawned.shape(), ShapeKind::O);
    assert!(spawned.bounds().max.y < 0);
    assert!(engine.state().is_running());
}

#[test]
fn filling_last_hole_clears_exactly_one_row() {
    let mut text = "..........\n".repeat(19);
    text.push_str(".#########");
    let board: Board = text.parse().unwrap();
    assert_eq!(board.occupied_count(), 9);

    let mut engine = GameEngine::from_board(board, || ShapeKind::I);
    assert!(engine.rotate());
    while engine.move_left() {}
    assert_eq!(engine.piece().bounds().min.x, 0);
    assert_eq!(engine.piece().bounds().max.x, 0);

    let outcome = tick_until_settled(&mut engine);
    assert_eq!(outcome, TickOutcome::Landed { cleared_rows: 1 });
    assert_eq!(engine.score(), 1);

    let board = engine.board();
    assert!((0..board.width()).all(|x| !board.is_occupied(x, 0)));
    let cells: Vec<_> = board.occupied_cells().collect();
    assert_eq!(
        cells,
        [(0, 17), (0, 18), (0, 19)].map(|(x, y)| Position::new(x, y))
    );
}

#[test]
fn seeded_games_are_reproducible() {
    let seed = "0123456789abcdef0123456789abcdef".parse().unwrap();
    let mut a = GameEngine::with_seed(10, 20, seed).unwrap();
    let mut b = GameEngine::with_seed(10, 20, seed).unwrap();

    for step in 0..500 {
        if step % 7 == 0 {
            assert_eq!(a.rotate(), b.rotate());
        }
        if step % 5 == 0 {
            assert_eq!(a.move_left(), b.move_left());
        }
        assert_eq!(a.update(), b.update());
    }
    assert_eq!(a.board(), b.board());
    assert_eq!(a.render_state(), b.render_state());
}
