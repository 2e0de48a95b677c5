use blockfall_engine::{
    ActionError, Engine, EngineState, GameConfig, Position, ScriptedPicker, ShapeKind,
    TickOutcome,
};

fn engine(kinds: &[ShapeKind]) -> Engine {
    let picker = ScriptedPicker::new(kinds.iter().copied());
    Engine::with_picker(GameConfig::default(), Box::new(picker)).unwrap()
}

#[test]
fn o_piece_falls_to_the_floor_and_locks() {
    let mut engine = engine(&[ShapeKind::O, ShapeKind::T]);
    assert_eq!((engine.board().width(), engine.board().height()), (12, 22));

    engine.spawn();
    let piece = engine.active_piece().unwrap();
    assert_eq!(piece.kind(), ShapeKind::O);
    assert_eq!(piece.position(), Position::new(5, 0));

    assert_eq!(engine.try_move(-1), Ok(()));
    assert_eq!(engine.active_piece().unwrap().position().x, 4);

    assert_eq!(engine.try_move(-100), Err(ActionError::Collision));
    assert_eq!(engine.active_piece().unwrap().position().x, 4);

    for y in 1..=20 {
        assert_eq!(engine.tick(), TickOutcome::Fell);
        assert_eq!(engine.active_piece().unwrap().position(), Position::new(4, y));
    }

    assert_eq!(engine.tick(), TickOutcome::Locked { cleared_lines: 0 });
    for (x, y) in [(4, 20), (5, 20), (4, 21), (5, 21)] {
        assert!(engine.board().is_filled(x, y), "({x}, {y}) should be filled");
    }
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.state(), EngineState::Falling);
    assert_eq!(engine.active_piece().unwrap().kind(), ShapeKind::T);
}

#[test]
fn hard_drop_is_idempotent_per_piece() {
    let mut engine = engine(&[ShapeKind::L, ShapeKind::J, ShapeKind::Z]);
    for _ in 0..3 {
        if engine.active_piece().is_none() {
            engine.tick();
        }
        let landed_rows = engine.hard_drop().unwrap();
        let resting = *engine.active_piece().unwrap();
        assert_eq!(engine.hard_drop(), Ok(0));
        assert_eq!(*engine.active_piece().unwrap(), resting);

        let below = resting.moved(0, 1);
        assert!(!engine.can_place(below.shape(), below.position()));
        assert!(landed_rows > 0);

        assert!(engine.tick().is_locked());
        for (x, y) in resting.occupied_cells() {
            let (x, y) = (usize::try_from(x).unwrap(), usize::try_from(y).unwrap());
            assert_eq!(engine.board().color_at(x, y), Some(resting.color()));
        }
    }
    assert_eq!(engine.stats().completed_pieces(), 3);
}

#[test]
fn clearing_two_rows_with_i_pieces() {
    // Three horizontal I pieces per row fill a 12-wide board.
    let mut engine = engine(&[ShapeKind::I]);
    engine.tick();

    let mut outcomes = vec![];
    for dx in [-4, 0, 4, -4, 0, 4] {
        engine.try_move(dx).unwrap();
        engine.hard_drop().unwrap();
        outcomes.push(engine.tick());
    }

    assert_eq!(
        outcomes,
        [
            TickOutcome::Locked { cleared_lines: 0 },
            TickOutcome::Locked { cleared_lines: 0 },
            TickOutcome::Locked { cleared_lines: 1 },
            TickOutcome::Locked { cleared_lines: 0 },
            TickOutcome::Locked { cleared_lines: 0 },
            TickOutcome::Locked { cleared_lines: 1 },
        ]
    );
    assert_eq!(engine.score(), 200);
    assert_eq!(engine.stats().total_cleared_lines(), 2);
    assert!((0..22).all(|y| !engine.board().is_row_occupied(y)));
}

#[test]
fn stacking_in_the_middle_tops_out() {
    let mut engine = engine(&[ShapeKind::O]);
    let mut ticks = 0;
    while !engine.is_game_over() {
        engine.hard_drop().ok();
        engine.tick();
        ticks += 1;
        assert!(ticks < 100, "game should end");
    }
    // Eleven O pieces stack 22 rows high in columns 5 and 6.
    assert_eq!(engine.stats().completed_pieces(), 11);
    assert!(engine.board().is_row_occupied(0));
    assert_eq!(engine.tick(), TickOutcome::Finished);
    assert_eq!(engine.try_rotate(), Err(ActionError::GameOver));
}
