//! Property tests for the engine's core invariants.
//!
//! - The collision predicate agrees with a brute-force bounds/overlap check.
//! - `filled[y][x]` and `colors[y][x] != 0` always agree.
//! - Score never decreases; game over never clears.
//! - Four clockwise rotations are the identity.

use blockfall_engine::{
    Board, Engine, GameConfig, Position, RandomPicker, Shape, ShapeKind,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Action {
    Left,
    Right,
    Rotate,
    SoftDrop,
    HardDrop,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Left),
        Just(Action::Right),
        Just(Action::Rotate),
        Just(Action::SoftDrop),
        Just(Action::HardDrop),
    ]
}

fn shape_kind() -> impl Strategy<Value = ShapeKind> {
    (0..ShapeKind::LEN).prop_map(|i| ShapeKind::ALL[i])
}

fn board(width: usize, height: usize) -> impl Strategy<Value = Board> {
    proptest::collection::vec(proptest::collection::vec(0..=7_u8, width), height).prop_map(
        |rows| {
            let art: String = rows
                .iter()
                .map(|row| {
                    let mut line: String = row
                        .iter()
                        .map(|&c| if c == 0 { '.' } else { char::from(b'0' + c) })
                        .collect();
                    line.push('\n');
                    line
                })
                .collect();
            Board::from_ascii(&art)
        },
    )
}

fn brute_force_fits(board: &Board, shape: &Shape, position: Position) -> bool {
    for y in 0..shape.height() {
        for x in 0..shape.width() {
            if !shape.is_occupied(x, y) {
                continue;
            }
            let bx = position.x + x.cast_signed();
            let by = position.y + y.cast_signed();
            let Ok(bx) = usize::try_from(bx) else {
                return false;
            };
            let Ok(by) = usize::try_from(by) else {
                return false;
            };
            if bx >= board.width() || by >= board.height() || board.filled()[by][bx] {
                return false;
            }
        }
    }
    true
}

fn assert_parity(board: &Board) {
    for (filled, colors) in board.filled().iter().zip(board.colors()) {
        for (&f, &c) in filled.iter().zip(colors) {
            assert_eq!(f, c != 0);
        }
    }
}

proptest! {
    #[test]
    fn can_place_matches_brute_force(
        board in board(6, 8),
        kind in shape_kind(),
        rotations in 0..4_usize,
        x in -5..10_isize,
        y in -2..10_isize,
    ) {
        let mut shape = kind.default_shape();
        for _ in 0..rotations {
            shape = shape.rotated_clockwise();
        }
        let position = Position::new(x, y);
        prop_assert_eq!(
            board.can_place(&shape, position),
            brute_force_fits(&board, &shape, position)
        );
    }

    #[test]
    fn rotating_four_times_is_identity(kind in shape_kind(), start in 0..4_usize) {
        let mut shape = kind.default_shape();
        for _ in 0..start {
            shape = shape.rotated_clockwise();
        }
        let mut rotated = shape;
        for _ in 0..4 {
            rotated = rotated.rotated_clockwise();
        }
        prop_assert_eq!(rotated, shape);
    }

    #[test]
    fn clear_lines_keeps_parity_and_removes_complete_rows(board in board(4, 6)) {
        let mut board = board;
        let complete = (0..board.height()).filter(|&y| board.is_row_complete(y)).count();
        let cleared = board.clear_lines();
        prop_assert_eq!(cleared, complete);
        assert_parity(&board);
        prop_assert!((0..board.height()).all(|y| !board.is_row_complete(y)));
        for y in 0..cleared {
            prop_assert!(!board.is_row_occupied(y));
        }
    }

    #[test]
    fn random_play_respects_invariants(
        seed in any::<u64>(),
        actions in proptest::collection::vec(action(), 1..300),
    ) {
        let mut config = GameConfig::default();
        config.board.width = 8;
        config.board.height = 12;
        let picker = RandomPicker::seed_from_u64(seed);
        let mut engine = Engine::with_picker(config, Box::new(picker)).unwrap();

        let mut last_score = 0;
        let mut was_over = false;
        for action in actions {
            match action {
                Action::Left => _ = engine.try_move_left(),
                Action::Right => _ = engine.try_move_right(),
                Action::Rotate => _ = engine.try_rotate(),
                Action::SoftDrop => _ = engine.tick(),
                Action::HardDrop => {
                    _ = engine.hard_drop();
                    _ = engine.tick();
                }
            }

            assert_parity(engine.board());
            prop_assert!(engine.score() >= last_score);
            last_score = engine.score();
            prop_assert!(!was_over || engine.is_game_over());
            was_over = engine.is_game_over();

            if !engine.is_game_over()
                && let Some(piece) = engine.active_piece()
            {
                prop_assert!(engine.can_place(piece.shape(), piece.position()));
            }
        }
    }
}
