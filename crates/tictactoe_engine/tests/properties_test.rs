//! Property-based tests over reachable boards.

use proptest::prelude::*;
use tictactoe_engine::{Board, Mark, Outcome, Position, best_move, legal_moves, outcome};

/// Replays `picks` as alternating moves from the empty board, player first,
/// stopping at the first terminal position. Each pick indexes into the
/// remaining legal moves.
fn replay(picks: &[usize]) -> (Board, Vec<Position>) {
    let mut board = Board::new();
    let mut played = Vec::new();
    let mut mark = Mark::Player;
    for pick in picks {
        if outcome(&board).is_terminal() {
            break;
        }
        let moves = legal_moves(&board);
        let pos = moves[pick % moves.len()];
        board.apply_move(pos, mark).unwrap();
        played.push(pos);
        mark = mark.other();
    }
    (board, played)
}

fn arb_reachable() -> impl Strategy<Value = (Board, Vec<Position>)> {
    proptest::collection::vec(0usize..9, 0..=9).prop_map(|picks| replay(&picks))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_outcome_symmetric_under_swap((board, played) in arb_reachable()) {
        // Replay the same squares with the labels swapped.
        let mut mirrored = Board::new();
        let mut mark = Mark::Opponent;
        for pos in &played {
            mirrored.apply_move(*pos, mark).unwrap();
            mark = mark.other();
        }
        prop_assert_eq!(&mirrored, &board.swapped());
        prop_assert_eq!(outcome(&mirrored), outcome(&board).swapped());
    }

    #[test]
    fn prop_best_move_is_legal_and_restores((board, _) in arb_reachable()) {
        let mut working = board.clone();
        match best_move(&mut working) {
            Some(pos) => {
                prop_assert_eq!(board.is_occupied(pos), Ok(false));
                prop_assert!(legal_moves(&board).contains(&pos));
            }
            None => prop_assert!(board.is_full()),
        }
        prop_assert_eq!(working, board);
    }

    #[test]
    fn prop_reachable_boards_are_balanced((board, _) in arb_reachable()) {
        prop_assert!(board.is_balanced());
        if outcome(&board) == Outcome::InProgress {
            prop_assert!(!legal_moves(&board).is_empty());
        }
    }
}
