//! Property-based invariant checks: for any sequence of legal moves played
//! from the starting position, the incremental Zobrist hash must always
//! match a full recompute, and make/unmake must restore the exact prior
//! state.

use mailbox_chess::board::Board;
use mailbox_chess::types::MoveList;
use proptest::prelude::*;

fn play_random_line(board: &mut Board, choices: &[usize]) -> Vec<mailbox_chess::types::Move> {
    let mut played = Vec::new();
    for &choice in choices {
        let mut legal = MoveList::new();
        board.generate_legal_moves(&mut legal);
        if legal.is_empty() {
            break;
        }
        let mv = legal.as_slice()[choice % legal.len()];
        board.make(mv);
        played.push(mv);
        prop_assert_hash_matches(board);
    }
    played
}

fn prop_assert_hash_matches(board: &Board) {
    assert_eq!(
        board.hash,
        board.recompute_hash(),
        "incremental hash diverged from full recompute"
    );
}

proptest! {
    #[test]
    fn hash_matches_recompute_along_any_legal_line(choices in prop::collection::vec(0usize..32, 0..8)) {
        let mut board = Board::new();
        play_random_line(&mut board, &choices);
    }

    #[test]
    fn make_unmake_restores_exact_state_along_any_legal_line(choices in prop::collection::vec(0usize..32, 0..8)) {
        let mut board = Board::new();
        let before_fen = board.to_fen();
        let before_hash = board.hash;

        let played = play_random_line(&mut board, &choices);

        for _ in 0..played.len() {
            board.unmake();
        }

        prop_assert_eq!(board.to_fen(), before_fen);
        prop_assert_eq!(board.hash, before_hash);
    }

    #[test]
    fn generated_moves_always_belong_to_the_side_to_move(choices in prop::collection::vec(0usize..32, 0..6)) {
        let mut board = Board::new();
        play_random_line(&mut board, &choices);

        let mut moves = MoveList::new();
        board.generate_moves(&mut moves, false);
        let mover = board.side_to_move;
        for m in moves.as_slice() {
            prop_assert!(!board.piece_at_sq(m.from).is_empty());
            prop_assert_eq!(board.piece_at_sq(m.from).color(), mover);
        }
    }
}
