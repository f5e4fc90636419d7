//! Hand-authored mate-in-one positions, checked by playing the engine's
//! chosen move and confirming it leaves the opponent with no legal replies
//! while in check.

use mailbox_chess::board::Board;
use mailbox_chess::search::Search;
use mailbox_chess::tt::TranspositionTable;
use mailbox_chess::types::MoveList;
use std::sync::atomic::{AtomicBool, Ordering};

const MATE_IN_ONE_POSITIONS: &[(&str, &str)] = &[
    ("back rank, white to move", "6k1/5ppp/8/8/8/8/5PPP/R6K w - - 0 1"),
    ("smothered-style queen mate", "6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1"),
    ("scholar's mate", "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 4"),
    ("black back rank mate", "3r2k1/8/8/8/8/8/5PPP/6K1 b - - 0 1"),
];

fn best_move_at_depth(fen: &str, depth: u32) -> mailbox_chess::types::Move {
    let mut board = Board::from_fen(fen);
    let mut tt = TranspositionTable::new(16);
    let stop = AtomicBool::new(false);
    let mut search = Search::new(&mut tt, &stop);
    search.go(&mut board, |info| {
        if info.depth >= depth {
            stop.store(true, Ordering::Relaxed);
        }
    })
}

#[test]
fn mate_in_one_suite() {
    for &(name, fen) in MATE_IN_ONE_POSITIONS {
        let mut board = Board::from_fen(fen);
        let mover = board.side_to_move;
        let best = best_move_at_depth(fen, 3);

        board.make(best);
        let mut replies = MoveList::new();
        board.generate_legal_moves(&mut replies);

        assert!(
            replies.is_empty() && board.in_check(mover.flip()),
            "{name}: move {best} from fen {fen} was not mate"
        );
    }
}
