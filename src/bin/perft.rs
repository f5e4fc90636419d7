//! Standalone perft CLI: `perft <depth> [fen...]`. Prints the per-root-move
//! breakdown followed by the total node count, for comparing against a
//! reference engine's divide output.

use mailbox_chess::board::{perft_divide, Board, STARTPOS_FEN};

fn main() {
    let mut args = std::env::args().skip(1);
    let depth: u32 = args
        .next()
        .expect("usage: perft <depth> [fen...]")
        .parse()
        .expect("depth must be a non-negative integer");
    let fen_tokens: Vec<String> = args.collect();
    let fen = if fen_tokens.is_empty() {
        STARTPOS_FEN.to_string()
    } else {
        fen_tokens.join(" ")
    };

    let mut board = Board::from_fen(&fen);
    let start = std::time::Instant::now();
    let total = perft_divide(&mut board, depth);
    let elapsed = start.elapsed();
    println!("total {total} nodes in {elapsed:?}");
}
