use crate::types::Move;

use super::format_uci_move;

pub fn print_ready() {
    println!("readyok");
}

pub fn print_bestmove(best_move: Option<Move>) {
    match best_move {
        Some(m) => println!("bestmove {}", format_uci_move(&m)),
        None => println!("bestmove 0000"),
    }
}
