//! Move ordering: try the transposition table's move first, then sort the
//! rest by their generation-time score (MVV-LVA for captures, a small
//! castling bonus, zero for other quiets).
//!
//! Deliberately does not implement killer moves or history heuristics —
//! those need per-search mutable tables, and this engine's move ordering
//! stops at PV-move-first plus MVV-LVA.

use crate::types::{Move, MoveList};

/// Puts `hash_move` first (if present in `moves`) and stable-sorts
/// everything else by descending ordering score.
pub fn order_moves(moves: &mut MoveList, hash_move: Option<Move>) {
    if let Some(hm) = hash_move {
        moves.swap_to_front(&hm);
        let rest = moves.as_mut_slice();
        if !rest.is_empty() {
            rest[1..].sort_by(|a, b| b.score.cmp(&a.score));
        }
    } else {
        moves.sort_by_score();
    }
}
