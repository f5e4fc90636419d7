//! Iterative-deepening negamax with alpha-beta pruning, quiescence search,
//! and transposition-table-backed move ordering.
//!
//! Deliberately does not implement null-move pruning, internal iterative
//! deepening, late-move reductions, futility pruning or static-exchange
//! evaluation — this search stops at PV-move-first plus MVV-LVA ordering,
//! matching the scope this engine commits to.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::board::Board;
use crate::config::MAX_SEARCH_DEPTH;
use crate::ordering::order_moves;
use crate::tt::{Bound, TranspositionTable};
use crate::types::{Move, MoveList, NO_MOVE};

/// Larger than any real evaluation; mate scores are `INFINITY - ply` so a
/// mate found sooner (smaller ply) scores strictly higher than one found
/// later.
pub const INFINITY: i32 = 1_000_000;

/// Any score at or above this magnitude encodes a forced mate rather than a
/// material/positional evaluation.
pub const MATE_THRESHOLD: i32 = INFINITY - MAX_SEARCH_DEPTH as i32 - 1;

/// Per-search counters and the cooperative stop flag, reset at the start of
/// every `go`.
pub struct SearchInfo {
    pub depth: u32,
    pub score: i32,
    pub nodes: u64,
    pub pv: Vec<Move>,
    pub elapsed_ms: u128,
}

pub struct Search<'a> {
    tt: &'a mut TranspositionTable,
    stop: &'a AtomicBool,
    nodes: u64,
    started: Instant,
}

impl<'a> Search<'a> {
    pub fn new(tt: &'a mut TranspositionTable, stop: &'a AtomicBool) -> Self {
        Search {
            tt,
            stop,
            nodes: 0,
            started: Instant::now(),
        }
    }

    #[inline]
    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Iterative deepening driver: searches depth 1, 2, 3, ... until the
    /// stop flag is set, reporting each completed depth via `on_info`.
    /// Returns the best move found at the deepest completed depth.
    pub fn go(
        &mut self,
        board: &mut Board,
        mut on_info: impl FnMut(&SearchInfo),
    ) -> Move {
        #[cfg(feature = "logging")]
        log::trace!("search started");
        let mut best_move = NO_MOVE;
        for depth in 1..=MAX_SEARCH_DEPTH {
            let score = self.alphabeta(board, depth, -INFINITY, INFINITY, 0);
            if self.should_stop() && depth > 1 {
                break;
            }
            if let Some(entry) = self.tt.probe(board.hash) {
                if entry.best_move != NO_MOVE {
                    best_move = entry.best_move;
                }
            }
            let pv = self.collect_pv(board, depth);
            #[cfg(feature = "logging")]
            log::debug!(
                "depth {depth} complete: score={score} nodes={} elapsed_ms={}",
                self.nodes,
                self.started.elapsed().as_millis()
            );
            on_info(&SearchInfo {
                depth,
                score,
                nodes: self.nodes,
                pv,
                elapsed_ms: self.started.elapsed().as_millis(),
            });
            if self.should_stop() {
                break;
            }
            if score.abs() >= MATE_THRESHOLD {
                break;
            }
        }
        best_move
    }

    /// Walks the TT's recorded best move out of successive positions to
    /// report a principal variation. Moves are made and then unmade so the
    /// board is left exactly as it was found.
    fn collect_pv(&mut self, board: &mut Board, max_len: u32) -> Vec<Move> {
        let mut pv = Vec::with_capacity(max_len as usize);
        let mut made = 0;
        for _ in 0..max_len {
            let entry = match self.tt.probe(board.hash) {
                Some(e) if e.best_move != NO_MOVE => e,
                _ => break,
            };
            let mut legal = MoveList::new();
            board.generate_legal_moves(&mut legal);
            if !legal.as_slice().iter().any(|m| *m == entry.best_move) {
                break;
            }
            board.make(entry.best_move);
            pv.push(entry.best_move);
            made += 1;
        }
        for _ in 0..made {
            board.unmake();
        }
        pv
    }

    fn alphabeta(&mut self, board: &mut Board, depth: u32, mut alpha: i32, beta: i32, ply: u32) -> i32 {
        if self.should_stop() {
            return 0;
        }
        if board.repetition_count() >= 2 {
            return 0;
        }

        let original_alpha = alpha;
        let key = board.hash;

        // Pseudo-legal moves are generated up front so the TT probe below
        // can confirm the stored move is actually legal here before trusting
        // its score/bound — a 64-bit hash collision can otherwise hand back
        // an entry for a completely different position.
        let mut moves = MoveList::new();
        board.generate_moves(&mut moves, false);

        let tt_entry = self.tt.probe(key);
        let hash_move = tt_entry.filter(|e| moves.as_slice().iter().any(|m| *m == e.best_move));

        if let Some(entry) = hash_move {
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::Beta if entry.score >= beta => return beta,
                    Bound::Alpha if entry.score <= alpha => return alpha,
                    _ => {}
                }
            }
        }

        if depth == 0 {
            return self.quiesce(board, alpha, beta);
        }

        self.nodes += 1;

        let hash_move = hash_move.map(|e| e.best_move);
        order_moves(&mut moves, hash_move);

        let mover = board.side_to_move;
        let mut best_move = NO_MOVE;
        let mut best_score = -INFINITY;
        let mut any_legal = false;

        for &m in moves.as_slice() {
            board.make(m);
            if board.in_check(mover) {
                board.unmake();
                continue;
            }
            any_legal = true;
            let score = -self.alphabeta(board, depth - 1, -beta, -alpha, ply + 1);
            board.unmake();

            if score > best_score {
                best_score = score;
                best_move = m;
            }
            if best_score > alpha {
                alpha = best_score;
            }
            if alpha >= beta {
                if !self.should_stop() {
                    self.tt.store(key, best_move, beta, depth, Bound::Beta);
                }
                return alpha;
            }
        }

        if !any_legal {
            return if board.in_check(mover) {
                -INFINITY + ply as i32
            } else {
                0
            };
        }

        if !self.should_stop() {
            let bound = if alpha > original_alpha {
                Bound::Exact
            } else {
                Bound::Alpha
            };
            self.tt.store(key, best_move, alpha, depth, bound);
        }

        alpha
    }

    fn quiesce(&mut self, board: &mut Board, mut alpha: i32, beta: i32) -> i32 {
        if self.should_stop() {
            return 0;
        }
        self.nodes += 1;

        let stand_pat = board.evaluate();
        if stand_pat >= beta {
            return stand_pat;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = MoveList::new();
        board.generate_moves(&mut moves, true);
        order_moves(&mut moves, None);

        let mover = board.side_to_move;
        for &m in moves.as_slice() {
            board.make(m);
            if board.in_check(mover) {
                board.unmake();
                continue;
            }
            let score = -self.quiesce(board, -beta, -alpha);
            board.unmake();

            if score >= beta {
                return score;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}
