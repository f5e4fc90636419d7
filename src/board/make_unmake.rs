//! Make/unmake: applying a move in place with an incrementally maintained
//! Zobrist hash, and restoring the prior position in O(1) via a history
//! stack of full snapshots.

use super::{Board, HistoryEntry};
use crate::types::{
    Color, Move, Piece, PieceKind, Square, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, EMPTY,
};
use crate::zobrist::{turn_index, ZOBRIST};

impl Board {
    fn snapshot(&self) -> HistoryEntry {
        HistoryEntry {
            grid: self.grid,
            side_to_move: self.side_to_move,
            castle_rights: self.castle_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            white_in_check: self.white_in_check,
            black_in_check: self.black_in_check,
            hash: self.hash,
        }
    }

    /// Applies `m`, which is assumed pseudo-legal for `side_to_move`.
    /// Pushes the prior state onto the history stack so [`Board::unmake`]
    /// can restore it in O(1).
    pub fn make(&mut self, m: Move) {
        self.history.push(self.snapshot());

        // XOR out the pieces of incremental state that are about to change;
        // they're XORed back in at the end with their new values.
        if let Some(ep) = self.en_passant {
            self.hash ^= ZOBRIST.ep_hash[ep.1];
        }
        self.hash ^= ZOBRIST.castle_hash[self.castle_rights as usize];
        self.hash ^= ZOBRIST.turn_hash[turn_index(self.side_to_move)];

        let side = self.side_to_move;
        let moved = self.piece_at_sq(m.from);
        let captured = self.piece_at_sq(m.to);

        let is_pawn = moved.kind() == PieceKind::Pawn;
        let is_capture = !captured.is_empty();

        let en_passant_victim = if is_pawn && !is_capture && Some(m.to) == self.en_passant {
            let cap_row = if side == Color::White { m.to.0 + 1 } else { m.to.0 - 1 };
            Some(Square(cap_row, m.to.1))
        } else {
            None
        };

        if is_capture {
            self.hash ^= ZOBRIST.piece_hash[m.to.0][m.to.1][captured.0 as usize];
        }

        let placed = if m.promotion != PieceKind::Empty {
            Piece::make(side, m.promotion)
        } else {
            moved
        };
        self.hash ^= ZOBRIST.piece_hash[m.to.0][m.to.1][placed.0 as usize];
        self.set_piece(m.to.0, m.to.1, placed);

        self.hash ^= ZOBRIST.piece_hash[m.from.0][m.from.1][moved.0 as usize];
        self.set_piece(m.from.0, m.from.1, EMPTY);

        if let Some(cap_sq) = en_passant_victim {
            let cap_piece = self.piece_at_sq(cap_sq);
            self.hash ^= ZOBRIST.piece_hash[cap_sq.0][cap_sq.1][cap_piece.0 as usize];
            self.set_piece(cap_sq.0, cap_sq.1, EMPTY);
        }

        if moved.kind() == PieceKind::King && (m.to.1 as i32 - m.from.1 as i32).abs() == 2 {
            let back_rank = m.from.0;
            let kingside = m.to.1 > m.from.1;
            let (rook_from_col, rook_to_col) = if kingside { (7, 5) } else { (0, 3) };
            let rook = self.piece_at(back_rank, rook_from_col);
            self.hash ^= ZOBRIST.piece_hash[back_rank][rook_from_col][rook.0 as usize];
            self.set_piece(back_rank, rook_from_col, EMPTY);
            self.hash ^= ZOBRIST.piece_hash[back_rank][rook_to_col][rook.0 as usize];
            self.set_piece(back_rank, rook_to_col, rook);
        }

        self.en_passant = None;
        if is_pawn && (m.to.0 as i32 - m.from.0 as i32).abs() == 2 {
            let mid = (m.to.0 + m.from.0) / 2;
            self.en_passant = Some(Square(mid, m.from.1));
        }

        if captured.kind() == PieceKind::Rook {
            match (captured.color(), m.to.0, m.to.1) {
                (Color::Black, 0, 0) => self.castle_rights &= !CASTLE_BQ,
                (Color::Black, 0, 7) => self.castle_rights &= !CASTLE_BK,
                (Color::White, 7, 0) => self.castle_rights &= !CASTLE_WQ,
                (Color::White, 7, 7) => self.castle_rights &= !CASTLE_WK,
                _ => {}
            }
        }

        match moved.kind() {
            PieceKind::King => {
                if side == Color::White {
                    self.castle_rights &= !(CASTLE_WK | CASTLE_WQ);
                } else {
                    self.castle_rights &= !(CASTLE_BK | CASTLE_BQ);
                }
            }
            PieceKind::Rook => match (side, m.from.0, m.from.1) {
                (Color::White, 7, 0) => self.castle_rights &= !CASTLE_WQ,
                (Color::White, 7, 7) => self.castle_rights &= !CASTLE_WK,
                (Color::Black, 0, 0) => self.castle_rights &= !CASTLE_BQ,
                (Color::Black, 0, 7) => self.castle_rights &= !CASTLE_BK,
                _ => {}
            },
            _ => {}
        }

        if is_pawn || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if side == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = side.flip();

        self.update_check_flags();

        if let Some(ep) = self.en_passant {
            self.hash ^= ZOBRIST.ep_hash[ep.1];
        }
        self.hash ^= ZOBRIST.castle_hash[self.castle_rights as usize];
        self.hash ^= ZOBRIST.turn_hash[turn_index(self.side_to_move)];

        debug_assert_eq!(
            self.hash,
            self.recompute_hash(),
            "incremental hash diverged from full recompute after {m}"
        );
    }

    /// Convenience alias used by UCI position parsing.
    pub fn make_move(&mut self, m: Move) {
        self.make(m);
    }

    /// Restores the position to what it was before the last [`Board::make`].
    pub fn unmake(&mut self) {
        let prev = self.history.pop().expect("unmake called with empty history");
        self.grid = prev.grid;
        self.side_to_move = prev.side_to_move;
        self.castle_rights = prev.castle_rights;
        self.en_passant = prev.en_passant;
        self.halfmove_clock = prev.halfmove_clock;
        self.fullmove_number = prev.fullmove_number;
        self.white_in_check = prev.white_in_check;
        self.black_in_check = prev.black_in_check;
        self.hash = prev.hash;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS_FEN;
    use crate::types::MoveList;

    fn first_legal(board: &mut Board) -> Move {
        let mut out = MoveList::new();
        board.generate_legal_moves(&mut out);
        out.as_slice()[0]
    }

    #[test]
    fn make_unmake_restores_exact_state() {
        let mut board = Board::from_fen(STARTPOS_FEN);
        let before_fen = board.to_fen();
        let before_hash = board.hash;
        let m = first_legal(&mut board);
        board.make(m);
        assert_ne!(board.to_fen(), before_fen);
        board.unmake();
        assert_eq!(board.to_fen(), before_fen);
        assert_eq!(board.hash, before_hash);
    }

    #[test]
    fn double_pawn_push_sets_en_passant_square() {
        let mut board = Board::from_fen(STARTPOS_FEN);
        let push = Move {
            from: Square(6, 4),
            to: Square(4, 4),
            promotion: PieceKind::Empty,
            is_castle: false,
            score: 0,
        };
        board.make(push);
        assert_eq!(board.en_passant, Some(Square(5, 4)));
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn_not_the_target_square() {
        // white pawn on e5, black just played d7-d5: capture en passant on d6.
        let mut board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let capture = Move {
            from: Square(3, 4),
            to: Square(2, 3),
            promotion: PieceKind::Empty,
            is_castle: false,
            score: 0,
        };
        board.make(capture);
        assert_eq!(board.piece_at(2, 3).kind(), PieceKind::Pawn);
        assert_eq!(board.piece_at(3, 3).kind(), PieceKind::Empty);
        assert_eq!(board.piece_at(3, 4).kind(), PieceKind::Empty);
    }

    #[test]
    fn castling_relocates_rook() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let castle = Move {
            from: Square(7, 4),
            to: Square(7, 6),
            promotion: PieceKind::Empty,
            is_castle: true,
            score: 0,
        };
        board.make(castle);
        assert_eq!(board.piece_at(7, 5).kind(), PieceKind::Rook);
        assert_eq!(board.piece_at(7, 7).kind(), PieceKind::Empty);
        assert_eq!(board.castle_rights, 0);
    }

    #[test]
    fn capturing_a_rook_clears_opponent_castle_rights() {
        let mut board = Board::from_fen("r3k3/8/8/8/8/8/8/R3K2R w KQq - 0 1");
        let capture = Move {
            from: Square(7, 0),
            to: Square(0, 0),
            promotion: PieceKind::Empty,
            is_castle: false,
            score: 0,
        };
        board.make(capture);
        assert_eq!(board.castle_rights & crate::types::CASTLE_BQ, 0);
    }
}
