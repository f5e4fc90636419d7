//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use super::{Board, FenError};
use crate::types::{
    file_to_index, rank_to_index, Color, Piece, PieceKind, Square, CASTLE_BK, CASTLE_BQ,
    CASTLE_WK, CASTLE_WQ,
};

impl Board {
    pub fn try_from_fen(fen: &str) -> Result<Board, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::WrongFieldCount { found: parts.len() });
        }

        let mut board = Board::empty();

        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx > 7 {
                return Err(FenError::BadPiecePlacement {
                    rank: rank_idx,
                    reason: "too many ranks",
                });
            }
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    if file > 7 {
                        return Err(FenError::BadPiecePlacement {
                            rank: rank_idx,
                            reason: "too many files",
                        });
                    }
                    let (color, kind) = match c {
                        'P' => (Color::White, PieceKind::Pawn),
                        'N' => (Color::White, PieceKind::Knight),
                        'B' => (Color::White, PieceKind::Bishop),
                        'R' => (Color::White, PieceKind::Rook),
                        'Q' => (Color::White, PieceKind::Queen),
                        'K' => (Color::White, PieceKind::King),
                        'p' => (Color::Black, PieceKind::Pawn),
                        'n' => (Color::Black, PieceKind::Knight),
                        'b' => (Color::Black, PieceKind::Bishop),
                        'r' => (Color::Black, PieceKind::Rook),
                        'q' => (Color::Black, PieceKind::Queen),
                        'k' => (Color::Black, PieceKind::King),
                        _ => {
                            return Err(FenError::BadPiecePlacement {
                                rank: rank_idx,
                                reason: "unrecognized piece letter",
                            })
                        }
                    };
                    board.set_piece(rank_idx, file, Piece::make(color, kind));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadPiecePlacement {
                    rank: rank_idx,
                    reason: "rank does not sum to 8 files",
                });
            }
        }

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        let mut rights = 0u8;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                rights |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    _ => return Err(FenError::BadCastleRights(parts[2].to_string())),
                };
            }
        }
        board.castle_rights = rights;

        board.en_passant = if parts[3] == "-" {
            None
        } else {
            let mut chars = parts[3].chars();
            let file = chars
                .next()
                .filter(|c| ('a'..='h').contains(c))
                .ok_or_else(|| FenError::BadEnPassant(parts[3].to_string()))?;
            let rank = chars
                .next()
                .filter(|c| ('1'..='8').contains(c))
                .ok_or_else(|| FenError::BadEnPassant(parts[3].to_string()))?;
            if chars.next().is_some() {
                return Err(FenError::BadEnPassant(parts[3].to_string()));
            }
            Some(Square(rank_to_index(rank), file_to_index(file)))
        };

        board.halfmove_clock = parts
            .get(4)
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|_| FenError::BadHalfmoveClock((*s).to_string()))
            })
            .transpose()?
            .unwrap_or(0);

        board.fullmove_number = parts
            .get(5)
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|_| FenError::BadFullmoveNumber((*s).to_string()))
            })
            .transpose()?
            .unwrap_or(1);

        board.hash = board.recompute_hash();
        board.update_check_flags();

        Ok(board)
    }

    /// Panicking convenience wrapper over [`Board::try_from_fen`] for call
    /// sites (startup defaults, tests) that already know the FEN is valid.
    pub fn from_fen(fen: &str) -> Board {
        Self::try_from_fen(fen).expect("invalid FEN string")
    }

    pub fn to_fen(&self) -> String {
        let mut ranks = Vec::with_capacity(8);
        for row in 0..8 {
            let mut s = String::new();
            let mut empties = 0u32;
            for col in 0..8 {
                let p = self.piece_at(row, col);
                if p.is_empty() {
                    empties += 1;
                } else {
                    if empties > 0 {
                        s.push_str(&empties.to_string());
                        empties = 0;
                    }
                    s.push(p.to_fen_char());
                }
            }
            if empties > 0 {
                s.push_str(&empties.to_string());
            }
            ranks.push(s);
        }
        let placement = ranks.join("/");

        let side = if self.side_to_move == Color::White { "w" } else { "b" };

        let mut rights = String::new();
        if self.castle_rights & CASTLE_WK != 0 {
            rights.push('K');
        }
        if self.castle_rights & CASTLE_WQ != 0 {
            rights.push('Q');
        }
        if self.castle_rights & CASTLE_BK != 0 {
            rights.push('k');
        }
        if self.castle_rights & CASTLE_BQ != 0 {
            rights.push('q');
        }
        if rights.is_empty() {
            rights.push('-');
        }

        let ep = match self.en_passant {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{placement} {side} {rights} {ep} {} {}",
            self.halfmove_clock, self.fullmove_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTPOS_FEN;

    #[test]
    fn startpos_round_trips() {
        let board = Board::from_fen(STARTPOS_FEN);
        assert_eq!(board.to_fen(), STARTPOS_FEN);
    }

    #[test]
    fn kiwipete_round_trips() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let board = Board::from_fen(fen);
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn rejects_malformed_fen() {
        assert!(Board::try_from_fen("not a fen").is_err());
        assert!(Board::try_from_fen("8/8/8/8/8/8/8/8 x - - 0 1").is_err());
    }

    #[test]
    fn en_passant_square_parses() {
        let board = Board::from_fen(
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
        );
        assert_eq!(board.en_passant, Some(Square(2, 4)));
    }
}
