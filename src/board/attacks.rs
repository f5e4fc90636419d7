//! Attack detection: "would a piece of this color capture this square?"
//!
//! This is the hottest non-search routine in the engine (called from check
//! detection after every move and from castling legality), so it reads the
//! board radially and relies on the sentinel border to terminate without
//! bounds checks.

use super::Board;
use crate::types::{Color, PieceKind};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

const DIAG_DIRS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHO_DIRS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Board {
    /// Would `attacker` capture `sq` if an enemy piece sat there?
    pub fn is_attacked(&self, sq: crate::types::Square, attacker: Color) -> bool {
        let y = sq.0 as i32;
        let x = sq.1 as i32;

        // Pawns: a pawn attacks diagonally forward, so an attacking pawn
        // sits one rank "behind" (from the attacker's own forward direction).
        let pawn_dir: i32 = if attacker == Color::White { -1 } else { 1 };
        for dx in [-1, 1] {
            let p = self.raw_at(y - pawn_dir, x + dx);
            if p.color() == attacker && p.kind() == PieceKind::Pawn {
                return true;
            }
        }

        // En passant: `sq` is the square of a pawn that could be captured en
        // passant (one rank behind the en-passant target, in the direction
        // it advanced). An enemy pawn sitting laterally beside it threatens
        // to remove it via an en-passant capture, which is itself a form of
        // attack on that square.
        if let Some(ep) = self.en_passant {
            if y == ep.0 as i32 - pawn_dir && x == ep.1 as i32 {
                for dx in [-1, 1] {
                    let p = self.raw_at(y, x + dx);
                    if p.color() == attacker && p.kind() == PieceKind::Pawn {
                        return true;
                    }
                }
            }
        }

        for (dy, dx) in KING_OFFSETS {
            let p = self.raw_at(y + dy, x + dx);
            if p.color() == attacker && p.kind() == PieceKind::King {
                return true;
            }
        }

        for (dy, dx) in KNIGHT_OFFSETS {
            let p = self.raw_at(y + dy, x + dx);
            if p.color() == attacker && p.kind() == PieceKind::Knight {
                return true;
            }
        }

        for (dy, dx) in DIAG_DIRS {
            let (mut ny, mut nx) = (y + dy, x + dx);
            loop {
                let p = self.raw_at(ny, nx);
                match p.kind() {
                    PieceKind::OffBoard => break,
                    PieceKind::Empty => {}
                    kind => {
                        if p.color() == attacker
                            && (kind == PieceKind::Bishop || kind == PieceKind::Queen)
                        {
                            return true;
                        }
                        break;
                    }
                }
                ny += dy;
                nx += dx;
            }
        }

        for (dy, dx) in ORTHO_DIRS {
            let (mut ny, mut nx) = (y + dy, x + dx);
            loop {
                let p = self.raw_at(ny, nx);
                match p.kind() {
                    PieceKind::OffBoard => break,
                    PieceKind::Empty => {}
                    kind => {
                        if p.color() == attacker
                            && (kind == PieceKind::Rook || kind == PieceKind::Queen)
                        {
                            return true;
                        }
                        break;
                    }
                }
                ny += dy;
                nx += dx;
            }
        }

        false
    }
}
