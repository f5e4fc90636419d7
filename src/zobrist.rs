//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes used by the
//! transposition table.

use rand::prelude::*;

use crate::types::Color;

pub(crate) struct ZobristKeys {
    /// `piece_hash[rank][file][piece]`, piece indexed by the packed byte in
    /// `crate::types::Piece` (0..=13).
    pub(crate) piece_hash: [[[u64; 14]; 8]; 8],
    pub(crate) turn_hash: [u64; 2],
    /// Indexed by the 4-bit castle-rights mask.
    pub(crate) castle_hash: [u64; 16],
    /// Indexed by file; en passant only ever depends on the file of the
    /// target square since the rank is implied by the side to move.
    pub(crate) ep_hash: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64);

        let mut piece_hash = [[[0u64; 14]; 8]; 8];
        for rank in piece_hash.iter_mut() {
            for file in rank.iter_mut() {
                for key in file.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let mut turn_hash = [0u64; 2];
        for key in turn_hash.iter_mut() {
            *key = rng.gen();
        }

        let mut castle_hash = [0u64; 16];
        for key in castle_hash.iter_mut() {
            *key = rng.gen();
        }

        let mut ep_hash = [0u64; 8];
        for key in ep_hash.iter_mut() {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_hash,
            turn_hash,
            castle_hash,
            ep_hash,
        }
    }
}

pub(crate) static ZOBRIST: std::sync::LazyLock<ZobristKeys> = std::sync::LazyLock::new(ZobristKeys::new);

#[inline]
pub(crate) fn turn_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        _ => 1,
    }
}
