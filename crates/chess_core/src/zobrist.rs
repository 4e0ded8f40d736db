//! Zobrist keys for repetition detection.
//!
//! A position key is the XOR of one random value per (piece, square) pair,
//! one for black to move, one per castling right still available, and one for
//! the file of the en-passant square when a pawn can actually capture there. `Position` keeps its
//! key current through make/unmake; [`Position::compute_key`] rebuilds it from
//! scratch and is what FEN parsing and the tests use.
//!
//! [`Position::compute_key`]: crate::Position::compute_key

use crate::types::Piece;

pub struct ZobristKeys {
    /// Indexed by `color * 6 + kind`, then square.
    pieces: [[u64; 64]; 12],
    black_to_move: u64,
    /// Indexed by castling bit: 0 = K, 1 = Q, 2 = k, 3 = q.
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

impl ZobristKeys {
    /// Fills the tables from a fixed-seed xorshift64 stream so keys are stable
    /// across runs and builds.
    const fn generate() -> Self {
        const fn next(mut s: u64) -> u64 {
            s ^= s << 13;
            s ^= s >> 7;
            s ^= s << 17;
            s
        }

        let mut s = 0x9E37_79B9_7F4A_7C15u64;

        let mut pieces = [[0u64; 64]; 12];
        let mut p = 0;
        while p < 12 {
            let mut sq = 0;
            while sq < 64 {
                s = next(s);
                pieces[p][sq] = s;
                sq += 1;
            }
            p += 1;
        }

        s = next(s);
        let black_to_move = s;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            s = next(s);
            castling[i] = s;
            i += 1;
        }

        let mut en_passant_file = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            s = next(s);
            en_passant_file[i] = s;
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant_file,
        }
    }

    #[inline(always)]
    pub fn piece(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx() * 6 + piece.kind.idx()][sq as usize]
    }

    #[inline(always)]
    pub fn black_to_move(&self) -> u64 {
        self.black_to_move
    }

    /// XOR of the keys for every right set in `bits` (see `CastlingRights::bits`).
    #[inline(always)]
    pub fn castling(&self, bits: u8) -> u64 {
        let mut key = 0;
        for (i, k) in self.castling.iter().enumerate() {
            if bits & (1 << i) != 0 {
                key ^= k;
            }
        }
        key
    }

    #[inline(always)]
    pub fn en_passant(&self, ep: Option<u8>) -> u64 {
        match ep {
            Some(sq) => self.en_passant_file[(sq % 8) as usize],
            None => 0,
        }
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::generate();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
