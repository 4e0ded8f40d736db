//! Material-only position evaluation.

use chess_core::{Color, PieceKind};

use crate::oracle::PositionOracle;

/// Piece values in centipawns, indexed by [`value_index`]:
/// none, pawn, knight, bishop, rook, queen, king.
///
/// The king's value never changes hands; it only makes the table total.
pub const PIECE_VALUES: [i32; 7] = [0, 100, 310, 330, 500, 900, 20000];

#[inline]
fn value_index(kind: Option<PieceKind>) -> usize {
    kind.map_or(0, |k| k.idx() + 1)
}

/// Value of a piece kind, or 0 for "no piece".
#[inline]
pub fn piece_value(kind: Option<PieceKind>) -> i32 {
    PIECE_VALUES[value_index(kind)]
}

/// Evaluates the position from the side-to-move's perspective.
///
/// Returns a score in centipawns:
/// - Positive = good for side to move
/// - Negative = bad for side to move
/// - 0 = equal material
pub fn evaluate<O: PositionOracle>(pos: &O) -> i32 {
    let score: i32 = pos
        .pieces()
        .map(|pc| {
            let v = piece_value(Some(pc.kind));
            if pc.color == Color::White { v } else { -v }
        })
        .sum();

    if pos.side_to_move() == Color::White {
        score
    } else {
        -score
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
