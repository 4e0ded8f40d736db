//! MVV-LVA capture ordering.

use std::cmp::Reverse;

use chess_core::Move;

use crate::eval::piece_value;

/// Ordering score: 0 for quiet moves, otherwise
/// `10 * value(victim) - value(attacker)`.
///
/// The factor of ten puts every capture by a piece other than the king ahead
/// of every quiet move. King captures score below zero and sort last.
#[inline]
pub fn mvv_lva(mv: &Move) -> i32 {
    match mv.captured {
        Some(victim) => 10 * piece_value(Some(victim)) - piece_value(Some(mv.moved)),
        None => 0,
    }
}

/// Sorts `moves` by descending [`mvv_lva`] score.
///
/// The sort is stable: moves with equal scores keep generation order.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_cached_key(|mv| Reverse(mvv_lva(mv)));
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
