//! Negamax search with alpha-beta pruning, quiescence and mate-distance
//! pruning.

use chess_core::{Move, SearchError, move_to_uci};
use tracing::trace;

use crate::eval::evaluate;
use crate::oracle::{MadeMove, PositionOracle};
use crate::ordering::order_moves;

/// Score of delivering mate at the root. A mate found `ply` plies deep is
/// worth `MATE_SCORE - ply`.
pub const MATE_SCORE: i32 = 99_999;

/// Window bound that no reachable score touches.
pub const INFINITY: i32 = MATE_SCORE + 1;

pub const DRAW_SCORE: i32 = 0;

/// Per-search state: only a node counter. The best root move is a local of
/// [`Searcher::pick_best_move`], never written from deeper frames.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Nodes visited since the last [`reset`](Self::reset).
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn reset(&mut self) {
        self.nodes = 0;
    }

    /// Searches `depth` plies from the root and returns the best move and its
    /// score.
    ///
    /// Until some move raises alpha the answer is the first legal move in
    /// generation order, so a legal move comes back whatever gets pruned.
    pub fn pick_best_move<O: PositionOracle>(
        &mut self,
        pos: &mut O,
        depth: u8,
    ) -> Result<(Move, i32), SearchError> {
        if depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        let mut moves = pos.legal_moves(false);
        let Some(&fallback) = moves.first() else {
            return Err(SearchError::NoLegalMoves);
        };

        self.nodes += 1;
        order_moves(&mut moves);

        let mut best = fallback;
        let mut alpha = -INFINITY;
        let beta = INFINITY;

        // The root window is open above, so no root move can fail high.
        for mv in moves {
            let score = {
                let mut child = MadeMove::new(pos, mv);
                -self.negamax(&mut *child, depth - 1, 1, -beta, -alpha)
            };
            if score > alpha {
                alpha = score;
                best = mv;
                trace!(mv = %move_to_uci(mv), score, "new best root move");
            }
        }

        Ok((best, alpha))
    }

    /// Full-width alpha-beta search of `depth` plies below a node `ply` plies
    /// from the root. Hands over to [`quiesce`](Self::quiesce) at depth 0.
    ///
    /// Fail-hard: the result is clamped to `[alpha, beta]`.
    pub fn negamax<O: PositionOracle>(
        &mut self,
        pos: &mut O,
        depth: u8,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = early_exit(&*pos, ply, &mut alpha, &mut beta) {
            return score;
        }

        if depth == 0 {
            return self.quiesce(pos, ply, alpha, beta);
        }

        let mut moves = pos.legal_moves(false);
        if moves.is_empty() {
            return if pos.is_in_check() {
                -(MATE_SCORE - ply)
            } else {
                DRAW_SCORE
            };
        }
        order_moves(&mut moves);

        for mv in moves {
            let score = {
                let mut child = MadeMove::new(pos, mv);
                -self.negamax(&mut *child, depth - 1, ply + 1, -beta, -alpha)
            };
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Capture-only search. The static evaluation is a lower bound (stand
    /// pat): the side to move may always decline to capture.
    ///
    /// A node with no captures is not terminal here; checkmate and stalemate
    /// are only recognised by [`negamax`](Self::negamax).
    pub fn quiesce<O: PositionOracle>(
        &mut self,
        pos: &mut O,
        ply: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some(score) = early_exit(&*pos, ply, &mut alpha, &mut beta) {
            return score;
        }

        let stand_pat = evaluate(&*pos);
        if stand_pat >= beta {
            return beta;
        }
        alpha = alpha.max(stand_pat);

        let mut captures = pos.legal_moves(true);
        order_moves(&mut captures);

        for mv in captures {
            let score = {
                let mut child = MadeMove::new(pos, mv);
                -self.quiesce(&mut *child, ply + 1, -beta, -alpha)
            };
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}

/// Checks shared by every non-root frame.
///
/// A position already seen on the line is scored as a draw after a single
/// repetition, not three. The window is then narrowed to the mate scores
/// still possible this deep; if nothing is left the frame returns alpha.
fn early_exit<O: PositionOracle>(
    pos: &O,
    ply: i32,
    alpha: &mut i32,
    beta: &mut i32,
) -> Option<i32> {
    if ply == 0 {
        return None;
    }
    if pos.is_repetition() {
        return Some(DRAW_SCORE);
    }
    *alpha = (*alpha).max(-MATE_SCORE + ply);
    *beta = (*beta).min(MATE_SCORE - ply);
    if *alpha >= *beta {
        return Some(*alpha);
    }
    None
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
