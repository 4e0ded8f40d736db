//! The view of a game the searcher needs, and a guard that keeps make/undo
//! paired.

use std::ops::{Deref, DerefMut};

use chess_core::{Color, Game, Move, MoveFilter, Piece};

/// Everything the search asks of a position.
///
/// `make_move`/`undo_move` must nest like a stack: the move undone is always
/// the most recent one made.
pub trait PositionOracle {
    /// Legal moves for the side to move; only captures when `captures_only`.
    fn legal_moves(&mut self, captures_only: bool) -> Vec<Move>;

    fn make_move(&mut self, mv: Move);

    fn undo_move(&mut self, mv: Move);

    fn is_in_check(&self) -> bool;

    fn side_to_move(&self) -> Color;

    fn key(&self) -> u64;

    /// Keys of the positions before the current one on this line: the game
    /// so far plus every move the search has made and not yet undone.
    fn history(&self) -> &[u64];

    /// True if the current key already appears in the repetition history.
    fn is_repetition(&self) -> bool {
        self.history().contains(&self.key())
    }

    /// Every piece on the board.
    fn pieces(&self) -> impl Iterator<Item = Piece> + '_;
}

impl PositionOracle for Game {
    fn legal_moves(&mut self, captures_only: bool) -> Vec<Move> {
        Game::legal_moves(self, MoveFilter::captures_only(captures_only))
    }

    fn make_move(&mut self, mv: Move) {
        self.push(mv);
    }

    fn undo_move(&mut self, mv: Move) {
        self.pop(mv);
    }

    fn is_in_check(&self) -> bool {
        self.in_check()
    }

    fn side_to_move(&self) -> Color {
        Game::side_to_move(self)
    }

    fn key(&self) -> u64 {
        Game::key(self)
    }

    fn history(&self) -> &[u64] {
        Game::history(self)
    }

    fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.position().pieces()
    }
}

/// A move applied to an oracle for as long as the guard lives.
///
/// Dropping the guard undoes the move, so every exit from a search frame,
/// early cutoffs included, leaves the position as it found it.
pub struct MadeMove<'a, O: PositionOracle> {
    oracle: &'a mut O,
    mv: Move,
}

impl<'a, O: PositionOracle> MadeMove<'a, O> {
    pub fn new(oracle: &'a mut O, mv: Move) -> Self {
        oracle.make_move(mv);
        Self { oracle, mv }
    }
}

impl<O: PositionOracle> Deref for MadeMove<'_, O> {
    type Target = O;

    fn deref(&self) -> &O {
        self.oracle
    }
}

impl<O: PositionOracle> DerefMut for MadeMove<'_, O> {
    fn deref_mut(&mut self) -> &mut O {
        self.oracle
    }
}

impl<O: PositionOracle> Drop for MadeMove<'_, O> {
    fn drop(&mut self) {
        self.oracle.undo_move(self.mv);
    }
}
