//! A position together with the history a searcher needs.
//!
//! `Game` is what engines drive: it hands out legal moves, applies and takes
//! back moves in strict stack order, and answers whether the current position
//! already occurred earlier on the line that led to it.

use crate::board::{Position, Undo};
use crate::error::{FenError, MoveParseError};
use crate::movegen::{MoveFilter, legal_moves_into};
use crate::notation::parse_uci_move;
use crate::types::{Color, Move};

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    /// Keys of every position before the current one, oldest first.
    history: Vec<u64>,
    undo_stack: Vec<Undo>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Position::startpos())
    }
}

impl Game {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            history: Vec::with_capacity(128),
            undo_stack: Vec::with_capacity(64),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen(fen).map(Self::new)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn key(&self) -> u64 {
        self.position.key
    }

    pub fn in_check(&self) -> bool {
        self.position.in_check(self.position.side_to_move)
    }

    /// Keys of the positions that preceded the current one.
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// True if the current position already occurred on this line.
    pub fn is_repetition(&self) -> bool {
        self.history.contains(&self.position.key)
    }

    pub fn legal_moves(&mut self, filter: MoveFilter) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut self.position, &mut moves, filter);
        moves
    }

    /// Applies `mv`, recording the departing position in the history.
    pub fn push(&mut self, mv: Move) {
        self.history.push(self.position.key);
        let undo = self.position.make_move(mv);
        self.undo_stack.push(undo);
    }

    /// Takes back the most recent `push`. `mv` must be the move that was pushed.
    pub fn pop(&mut self, mv: Move) {
        let undo = self
            .undo_stack
            .pop()
            .expect("pop called without a matching push");
        self.position.unmake_move(mv, undo);
        self.history.pop();
    }

    /// Advances the real game by one move given in coordinate notation.
    pub fn play(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let mv = parse_uci_move(&self.position, text)?;
        self.push(mv);
        Ok(mv)
    }

    /// Number of moves pushed and not yet popped.
    pub fn plies(&self) -> usize {
        self.undo_stack.len()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
