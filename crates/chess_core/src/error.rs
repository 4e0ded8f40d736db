//! Error types for position setup, move parsing and search entry.

use thiserror::Error;

/// Reasons a FEN string can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {found}")]
    MissingFields { found: usize },

    #[error("expected 8 ranks in board field, found {found}")]
    RankCount { found: usize },

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece character '{ch}'")]
    InvalidPiece { ch: char },

    #[error("invalid side to move '{side}'")]
    InvalidSide { side: String },

    #[error("invalid castling character '{ch}'")]
    InvalidCastling { ch: char },

    #[error("invalid en passant square '{square}'")]
    InvalidEnPassant { square: String },

    #[error("invalid {field} clock '{value}'")]
    InvalidClock { field: &'static str, value: String },

    #[error("side {side} has {count} kings")]
    KingCount { side: &'static str, count: usize },
}

/// Reasons a move in coordinate notation cannot be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("malformed move '{text}'")]
    Malformed { text: String },

    #[error("move '{text}' is not legal in this position")]
    Illegal { text: String },
}

/// Precondition violations reported by `Engine::think`.
///
/// These are not search outcomes: the driver asked for a move where none can
/// be chosen.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("position has no legal moves")]
    NoLegalMoves,

    #[error("search depth must be at least 1")]
    ZeroDepth,
}
