pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::*;
pub use game::Game;
pub use movegen::*;
pub use notation::*;
pub use perft::perft;
pub use types::*;
pub use zobrist::ZOBRIST;

use std::time::Duration;

// =============================================================================
// Engine trait: implemented by every move selector
// =============================================================================

/// Result of one `think` call.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen move; always legal in the searched position.
    pub best_move: Move,
    /// Score of `best_move` from the side to move's point of view
    pub score: i32,
    /// Depth the search was run to
    pub depth: u8,
    /// Number of nodes visited (diagnostic)
    pub nodes: u64,
    /// Wall-clock time spent
    pub elapsed: Duration,
}

/// Trait that all chess engines must implement.
pub trait Engine: Send {
    /// Chooses a move for the side to move in `game`, searching `depth` plies.
    ///
    /// The game is used as scratch space and is restored before returning.
    ///
    /// # Errors
    /// `SearchError::NoLegalMoves` if the game is already over, and
    /// `SearchError::ZeroDepth` if `depth` is 0.
    fn think(&mut self, game: &mut Game, depth: u8) -> Result<SearchResult, SearchError>;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Returns the engine's author
    fn author(&self) -> &str {
        "chess-lab"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
