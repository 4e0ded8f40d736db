//! Negamax Chess Engine
//!
//! Fixed-depth negamax with alpha-beta pruning, a capture-only quiescence
//! extension, MVV-LVA move ordering, mate-distance pruning and material
//! evaluation.

mod config;
mod eval;
mod oracle;
mod ordering;
mod search;

use std::time::Instant;

use chess_core::{Engine, Game, SearchError, SearchResult, move_to_uci};
use tracing::debug;

/// Move selector that searches every position to the same fixed depth.
#[derive(Debug, Clone, Default)]
pub struct NegamaxEngine {
    config: EngineConfig,
    searcher: Searcher,
}

impl NegamaxEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            searcher: Searcher::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.searcher.nodes()
    }

    /// Searches to the configured depth.
    pub fn think_default<O: PositionOracle>(
        &mut self,
        pos: &mut O,
    ) -> Result<SearchResult, SearchError> {
        self.think_with(pos, self.config.depth)
    }

    /// Searches any [`PositionOracle`] to `depth` plies.
    pub fn think_with<O: PositionOracle>(
        &mut self,
        pos: &mut O,
        depth: u8,
    ) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        self.searcher.reset();

        let (best_move, score) = self.searcher.pick_best_move(pos, depth)?;
        let elapsed = start.elapsed();

        debug!(
            side = ?pos.side_to_move(),
            depth,
            score,
            nodes = self.searcher.nodes(),
            elapsed_ms = elapsed.as_millis() as u64,
            best = %move_to_uci(best_move),
            "search finished"
        );

        Ok(SearchResult {
            best_move,
            score,
            depth,
            nodes: self.searcher.nodes(),
            elapsed,
        })
    }
}

impl Engine for NegamaxEngine {
    fn think(&mut self, game: &mut Game, depth: u8) -> Result<SearchResult, SearchError> {
        self.think_with(game, depth)
    }

    fn name(&self) -> &str {
        "Negamax v1.0"
    }

    fn new_game(&mut self) {
        self.searcher.reset();
    }
}

pub use config::{ConfigError, DEFAULT_DEPTH, EngineConfig};
pub use eval::{PIECE_VALUES, evaluate, piece_value};
pub use oracle::{MadeMove, PositionOracle};
pub use ordering::{mvv_lva, order_moves};
pub use search::{DRAW_SCORE, INFINITY, MATE_SCORE, Searcher};
