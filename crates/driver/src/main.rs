use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_core::{Engine, Game, SearchError, START_FEN, move_to_uci};
use clap::Parser;
use negamax_engine::{EngineConfig, NegamaxEngine};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Pick a move with the fixed-depth negamax searcher.
#[derive(Parser, Debug)]
#[command(name = "think", version)]
struct Args {
    /// Position to search from.
    #[arg(long, default_value = START_FEN)]
    fen: String,

    /// Moves in coordinate notation (e2e4, e7e8q) applied before searching.
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,

    /// Search depth in plies. Overrides the config file.
    #[arg(long)]
    depth: Option<u8>,

    /// TOML engine config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play this many plies against itself instead of a single search.
    #[arg(long)]
    play: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.depth {
        config = EngineConfig::with_depth(depth).context("invalid --depth")?;
    }
    let depth = config.depth;

    let mut game = Game::from_fen(&args.fen).with_context(|| format!("bad FEN `{}`", args.fen))?;
    for text in &args.moves {
        game.play(text)
            .with_context(|| format!("cannot apply move `{text}`"))?;
    }

    let mut engine = NegamaxEngine::new(config);
    engine.new_game();

    match args.play {
        None => {
            let result = engine.think(&mut game, depth)?;
            info!(
                score = result.score,
                nodes = result.nodes,
                elapsed_ms = result.elapsed.as_millis() as u64,
                "{} picked {}",
                engine.name(),
                move_to_uci(result.best_move)
            );
            println!("{}", move_to_uci(result.best_move));
        }
        Some(plies) => self_play(&mut engine, &mut game, depth, plies)?,
    }

    Ok(())
}

/// Plays up to `plies` moves, printing each one, and stops early when the
/// game ends or a position repeats.
fn self_play(engine: &mut dyn Engine, game: &mut Game, depth: u8, plies: usize) -> Result<()> {
    for ply in 1..=plies {
        let result = match engine.think(game, depth) {
            Ok(result) => result,
            Err(SearchError::NoLegalMoves) => {
                let outcome = if game.in_check() { "checkmate" } else { "stalemate" };
                info!(ply, side = ?game.side_to_move(), "{outcome}");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let uci = move_to_uci(result.best_move);
        game.push(result.best_move);
        info!(ply, score = result.score, nodes = result.nodes, "played {uci}");
        println!("{uci}");

        if game.is_repetition() {
            warn!(ply, "position repeated, stopping");
            return Ok(());
        }
    }
    Ok(())
}
