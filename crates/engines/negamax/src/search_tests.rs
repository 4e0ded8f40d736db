use super::*;
use chess_core::{Color, Game, MoveFilter, Piece};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const SCHOLARS_MATE: &str = "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1";
const STALEMATE: &str = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1";
const BACK_RANK_MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1";

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

/// Wraps a `Game` and counts move generation requests.
struct CountingOracle {
    game: Game,
    movegen_calls: usize,
}

impl PositionOracle for CountingOracle {
    fn legal_moves(&mut self, captures_only: bool) -> Vec<Move> {
        self.movegen_calls += 1;
        PositionOracle::legal_moves(&mut self.game, captures_only)
    }
    fn make_move(&mut self, mv: Move) {
        self.game.push(mv);
    }
    fn undo_move(&mut self, mv: Move) {
        self.game.pop(mv);
    }
    fn is_in_check(&self) -> bool {
        self.game.in_check()
    }
    fn side_to_move(&self) -> Color {
        self.game.side_to_move()
    }
    fn key(&self) -> u64 {
        self.game.key()
    }
    fn history(&self) -> &[u64] {
        self.game.history()
    }
    fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.game.position().pieces()
    }
}

// =============================================================================
// Reference search: unpruned over the full-width plies
// =============================================================================

/// Plain negamax with no window. Depth-0 leaves are scored by quiescence
/// with a fully open window, which is the exact capture-tree value.
fn full_width(game: &mut Game, depth: u8, ply: i32) -> i32 {
    if ply > 0 && game.is_repetition() {
        return DRAW_SCORE;
    }
    if depth == 0 {
        return Searcher::new().quiesce(game, ply, -INFINITY, INFINITY);
    }
    let moves = game.legal_moves(MoveFilter::All);
    if moves.is_empty() {
        return if game.in_check() {
            -(MATE_SCORE - ply)
        } else {
            DRAW_SCORE
        };
    }
    let mut best = -INFINITY;
    for mv in moves {
        game.push(mv);
        best = best.max(-full_width(game, depth - 1, ply + 1));
        game.pop(mv);
    }
    best
}

/// Every capture sequence with no pruning. Only for small capture trees.
fn all_captures(game: &mut Game, ply: i32) -> i32 {
    if ply > 0 && game.is_repetition() {
        return DRAW_SCORE;
    }
    let mut best = evaluate(&*game);
    for mv in game.legal_moves(MoveFilter::CapturesOnly) {
        game.push(mv);
        best = best.max(-all_captures(game, ply + 1));
        game.pop(mv);
    }
    best
}

/// First move, in search order, that reaches the full-width maximum.
fn full_width_root(game: &mut Game, depth: u8) -> (Move, i32) {
    let mut moves = game.legal_moves(MoveFilter::All);
    order_moves(&mut moves);
    let mut best = (moves[0], -INFINITY);
    for mv in moves {
        game.push(mv);
        let score = -full_width(game, depth - 1, 1);
        game.pop(mv);
        if score > best.1 {
            best = (mv, score);
        }
    }
    best
}

fn assert_matches_full_width(game: &mut Game, depth: u8) {
    let before = game.position().clone();
    let expected = full_width_root(game, depth);
    let got = Searcher::new().pick_best_move(game, depth).unwrap();
    assert_eq!(got, expected, "depth {depth} at {}", game.position().to_fen());
    assert_eq!(game.position(), &before);
}

// =============================================================================
// Terminal scores
// =============================================================================

#[test]
fn test_checkmate_scores_by_ply() {
    let mut g = game(SCHOLARS_MATE);
    for ply in [0, 1, 2, 5, 17] {
        let score = Searcher::new().negamax(&mut g, 3, ply, -INFINITY, INFINITY);
        assert_eq!(score, -(MATE_SCORE - ply), "ply {ply}");
    }
}

#[test]
fn test_stalemate_is_a_draw() {
    let mut g = game(STALEMATE);
    for ply in [0, 1, 4] {
        let score = Searcher::new().negamax(&mut g, 2, ply, -INFINITY, INFINITY);
        assert_eq!(score, DRAW_SCORE, "ply {ply}");
    }
}

#[test]
fn test_quiescence_treats_no_captures_as_stand_pat() {
    // Black is stalemated but quiescence only sees material: a queen down.
    let mut g = game(STALEMATE);
    assert_eq!(Searcher::new().quiesce(&mut g, 1, -INFINITY, INFINITY), -900);
}

#[test]
fn test_repetition_is_a_draw_without_move_generation() {
    let mut g = Game::default();
    for mv in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        g.play(mv).unwrap();
    }
    let mut oracle = CountingOracle {
        game: g,
        movegen_calls: 0,
    };

    let mut searcher = Searcher::new();
    assert_eq!(searcher.negamax(&mut oracle, 3, 2, -INFINITY, INFINITY), DRAW_SCORE);
    assert_eq!(searcher.quiesce(&mut oracle, 2, -INFINITY, INFINITY), DRAW_SCORE);
    assert_eq!(oracle.movegen_calls, 0);

    // The root itself is never scored as a repetition.
    searcher.negamax(&mut oracle, 1, 0, -INFINITY, INFINITY);
    assert!(oracle.movegen_calls > 0);
}

#[test]
fn test_oracle_repetition_looks_up_key_in_history() {
    let mut g = Game::default();
    g.play("g1f3").unwrap();
    let mut oracle = CountingOracle {
        game: g,
        movegen_calls: 0,
    };
    assert!(!PositionOracle::is_repetition(&oracle));

    for mv in ["g8f6", "f3g1", "f6g8"] {
        let mv = chess_core::parse_uci_move(oracle.game.position(), mv).unwrap();
        oracle.make_move(mv);
    }
    assert!(oracle.history().contains(&oracle.key()));
    assert!(PositionOracle::is_repetition(&oracle));
    assert_eq!(
        PositionOracle::is_repetition(&oracle),
        oracle.game.is_repetition()
    );
}

#[test]
fn test_losing_side_steers_into_repetition() {
    let mut g = game("7k/8/8/8/8/Q7/8/7K w - - 0 1");
    for mv in ["h1g1", "h8g8", "g1h1"] {
        g.play(mv).unwrap();
    }
    // Kh8 brings back the starting position; every other move stays a queen down.
    let (best, score) = Searcher::new().pick_best_move(&mut g, 2).unwrap();
    assert_eq!(chess_core::move_to_uci(best), "g8h8");
    assert_eq!(score, DRAW_SCORE);
}

// =============================================================================
// Mate-distance pruning
// =============================================================================

#[test]
fn test_mate_distance_window_closes() {
    // Three plies down the best reachable score is MATE_SCORE - 3, so a
    // window that already demands more is cut off at once.
    let mut g = Game::default();
    let mut searcher = Searcher::new();
    let alpha = MATE_SCORE - 2;
    assert_eq!(searcher.negamax(&mut g, 4, 3, alpha, INFINITY), alpha);
    assert_eq!(searcher.nodes(), 1);
}

#[test]
fn test_finds_mate_in_one() {
    let mut g = game(BACK_RANK_MATE_IN_ONE);
    let (best, score) = Searcher::new().pick_best_move(&mut g, 2).unwrap();
    assert_eq!(chess_core::move_to_uci(best), "e1e8");
    assert_eq!(score, MATE_SCORE - 1);
}

#[test]
fn test_prefers_faster_mate() {
    // Deeper search finds slower mates too; the immediate one must win.
    let mut g = game(BACK_RANK_MATE_IN_ONE);
    let (best, score) = Searcher::new().pick_best_move(&mut g, 4).unwrap();
    assert_eq!(chess_core::move_to_uci(best), "e1e8");
    assert_eq!(score, MATE_SCORE - 1);
}

// =============================================================================
// Quiescence
// =============================================================================

#[test]
fn test_quiescence_sees_recapture_past_the_horizon() {
    // Qxd5 wins a pawn at depth 1 but exd5 wins the queen back.
    let mut g = game("7k/8/4p3/3p4/8/8/8/3Q3K w - - 0 1");
    let (best, score) = Searcher::new().pick_best_move(&mut g, 1).unwrap();
    assert_ne!(chess_core::move_to_uci(best), "d1d5");
    assert_eq!(score, 700);
}

#[test]
fn test_quiescence_matches_every_capture_line() {
    let fens = [
        "7k/8/4p3/3p4/8/8/8/3Q3K w - - 0 1",
        "7k/8/4p3/3p4/8/8/8/3Q3K b - - 0 1",
        "6k1/8/2n1p3/3r4/4P3/2N5/8/3R2K1 w - - 0 1",
    ];
    for fen in fens {
        let mut g = game(fen);
        let expected = all_captures(&mut g, 1);
        let got = Searcher::new().quiesce(&mut g, 1, -INFINITY, INFINITY);
        assert_eq!(got, expected, "{fen}");
    }
}

#[test]
fn test_stand_pat_fails_high() {
    let mut g = game("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
    let mut searcher = Searcher::new();
    assert_eq!(searcher.quiesce(&mut g, 1, -INFINITY, 500), 500);
    assert_eq!(searcher.nodes(), 1);
}

// =============================================================================
// Alpha-beta equivalence and make/undo symmetry
// =============================================================================

#[test]
fn test_matches_full_width_on_tactical_positions() {
    let cases: &[(&str, u8)] = &[
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
        ("7k/8/4p3/3p4/8/8/8/3Q3K w - - 0 1", 2),
        ("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 2 3", 2),
        (BACK_RANK_MATE_IN_ONE, 3),
    ];
    for &(fen, depth) in cases {
        assert_matches_full_width(&mut game(fen), depth);
    }
}

#[test]
fn test_matches_full_width_after_random_openings() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..6 {
        let mut g = Game::default();
        for _ in 0..8 {
            let moves = g.legal_moves(MoveFilter::All);
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            g.push(mv);
        }
        if g.legal_moves(MoveFilter::All).is_empty() {
            continue;
        }
        assert_matches_full_width(&mut g, 2);
    }
}

#[test]
fn test_search_leaves_game_untouched() {
    let mut g = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    g.play("e2a6").unwrap();
    let position = g.position().clone();
    let history = g.history().to_vec();

    let mut searcher = Searcher::new();
    searcher.pick_best_move(&mut g, 2).unwrap();
    searcher.negamax(&mut g, 1, 3, -INFINITY, INFINITY);
    searcher.quiesce(&mut g, 3, -INFINITY, INFINITY);

    assert_eq!(g.position(), &position);
    assert_eq!(g.history(), history.as_slice());
    assert_eq!(g.plies(), 1);
}

// =============================================================================
// Root bookkeeping
// =============================================================================

#[test]
fn test_zero_depth_and_no_moves_are_errors() {
    assert_eq!(
        Searcher::new().pick_best_move(&mut Game::default(), 0),
        Err(SearchError::ZeroDepth)
    );
    assert_eq!(
        Searcher::new().pick_best_move(&mut game(SCHOLARS_MATE), 2),
        Err(SearchError::NoLegalMoves)
    );
    assert_eq!(
        Searcher::new().pick_best_move(&mut game(STALEMATE), 2),
        Err(SearchError::NoLegalMoves)
    );
}

#[test]
fn test_single_legal_move_is_returned() {
    // Ra8 checks along the back rank and Rg2 covers g7: Kh7 is forced.
    let mut g = game("R6k/8/8/8/8/8/6R1/7K b - - 0 1");
    let moves = g.legal_moves(MoveFilter::All);
    assert_eq!(moves.len(), 1);
    let (best, _) = Searcher::new().pick_best_move(&mut g, 3).unwrap();
    assert_eq!(best, moves[0]);
}

#[test]
fn test_node_counter_accumulates_until_reset() {
    let mut searcher = Searcher::new();
    searcher.pick_best_move(&mut Game::default(), 1).unwrap();
    let first = searcher.nodes();
    // Root plus 20 children, each handing over to quiescence.
    assert_eq!(first, 1 + 20 + 20);
    searcher.pick_best_move(&mut Game::default(), 1).unwrap();
    assert_eq!(searcher.nodes(), 2 * first);
    searcher.reset();
    assert_eq!(searcher.nodes(), 0);
}

#[test]
fn test_made_move_guard_undoes_on_drop() {
    let mut g = Game::default();
    let before = g.position().clone();
    let mv = g.legal_moves(MoveFilter::All)[0];
    {
        let child = MadeMove::new(&mut g, mv);
        assert_eq!(child.plies(), 1);
    }
    assert_eq!(g.position(), &before);
    assert_eq!(g.plies(), 0);
}
