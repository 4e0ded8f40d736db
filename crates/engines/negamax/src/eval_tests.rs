use super::*;
use chess_core::Game;

fn eval_fen(fen: &str) -> i32 {
    evaluate(&Game::from_fen(fen).unwrap())
}

#[test]
fn test_start_position_is_balanced() {
    assert_eq!(evaluate(&Game::default()), 0);
}

#[test]
fn test_score_is_relative_to_side_to_move() {
    assert_eq!(eval_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1"), 900);
    assert_eq!(eval_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1"), -900);
}

#[test]
fn test_minor_pieces_are_not_equal() {
    // White knight against black bishop: 310 - 330.
    assert_eq!(eval_fen("4kb2/8/8/8/8/8/8/4KN2 w - - 0 1"), -20);
    assert_eq!(eval_fen("4kb2/8/8/8/8/8/8/4KN2 b - - 0 1"), 20);
}

#[test]
fn test_material_sums_every_piece() {
    // White: rook + 2 pawns = 700. Black: 3 pawns = 300.
    assert_eq!(eval_fen("4k3/ppp5/8/8/8/8/PP6/R3K3 w - - 0 1"), 400);
}

#[test]
fn test_piece_value_table() {
    assert_eq!(piece_value(None), 0);
    assert_eq!(piece_value(Some(PieceKind::Pawn)), 100);
    assert_eq!(piece_value(Some(PieceKind::Knight)), 310);
    assert_eq!(piece_value(Some(PieceKind::Bishop)), 330);
    assert_eq!(piece_value(Some(PieceKind::Rook)), 500);
    assert_eq!(piece_value(Some(PieceKind::Queen)), 900);
    assert_eq!(piece_value(Some(PieceKind::King)), 20000);
}
