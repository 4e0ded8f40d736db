//! Coordinate move notation ("e2e4", "e7e8q").

use crate::{board::Position, error::MoveParseError, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = sq_to_coord(mv.from);
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.to_char());
    }
    s
}

/// Parses `text` and matches it against the legal moves of `pos`, so the
/// returned move carries the generator's flags and metadata.
pub fn parse_uci_move(pos: &Position, text: &str) -> Result<Move, MoveParseError> {
    let malformed = || MoveParseError::Malformed {
        text: text.to_string(),
    };
    if !(4..=5).contains(&text.len()) || !text.is_ascii() {
        return Err(malformed());
    }
    let from = coord_to_sq(&text[0..2]).ok_or_else(malformed)?;
    let to = coord_to_sq(&text[2..4]).ok_or_else(malformed)?;
    let promo = match text.chars().nth(4) {
        None => None,
        Some(ch) => match PieceKind::from_char(ch) {
            Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
            _ => return Err(malformed()),
        },
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
        .ok_or_else(|| MoveParseError::Illegal {
            text: text.to_string(),
        })
}
