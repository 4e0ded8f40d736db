use crate::board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

/// Which moves the generator should emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveFilter {
    All,
    /// Moves that remove an enemy piece, en passant included.
    CapturesOnly,
}

impl MoveFilter {
    pub fn captures_only(flag: bool) -> Self {
        if flag {
            MoveFilter::CapturesOnly
        } else {
            MoveFilter::All
        }
    }
}

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out, MoveFilter::All);
    out
}

/// Generate legal moves into the provided buffer, reusing it across calls.
///
/// The position is used as scratch space for the legality test and is left
/// exactly as it was found.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>, filter: MoveFilter) {
    out.clear();
    pseudo_moves(pos, out, filter);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

/// Collects pseudo-legal moves for the side to move.
struct Generator<'a> {
    pos: &'a Position,
    out: &'a mut Vec<Move>,
    captures_only: bool,
}

impl Generator<'_> {
    fn push(&mut self, mut mv: Move, moved: PieceKind, captured: Option<PieceKind>) {
        if self.captures_only && captured.is_none() {
            return;
        }
        mv.moved = moved;
        mv.captured = captured;
        self.out.push(mv);
    }

    /// Pushes a move to `to`, or does nothing if a friendly piece is there.
    /// Returns true when the square was empty, so sliders can continue.
    fn push_to(&mut self, from: u8, to: u8, kind: PieceKind, c: Color) -> bool {
        match self.pos.piece_at(to) {
            None => {
                self.push(Move::new(from, to), kind, None);
                true
            }
            Some(pc) if pc.color != c => {
                self.push(Move::new(from, to), kind, Some(pc.kind));
                false
            }
            Some(_) => false,
        }
    }

    fn pawn_move(&mut self, from: u8, to: u8, captured: Option<PieceKind>, promo_rank: i8) {
        if rank_of(to) == promo_rank {
            for pk in PieceKind::PROMOTIONS {
                let mut mv = Move::new(from, to);
                mv.promo = Some(pk);
                self.push(mv, PieceKind::Pawn, captured);
            }
        } else {
            self.push(Move::new(from, to), PieceKind::Pawn, captured);
        }
    }

    fn pawn(&mut self, from: u8, c: Color) {
        let f = file_of(from);
        let r = rank_of(from);
        let (dir, start_rank, promo_rank) = match c {
            Color::White => (1, 1, 7),
            Color::Black => (-1, 6, 0),
        };

        if let Some(to) = sq(f, r + dir)
            && self.pos.piece_at(to).is_none()
        {
            self.pawn_move(from, to, None, promo_rank);
            if r == start_rank
                && let Some(to2) = sq(f, r + 2 * dir)
                && self.pos.piece_at(to2).is_none()
            {
                self.push(Move::new(from, to2), PieceKind::Pawn, None);
            }
        }

        for df in [-1, 1] {
            let Some(to) = sq(f + df, r + dir) else {
                continue;
            };
            match self.pos.piece_at(to) {
                Some(pc) if pc.color != c => self.pawn_move(from, to, Some(pc.kind), promo_rank),
                None if self.pos.en_passant == Some(to) => {
                    let mut mv = Move::new(from, to);
                    mv.is_en_passant = true;
                    self.push(mv, PieceKind::Pawn, Some(PieceKind::Pawn));
                }
                _ => {}
            }
        }
    }

    fn leaper(&mut self, from: u8, c: Color, kind: PieceKind, deltas: &[(i8, i8)]) {
        let f = file_of(from);
        let r = rank_of(from);
        for (df, dr) in deltas {
            if let Some(to) = sq(f + df, r + dr) {
                self.push_to(from, to, kind, c);
            }
        }
    }

    fn slider(&mut self, from: u8, c: Color, kind: PieceKind, dirs: &[(i8, i8)]) {
        let f0 = file_of(from);
        let r0 = rank_of(from);
        for (df, dr) in dirs {
            let mut f = f0 + df;
            let mut r = r0 + dr;
            while let Some(to) = sq(f, r) {
                if !self.push_to(from, to, kind, c) {
                    break;
                }
                f += df;
                r += dr;
            }
        }
    }

    fn castles(&mut self, from: u8, c: Color) {
        // Castling never captures.
        if self.captures_only {
            return;
        }
        let pos = self.pos;
        let (home, king_side, queen_side) = match c {
            Color::White => (4u8, pos.castling.wk, pos.castling.wq),
            Color::Black => (60u8, pos.castling.bk, pos.castling.bq),
        };
        if from != home || pos.in_check(c) {
            return;
        }
        let enemy = c.other();
        let empty = |squares: &[u8]| squares.iter().all(|&s| pos.piece_at(s).is_none());
        let safe = |squares: &[u8]| squares.iter().all(|&s| !pos.is_square_attacked(s, enemy));

        // King side: f and g files empty and not attacked.
        if king_side && empty(&[home + 1, home + 2]) && safe(&[home + 1, home + 2]) {
            let mut mv = Move::new(home, home + 2);
            mv.is_castle = true;
            self.push(mv, PieceKind::King, None);
        }
        // Queen side: b, c, d files empty; c and d not attacked.
        if queen_side && empty(&[home - 1, home - 2, home - 3]) && safe(&[home - 1, home - 2]) {
            let mut mv = Move::new(home, home - 2);
            mv.is_castle = true;
            self.push(mv, PieceKind::King, None);
        }
    }
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>, filter: MoveFilter) {
    let mut generator = Generator {
        pos,
        out,
        captures_only: filter == MoveFilter::CapturesOnly,
    };
    for from in 0..64u8 {
        let Some(pc) = pos.piece_at(from) else {
            continue;
        };
        if pc.color != pos.side_to_move {
            continue;
        }
        let c = pc.color;
        match pc.kind {
            PieceKind::Pawn => generator.pawn(from, c),
            PieceKind::Knight => generator.leaper(from, c, pc.kind, &KNIGHT_DELTAS),
            PieceKind::Bishop => generator.slider(from, c, pc.kind, &DIAGONALS),
            PieceKind::Rook => generator.slider(from, c, pc.kind, &ORTHOGONALS),
            PieceKind::Queen => {
                generator.slider(from, c, pc.kind, &DIAGONALS);
                generator.slider(from, c, pc.kind, &ORTHOGONALS);
            }
            PieceKind::King => {
                generator.leaper(from, c, pc.kind, &KING_DELTAS);
                generator.castles(from, c);
            }
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
