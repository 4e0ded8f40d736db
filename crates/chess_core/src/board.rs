use crate::error::FenError;
use crate::types::*;
use crate::zobrist::ZOBRIST;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    /// Packs the rights as K=1, Q=2, k=4, q=8.
    pub fn bits(&self) -> u8 {
        (self.wk as u8) | (self.wq as u8) << 1 | (self.bk as u8) << 2 | (self.bq as u8) << 3
    }

    /// Drops every right that depends on a piece standing on `sq`.
    fn touch(&mut self, sq: u8) {
        match sq {
            0 => self.wq = false,
            4 => {
                self.wk = false;
                self.wq = false;
            }
            7 => self.wk = false,
            56 => self.bq = false,
            60 => {
                self.bk = false;
                self.bq = false;
            }
            63 => self.bk = false,
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    /// Zobrist key, kept current by make/unmake.
    pub key: u64,
}

/// Everything `unmake_move` needs that the move itself does not carry.
#[derive(Clone, Debug)]
pub struct Undo {
    pub captured: Option<Piece>,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub key: u64,
    pub moved_piece: Piece,
    pub rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    pub ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

impl Position {
    pub fn startpos() -> Self {
        // START_FEN is a constant known to parse.
        match Self::from_fen(START_FEN) {
            Ok(pos) => pos,
            Err(e) => unreachable!("start position FEN rejected: {e}"),
        }
    }

    /// Parses Forsyth-Edwards Notation. The clock fields are optional.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields { found: parts.len() });
        }

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount { found: ranks.len() });
        }

        let mut board = [None; 64];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_char(ch).ok_or(FenError::InvalidPiece { ch })?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let s = sq(file, rank).ok_or(FenError::RankWidth { rank: 8 - rank_idx })?;
                    board[s as usize] = Some(Piece { color, kind });
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::RankWidth { rank: 8 - rank_idx });
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth { rank: 8 - rank_idx });
            }
        }

        for (color, side) in [(Color::White, "white"), (Color::Black, "black")] {
            let count = board
                .iter()
                .flatten()
                .filter(|pc| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if count != 1 {
                return Err(FenError::KingCount { side, count });
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSide {
                    side: other.to_string(),
                });
            }
        };

        let mut castling = CastlingRights::NONE;
        if parts[2] != "-" {
            for ch in parts[2].chars() {
                match ch {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => return Err(FenError::InvalidCastling { ch }),
                }
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            text => {
                let bad = || FenError::InvalidEnPassant {
                    square: text.to_string(),
                };
                let ep = coord_to_sq(text).ok_or_else(bad)?;
                // The square passed over must sit behind an enemy pawn that
                // just made a double push.
                let (ep_rank, pawn_rank, pusher) = match side_to_move {
                    Color::White => (5, 4, Color::Black),
                    Color::Black => (2, 3, Color::White),
                };
                let pushed = Some(Piece {
                    color: pusher,
                    kind: PieceKind::Pawn,
                });
                if rank_of(ep) != ep_rank
                    || sq(file_of(ep), pawn_rank).map(|s| board[s as usize]) != Some(pushed)
                {
                    return Err(bad());
                }
                Some(ep)
            }
        };

        let clock = |idx: usize, field: &'static str, default: u32| -> Result<u32, FenError> {
            match parts.get(idx) {
                None => Ok(default),
                Some(text) => text.parse().map_err(|_| FenError::InvalidClock {
                    field,
                    value: text.to_string(),
                }),
            }
        };
        let halfmove_clock = clock(4, "halfmove", 0)?;
        let fullmove_number = clock(5, "fullmove", 1)?;

        let mut pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            key: 0,
        };
        pos.key = pos.compute_key();
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                let s = (rank as u8) * 8 + file as u8;
                match self.piece_at(s) {
                    None => empty += 1,
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        let ch = pc.kind.to_char();
                        out.push(if pc.color == Color::White {
                            ch.to_ascii_uppercase()
                        } else {
                            ch
                        });
                    }
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(if self.side_to_move == Color::White { 'w' } else { 'b' });
        out.push(' ');
        if self.castling.bits() == 0 {
            out.push('-');
        } else {
            for (set, ch) in [
                (self.castling.wk, 'K'),
                (self.castling.wq, 'Q'),
                (self.castling.bk, 'k'),
                (self.castling.bq, 'q'),
            ] {
                if set {
                    out.push(ch);
                }
            }
        }
        out.push(' ');
        match self.en_passant {
            Some(s) => out.push_str(&sq_to_coord(s)),
            None => out.push('-'),
        }
        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    /// Rebuilds the Zobrist key from the board, ignoring `self.key`.
    pub fn compute_key(&self) -> u64 {
        let mut key = 0;
        for (s, pc) in self.board.iter().enumerate() {
            if let Some(pc) = pc {
                key ^= ZOBRIST.piece(*pc, s as u8);
            }
        }
        if self.side_to_move == Color::Black {
            key ^= ZOBRIST.black_to_move();
        }
        key ^= ZOBRIST.castling(self.castling.bits());
        key ^= ZOBRIST.en_passant(self.capturable_en_passant());
        key
    }

    /// The en-passant square, if a pawn of the side to move stands ready to
    /// take on it. Only then does the square enter the key, so positions that
    /// differ in an unusable en-passant square repeat each other.
    pub fn capturable_en_passant(&self) -> Option<u8> {
        let ep = self.en_passant?;
        let us = self.side_to_move;
        let from_rank = match us {
            Color::White => rank_of(ep) - 1,
            Color::Black => rank_of(ep) + 1,
        };
        let pawn = Some(Piece {
            color: us,
            kind: PieceKind::Pawn,
        });
        [-1, 1]
            .into_iter()
            .filter_map(|df| sq(file_of(ep) + df, from_rank))
            .any(|s| self.piece_at(s) == pawn)
            .then_some(ep)
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&s| {
            self.board[s as usize] == Some(Piece {
                color: c,
                kind: PieceKind::King,
            })
        })
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    /// Every piece on the board, a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.board.iter().flatten().copied()
    }

    /// Raw board write; leaves the key alone. Used by unmake, which restores
    /// the key wholesale.
    fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    /// Board write that keeps the key in step.
    fn place(&mut self, sq: u8, pc: Option<Piece>) {
        if let Some(old) = self.board[sq as usize] {
            self.key ^= ZOBRIST.piece(old, sq);
        }
        if let Some(new) = pc {
            self.key ^= ZOBRIST.piece(new, sq);
        }
        self.board[sq as usize] = pc;
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    fn has_piece(&self, s: u8, color: Color, kinds: &[PieceKind]) -> bool {
        matches!(self.piece_at(s), Some(pc) if pc.color == color && kinds.contains(&pc.kind))
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // A pawn of `by` attacks `target` from one rank behind it.
        let pawn_rank = match by {
            Color::White => tr - 1,
            Color::Black => tr + 1,
        };
        for df in [-1, 1] {
            if let Some(s) = sq(tf + df, pawn_rank)
                && self.has_piece(s, by, &[PieceKind::Pawn])
            {
                return true;
            }
        }

        let leapers = [
            (&KNIGHT_DELTAS, PieceKind::Knight),
            (&KING_DELTAS, PieceKind::King),
        ];
        for (deltas, kind) in leapers {
            for (df, dr) in deltas {
                if let Some(s) = sq(tf + df, tr + dr)
                    && self.has_piece(s, by, &[kind])
                {
                    return true;
                }
            }
        }

        let sliders = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, kinds) in sliders {
            for (df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if self.has_piece(s, by, &kinds) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("make_move: no piece on from-square");

        let undo_castling = self.castling.clone();
        let undo_ep = self.en_passant;
        let undo_hmc = self.halfmove_clock;
        let undo_fmn = self.fullmove_number;
        let undo_key = self.key;
        self.key ^= ZOBRIST.en_passant(self.capturable_en_passant());

        let mut captured = self.piece_at(to);
        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            // The captured pawn sits beside the mover, on the target file.
            if let Some(cs) = sq(file_of(to), rank_of(from)) {
                captured = self.piece_at(cs);
                self.place(cs, None);
                ep_captured_sq = Some(cs);
            }
        }

        let promotes = moved.kind == PieceKind::Pawn && (rank_of(to) == 7 || rank_of(to) == 0);
        let landed = if promotes {
            Piece {
                color: moved.color,
                kind: mv.promo.unwrap_or(PieceKind::Queen),
            }
        } else {
            moved
        };
        self.place(from, None);
        self.place(to, Some(landed));

        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match (from, to) {
                (4, 6) => Some((7, 5)),
                (4, 2) => Some((0, 3)),
                (60, 62) => Some((63, 61)),
                (60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf);
                self.place(rf, None);
                self.place(rt, rook);
                rook_move = Some((rf, rt));
            }
        }

        self.key ^= ZOBRIST.castling(self.castling.bits());
        self.castling.touch(from);
        self.castling.touch(to);
        self.key ^= ZOBRIST.castling(self.castling.bits());

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            // The square passed over.
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if moved.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
        self.key ^= ZOBRIST.black_to_move();
        self.key ^= ZOBRIST.en_passant(self.capturable_en_passant());

        Undo {
            captured,
            castling: undo_castling,
            en_passant: undo_ep,
            halfmove_clock: undo_hmc,
            fullmove_number: undo_fmn,
            key: undo_key,
            moved_piece: moved,
            rook_move,
            ep_captured_sq,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.key = undo.key;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt);
            self.set_piece(rt, None);
            self.set_piece(rf, rook);
        }

        // Putting back the recorded mover also reverts promotions.
        self.set_piece(mv.from, Some(undo.moved_piece));
        self.set_piece(mv.to, None);
        match undo.ep_captured_sq {
            Some(cs) => self.set_piece(cs, undo.captured),
            None => self.set_piece(mv.to, undo.captured),
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
