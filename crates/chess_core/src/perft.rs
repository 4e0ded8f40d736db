use crate::{
    board::Position,
    movegen::{MoveFilter, legal_moves_into},
    types::Move,
};

/// Counts the leaf nodes of the legal move tree `depth` plies deep.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    fn inner(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }

        let (buf, rest) = layers
            .split_first_mut()
            .expect("perft requires one buffer per remaining ply");

        legal_moves_into(pos, buf, MoveFilter::All);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            let undo = pos.make_move(mv);
            nodes += inner(pos, depth - 1, rest);
            pos.unmake_move(mv, undo);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}
