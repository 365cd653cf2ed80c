use log::info;

use crate::board::{Position, rules};
use crate::core::Move;

/// Counts the leaf nodes of the legal move tree `depth` plies deep
pub fn perft(pos: &Position, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = rules::legal_moves(pos);

    if depth == 1 {
        return moves.len();
    }

    moves
        .iter()
        .map(|mv| {
            let mut next = *pos;
            next.play(mv);
            perft(&next, depth - 1)
        })
        .sum()
}

/// Leaf counts split by root move, in generation order
pub fn perft_divide(pos: &Position, depth: usize) -> Vec<(Move, usize)> {
    use std::time::Instant;

    let start = Instant::now();

    let divide: Vec<(Move, usize)> = rules::legal_moves(pos)
        .into_iter()
        .map(|mv| {
            let mut next = *pos;
            next.play(&mv);
            (mv, perft(&next, depth.saturating_sub(1)))
        })
        .collect();

    let total: usize = divide.iter().map(|(_, nodes)| nodes).sum();

    info!(
        "Perft depth {depth}: {total} nodes in {}ms",
        start.elapsed().as_millis()
    );

    divide
}
