use std::time::Instant;

use chess_core::Position;
use log::info;
use rayon::prelude::*;

/// Counts leaf nodes of the legal move tree to `depth`. Root moves are
/// searched in parallel.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    let start = Instant::now();
    let nodes = match depth {
        0 => 1,
        1 => pos.legal_moves().len() as u64,
        _ => pos
            .legal_moves()
            .par_iter()
            .map(|mv| count(&pos.make_move(mv), depth - 1))
            .sum(),
    };
    info!("perft({}) = {} in {:?}", depth, nodes, start.elapsed());
    nodes
}

fn count(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| count(&pos.make_move(mv), depth - 1))
        .sum()
}

/// Per-root-move node counts, sorted by move string.
pub fn divide(pos: &Position, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut split: Vec<(String, u64)> = pos
        .legal_moves()
        .into_par_iter()
        .map(|mv| {
            let nodes = count(&pos.make_move(&mv), depth - 1);
            (mv, nodes)
        })
        .collect();
    split.sort();
    split
}
