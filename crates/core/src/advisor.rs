//! Advisor module - ranks candidate swaps for hints
//!
//! Each cell is paired with its right and bottom neighbour, which visits every
//! adjacent pair exactly once. The swap is tried on a scratch copy, scored with
//! a single scan (no cascade simulation), and undone. The live grid is never
//! touched.

use crate::grid::Grid;
use crate::lexicon::Lexicon;
use crate::scanner::find_matches;
use crate::scoring::ScoreCalculator;
use crate::types::{Position, GRID_SIZE};

/// A candidate swap and the points it would score immediately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub gain: u32,
}

/// Adjacent pairs in scan order: row-major, right neighbour before bottom.
pub fn adjacent_pairs() -> impl Iterator<Item = (Position, Position)> {
    (0..GRID_SIZE).flat_map(|row| {
        (0..GRID_SIZE).flat_map(move |col| {
            let here = Position::new(row, col);
            let right = (col + 1 < GRID_SIZE).then(|| (here, Position::new(row, col + 1)));
            let down = (row + 1 < GRID_SIZE).then(|| (here, Position::new(row + 1, col)));
            right.into_iter().chain(down)
        })
    })
}

/// Top `k` swaps by gain. Equal gains keep scan order.
pub fn rank_swaps<L: Lexicon + ?Sized>(
    grid: &Grid,
    lexicon: &L,
    scores: &mut ScoreCalculator,
    k: usize,
) -> Vec<Move> {
    let mut scratch = grid.clone();
    let mut moves = Vec::with_capacity(2 * GRID_SIZE * (GRID_SIZE - 1));

    for (from, to) in adjacent_pairs() {
        if scratch.swap(from, to).is_err() {
            continue;
        }
        let gain = scores.score_matches(&find_matches(&scratch, lexicon));
        // Restore so the next candidate starts from the live layout. The pair
        // was just accepted, so swapping it back cannot fail.
        let restored = scratch.swap(from, to);
        debug_assert!(restored.is_ok());
        moves.push(Move { from, to, gain });
    }

    moves.sort_by(|a, b| b.gain.cmp(&a.gain));
    moves.truncate(k);
    moves
}

/// The highest-scoring swap, if any swap scores at all
pub fn best_move<L: Lexicon + ?Sized>(
    grid: &Grid,
    lexicon: &L,
    scores: &mut ScoreCalculator,
) -> Option<Move> {
    rank_swaps(grid, lexicon, scores, 1)
        .into_iter()
        .find(|m| m.gain > 0)
}
