//! Error types for rejected moves, bad fixtures and engine faults.

use thiserror::Error;

use crate::cascade::CascadeOutcome;
use crate::types::{Position, GRID_SIZE};

/// A swap request that was refused without touching the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapError {
    #[error("position {0} is outside the {size}x{size} grid", size = GRID_SIZE)]
    OutOfBounds(Position),
    #[error("tiles {0} and {1} are not adjacent")]
    NotAdjacent(Position, Position),
}

/// A textual grid that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[error("row {row} has {actual} tiles, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("invalid tile {ch:?} at {pos}")]
    InvalidTile { ch: char, pos: Position },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Swap(#[from] SwapError),
    #[error("the game is over")]
    GameOver,
    #[error("no hints remaining")]
    NoHintsRemaining,
    /// The grid kept producing words past the round cap. This means the
    /// lexicon or tile source is broken; it is not a player error.
    ///
    /// `outcome` holds the rounds that were applied before the cap.
    #[error("cascade did not settle after {rounds} rounds")]
    CascadeLimitExceeded {
        rounds: u32,
        outcome: Box<CascadeOutcome>,
    },
}
