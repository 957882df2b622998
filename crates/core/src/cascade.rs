//! Cascade module - scan, score, clear, refill, repeat
//!
//! After a swap the grid is resolved in discrete rounds:
//!
//! ```text
//! Idle -> Scanning --(no words)--> Idle
//!            |
//!            v
//!        Resolving -> Compacting -> Scanning ...
//! ```
//!
//! Every word found in a round is scored and its tiles are cleared together;
//! the touched columns then fall and refill before the next scan. A round is
//! applied in full before the next one starts, so nothing outside the resolver
//! ever sees a half-cleared grid.
//!
//! Rounds are capped. A grid that keeps producing words past the cap means the
//! lexicon or tile source is broken, and is reported as an error instead of
//! looping forever.

use crate::error::EngineError;
use crate::grid::Grid;
use crate::lexicon::Lexicon;
use crate::scanner::{find_matches, Match};
use crate::scoring::ScoreCalculator;
use crate::tiles::TileSource;
use crate::types::{Position, GRID_SIZE, MAX_CASCADE_ROUNDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadePhase {
    Idle,
    Scanning,
    Resolving,
    Compacting,
}

/// Notifications emitted while a cascade runs.
///
/// `Started` and `Settled` always come in pairs, so a listener can pause a
/// clock on one and resume it on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeSignal {
    Started,
    RoundResolved { round: u32, score: u32 },
    Settled { rounds: u32, score_delta: u32 },
}

/// One scan-clear-refill round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeRound {
    pub matches: Vec<Match>,
    pub score: u32,
}

/// Everything a cascade did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeOutcome {
    pub rounds: Vec<CascadeRound>,
    pub score_delta: u32,
}

impl CascadeOutcome {
    pub fn round_count(&self) -> u32 {
        self.rounds.len() as u32
    }

    /// At least one round cleared words
    pub fn cascaded(&self) -> bool {
        !self.rounds.is_empty()
    }

    /// A clear led to another clear
    pub fn chained(&self) -> bool {
        self.rounds.len() >= 2
    }

    /// Every match across all rounds, in round order
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }
}

/// Drives the cascade state machine over a grid
#[derive(Debug, Clone)]
pub struct CascadeResolver {
    phase: CascadePhase,
    max_rounds: u32,
}

impl CascadeResolver {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            phase: CascadePhase::Idle,
            max_rounds: max_rounds.max(1),
        }
    }

    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Resolve the grid until no words remain.
    pub fn run<L, T>(
        &mut self,
        grid: &mut Grid,
        lexicon: &L,
        tiles: &mut T,
        scores: &mut ScoreCalculator,
    ) -> Result<CascadeOutcome, EngineError>
    where
        L: Lexicon + ?Sized,
        T: TileSource + ?Sized,
    {
        self.run_observed(grid, lexicon, tiles, scores, |_| {})
    }

    /// Like [`run`](Self::run), reporting progress to `on_signal`.
    pub fn run_observed<L, T, F>(
        &mut self,
        grid: &mut Grid,
        lexicon: &L,
        tiles: &mut T,
        scores: &mut ScoreCalculator,
        mut on_signal: F,
    ) -> Result<CascadeOutcome, EngineError>
    where
        L: Lexicon + ?Sized,
        T: TileSource + ?Sized,
        F: FnMut(CascadeSignal),
    {
        let mut outcome = CascadeOutcome::default();
        let mut pending: Vec<Match> = Vec::new();
        let mut cleared = [false; GRID_SIZE];
        self.phase = CascadePhase::Scanning;

        loop {
            match self.phase {
                CascadePhase::Scanning => {
                    pending.extend(find_matches(grid, lexicon));
                    if pending.is_empty() {
                        self.phase = CascadePhase::Idle;
                        continue;
                    }
                    if outcome.rounds.len() as u32 >= self.max_rounds {
                        let rounds = outcome.round_count();
                        log::error!(
                            "cascade still matching after {} rounds, aborting:\n{}",
                            rounds,
                            grid
                        );
                        self.phase = CascadePhase::Idle;
                        on_signal(CascadeSignal::Settled {
                            rounds,
                            score_delta: outcome.score_delta,
                        });
                        return Err(EngineError::CascadeLimitExceeded {
                            rounds,
                            outcome: Box::new(outcome),
                        });
                    }
                    if outcome.rounds.is_empty() {
                        on_signal(CascadeSignal::Started);
                    }
                    self.phase = CascadePhase::Resolving;
                }
                CascadePhase::Resolving => {
                    let score = scores.score_matches(&pending);
                    cleared.fill(false);
                    let positions: Vec<Position> =
                        pending.iter().flat_map(|m| m.positions.iter().copied()).collect();
                    for pos in &positions {
                        cleared[pos.col] = true;
                    }
                    grid.mark_empty(positions);

                    outcome.score_delta = outcome.score_delta.saturating_add(score);
                    let round = outcome.round_count() + 1;
                    log::debug!(
                        "cascade round {}: {:?} (+{})",
                        round,
                        pending.iter().map(|m| m.word.as_str()).collect::<Vec<_>>(),
                        score
                    );
                    outcome.rounds.push(CascadeRound {
                        matches: std::mem::take(&mut pending),
                        score,
                    });
                    on_signal(CascadeSignal::RoundResolved { round, score });
                    self.phase = CascadePhase::Compacting;
                }
                CascadePhase::Compacting => {
                    for (col, &touched) in cleared.iter().enumerate() {
                        if touched {
                            grid.compact_column(col, tiles);
                        }
                    }
                    self.phase = CascadePhase::Scanning;
                }
                CascadePhase::Idle => break,
            }
        }

        if outcome.cascaded() {
            on_signal(CascadeSignal::Settled {
                rounds: outcome.round_count(),
                score_delta: outcome.score_delta,
            });
        }
        Ok(outcome)
    }
}

impl Default for CascadeResolver {
    fn default() -> Self {
        Self::new(MAX_CASCADE_ROUNDS)
    }
}
