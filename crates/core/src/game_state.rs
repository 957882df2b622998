//! Game state module - one play session
//!
//! Ties the grid, lexicon, tile source and cascade resolver to the session
//! budget (moves, clock, hints). Every player action goes through here; the
//! renderer only ever sees [`GameSnapshot`]s and drained [`EngineEvent`]s.

use crate::advisor::{best_move, rank_swaps, Move};
use crate::cascade::{CascadeOutcome, CascadeResolver, CascadeSignal};
use crate::config::GameConfig;
use crate::error::{EngineError, SwapError};
use crate::generate::{generate_settled_grid, repair};
use crate::grid::Grid;
use crate::lexicon::{Lexicon, WordList};
use crate::scoring::{word_score, ScoreCalculator};
use crate::snapshot::{GameSnapshot, HintSnapshot, ScoredWord};
use crate::tiles::{TileGenerator, TileSource};
use crate::types::{Position, REPAIR_PASSES};

/// Remaining budget and running score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Session {
    moves_left: u32,
    time_left_ms: u32,
    score: u32,
    hints_left: u32,
    clock_paused: bool,
}

impl Session {
    fn from_config(config: &GameConfig) -> Self {
        Self {
            moves_left: config.total_moves,
            time_left_ms: config.round_time_ms,
            score: 0,
            hints_left: config.hints,
            clock_paused: false,
        }
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn time_left_ms(&self) -> u32 {
        self.time_left_ms
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hints_left(&self) -> u32 {
        self.hints_left
    }

    pub fn clock_paused(&self) -> bool {
        self.clock_paused
    }

    /// Out of moves or out of time
    pub fn exhausted(&self) -> bool {
        self.moves_left == 0 || self.time_left_ms == 0
    }

    /// Hold the clock from `Started` until `Settled`
    fn follow_cascade(&mut self, signal: CascadeSignal, events: &mut Vec<EngineEvent>) {
        match signal {
            CascadeSignal::Started => {
                self.clock_paused = true;
                events.push(EngineEvent::CascadeStarted);
            }
            CascadeSignal::RoundResolved { .. } => {}
            CascadeSignal::Settled {
                rounds,
                score_delta,
            } => {
                self.clock_paused = false;
                events.push(EngineEvent::CascadeSettled {
                    rounds,
                    score_delta,
                });
            }
        }
    }
}

/// Things the renderer may want to animate or announce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CascadeStarted,
    CascadeSettled { rounds: u32, score_delta: u32 },
    /// Words cleared by one swap, with their points, in round order
    WordsMatched { words: Vec<(String, u32)> },
    GameOver { score: u32 },
}

/// A committed swap and the cascade it set off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapOutcome {
    pub from: Position,
    pub to: Position,
    pub cascade: CascadeOutcome,
}

impl SwapOutcome {
    pub fn score_delta(&self) -> u32 {
        self.cascade.score_delta
    }

    pub fn rounds(&self) -> u32 {
        self.cascade.round_count()
    }

    /// Whether the swap formed any word
    pub fn scored(&self) -> bool {
        self.cascade.cascaded()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.cascade.matches().map(|m| m.word.as_str())
    }
}

/// Result of clicking a tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Selected(Position),
    Cleared,
    Swapped(SwapOutcome),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<L = WordList, T = TileGenerator> {
    config: GameConfig,
    lexicon: L,
    tiles: T,
    grid: Grid,
    session: Session,
    scores: ScoreCalculator,
    resolver: CascadeResolver,
    selected: Option<Position>,
    hint: Option<Move>,
    last_outcome: Option<SwapOutcome>,
    events: Vec<EngineEvent>,
    over_reported: bool,
}

impl GameState<WordList, TileGenerator> {
    /// Load the dictionary and seed the tile source from `config`
    pub fn from_config(config: GameConfig) -> Self {
        let lexicon = config.load_lexicon();
        let tiles = config.tile_generator();
        Self::new(config, lexicon, tiles)
    }

    /// Start over with a freshly seeded tile source
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.tiles = self.config.tile_generator();
        self.restart();
    }
}

impl<L: Lexicon, T: TileSource> GameState<L, T> {
    /// New session on a freshly generated, word-free grid
    pub fn new(config: GameConfig, lexicon: L, mut tiles: T) -> Self {
        let generated = generate_settled_grid(&lexicon, &mut tiles, config.generation_attempts);
        log::info!(
            "new game: {} move(s), {}s, grid after {} attempt(s){}",
            config.total_moves,
            config.round_time_ms / 1000,
            generated.attempts,
            if generated.repaired { " (repaired)" } else { "" }
        );
        Self::with_grid(config, lexicon, tiles, generated.grid)
    }

    /// New session on a given grid, which is used as-is
    pub fn with_grid(config: GameConfig, lexicon: L, tiles: T, grid: Grid) -> Self {
        Self {
            session: Session::from_config(&config),
            resolver: CascadeResolver::new(config.max_cascade_rounds),
            config,
            lexicon,
            tiles,
            grid,
            scores: ScoreCalculator::new(),
            selected: None,
            hint: None,
            last_outcome: None,
            events: Vec::new(),
            over_reported: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// The move suggested by the last [`hint`](Self::hint), until the next swap
    pub fn current_hint(&self) -> Option<Move> {
        self.hint
    }

    pub fn last_outcome(&self) -> Option<&SwapOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.session.exhausted()
    }

    /// Click a tile: select it, deselect it, or swap with the selection.
    pub fn select_tile(&mut self, pos: Position) -> Result<Selection, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        if !pos.in_bounds() {
            return Err(SwapError::OutOfBounds(pos).into());
        }

        match self.selected.take() {
            None => {
                self.selected = Some(pos);
                Ok(Selection::Selected(pos))
            }
            Some(first) if first == pos => Ok(Selection::Cleared),
            Some(first) if first.is_adjacent(pos) => self.swap(first, pos).map(Selection::Swapped),
            Some(first) => {
                log::debug!("selection {} -> {} is not adjacent, cleared", first, pos);
                Err(SwapError::NotAdjacent(first, pos).into())
            }
        }
    }

    /// Swap two adjacent tiles and resolve the cascade.
    ///
    /// Costs one move whether or not a word forms. Rejected swaps change
    /// nothing. If the cascade hits its round cap, the rounds already applied
    /// are scored and recorded, leftover words are broken up, and
    /// `CascadeLimitExceeded` is returned.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<SwapOutcome, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        self.grid.swap(a, b)?;
        self.selected = None;
        self.hint = None;
        self.session.moves_left = self.session.moves_left.saturating_sub(1);

        let session = &mut self.session;
        let events = &mut self.events;
        let result = self.resolver.run_observed(
            &mut self.grid,
            &self.lexicon,
            &mut self.tiles,
            &mut self.scores,
            |signal| session.follow_cascade(signal, events),
        );

        // A capped cascade still applied its rounds; book them before
        // surfacing the error.
        let (cascade, capped_at) = match result {
            Ok(cascade) => (cascade, None),
            Err(EngineError::CascadeLimitExceeded { rounds, outcome }) => {
                if !repair(&mut self.grid, &self.lexicon, REPAIR_PASSES) {
                    log::warn!("grid still holds words after capped cascade:\n{}", self.grid);
                }
                (*outcome, Some(rounds))
            }
            Err(err) => {
                self.report_game_over();
                return Err(err);
            }
        };

        self.session.score = self.session.score.saturating_add(cascade.score_delta);
        if cascade.cascaded() {
            let words = cascade
                .matches()
                .map(|m| (m.word.clone(), word_score(&m.word)))
                .collect();
            self.events.push(EngineEvent::WordsMatched { words });
        }
        log::debug!(
            "swap {} <-> {}: +{} in {} round(s), {} move(s) left",
            a,
            b,
            cascade.score_delta,
            cascade.round_count(),
            self.session.moves_left
        );

        let outcome = SwapOutcome {
            from: a,
            to: b,
            cascade,
        };
        self.last_outcome = Some(outcome.clone());
        self.report_game_over();
        match capped_at {
            Some(rounds) => Err(EngineError::CascadeLimitExceeded {
                rounds,
                outcome: Box::new(outcome.cascade),
            }),
            None => Ok(outcome),
        }
    }

    /// Spend a hint on the best scoring swap.
    ///
    /// Returns `Ok(None)`, without spending a hint, when no swap scores.
    pub fn hint(&mut self) -> Result<Option<Move>, EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        if self.session.hints_left == 0 {
            return Err(EngineError::NoHintsRemaining);
        }
        let best = best_move(&self.grid, &self.lexicon, &mut self.scores);
        if let Some(m) = best {
            self.session.hints_left -= 1;
            log::debug!("hint {} <-> {} (+{})", m.from, m.to, m.gain);
        }
        self.hint = best;
        Ok(best)
    }

    /// Top `k` swaps by immediate gain. Free, and never touches the grid.
    pub fn suggestions(&mut self, k: usize) -> Vec<Move> {
        rank_swaps(&self.grid, &self.lexicon, &mut self.scores, k)
    }

    /// Advance the round clock. Returns true if this tick ran the clock out.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.session.clock_paused || self.is_over() {
            return false;
        }
        self.session.time_left_ms = self.session.time_left_ms.saturating_sub(elapsed_ms);
        if self.session.time_left_ms == 0 {
            log::info!("time up");
            self.report_game_over();
            return true;
        }
        false
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// New session and new grid from the current tile source
    pub fn restart(&mut self) {
        let generated =
            generate_settled_grid(&self.lexicon, &mut self.tiles, self.config.generation_attempts);
        self.grid = generated.grid;
        self.session = Session::from_config(&self.config);
        self.resolver = CascadeResolver::new(self.config.max_cascade_rounds);
        self.selected = None;
        self.hint = None;
        self.last_outcome = None;
        self.events.clear();
        self.over_reported = false;
        log::info!("restarted");
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.grid);

        out.score = self.session.score;
        out.moves_left = self.session.moves_left;
        out.time_left_ms = self.session.time_left_ms;
        out.hints_left = self.session.hints_left;
        out.clock_paused = self.session.clock_paused;
        out.game_over = self.is_over();
        out.selected = self.selected;
        out.hint = self.hint.map(|m| HintSnapshot {
            from: m.from,
            to: m.to,
            gain: m.gain,
        });

        out.last_words.clear();
        match &self.last_outcome {
            Some(outcome) => {
                out.last_delta = outcome.score_delta();
                out.last_rounds = outcome.rounds();
                for word in outcome.words() {
                    if out.last_words.is_full() {
                        break;
                    }
                    if let Some(scored) = ScoredWord::new(word, word_score(word)) {
                        out.last_words.push(scored);
                    }
                }
            }
            None => {
                out.last_delta = 0;
                out.last_rounds = 0;
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn report_game_over(&mut self) {
        if self.is_over() && !self.over_reported {
            self.over_reported = true;
            log::info!("game over, score {}", self.session.score);
            self.events.push(EngineEvent::GameOver {
                score: self.session.score,
            });
        }
    }
}
