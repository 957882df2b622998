use arrayvec::{ArrayString, ArrayVec};

use crate::types::{Position, GRID_SIZE};

/// Most words a snapshot carries from the last swap
pub const MAX_SNAPSHOT_WORDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScoredWord {
    pub word: ArrayString<GRID_SIZE>,
    pub score: u32,
}

impl ScoredWord {
    /// None if `word` is longer than a grid line
    pub fn new(word: &str, score: u32) -> Option<Self> {
        ArrayString::from(word).ok().map(|word| Self { word, score })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HintSnapshot {
    pub from: Position,
    pub to: Position,
    pub gain: u32,
}

/// Render-ready copy of a settled game
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// ASCII letters, 0 for an empty cell
    pub grid: [[u8; GRID_SIZE]; GRID_SIZE],
    pub score: u32,
    pub moves_left: u32,
    pub time_left_ms: u32,
    pub hints_left: u32,
    pub selected: Option<Position>,
    pub hint: Option<HintSnapshot>,
    /// Score gained by the last swap, cascade included
    pub last_delta: u32,
    /// Rounds the last swap's cascade took
    pub last_rounds: u32,
    pub last_words: ArrayVec<ScoredWord, MAX_SNAPSHOT_WORDS>,
    pub clock_paused: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[0u8; GRID_SIZE]; GRID_SIZE];
        self.score = 0;
        self.moves_left = 0;
        self.time_left_ms = 0;
        self.hints_left = 0;
        self.selected = None;
        self.hint = None;
        self.last_delta = 0;
        self.last_rounds = 0;
        self.last_words.clear();
        self.clock_paused = false;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Letter at `pos` as a char, if present
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        if !pos.in_bounds() {
            return None;
        }
        match self.grid[pos.row][pos.col] {
            0 => None,
            b => Some(b as char),
        }
    }

    /// Whether `pos` is part of the current hint
    pub fn is_hinted(&self, pos: Position) -> bool {
        self.hint.is_some_and(|h| h.from == pos || h.to == pos)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: [[0u8; GRID_SIZE]; GRID_SIZE],
            score: 0,
            moves_left: 0,
            time_left_ms: 0,
            hints_left: 0,
            selected: None,
            hint: None,
            last_delta: 0,
            last_rounds: 0,
            last_words: ArrayVec::new(),
            clock_paused: false,
            game_over: false,
        };
        s.clear();
        s
    }
}
