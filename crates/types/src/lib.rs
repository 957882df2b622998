//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, tests).
//!
//! # Grid Dimensions
//!
//! The playfield is a square of [`GRID_SIZE`] x [`GRID_SIZE`] letter tiles:
//!
//! - **Rows**: indexed 0-5, top to bottom
//! - **Columns**: indexed 0-5, left to right
//! - **Words**: read left-to-right in rows and top-to-bottom in columns,
//!   at least [`MIN_WORD_LEN`] letters long
//!
//! # Session Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TOTAL_MOVES` | 10 | Swaps allowed per game |
//! | `ROUND_TIME_MS` | 180000 | Time budget (3 minutes) |
//! | `DEFAULT_HINTS` | 3 | Hints allowed per game |
//! | `TICK_MS` | 16 | Front-end frame interval (~60 FPS) |
//!
//! # Engine Limits
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_CASCADE_ROUNDS` | 32 | Rounds before a cascade is treated as runaway |
//! | `GENERATION_ATTEMPTS` | 100 | Whole-grid retries for a word-free start |
//! | `REPAIR_PASSES` | 8 | Repair/re-validate passes after retries run out |
//!
//! # Examples
//!
//! ```
//! use wordcrush_types::{Letter, Position, GRID_SIZE};
//!
//! let letter = Letter::from_char('q').unwrap();
//! assert_eq!(letter, Letter::Q);
//! assert_eq!(letter.points(), 10);
//! assert!(Letter::E.is_vowel());
//!
//! let a = Position::new(0, 0);
//! assert!(a.is_adjacent(Position::new(0, 1)));
//! assert!(!a.is_adjacent(Position::new(1, 1)));
//!
//! assert_eq!(GRID_SIZE, 6);
//! ```

use std::fmt;

/// Grid side length in tiles (6 columns x 6 rows)
pub const GRID_SIZE: usize = 6;

/// Total number of tiles on the grid
pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Shortest run of letters that can count as a word
pub const MIN_WORD_LEN: usize = 3;

/// Swaps allowed per game
pub const TOTAL_MOVES: u32 = 10;

/// Time budget per game in milliseconds (3 minutes)
pub const ROUND_TIME_MS: u32 = 180_000;

/// Hints allowed per game
pub const DEFAULT_HINTS: u32 = 3;

/// Front-end frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Cascade rounds after which resolution is aborted as an internal error
pub const MAX_CASCADE_ROUNDS: u32 = 32;

/// Whole-grid generation attempts before falling back to repair
pub const GENERATION_ATTEMPTS: u32 = 100;

/// Repair passes (replace, then re-validate) before accepting a relaxed grid
pub const REPAIR_PASSES: u32 = 8;

/// Probability that a plain draw is overridden with a vowel
pub const VOWEL_BOOST_PROBABILITY: f64 = 0.35;

/// Probability of drawing a rare consonant next to a common bigram
pub const RARE_BIAS_PROBABILITY: f64 = 0.5;

/// Scrabble point values, indexed by `Letter::index()`
pub const LETTER_SCORES: [u32; 26] = [
    1, 3, 3, 2, 1, 4, 2, 4, 1, 8, 5, 1, 3, 1, 1, 3, 10, 1, 1, 1, 1, 4, 4, 8, 4, 10,
];

/// Tile pool weights (standard tile-bag counts), indexed by `Letter::index()`
pub const LETTER_WEIGHTS: [u32; 26] = [
    9, 2, 2, 4, 12, 2, 3, 2, 9, 1, 1, 4, 2, 6, 8, 2, 1, 6, 4, 6, 4, 2, 2, 1, 2, 1,
];

/// The five vowels
pub const VOWELS: [Letter; 5] = [Letter::A, Letter::E, Letter::I, Letter::O, Letter::U];

/// Consonants that rarely start or continue an English word
pub const RARE_CONSONANTS: [Letter; 5] = [Letter::Q, Letter::X, Letter::Z, Letter::J, Letter::K];

/// Two-letter sequences that show up in most short English words
pub const COMMON_BIGRAMS: [&str; 42] = [
    "TH", "HE", "IN", "ER", "AN", "RE", "ON", "AT", "EN", "ND", "TI", "ES", "OR", "TE", "OF",
    "ED", "IS", "IT", "AL", "AR", "ST", "TO", "NT", "NG", "SE", "HA", "AS", "OU", "IO", "LE",
    "VE", "CO", "ME", "DE", "HI", "RI", "RO", "IC", "NE", "EA", "RA", "CE",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_defaults() {
        assert_eq!(GRID_SIZE, 6);
        assert_eq!(TOTAL_MOVES, 10);
        assert_eq!(ROUND_TIME_MS, 180_000);
        assert_eq!(MIN_WORD_LEN, 3);
    }

    #[test]
    fn letter_tables_cover_alphabet() {
        assert_eq!(Letter::ALL.len(), 26);
        for (i, letter) in Letter::ALL.iter().enumerate() {
            assert_eq!(letter.index(), i);
            assert!(letter.weight() > 0, "{} has no pool weight", letter);
        }
        assert_eq!(Letter::C.points(), 3);
        assert_eq!(Letter::Z.points(), 10);
        assert_eq!(Letter::E.weight(), 12);
    }

    #[test]
    fn bigrams_are_uppercase_pairs() {
        for bigram in COMMON_BIGRAMS {
            assert_eq!(bigram.len(), 2);
            assert!(bigram.chars().all(|c| Letter::from_char(c).is_some()));
        }
    }
}

/// One of the 26 uppercase tile letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

impl Letter {
    /// Every letter, in alphabetical order
    pub const ALL: [Letter; 26] = [
        Letter::A,
        Letter::B,
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::H,
        Letter::I,
        Letter::J,
        Letter::K,
        Letter::L,
        Letter::M,
        Letter::N,
        Letter::O,
        Letter::P,
        Letter::Q,
        Letter::R,
        Letter::S,
        Letter::T,
        Letter::U,
        Letter::V,
        Letter::W,
        Letter::X,
        Letter::Y,
        Letter::Z,
    ];

    /// Parse a letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use wordcrush_types::Letter;
    ///
    /// assert_eq!(Letter::from_char('a'), Some(Letter::A));
    /// assert_eq!(Letter::from_char('Z'), Some(Letter::Z));
    /// assert_eq!(Letter::from_char('3'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Self::ALL[(upper as u8 - b'A') as usize])
        } else {
            None
        }
    }

    /// Uppercase character for this letter
    pub fn as_char(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Alphabet index (A = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Point value when scored as part of a word
    pub fn points(self) -> u32 {
        LETTER_SCORES[self.index()]
    }

    /// Relative frequency in the tile pool
    pub fn weight(self) -> u32 {
        LETTER_WEIGHTS[self.index()]
    }

    pub fn is_vowel(self) -> bool {
        VOWELS.contains(&self)
    }

    pub fn is_rare(self) -> bool {
        RARE_CONSONANTS.contains(&self)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A tile coordinate: `row` counts down from the top, `col` from the left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on the grid
    pub fn in_bounds(self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// Manhattan distance between two positions
    pub fn distance(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Orthogonal neighbours only (diagonals are not swappable)
    ///
    /// # Examples
    ///
    /// ```
    /// use wordcrush_types::Position;
    ///
    /// let p = Position::new(2, 3);
    /// assert!(p.is_adjacent(Position::new(3, 3)));
    /// assert!(!p.is_adjacent(Position::new(2, 5)));
    /// assert!(!p.is_adjacent(p));
    /// ```
    pub fn is_adjacent(self, other: Position) -> bool {
        self.distance(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A tile on the grid
///
/// - `None`: empty (only while a cascade is being resolved)
/// - `Some(Letter)`: a letter tile
pub type Cell = Option<Letter>;

impl Position {
    /// One step in `direction`, or `None` if that leaves the grid
    ///
    /// # Examples
    ///
    /// ```
    /// use wordcrush_types::{Direction, Position};
    ///
    /// assert_eq!(Position::new(0, 0).step(Direction::Up), None);
    /// assert_eq!(Position::new(0, 0).step(Direction::Right), Some(Position::new(0, 1)));
    /// ```
    pub fn step(self, direction: Direction) -> Option<Position> {
        let next = match direction {
            Direction::Up => Position::new(self.row.checked_sub(1)?, self.col),
            Direction::Down => Position::new(self.row + 1, self.col),
            Direction::Left => Position::new(self.row, self.col.checked_sub(1)?),
            Direction::Right => Position::new(self.row, self.col + 1),
        };
        next.in_bounds().then_some(next)
    }
}

/// Cursor movement on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Player actions, independent of any key binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveCursor(Direction),
    /// Select the tile under the cursor, or swap it with the selected one
    Select,
    Hint,
    Restart,
}
