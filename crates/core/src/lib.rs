//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and cascade logic.
//! It has **no dependencies** on the terminal, the wall clock, or the process
//! environment beyond [`GameConfig::from_env`], making it:
//!
//! - **Deterministic**: Same seed produces identical grids and refills
//! - **Testable**: Scripted tile sources pin every refill in tests
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 6x6 letter grid with swaps, clearing and column gravity
//! - [`lexicon`]: Dictionary loading and word membership
//! - [`tiles`]: Weighted, context-aware letter generation
//! - [`scanner`]: Row and column word detection with overlap resolution
//! - [`scoring`]: Letter values and memoised word scores
//! - [`cascade`]: The scan/clear/refill loop run after each swap
//! - [`generate`]: Word-free starting grids
//! - [`advisor`]: Ranked swap suggestions for hints
//! - [`game_state`]: Session budget, selection and events
//! - [`snapshot`]: Render-ready copies of the state
//!
//! # Game Rules
//!
//! - **Swaps**: Two orthogonally adjacent tiles trade places; each swap costs a move
//! - **Words**: Any dictionary word of three or more letters, read left-to-right
//!   along a row or top-to-bottom down a column
//! - **Overlaps**: Longer words win; a tile is only ever claimed by one word
//! - **Cascades**: Cleared tiles fall and refill until no word remains
//! - **Budget**: 10 moves and 180 seconds; the clock stops during cascades
//!
//! # Example
//!
//! ```
//! use wordcrush_core::{GameConfig, GameState, Grid, WordList};
//! use wordcrush_core::tiles::ScriptedTiles;
//! use wordcrush_core::types::Position;
//!
//! let grid = Grid::from_rows(&[
//!     "CAXSQZ", "XZTKQX", "ZJKQXZ", "JKQXZJ", "KQXZJK", "QXZJKQ",
//! ])
//! .unwrap();
//! let mut game = GameState::with_grid(
//!     GameConfig::default(),
//!     WordList::from_words(["CAT", "CATS"]),
//!     ScriptedTiles::from_letters("Q"),
//!     grid,
//! );
//!
//! let outcome = game.swap(Position::new(0, 2), Position::new(1, 2)).unwrap();
//! assert_eq!(outcome.words().collect::<Vec<_>>(), ["CATS"]);
//! assert_eq!(game.score(), 6);
//! ```
//!
//! # Timing
//!
//! The core never reads the clock. Call
//! [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time; the session clock only runs while no cascade is resolving.

pub mod advisor;
pub mod cascade;
pub mod config;
pub mod error;
pub mod game_state;
pub mod generate;
pub mod grid;
pub mod lexicon;
pub mod scanner;
pub mod scoring;
pub mod snapshot;
pub mod tiles;

pub use wordcrush_types as types;

// Re-export commonly used types for convenience
pub use advisor::{best_move, rank_swaps, Move};
pub use cascade::{CascadeOutcome, CascadeResolver, CascadeSignal};
pub use config::GameConfig;
pub use error::{EngineError, GridError, SwapError};
pub use game_state::{EngineEvent, GameState, Selection, Session, SwapOutcome};
pub use generate::{generate_settled_grid, GeneratedGrid};
pub use grid::Grid;
pub use lexicon::{Lexicon, WordList};
pub use scanner::{find_matches, Match, Orientation};
pub use scoring::{word_score, ScoreCalculator};
pub use snapshot::{GameSnapshot, HintSnapshot, ScoredWord};
pub use tiles::{ScriptedTiles, TileGenerator, TileSource};
