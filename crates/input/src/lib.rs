//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and keeps the grid cursor that
//! turns those actions into tile selections.

pub mod handler;
pub mod map;

pub use wordcrush_types as types;

pub use handler::{Command, InputHandler};
pub use map::{handle_key_event, should_quit};
