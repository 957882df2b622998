//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a plain framebuffer that is diffed and flushed to
//! the terminal with `crossterm`.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: snapshot to framebuffer, pure and testable
//! - [`renderer`]: framebuffer to terminal

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use wordcrush_core as core;
pub use wordcrush_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
