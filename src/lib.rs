//! Word crush (workspace facade crate).
//!
//! Re-exports the workspace crates as `wordcrush::{core,input,term,types}` so
//! the binary, integration tests and benches share one import path.

pub use wordcrush_core as core;
pub use wordcrush_input as input;
pub use wordcrush_term as term;
pub use wordcrush_types as types;
