//! Blockfall (workspace facade crate).
//!
//! Re-exports the game crates under `blockfall::{core,types}` so the binary,
//! benches and integration tests share one import path.

pub use blockfall_core as core;
pub use blockfall_types as types;
