//! snek_core: Core utilities shared by the snek tokenizer crates.
//!
//! Provides source positions and the line map used to turn them back into
//! byte offsets when rendering diagnostics.

pub mod text;

pub use text::{LineMap, Position};
