//! Terminal falling-block puzzle.
//!
//! `core` is the deterministic engine; `input` and `term` are the
//! keyboard and rendering collaborators; the binary owns the frame loop.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
