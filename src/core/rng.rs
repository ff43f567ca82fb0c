//! RNG module - seeded random piece selection.
//!
//! The next piece is drawn uniformly from the 7 kinds. Selection sits
//! behind the `PieceSource` trait so a session can be driven by the
//! seeded LCG in production and by a scripted sequence in tests.

use crate::types::{PieceKind, ALL_KINDS};

/// Simple LCG (Linear Congruential Generator) RNG.
/// Uses constants from Numerical Recipes.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in [0, max).
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// Supplies the upcoming piece kinds for a session.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random selection over the 7 kinds, seeded.
#[derive(Debug, Clone)]
pub struct UniformPicker {
    rng: SimpleRng,
}

impl UniformPicker {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl PieceSource for UniformPicker {
    fn next_kind(&mut self) -> PieceKind {
        ALL_KINDS[self.rng.next_range(ALL_KINDS.len() as u32) as usize]
    }
}

/// Deterministic source for tests: yields a fixed sequence, cycling.
#[derive(Debug, Clone)]
pub struct ScriptedPicker {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl ScriptedPicker {
    pub fn new(kinds: Vec<PieceKind>) -> Self {
        assert!(!kinds.is_empty(), "scripted picker needs at least one kind");
        Self { kinds, index: 0 }
    }
}

impl PieceSource for ScriptedPicker {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}
