//! RNG module - random sources for piece draws and choice sampling
//!
//! The simulation never reaches for a global generator. Whoever owns the game
//! owns one [`RandomSource`] and lends it to the engines that draw from it, so
//! a seeded [`SimpleRng`] replays the same game and a [`SequenceRng`] scripts
//! exact piece sequences in tests.

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Next value in `[0, bound)`. `bound` must be non-zero.
    fn next_below(&mut self, bound: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current state (feeding it back into `new` resumes the sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        // The low bits of an LCG cycle with short periods.
        (self.next_u32() >> 16) % bound
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Each value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<u32>,
    pos: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0);
        }
        Self { values, pos: 0 }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % bound
    }
}
