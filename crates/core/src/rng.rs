//! RNG module - seedable pseudo-random source for spawning
//!
//! The board owns its generator instead of sharing a global one, so a seed
//! fully determines a game and the generator state can be saved and restored
//! with the rest of the board.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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

    /// Resume from a state previously returned by [`SimpleRng::state`]
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of a power-of-two LCG cycle with
    /// very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
