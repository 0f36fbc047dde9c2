//! RNG module - injectable random sources
//!
//! Every random draw in the engine (tile values, tile styles, targets) goes through
//! the [`RandomSource`] trait so a session can be replayed from a seed or driven by
//! a scripted sequence in tests.

/// Source of raw 32-bit random draws.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    /// Uniform-ish draw in `[0, max)` by modulo reduction
    fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        self.next_u32() % max
    }

    /// Draw in the closed range `[lo, hi]`
    fn next_in_range(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo <= hi);
        lo + self.next_range(hi - lo + 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// Seedable 32-bit linear congruential generator.
///
/// Not suitable for anything but gameplay: the low bits cycle quickly.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed 0 is treated as 1.
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    /// Current internal state; feeding it back to [`SimpleRng::new`] resumes the sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes multiplier and increment, modulus 2^32
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of raw draws, wrapping around at the end.
///
/// Draws are reduced by the caller exactly like [`SimpleRng`] output, so a draw of
/// `n` for a tile value yields `MIN_VALUE + n % 9`.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    draws: Vec<u32>,
    cursor: usize,
}

impl SequenceRng {
    /// An empty script behaves like a constant stream of zeros.
    pub fn new(draws: impl Into<Vec<u32>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        if self.draws.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let v = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        v
    }
}
