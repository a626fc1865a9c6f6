//! Deterministic random engine (SplitMix32 variant).
//!
//! Every generation pass owns one engine seeded from the configured 32-bit
//! seed, so the entire table is a pure function of the seed and the inputs.
//! The mixing constants and the unit-interval conversion are fixed: tables
//! generated elsewhere from the same seed must match bit for bit.

const GOLDEN_GAMMA: u32 = 0x9E37_79B9;
const MIX_1: u32 = 0x21F0_AAAD;
const MIX_2: u32 = 0x735A_2D97;
const UNIT_SCALE: f64 = 4_294_967_296.0; // 2^32

/// A reproducible stream of 32-bit words and unit-interval floats.
///
/// Not cryptographically secure.
#[derive(Debug, Clone)]
pub struct SplitMix32 {
    state: u32,
}

impl SplitMix32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return the next mixed word.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut x = self.state ^ (self.state >> 16);
        x = x.wrapping_mul(MIX_1);
        x ^= x >> 15;
        x = x.wrapping_mul(MIX_2);
        x ^ (x >> 15)
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / UNIT_SCALE
    }

    /// Uniform-ish index in `0..bound`, as `floor(next_f64() * bound)`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn random_index(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "bound must be non-zero");
        // next_f64() < 1, so the product stays below bound.
        (self.next_f64() * bound as f64) as usize
    }

    /// Pseudo-shuffle in place with `4 * len` random swaps.
    ///
    /// Both swap positions are drawn independently, so a swap may be a no-op.
    /// The result is reproducible, not uniformly distributed.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let len = items.len();
        if len == 0 {
            return;
        }
        for _ in 0..len * 4 {
            let i = self.random_index(len);
            let j = self.random_index(len);
            items.swap(i, j);
        }
    }

    /// Shuffled copy of `items`; the input is left untouched.
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut output = items.to_vec();
        self.shuffle(&mut output);
        output
    }
}
