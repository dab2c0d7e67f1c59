//! Seedable xorshift64 generator used to shuffle and scatter scene content.

/// Deterministic pseudo-random source. The same seed always produces the
/// same layout, so shuffled scenes are reproducible in tests.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// A zero seed is replaced by 1; xorshift never leaves the zero state.
    pub fn new(seed: u64) -> Self {
        Rng { state: seed.max(1) }
    }

    fn step(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform index in `[0, len)`. Returns 0 when `len` is 0.
    pub fn below(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.step() % len as u64) as usize
    }

    /// Uniform value in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        // Top 24 bits fill an f32 mantissa exactly
        (self.step() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform value in `[lo, hi)`.
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.unit()
    }

    /// Fisher–Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            items.swap(i, self.below(i + 1));
        }
    }
}
