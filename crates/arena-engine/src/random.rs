//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for the random strategy. Uses xorshift64*; each
//! strategy owns its own generator, so cloning a player clones its stream
//! and a replayed match draws exactly the same numbers.

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 32-bit seed
    pub fn new(seed: u32) -> Self {
        let mut rng = Self { state: 0 };
        rng.seed(seed);
        rng
    }

    /// Restart the sequence from `seed`
    pub fn seed(&mut self, seed: u32) {
        let mut state = (seed as u64).wrapping_mul(0x9e3779b97f4a7c15) ^ 0x517cc1b727220a95;
        // xorshift never leaves the all-zero state
        if state == 0 {
            state = 0x2545f4914f6cdd1d;
        }
        self.state = state;

        // Warm up the generator
        for _ in 0..8 {
            self.next_u64();
        }
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate next i32 (full signed range)
    pub fn next_i32(&mut self) -> i32 {
        self.next_u32() as i32
    }

    /// Generate a value in [-1.0, 1.0] from 32 bits of state
    pub fn next_float(&mut self) -> f64 {
        let unit = self.next_u32() as f64 / u32::MAX as f64;
        unit * 2.0 - 1.0
    }

    /// Generate a value in [-1.0, 1.0] from 53 bits of state
    pub fn next_float_high(&mut self) -> f64 {
        const MANTISSA: u64 = (1 << 53) - 1;
        let unit = (self.next_u64() >> 11) as f64 / MANTISSA as f64;
        unit * 2.0 - 1.0
    }
}
