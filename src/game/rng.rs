//! Deterministic PRNG driving every draw in a session.
//!
//! One xorshift64 stream per session, seeded explicitly. Given the same seed
//! and the same action sequence, a whole game replays bit-exact.

// Dice-style draws use intentional narrowing casts.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate the next random u64.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random index in `[0, len)`. Returns 0 for an empty range.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }

    /// Draw uniformly from the inclusive range `[min, max]`.
    ///
    /// Returns `min` when the range is empty or inverted.
    pub fn roll(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        let offset = (self.next_u64() % span) as i64;
        (i64::from(min) + offset) as i32
    }

    /// Draw uniformly from `[1, 100]`.
    pub fn percent(&mut self) -> i32 {
        self.roll(1, 100)
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}
