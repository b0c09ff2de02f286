//! Seedable xorshift64 generator for the randomized parts of spawning
//! (initial velocity, size, color).
//!
//! Pure integer state, so one seed always replays the same particle stream
//! within a build.

use serde::{Deserialize, Serialize};

/// Xorshift64 PRNG with shifts (13, 7, 17).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Replaces a zero seed; zero is a fixed point of xorshift.
    const ZERO_SEED_FALLBACK: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 {
                Self::ZERO_SEED_FALLBACK
            } else {
                seed
            },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in [0, 1) built from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value between `min` and `max`. Reversed bounds are allowed.
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform value in [-magnitude, magnitude).
    pub fn next_signed(&mut self, magnitude: f64) -> f64 {
        self.next_range(-magnitude, magnitude)
    }
}
