//! Noise Field Sampler: deterministic, continuous scalar noise in [0, 1].
//!
//! Layers several octaves of Perlin noise, each at twice the frequency and
//! half the amplitude of the previous one, and normalizes the sum into the
//! unit interval. The only state is the permutation table built from the
//! seed at construction.

use noise::{NoiseFn, Perlin};

/// Number of octaves summed per sample.
const OCTAVES: u32 = 4;
/// Amplitude multiplier between successive octaves.
const FALLOFF: f64 = 0.5;

/// Multi-octave Perlin noise over up to three dimensions.
#[derive(Clone)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    /// Samples the field at `(x, y, z)`. Always returns a value in [0, 1].
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut norm = 0.0;
        let mut amp = FALLOFF;
        let mut freq = 1.0;
        for _ in 0..OCTAVES {
            total += self.perlin.get([x * freq, y * freq, z * freq]) * amp;
            norm += amp;
            amp *= FALLOFF;
            freq *= 2.0;
        }
        ((total / norm + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}
