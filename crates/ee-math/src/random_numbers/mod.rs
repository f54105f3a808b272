//! Random number generators.
//!
//! Wrappers around the `rand_mt` Mersenne Twister: a uniform generator on
//! `[0, 1)` and a standard-normal generator obtained by inverse-CDF
//! transformation. Both are fully determined by their seed.

use ee_core::Real;
use rand_mt::Mt19937GenRand64;

/// A uniform pseudo-random number generator based on MT19937-64.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // top 53 bits → exactly representable in an f64 mantissa
        (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real)
    }
}

/// A standard-normal generator: MT19937-64 uniforms pushed through the
/// inverse normal CDF.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator backed by a Mersenne Twister with the given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }

    /// Create the generator for an independent sub-stream, e.g. one per
    /// simulated path. The stream seed is a SplitMix64 mix of `(seed, stream)`
    /// so neighbouring streams start from unrelated MT states.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        Self::new(split_mix64(seed ^ split_mix64(stream)))
    }

    /// Generate the next standard-normal deviate.
    pub fn next_real(&mut self) -> Real {
        // exact 0 would map to −∞
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        crate::distributions::normal_cdf_inverse(u)
    }
}

/// One round of the SplitMix64 finaliser.
fn split_mix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
