//! Avalanche analysis of the 32 bit permutations used for scrambling.
//!
//! For every input bit the hash is evaluated twice, once with the bit
//! flipped, and the output bits that changed are counted. A good hash
//! flips every output bit half of the time. The bias of an
//! (input bit, output bit) pair is how far its flip rate is from one
//! half, scaled to [0, 1]: 0 is ideal, 1 means the output bit either
//! always or never follows the input bit.
//!
//! A Laine-Karras permutation is only expected to mix upwards: output
//! bit `j` depends on input bits `0..=j`, so every pair with
//! `bit_out <= bit_in` stays at 1 and only the upper triangle tells
//! something about its quality.

// others
use image::{GrayImage, Luma};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;
// viewpoints
use crate::core::lowdiscrepancy::{hash_u32, laine_karras_permutation, nested_uniform_scramble};
use crate::core::rng::Rng;
use crate::core::viewpoints::clamp_t;

/// Inputs hashed with the same seed before the seed is redrawn.
pub const INPUTS_PER_SEED: u32 = 256;
/// Side of the square drawn for one bit pair.
pub const BIT_PIXEL_SIZE: u32 = 8;

/// The hashes the front end can analyse.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ScrambleHash {
    LaineKarras,
    NestedUniform,
    HashU32,
}

impl ScrambleHash {
    pub fn hash(&self, n: u32, seed: u32) -> u32 {
        match self {
            ScrambleHash::LaineKarras => laine_karras_permutation(n, hash_u32(seed, 0)),
            ScrambleHash::NestedUniform => nested_uniform_scramble(n, hash_u32(seed, 0)),
            ScrambleHash::HashU32 => hash_u32(n, seed),
        }
    }
}

/// Bias per bit pair, indexed `[bit_in][bit_out]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AvalancheStats {
    pub bias: [[f64; 32]; 32],
}

impl AvalancheStats {
    pub fn get(&self, bit_in: usize, bit_out: usize) -> f64 {
        self.bias[bit_in][bit_out]
    }
    /// Mean bias over all pairs with `bit_out > bit_in`.
    pub fn average_bias(&self) -> f64 {
        let mut sum: f64 = 0.0;
        for bit_in in 0..32 {
            for bit_out in (bit_in + 1)..32 {
                sum += self.bias[bit_in][bit_out];
            }
        }
        sum / (32 * 31 / 2) as f64
    }
    /// Mean bias over all 32x32 pairs.
    pub fn overall_bias(&self) -> f64 {
        let sum: f64 = self.bias.iter().flat_map(|row| row.iter()).sum();
        sum / (32 * 32) as f64
    }
    /// Grayscale matrix, output bits left to right, input bits top to
    /// bottom, white for a bias of 1.
    pub fn to_luma_image(&self) -> GrayImage {
        let side: u32 = 32 * BIT_PIXEL_SIZE;
        GrayImage::from_fn(side, side, |x, y| {
            let bit_out = (x / BIT_PIXEL_SIZE) as usize;
            let bit_in = (y / BIT_PIXEL_SIZE) as usize;
            Luma([(clamp_t(self.bias[bit_in][bit_out], 0.0, 1.0) * 255.0) as u8])
        })
    }
}

/// Measure the avalanche bias of *hash*, a `(input, seed) -> output`
/// function. *rounds* is rounded up to a whole number of seeds; inputs
/// and seeds are drawn from *rng*.
pub fn measure_avalanche<F>(hash: F, rounds: u32, rng: &mut Rng) -> AvalancheStats
where
    F: Fn(u32, u32) -> u32,
{
    let seeds: u32 = (rounds / INPUTS_PER_SEED + (rounds % INPUTS_PER_SEED != 0) as u32).max(1);
    let half: f64 = 0.5 * INPUTS_PER_SEED as f64;
    let mut total = [[0.0_f64; 32]; 32];
    for _ in 0..seeds {
        let seed: u32 = rng.uniform_uint32();
        let mut flips = [[0_u32; 32]; 32];
        for _ in 0..INPUTS_PER_SEED {
            let input: u32 = rng.uniform_uint32();
            let output: u32 = hash(input, seed);
            for (bit_in, row) in flips.iter_mut().enumerate() {
                let diff: u32 = output ^ hash(input ^ (1 << bit_in), seed);
                for (bit_out, count) in row.iter_mut().enumerate() {
                    if diff & (1 << bit_out) != 0 {
                        *count += 1;
                    }
                }
            }
        }
        // per seed, so that a bias in either direction can not cancel
        for (sum, row) in total.iter_mut().zip(flips.iter()) {
            for (s, count) in sum.iter_mut().zip(row.iter()) {
                *s += (*count as f64 - half).abs();
            }
        }
    }
    let scale: f64 = 2.0 / (seeds as f64 * INPUTS_PER_SEED as f64);
    let mut stats = AvalancheStats {
        bias: [[0.0; 32]; 32],
    };
    for (bias, sum) in stats.bias.iter_mut().zip(total.iter()) {
        for (b, s) in bias.iter_mut().zip(sum.iter()) {
            *b = s * scale;
        }
    }
    debug!(
        seeds,
        inputs = seeds as u64 * INPUTS_PER_SEED as u64,
        average_bias = stats.average_bias(),
        "avalanche measured"
    );
    stats
}
