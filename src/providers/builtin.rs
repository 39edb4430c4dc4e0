//! A sequence provider written in Rust, so that point sets can be
//! inspected without a native `genpoints` library at hand.

// std
use std::str::FromStr;
// others
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
// viewpoints
use crate::core::error::ViewpointsError;
use crate::core::lowdiscrepancy::{
    bits_to_unit_float, hash_u32, multiply_generator, nested_uniform_scramble, radical_inverse,
    C_SOBOL, PRIMES,
};
use crate::core::rng::Rng;
use crate::core::sequence::SequenceProvider;
use crate::core::viewpoints::{Float, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BuiltinSequence {
    Random,
    Halton,
    Sobol,
    SobolRds,
    SobolOwen,
}

impl BuiltinSequence {
    /// Number of dimensions the family can produce, `None` if unbounded.
    pub fn max_dimensions(&self) -> Option<u32> {
        match self {
            BuiltinSequence::Random => None,
            BuiltinSequence::Halton => Some(PRIMES.len() as u32),
            BuiltinSequence::Sobol | BuiltinSequence::SobolRds | BuiltinSequence::SobolOwen => {
                Some(C_SOBOL.len() as u32)
            }
        }
    }
    /// The *index*-th value of dimension *dim*. `dim` has to be within
    /// `max_dimensions()`.
    fn sample(&self, index: u32, dim: u32, seed: u32, rng: &mut Rng) -> Float {
        match self {
            BuiltinSequence::Random => rng.uniform_float(),
            BuiltinSequence::Halton => {
                radical_inverse(dim, index as u64).unwrap_or(0.0 as Float)
            }
            BuiltinSequence::Sobol => {
                bits_to_unit_float(multiply_generator(&C_SOBOL[dim as usize], index))
            }
            BuiltinSequence::SobolRds => {
                let scramble: u32 = hash_u32(dim, seed);
                bits_to_unit_float(multiply_generator(&C_SOBOL[dim as usize], index) ^ scramble)
            }
            BuiltinSequence::SobolOwen => {
                let v: u32 = multiply_generator(&C_SOBOL[dim as usize], index);
                bits_to_unit_float(nested_uniform_scramble(v, hash_u32(dim, seed)))
            }
        }
    }
}

pub struct BuiltinProvider {
    names: Vec<String>,
}

impl Default for BuiltinProvider {
    fn default() -> Self {
        BuiltinProvider::new()
    }
}

impl BuiltinProvider {
    pub fn new() -> Self {
        BuiltinProvider {
            names: BuiltinSequence::iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SequenceProvider for BuiltinProvider {
    fn name(&self) -> &str {
        "builtin"
    }
    fn genpoints(&self, family: &str, dim: u32, seed: u32, out: &mut [Float]) -> Result<()> {
        let sequence = BuiltinSequence::from_str(family).map_err(|_| {
            ViewpointsError::InvalidRequest(format!("unknown sequence {:?}", family))
        })?;
        if let Some(max_dimensions) = sequence.max_dimensions() {
            if dim >= max_dimensions {
                return Err(ViewpointsError::InvalidRequest(format!(
                    "sequence {} has {} dimensions, dimension {} requested",
                    sequence, max_dimensions, dim
                )));
            }
        }
        let mut rng = Rng::with_sequence(((seed as u64) << 32) | dim as u64);
        for (i, value) in out.iter_mut().enumerate() {
            *value = sequence.sample(i as u32, dim, seed, &mut rng);
        }
        Ok(())
    }
    fn sequence_names(&self) -> Option<&[String]> {
        Some(&self.names)
    }
}
