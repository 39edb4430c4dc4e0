//! The **SequenceProvider** trait is the only way the diagnostic core
//! talks to sequence generators. A provider fills one coordinate axis
//! at a time: given a family name, a dimension and a seed it writes
//! *n* values in [0, 1) into the buffer it is handed.
//!
//! - BuiltinProvider (pure Rust, see `providers::builtin`)
//! - NativeProvider (shared library, see `providers::native`)

// viewpoints
use crate::core::viewpoints::{Float, Result};

/// Macro family: generates `sobol_owen` with the seed of the v axis
/// bumped by one.
pub const SOBOL_OWEN_DECORRELATED: &str = "sobol_owen_decorrelated";
pub const SOBOL_OWEN: &str = "sobol_owen";

/// Separator of the family list a native library reports.
pub const SEQUENCE_NAME_SEPARATOR: char = ';';

/// Parameters of one point set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRequest {
    pub family: String,
    pub count: i64,
    pub dimension_u: u32,
    pub dimension_v: u32,
    pub seed: u32,
}

impl SequenceRequest {
    pub fn new(family: &str, count: i64, dimension_u: u32, dimension_v: u32, seed: u32) -> Self {
        SequenceRequest {
            family: family.to_string(),
            count,
            dimension_u,
            dimension_v,
            seed,
        }
    }
    /// Resolve family aliases into the two concrete provider calls.
    pub fn resolve(&self) -> ResolvedRequest {
        if self.family == SOBOL_OWEN_DECORRELATED {
            ResolvedRequest {
                family: SOBOL_OWEN.to_string(),
                seed_u: self.seed,
                seed_v: self.seed.wrapping_add(1),
            }
        } else {
            ResolvedRequest {
                family: self.family.clone(),
                seed_u: self.seed,
                seed_v: self.seed,
            }
        }
    }
}

/// A request after alias resolution: the family the provider is asked
/// for and the seed of each axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub family: String,
    pub seed_u: u32,
    pub seed_v: u32,
}

pub trait SequenceProvider {
    /// Human readable name (library file name or "builtin").
    fn name(&self) -> &str;
    /// Fill *out* with the first `out.len()` values of dimension *dim*
    /// of the sequence *family*, scrambled or randomized by *seed*.
    fn genpoints(&self, family: &str, dim: u32, seed: u32, out: &mut [Float]) -> Result<()>;
    /// The families the provider knows about, if it can tell.
    fn sequence_names(&self) -> Option<&[String]>;
    /// `false` only if the provider enumerates its families and *family*
    /// is not among them.
    fn supports(&self, family: &str) -> bool {
        match self.sequence_names() {
            Some(names) => names.iter().any(|name| name == family),
            None => true,
        }
    }
}

impl<P: SequenceProvider + ?Sized> SequenceProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn genpoints(&self, family: &str, dim: u32, seed: u32, out: &mut [Float]) -> Result<()> {
        (**self).genpoints(family, dim, seed, out)
    }
    fn sequence_names(&self) -> Option<&[String]> {
        (**self).sequence_names()
    }
}

impl<P: SequenceProvider + ?Sized> SequenceProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn genpoints(&self, family: &str, dim: u32, seed: u32, out: &mut [Float]) -> Result<()> {
        (**self).genpoints(family, dim, seed, out)
    }
    fn sequence_names(&self) -> Option<&[String]> {
        (**self).sequence_names()
    }
}

/// Split the semicolon separated list a native library reports.
pub fn parse_sequence_names(joined: &str) -> Vec<String> {
    joined
        .split(SEQUENCE_NAME_SEPARATOR)
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .collect()
}

/// Families to offer a user: the provider's own list plus the
/// decorrelated alias whenever `sobol_owen` is available.
pub fn selectable_families(provider: &dyn SequenceProvider) -> Vec<String> {
    let mut families: Vec<String> = match provider.sequence_names() {
        Some(names) => names.to_vec(),
        None => Vec::new(),
    };
    if families.iter().any(|name| name == SOBOL_OWEN)
        && !families.iter().any(|name| name == SOBOL_OWEN_DECORRELATED)
    {
        families.push(SOBOL_OWEN_DECORRELATED.to_string());
    }
    families
}
