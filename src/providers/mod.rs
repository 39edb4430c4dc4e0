//! Implementations of the **SequenceProvider** trait.
//!
//! ## Native Provider
//!
//! Loads the `genpoints` shared library (name taken from the
//! `GENPOINTS_LIB` environment variable) and forwards every axis
//! request to it. This is where the sequences under study normally
//! come from: random, Faure, Sobol' and its many scrambled variants.
//!
//! ## Builtin Provider
//!
//! A handful of reference sequences written in Rust:
//!
//! - random (PCG32)
//! - halton
//! - sobol
//! - sobol_rds (random digit scrambling)
//! - sobol_owen (hash-based Owen scrambling)
//!

pub mod builtin;
pub mod native;
