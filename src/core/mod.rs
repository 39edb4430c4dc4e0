//! The diagnostic engine: point sets built from two sequence axes,
//! their star discrepancy, and their power spectrum.

pub mod avalanche;
pub mod discrepancy;
pub mod error;
pub mod geometry;
pub mod lowdiscrepancy;
pub mod plot;
pub mod pointset;
pub mod powerspectrum;
pub mod rng;
pub mod sequence;
pub mod viewpoints;
