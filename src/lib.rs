//! # viewpoints
//!
//! Diagnostics for the low-discrepancy point sets used in
//! quasi-Monte Carlo rendering and integration. Two axes of a sequence
//! are combined into a 2D point set, which is then judged in two ways:
//!
//! 1. the [star discrepancy][discrepancy], a single number measuring
//!    how far the set is from uniform
//! 2. the [power spectrum][spectrum], an image that shows clustering,
//!    aliasing and lattice structure at a glance
//!
//! Sequences are generated elsewhere and reach the engine through the
//! [SequenceProvider][provider] trait.
//!
//! ```rust
//! use viewpoints::core::discrepancy::star_discrepancy;
//! use viewpoints::core::pointset::PointSetBuilder;
//! use viewpoints::core::powerspectrum::SpectrumSynthesizer;
//! use viewpoints::core::sequence::SequenceRequest;
//! use viewpoints::providers::builtin::BuiltinProvider;
//!
//!     let builder = PointSetBuilder::new(BuiltinProvider::new());
//!     let request = SequenceRequest::new("sobol_owen_decorrelated", 256, 0, 1, 1);
//!     let points = builder.build(&request).unwrap();
//!     println!("D* = {}", star_discrepancy(&points));
//!     let spectrum = SpectrumSynthesizer::new().synthesize(&points, (128, 128));
//!     assert_eq!(spectrum.size, 128);
//! ```
//!
//! [discrepancy]: core/discrepancy/fn.star_discrepancy.html
//! [spectrum]: core/powerspectrum/struct.SpectrumSynthesizer.html
//! [provider]: core/sequence/trait.SequenceProvider.html

pub mod core;
pub mod providers;
