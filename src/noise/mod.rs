//! Noise generation module for terrain displacement.
//!
//! A seeded value-noise lattice sampled with multi-octave turbulence.

mod lattice;

pub use lattice::NoiseField;
