//! Procedural floating island and rock mesh generator.
//!
//! This crate builds indexed triangle meshes for floating islands, spire
//! rocks and rock clusters from lattice noise and a few geometric warps,
//! and derives material layers (grass, snow, moss) by filtering faces on
//! orientation and height.

pub mod config;
pub mod export;
pub mod geometry;
pub mod layers;
pub mod noise;
pub mod rocks;
pub mod terrain;

pub use config::{ConfigError, SceneConfig};
pub use geometry::{GeometryError, MeshBuffer};
pub use layers::{LayerSelection, LayerSet, apply_moss_layer, extract_layer};
pub use noise::NoiseField;
pub use rocks::{ClusterConfig, ShapeGenerator, SpireConfig, SpireGenerator, build_cluster};
pub use terrain::{Island, IslandConfig, build_island};
