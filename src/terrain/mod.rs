//! Terrain generation module.
//!
//! Builds floating islands from a noise-displaced ellipsoid and derives
//! their grass and snow layers.

mod config;
mod island;

pub use config::IslandConfig;
pub use island::{Island, build_island, squash_factor};
