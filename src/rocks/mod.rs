//! Rock generation module.
//!
//! Spires are warped from capped cylinders; clusters pile progressively
//! smaller shapes around one full-size rock.

mod cluster;
mod config;
mod spire;

pub use cluster::build_cluster;
pub use config::{ClusterConfig, SpireConfig};
pub use spire::{ShapeGenerator, Spire, SpireGenerator};
