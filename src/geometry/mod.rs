//! Mesh geometry module.
//!
//! Provides the indexed triangle mesh every generator produces, the base
//! shapes the generators start from, and small point-set helpers.

mod mesh;
mod icosphere;
mod cylinder;
mod points;

use thiserror::Error;

pub use mesh::{BoundingCircle, Face, MeshBuffer, triangle_normal};
pub use icosphere::{icosphere, icosphere_counts};
pub use cylinder::{CylinderLayout, CylinderParams, capped_cylinder};
pub use points::{closest_point, perturb, uniform};

/// Errors raised while building or validating geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Degenerate dimension: {name} must be positive and finite, got {value}")]
    DegenerateDimension { name: &'static str, value: f32 },
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("Noise lattice of {width}x{height} cells is too large")]
    LatticeTooLarge { width: usize, height: usize },
}

/// Fails with [`GeometryError::DegenerateDimension`] unless `value` is a
/// positive finite number.
pub fn check_dimension(name: &'static str, value: f32) -> Result<f32, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::DegenerateDimension { name, value })
    }
}
