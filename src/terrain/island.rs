//! Floating island generation from a noise-displaced ellipsoid.

use glam::{Vec2, Vec3};
use rand::Rng;
use rayon::prelude::*;

use super::config::IslandConfig;
use crate::geometry::{GeometryError, MeshBuffer, check_dimension, icosphere, perturb};
use crate::layers::{LayerSelection, LayerSet, extract_layer};
use crate::noise::NoiseField;

/// A generated island: its base mesh plus the summit it was shaped around.
#[derive(Debug, Clone, PartialEq)]
pub struct Island {
    /// Displaced, squashed and bent ellipsoid.
    pub mesh: MeshBuffer,
    /// Highest vertex after noise displacement, before squashing.
    pub peak: Vec3,
    /// Half extent along x.
    pub width: f32,
    /// Half extent along y.
    pub height: f32,
}

impl Island {
    /// Smaller of the two half extents.
    pub fn radius(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Derives the standard material layers from the base mesh.
    ///
    /// * `base` - the island mesh itself
    /// * `grass` - shallow faces below the mountains plus the shore overhang
    /// * `snow` - flat-ish faces high on the mountains
    pub fn layers(&self) -> LayerSet {
        let mut layers = LayerSet::new();
        layers
            .insert("base", self.mesh.clone())
            .insert("grass", extract_layer(&self.mesh, &LayerSelection::GRASS_PLATEAU))
            .insert("grass", extract_layer(&self.mesh, &LayerSelection::GRASS_OVERHANG))
            .insert("snow", extract_layer(&self.mesh, &LayerSelection::SNOW_CAP));
        layers
    }
}

/// Logistic falloff applied to heights at planar `distance` from the peak.
///
/// Close to 1 at the peak and decays smoothly towards 0 beyond roughly a
/// third of the radius.
pub fn squash_factor(distance: f32, radius: f32, config: &IslandConfig) -> f32 {
    let x = config.squash_steepness * distance / (config.squash_spread * radius);
    1.0 / (1.0 + (x - config.squash_offset).exp())
}

/// Builds an island spanning `2 * width` by `2 * height`.
///
/// The base is an icosphere of radius `min(width, height)` stretched into an
/// ellipsoid. Heights are then spiked by two independent noise fields (one
/// above the equator, one below), pulled down with distance from the
/// tallest point, jittered and bent down towards the rim.
///
/// # Errors
/// Returns [`GeometryError::DegenerateDimension`] if either extent is not a
/// positive finite number, and [`GeometryError::LatticeTooLarge`] if the
/// extents are too large to hold a noise lattice.
pub fn build_island<R: Rng + ?Sized>(
    width: f32,
    height: f32,
    config: &IslandConfig,
    rng: &mut R,
) -> Result<Island, GeometryError> {
    check_dimension("width", width)?;
    check_dimension("height", height)?;

    let radius = width.min(height);
    let mut mesh = icosphere(radius, config.detail);
    mesh.scale(Vec3::new(width / radius, height / radius, 1.0));

    let top = NoiseField::new(2.0 * width, 2.0 * height, rng)?;
    let bottom = NoiseField::new(2.0 * width, 2.0 * height, rng)?;

    displace_with_noise(&mut mesh, width, height, &top, &bottom, config);
    let peak = find_peak(mesh.vertices());
    squash_around_peak(&mut mesh, peak, radius, config);
    jitter_and_bend(&mut mesh, config, rng);

    log::debug!(
        "built island {}x{}: {} vertices, {} faces, peak {:?}",
        width,
        height,
        mesh.vertex_count(),
        mesh.face_count(),
        peak
    );

    Ok(Island {
        mesh,
        peak,
        width,
        height,
    })
}

/// Scales each vertex's z by `gain * exp(turbulence)`.
///
/// Coordinates are shifted by the half extents so lattice lookups start at
/// zero.
fn displace_with_noise(
    mesh: &mut MeshBuffer,
    width: f32,
    height: f32,
    top: &NoiseField,
    bottom: &NoiseField,
    config: &IslandConfig,
) {
    mesh.vertices_mut().par_iter_mut().for_each(|v| {
        let (field, scale) = if v.z < 0.0 {
            (bottom, config.bottom_noise_scale)
        } else {
            (top, config.top_noise_scale)
        };
        v.z *= config.height_gain * field.turbulence(v.x + width, v.y + height, scale).exp();
    });
}

/// Highest vertex at or above the equator; the origin if none rises above
/// it. The first of several equally high vertices wins.
fn find_peak(vertices: &[Vec3]) -> Vec3 {
    vertices
        .iter()
        .filter(|v| v.z >= 0.0)
        .fold(Vec3::ZERO, |best, &v| if v.z > best.z { v } else { best })
}

fn squash_around_peak(mesh: &mut MeshBuffer, peak: Vec3, radius: f32, config: &IslandConfig) {
    let peak_xy: Vec2 = peak.truncate();
    mesh.vertices_mut().par_iter_mut().for_each(|v| {
        if v.z > 0.0 {
            v.z *= squash_factor(v.truncate().distance(peak_xy), radius, config);
        } else {
            v.z -= config.shelf_drop;
        }
    });
}

fn jitter_and_bend<R: Rng + ?Sized>(mesh: &mut MeshBuffer, config: &IslandConfig, rng: &mut R) {
    // Jitter draws from the rng, so it stays sequential.
    for v in mesh.vertices_mut() {
        *v = perturb(*v, config.jitter, rng);
    }

    let bend = config.bend;
    mesh.map_vertices(|v| Vec3::new(v.x, v.y, v.z - bend * (v.x * v.x + v.y * v.y)));
}
