//! Configuration for island generation.

use serde::{Deserialize, Serialize};

/// Tunable constants of the island shaping passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    /// Icosphere subdivision passes for the base ellipsoid.
    pub detail: u32,
    /// Multiplier applied before the exponential noise term.
    pub height_gain: f32,
    /// Turbulence scale for vertices above the equator.
    pub top_noise_scale: f32,
    /// Turbulence scale for vertices below the equator (smoother).
    pub bottom_noise_scale: f32,
    /// Steepness of the logistic falloff around the peak.
    pub squash_steepness: f32,
    /// Fraction of the radius over which the falloff is spread.
    pub squash_spread: f32,
    /// Shift of the logistic curve; higher keeps more height near the peak.
    pub squash_offset: f32,
    /// How far the underside drops to separate it from the waterline.
    pub shelf_drop: f32,
    /// Per-component jitter amplitude.
    pub jitter: f32,
    /// Coefficient of the downward parabolic bend.
    pub bend: f32,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            detail: 3,
            height_gain: 0.08,
            top_noise_scale: 100.0,
            bottom_noise_scale: 200.0,
            squash_steepness: 12.0,
            squash_spread: 1.2,
            squash_offset: 4.0,
            shelf_drop: 3.0,
            jitter: 0.5,
            bend: 0.003,
        }
    }
}

impl IslandConfig {
    /// Finer base mesh for large islands.
    pub fn high_detail() -> Self {
        Self {
            detail: 4,
            ..Default::default()
        }
    }

    /// Gentle, low-lying islet with a lower summit and no jitter.
    pub fn calm() -> Self {
        Self {
            height_gain: 0.05,
            squash_offset: 3.0,
            jitter: 0.0,
            ..Default::default()
        }
    }
}
