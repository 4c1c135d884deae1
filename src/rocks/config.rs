//! Configuration for rock and spire generation.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Parameters of the spire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpireConfig {
    /// Lower bound of the top radius, as a fraction of the base radius.
    pub top_radius_min: f32,
    /// Upper bound of the top radius, as a fraction of the base radius.
    pub top_radius_max: f32,
    /// Inclusive range of vertices per ring.
    pub radial_segments_min: u32,
    pub radial_segments_max: u32,
    /// Inclusive range of bands along the axis; also the pull axis count.
    pub height_segments_min: u32,
    pub height_segments_max: u32,
    /// Largest tilt applied while warping, in radians.
    pub max_tilt: f32,
    /// Fraction of the distance to its pull axis each vertex moves.
    pub pull_strength: f32,
    /// Largest random push of cap vertices along the axis.
    pub cap_perturb: f32,
    /// Extra push of the two cap centers, to sharpen the tips.
    pub tip_offset: f32,
}

impl Default for SpireConfig {
    fn default() -> Self {
        Self {
            top_radius_min: 0.4,
            top_radius_max: 0.8,
            radial_segments_min: 5,
            radial_segments_max: 8,
            height_segments_min: 5,
            height_segments_max: 10,
            max_tilt: PI / 8.0,
            pull_strength: 0.3,
            cap_perturb: 0.5,
            tip_offset: 0.3,
        }
    }
}

impl SpireConfig {
    /// Blunt boulder: wide top, few segments and a weak warp.
    pub fn boulder() -> Self {
        Self {
            top_radius_min: 0.7,
            top_radius_max: 0.95,
            height_segments_min: 2,
            height_segments_max: 4,
            pull_strength: 0.15,
            tip_offset: 0.0,
            ..Default::default()
        }
    }
}

/// Parameters of the cluster composition loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Stopping probability of the first round.
    pub initial_chance: f32,
    /// Added to the stopping probability after every round.
    pub chance_step: f32,
    /// Children generated per round.
    pub children_per_round: u32,
    /// Rounds stop once width or height shrinks to this size or below.
    pub min_dimension: f32,
    /// Smallest x stretch applied to a child.
    pub stretch_min: f32,
    /// Largest x stretch applied to a child.
    pub stretch_max: f32,
    /// Hard cap on the number of rounds.
    pub max_rounds: u32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            initial_chance: 0.3,
            chance_step: 0.2,
            children_per_round: 2,
            min_dimension: 3.0,
            stretch_min: 0.4,
            stretch_max: 0.9,
            max_rounds: 16,
        }
    }
}

impl ClusterConfig {
    /// Starts with no stopping chance and adds more children per round.
    pub fn dense() -> Self {
        Self {
            initial_chance: 0.0,
            chance_step: 0.1,
            children_per_round: 3,
            ..Default::default()
        }
    }

    /// Most rounds the loop can run: the stopping chance reaches 1.0 or the
    /// hard cap is hit, whichever comes first.
    pub fn round_limit(&self) -> u32 {
        let mut chance = self.initial_chance;
        let mut rounds = 0;
        while rounds < self.max_rounds && chance < 1.0 {
            chance += self.chance_step;
            rounds += 1;
        }
        rounds
    }

    /// Upper bound on the shapes in one cluster, the full-size one included.
    pub fn max_shapes(&self) -> u32 {
        1 + self.round_limit() * self.children_per_round
    }
}
