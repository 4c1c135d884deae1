//! Point-set helpers shared by the generators.

use glam::Vec3;
use rand::Rng;

/// Returns the candidate nearest to `point`, or `None` for an empty set.
///
/// The first candidate wins when two are equally close.
pub fn closest_point(point: Vec3, candidates: &[Vec3]) -> Option<Vec3> {
    let mut best: Option<(Vec3, f32)> = None;
    for &candidate in candidates {
        let d = point.distance_squared(candidate);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((candidate, d)),
        }
    }
    best.map(|(p, _)| p)
}

/// Uniform sample in `[min, max)`; returns `min` for an empty range.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    min + rng.random::<f32>() * (max - min)
}

/// Offsets each component of `v` by a uniform value in `[-amount, amount)`.
pub fn perturb<R: Rng + ?Sized>(v: Vec3, amount: f32, rng: &mut R) -> Vec3 {
    v + Vec3::new(
        uniform(rng, -amount, amount),
        uniform(rng, -amount, amount),
        uniform(rng, -amount, amount),
    )
}
