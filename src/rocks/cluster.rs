//! Rock clusters composed from progressively smaller shapes.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use super::config::ClusterConfig;
use super::spire::ShapeGenerator;
use crate::geometry::{GeometryError, MeshBuffer, check_dimension, uniform};

/// Builds a pile of rocks around one full-size `shape`.
///
/// Each round draws a uniform number; the round runs only while that draw
/// beats the current stopping chance and both remaining extents exceed
/// `config.min_dimension`. A round adds `children_per_round` shapes, each
/// shrunk by a random fraction of what is left above one unit, stretched
/// along x, scattered across the footprint, sunk halfway by the height it
/// lost and spun about the vertical axis. The stopping chance grows after
/// every round, so piles end after a few rounds.
///
/// # Errors
/// Returns [`GeometryError::DegenerateDimension`] for a non-positive or
/// non-finite extent, and forwards any error raised by `shape`.
pub fn build_cluster<S, R>(
    shape: &S,
    width: f32,
    height: f32,
    depth: f32,
    config: &ClusterConfig,
    rng: &mut R,
) -> Result<MeshBuffer, GeometryError>
where
    S: ShapeGenerator + ?Sized,
    R: Rng,
{
    check_dimension("width", width)?;
    check_dimension("height", height)?;
    check_dimension("depth", depth)?;

    let mut cluster = shape.generate(width, height, depth, rng)?;

    let (mut x, mut y, mut z) = (width, height, depth);
    let mut chance = config.initial_chance;
    let mut rounds = 0;

    while rounds < config.max_rounds
        && rng.random::<f32>() > chance
        && x > config.min_dimension
        && y > config.min_dimension
    {
        for _ in 0..config.children_per_round {
            x -= rng.random::<f32>() * (x - 1.0);
            y -= rng.random::<f32>() * (y - 1.0);
            z -= rng.random::<f32>() * (z - 1.0);

            let mut child = shape.generate(x, y, z, rng)?;
            child.scale(Vec3::new(
                uniform(rng, config.stretch_min, config.stretch_max),
                1.0,
                1.0,
            ));
            child.translate(Vec3::new(
                rng.random::<f32>() * 2.0 * width,
                rng.random::<f32>() * 2.0 * height,
                -(depth - z) / 2.0,
            ));
            child.rotate_z(rng.random::<f32>() * PI);
            cluster.merge(&child);
        }

        chance += config.chance_step;
        rounds += 1;
        log::trace!("cluster round {}: next size {:.2}x{:.2}x{:.2}", rounds, x, y, z);
    }

    log::debug!(
        "built cluster {}x{}x{} in {} rounds: {} vertices",
        width,
        height,
        depth,
        rounds,
        cluster.vertex_count()
    );

    Ok(cluster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rocks::SpireGenerator;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;

    /// Axis-aligned box spanning `w × h × d` centred on the origin.
    fn slab(
        w: f32,
        h: f32,
        d: f32,
        _rng: &mut dyn RngCore,
    ) -> Result<MeshBuffer, GeometryError> {
        let (x, y, z) = (w / 2.0, h / 2.0, d / 2.0);
        MeshBuffer::from_parts(
            vec![
                Vec3::new(-x, -y, -z),
                Vec3::new(x, -y, -z),
                Vec3::new(x, y, -z),
                Vec3::new(-x, y, -z),
                Vec3::new(-x, -y, z),
                Vec3::new(x, -y, z),
                Vec3::new(x, y, z),
                Vec3::new(-x, y, z),
            ],
            &[
                [0, 2, 1],
                [0, 3, 2],
                [4, 5, 6],
                [4, 6, 7],
                [0, 1, 5],
                [0, 5, 4],
                [1, 2, 6],
                [1, 6, 5],
                [2, 3, 7],
                [2, 7, 6],
                [3, 0, 4],
                [3, 4, 7],
            ],
        )
    }

    #[test]
    fn test_cluster_terminates_within_bound() {
        let config = ClusterConfig::default();
        for seed in 0..50 {
            let sizes = RefCell::new(Vec::new());
            let recording = |w: f32, h: f32, d: f32, rng: &mut dyn RngCore| {
                sizes.borrow_mut().push((w, h, d));
                slab(w, h, d, rng)
            };
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let cluster =
                build_cluster(&recording, 20.0, 20.0, 10.0, &config, &mut rng).unwrap();

            let sizes = sizes.into_inner();
            // The stopping chance passes 1.0 after four rounds.
            assert!(
                sizes.len() <= config.max_shapes() as usize,
                "seed {} made {} shapes",
                seed,
                sizes.len()
            );
            assert_eq!((sizes.len() - 1) % 2, 0);
            assert_eq!(cluster.vertex_count(), sizes.len() * 8);
            assert!(cluster.validate().is_ok());
        }
    }

    #[test]
    fn test_children_shrink() {
        let sizes = RefCell::new(Vec::new());
        let recording = |w: f32, h: f32, d: f32, rng: &mut dyn RngCore| {
            sizes.borrow_mut().push((w, h, d));
            slab(w, h, d, rng)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        build_cluster(&recording, 40.0, 30.0, 12.0, &ClusterConfig::dense(), &mut rng).unwrap();

        let sizes = sizes.into_inner();
        for pair in sizes.windows(2) {
            let ((w0, h0, d0), (w1, h1, d1)) = (pair[0], pair[1]);
            assert!(w1 <= w0 && h1 <= h0 && d1 <= d0);
            assert!(w1 >= 1.0 && h1 >= 1.0 && d1 >= 1.0);
        }
    }

    #[test]
    fn test_small_footprint_yields_single_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let cluster =
            build_cluster(&slab, 3.0, 10.0, 4.0, &ClusterConfig::dense(), &mut rng).unwrap();
        assert_eq!(cluster.vertex_count(), 8);
    }

    #[test]
    fn test_children_sunk_below_parent_top() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let config = ClusterConfig {
            max_rounds: 1,
            ..ClusterConfig::dense()
        };
        let cluster = build_cluster(&slab, 20.0, 20.0, 10.0, &config, &mut rng).unwrap();
        let (_, hi) = cluster.bounds().unwrap();
        // A child of depth d sits at -(10 - d) / 2, so its top is below 5.
        assert!((hi.z - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_spire_cluster_reproducibility() {
        let generator = SpireGenerator::default();
        let config = ClusterConfig::default();
        let build = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            build_cluster(&generator, 12.0, 12.0, 20.0, &config, &mut rng).unwrap()
        };
        let a = build(77);
        assert_eq!(a, build(77));
        assert!(a.validate().is_ok());
        assert!(!a.is_empty());
    }

    #[test]
    fn test_degenerate_dimensions_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = ClusterConfig::default();
        assert!(build_cluster(&slab, 0.0, 5.0, 5.0, &config, &mut rng).is_err());
        assert!(build_cluster(&slab, 5.0, 5.0, -5.0, &config, &mut rng).is_err());
    }

    #[test]
    fn test_zero_step_capped_by_max_rounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = ClusterConfig {
            initial_chance: 0.0,
            chance_step: 0.0,
            min_dimension: 0.0,
            max_rounds: 3,
            ..ClusterConfig::default()
        };
        let cluster = build_cluster(&slab, 50.0, 50.0, 50.0, &config, &mut rng).unwrap();
        assert!(cluster.vertex_count() <= 8 * (1 + 3 * 2));
    }
}
