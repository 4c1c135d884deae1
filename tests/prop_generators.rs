use isleforge::geometry::MeshBuffer;
use isleforge::noise::NoiseField;
use isleforge::rocks::{ClusterConfig, SpireGenerator, build_cluster};
use isleforge::terrain::{IslandConfig, build_island, squash_factor};
use proptest::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn all_finite(mesh: &MeshBuffer) -> bool {
    mesh.vertices().iter().all(|v| v.is_finite())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // Turbulence stays in [0, 2) for any coordinate, including negative ones.
    #[test]
    fn turbulence_in_range(
        seed in any::<u64>(),
        x in -500.0f32..500.0,
        y in -500.0f32..500.0,
        scale in 0.5f32..256.0,
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let field = NoiseField::new(64.0, 48.0, &mut rng).unwrap();
        let t = field.turbulence(x, y, scale);
        prop_assert!(t >= 0.0 && t <= 2.0, "turbulence {}", t);
        prop_assert_eq!(t, field.turbulence(x, y, scale));
    }

    // Heights fall off monotonically with distance from the peak.
    #[test]
    fn squash_is_monotonic(
        d1 in 0.0f32..200.0,
        d2 in 0.0f32..200.0,
        radius in 1.0f32..100.0,
    ) {
        let config = IslandConfig::default();
        let (near, far) = (d1.min(d2), d1.max(d2));
        prop_assert!(squash_factor(near, radius, &config) >= squash_factor(far, radius, &config));
    }

    // Same seed, same island; and the mesh stays well formed.
    #[test]
    fn island_deterministic_and_valid(
        seed in any::<u64>(),
        width in 2.0f32..80.0,
        height in 2.0f32..80.0,
    ) {
        let config = IslandConfig { detail: 2, ..IslandConfig::default() };
        let a = build_island(width, height, &config, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        let b = build_island(width, height, &config, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert!(a.mesh.validate().is_ok());
        prop_assert!(all_finite(&a.mesh));
        prop_assert!(a.peak.z >= 0.0);
    }

    #[test]
    fn spire_deterministic_and_valid(
        seed in any::<u64>(),
        width in 0.5f32..30.0,
        height in 0.5f32..30.0,
        depth in 0.5f32..40.0,
    ) {
        let generator = SpireGenerator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let a = generator.build(width, height, depth, &mut rng).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let b = generator.build(width, height, depth, &mut rng).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert!(a.mesh.validate().is_ok());
        prop_assert!(all_finite(&a.mesh));
        prop_assert_eq!(a.mesh.vertex_count(), a.layout.vertex_count());
        prop_assert_eq!(a.mesh.face_count(), a.layout.face_count());
    }

    // Clusters never exceed the configured shape bound.
    #[test]
    fn cluster_bounded(
        seed in any::<u64>(),
        width in 1.0f32..40.0,
        height in 1.0f32..40.0,
        depth in 1.0f32..40.0,
    ) {
        let config = ClusterConfig::default();
        let unit = |w: f32, h: f32, d: f32, rng: &mut dyn RngCore| {
            SpireGenerator::default().build(w, h, d, rng).map(|s| s.mesh)
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cluster = build_cluster(&unit, width, height, depth, &config, &mut rng).unwrap();
        prop_assert!(cluster.validate().is_ok());
        prop_assert!(all_finite(&cluster));

        // A spire has at most 8 * 11 + 2 vertices with default settings.
        let max_vertices = config.max_shapes() as usize * (8 * 11 + 2);
        prop_assert!(cluster.vertex_count() <= max_vertices);
    }

    // Degenerate sizes are rejected rather than producing NaN meshes.
    #[test]
    fn non_positive_sizes_rejected(bad in -50.0f32..=0.0) {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        prop_assert!(build_island(bad, 10.0, &IslandConfig::default(), &mut rng).is_err());
        prop_assert!(SpireGenerator::default().build(10.0, bad, 10.0, &mut rng).is_err());
    }
}
