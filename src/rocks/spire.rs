//! Irregular spire rocks warped from a capped cylinder.

use glam::Vec3;
use rand::{Rng, RngCore};

use super::config::SpireConfig;
use crate::geometry::{
    CylinderLayout, CylinderParams, GeometryError, MeshBuffer, capped_cylinder, check_dimension,
    closest_point, uniform,
};

/// Anything that can produce a rock mesh of a requested size.
///
/// Implemented by [`SpireGenerator`] and by any closure or function with
/// the matching signature, so clusters can be built from custom shapes.
pub trait ShapeGenerator {
    fn generate(
        &self,
        width: f32,
        height: f32,
        depth: f32,
        rng: &mut dyn RngCore,
    ) -> Result<MeshBuffer, GeometryError>;
}

impl<F> ShapeGenerator for F
where
    F: Fn(f32, f32, f32, &mut dyn RngCore) -> Result<MeshBuffer, GeometryError>,
{
    fn generate(
        &self,
        width: f32,
        height: f32,
        depth: f32,
        rng: &mut dyn RngCore,
    ) -> Result<MeshBuffer, GeometryError> {
        self(width, height, depth, rng)
    }
}

/// A generated spire and the cylinder layout it was warped from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spire {
    pub mesh: MeshBuffer,
    pub layout: CylinderLayout,
}

/// Builds spire rocks from a [`SpireConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpireGenerator {
    pub config: SpireConfig,
}

fn pick_segments<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32) -> u32 {
    if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    }
}

impl SpireGenerator {
    pub fn new(config: SpireConfig) -> Self {
        Self { config }
    }

    /// Builds one spire with footprint `width × height` standing `depth`
    /// tall along z.
    ///
    /// Starts from a cylinder whose top is narrower than its base, pushes
    /// the caps outward at random (the two centers further, to form tips),
    /// then tilts the shape and drags every vertex part of the way toward
    /// the nearest of a handful of random internal points. The tilt is
    /// undone and the footprint stretched to the requested aspect.
    ///
    /// # Errors
    /// Returns [`GeometryError::DegenerateDimension`] unless all three
    /// dimensions are positive and finite.
    pub fn build<R: Rng + ?Sized>(
        &self,
        width: f32,
        height: f32,
        depth: f32,
        rng: &mut R,
    ) -> Result<Spire, GeometryError> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        check_dimension("depth", depth)?;
        let cfg = &self.config;

        let diameter = width.max(height);
        let base_radius = diameter / 2.0;
        let top_radius = uniform(rng, cfg.top_radius_min, cfg.top_radius_max) * base_radius;
        let radial = pick_segments(rng, cfg.radial_segments_min, cfg.radial_segments_max);
        let bands = pick_segments(rng, cfg.height_segments_min, cfg.height_segments_max);

        let params = CylinderParams::unit()
            .with_radii(top_radius, base_radius)
            .with_depth(depth)
            .with_segments(radial, bands);
        let (mut mesh, layout) = capped_cylinder(&params);

        let tips = [layout.apex() as usize, layout.base_center() as usize];
        for (i, v) in mesh.vertices_mut().iter_mut().enumerate() {
            if !layout.is_cap_vertex(i as u32) {
                continue;
            }
            let push = uniform(rng, 0.0, cfg.cap_perturb);
            let extra = if tips.contains(&i) { cfg.tip_offset } else { 0.0 };
            v.z += v.z.signum() * (push + extra);
        }

        let tilt = uniform(rng, -cfg.max_tilt, cfg.max_tilt);
        mesh.rotate_x(tilt);

        let half_depth = depth / 2.0;
        let axes: Vec<Vec3> = (0..layout.height_segments)
            .map(|_| {
                let r = uniform(rng, -1.0, 1.0);
                let spread = r.abs();
                Vec3::new(
                    uniform(rng, -spread, spread) * base_radius,
                    uniform(rng, -spread, spread) * base_radius,
                    r * half_depth,
                )
            })
            .collect();

        let strength = cfg.pull_strength;
        mesh.map_vertices(|v| match closest_point(v, &axes) {
            Some(target) => v + (target - v) * strength,
            None => v,
        });

        mesh.rotate_x(-tilt);
        mesh.scale(Vec3::new(width / diameter, height / diameter, 1.0));

        log::debug!(
            "built spire {}x{}x{}: {} radial x {} bands, {} vertices",
            width,
            height,
            depth,
            layout.radial_segments,
            layout.height_segments,
            mesh.vertex_count()
        );

        Ok(Spire { mesh, layout })
    }
}

impl ShapeGenerator for SpireGenerator {
    fn generate(
        &self,
        width: f32,
        height: f32,
        depth: f32,
        rng: &mut dyn RngCore,
    ) -> Result<MeshBuffer, GeometryError> {
        self.build(width, height, depth, rng).map(|spire| spire.mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spire(seed: u64, width: f32, height: f32, depth: f32) -> Spire {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        SpireGenerator::default().build(width, height, depth, &mut rng).unwrap()
    }

    #[test]
    fn test_capped_cylinder_topology() {
        for seed in 0..20 {
            let spire = spire(seed, 10.0, 10.0, 20.0);
            let r = spire.layout.radial_segments as usize;
            let h = spire.layout.height_segments as usize;
            assert!((5..=8).contains(&r));
            assert!((5..=10).contains(&h));
            assert_eq!(spire.mesh.vertex_count(), r * (h + 1) + 2);
            assert_eq!(spire.mesh.face_count(), 2 * r * h + 2 * r);
            assert!(spire.mesh.validate().is_ok());
        }
    }

    #[test]
    fn test_spire_reproducibility() {
        assert_eq!(spire(99, 10.0, 10.0, 20.0), spire(99, 10.0, 10.0, 20.0));
        assert_ne!(spire(99, 10.0, 10.0, 20.0).mesh, spire(100, 10.0, 10.0, 20.0).mesh);
    }

    #[test]
    fn test_aspect_follows_footprint() {
        let spire = spire(3, 20.0, 5.0, 10.0);
        let (lo, hi) = spire.mesh.bounds().unwrap();
        let span = hi - lo;
        assert!(span.x > span.y, "span {:?}", span);
    }

    #[test]
    fn test_depth_roughly_preserved() {
        let spire = spire(4, 10.0, 10.0, 20.0);
        let (lo, hi) = spire.mesh.bounds().unwrap();
        // Vertices move 30% toward points inside the shape; caps add under 1 unit.
        let span = hi.z - lo.z;
        assert!(span > 7.0 && span < 22.0, "span {}", span);
        assert!(spire.mesh.vertices().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_degenerate_dimensions_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let generator = SpireGenerator::default();
        assert!(matches!(
            generator.build(10.0, 10.0, 0.0, &mut rng),
            Err(GeometryError::DegenerateDimension { name: "depth", .. })
        ));
        assert!(generator.build(-1.0, 10.0, 5.0, &mut rng).is_err());
    }

    #[test]
    fn test_generate_matches_build() {
        let generator = SpireGenerator::default();
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        let built = generator.build(6.0, 4.0, 9.0, &mut a).unwrap().mesh;
        let generated = generator.generate(6.0, 4.0, 9.0, &mut b).unwrap();
        assert_eq!(built, generated);
    }

    #[test]
    fn test_boulder_preset() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let spire = SpireGenerator::new(SpireConfig::boulder())
            .build(8.0, 8.0, 4.0, &mut rng)
            .unwrap();
        assert!((2..=4).contains(&spire.layout.height_segments));
    }
}
