//! Capped cylinder (frustum) generation along the z axis.

use std::f32::consts::TAU;

use glam::Vec3;

use super::mesh::{Face, MeshBuffer};

/// Cylinder parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    /// Radius of the ring at `z = +depth / 2`.
    pub top_radius: f32,
    /// Radius of the ring at `z = -depth / 2`.
    pub bottom_radius: f32,
    /// Extent along z.
    pub depth: f32,
    /// Vertices per ring (at least 3).
    pub radial_segments: u32,
    /// Bands between the bottom and top rings (at least 1).
    pub height_segments: u32,
}

impl CylinderParams {
    /// Unit cylinder
    pub const fn unit() -> Self {
        Self {
            top_radius: 0.5,
            bottom_radius: 0.5,
            depth: 1.0,
            radial_segments: 8,
            height_segments: 1,
        }
    }

    /// With radii
    pub const fn with_radii(mut self, top: f32, bottom: f32) -> Self {
        self.top_radius = top;
        self.bottom_radius = bottom;
        self
    }

    /// With depth
    pub const fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    /// With segments
    pub const fn with_segments(mut self, radial: u32, height: u32) -> Self {
        self.radial_segments = radial;
        self.height_segments = height;
        self
    }
}

impl Default for CylinderParams {
    fn default() -> Self {
        Self::unit()
    }
}

/// Index layout of a mesh produced by [`capped_cylinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CylinderLayout {
    pub radial_segments: u32,
    pub height_segments: u32,
}

impl CylinderLayout {
    /// Index of vertex `k` on ring `ring` (ring 0 is the bottom).
    pub fn ring_vertex(&self, ring: u32, k: u32) -> u32 {
        ring * self.radial_segments + (k % self.radial_segments)
    }

    /// Center vertex of the top cap.
    pub fn apex(&self) -> u32 {
        self.radial_segments * (self.height_segments + 1)
    }

    /// Center vertex of the bottom cap.
    pub fn base_center(&self) -> u32 {
        self.apex() + 1
    }

    pub fn vertex_count(&self) -> usize {
        (self.radial_segments * (self.height_segments + 1) + 2) as usize
    }

    pub fn face_count(&self) -> usize {
        (2 * self.radial_segments * self.height_segments + 2 * self.radial_segments) as usize
    }

    /// True for vertices lying on either end cap, rims and centers included.
    pub fn is_cap_vertex(&self, index: u32) -> bool {
        index < self.radial_segments
            || index >= self.height_segments * self.radial_segments
    }
}

/// Builds a closed cylinder whose axis is the z axis.
///
/// Rings do not duplicate a seam vertex, and each cap is a fan around its
/// own center vertex. Segment counts below the minimum are raised to it.
pub fn capped_cylinder(params: &CylinderParams) -> (MeshBuffer, CylinderLayout) {
    let layout = CylinderLayout {
        radial_segments: params.radial_segments.max(3),
        height_segments: params.height_segments.max(1),
    };
    let r_seg = layout.radial_segments;
    let h_seg = layout.height_segments;
    let half_depth = params.depth / 2.0;

    let mut mesh = MeshBuffer::with_capacity(layout.vertex_count(), layout.face_count());

    for ring in 0..=h_seg {
        let t = ring as f32 / h_seg as f32;
        let radius = params.bottom_radius + (params.top_radius - params.bottom_radius) * t;
        let z = -half_depth + params.depth * t;
        for k in 0..r_seg {
            let theta = k as f32 / r_seg as f32 * TAU;
            mesh.push_vertex(Vec3::new(radius * theta.cos(), radius * theta.sin(), z));
        }
    }
    mesh.push_vertex(Vec3::new(0.0, 0.0, half_depth));
    mesh.push_vertex(Vec3::new(0.0, 0.0, -half_depth));

    for ring in 0..h_seg {
        for k in 0..r_seg {
            let p00 = layout.ring_vertex(ring, k);
            let p01 = layout.ring_vertex(ring, k + 1);
            let p10 = layout.ring_vertex(ring + 1, k);
            let p11 = layout.ring_vertex(ring + 1, k + 1);
            mesh.push_face_unchecked(Face::new(p00, p01, p11));
            mesh.push_face_unchecked(Face::new(p00, p11, p10));
        }
    }

    for k in 0..r_seg {
        mesh.push_face_unchecked(Face::new(
            layout.apex(),
            layout.ring_vertex(h_seg, k),
            layout.ring_vertex(h_seg, k + 1),
        ));
        mesh.push_face_unchecked(Face::new(
            layout.base_center(),
            layout.ring_vertex(0, k + 1),
            layout.ring_vertex(0, k),
        ));
    }

    mesh.compute_face_normals();
    (mesh, layout)
}
