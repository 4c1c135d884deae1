//! Single-threshold moss overlay for rock meshes.

use glam::Vec3;

use super::extract::select_faces;
use crate::geometry::MeshBuffer;

/// Reference direction the moss test is measured against.
pub const MOSS_DIRECTION: Vec3 = Vec3::new(0.0, 1.0, 1.0);

/// How far selected faces sink below the rock surface.
pub const MOSS_SINK: f32 = 0.1;

/// Builds a moss overlay that coincides with `rock`.
///
/// Every face is kept. Faces whose normal dotted with [`MOSS_DIRECTION`]
/// falls below `threshold` have their corners lowered by [`MOSS_SINK`], so
/// the rock shows through there and moss covers the rest. A vertex shared
/// by several lowered faces sinks once per face.
pub fn apply_moss_layer(rock: &MeshBuffer, threshold: f32) -> MeshBuffer {
    let mut moss = select_faces(
        rock,
        true,
        |normal, _| normal.dot(MOSS_DIRECTION) < threshold,
        |_| Vec3::new(0.0, 0.0, -MOSS_SINK),
    );
    moss.compute_face_normals();
    moss
}
