//! Face selection by steepness and height, with offset along the normal.

use glam::Vec3;

use crate::geometry::{Face, MeshBuffer, triangle_normal};

/// Parameters for [`extract_layer`].
///
/// A face is selected when `dot_min < normal · Z < dot_max` and
/// `3 * z_min < za + zb + zc < 3 * z_max`. Bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSelection {
    /// Lower bound on the normal's z component.
    pub dot_min: f32,
    /// Upper bound on the normal's z component.
    pub dot_max: f32,
    /// Lower bound on the mean height of the face.
    pub z_min: f32,
    /// Upper bound on the mean height of the face.
    pub z_max: f32,
    /// Distance each selected face is pushed along its normal.
    pub offset: f32,
}

impl LayerSelection {
    /// Grass on shallow faces that stay below the mountain tops.
    pub const GRASS_PLATEAU: Self = Self::new(0.8, 1.0, -20.0, 10.0, 0.01);

    /// Grass draped over the shore so it overhangs the waterline.
    pub const GRASS_OVERHANG: Self = Self::new(-1.0, 1.0, -10.0, 0.0, 0.01);

    /// Snow on fairly flat faces above z = 20.
    pub const SNOW_CAP: Self = Self::new(0.3, 1.0, 20.0, 100.0, 0.2);

    pub const fn new(dot_min: f32, dot_max: f32, z_min: f32, z_max: f32, offset: f32) -> Self {
        Self {
            dot_min,
            dot_max,
            z_min,
            z_max,
            offset,
        }
    }

    /// Returns true if a face with this normal and corner-height sum passes
    /// both bands.
    pub fn accepts(&self, normal: Vec3, z_sum: f32) -> bool {
        let dot = normal.dot(Vec3::Z);
        dot > self.dot_min
            && dot < self.dot_max
            && z_sum > self.z_min * 3.0
            && z_sum < self.z_max * 3.0
    }
}

/// Shared select-and-offset pass.
///
/// Normals are computed from `source` positions before anything moves. The
/// output owns a copy of every source vertex; `predicate` sees the face's
/// normal and the copy's current corner positions, which already include
/// offsets applied by earlier selected faces. Selected faces have their
/// corners moved by `offset(normal)`. Unselected faces are kept only when
/// `keep_unselected` is set. Output faces carry the source normal they were
/// selected with.
pub(crate) fn select_faces<P, O>(
    source: &MeshBuffer,
    keep_unselected: bool,
    predicate: P,
    offset: O,
) -> MeshBuffer
where
    P: Fn(Vec3, [Vec3; 3]) -> bool,
    O: Fn(Vec3) -> Vec3,
{
    let mut layer = source.clone_vertices();

    for face in source.faces() {
        let [a, b, c] = source.face_positions(face);
        let normal = triangle_normal(a, b, c);
        let corners = layer.face_positions(face);

        let selected = predicate(normal, corners);
        if selected {
            let shift = offset(normal);
            let vertices = layer.vertices_mut();
            for &index in &face.indices {
                vertices[index as usize] += shift;
            }
        }

        if selected || keep_unselected {
            layer.push_face_unchecked(Face {
                indices: face.indices,
                normal,
            });
        }
    }

    layer
}

/// Extracts the faces of `mesh` that fall inside both bands of `selection`.
///
/// The source mesh is left untouched. Selected faces are pushed outward by
/// `selection.offset` along their own normal so the layer renders in front
/// of the base surface. Unselected faces are dropped; their vertices remain
/// in the output as unreferenced entries. An inverted band or an empty mesh
/// yields a mesh without faces.
///
/// # Example
/// ```
/// use isleforge::geometry::icosphere;
/// use isleforge::layers::{extract_layer, LayerSelection};
///
/// let sphere = icosphere(10.0, 2);
/// let cap = extract_layer(&sphere, &LayerSelection::new(0.9, 1.1, 5.0, 20.0, 0.1));
/// assert!(cap.face_count() > 0);
/// assert!(cap.face_count() < sphere.face_count());
/// ```
pub fn extract_layer(mesh: &MeshBuffer, selection: &LayerSelection) -> MeshBuffer {
    let layer = select_faces(
        mesh,
        false,
        |normal, [a, b, c]| selection.accepts(normal, a.z + b.z + c.z),
        |normal| normal * selection.offset,
    );
    log::debug!(
        "extracted {} of {} faces (dot {}..{}, z {}..{})",
        layer.face_count(),
        mesh.face_count(),
        selection.dot_min,
        selection.dot_max,
        selection.z_min,
        selection.z_max,
    );
    layer
}
