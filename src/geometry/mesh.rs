//! Indexed triangle mesh with cached per-face normals.

use glam::{Quat, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::GeometryError;

/// A triangle referencing three vertices of its owning [`MeshBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Vertex indices in counter-clockwise order when seen from outside.
    pub indices: [u32; 3],
    /// Cached unit normal. Zero for degenerate triangles.
    pub normal: Vec3,
}

impl Face {
    /// Creates a face with a zero normal; call
    /// [`MeshBuffer::compute_face_normals`] once positions are final.
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            indices: [a, b, c],
            normal: Vec3::ZERO,
        }
    }

    pub fn a(&self) -> usize {
        self.indices[0] as usize
    }

    pub fn b(&self) -> usize {
        self.indices[1] as usize
    }

    pub fn c(&self) -> usize {
        self.indices[2] as usize
    }
}

/// Unit normal of the triangle `(a, b, c)`, or zero if it has no area.
pub fn triangle_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Center and radius of a mesh's footprint in the xy plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    /// Mean of all vertices with z set to 0.
    pub center: Vec3,
    /// Largest planar distance from `center` to any vertex.
    pub radius: f32,
}

/// Mutable triangle mesh: a vertex list plus faces indexing into it.
///
/// Every face index is kept in range of the vertex list. Vertices may be
/// shared between faces, so any transform that moves vertices refreshes
/// the face normals before returning. Deserialized meshes are validated
/// and get fresh normals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMesh")]
pub struct MeshBuffer {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

/// Unchecked wire form of [`MeshBuffer`].
#[derive(Deserialize)]
struct RawMesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
}

impl TryFrom<RawMesh> for MeshBuffer {
    type Error = GeometryError;

    fn try_from(raw: RawMesh) -> Result<Self, Self::Error> {
        let mut mesh = Self {
            vertices: raw.vertices,
            faces: raw.faces,
        };
        mesh.validate()?;
        mesh.compute_face_normals();
        Ok(mesh)
    }
}

impl MeshBuffer {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for the given number of elements.
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Builds a mesh from raw positions and index triples.
    ///
    /// # Errors
    /// Returns [`GeometryError::FaceIndexOutOfRange`] if any triangle
    /// references a vertex that does not exist.
    pub fn from_parts(vertices: Vec<Vec3>, triangles: &[[u32; 3]]) -> Result<Self, GeometryError> {
        let mut mesh = Self {
            vertices,
            faces: triangles.iter().map(|t| Face::new(t[0], t[1], t[2])).collect(),
        };
        mesh.validate()?;
        mesh.compute_face_normals();
        Ok(mesh)
    }

    /// Creates a mesh that shares no faces with `self` but owns a copy of
    /// every vertex.
    pub fn clone_vertices(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            faces: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Mutable access to vertex positions.
    ///
    /// Face normals are not refreshed automatically; call
    /// [`compute_face_normals`](Self::compute_face_normals) afterwards.
    pub fn vertices_mut(&mut self) -> &mut [Vec3] {
        &mut self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when the mesh has no faces to render.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: Vec3) -> u32 {
        self.vertices.push(position);
        (self.vertices.len() - 1) as u32
    }

    /// Appends a face after checking its indices.
    ///
    /// # Errors
    /// Returns [`GeometryError::FaceIndexOutOfRange`] for a dangling index.
    pub fn push_face(&mut self, a: u32, b: u32, c: u32) -> Result<(), GeometryError> {
        let face = Face::new(a, b, c);
        self.check_face(self.faces.len(), &face)?;
        self.faces.push(face);
        Ok(())
    }

    /// Appends a face whose indices the caller has already checked.
    pub(crate) fn push_face_unchecked(&mut self, face: Face) {
        debug_assert!(face.indices.iter().all(|&i| (i as usize) < self.vertices.len()));
        self.faces.push(face);
    }

    fn check_face(&self, position: usize, face: &Face) -> Result<(), GeometryError> {
        for &index in &face.indices {
            if index as usize >= self.vertices.len() {
                return Err(GeometryError::FaceIndexOutOfRange {
                    face: position,
                    index,
                    vertex_count: self.vertices.len(),
                });
            }
        }
        Ok(())
    }

    /// Checks that every face index is in range of the vertex list.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.faces
            .iter()
            .enumerate()
            .try_for_each(|(i, face)| self.check_face(i, face))
    }

    /// Returns the three corner positions of a face.
    pub fn face_positions(&self, face: &Face) -> [Vec3; 3] {
        [
            self.vertices[face.a()],
            self.vertices[face.b()],
            self.vertices[face.c()],
        ]
    }

    /// Recomputes every cached face normal from the current positions.
    pub fn compute_face_normals(&mut self) {
        let vertices = &self.vertices;
        self.faces.par_iter_mut().for_each(|face| {
            face.normal = triangle_normal(
                vertices[face.a()],
                vertices[face.b()],
                vertices[face.c()],
            );
        });
    }

    /// Area-weighted smooth normals, one per vertex.
    ///
    /// Vertices not referenced by any face get a zero normal.
    pub fn compute_vertex_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for face in &self.faces {
            let [a, b, c] = self.face_positions(face);
            // Unnormalized cross product weights by triangle area.
            let weighted = (b - a).cross(c - a);
            for &index in &face.indices {
                normals[index as usize] += weighted;
            }
        }
        normals.iter_mut().for_each(|n| *n = n.normalize_or_zero());
        normals
    }

    /// Applies `f` to every vertex, then refreshes normals.
    pub fn map_vertices<F>(&mut self, f: F)
    where
        F: Fn(Vec3) -> Vec3 + Sync + Send,
    {
        self.vertices.par_iter_mut().for_each(|v| *v = f(*v));
        self.compute_face_normals();
    }

    /// Non-uniform scale about the origin.
    pub fn scale(&mut self, factor: Vec3) {
        self.map_vertices(|v| v * factor);
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.map_vertices(|v| v + offset);
    }

    /// Rotates every vertex about the origin.
    pub fn rotate(&mut self, rotation: Quat) {
        self.map_vertices(|v| rotation * v);
    }

    /// Rotates about the x axis by `angle` radians.
    pub fn rotate_x(&mut self, angle: f32) {
        self.rotate(Quat::from_rotation_x(angle));
    }

    /// Rotates about the vertical (z) axis by `angle` radians.
    pub fn rotate_z(&mut self, angle: f32) {
        self.rotate(Quat::from_rotation_z(angle));
    }

    /// Appends another mesh, re-basing its face indices.
    pub fn merge(&mut self, other: &MeshBuffer) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(other.faces.iter().map(|face| Face {
            indices: face.indices.map(|i| i + base),
            normal: face.normal,
        }));
    }

    /// Merges a sequence of meshes into a single new mesh.
    pub fn merge_all<'a, I>(meshes: I) -> MeshBuffer
    where
        I: IntoIterator<Item = &'a MeshBuffer>,
    {
        let mut merged = MeshBuffer::new();
        for mesh in meshes {
            merged.merge(mesh);
        }
        merged
    }

    /// Axis-aligned `(min, max)` corners, or `None` without vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Footprint of the mesh projected onto the xy plane.
    pub fn bounding_circle(&self) -> Option<BoundingCircle> {
        if self.vertices.is_empty() {
            return None;
        }

        let sum: Vec3 = self.vertices.iter().copied().sum();
        let mut center = sum / self.vertices.len() as f32;
        center.z = 0.0;

        let radius = self
            .vertices
            .iter()
            .map(|v| v.truncate().distance(center.truncate()))
            .fold(0.0f32, f32::max);

        Some(BoundingCircle { center, radius })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn unit_quad() -> MeshBuffer {
        MeshBuffer::from_parts(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            &[[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_from_parts_computes_normals() {
        let mesh = unit_quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        for face in mesh.faces() {
            assert!((face.normal - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_from_parts_rejects_dangling_index() {
        let err = MeshBuffer::from_parts(vec![Vec3::ZERO; 3], &[[0, 1, 3]]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::FaceIndexOutOfRange { face: 0, index: 3, vertex_count: 3 }
        );
    }

    #[test]
    fn test_push_face_checks_indices() {
        let mut mesh = MeshBuffer::new();
        mesh.push_vertex(Vec3::ZERO);
        assert!(mesh.push_face(0, 0, 1).is_err());
        assert!(mesh.push_face(0, 0, 0).is_ok());
    }

    #[test]
    fn test_degenerate_face_has_zero_normal() {
        let mesh = MeshBuffer::from_parts(vec![Vec3::X; 3], &[[0, 1, 2]]).unwrap();
        assert_eq!(mesh.faces()[0].normal, Vec3::ZERO);
    }

    #[test]
    fn test_rotate_refreshes_normals() {
        let mut mesh = unit_quad();
        mesh.rotate_x(FRAC_PI_2);
        for face in mesh.faces() {
            assert!((face.normal - Vec3::NEG_Y).length() < 1e-5, "normal {:?}", face.normal);
        }
    }

    #[test]
    fn test_scale_and_translate() {
        let mut mesh = unit_quad();
        mesh.scale(Vec3::new(2.0, 3.0, 1.0));
        mesh.translate(Vec3::new(1.0, 0.0, -1.0));
        assert_eq!(mesh.vertices()[2], Vec3::new(3.0, 3.0, -1.0));
    }

    #[test]
    fn test_merge_rebases_indices() {
        let a = unit_quad();
        let mut b = unit_quad();
        b.translate(Vec3::Z);

        let merged = MeshBuffer::merge_all([&a, &b]);
        assert_eq!(merged.vertex_count(), 8);
        assert_eq!(merged.face_count(), 4);
        assert_eq!(merged.faces()[2].indices, [4, 5, 6]);
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn test_vertex_normals_on_flat_quad() {
        let normals = unit_quad().compute_vertex_normals();
        assert_eq!(normals.len(), 4);
        for n in normals {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_bounds_and_bounding_circle() {
        let mesh = unit_quad();
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::ZERO);
        assert_eq!(hi, Vec3::new(1.0, 1.0, 0.0));

        let circle = mesh.bounding_circle().unwrap();
        assert!((circle.center - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-6);
        assert!((circle.radius - 0.5f32.hypot(0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_deserialize_checks_indices() {
        let dangling = r#"
            vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]

            [[faces]]
            indices = [0, 1, 7]
            normal = [0.0, 0.0, 1.0]
        "#;
        let err = toml::from_str::<MeshBuffer>(dangling).unwrap_err();
        assert!(err.to_string().contains("references vertex 7"), "{}", err);
    }

    #[test]
    fn test_deserialize_refreshes_normals() {
        let text = r#"
            vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]

            [[faces]]
            indices = [0, 1, 2]
            normal = [1.0, 0.0, 0.0]
        "#;
        let mesh: MeshBuffer = toml::from_str(text).unwrap();
        assert!(mesh.validate().is_ok());
        assert!((mesh.faces()[0].normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_empty_mesh_queries() {
        let mesh = MeshBuffer::new();
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_none());
        assert!(mesh.bounding_circle().is_none());
        assert!(mesh.validate().is_ok());
    }
}
