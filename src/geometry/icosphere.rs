//! Subdivided icosahedron used as the base shape for islands.

use std::collections::HashMap;

use glam::Vec3;

use super::mesh::{Face, MeshBuffer};

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

/// Returns the `(vertex, face)` counts of an icosphere at `detail`.
///
/// Each subdivision splits every triangle into four.
pub const fn icosphere_counts(detail: u32) -> (usize, usize) {
    let split = 1usize << (2 * detail);
    (10 * split + 2, 20 * split)
}

/// Builds a sphere of `radius` by recursively subdividing an icosahedron.
///
/// Edge midpoints are shared between neighbouring triangles, so the
/// result is a closed indexed mesh with no duplicate vertices.
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `detail` - Number of subdivision passes (0 = plain icosahedron)
pub fn icosphere(radius: f32, detail: u32) -> MeshBuffer {
    let mut vertices: Vec<Vec3> = icosahedron_vertices()
        .iter()
        .map(|v| v.normalize())
        .collect();
    let mut triangles: Vec<[u32; 3]> = ICOSAHEDRON_FACES.to_vec();

    for _ in 0..detail {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(triangles.len() * 4);

        for [a, b, c] in triangles {
            let ab = midpoint(&mut vertices, &mut midpoints, a, b);
            let bc = midpoint(&mut vertices, &mut midpoints, b, c);
            let ca = midpoint(&mut vertices, &mut midpoints, c, a);

            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }

        triangles = next;
    }

    let (vertex_count, face_count) = icosphere_counts(detail);
    debug_assert_eq!(vertices.len(), vertex_count);
    debug_assert_eq!(triangles.len(), face_count);

    let mut mesh = MeshBuffer::with_capacity(vertex_count, face_count);
    for v in vertices {
        mesh.push_vertex(v * radius);
    }
    for [a, b, c] in triangles {
        mesh.push_face_unchecked(Face::new(a, b, c));
    }
    mesh.compute_face_normals();
    mesh
}

fn midpoint(
    vertices: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    *cache.entry(key).or_insert_with(|| {
        let mid = ((vertices[a as usize] + vertices[b as usize]) * 0.5).normalize();
        vertices.push(mid);
        (vertices.len() - 1) as u32
    })
}
