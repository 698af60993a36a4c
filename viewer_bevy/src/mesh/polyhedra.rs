//! Subdivided polyhedra projected onto a sphere.
//!
//! Base solids are subdivided `detail` times per edge and every vertex is
//! pushed out to the target radius.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, Mesh, PrimitiveTopology};

/// Golden ratio.
const PHI: f32 = 1.618_034;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Shared sphere normals; surfaces read as curved.
    Smooth,
    /// Per-face normals; facets stay visible.
    Flat,
}

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
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

/// Reciprocal of the golden ratio.
const INV: f32 = 1.0 / PHI;

const DODECAHEDRON_VERTICES: [[f32; 3]; 20] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [0.0, -INV, -PHI],
    [0.0, -INV, PHI],
    [0.0, INV, -PHI],
    [0.0, INV, PHI],
    [-INV, -PHI, 0.0],
    [-INV, PHI, 0.0],
    [INV, -PHI, 0.0],
    [INV, PHI, 0.0],
    [-PHI, 0.0, -INV],
    [PHI, 0.0, -INV],
    [-PHI, 0.0, INV],
    [PHI, 0.0, INV],
];

/// Pentagonal faces pre-triangulated, three triangles each.
const DODECAHEDRON_FACES: [[usize; 3]; 36] = [
    [3, 11, 7],
    [3, 7, 15],
    [3, 15, 13],
    [7, 19, 17],
    [7, 17, 6],
    [7, 6, 15],
    [17, 4, 8],
    [17, 8, 10],
    [17, 10, 6],
    [8, 0, 16],
    [8, 16, 2],
    [8, 2, 10],
    [0, 12, 1],
    [0, 1, 18],
    [0, 18, 16],
    [6, 10, 2],
    [6, 2, 13],
    [6, 13, 15],
    [2, 16, 18],
    [2, 18, 3],
    [2, 3, 13],
    [18, 1, 9],
    [18, 9, 11],
    [18, 11, 3],
    [4, 14, 12],
    [4, 12, 0],
    [4, 0, 8],
    [11, 9, 5],
    [11, 5, 19],
    [11, 19, 7],
    [19, 5, 14],
    [19, 14, 4],
    [19, 4, 17],
    [1, 12, 14],
    [1, 14, 5],
    [1, 5, 9],
];

pub fn icosahedron(radius: f32, detail: usize, shading: Shading) -> Mesh {
    build(&ICOSAHEDRON_VERTICES, &ICOSAHEDRON_FACES, radius, detail, shading)
}

pub fn dodecahedron(radius: f32, detail: usize, shading: Shading) -> Mesh {
    build(
        &DODECAHEDRON_VERTICES,
        &DODECAHEDRON_FACES,
        radius,
        detail,
        shading,
    )
}

fn normalize_to(v: [f32; 3], radius: f32) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    [v[0] / len * radius, v[1] / len * radius, v[2] / len * radius]
}

/// Subdivide every base face into `(detail + 1)^2` triangles on a
/// barycentric grid and project all grid points onto the sphere.
fn subdivide(
    base_vertices: &[[f32; 3]],
    base_faces: &[[usize; 3]],
    radius: f32,
    detail: usize,
) -> (Vec<[f32; 3]>, Vec<u32>) {
    let n = detail + 1;
    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for face in base_faces {
        let a = base_vertices[face[0]];
        let b = base_vertices[face[1]];
        let c = base_vertices[face[2]];
        let face_base = positions.len() as u32;

        // Row i holds n - i + 1 points; index arithmetic below depends on it.
        let row_start = |i: usize| -> u32 { (i * (n + 1) - (i * i - i) / 2) as u32 };

        for i in 0..=n {
            for j in 0..=(n - i) {
                let fi = i as f32 / n as f32;
                let fj = j as f32 / n as f32;
                let p = [
                    a[0] + (b[0] - a[0]) * fi + (c[0] - a[0]) * fj,
                    a[1] + (b[1] - a[1]) * fi + (c[1] - a[1]) * fj,
                    a[2] + (b[2] - a[2]) * fi + (c[2] - a[2]) * fj,
                ];
                positions.push(normalize_to(p, radius));
            }
        }

        for i in 0..n {
            for j in 0..(n - i) {
                let v00 = face_base + row_start(i) + j as u32;
                let v10 = face_base + row_start(i + 1) + j as u32;
                let v01 = v00 + 1;
                indices.extend_from_slice(&[v00, v10, v01]);
                if j + 1 < n - i {
                    let v11 = v10 + 1;
                    indices.extend_from_slice(&[v10, v11, v01]);
                }
            }
        }
    }

    (positions, indices)
}

fn build(
    base_vertices: &[[f32; 3]],
    base_faces: &[[usize; 3]],
    radius: f32,
    detail: usize,
    shading: Shading,
) -> Mesh {
    let (positions, indices) = subdivide(base_vertices, base_faces, radius, detail);

    match shading {
        Shading::Smooth => {
            let normals: Vec<[f32; 3]> = positions
                .iter()
                .map(|p| normalize_to(*p, 1.0))
                .collect();
            Mesh::new(
                PrimitiveTopology::TriangleList,
                RenderAssetUsages::default(),
            )
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
            .with_inserted_indices(Indices::U32(indices))
        }
        Shading::Flat => {
            // Expand to per-face vertices so each triangle keeps its own normal.
            let mut flat_positions = Vec::with_capacity(indices.len());
            let mut flat_normals = Vec::with_capacity(indices.len());
            for tri in indices.chunks_exact(3) {
                let a = positions[tri[0] as usize];
                let b = positions[tri[1] as usize];
                let c = positions[tri[2] as usize];
                let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
                let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
                let normal = normalize_to(
                    [
                        u[1] * v[2] - u[2] * v[1],
                        u[2] * v[0] - u[0] * v[2],
                        u[0] * v[1] - u[1] * v[0],
                    ],
                    1.0,
                );
                for p in [a, b, c] {
                    flat_positions.push(p);
                    flat_normals.push(normal);
                }
            }
            Mesh::new(
                PrimitiveTopology::TriangleList,
                RenderAssetUsages::default(),
            )
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, flat_positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, flat_normals)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    fn positions_of(mesh: &Mesh) -> &Vec<[f32; 3]> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(p)) => p,
            _ => panic!("expected f32x3 positions"),
        }
    }

    #[test]
    fn every_vertex_sits_on_the_sphere() {
        for detail in 0..3 {
            let mesh = icosahedron(1.5, detail, Shading::Smooth);
            for p in positions_of(&mesh) {
                let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
                assert!((r - 1.5).abs() < 1e-4, "radius {} at detail {}", r, detail);
            }
        }
    }

    #[test]
    fn subdivision_squares_the_face_count() {
        let (_, idx0) = subdivide(&ICOSAHEDRON_VERTICES, &ICOSAHEDRON_FACES, 1.0, 0);
        let (_, idx1) = subdivide(&ICOSAHEDRON_VERTICES, &ICOSAHEDRON_FACES, 1.0, 1);
        let (_, idx2) = subdivide(&ICOSAHEDRON_VERTICES, &ICOSAHEDRON_FACES, 1.0, 2);
        assert_eq!(idx0.len(), 20 * 3);
        assert_eq!(idx1.len(), 20 * 4 * 3);
        assert_eq!(idx2.len(), 20 * 9 * 3);
    }

    #[test]
    fn dodecahedron_base_face_count() {
        let (_, indices) = subdivide(&DODECAHEDRON_VERTICES, &DODECAHEDRON_FACES, 2.0, 0);
        assert_eq!(indices.len(), 36 * 3);
    }

    #[test]
    fn flat_meshes_are_unindexed_triangle_soup() {
        let mesh = icosahedron(1.0, 1, Shading::Flat);
        assert!(mesh.indices().is_none());
        // 20 faces * 4 subdivided tris * 3 vertices.
        assert_eq!(positions_of(&mesh).len(), 240);
    }

    #[test]
    fn subdivided_indices_stay_in_bounds() {
        let (positions, indices) = subdivide(&DODECAHEDRON_VERTICES, &DODECAHEDRON_FACES, 2.0, 2);
        for i in &indices {
            assert!((*i as usize) < positions.len());
        }
    }
}
