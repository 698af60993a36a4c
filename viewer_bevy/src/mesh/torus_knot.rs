//! Parametric (p,q) torus-knot tube mesh.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, Mesh, PrimitiveTopology};
use bevy::prelude::Vec3;

use std::f32::consts::TAU;

/// Point on the centerline of a (p,q) torus knot.
fn curve_point(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

/// Sweep a circular cross-section of radius `tube` along the knot.
///
/// `tubular_segments` samples the centerline, `radial_segments` the
/// cross-section. The frame at each sample comes from a finite
/// difference along the local tangent.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: usize,
    radial_segments: usize,
    p: u32,
    q: u32,
) -> Mesh {
    let p = p as f32;
    let q = q as f32;

    let mut positions = Vec::with_capacity((tubular_segments + 1) * (radial_segments + 1));
    let mut normals = Vec::with_capacity(positions.capacity());
    let mut indices = Vec::with_capacity(tubular_segments * radial_segments * 6);

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p * TAU;

        let p1 = curve_point(u, p, q, radius);
        let p2 = curve_point(u + 0.01, p, q, radius);

        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1).normalize();
        let normal = binormal.cross(tangent).normalize();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let vertex = p1 + normal * cx + binormal * cy;
            positions.push([vertex.x, vertex.y, vertex.z]);

            let n = (vertex - p1).normalize();
            normals.push([n.x, n.y, n.z]);
        }
    }

    let ring = (radial_segments + 1) as u32;
    for j in 1..=tubular_segments as u32 {
        for i in 1..=radial_segments as u32 {
            let a = ring * (j - 1) + (i - 1);
            let b = ring * j + (i - 1);
            let c = ring * j + i;
            let d = ring * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    #[test]
    fn vertex_and_index_counts_match_the_grid() {
        let mesh = torus_knot(1.0, 0.15, 64, 8, 4, 3);
        let positions = match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(v)) => v,
            _ => panic!("expected f32x3 positions"),
        };
        assert_eq!(positions.len(), 65 * 9);
        let indices = mesh.indices().expect("indexed mesh");
        assert_eq!(indices.len(), 64 * 8 * 6);
    }

    #[test]
    fn tube_stays_within_the_knot_envelope() {
        let radius = 1.0;
        let tube = 0.15;
        let mesh = torus_knot(radius, tube, 128, 8, 4, 3);
        let positions = match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(v)) => v,
            _ => panic!("expected f32x3 positions"),
        };
        // Centerline xy-distance ranges over radius*[0.5, 1.5]; adding the
        // tube bounds every vertex inside the envelope.
        let max = radius * 1.5 + tube + 1e-3;
        for p in positions {
            let d = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!(d <= max, "vertex at xy distance {}", d);
            assert!(p[2].abs() <= radius * 0.5 + tube + 1e-3);
        }
    }

    #[test]
    fn curve_is_periodic_over_p_turns() {
        let a = curve_point(0.0, 4.0, 3.0, 1.0);
        let b = curve_point(4.0 * TAU, 4.0, 3.0, 1.0);
        assert!((a - b).length() < 1e-3);
    }
}
