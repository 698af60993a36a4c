//! Edge extraction: triangle mesh -> line-list mesh.
//!
//! The renderer has no per-material wireframe toggle, so the outer shape
//! is drawn as the unique edges of its triangle mesh with a line-list
//! topology. Vertices are deduplicated by quantized position so seams
//! between subdivided faces do not produce doubled lines.

use std::collections::{HashMap, HashSet};

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, Mesh, PrimitiveTopology, VertexAttributeValues};

const QUANTUM: f32 = 1.0e-4;

fn quantize(p: [f32; 3]) -> [i64; 3] {
    [
        (p[0] / QUANTUM).round() as i64,
        (p[1] / QUANTUM).round() as i64,
        (p[2] / QUANTUM).round() as i64,
    ]
}

/// Build a line-list mesh of the unique edges of `mesh`.
///
/// Returns `None` when the source has no f32x3 position attribute.
pub fn wireframe_of(mesh: &Mesh) -> Option<Mesh> {
    let positions = match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
        Some(VertexAttributeValues::Float32x3(p)) => p,
        _ => return None,
    };

    let triangles: Vec<u32> = match mesh.indices() {
        Some(Indices::U32(idx)) => idx.clone(),
        Some(Indices::U16(idx)) => idx.iter().map(|i| *i as u32).collect(),
        None => (0..positions.len() as u32).collect(),
    };

    // Canonical vertex per quantized position.
    let mut canonical: HashMap<[i64; 3], u32> = HashMap::new();
    let mut wire_positions: Vec<[f32; 3]> = Vec::new();
    let mut remap = Vec::with_capacity(positions.len());
    for p in positions {
        let key = quantize(*p);
        let id = *canonical.entry(key).or_insert_with(|| {
            wire_positions.push(*p);
            (wire_positions.len() - 1) as u32
        });
        remap.push(id);
    }

    let mut edges: HashSet<(u32, u32)> = HashSet::new();
    let mut line_indices: Vec<u32> = Vec::new();
    for tri in triangles.chunks_exact(3) {
        let v = [
            remap[tri[0] as usize],
            remap[tri[1] as usize],
            remap[tri[2] as usize],
        ];
        for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
            if a == b {
                continue;
            }
            let key = (a.min(b), a.max(b));
            if edges.insert(key) {
                line_indices.extend_from_slice(&[a, b]);
            }
        }
    }

    // Radial normals are good enough for an unlit line material.
    let normals: Vec<[f32; 3]> = wire_positions
        .iter()
        .map(|p| {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            if len < 1.0e-6 {
                [0.0, 1.0, 0.0]
            } else {
                [p[0] / len, p[1] / len, p[2] / len]
            }
        })
        .collect();

    Some(
        Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, wire_positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
            .with_inserted_indices(Indices::U32(line_indices)),
    )
}
