use std::path::Path;

use bouquet_common::Aabb;
use glam::{Mat3, Mat4, Vec3};

use crate::model::{Material, MeshPrimitive, ModelData};
use crate::AssetError;

/// Import a `.gltf` or `.glb` file from disk.
///
/// External buffers are resolved relative to the file's directory.
pub fn import_model(path: impl AsRef<Path>) -> Result<ModelData, AssetError> {
    let path = path.as_ref();
    let (doc, buffers, _images) = gltf::import(path)?;
    let model = build_model(&doc, &buffers)?;
    tracing::debug!(
        path = %path.display(),
        primitives = model.primitives.len(),
        vertices = model.vertex_count(),
        "imported glTF model"
    );
    Ok(model)
}

/// Import a glTF document held in memory (JSON with data URIs, or GLB).
#[cfg(test)]
fn import_slice(bytes: &[u8]) -> Result<ModelData, AssetError> {
    let (doc, buffers, _images) = gltf::import_slice(bytes)?;
    build_model(&doc, &buffers)
}

fn build_model(
    doc: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> Result<ModelData, AssetError> {
    let scene = doc
        .default_scene()
        .or_else(|| doc.scenes().next())
        .ok_or(AssetError::NoScene)?;

    let mut model = ModelData {
        name: scene.name().map(str::to_owned),
        ..ModelData::default()
    };
    for node in scene.nodes() {
        collect_node(&node, Mat4::IDENTITY, buffers, &mut model);
    }

    if model.primitives.is_empty() {
        tracing::warn!("scene has no triangle meshes; loading an empty model");
    }
    model.bounds = Aabb::from_points(
        model
            .primitives
            .iter()
            .flat_map(|p| p.positions.iter().copied().map(Vec3::from)),
    );
    Ok(model)
}

/// Depth-first walk accumulating world matrices.
fn collect_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    model: &mut ModelData,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                tracing::debug!(
                    mesh = mesh.name().unwrap_or("unnamed"),
                    mode = ?prim.mode(),
                    "skipping non-triangle primitive"
                );
                continue;
            }
            if let Some(p) = read_primitive(&prim, &world, buffers) {
                model.primitives.push(p);
            }
        }
    }

    for child in node.children() {
        collect_node(&child, world, buffers, model);
    }
}

fn read_primitive(
    prim: &gltf::Primitive<'_>,
    world: &Mat4,
    buffers: &[gltf::buffer::Data],
) -> Option<MeshPrimitive> {
    let reader = prim.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()?
        .map(|p| world.transform_point3(Vec3::from(p)).to_array())
        .collect();
    if positions.is_empty() {
        return None;
    }

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    if indices.len() < 3 {
        return None;
    }

    let normal_matrix = normal_matrix(world);
    let normals = match reader.read_normals() {
        Some(normals) => normals
            .map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero().to_array())
            .collect(),
        None => vertex_normals(&positions, &indices),
    };

    let material = prim.material();
    let material = Material {
        name: material.name().unwrap_or("unnamed").to_string(),
        base_color: material.pbr_metallic_roughness().base_color_factor(),
        emissive: material.emissive_factor(),
        emissive_intensity: 1.0,
    };

    Some(MeshPrimitive {
        positions,
        normals,
        indices,
        material,
    })
}

fn normal_matrix(world: &Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(*world);
    if linear.determinant().abs() > f32::EPSILON {
        linear.inverse().transpose()
    } else {
        linear
    }
}

/// Area-weighted vertex normals for primitives that ship without them.
fn vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let (pa, pb, pc) = (
            Vec3::from(positions[a]),
            Vec3::from(positions[b]),
            Vec3::from(positions[c]),
        );
        let face = (pb - pa).cross(pc - pa);
        acc[a] += face;
        acc[b] += face;
        acc[c] += face;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}
