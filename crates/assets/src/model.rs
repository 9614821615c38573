use bouquet_common::Aabb;

/// Surface parameters of one primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".into(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 1.0,
        }
    }
}

impl Material {
    /// Emissive colour scaled by its intensity.
    pub fn emissive_radiance(&self) -> [f32; 3] {
        self.emissive.map(|c| c * self.emissive_intensity)
    }
}

/// Triangle-list geometry with node transforms already applied.
#[derive(Debug, Clone, Default)]
pub struct MeshPrimitive {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub material: Material,
}

impl MeshPrimitive {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A loaded model: every triangle primitive of one glTF scene.
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub name: Option<String>,
    pub primitives: Vec<MeshPrimitive>,
    /// Bounding box of all baked vertex positions.
    pub bounds: Aabb,
}

impl ModelData {
    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|p| p.positions.len()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(MeshPrimitive::triangle_count).sum()
    }

    pub fn materials_mut(&mut self) -> impl Iterator<Item = &mut Material> {
        self.primitives.iter_mut().map(|p| &mut p.material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_sum_over_primitives() {
        let prim = MeshPrimitive {
            positions: vec![[0.0; 3]; 4],
            normals: vec![[0.0, 1.0, 0.0]; 4],
            indices: vec![0, 1, 2, 2, 3, 0],
            material: Material::default(),
        };
        let model = ModelData {
            name: None,
            primitives: vec![prim.clone(), prim],
            bounds: Default::default(),
        };
        assert_eq!(model.vertex_count(), 8);
        assert_eq!(model.triangle_count(), 4);
    }

    #[test]
    fn emissive_radiance_scales_colour() {
        let m = Material {
            emissive: [1.0, 0.5, 0.0],
            emissive_intensity: 0.5,
            ..Material::default()
        };
        assert_eq!(m.emissive_radiance(), [0.5, 0.25, 0.0]);
    }
}
