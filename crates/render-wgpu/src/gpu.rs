use crate::shaders;
use bouquet_assets::MeshPrimitive;
use bouquet_scene::{GlowTexture, ModelNode, Viewer};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// `src * src.a + dst` on both colour and alpha.
pub(crate) const ADDITIVE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    /// Direction the key light travels, w unused.
    pub light_dir: [f32; 4],
    pub light_color: [f32; 4],
}

impl SceneUniforms {
    pub fn from_viewer(viewer: &Viewer) -> Self {
        let lights = viewer.lights();
        let ambient = lights.ambient.color.map(|c| c * lights.ambient.intensity);
        let key = lights.key.color.map(|c| c * lights.key.intensity);
        let dir = lights.key.direction();
        Self {
            view_proj: viewer.camera().view_projection().to_cols_array_2d(),
            ambient: [ambient[0], ambient[1], ambient[2], 1.0],
            light_dir: [dir.x, dir.y, dir.z, 0.0],
            light_color: [key[0], key[1], key[2], 1.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
}

impl ObjectUniforms {
    pub fn from_matrix(model: Mat4) -> Self {
        let normal = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            model
        };
        Self {
            model: model.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct MaterialUniforms {
    pub base_color: [f32; 4],
    pub emissive: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct GlowUniforms {
    pub model: [[f32; 4]; 4],
    /// Texture tint; alpha carries the pulse opacity.
    pub tint: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// Unit quad in the XY plane facing +Z, centred on the origin.
#[rustfmt::skip]
pub(crate) const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-0.5, -0.5], uv: [0.0, 1.0] },
    QuadVertex { position: [ 0.5, -0.5], uv: [1.0, 1.0] },
    QuadVertex { position: [ 0.5,  0.5], uv: [1.0, 0.0] },
    QuadVertex { position: [-0.5,  0.5], uv: [0.0, 0.0] },
];

pub(crate) const QUAD_INDICES: &[u16] = &[0, 1, 2, 2, 3, 0];

/// Interleave positions and normals. Missing normals default to +Y.
pub(crate) fn interleave(prim: &MeshPrimitive) -> Vec<Vertex> {
    prim.positions
        .iter()
        .enumerate()
        .map(|(i, p)| Vertex {
            position: *p,
            normal: prim.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
        })
        .collect()
}

struct GpuPrimitive {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    material_bind_group: wgpu::BindGroup,
}

struct GpuGlow {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// wgpu-based viewer renderer.
pub struct WgpuRenderer {
    model_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    material_layout: wgpu::BindGroupLayout,
    glow_layout: wgpu::BindGroupLayout,
    quad_vertex_buffer: wgpu::Buffer,
    quad_index_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
    primitives: Vec<GpuPrimitive>,
    glow: Option<GpuGlow>,
    uploaded: bool,
    depth_texture: wgpu::TextureView,
}

fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let scene_layout = uniform_layout(
            device,
            "scene_bind_group_layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let object_layout =
            uniform_layout(device, "object_bind_group_layout", wgpu::ShaderStages::VERTEX);
        let material_layout = uniform_layout(
            device,
            "material_bind_group_layout",
            wgpu::ShaderStages::FRAGMENT,
        );
        let glow_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glow_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        // Scene and object uniforms
        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_uniform_buffer"),
            contents: bytemuck::bytes_of(&SceneUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });
        let object_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("object_uniform_buffer"),
            contents: bytemuck::bytes_of(&ObjectUniforms::from_matrix(Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bind_group"),
            layout: &object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_buffer.as_entire_binding(),
            }],
        });

        // Model pipeline
        let model_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("model_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MODEL_SHADER.into()),
        });
        let model_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("model_pipeline_layout"),
                bind_group_layouts: &[&scene_layout, &object_layout, &material_layout],
                push_constant_ranges: &[],
            });
        let model_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("model_pipeline"),
            layout: Some(&model_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &model_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &model_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Petals are thin single-sided sheets.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Glow pipeline
        let glow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glow_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::GLOW_SHADER.into()),
        });
        let glow_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glow_pipeline_layout"),
            bind_group_layouts: &[&scene_layout, &glow_layout],
            push_constant_ranges: &[],
        });
        let glow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glow_pipeline"),
            layout: Some(&glow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &glow_shader,
                entry_point: Some("vs_glow"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x2,
                        1 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &glow_shader,
                entry_point: Some("fs_glow"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(ADDITIVE_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // Tested against the model, never written.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Glow quad mesh
        let quad_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glow_quad_vertex_buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glow_quad_index_buffer"),
            contents: bytemuck::cast_slice(QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            model_pipeline,
            glow_pipeline,
            scene_buffer,
            scene_bind_group,
            object_buffer,
            object_bind_group,
            material_layout,
            glow_layout,
            quad_vertex_buffer,
            quad_index_buffer,
            sampler,
            primitives: Vec::new(),
            glow: None,
            uploaded: false,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Upload the viewer's model and glow the first time they appear.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, viewer: &Viewer) {
        if self.uploaded {
            return;
        }
        let Some(node) = viewer.model() else {
            return;
        };
        self.upload_model(device, queue, node);
        self.uploaded = true;
    }

    fn upload_model(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, node: &ModelNode) {
        for (i, prim) in node.model.primitives.iter().enumerate() {
            let vertices = interleave(prim);
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("model_vertex_buffer_{i}")),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("model_index_buffer_{i}")),
                contents: bytemuck::cast_slice(&prim.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            let m = &prim.material;
            let emissive = m.emissive_radiance();
            let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("material_uniform_buffer_{i}")),
                contents: bytemuck::bytes_of(&MaterialUniforms {
                    base_color: m.base_color,
                    emissive: [emissive[0], emissive[1], emissive[2], 0.0],
                }),
                usage: wgpu::BufferUsages::UNIFORM,
            });
            let material_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("material_bind_group_{i}")),
                layout: &self.material_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: material_buffer.as_entire_binding(),
                }],
            });
            self.primitives.push(GpuPrimitive {
                vertex_buffer,
                index_buffer,
                index_count: prim.indices.len() as u32,
                material_bind_group,
            });
        }

        if let Some(glow) = &node.glow {
            self.glow = Some(self.upload_glow(device, queue, &glow.texture));
        }

        tracing::info!(
            primitives = self.primitives.len(),
            glow = self.glow.is_some(),
            "model uploaded to GPU"
        );
    }

    fn upload_glow(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture: &GlowTexture,
    ) -> GpuGlow {
        let gpu_texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("glow_texture"),
                size: wgpu::Extent3d {
                    width: texture.size,
                    height: texture.size,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &texture.pixels,
        );
        let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glow_uniform_buffer"),
            contents: bytemuck::bytes_of(&GlowUniforms {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                tint: [1.0, 1.0, 1.0, 0.0],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glow_bind_group"),
            layout: &self.glow_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        GpuGlow {
            uniform_buffer,
            bind_group,
        }
    }

    /// Render one frame: the model (if loaded), then the glow over it.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        viewer: &Viewer,
    ) {
        queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::from_viewer(viewer)),
        );

        let node = viewer.model().filter(|_| self.uploaded);
        if let Some(node) = node {
            queue.write_buffer(
                &self.object_buffer,
                0,
                bytemuck::bytes_of(&ObjectUniforms::from_matrix(node.matrix())),
            );
            if let (Some(gpu_glow), Some(glow), Some(matrix)) =
                (&self.glow, &node.glow, node.glow_matrix())
            {
                queue.write_buffer(
                    &gpu_glow.uniform_buffer,
                    0,
                    bytemuck::bytes_of(&GlowUniforms {
                        model: matrix.to_cols_array_2d(),
                        tint: [1.0, 1.0, 1.0, glow.opacity],
                    }),
                );
            }
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Transparent: whatever sits behind the window shows through.
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if node.is_some() {
                pass.set_pipeline(&self.model_pipeline);
                pass.set_bind_group(0, &self.scene_bind_group, &[]);
                pass.set_bind_group(1, &self.object_bind_group, &[]);
                for prim in &self.primitives {
                    pass.set_bind_group(2, &prim.material_bind_group, &[]);
                    pass.set_vertex_buffer(0, prim.vertex_buffer.slice(..));
                    pass.set_index_buffer(prim.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..prim.index_count, 0, 0..1);
                }

                if let Some(gpu_glow) = &self.glow {
                    pass.set_pipeline(&self.glow_pipeline);
                    pass.set_bind_group(0, &self.scene_bind_group, &[]);
                    pass.set_bind_group(1, &gpu_glow.bind_group, &[]);
                    pass.set_vertex_buffer(0, self.quad_vertex_buffer.slice(..));
                    pass.set_index_buffer(
                        self.quad_index_buffer.slice(..),
                        wgpu::IndexFormat::Uint16,
                    );
                    pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bouquet_assets::{LoadOutcome, Material, ModelData};
    use bouquet_common::Aabb;
    use bouquet_scene::ViewerConfig;
    use glam::{Quat, Vec3};

    #[test]
    fn uniform_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 112);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 128);
        assert_eq!(std::mem::size_of::<MaterialUniforms>(), 32);
        assert_eq!(std::mem::size_of::<GlowUniforms>(), 80);
    }

    #[test]
    fn vertex_layouts_match_attribute_formats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(std::mem::size_of::<QuadVertex>(), 16);
    }

    #[test]
    fn quad_is_unit_square_facing_plus_z() {
        assert_eq!(QUAD_VERTICES.len(), 4);
        assert_eq!(QUAD_INDICES.len(), 6);
        let p = |i: u16| {
            let v = QUAD_VERTICES[i as usize].position;
            Vec3::new(v[0], v[1], 0.0)
        };
        for tri in QUAD_INDICES.chunks(3) {
            let n = (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]));
            assert!(n.z > 0.0);
        }
        let xs: Vec<f32> = QUAD_VERTICES.iter().map(|v| v.position[0]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 0.5);
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -0.5);
    }

    #[test]
    fn additive_blending_adds_alpha_weighted_source() {
        assert_eq!(ADDITIVE_BLENDING.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(ADDITIVE_BLENDING.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(ADDITIVE_BLENDING.color.operation, wgpu::BlendOperation::Add);
    }

    #[test]
    fn scene_uniforms_carry_lights_and_camera() {
        let viewer = bouquet_scene::Viewer::new(ViewerConfig::default(), 640.0, 480.0, 1.0);
        let u = SceneUniforms::from_viewer(&viewer);
        assert_eq!(u.ambient, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(u.light_color, [2.0, 2.0, 2.0, 1.0]);
        let dir = Vec3::new(u.light_dir[0], u.light_dir[1], u.light_dir[2]);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.y < 0.0);
        assert_eq!(
            u.view_proj,
            viewer.camera().view_projection().to_cols_array_2d()
        );
    }

    #[test]
    fn object_normal_matrix_is_rotation_for_rigid_transforms() {
        let model = Mat4::from_rotation_translation(Quat::from_rotation_y(0.7), Vec3::X);
        let u = ObjectUniforms::from_matrix(model);
        let normal = Mat4::from_cols_array_2d(&u.normal);
        let n = normal.transform_vector3(Vec3::Z);
        let expected = Quat::from_rotation_y(0.7) * Vec3::Z;
        assert!((n - expected).length() < 1e-5);
    }

    #[test]
    fn interleave_pads_missing_normals() {
        let prim = MeshPrimitive {
            positions: vec![[0.0; 3], [1.0, 0.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]],
            indices: vec![],
            material: Material::default(),
        };
        let v = interleave(&prim);
        assert_eq!(v[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(v[1].normal, [0.0, 1.0, 0.0]);
        assert_eq!(v[1].position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn loaded_viewer_feeds_glow_matrix() {
        let mut viewer = bouquet_scene::Viewer::new(ViewerConfig::default(), 640.0, 480.0, 1.0);
        viewer.on_load(LoadOutcome::Loaded(ModelData {
            name: None,
            primitives: vec![MeshPrimitive {
                positions: vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                normals: vec![],
                indices: vec![0, 1, 2],
                material: Material::default(),
            }],
            bounds: Aabb::new(Vec3::ZERO, Vec3::ONE),
        }));
        viewer.tick();
        let node = viewer.model().unwrap();
        let m = node.glow_matrix().unwrap();
        // Quad corners span the glow edge length.
        let a = m.transform_point3(Vec3::new(-0.5, 0.0, 0.0));
        let b = m.transform_point3(Vec3::new(0.5, 0.0, 0.0));
        assert!(((b - a).length() - 1.3).abs() < 1e-4);
    }
}
