/// WGSL shader for the loaded model: Lambert shading from one ambient and one
/// directional light, plus an optional emissive term.
pub const MODEL_SHADER: &str = r#"
const PI: f32 = 3.141592653589793;

struct Scene {
    view_proj: mat4x4<f32>,
    ambient: vec4<f32>,
    light_dir: vec4<f32>,
    light_color: vec4<f32>,
};

struct Object {
    model: mat4x4<f32>,
    normal: mat4x4<f32>,
};

struct Material {
    base_color: vec4<f32>,
    emissive: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: Scene;

@group(1) @binding(0)
var<uniform> object: Object;

@group(2) @binding(0)
var<uniform> material: Material;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = object.model * vec4<f32>(vertex.position, 1.0);
    let world_normal = (object.normal * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = scene.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let to_light = -scene.light_dir.xyz;
    let diffuse = max(dot(n, to_light), 0.0);
    let irradiance = scene.ambient.rgb + scene.light_color.rgb * diffuse;
    let rgb = material.base_color.rgb * irradiance / PI + material.emissive.rgb;
    return vec4<f32>(rgb, material.base_color.a);
}
"#;

/// WGSL shader for the glow quad: textured, tinted, opacity in `tint.a`.
pub const GLOW_SHADER: &str = r#"
struct Scene {
    view_proj: mat4x4<f32>,
    ambient: vec4<f32>,
    light_dir: vec4<f32>,
    light_color: vec4<f32>,
};

struct Glow {
    model: mat4x4<f32>,
    tint: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: Scene;

@group(1) @binding(0)
var<uniform> glow: Glow;

@group(1) @binding(1)
var glow_texture: texture_2d<f32>;

@group(1) @binding(2)
var glow_sampler: sampler;

struct QuadVertex {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
};

struct QuadOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_glow(vertex: QuadVertex) -> QuadOutput {
    var out: QuadOutput;
    out.clip_position = scene.view_proj * glow.model * vec4<f32>(vertex.position, 0.0, 1.0);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_glow(in: QuadOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(glow_texture, glow_sampler, in.uv);
    return vec4<f32>(texel.rgb * glow.tint.rgb, texel.a * glow.tint.a);
}
"#;
