/// Shared uniform block and hemisphere lighting, prepended to every shader
/// that lights geometry.
const COMMON: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    // rgb, w = intensity
    sky_light: vec4<f32>,
    ground_light: vec4<f32>,
    terrain_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

fn hemisphere(normal: vec3<f32>) -> vec3<f32> {
    let w = 0.5 * dot(normalize(normal), vec3<f32>(0.0, 1.0, 0.0)) + 0.5;
    return mix(uniforms.ground_light.rgb, uniforms.sky_light.rgb, w) * uniforms.sky_light.w;
}
"#;

/// Textured, instanced block cubes. The same module serves the opaque and
/// the translucent pipeline.
const BLOCK: &str = r#"
@group(1) @binding(0)
var block_textures: texture_2d_array<f32>;
@group(1) @binding(1)
var block_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
    @location(3) face: u32,
};

struct InstanceInput {
    @location(4) translation: vec3<f32>,
    @location(5) opacity: f32,
    @location(6) layers_a: vec4<u32>,
    @location(7) layers_b: vec2<u32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) @interpolate(flat) layer: u32,
    @location(3) opacity: f32,
};

@vertex
fn vs_block(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    var layers = array<u32, 6>(
        instance.layers_a.x,
        instance.layers_a.y,
        instance.layers_a.z,
        instance.layers_a.w,
        instance.layers_b.x,
        instance.layers_b.y,
    );
    let world_pos = vertex.position + instance.translation;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(world_pos, 1.0);
    out.normal = vertex.normal;
    out.uv = vertex.uv;
    out.layer = layers[vertex.face];
    out.opacity = instance.opacity;
    return out;
}

@fragment
fn fs_block(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(block_textures, block_sampler, in.uv, in.layer);
    return vec4<f32>(texel.rgb * hemisphere(in.normal), texel.a * in.opacity);
}
"#;

const TERRAIN: &str = r#"
struct TerrainInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct TerrainOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
};

@vertex
fn vs_terrain(vertex: TerrainInput) -> TerrainOutput {
    var out: TerrainOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.normal = vertex.normal;
    return out;
}

@fragment
fn fs_terrain(in: TerrainOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.terrain_color.rgb * hemisphere(in.normal), 1.0);
}
"#;

/// Unlit coloured lines, used for the preview outline.
pub const LINE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct LineVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_line(vertex: LineVertex) -> LineOutput {
    var out: LineOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

pub fn block_shader() -> String {
    format!("{COMMON}{BLOCK}")
}

pub fn terrain_shader() -> String {
    format!("{COMMON}{TERRAIN}")
}
