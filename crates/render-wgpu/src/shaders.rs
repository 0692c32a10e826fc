/// WGSL shader for the instanced cube grid.
///
/// Each instance carries its own world-view-projection and normal matrix;
/// shading is a half-Lambert term against one directional light.
pub const CUBE_GRID_SHADER: &str = r#"
struct Uniforms {
    light_dir: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) wvp_0: vec4<f32>,
    @location(3) wvp_1: vec4<f32>,
    @location(4) wvp_2: vec4<f32>,
    @location(5) wvp_3: vec4<f32>,
    @location(6) wit_0: vec4<f32>,
    @location(7) wit_1: vec4<f32>,
    @location(8) wit_2: vec4<f32>,
    @location(9) wit_3: vec4<f32>,
    @location(10) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let world_view_projection = mat4x4<f32>(
        instance.wvp_0,
        instance.wvp_1,
        instance.wvp_2,
        instance.wvp_3,
    );
    let world_inverse_transpose = mat4x4<f32>(
        instance.wit_0,
        instance.wit_1,
        instance.wit_2,
        instance.wit_3,
    );

    var out: VertexOutput;
    out.clip_position = world_view_projection * vec4<f32>(vertex.position, 1.0);
    out.normal = (world_inverse_transpose * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let norm = normalize(in.normal);
    let light = dot(uniforms.light_dir.xyz, norm) * 0.5 + 0.5;
    return vec4<f32>(in.color.rgb * light, in.color.a);
}
"#;

/// WGSL shader for the lit pyramid.
///
/// Point light with a spot cone, Blinn specular, and separate colours for
/// front and back faces.
pub const PYRAMID_SHADER: &str = r#"
struct Uniforms {
    world_view_projection: mat4x4<f32>,
    world_inverse_transpose: mat4x4<f32>,
    world: mat4x4<f32>,
    color_front: vec4<f32>,
    color_back: vec4<f32>,
    light_world_position: vec4<f32>,
    view_world_position: vec4<f32>,
    // xyz: direction the light shines, w: shininess
    light_direction: vec4<f32>,
    // x: inner cone cosine, y: outer cone cosine, z: ambient
    spot: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) surface_to_light: vec3<f32>,
    @location(2) surface_to_view: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let position = vec4<f32>(vertex.position, 1.0);
    let surface = (u.world * position).xyz;

    var out: VertexOutput;
    out.clip_position = u.world_view_projection * position;
    out.normal = (u.world_inverse_transpose * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.surface_to_light = u.light_world_position.xyz - surface;
    out.surface_to_view = u.view_world_position.xyz - surface;
    return out;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front_facing: bool) -> @location(0) vec4<f32> {
    var normal = normalize(in.normal);
    if (!front_facing) {
        normal = -normal;
    }
    let to_light = normalize(in.surface_to_light);
    let to_view = normalize(in.surface_to_view);
    let half_vector = normalize(to_light + to_view);

    let inner = u.spot.x;
    let outer = u.spot.y;
    let from_direction = dot(to_light, -u.light_direction.xyz);
    let in_light = select(
        smoothstep(outer, inner, from_direction),
        step(outer, from_direction),
        inner - outer < 0.0001,
    );

    let diffuse = in_light * max(dot(normal, to_light), 0.0);
    var specular = 0.0;
    if (diffuse > 0.0) {
        specular = in_light * pow(max(dot(normal, half_vector), 0.0), u.light_direction.w);
    }

    let base = select(u.color_back, u.color_front, front_facing);
    let lit = base.rgb * (u.spot.z + diffuse) + specular;
    return vec4<f32>(lit, base.a);
}
"#;
