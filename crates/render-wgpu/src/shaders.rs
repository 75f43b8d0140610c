/// WGSL shader for strip meshes with multi-light Phong shading.
///
/// The `Light` and `ObjectUniforms` structs mirror `LightRaw` and
/// `ObjectRaw` in `gpu.rs` (WGSL pads the light struct tail implicitly
/// where the Rust side pads explicitly); the light array length mirrors
/// `MAX_LIGHTS`.
pub const PHONG_SHADER: &str = r#"
struct Light {
    position: vec3<f32>,
    is_enabled: u32,
    ambient: vec3<f32>,
    is_local: u32,
    color: vec3<f32>,
    is_spot: u32,
    cone_direction: vec3<f32>,
    spot_cos_cutoff: f32,
    spot_exponent: f32,
    constant_attenuation: f32,
    linear_attenuation: f32,
    quadratic_attenuation: f32,
    specular_strength: f32,
};

struct Globals {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    eye: vec3<f32>,
    light_count: u32,
    lights: array<Light, 2>,
};

struct ObjectUniforms {
    model: mat4x4<f32>,
    emission: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular_shininess: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> object: ObjectUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = object.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = globals.proj * globals.view * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = (object.model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(in.world_normal);
    let view_dir = normalize(globals.eye - in.world_position);

    var scattered = vec3<f32>(0.0);
    var reflected = vec3<f32>(0.0);

    for (var i = 0u; i < globals.light_count; i = i + 1u) {
        let light = globals.lights[i];
        if (light.is_enabled == 0u) {
            continue;
        }

        var light_dir: vec3<f32>;
        var attenuation = 1.0;

        if (light.is_local == 1u) {
            let to_light = light.position - in.world_position;
            let dist = length(to_light);
            light_dir = to_light / dist;
            attenuation = 1.0 / (light.constant_attenuation
                + light.linear_attenuation * dist
                + light.quadratic_attenuation * dist * dist);
            if (light.is_spot == 1u) {
                let spot_cos = dot(-light_dir, normalize(light.cone_direction));
                if (spot_cos < light.spot_cos_cutoff) {
                    attenuation = 0.0;
                } else {
                    attenuation = attenuation * pow(spot_cos, light.spot_exponent);
                }
            }
        } else {
            light_dir = normalize(light.position);
        }

        let diffuse_amount = max(dot(normal, light_dir), 0.0) * attenuation;
        var specular_amount = 0.0;
        if (diffuse_amount > 0.0) {
            let half_vector = normalize(light_dir + view_dir);
            specular_amount = pow(max(dot(normal, half_vector), 0.0), object.specular_shininess.w)
                * attenuation
                * light.specular_strength;
        }

        scattered = scattered
            + light.ambient * object.ambient.rgb
            + light.color * object.diffuse.rgb * diffuse_amount;
        reflected = reflected
            + light.color * object.specular_shininess.rgb * specular_amount;
    }

    let rgb = min(object.emission.rgb + in.color.rgb * scattered + reflected, vec3<f32>(1.0));
    return vec4<f32>(rgb, in.color.a);
}
"#;
