use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use prism_core::Camera;
use prism_scene::{Light, Material, MeshData, PRIMITIVE_RESTART};
use wgpu::util::DeviceExt;

/// Number of light slots in the shader's uniform block. Kept in sync with
/// the `array<Light, 2>` declaration in the WGSL source.
pub const MAX_LIGHTS: usize = 2;

// Clip-space correction: the camera produces GL-style NDC depth in [-1, 1],
// wgpu clips depth to [0, 1]. Applied to the projection at upload time.
const DEPTH_RANGE_REMAP: Mat4 = Mat4::from_cols(
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 1.0),
);

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
    color: [f32; 4],
}

// Mirrors the WGSL `Light` struct; scalar fields ride in the vec3 padding
// slots, and the tail pad rounds the size to the uniform array stride.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LightRaw {
    position: [f32; 3],
    is_enabled: u32,
    ambient: [f32; 3],
    is_local: u32,
    color: [f32; 3],
    is_spot: u32,
    cone_direction: [f32; 3],
    spot_cos_cutoff: f32,
    spot_exponent: f32,
    constant_attenuation: f32,
    linear_attenuation: f32,
    quadratic_attenuation: f32,
    specular_strength: f32,
    _pad: [f32; 3],
}

impl LightRaw {
    fn from_light(light: &Light) -> Self {
        Self {
            position: light.position.to_array(),
            is_enabled: u32::from(light.enabled),
            ambient: light.ambient.to_array(),
            is_local: u32::from(light.is_local),
            color: light.color.to_array(),
            is_spot: u32::from(light.is_spot),
            cone_direction: light.cone_direction.to_array(),
            spot_cos_cutoff: light.spot_cos_cutoff,
            spot_exponent: light.spot_exponent,
            constant_attenuation: light.constant_attenuation,
            linear_attenuation: light.linear_attenuation,
            quadratic_attenuation: light.quadratic_attenuation,
            specular_strength: light.specular_strength,
            _pad: [0.0; 3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct GlobalsRaw {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    eye: [f32; 3],
    light_count: u32,
    lights: [LightRaw; MAX_LIGHTS],
}

// Per-object block: model matrix plus the material, with shininess packed
// into the w component of the specular color.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct ObjectRaw {
    model: [[f32; 4]; 4],
    emission: [f32; 4],
    ambient: [f32; 4],
    diffuse: [f32; 4],
    specular_shininess: [f32; 4],
}

impl ObjectRaw {
    fn new(model: Mat4, material: &Material) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            emission: material.emission.extend(0.0).to_array(),
            ambient: material.ambient.extend(0.0).to_array(),
            diffuse: material.diffuse.extend(0.0).to_array(),
            specular_shininess: material.specular.extend(material.shininess).to_array(),
        }
    }
}

/// Handle to a mesh uploaded with [`WgpuRenderer::upload_mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshId(usize);

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    material: Material,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
}

/// Renders uploaded strip meshes with Phong lighting.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    meshes: Vec<GpuMesh>,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&GlobalsRaw::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("phong_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::PHONG_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                // With a strip index format set, PRIMITIVE_RESTART (0xFFFF)
                // terminates one strip and begins another mid-buffer.
                strip_index_format: Some(wgpu::IndexFormat::Uint16),
                // Strips alternate winding; nothing to cull.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            globals_buffer,
            globals_bind_group,
            object_layout,
            meshes: Vec::new(),
            depth_texture,
        }
    }

    /// Upload mesh geometry and its material once; returns a handle for
    /// draw calls. Buffers and bind groups are created here, never per
    /// frame.
    pub fn upload_mesh(
        &mut self,
        device: &wgpu::Device,
        mesh: &MeshData,
        material: &Material,
    ) -> MeshId {
        debug_assert_eq!(mesh.positions.len(), mesh.normals.len());
        debug_assert_eq!(mesh.positions.len(), mesh.colors.len());
        debug_assert!(mesh
            .indices
            .iter()
            .all(|&i| i == PRIMITIVE_RESTART || usize::from(i) < mesh.vertex_count()));

        let vertices: Vec<Vertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .zip(&mesh.colors)
            .map(|((position, normal), color)| Vertex {
                position: *position,
                normal: *normal,
                color: *color,
            })
            .collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let object_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("object_buffer"),
            contents: bytemuck::bytes_of(&ObjectRaw::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bind_group"),
            layout: &self.object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_buffer.as_entire_binding(),
            }],
        });

        self.meshes.push(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            material: *material,
            object_buffer,
            object_bind_group,
        });
        MeshId(self.meshes.len() - 1)
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame: upload globals and per-object uniforms, then issue
    /// one indexed draw per `(mesh, model matrix)` pair.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        camera: &Camera,
        lights: &[Light],
        draws: &[(MeshId, Mat4)],
    ) {
        if lights.len() > MAX_LIGHTS {
            tracing::warn!(
                "scene has {} lights, only the first {MAX_LIGHTS} are uploaded",
                lights.len()
            );
        }
        let mut lights_raw = [LightRaw::zeroed(); MAX_LIGHTS];
        for (slot, light) in lights_raw.iter_mut().zip(lights) {
            *slot = LightRaw::from_light(light);
        }

        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&GlobalsRaw {
                view: camera.view_matrix().to_cols_array_2d(),
                proj: (DEPTH_RANGE_REMAP * camera.projection_matrix()).to_cols_array_2d(),
                eye: camera.eye().to_array(),
                light_count: lights.len().min(MAX_LIGHTS) as u32,
                lights: lights_raw,
            }),
        );

        for (id, model) in draws {
            let mesh = &self.meshes[id.0];
            queue.write_buffer(
                &mesh.object_buffer,
                0,
                bytemuck::bytes_of(&ObjectRaw::new(*model, &mesh.material)),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
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

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (id, _) in draws {
                let mesh = &self.meshes[id.0];
                pass.set_bind_group(1, &mesh.object_bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
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
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn raw_layouts_match_wgsl() {
        // These must agree with the struct declarations in shaders.rs;
        // uniform array elements need a 16-byte stride.
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
        assert_eq!(std::mem::size_of::<LightRaw>(), 96);
        assert_eq!(std::mem::size_of::<GlobalsRaw>(), 128 + 16 + 96 * MAX_LIGHTS);
        assert_eq!(std::mem::size_of::<ObjectRaw>(), 128);
    }

    #[test]
    fn depth_remap_moves_gl_clip_into_wgpu_range() {
        let camera = Camera::new(60.0, 1.0);
        let proj = DEPTH_RANGE_REMAP * camera.projection_matrix();
        // Near plane lands at 0 instead of -1, far plane stays at 1.
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -0.1));
        assert!(near.z.abs() < 1e-4, "near plane at z {}", near.z);
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -1000.0));
        assert!((far.z - 1.0).abs() < 1e-3, "far plane at z {}", far.z);
    }

    #[test]
    fn light_raw_carries_flags_and_fields() {
        let light = Light {
            is_local: true,
            position: Vec3::new(1.0, 2.0, 3.0),
            specular_strength: 0.5,
            ..Light::default()
        };
        let raw = LightRaw::from_light(&light);
        assert_eq!(raw.is_enabled, 1);
        assert_eq!(raw.is_local, 1);
        assert_eq!(raw.is_spot, 0);
        assert_eq!(raw.position, [1.0, 2.0, 3.0]);
        assert_eq!(raw.specular_strength, 0.5);
        assert_eq!(raw.constant_attenuation, 1.0);
    }

    #[test]
    fn object_raw_packs_shininess_with_specular() {
        let material = Material {
            specular: Vec3::new(0.9, 0.8, 0.7),
            shininess: 32.0,
            ..Material::default()
        };
        let raw = ObjectRaw::new(Mat4::IDENTITY, &material);
        assert_eq!(raw.specular_shininess, [0.9, 0.8, 0.7, 32.0]);
        assert_eq!(raw.model, Mat4::IDENTITY.to_cols_array_2d());
    }
}
