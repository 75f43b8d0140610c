use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::{Mat4, Vec3};
use prism_core::{Camera, ModelTransform};
use prism_input::Action;
use prism_render_wgpu::{GpuContext, MeshId, WgpuRenderer};
use prism_scene::{Light, Material, MeshData};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "prism-desktop", about = "Interactive 3D color demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Window width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "640")]
    height: u32,

    /// Vertical field of view in degrees
    #[arg(long, default_value = "60.0")]
    fov: f32,

    /// Points around each cylinder ring
    #[arg(long, default_value = "6")]
    slices: u16,

    /// Cylinder layers along its axis
    #[arg(long, default_value = "2")]
    stacks: u16,
}

const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 5.0);

/// Units per second for slides, degrees per second for turns.
const MOVE_SPEED: f32 = 4.0;
const TURN_SPEED: f32 = 60.0;

/// Degrees added to the scene rotation each frame.
const ROTATION_STEP: f32 = 1.0;

#[rustfmt::skip]
const CUBE_COLORS: [[f32; 4]; 8] = [
    [1.0, 0.0, 0.0, 1.0], // left, bottom, front
    [0.0, 1.0, 0.0, 1.0], // left, bottom, back
    [0.0, 0.0, 1.0, 1.0], // left, top, front
    [1.0, 1.0, 1.0, 1.0], // left, top, back
    [1.0, 1.0, 0.0, 1.0], // right, bottom, front
    [0.0, 1.0, 1.0, 1.0], // right, bottom, back
    [1.0, 0.0, 1.0, 1.0], // right, top, front
    [0.2, 0.2, 0.2, 1.0], // right, top, back
];

#[rustfmt::skip]
const ALT_CUBE_COLORS: [[f32; 4]; 8] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
];

fn scene_lights() -> Vec<Light> {
    vec![
        // Key light: a local point light above and in front of the scene.
        Light {
            is_local: true,
            position: Vec3::new(4.0, 4.0, 4.0),
            ambient: Vec3::splat(0.05),
            linear_attenuation: 0.05,
            quadratic_attenuation: 0.005,
            specular_strength: 0.8,
            ..Light::default()
        },
        // Dim directional fill so back faces are never pitch black.
        Light {
            position: Vec3::new(-0.3, 1.0, 0.5),
            color: Vec3::splat(0.35),
            ambient: Vec3::splat(0.05),
            ..Light::default()
        },
    ]
}

/// Held-key bindings: applied every frame, scaled by speed and frame time.
fn held_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyW => Some(Action::FORWARD),
        KeyCode::KeyS => Some(Action::BACKWARD),
        KeyCode::KeyA => Some(Action::STRAFE_LEFT),
        KeyCode::KeyD => Some(Action::STRAFE_RIGHT),
        KeyCode::KeyQ => Some(Action::YAW_LEFT),
        KeyCode::KeyE => Some(Action::YAW_RIGHT),
        KeyCode::KeyZ => Some(Action::PITCH_UP),
        KeyCode::KeyX => Some(Action::PITCH_DOWN),
        _ => None,
    }
}

/// Edge-triggered bindings: applied once per key press.
fn pressed_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyR => Some(Action::ResetPosition),
        KeyCode::KeyT => Some(Action::ResetAngles),
        KeyCode::F1 => Some(Action::ToggleHud),
        KeyCode::Escape => Some(Action::Quit),
        _ => None,
    }
}

/// Handles for the three uploaded scene meshes.
struct SceneMeshes {
    cube: MeshId,
    alt_cube: MeshId,
    cylinder: MeshId,
}

/// Application state: camera, animation counter, input tracking.
struct AppState {
    camera: Camera,
    lights: Vec<Light>,
    rotation: f32,
    hud_visible: bool,
    keys_held: std::collections::HashSet<KeyCode>,
    last_frame: Instant,
}

impl AppState {
    fn new(fov: f32, aspect: f32) -> Self {
        let mut camera = Camera::new(fov, aspect);
        camera.set_eye(CAMERA_START);
        Self {
            camera,
            lights: scene_lights(),
            rotation: 0.0,
            hud_visible: true,
            keys_held: std::collections::HashSet::new(),
            last_frame: Instant::now(),
        }
    }

    fn apply_action(&mut self, action: Action, dt: f32) {
        match action {
            Action::Slide(step) => {
                let step = step * MOVE_SPEED * dt;
                self.camera.slide(step.x, step.y, step.z);
            }
            Action::Yaw(degrees) => self.camera.rotate_yaw(degrees * TURN_SPEED * dt),
            Action::Pitch(degrees) => self.camera.rotate_pitch(degrees * TURN_SPEED * dt),
            Action::ResetPosition => self.camera.set_eye(CAMERA_START),
            Action::ResetAngles => self.camera.set_angles(0.0, 0.0),
            Action::ToggleHud => self.hud_visible = !self.hud_visible,
            // Quit is handled by the event loop, not the state.
            Action::Quit => {}
        }
    }

    /// Advance one frame: process held keys, then step the scene rotation.
    fn update(&mut self, dt: f32) {
        let held: Vec<Action> = self
            .keys_held
            .iter()
            .filter_map(|&key| held_action(key))
            .collect();
        for action in held {
            self.apply_action(action, dt);
        }

        self.rotation = (self.rotation + ROTATION_STEP).rem_euclid(360.0);
    }

    /// Model matrices for this frame. Operations compose outward: the spin
    /// is applied first so each cube rotates in place before moving out.
    fn scene_draws(&self, meshes: &SceneMeshes) -> [(MeshId, Mat4); 3] {
        let mut left_cube = ModelTransform::new();
        left_cube.rotate_z(self.rotation).translate(-3.0, 0.0, 0.0);

        let mut right_cube = ModelTransform::new();
        right_cube.rotate_z(-self.rotation).translate(3.0, 0.0, 0.0);

        let mut cylinder = ModelTransform::new();
        cylinder
            .rotate_x(-90.0)
            .scale(1.0, 2.0, 1.0)
            .translate(0.0, -1.0, 0.0);

        [
            (meshes.cube, left_cube.matrix()),
            (meshes.alt_cube, right_cube.matrix()),
            (meshes.cylinder, cylinder.matrix()),
        ]
    }

    fn draw_hud(&self, ctx: &EguiContext) {
        if !self.hud_visible {
            return;
        }

        let eye = self.camera.eye();
        egui::Window::new("Camera")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.label(format!("eye: ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z));
                ui.label(format!(
                    "yaw: {:.1}\u{00b0}  pitch: {:.1}\u{00b0}",
                    self.camera.yaw(),
                    self.camera.pitch()
                ));
                ui.separator();
                ui.small("WASD: move | Q/E: yaw | Z/X: pitch");
                ui.small("R: reset position | T: reset angles");
                ui.small("F1: toggle overlay | Esc: quit");
            });
    }
}

struct GpuApp {
    cli: Cli,
    state: Option<AppState>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<WgpuRenderer>,
    meshes: Option<SceneMeshes>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            state: None,
            window: None,
            gpu: None,
            renderer: None,
            meshes: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn redraw(&mut self) {
        let (Some(state), Some(gpu), Some(renderer), Some(meshes), Some(window)) = (
            self.state.as_mut(),
            self.gpu.as_ref(),
            self.renderer.as_ref(),
            self.meshes.as_ref(),
            self.window.as_ref(),
        ) else {
            return;
        };

        let now = Instant::now();
        let dt = (now - state.last_frame).as_secs_f32().min(0.1);
        state.last_frame = now;
        state.update(dt);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            &state.camera,
            &state.lights,
            &state.scene_draws(meshes),
        );

        // Overlay pass.
        let raw_input = self.egui_winit.as_mut().unwrap().take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            state.draw_hud(ctx);
        });

        self.egui_winit
            .as_mut()
            .unwrap()
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        {
            let egui_renderer = self.egui_renderer.as_mut().unwrap();
            for (id, image_delta) in &full_output.textures_delta.set {
                egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
            }
            let mut encoder = gpu
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("egui_encoder"),
                });
            egui_renderer.update_buffers(
                &gpu.device,
                &gpu.queue,
                &mut encoder,
                &paint_jobs,
                &screen_descriptor,
            );
            {
                let mut pass = encoder
                    .begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("egui_pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    })
                    .forget_lifetime();
                egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
            }
            gpu.queue.submit(std::iter::once(encoder.finish()));
            for id in &full_output.textures_delta.free {
                egui_renderer.free_texture(id);
            }
        }

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Prism")
            .with_inner_size(PhysicalSize::new(self.cli.width, self.cli.height));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let size = window.inner_size();
        let gpu = match GpuContext::new(window.clone(), size.width, size.height) {
            Ok(gpu) => gpu,
            Err(e) => {
                tracing::error!("GPU setup failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut renderer =
            WgpuRenderer::new(&gpu.device, gpu.config.format, size.width, size.height);

        let shiny = Material {
            specular: Vec3::splat(0.8),
            shininess: 32.0,
            ..Material::default()
        };
        let dull = Material {
            specular: Vec3::splat(0.2),
            shininess: 8.0,
            ..Material::default()
        };
        let meshes = SceneMeshes {
            cube: renderer.upload_mesh(&gpu.device, &MeshData::cube(CUBE_COLORS), &shiny),
            alt_cube: renderer.upload_mesh(&gpu.device, &MeshData::cube(ALT_CUBE_COLORS), &shiny),
            cylinder: renderer.upload_mesh(
                &gpu.device,
                &MeshData::cylinder(self.cli.slices, self.cli.stacks),
                &dull,
            ),
        };

        let aspect = size.width as f32 / size.height.max(1) as f32;
        let state = AppState::new(self.cli.fov, aspect);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.meshes = Some(meshes);
        self.state = Some(state);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!("scene ready: 2 cubes, 1 cylinder, 2 lights");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(gpu), Some(renderer), Some(state)) = (
                    self.gpu.as_mut(),
                    self.renderer.as_mut(),
                    self.state.as_mut(),
                ) {
                    gpu.resize(new_size.width, new_size.height);
                    renderer.resize(&gpu.device, gpu.config.width, gpu.config.height);
                    state
                        .camera
                        .set_aspect(gpu.config.width as f32 / gpu.config.height.max(1) as f32);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                let Some(state) = self.state.as_mut() else {
                    return;
                };
                let pressed = key_state == ElementState::Pressed;
                let newly_pressed = pressed && !state.keys_held.contains(&key);
                if pressed {
                    state.keys_held.insert(key);
                } else {
                    state.keys_held.remove(&key);
                }

                if newly_pressed {
                    match pressed_action(key) {
                        Some(Action::Quit) => event_loop.exit(),
                        Some(action) => state.apply_action(action, 0.0),
                        None => {}
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("prism-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}
