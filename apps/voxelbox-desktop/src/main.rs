mod overlay;
mod platform;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use egui::Context as EguiContext;
use glam::Vec2;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use voxelbox_assets::TextureLibrary;
use voxelbox_input::{DeviceClass, InputEvent};
use voxelbox_persist::{FileKvStore, WorldStore};
use voxelbox_render_wgpu::WgpuRenderer;
use voxelbox_session::{PlatformRequest, Session};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

/// Longest frame step fed to the session, in seconds.
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layout {
    /// Pick from the window width and platform.
    Auto,
    /// Pointer-lock mouse look.
    Desktop,
    /// On-screen joystick and radial block menu.
    Touch,
}

#[derive(Parser)]
#[command(name = "voxelbox-desktop", about = "Place and remove blocks on a small rippled field")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// World data directory
    #[arg(long, default_value = "./world_data")]
    data_dir: PathBuf,

    /// Directory holding the block textures
    #[arg(long, default_value = "./textures")]
    textures_dir: PathBuf,

    /// Control layout
    #[arg(long, value_enum, default_value_t = Layout::Auto)]
    layout: Layout,
}

impl Layout {
    fn device_class(self, logical_width: f32) -> DeviceClass {
        match self {
            Layout::Auto => DeviceClass::detect(logical_width, DeviceClass::mobile_target()),
            Layout::Desktop => DeviceClass::Desktop,
            Layout::Touch => DeviceClass::Touch,
        }
    }
}

/// Everything that exists only once a window is up.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    layout: Layout,
    textures_dir: PathBuf,
    store: Option<WorldStore<FileKvStore>>,
    session: Option<Session<FileKvStore>>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    last_frame: Instant,
}

impl GpuApp {
    fn new(cli: &Cli, store: WorldStore<FileKvStore>) -> Self {
        Self {
            layout: cli.layout,
            textures_dir: cli.textures_dir.clone(),
            store: Some(store),
            session: None,
            gpu: None,
            egui_ctx: EguiContext::default(),
            last_frame: Instant::now(),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("voxelbox")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("voxelbox_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let logical = size.to_logical::<f32>(window.scale_factor());
        let viewport = Vec2::new(logical.width, logical.height);
        let store = self.store.take().context("session already started")?;
        let scheme = self.layout.device_class(viewport.x).scheme(viewport);
        let mut session = Session::new(store, scheme);
        session.resize(viewport.x, viewport.y);

        let textures = TextureLibrary::load(&self.textures_dir);
        let renderer = WgpuRenderer::new(
            &device,
            &queue,
            surface_format,
            config.width,
            config.height,
            textures,
            session.terrain(),
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.session = Some(session);
        self.gpu = Some(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        });
        self.last_frame = Instant::now();
        Ok(())
    }

    fn redraw(&mut self) {
        let (Some(gpu), Some(session)) = (&mut self.gpu, &mut self.session) else {
            return;
        };

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.last_frame = now;

        let outcome = session.frame(dt);
        for request in outcome.requests {
            match request {
                PlatformRequest::CapturePointer => platform::set_pointer_capture(&gpu.window, true),
                PlatformRequest::ReleasePointer => platform::set_pointer_capture(&gpu.window, false),
            }
        }

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

        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            session.rig(),
            session.world(),
            session.preview(),
        );

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            overlay::draw(ctx, session);
        });

        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
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
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::RedrawRequested = event {
            self.redraw();
            return;
        }

        let (Some(gpu), Some(session)) = (&mut self.gpu, &mut self.session) else {
            return;
        };

        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.config.width = new_size.width.max(1);
                gpu.config.height = new_size.height.max(1);
                gpu.surface.configure(&gpu.device, &gpu.config);
                gpu.renderer
                    .resize(&gpu.device, gpu.config.width, gpu.config.height);
                let logical = new_size.to_logical::<f32>(gpu.window.scale_factor());
                session.resize(logical.width, logical.height);
            }
            WindowEvent::Focused(false) => {
                session.push_input(InputEvent::FocusLost);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                if let Some(input) = platform::key_event(key, state) {
                    session.push_input(input);
                }
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(input) = platform::button_event(button, state) {
                    session.push_input(input);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                session.push_input(platform::wheel_event(delta));
            }
            WindowEvent::Touch(touch) => {
                session.push_input(platform::touch_event(&touch, gpu.window.scale_factor()));
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let (DeviceEvent::MouseMotion { delta }, Some(session)) = (event, &mut self.session) {
            session.push_input(InputEvent::PointerMotion {
                dx: delta.0 as f32,
                dy: delta.1 as f32,
            });
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("voxelbox-desktop starting");

    let kv = FileKvStore::open(&cli.data_dir)
        .with_context(|| format!("open data directory {}", cli.data_dir.display()))?;
    let store = WorldStore::new(kv);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&cli, store);
    event_loop.run_app(&mut app)?;

    Ok(())
}
