use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use snake_follow::input::{direction_for_key, pointer_to_ndc};
use snake_follow::render::{GpuContext, SceneRenderer};
use snake_follow::{LightingModel, Scene, SceneConfig};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Lighting {
    Flat,
    Phong,
}

impl From<Lighting> for LightingModel {
    fn from(value: Lighting) -> Self {
        match value {
            Lighting::Flat => LightingModel::Flat,
            Lighting::Phong => LightingModel::Phong,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Chain of cubes chasing the mouse across the ground")]
struct Args {
    /// Start from the lit preset (Phong shading, axis clamp, far plane 1000)
    #[arg(long)]
    lit: bool,

    /// Clamp each camera coordinate to ±MAX (defaults to 100 when given bare)
    #[arg(long, value_name = "MAX", num_args = 0..=1, default_missing_value = "100")]
    axis_clamp: Option<f32>,

    #[arg(long, value_enum)]
    lighting: Option<Lighting>,

    #[arg(long)]
    segments: Option<usize>,

    #[arg(long)]
    spacing: Option<f32>,

    /// Head speed in world units per frame
    #[arg(long)]
    speed: Option<f32>,

    #[arg(long)]
    radius: Option<f32>,

    /// Initial camera pitch in radians
    #[arg(long)]
    pitch: Option<f32>,

    #[arg(long)]
    far: Option<f32>,
}

impl Args {
    fn scene_config(&self) -> SceneConfig {
        let mut config = if self.lit {
            SceneConfig::lit()
        } else {
            SceneConfig::default()
        };

        if self.axis_clamp.is_some() {
            config.axis_clamp = self.axis_clamp;
        }
        if let Some(lighting) = self.lighting {
            config.lighting = lighting.into();
        }
        if let Some(segments) = self.segments {
            config.segment_count = segments;
        }
        if let Some(spacing) = self.spacing {
            config.segment_spacing = spacing;
        }
        if let Some(speed) = self.speed {
            config.head_speed = speed;
        }
        if let Some(radius) = self.radius {
            config.camera_radius = radius;
        }
        if let Some(pitch) = self.pitch {
            config.camera_pitch = pitch;
        }
        if let Some(far) = self.far {
            config.far = far;
        }
        config
    }
}

struct Running {
    window: Arc<Window>,
    renderer: SceneRenderer,
    scene: Scene,
}

struct App {
    config: SceneConfig,
    running: Option<Running>,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        Self {
            config,
            running: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let window_attrs = Window::default_attributes()
            .with_title("Snake Follow")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("failed to create window")?,
        );

        let context = pollster::block_on(GpuContext::new(window.clone()))?;
        let size = context.size;
        let mut renderer = SceneRenderer::new(context, self.config.lighting);

        let mut scene = Scene::new(&self.config, &mut renderer)?;
        scene.on_resize(size.width, size.height, &mut renderer);

        window.request_redraw();
        Ok(Running {
            window,
            renderer,
            scene,
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(err) => {
                log::error!("Startup failed: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = &mut self.running else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if code == KeyCode::Escape {
                        event_loop.exit();
                    } else if let Some(direction) = direction_for_key(code) {
                        running.scene.on_direction(direction);
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = running.window.inner_size();
                if let Some(ndc) = pointer_to_ndc(position.x, position.y, size.width, size.height) {
                    running.scene.on_pointer_moved(ndc);
                }
            }
            WindowEvent::Resized(size) => {
                running.renderer.resize(size);
                running
                    .scene
                    .on_resize(size.width, size.height, &mut running.renderer);
            }
            WindowEvent::RedrawRequested => {
                running
                    .scene
                    .run_frame(&mut running.renderer, &mut running.window);

                match running.renderer.present() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::debug!("Surface reconfigured");
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Surface error: {:?}", e),
                }
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Args::parse().scene_config();
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
