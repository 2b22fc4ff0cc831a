//! WASM entry point - the scene running inside a `<canvas id="canvas">`

use crate::config::SceneConfig;
use crate::frame::Scene;
use crate::input::{direction_for_key, pointer_to_ndc};
use crate::render::{GpuContext, SceneRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::web::EventLoopExtWebSys;
use winit::platform::web::WindowAttributesExtWebSys;
use winit::window::{Window, WindowId};

struct AppState {
    renderer: SceneRenderer,
    scene: Scene,
}

struct App {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    state: Rc<RefCell<Option<AppState>>>,
    init_pending: bool,
}

impl App {
    fn new(config: SceneConfig) -> Self {
        Self {
            config,
            window: None,
            state: Rc::new(RefCell::new(None)),
            init_pending: false,
        }
    }

    fn find_canvas() -> Option<HtmlCanvasElement> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("canvas"))
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_pending {
            return;
        }
        self.init_pending = true;

        let Some(canvas) = Self::find_canvas() else {
            log::error!("Could not find canvas element with id 'canvas'");
            return;
        };

        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let window_attrs = Window::default_attributes()
            .with_canvas(Some(canvas))
            .with_inner_size(PhysicalSize::new(width, height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {err}");
                return;
            }
        };
        self.window = Some(window.clone());

        let state = self.state.clone();
        let config = self.config.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let context = match GpuContext::new(window.clone()).await {
                Ok(context) => context,
                Err(err) => {
                    log::error!("WebGPU initialisation failed: {err:#}");
                    return;
                }
            };

            let size = context.size;
            let mut renderer = SceneRenderer::new(context, config.lighting);
            let mut scene = match Scene::new(&config, &mut renderer) {
                Ok(scene) => scene,
                Err(err) => {
                    log::error!("Invalid scene configuration: {err}");
                    return;
                }
            };
            scene.on_resize(size.width, size.height, &mut renderer);

            *state.borrow_mut() = Some(AppState { renderer, scene });
            window.request_redraw();
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        let mut guard = self.state.borrow_mut();
        let Some(state) = guard.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                state.renderer.resize(size);
                state.scene.on_resize(size.width, size.height, &mut state.renderer);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(direction) = direction_for_key(code) {
                        state.scene.on_direction(direction);
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let size = window.inner_size();
                if let Some(ndc) = pointer_to_ndc(position.x, position.y, size.width, size.height) {
                    state.scene.on_pointer_moved(ndc);
                }
            }

            WindowEvent::RedrawRequested => {
                state.scene.run_frame(&mut state.renderer, window);
                match state.renderer.present() {
                    Ok(()) | Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {}
                    Err(e) => log::warn!("Surface error: {:?}", e),
                }
            }

            _ => {}
        }
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let event_loop = EventLoop::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    event_loop.spawn_app(App::new(SceneConfig::default()));
    Ok(())
}
