//! Window creation and the per-frame loop via winit.
//!
//! [`AppState`] implements [`ApplicationHandler`]: the window, GPU backend
//! and scene are created on `resumed`, and every `RedrawRequested` runs one
//! frame: input, camera, draw, present, then wait for the next interval.

use std::sync::Arc;

use orrery_config::Config;
use orrery_input::InputState;
use orrery_render::{OrbitCamera, WgpuBackend, init_render_context_blocking};
use orrery_space::Scene;
use tracing::{error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::pacer::FramePacer;

/// Window attributes from the `window` config section.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Everything the frame loop owns.
pub struct AppState {
    pub config: Config,
    pub window: Option<Arc<Window>>,
    pub backend: Option<WgpuBackend>,
    pub scene: Option<Scene>,
    pub camera: OrbitCamera,
    pub input: InputState,
    pub pacer: FramePacer,
    /// First fatal error; the loop exits once this is set.
    pub failure: Option<AppError>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let camera = OrbitCamera::from_config(&config.camera);
        let pacer = FramePacer::new(config.render.target_fps);
        Self {
            config,
            window: None,
            backend: None,
            scene: None,
            camera,
            input: InputState::new(),
            pacer,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        event_loop.exit();
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attributes = window_attributes_from_config(&self.config);
        let window = Arc::new(event_loop.create_window(attributes)?);
        let size = window.inner_size();

        let context = init_render_context_blocking(window.clone(), self.config.render.vsync)?;
        let mut backend = WgpuBackend::new(context, self.config.render.clear_color)?;
        let scene = Scene::build(&self.config.scene, &mut backend)?;

        self.camera.set_aspect_ratio(size.width as f32, size.height as f32);
        if self.config.window.capture_cursor {
            self.input.mouse_mut().set_captured(&window, true);
        }
        info!(
            "Window ready: {}x{}, {} bodies",
            size.width,
            size.height,
            scene.bodies().len()
        );

        self.backend = Some(backend);
        self.scene = Some(scene);
        self.window = Some(window);
        Ok(())
    }

    /// One frame. Returns `false` when the loop should stop.
    fn frame(&mut self) -> Result<bool, AppError> {
        let input = self.input.poll();
        if input.quit {
            return Ok(false);
        }
        self.camera.update(input.pointer_delta, input.zoom_delta);

        let (Some(backend), Some(scene)) = (&mut self.backend, &mut self.scene) else {
            return Ok(true);
        };
        scene.render(backend, &self.camera)?;
        scene.tick();

        match backend.render_frame() {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => warn!("{e}, skipping frame"),
            Err(e) => return Err(e.into()),
        }

        self.pacer.wait();
        Ok(true)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect_ratio(width as f32, height as f32);
        if let Some(backend) = &mut self.backend {
            backend.resize(width, height);
        }
        info!("Window resized to {width}x{height}");
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            self.fail(event_loop, e);
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.input.on_window_event(&event);
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => match self.frame() {
                Ok(true) => {
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
                Ok(false) => event_loop.exit(),
                Err(e) => self.fail(event_loop, e),
            },
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.input.on_device_event(&event);
    }
}

/// Open the window and run until quit. Startup and frame failures come back
/// as errors once the loop has stopped.
#[instrument(skip_all)]
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config);
    event_loop.run_app(&mut app)?;
    match app.failure.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
