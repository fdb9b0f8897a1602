use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowAttributes},
};

use crate::config::AppConfig;
use crate::error::RenderError;
use crate::gfx::{
    camera::CameraManager,
    rendering::RenderEngine,
    scene::{still_life, RenderContext, Scene},
};

/// Windowed still-life viewer
pub struct StillLifeApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    camera_manager: CameraManager,
    context: RenderContext,
    scene: Scene,
    last_frame: Instant,
    /// Cursor is locked, so turning comes from raw device motion
    relative_pointer: bool,
    failure: Option<RenderError>,
}

impl StillLifeApp {
    /// Loads the scene assets and prepares the event loop
    ///
    /// Nothing touches the GPU until the window is created.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        let mut context = RenderContext::new();
        let report = still_life::prepare(&mut context, &config.asset_dir);
        if !report.texture_failures.is_empty() {
            log::warn!(
                "{} textures could not be loaded from {}",
                report.texture_failures.len(),
                config.asset_dir.display()
            );
        }

        let (width, height) = config.window_size;
        let camera_manager = CameraManager::new(&config.camera, width, height);

        Ok(Self {
            event_loop,
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                camera_manager,
                context,
                scene: still_life::build_scene(),
                last_frame: Instant::now(),
                relative_pointer: false,
                failure: None,
            },
        })
    }

    /// Runs until the window is closed or Escape is pressed
    pub fn run(mut self) -> anyhow::Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated abnormally")?;

        match self.app_state.failure.take() {
            Some(err) => Err(err).context("failed to initialise rendering"),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RenderError> {
        let (width, height) = self.config.window_size;
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(self.config.window_title.clone())
                .with_inner_size(PhysicalSize::new(width, height)),
        )?;
        let window_handle = Arc::new(window);

        // Locked cursors stop reporting positions on some platforms
        self.relative_pointer = false;
        if window_handle.set_cursor_grab(CursorGrabMode::Confined).is_err() {
            match window_handle.set_cursor_grab(CursorGrabMode::Locked) {
                Ok(()) => self.relative_pointer = true,
                Err(err) => log::warn!("Could not grab the cursor: {err}"),
            }
        }
        window_handle.set_cursor_visible(false);

        let (width, height) = window_handle.inner_size().into();
        let window_clone = window_handle.clone();
        let vsync = self.config.vsync;
        let mut renderer = pollster::block_on(async move {
            RenderEngine::new(window_clone, width, height, vsync).await
        })?;
        renderer.sync_textures(&mut self.context.textures);
        self.camera_manager.resize(width, height);

        log::info!("Created {width}x{height} window '{}'", self.config.window_title);
        self.window = Some(window_handle);
        self.render_engine = Some(renderer);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        if key_code == KeyCode::Escape && event.state == ElementState::Pressed {
            event_loop.exit();
            return;
        }
        self.camera_manager.process_key(key_code, event.state);
    }

    /// Measures the frame time, moves the camera, records and renders the scene
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.camera_manager.update(dt);
        let eye = self.camera_manager.eye();
        self.context.begin_frame(
            self.camera_manager.view_matrix(),
            self.camera_manager.projection_matrix(),
            eye,
        );
        self.scene.render(&mut self.context);

        match render_engine.render_frame(
            &self.context.draws,
            self.context.global_uniform(),
            eye,
            self.config.clear_color,
        ) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(err) => log::warn!("Dropped frame: {err}"),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.create_window(event_loop) {
            log::error!("{err}");
            self.failure = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::CursorMoved { position, .. } if !self.relative_pointer => {
                self.camera_manager.process_pointer(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => self.camera_manager.process_scroll(&delta),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager.resize(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.relative_pointer {
                self.camera_manager.process_pointer_delta(dx, dy);
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.release_textures();
        }
        self.context.release_textures();
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
