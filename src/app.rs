//! Windowed application: owns the event loop, the GPU and the play session.
//!
//! Window and device events are translated into [`InputEvent`]s for the
//! [`Session`]; every redraw advances the session by the measured frame time,
//! uploads the scene and draws the HUD.

use std::sync::Arc;

use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

use crate::{
    config::{AppConfig, LightConfig},
    error::{Result, RoomError},
    gfx::{
        camera::{CameraController, CameraManager, FirstPersonCamera},
        rendering::RenderEngine,
        scene::Scene,
    },
    interaction::{Catalog, InputEvent, KeyBindings, Session},
    performance::FrameClock,
    ui::{panel, UiManager},
};

/// Extra UI drawn after the HUD every frame
pub type UiCallback = Box<dyn Fn(&imgui::Ui, &Session)>;

pub struct RoomWalkApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    scene: Scene,
    camera_manager: CameraManager,
    key_bindings: KeyBindings,
    session: Session,
    clock: FrameClock,
    ui_callback: Option<UiCallback>,
    /// Start-up failure raised inside the event loop, returned from `run`
    error: Option<RoomError>,
}

impl RoomWalkApp {
    /// Creates the event loop and an empty room using `config`
    pub fn new(config: AppConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let aspect = config.width as f32 / config.height.max(1) as f32;
        let camera = FirstPersonCamera::from_config(&config.camera, aspect);
        let controller = CameraController::new(config.camera.mouse_sensitivity);
        let session = Session::new(config.session, Catalog::room_defaults());

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                scene: Scene::new(),
                camera_manager: CameraManager::new(camera, controller),
                key_bindings: KeyBindings::new(config.inventory_key),
                session,
                clock: FrameClock::new(),
                ui_callback: None,
                error: None,
                config,
            },
        })
    }

    /// Replaces the catalog used for inventory descriptions
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        let session_config = self.app_state.config.session;
        self.app_state.session = Session::new(session_config, catalog);
        self
    }

    pub fn with_light(mut self, light: LightConfig) -> Self {
        self.app_state.config.light = light;
        self
    }

    pub fn with_fps_overlay(mut self, show: bool) -> Self {
        self.app_state.config.show_fps = show;
        self
    }

    pub fn set_ui<F>(&mut self, ui_fn: F)
    where
        F: Fn(&imgui::Ui, &Session) + 'static,
    {
        self.app_state.ui_callback = Some(Box::new(ui_fn));
    }

    pub fn scene(&self) -> &Scene {
        &self.app_state.scene
    }

    /// Objects must be added before `run`; GPU resources are created when the window opens
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    pub fn session(&self) -> &Session {
        &self.app_state.session
    }

    pub fn camera_mut(&mut self) -> &mut FirstPersonCamera {
        &mut self.app_state.camera_manager.camera
    }

    /// Runs the event loop until the window closes
    pub fn run(mut self) -> Result<()> {
        let event_loop = self.event_loop.take().ok_or(RoomError::AlreadyRunning)?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let (width, height) = window.inner_size().into();
        let renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.light,
        ))?;

        self.scene
            .init_gpu_resources(renderer.device(), renderer.object_bind_group_layout());
        self.camera_manager.camera.resize_projection(width, height);

        let mut ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);
        let uploaded = ui_manager.load_images(
            renderer.device(),
            renderer.queue(),
            self.session.catalog().images(),
        );
        debug!("{uploaded} catalog images uploaded");

        info!(
            "Room ready: {} objects, {} collectable",
            self.scene.len(),
            self.scene.interactable_count()
        );

        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    /// Grabs and hides the cursor; Confined is the fallback where Locked is unsupported
    fn lock_pointer(&mut self) {
        let Some(window) = self.window.clone() else {
            return;
        };

        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        match grabbed {
            Ok(()) => {
                window.set_cursor_visible(false);
                self.session.handle_event(InputEvent::Lock, &self.scene);
            }
            Err(e) => warn!("Pointer lock unavailable: {e}"),
        }
    }

    fn unlock_pointer(&mut self) {
        if !self.session.is_locked() {
            return;
        }
        if let Some(window) = self.window.as_ref() {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                warn!("Failed to release cursor: {e}");
            }
            window.set_cursor_visible(true);
        }
        self.session.handle_event(InputEvent::Unlock, &self.scene);
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
            && event.state == ElementState::Pressed
            && !event.repeat
        {
            if self.session.is_locked() {
                self.unlock_pointer();
            } else {
                event_loop.exit();
            }
            return;
        }

        if let Some(input) = self.key_bindings.map_key_event(event) {
            self.session.handle_event(input, &self.scene);
        }
    }

    fn handle_click(&mut self) {
        self.session.handle_event(InputEvent::PointerDown, &self.scene);
        if !self.session.is_locked() {
            self.lock_pointer();
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(render_engine)) = (self.window.clone(), self.render_engine.as_mut())
        else {
            return;
        };

        let dt = self.clock.tick();
        self.session
            .frame(&mut self.scene, &mut self.camera_manager.camera, dt);

        let camera = &mut self.camera_manager.camera;
        camera.update_view_proj();
        render_engine.update(camera.uniform);
        self.scene.update_gpu(render_engine.queue());

        let session = &self.session;
        let clock = &self.clock;
        let show_fps = self.config.show_fps;
        let ui_callback = self.ui_callback.as_ref();

        match self.ui_manager.as_mut() {
            Some(ui_manager) => {
                render_engine.render_frame(&self.scene, |device, queue, encoder, view| {
                    ui_manager.draw(device, queue, encoder, &window, view, |ui, images| {
                        panel::hud(ui, session, images);
                        if show_fps {
                            clock.render_overlay(ui);
                        }
                        if let Some(callback) = ui_callback {
                            callback(ui, session);
                        }
                    });
                });
            }
            None => render_engine.render_frame(&self.scene, |_, _, _, _| {}),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_graphics(event_loop) {
            error!("Failed to start: {e}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Free pointer: ImGui may keep events aimed at its own windows
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            let captured = ui_manager.handle_input(&window, window_id, &event);
            if captured && !self.session.is_locked() {
                return;
            }
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.handle_click(),
            WindowEvent::Focused(false) => self.unlock_pointer(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.camera_manager.camera.resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        self.camera_manager
            .process_event(&event, self.session.is_locked());
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
