//! Standalone demo window backed by winit.
//!
//! The window owns one [`OrbitCamera`] and one [`PointerRouter`]. Pointer
//! events are translated into [`PointerEvent`]s and routed to the camera;
//! every redraw recomputes the camera and draws the scene.
//!
//! ```no_run
//! # use orbitview::{scene::Scene, Viewer};
//! Viewer::builder()
//!     .with_scene(Scene::Skybox { faces_dir: "images/skybox".into() })
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    error::OrbitViewError,
    gpu::render_context::RenderContext,
    input::{MouseButton, PointerEvent, PointerRouter},
    options::Options,
    renderer::{FrameMatrices, SceneRenderer},
    scene::Scene,
    OrbitCamera,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    scene: Scene,
    options: Option<Options>,
    title: Option<String>,
}

impl ViewerBuilder {
    /// Create a builder for the cube scene with default options.
    fn new() -> Self {
        Self {
            scene: Scene::Cube,
            options: None,
            title: None,
        }
    }

    /// Set the scene to display.
    #[must_use]
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = scene;
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title, overriding `display.window_title`.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let options = self.options.unwrap_or_default();
        let title = self
            .title
            .unwrap_or_else(|| options.display.window_title.clone());
        Viewer {
            scene: self.scene,
            options,
            title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays one demo scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    scene: Scene,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: event-loop failure, GPU
    /// initialization, asset loading, or shader validation.
    pub fn run(self) -> Result<(), OrbitViewError> {
        let event_loop = EventLoop::new()
            .map_err(|e| OrbitViewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        log::info!("starting {} viewer", self.scene.kind());
        let mut app = ViewerApp {
            camera: OrbitCamera::with_options(&self.options),
            router: PointerRouter::with_controls(&self.options.controls),
            cursor: Vec2::ZERO,
            window: None,
            gpu: None,
            error: None,
            scene: self.scene,
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| OrbitViewError::Viewer(e.to_string()))?;

        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// GPU resources created once the window exists.
struct GpuState {
    context: RenderContext,
    renderer: SceneRenderer,
}

/// Internal winit application handler.
struct ViewerApp {
    camera: OrbitCamera,
    router: PointerRouter,
    /// Last cursor position in logical pixels; button events carry none.
    cursor: Vec2,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    /// First fatal error, returned from [`Viewer::run`].
    error: Option<OrbitViewError>,
    scene: Scene,
    options: Options,
    title: String,
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: OrbitViewError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn init_gpu(&self, window: &Arc<Window>) -> Result<GpuState, OrbitViewError> {
        let inner = window.inner_size();
        let size = (inner.width.max(1), inner.height.max(1));
        let context =
            pollster::block_on(RenderContext::new(window.clone(), size))?;
        let renderer = pollster::block_on(SceneRenderer::new(
            &context,
            &self.scene,
            &self.options.display,
        ))?;
        Ok(GpuState { context, renderer })
    }

    fn route(&mut self, event: PointerEvent) {
        self.router.dispatch(event, &mut self.camera);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let (width, height) = gpu.context.size();
        self.camera.resize(width, height);
        self.camera.update_position();
        let frame = FrameMatrices::from_camera(&self.camera);

        match gpu.renderer.render(&gpu.context, &frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                log::warn!("surface lost, reconfiguring");
                gpu.context.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timed out, skipping frame");
            }
            Err(e) => {
                self.fail(
                    event_loop,
                    OrbitViewError::Viewer(format!("render error: {e}")),
                );
                return;
            }
        }

        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(
                    event_loop,
                    OrbitViewError::Viewer(format!(
                        "failed to create window: {e}"
                    )),
                );
                return;
            }
        };

        let gpu = match self.init_gpu(&window) {
            Ok(gpu) => gpu,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        let (width, height) = gpu.context.size();
        self.camera.resize(width, height);
        self.camera.fit_view_to_scene(&Scene::FRAMING_BOUNDS);

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and GPU state must be initialised.
        let Some(window) = self.window.clone() else {
            return;
        };
        if self.gpu.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.context.resize(size.width, size.height);
                }
                self.camera.resize(size.width, size.height);
            }

            WindowEvent::Focused(false) => self.router.cancel(),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::CursorMoved { position, .. } => {
                let logical =
                    position.to_logical::<f32>(window.scale_factor());
                self.cursor = Vec2::new(logical.x, logical.y);
                self.route(PointerEvent::Move {
                    x: self.cursor.x,
                    y: self.cursor.y,
                });
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let Vec2 { x, y } = self.cursor;
                let event = match state {
                    ElementState::Pressed => PointerEvent::Press {
                        x,
                        y,
                        button: MouseButton::from(button),
                    },
                    ElementState::Released => PointerEvent::Release { x, y },
                };
                self.route(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.route(PointerEvent::from_scroll(delta));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
