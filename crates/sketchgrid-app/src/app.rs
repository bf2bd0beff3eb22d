//! Main application: window, GPU surface and the egui frame loop.

use crate::config::AppConfig;
use crate::file_ops;
use crate::shortcuts::ShortcutRegistry;
use crate::sketchpad::Sketchpad;
use crate::ui::{CanvasView, UiAction, UiState, render_canvas, render_ui};
use sketchgrid_core::Modifiers;
use std::sync::Arc;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

/// Errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("No suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("GPU device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("Surface is not supported by the adapter")]
    UnsupportedSurface,
}

/// The window surface and the device that presents to it.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    async fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self, AppError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);
        let (device, queue) = adapter.request_device(&wgpu::DeviceDescriptor::default()).await?;

        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(AppError::UnsupportedSurface)?;
        // egui expects a linear framebuffer
        let capabilities = surface.get_capabilities(&adapter);
        if let Some(format) = capabilities.formats.iter().copied().find(|f| !f.is_srgb()) {
            config.format = format;
        }
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// Runtime state for the application.
struct AppState {
    window: Arc<Window>,
    gpu: Gpu,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    ui_state: UiState,
    sketchpad: Sketchpad,
    canvas_view: CanvasView,
    modifiers: Modifiers,
}

/// Main application.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    error: Option<AppError>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            error: None,
        }
    }

    /// Run the application until the window closes.
    pub fn run(mut self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        if let Some(state) = self.state.take() {
            state.sketchpad.unmount();
        }
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<AppState, AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        let gpu = pollster::block_on(Gpu::new(window.clone(), width, height))?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, egui_wgpu::RendererOptions::default());

        // The first frame moves the canvas to its laid-out rect.
        let scale_factor = window.scale_factor();
        let logical = size.to_logical::<f64>(scale_factor);
        let bounds = kurbo::Rect::new(0.0, 0.0, logical.width.max(1.0), logical.height.max(1.0));
        let sketchpad = Sketchpad::mount_or_disabled(self.config.canvas.clone(), bounds, scale_factor);

        let mut ui_state = UiState::default();
        ui_state.sync(&sketchpad);
        if let Some(reason) = sketchpad.disabled_reason() {
            ui_state.set_error(format!("Canvas unavailable: {reason}"));
        }

        log::info!("SketchGrid initialized - {}x{}", gpu.config.width, gpu.config.height);
        log::debug!(
            "Keyboard shortcuts: {}",
            ShortcutRegistry::all()
                .iter()
                .map(|s| format!("{}={}", s.format(), s.description))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(AppState {
            window,
            gpu,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state,
            sketchpad,
            canvas_view: CanvasView::new(),
            modifiers: Modifiers::default(),
        })
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a toolbar or shortcut action to the canvas.
fn apply_action(pad: &mut Sketchpad, ui_state: &mut UiState, action: UiAction) {
    let result = match action {
        UiAction::SetTool(tool) => {
            pad.set_tool(tool);
            Ok(())
        }
        UiAction::SetWidth(width) => {
            pad.set_width(width);
            Ok(())
        }
        UiAction::AdjustWidth(delta) => {
            pad.adjust_width(delta);
            Ok(())
        }
        UiAction::ToggleGrid => {
            pad.toggle_grid();
            Ok(())
        }
        UiAction::Clear => pad.clear(),
        UiAction::Undo => pad.undo().map(|_| ()),
        UiAction::Redo => pad.redo().map(|_| ()),
        UiAction::Save => file_ops::save_png(pad, "sketch").map(|path| {
            if let Some(path) = path {
                ui_state.set_info(format!("Saved {}", path.display()));
            }
        }),
        UiAction::Share => pad
            .share_png()
            .map(|_| ui_state.set_info("Copied drawing to clipboard")),
        UiAction::SelectExercise(index) => {
            ui_state.selected_exercise = Some(index);
            ui_state.status = None;
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!("{:?} failed: {}", action, e);
        ui_state.set_error(e.to_string());
    }
    ui_state.sync(pad);
}

/// Shortcut lookup key for a logical key.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(c) => Some(c.to_string()),
        Key::Named(NamedKey::Delete) => Some("Delete".to_string()),
        _ => None,
    }
}

impl AppState {
    fn redraw(&mut self, catalog: &sketchgrid_core::ExerciseCatalog) {
        let frame = match self.gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.gpu.reconfigure();
                self.window.request_redraw();
                return;
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return;
            }
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Run egui and collect any actions
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut actions = Vec::new();
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            if let Some(action) = render_ui(ctx, &mut self.ui_state, catalog) {
                actions.push(action);
            }
            match render_canvas(ctx, &mut self.sketchpad, &mut self.canvas_view) {
                Ok(Some(outcome)) => self.ui_state.report_resize(outcome),
                Ok(None) => {}
                Err(e) => {
                    log::error!("Canvas error: {}", e);
                    self.ui_state.set_error(e.to_string());
                }
            }
        });
        self.ui_state.sync(&self.sketchpad);

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;
        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
            pixels_per_point: egui_output.pixels_per_point,
        };
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui encoder"),
        });
        let user_buffers = self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &egui_primitives,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu needs a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
        }

        queue.submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        frame.present();

        let had_actions = !actions.is_empty();
        for action in actions {
            if self.canvas_view.accepts(action) {
                apply_action(&mut self.sketchpad, &mut self.ui_state, action);
            }
        }
        let repaint_now = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|v| v.repaint_delay.is_zero());
        if repaint_now || had_actions || self.canvas_view.is_drawing() {
            self.window.request_redraw();
        }
    }

    fn handle_key(&mut self, key: &Key) -> bool {
        let Some(name) = key_name(key) else {
            return false;
        };
        let Some(shortcut) = ShortcutRegistry::find(&name, self.modifiers) else {
            return false;
        };
        let action = shortcut.action;
        if !self.canvas_view.accepts(action) {
            log::debug!("{} ({}) ignored while drawing", shortcut.description, shortcut.format());
            return true;
        }
        log::debug!("{} ({})", shortcut.description, shortcut.format());
        apply_action(&mut self.sketchpad, &mut self.ui_state, action);
        true
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        match self.init(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to initialize: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        let egui_wants_keys = egui_response.consumed || state.egui_ctx.wants_keyboard_input();

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window closed");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                state.redraw(&self.config.exercises);
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                let m = modifiers.state();
                state.modifiers = Modifiers {
                    shift: m.shift_key(),
                    ctrl: m.control_key(),
                    alt: m.alt_key(),
                    meta: m.super_key(),
                };
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat && !egui_wants_keys {
                    state.handle_key(&event.logical_key);
                }
                state.window.request_redraw();
            }

            _ => {
                if egui_response.repaint {
                    state.window.request_redraw();
                }
            }
        }
    }
}
