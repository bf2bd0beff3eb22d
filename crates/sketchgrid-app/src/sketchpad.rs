//! The embeddable drawing widget engine.
//!
//! One [`Sketchpad`] exists per mounted canvas. It routes pointer input
//! through the coordinate mapper into the stroke engine, records committed
//! edits in the history and keeps the raster surface in sync with it.

use kurbo::{Rect, Size};
use sketchgrid_core::{
    BrushWidth, CanvasConfig, CoordinateMapper, HistoryEntry, HistoryStack, PointerEvent, Stroke,
    ToolKind, ToolState,
};
use sketchgrid_render::{
    CanvasSurface, ExportedImage, RendererError, ResizeOutcome, StrokeEngine, SurfaceStyle,
};
use std::path::Path;
use thiserror::Error;
use tiny_skia::Pixmap;

/// Errors surfaced by the widget.
#[derive(Debug, Error)]
pub enum SketchError {
    /// The canvas could not be created; nothing is drawn.
    #[error("Canvas unavailable: {0}")]
    Unavailable(String),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// No stroke was affected.
    Ignored,
    /// A new stroke was opened.
    Opened,
    /// A point was appended to the open stroke.
    Extended,
    /// The open stroke was closed and committed.
    Committed,
}

/// Raster state that exists only while the surface is allocated.
struct ActiveCanvas {
    surface: CanvasSurface,
    engine: StrokeEngine,
}

enum CanvasState {
    Ready(ActiveCanvas),
    Disabled(String),
}

fn ready(state: &mut CanvasState) -> Result<&mut ActiveCanvas, SketchError> {
    match state {
        CanvasState::Ready(canvas) => Ok(canvas),
        CanvasState::Disabled(reason) => Err(SketchError::Unavailable(reason.clone())),
    }
}

/// Close the open stroke, if any, and record it.
fn commit_open(canvas: &mut ActiveCanvas, history: &mut HistoryStack) -> Result<bool, SketchError> {
    match canvas.engine.close() {
        Some(stroke) => {
            commit_stroke(canvas, history, stroke)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn commit_stroke(canvas: &mut ActiveCanvas, history: &mut HistoryStack, stroke: Stroke) -> Result<(), SketchError> {
    log::debug!("Committing {:?} stroke with {} points", stroke.tool(), stroke.len());
    commit_entry(canvas, history, HistoryEntry::Stroke(stroke))
}

fn commit_entry(canvas: &mut ActiveCanvas, history: &mut HistoryStack, entry: HistoryEntry) -> Result<(), SketchError> {
    let evicted = history.commit(entry);
    canvas.surface.bake_baseline(&evicted)?;
    Ok(())
}

/// Drawing widget state.
pub struct Sketchpad {
    config: CanvasConfig,
    mapper: CoordinateMapper,
    tools: ToolState,
    history: HistoryStack,
    state: CanvasState,
    revision: u64,
}

impl Sketchpad {
    /// Create the canvas for a surface laid out at `layout_bounds`.
    ///
    /// Fails with [`SketchError::Render`] if the backing store cannot be
    /// allocated; use [`disabled`](Self::disabled) to show a placeholder.
    pub fn mount(config: CanvasConfig, layout_bounds: Rect, scale_factor: f64) -> Result<Self, SketchError> {
        let config = config.sanitized();
        let mapper = CoordinateMapper::new(layout_bounds, scale_factor);
        let surface = CanvasSurface::new(
            mapper.logical_size(),
            mapper.scale_factor(),
            &SurfaceStyle::from(&config),
            config.grid_visible,
        )?;
        log::info!("Sketchpad mounted");

        Ok(Self {
            tools: ToolState::with_defaults(config.default_width.into(), config.grid_visible),
            history: HistoryStack::with_capacity(config.history_capacity),
            mapper,
            config,
            state: CanvasState::Ready(ActiveCanvas {
                surface,
                engine: StrokeEngine::new(),
            }),
            revision: 0,
        })
    }

    /// A widget that rejects every drawing call.
    pub fn disabled(config: CanvasConfig, layout_bounds: Rect, scale_factor: f64, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::error!("Sketchpad disabled: {}", reason);
        let config = config.sanitized();
        Self {
            tools: ToolState::with_defaults(config.default_width.into(), config.grid_visible),
            history: HistoryStack::with_capacity(config.history_capacity),
            mapper: CoordinateMapper::new(layout_bounds, scale_factor),
            config,
            state: CanvasState::Disabled(reason),
            revision: 0,
        }
    }

    /// Mount, or fall back to a disabled widget on failure.
    pub fn mount_or_disabled(config: CanvasConfig, layout_bounds: Rect, scale_factor: f64) -> Self {
        match Self::mount(config.clone(), layout_bounds, scale_factor) {
            Ok(pad) => pad,
            Err(e) => Self::disabled(config, layout_bounds, scale_factor, e.to_string()),
        }
    }

    /// Release the bitmaps.
    pub fn unmount(self) {
        log::info!("Sketchpad unmounted ({} history entries dropped)", self.history.len());
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// The raster surface, unless disabled.
    pub fn surface(&self) -> Option<&CanvasSurface> {
        match &self.state {
            CanvasState::Ready(canvas) => Some(&canvas.surface),
            CanvasState::Disabled(_) => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.state, CanvasState::Disabled(_))
    }

    /// Why the widget is disabled, if it is.
    pub fn disabled_reason(&self) -> Option<&str> {
        match &self.state {
            CanvasState::Disabled(reason) => Some(reason),
            CanvasState::Ready(_) => None,
        }
    }

    /// Whether a stroke is being drawn.
    pub fn is_drawing(&self) -> bool {
        match &self.state {
            CanvasState::Ready(canvas) => canvas.engine.is_open(),
            CanvasState::Disabled(_) => false,
        }
    }

    /// Bumped on every visible change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        !self.is_disabled() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_disabled() && self.history.can_redo()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Feed one pointer event, in viewport coordinates.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<PointerOutcome, SketchError> {
        let canvas = ready(&mut self.state)?;
        let outcome = match event {
            PointerEvent::Down { position } => {
                commit_open(canvas, &mut self.history)?;
                let point = self.mapper.to_canvas(position);
                canvas.engine.open(
                    &mut canvas.surface,
                    point,
                    self.tools.snapshot(),
                    self.config.brush_color,
                );
                PointerOutcome::Opened
            }
            PointerEvent::Move { position } => {
                let point = self.mapper.to_canvas(position);
                if canvas.engine.extend(&mut canvas.surface, point) {
                    PointerOutcome::Extended
                } else {
                    PointerOutcome::Ignored
                }
            }
            PointerEvent::Up { position } => {
                let point = self.mapper.to_canvas(position);
                let moved = canvas
                    .engine
                    .current()
                    .is_some_and(|stroke| stroke.last_point() != point);
                if moved {
                    canvas.engine.extend(&mut canvas.surface, point);
                }
                if commit_open(canvas, &mut self.history)? {
                    PointerOutcome::Committed
                } else {
                    PointerOutcome::Ignored
                }
            }
            PointerEvent::Leave => {
                if commit_open(canvas, &mut self.history)? {
                    PointerOutcome::Committed
                } else {
                    PointerOutcome::Ignored
                }
            }
        };
        if outcome != PointerOutcome::Ignored {
            self.touch();
        }
        Ok(outcome)
    }

    /// Select the tool for the next stroke.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    /// Set the width for the next stroke, clamped to the valid range.
    pub fn set_width(&mut self, width: i64) -> BrushWidth {
        self.tools.set_width(width)
    }

    /// Step the width for the next stroke.
    pub fn adjust_width(&mut self, delta: i64) -> BrushWidth {
        self.tools.adjust_width(delta)
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.tools.set_grid_visible(visible);
        if let CanvasState::Ready(canvas) = &mut self.state {
            canvas.surface.set_grid_visible(visible);
        }
        self.touch();
    }

    /// Flip grid visibility. Returns the new value.
    pub fn toggle_grid(&mut self) -> bool {
        let visible = !self.tools.grid_visible();
        self.set_grid_visible(visible);
        visible
    }

    /// Wipe all strokes. Recorded in history, so it can be undone.
    pub fn clear(&mut self) -> Result<(), SketchError> {
        let canvas = ready(&mut self.state)?;
        commit_open(canvas, &mut self.history)?;
        canvas.surface.clear();
        commit_entry(canvas, &mut self.history, HistoryEntry::Clear)?;
        self.touch();
        log::info!("Canvas cleared");
        Ok(())
    }

    /// Undo the last entry. Returns false at the start of history.
    pub fn undo(&mut self) -> Result<bool, SketchError> {
        let canvas = ready(&mut self.state)?;
        commit_open(canvas, &mut self.history)?;
        if !self.history.undo() {
            return Ok(false);
        }
        canvas.surface.replay(self.history.applied());
        self.touch();
        Ok(true)
    }

    /// Redo the next entry. Returns false at the tail of history.
    pub fn redo(&mut self) -> Result<bool, SketchError> {
        let canvas = ready(&mut self.state)?;
        if commit_open(canvas, &mut self.history)? {
            // Committing dropped the redo branch; still a visible change.
            self.touch();
            return Ok(false);
        }
        let Some(entry) = self.history.redo() else {
            return Ok(false);
        };
        canvas.surface.apply(entry);
        self.touch();
        Ok(true)
    }

    /// Follow a layout or pixel density change.
    ///
    /// An open stroke is committed first. If the bitmap cannot be
    /// reallocated the widget becomes disabled.
    pub fn resize(&mut self, layout_bounds: Rect, scale_factor: f64) -> Result<ResizeOutcome, SketchError> {
        self.mapper.set_bounds(layout_bounds);
        self.mapper.set_scale_factor(scale_factor);
        let logical_size = self.mapper.logical_size();
        let scale_factor = self.mapper.scale_factor();

        if let CanvasState::Disabled(_) = self.state {
            return self.remount(logical_size, scale_factor);
        }

        let canvas = ready(&mut self.state)?;
        commit_open(canvas, &mut self.history)?;
        let outcome = match canvas.surface.resize(logical_size, scale_factor, self.history.applied()) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Resize failed: {}", e);
                self.state = CanvasState::Disabled(e.to_string());
                self.touch();
                return Err(e.into());
            }
        };

        match outcome {
            ResizeOutcome::Unchanged => {}
            ResizeOutcome::Replayed => self.touch(),
            ResizeOutcome::Cleared => {
                log::warn!("History could not be restored after resize; starting over");
                self.history.reset();
                self.touch();
            }
        }
        Ok(outcome)
    }

    /// Retry allocation for a disabled widget.
    fn remount(&mut self, logical_size: Size, scale_factor: f64) -> Result<ResizeOutcome, SketchError> {
        let surface = CanvasSurface::new(
            logical_size,
            scale_factor,
            &SurfaceStyle::from(&self.config),
            self.tools.grid_visible(),
        )
        .map_err(|e| {
            self.state = CanvasState::Disabled(e.to_string());
            e
        })?;
        log::info!("Sketchpad recovered after resize");
        self.history.reset();
        self.state = CanvasState::Ready(ActiveCanvas {
            surface,
            engine: StrokeEngine::new(),
        });
        self.touch();
        Ok(ResizeOutcome::Cleared)
    }

    /// Flattened pixels for display.
    pub fn composite(&self) -> Result<Pixmap, SketchError> {
        match &self.state {
            CanvasState::Ready(canvas) => Ok(canvas.surface.composite()?),
            CanvasState::Disabled(reason) => Err(SketchError::Unavailable(reason.clone())),
        }
    }

    /// PNG snapshot of the current drawing.
    pub fn export_png(&self) -> Result<ExportedImage, SketchError> {
        match &self.state {
            CanvasState::Ready(canvas) => Ok(canvas.surface.export_png()?),
            CanvasState::Disabled(reason) => Err(SketchError::Unavailable(reason.clone())),
        }
    }

    /// Export and write the PNG to `path`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<ExportedImage, SketchError> {
        let image = self.export_png()?;
        std::fs::write(path.as_ref(), &image.png)?;
        log::info!("Saved PNG to {:?}", path.as_ref());
        Ok(image)
    }

    /// Export and place the image on the system clipboard.
    #[cfg(feature = "native")]
    pub fn share_png(&self) -> Result<ExportedImage, SketchError> {
        let image = self.export_png()?;
        crate::file_ops::copy_image_to_clipboard(&image)?;
        Ok(image)
    }
}
