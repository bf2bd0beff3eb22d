//! UI components using egui.

use egui::{Align2, Color32, Context, FontId, Frame, Margin, Sense, TextureHandle, TextureOptions, Vec2};
use kurbo::Rect;
use sketchgrid_core::{BrushWidth, Difficulty, ExerciseCatalog, ToolKind, sanitize_scale_factor};
use sketchgrid_render::ResizeOutcome;
use sketchgrid_widgets::{
    ActionButton, BadgeTone, ExerciseCard, ToggleButton, WidthPreview, canvas_frame, panel_frame,
    section_label, theme, toolbar_frame, vertical_separator,
};

use crate::event_handler::{EventHandler, PointerSnapshot};
use crate::shortcuts::ShortcutRegistry;
use crate::sketchpad::{SketchError, Sketchpad};

/// Actions that can be triggered by the UI or by keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Select the tool for the next stroke.
    SetTool(ToolKind),
    /// Set the brush width (clamped by the canvas).
    SetWidth(i64),
    /// Step the brush width up or down.
    AdjustWidth(i64),
    /// Show or hide the grid.
    ToggleGrid,
    /// Remove all strokes.
    Clear,
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    /// Save the drawing as a PNG file.
    Save,
    /// Copy the drawing to the clipboard.
    Share,
    /// Highlight an exercise card.
    SelectExercise(usize),
}

impl UiAction {
    /// Whether the action rewrites history and so must wait for the
    /// current gesture to end.
    pub fn edits_history(self) -> bool {
        matches!(self, UiAction::Clear | UiAction::Undo | UiAction::Redo)
    }
}

/// A line of feedback in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// UI state that persists across frames.
#[derive(Debug, Clone)]
pub struct UiState {
    pub tool: ToolKind,
    pub width: BrushWidth,
    pub grid_visible: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub selected_exercise: Option<usize>,
    pub status: Option<StatusMessage>,
    /// Set when the canvas could not be created.
    pub disabled: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            width: BrushWidth::DEFAULT,
            grid_visible: true,
            can_undo: false,
            can_redo: false,
            selected_exercise: None,
            status: None,
            disabled: None,
        }
    }
}

impl UiState {
    /// Mirror the widget state shown by the toolbar.
    pub fn sync(&mut self, pad: &Sketchpad) {
        let tools = pad.tools();
        self.tool = tools.tool();
        self.width = tools.width();
        self.grid_visible = tools.grid_visible();
        self.can_undo = pad.can_undo();
        self.can_redo = pad.can_redo();
        self.disabled = pad.disabled_reason().map(str::to_string);
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    /// Report a resize result. Only a lost history is worth a message.
    pub fn report_resize(&mut self, outcome: ResizeOutcome) {
        if outcome == ResizeOutcome::Cleared {
            self.set_error("Display density changed; the drawing could not be restored");
        }
    }
}

fn badge_tone(difficulty: Difficulty) -> BadgeTone {
    match difficulty {
        Difficulty::Beginner => BadgeTone::Sage,
        Difficulty::Intermediate => BadgeTone::Copper,
        Difficulty::Advanced => BadgeTone::Charcoal,
    }
}

fn shortcut_label(action: UiAction) -> String {
    ShortcutRegistry::label_for(action).unwrap_or_default()
}

/// Render all UI and return any triggered action.
///
/// The canvas is drawn separately by [`render_canvas`], after the panels
/// have claimed their space.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, catalog: &ExerciseCatalog) -> Option<UiAction> {
    let toolbar_action = render_toolbar(ctx, ui_state);
    let exercise_action = render_exercise_panel(ctx, ui_state, catalog);
    render_status_bar(ctx, ui_state, catalog);

    toolbar_action.or(exercise_action)
}

/// Render the toolbar and return any triggered action.
fn render_toolbar(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;
    let enabled = ui_state.disabled.is_none();

    egui::TopBottomPanel::top("toolbar")
        .frame(Frame::new().fill(theme::CREAM).inner_margin(Margin::same(8)))
        .show_separator_line(false)
        .show(ctx, |ui| {
            toolbar_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(4.0, 0.0);

                    for tool in [ToolKind::Brush, ToolKind::Eraser] {
                        let shortcut = shortcut_label(UiAction::SetTool(tool));
                        if ToggleButton::new(tool.name(), ui_state.tool == tool)
                            .min_width(64.0)
                            .shortcut(&shortcut)
                            .show(ui)
                        {
                            action = Some(UiAction::SetTool(tool));
                        }
                    }

                    vertical_separator(ui);

                    let mut width = i64::from(ui_state.width);
                    let slider = egui::Slider::new(&mut width, i64::from(BrushWidth::MIN)..=i64::from(BrushWidth::MAX))
                        .text("Width");
                    if ui.add(slider).changed() {
                        action = Some(UiAction::SetWidth(width));
                    }
                    let preview_color = match ui_state.tool {
                        ToolKind::Brush => theme::COPPER,
                        ToolKind::Eraser => theme::TEXT_MUTED,
                    };
                    WidthPreview::new(ui_state.width.as_f32(), preview_color).show(ui);

                    vertical_separator(ui);

                    let grid_shortcut = shortcut_label(UiAction::ToggleGrid);
                    if ToggleButton::new("Grid", ui_state.grid_visible)
                        .tooltip("Show or hide the perspective grid")
                        .shortcut(&grid_shortcut)
                        .show(ui)
                    {
                        action = Some(UiAction::ToggleGrid);
                    }

                    vertical_separator(ui);

                    let buttons = [
                        ("Undo", UiAction::Undo, enabled && ui_state.can_undo),
                        ("Redo", UiAction::Redo, enabled && ui_state.can_redo),
                        ("Clear", UiAction::Clear, enabled),
                        ("Save", UiAction::Save, enabled),
                        ("Share", UiAction::Share, enabled),
                    ];
                    for (label, button_action, button_enabled) in buttons {
                        let shortcut = shortcut_label(button_action);
                        if ActionButton::new(label)
                            .enabled(button_enabled)
                            .shortcut(&shortcut)
                            .show(ui)
                        {
                            action = Some(button_action);
                        }
                    }
                });
            });
        });

    action
}

/// Render the exercise list.
fn render_exercise_panel(ctx: &Context, ui_state: &UiState, catalog: &ExerciseCatalog) -> Option<UiAction> {
    let mut action = None;

    egui::SidePanel::right("exercises")
        .resizable(false)
        .default_width(260.0)
        .frame(Frame::new().fill(theme::CREAM).inner_margin(Margin::same(8)))
        .show_separator_line(false)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                section_label(ui, "Exercises");
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (index, exercise) in catalog.iter().enumerate() {
                        let card = ExerciseCard::new(
                            &exercise.title,
                            &exercise.description,
                            exercise.difficulty.label(),
                            badge_tone(exercise.difficulty),
                        )
                        .selected(ui_state.selected_exercise == Some(index));
                        if card.show(ui) {
                            action = Some(UiAction::SelectExercise(index));
                        }
                        ui.add_space(6.0);
                    }
                });
            });
        });

    action
}

fn render_status_bar(ctx: &Context, ui_state: &UiState, catalog: &ExerciseCatalog) {
    egui::TopBottomPanel::bottom("status")
        .frame(Frame::new().fill(theme::CREAM).inner_margin(Margin::symmetric(12, 4)))
        .show_separator_line(false)
        .show(ctx, |ui| {
            let (text, color) = match &ui_state.status {
                Some(status) if status.is_error => (status.text.clone(), theme::ERROR),
                Some(status) => (status.text.clone(), theme::TEXT_MUTED),
                None => {
                    let exercise = ui_state.selected_exercise.and_then(|i| catalog.get(i));
                    match exercise {
                        Some(exercise) => (format!("Exercise: {}", exercise.title), theme::TEXT_MUTED),
                        None => ("Pick an exercise and start drawing".to_string(), theme::TEXT_MUTED),
                    }
                }
            };
            ui.label(egui::RichText::new(text).size(12.0).color(color));
        });
}

/// Display-side state of the canvas: the uploaded texture and the gesture
/// being translated.
#[derive(Default)]
pub struct CanvasView {
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    input: EventHandler,
}

impl CanvasView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress on the canvas.
    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    /// Whether `action` may run now. History edits are held off while a
    /// stroke is being drawn.
    pub fn accepts(&self, action: UiAction) -> bool {
        !(action.edits_history() && self.is_drawing())
    }

    /// Re-upload the composited pixels if the canvas changed.
    fn refresh_texture(&mut self, ctx: &Context, pad: &Sketchpad) -> Result<(), SketchError> {
        if self.texture.is_some() && self.uploaded_revision == Some(pad.revision()) {
            return Ok(());
        }
        let pixmap = pad.composite()?;
        let image = egui::ColorImage::from_rgba_premultiplied(
            [pixmap.width() as usize, pixmap.height() as usize],
            pixmap.data(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture("sketchgrid-canvas", image, TextureOptions::NEAREST)),
        }
        self.uploaded_revision = Some(pad.revision());
        Ok(())
    }
}

/// Lay out the canvas in the remaining space, feed it this frame's pointer
/// input and paint it.
///
/// Returns the resize outcome when the canvas area or pixel density changed.
pub fn render_canvas(ctx: &Context, pad: &mut Sketchpad, view: &mut CanvasView) -> Result<Option<ResizeOutcome>, SketchError> {
    let mut result = Ok(None);

    egui::CentralPanel::default()
        .frame(Frame::new().fill(theme::CREAM).inner_margin(Margin::same(8)))
        .show(ctx, |ui| {
            canvas_frame().show(ui, |ui| {
                let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
                result = drive_canvas(ctx, ui, pad, view, rect);
                if response.hovered() && !pad.is_disabled() {
                    ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
                }
            });
        });

    result
}

fn drive_canvas(
    ctx: &Context,
    ui: &egui::Ui,
    pad: &mut Sketchpad,
    view: &mut CanvasView,
    rect: egui::Rect,
) -> Result<Option<ResizeOutcome>, SketchError> {
    let bounds = Rect::new(rect.min.x as f64, rect.min.y as f64, rect.max.x as f64, rect.max.y as f64);
    let scale_factor = sanitize_scale_factor(ctx.pixels_per_point() as f64);

    let mut resized = None;
    if pad.mapper().bounds() != bounds || pad.mapper().scale_factor() != scale_factor {
        view.input.cancel();
        let outcome = pad.resize(bounds, scale_factor)?;
        if outcome != ResizeOutcome::Unchanged {
            log::debug!("Canvas resized to {}x{} @ {}: {:?}", bounds.width(), bounds.height(), scale_factor, outcome);
            resized = Some(outcome);
        }
    }

    if let Some(reason) = pad.disabled_reason() {
        ui.painter().rect_filled(rect, 0.0, theme::HOVER_BG);
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            format!("Canvas unavailable: {reason}"),
            FontId::proportional(14.0),
            theme::TEXT_DISABLED,
        );
        return Ok(resized);
    }

    let snapshot = ctx.input(PointerSnapshot::from_input);
    for event in view.input.translate(snapshot, pad.mapper()) {
        pad.handle_pointer(event)?;
    }

    view.refresh_texture(ctx, pad)?;
    if let Some(texture) = &view.texture {
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        ui.painter().image(texture.id(), rect, uv, Color32::WHITE);
    }
    Ok(resized)
}
