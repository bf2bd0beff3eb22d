//! Button components: toggle buttons, action buttons, width preview.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, Pos2, Sense, Stroke, StrokeKind, Ui,
};

use crate::{sizing, theme};

/// Hover text for a button: the tooltip with the shortcut appended, or the
/// shortcut alone when there is no tooltip.
fn hover_text(tooltip: Option<&str>, shortcut: Option<&str>) -> Option<String> {
    match (tooltip, shortcut.filter(|s| !s.is_empty())) {
        (Some(tooltip), Some(shortcut)) => Some(format!("{tooltip} ({shortcut})")),
        (Some(tooltip), None) => Some(tooltip.to_string()),
        (None, Some(shortcut)) => Some(shortcut.to_string()),
        (None, None) => None,
    }
}

/// A toggle button with a text label.
/// Solid copper background when selected.
pub struct ToggleButton<'a> {
    label: &'a str,
    selected: bool,
    tooltip: Option<&'a str>,
    shortcut: Option<&'a str>,
    min_width: Option<f32>,
    height: f32,
    font_size: f32,
}

impl<'a> ToggleButton<'a> {
    /// Create a new toggle button.
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            tooltip: None,
            shortcut: None,
            min_width: None,
            height: sizing::BUTTON_HEIGHT,
            font_size: 13.0,
        }
    }

    /// Set minimum width.
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Hover text.
    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Keyboard shortcut, shown on hover.
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(self.font_size);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            font_id.clone(),
            Color32::PLACEHOLDER,
        );
        let text_width = galley.size().x;
        let width = self.min_width.unwrap_or(0.0).max(text_width + 20.0);
        let (rect, response) = ui.allocate_exact_size(vec2(width, self.height), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = match (self.selected, response.hovered()) {
                (true, true) => theme::COPPER_DARK,
                (true, false) => theme::COPPER,
                (false, true) => theme::HOVER_BG,
                (false, false) => Color32::TRANSPARENT,
            };
            let text_color = if self.selected {
                Color32::WHITE
            } else {
                theme::CHARCOAL
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            if !self.selected {
                ui.painter().rect_stroke(
                    rect,
                    CornerRadius::same(sizing::CORNER_RADIUS),
                    Stroke::new(1.0, theme::BORDER),
                    StrokeKind::Inside,
                );
            }
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, text_color);
        }

        let clicked = response.clicked();
        let response = match hover_text(self.tooltip, self.shortcut) {
            Some(text) => response.on_hover_text(text),
            None => response,
        };
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A one-shot action button that can be disabled.
pub struct ActionButton<'a> {
    label: &'a str,
    enabled: bool,
    shortcut: Option<&'a str>,
}

impl<'a> ActionButton<'a> {
    /// Create a new, enabled action button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            enabled: true,
            shortcut: None,
        }
    }

    /// Set whether the button reacts to clicks.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Add a shortcut hint, shown on hover.
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Show the button and return true if clicked while enabled.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(13.0);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            font_id.clone(),
            Color32::PLACEHOLDER,
        );
        let size = vec2(galley.size().x + 20.0, sizing::BUTTON_HEIGHT);
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if self.enabled && response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };
            let text_color = if self.enabled {
                theme::CHARCOAL
            } else {
                theme::TEXT_DISABLED
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter().rect_stroke(
                rect,
                CornerRadius::same(sizing::CORNER_RADIUS),
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Inside,
            );
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, text_color);
        }

        let clicked = self.enabled && response.clicked();
        let response = match hover_text(None, self.shortcut) {
            Some(text) => response.on_hover_text(text),
            None => response,
        };
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        }
        clicked
    }
}

/// Non-interactive preview of the brush: a dot of the current width.
pub struct WidthPreview {
    width: f32,
    color: Color32,
}

impl WidthPreview {
    /// Preview for a width in logical units.
    pub fn new(width: f32, color: Color32) -> Self {
        Self { width, color }
    }

    pub fn show(self, ui: &mut Ui) {
        let side = sizing::BUTTON_HEIGHT;
        let (rect, _response) = ui.allocate_exact_size(vec2(side, side), Sense::hover());
        if ui.is_rect_visible(rect) {
            ui.painter().rect_stroke(
                rect,
                CornerRadius::same(sizing::CORNER_RADIUS),
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Inside,
            );
            let radius = (self.width / 2.0).clamp(0.5, side / 2.0 - 3.0);
            ui.painter()
                .circle_filled(Pos2::new(rect.center().x, rect.center().y), radius, self.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_text_appends_shortcut() {
        assert_eq!(
            hover_text(Some("Show or hide the grid"), Some("G")).as_deref(),
            Some("Show or hide the grid (G)")
        );
        assert_eq!(hover_text(Some("Grid"), None).as_deref(), Some("Grid"));
    }

    #[test]
    fn test_hover_text_shortcut_without_tooltip() {
        assert_eq!(hover_text(None, Some("Ctrl+Z")).as_deref(), Some("Ctrl+Z"));
        assert_eq!(hover_text(None, Some("")), None);
        assert_eq!(hover_text(None, None), None);
    }
}
