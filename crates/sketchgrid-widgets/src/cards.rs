//! Card components for the exercise list.

use egui::{vec2, Align2, Color32, CornerRadius, CursorIcon, Pos2, Rect, Sense, Stroke, StrokeKind, Ui};

use crate::{sizing, theme};

/// Badge coloring, one per difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Sage,
    Copper,
    Charcoal,
}

impl BadgeTone {
    pub fn color(self) -> Color32 {
        match self {
            BadgeTone::Sage => theme::SAGE,
            BadgeTone::Copper => theme::COPPER,
            BadgeTone::Charcoal => theme::CHARCOAL,
        }
    }
}

/// A clickable card with a title, a wrapped description and a badge.
pub struct ExerciseCard<'a> {
    title: &'a str,
    description: &'a str,
    badge: &'a str,
    tone: BadgeTone,
    selected: bool,
}

impl<'a> ExerciseCard<'a> {
    pub fn new(title: &'a str, description: &'a str, badge: &'a str, tone: BadgeTone) -> Self {
        Self {
            title,
            description,
            badge,
            tone,
            selected: false,
        }
    }

    /// Highlight the card with a copper border.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Show the card and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let width = ui.available_width();
        let padding = 10.0;
        let inner_width = (width - 2.0 * padding).max(1.0);

        let title_galley = ui.painter().layout(
            self.title.to_string(),
            egui::FontId::proportional(14.0),
            theme::CHARCOAL,
            inner_width,
        );
        let desc_galley = ui.painter().layout(
            self.description.to_string(),
            egui::FontId::proportional(12.0),
            theme::TEXT_MUTED,
            inner_width,
        );
        let badge_height = 18.0;
        let height = padding * 2.0 + title_galley.size().y + 4.0 + desc_galley.size().y + 8.0 + badge_height;

        let (rect, response) = ui.allocate_exact_size(vec2(width, height), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let bg = if response.hovered() { theme::HOVER_BG } else { Color32::WHITE };
            let border = if self.selected {
                Stroke::new(2.0, theme::COPPER)
            } else {
                Stroke::new(1.0, theme::BORDER)
            };
            painter.rect_filled(rect, CornerRadius::same(sizing::PANEL_RADIUS), bg);
            painter.rect_stroke(rect, CornerRadius::same(sizing::PANEL_RADIUS), border, StrokeKind::Inside);

            let mut cursor = Pos2::new(rect.left() + padding, rect.top() + padding);
            let title_height = title_galley.size().y;
            painter.galley(cursor, title_galley, theme::CHARCOAL);
            cursor.y += title_height + 4.0;

            let desc_height = desc_galley.size().y;
            painter.galley(cursor, desc_galley, theme::TEXT_MUTED);
            cursor.y += desc_height + 8.0;

            let badge_font = egui::FontId::proportional(11.0);
            let badge_galley = painter.layout_no_wrap(self.badge.to_string(), badge_font.clone(), Color32::WHITE);
            let badge_rect = Rect::from_min_size(cursor, vec2(badge_galley.size().x + 14.0, badge_height));
            painter.rect_filled(badge_rect, CornerRadius::same(9), self.tone.color());
            painter.text(badge_rect.center(), Align2::CENTER_CENTER, self.badge, badge_font, Color32::WHITE);
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
