//! Layout helpers: toolbar separators, section labels.

use egui::{Stroke, Ui};

use crate::theme;

/// Draw a short vertical separator between toolbar groups.
pub fn vertical_separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let height = 18.0;
    let x = rect.left() + 2.0;
    let top = rect.center().y - height / 2.0;
    ui.painter().line_segment(
        [egui::Pos2::new(x, top), egui::Pos2::new(x, top + height)],
        Stroke::new(1.0, theme::BORDER),
    );
    ui.add_space(5.0);
}

/// Draw a section label (small, muted, upper-case).
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(
        egui::RichText::new(text.to_uppercase())
            .size(10.0)
            .color(theme::TEXT_MUTED),
    );
}
