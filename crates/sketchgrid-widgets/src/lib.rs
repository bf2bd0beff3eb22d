//! Reusable egui widget components in the SketchGrid palette.
//!
//! - **Buttons**: toggle buttons, action buttons, brush width preview
//! - **Cards**: exercise cards with difficulty badges
//! - **Frames**: toolbar and panel frames
//! - **Layout**: section labels, toolbar separators

pub mod buttons;
pub mod cards;
pub mod frames;
pub mod layout;

pub use buttons::{ActionButton, ToggleButton, WidthPreview};
pub use cards::{BadgeTone, ExerciseCard};
pub use frames::{canvas_frame, panel_frame, toolbar_frame};
pub use layout::{section_label, vertical_separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Toolbar button height
    pub const BUTTON_HEIGHT: f32 = 28.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Site palette.
pub mod theme {
    use egui::Color32;

    /// Copper accent, also the brush color
    pub const COPPER: Color32 = Color32::from_rgb(184, 115, 51);
    /// Darker copper for hover on accent fills
    pub const COPPER_DARK: Color32 = Color32::from_rgb(150, 90, 38);
    /// Sage green
    pub const SAGE: Color32 = Color32::from_rgb(156, 175, 136);
    /// Charcoal, used for text
    pub const CHARCOAL: Color32 = Color32::from_rgb(54, 69, 79);
    /// Cream page background
    pub const CREAM: Color32 = Color32::from_rgb(250, 246, 238);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Disabled text color
    pub const TEXT_DISABLED: Color32 = Color32::from_gray(180);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(225, 215, 200);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(240, 232, 220);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(253, 251, 247, 250);
    /// Error text
    pub const ERROR: Color32 = Color32::from_rgb(185, 60, 50);
}
