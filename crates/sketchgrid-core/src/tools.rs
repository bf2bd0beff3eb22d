//! Tool selection and brush width.

use serde::{Deserialize, Serialize};

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Paints in the brush color.
    #[default]
    Brush,
    /// Removes stroke pixels; never touches the grid.
    Eraser,
}

impl ToolKind {
    /// Display name for the toolbar.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
        }
    }
}

/// Brush width in logical units, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct BrushWidth(u8);

impl BrushWidth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;
    pub const DEFAULT: BrushWidth = BrushWidth(3);

    /// Clamp any integer into the valid range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Width as an integer.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Width as a float for rasterization.
    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }
}

impl Default for BrushWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for BrushWidth {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<BrushWidth> for i64 {
    fn from(width: BrushWidth) -> Self {
        width.0 as i64
    }
}

/// Tool and width frozen for one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSnapshot {
    pub tool: ToolKind,
    pub width: BrushWidth,
}

/// Current tool settings driven by the toolbar.
///
/// Changes only affect strokes opened afterwards; an open stroke keeps the
/// [`ToolSnapshot`] it was opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolState {
    tool: ToolKind,
    width: BrushWidth,
    grid_visible: bool,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            width: BrushWidth::DEFAULT,
            grid_visible: true,
        }
    }
}

impl ToolState {
    /// Create a new tool state with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a given initial width and grid visibility.
    pub fn with_defaults(width: i64, grid_visible: bool) -> Self {
        Self {
            tool: ToolKind::default(),
            width: BrushWidth::clamped(width),
            grid_visible,
        }
    }

    /// Current tool.
    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    /// Current width.
    pub fn width(&self) -> BrushWidth {
        self.width
    }

    /// Set the width, clamping into range. Returns the effective width.
    pub fn set_width(&mut self, width: i64) -> BrushWidth {
        self.width = BrushWidth::clamped(width);
        self.width
    }

    /// Step the width by `delta`, clamping into range.
    pub fn adjust_width(&mut self, delta: i64) -> BrushWidth {
        self.set_width(i64::from(self.width) + delta)
    }

    /// Whether the grid is shown.
    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Show or hide the grid.
    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    /// Flip grid visibility. Returns the new value.
    pub fn toggle_grid(&mut self) -> bool {
        self.grid_visible = !self.grid_visible;
        self.grid_visible
    }

    /// Freeze the settings for a stroke that is about to open.
    pub fn snapshot(&self) -> ToolSnapshot {
        ToolSnapshot {
            tool: self.tool,
            width: self.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ts = ToolState::new();
        assert_eq!(ts.tool(), ToolKind::Brush);
        assert_eq!(ts.width().get(), 3);
        assert!(ts.grid_visible());
    }

    #[test]
    fn test_width_clamp() {
        let mut ts = ToolState::new();
        assert_eq!(ts.set_width(0).get(), 1);
        assert_eq!(ts.set_width(-5).get(), 1);
        assert_eq!(ts.set_width(25).get(), 20);
        assert_eq!(ts.set_width(7).get(), 7);
        assert_eq!(ts.width().get(), 7);
    }

    #[test]
    fn test_adjust_width_stops_at_bounds() {
        let mut ts = ToolState::new();
        ts.set_width(19);
        assert_eq!(ts.adjust_width(1).get(), 20);
        assert_eq!(ts.adjust_width(1).get(), 20);
        ts.set_width(1);
        assert_eq!(ts.adjust_width(-1).get(), 1);
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let mut ts = ToolState::new();
        ts.set_width(12);
        let snap = ts.snapshot();

        ts.set_tool(ToolKind::Eraser);
        ts.set_width(2);

        assert_eq!(snap.tool, ToolKind::Brush);
        assert_eq!(snap.width.get(), 12);
    }

    #[test]
    fn test_toggle_grid() {
        let mut ts = ToolState::new();
        assert!(!ts.toggle_grid());
        assert!(!ts.grid_visible());
        assert!(ts.toggle_grid());
    }

    #[test]
    fn test_width_deserialize_clamps() {
        let width: BrushWidth = serde_json::from_str("42").unwrap();
        assert_eq!(width.get(), 20);
        assert_eq!(serde_json::to_string(&BrushWidth::DEFAULT).unwrap(), "3");
    }
}
