//! Keyboard shortcut registry and documentation.

use crate::ui::UiAction;
use sketchgrid_core::{Modifiers, ToolKind};

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: UiAction,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        action: UiAction,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Whether a key press with `modifiers` triggers this shortcut.
    ///
    /// `key` is compared case-insensitively. Shift is ignored for the
    /// bracket keys, whose shifted form is a different character.
    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.command()
            && (self.shift == modifiers.shift || !self.key.chars().all(char::is_alphabetic))
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("B", false, false, "Brush", UiAction::SetTool(ToolKind::Brush)),
            Shortcut::new("E", false, false, "Eraser", UiAction::SetTool(ToolKind::Eraser)),
            Shortcut::new("G", false, false, "Toggle grid", UiAction::ToggleGrid),
            Shortcut::new("[", false, false, "Thinner stroke", UiAction::AdjustWidth(-1)),
            Shortcut::new("]", false, false, "Thicker stroke", UiAction::AdjustWidth(1)),
            Shortcut::new("Z", true, false, "Undo", UiAction::Undo),
            Shortcut::new("Z", true, true, "Redo", UiAction::Redo),
            Shortcut::new("Y", true, false, "Redo", UiAction::Redo),
            Shortcut::new("S", true, false, "Save as PNG", UiAction::Save),
            Shortcut::new("C", true, true, "Copy drawing as PNG", UiAction::Share),
            Shortcut::new("Delete", false, false, "Clear canvas", UiAction::Clear),
        ]
    }

    /// The shortcut triggered by a key press, if any.
    pub fn find(key: &str, modifiers: Modifiers) -> Option<Shortcut> {
        Self::all().into_iter().find(|s| s.matches(key, modifiers))
    }

    /// The display string of the first shortcut bound to `action`.
    pub fn label_for(action: UiAction) -> Option<String> {
        Self::all()
            .into_iter()
            .find(|s| s.action == action)
            .map(|s| s.format())
    }
}
