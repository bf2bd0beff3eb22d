//! Pointer input events consumed by the drawing surface.

use kurbo::Point;

/// Pointer event in viewport coordinates (logical points).
///
/// Only the primary button is tracked; the surface has no use for
/// secondary buttons or scroll input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed.
    Down { position: Point },
    /// Pointer moved, with or without the button held.
    Move { position: Point },
    /// Primary button released.
    Up { position: Point },
    /// Pointer left the surface or the window lost focus.
    Leave,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_modifier() {
        let mods = Modifiers {
            meta: true,
            ..Default::default()
        };
        assert!(mods.command());
        assert!(!Modifiers::default().command());
    }
}
