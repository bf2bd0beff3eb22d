//! Translates egui pointer state into canvas pointer events.

use kurbo::Point;
use sketchgrid_core::{CoordinateMapper, PointerEvent};

/// Per-frame pointer state read from egui.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSnapshot {
    /// Latest pointer position in viewport points.
    pub position: Option<Point>,
    pub primary_pressed: bool,
    pub primary_released: bool,
    /// Whether the window has keyboard focus.
    pub focused: bool,
}

impl PointerSnapshot {
    /// Read the current frame's pointer state.
    pub fn from_input(input: &egui::InputState) -> Self {
        Self {
            position: input
                .pointer
                .latest_pos()
                .map(|p| Point::new(p.x as f64, p.y as f64)),
            primary_pressed: input.pointer.primary_pressed(),
            primary_released: input.pointer.primary_released(),
            focused: input.focused,
        }
    }
}

/// Tracks one gesture on the canvas.
///
/// A gesture starts with a press inside the canvas. It ends with a release,
/// with the pointer leaving the canvas, or with the window losing focus.
#[derive(Debug, Default)]
pub struct EventHandler {
    drawing: bool,
    last_position: Option<Point>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Events produced by this frame's pointer state, in order.
    pub fn translate(&mut self, snapshot: PointerSnapshot, mapper: &CoordinateMapper) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        if !snapshot.focused {
            self.cancel_into(&mut events);
            return events;
        }
        let Some(position) = snapshot.position else {
            self.cancel_into(&mut events);
            return events;
        };
        let inside = mapper.contains(position);

        if snapshot.primary_pressed && !self.drawing {
            if inside {
                events.push(PointerEvent::Down { position });
                self.drawing = true;
                self.last_position = Some(position);
            }
        } else if self.drawing && self.last_position != Some(position) {
            // Outside points still go through so the stroke reaches the edge.
            events.push(PointerEvent::Move { position });
            self.last_position = Some(position);
        }

        if self.drawing {
            if snapshot.primary_released {
                events.push(PointerEvent::Up { position });
                self.finish();
            } else if !inside {
                events.push(PointerEvent::Leave);
                self.finish();
            }
        }
        events
    }

    /// End any gesture, for example when the canvas is hidden.
    pub fn cancel(&mut self) -> Option<PointerEvent> {
        let mut events = Vec::new();
        self.cancel_into(&mut events);
        events.pop()
    }

    fn cancel_into(&mut self, events: &mut Vec<PointerEvent>) {
        if self.drawing {
            events.push(PointerEvent::Leave);
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.drawing = false;
        self.last_position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(Rect::new(0.0, 0.0, 100.0, 100.0), 1.0)
    }

    fn snap(x: f64, y: f64) -> PointerSnapshot {
        PointerSnapshot {
            position: Some(Point::new(x, y)),
            focused: true,
            ..Default::default()
        }
    }

    fn pressed(x: f64, y: f64) -> PointerSnapshot {
        PointerSnapshot {
            primary_pressed: true,
            ..snap(x, y)
        }
    }

    fn released(x: f64, y: f64) -> PointerSnapshot {
        PointerSnapshot {
            primary_released: true,
            ..snap(x, y)
        }
    }

    #[test]
    fn test_press_move_release() {
        let m = mapper();
        let mut h = EventHandler::new();
        assert_eq!(h.translate(pressed(10.0, 10.0), &m), vec![PointerEvent::Down { position: Point::new(10.0, 10.0) }]);
        assert!(h.is_drawing());
        assert_eq!(h.translate(snap(20.0, 10.0), &m), vec![PointerEvent::Move { position: Point::new(20.0, 10.0) }]);
        assert!(h.translate(snap(20.0, 10.0), &m).is_empty());
        assert_eq!(h.translate(released(20.0, 10.0), &m), vec![PointerEvent::Up { position: Point::new(20.0, 10.0) }]);
        assert!(!h.is_drawing());
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut h = EventHandler::new();
        assert!(h.translate(pressed(150.0, 10.0), &mapper()).is_empty());
        assert!(!h.is_drawing());
    }

    #[test]
    fn test_hover_without_press_is_ignored() {
        let mut h = EventHandler::new();
        assert!(h.translate(snap(50.0, 50.0), &mapper()).is_empty());
    }

    #[test]
    fn test_click_in_one_frame() {
        let m = mapper();
        let mut h = EventHandler::new();
        let click = PointerSnapshot {
            primary_pressed: true,
            primary_released: true,
            ..snap(30.0, 30.0)
        };
        let p = Point::new(30.0, 30.0);
        assert_eq!(
            h.translate(click, &m),
            vec![PointerEvent::Down { position: p }, PointerEvent::Up { position: p }]
        );
    }

    #[test]
    fn test_leaving_canvas_moves_then_leaves() {
        let m = mapper();
        let mut h = EventHandler::new();
        h.translate(pressed(90.0, 50.0), &m);
        assert_eq!(
            h.translate(snap(130.0, 50.0), &m),
            vec![PointerEvent::Move { position: Point::new(130.0, 50.0) }, PointerEvent::Leave]
        );
        assert!(!h.is_drawing());
        assert!(h.translate(released(130.0, 50.0), &m).is_empty());
    }

    #[test]
    fn test_focus_loss_leaves() {
        let m = mapper();
        let mut h = EventHandler::new();
        h.translate(pressed(10.0, 10.0), &m);
        let unfocused = PointerSnapshot {
            focused: false,
            ..snap(20.0, 20.0)
        };
        assert_eq!(h.translate(unfocused, &m), vec![PointerEvent::Leave]);
        assert!(!h.is_drawing());
    }

    #[test]
    fn test_pointer_gone_leaves() {
        let m = mapper();
        let mut h = EventHandler::new();
        h.translate(pressed(10.0, 10.0), &m);
        let gone = PointerSnapshot {
            focused: true,
            ..Default::default()
        };
        assert_eq!(h.translate(gone, &m), vec![PointerEvent::Leave]);
    }

    #[test]
    fn test_cancel() {
        let mut h = EventHandler::new();
        assert_eq!(h.cancel(), None);
        h.translate(pressed(10.0, 10.0), &mapper());
        assert_eq!(h.cancel(), Some(PointerEvent::Leave));
        assert!(!h.is_drawing());
    }
}
