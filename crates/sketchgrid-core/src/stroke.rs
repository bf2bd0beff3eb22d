//! Freehand strokes.

use crate::tools::{BrushWidth, ToolKind, ToolSnapshot};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stroke.
pub type StrokeId = Uuid;

/// Serializable RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    /// Copper accent used for brush strokes (`#B87333`).
    pub const COPPER: Self = Self::new(184, 115, 51, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Same color with alpha scaled by `opacity` (0.0 - 1.0).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

/// A committed, immutable stroke.
///
/// Always holds at least one point. Built through [`OpenStroke`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: StrokeId,
    tool: ToolKind,
    width: BrushWidth,
    color: SerializableColor,
    points: Vec<Point>,
}

impl Stroke {
    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn width(&self) -> BrushWidth {
        self.width
    }

    /// Paint color. Ignored by the eraser.
    pub fn color(&self) -> SerializableColor {
        self.color
    }

    /// Points in canvas space, in arrival order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a committed stroke; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A stroke still being drawn: append-only until [`finish`](OpenStroke::finish).
#[derive(Debug, Clone, PartialEq)]
pub struct OpenStroke {
    id: StrokeId,
    snapshot: ToolSnapshot,
    color: SerializableColor,
    points: Vec<Point>,
}

impl OpenStroke {
    /// Start a stroke at `start` with frozen tool settings.
    pub fn begin(start: Point, snapshot: ToolSnapshot, color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            snapshot,
            color,
            points: vec![start],
        }
    }

    /// Append a point. Returns the previous last point.
    pub fn push(&mut self, point: Point) -> Point {
        let previous = self.last_point();
        self.points.push(point);
        previous
    }

    /// Most recently recorded point.
    pub fn last_point(&self) -> Point {
        // `begin` guarantees at least one point and nothing removes points.
        self.points[self.points.len() - 1]
    }

    pub fn tool(&self) -> ToolKind {
        self.snapshot.tool
    }

    pub fn width(&self) -> BrushWidth {
        self.snapshot.width
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Freeze the stroke.
    pub fn finish(self) -> Stroke {
        Stroke {
            id: self.id,
            tool: self.snapshot.tool,
            width: self.snapshot.width,
            color: self.color,
            points: self.points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brush(width: i64) -> ToolSnapshot {
        ToolSnapshot {
            tool: ToolKind::Brush,
            width: BrushWidth::clamped(width),
        }
    }

    #[test]
    fn test_open_stroke_has_start_point() {
        let open = OpenStroke::begin(Point::new(3.0, 4.0), brush(3), SerializableColor::COPPER);
        assert_eq!(open.points(), &[Point::new(3.0, 4.0)]);
        assert_eq!(open.last_point(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_push_returns_previous() {
        let mut open = OpenStroke::begin(Point::new(0.0, 0.0), brush(3), SerializableColor::COPPER);
        let prev = open.push(Point::new(10.0, 0.0));
        assert_eq!(prev, Point::new(0.0, 0.0));
        let prev = open.push(Point::new(10.0, 10.0));
        assert_eq!(prev, Point::new(10.0, 0.0));
    }

    #[test]
    fn test_finish_keeps_everything() {
        let mut open = OpenStroke::begin(Point::new(10.0, 10.0), brush(3), SerializableColor::COPPER);
        open.push(Point::new(50.0, 10.0));
        let stroke = open.finish();

        assert_eq!(stroke.len(), 2);
        assert!(!stroke.is_empty());
        assert_eq!(stroke.tool(), ToolKind::Brush);
        assert_eq!(stroke.width().get(), 3);
        assert_eq!(stroke.color(), SerializableColor::COPPER);
    }

    #[test]
    fn test_with_opacity() {
        let tint = SerializableColor::COPPER.with_opacity(0.2);
        assert_eq!(tint.a, 51);
        assert_eq!(tint.r, 184);
    }

    #[test]
    fn test_stroke_serde_roundtrip() {
        let open = OpenStroke::begin(Point::new(1.0, 2.0), brush(5), SerializableColor::COPPER);
        let stroke = open.finish();
        let json = serde_json::to_string(&stroke).unwrap();
        let back: Stroke = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stroke);
    }
}
