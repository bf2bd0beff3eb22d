//! Builds and rasterizes the stroke under the pointer.

use crate::raster::{stamp_dot, stamp_segment, tool_paint};
use crate::surface::CanvasSurface;
use kurbo::Point;
use sketchgrid_core::{OpenStroke, SerializableColor, Stroke, ToolSnapshot};

/// Holds at most one open stroke and paints it incrementally.
///
/// Each call stamps exactly what [`rasterize_stroke`](crate::raster::rasterize_stroke)
/// would stamp for the same point, so the live result matches a later replay.
#[derive(Debug, Default)]
pub struct StrokeEngine {
    open: Option<OpenStroke>,
}

impl StrokeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stroke is in progress.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The stroke in progress, if any.
    pub fn current(&self) -> Option<&OpenStroke> {
        self.open.as_ref()
    }

    /// Begin a stroke at `point` and stamp its starting dot.
    ///
    /// A stroke that was still open is closed first and returned so the
    /// caller can commit it; two strokes are never open at once.
    pub fn open(
        &mut self,
        surface: &mut CanvasSurface,
        point: Point,
        snapshot: ToolSnapshot,
        color: SerializableColor,
    ) -> Option<Stroke> {
        let previous = self.close();
        if previous.is_some() {
            log::warn!("Stroke opened while another was open; closing the previous one");
        }

        let stroke = OpenStroke::begin(point, snapshot, color);
        let paint = tool_paint(stroke.tool(), stroke.color());
        let transform = surface.transform();
        stamp_dot(surface.strokes_mut(), point, stroke.width().as_f32(), &paint, transform);
        self.open = Some(stroke);
        previous
    }

    /// Append a point and stamp the segment from the previous one.
    ///
    /// Returns false if no stroke is open. A repeated point is recorded but
    /// draws nothing.
    pub fn extend(&mut self, surface: &mut CanvasSurface, point: Point) -> bool {
        let Some(stroke) = self.open.as_mut() else {
            return false;
        };
        let previous = stroke.push(point);
        let paint = tool_paint(stroke.tool(), stroke.color());
        let transform = surface.transform();
        stamp_segment(
            surface.strokes_mut(),
            previous,
            point,
            stroke.width().as_f32(),
            &paint,
            transform,
        );
        true
    }

    /// Freeze the open stroke and hand it back for the history.
    pub fn close(&mut self) -> Option<Stroke> {
        self.open.take().map(OpenStroke::finish)
    }
}
