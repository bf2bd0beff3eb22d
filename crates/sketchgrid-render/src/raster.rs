//! Stroke stamping.
//!
//! Live drawing and history replay both go through these functions, in the
//! same order, so a replayed stroke produces the same pixels as the original.

use crate::renderer::skia_color;
use kurbo::Point;
use sketchgrid_core::{SerializableColor, Stroke, ToolKind};
use tiny_skia::{BlendMode, Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

/// Paint for a tool.
///
/// The brush blends source-over in `color`; the eraser removes destination
/// alpha with destination-out and ignores `color`.
pub fn tool_paint(tool: ToolKind, color: SerializableColor) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: true,
        ..Default::default()
    };
    match tool {
        ToolKind::Brush => {
            paint.set_color(skia_color(color));
            paint.blend_mode = BlendMode::SourceOver;
        }
        ToolKind::Eraser => {
            paint.set_color(Color::BLACK);
            paint.blend_mode = BlendMode::DestinationOut;
        }
    }
    paint
}

/// Stamp a filled disc of diameter `width` centered on `point`.
pub fn stamp_dot(pixmap: &mut Pixmap, point: Point, width: f32, paint: &Paint, transform: Transform) {
    let Some(path) = PathBuilder::from_circle(point.x as f32, point.y as f32, width / 2.0) else {
        return;
    };
    pixmap.fill_path(&path, paint, FillRule::Winding, transform, None);
}

/// Stamp a round-capped segment. Returns false for a zero-length segment,
/// which is not rasterized.
pub fn stamp_segment(
    pixmap: &mut Pixmap,
    from: Point,
    to: Point,
    width: f32,
    paint: &Paint,
    transform: Transform,
) -> bool {
    if from == to {
        return false;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(from.x as f32, from.y as f32);
    pb.line_to(to.x as f32, to.y as f32);
    let Some(path) = pb.finish() else {
        return false;
    };
    let stroke = tiny_skia::Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&path, paint, &stroke, transform, None);
    true
}

/// Rasterize a committed stroke: a dot at the first point, then one segment
/// per consecutive pair.
pub fn rasterize_stroke(pixmap: &mut Pixmap, stroke: &Stroke, transform: Transform) {
    let paint = tool_paint(stroke.tool(), stroke.color());
    let width = stroke.width().as_f32();
    let points = stroke.points();

    let Some(first) = points.first() else {
        return;
    };
    stamp_dot(pixmap, *first, width, &paint, transform);
    for pair in points.windows(2) {
        stamp_segment(pixmap, pair[0], pair[1], width, &paint, transform);
    }
}
