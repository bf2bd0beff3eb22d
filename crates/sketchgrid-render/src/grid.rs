//! Reference grid layer.

use crate::renderer::{RenderResult, allocate_pixmap, render_transform, skia_color};
use kurbo::Size;
use sketchgrid_core::config::DEFAULT_GRID_PERIOD;
use sketchgrid_core::{SerializableColor, backing_dimensions};
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke};

/// Grid line width in logical units.
pub const GRID_LINE_WIDTH: f32 = 1.0;

/// Fixed-period horizontal and vertical lines spanning the surface.
///
/// Rendered into its own pixmap so the eraser can never reach it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayer {
    period: f64,
    color: SerializableColor,
}

impl GridLayer {
    pub fn new(period: f64, color: SerializableColor) -> Self {
        let period = if period.is_finite() && period > 0.0 {
            period
        } else {
            log::warn!("Invalid grid period {}, using {}", period, DEFAULT_GRID_PERIOD);
            DEFAULT_GRID_PERIOD
        };
        Self { period, color }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    /// Line offsets `0, g, 2g, ...` up to and including `extent`.
    ///
    /// Computed by multiplication so positions never drift.
    pub fn line_positions(&self, extent: f64) -> Vec<f64> {
        if !(extent.is_finite() && extent >= 0.0) {
            return Vec::new();
        }
        let count = (extent / self.period).floor() as usize;
        (0..=count).map(|i| i as f64 * self.period).collect()
    }

    /// Rasterize the grid for a surface of `logical_size` at `scale_factor`.
    pub fn render(&self, logical_size: Size, scale_factor: f64) -> RenderResult<Pixmap> {
        let (width, height) = backing_dimensions(logical_size, scale_factor);
        let mut pixmap = allocate_pixmap(width, height)?;

        let w = logical_size.width as f32;
        let h = logical_size.height as f32;
        let mut pb = PathBuilder::new();
        for x in self.line_positions(logical_size.width) {
            pb.move_to(x as f32, 0.0);
            pb.line_to(x as f32, h);
        }
        for y in self.line_positions(logical_size.height) {
            pb.move_to(0.0, y as f32);
            pb.line_to(w, y as f32);
        }

        // Degenerate surfaces produce no path; the pixmap just stays empty.
        if let Some(path) = pb.finish() {
            let mut paint = Paint::default();
            paint.set_color(skia_color(self.color));
            paint.anti_alias = true;
            let stroke = Stroke {
                width: GRID_LINE_WIDTH,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, render_transform(scale_factor), None);
        }

        Ok(pixmap)
    }
}
