//! Shared raster types: errors, surface styling and the render transform.

use sketchgrid_core::{CanvasConfig, SerializableColor};
use thiserror::Error;
use tiny_skia::{Color, Pixmap, Transform};

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    /// The backing bitmap could not be allocated.
    #[error("Canvas unavailable: cannot allocate a {width}x{height} bitmap")]
    CapabilityUnavailable { width: u32, height: u32 },
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Colors and grid spacing for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    /// Grid spacing in logical units.
    pub grid_period: f64,
    pub grid_color: SerializableColor,
    /// Fill behind everything when compositing.
    pub background: SerializableColor,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self::from(&CanvasConfig::default())
    }
}

impl From<&CanvasConfig> for SurfaceStyle {
    fn from(config: &CanvasConfig) -> Self {
        Self {
            grid_period: config.grid_period,
            grid_color: config.grid_color,
            background: config.background_color,
        }
    }
}

/// Convert a stored color into a tiny-skia color.
pub fn skia_color(color: SerializableColor) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// The logical-to-device transform. Applied once per draw call, never per point.
pub fn render_transform(scale_factor: f64) -> Transform {
    let s = scale_factor as f32;
    Transform::from_scale(s, s)
}

/// Allocate a transparent pixmap, reporting failure as a capability error.
pub fn allocate_pixmap(width: u32, height: u32) -> RenderResult<Pixmap> {
    Pixmap::new(width, height).ok_or_else(|| {
        log::error!("Failed to allocate {}x{} pixmap", width, height);
        RendererError::CapabilityUnavailable { width, height }
    })
}
