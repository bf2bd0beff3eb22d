//! Mapping between viewport pointer positions and canvas space.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Scale factor used when the platform reports something unusable.
pub const FALLBACK_SCALE_FACTOR: f64 = 1.0;

/// Replace a non-finite or non-positive scale factor with the fallback.
pub fn sanitize_scale_factor(scale_factor: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        log::warn!(
            "Invalid backing-store scale factor {}, using {}",
            scale_factor,
            FALLBACK_SCALE_FACTOR
        );
        FALLBACK_SCALE_FACTOR
    }
}

/// Device-pixel dimensions of a backing store for the given logical size.
///
/// Never returns a zero dimension.
pub fn backing_dimensions(logical_size: Size, scale_factor: f64) -> (u32, u32) {
    let scale = sanitize_scale_factor(scale_factor);
    let to_px = |extent: f64| {
        let px = (extent.max(0.0) * scale).round();
        if px.is_finite() { px.max(1.0) as u32 } else { 1 }
    };
    (to_px(logical_size.width), to_px(logical_size.height))
}

/// Converts pointer positions into canvas-space coordinates.
///
/// Canvas space is logical: `(0, 0)` is the surface's top-left corner and
/// `(width, height)` its bottom-right, independent of pixel density. The
/// backing-store scale is applied once, through [`render_transform`], at the
/// render context.
///
/// [`render_transform`]: CoordinateMapper::render_transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    /// Surface layout box in viewport coordinates.
    bounds: Rect,
    /// Ratio between device pixels and logical units.
    scale_factor: f64,
}

impl CoordinateMapper {
    /// Create a mapper for a surface laid out at `bounds`.
    pub fn new(bounds: Rect, scale_factor: f64) -> Self {
        Self {
            bounds: bounds.abs(),
            scale_factor: sanitize_scale_factor(scale_factor),
        }
    }

    /// Update the surface layout box.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds.abs();
    }

    /// Update the backing-store scale factor.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = sanitize_scale_factor(scale_factor);
    }

    /// Surface layout box in viewport coordinates.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Logical size of the surface.
    pub fn logical_size(&self) -> Size {
        self.bounds.size()
    }

    /// Backing-store scale factor.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Device-pixel dimensions of the backing store.
    pub fn backing_size(&self) -> (u32, u32) {
        backing_dimensions(self.logical_size(), self.scale_factor)
    }

    /// The single logical-to-device transform for the render context.
    pub fn render_transform(&self) -> Affine {
        Affine::scale(self.scale_factor)
    }

    /// Whether a viewport position lies over the surface (edges included).
    pub fn contains(&self, viewport_point: Point) -> bool {
        viewport_point.x >= self.bounds.x0
            && viewport_point.x <= self.bounds.x1
            && viewport_point.y >= self.bounds.y0
            && viewport_point.y <= self.bounds.y1
    }

    /// Convert a viewport position to canvas space.
    ///
    /// Positions outside the surface are clamped onto its edge so a fast drag
    /// past the boundary still reaches it.
    pub fn to_canvas(&self, viewport_point: Point) -> Point {
        let size = self.logical_size();
        let local = viewport_point - Vec2::new(self.bounds.x0, self.bounds.y0);
        Point::new(
            local.x.clamp(0.0, size.width),
            local.y.clamp(0.0, size.height),
        )
    }
}
