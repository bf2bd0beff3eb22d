//! The backing store: grid layer, stroke layer and history baseline.

use crate::export::{ExportedImage, export_pixmap};
use crate::grid::GridLayer;
use crate::raster::rasterize_stroke;
use crate::renderer::{RenderResult, SurfaceStyle, allocate_pixmap, render_transform, skia_color};
use kurbo::Size;
use sketchgrid_core::{HistoryEntry, SerializableColor, Stroke, backing_dimensions, sanitize_scale_factor};
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

/// What a resize did to the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Same logical size and scale; nothing was reallocated.
    Unchanged,
    /// Bitmaps were reallocated and history replayed onto them.
    Replayed,
    /// Content could not be restored and the stroke layer is empty.
    /// The owner must start a new history.
    Cleared,
}

/// Owns the raster layers of one canvas.
///
/// Layers are composited only for display and export: background, grid
/// (when visible), then strokes. The grid pixmap is written only when the
/// backing store is allocated, so clears, erasing and replays never touch it.
pub struct CanvasSurface {
    logical_size: Size,
    scale_factor: f64,
    grid: GridLayer,
    grid_pixmap: Pixmap,
    strokes: Pixmap,
    /// Result of history entries evicted by the capacity cap.
    baseline: Option<Pixmap>,
    /// Largest backing size seen at the current scale. The baseline is
    /// kept at this size so that shrinking never crops it.
    extent: (u32, u32),
    grid_visible: bool,
    background: SerializableColor,
}

impl CanvasSurface {
    /// Allocate a surface of `logical_size` at `scale_factor`.
    pub fn new(
        logical_size: Size,
        scale_factor: f64,
        style: &SurfaceStyle,
        grid_visible: bool,
    ) -> RenderResult<Self> {
        let scale_factor = sanitize_scale_factor(scale_factor);
        let grid = GridLayer::new(style.grid_period, style.grid_color);
        let (width, height) = backing_dimensions(logical_size, scale_factor);
        let strokes = allocate_pixmap(width, height)?;
        let grid_pixmap = grid.render(logical_size, scale_factor)?;

        log::info!(
            "Canvas surface allocated: {}x{} logical, {}x{} px (scale {})",
            logical_size.width,
            logical_size.height,
            width,
            height,
            scale_factor
        );

        Ok(Self {
            logical_size,
            scale_factor,
            grid,
            grid_pixmap,
            strokes,
            baseline: None,
            extent: (width, height),
            grid_visible,
            background: style.background,
        })
    }

    pub fn logical_size(&self) -> Size {
        self.logical_size
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Device-pixel dimensions of every layer.
    pub fn backing_size(&self) -> (u32, u32) {
        (self.strokes.width(), self.strokes.height())
    }

    /// Transform applied to every draw call on this surface.
    pub fn transform(&self) -> Transform {
        render_transform(self.scale_factor)
    }

    pub fn grid(&self) -> &GridLayer {
        &self.grid
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Show or hide the grid. Takes effect at composite time.
    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    /// Read-only view of the stroke layer.
    pub fn stroke_layer(&self) -> &Pixmap {
        &self.strokes
    }

    /// Read-only view of the grid layer.
    pub fn grid_layer(&self) -> &Pixmap {
        &self.grid_pixmap
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    /// Device-pixel dimensions of the baseline, if one exists.
    pub fn baseline_size(&self) -> Option<(u32, u32)> {
        self.baseline.as_ref().map(|b| (b.width(), b.height()))
    }

    pub(crate) fn strokes_mut(&mut self) -> &mut Pixmap {
        &mut self.strokes
    }

    /// Wipe the visible stroke content. The grid layer is untouched.
    ///
    /// The baseline is kept so that undoing a clear can restore evicted
    /// history; see [`reset`](Self::reset) to drop it as well.
    pub fn clear(&mut self) {
        self.strokes.fill(Color::TRANSPARENT);
    }

    /// Wipe the stroke layer and the baseline.
    pub fn reset(&mut self) {
        self.clear();
        self.baseline = None;
    }

    /// Rasterize a committed stroke onto the stroke layer.
    pub fn draw_stroke(&mut self, stroke: &Stroke) {
        let transform = self.transform();
        rasterize_stroke(&mut self.strokes, stroke, transform);
    }

    /// Apply one history entry on top of the current stroke layer.
    pub fn apply(&mut self, entry: &HistoryEntry) {
        match entry {
            HistoryEntry::Stroke(stroke) => self.draw_stroke(stroke),
            HistoryEntry::Clear => self.clear(),
        }
    }

    /// Rebuild the stroke layer from the baseline (or blank) plus `applied`.
    pub fn replay(&mut self, applied: &[HistoryEntry]) {
        match &self.baseline {
            Some(baseline) => copy_top_left(baseline, &mut self.strokes),
            None => self.strokes.fill(Color::TRANSPARENT),
        }
        for entry in applied {
            self.apply(entry);
        }
        log::debug!("Replayed {} history entries", applied.len());
    }

    /// Fold entries evicted from history into the baseline.
    pub fn bake_baseline(&mut self, evicted: &[HistoryEntry]) -> RenderResult<()> {
        if evicted.is_empty() {
            return Ok(());
        }
        let transform = self.transform();
        let mut baseline = match self.baseline.take() {
            Some(baseline) => baseline,
            None => allocate_pixmap(self.extent.0, self.extent.1)?,
        };
        for entry in evicted {
            match entry {
                HistoryEntry::Stroke(stroke) => rasterize_stroke(&mut baseline, stroke, transform),
                HistoryEntry::Clear => baseline.fill(Color::TRANSPARENT),
            }
        }
        self.baseline = Some(baseline);
        log::debug!("Baked {} evicted entries into baseline", evicted.len());
        Ok(())
    }

    /// Reallocate every layer for a new size or scale and restore content.
    ///
    /// On a scale change the baseline cannot be re-rasterized, so if one
    /// exists the surface is cleared and [`ResizeOutcome::Cleared`] returned.
    /// At the same scale the baseline only ever grows; pixels outside the
    /// visible area come back when the canvas grows again.
    /// On allocation failure the surface is left as it was.
    pub fn resize(
        &mut self,
        logical_size: Size,
        scale_factor: f64,
        applied: &[HistoryEntry],
    ) -> RenderResult<ResizeOutcome> {
        let scale_factor = sanitize_scale_factor(scale_factor);
        if logical_size == self.logical_size && scale_factor == self.scale_factor {
            return Ok(ResizeOutcome::Unchanged);
        }

        let (width, height) = backing_dimensions(logical_size, scale_factor);
        let strokes = allocate_pixmap(width, height)?;
        let grid_pixmap = self.grid.render(logical_size, scale_factor)?;

        let scale_changed = scale_factor != self.scale_factor;
        let lost_baseline = scale_changed && self.baseline.is_some();
        let extent = if scale_changed {
            (width, height)
        } else {
            (self.extent.0.max(width), self.extent.1.max(height))
        };
        let baseline = match self.baseline.take() {
            // Same density: baked pixels keep their device position.
            Some(old) if !scale_changed && (old.width(), old.height()) != extent => {
                let mut grown = match allocate_pixmap(extent.0, extent.1) {
                    Ok(grown) => grown,
                    Err(e) => {
                        self.baseline = Some(old);
                        return Err(e);
                    }
                };
                copy_top_left(&old, &mut grown);
                Some(grown)
            }
            Some(old) if !scale_changed => Some(old),
            _ => None,
        };

        self.logical_size = logical_size;
        self.scale_factor = scale_factor;
        self.strokes = strokes;
        self.grid_pixmap = grid_pixmap;
        self.baseline = baseline;
        self.extent = extent;

        if lost_baseline {
            log::warn!(
                "Scale changed to {} with evicted history; canvas cleared",
                scale_factor
            );
            return Ok(ResizeOutcome::Cleared);
        }

        self.replay(applied);
        log::info!("Canvas resized to {}x{} px, history replayed", width, height);
        Ok(ResizeOutcome::Replayed)
    }

    /// Flatten background, grid and strokes into a new pixmap.
    pub fn composite(&self) -> RenderResult<Pixmap> {
        let mut out = allocate_pixmap(self.strokes.width(), self.strokes.height())?;
        out.fill(skia_color(self.background));
        let paint = PixmapPaint::default();
        if self.grid_visible {
            out.draw_pixmap(0, 0, self.grid_pixmap.as_ref(), &paint, Transform::identity(), None);
        }
        out.draw_pixmap(0, 0, self.strokes.as_ref(), &paint, Transform::identity(), None);
        Ok(out)
    }

    /// PNG snapshot of the composited surface at backing-store resolution.
    pub fn export_png(&self) -> RenderResult<ExportedImage> {
        let image = export_pixmap(&self.composite()?)?;
        log::info!("Exported {}x{} PNG", image.width, image.height);
        Ok(image)
    }
}

/// Copy the overlapping top-left region of `src` into `dst`, leaving the
/// rest of `dst` transparent.
fn copy_top_left(src: &Pixmap, dst: &mut Pixmap) {
    dst.fill(Color::TRANSPARENT);
    let row_bytes = src.width().min(dst.width()) as usize * 4;
    let rows = src.height().min(dst.height()) as usize;
    let src_stride = src.width() as usize * 4;
    let dst_stride = dst.width() as usize * 4;
    let src_data = src.data();
    let dst_data = dst.data_mut();
    for y in 0..rows {
        dst_data[y * dst_stride..y * dst_stride + row_bytes]
            .copy_from_slice(&src_data[y * src_stride..y * src_stride + row_bytes]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke_engine::StrokeEngine;
    use kurbo::Point;
    use sketchgrid_core::{BrushWidth, HistoryStack, OpenStroke, ToolKind, ToolSnapshot};

    fn style() -> SurfaceStyle {
        SurfaceStyle::default()
    }

    fn surface(scale: f64) -> CanvasSurface {
        CanvasSurface::new(Size::new(100.0, 60.0), scale, &style(), true).unwrap()
    }

    fn stroke(tool: ToolKind, width: i64, points: &[Point]) -> Stroke {
        let snapshot = ToolSnapshot {
            tool,
            width: BrushWidth::clamped(width),
        };
        let mut open = OpenStroke::begin(points[0], snapshot, SerializableColor::COPPER);
        for p in &points[1..] {
            open.push(*p);
        }
        open.finish()
    }

    fn diagonal(i: usize) -> Stroke {
        let offset = i as f64 * 7.0;
        stroke(
            ToolKind::Brush,
            2 + i as i64,
            &[Point::new(5.0 + offset, 5.0), Point::new(20.0 + offset, 50.0)],
        )
    }

    /// Draw through the engine, the way pointer input does.
    fn draw_live(surface: &mut CanvasSurface, stroke: &Stroke) {
        let mut engine = StrokeEngine::new();
        let snapshot = ToolSnapshot {
            tool: stroke.tool(),
            width: stroke.width(),
        };
        engine.open(surface, stroke.points()[0], snapshot, stroke.color());
        for p in &stroke.points()[1..] {
            engine.extend(surface, *p);
        }
        engine.close();
    }

    fn rgba_at(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        (c.red(), c.green(), c.blue(), c.alpha())
    }

    #[test]
    fn test_new_surface_has_grid_and_empty_strokes() {
        let s = surface(1.0);
        assert_eq!(s.backing_size(), (100, 60));
        assert!(s.stroke_layer().data().iter().all(|&b| b == 0));
        assert!(s.grid_layer().data().iter().any(|&b| b != 0));
    }

    #[test]
    fn test_erase_leaves_grid_intact() {
        let mut s = surface(1.0);
        let grid_before = s.grid_layer().data().to_vec();
        let line = [Point::new(10.0, 10.0), Point::new(90.0, 10.0)];

        draw_live(&mut s, &stroke(ToolKind::Brush, 6, &line));
        draw_live(&mut s, &stroke(ToolKind::Eraser, 6, &line));

        for x in 14..=86 {
            for y in 8..=11 {
                assert_eq!(s.stroke_layer().pixel(x, y).unwrap().alpha(), 0);
            }
        }
        assert_eq!(s.grid_layer().data(), &grid_before[..]);

        // The grid still shows through where the stroke was erased.
        let composite = s.composite().unwrap();
        assert!((19..=20).any(|x| rgba_at(&composite, x, 10) != (255, 255, 255, 255)));
        assert_eq!(rgba_at(&composite, 30, 10), (255, 255, 255, 255));
    }

    #[test]
    fn test_grid_unchanged_by_clear_replay_and_resize() {
        let mut s = surface(1.0);
        let grid_before = s.grid_layer().data().to_vec();
        let entries = vec![HistoryEntry::Stroke(diagonal(0)), HistoryEntry::Clear];

        for entry in &entries {
            s.apply(entry);
        }
        s.clear();
        s.replay(&entries[..1]);
        assert_eq!(s.grid_layer().data(), &grid_before[..]);

        s.resize(Size::new(140.0, 80.0), 1.0, &entries).unwrap();
        s.resize(Size::new(100.0, 60.0), 1.0, &entries).unwrap();
        assert_eq!(s.grid_layer().data(), &grid_before[..]);
    }

    #[test]
    fn test_undo_redo_roundtrip_is_pixel_identical() {
        let strokes: Vec<Stroke> = (0..5).map(diagonal).collect();

        let mut direct = surface(1.0);
        for st in &strokes {
            draw_live(&mut direct, st);
        }

        let mut s = surface(1.0);
        let mut history = HistoryStack::new();
        for st in &strokes {
            draw_live(&mut s, st);
            history.commit(HistoryEntry::Stroke(st.clone()));
        }
        for _ in 0..3 {
            assert!(history.undo());
            s.replay(history.applied());
        }
        assert_ne!(s.stroke_layer().data(), direct.stroke_layer().data());
        while let Some(entry) = history.redo() {
            s.apply(entry);
        }

        assert_eq!(s.stroke_layer().data(), direct.stroke_layer().data());
    }

    #[test]
    fn test_undo_clear_restores_strokes() {
        let mut s = surface(1.0);
        let mut history = HistoryStack::new();
        let first = diagonal(1);
        draw_live(&mut s, &first);
        history.commit(HistoryEntry::Stroke(first));
        let before_clear = s.stroke_layer().data().to_vec();

        s.clear();
        history.commit(HistoryEntry::Clear);
        assert!(s.stroke_layer().data().iter().all(|&b| b == 0));

        assert!(history.undo());
        s.replay(history.applied());
        assert_eq!(s.stroke_layer().data(), &before_clear[..]);
    }

    #[test]
    fn test_capacity_eviction_keeps_pixels() {
        let strokes: Vec<Stroke> = (0..6).map(diagonal).collect();

        let mut uncapped = surface(1.0);
        for st in &strokes {
            uncapped.draw_stroke(st);
        }

        let mut s = surface(1.0);
        let mut history = HistoryStack::with_capacity(2);
        for st in &strokes {
            s.draw_stroke(st);
            let evicted = history.commit(HistoryEntry::Stroke(st.clone()));
            s.bake_baseline(&evicted).unwrap();
        }
        assert!(s.has_baseline());
        assert_eq!(history.len(), 2);

        s.replay(history.applied());
        assert_eq!(s.stroke_layer().data(), uncapped.stroke_layer().data());

        // Undo past the cap boundary is refused; undoing what remains lands on the baseline.
        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
        s.replay(history.applied());
        let mut expected = surface(1.0);
        for st in &strokes[..4] {
            expected.draw_stroke(st);
        }
        assert_eq!(s.stroke_layer().data(), expected.stroke_layer().data());
    }

    #[test]
    fn test_resize_replays_at_new_scale() {
        let entries = vec![HistoryEntry::Stroke(stroke(
            ToolKind::Brush,
            3,
            &[Point::new(10.0, 10.0), Point::new(50.0, 10.0)],
        ))];
        let mut s = surface(1.0);
        s.apply(&entries[0]);

        let outcome = s.resize(Size::new(100.0, 60.0), 2.0, &entries).unwrap();
        assert_eq!(outcome, ResizeOutcome::Replayed);
        assert_eq!(s.backing_size(), (200, 120));
        assert_eq!(rgba_at(s.stroke_layer(), 60, 20), (184, 115, 51, 255));

        let mut fresh = surface(2.0);
        fresh.replay(&entries);
        assert_eq!(s.stroke_layer().data(), fresh.stroke_layer().data());
        assert_eq!(s.grid_layer().data(), fresh.grid_layer().data());
    }

    #[test]
    fn test_resize_same_size_is_unchanged() {
        let mut s = surface(1.0);
        let outcome = s.resize(Size::new(100.0, 60.0), 1.0, &[]).unwrap();
        assert_eq!(outcome, ResizeOutcome::Unchanged);
    }

    #[test]
    fn test_resize_scale_change_with_baseline_clears() {
        let mut s = surface(1.0);
        s.bake_baseline(&[HistoryEntry::Stroke(diagonal(0))]).unwrap();
        s.replay(&[]);
        assert!(s.stroke_layer().data().iter().any(|&b| b != 0));

        let outcome = s.resize(Size::new(100.0, 60.0), 2.0, &[]).unwrap();
        assert_eq!(outcome, ResizeOutcome::Cleared);
        assert!(!s.has_baseline());
        assert!(s.stroke_layer().data().iter().all(|&b| b == 0));
        assert!(s.grid_layer().data().iter().any(|&b| b != 0));
    }

    #[test]
    fn test_resize_same_scale_keeps_baseline() {
        let mut s = surface(1.0);
        s.bake_baseline(&[HistoryEntry::Stroke(diagonal(0))]).unwrap();
        s.replay(&[]);

        let outcome = s.resize(Size::new(120.0, 70.0), 1.0, &[]).unwrap();
        assert_eq!(outcome, ResizeOutcome::Replayed);
        assert!(s.has_baseline());
        assert_eq!(s.baseline_size(), Some((120, 70)));
        assert!(s.stroke_layer().pixel(12, 27).unwrap().alpha() > 0);
    }

    #[test]
    fn test_shrink_then_grow_restores_baseline() {
        let mut s = surface(1.0);
        s.bake_baseline(&[HistoryEntry::Stroke(diagonal(0))]).unwrap();
        s.replay(&[]);
        let before = s.stroke_layer().data().to_vec();

        s.resize(Size::new(10.0, 10.0), 1.0, &[]).unwrap();
        assert_eq!(s.backing_size(), (10, 10));
        assert_eq!(s.baseline_size(), Some((100, 60)));

        let outcome = s.resize(Size::new(100.0, 60.0), 1.0, &[]).unwrap();
        assert_eq!(outcome, ResizeOutcome::Replayed);
        assert_eq!(s.stroke_layer().data(), &before[..]);
    }

    #[test]
    fn test_baseline_baked_while_shrunk_keeps_full_extent() {
        let far = stroke(ToolKind::Brush, 4, &[Point::new(90.0, 10.0), Point::new(90.0, 50.0)]);
        let mut uncapped = surface(1.0);
        uncapped.draw_stroke(&far);

        let mut s = surface(1.0);
        s.draw_stroke(&far);
        s.resize(Size::new(40.0, 60.0), 1.0, &[HistoryEntry::Stroke(far.clone())]).unwrap();
        // The far stroke is evicted while the canvas is narrow.
        s.bake_baseline(&[HistoryEntry::Stroke(far)]).unwrap();
        assert_eq!(s.baseline_size(), Some((100, 60)));

        s.resize(Size::new(100.0, 60.0), 1.0, &[]).unwrap();
        assert!(s.stroke_layer().pixel(90, 30).unwrap().alpha() > 0);
        assert_eq!(s.stroke_layer().data(), uncapped.stroke_layer().data());
    }

    #[test]
    fn test_export_scenario() {
        let mut s = surface(1.0);
        draw_live(
            &mut s,
            &stroke(ToolKind::Brush, 3, &[Point::new(10.0, 10.0), Point::new(50.0, 10.0)]),
        );
        let image = s.export_png().unwrap();
        assert_eq!((image.width, image.height), (100, 60));

        let decoder = png::Decoder::new(&image.png[..]);
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        reader.next_frame(&mut buf).unwrap();
        assert_eq!(buf, image.rgba);

        let px = |x: usize, y: usize| {
            let i = (y * 100 + x) * 4;
            (buf[i], buf[i + 1], buf[i + 2], buf[i + 3])
        };
        assert_eq!(px(30, 10), (184, 115, 51, 255));
        assert_eq!(px(30, 9), (184, 115, 51, 255));
        assert_eq!(px(30, 30), (255, 255, 255, 255));

        s.clear();
        let cleared = s.export_png().unwrap();
        let px = |x: usize, y: usize| {
            let i = (y * 100 + x) * 4;
            (cleared.rgba[i], cleared.rgba[i + 1], cleared.rgba[i + 2], cleared.rgba[i + 3])
        };
        assert_eq!(px(30, 10), (255, 255, 255, 255));
        assert!((39..=40).any(|x| px(x, 10) != (255, 255, 255, 255)));
    }

    #[test]
    fn test_hidden_grid_not_composited() {
        let mut s = surface(1.0);
        s.set_grid_visible(false);
        let composite = s.composite().unwrap();
        assert!(composite.pixels().iter().all(|p| p.alpha() == 255 && p.red() == 255));
    }
}
