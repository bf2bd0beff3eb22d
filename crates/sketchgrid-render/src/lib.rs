//! SketchGrid Render Library
//!
//! CPU raster backend for the SketchGrid drawing surface, built on tiny-skia.
//! Strokes and the grid are authored in logical units; the backing-store
//! scale is applied once, as the render transform of each draw call.

pub mod export;
pub mod grid;
pub mod raster;
mod renderer;
pub mod stroke_engine;
pub mod surface;

pub use export::{ExportedImage, encode_png};
pub use grid::GridLayer;
pub use renderer::{RenderResult, RendererError, SurfaceStyle, render_transform, skia_color};
pub use stroke_engine::StrokeEngine;
pub use surface::{CanvasSurface, ResizeOutcome};
