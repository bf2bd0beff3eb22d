//! PNG export of a composited pixmap.

use crate::renderer::{RenderResult, RendererError};
use tiny_skia::Pixmap;

/// A flattened snapshot of the surface.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub width: u32,
    pub height: u32,
    /// Straight-alpha RGBA8 pixels, row-major.
    pub rgba: Vec<u8>,
    /// PNG-encoded bytes of `rgba`.
    pub png: Vec<u8>,
}

/// Convert a premultiplied pixmap to straight-alpha RGBA8.
pub fn demultiplied_rgba(pixmap: &Pixmap) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    rgba
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(format!("PNG header: {e}")))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| RendererError::Encode(format!("PNG data: {e}")))?;
        writer
            .finish()
            .map_err(|e| RendererError::Encode(format!("PNG finish: {e}")))?;
    }
    Ok(png_data)
}

/// Flatten and encode a pixmap.
pub fn export_pixmap(pixmap: &Pixmap) -> RenderResult<ExportedImage> {
    let rgba = demultiplied_rgba(pixmap);
    let png = encode_png(&rgba, pixmap.width(), pixmap.height())?;
    log::debug!("Encoded {}x{} PNG ({} bytes)", pixmap.width(), pixmap.height(), png.len());
    Ok(ExportedImage {
        width: pixmap.width(),
        height: pixmap.height(),
        rgba,
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    #[test]
    fn test_demultiply() {
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        pixmap.fill(Color::from_rgba8(200, 100, 50, 128));
        let rgba = demultiplied_rgba(&pixmap);
        assert_eq!(rgba[3], 128);
        assert!((rgba[0] as i32 - 200).abs() <= 2);
        assert!((rgba[1] as i32 - 100).abs() <= 2);
    }

    #[test]
    fn test_png_signature_and_size() {
        let mut pixmap = Pixmap::new(3, 2).unwrap();
        pixmap.fill(Color::WHITE);
        let image = export_pixmap(&pixmap).unwrap();

        assert_eq!(&image.png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.rgba.len(), 3 * 2 * 4);
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let result = encode_png(&[0u8; 4], 2, 2);
        assert!(matches!(result, Err(RendererError::Encode(_))));
    }
}
