//! Native file dialog and clipboard access for export.

use crate::sketchpad::{SketchError, Sketchpad};
use sketchgrid_render::ExportedImage;
use std::path::PathBuf;

/// Ask for a destination and write the drawing as PNG.
///
/// Returns `Ok(None)` if the dialog was cancelled.
pub fn save_png(pad: &Sketchpad, name: &str) -> Result<Option<PathBuf>, SketchError> {
    let dialog = rfd::FileDialog::new()
        .set_title("Save Drawing")
        .set_file_name(format!("{}.png", name))
        .add_filter("PNG Image", &["png"]);

    let Some(path) = dialog.save_file() else {
        log::debug!("Save cancelled");
        return Ok(None);
    };
    pad.save_png(&path)?;
    Ok(Some(path))
}

/// Copy an exported image to the clipboard.
pub fn copy_image_to_clipboard(image: &ExportedImage) -> Result<(), SketchError> {
    // arboard takes straight RGBA pixels, not the PNG bytes
    let image_data = arboard::ImageData {
        width: image.width as usize,
        height: image.height as usize,
        bytes: std::borrow::Cow::Borrowed(&image.rgba),
    };

    let mut clipboard = arboard::Clipboard::new().map_err(|e| SketchError::Clipboard(e.to_string()))?;
    clipboard
        .set_image(image_data)
        .map_err(|e| SketchError::Clipboard(e.to_string()))?;
    log::info!("Copied {}x{} image to clipboard", image.width, image.height);
    Ok(())
}
