use std::path::Path;

use image::{ImageFormat, RgbImage};
use tracing::info;

use crate::error::{FacadeError, Result};

/// Decode a PNG/JPEG file to an 8-bit RGB raster.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    let image = image::open(path)?.to_rgb8();
    if image.width() == 0 || image.height() == 0 {
        return Err(FacadeError::InvalidInput(format!(
            "zero-area raster: {}",
            path.display()
        )));
    }
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "loaded raster"
    );
    Ok(image)
}

/// Encode a raster as PNG.
pub fn save_png(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image.save_with_format(path, ImageFormat::Png)?;
    info!(path = %path.display(), "saved raster");
    Ok(())
}
