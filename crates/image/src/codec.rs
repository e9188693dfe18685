//! Decode and encode at the edge of the pipeline, backed by the image crate.

use crate::buffer::PixelBuffer;
use crate::error::{ImageError, Result};
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Decode any format the image crate reads into an RGBA buffer.
pub fn decode(data: &[u8]) -> Result<PixelBuffer> {
    let img = image::load_from_memory(data)?;
    from_dynamic(img)
}

/// Read and decode an image file.
pub fn open(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)?;
    debug!(path = %path.display(), width = img.width(), height = img.height(), "decoded image");
    from_dynamic(img)
}

/// Encode as PNG.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let img = DynamicImage::ImageRgba8(to_rgba_image(buffer)?);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png)?;
    Ok(out.into_inner())
}

/// Write `buffer` to `path`; the format follows the file extension.
///
/// Formats without an alpha channel (JPEG) get the colour channels only.
pub fn save(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let rgba = to_rgba_image(buffer)?;
    let format = image::ImageFormat::from_path(path)?;
    if format == image::ImageFormat::Jpeg {
        DynamicImage::ImageRgba8(rgba).to_rgb8().save_with_format(path, format)?;
    } else {
        rgba.save_with_format(path, format)?;
    }
    debug!(path = %path.display(), ?format, "saved image");
    Ok(())
}

fn from_dynamic(img: DynamicImage) -> Result<PixelBuffer> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::new(width, height, rgba.into_raw())
}

fn to_rgba_image(buffer: &PixelBuffer) -> Result<RgbaImage> {
    RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec()).ok_or_else(|| {
        ImageError::invalid_buffer(buffer.width(), buffer.height(), buffer.as_bytes().len())
    })
}
