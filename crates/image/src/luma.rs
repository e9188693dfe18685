//! Luma (perceptual brightness) and the grayscale transform.

use crate::buffer::PixelBuffer;
use tracing::debug;

/// Red weight of the luma formula.
pub const LUMA_R: f64 = 0.299;
/// Green weight of the luma formula.
pub const LUMA_G: f64 = 0.587;
/// Blue weight of the luma formula.
pub const LUMA_B: f64 = 0.114;

/// Luma of one RGB triple: `0.299 R + 0.587 G + 0.114 B`.
///
/// Not rounded. Consumers that need an integer level floor it.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * f64::from(r) + LUMA_G * f64::from(g) + LUMA_B * f64::from(b)
}

/// Luma of the pixel whose first byte is at `i`.
#[inline]
pub(crate) fn luma_at(data: &[u8], i: usize) -> f64 {
    luma(data[i], data[i + 1], data[i + 2])
}

/// Floored luma as a histogram level in `0..=255`.
#[inline]
pub(crate) fn luma_level(r: u8, g: u8, b: u8) -> u8 {
    luma(r, g, b).floor() as u8
}

/// Set R, G and B of every pixel to its floored luma. Alpha is kept.
///
/// # Example
/// ```
/// use citra_image::{grayscale, PixelBuffer};
///
/// let source = PixelBuffer::new(1, 1, vec![200, 100, 50, 128]).unwrap();
/// let gray = grayscale(&source);
/// // 0.299*200 + 0.587*100 + 0.114*50 = 124.2
/// assert_eq!(gray.pixel(0, 0), Some([124, 124, 124, 128]));
/// ```
pub fn grayscale(buffer: &PixelBuffer) -> PixelBuffer {
    debug!(width = buffer.width(), height = buffer.height(), "grayscale");
    buffer.map_pixels(|[r, g, b, a]| {
        let level = luma_level(r, g, b);
        [level, level, level, a]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma(0, 0, 0), 0.0);
        assert_eq!(luma(255, 255, 255), 255.0);
        assert!((luma(255, 0, 0) - 76.245).abs() < 1e-9);
        assert!((luma(0, 255, 0) - 149.685).abs() < 1e-9);
        assert!((luma(0, 0, 255) - 29.07).abs() < 1e-9);
    }

    #[test]
    fn test_luma_level_floors() {
        // 0.299 + 0.587 + 0.114 lands just under 1.0 in binary floating point
        assert_eq!(luma_level(1, 1, 1), 0);
        assert_eq!(luma_level(100, 100, 100), 100);
        assert_eq!(luma_level(200, 100, 50), 124);
    }

    #[test]
    fn test_grayscale_black_pixel() {
        let source = PixelBuffer::new(1, 1, vec![0, 0, 0, 255]).unwrap();
        assert_eq!(grayscale(&source).as_bytes(), &[0, 0, 0, 255]);
    }

    #[test]
    fn test_grayscale_keeps_alpha_and_dimensions() {
        let source = PixelBuffer::new(2, 1, vec![255, 0, 0, 10, 0, 255, 0, 200]).unwrap();
        let gray = grayscale(&source);
        assert_eq!(gray.width(), 2);
        assert_eq!(gray.height(), 1);
        assert_eq!(gray.pixel(0, 0), Some([76, 76, 76, 10]));
        assert_eq!(gray.pixel(1, 0), Some([149, 149, 149, 200]));
    }
}
