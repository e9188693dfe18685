//! Binarization against a luma threshold.

use crate::buffer::PixelBuffer;
use crate::luma::luma;
use tracing::debug;

/// Threshold used when the caller has no preference.
pub const DEFAULT_THRESHOLD: i32 = 128;

/// Map each pixel to white when its luma is strictly greater than `level`,
/// black otherwise. Alpha is kept.
///
/// `level` is not clamped: anything below 0 turns every pixel white and
/// anything at or above 255 turns every pixel black.
///
/// # Example
/// ```
/// use citra_image::{threshold, PixelBuffer};
///
/// let white = PixelBuffer::new(1, 1, vec![255, 255, 255, 255]).unwrap();
/// assert_eq!(threshold(&white, 128).as_bytes(), &[255, 255, 255, 255]);
/// assert_eq!(threshold(&white, 255).as_bytes(), &[0, 0, 0, 255]);
/// ```
pub fn threshold(buffer: &PixelBuffer, level: i32) -> PixelBuffer {
    debug!(width = buffer.width(), height = buffer.height(), level, "threshold");
    let level = f64::from(level);
    buffer.map_pixels(|[r, g, b, a]| {
        let v = if luma(r, g, b) > level { 255 } else { 0 };
        [v, v, v, a]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_comparison() {
        let gray = PixelBuffer::filled(1, 1, [100, 100, 100, 255]).unwrap();
        assert_eq!(threshold(&gray, 99).pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(threshold(&gray, 100).pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_out_of_range_levels() {
        let black = PixelBuffer::filled(2, 2, [0, 0, 0, 40]).unwrap();
        assert!(threshold(&black, -1).pixels().all(|px| px == [255, 255, 255, 40]));

        let white = PixelBuffer::filled(2, 2, [255, 255, 255, 40]).unwrap();
        assert!(threshold(&white, 300).pixels().all(|px| px == [0, 0, 0, 40]));
    }

    #[test]
    fn test_binary_input_is_stable() {
        let source = PixelBuffer::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
        let once = threshold(&source, 128);
        assert_eq!(threshold(&once, 128), once);
    }
}
