//! Brightness and contrast remapping.

use crate::buffer::{clamp_to_byte, PixelBuffer};
use crate::error::{ImageError, Result};
use tracing::debug;

/// Nominal slider range for brightness and contrast.
///
/// Values outside it are accepted; only the resulting channel is clamped.
pub const TONE_RANGE: std::ops::RangeInclusive<i32> = -100..=100;

/// Contrast values where the factor's denominator vanishes or flips.
const DEGENERATE_CONTRAST: i32 = 259;

/// Contrast multiplier `259 (c + 255) / (255 (259 - c))`.
///
/// # Errors
/// [`ImageError::DegenerateContrast`] for `contrast == ±259`.
pub fn contrast_factor(contrast: i32) -> Result<f64> {
    if contrast.unsigned_abs() == DEGENERATE_CONTRAST.unsigned_abs() {
        return Err(ImageError::DegenerateContrast(contrast));
    }
    let c = f64::from(contrast);
    Ok((259.0 * (c + 255.0)) / (255.0 * (259.0 - c)))
}

/// Add `brightness` to R, G and B, then stretch around 128 by the contrast factor.
///
/// Brightness is applied before contrast. Alpha is untouched.
///
/// # Errors
/// [`ImageError::DegenerateContrast`] when `contrast` is exactly 259 or -259.
///
/// # Example
/// ```
/// use citra_image::{tone_adjust, PixelBuffer};
///
/// let source = PixelBuffer::new(1, 1, vec![100, 150, 200, 255]).unwrap();
/// let brighter = tone_adjust(&source, 20, 0).unwrap();
/// assert_eq!(brighter.pixel(0, 0), Some([120, 170, 220, 255]));
/// ```
pub fn tone_adjust(buffer: &PixelBuffer, brightness: i32, contrast: i32) -> Result<PixelBuffer> {
    let factor = contrast_factor(contrast)?;
    let offset = f64::from(brightness);
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        brightness,
        contrast,
        factor,
        "tone adjust"
    );

    let remap = |channel: u8| {
        let v = f64::from(channel) + offset;
        clamp_to_byte(factor * (v - 128.0) + 128.0)
    };

    Ok(buffer.map_pixels(|[r, g, b, a]| [remap(r), remap(g), remap(b), a]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelBuffer {
        PixelBuffer::new(2, 1, vec![0, 64, 128, 7, 192, 250, 255, 99]).unwrap()
    }

    #[test]
    fn test_zero_is_identity() {
        let source = sample();
        assert_eq!(tone_adjust(&source, 0, 0).unwrap(), source);
    }

    #[test]
    fn test_factor_at_zero_is_one() {
        assert_eq!(contrast_factor(0).unwrap(), 1.0);
    }

    #[test]
    fn test_brightness_clamps() {
        let out = tone_adjust(&sample(), 100, 0).unwrap();
        assert_eq!(out.pixel(0, 0), Some([100, 164, 228, 7]));
        assert_eq!(out.pixel(1, 0), Some([255, 255, 255, 99]));

        let out = tone_adjust(&sample(), -100, 0).unwrap();
        assert_eq!(out.pixel(0, 0), Some([0, 0, 28, 7]));
    }

    #[test]
    fn test_brightness_applied_before_contrast() {
        // factor(100) = 259*355 / (255*159) ~= 2.2677
        let source = PixelBuffer::new(1, 1, vec![118, 128, 138, 255]).unwrap();
        let out = tone_adjust(&source, 10, 100).unwrap();
        // 118+10 sits on the pivot; 138+10 -> 128 + 20*2.2677 = 173.35
        assert_eq!(out.pixel(0, 0), Some([128, 151, 173, 255]));
    }

    #[test]
    fn test_minimum_contrast_flattens_to_mid_gray() {
        let out = tone_adjust(&sample(), 0, -255).unwrap();
        for px in out.pixels() {
            assert_eq!(&px[..3], &[128, 128, 128]);
        }
    }

    #[test]
    fn test_out_of_range_values_are_accepted() {
        assert!(tone_adjust(&sample(), 500, 200).is_ok());
        assert!(tone_adjust(&sample(), -500, -258).is_ok());
    }

    #[test]
    fn test_extreme_parameters_do_not_overflow() {
        let out = tone_adjust(&sample(), 0, i32::MIN).unwrap();
        assert_eq!(out.width(), 2);
        assert!(tone_adjust(&sample(), 0, i32::MAX).is_ok());
        assert!(tone_adjust(&sample(), i32::MIN, i32::MIN).is_ok());
        assert!(contrast_factor(i32::MIN).unwrap().is_finite());
    }

    #[test]
    fn test_degenerate_contrast_is_rejected() {
        assert!(matches!(
            tone_adjust(&sample(), 0, 259),
            Err(ImageError::DegenerateContrast(259))
        ));
        assert!(matches!(
            tone_adjust(&sample(), 0, -259),
            Err(ImageError::DegenerateContrast(-259))
        ));
    }
}
