//! RGBA8 pixel buffer shared by every transform.

use crate::error::{ImageError, Result};

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// An owned, row-major RGBA8 image.
///
/// The byte length is always `width * height * 4`; the only way to build a
/// buffer is through a constructor that checks it. Transforms borrow a buffer
/// and return a fresh one, so the input is never written through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    /// [`ImageError::InvalidBuffer`] when either dimension is zero or
    /// `data.len() != width * height * 4`.
    ///
    /// # Example
    /// ```
    /// use citra_image::PixelBuffer;
    ///
    /// let buffer = PixelBuffer::new(1, 1, vec![10, 20, 30, 255]).unwrap();
    /// assert_eq!(buffer.pixel(0, 0), Some([10, 20, 30, 255]));
    ///
    /// assert!(PixelBuffer::new(2, 2, vec![0; 4]).is_err());
    /// ```
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || byte_len(width, height) != Some(data.len()) {
            return Err(ImageError::invalid_buffer(width, height, data.len()));
        }
        Ok(Self { width, height, data })
    }

    /// A buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        if byte_len(width, height).is_none() {
            return Err(ImageError::invalid_buffer(width, height, 0));
        }
        let count = width as usize * height as usize;
        Self::new(width, height, rgba.repeat(count))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x as usize, y as usize);
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Iterate over pixels as `[r, g, b, a]` chunks.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(CHANNELS)
    }

    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * CHANNELS
    }

    /// Bytes of one row.
    #[inline]
    pub(crate) fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Apply `f` to every pixel of a copy of this buffer.
    pub(crate) fn map_pixels<F>(&self, f: F) -> PixelBuffer
    where
        F: Fn([u8; 4]) -> [u8; 4] + Send + Sync,
    {
        let mut out = self.data.clone();
        for_each_row(&mut out, self.row_stride(), |_, row| {
            for px in row.chunks_exact_mut(CHANNELS) {
                let mapped = f([px[0], px[1], px[2], px[3]]);
                px.copy_from_slice(&mapped);
            }
        });
        self.with_data(out)
    }

    /// Same dimensions, new bytes. Callers guarantee the length.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> PixelBuffer {
        debug_assert_eq!(data.len(), self.data.len());
        PixelBuffer {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// `width * height * 4`, or `None` when it does not fit in `usize`.
pub(crate) fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

/// Round and clamp a channel value into `0..=255`.
///
/// Every floating point channel write goes through here.
#[inline]
pub fn clamp_to_byte(value: f64) -> u8 {
    // NaN maps to 0 through the saturating cast.
    value.round().clamp(0.0, 255.0) as u8
}

/// Run `f(y, row)` over each `stride`-byte row of `out`.
///
/// Rows are independent, so with the `parallel` feature they are spread over
/// the rayon pool.
pub(crate) fn for_each_row<F>(out: &mut [u8], stride: usize, f: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }

    #[cfg(not(feature = "parallel"))]
    {
        out.chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        match err {
            ImageError::InvalidBuffer { expected, actual, .. } => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(PixelBuffer::new(0, 3, Vec::new()).is_err());
        assert!(PixelBuffer::new(3, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_oversized_dimensions_are_invalid_not_overflow() {
        match PixelBuffer::new(u32::MAX, u32::MAX, Vec::new()) {
            Err(ImageError::InvalidBuffer { expected, actual, .. }) => {
                assert_eq!(expected, usize::MAX);
                assert_eq!(actual, 0);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            PixelBuffer::filled(u32::MAX, u32::MAX, [0, 0, 0, 255]),
            Err(ImageError::InvalidBuffer { .. })
        ));
        assert_eq!(byte_len(u32::MAX, u32::MAX), None);
        assert_eq!(byte_len(3, 2), Some(24));
    }

    #[test]
    fn test_filled() {
        let buffer = PixelBuffer::filled(3, 2, [1, 2, 3, 4]).unwrap();
        assert_eq!(buffer.as_bytes().len(), 24);
        assert_eq!(buffer.pixel(2, 1), Some([1, 2, 3, 4]));
        assert_eq!(buffer.pixel(3, 0), None);
        assert_eq!(buffer.pixel_count(), 6);
    }

    #[test]
    fn test_clamp_to_byte() {
        assert_eq!(clamp_to_byte(-12.0), 0);
        assert_eq!(clamp_to_byte(300.0), 255);
        assert_eq!(clamp_to_byte(127.4), 127);
        assert_eq!(clamp_to_byte(127.6), 128);
        assert_eq!(clamp_to_byte(f64::NAN), 0);
    }

    #[test]
    fn test_map_pixels_leaves_source_untouched() {
        let source = PixelBuffer::filled(2, 2, [10, 10, 10, 255]).unwrap();
        let mapped = source.map_pixels(|[r, g, b, a]| [255 - r, g, b, a]);
        assert_eq!(source.pixel(0, 0), Some([10, 10, 10, 255]));
        assert_eq!(mapped.pixel(1, 1), Some([245, 10, 10, 255]));
    }
}
