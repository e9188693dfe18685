//! Error types for the image crate.

use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur during image operations.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Pixel data does not match the declared dimensions
    #[error("Invalid buffer: {width}x{height} RGBA needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Required byte length (`width * height * 4`)
        expected: usize,
        /// Byte length actually supplied
        actual: usize,
    },

    /// Contrast value at the singularity of the contrast factor
    #[error("Degenerate contrast {0}: contrast must stay within (-259, 259)")]
    DegenerateContrast(i32),

    /// Edge method name not recognised
    #[error("Unknown edge method: {0} (expected sobel, prewitt, roberts, laplace or frei-chen)")]
    UnknownEdgeMethod(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Decoding or encoding failed in the codec backend
    #[cfg(feature = "processing")]
    #[error("Codec error: {0}")]
    CodecError(#[from] image::ImageError),
}

impl ImageError {
    /// Build an [`ImageError::InvalidBuffer`] for the given dimensions and data length.
    pub(crate) fn invalid_buffer(width: u32, height: u32, actual: usize) -> Self {
        Self::InvalidBuffer {
            width,
            height,
            expected: crate::buffer::byte_len(width, height).unwrap_or(usize::MAX),
            actual,
        }
    }
}
