//! The edge detection capability, independent of where the work runs.
//!
//! Local convolution lives in this crate ([`LocalEdgeDetector`]); a remote
//! HTTP implementation lives in `citra-api-client`. Callers pick one at
//! construction time and talk to it through [`EdgeDetector`].

use crate::buffer::PixelBuffer;
use crate::edges::{detect_edges, EdgeMethod};
use crate::error::ImageError;
use std::future::Future;

/// Input to an edge detector.
///
/// Local detection works on `pixels`. Remote services want the original file,
/// so the encoded bytes travel along when the caller still has them.
#[derive(Debug, Clone, Copy)]
pub struct EdgeSource<'a> {
    pixels: &'a PixelBuffer,
    encoded: Option<&'a [u8]>,
}

impl<'a> EdgeSource<'a> {
    /// Source with decoded pixels only.
    pub fn new(pixels: &'a PixelBuffer) -> Self {
        Self {
            pixels,
            encoded: None,
        }
    }

    /// Attach the encoded file the pixels were decoded from.
    pub fn with_encoded(mut self, encoded: &'a [u8]) -> Self {
        self.encoded = Some(encoded);
        self
    }

    /// Decoded pixels.
    pub fn pixels(&self) -> &'a PixelBuffer {
        self.pixels
    }

    /// Original encoded file, if known.
    pub fn encoded(&self) -> Option<&'a [u8]> {
        self.encoded
    }
}

/// Something that turns an image into an edge map.
pub trait EdgeDetector {
    /// Failure type of this implementation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce the edge map of `source` with `method`.
    fn detect_edges(
        &self,
        source: EdgeSource<'_>,
        method: EdgeMethod,
    ) -> impl Future<Output = Result<PixelBuffer, Self::Error>> + Send;
}

/// In-process convolution. Completes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEdgeDetector;

impl EdgeDetector for LocalEdgeDetector {
    type Error = ImageError;

    fn detect_edges(
        &self,
        source: EdgeSource<'_>,
        method: EdgeMethod,
    ) -> impl Future<Output = Result<PixelBuffer, Self::Error>> + Send {
        std::future::ready(Ok(detect_edges(source.pixels(), method)))
    }
}
