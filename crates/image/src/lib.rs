//! Pixel-level image transforms for Citra.
//!
//! This crate provides:
//! - An RGBA8 [`PixelBuffer`] whose length invariant is checked on construction
//! - Luma-based grayscale conversion
//! - Brightness/contrast remapping
//! - Threshold binarization
//! - A sampled luma histogram with an exposure classifier
//! - Sobel, Prewitt, Roberts, Laplacian and Frei-Chen style edge detection
//! - Decoding/encoding through the `image` crate (feature `processing`)
//!
//! Every transform borrows its input and returns a new buffer.
//!
//! # Example
//!
//! ```
//! use citra_image::{
//!     analyze_histogram, detect_edges, grayscale, histogram, EdgeMethod, PixelBuffer,
//! };
//!
//! let buffer = PixelBuffer::filled(4, 4, [30, 60, 90, 255]).unwrap();
//! let gray = grayscale(&buffer);
//! let edges = detect_edges(&gray, EdgeMethod::Sobel);
//! assert_eq!(edges.width(), 4);
//!
//! let analysis = analyze_histogram(&histogram(&buffer));
//! println!("{}: {}", analysis.status, analysis.title);
//! ```

#![warn(missing_docs)]

mod buffer;
mod detect;
mod detector;
mod edges;
mod error;
mod histogram;
mod luma;
mod threshold;
mod tone;

#[cfg(feature = "processing")]
pub mod codec;

pub use buffer::{clamp_to_byte, PixelBuffer, CHANNELS};
pub use detect::SourceFormat;
pub use detector::{EdgeDetector, EdgeSource, LocalEdgeDetector};
pub use edges::{
    detect_edges, detect_edges_binarized, EdgeMethod, EdgeOperator, Kernel, FREI_CHEN_X,
    FREI_CHEN_Y, LAPLACE, PREWITT_X, PREWITT_Y, SOBEL_X, SOBEL_Y,
};
pub use error::{ImageError, Result};
pub use histogram::{
    analyze_histogram, histogram, luma_histogram, HistogramAnalysis, HistogramBucket,
    HistogramStats, HistogramStatus, LumaHistogram, BRIGHT_ABOVE, BUCKET_COUNT, BUCKET_STEP,
    DARK_BELOW, LOW_CONTRAST_BELOW,
};
pub use luma::{grayscale, luma, LUMA_B, LUMA_G, LUMA_R};
pub use threshold::{threshold, DEFAULT_THRESHOLD};
pub use tone::{contrast_factor, tone_adjust, TONE_RANGE};
