//! Edge detection: 3×3 gradient kernels, the Laplacian and the Roberts cross.
//!
//! - Luma is read from the colour source at every sampled coordinate; nothing
//!   is converted to grayscale first.
//! - Output is written as `R = G = B = clamp(magnitude)`; alpha is kept.
//! - Pixels the operator window cannot cover keep their original colour.
//!   For 3×3 kernels that is the one-pixel frame, for Roberts the last row
//!   and column.

use crate::buffer::{clamp_to_byte, for_each_row, PixelBuffer, CHANNELS};
use crate::error::ImageError;
use crate::luma::luma_at;
use crate::threshold::threshold;
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// 3×3 weight matrix, indexed `[row][column]`.
pub type Kernel = [[f64; 3]; 3];

/// Sobel, horizontal derivative.
pub const SOBEL_X: Kernel = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
/// Sobel, vertical derivative.
pub const SOBEL_Y: Kernel = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Prewitt, horizontal derivative.
pub const PREWITT_X: Kernel = [[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]];
/// Prewitt, vertical derivative.
pub const PREWITT_Y: Kernel = [[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];

/// √2-weighted Sobel pair used for "frei-chen".
///
/// This is not the nine-mask Frei-Chen basis; it is the isotropic gradient
/// pair only, and results must stay identical to it.
pub const FREI_CHEN_X: Kernel = [[-1.0, 0.0, 1.0], [-SQRT_2, 0.0, SQRT_2], [-1.0, 0.0, 1.0]];
/// Vertical half of [`FREI_CHEN_X`].
pub const FREI_CHEN_Y: Kernel = [[-1.0, -SQRT_2, -1.0], [0.0, 0.0, 0.0], [1.0, SQRT_2, 1.0]];

/// Four-neighbour Laplacian.
pub const LAPLACE: Kernel = [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];

/// Edge detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeMethod {
    /// Sobel gradient
    Sobel,
    /// Prewitt gradient
    Prewitt,
    /// Roberts 2×2 diagonal cross
    Roberts,
    /// Laplacian (second derivative)
    Laplace,
    /// √2-weighted gradient
    FreiChen,
}

impl EdgeMethod {
    /// Every method, in menu order.
    pub const ALL: [EdgeMethod; 5] = [
        EdgeMethod::Sobel,
        EdgeMethod::Roberts,
        EdgeMethod::Prewitt,
        EdgeMethod::Laplace,
        EdgeMethod::FreiChen,
    ];

    /// Name used on the wire and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeMethod::Sobel => "sobel",
            EdgeMethod::Prewitt => "prewitt",
            EdgeMethod::Roberts => "roberts",
            EdgeMethod::Laplace => "laplace",
            EdgeMethod::FreiChen => "frei-chen",
        }
    }

    /// One-line characterisation for help output.
    pub fn description(&self) -> &'static str {
        match self {
            EdgeMethod::Sobel => "stable and tolerant of noise",
            EdgeMethod::Prewitt => "similar to Sobel with uniform weights",
            EdgeMethod::Roberts => "fast but sensitive to noise",
            EdgeMethod::Laplace => "second derivative, direction independent",
            EdgeMethod::FreiChen => "sqrt(2) weighted gradient, fine detail",
        }
    }

    /// The operator this method runs.
    pub fn operator(self) -> EdgeOperator {
        match self {
            EdgeMethod::Sobel => EdgeOperator::Gradient {
                x: &SOBEL_X,
                y: &SOBEL_Y,
            },
            EdgeMethod::Prewitt => EdgeOperator::Gradient {
                x: &PREWITT_X,
                y: &PREWITT_Y,
            },
            EdgeMethod::FreiChen => EdgeOperator::Gradient {
                x: &FREI_CHEN_X,
                y: &FREI_CHEN_Y,
            },
            EdgeMethod::Laplace => EdgeOperator::Laplacian(&LAPLACE),
            EdgeMethod::Roberts => EdgeOperator::RobertsCross,
        }
    }
}

impl fmt::Display for EdgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeMethod {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sobel" => Ok(EdgeMethod::Sobel),
            "prewitt" => Ok(EdgeMethod::Prewitt),
            "roberts" => Ok(EdgeMethod::Roberts),
            "laplace" | "laplacian" => Ok(EdgeMethod::Laplace),
            "frei-chen" | "freichen" | "frei_chen" => Ok(EdgeMethod::FreiChen),
            other => Err(ImageError::UnknownEdgeMethod(other.to_string())),
        }
    }
}

/// How an [`EdgeMethod`] turns neighbourhood luma into a magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeOperator {
    /// Kernel pair, magnitude `sqrt(gx² + gy²)`
    Gradient {
        /// Horizontal kernel
        x: &'static Kernel,
        /// Vertical kernel
        y: &'static Kernel,
    },
    /// Single kernel, magnitude `|g|`
    Laplacian(&'static Kernel),
    /// 2×2 diagonal differences on the forward neighbourhood
    RobertsCross,
}

/// Run `method` over `buffer`.
///
/// # Example
/// ```
/// use citra_image::{detect_edges, EdgeMethod, PixelBuffer};
///
/// let flat = PixelBuffer::filled(3, 3, [90, 90, 90, 255]).unwrap();
/// let edges = detect_edges(&flat, EdgeMethod::Sobel);
/// assert_eq!(edges.pixel(1, 1), Some([0, 0, 0, 255]));
/// assert_eq!(edges.pixel(0, 0), Some([90, 90, 90, 255]));
/// ```
pub fn detect_edges(buffer: &PixelBuffer, method: EdgeMethod) -> PixelBuffer {
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        method = %method,
        "edge detection"
    );
    match method.operator() {
        EdgeOperator::Gradient { x, y } => convolve(buffer, x, Some(y)),
        EdgeOperator::Laplacian(kernel) => convolve(buffer, kernel, None),
        EdgeOperator::RobertsCross => roberts_cross(buffer),
    }
}

/// Edge detection followed by binarization at `level`.
pub fn detect_edges_binarized(buffer: &PixelBuffer, method: EdgeMethod, level: i32) -> PixelBuffer {
    threshold(&detect_edges(buffer, method), level)
}

fn convolve(buffer: &PixelBuffer, kernel_x: &Kernel, kernel_y: Option<&Kernel>) -> PixelBuffer {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let src = buffer.as_bytes();
    let mut out = src.to_vec();

    if width < 3 || height < 3 {
        return buffer.with_data(out);
    }

    for_each_row(&mut out, buffer.row_stride(), |y, row| {
        if y == 0 || y == height - 1 {
            return;
        }
        for x in 1..width - 1 {
            let mut gx = 0.0;
            let mut gy = 0.0;
            for ky in 0..3 {
                for kx in 0..3 {
                    let l = luma_at(src, buffer.offset(x + kx - 1, y + ky - 1));
                    gx += l * kernel_x[ky][kx];
                    if let Some(kernel_y) = kernel_y {
                        gy += l * kernel_y[ky][kx];
                    }
                }
            }
            let magnitude = match kernel_y {
                Some(_) => (gx * gx + gy * gy).sqrt(),
                None => gx.abs(),
            };
            write_gray(row, x, clamp_to_byte(magnitude));
        }
    });

    buffer.with_data(out)
}

fn roberts_cross(buffer: &PixelBuffer) -> PixelBuffer {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let src = buffer.as_bytes();
    let mut out = src.to_vec();

    for_each_row(&mut out, buffer.row_stride(), |y, row| {
        if y + 1 >= height {
            return;
        }
        for x in 0..width - 1 {
            let p00 = luma_at(src, buffer.offset(x, y));
            let p01 = luma_at(src, buffer.offset(x + 1, y));
            let p10 = luma_at(src, buffer.offset(x, y + 1));
            let p11 = luma_at(src, buffer.offset(x + 1, y + 1));
            let gx = p00 - p11;
            let gy = p01 - p10;
            let magnitude = (gx * gx + gy * gy).sqrt().min(255.0);
            write_gray(row, x, clamp_to_byte(magnitude));
        }
    });

    buffer.with_data(out)
}

#[inline]
fn write_gray(row: &mut [u8], x: usize, value: u8) {
    let i = x * CHANNELS;
    row[i] = value;
    row[i + 1] = value;
    row[i + 2] = value;
}
